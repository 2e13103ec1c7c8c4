//! Unbuffered escape sequence I/O
//!
//! Every call is a single device operation. A write that transfers fewer bytes
//! than requested is an error and is not retried.

use std::io::{Read, Write};

use super::error::{Result, TermError};

/// Raw byte exchange with the terminal.
pub trait EscapeIo {
    /// Write `bytes` in one device write.
    fn write_exact(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read a single byte. Returns [`TermError::Eof`] once input is closed.
    fn read_byte(&mut self) -> Result<u8>;
}

impl<T: Read + Write + ?Sized> EscapeIo for T {
    fn write_exact(&mut self, bytes: &[u8]) -> Result<()> {
        let written = self.write(bytes).map_err(TermError::Io)?;
        if written != bytes.len() {
            return Err(TermError::ShortWrite {
                expected: bytes.len(),
                written,
            });
        }
        self.flush().map_err(TermError::Io)
    }

    fn read_byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        match self.read(&mut buf) {
            Ok(0) => Err(TermError::Eof),
            Ok(_) => Ok(buf[0]),
            Err(e) => Err(TermError::Io(e)),
        }
    }
}
