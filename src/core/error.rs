//! Error types shared by the terminal control core.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TermError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[source] io::Error),

    #[error("Short write: device accepted {written} of {expected} bytes")]
    ShortWrite { expected: usize, written: usize },

    #[error("Input stream closed")]
    Eof,

    #[error("Failed to read terminal settings: {0}")]
    TerminalQuery(#[source] io::Error),

    #[error("Failed to apply terminal settings: {0}")]
    TerminalConfigure(#[source] io::Error),

    #[error("Malformed cursor position response: {0}")]
    MalformedResponse(String),

    #[error("Could not determine terminal size: {0}")]
    SizeDetection(String),
}

pub type Result<T> = std::result::Result<T, TermError>;
