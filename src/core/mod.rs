//! Terminal control core.
//!
//! - **tty**: the controlling terminal, its line discipline settings and window size
//! - **raw_mode**: entering and leaving raw mode, with a restoring guard
//! - **io**: unbuffered escape sequence writes and single-byte reads
//! - **cursor**: position query, relative moves, corner anchors
//! - **size**: terminal size from the OS, or by probing with the cursor
//! - **signals**: settings restore on termination signals
//!
//! # Layering
//!
//! ```text
//! RawMode<Tty>
//! └── Tty (TerminalDevice + Read + Write)
//!     └── EscapeIo
//!         └── CursorProtocol
//!             └── size::detect (also uses TerminalDevice::window_size)
//! ```

pub mod cursor;
pub mod error;
pub mod io;
pub mod raw_mode;
pub mod signals;
pub mod size;
pub mod tty;

#[cfg(test)]
pub mod testing;
