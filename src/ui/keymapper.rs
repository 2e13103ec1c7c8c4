//! Key mapping for the interactive loop
//!
//! Turns raw input bytes into steering actions. Arrow keys arrive as
//! `ESC [ <key>` (or `ESC O <key>` in application cursor mode).

use crate::core::cursor::Direction;
use crate::core::error::Result;
use crate::core::io::EscapeIo;

const ESC: u8 = 0x1B;
const CTRL_C: u8 = 0x03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Quit,
    /// Any other byte or sequence, ignored by the loop
    Ignore,
}

/// Key mapper for converting input bytes to actions
pub struct KeyMapper;

impl KeyMapper {
    /// Map a single plain key byte
    pub fn map(byte: u8) -> Action {
        match byte {
            b'w' => Action::Move(Direction::Up),
            b's' => Action::Move(Direction::Down),
            b'a' => Action::Move(Direction::Left),
            b'd' => Action::Move(Direction::Right),
            // ISIG is off in raw mode, so Ctrl+C arrives as a byte
            b'q' | CTRL_C => Action::Quit,
            _ => Action::Ignore,
        }
    }

    /// Map the final byte of an arrow key sequence
    pub fn map_arrow(key: u8) -> Action {
        match key {
            b'A' => Action::Move(Direction::Up),
            b'B' => Action::Move(Direction::Down),
            b'C' => Action::Move(Direction::Right),
            b'D' => Action::Move(Direction::Left),
            _ => Action::Ignore,
        }
    }

    /// Read one key from `io` and map it.
    ///
    /// A lone ESC waits for the next byte; there is no escape timeout.
    pub fn read_action<T: EscapeIo + ?Sized>(io: &mut T) -> Result<Action> {
        let byte = io.read_byte()?;
        if byte != ESC {
            return Ok(Self::map(byte));
        }

        match io.read_byte()? {
            b'[' | b'O' => Ok(Self::map_arrow(io.read_byte()?)),
            other => Ok(Self::map(other)),
        }
    }
}
