//! VT100 cursor protocol
//!
//! Position queries, one-cell relative moves and the four corner anchors, all
//! expressed over [`EscapeIo`].
//!
//! The position query is a write followed by a read of the reply. Nothing else
//! may write to the device in between or the reply cannot be parsed.

use crossterm::cursor::{MoveDown, MoveLeft, MoveRight, MoveUp};
use crossterm::terminal::{Clear, ClearType};
use crossterm::Command;

use super::error::{Result, TermError};
use super::io::EscapeIo;

/// Device status report request: ESC [ 6 n
pub const QUERY_POSITION: &[u8] = b"\x1b[6n";

/// Cursor home: ESC [ 0 ; 0 f
pub const HOME: &[u8] = b"\x1b[0;0f";

/// Upper bound on the length of a position report, terminator included.
pub const RESPONSE_LIMIT: usize = 32;

/// Relative move larger than any real screen, used to reach an edge.
pub const DEFAULT_PROBE_DISTANCE: i32 = 999;

/// 1-based cursor position as reported by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub col: u16,
    pub row: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Escape sequence moving the cursor one cell this way.
    pub fn step_sequence(self) -> String {
        match self {
            Direction::Up => ansi(MoveUp(1)),
            Direction::Down => ansi(MoveDown(1)),
            Direction::Right => ansi(MoveRight(1)),
            Direction::Left => ansi(MoveLeft(1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorCorner {
    TopLeft,
    #[allow(dead_code)]
    TopRight,
    #[allow(dead_code)]
    BottomLeft,
    BottomRight,
}

fn ansi(command: impl Command) -> String {
    let mut out = String::new();
    // Formatting into a String cannot fail
    let _ = command.write_ansi(&mut out);
    out
}

/// Parse the body of a position report, `ESC [ <row> ; <col>` without the `R`.
///
/// The first two bytes are skipped unread.
pub fn parse_position_report(report: &[u8]) -> Result<CursorPosition> {
    let malformed = || {
        TermError::MalformedResponse(format!(
            "{:?}",
            String::from_utf8_lossy(report)
        ))
    };

    let body = report.get(2..).ok_or_else(malformed)?;
    let text = std::str::from_utf8(body).map_err(|_| malformed())?;
    let (row, col) = text.split_once(';').ok_or_else(malformed)?;
    let row = row.trim().parse::<u16>().map_err(|_| malformed())?;
    let col = col.trim().parse::<u16>().map_err(|_| malformed())?;

    Ok(CursorPosition { col, row })
}

/// Cursor operations, available on anything that speaks [`EscapeIo`].
pub trait CursorProtocol: EscapeIo {
    /// Ask the terminal where the cursor is.
    fn query_position(&mut self) -> Result<CursorPosition> {
        self.write_exact(QUERY_POSITION)?;

        let mut report = Vec::with_capacity(RESPONSE_LIMIT);
        while report.len() < RESPONSE_LIMIT {
            let byte = self.read_byte()?;
            if byte == b'R' {
                return parse_position_report(&report);
            }
            report.push(byte);
        }

        Err(TermError::MalformedResponse(format!(
            "no terminator within {} bytes",
            RESPONSE_LIMIT
        )))
    }

    /// Move `count` cells, one write per cell. Non-positive counts do nothing.
    ///
    /// On failure the number of steps taken is unknown; query the position
    /// instead of assuming partial progress.
    fn move_relative(&mut self, direction: Direction, count: i32) -> Result<()> {
        if count <= 0 {
            return Ok(());
        }
        let step = direction.step_sequence();
        for _ in 0..count {
            self.write_exact(step.as_bytes())?;
        }
        Ok(())
    }

    /// Move to a corner using the default probe distance.
    fn move_to_anchor(&mut self, corner: AnchorCorner) -> Result<()> {
        self.move_to_anchor_with(corner, DEFAULT_PROBE_DISTANCE)
    }

    /// Move to a corner. Everything but the top-left corner relies on the
    /// terminal clamping moves at the screen edge; `distance` must exceed the
    /// screen size for that to land exactly.
    fn move_to_anchor_with(&mut self, corner: AnchorCorner, distance: i32) -> Result<()> {
        match corner {
            AnchorCorner::TopLeft => self.write_exact(HOME),
            AnchorCorner::TopRight => {
                self.move_relative(Direction::Up, distance)?;
                self.move_relative(Direction::Right, distance)
            }
            AnchorCorner::BottomLeft => {
                self.move_relative(Direction::Down, distance)?;
                self.move_relative(Direction::Left, distance)
            }
            AnchorCorner::BottomRight => {
                self.move_relative(Direction::Down, distance)?;
                self.move_relative(Direction::Right, distance)
            }
        }
    }

    /// Go home, then step right and down to `position`.
    fn move_to_position(&mut self, position: CursorPosition) -> Result<()> {
        self.move_to_anchor(AnchorCorner::TopLeft)?;
        self.move_relative(Direction::Right, i32::from(position.col) - 1)?;
        self.move_relative(Direction::Down, i32::from(position.row) - 1)
    }

    fn clear_screen(&mut self) -> Result<()> {
        self.write_exact(ansi(Clear(ClearType::All)).as_bytes())
    }
}

impl<T: EscapeIo + ?Sized> CursorProtocol for T {}
