//! Screen rendering for the interactive session
//!
//! Draws the help text, a cross through the middle of the screen and the
//! cursor position status line.

use crate::config::Config;
use crate::core::cursor::{AnchorCorner, CursorPosition, CursorProtocol, Direction};
use crate::core::error::Result;
use crate::core::size::TerminalSize;
use crate::ui::draw::LineDrawer;

/// Help shown in the top-left corner. Output post-processing is off in raw
/// mode, so lines end in CR LF.
pub const HELP_TEXT: &str = concat!(
    "This is basic cursor control test.\r\n",
    "w or UP arrow - move cursor up\r\n",
    "s or DOWN arrow - move cursor down\r\n",
    "a or Left arrow - move cursor left\r\n",
    "d or RIGHT arrow - move cursor right\r\n",
    "q - quit",
);

/// Status line text for `pos`. Trailing spaces cover longer previous values.
pub fn status_line(pos: CursorPosition) -> String {
    format!("Cursor position_x:{} position_y:{}  ", pos.col, pos.row)
}

/// Session renderer
pub struct Renderer {
    drawer: LineDrawer,
    show_status: bool,
}

impl Renderer {
    pub fn new(config: &Config) -> Self {
        Self {
            drawer: LineDrawer::new(&config.glyphs),
            show_status: config.status_line.visible,
        }
    }

    /// Clear the screen and print the help from the top-left corner.
    pub fn draw_help<T>(&self, io: &mut T) -> Result<()>
    where
        T: CursorProtocol + ?Sized,
    {
        io.clear_screen()?;
        io.move_to_anchor(AnchorCorner::TopLeft)?;
        io.clear_screen()?;
        io.write_exact(HELP_TEXT.as_bytes())
    }

    /// Draw a cross through the middle of the screen and park the cursor at
    /// its center.
    pub fn draw_cross<T>(&self, io: &mut T, size: TerminalSize) -> Result<()>
    where
        T: CursorProtocol + ?Sized,
    {
        let center_col = i32::from(size.width) / 2;
        let center_row = i32::from(size.height) / 2;

        for (length, direction) in [
            (center_row, Direction::Up),
            (center_row, Direction::Down),
            (center_col, Direction::Left),
            (center_col, Direction::Right),
        ] {
            self.drawer
                .draw_line(io, center_col, center_row, length, direction)?;
        }

        io.move_to_anchor(AnchorCorner::TopLeft)?;
        io.move_relative(Direction::Down, center_row)?;
        io.move_relative(Direction::Right, center_col)
    }

    /// Write the status line at the top-left and put the cursor back at `pos`.
    pub fn render_status<T>(&self, io: &mut T, pos: CursorPosition) -> Result<()>
    where
        T: CursorProtocol + ?Sized,
    {
        if !self.show_status {
            return Ok(());
        }
        io.move_to_anchor(AnchorCorner::TopLeft)?;
        io.write_exact(status_line(pos).as_bytes())?;
        io.move_to_position(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cursor::HOME;
    use crate::core::testing::FakeTerminal;

    #[test]
    fn test_status_line_text() {
        let pos = CursorPosition { col: 12, row: 7 };
        assert_eq!(status_line(pos), "Cursor position_x:12 position_y:7  ");
    }

    #[test]
    fn test_render_status_returns_cursor() {
        let mut term = FakeTerminal::new();
        let renderer = Renderer::new(&Config::default());
        let pos = CursorPosition { col: 2, row: 3 };
        renderer.render_status(&mut term, pos).unwrap();

        let mut expected = HOME.to_vec();
        expected.extend_from_slice(status_line(pos).as_bytes());
        expected.extend_from_slice(HOME);
        expected.extend_from_slice(b"\x1b[1C");
        expected.extend_from_slice(b"\x1b[1B\x1b[1B");
        assert_eq!(term.output(), expected);
    }

    #[test]
    fn test_hidden_status_writes_nothing() {
        let mut term = FakeTerminal::new();
        let mut config = Config::default();
        config.status_line.visible = false;

        Renderer::new(&config)
            .render_status(&mut term, CursorPosition { col: 1, row: 1 })
            .unwrap();
        assert!(term.writes.is_empty());
    }

    #[test]
    fn test_help_clears_first() {
        let mut term = FakeTerminal::new();
        Renderer::new(&Config::default()).draw_help(&mut term).unwrap();

        assert_eq!(
            term.writes,
            vec![
                b"\x1b[2J".to_vec(),
                HOME.to_vec(),
                b"\x1b[2J".to_vec(),
                HELP_TEXT.as_bytes().to_vec(),
            ]
        );
    }

    #[test]
    fn test_cross_through_center() {
        let mut term = FakeTerminal::new();
        let renderer = Renderer::new(&Config::default());
        renderer
            .draw_cross(&mut term, TerminalSize { width: 20, height: 10 })
            .unwrap();

        // Up and down are height / 2 each, left and right width / 2 each
        assert_eq!(term.count_writes(b"|"), 10);
        assert_eq!(term.count_writes(b"-"), 20);

        // Parked at the center: home, 5 down, 10 right
        let tail: Vec<Vec<u8>> = term.writes[term.writes.len() - 16..].to_vec();
        assert_eq!(tail[0], HOME.to_vec());
        assert!(tail[1..6].iter().all(|w| w.as_slice() == b"\x1b[1B"));
        assert!(tail[6..].iter().all(|w| w.as_slice() == b"\x1b[1C"));
    }
}
