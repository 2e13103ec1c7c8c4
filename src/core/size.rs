//! Terminal size detection
//!
//! The OS window size is authoritative. When it is unavailable, or reports zero
//! columns, the cursor is pushed past the bottom-right corner and its clamped
//! position is read back as the size.

use tracing::{debug, warn};

use super::cursor::{AnchorCorner, CursorProtocol};
use super::error::{Result, TermError};
use super::io::EscapeIo;
use super::tty::TerminalDevice;

/// Screen size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

/// Detect the screen size. `probe_distance` bounds the fallback's edge moves.
pub fn detect<D>(device: &mut D, probe_distance: i32) -> Result<TerminalSize>
where
    D: TerminalDevice + EscapeIo + ?Sized,
{
    match device.window_size() {
        Ok(ws) if ws.cols != 0 => {
            debug!("Window size from OS: {}x{}", ws.cols, ws.rows);
            return Ok(TerminalSize {
                width: ws.cols,
                height: ws.rows,
            });
        }
        Ok(_) => debug!("OS reported zero columns, probing with cursor"),
        Err(e) => debug!("Window size query failed ({}), probing with cursor", e),
    }

    probe(device, probe_distance)
}

/// Measure the screen by moving to the bottom-right edge and asking where the
/// cursor ended up. The starting cursor position is restored best-effort.
pub fn probe<D>(device: &mut D, distance: i32) -> Result<TerminalSize>
where
    D: CursorProtocol + ?Sized,
{
    let saved = device
        .query_position()
        .map_err(|e| TermError::SizeDetection(format!("saving cursor position: {}", e)))?;

    device.move_to_anchor_with(AnchorCorner::BottomRight, distance)?;

    let edge = device
        .query_position()
        .map_err(|e| TermError::SizeDetection(format!("reading edge position: {}", e)))?;

    if let Err(e) = device.move_to_position(saved) {
        warn!("Could not restore cursor after size probe: {}", e);
    }

    debug!("Window size from probe: {}x{}", edge.col, edge.row);
    Ok(TerminalSize {
        width: edge.col,
        height: edge.row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cursor::{DEFAULT_PROBE_DISTANCE, HOME, QUERY_POSITION};
    use crate::core::testing::FakeTerminal;
    use crate::core::tty::WindowSize;

    #[test]
    fn test_os_size_wins() {
        let mut term = FakeTerminal::new();
        term.window = Some(WindowSize { rows: 24, cols: 80 });

        let size = detect(&mut term, DEFAULT_PROBE_DISTANCE).unwrap();
        assert_eq!(size, TerminalSize { width: 80, height: 24 });
        assert!(term.writes.is_empty());
    }

    #[test]
    fn test_zero_columns_falls_back() {
        let mut term = FakeTerminal::with_input(b"\x1b[5;10R\x1b[24;80R");
        term.window = Some(WindowSize { rows: 24, cols: 0 });

        let size = detect(&mut term, DEFAULT_PROBE_DISTANCE).unwrap();
        assert_eq!(size, TerminalSize { width: 80, height: 24 });
        assert_eq!(term.count_writes(QUERY_POSITION), 2);
        assert_eq!(term.count_writes(b"\x1b[1B"), 999 + 4);
        assert_eq!(term.count_writes(b"\x1b[1C"), 999 + 9);
    }

    #[test]
    fn test_probe_restores_cursor() {
        let mut term = FakeTerminal::with_input(b"\x1b[2;3R\x1b[40;120R");

        let size = probe(&mut term, 5).unwrap();
        assert_eq!(size, TerminalSize { width: 120, height: 40 });

        let mut expected = QUERY_POSITION.to_vec();
        expected.extend_from_slice(&b"\x1b[1B".repeat(5));
        expected.extend_from_slice(&b"\x1b[1C".repeat(5));
        expected.extend_from_slice(QUERY_POSITION);
        expected.extend_from_slice(HOME);
        expected.extend_from_slice(&b"\x1b[1C".repeat(2));
        expected.extend_from_slice(b"\x1b[1B");
        assert_eq!(term.output(), expected);
    }

    #[test]
    fn test_both_tiers_fail() {
        // No OS size and no reply to the position query
        let mut term = FakeTerminal::new();

        assert!(matches!(
            detect(&mut term, DEFAULT_PROBE_DISTANCE),
            Err(TermError::SizeDetection(_))
        ));
    }

    #[test]
    fn test_restore_failure_is_swallowed() {
        let mut term = FakeTerminal::with_input(b"\x1b[1;1R\x1b[10;20R");
        // Fail the home write after the second query
        term.short_write_at = Some(1 + 3 + 3 + 1);

        let size = probe(&mut term, 3).unwrap();
        assert_eq!(size, TerminalSize { width: 20, height: 10 });
    }
}
