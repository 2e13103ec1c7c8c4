//! Line drawing with cursor moves
//!
//! Every glyph position is reached from home with relative moves, so the
//! coordinates here are step counts from the top-left cell.
//!
//! Two quirks are kept as-is: `Left` writes its glyphs from wherever the cursor
//! already is (each glyph advances it to the right), and `Right` steps the
//! column backwards. Drawing both from the same start yields a full horizontal
//! bar centered on it.

use crate::config::GlyphConfig;
use crate::core::cursor::{AnchorCorner, CursorProtocol, Direction};
use crate::core::error::Result;

/// Draws straight runs of glyphs.
#[derive(Debug, Clone, Copy)]
pub struct LineDrawer {
    vertical: char,
    horizontal: char,
}

impl Default for LineDrawer {
    fn default() -> Self {
        Self::new(&GlyphConfig::default())
    }
}

impl LineDrawer {
    pub fn new(glyphs: &GlyphConfig) -> Self {
        Self {
            vertical: glyphs.vertical,
            horizontal: glyphs.horizontal,
        }
    }

    /// Draw `length` glyphs starting at (`start_col`, `start_row`).
    ///
    /// The first failed write aborts the line.
    pub fn draw_line<T>(
        &self,
        io: &mut T,
        start_col: i32,
        start_row: i32,
        length: i32,
        direction: Direction,
    ) -> Result<()>
    where
        T: CursorProtocol + ?Sized,
    {
        let mut col = start_col;
        let mut row = start_row;

        goto(io, start_col, start_row)?;

        for _ in 0..length.max(0) {
            match direction {
                Direction::Up | Direction::Down => {
                    goto(io, start_col, row)?;
                    put_glyph(io, self.vertical)?;
                    row += if direction == Direction::Up { -1 } else { 1 };
                }
                Direction::Left => put_glyph(io, self.horizontal)?,
                Direction::Right => {
                    goto(io, col, row)?;
                    put_glyph(io, self.horizontal)?;
                    col -= 1;
                }
            }
        }
        Ok(())
    }
}

fn goto<T: CursorProtocol + ?Sized>(io: &mut T, col: i32, row: i32) -> Result<()> {
    io.move_to_anchor(AnchorCorner::TopLeft)?;
    io.move_relative(Direction::Right, col)?;
    io.move_relative(Direction::Down, row)
}

fn put_glyph<T: CursorProtocol + ?Sized>(io: &mut T, glyph: char) -> Result<()> {
    let mut buf = [0u8; 4];
    io.write_exact(glyph.encode_utf8(&mut buf).as_bytes())
}
