//! Text rendering for running without panel hardware.

use std::io::Write;

use super::{FrameSink, SinkError, Which};
use crate::compute::Board;

/// Brightness ramp, darkest first.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Draws frames as text, one character per cell.
///
/// Left and right destinations are not distinguished; both draw to the
/// same writer.
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    alive: char,
    dead: char,
    /// Move the cursor home before each frame instead of scrolling.
    redraw_in_place: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            alive: '#',
            dead: '.',
            redraw_in_place: false,
        }
    }

    /// Redraw each frame over the previous one with ANSI escapes.
    pub fn in_place(mut self) -> Self {
        self.redraw_in_place = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &Board, glyph: impl Fn(u8) -> char) -> Result<(), SinkError> {
        let mut text = String::with_capacity((frame.width() + 1) * frame.height() + 8);
        if self.redraw_in_place {
            text.push_str("\x1b[H\x1b[2J");
        }
        for row in frame.rows() {
            text.extend(row.iter().map(|&cell| glyph(cell)));
            text.push('\n');
        }
        text.push('\n');
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

fn ramp_glyph(level: u8) -> char {
    let index = level as usize * (RAMP.len() - 1) / 255;
    RAMP[index] as char
}

impl<W: Write> FrameSink for TerminalSink<W> {
    fn render(&mut self, frame: &Board, _which: Which) -> Result<(), SinkError> {
        let (alive, dead) = (self.alive, self.dead);
        self.draw(frame, |cell| if cell != 0 { alive } else { dead })
    }

    fn render_greyscale(&mut self, frame: &Board, _which: Which) -> Result<(), SinkError> {
        self.draw(frame, ramp_glyph)
    }

    fn clear(&mut self, _which: Which) -> Result<(), SinkError> {
        if self.redraw_in_place {
            self.out.write_all(b"\x1b[H\x1b[2J")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn set_animation_mode(&mut self, _enabled: bool) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mono() {
        let mut board = Board::new(2, 3, 0);
        board.set(0, 1, 1);
        board.set(1, 2, 5);
        let mut sink = TerminalSink::new(Vec::new());
        sink.render(&board, Which::Both).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, ".#.\n..#\n\n");
    }

    #[test]
    fn test_greyscale_ramp_ends() {
        assert_eq!(ramp_glyph(0), ' ');
        assert_eq!(ramp_glyph(255), '@');
        let mut board = Board::new(1, 2, 255);
        board.set(0, 0, 0);
        let mut sink = TerminalSink::new(Vec::new());
        sink.render_greyscale(&board, Which::Left).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), " @\n\n");
    }

    #[test]
    fn test_clear_only_writes_in_place() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.clear(Which::Both).unwrap();
        assert!(sink.into_inner().is_empty());

        let mut sink = TerminalSink::new(Vec::new()).in_place();
        sink.clear(Which::Both).unwrap();
        assert_eq!(sink.into_inner(), b"\x1b[H\x1b[2J".to_vec());
    }
}
