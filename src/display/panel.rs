//! Wire codec for the 9x34 LED matrix panels.
//!
//! Every command is `[0x32, 0xAC, id, params...]`. A panel pair is driven as
//! two independent byte streams, one per side. Opening and configuring the
//! serial device is left to the caller; anything that implements
//! [`std::io::Write`] will do.

use std::io::Write;

use log::debug;

use super::{FrameSink, SinkError, Which};
use crate::compute::Board;
use crate::schema::{PANEL_HEIGHT, PANEL_WIDTH};

const MAGIC: [u8; 2] = [0x32, 0xAC];

/// Bytes in a bit-packed monochrome frame: ceil(34 * 9 / 8).
pub const BITMAP_BYTES: usize = (PANEL_HEIGHT * PANEL_WIDTH).div_ceil(8);

/// Panel command identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    Brightness = 0x00,
    Animate = 0x04,
    DrawBw = 0x06,
    StageCol = 0x07,
    FlushCols = 0x08,
}

/// Frame a command and its parameters for the wire.
pub fn encode(command: Command, params: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(3 + params.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.push(command as u8);
    bytes.extend_from_slice(params);
    bytes
}

fn check_shape(frame: &Board) -> Result<(), SinkError> {
    if frame.height() != PANEL_HEIGHT || frame.width() != PANEL_WIDTH {
        return Err(SinkError::FrameShape {
            height: frame.height(),
            width: frame.width(),
            expected_height: PANEL_HEIGHT,
            expected_width: PANEL_WIDTH,
        });
    }
    Ok(())
}

/// Pack a 34x9 frame into the `drawbw` payload.
///
/// Bit `col + row * 9` is set when the cell is nonzero, least significant
/// bit first within each byte.
pub fn pack_bitmap(frame: &Board) -> Result<[u8; BITMAP_BYTES], SinkError> {
    check_shape(frame)?;
    let mut bytes = [0u8; BITMAP_BYTES];
    for (i, &cell) in frame.cells().iter().enumerate() {
        if cell != 0 {
            bytes[i / 8] |= 1 << (i % 8);
        }
    }
    Ok(bytes)
}

/// `stagecol` payloads, one per column: `[col, 34 brightness bytes]`.
pub fn stage_columns(frame: &Board) -> Result<Vec<Vec<u8>>, SinkError> {
    check_shape(frame)?;
    Ok((0..PANEL_WIDTH)
        .map(|col| {
            let mut params = Vec::with_capacity(1 + PANEL_HEIGHT);
            params.push(col as u8);
            params.extend((0..PANEL_HEIGHT).map(|row| frame.at(row, col)));
            params
        })
        .collect())
}

/// A left/right pair of LED panels, each behind its own writer.
#[derive(Debug)]
pub struct MatrixPanel<W: Write> {
    left: Option<W>,
    right: Option<W>,
}

impl<W: Write> MatrixPanel<W> {
    pub fn new(left: Option<W>, right: Option<W>) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> Option<&W> {
        self.left.as_ref()
    }

    pub fn right(&self) -> Option<&W> {
        self.right.as_ref()
    }

    pub fn into_inner(self) -> (Option<W>, Option<W>) {
        (self.left, self.right)
    }

    /// Set global brightness on the selected panels.
    pub fn set_brightness(&mut self, level: u8, which: Which) -> Result<(), SinkError> {
        self.send(which, &encode(Command::Brightness, &[level]))
    }

    fn targets(&mut self, which: Which) -> Result<Vec<&mut W>, SinkError> {
        let mut out = Vec::with_capacity(2);
        if which.includes_left() {
            match self.left.as_mut() {
                Some(w) => out.push(w),
                None if which == Which::Left => return Err(SinkError::Unavailable(Which::Left)),
                None => {}
            }
        }
        if which.includes_right() {
            match self.right.as_mut() {
                Some(w) => out.push(w),
                None if which == Which::Right => {
                    return Err(SinkError::Unavailable(Which::Right));
                }
                None => {}
            }
        }
        if out.is_empty() {
            return Err(SinkError::Unavailable(which));
        }
        Ok(out)
    }

    fn send(&mut self, which: Which, bytes: &[u8]) -> Result<(), SinkError> {
        for w in self.targets(which)? {
            w.write_all(bytes)?;
            w.flush()?;
        }
        Ok(())
    }
}

impl<W: Write> FrameSink for MatrixPanel<W> {
    fn render(&mut self, frame: &Board, which: Which) -> Result<(), SinkError> {
        let bitmap = pack_bitmap(frame)?;
        self.send(which, &encode(Command::DrawBw, &bitmap))
    }

    fn render_greyscale(&mut self, frame: &Board, which: Which) -> Result<(), SinkError> {
        let columns = stage_columns(frame)?;
        let mut bytes = Vec::new();
        for params in &columns {
            bytes.extend(encode(Command::StageCol, params));
        }
        bytes.extend(encode(Command::FlushCols, &[]));
        self.send(which, &bytes)
    }

    fn clear(&mut self, which: Which) -> Result<(), SinkError> {
        debug!("Clearing {which:?} panel(s)");
        self.send(which, &encode(Command::DrawBw, &[0u8; BITMAP_BYTES]))
    }

    fn set_animation_mode(&mut self, enabled: bool) -> Result<(), SinkError> {
        self.send(Which::Both, &encode(Command::Animate, &[enabled as u8]))
    }
}
