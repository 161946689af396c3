//! The frame sink contract between simulations and displays.

use std::io;

use serde::{Deserialize, Serialize};

use crate::compute::Board;

/// Which panel(s) a frame goes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Which {
    Left,
    Right,
    #[default]
    Both,
}

impl Which {
    pub fn includes_left(self) -> bool {
        matches!(self, Which::Left | Which::Both)
    }

    pub fn includes_right(self) -> bool {
        matches!(self, Which::Right | Which::Both)
    }
}

/// A board ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// On/off pixels; any nonzero cell is lit.
    Mono(Board),
    /// Per-pixel brightness in 0..=255.
    Greyscale(Board),
}

/// Display errors. None of these are fatal to a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Display I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("No {0:?} panel is connected")]
    Unavailable(Which),
    #[error("Panel expects a {expected_height}x{expected_width} frame, got {height}x{width}")]
    FrameShape {
        height: usize,
        width: usize,
        expected_height: usize,
        expected_width: usize,
    },
}

/// Something that can show frames, e.g. a pair of LED panels.
///
/// Sinks are owned by the caller and borrowed by a run.
pub trait FrameSink {
    /// Draw on/off pixels.
    fn render(&mut self, frame: &Board, which: Which) -> Result<(), SinkError>;

    /// Draw per-pixel brightness (0..=255).
    fn render_greyscale(&mut self, frame: &Board, which: Which) -> Result<(), SinkError>;

    /// Switch every pixel off.
    fn clear(&mut self, which: Which) -> Result<(), SinkError>;

    /// Start or stop the hardware's built-in animation.
    fn set_animation_mode(&mut self, enabled: bool) -> Result<(), SinkError>;

    /// Draw a frame with whichever method its kind needs.
    fn show(&mut self, frame: &Frame, which: Which) -> Result<(), SinkError> {
        match frame {
            Frame::Mono(b) => self.render(b, which),
            Frame::Greyscale(b) => self.render_greyscale(b, which),
        }
    }
}
