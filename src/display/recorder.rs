//! In-memory sink that records every call it receives.

use super::{FrameSink, SinkError, Which};
use crate::compute::Board;

/// One call made on a [`FrameRecorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Render(Board, Which),
    RenderGreyscale(Board, Which),
    Clear(Which),
    Animation(bool),
}

/// Records frames instead of showing them.
///
/// Useful for tests and for capturing a run for later playback.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    events: Vec<SinkEvent>,
    fail_renders: bool,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose render calls all fail with an I/O error. Clear and
    /// animation calls still succeed.
    pub fn failing_renders() -> Self {
        Self {
            events: Vec::new(),
            fail_renders: true,
        }
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Boards passed to successful render calls, in order.
    pub fn frames(&self) -> Vec<&Board> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Render(b, _) | SinkEvent::RenderGreyscale(b, _) => Some(b),
                _ => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Clear(_)))
            .count()
    }

    fn check(&self) -> Result<(), SinkError> {
        if self.fail_renders {
            return Err(SinkError::Io(std::io::Error::other("render disabled")));
        }
        Ok(())
    }
}

impl FrameSink for FrameRecorder {
    fn render(&mut self, frame: &Board, which: Which) -> Result<(), SinkError> {
        self.check()?;
        self.events.push(SinkEvent::Render(frame.clone(), which));
        Ok(())
    }

    fn render_greyscale(&mut self, frame: &Board, which: Which) -> Result<(), SinkError> {
        self.check()?;
        self.events
            .push(SinkEvent::RenderGreyscale(frame.clone(), which));
        Ok(())
    }

    fn clear(&mut self, which: Which) -> Result<(), SinkError> {
        self.events.push(SinkEvent::Clear(which));
        Ok(())
    }

    fn set_animation_mode(&mut self, enabled: bool) -> Result<(), SinkError> {
        self.events.push(SinkEvent::Animation(enabled));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Frame;

    #[test]
    fn test_show_dispatches_on_frame_kind() {
        let board = Board::new(2, 2, 1);
        let mut sink = FrameRecorder::new();
        sink.show(&Frame::Mono(board.clone()), Which::Left).unwrap();
        sink.show(&Frame::Greyscale(board.clone()), Which::Right).unwrap();
        assert_eq!(
            sink.events(),
            &[
                SinkEvent::Render(board.clone(), Which::Left),
                SinkEvent::RenderGreyscale(board, Which::Right),
            ]
        );
        assert_eq!(sink.frames().len(), 2);
    }

    #[test]
    fn test_failing_renders() {
        let mut sink = FrameRecorder::failing_renders();
        assert!(sink.render(&Board::new(1, 1, 0), Which::Both).is_err());
        sink.clear(Which::Both).unwrap();
        assert_eq!(sink.events(), &[SinkEvent::Clear(Which::Both)]);
        assert_eq!(sink.clear_count(), 1);
    }
}
