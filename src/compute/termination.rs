//! Termination detection over a rolling two-board history.

use log::debug;
use serde::{Deserialize, Serialize};

use super::Board;
use crate::schema::TerminationConfig;

/// Why the detector asked the run to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Every cell is at the background state.
    Empty,
    /// The board matched its predecessor for `stable_patience` generations.
    Stable,
    /// The board matched the board two generations back (but not its
    /// predecessor) for `oscillation_patience` generations.
    Oscillating,
}

/// Watches successive boards for empty, still and period-2 states.
#[derive(Debug, Clone)]
pub struct TerminationDetector {
    config: TerminationConfig,
    previous: Option<Board>,
    two_ago: Option<Board>,
    empty_count: u32,
    stable_count: u32,
    oscillation_count: u32,
}

impl TerminationDetector {
    pub fn new(config: TerminationConfig) -> Self {
        Self {
            config,
            previous: None,
            two_ago: None,
            empty_count: 0,
            stable_count: 0,
            oscillation_count: 0,
        }
    }

    /// Feed the next generation; returns the first condition whose counter
    /// reached its patience.
    pub fn observe(&mut self, board: &Board) -> Option<Termination> {
        if board.is_blank() {
            self.empty_count += 1;
        } else {
            self.empty_count = 0;
        }

        if self.previous.as_ref().is_some_and(|p| p.equals(board)) {
            self.stable_count += 1;
            self.oscillation_count = 0;
            debug!("board stable, count {}", self.stable_count);
        } else if self.two_ago.as_ref().is_some_and(|p| p.equals(board)) {
            self.oscillation_count += 1;
            self.stable_count = 0;
            debug!("board oscillating (p=2), count {}", self.oscillation_count);
        } else {
            self.stable_count = 0;
            self.oscillation_count = 0;
        }

        self.two_ago = self.previous.replace(board.clone());

        if self.empty_count >= self.config.empty_patience {
            Some(Termination::Empty)
        } else if self.stable_count >= self.config.stable_patience {
            Some(Termination::Stable)
        } else if self.oscillation_count >= self.config.oscillation_patience {
            Some(Termination::Oscillating)
        } else {
            None
        }
    }

    pub fn stable_count(&self) -> u32 {
        self.stable_count
    }

    pub fn oscillation_count(&self) -> u32 {
        self.oscillation_count
    }
}
