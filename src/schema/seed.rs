//! Initial-state descriptions for automaton runs.

use serde::{Deserialize, Serialize};

use crate::compute::Cell;

/// How to build the first board of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InitialState {
    /// A preset from the named pattern table.
    Named { name: String },
    /// A random entry from the named pattern table.
    AnyPreset,
    /// An explicit grid, used as-is.
    Literal { rows: Vec<Vec<Cell>> },
    /// An occupancy mask; every nonzero cell gets a state from the rule's
    /// seeding palette (e.g. a random particle direction for HPP).
    Occupancy { rows: Vec<Vec<Cell>> },
    /// `floor(cells * density)` distinct random cells from the seeding palette.
    Random { density: f32 },
    /// A single cell with `state` at the centre of the board.
    Center { state: Cell },
}

/// Errors raised while building the initial board.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Pattern {name:?} not found; available patterns: {}", available.join(", "))]
    UnknownPreset {
        name: String,
        available: Vec<&'static str>,
    },
    #[error("No initial state given and the rule has no default")]
    MissingInitialState,
    #[error("Grid rows must be non-empty and equally long")]
    RaggedGrid,
    #[error("Grid is {rows}x{cols}, board is {height}x{width}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        height: usize,
        width: usize,
    },
    #[error("Cell ({row}, {col}) has state {state}, rule allows 0..{alphabet}")]
    StateOutOfRange {
        row: usize,
        col: usize,
        state: Cell,
        alphabet: usize,
    },
}
