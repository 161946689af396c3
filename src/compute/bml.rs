//! Biham-Middleton-Levine traffic model.
//!
//! Red cars move right, blue cars move down, and the two colours take turns:
//! even generations are red phases, odd generations are blue phases. Within a
//! phase every car decides from the same frozen snapshot, so a car never moves
//! into a cell that another car vacated during the same phase.

use rand::rngs::StdRng;

use super::{Board, Cell, LocalRule, step};
use crate::display::Frame;

pub const EMPTY: Cell = 0;
pub const RED: Cell = 1;
pub const BLUE: Cell = 2;

/// Which colour may move during a half-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Red,
    Blue,
}

impl Phase {
    /// Phase for a zero-based generation index; generation 0 moves red.
    #[inline]
    pub fn for_generation(generation: u64) -> Self {
        if generation % 2 == 0 {
            Phase::Red
        } else {
            Phase::Blue
        }
    }

    pub fn car(self) -> Cell {
        match self {
            Phase::Red => RED,
            Phase::Blue => BLUE,
        }
    }

    /// Row/column step a car of this colour takes.
    fn heading(self) -> (isize, isize) {
        match self {
            Phase::Red => (0, 1),
            Phase::Blue => (1, 0),
        }
    }
}

/// The BML rule. Stateless; the phase comes from the generation index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bml;

impl Bml {
    /// Run one half-step and report how many cars moved.
    ///
    /// Zero moves means the board is gridlocked for this phase.
    pub fn half_step(&self, board: &Board, phase: Phase) -> (Board, usize) {
        let generation = match phase {
            Phase::Red => 0,
            Phase::Blue => 1,
        };
        let next = step(self, board, generation);
        // Every move empties one cell and fills another.
        (next.board, next.changed / 2)
    }
}

impl LocalRule for Bml {
    fn alphabet(&self) -> usize {
        3
    }

    fn next_state(&self, board: &Board, row: usize, col: usize, generation: u64) -> Cell {
        let phase = Phase::for_generation(generation);
        let car = phase.car();
        let (dr, dc) = phase.heading();
        let (r, c) = (row as isize, col as isize);

        match board.at(row, col) {
            s if s == car => {
                if board.get(r + dr, c + dc) == EMPTY {
                    EMPTY
                } else {
                    car
                }
            }
            EMPTY => {
                if board.get(r - dr, c - dc) == car {
                    car
                } else {
                    EMPTY
                }
            }
            other => other,
        }
    }

    /// The first half of the seeded cars are red, the rest blue.
    fn seed_state(&self, index: usize, total: usize, _rng: &mut StdRng) -> Cell {
        if index < total / 2 { RED } else { BLUE }
    }

    fn frame(&self, board: &Board) -> Frame {
        Frame::Greyscale(board.map(|s| match s {
            RED => 255,
            BLUE => 128,
            _ => 0,
        }))
    }

    fn halts_on_standstill(&self) -> bool {
        true
    }
}
