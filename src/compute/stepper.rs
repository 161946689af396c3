//! Single-generation stepping.

use rayon::prelude::*;

use super::{Board, LocalRule};

/// Boards smaller than this are stepped on the calling thread.
const PARALLEL_THRESHOLD: usize = 64 * 64;

/// Result of one rule application.
#[derive(Debug, Clone)]
pub struct Step {
    /// The next board.
    pub board: Board,
    /// Number of cells whose state changed.
    pub changed: usize,
}

/// Apply `rule` to every cell of `board` against the same snapshot.
pub fn step<R: LocalRule + ?Sized>(rule: &R, board: &Board, generation: u64) -> Step {
    let width = board.width();
    let mut next = Board::new(board.height(), width, 0);

    let fill_row = |(row, out): (usize, &mut [u8])| {
        for (col, cell) in out.iter_mut().enumerate() {
            *cell = rule.next_state(board, row, col, generation);
        }
    };

    if board.cell_count() >= PARALLEL_THRESHOLD {
        next.cells_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(fill_row);
    } else {
        next.cells_mut()
            .chunks_mut(width)
            .enumerate()
            .for_each(fill_row);
    }

    let changed = next.diff_count(board);
    Step {
        board: next,
        changed,
    }
}
