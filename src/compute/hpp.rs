//! HPP (Hardy-Pomeau-de Pazzis) lattice gas.
//!
//! Each cell holds a 4-bit mask of particles travelling west, east, south and
//! north. A generation is a collision stage (head-on pairs rotate by 90
//! degrees) followed by propagation (every particle moves one cell along its
//! heading). Both stages are fused into a single neighbourhood rule: a cell
//! gathers the post-collision particles of its four orthogonal neighbours
//! that are heading into it.

use rand::Rng;
use rand::rngs::StdRng;

use super::{Board, Cell, LocalRule};
use crate::display::Frame;

pub const EMPTY: Cell = 0b0000;
pub const WEST: Cell = 0b0001;
pub const EAST: Cell = 0b0010;
pub const SOUTH: Cell = 0b0100;
pub const NORTH: Cell = 0b1000;

/// West and east particles meeting head-on.
pub const WEST_EAST: Cell = WEST | EAST;
/// North and south particles meeting head-on.
pub const NORTH_SOUTH: Cell = NORTH | SOUTH;

/// Single-particle states, used for random seeding.
pub const DIRECTIONS: [Cell; 4] = [WEST, EAST, SOUTH, NORTH];

/// Post-collision state of a single cell.
///
/// Only the two exact head-on pairs change; every other mask passes through.
#[inline]
pub fn collide(state: Cell) -> Cell {
    match state {
        WEST_EAST => NORTH_SOUTH,
        NORTH_SOUTH => WEST_EAST,
        other => other,
    }
}

/// The HPP rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hpp;

impl LocalRule for Hpp {
    fn alphabet(&self) -> usize {
        16
    }

    fn next_state(&self, board: &Board, row: usize, col: usize, _generation: u64) -> Cell {
        let n = board.orthogonal(row as isize, col as isize);

        // Collide all four neighbours before gathering.
        let north = collide(n.north);
        let south = collide(n.south);
        let east = collide(n.east);
        let west = collide(n.west);

        (south & NORTH) | (north & SOUTH) | (east & WEST) | (west & EAST)
    }

    fn seed_state(&self, _index: usize, _total: usize, rng: &mut StdRng) -> Cell {
        DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())]
    }

    fn frame(&self, board: &Board) -> Frame {
        Frame::Mono(board.map(|s| u8::from(s != EMPTY)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::step;
    use proptest::prelude::*;

    fn run(board: &Board, generations: u64) -> Board {
        (0..generations).fold(board.clone(), |b, g| step(&Hpp, &b, g).board)
    }

    fn particles(board: &Board) -> u32 {
        board.cells().iter().map(|c| c.count_ones()).sum()
    }

    #[test]
    fn test_collision_states_swap() {
        assert_eq!(collide(WEST_EAST), NORTH_SOUTH);
        assert_eq!(collide(NORTH_SOUTH), WEST_EAST);
        assert_eq!(collide(WEST | NORTH), WEST | NORTH);
    }

    #[test]
    fn test_collide_is_involution() {
        for state in 0..16u8 {
            assert_eq!(collide(collide(state)), state);
            if state != WEST_EAST && state != NORTH_SOUTH {
                assert_eq!(collide(state), state);
            }
        }
    }

    #[test]
    fn test_single_particles_travel() {
        let mut board = Board::new(5, 5, EMPTY);
        board.set(2, 2, EAST);
        let next = step(&Hpp, &board, 0).board;
        assert_eq!(next.at(2, 3), EAST);
        assert_eq!(next.population(), 1);

        let mut board = Board::new(5, 5, EMPTY);
        board.set(2, 2, NORTH);
        let next = step(&Hpp, &board, 0).board;
        assert_eq!(next.at(1, 2), NORTH);
    }

    #[test]
    fn test_particle_wraps() {
        let mut board = Board::new(4, 4, EMPTY);
        board.set(0, 0, WEST);
        let next = step(&Hpp, &board, 0).board;
        assert_eq!(next.at(0, 3), WEST);
    }

    #[test]
    fn test_head_on_pair_scatters_vertically() {
        let mut board = Board::new(7, 7, EMPTY);
        board.set(3, 3, WEST_EAST);
        let next = step(&Hpp, &board, 0).board;
        assert_eq!(next.at(2, 3), NORTH);
        assert_eq!(next.at(4, 3), SOUTH);
        assert_eq!(next.population(), 2);
    }

    #[test]
    fn test_empty_board_stays_empty() {
        let board = Board::new(34, 9, EMPTY);
        assert!(run(&board, 50).is_blank());
    }

    #[test]
    fn test_particle_count_conserved() {
        let mut board = Board::new(34, 9, EMPTY);
        board.set(17, 4, NORTH_SOUTH);
        board.set(17, 3, WEST_EAST);
        board.set(5, 1, EAST | SOUTH);
        board.set(30, 8, WEST);
        let before = particles(&board);
        assert_eq!(particles(&run(&board, 40)), before);
    }

    proptest! {
        #[test]
        fn prop_collide_twice_is_identity(state in 0u8..16) {
            prop_assert_eq!(collide(collide(state)), state);
        }
    }
}
