//! Toroidal board of small integer cell states.

use serde::Serialize;

/// A single cell state. Every automaton alphabet fits in a byte.
pub type Cell = u8;

/// Fixed-size 2D grid with wrap-around addressing.
///
/// Cells are stored row-major: `cells[row * width + col]`. Any signed
/// coordinate is accepted and reduced modulo the board dimensions, so there
/// are no edge cells and no out-of-bounds accesses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

/// Offsets of the 8 Moore neighbours, row-major starting at the top-left.
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// States of the four orthogonal neighbours of a cell.
///
/// Rows grow downward, so `north` is the cell at `row - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orthogonal {
    pub north: Cell,
    pub south: Cell,
    pub east: Cell,
    pub west: Cell,
}

impl Board {
    /// Create a board with every cell set to `fill`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero. Run configurations are validated
    /// before any board is built.
    pub fn new(height: usize, width: usize, fill: Cell) -> Self {
        assert!(
            height > 0 && width > 0,
            "board dimensions must be non-zero (got {height}x{width})"
        );
        Self {
            height,
            width,
            cells: vec![fill; height * width],
        }
    }

    /// Build a board from explicit rows.
    ///
    /// Returns `None` if there are no rows, the first row is empty, or the
    /// rows have differing lengths.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Option<Self> {
        let width = rows.first()?.as_ref().len();
        if width == 0 || rows.iter().any(|r| r.as_ref().len() != width) {
            return None;
        }
        let cells = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Some(Self {
            height: rows.len(),
            width,
            cells,
        })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Convert possibly out-of-range coordinates to a flat index.
    #[inline]
    fn index(&self, row: isize, col: isize) -> usize {
        let r = row.rem_euclid(self.height as isize) as usize;
        let c = col.rem_euclid(self.width as isize) as usize;
        r * self.width + c
    }

    /// State at `(row, col)`, wrapping both coordinates.
    #[inline]
    pub fn get(&self, row: isize, col: isize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Set the state at `(row, col)`, wrapping both coordinates.
    #[inline]
    pub fn set(&mut self, row: isize, col: isize, state: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = state;
    }

    /// State at in-range coordinates, without wrapping.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    /// The 8 Moore-neighbourhood states around `(row, col)`.
    pub fn neighbors(&self, row: isize, col: isize) -> impl Iterator<Item = Cell> + '_ {
        MOORE_OFFSETS
            .iter()
            .map(move |&(dr, dc)| self.get(row + dr, col + dc))
    }

    /// The 4 orthogonal neighbour states around `(row, col)`.
    pub fn orthogonal(&self, row: isize, col: isize) -> Orthogonal {
        Orthogonal {
            north: self.get(row - 1, col),
            south: self.get(row + 1, col),
            east: self.get(row, col + 1),
            west: self.get(row, col - 1),
        }
    }

    /// Cell-wise equality.
    #[inline]
    pub fn equals(&self, other: &Board) -> bool {
        self == other
    }

    /// True when every cell holds the background state `0`.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Number of non-background cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Number of cells holding exactly `state`.
    pub fn count(&self, state: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Number of cells that differ from `other`.
    ///
    /// Both boards must have the same shape.
    pub fn diff_count(&self, other: &Board) -> usize {
        debug_assert_eq!((self.height, self.width), (other.height, other.width));
        self.cells
            .iter()
            .zip(other.cells.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }

    /// Flat row-major cell storage.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable flat row-major cell storage.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Apply `f` to every cell, producing a board of the same shape.
    pub fn map(&self, f: impl Fn(Cell) -> Cell) -> Board {
        Board {
            height: self.height,
            width: self.width,
            cells: self.cells.iter().map(|&c| f(c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_fills_every_cell() {
        let board = Board::new(34, 9, 3);
        assert_eq!(board.cell_count(), 34 * 9);
        assert_eq!(board.count(3), 34 * 9);
    }

    #[test]
    fn test_set_get_wraps() {
        let mut board = Board::new(34, 9, 0);
        board.set(34, -1, 7);
        assert_eq!(board.get(0, 8), 7);
        assert_eq!(board.get(-34, 17), 7);
    }

    #[test]
    fn test_neighbors_wrap_at_corner() {
        let mut board = Board::new(4, 5, 0);
        board.set(3, 4, 1); // diagonal of (0, 0) across both seams
        board.set(0, 1, 1);
        let live: u32 = board.neighbors(0, 0).map(u32::from).sum();
        assert_eq!(live, 2);
        assert_eq!(board.neighbors(0, 0).count(), 8);
    }

    #[test]
    fn test_orthogonal_neighbors() {
        let mut board = Board::new(3, 3, 0);
        board.set(0, 1, 1);
        board.set(2, 1, 2);
        board.set(1, 2, 3);
        board.set(1, 0, 4);
        let o = board.orthogonal(1, 1);
        assert_eq!(
            o,
            Orthogonal {
                north: 1,
                south: 2,
                east: 3,
                west: 4
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Board::from_rows(&[vec![0u8, 1], vec![1]]).is_none());
        assert!(Board::from_rows::<Vec<u8>>(&[]).is_none());
        let board = Board::from_rows(&[vec![0u8, 1], vec![1, 0]]).unwrap();
        assert_eq!(board.to_rows(), vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn test_equals_is_cellwise() {
        let mut a = Board::new(4, 4, 0);
        let b = a.clone();
        assert!(a.equals(&b));
        a.set(5, 1, 1);
        assert!(!a.equals(&b));
        assert!(!Board::new(4, 2, 0).equals(&Board::new(2, 4, 0)));
    }

    #[test]
    fn test_blank_and_population() {
        let mut board = Board::new(5, 5, 0);
        assert!(board.is_blank());
        board.set(2, 2, 1);
        assert!(!board.is_blank());
        assert_eq!(board.population(), 1);
    }

    proptest! {
        #[test]
        fn prop_set_then_get_round_trips(
            row in -200isize..200,
            col in -200isize..200,
            state in 0u8..16,
        ) {
            let mut board = Board::new(34, 9, 0);
            board.set(row, col, state);
            prop_assert_eq!(board.get(row, col), state);
            prop_assert_eq!(board.get(row + 34, col - 9), state);
        }
    }
}
