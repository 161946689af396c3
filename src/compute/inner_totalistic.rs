//! k-colour totalistic rules.
//!
//! The next state of a cell is looked up from the sum of the cell and its 8
//! Moore neighbours. The lookup table is the base-k expansion of the rule
//! number: digit `s` (least significant first) is the next state for sum `s`.

use rand::Rng;
use rand::rngs::StdRng;

use super::{Board, Cell, LocalRule};
use crate::display::Frame;
use crate::schema::ConfigError;

/// Cells contributing to the totalistic sum (centre plus Moore neighbours).
const NEIGHBORHOOD: usize = 9;

/// Totalistic rule over `colors` states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerTotalistic {
    colors: u8,
    rule: u64,
    table: Vec<Cell>,
}

impl InnerTotalistic {
    pub fn new(colors: u8, rule: u64) -> Result<Self, ConfigError> {
        if colors < 2 {
            return Err(ConfigError::InvalidColors(colors));
        }
        let k = colors as u64;
        let sums = Self::table_len(colors);

        // Rule numbers are bounded by k^sums; beyond u64 every value is valid.
        if let Some(limit) = u32::try_from(sums).ok().and_then(|e| k.checked_pow(e)) {
            if rule >= limit {
                return Err(ConfigError::RuleOutOfRange { colors, rule });
            }
        }

        let mut table = Vec::with_capacity(sums);
        let mut rest = rule;
        for _ in 0..sums {
            table.push((rest % k) as Cell);
            rest /= k;
        }

        Ok(Self {
            colors,
            rule,
            table,
        })
    }

    /// Number of distinct neighbourhood sums, `9 * (k - 1) + 1`.
    fn table_len(colors: u8) -> usize {
        NEIGHBORHOOD * (colors as usize - 1) + 1
    }

    pub fn colors(&self) -> u8 {
        self.colors
    }

    pub fn rule_number(&self) -> u64 {
        self.rule
    }

    /// Next state for a neighbourhood sum.
    #[inline]
    pub fn lookup(&self, sum: usize) -> Cell {
        self.table.get(sum).copied().unwrap_or(0)
    }

    /// Brightness for a state, spread evenly over 0..=255.
    pub fn shade(&self, state: Cell) -> Cell {
        let max = (self.colors - 1) as u32;
        ((state.min(self.colors - 1) as u32 * 255) / max) as Cell
    }
}

impl LocalRule for InnerTotalistic {
    fn alphabet(&self) -> usize {
        self.colors as usize
    }

    fn next_state(&self, board: &Board, row: usize, col: usize, _generation: u64) -> Cell {
        let (r, c) = (row as isize, col as isize);
        let sum = board.at(row, col) as usize
            + board.neighbors(r, c).map(usize::from).sum::<usize>();
        self.lookup(sum)
    }

    fn seed_state(&self, _index: usize, _total: usize, rng: &mut StdRng) -> Cell {
        rng.gen_range(1..self.colors)
    }

    fn frame(&self, board: &Board) -> Frame {
        if self.colors == 2 {
            Frame::Mono(board.clone())
        } else {
            Frame::Greyscale(board.map(|s| self.shade(s)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::step;

    #[test]
    fn test_table_digits() {
        // 777 in base 3 is 1001210: sums 0..=6 map to 0,1,2,1,0,0,1.
        let rule = InnerTotalistic::new(3, 777).unwrap();
        let expected = [0, 1, 2, 1, 0, 0, 1];
        for (sum, &next) in expected.iter().enumerate() {
            assert_eq!(rule.lookup(sum), next, "sum {sum}");
        }
        // Higher sums fall into the zero-padded part of the table.
        assert_eq!(rule.lookup(18), 0);
        assert_eq!(rule.table.len(), 19);
    }

    #[test]
    fn test_binary_rule_out_of_range() {
        // k = 2 has 10 sums, so rule numbers must be below 2^10.
        assert!(InnerTotalistic::new(2, 1023).is_ok());
        assert!(matches!(
            InnerTotalistic::new(2, 1024),
            Err(ConfigError::RuleOutOfRange { colors: 2, rule: 1024 })
        ));
        assert!(matches!(
            InnerTotalistic::new(1, 0),
            Err(ConfigError::InvalidColors(1))
        ));
    }

    #[test]
    fn test_large_colors_accept_any_rule() {
        assert!(InnerTotalistic::new(8, u64::MAX).is_ok());
    }

    #[test]
    fn test_single_seed_spreads() {
        // Binary parity-like rule: sum 1 -> 1, everything else -> 0.
        let rule = InnerTotalistic::new(2, 0b10).unwrap();
        let mut board = Board::new(9, 9, 0);
        board.set(4, 4, 1);
        let next = step(&rule, &board, 0).board;
        // Every cell of the 3x3 block around the seed sums to exactly 1.
        assert_eq!(next.population(), 9);
        assert_eq!(next.at(4, 4), 1);
        assert_eq!(next.at(3, 3), 1);
        assert_eq!(next.at(2, 2), 0);
    }

    #[test]
    fn test_greyscale_frame_for_three_colors() {
        let rule = InnerTotalistic::new(3, 777).unwrap();
        let mut board = Board::new(2, 2, 0);
        board.set(0, 0, 1);
        board.set(1, 1, 2);
        match rule.frame(&board) {
            Frame::Greyscale(g) => {
                assert_eq!(g.at(0, 0), 127);
                assert_eq!(g.at(1, 1), 255);
                assert_eq!(g.at(0, 1), 0);
            }
            other => panic!("expected greyscale frame, got {other:?}"),
        }
    }
}
