//! Outer-totalistic (Birth/Survival) rules, the Game of Life family.
//!
//! The next state of a cell depends on whether it is alive and on how many of
//! its 8 Moore neighbours are alive. Classic Conway Life is `B3/S23`.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;

use super::{Board, Cell, LocalRule};
use crate::display::Frame;
use crate::schema::{ConfigError, LifeRule};

pub const DEAD: Cell = 0;
pub const ALIVE: Cell = 1;

/// Binary outer-totalistic rule with birth set B and survival set S.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OuterTotalistic {
    birth: [bool; 9],
    survival: [bool; 9],
}

impl OuterTotalistic {
    /// Build a rule from neighbour counts in `0..=8`.
    pub fn new(birth: &[u8], survival: &[u8]) -> Result<Self, ConfigError> {
        Ok(Self {
            birth: count_set(birth)?,
            survival: count_set(survival)?,
        })
    }

    /// Conway's Game of Life, `B3/S23`.
    pub fn conway() -> Self {
        LifeRule::Original.into()
    }

    /// Neighbour counts that bring a dead cell to life, ascending.
    pub fn birth(&self) -> Vec<u8> {
        members(&self.birth)
    }

    /// Neighbour counts that keep a live cell alive, ascending.
    pub fn survival(&self) -> Vec<u8> {
        members(&self.survival)
    }

    /// Transition for a single cell.
    #[inline]
    pub fn next(&self, alive: bool, live_neighbors: usize) -> bool {
        if alive {
            self.survival[live_neighbors]
        } else {
            self.birth[live_neighbors]
        }
    }
}

fn count_set(counts: &[u8]) -> Result<[bool; 9], ConfigError> {
    let mut set = [false; 9];
    for &n in counts {
        if n > 8 {
            return Err(ConfigError::InvalidNeighborCount(n));
        }
        set[n as usize] = true;
    }
    Ok(set)
}

fn members(set: &[bool; 9]) -> Vec<u8> {
    (0u8..9).filter(|&n| set[n as usize]).collect()
}

impl LocalRule for OuterTotalistic {
    fn alphabet(&self) -> usize {
        2
    }

    fn next_state(&self, board: &Board, row: usize, col: usize, _generation: u64) -> Cell {
        let (r, c) = (row as isize, col as isize);
        let live = board.neighbors(r, c).filter(|&s| s != DEAD).count();
        let alive = board.at(row, col) != DEAD;
        if self.next(alive, live) { ALIVE } else { DEAD }
    }

    fn seed_state(&self, _index: usize, _total: usize, _rng: &mut StdRng) -> Cell {
        ALIVE
    }

    fn frame(&self, board: &Board) -> Frame {
        Frame::Mono(board.clone())
    }
}

impl fmt::Display for OuterTotalistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in self.birth() {
            write!(f, "{n}")?;
        }
        write!(f, "/S")?;
        for n in self.survival() {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

/// Errors from parsing a `B.../S...` rule string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    #[error("Rule string must look like B3/S23, got {0:?}")]
    Malformed(String),
    #[error("Invalid neighbor count {0:?} in rule string")]
    InvalidDigit(char),
}

impl FromStr for OuterTotalistic {
    type Err = RuleParseError;

    /// Parse `B3/S23`-style notation. Either half may come first and either
    /// may be empty (`B2/S` is Seeds).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RuleParseError::Malformed(s.to_string());
        let (first, second) = s.trim().split_once('/').ok_or_else(malformed)?;

        let mut birth = None;
        let mut survival = None;
        for part in [first, second] {
            let mut chars = part.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(malformed()),
            };
            if slot.is_some() {
                return Err(malformed());
            }
            let mut set = [false; 9];
            for ch in chars {
                match ch.to_digit(10) {
                    Some(d) if d <= 8 => set[d as usize] = true,
                    _ => return Err(RuleParseError::InvalidDigit(ch)),
                }
            }
            *slot = Some(set);
        }

        match (birth, survival) {
            (Some(birth), Some(survival)) => Ok(Self { birth, survival }),
            _ => Err(malformed()),
        }
    }
}

impl From<LifeRule> for OuterTotalistic {
    fn from(preset: LifeRule) -> Self {
        let (birth, survival) = preset.counts();
        // Preset counts are all within 0..=8.
        Self {
            birth: count_set(birth).unwrap_or_default(),
            survival: count_set(survival).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::step;

    fn board_with(height: usize, width: usize, live: &[(isize, isize)]) -> Board {
        let mut board = Board::new(height, width, DEAD);
        for &(r, c) in live {
            board.set(r, c, ALIVE);
        }
        board
    }

    #[test]
    fn test_block_is_fixed_point() {
        let rule = OuterTotalistic::conway();
        let block = board_with(34, 9, &[(17, 3), (17, 4), (18, 3), (18, 4)]);
        let next = step(&rule, &block, 0);
        assert_eq!(next.board, block);
        assert_eq!(next.changed, 0);
    }

    #[test]
    fn test_blinker_oscillates() {
        let rule = OuterTotalistic::conway();
        let horizontal = board_with(10, 9, &[(5, 3), (5, 4), (5, 5)]);
        let vertical = board_with(10, 9, &[(4, 4), (5, 4), (6, 4)]);
        let once = step(&rule, &horizontal, 0).board;
        assert_eq!(once, vertical);
        assert_eq!(step(&rule, &once, 1).board, horizontal);
    }

    #[test]
    fn test_wraparound_neighbors_count() {
        // A vertical blinker straddling the top/bottom seam.
        let rule = OuterTotalistic::conway();
        let board = board_with(6, 6, &[(5, 2), (0, 2), (1, 2)]);
        let next = step(&rule, &board, 0).board;
        assert_eq!(next, board_with(6, 6, &[(0, 1), (0, 2), (0, 3)]));
    }

    #[test]
    fn test_seeds_kills_every_live_cell() {
        let rule = OuterTotalistic::from(LifeRule::Seeds);
        let board = board_with(8, 8, &[(3, 3), (3, 4)]);
        let next = step(&rule, &board, 0).board;
        assert_eq!(next.at(3, 3), DEAD);
        assert_eq!(next.at(3, 4), DEAD);
        // Cells touching both parents are born.
        assert_eq!(next.at(2, 3), ALIVE);
        assert_eq!(next.at(4, 4), ALIVE);
    }

    #[test]
    fn test_presets_match_notation() {
        assert_eq!(OuterTotalistic::from(LifeRule::Original).to_string(), "B3/S23");
        assert_eq!(OuterTotalistic::from(LifeRule::HighLife).to_string(), "B36/S23");
        assert_eq!(OuterTotalistic::from(LifeRule::DayAndNight).to_string(), "B3678/S34678");
        assert_eq!(OuterTotalistic::from(LifeRule::Seeds).to_string(), "B2/S");
    }

    #[test]
    fn test_parse_rule_string() {
        let rule: OuterTotalistic = "B36/S23".parse().unwrap();
        assert_eq!(rule, OuterTotalistic::from(LifeRule::HighLife));
        let swapped: OuterTotalistic = "s23/b3".parse().unwrap();
        assert_eq!(swapped, OuterTotalistic::conway());
        assert_eq!(
            "B9/S23".parse::<OuterTotalistic>(),
            Err(RuleParseError::InvalidDigit('9'))
        );
        assert!("B3S23".parse::<OuterTotalistic>().is_err());
        assert!("B3/B23".parse::<OuterTotalistic>().is_err());
    }

    #[test]
    fn test_new_rejects_large_counts() {
        assert!(matches!(
            OuterTotalistic::new(&[9], &[]),
            Err(ConfigError::InvalidNeighborCount(9))
        ));
        let rule = OuterTotalistic::new(&[3, 6], &[2, 3]).unwrap();
        assert_eq!(rule.birth(), vec![3, 6]);
        assert_eq!(rule.survival(), vec![2, 3]);
    }
}
