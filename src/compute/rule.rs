//! Rule interface shared by every automaton.

use rand::rngs::StdRng;

use super::{Bml, Board, Cell, Hpp, InnerTotalistic, OuterTotalistic, Step, step};
use crate::display::Frame;
use crate::schema::{ConfigError, RuleConfig};

/// A synchronous neighbourhood rule.
///
/// `next_state` is a pure function of the previous board, evaluated for every
/// cell against the same snapshot. Implementations carry only their fixed
/// parameters, so one rule value can step any number of boards.
pub trait LocalRule: Sync {
    /// Number of cell states; valid states are `0..alphabet()`.
    fn alphabet(&self) -> usize;

    /// Next state of the cell at in-range `(row, col)`.
    fn next_state(&self, board: &Board, row: usize, col: usize, generation: u64) -> Cell;

    /// State for the `index`-th of `total` cells picked by random or
    /// occupancy seeding.
    fn seed_state(&self, index: usize, total: usize, rng: &mut StdRng) -> Cell;

    /// Map a board to what the panels should show.
    fn frame(&self, board: &Board) -> Frame;

    /// Whether a generation with no changed cells ends the run.
    fn halts_on_standstill(&self) -> bool {
        false
    }
}

/// One of the supported automata, selected from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    OuterTotalistic(OuterTotalistic),
    InnerTotalistic(InnerTotalistic),
    Bml(Bml),
    Hpp(Hpp),
}

impl Rule {
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        Ok(match config {
            RuleConfig::OuterTotalistic { birth, survival } => {
                Rule::OuterTotalistic(OuterTotalistic::new(birth, survival)?)
            }
            RuleConfig::Life { preset } => Rule::OuterTotalistic((*preset).into()),
            RuleConfig::InnerTotalistic { colors, rule } => {
                Rule::InnerTotalistic(InnerTotalistic::new(*colors, *rule)?)
            }
            RuleConfig::Bml => Rule::Bml(Bml),
            RuleConfig::Hpp => Rule::Hpp(Hpp),
        })
    }

    /// The underlying engine.
    pub fn engine(&self) -> &dyn LocalRule {
        match self {
            Rule::OuterTotalistic(r) => r,
            Rule::InnerTotalistic(r) => r,
            Rule::Bml(r) => r,
            Rule::Hpp(r) => r,
        }
    }

    /// Advance `board` by one generation.
    pub fn apply(&self, board: &Board, generation: u64) -> Step {
        step(self.engine(), board, generation)
    }

    /// Human-readable name for logs.
    pub fn name(&self) -> String {
        match self {
            Rule::OuterTotalistic(r) => format!("outer-totalistic {r}"),
            Rule::InnerTotalistic(r) => {
                format!("totalistic k={} rule {}", r.colors(), r.rule_number())
            }
            Rule::Bml(_) => "BML traffic".to_string(),
            Rule::Hpp(_) => "HPP lattice gas".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LifeRule;

    #[test]
    fn test_from_config_dispatch() {
        let rule = Rule::from_config(&RuleConfig::Life {
            preset: LifeRule::HighLife,
        })
        .unwrap();
        assert_eq!(rule.name(), "outer-totalistic B36/S23");
        assert_eq!(rule.engine().alphabet(), 2);

        let rule = Rule::from_config(&RuleConfig::Hpp).unwrap();
        assert_eq!(rule.engine().alphabet(), 16);
        assert!(!rule.engine().halts_on_standstill());

        let rule = Rule::from_config(&RuleConfig::Bml).unwrap();
        assert!(rule.engine().halts_on_standstill());
    }

    #[test]
    fn test_from_config_rejects_bad_parameters() {
        let err = Rule::from_config(&RuleConfig::InnerTotalistic { colors: 2, rule: 5000 });
        assert!(matches!(err, Err(ConfigError::RuleOutOfRange { .. })));
        let err = Rule::from_config(&RuleConfig::OuterTotalistic {
            birth: vec![3],
            survival: vec![12],
        });
        assert!(matches!(err, Err(ConfigError::InvalidNeighborCount(12))));
    }
}
