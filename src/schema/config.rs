//! Configuration types for automaton runs.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::InitialState;
use crate::display::Which;

/// Panel height of the reference hardware.
pub const PANEL_HEIGHT: usize = 34;
/// Panel width of the reference hardware.
pub const PANEL_WIDTH: usize = 9;

fn default_height() -> usize {
    PANEL_HEIGHT
}

fn default_width() -> usize {
    PANEL_WIDTH
}

fn default_generations() -> u64 {
    200
}

fn default_delay() -> f32 {
    0.1
}

fn default_hold() -> f32 {
    0.5
}

/// Top-level configuration for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Board height in cells.
    #[serde(default = "default_height")]
    pub height: usize,
    /// Board width in cells.
    #[serde(default = "default_width")]
    pub width: usize,
    /// Maximum number of generations to compute.
    #[serde(default = "default_generations")]
    pub generations: u64,
    /// Pause between frames, in seconds.
    #[serde(default = "default_delay")]
    pub delay_sec: f32,
    /// Which panel(s) to draw on.
    #[serde(default)]
    pub which: Which,
    /// Automaton and its parameters.
    pub rule: RuleConfig,
    /// Initial board. `None` falls back to the rule's default, if it has one.
    #[serde(default)]
    pub initial: Option<InitialState>,
    /// Termination thresholds. `None` uses the rule's defaults.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
    /// How long to keep the final board on screen after an early halt.
    #[serde(default = "default_hold")]
    pub hold_final_sec: f32,
    /// Seed for random initial states. `None` draws from entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            height: PANEL_HEIGHT,
            width: PANEL_WIDTH,
            generations: default_generations(),
            delay_sec: default_delay(),
            which: Which::Both,
            rule: RuleConfig::Life {
                preset: LifeRule::Original,
            },
            initial: Some(InitialState::Named {
                name: "glider".to_string(),
            }),
            termination: None,
            hold_final_sec: default_hold(),
            random_seed: None,
        }
    }
}

impl RunConfig {
    /// Config for `rule` with every other field at its default.
    pub fn for_rule(rule: RuleConfig) -> Self {
        Self {
            rule,
            initial: None,
            ..Self::default()
        }
    }

    /// Load a config from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Termination thresholds in effect for this run.
    pub fn termination(&self) -> TerminationConfig {
        self.termination
            .unwrap_or_else(|| self.rule.default_termination())
    }

    /// Initial state in effect for this run, if any.
    pub fn initial_state(&self) -> Option<InitialState> {
        self.initial
            .clone()
            .or_else(|| self.rule.default_initial_state())
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        // Rejects negative, non-finite and unrepresentably long durations.
        for seconds in [self.delay_sec, self.hold_final_sec] {
            if Duration::try_from_secs_f32(seconds).is_err() {
                return Err(ConfigError::InvalidDelay(seconds));
            }
        }
        if let Some(InitialState::Random { density }) = &self.initial {
            if !(0.0..=1.0).contains(density) {
                return Err(ConfigError::InvalidDensity(*density));
            }
        }
        let t = self.termination();
        if t.empty_patience == 0 || t.stable_patience == 0 || t.oscillation_patience == 0 {
            return Err(ConfigError::InvalidPatience);
        }
        self.rule.validate()
    }
}

/// Automaton selection and parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RuleConfig {
    /// Binary Birth/Survival rule over the Moore neighbourhood.
    OuterTotalistic {
        /// Live-neighbour counts that bring a dead cell to life.
        birth: Vec<u8>,
        /// Live-neighbour counts that keep a live cell alive.
        survival: Vec<u8>,
    },
    /// A named Birth/Survival rule.
    Life { preset: LifeRule },
    /// k-colour totalistic rule numbered in base k.
    InnerTotalistic { colors: u8, rule: u64 },
    /// Biham-Middleton-Levine traffic.
    Bml,
    /// HPP lattice gas.
    Hpp,
}

impl RuleConfig {
    /// Check rule parameters without building the rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            RuleConfig::OuterTotalistic { birth, survival } => {
                if let Some(&n) = birth.iter().chain(survival).find(|&&n| n > 8) {
                    return Err(ConfigError::InvalidNeighborCount(n));
                }
            }
            RuleConfig::InnerTotalistic { colors, rule } => {
                if *colors < 2 {
                    return Err(ConfigError::InvalidColors(*colors));
                }
                let sums = 9 * (*colors as u32 - 1) + 1;
                if let Some(limit) = (*colors as u64).checked_pow(sums) {
                    if *rule >= limit {
                        return Err(ConfigError::RuleOutOfRange {
                            colors: *colors,
                            rule: *rule,
                        });
                    }
                }
            }
            RuleConfig::Life { .. } | RuleConfig::Bml | RuleConfig::Hpp => {}
        }
        Ok(())
    }

    /// Termination thresholds used when a run does not set its own.
    pub fn default_termination(&self) -> TerminationConfig {
        match self {
            RuleConfig::OuterTotalistic { .. }
            | RuleConfig::Life { .. }
            | RuleConfig::InnerTotalistic { .. } => TerminationConfig {
                empty_patience: 1,
                stable_patience: 10,
                oscillation_patience: 20,
            },
            RuleConfig::Bml => TerminationConfig {
                empty_patience: 1,
                stable_patience: 10,
                oscillation_patience: 10,
            },
            RuleConfig::Hpp => TerminationConfig {
                empty_patience: 1,
                stable_patience: 20,
                oscillation_patience: 20,
            },
        }
    }

    /// Initial state used when a run does not supply one.
    pub fn default_initial_state(&self) -> Option<InitialState> {
        match self {
            RuleConfig::OuterTotalistic { .. } | RuleConfig::Life { .. } => None,
            RuleConfig::InnerTotalistic { .. } => Some(InitialState::Center { state: 1 }),
            RuleConfig::Bml => Some(InitialState::Random { density: 0.35 }),
            RuleConfig::Hpp => Some(InitialState::Random { density: 0.5 }),
        }
    }
}

/// Named Life-like rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeRule {
    /// `B3/S23`
    Original,
    /// `B36/S23`
    HighLife,
    /// `B3678/S34678`
    DayAndNight,
    /// `B2/S`
    Seeds,
}

impl LifeRule {
    /// Birth and survival counts for this rule.
    pub fn counts(self) -> (&'static [u8], &'static [u8]) {
        match self {
            LifeRule::Original => (&[3], &[2, 3]),
            LifeRule::HighLife => (&[3, 6], &[2, 3]),
            LifeRule::DayAndNight => (&[3, 6, 7, 8], &[3, 4, 6, 7, 8]),
            LifeRule::Seeds => (&[2], &[]),
        }
    }
}

/// Patience thresholds for each termination condition.
///
/// A condition halts the run once its counter reaches the threshold. The
/// stable and oscillating counters reset each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationConfig {
    /// Consecutive all-background generations before halting.
    pub empty_patience: u32,
    /// Consecutive generations equal to their predecessor before halting.
    pub stable_patience: u32,
    /// Consecutive period-2 matches before halting.
    pub oscillation_patience: u32,
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Board dimensions (height, width) must be non-zero")]
    InvalidDimensions,
    #[error("Delay must be a non-negative number of seconds, got {0}")]
    InvalidDelay(f32),
    #[error("Density must be within [0, 1], got {0}")]
    InvalidDensity(f32),
    #[error("Neighbor count {0} is outside 0..=8")]
    InvalidNeighborCount(u8),
    #[error("Totalistic rules need at least 2 colors, got {0}")]
    InvalidColors(u8),
    #[error("Rule {rule} is out of range for {colors} colors")]
    RuleOutOfRange { colors: u8, rule: u64 },
    #[error("Termination patience must be at least 1")]
    InvalidPatience,
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.height, config.width), (34, 9));
    }

    #[test]
    fn test_parse_minimal_json() {
        let config: RunConfig = serde_json::from_str(
            r#"{ "rule": { "type": "Bml" }, "which": "left", "generations": 500 }"#,
        )
        .unwrap();
        assert_eq!(config.rule, RuleConfig::Bml);
        assert_eq!(config.which, Which::Left);
        assert_eq!(config.generations, 500);
        assert_eq!(config.delay_sec, 0.1);
        assert_eq!(
            config.initial_state(),
            Some(InitialState::Random { density: 0.35 })
        );
        assert_eq!(config.termination().oscillation_patience, 10);
    }

    #[test]
    fn test_parse_outer_totalistic() {
        let config: RunConfig = serde_json::from_str(
            r#"{
                "rule": { "type": "OuterTotalistic", "birth": [3, 6], "survival": [2, 3] },
                "initial": { "type": "Named", "name": "r_pentomino" }
            }"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_state().unwrap(), InitialState::Named {
            name: "r_pentomino".to_string()
        });
        assert_eq!(config.termination().stable_patience, 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RunConfig::default();
        config.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDimensions)));

        let mut config = RunConfig::default();
        config.delay_sec = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDelay(_))));

        let mut config = RunConfig::default();
        config.delay_sec = 1e20;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDelay(_))));

        let mut config = RunConfig::default();
        config.hold_final_sec = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDelay(_))));

        let mut config = RunConfig::for_rule(RuleConfig::Hpp);
        config.initial = Some(InitialState::Random { density: 1.5 });
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDensity(_))));

        let mut config = RunConfig::default();
        config.termination = Some(TerminationConfig {
            empty_patience: 1,
            stable_patience: 0,
            oscillation_patience: 5,
        });
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPatience)));

        let config = RunConfig::for_rule(RuleConfig::InnerTotalistic {
            colors: 3,
            rule: u64::MAX,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RuleOutOfRange { colors: 3, .. })
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "rule": {{ "type": "Life", "preset": "HighLife" }}, "delay_sec": 0.0 }}"#
        )
        .unwrap();
        let config = RunConfig::from_path(file.path()).unwrap();
        assert_eq!(
            config.rule,
            RuleConfig::Life {
                preset: LifeRule::HighLife
            }
        );
        assert_eq!(config.initial_state(), None);
    }

    #[test]
    fn test_from_path_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            RunConfig::from_path(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
