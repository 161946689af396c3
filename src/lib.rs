//! Matrix Life - Cellular automata for a pair of 9x34 LED matrix panels.
//!
//! This crate runs small toroidal cellular automata and streams each
//! generation to a display sink at a fixed cadence, stopping when the board
//! empties, settles, oscillates, jams or runs out of generations.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `schema`: Configuration types, initial states and preset patterns
//! - `compute`: Boards, rules (Life-like, totalistic, BML, HPP), stepping,
//!   termination detection and the simulation loop
//! - `display`: The frame sink trait plus panel, terminal and recording sinks
//!
//! # Example
//!
//! ```rust,no_run
//! use matrix_life::{
//!     compute::run,
//!     display::FrameRecorder,
//!     schema::{InitialState, LifeRule, RuleConfig, RunConfig},
//! };
//!
//! let mut config = RunConfig::for_rule(RuleConfig::Life {
//!     preset: LifeRule::HighLife,
//! });
//! config.initial = Some(InitialState::Named {
//!     name: "r_pentomino".to_string(),
//! });
//!
//! let mut sink = FrameRecorder::new();
//! let report = run(config, &mut sink).expect("valid config");
//!
//! println!(
//!     "{:?} after {} generations, {} frames shown",
//!     report.outcome,
//!     report.generations,
//!     sink.frames().len()
//! );
//! ```

pub mod compute;
pub mod display;
pub mod schema;

// Re-export commonly used types
pub use compute::{Board, CancelToken, Outcome, Rule, RunReport, Simulation};
pub use display::{FrameSink, MatrixPanel, Which};
pub use schema::{InitialState, RuleConfig, RunConfig};
