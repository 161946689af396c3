//! Compute module - Boards, automaton rules and the simulation loop.

mod board;
mod driver;
mod inner_totalistic;
mod rule;
mod seeding;
mod stepper;
mod termination;

// State constants collide between automata, so these stay namespaced.
pub mod bml;
pub mod hpp;
pub mod outer_totalistic;

pub use board::*;
pub use driver::*;
pub use inner_totalistic::*;
pub use rule::*;
pub use seeding::*;
pub use stepper::*;
pub use termination::*;

pub use bml::{Bml, Phase};
pub use hpp::{Hpp, collide};
pub use outer_totalistic::{OuterTotalistic, RuleParseError};
