//! Schema module - Configuration, initial states and preset patterns.

mod config;
mod presets;
mod seed;

pub use config::*;
pub use presets::*;
pub use seed::*;
