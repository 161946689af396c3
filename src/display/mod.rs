//! Display module - Frame sinks for LED panels, terminals and tests.

mod panel;
mod recorder;
mod sink;
mod terminal;

pub use panel::*;
pub use recorder::*;
pub use sink::*;
pub use terminal::*;
