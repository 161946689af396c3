//! The simulation loop: seed, then render, wait, step and check until halted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{Board, Rule, Termination, TerminationDetector, seed_board};
use crate::display::{FrameSink, Which};
use crate::schema::{ConfigError, RunConfig, SeedError};

/// Generations between progress log lines.
const PROGRESS_INTERVAL: u64 = 20;

/// Cooperative cancellation flag shared between a run and its controller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the run to stop at the next generation boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// No active cells remain.
    Empty,
    /// The board stopped changing.
    Stable,
    /// The board settled into a period-2 cycle.
    Oscillating,
    /// A BML phase moved no cars.
    Gridlock,
    /// The generation budget ran out.
    BudgetExhausted,
    /// The run was cancelled.
    Interrupted,
}

impl Outcome {
    /// Whether the automaton itself ended the run.
    pub fn is_early_halt(self) -> bool {
        !matches!(self, Outcome::BudgetExhausted | Outcome::Interrupted)
    }
}

impl From<Termination> for Outcome {
    fn from(t: Termination) -> Self {
        match t {
            Termination::Empty => Outcome::Empty,
            Termination::Stable => Outcome::Stable,
            Termination::Oscillating => Outcome::Oscillating,
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: Outcome,
    /// Generations computed after the seed.
    pub generations: u64,
    pub final_board: Board,
    /// Render calls the sink rejected.
    pub failed_renders: usize,
}

/// Errors that stop a run before anything is displayed.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Seed(#[from] SeedError),
}

/// One automaton run: the current board, its rule and termination state.
#[derive(Debug)]
pub struct Simulation {
    config: RunConfig,
    rule: Rule,
    board: Board,
    generation: u64,
    detector: TerminationDetector,
    cancel: CancelToken,
}

impl Simulation {
    /// Validate `config` and build the seed board.
    pub fn new(config: RunConfig) -> Result<Self, RunError> {
        config.validate()?;
        let rule = Rule::from_config(&config.rule)?;
        let initial = config
            .initial_state()
            .ok_or(SeedError::MissingInitialState)?;

        let mut rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let board = seed_board(&initial, rule.engine(), config.height, config.width, &mut rng)?;
        let detector = TerminationDetector::new(config.termination());

        Ok(Self {
            config,
            rule,
            board,
            generation: 0,
            detector,
            cancel: CancelToken::new(),
        })
    }

    /// Use an existing cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Get cancellation handle.
    pub fn cancel_handle(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Compute the next generation; returns the halt reason if it ends the run.
    pub fn step(&mut self) -> Option<Outcome> {
        let next = self.rule.apply(&self.board, self.generation);
        self.board = next.board;
        self.generation += 1;

        let termination = self.detector.observe(&self.board);
        if termination == Some(Termination::Empty) {
            return Some(Outcome::Empty);
        }
        if next.changed == 0 && self.rule.engine().halts_on_standstill() {
            return Some(Outcome::Gridlock);
        }
        termination.map(Outcome::from)
    }

    /// Run until a halt condition, the generation budget or cancellation.
    ///
    /// The sink is cleared and its animation mode switched off exactly once
    /// when this returns, however the loop ended.
    pub fn run<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> RunReport {
        let which = self.config.which;
        let delay = Duration::from_secs_f32(self.config.delay_sec);
        info!(
            "Running {} on a {}x{} board for up to {} generations",
            self.rule.name(),
            self.board.height(),
            self.board.width(),
            self.config.generations
        );

        let mut screen = Screen {
            sink,
            which,
            failed: 0,
        };

        let outcome = loop {
            if self.cancel.is_cancelled() {
                break Outcome::Interrupted;
            }
            if self.generation >= self.config.generations {
                break Outcome::BudgetExhausted;
            }

            screen.show(&self.rule, &self.board);
            if !delay.is_zero() {
                thread::sleep(delay);
            }

            if let Some(outcome) = self.step() {
                break outcome;
            }
            if self.generation % PROGRESS_INTERVAL == 0 {
                debug!(
                    "Generation {}: population {}",
                    self.generation,
                    self.board.population()
                );
            }
        };

        info!("Halted after {} generations: {:?}", self.generation, outcome);
        if outcome.is_early_halt() {
            screen.show(&self.rule, &self.board);
            let hold = Duration::from_secs_f32(self.config.hold_final_sec);
            if !hold.is_zero() {
                thread::sleep(hold);
            }
        }

        let failed_renders = screen.failed;
        drop(screen);

        RunReport {
            outcome,
            generations: self.generation,
            final_board: self.board.clone(),
            failed_renders,
        }
    }
}

/// Borrowed sink for the length of a run. Dropping it clears the display.
struct Screen<'a, S: FrameSink + ?Sized> {
    sink: &'a mut S,
    which: Which,
    failed: usize,
}

impl<S: FrameSink + ?Sized> Screen<'_, S> {
    fn show(&mut self, rule: &Rule, board: &Board) {
        let frame = rule.engine().frame(board);
        if let Err(e) = self.sink.show(&frame, self.which) {
            self.failed += 1;
            warn!("Skipping frame: {e}");
        }
    }
}

impl<S: FrameSink + ?Sized> Drop for Screen<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.sink.clear(self.which) {
            error!("Failed to clear display: {e}");
        }
        if let Err(e) = self.sink.set_animation_mode(false) {
            error!("Failed to stop animation: {e}");
        }
    }
}

/// Build and run a simulation in one call.
///
/// Configuration and seeding errors are returned before the sink is used.
pub fn run<S: FrameSink + ?Sized>(config: RunConfig, sink: &mut S) -> Result<RunReport, RunError> {
    let mut sim = Simulation::new(config)?;
    Ok(sim.run(sink))
}
