//! Simulation observer trait for progress reporting and output collection.

use fly_core::Turn;
use fly_graph::{Route, ZoneMap};

use crate::TurnRecord;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// turn loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_turn_end(&mut self, record: &TurnRecord, _map: &ZoneMap) {
///         println!("{}: {} drone(s) left", record.turn, record.remaining);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first turn with the routes the fleet will use.
    fn on_setup(&mut self, _map: &ZoneMap, _routes: &[Route]) {}

    /// Called at the very start of each turn, before any processing.
    fn on_turn_start(&mut self, _turn: Turn) {}

    /// Called after each turn commits.
    ///
    /// Turns are reported as they happen, so a run that later deadlocks has
    /// already reported its earlier turns here.
    fn on_turn_end(&mut self, _record: &TurnRecord, _map: &ZoneMap) {}

    /// Called once after the last drone is delivered.  Not called when the
    /// run fails.
    fn on_sim_end(&mut self, _final_turn: Turn) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
