//! Progress and timing hooks for the pipeline.
//!
//! The numeric core never depends on what an observer does; hooks only see
//! row counts, phase names and elapsed time.

use std::fmt;
use std::time::Duration;

use log::info;

use crate::pipeline::Params;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Fusion,
    Mutation,
    Extraction,
}

impl Phase {
    pub fn index(&self) -> usize {
        match self {
            Phase::Fusion => 1,
            Phase::Mutation => 2,
            Phase::Extraction => 3,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Fusion => write!(f, "Linearization Fusion"),
            Phase::Mutation => write!(f, "Mutation Law"),
            Phase::Extraction => write!(f, "Extraction"),
        }
    }
}

pub trait Observer {
    fn on_start(&mut self, _params: &Params) {}

    /// Called after each fused row; `done` counts rows processed so far.
    fn on_row(&mut self, _done: usize, _total: usize) {}

    fn on_phase(&mut self, _phase: Phase, _elapsed: Duration) {}

    fn on_finish(&mut self, _elapsed: Duration) {}
}

impl Observer for () {}

/// Returns true when `done` of `total` rows should be reported: every
/// max(1, total/10) rows.
pub fn is_progress_row(done: usize, total: usize) -> bool {
    done % (total / 10).max(1) == 0
}

/// Reports through the `log` facade: parameters, progress every tenth of
/// the rows, and per-phase timings in milliseconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_start(&mut self, params: &Params) {
        info!(
            "n = {}, spectral buffer N = {}, mutation exponent k = {}",
            params.n, params.transform_len, params.exponent
        );
    }

    fn on_row(&mut self, done: usize, total: usize) {
        if is_progress_row(done, total) {
            info!("progress: {}/{} rows", done, total);
        }
    }

    fn on_phase(&mut self, phase: Phase, elapsed: Duration) {
        info!("[phase {}] {}: {} ms", phase.index(), phase, elapsed.as_millis());
    }

    fn on_finish(&mut self, elapsed: Duration) {
        info!("[total] {} ms", elapsed.as_millis());
    }
}
