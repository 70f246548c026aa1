//! Progress observers.
//!
//! Optimizers push snapshots into a [`Telemetry`] implementation at fixed
//! points of their loop. Observers only read; nothing they do feeds back
//! into the search.

use crate::aco::AcoSnapshot;
use crate::sa::SaSnapshot;
use tracing::info;

/// Receives optimizer snapshots. Every method defaults to a no-op.
pub trait Telemetry {
    /// Called every `report_interval` SA iterations with the best tour.
    fn sa_snapshot(&mut self, _snapshot: &SaSnapshot, _best: &[usize]) {}

    /// Called once per completed ACO iteration.
    fn aco_snapshot(&mut self, _snapshot: &AcoSnapshot) {}
}

impl Telemetry for () {}

impl<T: Telemetry + ?Sized> Telemetry for &mut T {
    fn sa_snapshot(&mut self, snapshot: &SaSnapshot, best: &[usize]) {
        (**self).sa_snapshot(snapshot, best);
    }

    fn aco_snapshot(&mut self, snapshot: &AcoSnapshot) {
        (**self).aco_snapshot(snapshot);
    }
}

impl<A: Telemetry, B: Telemetry> Telemetry for (A, B) {
    fn sa_snapshot(&mut self, snapshot: &SaSnapshot, best: &[usize]) {
        self.0.sa_snapshot(snapshot, best);
        self.1.sa_snapshot(snapshot, best);
    }

    fn aco_snapshot(&mut self, snapshot: &AcoSnapshot) {
        self.0.aco_snapshot(snapshot);
        self.1.aco_snapshot(snapshot);
    }
}

/// Logs snapshots as structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn sa_snapshot(&mut self, s: &SaSnapshot, _best: &[usize]) {
        info!(
            iteration = s.iteration,
            elapsed = format_args!("{:.4}s", s.elapsed_seconds),
            candidate = format_args!("{:.4}", s.candidate_length),
            best = format_args!("{:.4}", s.best_length),
            temperature = s.temperature,
            "annealing progress"
        );
    }

    fn aco_snapshot(&mut self, s: &AcoSnapshot) {
        info!(
            iteration = s.iteration,
            distinct_paths = s.distinct_paths,
            top_path = ?s.top_path,
            confidence = s.confidence,
            "colony progress"
        );
    }
}

/// Collects every snapshot in memory.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub sa: Vec<SaSnapshot>,
    pub aco: Vec<AcoSnapshot>,
}

impl Telemetry for Recorder {
    fn sa_snapshot(&mut self, snapshot: &SaSnapshot, _best: &[usize]) {
        self.sa.push(*snapshot);
    }

    fn aco_snapshot(&mut self, snapshot: &AcoSnapshot) {
        self.aco.push(snapshot.clone());
    }
}
