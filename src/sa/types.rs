//! SA result and snapshot types.

/// Periodic progress record emitted during an SA run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaSnapshot {
    /// Iterations completed so far (1-based).
    pub iteration: usize,
    /// Wall-clock seconds since the run started.
    pub elapsed_seconds: f64,
    /// Total length of the candidate evaluated in this iteration.
    pub candidate_length: f64,
    /// Best length seen so far.
    pub best_length: f64,
    /// Temperature of this iteration.
    pub temperature: f64,
}

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult {
    /// Best tour found, or the current tour when no candidate was ever
    /// evaluated.
    pub best: Vec<usize>,

    /// Length of `best`.
    pub best_length: f64,

    /// Length of the starting tour.
    pub initial_length: f64,

    /// Total number of iterations.
    pub iterations: usize,

    /// Temperature of the last iteration (NaN when no iteration ran).
    pub final_temperature: f64,

    /// Number of accepted candidates.
    pub accepted_moves: usize,

    /// Number of accepted candidates that shrank the local neighbourhood.
    pub improving_moves: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best length sampled at every snapshot, plus the first and last value.
    pub length_history: Vec<f64>,
}
