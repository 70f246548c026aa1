//! ACO result and snapshot types.

use std::collections::BTreeMap;

/// How often each path was walked during one colony iteration.
pub type PathCounts = BTreeMap<Vec<usize>, usize>;

/// Progress record emitted after every colony iteration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoSnapshot {
    /// Iteration number (1-based).
    pub iteration: usize,
    /// Number of different paths walked this iteration.
    pub distinct_paths: usize,
    /// Most frequent path this iteration.
    pub top_path: Vec<usize>,
    /// Number of ants that walked `top_path`.
    pub top_count: usize,
    /// `top_count / population`.
    pub confidence: f64,
    /// Full path frequency table of this iteration.
    pub path_counts: PathCounts,
}

/// Tallies of per-ant outcomes over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntStats {
    /// Ants whose tour reinforced the graph.
    pub reinforced: usize,
    /// Closed tours of zero length.
    pub skipped_zero_length: usize,
    /// Ants that ended their walk stuck on an isolated city.
    pub stalled: usize,
    /// Ants that never closed their tour.
    pub incomplete: usize,
    /// Ants whose pheromone update failed.
    pub faults: usize,
}

/// Result of an Ant Colony run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Most frequent path of the final iteration.
    pub path: Vec<usize>,

    /// Number of ants that walked `path` in the final iteration.
    pub count: usize,

    /// `count / population`, in (0, 1].
    pub confidence: f64,

    /// Total edge weight of `path`; `None` if it uses a missing edge.
    pub length: Option<f64>,

    /// Whether `path` visits every city once and returns to its start.
    pub complete: bool,

    /// Path frequencies of the final iteration.
    pub path_counts: PathCounts,

    /// Number of completed iterations.
    pub iterations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Per-ant outcomes accumulated over all iterations.
    pub stats: AntStats,
}

/// Most frequent path; ties go to the lexicographically greatest path.
pub fn top_path(counts: &PathCounts) -> Option<(&Vec<usize>, usize)> {
    counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(path, &count)| (path, count))
}

/// Returns `true` if `path` lists all `n` cities once, then its start again.
pub fn is_closed_tour(path: &[usize], n: usize) -> bool {
    if path.len() != n + 1 || path.first() != path.last() {
        return false;
    }
    crate::geometry::is_permutation(&path[..n], n)
}
