//! ACO colony loop.

use super::ant::{Ant, DepositOutcome, StepOutcome};
use super::config::AcoConfig;
use super::graph::Graph;
use super::types::{is_closed_tour, top_path, AcoResult, AcoSnapshot, AntStats, PathCounts};
use crate::error::{Result, TspError};
use crate::random::rng_from;
use crate::telemetry::Telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Executes Ant Colony Optimization on a [`Graph`].
///
/// The graph's pheromone is mutated in place, so callers can inspect the
/// final trail strengths after the run.
pub struct AcoRunner;

impl AcoRunner {
    /// Runs ACO without cancellation or telemetry.
    pub fn run(graph: &mut Graph, config: &AcoConfig) -> Result<AcoResult> {
        Self::run_with(graph, config, None, &mut ())
    }

    /// Runs ACO with an optional cancellation token.
    pub fn run_with_cancel(
        graph: &mut Graph,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult> {
        Self::run_with(graph, config, cancel, &mut ())
    }

    /// Runs ACO, polling `cancel` between iterations and emitting one
    /// snapshot per completed iteration.
    ///
    /// Returns [`TspError::Cancelled`] if cancellation is observed before
    /// the first iteration completes.
    pub fn run_with<T: Telemetry + ?Sized>(
        graph: &mut Graph,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
        telemetry: &mut T,
    ) -> Result<AcoResult> {
        config.validate()?;
        let n = graph.node_count();
        if n == 0 {
            return Err(TspError::EmptyInstance);
        }

        let started = Instant::now();
        let mut rng = rng_from(config.seed);
        let mut ants: Vec<Ant> = (0..config.population)
            .map(|_| Ant::new(config.deposit, config.eps))
            .collect();

        info!(
            cities = n,
            edges = graph.edge_count(),
            population = config.population,
            iterations = config.iterations,
            evaporation_rate = config.evaporation_rate,
            "ant colony started"
        );

        let mut counts = PathCounts::new();
        let mut stats = AntStats::default();
        let mut completed = 0usize;
        let mut cancelled = false;

        for iteration in 1..=config.iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            for ant in &mut ants {
                ant.reset(n, &mut rng);
            }

            // N steps: N - 1 to visit every city, one more to close the loop.
            let mut stalls = 0usize;
            for _ in 0..n {
                for ant in &mut ants {
                    if ant.step(graph, &mut rng) == StepOutcome::Stalled {
                        stalls += 1;
                    }
                }
            }
            if stalls > 0 {
                debug!(iteration, stalls, "stalled steps; a denser graph helps");
            }

            graph.evaporate(config.evaporation_rate);

            let mut table = PathCounts::new();
            for ant in &ants {
                match ant.lay_pheromone(graph) {
                    Ok(DepositOutcome::Reinforced { .. }) => stats.reinforced += 1,
                    Ok(DepositOutcome::SkippedZeroLength) => stats.skipped_zero_length += 1,
                    Ok(DepositOutcome::Stalled) => stats.stalled += 1,
                    Ok(DepositOutcome::Incomplete) => stats.incomplete += 1,
                    Err(err) => {
                        warn!(iteration, path = ?ant.path(), %err, "pheromone update failed");
                        stats.faults += 1;
                    }
                }
                *table.entry(ant.path().to_vec()).or_insert(0) += 1;
            }

            counts = table;
            completed = iteration;

            if let Some((path, count)) = top_path(&counts) {
                telemetry.aco_snapshot(&AcoSnapshot {
                    iteration,
                    distinct_paths: counts.len(),
                    top_path: path.clone(),
                    top_count: count,
                    confidence: count as f64 / config.population as f64,
                    path_counts: counts.clone(),
                });
            }
        }

        let Some((path, count)) = top_path(&counts).map(|(p, c)| (p.clone(), c)) else {
            return Err(TspError::Cancelled);
        };
        let confidence = count as f64 / config.population as f64;
        let length = graph.path_weight(&path);
        let complete = is_closed_tour(&path, n);

        info!(
            iterations = completed,
            top_path = ?path,
            confidence,
            cancelled,
            elapsed = started.elapsed().as_secs_f64(),
            "ant colony finished"
        );

        Ok(AcoResult {
            path,
            count,
            confidence,
            length,
            complete,
            path_counts: counts,
            iterations: completed,
            cancelled,
            stats,
        })
    }
}
