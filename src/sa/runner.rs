//! SA execution loop.

use super::config::{InitialTour, SaConfig};
use super::schedule::Temperatures;
use super::types::{SaResult, SaSnapshot};
use crate::error::{Result, TspError};
use crate::geometry::{is_permutation, local_delta, rotate_window, total_length, City};
use crate::random::{random_permutation, rng_from};
use crate::telemetry::Telemetry;
use rand::seq::index;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Executes Simulated Annealing over a city set.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA without cancellation or telemetry.
    pub fn run(cities: &[City], config: &SaConfig) -> Result<SaResult> {
        Self::run_with(cities, config, None, &mut ())
    }

    /// Runs SA with an optional cancellation token.
    pub fn run_with_cancel(
        cities: &[City],
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult> {
        Self::run_with(cities, config, cancel, &mut ())
    }

    /// Runs SA, polling `cancel` before every iteration and pushing a
    /// snapshot into `telemetry` every `config.report_interval` iterations.
    pub fn run_with<T: Telemetry + ?Sized>(
        cities: &[City],
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
        telemetry: &mut T,
    ) -> Result<SaResult> {
        config.validate()?;
        if cities.is_empty() {
            return Err(TspError::EmptyInstance);
        }

        let n = cities.len();
        let started = Instant::now();
        let mut rng = rng_from(config.seed);

        let current = initial_tour(cities, config.initial_tour, &mut rng);
        let initial_length = total_length(&current, cities);
        let mut search = Search::new(current, initial_length);

        info!(
            cities = n,
            initial_length,
            finite = config.schedule.is_finite(),
            "simulated annealing started"
        );

        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut final_temperature = f64::NAN;
        let mut cancelled = false;
        let mut length_history = vec![initial_length];

        if n >= 2 {
            for temperature in Temperatures::new(config.schedule) {
                if let Some(ref flag) = cancel {
                    if flag.load(Ordering::Relaxed) {
                        cancelled = true;
                        break;
                    }
                }
                if config.max_iterations > 0 && iterations >= config.max_iterations {
                    break;
                }

                iterations += 1;
                final_temperature = temperature;

                let (i, j) = draw_positions(n, &mut rng);
                let draw = rng.random::<f64>();
                let step = search.try_move(cities, i, j, temperature, draw);
                if step.accepted {
                    accepted_moves += 1;
                }
                if step.improving {
                    improving_moves += 1;
                }

                if config.report_interval > 0 && iterations.is_multiple_of(config.report_interval)
                {
                    let snapshot = SaSnapshot {
                        iteration: iterations,
                        elapsed_seconds: started.elapsed().as_secs_f64(),
                        candidate_length: step.candidate_length,
                        best_length: search.best_length,
                        temperature,
                    };
                    telemetry.sa_snapshot(&snapshot, &search.best);
                    length_history.push(search.best_length);
                }
            }
        } else {
            debug!(cities = n, "nothing to anneal");
        }

        let Search {
            best, best_length, ..
        } = search;
        if length_history
            .last()
            .is_none_or(|&last| (last - best_length).abs() > 1e-15)
        {
            length_history.push(best_length);
        }

        debug_assert!(is_permutation(&best, n));
        info!(
            iterations,
            best_length,
            accepted_moves,
            cancelled,
            elapsed = started.elapsed().as_secs_f64(),
            "simulated annealing finished"
        );

        Ok(SaResult {
            best,
            best_length,
            initial_length,
            iterations,
            final_temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            length_history,
        })
    }
}

/// Outcome of one window-swap move.
#[derive(Debug, Clone, Copy)]
struct Step {
    candidate_length: f64,
    accepted: bool,
    improving: bool,
}

/// Current tour plus the best tour seen so far.
#[derive(Debug, Clone)]
struct Search {
    current: Vec<usize>,
    best: Vec<usize>,
    best_length: f64,
}

impl Search {
    fn new(tour: Vec<usize>, length: f64) -> Self {
        Self {
            best: tour.clone(),
            current: tour,
            best_length: length,
        }
    }

    /// Swaps the window ends `i < j` of the current tour and decides with
    /// the uniform `draw` whether the candidate replaces it.
    ///
    /// The best record follows the candidate's total length whether or not
    /// the move is accepted.
    fn try_move(
        &mut self,
        cities: &[City],
        i: usize,
        j: usize,
        temperature: f64,
        draw: f64,
    ) -> Step {
        let candidate = rotate_window(&self.current, i, j);
        let old_delta = local_delta(&self.current, cities, i, j);
        let new_delta = local_delta(&candidate, cities, i, j);
        let candidate_length = total_length(&candidate, cities);

        if candidate_length < self.best_length {
            self.best_length = candidate_length;
            self.best.clone_from(&candidate);
        }

        // Metropolis acceptance; improvements give a ratio above 1.
        let accepted = ((old_delta - new_delta) / temperature).exp() > draw;
        let improving = accepted && new_delta < old_delta;
        if accepted {
            self.current = candidate;
        }
        Step {
            candidate_length,
            accepted,
            improving,
        }
    }
}

/// Builds the starting tour.
fn initial_tour<R: Rng>(cities: &[City], strategy: InitialTour, rng: &mut R) -> Vec<usize> {
    let n = cities.len();
    match strategy {
        InitialTour::Random => random_permutation(n, rng),
        InitialTour::BestOfRandom { samples } => {
            let mut best = random_permutation(n, rng);
            let mut lowest = total_length(&best, cities);
            for _ in 1..samples {
                let tour = random_permutation(n, rng);
                let length = total_length(&tour, cities);
                if length < lowest {
                    lowest = length;
                    best = tour;
                }
            }
            debug!(samples, lowest, "initial tour sampled");
            best
        }
    }
}

/// Two distinct positions of `0..n`, sorted ascending.
fn draw_positions<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, n, 2);
    let (a, b) = (picked.index(0), picked.index(1));
    (a.min(b), a.max(b))
}
