//! Parameter sweeps over the colony.
//!
//! Each sweep varies one parameter while holding the others at their
//! defaults and records the confidence of the winning path.

use super::config::AcoConfig;
use super::graph::{Graph, DEFAULT_WEIGHTS};
use super::runner::AcoRunner;
use crate::error::Result;
use crate::random::rng_from;
use rand::Rng;

/// Parameter varied by [`sweep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepParameter {
    /// Population 100, 110, ..., 190 on 5 cities.
    Ants,
    /// Evaporation 0.1, 0.2, ..., 0.9 with 100 ants.
    Evaporation,
    /// City count 5..=9.
    Cities,
    /// Edge count 8..=15 on a 7-city random sparse graph.
    Edges,
    /// Iterations 50, 65, ..., 185.
    Iterations,
}

/// One measurement of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    /// Value taken by the swept parameter.
    pub value: f64,
    pub top_path: Vec<usize>,
    pub confidence: f64,
}

const BASE_CITIES: usize = 5;
const SPARSE_CITIES: usize = 7;

/// Runs one colony per parameter value on a freshly generated graph.
pub fn sweep(parameter: SweepParameter, base: &AcoConfig) -> Result<Vec<SweepPoint>> {
    let mut rng = rng_from(base.seed);
    let mut points = Vec::new();

    for value in values(parameter) {
        let mut config = base.clone().with_seed(rng.random());
        let mut cities = BASE_CITIES;
        let mut edges = None;
        match parameter {
            SweepParameter::Ants => config.population = value as usize,
            SweepParameter::Evaporation => {
                config.population = 100;
                config.evaporation_rate = value;
            }
            SweepParameter::Cities => cities = value as usize,
            SweepParameter::Edges => {
                cities = SPARSE_CITIES;
                edges = Some(value as usize);
            }
            SweepParameter::Iterations => config.iterations = value as usize,
        }

        let mut graph = match edges {
            Some(m) => Graph::random_sparse(cities, m, DEFAULT_WEIGHTS, &mut rng)?,
            None => Graph::complete_random(cities, DEFAULT_WEIGHTS, &mut rng)?,
        };
        let result = AcoRunner::run(&mut graph, &config)?;
        tracing::info!(
            ?parameter,
            value,
            confidence = result.confidence,
            "sweep point"
        );
        points.push(SweepPoint {
            value,
            top_path: result.path,
            confidence: result.confidence,
        });
    }
    Ok(points)
}

fn values(parameter: SweepParameter) -> Vec<f64> {
    match parameter {
        SweepParameter::Ants => (100..200).step_by(10).map(|v| v as f64).collect(),
        SweepParameter::Evaporation => (1..=9).map(|k| k as f64 / 10.0).collect(),
        SweepParameter::Cities => (5..10).map(|v| v as f64).collect(),
        SweepParameter::Edges => (SPARSE_CITIES + 1..SPARSE_CITIES + 9)
            .map(|v| v as f64)
            .collect(),
        SweepParameter::Iterations => (50..200).step_by(15).map(|v| v as f64).collect(),
    }
}
