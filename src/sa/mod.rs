//! Simulated Annealing (SA) for the travelling salesman problem.
//!
//! A single-tour trajectory search. Each iteration swaps the endpoints of a
//! random window of the tour, scores the move on the four edges it touches
//! and accepts it with the Metropolis criterion. The best tour seen is
//! tracked on total length, independently of acceptance.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod schedule;
mod types;

pub use config::{InitialTour, SaConfig, TemperatureSchedule};
pub use runner::SaRunner;
pub use schedule::Temperatures;
pub use types::{SaResult, SaSnapshot};
