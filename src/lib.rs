//! Metaheuristics for the travelling salesman problem.
//!
//! Two independent strategies optimise a closed tour over a set of planar
//! cities:
//!
//! - **Simulated Annealing (SA)**: single-tour trajectory search with a
//!   window-endpoint swap move, Metropolis acceptance on the four affected
//!   edges, and either a finite log-spaced or an unbounded geometric
//!   temperature schedule.
//! - **Ant Colony Optimization (ACO)**: a colony walks a weighted graph,
//!   guided by evaporating pheromone trails; the most frequent path wins.
//!
//! A finished tour can be split into several vehicle routes sharing a
//! depot with [`partition::Partition`].
//!
//! # Example
//!
//! ```
//! use u_tsp::dataset::generate_cities;
//! use u_tsp::partition::Partition;
//! use u_tsp::random::create_rng;
//! use u_tsp::sa::{InitialTour, SaConfig, SaRunner, TemperatureSchedule};
//!
//! let cities = generate_cities(12, 100, &mut create_rng(1));
//! let config = SaConfig::default()
//!     .with_schedule(TemperatureSchedule::Finite { steps: 2000 })
//!     .with_initial_tour(InitialTour::Random)
//!     .with_seed(1);
//! let result = SaRunner::run(&cities, &config).unwrap();
//! let routes = Partition::split(&result.best, &cities, 2).unwrap().routes();
//! assert_eq!(routes.len(), 2);
//! ```
//!
//! Every run is single-threaded; long runs stop cooperatively through an
//! `Arc<AtomicBool>` polled between iterations.

pub mod aco;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod partition;
pub mod random;
pub mod report;
pub mod sa;
pub mod telemetry;

pub use error::{AcoError, DatasetError, Result, TspError};
pub use geometry::City;
