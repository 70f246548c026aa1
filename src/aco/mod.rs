//! Ant Colony Optimization (ACO).
//!
//! A population of ants walks the graph once per iteration. Each ant
//! prefers unvisited neighbours, choosing among them by pheromone with an
//! `eps` chance of a random pick. After every walk the trails evaporate and
//! each closed tour is reinforced in inverse proportion to its length. The
//! path walked most often in the last iteration is the answer, with its
//! share of the colony as confidence.
//!
//! Note that the pheromone rule picks the candidate with the *lowest*
//! pheromone, the reverse of the usual ACO bias.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"

mod ant;
mod config;
mod graph;
mod runner;
pub mod sweep;
mod types;

pub use ant::{Ant, DepositOutcome, StepOutcome};
pub use config::AcoConfig;
pub use graph::{Edge, EdgeView, Graph, DEFAULT_WEIGHTS};
pub use runner::AcoRunner;
pub use types::{is_closed_tour, top_path, AcoResult, AcoSnapshot, AntStats, PathCounts};
