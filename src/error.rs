//! Error types shared by every module.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

/// Errors raised while loading or parsing a city dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("cannot read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line did not contain exactly two numeric columns.
    #[error("malformed dataset line {line}: {content:?}")]
    Malformed { line: usize, content: String },

    /// The dataset contained no cities.
    #[error("dataset contains no cities")]
    Empty,
}

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum TspError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A tour is not usable for the requested operation.
    #[error("invalid tour: {0}")]
    InvalidTour(String),

    /// The instance has no cities.
    #[error("instance has no cities")]
    EmptyInstance,

    /// The run was cancelled before producing any result.
    #[error("run cancelled before the first iteration completed")]
    Cancelled,

    /// Dataset import failure.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Report writing failure.
    #[error("report error: {0}")]
    Report(#[from] csv::Error),

    /// Generic I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-ant faults raised while laying pheromone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcoError {
    /// The ant's path crosses a pair of cities with no edge between them.
    #[error("path uses missing edge ({from}, {to})")]
    MissingEdge { from: usize, to: usize },
}
