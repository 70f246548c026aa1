//! CSV report log.
//!
//! A [`ReportLog`] writes its header once when created and appends one row
//! per snapshot it receives as [`Telemetry`].

use crate::aco::AcoSnapshot;
use crate::error::{Result, TspError};
use crate::geometry::City;
use crate::sa::SaSnapshot;
use crate::telemetry::Telemetry;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const SA_HEADER: [&str; 4] = ["iterations", "elapsed", "distance", "temperature"];
const ACO_HEADER: [&str; 5] = [
    "iteration",
    "distinct_paths",
    "top_path",
    "top_count",
    "confidence",
];

/// Append-only CSV log of optimizer snapshots.
pub struct ReportLog<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
    error: Option<csv::Error>,
}

impl ReportLog<File> {
    /// Creates `path` and writes the SA header.
    pub fn create_sa(path: impl AsRef<Path>) -> Result<Self> {
        Self::sa(File::create(path)?)
    }

    /// Creates `path` and writes the ACO header.
    pub fn create_aco(path: impl AsRef<Path>) -> Result<Self> {
        Self::aco(File::create(path)?)
    }
}

impl<W: Write> ReportLog<W> {
    /// SA log: `iterations,elapsed,distance,temperature`.
    pub fn sa(inner: W) -> Result<Self> {
        Self::with_header(inner, &SA_HEADER)
    }

    /// ACO log: `iteration,distinct_paths,top_path,top_count,confidence`.
    pub fn aco(inner: W) -> Result<Self> {
        Self::with_header(inner, &ACO_HEADER)
    }

    fn with_header(inner: W, header: &[&str]) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(header)?;
        Ok(Self {
            writer,
            rows: 0,
            error: None,
        })
    }

    /// Number of rows written after the header.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Appends one SA row. `distance` is the best length so far.
    pub fn write_sa(&mut self, s: &SaSnapshot) -> Result<()> {
        self.writer.write_record([
            s.iteration.to_string(),
            format!("{:.4}", s.elapsed_seconds),
            s.best_length.to_string(),
            s.temperature.to_string(),
        ])?;
        self.rows += 1;
        Ok(())
    }

    /// Appends one ACO row; the path is written space-separated.
    pub fn write_aco(&mut self, s: &AcoSnapshot) -> Result<()> {
        self.writer.write_record([
            s.iteration.to_string(),
            s.distinct_paths.to_string(),
            format_path(&s.top_path),
            s.top_count.to_string(),
            s.confidence.to_string(),
        ])?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes the log and returns the underlying writer, or the first
    /// error met while logging telemetry.
    pub fn finish(mut self) -> Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err.into());
        }
        self.writer
            .into_inner()
            .map_err(|err| TspError::Io(err.into_error()))
    }

    fn keep_first_error(&mut self, outcome: Result<()>) {
        if let Err(err) = outcome {
            tracing::warn!(%err, "report row dropped");
            if self.error.is_none() {
                if let TspError::Report(err) = err {
                    self.error = Some(err);
                }
            }
        }
    }
}

impl<W: Write> Telemetry for ReportLog<W> {
    fn sa_snapshot(&mut self, snapshot: &SaSnapshot, _best: &[usize]) {
        let outcome = self.write_sa(snapshot);
        self.keep_first_error(outcome);
    }

    fn aco_snapshot(&mut self, snapshot: &AcoSnapshot) {
        let outcome = self.write_aco(snapshot);
        self.keep_first_error(outcome);
    }
}

/// Space-separated city indices.
pub fn format_path(path: &[usize]) -> String {
    path.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes a polyline as `x,y` rows.
pub fn write_polyline<W: Write>(inner: W, points: &[City]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(inner);
    writer.write_record(["x", "y"])?;
    for p in points {
        writer.write_record([p.x.to_string(), p.y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
