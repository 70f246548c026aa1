//! City dataset generation and import.
//!
//! Dataset files hold one city per line as two whitespace-separated
//! numbers, e.g. `12 87`.

use crate::error::{DatasetError, Result};
use crate::geometry::City;
use rand::Rng;
use std::fs;
use std::path::Path;

/// Default upper bound (exclusive) for generated coordinates.
pub const DEFAULT_MAX_COORDINATE: u32 = 100;

/// Generates `count` cities with uniform random integer coordinates in
/// `[0, max_coordinate)`. Duplicates are not filtered.
pub fn generate_cities<R: Rng>(count: usize, max_coordinate: u32, rng: &mut R) -> Vec<City> {
    let bound = max_coordinate.max(1);
    (0..count)
        .map(|_| {
            City::new(
                rng.random_range(0..bound) as f64,
                rng.random_range(0..bound) as f64,
            )
        })
        .collect()
}

/// Parses dataset text. Blank lines are ignored; any other line must hold
/// exactly two numeric columns or the whole parse fails.
pub fn parse_cities(text: &str) -> std::result::Result<Vec<City>, DatasetError> {
    let mut cities = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let malformed = || DatasetError::Malformed {
            line: index + 1,
            content: raw.to_string(),
        };
        let mut fields = line.split_whitespace();
        let (Some(x), Some(y), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(malformed());
        };
        let x: f64 = x.parse().map_err(|_| malformed())?;
        let y: f64 = y.parse().map_err(|_| malformed())?;
        if !x.is_finite() || !y.is_finite() {
            return Err(malformed());
        }
        cities.push(City::new(x, y));
    }
    if cities.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(cities)
}

/// Loads a dataset file.
pub fn load_cities(path: impl AsRef<Path>) -> Result<Vec<City>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cities = parse_cities(&text)?;
    tracing::debug!(path = %path.display(), cities = cities.len(), "dataset loaded");
    Ok(cities)
}

/// Formats cities in dataset layout without a trailing newline.
pub fn format_cities(cities: &[City]) -> String {
    cities
        .iter()
        .map(|c| format!("{} {}", c.x, c.y))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes cities to a dataset file.
pub fn write_cities(path: impl AsRef<Path>, cities: &[City]) -> Result<()> {
    fs::write(path, format_cities(cities))?;
    Ok(())
}
