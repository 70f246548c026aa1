//! ACO configuration.

use crate::error::{Result, TspError};

/// Configuration for the Ant Colony optimizer.
///
/// # Examples
///
/// ```
/// use u_tsp::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_population(150)
///     .with_evaporation_rate(0.5)
///     .with_seed(7);
/// assert_eq!(config.population, 150);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of ants released per iteration.
    pub population: usize,

    /// Number of colony iterations.
    pub iterations: usize,

    /// Fraction of pheromone removed from every edge each iteration, in [0, 1).
    pub evaporation_rate: f64,

    /// Probability of a uniformly random move instead of the pheromone rule.
    pub eps: f64,

    /// Pheromone quantity an ant spreads over its whole tour.
    pub deposit: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            population: 200,
            iterations: 100,
            evaporation_rate: 0.7,
            eps: 0.1,
            deposit: 100.0,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_population(mut self, n: usize) -> Self {
        self.population = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_deposit(mut self, deposit: f64) -> Self {
        self.deposit = deposit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population == 0 {
            return Err(invalid("population must be at least 1"));
        }
        if self.iterations == 0 {
            return Err(invalid("iterations must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err(invalid(format!(
                "evaporation rate must be in [0, 1), got {}",
                self.evaporation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.eps) {
            return Err(invalid(format!("eps must be in [0, 1], got {}", self.eps)));
        }
        if !(self.deposit.is_finite() && self.deposit > 0.0) {
            return Err(invalid(format!(
                "deposit must be positive, got {}",
                self.deposit
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> TspError {
    TspError::InvalidConfig(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.population, 200);
        assert_eq!(config.iterations, 100);
        assert!((config.evaporation_rate - 0.7).abs() < 1e-12);
        assert!((config.eps - 0.1).abs() < 1e-12);
        assert!((config.deposit - 100.0).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_evaporation_bounds() {
        assert!(AcoConfig::default().with_evaporation_rate(1.0).validate().is_err());
        assert!(AcoConfig::default().with_evaporation_rate(-0.1).validate().is_err());
        assert!(AcoConfig::default().with_evaporation_rate(0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_empty_colony() {
        assert!(AcoConfig::default().with_population(0).validate().is_err());
        assert!(AcoConfig::default().with_iterations(0).validate().is_err());
    }

    #[test]
    fn test_validate_eps_and_deposit() {
        assert!(AcoConfig::default().with_eps(1.5).validate().is_err());
        assert!(AcoConfig::default().with_deposit(0.0).validate().is_err());
        assert!(AcoConfig::default().with_deposit(f64::NAN).validate().is_err());
    }
}
