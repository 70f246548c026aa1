//! SA configuration and temperature schedules.

use crate::error::{Result, TspError};

/// Temperature schedule driving the annealing loop.
///
/// Both variants are consumed lazily through [`Temperatures`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureSchedule {
    /// Fixed-length, log-spaced, strictly decreasing from `1e5` to `1`.
    ///
    /// Ends after `steps` temperatures.
    Finite {
        /// Number of temperatures (and therefore iterations).
        steps: usize,
    },

    /// Geometric decay `T <- alpha * T` that never ends on its own.
    ///
    /// When the temperature drops below `floor` it jumps back to `reset`.
    Geometric {
        /// Starting temperature; cooled once before the first iteration.
        initial: f64,
        /// Cooling factor in (0, 1).
        alpha: f64,
        /// Temperatures below this trigger a reset.
        floor: f64,
        /// Temperature restored after falling below `floor`.
        reset: f64,
    },
}

impl TemperatureSchedule {
    /// Finite schedule with the default step count.
    pub fn finite() -> Self {
        TemperatureSchedule::Finite { steps: 100_000 }
    }

    /// Unbounded geometric schedule with the default constants.
    pub fn geometric() -> Self {
        TemperatureSchedule::Geometric {
            initial: 100.0,
            alpha: 0.999,
            floor: 0.1,
            reset: 10.0,
        }
    }

    /// Returns `true` if the schedule ends by itself.
    pub fn is_finite(&self) -> bool {
        matches!(self, TemperatureSchedule::Finite { .. })
    }
}

impl Default for TemperatureSchedule {
    fn default() -> Self {
        Self::finite()
    }
}

/// How the starting tour is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialTour {
    /// A single uniformly random permutation.
    Random,
    /// The shortest of `samples` random permutations.
    BestOfRandom { samples: usize },
}

impl Default for InitialTour {
    fn default() -> Self {
        InitialTour::BestOfRandom { samples: 10_000 }
    }
}

/// Configuration for the Simulated Annealing optimizer.
///
/// # Examples
///
/// ```
/// use u_tsp::sa::{InitialTour, SaConfig, TemperatureSchedule};
///
/// let config = SaConfig::default()
///     .with_schedule(TemperatureSchedule::Finite { steps: 20_000 })
///     .with_initial_tour(InitialTour::Random)
///     .with_report_interval(1000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Temperature schedule.
    pub schedule: TemperatureSchedule,

    /// Starting tour strategy.
    pub initial_tour: InitialTour,

    /// Hard iteration budget. 0 = no limit.
    pub max_iterations: usize,

    /// Iterations between telemetry snapshots. 0 disables snapshots.
    pub report_interval: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            schedule: TemperatureSchedule::default(),
            initial_tour: InitialTour::default(),
            max_iterations: 0,
            report_interval: 5000,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_schedule(mut self, schedule: TemperatureSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_initial_tour(mut self, initial_tour: InitialTour) -> Self {
        self.initial_tour = initial_tour;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_report_interval(mut self, n: usize) -> Self {
        self.report_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        match self.schedule {
            TemperatureSchedule::Finite { steps } => {
                if steps == 0 {
                    return Err(invalid("finite schedule needs at least one step"));
                }
            }
            TemperatureSchedule::Geometric {
                initial,
                alpha,
                floor,
                reset,
            } => {
                if initial <= 0.0 {
                    return Err(invalid("initial temperature must be positive"));
                }
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(invalid(format!(
                        "geometric alpha must be in (0, 1), got {alpha}"
                    )));
                }
                if floor <= 0.0 {
                    return Err(invalid("temperature floor must be positive"));
                }
                if reset < floor {
                    return Err(invalid("reset temperature must not be below the floor"));
                }
            }
        }
        if let InitialTour::BestOfRandom { samples: 0 } = self.initial_tour {
            return Err(invalid("best-of-random initial tour needs at least one sample"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> TspError {
    TspError::InvalidConfig(message.into())
}
