//! Lazy temperature sequences.

use super::config::TemperatureSchedule;

/// Iterator over the temperatures of a [`TemperatureSchedule`].
///
/// The finite variant yields `10^(5 * (1 - k / (steps - 1)))` for
/// `k = 0..steps`; the geometric variant never returns `None`.
#[derive(Debug, Clone)]
pub enum Temperatures {
    Finite { steps: usize, k: usize },
    Geometric {
        current: f64,
        alpha: f64,
        floor: f64,
        reset: f64,
    },
}

impl Temperatures {
    pub fn new(schedule: TemperatureSchedule) -> Self {
        match schedule {
            TemperatureSchedule::Finite { steps } => Temperatures::Finite { steps, k: 0 },
            TemperatureSchedule::Geometric {
                initial,
                alpha,
                floor,
                reset,
            } => Temperatures::Geometric {
                current: initial,
                alpha,
                floor,
                reset,
            },
        }
    }
}

impl From<TemperatureSchedule> for Temperatures {
    fn from(schedule: TemperatureSchedule) -> Self {
        Temperatures::new(schedule)
    }
}

impl Iterator for Temperatures {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match self {
            Temperatures::Finite { steps, k } => {
                if *k >= *steps {
                    return None;
                }
                let t = if *steps == 1 {
                    1.0
                } else {
                    let fraction = *k as f64 / (*steps - 1) as f64;
                    10f64.powf(5.0 * (1.0 - fraction))
                };
                *k += 1;
                Some(t)
            }
            Temperatures::Geometric {
                current,
                alpha,
                floor,
                reset,
            } => {
                *current *= *alpha;
                if *current < *floor {
                    *current = *reset;
                }
                Some(*current)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Temperatures::Finite { steps, k } => {
                let left = steps.saturating_sub(*k);
                (left, Some(left))
            }
            Temperatures::Geometric { .. } => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_endpoints_and_length() {
        let temps: Vec<f64> = Temperatures::new(TemperatureSchedule::Finite { steps: 100 }).collect();
        assert_eq!(temps.len(), 100);
        assert!((temps[0] - 1e5).abs() < 1e-6);
        assert!((temps[99] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_finite_strictly_decreasing() {
        let temps: Vec<f64> = Temperatures::new(TemperatureSchedule::Finite { steps: 1000 }).collect();
        for w in temps.windows(2) {
            assert!(w[1] < w[0], "{} should be below {}", w[1], w[0]);
        }
    }

    #[test]
    fn test_finite_single_step() {
        let temps: Vec<f64> = Temperatures::new(TemperatureSchedule::Finite { steps: 1 }).collect();
        assert_eq!(temps, vec![1.0]);
    }

    #[test]
    fn test_finite_is_not_restartable() {
        let mut temps = Temperatures::new(TemperatureSchedule::Finite { steps: 3 });
        assert_eq!(temps.by_ref().count(), 3);
        assert_eq!(temps.next(), None);
    }

    #[test]
    fn test_geometric_first_value_is_cooled() {
        let mut temps = Temperatures::new(TemperatureSchedule::geometric());
        assert!((temps.next().unwrap() - 99.9).abs() < 1e-9);
    }

    #[test]
    fn test_geometric_resets_below_floor() {
        let temps = Temperatures::new(TemperatureSchedule::Geometric {
            initial: 1.0,
            alpha: 0.5,
            floor: 0.1,
            reset: 10.0,
        });
        let values: Vec<f64> = temps.take(5).collect();
        // 0.5, 0.25, 0.125, then 0.0625 < 0.1 -> 10, then 5
        assert_eq!(values, vec![0.5, 0.25, 0.125, 10.0, 5.0]);
    }

    #[test]
    fn test_geometric_never_ends() {
        let temps = Temperatures::new(TemperatureSchedule::geometric());
        let values: Vec<f64> = temps.take(50_000).collect();
        assert_eq!(values.len(), 50_000);
        assert!(values.iter().all(|&t| t >= 0.1 && t.is_finite()));
    }
}
