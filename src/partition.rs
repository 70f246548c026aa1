//! Splitting one tour into several vehicle routes.
//!
//! The tour is walked from the depot, edge by edge. As soon as the distance
//! walked since the last depot visit reaches `total_length / k`, a depot
//! visit is inserted in front of the stop just reached, which then opens the
//! next vehicle's route. The split is greedy, not balanced optimally.

use crate::error::{Result, TspError};
use crate::geometry::{is_permutation, leg_length, path_length, total_length, City};

/// City index used as depot.
pub const DEPOT: usize = 0;

/// A tour with extra depot visits marking vehicle boundaries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partition {
    stops: Vec<usize>,
    insertions: usize,
    shares: Vec<f64>,
}

impl Partition {
    /// Splits `tour` for `vehicles` vehicles. With one vehicle the tour is
    /// returned unchanged.
    pub fn split(tour: &[usize], cities: &[City], vehicles: usize) -> Result<Self> {
        if vehicles == 0 {
            return Err(TspError::InvalidConfig("at least one vehicle is required".into()));
        }
        if !is_permutation(tour, cities.len()) {
            return Err(TspError::InvalidTour(
                "tour is not a permutation of the cities".into(),
            ));
        }
        let Some(depot_pos) = tour.iter().position(|&c| c == DEPOT) else {
            return Err(TspError::InvalidTour("tour does not contain the depot".into()));
        };

        let n = tour.len();
        let total = total_length(tour, cities);
        if vehicles == 1 {
            return Ok(Self {
                stops: tour.to_vec(),
                insertions: 0,
                shares: vec![total],
            });
        }

        let budget = total / vehicles as f64;
        let mut cuts = vec![false; n];
        let mut shares = Vec::with_capacity(vehicles);
        let mut walked = 0usize;

        'vehicles: for _ in 1..vehicles {
            let segment_start = walked;
            // The first leg leaves the depot itself, so cutting after it
            // would leave the first vehicle with no stop.
            let min_legs = if segment_start == 0 { 2 } else { 1 };
            let mut covered = 0.0;
            loop {
                if walked >= n {
                    break 'vehicles;
                }
                covered += leg_length(tour, cities, depot_pos + walked);
                walked += 1;
                if covered >= budget && walked - segment_start >= min_legs {
                    break;
                }
            }
            if walked >= n {
                // the next stop is the depot itself
                break;
            }
            cuts[(depot_pos + walked) % n] = true;
            shares.push(covered);
        }
        shares.push(total - shares.iter().sum::<f64>());

        let mut stops = Vec::with_capacity(n + vehicles - 1);
        for (position, &city) in tour.iter().enumerate() {
            if cuts[position] {
                stops.push(DEPOT);
            }
            stops.push(city);
        }
        let insertions = stops.len() - n;
        tracing::debug!(vehicles, insertions, budget, "tour partitioned");

        Ok(Self {
            stops,
            insertions,
            shares,
        })
    }

    /// The tour including inserted depot visits, in the original rotation.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Number of depot visits added to the tour.
    pub fn insertions(&self) -> usize {
        self.insertions
    }

    /// Distance of the original tour walked between consecutive cuts,
    /// including the edge that crossed the budget. Sums to the tour length.
    pub fn shares(&self) -> &[f64] {
        &self.shares
    }

    /// One route per vehicle, each starting and ending at the depot.
    ///
    /// Routes are circular slices of [`stops`](Self::stops) between
    /// consecutive depot visits.
    pub fn routes(&self) -> Vec<Vec<usize>> {
        let depots: Vec<usize> = self
            .stops
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == DEPOT)
            .map(|(i, _)| i)
            .collect();
        let len = self.stops.len();
        let count = depots.len();
        (0..count)
            .map(|k| {
                let start = depots[k];
                let end = depots[(k + 1) % count];
                let hops = if end > start { end - start } else { end + len - start };
                (0..=hops).map(|h| self.stops[(start + h) % len]).collect()
            })
            .collect()
    }

    /// Length of each route, return trips included.
    pub fn route_lengths(&self, cities: &[City]) -> Vec<f64> {
        self.routes()
            .iter()
            .map(|route| path_length(route, cities))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(n: usize) -> Vec<City> {
        (0..n)
            .map(|k| {
                let angle = k as f64 / n as f64 * std::f64::consts::TAU;
                City::new(10.0 * angle.cos(), 10.0 * angle.sin())
            })
            .collect()
    }

    #[test]
    fn test_single_vehicle_is_noop() {
        let cities = circle(6);
        let tour = vec![3, 1, 0, 5, 2, 4];
        let partition = Partition::split(&tour, &cities, 1).unwrap();
        assert_eq!(partition.stops(), tour.as_slice());
        assert_eq!(partition.insertions(), 0);
        assert_eq!(partition.routes(), vec![vec![0, 5, 2, 4, 3, 1, 0]]);
    }

    #[test]
    fn test_two_vehicles_split_ten_cities() {
        let cities = circle(10);
        let tour: Vec<usize> = (0..10).collect();
        let total = total_length(&tour, &cities);
        let edge = cities[0].distance(&cities[1]);

        let partition = Partition::split(&tour, &cities, 2).unwrap();

        assert_eq!(partition.insertions(), 1);
        assert_eq!(partition.stops().iter().filter(|&&c| c == DEPOT).count(), 2);
        let routes = partition.routes();
        assert_eq!(routes.len(), 2);
        for route in &routes {
            assert_eq!(route.first(), Some(&DEPOT));
            assert_eq!(route.last(), Some(&DEPOT));
        }
        for &share in partition.shares() {
            assert!(
                (share - total / 2.0).abs() <= edge + 1e-9,
                "share {share} too far from {}",
                total / 2.0
            );
        }
    }

    #[test]
    fn test_depot_in_the_middle() {
        // unit-spaced ring around a 3x1 rectangle
        let cities: Vec<City> = [(0, 0), (1, 0), (2, 0), (3, 0), (3, 1), (2, 1), (1, 1), (0, 1)]
            .iter()
            .map(|&(x, y)| City::new(x as f64, y as f64))
            .collect();
        let tour = vec![4, 5, 6, 7, 0, 1, 2, 3];
        let partition = Partition::split(&tour, &cities, 2).unwrap();
        // four legs from the depot reach city 4, which opens the second route
        assert_eq!(partition.stops(), &[0, 4, 5, 6, 7, 0, 1, 2, 3]);
        assert_eq!(
            partition.routes(),
            vec![vec![0, 4, 5, 6, 7, 0], vec![0, 1, 2, 3, 0]]
        );
        assert_eq!(partition.shares(), &[4.0, 4.0]);
    }

    #[test]
    fn test_more_vehicles_than_stops() {
        let cities = circle(3);
        let partition = Partition::split(&[0, 1, 2], &cities, 5).unwrap();
        assert_eq!(partition.stops(), &[0, 1, 0, 2]);
        assert_eq!(partition.insertions(), 1);
        assert_eq!(partition.routes(), vec![vec![0, 1, 0], vec![0, 2, 0]]);
    }

    #[test]
    fn test_long_middle_leg_gets_its_own_route() {
        let cities = vec![
            City::new(0.0, 0.0),
            City::new(60.0, 0.0),
            City::new(120.0, 0.0),
            City::new(60.0, 1.0),
        ];
        let partition = Partition::split(&[0, 1, 2, 3], &cities, 4).unwrap();
        // 2 -> 3 alone crosses the budget and closes the second route
        assert_eq!(partition.stops(), &[0, 1, 0, 2, 0, 3]);
        assert_eq!(partition.insertions(), 2);
        assert_eq!(
            partition.routes(),
            vec![vec![0, 1, 0], vec![0, 2, 0], vec![0, 3, 0]]
        );
        assert_eq!(partition.shares().len(), 3);
        assert!((partition.shares()[0] - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_coincident_cities() {
        let cities = vec![City::new(2.0, 2.0); 4];
        let partition = Partition::split(&[0, 1, 2, 3], &cities, 2).unwrap();
        assert_eq!(partition.stops(), &[0, 1, 0, 2, 3]);
    }

    #[test]
    fn test_invalid_input() {
        let cities = circle(4);
        assert!(Partition::split(&[0, 1, 2, 3], &cities, 0).is_err());
        assert!(Partition::split(&[0, 1, 1, 3], &cities, 2).is_err());
        assert!(Partition::split(&[], &[], 2).is_err());
    }

    #[test]
    fn test_route_lengths_include_return() {
        let cities = vec![
            City::new(0.0, 0.0),
            City::new(10.0, 0.0),
            City::new(10.0, 10.0),
            City::new(0.0, 10.0),
        ];
        let partition = Partition::split(&[0, 1, 2, 3], &cities, 2).unwrap();
        assert_eq!(partition.stops(), &[0, 1, 0, 2, 3]);
        let lengths = partition.route_lengths(&cities);
        assert!((lengths[0] - 20.0).abs() < 1e-9);
        assert!((lengths[1] - (200f64.sqrt() + 20.0)).abs() < 1e-9);
    }

    fn instance() -> impl Strategy<Value = (Vec<City>, Vec<usize>, usize)> {
        (2usize..20).prop_flat_map(|n| {
            (
                prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), n),
                Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
                1usize..6,
            )
                .prop_map(|(coords, tour, k)| {
                    (coords.into_iter().map(City::from).collect::<Vec<City>>(), tour, k)
                })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_routes_recover_tour((cities, tour, k) in instance()) {
            let partition = Partition::split(&tour, &cities, k).unwrap();
            prop_assert!(partition.insertions() < k);

            let depot_pos = tour.iter().position(|&c| c == DEPOT).unwrap();
            let mut expected = tour.clone();
            expected.rotate_left(depot_pos);

            let mut joined = Vec::new();
            for route in partition.routes() {
                prop_assert_eq!(route.first(), Some(&DEPOT));
                prop_assert_eq!(route.last(), Some(&DEPOT));
                joined.extend_from_slice(&route[..route.len() - 1]);
            }
            joined.retain(|&c| c != DEPOT);
            expected.retain(|&c| c != DEPOT);
            prop_assert_eq!(joined, expected);

            let covered: f64 = partition.shares().iter().sum();
            prop_assert!((covered - total_length(&tour, &cities)).abs() < 1e-6);
        }
    }
}
