//! Cities and Euclidean tour lengths.
//!
//! A tour is a slice of city indices visited in order and implicitly
//! closed: the last city connects back to the first.

/// A city with fixed planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another city.
    pub fn distance(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One edge of a closed tour, as printed by the tour explanation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub from: usize,
    pub to: usize,
    pub distance: f64,
    pub from_point: City,
    pub to_point: City,
}

/// Returns `true` if `tour` contains every index of `0..n` exactly once.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

/// Length of the edge leaving `position` (modulo the tour length).
pub fn leg_length(tour: &[usize], cities: &[City], position: usize) -> f64 {
    let n = tour.len();
    let from = tour[position % n];
    let to = tour[(position + 1) % n];
    cities[from].distance(&cities[to])
}

/// Total length of the closed tour.
pub fn total_length(tour: &[usize], cities: &[City]) -> f64 {
    debug_assert!(
        is_permutation(tour, cities.len()),
        "tour must be a permutation of the city indices"
    );
    if tour.len() < 2 {
        return 0.0;
    }
    (0..tour.len()).map(|k| leg_length(tour, cities, k)).sum()
}

/// Sum of the four edges leaving positions `j`, `j-1`, `i` and `i-1`.
///
/// This is the neighbourhood touched by [`rotate_window`]. Edges shared by
/// two of those positions (adjacent `i` and `j`) are counted twice.
pub fn local_delta(tour: &[usize], cities: &[City], i: usize, j: usize) -> f64 {
    let n = tour.len();
    debug_assert!(i < n && j < n);
    let before = |k: usize| (k + n - 1) % n;
    [j, before(j), i, before(i)]
        .into_iter()
        .map(|k| leg_length(tour, cities, k))
        .sum()
}

/// Builds the SA candidate for positions `i < j`.
///
/// The element at `j` moves to `i`, the element at `i` moves to `j`, and
/// everything strictly between them keeps its place.
pub fn rotate_window(tour: &[usize], i: usize, j: usize) -> Vec<usize> {
    debug_assert!(i < j && j < tour.len());
    let mut candidate = Vec::with_capacity(tour.len());
    candidate.extend_from_slice(&tour[..i]);
    candidate.push(tour[j]);
    candidate.extend_from_slice(&tour[i + 1..j]);
    candidate.push(tour[i]);
    candidate.extend_from_slice(&tour[j + 1..]);
    candidate
}

/// Per-edge breakdown of a closed tour.
pub fn explain_tour(tour: &[usize], cities: &[City]) -> Vec<Leg> {
    let n = tour.len();
    (0..n)
        .map(|step| {
            let from = tour[step];
            let to = tour[(step + 1) % n];
            Leg {
                from,
                to,
                distance: cities[from].distance(&cities[to]),
                from_point: cities[from],
                to_point: cities[to],
            }
        })
        .collect()
}

/// Closed coordinate sequence for plotting; the first point is repeated.
pub fn polyline(tour: &[usize], cities: &[City]) -> Vec<City> {
    let mut points: Vec<City> = tour.iter().map(|&c| cities[c]).collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// Length of an open path (no wrap-around edge).
pub fn path_length(path: &[usize], cities: &[City]) -> f64 {
    path.windows(2)
        .map(|w| cities[w[0]].distance(&cities[w[1]]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_square() -> Vec<City> {
        vec![
            City::new(1.0, 1.0),
            City::new(2.0, 1.0),
            City::new(2.0, 2.0),
            City::new(1.0, 2.0),
        ]
    }

    #[test]
    fn test_unit_square_perimeter() {
        let cities = unit_square();
        assert!((total_length(&[0, 1, 2, 3], &cities) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_crossing_tour_is_longer() {
        let cities = unit_square();
        let crossing = total_length(&[0, 2, 1, 3], &cities);
        assert!((crossing - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_window_moves_endpoints() {
        let tour = vec![0, 1, 2, 3, 4, 5];
        assert_eq!(rotate_window(&tour, 1, 4), vec![0, 4, 2, 3, 1, 5]);
        assert_eq!(rotate_window(&tour, 0, 5), vec![5, 1, 2, 3, 4, 0]);
        assert_eq!(rotate_window(&tour, 2, 3), vec![0, 1, 3, 2, 4, 5]);
    }

    #[test]
    fn test_local_delta_wraps_at_zero() {
        let cities = unit_square();
        // positions 3, 2, 0 and 3 (wrapped): edges 3->0, 2->3, 0->1, 3->0
        let delta = local_delta(&[0, 1, 2, 3], &cities, 0, 3);
        assert!((delta - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_local_delta_counts_four_edges() {
        let cities: Vec<City> = (0..6).map(|k| City::new(k as f64, 0.0)).collect();
        let tour = vec![0, 1, 2, 3, 4, 5];
        // edges leaving 4, 3, 1, 0 are all unit length
        assert!((local_delta(&tour, &cities, 1, 4) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
    }

    #[test]
    fn test_explain_tour_closes_loop() {
        let cities = unit_square();
        let legs = explain_tour(&[0, 1, 2, 3], &cities);
        assert_eq!(legs.len(), 4);
        assert_eq!((legs[3].from, legs[3].to), (3, 0));
        assert!((legs.iter().map(|l| l.distance).sum::<f64>() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_polyline_repeats_first_point() {
        let cities = unit_square();
        let points = polyline(&[2, 3, 0, 1], &cities);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], points[4]);
    }

    #[test]
    fn test_degenerate_tours_have_zero_length() {
        let cities = vec![City::new(3.0, 4.0)];
        assert_eq!(total_length(&[0], &cities), 0.0);
        assert_eq!(total_length(&[], &[]), 0.0);
    }

    fn cities_and_tour() -> impl Strategy<Value = (Vec<City>, Vec<usize>)> {
        prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 2..30).prop_flat_map(
            |coords| {
                let n = coords.len();
                let cities: Vec<City> = coords.into_iter().map(City::from).collect();
                (Just(cities), Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_total_length_rotation_invariant((cities, tour) in cities_and_tour(), shift in 0usize..30) {
            let base = total_length(&tour, &cities);
            let mut rotated = tour.clone();
            rotated.rotate_left(shift % tour.len());
            prop_assert!(base >= 0.0);
            prop_assert!((base - total_length(&rotated, &cities)).abs() < 1e-9);
        }

        #[test]
        fn prop_total_length_reflection_invariant((cities, tour) in cities_and_tour()) {
            let mut reversed = tour.clone();
            reversed.reverse();
            prop_assert!((total_length(&tour, &cities) - total_length(&reversed, &cities)).abs() < 1e-9);
        }

        #[test]
        fn prop_rotate_window_keeps_permutation((_cities, tour) in cities_and_tour(), a in 0usize..30, b in 0usize..30) {
            let n = tour.len();
            let (i, j) = (a % n, b % n);
            prop_assume!(i != j);
            let (i, j) = (i.min(j), i.max(j));
            prop_assert!(is_permutation(&rotate_window(&tour, i, j), n));
        }
    }
}
