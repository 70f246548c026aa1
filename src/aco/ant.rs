//! A single ant walking the graph.

use super::graph::Graph;
use crate::error::AcoError;
use rand::Rng;
use tracing::debug;

/// What happened during one call to [`Ant::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to an unvisited city.
    Moved(usize),
    /// Every neighbour was visited; moved to a random one anyway.
    Revisited(usize),
    /// All cities visited; returned to the start city.
    Closed,
    /// The current city has no neighbours; the ant stayed put.
    Stalled,
    /// The tour was already closed; nothing happened.
    Finished,
}

/// Result of an ant's pheromone update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositOutcome {
    /// Every edge of the closed tour was reinforced.
    Reinforced { edges: usize },
    /// The closed tour has zero length, so no deposit is possible.
    SkippedZeroLength,
    /// The ant got stuck on an isolated city and never closed its tour.
    Stalled,
    /// The tour was not closed within the allotted steps.
    Incomplete,
}

/// Agent building one path per colony iteration.
#[derive(Debug, Clone)]
pub struct Ant {
    path: Vec<usize>,
    visited: Vec<bool>,
    visited_count: usize,
    length: f64,
    deposit: f64,
    eps: f64,
    closed: bool,
    stalled: bool,
}

impl Ant {
    /// Creates an ant that spreads `deposit` pheromone over its tour and
    /// explores at random with probability `eps`.
    pub fn new(deposit: f64, eps: f64) -> Self {
        Self {
            path: Vec::new(),
            visited: Vec::new(),
            visited_count: 0,
            length: 0.0,
            deposit,
            eps,
            closed: false,
            stalled: false,
        }
    }

    /// Clears the path and places the ant on a uniformly random city.
    pub fn reset<R: Rng>(&mut self, n: usize, rng: &mut R) {
        let start = rng.random_range(0..n);
        self.start_at(n, start);
    }

    /// Clears the path and places the ant on `start`.
    pub fn start_at(&mut self, n: usize, start: usize) {
        self.path.clear();
        self.path.push(start);
        self.visited.clear();
        self.visited.resize(n, false);
        self.visited[start] = true;
        self.visited_count = 1;
        self.length = 0.0;
        self.closed = false;
        self.stalled = false;
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Accumulated weight of the traversed edges.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// `true` once the ant has visited every city and returned to its start.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn has_stalled(&self) -> bool {
        self.stalled
    }

    /// Extends the path by one city.
    ///
    /// Unvisited neighbours are preferred: with probability `eps` one is
    /// picked at random, otherwise the one with the lowest pheromone
    /// (lowest index on ties).
    pub fn step<R: Rng>(&mut self, graph: &Graph, rng: &mut R) -> StepOutcome {
        let Some(&current) = self.path.last() else {
            return StepOutcome::Stalled;
        };
        if self.closed {
            return StepOutcome::Finished;
        }

        let candidates: Vec<(f64, usize)> = graph
            .neighbors(current)
            .iter()
            .filter(|&&v| !self.visited[v])
            .filter_map(|&v| graph.pheromone(current, v).map(|p| (p, v)))
            .collect();

        if !candidates.is_empty() {
            let next = if rng.random::<f64>() < self.eps {
                candidates[rng.random_range(0..candidates.len())].1
            } else {
                candidates
                    .iter()
                    .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
                    .map(|&(_, v)| v)
                    .unwrap_or(candidates[0].1)
            };
            self.advance(graph, current, next);
            StepOutcome::Moved(next)
        } else if self.visited_count < self.visited.len() {
            let neighbours = graph.neighbors(current);
            if neighbours.is_empty() {
                self.stalled = true;
                debug!(city = current, "ant stalled on a city without neighbours");
                return StepOutcome::Stalled;
            }
            let next = neighbours[rng.random_range(0..neighbours.len())];
            self.advance(graph, current, next);
            StepOutcome::Revisited(next)
        } else {
            let start = self.path[0];
            self.advance(graph, current, start);
            self.closed = true;
            StepOutcome::Closed
        }
    }

    fn advance(&mut self, graph: &Graph, from: usize, to: usize) {
        self.path.push(to);
        if !self.visited[to] {
            self.visited[to] = true;
            self.visited_count += 1;
        }
        if from == to {
            return;
        }
        match graph.weight(from, to) {
            Some(weight) => self.length += weight,
            None => debug!(from, to, "no edge back to the start city"),
        }
    }

    /// Reinforces the edges of a closed tour by `deposit / length` each.
    ///
    /// Edges are checked before any pheromone is added, so a failing ant
    /// leaves the graph untouched.
    pub fn lay_pheromone(&self, graph: &mut Graph) -> Result<DepositOutcome, AcoError> {
        if !self.closed {
            return Ok(if self.stalled {
                DepositOutcome::Stalled
            } else {
                DepositOutcome::Incomplete
            });
        }
        if self.length <= 0.0 {
            return Ok(DepositOutcome::SkippedZeroLength);
        }
        let hops = || self.path.windows(2).filter(|w| w[0] != w[1]);
        if let Some(w) = hops().find(|w| !graph.contains_edge(w[0], w[1])) {
            return Err(AcoError::MissingEdge {
                from: w[0],
                to: w[1],
            });
        }
        let amount = self.deposit / self.length;
        let mut edges = 0;
        for w in hops() {
            graph.reinforce(w[0], w[1], amount);
            edges += 1;
        }
        Ok(DepositOutcome::Reinforced { edges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::City;
    use crate::random::create_rng;

    fn triangle() -> Graph {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 1, 2.0).unwrap();
        graph.add_edge(0, 2, 3.0).unwrap();
        graph.add_edge(1, 2, 4.0).unwrap();
        graph
    }

    #[test]
    fn test_lowest_pheromone_wins() {
        let mut graph = triangle();
        graph.set_pheromone(0, 1, 5.0);
        graph.set_pheromone(0, 2, 0.5);
        let mut ant = Ant::new(100.0, 0.0);
        ant.start_at(3, 0);
        assert_eq!(ant.step(&graph, &mut create_rng(1)), StepOutcome::Moved(2));
    }

    #[test]
    fn test_pheromone_tie_goes_to_lowest_index() {
        let graph = triangle();
        let mut ant = Ant::new(100.0, 0.0);
        ant.start_at(3, 0);
        assert_eq!(ant.step(&graph, &mut create_rng(1)), StepOutcome::Moved(1));
    }

    #[test]
    fn test_full_tour_closes_and_reinforces() {
        let mut graph = triangle();
        let mut rng = create_rng(2);
        let mut ant = Ant::new(90.0, 0.0);
        ant.start_at(3, 0);
        assert_eq!(ant.step(&graph, &mut rng), StepOutcome::Moved(1));
        assert_eq!(ant.step(&graph, &mut rng), StepOutcome::Moved(2));
        assert_eq!(ant.step(&graph, &mut rng), StepOutcome::Closed);
        assert_eq!(ant.step(&graph, &mut rng), StepOutcome::Finished);
        assert_eq!(ant.path(), &[0, 1, 2, 0]);
        assert!((ant.length() - 9.0).abs() < 1e-12);

        let outcome = ant.lay_pheromone(&mut graph).unwrap();
        assert_eq!(outcome, DepositOutcome::Reinforced { edges: 3 });
        for (u, v) in [(0, 1), (1, 2), (2, 0)] {
            assert!((graph.pheromone(u, v).unwrap() - 11.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_isolated_city_stalls() {
        let mut graph = Graph::new(3);
        graph.add_edge(1, 2, 1.0).unwrap();
        let mut ant = Ant::new(100.0, 0.1);
        ant.start_at(3, 0);
        let mut rng = create_rng(3);
        for _ in 0..3 {
            assert_eq!(ant.step(&graph, &mut rng), StepOutcome::Stalled);
        }
        assert_eq!(ant.path(), &[0]);
        assert_eq!(ant.length(), 0.0);
        assert!(ant.has_stalled());
        assert_eq!(ant.lay_pheromone(&mut graph).unwrap(), DepositOutcome::Stalled);
        assert_eq!(graph.pheromone(1, 2), Some(1.0));
    }

    #[test]
    fn test_dead_end_revisits() {
        // star centred on 0
        let mut graph = Graph::new(4);
        for leaf in 1..4 {
            graph.add_edge(0, leaf, 1.0).unwrap();
        }
        let mut rng = create_rng(4);
        let mut ant = Ant::new(100.0, 0.0);
        ant.start_at(4, 1);
        assert_eq!(ant.step(&graph, &mut rng), StepOutcome::Moved(0));
        assert_eq!(ant.step(&graph, &mut rng), StepOutcome::Moved(2));
        assert_eq!(ant.step(&graph, &mut rng), StepOutcome::Revisited(0));
        assert_eq!(ant.step(&graph, &mut rng), StepOutcome::Moved(3));
        assert!((ant.length() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_closing_edge_is_reported() {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 1.0).unwrap();
        let mut rng = create_rng(5);
        let mut ant = Ant::new(100.0, 0.0);
        ant.start_at(3, 0);
        for _ in 0..3 {
            ant.step(&graph, &mut rng);
        }
        assert!(ant.is_closed());
        assert_eq!(ant.path(), &[0, 1, 2, 0]);
        assert!((ant.length() - 2.0).abs() < 1e-12);
        assert_eq!(
            ant.lay_pheromone(&mut graph),
            Err(AcoError::MissingEdge { from: 2, to: 0 })
        );
        assert_eq!(graph.pheromone(0, 1), Some(1.0));
    }

    #[test]
    fn test_zero_length_tour_skipped() {
        let cities = vec![City::new(1.0, 1.0); 3];
        let mut graph = Graph::from_cities(&cities);
        let mut rng = create_rng(6);
        let mut ant = Ant::new(100.0, 0.1);
        ant.reset(3, &mut rng);
        for _ in 0..3 {
            ant.step(&graph, &mut rng);
        }
        assert!(ant.is_closed());
        assert_eq!(
            ant.lay_pheromone(&mut graph).unwrap(),
            DepositOutcome::SkippedZeroLength
        );
    }

    #[test]
    fn test_single_city_closes_in_place() {
        let graph = Graph::new(1);
        let mut ant = Ant::new(100.0, 0.1);
        ant.start_at(1, 0);
        assert_eq!(ant.step(&graph, &mut create_rng(7)), StepOutcome::Closed);
        assert_eq!(ant.path(), &[0, 0]);
        assert_eq!(ant.length(), 0.0);
    }

    #[test]
    fn test_incomplete_tour_not_reinforced() {
        let mut graph = triangle();
        let mut ant = Ant::new(100.0, 0.0);
        ant.start_at(3, 0);
        ant.step(&graph, &mut create_rng(8));
        assert_eq!(
            ant.lay_pheromone(&mut graph).unwrap(),
            DepositOutcome::Incomplete
        );
    }
}
