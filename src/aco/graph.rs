//! Undirected weighted graph carrying pheromone on each edge.

use crate::error::{Result, TspError};
use crate::geometry::City;
use rand::seq::index;
use rand::Rng;
use std::ops::Range;

/// Default range (exclusive end) for randomly weighted edges.
pub const DEFAULT_WEIGHTS: Range<u32> = 5..20;

/// An undirected edge. `from < to` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    /// Fixed traversal cost.
    pub weight: f64,
    /// Desirability signal, evolves every iteration.
    pub pheromone: f64,
}

/// Edge state annotated with membership in a given path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView {
    pub edge: Edge,
    pub on_path: bool,
}

/// Graph over `0..n` with a fixed edge set.
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    edges: Vec<Edge>,
    // n * n table of indices into `edges`, symmetric.
    lookup: Vec<Option<usize>>,
    // Sorted ascending.
    neighbors: Vec<Vec<usize>>,
}

impl Graph {
    /// Graph with `n` nodes and no edges.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            edges: Vec::new(),
            lookup: vec![None; n * n],
            neighbors: vec![Vec::new(); n],
        }
    }

    /// Adds an undirected edge with initial pheromone 1.
    ///
    /// Re-adding an existing edge overwrites its weight.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> Result<()> {
        if u >= self.n || v >= self.n {
            return Err(TspError::InvalidConfig(format!(
                "edge ({u}, {v}) out of range for {} nodes",
                self.n
            )));
        }
        if u == v {
            return Err(TspError::InvalidConfig(format!("self-loop on node {u}")));
        }
        self.insert(u, v, weight);
        Ok(())
    }

    // Callers guarantee `u != v` and both in range.
    fn insert(&mut self, u: usize, v: usize, weight: f64) {
        if let Some(idx) = self.lookup[u * self.n + v] {
            self.edges[idx].weight = weight;
            return;
        }
        let idx = self.edges.len();
        self.edges.push(Edge {
            from: u.min(v),
            to: u.max(v),
            weight,
            pheromone: 1.0,
        });
        self.lookup[u * self.n + v] = Some(idx);
        self.lookup[v * self.n + u] = Some(idx);
        for (a, b) in [(u, v), (v, u)] {
            let list = &mut self.neighbors[a];
            if let Err(pos) = list.binary_search(&b) {
                list.insert(pos, b);
            }
        }
    }

    /// Complete graph with uniform random integer weights.
    pub fn complete_random<R: Rng>(n: usize, weights: Range<u32>, rng: &mut R) -> Result<Self> {
        check_weights(&weights)?;
        let mut graph = Self::new(n);
        for u in 0..n {
            for v in u + 1..n {
                graph.insert(u, v, rng.random_range(weights.clone()) as f64);
            }
        }
        Ok(graph)
    }

    /// Complete graph whose weights are Euclidean city distances.
    pub fn from_cities(cities: &[City]) -> Self {
        let n = cities.len();
        let mut graph = Self::new(n);
        for u in 0..n {
            for v in u + 1..n {
                graph.insert(u, v, cities[u].distance(&cities[v]));
            }
        }
        graph
    }

    /// Random graph with exactly `m` distinct edges chosen uniformly among
    /// all node pairs. Isolated nodes may occur.
    pub fn random_sparse<R: Rng>(
        n: usize,
        m: usize,
        weights: Range<u32>,
        rng: &mut R,
    ) -> Result<Self> {
        check_weights(&weights)?;
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|u| (u + 1..n).map(move |v| (u, v)))
            .collect();
        if m > pairs.len() {
            return Err(TspError::InvalidConfig(format!(
                "{m} edges requested but {n} nodes allow at most {}",
                pairs.len()
            )));
        }
        let mut graph = Self::new(n);
        for k in index::sample(rng, pairs.len(), m) {
            let (u, v) = pairs[k];
            graph.insert(u, v, rng.random_range(weights.clone()) as f64);
        }
        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Neighbours of `u` in ascending order.
    pub fn neighbors(&self, u: usize) -> &[usize] {
        &self.neighbors[u]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn index(&self, u: usize, v: usize) -> Option<usize> {
        if u >= self.n || v >= self.n {
            return None;
        }
        self.lookup[u * self.n + v]
    }

    pub fn edge(&self, u: usize, v: usize) -> Option<&Edge> {
        self.index(u, v).map(|idx| &self.edges[idx])
    }

    pub fn contains_edge(&self, u: usize, v: usize) -> bool {
        self.index(u, v).is_some()
    }

    pub fn weight(&self, u: usize, v: usize) -> Option<f64> {
        self.edge(u, v).map(|e| e.weight)
    }

    pub fn pheromone(&self, u: usize, v: usize) -> Option<f64> {
        self.edge(u, v).map(|e| e.pheromone)
    }

    /// Overwrites the pheromone of an edge. Returns `false` if absent.
    pub fn set_pheromone(&mut self, u: usize, v: usize, value: f64) -> bool {
        match self.index(u, v) {
            Some(idx) => {
                self.edges[idx].pheromone = value;
                true
            }
            None => false,
        }
    }

    /// Adds `amount` to the pheromone of an edge. Returns `false` if absent.
    pub fn reinforce(&mut self, u: usize, v: usize, amount: f64) -> bool {
        match self.index(u, v) {
            Some(idx) => {
                self.edges[idx].pheromone += amount;
                true
            }
            None => false,
        }
    }

    /// Multiplies every pheromone value by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for edge in &mut self.edges {
            edge.pheromone *= keep;
        }
    }

    /// Sum of edge weights along `path`, or `None` if an edge is missing.
    pub fn path_weight(&self, path: &[usize]) -> Option<f64> {
        path.windows(2)
            .filter(|w| w[0] != w[1])
            .map(|w| self.weight(w[0], w[1]))
            .sum()
    }

    /// All edges, flagged when `path` traverses them.
    pub fn highlight(&self, path: &[usize]) -> Vec<EdgeView> {
        let mut on_path = vec![false; self.edges.len()];
        for w in path.windows(2) {
            if let Some(idx) = self.index(w[0], w[1]) {
                on_path[idx] = true;
            }
        }
        self.edges
            .iter()
            .zip(on_path)
            .map(|(&edge, on_path)| EdgeView { edge, on_path })
            .collect()
    }
}

fn check_weights(weights: &Range<u32>) -> Result<()> {
    if weights.is_empty() {
        return Err(TspError::InvalidConfig(format!(
            "empty weight range {}..{}",
            weights.start, weights.end
        )));
    }
    Ok(())
}
