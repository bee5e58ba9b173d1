//! Single-source shortest paths over a dense, index-addressed graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Error, Result};

/// Directed, weighted adjacency list keyed by node index.
#[derive(Debug, Clone, Default)]
pub struct ShortestPathSolver {
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl ShortestPathSolver {
    /// Create a solver for `node_count` nodes and no edges.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges currently stored.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Append a directed edge `from -> to`.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> Result<()> {
        self.check_edge(from, to, weight)?;
        self.adjacency[from].push((to, weight));
        Ok(())
    }

    /// Append `from -> to` and `to -> from` with the same weight.
    pub fn add_bidir_edge(&mut self, from: usize, to: usize, weight: f64) -> Result<()> {
        self.check_edge(from, to, weight)?;
        self.adjacency[from].push((to, weight));
        self.adjacency[to].push((from, weight));
        Ok(())
    }

    /// Replace every outgoing edge of `node`.
    ///
    /// The whole list is checked before anything is replaced.
    pub fn set_edges(&mut self, node: usize, edges: Vec<(usize, f64)>) -> Result<()> {
        self.check_node(node)?;
        for &(to, weight) in &edges {
            self.check_edge(node, to, weight)?;
        }
        self.adjacency[node] = edges;
        Ok(())
    }

    /// Run Dijkstra's algorithm from `start` across the whole graph.
    pub fn calculate_for(&self, start: usize) -> Result<ShortestPaths> {
        self.check_node(start)?;

        let mut distances = vec![f64::INFINITY; self.adjacency.len()];
        let mut previous: Vec<Option<usize>> = vec![None; self.adjacency.len()];
        let mut queue = BinaryHeap::new();

        distances[start] = 0.0;
        queue.push(QueueEntry::new(start, 0.0));

        while let Some(entry) = queue.pop() {
            let current_distance = distances[entry.node];
            if entry.cost.0 > current_distance {
                continue;
            }

            for &(next, weight) in &self.adjacency[entry.node] {
                let next_cost = current_distance + weight;
                if next_cost < distances[next] {
                    distances[next] = next_cost;
                    previous[next] = Some(entry.node);
                    queue.push(QueueEntry::new(next, next_cost));
                }
            }
        }

        Ok(ShortestPaths {
            start,
            distances,
            previous,
        })
    }

    fn check_node(&self, node: usize) -> Result<()> {
        if node >= self.adjacency.len() {
            return Err(Error::NodeOutOfRange {
                node,
                nodes: self.adjacency.len(),
            });
        }
        Ok(())
    }

    fn check_edge(&self, from: usize, to: usize, weight: f64) -> Result<()> {
        self.check_node(from)?;
        self.check_node(to)?;
        if weight.is_nan() || weight < 0.0 {
            return Err(Error::NegativeWeight { from, to, weight });
        }
        Ok(())
    }
}

/// Output of one solver pass: distances and predecessors from a start node.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    start: usize,
    distances: Vec<f64>,
    previous: Vec<Option<usize>>,
}

impl ShortestPaths {
    pub fn start(&self) -> usize {
        self.start
    }

    /// Node indices from the start to `node`, inclusive.
    ///
    /// Returns `None` when `node` is unreachable or out of range.
    pub fn path_to(&self, node: usize) -> Option<Vec<usize>> {
        if !self.is_reachable(node) {
            return None;
        }

        let mut path = vec![node];
        let mut current = node;
        while let Some(prev) = self.previous[current] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Total weight of the shortest path to `node`; infinite when unreachable.
    pub fn total_weight(&self, node: usize) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, node: usize) -> bool {
        self.total_weight(node).is_finite()
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: usize,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: usize, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUBLINER: usize = 0;
    const STARBUCKS: usize = 1;
    const INSOMNIA_COOKIES: usize = 2;
    const CAFE_GRUMPY: usize = 3;
    const DIG_INN: usize = 4;
    const FULL_STACK: usize = 5;

    fn cafe_graph() -> ShortestPathSolver {
        let mut solver = ShortestPathSolver::new(6);
        for (a, b, w) in [
            (DIG_INN, FULL_STACK, 7.0),
            (DIG_INN, CAFE_GRUMPY, 9.0),
            (DIG_INN, DUBLINER, 4.0),
            (FULL_STACK, DUBLINER, 2.0),
            (FULL_STACK, STARBUCKS, 6.0),
            (DUBLINER, INSOMNIA_COOKIES, 7.0),
            (DUBLINER, STARBUCKS, 3.0),
            (STARBUCKS, INSOMNIA_COOKIES, 6.0),
            (CAFE_GRUMPY, INSOMNIA_COOKIES, 5.0),
        ] {
            solver.add_bidir_edge(a, b, w).unwrap();
        }
        solver
    }

    #[test]
    fn finds_cheapest_path_through_the_cafe_graph() {
        let solver = cafe_graph();
        assert_eq!(solver.edge_count(), 18);

        let paths = solver.calculate_for(FULL_STACK).unwrap();
        assert_eq!(
            paths.path_to(CAFE_GRUMPY).unwrap(),
            vec![FULL_STACK, DUBLINER, INSOMNIA_COOKIES, CAFE_GRUMPY]
        );
        assert_eq!(paths.total_weight(CAFE_GRUMPY), 14.0);
        assert_eq!(paths.path_to(FULL_STACK).unwrap(), vec![FULL_STACK]);
        assert_eq!(paths.total_weight(FULL_STACK), 0.0);
    }

    #[test]
    fn unreachable_node_has_no_path() {
        let mut solver = ShortestPathSolver::new(3);
        solver.add_edge(0, 1, 1.0).unwrap();
        let paths = solver.calculate_for(0).unwrap();

        assert!(paths.path_to(2).is_none());
        assert!(paths.total_weight(2).is_infinite());
        assert!(paths.path_to(7).is_none());
    }

    #[test]
    fn directed_edges_are_one_way() {
        let mut solver = ShortestPathSolver::new(2);
        solver.add_edge(0, 1, 2.5).unwrap();
        assert!(solver.calculate_for(1).unwrap().path_to(0).is_none());
    }

    #[test]
    fn rejects_negative_weights() {
        let mut solver = ShortestPathSolver::new(2);
        let err = solver.add_edge(0, 1, -1.0).expect_err("negative weight");
        assert!(matches!(err, Error::NegativeWeight { from: 0, to: 1, .. }));
        assert!(solver.add_bidir_edge(0, 1, f64::NAN).is_err());
        assert!(solver.set_edges(0, vec![(1, 1.0), (0, -0.5)]).is_err());
        assert_eq!(solver.edge_count(), 0);
    }

    #[test]
    fn rejects_out_of_range_nodes() {
        let mut solver = ShortestPathSolver::new(2);
        assert!(matches!(
            solver.add_edge(0, 2, 1.0),
            Err(Error::NodeOutOfRange { node: 2, nodes: 2 })
        ));
        assert!(solver.calculate_for(5).is_err());
    }

    #[test]
    fn set_edges_replaces_outgoing_edges() {
        let mut solver = ShortestPathSolver::new(3);
        solver.add_edge(0, 1, 10.0).unwrap();
        solver.set_edges(0, vec![(2, 1.0), (1, 3.0)]).unwrap();
        let paths = solver.calculate_for(0).unwrap();
        assert_eq!(paths.total_weight(1), 3.0);
        assert_eq!(solver.edge_count(), 2);
    }
}
