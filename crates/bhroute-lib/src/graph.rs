//! Routing graphs over one query's endpoints and the known black holes.
//!
//! Forward graphs are rooted at the origin and follow travel direction.
//! Backward graphs are rooted at the destination and hold the same legs
//! reversed.

use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use crate::coordinates::GALACTIC_CENTER;
use crate::cost::{edge_weight, CostModel};
use crate::error::Result;
use crate::geometry::segment_intersects_sphere;
use crate::hop::{Hop, System};
use crate::solver::{ShortestPathSolver, ShortestPaths};
use crate::spatial::{SearchTuning, SpatialIndex};

/// Weight substituted for zero-weight edges so every hop has a cost.
pub const MIN_EDGE_WEIGHT: f64 = 1e-9;

/// Path weights closer than this are equally short.
const TIE_TOLERANCE: f64 = 1e-10;

/// Part a graph node plays in a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Origin,
    Destination,
    BlackHole,
    Exit,
}

/// Which endpoint the graph is rooted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Rooted at a single origin; edges follow the direction of travel.
    Forward,
    /// Rooted at a single destination; edges point against travel.
    Backward,
}

/// Directed edge to another node of the same graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub node: usize,
    pub weight: f64,
}

/// Node of a route graph, borrowing the system it stands for.
#[derive(Debug, Clone)]
pub struct GraphNode<'a> {
    pub system: &'a System,
    pub role: NodeRole,
    pub index: usize,
    /// Position of the endpoint or hop in the caller's input.
    pub position: usize,
    pub edges: Vec<Edge>,
}

impl GraphNode<'_> {
    /// Ordering used to pick between equally short paths.
    ///
    /// Built from the role and input position only, so a node and its mirror
    /// in the opposite-direction graph share a key.
    pub fn tie_key(&self) -> (NodeRole, usize) {
        (self.role, self.position)
    }
}

/// Graph built for one routing query.
///
/// Node `0` is the fixed endpoint the solver is rooted at. The free
/// endpoints follow it, then one black hole and one exit node per hop.
#[derive(Debug, Clone)]
pub struct RouteGraph<'a> {
    direction: Direction,
    nodes: Vec<GraphNode<'a>>,
    incoming: Vec<Vec<Edge>>,
    free_endpoints: Range<usize>,
}

impl<'a> RouteGraph<'a> {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn nodes(&self) -> &[GraphNode<'a>] {
        &self.nodes
    }

    /// Index of the node the solver starts from.
    pub fn root(&self) -> usize {
        0
    }

    /// Indices of the endpoints a route is requested for.
    pub fn free_endpoints(&self) -> Range<usize> {
        self.free_endpoints.clone()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    /// Copy the adjacency into a fresh solver.
    pub fn solver(&self) -> Result<ShortestPathSolver> {
        let mut solver = ShortestPathSolver::new(self.nodes.len());
        for node in &self.nodes {
            let edges = node.edges.iter().map(|edge| (edge.node, edge.weight)).collect();
            solver.set_edges(node.index, edges)?;
        }
        Ok(solver)
    }

    /// Shortest path from the root to `endpoint`, as node indices in graph order.
    ///
    /// Among equally short paths, the one whose nodes have the smallest
    /// [`GraphNode::tie_key`]s when read from the destination back to the
    /// origin wins. Forward and backward graphs over the same endpoints
    /// therefore return the same route. `None` when `endpoint` is unreachable.
    pub fn shortest_path(&self, paths: &ShortestPaths, endpoint: usize) -> Option<Vec<usize>> {
        if endpoint >= self.nodes.len() || !paths.is_reachable(endpoint) {
            return None;
        }
        match self.direction {
            Direction::Forward => self.walk_from_endpoint(paths, endpoint),
            Direction::Backward => self.walk_from_root(paths, endpoint),
        }
    }

    fn is_tight(&self, paths: &ShortestPaths, from: usize, to: usize, weight: f64) -> bool {
        let start = paths.total_weight(from);
        start.is_finite() && (start + weight - paths.total_weight(to)).abs() <= TIE_TOLERANCE
    }

    /// Nodes whose edge into `node` lies on a shortest path to it.
    fn tight_predecessors(&self, paths: &ShortestPaths, node: usize) -> Vec<usize> {
        self.incoming[node]
            .iter()
            .filter(|edge| self.is_tight(paths, edge.node, node, edge.weight))
            .map(|edge| edge.node)
            .collect()
    }

    fn smallest_key(&self, candidates: impl Iterator<Item = usize>) -> Option<usize> {
        candidates.min_by_key(|&node| self.nodes[node].tie_key())
    }

    // Forward graphs end at the destination, so walk back from it.
    fn walk_from_endpoint(&self, paths: &ShortestPaths, endpoint: usize) -> Option<Vec<usize>> {
        let root = self.root();
        let mut path = vec![endpoint];
        let mut current = endpoint;
        while current != root {
            current = self.smallest_key(self.tight_predecessors(paths, current).into_iter())?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    // Backward graphs start at the destination. Only step onto nodes that
    // still lie on a shortest path to the origin.
    fn walk_from_root(&self, paths: &ShortestPaths, endpoint: usize) -> Option<Vec<usize>> {
        let mut on_path = vec![false; self.nodes.len()];
        on_path[endpoint] = true;
        let mut pending = vec![endpoint];
        while let Some(node) = pending.pop() {
            for prev in self.tight_predecessors(paths, node) {
                if !on_path[prev] {
                    on_path[prev] = true;
                    pending.push(prev);
                }
            }
        }

        let mut current = self.root();
        let mut path = vec![current];
        while current != endpoint {
            let from = current;
            current = self.smallest_key(
                self.nodes[from]
                    .edges
                    .iter()
                    .filter(|edge| {
                        on_path[edge.node] && self.is_tight(paths, from, edge.node, edge.weight)
                    })
                    .map(|edge| edge.node),
            )?;
            path.push(current);
        }
        Some(path)
    }
}

/// Build the graph for a single origin and many destinations.
pub fn build_forward<'a>(
    origin: &'a System,
    destinations: &'a [System],
    hops: &'a [Hop],
    max_jump_range: f64,
    model: &CostModel,
    tuning: &SearchTuning,
) -> RouteGraph<'a> {
    let mut layout = Layout::new(Direction::Forward);
    let origin = layout.push(origin, NodeRole::Origin, 0);
    let destinations: Vec<usize> = destinations
        .iter()
        .enumerate()
        .map(|(position, system)| layout.push(system, NodeRole::Destination, position))
        .collect();
    let free_endpoints = 1..1 + destinations.len();
    let hops: Vec<HopNodes> = hops
        .iter()
        .enumerate()
        .map(|(position, hop)| {
            let exit = layout.push(&hop.exit, NodeRole::Exit, position);
            let blackhole = layout.push(&hop.blackhole, NodeRole::BlackHole, position);
            HopNodes { blackhole, exit }
        })
        .collect();

    layout.assemble(&[origin], &destinations, &hops, max_jump_range, model, tuning, free_endpoints)
}

/// Build the graph for many origins and a single destination.
///
/// The result is the transpose of the forward graph over the same systems,
/// so both directions find the same routes.
pub fn build_backward<'a>(
    origins: &'a [System],
    destination: &'a System,
    hops: &'a [Hop],
    max_jump_range: f64,
    model: &CostModel,
    tuning: &SearchTuning,
) -> RouteGraph<'a> {
    let mut layout = Layout::new(Direction::Backward);
    let destination = layout.push(destination, NodeRole::Destination, 0);
    let origins: Vec<usize> = origins
        .iter()
        .enumerate()
        .map(|(position, system)| layout.push(system, NodeRole::Origin, position))
        .collect();
    let free_endpoints = 1..1 + origins.len();
    let hops: Vec<HopNodes> = hops
        .iter()
        .enumerate()
        .map(|(position, hop)| {
            let blackhole = layout.push(&hop.blackhole, NodeRole::BlackHole, position);
            let exit = layout.push(&hop.exit, NodeRole::Exit, position);
            HopNodes { blackhole, exit }
        })
        .collect();

    layout.assemble(&origins, &[destination], &hops, max_jump_range, model, tuning, free_endpoints)
}

/// Raise every zero-weight edge to [`MIN_EDGE_WEIGHT`].
pub fn give_nodes_minimum_weight(nodes: &mut [GraphNode<'_>]) {
    for edge in nodes.iter_mut().flat_map(|node| node.edges.iter_mut()) {
        if edge.weight == 0.0 {
            edge.weight = MIN_EDGE_WEIGHT;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct HopNodes {
    blackhole: usize,
    exit: usize,
}

struct Layout<'a> {
    direction: Direction,
    nodes: Vec<GraphNode<'a>>,
}

impl<'a> Layout<'a> {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            nodes: Vec::new(),
        }
    }

    fn push(&mut self, system: &'a System, role: NodeRole, position: usize) -> usize {
        let index = self.nodes.len();
        self.nodes.push(GraphNode {
            system,
            role,
            index,
            position,
            edges: Vec::new(),
        });
        index
    }

    /// Record the travel leg `from -> to`, reversed for backward graphs.
    fn connect(&mut self, from: usize, to: usize, weight: f64) {
        match self.direction {
            Direction::Forward => self.nodes[from].edges.push(Edge { node: to, weight }),
            Direction::Backward => self.nodes[to].edges.push(Edge { node: from, weight }),
        }
    }

    fn weight(&self, model: &CostModel, max_jump_range: f64, from: usize, to: usize) -> f64 {
        edge_weight(
            model,
            max_jump_range,
            &self.nodes[from].system.coords,
            &self.nodes[to].system.coords,
        )
    }

    fn crosses_core(&self, tuning: &SearchTuning, from: usize, to: usize) -> bool {
        segment_intersects_sphere(
            &self.nodes[from].system.coords,
            &self.nodes[to].system.coords,
            &GALACTIC_CENTER,
            tuning.exclusion_radius,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        mut self,
        origins: &[usize],
        destinations: &[usize],
        hops: &[HopNodes],
        max_jump_range: f64,
        model: &CostModel,
        tuning: &SearchTuning,
        free_endpoints: Range<usize>,
    ) -> RouteGraph<'a> {
        for &origin in origins {
            for hop in hops {
                let weight = self.weight(model, max_jump_range, origin, hop.blackhole);
                self.connect(origin, hop.blackhole, weight);
            }
        }

        for hop in hops {
            self.connect(hop.blackhole, hop.exit, model.black_hole_weight);
        }

        let index = SpatialIndex::build(
            hops.iter()
                .map(|hop| (hop.blackhole, self.nodes[hop.blackhole].system.coords)),
        );
        for hop in hops {
            let exit_coords = self.nodes[hop.exit].system.coords;
            for blackhole in index.nearest(&exit_coords, tuning) {
                let weight = self.weight(model, max_jump_range, hop.exit, blackhole);
                self.connect(hop.exit, blackhole, weight);
            }

            for &destination in destinations {
                if self.crosses_core(tuning, hop.exit, destination) {
                    continue;
                }
                let weight = self.weight(model, max_jump_range, hop.exit, destination);
                self.connect(hop.exit, destination, weight);
            }
        }

        for &origin in origins {
            for &destination in destinations {
                let weight = self.weight(model, max_jump_range, origin, destination);
                self.connect(origin, destination, weight);
            }
        }

        give_nodes_minimum_weight(&mut self.nodes);

        let mut incoming = vec![Vec::new(); self.nodes.len()];
        for node in &self.nodes {
            for edge in &node.edges {
                incoming[edge.node].push(Edge {
                    node: node.index,
                    weight: edge.weight,
                });
            }
        }

        let graph = RouteGraph {
            direction: self.direction,
            nodes: self.nodes,
            incoming,
            free_endpoints,
        };
        debug!(
            direction = ?graph.direction,
            nodes = graph.nodes.len(),
            edges = graph.edge_count(),
            "built route graph"
        );
        graph
    }
}
