//! Route finding: build a graph, solve it once, then rebuild one route per
//! free endpoint.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::cost::CostModel;
use crate::error::{Error, Result};
use crate::graph::{build_backward, build_forward, Direction, NodeRole, RouteGraph};
use crate::hop::{Hop, System};
use crate::solver::ShortestPaths;
use crate::spatial::SearchTuning;

/// One stop along a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep {
    pub system: System,
    pub role: NodeRole,
}

/// Cheapest known path between one origin and one destination.
///
/// Steps run from origin to destination and are never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    score: u64,
    steps: Vec<RouteStep>,
}

impl Route {
    /// Total path weight rounded to the nearest integer.
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    pub fn start(&self) -> &RouteStep {
        &self.steps[0]
    }

    pub fn destination(&self) -> &RouteStep {
        &self.steps[self.steps.len() - 1]
    }

    /// Number of legs travelled.
    pub fn hop_count(&self) -> usize {
        self.steps.len() - 1
    }

    /// `[region] name` label of every step, in travel order.
    pub fn labels(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.system.label()).collect()
    }
}

/// Routes from `origin` to each of `destinations`, in input order.
pub fn find_routes(
    origin: &System,
    destinations: &[System],
    hops: &[Hop],
    max_jump_range: f64,
    model: &CostModel,
) -> Result<Vec<Route>> {
    find_routes_with(origin, destinations, hops, max_jump_range, model, &SearchTuning::default())
}

/// [`find_routes`] with explicit spatial search tuning.
pub fn find_routes_with(
    origin: &System,
    destinations: &[System],
    hops: &[Hop],
    max_jump_range: f64,
    model: &CostModel,
    tuning: &SearchTuning,
) -> Result<Vec<Route>> {
    check_jump_range(max_jump_range)?;
    let graph = build_forward(origin, destinations, hops, max_jump_range, model, tuning);
    solve(&graph)
}

/// Routes from each of `origins` to `destination`, in input order.
pub fn find_route(
    origins: &[System],
    destination: &System,
    hops: &[Hop],
    max_jump_range: f64,
    model: &CostModel,
) -> Result<Vec<Route>> {
    find_route_with(origins, destination, hops, max_jump_range, model, &SearchTuning::default())
}

/// [`find_route`] with explicit spatial search tuning.
pub fn find_route_with(
    origins: &[System],
    destination: &System,
    hops: &[Hop],
    max_jump_range: f64,
    model: &CostModel,
    tuning: &SearchTuning,
) -> Result<Vec<Route>> {
    check_jump_range(max_jump_range)?;
    let graph = build_backward(origins, destination, hops, max_jump_range, model, tuning);
    solve(&graph)
}

fn check_jump_range(max_jump_range: f64) -> Result<()> {
    if !max_jump_range.is_finite() || max_jump_range <= 0.0 {
        return Err(Error::InvalidJumpRange {
            range: max_jump_range,
        });
    }
    Ok(())
}

fn solve(graph: &RouteGraph<'_>) -> Result<Vec<Route>> {
    let paths = graph.solver()?.calculate_for(graph.root())?;

    let routes = graph
        .free_endpoints()
        .into_par_iter()
        .map(|endpoint| reconstruct(graph, &paths, endpoint))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        direction = ?graph.direction(),
        routes = routes.len(),
        "reconstructed routes"
    );
    Ok(routes)
}

fn reconstruct(graph: &RouteGraph<'_>, paths: &ShortestPaths, endpoint: usize) -> Result<Route> {
    let nodes = graph.nodes();
    let root = &nodes[graph.root()];
    let free = &nodes[endpoint];
    let (origin, destination) = match graph.direction() {
        Direction::Forward => (root, free),
        Direction::Backward => (free, root),
    };

    if origin.system.is_same_star(destination.system) {
        return Ok(Route {
            score: 0,
            steps: vec![RouteStep {
                system: origin.system.clone(),
                role: NodeRole::Origin,
            }],
        });
    }

    let path = graph.shortest_path(paths, endpoint).ok_or_else(|| Error::RouteNotFound {
        start: origin.system.label(),
        goal: destination.system.label(),
    })?;

    let mut steps: Vec<RouteStep> = path
        .into_iter()
        .map(|index| RouteStep {
            system: nodes[index].system.clone(),
            role: nodes[index].role,
        })
        .collect();
    if graph.direction() == Direction::Backward {
        steps.reverse();
    }

    Ok(Route {
        score: paths.total_weight(endpoint).round() as u64,
        steps,
    })
}
