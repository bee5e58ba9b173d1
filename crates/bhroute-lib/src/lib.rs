//! Black hole route planning library.
//!
//! This crate parses galactic coordinates, loads black hole hop data, builds
//! routing graphs that mix black hole rides with ordinary hyperdrive travel,
//! and runs shortest-path searches over them. Higher-level consumers (the
//! CLI) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod coordinates;
pub mod cost;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod hop;
pub mod output;
pub mod routing;
pub mod solver;
pub mod spatial;

pub use coordinates::{parse_coordinates, Coordinates, GALACTIC_CENTER, LY_PER_UNIT};
pub use cost::{build_cost_model, edge_weight, expected_jumps, CostModel, Optimization};
pub use dataset::{
    default_hops_path, hop_stats, resolve_hops_path, validate, HopCatalog, HopStats,
    ValidationIssue, ValidationReport,
};
pub use error::{Error, Result};
pub use geometry::segment_intersects_sphere;
pub use graph::{build_backward, build_forward, NodeRole, RouteGraph};
pub use hop::{is_valid_hop, Hop, Platform, System};
pub use output::{Leg, LegKind, RouteRenderMode, RouteSummary};
pub use routing::{find_route, find_route_with, find_routes, find_routes_with, Route, RouteStep};
pub use solver::{ShortestPathSolver, ShortestPaths};
pub use spatial::{SearchTuning, SpatialIndex};
