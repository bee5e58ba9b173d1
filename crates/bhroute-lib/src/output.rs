//! Human-readable and JSON summaries of computed routes.

use std::fmt::Write;

use serde::Serialize;

use crate::coordinates::LY_PER_UNIT;
use crate::cost::{expected_jumps, Optimization};
use crate::error::Result;
use crate::graph::NodeRole;
use crate::routing::{Route, RouteStep};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// One explanation line per leg.
    PlainText,
    /// Bare system labels with a one-character prefix.
    Basic,
}

/// How a leg of a route is travelled.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LegKind {
    BlackHole,
    SameStar,
    SameRegion,
    AdjacentRegion,
    Waypoint,
}

/// Travel between two consecutive route steps.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Leg {
    pub from: String,
    pub to: String,
    pub kind: LegKind,
    pub distance_ly: f64,
    /// Hyperdrive jumps needed; zero when riding a black hole.
    pub jumps: u64,
}

impl Leg {
    fn between(a: &RouteStep, b: &RouteStep, max_jump_range: f64) -> Self {
        let (from, to) = (&a.system.coords, &b.system.coords);
        let riding = a.role == NodeRole::BlackHole && b.role == NodeRole::Exit;
        let kind = if riding {
            LegKind::BlackHole
        } else if from.is_same_star(to) {
            LegKind::SameStar
        } else if from.is_same_region(to) {
            LegKind::SameRegion
        } else if from.is_adjacent_region(to) {
            LegKind::AdjacentRegion
        } else {
            LegKind::Waypoint
        };

        Self {
            from: a.system.label(),
            to: b.system.label(),
            kind,
            distance_ly: from.distance_to(to) * LY_PER_UNIT,
            jumps: if riding {
                0
            } else {
                expected_jumps(max_jump_range, from, to)
            },
        }
    }
}

/// Structured representation of a route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub optimization: Optimization,
    pub score: u64,
    pub start: String,
    pub destination: String,
    pub steps: Vec<RouteStep>,
    pub legs: Vec<Leg>,
    pub black_holes: usize,
}

impl RouteSummary {
    /// Explain a [`Route`] leg by leg.
    pub fn from_route(route: &Route, optimization: Optimization, max_jump_range: f64) -> Self {
        let legs: Vec<Leg> = route
            .steps()
            .windows(2)
            .map(|pair| Leg::between(&pair[0], &pair[1], max_jump_range))
            .collect();
        let black_holes = legs
            .iter()
            .filter(|leg| leg.kind == LegKind::BlackHole)
            .count();

        Self {
            optimization,
            score: route.score(),
            start: route.start().system.label(),
            destination: route.destination().system.label(),
            steps: route.steps().to_vec(),
            legs,
            black_holes,
        }
    }

    /// Total hyperdrive jumps across every leg.
    pub fn total_jumps(&self) -> u64 {
        self.legs.iter().map(|leg| leg.jumps).sum()
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Basic => self.render_basic(),
        }
    }

    /// Pretty-printed JSON form of the summary.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} (score {}, optimize: {})",
            self.start, self.destination, self.score, self.optimization
        );

        if self.legs.is_empty() {
            let _ = writeln!(buffer, "Already there.");
            return buffer;
        }

        if self.black_holes == 0 {
            let _ = writeln!(
                buffer,
                "The direct route is the best route. {} jumps",
                self.total_jumps()
            );
            return buffer;
        }

        for leg in &self.legs {
            match leg.kind {
                LegKind::BlackHole => {
                    let _ = writeln!(buffer, "black hole from {} to {}", leg.from, leg.to);
                }
                _ => {
                    let _ = writeln!(
                        buffer,
                        "jump {:.0} LY ({} jumps) from {} to {}",
                        leg.distance_ly, leg.jumps, leg.from, leg.to
                    );
                }
            }
        }
        buffer
    }

    fn render_basic(&self) -> String {
        let mut buffer = String::new();
        let last = self.steps.len().saturating_sub(1);
        for (index, step) in self.steps.iter().enumerate() {
            let prefix = if index == 0 {
                '+'
            } else if index == last {
                '-'
            } else {
                '|'
            };
            let _ = writeln!(buffer, "{prefix} {}", step.system.label());
        }
        buffer
    }
}
