//! Cost models used to weight graph edges.
//!
//! A [`CostModel`] is plain data: four weights consumed by [`edge_weight`].
//! The two built-in profiles are selected through [`Optimization`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::coordinates::{Coordinates, LY_PER_UNIT};
use crate::error::{Error, Result};

/// Tie-breaker added to same-region edges.
const SAME_REGION_EPSILON: f64 = 1e-7;
/// Tie-breaker added to adjacent-region edges.
const ADJACENT_REGION_EPSILON: f64 = 1e-5;
/// Tie-breaker added to waypoint edges.
const WAYPOINT_EPSILON: f64 = 1e-3;

/// Built-in optimization objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Optimization {
    /// Fewest jumps burning fuel; black holes are free.
    Fuel,
    /// Fewest elapsed legs.
    #[default]
    Time,
}

impl Optimization {
    pub fn cost_model(self) -> CostModel {
        match self {
            Optimization::Fuel => CostModel {
                black_hole_weight: 0.0,
                same_region_weight: 1.0,
                adjacent_region_weight: 1.0,
                waypoint_weight: 0.0,
            },
            Optimization::Time => CostModel {
                black_hole_weight: 1.0,
                same_region_weight: 1.0,
                adjacent_region_weight: 2.0,
                waypoint_weight: 4.0,
            },
        }
    }
}

impl fmt::Display for Optimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Optimization::Fuel => "fuel",
            Optimization::Time => "time",
        };
        f.write_str(value)
    }
}

impl FromStr for Optimization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fuel" => Ok(Optimization::Fuel),
            "time" => Ok(Optimization::Time),
            other => Err(Error::UnknownProfile {
                name: other.to_string(),
            }),
        }
    }
}

/// Weights applied to each kind of travel leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostModel {
    /// Cost of riding a black hole from entry to exit.
    pub black_hole_weight: f64,
    /// Cost of moving between stars of one region.
    pub same_region_weight: f64,
    /// Minimum cost of moving into a neighbouring region.
    pub adjacent_region_weight: f64,
    /// Fixed overhead of flying to a distant waypoint.
    pub waypoint_weight: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Optimization::default().cost_model()
    }
}

/// Look up a built-in cost model by profile name (`"fuel"` or `"time"`).
pub fn build_cost_model(profile: &str) -> Result<CostModel> {
    profile.parse::<Optimization>().map(Optimization::cost_model)
}

/// Number of hyperdrive jumps needed to get from `a` to `b`, rounded up.
///
/// Only the same star yields zero; any other pair needs at least one jump.
pub fn expected_jumps(max_jump_range: f64, a: &Coordinates, b: &Coordinates) -> u64 {
    let jumps = (a.distance_to(b) * LY_PER_UNIT / max_jump_range).ceil();

    if jumps <= 0.0 {
        if a.is_same_star(b) {
            0
        } else {
            1
        }
    } else {
        jumps as u64
    }
}

/// Weight of travelling directly from `a` to `b` under `model`.
pub fn edge_weight(model: &CostModel, max_jump_range: f64, a: &Coordinates, b: &Coordinates) -> f64 {
    if a.is_same_star(b) {
        0.0
    } else if a.is_same_region(b) {
        model.same_region_weight + SAME_REGION_EPSILON
    } else if a.is_adjacent_region(b) {
        let jumps = expected_jumps(max_jump_range, a, b) as f64;
        model.adjacent_region_weight.max(jumps) + ADJACENT_REGION_EPSILON
    } else {
        model.waypoint_weight + expected_jumps(max_jump_range, a, b) as f64 + WAYPOINT_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::parse_coordinates;

    fn c(text: &str) -> Coordinates {
        parse_coordinates(text).unwrap()
    }

    #[test]
    fn builds_known_profiles() {
        let fuel = build_cost_model("fuel").unwrap();
        assert_eq!(fuel.black_hole_weight, 0.0);
        assert_eq!(fuel.waypoint_weight, 0.0);

        let time = build_cost_model("time").unwrap();
        assert_eq!(time.adjacent_region_weight, 2.0);
        assert_eq!(time.waypoint_weight, 4.0);
    }

    #[test]
    fn unknown_profile_is_a_config_error() {
        let err = build_cost_model("scenic").expect_err("unknown profile");
        assert!(matches!(err, Error::UnknownProfile { ref name } if name == "scenic"));
    }

    #[test]
    fn expected_jumps_rounds_up() {
        // 10 units is 4,000 ly: exactly two 2,000 ly jumps.
        assert_eq!(expected_jumps(2000.0, &c("0100:007F:0100:0001"), &c("010A:007F:0100:0001")), 2);
        // 11 units is 4,400 ly: three jumps.
        assert_eq!(expected_jumps(2000.0, &c("0100:007F:0100:0001"), &c("010B:007F:0100:0001")), 3);
    }

    #[test]
    fn expected_jumps_is_zero_only_for_the_same_star() {
        let a = c("0100:007F:0100:0001");
        assert_eq!(expected_jumps(2000.0, &a, &a), 0);
        assert_eq!(expected_jumps(2000.0, &a, &c("0100:007F:0100:0002")), 1);
    }

    #[test]
    fn edge_weight_tiers() {
        let model = Optimization::Time.cost_model();
        let a = c("0100:007F:0100:0001");

        assert_eq!(edge_weight(&model, 2000.0, &a, &a), 0.0);
        assert_eq!(
            edge_weight(&model, 2000.0, &a, &c("0100:007F:0100:0002")),
            1.0 + SAME_REGION_EPSILON
        );
        assert_eq!(
            edge_weight(&model, 2000.0, &a, &c("0101:007F:0100:0002")),
            2.0 + ADJACENT_REGION_EPSILON
        );
        // 20 units away: four jumps plus the waypoint overhead.
        assert_eq!(
            edge_weight(&model, 2000.0, &a, &c("0114:007F:0100:0002")),
            4.0 + 4.0 + WAYPOINT_EPSILON
        );
    }

    #[test]
    fn adjacent_edge_never_drops_below_jump_estimate() {
        let model = Optimization::Fuel.cost_model();
        let a = c("0100:007F:0100:0001");
        let b = c("0101:0080:0101:0002");
        // sqrt(3) units is ~693 ly; a 100 ly range needs seven jumps.
        assert_eq!(edge_weight(&model, 100.0, &a, &b), 7.0 + ADJACENT_REGION_EPSILON);
    }
}
