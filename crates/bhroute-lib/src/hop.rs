//! Named systems and the one-way black hole hops that connect them.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::coordinates::{Coordinates, LY_PER_UNIT};
use crate::error::{Error, Result};

/// Radius of the inner galactic circle, in coordinate units.
const INNER_CIRCLE_RADIUS: f64 = 2047.0;

/// Longest inward jump, in light-years, that an inner-circle hop may make.
const MAX_INNER_RADIAL_LY: f64 = 16_000.0;

/// Game platform a hop was recorded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Ps4,
    Pc,
    Xbox,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Platform::Ps4 => "PS4",
            Platform::Pc => "PC",
            Platform::Xbox => "XBOX",
        };
        f.write_str(value)
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PS4" => Ok(Platform::Ps4),
            "PC" => Ok(Platform::Pc),
            "XBOX" => Ok(Platform::Xbox),
            other => Err(Error::HopDataValidation {
                message: format!("unknown platform '{other}'"),
            }),
        }
    }
}

/// A named star system.
///
/// Region and system names are descriptive only; two systems are the same
/// star when their coordinates match on every field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct System {
    pub region: String,
    pub name: String,
    pub coords: Coordinates,
}

impl System {
    pub fn new(region: impl Into<String>, name: impl Into<String>, coords: Coordinates) -> Self {
        Self {
            region: region.into(),
            name: name.into(),
            coords,
        }
    }

    /// Human readable `[region] name`, or just the name when no region is known.
    pub fn label(&self) -> String {
        if self.region.is_empty() {
            self.name.clone()
        } else {
            format!("[{}] {}", self.region, self.name)
        }
    }

    pub fn is_same_star(&self, other: &Self) -> bool {
        self.coords.is_same_star(&other.coords)
    }
}

/// A one-way hop from a black hole to its exit system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hop {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub galaxy: Option<String>,
    pub blackhole: System,
    pub exit: System,
}

impl Hop {
    pub fn new(blackhole: System, exit: System) -> Self {
        Self {
            platform: None,
            galaxy: None,
            blackhole,
            exit,
        }
    }

    /// Change in distance to the core, in coordinate units.
    pub fn radial_dist(&self) -> f64 {
        (self.blackhole.coords.distance_to_center() - self.exit.coords.distance_to_center()).abs()
    }

    /// Signed angular travel around the core, in degrees.
    ///
    /// Positive when the exit lies in the increasing-angle direction from the
    /// black hole, negative otherwise.
    pub fn axial_dist(&self) -> f64 {
        let entry = self.blackhole.coords.radial();
        let exit = self.exit.coords.radial();

        let mut delta = entry - exit;
        while delta < 0.0 {
            delta += 180.0;
        }
        while delta > 180.0 {
            delta -= 180.0;
        }

        let forward = if entry < 180.0 {
            exit > entry && exit < entry + 180.0
        } else {
            !(exit < entry && exit > entry - 180.0)
        };

        if forward {
            delta
        } else {
            -delta
        }
    }
}

/// Whether a hop is usable for routing.
///
/// A hop must move toward the core. Inside the inner circle it must also be
/// an ordinary jump rather than an anomalously long one.
pub fn is_valid_hop(hop: &Hop) -> bool {
    let entry = hop.blackhole.coords.distance_to_center();
    let moves_toward_center = entry > hop.exit.coords.distance_to_center();
    let inside_inner_circle = entry <= INNER_CIRCLE_RADIUS;
    let normal_distance = hop.radial_dist() * LY_PER_UNIT <= MAX_INNER_RADIAL_LY;

    moves_toward_center && (!inside_inner_circle || normal_distance)
}
