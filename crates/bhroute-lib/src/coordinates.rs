//! Galactic coordinates and the distance/direction helpers built on them.
//!
//! A [`Coordinates`] value addresses a star: the `x`/`y`/`z` triple names the
//! region cell and `system` picks a star inside that cell. Physical distance
//! only ever looks at the region triple.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Light-years covered by one coordinate unit.
pub const LY_PER_UNIT: f64 = 400.0;

const MAX_X: u16 = 0xFFF;
const MAX_Y: u16 = 0xFF;
const MAX_Z: u16 = 0xFFF;
const MAX_SYSTEM: u16 = 0x2FF;

/// Position of the galactic core.
pub const GALACTIC_CENTER: Coordinates = Coordinates {
    x: 0x7FF,
    y: 0x7F,
    z: 0x7FF,
    system: 0,
};

/// Immutable, range-checked galactic address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    x: u16,
    y: u16,
    z: u16,
    system: u16,
}

impl Coordinates {
    /// Build coordinates, rejecting any field above its bound.
    pub fn new(x: u16, y: u16, z: u16, system: u16) -> Result<Self> {
        check_bound("x", x, MAX_X)?;
        check_bound("y", y, MAX_Y)?;
        check_bound("z", z, MAX_Z)?;
        check_bound("system", system, MAX_SYSTEM)?;
        Ok(Self { x, y, z, system })
    }

    /// Build coordinates from untyped numeric input.
    ///
    /// Values must be non-negative integers within each field's bound.
    pub fn try_from_f64(x: f64, y: f64, z: f64, system: f64) -> Result<Self> {
        Self::new(
            integral_field("x", x, MAX_X)?,
            integral_field("y", y, MAX_Y)?,
            integral_field("z", z, MAX_Z)?,
            integral_field("system", system, MAX_SYSTEM)?,
        )
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }

    pub fn z(&self) -> u16 {
        self.z
    }

    pub fn system(&self) -> u16 {
        self.system
    }

    /// Squared Euclidean distance over the region triple.
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        let dz = i64::from(self.z) - i64::from(other.z);
        (dx * dx + dy * dy + dz * dz) as f64
    }

    /// Euclidean distance over the region triple, in coordinate units.
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Distance to [`GALACTIC_CENTER`] in coordinate units.
    pub fn distance_to_center(&self) -> f64 {
        self.distance_to(&GALACTIC_CENTER)
    }

    /// Angle around the core in degrees, normalized to `[0, 360)`.
    pub fn radial(&self) -> f64 {
        let dz = f64::from(self.z) - f64::from(GALACTIC_CENTER.z);
        let dx = f64::from(self.x) - f64::from(GALACTIC_CENTER.x);
        let mut angle = (-dz).atan2(dx);
        if angle < 0.0 {
            angle += 2.0 * std::f64::consts::PI;
        }
        angle.to_degrees()
    }

    pub fn is_same_region(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }

    /// Same region and same star index.
    pub fn is_same_star(&self, other: &Self) -> bool {
        self.is_same_region(other) && self.system == other.system
    }

    /// Regions touching on every axis (Chebyshev distance of at most one).
    pub fn is_adjacent_region(&self, other: &Self) -> bool {
        self.x.abs_diff(other.x) <= 1
            && self.y.abs_diff(other.y) <= 1
            && self.z.abs_diff(other.z) <= 1
    }

    /// Render the twelve-glyph portal address for a planet of this system.
    pub fn portal_code(&self, planet: u8) -> Result<String> {
        if planet > 0x0F {
            return Err(Error::InvalidPlanet { planet });
        }

        let system = u32::from(self.system) & 0xFFF;
        let y = (u32::from(self.y) + 0x81) & 0xFF;
        let z = (u32::from(self.z) + 0x801) & 0xFFF;
        let x = (u32::from(self.x) + 0x801) & 0xFFF;

        Ok(format!("{planet:X}{system:03X}{y:02X}{z:03X}{x:03X}"))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04X}:{:04X}:{:04X}:{:04X}",
            self.x, self.y, self.z, self.system
        )
    }
}

impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_coordinates(s)
    }
}

impl Serialize for Coordinates {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse coordinate text.
///
/// Accepts, case-insensitively, three or four hex fields of one to four
/// digits separated by `:` or a single whitespace character, or the same
/// fields as 12 or 16 concatenated digits. A missing fourth field means
/// `system = 0`.
pub fn parse_coordinates(text: &str) -> Result<Coordinates> {
    let trimmed = text.trim();
    let fields = split_fields(trimmed).ok_or_else(|| Error::CoordinateSyntax {
        text: trimmed.to_string(),
    })?;

    let mut values = [0u16; 4];
    for (slot, field) in values.iter_mut().zip(&fields) {
        // split_fields only yields 1-4 hex digits, which always fit a u16.
        *slot = u16::from_str_radix(field, 16).map_err(|_| Error::CoordinateSyntax {
            text: trimmed.to_string(),
        })?;
    }

    let [x, y, z, system] = values;
    Coordinates::new(x, y, z, system)
}

fn split_fields(text: &str) -> Option<Vec<&str>> {
    if text.is_empty() || !text.is_ascii() {
        return None;
    }

    if text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return match text.len() {
            12 | 16 => Some((0..text.len()).step_by(4).map(|i| &text[i..i + 4]).collect()),
            _ => None,
        };
    }

    let fields: Vec<&str> = text
        .split(|c: char| c == ':' || c.is_ascii_whitespace())
        .collect();
    let well_formed = (3..=4).contains(&fields.len())
        && fields
            .iter()
            .all(|f| (1..=4).contains(&f.len()) && f.bytes().all(|b| b.is_ascii_hexdigit()));

    well_formed.then_some(fields)
}

fn check_bound(field: &'static str, value: u16, max: u16) -> Result<()> {
    if value > max {
        return Err(Error::CoordinateRange {
            field,
            value: format!("0x{value:X}"),
            max,
        });
    }
    Ok(())
}

fn integral_field(field: &'static str, value: f64, max: u16) -> Result<u16> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > f64::from(max) {
        return Err(Error::CoordinateRange {
            field,
            value: value.to_string(),
            max,
        });
    }
    Ok(value as u16)
}
