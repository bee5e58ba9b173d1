//! Segment tests against the forbidden volume around the galactic core.

use crate::coordinates::Coordinates;

/// Radius around the core that a travel segment may not pass through.
pub const DEFAULT_EXCLUSION_RADIUS: f64 = 7.0;

/// Tolerance for deciding that a point lies on a segment.
const ON_SEGMENT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy)]
struct Point {
    x: f64,
    y: f64,
    z: f64,
}

impl From<&Coordinates> for Point {
    fn from(c: &Coordinates) -> Self {
        Self {
            x: f64::from(c.x()),
            y: f64::from(c.y()),
            z: f64::from(c.z()),
        }
    }
}

impl Point {
    fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Foot of the perpendicular from `q` onto the infinite line through `p1`, `p2`.
///
/// Returns `None` when the two points coincide and no line exists.
fn perpendicular_foot(p1: &Point, p2: &Point, q: &Point) -> Option<Point> {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let dz = p2.z - p1.z;

    let length_sq = dx * dx + dy * dy + dz * dz;
    if length_sq == 0.0 {
        return None;
    }

    let alpha = (dx * (q.x - p1.x) + dy * (q.y - p1.y) + dz * (q.z - p1.z)) / length_sq;
    Some(Point {
        x: p1.x + alpha * dx,
        y: p1.y + alpha * dy,
        z: p1.z + alpha * dz,
    })
}

fn is_on_segment(p1: &Point, p2: &Point, q: &Point) -> bool {
    let segment = p1.distance_to(p2);
    (p1.distance_to(q) + p2.distance_to(q) - segment).abs() <= ON_SEGMENT_EPSILON
}

/// Whether the segment `p1`..`p2` comes within `radius` of `center`.
///
/// When the perpendicular foot from `center` falls on the segment the
/// perpendicular distance decides, otherwise the nearer endpoint does.
pub fn segment_intersects_sphere(
    p1: &Coordinates,
    p2: &Coordinates,
    center: &Coordinates,
    radius: f64,
) -> bool {
    let (a, b, q) = (Point::from(p1), Point::from(p2), Point::from(center));

    let closest = match perpendicular_foot(&a, &b, &q) {
        Some(foot) if is_on_segment(&a, &b, &foot) => foot.distance_to(&q),
        _ => a.distance_to(&q).min(b.distance_to(&q)),
    };

    closest <= radius
}
