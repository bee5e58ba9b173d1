//! Coarse spatial index used to bound graph fan-out.
//!
//! Nodes are bucketed by their integer `x` coordinate. A nearest query scans
//! the buckets inside a square `x`/`z` window around the target, growing the
//! window until enough candidates survive or the attempt budget runs out.
//! This keeps each exit connected to a small constant number of black holes
//! instead of all of them.

use tracing::trace;

use crate::coordinates::{Coordinates, GALACTIC_CENTER};
use crate::geometry::{segment_intersects_sphere, DEFAULT_EXCLUSION_RADIUS};

/// Number of `x` buckets; one per possible `x` value.
const BUCKET_COUNT: usize = 0x1000;

/// Tunable constants for nearest-candidate queries and core avoidance.
///
/// The defaults are empirical; they are not derived from the galaxy model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchTuning {
    /// Half-width of the first search window, in coordinate units.
    pub initial_window: u32,
    /// Total number of window sizes tried (the window doubles each time).
    pub max_attempts: u32,
    /// Stop growing the window once this many candidates survive.
    pub min_candidates: usize,
    /// Upper bound on the candidates returned.
    pub max_candidates: usize,
    /// Radius around the galactic core that segments may not cross.
    pub exclusion_radius: f64,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            // 50,000 ly
            initial_window: 125,
            max_attempts: 3,
            min_candidates: 20,
            max_candidates: 150,
            exclusion_radius: DEFAULT_EXCLUSION_RADIUS,
        }
    }
}

/// Bucketed positions of graph nodes, keyed by `x`.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    buckets: Vec<Vec<(usize, Coordinates)>>,
    len: usize,
}

impl SpatialIndex {
    /// Build the index from `(node index, position)` pairs.
    pub fn build<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = (usize, Coordinates)>,
    {
        let mut buckets = vec![Vec::new(); BUCKET_COUNT];
        let mut len = 0;
        for (index, coords) in nodes {
            buckets[usize::from(coords.x())].push((index, coords));
            len += 1;
        }
        Self { buckets, len }
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Node indices closest to `target`, nearest first.
    ///
    /// Candidates whose straight segment to `target` passes through the
    /// exclusion sphere are skipped. Ties on distance keep node index order.
    pub fn nearest(&self, target: &Coordinates, tuning: &SearchTuning) -> Vec<usize> {
        if self.is_empty() || tuning.max_candidates == 0 {
            return Vec::new();
        }

        let mut range = i64::from(tuning.initial_window);
        let mut attempts = 0;
        let mut survivors: Vec<(f64, usize)>;

        loop {
            survivors = self.candidates_within(target, range, tuning.exclusion_radius);
            attempts += 1;
            if attempts >= tuning.max_attempts || survivors.len() >= tuning.min_candidates {
                break;
            }
            range *= 2;
        }

        trace!(
            target = %target,
            window = range,
            attempts,
            survivors = survivors.len(),
            "nearest candidate scan"
        );

        survivors.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        survivors.truncate(tuning.max_candidates);
        survivors.into_iter().map(|(_, index)| index).collect()
    }

    fn candidates_within(
        &self,
        target: &Coordinates,
        range: i64,
        exclusion_radius: f64,
    ) -> Vec<(f64, usize)> {
        let x = i64::from(target.x());
        let low = (x - range).max(0) as usize;
        let high = (x + range).min(BUCKET_COUNT as i64 - 1) as usize;

        self.buckets[low..=high]
            .iter()
            .flatten()
            .filter(|(_, coords)| target.z().abs_diff(coords.z()) as i64 <= range)
            .filter(|(_, coords)| {
                !segment_intersects_sphere(coords, target, &GALACTIC_CENTER, exclusion_radius)
            })
            .map(|(index, coords)| (target.distance_squared(coords), *index))
            .collect()
    }
}
