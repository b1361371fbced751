//! Advisory starting values for `eps` and `min_pts`.
//!
//! Both statistics are exhaustive O(n²) scans and use the upper median
//! (`sorted[len / 2]`). They are suggestions only; clustering correctness
//! does not depend on them.

use crate::{
    builder::DEFAULT_MIN_PTS,
    error::Result,
    neighbourhood::Eps,
    point::{Point, PointSet},
};

/// Multiplier applied to the nearest-neighbour median by [`suggest_eps`].
pub const EPS_NEIGHBOUR_FACTOR: f64 = 3.0;

/// Median of the distances between all ordered pairs of distinct points.
///
/// Returns `None` for sets with fewer than two points.
///
/// # Examples
/// ```
/// use dbmerge_core::{PointSet, median_pairwise_distance};
///
/// let set = PointSet::from_coordinates([(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)])?;
/// assert_eq!(median_pairwise_distance(&set), Some(4.0));
/// # Ok::<(), dbmerge_core::DbmergeError>(())
/// ```
#[must_use]
pub fn median_pairwise_distance(points: &PointSet) -> Option<f64> {
    let all = points.points();
    let distances = all
        .iter()
        .enumerate()
        .flat_map(|(i, left)| {
            all.iter()
                .enumerate()
                .filter(move |(j, _)| *j != i)
                .map(move |(_, right)| left.distance(right))
        })
        .collect();
    upper_median(distances)
}

/// Median over all points of the distance to their nearest other point.
///
/// Returns `None` for sets with fewer than two points.
///
/// # Examples
/// ```
/// use dbmerge_core::{PointSet, median_nearest_neighbour_distance};
///
/// let set = PointSet::from_coordinates([(0.0, 0.0), (1.0, 0.0), (10.0, 0.0)])?;
/// assert_eq!(median_nearest_neighbour_distance(&set), Some(1.0));
/// # Ok::<(), dbmerge_core::DbmergeError>(())
/// ```
#[must_use]
pub fn median_nearest_neighbour_distance(points: &PointSet) -> Option<f64> {
    let all = points.points();
    let nearest = all
        .iter()
        .enumerate()
        .filter_map(|(i, point)| nearest_distance(all, i, point))
        .collect();
    upper_median(nearest)
}

fn nearest_distance(all: &[Point], index: usize, point: &Point) -> Option<f64> {
    all.iter()
        .enumerate()
        .filter(|(other, _)| *other != index)
        .map(|(_, other)| point.distance(other))
        .min_by(f64::total_cmp)
}

fn upper_median(mut values: Vec<f64>) -> Option<f64> {
    values.sort_by(f64::total_cmp);
    values.get(values.len() / 2).copied()
}

/// Suggests a radius: the nearest-neighbour median scaled by
/// [`EPS_NEIGHBOUR_FACTOR`].
///
/// Returns `Ok(None)` for sets with fewer than two points.
///
/// # Errors
/// Returns [`crate::DbmergeError::InvalidEps`] when the scaled median overflows to
/// infinity, which happens for points spread across most of the `f64` range.
///
/// # Examples
/// ```
/// use dbmerge_core::{PointSet, suggest_eps};
///
/// let set = PointSet::from_coordinates([(0.0, 0.0), (1.0, 0.0), (10.0, 0.0)])?;
/// assert_eq!(suggest_eps(&set)?.map(|eps| eps.get()), Some(3.0));
/// # Ok::<(), dbmerge_core::DbmergeError>(())
/// ```
pub fn suggest_eps(points: &PointSet) -> Result<Option<Eps>> {
    median_nearest_neighbour_distance(points)
        .map(|median| Eps::new(median * EPS_NEIGHBOUR_FACTOR))
        .transpose()
}

/// Both heuristic statistics and the parameters derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterHints {
    /// See [`median_pairwise_distance`].
    pub median_pairwise: f64,
    /// See [`median_nearest_neighbour_distance`].
    pub median_nearest_neighbour: f64,
    /// Suggested radius.
    pub eps: Eps,
    /// Suggested density threshold.
    pub min_pts: usize,
}

impl ParameterHints {
    /// Computes the hints for `points`, or `Ok(None)` for sets with fewer
    /// than two points.
    ///
    /// # Errors
    /// Propagates [`crate::DbmergeError::InvalidEps`] from [`suggest_eps`].
    pub fn compute(points: &PointSet) -> Result<Option<Self>> {
        let Some(eps) = suggest_eps(points)? else {
            return Ok(None);
        };
        let (Some(median_pairwise), Some(median_nearest_neighbour)) = (
            median_pairwise_distance(points),
            median_nearest_neighbour_distance(points),
        ) else {
            return Ok(None);
        };
        Ok(Some(Self {
            median_pairwise,
            median_nearest_neighbour,
            eps,
            min_pts: DEFAULT_MIN_PTS,
        }))
    }
}
