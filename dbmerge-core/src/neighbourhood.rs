//! Region queries over a [`PointSet`].
//!
//! The neighbourhood primitive is a plain linear scan: every query compares
//! the centre against every point once, so a full clustering run performs
//! O(n²) distance computations. No spatial index is maintained and nothing is
//! cached between calls.

use std::fmt;

use crate::{
    error::{DbmergeError, Result},
    point::{Point, PointSet},
};

/// Validated neighbourhood radius.
///
/// # Examples
/// ```
/// use dbmerge_core::Eps;
///
/// let eps = Eps::new(2.5)?;
/// assert_eq!(eps.get(), 2.5);
/// assert!(Eps::new(-1.0).is_err());
/// assert!(Eps::new(f64::NAN).is_err());
/// # Ok::<(), dbmerge_core::DbmergeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Eps(f64);

impl Eps {
    /// Validates a radius.
    ///
    /// # Errors
    /// Returns [`DbmergeError::InvalidEps`] when `value` is negative, NaN or
    /// infinite.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(DbmergeError::InvalidEps { got: value })
        }
    }

    /// Returns the radius.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Eps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Returns the indices of every point within `eps` of `center`, in set order.
///
/// The comparison is inclusive, so a point is always its own neighbour when
/// it belongs to `points`. Indices refer to positions in the set, not to
/// point identifiers.
///
/// # Examples
/// ```
/// use dbmerge_core::{Eps, PointSet, region_query};
///
/// let set = PointSet::from_coordinates([(0.0, 0.0), (1.0, 0.0), (5.0, 5.0)])?;
/// let center = set.points()[0];
/// assert_eq!(region_query(&set, &center, Eps::new(1.0)?), vec![0, 1]);
/// # Ok::<(), dbmerge_core::DbmergeError>(())
/// ```
#[must_use]
pub fn region_query(points: &PointSet, center: &Point, eps: Eps) -> Vec<usize> {
    neighbours_within(points.points(), center, eps.get())
}

pub(crate) fn neighbours_within(points: &[Point], center: &Point, eps: f64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, candidate)| center.distance(candidate) <= eps)
        .map(|(index, _)| index)
        .collect()
}
