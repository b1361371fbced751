//! Point primitives shared by the clustering engine.
//!
//! A [`PointSet`] is validated once on construction and is read-only for the
//! rest of a clustering run. Identifiers are unique within a set so merged
//! identifier sets can always be resolved back to coordinates.

use std::{collections::HashMap, fmt};

use crate::error::{DbmergeError, Result};

/// Stable identifier attached to a [`Point`].
///
/// # Examples
/// ```
/// use dbmerge_core::PointId;
///
/// let id = PointId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(u64);

impl PointId {
    /// Creates a new point identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coordinate axis, used when reporting invalid coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    /// Horizontal coordinate.
    X,
    /// Vertical coordinate.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Immutable 2-D point with an identifier.
///
/// # Examples
/// ```
/// use dbmerge_core::{Point, PointId};
///
/// let origin = Point::new(PointId::new(0), 0.0, 0.0);
/// let other = Point::new(PointId::new(1), 3.0, 4.0);
/// assert_eq!(origin.distance(&other), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    id: PointId,
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point. Coordinates are validated when the point joins a
    /// [`PointSet`].
    #[must_use]
    pub const fn new(id: PointId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Returns the point identifier.
    #[must_use]
    pub const fn id(&self) -> PointId {
        self.id
    }

    /// Returns the horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance between two points.
    ///
    /// Computed with [`f64::hypot`], so the result stays finite for any pair
    /// of finite points whose coordinate gaps are themselves finite.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Reports whether both points occupy exactly the same coordinates,
    /// regardless of their identifiers.
    #[must_use]
    pub fn same_position(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    fn validate(&self) -> Result<()> {
        for (axis, value) in [(Axis::X, self.x), (Axis::Y, self.y)] {
            if !value.is_finite() {
                return Err(DbmergeError::NonFiniteCoordinate {
                    id: self.id,
                    axis,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Validated, ordered collection of points supplied to a clustering run.
///
/// Input order is preserved; it decides traversal order during expansion.
///
/// # Examples
/// ```
/// use dbmerge_core::{Point, PointId, PointSet};
///
/// let set = PointSet::try_new(vec![
///     Point::new(PointId::new(4), 0.0, 0.0),
///     Point::new(PointId::new(9), 1.0, 0.0),
/// ])?;
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.resolve(PointId::new(9)).map(|p| p.x()), Some(1.0));
/// # Ok::<(), dbmerge_core::DbmergeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PointSet {
    points: Vec<Point>,
    index_by_id: HashMap<PointId, usize>,
}

impl PointSet {
    /// Validates `points` and builds a set.
    ///
    /// # Errors
    /// Returns [`DbmergeError::EmptyPointSet`] when `points` is empty,
    /// [`DbmergeError::NonFiniteCoordinate`] when a coordinate is NaN or
    /// infinite, and [`DbmergeError::DuplicatePointId`] when two points share
    /// an identifier.
    pub fn try_new(points: Vec<Point>) -> Result<Self> {
        if points.is_empty() {
            return Err(DbmergeError::EmptyPointSet);
        }
        let mut index_by_id = HashMap::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            point.validate()?;
            if index_by_id.insert(point.id, index).is_some() {
                return Err(DbmergeError::DuplicatePointId { id: point.id });
            }
        }
        Ok(Self {
            points,
            index_by_id,
        })
    }

    /// Builds a set from bare coordinates, numbering points from zero in
    /// input order.
    ///
    /// # Errors
    /// Same as [`Self::try_new`].
    ///
    /// # Examples
    /// ```
    /// use dbmerge_core::PointSet;
    ///
    /// let set = PointSet::from_coordinates([(0.0, 0.0), (2.0, 2.0)])?;
    /// assert_eq!(set.get(1).map(|p| p.id().get()), Some(1));
    /// # Ok::<(), dbmerge_core::DbmergeError>(())
    /// ```
    pub fn from_coordinates<I>(coordinates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let points = coordinates
            .into_iter()
            .zip(0_u64..)
            .map(|((x, y), id)| Point::new(PointId::new(id), x, y))
            .collect();
        Self::try_new(points)
    }

    /// Number of points in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: empty sets are rejected on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in input order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the point at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Looks a point up by identifier.
    #[must_use]
    pub fn resolve(&self, id: PointId) -> Option<&Point> {
        self.index_by_id
            .get(&id)
            .and_then(|&index| self.points.get(index))
    }

    /// Iterates the points in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn point(id: u64, x: f64, y: f64) -> Point {
        Point::new(PointId::new(id), x, y)
    }

    #[rstest]
    #[case::identical((1.0, 1.0), (1.0, 1.0), 0.0)]
    #[case::pythagorean((0.0, 0.0), (3.0, 4.0), 5.0)]
    #[case::negative((-1.0, -1.0), (2.0, 3.0), 5.0)]
    fn distance_is_euclidean(
        #[case] left: (f64, f64),
        #[case] right: (f64, f64),
        #[case] expected: f64,
    ) {
        let a = point(0, left.0, left.1);
        let b = point(1, right.0, right.1);
        assert!((a.distance(&b) - expected).abs() < 1e-12);
        assert!((b.distance(&a) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case::wide_x((0.0, 0.0), (1e160, 0.0), 1e160)]
    #[case::wide_diagonal((-3e200, 0.0), (0.0, 4e200), 5e200)]
    #[case::tiny((0.0, 0.0), (3e-200, 4e-200), 5e-200)]
    fn distance_holds_at_extreme_magnitudes(
        #[case] left: (f64, f64),
        #[case] right: (f64, f64),
        #[case] expected: f64,
    ) {
        let distance = point(0, left.0, left.1).distance(&point(1, right.0, right.1));
        assert!(distance.is_finite());
        assert!(((distance - expected) / expected).abs() < 1e-12);
    }

    #[test]
    fn same_position_ignores_identifiers() {
        assert!(point(0, 2.0, 3.0).same_position(&point(8, 2.0, 3.0)));
        assert!(!point(0, 2.0, 3.0).same_position(&point(0, 2.0, 3.5)));
    }

    #[test]
    fn try_new_rejects_empty_input() {
        let err = PointSet::try_new(Vec::new()).expect_err("empty input must fail");
        assert_eq!(err, DbmergeError::EmptyPointSet);
    }

    #[rstest]
    #[case::nan_x(f64::NAN, 0.0, Axis::X)]
    #[case::infinite_y(0.0, f64::INFINITY, Axis::Y)]
    #[case::negative_infinite_x(f64::NEG_INFINITY, 1.0, Axis::X)]
    fn try_new_rejects_non_finite_coordinates(
        #[case] x: f64,
        #[case] y: f64,
        #[case] expected_axis: Axis,
    ) {
        let err = PointSet::try_new(vec![point(0, 0.0, 0.0), point(3, x, y)])
            .expect_err("non-finite coordinates must fail");
        match err {
            DbmergeError::NonFiniteCoordinate { id, axis, .. } => {
                assert_eq!(id, PointId::new(3));
                assert_eq!(axis, expected_axis);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn try_new_rejects_duplicate_ids() {
        let err = PointSet::try_new(vec![point(5, 0.0, 0.0), point(5, 1.0, 1.0)])
            .expect_err("duplicate ids must fail");
        assert_eq!(err, DbmergeError::DuplicatePointId { id: PointId::new(5) });
    }

    #[test]
    fn resolve_finds_points_by_id_not_index() {
        let set = PointSet::try_new(vec![point(10, 0.0, 0.0), point(20, 5.0, 5.0)])
            .expect("valid set");
        assert_eq!(set.resolve(PointId::new(20)), set.get(1));
        assert!(set.resolve(PointId::new(1)).is_none());
    }

    #[test]
    fn from_coordinates_numbers_points_in_order() {
        let set = PointSet::from_coordinates([(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])
            .expect("valid set");
        let ids: Vec<u64> = set.iter().map(|p| p.id().get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
