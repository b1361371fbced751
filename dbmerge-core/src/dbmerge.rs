//! Clustering orchestration for the dbmerge library.
//!
//! Provides the [`Dbmerge`] entry point, which runs expansion, converts the
//! emitted clusters to identifier sets, merges them to a fixed point and
//! resolves the result into a [`Partition`].

use tracing::{info, instrument, warn};

use crate::{
    Result,
    expansion::dbscan,
    merge::{MergeSet, merge_until_stable},
    neighbourhood::Eps,
    partition::Partition,
    point::{Point, PointSet},
};

/// Entry point for running the clustering pipeline.
///
/// # Examples
/// ```
/// use dbmerge_core::{DbmergeBuilder, PointSet};
///
/// let points = PointSet::from_coordinates([
///     (0.0, 0.0), (0.5, 0.0), (0.0, 0.5),
///     (20.0, 20.0), (20.5, 20.0), (20.0, 20.5),
///     (50.0, 0.0),
/// ])?;
/// let dbmerge = DbmergeBuilder::new().with_eps(1.0).with_min_pts(3).build()?;
/// let partition = dbmerge.run(&points)?;
/// assert_eq!(partition.cluster_count(), 2);
/// assert_eq!(partition.noise_count(), 1);
/// # Ok::<(), dbmerge_core::DbmergeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Dbmerge {
    eps: Eps,
    min_pts: usize,
}

impl Dbmerge {
    pub(crate) fn new(eps: Eps, min_pts: usize) -> Self {
        Self { eps, min_pts }
    }

    /// Returns the neighbourhood radius configured for this instance.
    #[must_use]
    pub fn eps(&self) -> Eps {
        self.eps
    }

    /// Returns the density threshold configured for this instance.
    #[must_use]
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    /// Clusters `points` and merges overlapping clusters until stable.
    ///
    /// # Errors
    /// Returns [`crate::DbmergeError::UnknownPointId`] if a merged cluster
    /// cannot be resolved against `points`.
    #[instrument(
        name = "core.run",
        err,
        skip(self, points),
        fields(points = points.len(), eps = %self.eps, min_pts = self.min_pts),
    )]
    pub fn run(&self, points: &PointSet) -> Result<Partition> {
        let expanded = dbscan(points, self.eps, self.min_pts);
        let seeded = expanded.len();
        let sets = expanded.iter().map(MergeSet::from).collect();
        let outcome = merge_until_stable(sets);
        let partition = Partition::resolve(points, outcome, seeded)?;
        info!(
            seeded,
            clusters = partition.cluster_count(),
            noise = partition.noise_count(),
            passes = partition.merge_passes(),
            "clustering completed"
        );
        Ok(partition)
    }

    /// Validates raw points and clusters them.
    ///
    /// # Errors
    /// Returns the validation errors of [`PointSet::try_new`] before any
    /// clustering work starts, or the errors of [`Self::run`].
    ///
    /// # Examples
    /// ```
    /// use dbmerge_core::{DbmergeBuilder, DbmergeError};
    ///
    /// let dbmerge = DbmergeBuilder::new().build()?;
    /// let err = dbmerge.run_points(Vec::new()).unwrap_err();
    /// assert_eq!(err, DbmergeError::EmptyPointSet);
    /// # Ok::<(), DbmergeError>(())
    /// ```
    pub fn run_points(&self, points: Vec<Point>) -> Result<Partition> {
        let set = PointSet::try_new(points).inspect_err(|err| {
            warn!(code = %err.code(), error = %err, "rejecting invalid point set");
        })?;
        self.run(&set)
    }
}
