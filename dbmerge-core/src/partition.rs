//! Final clustering output.
//!
//! A [`Partition`] is built from converged merge sets: identifiers are
//! resolved back to points, every point receives at most one cluster, and
//! the points left over form the noise set.

use std::collections::HashMap;

use crate::{
    error::{DbmergeError, Result},
    merge::MergeOutcome,
    point::{Point, PointId, PointSet},
};

/// Identifier assigned to a cluster of a [`Partition`].
///
/// Identifiers are contiguous from zero in the order clusters were first
/// seeded.
///
/// # Examples
/// ```
/// use dbmerge_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

/// Disjoint clusters plus the noise left after merging.
///
/// # Examples
/// ```
/// use dbmerge_core::{DbmergeBuilder, PointSet};
///
/// let points = PointSet::from_coordinates([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (10.0, 10.0)])?;
/// let partition = DbmergeBuilder::new()
///     .with_eps(2.0)
///     .with_min_pts(2)
///     .build()?
///     .run(&points)?;
/// assert_eq!(partition.cluster_count(), 1);
/// assert_eq!(partition.noise_count(), 1);
/// assert_eq!(partition.assigned_count(), 3);
/// # Ok::<(), dbmerge_core::DbmergeError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    clusters: Vec<Vec<Point>>,
    noise: Vec<Point>,
    assignments: Vec<Option<ClusterId>>,
    seeded_clusters: usize,
    merge_passes: usize,
}

impl Partition {
    /// Resolves converged merge sets against `points`.
    ///
    /// # Errors
    /// Returns [`DbmergeError::UnknownPointId`] when a merge set names an
    /// identifier that is not part of `points`.
    pub fn resolve(
        points: &PointSet,
        outcome: MergeOutcome,
        seeded_clusters: usize,
    ) -> Result<Self> {
        let mut cluster_of = HashMap::new();
        let mut clusters = Vec::with_capacity(outcome.clusters.len());
        for (cluster_id, set) in (0_u64..).map(ClusterId::new).zip(&outcome.clusters) {
            let members = set
                .ids()
                .map(|id| {
                    points
                        .resolve(id)
                        .copied()
                        .ok_or(DbmergeError::UnknownPointId { id })
                })
                .collect::<Result<Vec<_>>>()?;
            for member in &members {
                cluster_of.insert(member.id(), cluster_id);
            }
            clusters.push(members);
        }

        let assignments = points
            .iter()
            .map(|point| cluster_of.get(&point.id()).copied())
            .collect::<Vec<_>>();
        let noise = points
            .iter()
            .zip(&assignments)
            .filter(|(_, assignment)| assignment.is_none())
            .map(|(point, _)| *point)
            .collect();

        Ok(Self {
            clusters,
            noise,
            assignments,
            seeded_clusters,
            merge_passes: outcome.passes,
        })
    }

    /// Clusters with members sorted by identifier.
    #[must_use]
    pub fn clusters(&self) -> &[Vec<Point>] {
        &self.clusters
    }

    /// Points that belong to no cluster, in input order.
    #[must_use]
    pub fn noise(&self) -> &[Point] {
        &self.noise
    }

    /// Cluster assignment of every input point, in input order.
    #[must_use]
    pub fn assignments(&self) -> &[Option<ClusterId>] {
        &self.assignments
    }

    /// Cluster holding the point with identifier `id`, if any.
    #[must_use]
    pub fn cluster_of(&self, id: PointId) -> Option<ClusterId> {
        self.clusters
            .iter()
            .position(|members| members.iter().any(|point| point.id() == id))
            .and_then(|index| u64::try_from(index).ok())
            .map(ClusterId::new)
    }

    /// Number of clusters after merging.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Number of noise points.
    #[must_use]
    pub fn noise_count(&self) -> usize {
        self.noise.len()
    }

    /// Number of points that belong to a cluster.
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum()
    }

    /// Number of clusters emitted by expansion before merging.
    #[must_use]
    pub fn seeded_clusters(&self) -> usize {
        self.seeded_clusters
    }

    /// Number of merge passes needed to reach the fixed point.
    #[must_use]
    pub fn merge_passes(&self) -> usize {
        self.merge_passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::merge::MergeSet;

    fn outcome(clusters: &[&[u64]]) -> MergeOutcome {
        MergeOutcome {
            clusters: clusters
                .iter()
                .map(|ids| ids.iter().copied().map(PointId::new).collect::<MergeSet>())
                .collect(),
            passes: 1,
        }
    }

    fn points() -> PointSet {
        PointSet::from_coordinates([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])
            .expect("valid set")
    }

    #[test]
    fn resolve_assigns_clusters_and_noise() {
        let partition = Partition::resolve(&points(), outcome(&[&[3, 1], &[0]]), 3)
            .expect("ids resolve");
        let ids: Vec<Vec<u64>> = partition
            .clusters()
            .iter()
            .map(|members| members.iter().map(|p| p.id().get()).collect())
            .collect();
        assert_eq!(ids, vec![vec![1, 3], vec![0]]);
        assert_eq!(
            partition.assignments(),
            &[
                Some(ClusterId::new(1)),
                Some(ClusterId::new(0)),
                None,
                Some(ClusterId::new(0)),
            ]
        );
        assert_eq!(partition.noise().len(), 1);
        assert_eq!(partition.noise()[0].id(), PointId::new(2));
        assert_eq!(partition.assigned_count(), 3);
        assert_eq!(partition.seeded_clusters(), 3);
        assert_eq!(partition.cluster_of(PointId::new(3)), Some(ClusterId::new(0)));
        assert_eq!(partition.cluster_of(PointId::new(2)), None);
    }

    #[test]
    fn resolve_rejects_unknown_ids() {
        let err = Partition::resolve(&points(), outcome(&[&[0, 42]]), 1)
            .expect_err("unknown id must fail");
        assert_eq!(err, DbmergeError::UnknownPointId { id: PointId::new(42) });
    }
}
