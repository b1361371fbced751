//! Consolidation of overlapping clusters.
//!
//! Expansion may emit clusters that share border points. Merging works on
//! identifier sets: a single pass folds every cluster into the first earlier
//! output cluster it intersects, and [`merge_until_stable`] repeats passes
//! until the cluster count stops changing, at which point the sets are
//! pairwise disjoint.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::{expansion::WorkingCluster, point::PointId};

/// Unordered set of point identifiers used while merging.
///
/// # Examples
/// ```
/// use dbmerge_core::{MergeSet, PointId};
///
/// let left: MergeSet = [1, 2, 3].map(PointId::new).into_iter().collect();
/// let right: MergeSet = [3, 4].map(PointId::new).into_iter().collect();
/// assert!(left.intersects(&right));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MergeSet {
    ids: BTreeSet<PointId>,
}

impl MergeSet {
    /// Reports whether both sets share at least one identifier.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let (small, large) = if self.ids.len() <= other.ids.len() {
            (&self.ids, &other.ids)
        } else {
            (&other.ids, &self.ids)
        };
        small.iter().any(|id| large.contains(id))
    }

    /// Moves every identifier of `other` into `self`.
    pub fn absorb(&mut self, mut other: Self) {
        self.ids.append(&mut other.ids);
    }

    /// Identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.ids.iter().copied()
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Reports whether the set holds no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<PointId> for MergeSet {
    fn from_iter<T: IntoIterator<Item = PointId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl From<&WorkingCluster> for MergeSet {
    fn from(cluster: &WorkingCluster) -> Self {
        cluster.ids().collect()
    }
}

impl From<WorkingCluster> for MergeSet {
    fn from(cluster: WorkingCluster) -> Self {
        Self::from(&cluster)
    }
}

/// Result of merging to a fixed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Pairwise disjoint clusters.
    pub clusters: Vec<MergeSet>,
    /// Number of merge passes applied, including the final pass that
    /// changed nothing.
    pub passes: usize,
}

/// Performs one merge pass.
///
/// Each input cluster is unioned into the first output cluster it
/// intersects; otherwise it is appended as a new output cluster. A cluster
/// intersecting several outputs only joins the first one, so chains may need
/// further passes to coalesce.
///
/// # Examples
/// ```
/// use dbmerge_core::{MergeSet, PointId, merge_clusters};
///
/// let set = |ids: &[u64]| ids.iter().copied().map(PointId::new).collect::<MergeSet>();
/// let merged = merge_clusters(vec![set(&[1, 2, 3]), set(&[3, 4, 5])]);
/// assert_eq!(merged, vec![set(&[1, 2, 3, 4, 5])]);
/// ```
#[must_use]
pub fn merge_clusters(clusters: Vec<MergeSet>) -> Vec<MergeSet> {
    let mut merged: Vec<MergeSet> = Vec::with_capacity(clusters.len());
    for cluster in clusters {
        match merged
            .iter_mut()
            .find(|existing| existing.intersects(&cluster))
        {
            Some(existing) => existing.absorb(cluster),
            None => merged.push(cluster),
        }
    }
    merged
}

/// Applies [`merge_clusters`] until a pass leaves the cluster count
/// unchanged.
///
/// At least one pass always runs. The returned clusters are pairwise
/// disjoint and their membership does not depend on input order.
///
/// # Examples
/// ```
/// use dbmerge_core::{MergeSet, PointId, merge_until_stable};
///
/// let set = |ids: &[u64]| ids.iter().copied().map(PointId::new).collect::<MergeSet>();
/// let outcome = merge_until_stable(vec![set(&[1, 2]), set(&[3, 4]), set(&[2, 3])]);
/// assert_eq!(outcome.clusters, vec![set(&[1, 2, 3, 4])]);
/// assert_eq!(outcome.passes, 3);
/// ```
#[must_use]
#[instrument(name = "core.merge", skip(clusters), fields(clusters = clusters.len()))]
pub fn merge_until_stable(clusters: Vec<MergeSet>) -> MergeOutcome {
    let mut current = clusters;
    let mut passes = 0;
    loop {
        let before = current.len();
        current = merge_clusters(current);
        passes += 1;
        debug!(pass = passes, before, after = current.len(), "merge pass applied");
        if current.len() == before {
            break;
        }
    }
    MergeOutcome {
        clusters: current,
        passes,
    }
}
