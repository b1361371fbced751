//! Density-reachability expansion (DBSCAN).
//!
//! Points are scanned in input order. Each unvisited point with at least
//! `min_pts` neighbours seeds a cluster, which then grows by walking a queue
//! of candidate indices. Neighbourhoods of newly visited core points are
//! appended to the queue while it is being walked, duplicates included.
//!
//! Every queued point is admitted to the current cluster unless a member
//! already sits at the same coordinates, even when an earlier expansion has
//! visited it. Clusters returned from this stage may therefore share border
//! points; [`crate::merge_until_stable`] removes that overlap.

use tracing::{debug, instrument};

use crate::{
    neighbourhood::{Eps, neighbours_within},
    point::{Point, PointId, PointSet},
};

/// Cluster under construction: members in admission order, deduplicated by
/// coordinates.
///
/// # Examples
/// ```
/// use dbmerge_core::{Eps, PointSet, dbscan};
///
/// let set = PointSet::from_coordinates([(0.0, 0.0), (0.5, 0.0), (9.0, 9.0)])?;
/// let clusters = dbscan(&set, Eps::new(1.0)?, 2);
/// assert_eq!(clusters.len(), 1);
/// assert_eq!(clusters[0].len(), 2);
/// # Ok::<(), dbmerge_core::DbmergeError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingCluster {
    members: Vec<Point>,
}

impl WorkingCluster {
    fn seeded(seed: Point) -> Self {
        Self {
            members: vec![seed],
        }
    }

    fn admit(&mut self, candidate: Point) {
        if !self
            .members
            .iter()
            .any(|member| member.same_position(&candidate))
        {
            self.members.push(candidate);
        }
    }

    /// Members in the order they were admitted. The seed comes first.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.members
    }

    /// Identifiers of the members in admission order.
    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.members.iter().map(Point::id)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: a cluster holds at least its seed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Runs the expansion over `points` and returns the clusters in seeding
/// order.
///
/// Points that end up in no cluster are noise; callers derive them as the
/// complement of the returned members. The output is deterministic for a
/// given point order, `eps` and `min_pts`. With `min_pts <= 1` every visited
/// point seeds or joins a cluster.
///
/// # Examples
/// ```
/// use dbmerge_core::{Eps, PointSet, dbscan};
///
/// let set = PointSet::from_coordinates([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (10.0, 10.0)])?;
/// let clusters = dbscan(&set, Eps::new(2.0)?, 2);
/// let ids: Vec<u64> = clusters[0].ids().map(|id| id.get()).collect();
/// assert_eq!(ids, vec![0, 1, 2]);
/// assert_eq!(clusters.len(), 1);
/// # Ok::<(), dbmerge_core::DbmergeError>(())
/// ```
#[must_use]
#[instrument(
    name = "core.dbscan",
    skip(points),
    fields(points = points.len(), eps = %eps, min_pts = min_pts),
)]
pub fn dbscan(points: &PointSet, eps: Eps, min_pts: usize) -> Vec<WorkingCluster> {
    let all = points.points();
    let radius = eps.get();
    let mut visited = vec![false; all.len()];
    let mut clusters = Vec::new();

    for (index, point) in all.iter().enumerate() {
        if visited[index] {
            continue;
        }
        visited[index] = true;

        let mut queue = neighbours_within(all, point, radius);
        if queue.len() < min_pts {
            continue;
        }

        let mut cluster = WorkingCluster::seeded(*point);
        let mut cursor = 0;
        // The queue grows while it is walked, so iterate by position.
        while let Some(&neighbour) = queue.get(cursor) {
            cursor += 1;
            let candidate = all[neighbour];
            if !visited[neighbour] {
                visited[neighbour] = true;
                let reachable = neighbours_within(all, &candidate, radius);
                if reachable.len() >= min_pts {
                    queue.extend(reachable);
                }
            }
            cluster.admit(candidate);
        }

        debug!(
            seed = %point.id(),
            members = cluster.len(),
            queued = queue.len(),
            "cluster expanded"
        );
        clusters.push(cluster);
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    use crate::test_utils::{ids_of, point_set_strategy, suite_proptest_config};

    fn eps(value: f64) -> Eps {
        Eps::new(value).expect("valid eps")
    }

    #[test]
    fn isolated_point_is_left_as_noise() {
        let set = PointSet::from_coordinates([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (10.0, 10.0)])
            .expect("valid set");
        let clusters = dbscan(&set, eps(2.0), 2);
        assert_eq!(clusters.len(), 1);
        assert_eq!(ids_of(&clusters[0]), vec![0, 1, 2]);
    }

    #[test]
    fn separated_groups_form_separate_clusters() {
        let set = PointSet::from_coordinates([
            (0.0, 0.0),
            (50.0, 50.0),
            (0.5, 0.0),
            (50.5, 50.0),
            (0.0, 0.5),
        ])
        .expect("valid set");
        let clusters = dbscan(&set, eps(1.0), 2);
        let ids: Vec<Vec<u64>> = clusters.iter().map(ids_of).collect();
        assert_eq!(ids, vec![vec![0, 2, 4], vec![1, 3]]);
    }

    #[test]
    fn expansion_follows_chains_of_core_points() {
        // Each point only reaches its direct neighbours; the queue must keep
        // growing for the far end of the chain to be reached.
        let set = PointSet::from_coordinates((0..6).map(|step| (f64::from(step), 0.0)))
            .expect("valid set");
        let clusters = dbscan(&set, eps(1.0), 2);
        assert_eq!(clusters.len(), 1);
        assert_eq!(ids_of(&clusters[0]), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn border_points_can_land_in_two_clusters() {
        // Point 3 lies within reach of the cores at 0.0 and 2.0 but has only
        // three neighbours itself, so both expansions admit it.
        let set = PointSet::from_coordinates(
            [-0.6, -0.5, 0.0, 1.0, 2.0, 2.5, 2.6].map(|x| (x, 0.0)),
        )
        .expect("valid set");
        let clusters = dbscan(&set, eps(1.0), 4);
        let ids: Vec<Vec<u64>> = clusters.iter().map(ids_of).collect();
        assert_eq!(ids, vec![vec![2, 0, 1, 3], vec![4, 3, 5, 6]]);
    }

    #[test]
    fn coincident_points_are_admitted_once() {
        let set = PointSet::from_coordinates([(0.0, 0.0), (0.0, 0.0), (0.5, 0.0)])
            .expect("valid set");
        let clusters = dbscan(&set, eps(1.0), 2);
        assert_eq!(clusters.len(), 1);
        assert_eq!(ids_of(&clusters[0]), vec![0, 2]);
    }

    #[test]
    fn coincident_point_is_noise_even_at_min_pts_one() {
        // The duplicate is visited while expanding the seed but never admitted,
        // so it cannot seed a singleton of its own.
        let set = PointSet::from_coordinates([(0.0, 0.0), (0.0, 0.0)]).expect("valid set");
        let clusters = dbscan(&set, eps(1.0), 1);
        let ids: Vec<Vec<u64>> = clusters.iter().map(ids_of).collect();
        assert_eq!(ids, vec![vec![0]]);
    }

    #[rstest]
    #[case::min_pts_zero(0)]
    #[case::min_pts_one(1)]
    fn trivial_min_pts_leaves_no_noise(#[case] min_pts: usize) {
        let set = PointSet::from_coordinates([(0.0, 0.0), (100.0, 0.0), (0.0, 100.0)])
            .expect("valid set");
        let clusters = dbscan(&set, eps(1.0), min_pts);
        let ids: Vec<Vec<u64>> = clusters.iter().map(ids_of).collect();
        assert_eq!(ids, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn zero_eps_isolates_every_point() {
        let set = PointSet::from_coordinates([(0.0, 0.0), (0.1, 0.0)]).expect("valid set");
        assert!(dbscan(&set, eps(0.0), 2).is_empty());
        assert_eq!(dbscan(&set, eps(0.0), 1).len(), 2);
    }

    proptest! {
        #![proptest_config(suite_proptest_config(64))]

        #[test]
        fn clusters_never_repeat_a_position(
            set in point_set_strategy(1..40),
            radius in 0.0_f64..30.0,
            min_pts in 0_usize..6,
        ) {
            for cluster in dbscan(&set, eps(radius), min_pts) {
                let members = cluster.points();
                prop_assert!(!members.is_empty());
                for (offset, member) in members.iter().enumerate() {
                    prop_assert!(
                        members[offset + 1..].iter().all(|other| !member.same_position(other))
                    );
                }
            }
        }

        #[test]
        fn min_pts_one_assigns_every_distinct_position(
            set in point_set_strategy(1..40),
            radius in 0.0_f64..30.0,
        ) {
            let clusters = dbscan(&set, eps(radius), 1);
            for point in &set {
                prop_assert!(clusters
                    .iter()
                    .flat_map(WorkingCluster::points)
                    .any(|member| member.same_position(point)));
            }
        }

        #[test]
        fn expansion_is_deterministic(
            set in point_set_strategy(1..30),
            radius in 0.0_f64..30.0,
            min_pts in 1_usize..5,
        ) {
            prop_assert_eq!(dbscan(&set, eps(radius), min_pts), dbscan(&set, eps(radius), min_pts));
        }
    }
}
