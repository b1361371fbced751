//! Tests for the `Dbmerge` orchestration API.

mod common;

use common::{cluster_ids, point_set};
use dbmerge_core::{
    ClusterId, DbmergeBuilder, DbmergeError, Eps, MergeSet, Point, PointId, PointSet, dbscan,
};
use dbmerge_test_support::fixtures::{BRIDGED_PAIR, TRIANGLE_WITH_OUTLIER};
use dbmerge_test_support::tracing::RecordingLayer;
use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[fixture]
fn triangle() -> PointSet {
    point_set(&TRIANGLE_WITH_OUTLIER)
}

#[rstest]
fn builder_defaults() {
    let builder = DbmergeBuilder::new();
    assert_eq!(builder.eps(), 1.0);
    assert_eq!(builder.min_pts(), 3);

    let dbmerge = builder.build().expect("defaults valid");
    assert_eq!(dbmerge.eps(), Eps::new(1.0).expect("valid eps"));
    assert_eq!(dbmerge.min_pts(), 3);
}

#[rstest]
#[case::negative(-0.1)]
#[case::nan(f64::NAN)]
#[case::infinite(f64::INFINITY)]
fn builder_rejects_invalid_eps(#[case] eps: f64) {
    let err = DbmergeBuilder::new()
        .with_eps(eps)
        .build()
        .expect_err("builder must reject invalid eps");
    assert!(matches!(err, DbmergeError::InvalidEps { .. }));
    assert!(err.is_invalid_parameter());
}

#[rstest]
fn run_separates_outlier_from_triangle(triangle: PointSet) {
    let partition = DbmergeBuilder::new()
        .with_eps(2.0)
        .with_min_pts(2)
        .build()
        .expect("configuration must be valid")
        .run(&triangle)
        .expect("run must succeed");

    assert_eq!(cluster_ids(partition.clusters()), vec![vec![0, 1, 2]]);
    let noise: Vec<u64> = partition.noise().iter().map(|p| p.id().get()).collect();
    assert_eq!(noise, vec![3]);
    assert_eq!(
        partition.assignments(),
        &[
            Some(ClusterId::new(0)),
            Some(ClusterId::new(0)),
            Some(ClusterId::new(0)),
            None,
        ]
    );
}

#[rstest]
fn run_merges_clusters_sharing_a_border_point() {
    let points = point_set(&BRIDGED_PAIR);
    let eps = Eps::new(1.0).expect("valid eps");

    let expanded = dbscan(&points, eps, 4);
    let sets: Vec<MergeSet> = expanded.iter().map(MergeSet::from).collect();
    assert_eq!(sets.len(), 2);
    assert!(sets[0].intersects(&sets[1]));

    let partition = DbmergeBuilder::new()
        .with_eps(1.0)
        .with_min_pts(4)
        .build()
        .expect("configuration must be valid")
        .run(&points)
        .expect("run must succeed");
    assert_eq!(partition.seeded_clusters(), 2);
    assert_eq!(partition.merge_passes(), 2);
    assert_eq!(cluster_ids(partition.clusters()), vec![vec![0, 1, 2, 3, 4, 5, 6]]);
    assert!(partition.noise().is_empty());
}

#[rstest]
fn min_pts_one_leaves_no_noise(triangle: PointSet) {
    let partition = DbmergeBuilder::new()
        .with_eps(0.5)
        .with_min_pts(1)
        .build()
        .expect("configuration must be valid")
        .run(&triangle)
        .expect("run must succeed");
    assert_eq!(partition.noise_count(), 0);
    assert_eq!(partition.cluster_count(), 4);
}

#[rstest]
fn every_point_is_either_assigned_or_noise(triangle: PointSet) {
    let partition = DbmergeBuilder::new()
        .with_eps(1.0)
        .with_min_pts(3)
        .build()
        .expect("configuration must be valid")
        .run(&triangle)
        .expect("run must succeed");
    assert_eq!(
        partition.assigned_count() + partition.noise_count(),
        triangle.len()
    );
}

#[rstest]
fn run_points_rejects_invalid_input_before_clustering() {
    let dbmerge = DbmergeBuilder::new().build().expect("defaults valid");

    let empty = dbmerge
        .run_points(Vec::new())
        .expect_err("empty input must fail");
    assert_eq!(empty, DbmergeError::EmptyPointSet);

    let non_finite = dbmerge
        .run_points(vec![Point::new(PointId::new(0), f64::NAN, 0.0)])
        .expect_err("non-finite input must fail");
    assert!(matches!(
        non_finite,
        DbmergeError::NonFiniteCoordinate { .. }
    ));
}

#[rstest]
fn run_records_core_tracing(triangle: PointSet) {
    let dbmerge = DbmergeBuilder::new()
        .with_eps(2.0)
        .with_min_pts(2)
        .build()
        .expect("configuration must be valid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let partition = tracing::subscriber::with_default(subscriber, || dbmerge.run(&triangle))
        .expect("run must succeed");
    assert_eq!(partition.cluster_count(), 1);

    let run_span = layer.span("core.run").expect("core.run span must exist");
    assert_eq!(run_span.field("points"), Some("4"));
    assert_eq!(run_span.field("eps"), Some("2"));
    assert_eq!(run_span.field("min_pts"), Some("2"));

    let dbscan_span = layer.span("core.dbscan").expect("core.dbscan span must exist");
    assert_eq!(dbscan_span.field("points"), Some("4"));

    let merge_span = layer.span("core.merge").expect("core.merge span must exist");
    assert_eq!(merge_span.field("clusters"), Some("1"));

    let completed = layer.events_with_message("clustering completed");
    assert_eq!(completed.len(), 1);
    let event = &completed[0];
    assert_eq!(event.level, Level::INFO);
    assert_eq!(event.field("clusters"), Some("1"));
    assert_eq!(event.field("noise"), Some("1"));
    assert_eq!(event.field("passes"), Some("1"));
}
