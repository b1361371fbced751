use dbmerge_core::{Point, PointId, PointSet};

#[must_use]
pub fn point_set(fixture: &[(u64, f64, f64)]) -> PointSet {
    PointSet::try_new(
        fixture
            .iter()
            .map(|&(id, x, y)| Point::new(PointId::new(id), x, y))
            .collect(),
    )
    .expect("fixtures are valid point sets")
}

#[must_use]
pub fn cluster_ids(clusters: &[Vec<Point>]) -> Vec<Vec<u64>> {
    clusters
        .iter()
        .map(|members| members.iter().map(|point| point.id().get()).collect())
        .collect()
}
