//! Shared test utilities for `dbmerge-core`.

use dbmerge_test_support::proptest_profile::ProptestRunProfile;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

use crate::{expansion::WorkingCluster, point::PointSet};

/// Builds a proptest configuration honouring the shared case-count override.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases);
    ProptestConfig {
        cases: profile.cases(),
        ..ProptestConfig::default()
    }
}

/// Generates point sets on a small integer grid so that neighbourhoods
/// overlap and coincident positions occur.
pub(crate) fn point_set_strategy(
    size: std::ops::Range<usize>,
) -> impl Strategy<Value = PointSet> {
    prop::collection::vec((0_i32..20, 0_i32..20), size).prop_map(|cells| {
        PointSet::from_coordinates(
            cells
                .into_iter()
                .map(|(x, y)| (f64::from(x), f64::from(y))),
        )
        .expect("grid coordinates are finite and ids unique")
    })
}

/// Identifiers of a working cluster's members, in admission order.
pub(crate) fn ids_of(cluster: &WorkingCluster) -> Vec<u64> {
    cluster.ids().map(|id| id.get()).collect()
}
