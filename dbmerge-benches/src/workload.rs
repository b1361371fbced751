//! Benchmark inputs.
//!
//! Point sets come from the core's seeded square-blob generator so every run
//! measures the same data. Merge inputs are synthetic identifier chains where
//! neighbouring sets share exactly one identifier.

use dbmerge_core::{MergeSet, PointId, PointSet, SquareBlobConfig};

use crate::error::BenchSetupError;

/// Seeded square-blob points.
///
/// # Errors
/// Returns [`BenchSetupError::Synthetic`] when the generator rejects the
/// configuration.
pub fn blob_points(
    point_count: usize,
    blob_count: usize,
    seed: u64,
) -> Result<PointSet, BenchSetupError> {
    let config = SquareBlobConfig {
        point_count,
        blob_count,
        seed,
    };
    Ok(config.generate()?)
}

/// `cluster_count` sets of `width` consecutive identifiers, each sharing its
/// last identifier with the next set. Even-indexed sets come first so the
/// bridging sets arrive late and merging needs more than one pass.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `cluster_count` is zero and
/// [`BenchSetupError::TooNarrow`] when `width` is below two.
pub fn overlapping_chain(
    cluster_count: usize,
    width: usize,
) -> Result<Vec<MergeSet>, BenchSetupError> {
    if cluster_count == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "cluster_count",
        });
    }
    if width < 2 {
        return Err(BenchSetupError::TooNarrow { width });
    }
    let stride = width - 1;
    let link = |index: usize| -> MergeSet {
        let start = index * stride;
        (start..start + width)
            .map(|id| PointId::new(id as u64))
            .collect()
    };
    let evens = (0..cluster_count).step_by(2);
    let odds = (1..cluster_count).step_by(2);
    Ok(evens.chain(odds).map(link).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    use dbmerge_core::merge_until_stable;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, 2)]
    #[case(4, 3, 9)]
    #[case(7, 5, 29)]
    fn chain_merges_into_one_set(
        #[case] cluster_count: usize,
        #[case] width: usize,
        #[case] expected_ids: usize,
    ) {
        let sets = overlapping_chain(cluster_count, width).expect("valid chain");
        assert_eq!(sets.len(), cluster_count);
        let outcome = merge_until_stable(sets);
        assert_eq!(outcome.clusters.len(), 1);
        assert_eq!(outcome.clusters[0].len(), expected_ids);
    }

    #[rstest]
    #[case(0, 3)]
    #[case(3, 1)]
    fn chain_rejects_degenerate_shapes(#[case] cluster_count: usize, #[case] width: usize) {
        assert!(overlapping_chain(cluster_count, width).is_err());
    }

    #[test]
    fn blob_points_are_reproducible() {
        let first = blob_points(60, 3, 5).expect("valid config");
        let second = blob_points(60, 3, 5).expect("valid config");
        assert_eq!(first.points(), second.points());
    }
}
