//! Benchmark parameter types.
//!
//! Each type renders as a compact Criterion benchmark identifier.

use std::fmt;

/// Parameters for a density expansion benchmark run.
#[derive(Clone, Debug)]
pub struct ExpansionBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Density threshold.
    pub min_pts: usize,
}

impl fmt::Display for ExpansionBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},min_pts={}", self.point_count, self.min_pts)
    }
}

/// Parameters for a merge benchmark run.
#[derive(Clone, Debug)]
pub struct MergeBenchParams {
    /// Number of input identifier sets.
    pub cluster_count: usize,
    /// Identifiers per set.
    pub width: usize,
}

impl fmt::Display for MergeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k={},w={}", self.cluster_count, self.width)
    }
}
