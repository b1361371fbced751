//! Benchmark support crate for dbmerge.
//!
//! Provides workload builders and parameter types used by the Criterion
//! benchmarks for the two pipeline stages: density expansion and cluster
//! merging.

pub mod error;
pub mod params;
pub mod workload;
