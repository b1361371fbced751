//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! setup functions can propagate failures with `?`.

use dbmerge_core::{DbmergeError, SyntheticError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic point generation failed.
    #[error("synthetic point generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Parameter validation or clustering failed.
    #[error("clustering setup failed: {0}")]
    Core(#[from] DbmergeError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
    /// Merge chain sets were too narrow to overlap their neighbours.
    #[error("chain width must be at least 2, got {width}")]
    TooNarrow {
        /// Requested identifiers per set.
        width: usize,
    },
}
