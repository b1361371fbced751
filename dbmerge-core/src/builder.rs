//! Builder utilities for configuring dbmerge runs.
//!
//! Collects the neighbourhood radius and density threshold and validates
//! them before constructing [`Dbmerge`] instances.

use crate::{Result, dbmerge::Dbmerge, neighbourhood::Eps};

/// Default neighbourhood radius.
pub const DEFAULT_EPS: f64 = 1.0;

/// Default density threshold.
pub const DEFAULT_MIN_PTS: usize = 3;

/// Configures and constructs [`Dbmerge`] instances.
///
/// # Examples
/// ```
/// use dbmerge_core::DbmergeBuilder;
///
/// let dbmerge = DbmergeBuilder::new()
///     .with_eps(12.5)
///     .with_min_pts(4)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(dbmerge.eps().get(), 12.5);
/// assert_eq!(dbmerge.min_pts(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct DbmergeBuilder {
    eps: f64,
    min_pts: usize,
}

impl Default for DbmergeBuilder {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            min_pts: DEFAULT_MIN_PTS,
        }
    }
}

impl DbmergeBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use dbmerge_core::DbmergeBuilder;
    ///
    /// let builder = DbmergeBuilder::new();
    /// assert_eq!(builder.eps(), 1.0);
    /// assert_eq!(builder.min_pts(), 3);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the neighbourhood radius.
    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Returns the configured neighbourhood radius.
    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Overrides the density threshold.
    ///
    /// The threshold counts the point itself. Values of `0` and `1` make
    /// every point a core point.
    #[must_use]
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Returns the configured density threshold.
    #[must_use]
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    /// Validates the configuration and constructs a [`Dbmerge`] instance.
    ///
    /// # Errors
    /// Returns [`crate::DbmergeError::InvalidEps`] when the radius is
    /// negative or not finite.
    ///
    /// # Examples
    /// ```
    /// use dbmerge_core::{DbmergeBuilder, DbmergeError};
    ///
    /// let err = DbmergeBuilder::new().with_eps(-2.0).build().unwrap_err();
    /// assert_eq!(err, DbmergeError::InvalidEps { got: -2.0 });
    /// ```
    pub fn build(self) -> Result<Dbmerge> {
        let eps = Eps::new(self.eps)?;
        Ok(Dbmerge::new(eps, self.min_pts))
    }
}
