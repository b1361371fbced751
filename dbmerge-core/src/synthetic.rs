//! Seeded synthetic point sets.
//!
//! Generates axis-aligned square blobs with integer coordinates inside a
//! 2000 × 2000 canvas. Each blob has a random side in `500..1000` and is
//! shifted along the diagonal by a random offset that keeps it on the
//! canvas. Identifiers run from zero in generation order.

use std::fmt;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    error::{DbmergeError, define_error_codes},
    point::{Point, PointId, PointSet},
};

/// Width and height of the canvas blobs are placed on.
pub const CANVAS_SIZE: u32 = 2_000;
const MIN_SIDE: u32 = 500;
const SIDE_SPREAD: u32 = 500;

/// Errors raised while generating synthetic point sets.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SyntheticError {
    /// No blobs were requested.
    #[error("blob_count must be at least 1")]
    ZeroBlobs,
    /// More blobs were requested than points to fill them.
    #[error("blob_count ({blobs}) exceeds point_count ({points})")]
    BlobsExceedPoints {
        /// Requested number of blobs.
        blobs: usize,
        /// Requested number of points.
        points: usize,
    },
    /// The generated points failed point-set validation.
    #[error("generated points are invalid: {source}")]
    Points {
        /// Validation failure raised by [`PointSet::try_new`].
        #[from]
        source: DbmergeError,
    },
}

define_error_codes! {
    /// Stable codes describing [`SyntheticError`] variants.
    enum SyntheticErrorCode for SyntheticError {
        /// No blobs were requested.
        ZeroBlobs => ZeroBlobs => "DBMERGE_SYNTHETIC_ZERO_BLOBS",
        /// More blobs were requested than points to fill them.
        BlobsExceedPoints => BlobsExceedPoints { .. } => "DBMERGE_SYNTHETIC_BLOBS_EXCEED_POINTS",
        /// The generated points failed point-set validation.
        Points => Points { .. } => "DBMERGE_SYNTHETIC_INVALID_POINTS",
    }
}

/// Parameters for [`generate_square_blobs`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareBlobConfig {
    /// Total number of points to generate.
    pub point_count: usize,
    /// Number of blobs to spread the points across.
    pub blob_count: usize,
    /// Seed for the deterministic generator.
    pub seed: u64,
}

/// Generates `point_count` points split evenly across `blob_count` square
/// blobs. The last blob receives any remainder.
///
/// # Errors
/// Returns [`SyntheticError::ZeroBlobs`] when `blob_count` is zero and
/// [`SyntheticError::BlobsExceedPoints`] when there are fewer points than
/// blobs.
///
/// # Examples
/// ```
/// use dbmerge_core::{SquareBlobConfig, generate_square_blobs};
///
/// let config = SquareBlobConfig { point_count: 30, blob_count: 3, seed: 7 };
/// let points = generate_square_blobs(&config)?;
/// assert_eq!(points.len(), 30);
/// assert_eq!(points, generate_square_blobs(&config)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.synthetic",
    skip(config),
    fields(points = config.point_count, blobs = config.blob_count, seed = config.seed),
)]
pub fn generate_square_blobs(config: &SquareBlobConfig) -> Result<Vec<Point>, SyntheticError> {
    if config.blob_count == 0 {
        return Err(SyntheticError::ZeroBlobs);
    }
    if config.blob_count > config.point_count {
        return Err(SyntheticError::BlobsExceedPoints {
            blobs: config.blob_count,
            points: config.point_count,
        });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let per_blob = config.point_count / config.blob_count;
    let mut points = Vec::with_capacity(config.point_count);
    let mut next_id = 0_u64;

    for blob in 0..config.blob_count {
        let side = rng.gen_range(0..SIDE_SPREAD) + MIN_SIDE;
        let shift = rng.gen_range(0..CANVAS_SIZE - side);
        let target = if blob + 1 == config.blob_count {
            config.point_count
        } else {
            per_blob * (blob + 1)
        };
        debug!(blob, side, shift, target, "placing blob");
        while points.len() < target {
            let x = rng.gen_range(0..side) + shift;
            let y = rng.gen_range(0..side) + shift;
            points.push(Point::new(PointId::new(next_id), f64::from(x), f64::from(y)));
            next_id += 1;
        }
    }

    Ok(points)
}

impl SquareBlobConfig {
    /// Generates the points and wraps them in a validated [`PointSet`].
    ///
    /// # Errors
    /// Returns the errors of [`generate_square_blobs`].
    pub fn generate(&self) -> Result<PointSet, SyntheticError> {
        let points = generate_square_blobs(self)?;
        Ok(PointSet::try_new(points)?)
    }
}
