//! dbmerge core library.
//!
//! Clusters 2-D points with DBSCAN and consolidates the overlapping clusters
//! that expansion order can produce.
//!
//! The pipeline has three stages:
//!
//! 1. [`dbscan`] scans points in input order and expands clusters through a
//!    growing queue of [`region_query`] results.
//! 2. Each [`WorkingCluster`] is converted to a [`MergeSet`] of identifiers.
//! 3. [`merge_until_stable`] folds intersecting sets together until a pass
//!    changes nothing, leaving pairwise disjoint clusters.
//!
//! [`Dbmerge::run`] composes the stages and resolves the result into a
//! [`Partition`]; points outside every cluster are reported as noise.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod dbmerge;
mod error;
mod expansion;
mod heuristics;
mod merge;
mod neighbourhood;
mod partition;
mod point;
#[cfg(feature = "synthetic")]
mod synthetic;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{DEFAULT_EPS, DEFAULT_MIN_PTS, DbmergeBuilder},
    dbmerge::Dbmerge,
    error::{DbmergeError, DbmergeErrorCode, Result},
    expansion::{WorkingCluster, dbscan},
    heuristics::{
        EPS_NEIGHBOUR_FACTOR, ParameterHints, median_nearest_neighbour_distance,
        median_pairwise_distance, suggest_eps,
    },
    merge::{MergeOutcome, MergeSet, merge_clusters, merge_until_stable},
    neighbourhood::{Eps, region_query},
    partition::{ClusterId, Partition},
    point::{Axis, Point, PointId, PointSet},
};

#[cfg(feature = "synthetic")]
#[cfg_attr(docsrs, doc(cfg(feature = "synthetic")))]
pub use crate::synthetic::{
    CANVAS_SIZE, SquareBlobConfig, SyntheticError, SyntheticErrorCode, generate_square_blobs,
};
