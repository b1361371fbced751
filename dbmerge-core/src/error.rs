//! Error types for the dbmerge core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.
//! Every variant maps to a stable machine-readable code so callers can react
//! without matching on display strings.

use std::fmt;

use thiserror::Error;

use crate::point::{Axis, PointId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// Error type produced when validating inputs or running the clustering
/// pipeline.
///
/// All variants describe caller contract violations. They are raised before
/// any clustering work starts, so no partial results are ever returned.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DbmergeError {
    /// The point set handed to the clusterer contained no points.
    #[error("point set contains no points")]
    EmptyPointSet,
    /// A point carried a NaN or infinite coordinate.
    #[error("point {id} has a non-finite {axis} coordinate: {value}")]
    NonFiniteCoordinate {
        /// Identifier of the offending point.
        id: PointId,
        /// Axis holding the invalid value.
        axis: Axis,
        /// The rejected coordinate.
        value: f64,
    },
    /// Two points in the same set shared an identifier.
    #[error("point id {id} appears more than once")]
    DuplicatePointId {
        /// The repeated identifier.
        id: PointId,
    },
    /// The neighbourhood radius was negative or not finite.
    #[error("eps must be finite and non-negative (got {got})")]
    InvalidEps {
        /// The rejected radius.
        got: f64,
    },
    /// A merge set referenced an identifier missing from the point set.
    #[error("point id {id} is not part of the point set")]
    UnknownPointId {
        /// Identifier that could not be resolved.
        id: PointId,
    },
}

define_error_codes! {
    /// Stable codes describing [`DbmergeError`] variants.
    enum DbmergeErrorCode for DbmergeError {
        /// The point set handed to the clusterer contained no points.
        EmptyPointSet => EmptyPointSet => "DBMERGE_EMPTY_POINT_SET",
        /// A point carried a NaN or infinite coordinate.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "DBMERGE_NON_FINITE_COORDINATE",
        /// Two points in the same set shared an identifier.
        DuplicatePointId => DuplicatePointId { .. } => "DBMERGE_DUPLICATE_POINT_ID",
        /// The neighbourhood radius was negative or not finite.
        InvalidEps => InvalidEps { .. } => "DBMERGE_INVALID_EPS",
        /// A merge set referenced an identifier missing from the point set.
        UnknownPointId => UnknownPointId { .. } => "DBMERGE_UNKNOWN_POINT_ID",
    }
}

impl DbmergeError {
    /// Reports whether the error describes an invalid caller-supplied
    /// parameter rather than an internal inconsistency.
    ///
    /// # Examples
    /// ```
    /// use dbmerge_core::DbmergeError;
    ///
    /// assert!(DbmergeError::InvalidEps { got: -1.0 }.is_invalid_parameter());
    /// assert!(DbmergeError::EmptyPointSet.is_invalid_parameter());
    /// ```
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        !matches!(self, Self::UnknownPointId { .. })
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, DbmergeError>;
