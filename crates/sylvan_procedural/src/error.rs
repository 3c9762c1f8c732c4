//! # World Error Types
//!
//! All errors that can occur while configuring or driving world generation.
//!
//! Generation itself is total: height and placement never fail for finite
//! input. Everything here is raised at construction time, except
//! `OutOfRange`, which guards span bounds that `f32` can no longer resolve.

use thiserror::Error;

/// Errors that can occur in the procedural world system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    /// A size or count that must be strictly positive was not.
    #[error("invalid configuration: `{field}` must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A numeric field was NaN or infinite.
    #[error("invalid configuration: `{field}` must be finite, got {value}")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A probability outside `[0, 1]`.
    #[error("invalid configuration: `{field}` must be within [0, 1], got {value}")]
    InvalidProbability {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An empty or inverted numeric range.
    #[error("invalid configuration: `{field}` range [{min}, {max}) is empty")]
    InvalidRange {
        /// Name of the offending range.
        field: &'static str,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (exclusive).
        max: f64,
    },

    /// A span whose bounds are not finite or not ordered.
    #[error("invalid span: [{min_x}, {max_x})")]
    InvalidSpan {
        /// Requested left bound.
        min_x: f32,
        /// Requested right bound.
        max_x: f32,
    },

    /// A coordinate beyond [`crate::WORLD_LIMIT`].
    #[error("`{field}` = {value} is outside the world limit of ±{limit}")]
    OutOfRange {
        /// Name of the offending coordinate.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// The limit.
        limit: f64,
    },

    /// Configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    ConfigIo(String),

    /// Configuration file is not valid TOML for `WorldConfig`.
    #[error("cannot parse configuration: {0}")]
    ConfigParse(String),
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
