//! Engine-level error types.

use thiserror::Error;

/// Errors surfaced while validating an [`crate::config::EngineConfig`].
///
/// Always returned before any records are read; the engine never
/// re-validates mid-stream.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// `initial_capital` was not strictly positive.
    #[error("initial_capital must be positive, got {0}")]
    NonPositiveCapital(f64),

    /// `minimum_concurrent > maximum_concurrent`.
    #[error("minimum_concurrent ({minimum}) exceeds maximum_concurrent ({maximum})")]
    ConcurrencyBoundsInverted {
        /// The offending `minimum_concurrent`.
        minimum: usize,
        /// The offending `maximum_concurrent`.
        maximum: usize,
    },

    /// `max_marginal_increment` was not strictly positive.
    #[error("max_marginal_increment must be positive, got {0}")]
    NonPositiveMarginalIncrement(f64),

    /// `max_margin_reciprocal < 1.0`.
    #[error("max_margin_reciprocal must be >= 1.0, got {0}")]
    InvalidMaxMarginReciprocal(f64),
}

impl ConfigError {
    /// Builds a [`ConfigError::NonPositiveCapital`].
    pub fn non_positive_capital(value: f64) -> Self {
        Self::NonPositiveCapital(value)
    }

    /// Builds a [`ConfigError::ConcurrencyBoundsInverted`].
    pub fn concurrency_bounds_inverted(minimum: usize, maximum: usize) -> Self {
        Self::ConcurrencyBoundsInverted { minimum, maximum }
    }

    /// Builds a [`ConfigError::NonPositiveMarginalIncrement`].
    pub fn non_positive_marginal_increment(value: f64) -> Self {
        Self::NonPositiveMarginalIncrement(value)
    }

    /// Builds a [`ConfigError::InvalidMaxMarginReciprocal`].
    pub fn invalid_max_margin_reciprocal(value: f64) -> Self {
        Self::InvalidMaxMarginReciprocal(value)
    }
}

/// Convenience alias for engine-construction results.
pub type Result<T> = std::result::Result<T, ConfigError>;
