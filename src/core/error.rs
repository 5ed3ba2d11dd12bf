use thiserror::Error;

/// Errors raised when a parameter set cannot be evaluated.
///
/// Every variant names the offending field so the caller can point the
/// user at the right input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be strictly positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be at least {minimum}, got {value}")]
    BelowMinimum {
        field: &'static str,
        value: f64,
        minimum: f64,
    },
    #[error("{field} must be at most {maximum}, got {value}")]
    AboveMaximum {
        field: &'static str,
        value: f64,
        maximum: f64,
    },
    #[error("{field} is a percentage and must not exceed 100, got {value}")]
    AbovePercentCap { field: &'static str, value: f64 },
}

/// Errors arising from sensitivity sweeps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("invalid sweep range {start}..={end} step {step}: {reason}")]
    InvalidRange {
        start: f64,
        end: f64,
        step: f64,
        reason: &'static str,
    },
    #[error("sweep would produce {points} points, limit is {limit}")]
    TooManyPoints { points: usize, limit: usize },
    #[error("swept value {value} rejected: {source}")]
    Parameter {
        value: f64,
        #[source]
        source: ParameterError,
    },
}

/// Top-level error returned by the comparison engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Sweep(#[from] SweepError),
    /// Valid inputs whose magnitudes overflowed during costing.
    #[error("{quantity} is not a finite number; input magnitudes are out of range")]
    NonFiniteResult { quantity: &'static str },
}
