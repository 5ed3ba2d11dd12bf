//! FX value-at-risk buffer shared by both rebalancing paths.
//!
//! The buffer is a square-root-of-time scaled Gaussian approximation:
//!
//! ```text
//! buffer = exposure × σ_annual × √(hours / 8760) × z
//! ```
//!
//! It is not a distributional model. Both paths use the same formula and
//! the same multiplier; only the settlement duration differs, and that
//! alone is what shrinks the on-chain buffer.

/// Hours in a (non-leap) year, used to scale annual volatility.
pub const HOURS_PER_YEAR: f64 = 8_760.0;

/// One-sided 95 % standard normal quantile.
///
/// Earlier calculator builds used a flat 1.5 in one view and 1.645 in
/// another. The engine standardizes on 1.645 everywhere.
pub const VAR_CONFIDENCE_MULTIPLIER: f64 = 1.645;

/// Confidence level represented by [`VAR_CONFIDENCE_MULTIPLIER`].
pub const VAR_CONFIDENCE_LEVEL: f64 = 0.95;

/// Value-at-risk buffer for `exposure` dollars held across `hours` of
/// settlement at `volatility_pct` annualized volatility.
///
/// Zero exposure, zero volatility or zero duration give a zero buffer. The
/// result is clamped at zero so callers can rely on a non-negative value;
/// an overflowed NaN is passed through for the caller to reject.
///
/// # Examples
///
/// ```
/// use ramp_economics::model::risk::var_buffer;
///
/// let buffer = var_buffer(2_500_000.0, 12.0, 48.0);
/// assert!((buffer - 36_530.51).abs() < 0.01);
/// assert_eq!(var_buffer(2_500_000.0, 0.0, 48.0), 0.0);
/// ```
pub fn var_buffer(exposure: f64, volatility_pct: f64, hours: f64) -> f64 {
    let horizon = (hours / HOURS_PER_YEAR).sqrt();
    let buffer = exposure * (volatility_pct / 100.0) * horizon * VAR_CONFIDENCE_MULTIPLIER;
    if buffer < 0.0 {
        0.0
    } else {
        buffer
    }
}
