use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Round a dollar amount to cents for reporting.
///
/// The engine computes in `f64`; reports and JSON output go through
/// `Decimal` so that amounts print exactly as shown to the user. Values
/// outside `Decimal`'s range fall back to zero, which cannot happen for
/// amounts produced from a validated parameter set.
///
/// # Examples
///
/// ```
/// use ramp_economics::core::money::to_cents;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(to_cents(14_583.333_333), dec!(14583.33));
/// ```
pub fn to_cents(amount: f64) -> Decimal {
    round_to(amount, 2)
}

/// Round to `dp` decimal places, used for per-$100 and basis-point figures.
pub fn round_to(amount: f64, dp: u32) -> Decimal {
    Decimal::from_f64(amount)
        .unwrap_or(Decimal::ZERO)
        .round_dp(dp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_cents_rounds() {
        assert_eq!(to_cents(140.0), dec!(140));
        assert_eq!(to_cents(36_530.508_923), dec!(36530.51));
        assert_eq!(to_cents(-8_001.004), dec!(-8001.00));
    }

    #[test]
    fn test_round_to_precision() {
        assert_eq!(round_to(0.365_305_089, 4), dec!(0.3653));
    }

    #[test]
    fn test_non_finite_falls_back_to_zero() {
        assert_eq!(to_cents(f64::NAN), Decimal::ZERO);
    }
}
