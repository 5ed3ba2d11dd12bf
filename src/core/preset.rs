use crate::core::params::{ParameterField, ParameterSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named stress scenarios layered on top of a caller's parameter set.
///
/// Applying a preset overrides only the fields it names. Resetting is the
/// caller's business: go back to [`ParameterSet::default`] or to whatever
/// set was held before.
///
/// # Examples
///
/// ```
/// use ramp_economics::core::params::ParameterSet;
/// use ramp_economics::core::preset::Preset;
///
/// let stressed = Preset::SlowBanks.apply(&ParameterSet::default());
/// assert_eq!(stressed.traditional_settlement_hours, 96.0);
/// assert_eq!(stressed.international_wire_fee, 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    VolatileMarket,
    SlowBanks,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::VolatileMarket, Preset::SlowBanks];

    pub fn label(&self) -> &'static str {
        match self {
            Self::VolatileMarket => "Volatile Market",
            Self::SlowBanks => "Slow Banks",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::VolatileMarket => "volatile",
            Self::SlowBanks => "slow-banks",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::VolatileMarket => {
                "Stress test: high MXN/USD volatility (25%) and extended rebalancing (72 hrs)."
            }
            Self::SlowBanks => "Extended wire processing (96 hrs) and higher wire fees ($50).",
        }
    }

    /// Field overrides this preset applies.
    pub fn overrides(&self) -> &'static [(ParameterField, f64)] {
        match self {
            Self::VolatileMarket => &[
                (ParameterField::FxVolatilityPct, 25.0),
                (ParameterField::TraditionalSettlementHours, 72.0),
            ],
            Self::SlowBanks => &[
                (ParameterField::TraditionalSettlementHours, 96.0),
                (ParameterField::InternationalWireFee, 50.0),
            ],
        }
    }

    pub fn apply(&self, params: &ParameterSet) -> ParameterSet {
        self.overrides()
            .iter()
            .fold(*params, |acc, (field, value)| acc.with_value(*field, *value))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.key() == s)
            .ok_or_else(|| format!("unknown preset '{}' (expected volatile or slow-banks)", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volatile_market_overrides() {
        let base = ParameterSet::default();
        let p = Preset::VolatileMarket.apply(&base);
        assert_eq!(p.fx_volatility_pct, 25.0);
        assert_eq!(p.traditional_settlement_hours, 72.0);
        assert_eq!(p.international_wire_fee, base.international_wire_fee);
    }

    #[test]
    fn test_preset_does_not_touch_other_fields() {
        let base = ParameterSet {
            monthly_volume: 3_000_000.0,
            ..Default::default()
        };
        let p = Preset::SlowBanks.apply(&base);
        assert_eq!(p.monthly_volume, 3_000_000.0);
        assert_eq!(p.fx_volatility_pct, base.fx_volatility_pct);
    }

    #[test]
    fn test_presets_stay_valid() {
        for preset in Preset::ALL {
            assert!(preset.apply(&ParameterSet::default()).validate().is_ok());
        }
    }

    #[test]
    fn test_parse_preset_key() {
        assert_eq!("volatile".parse::<Preset>(), Ok(Preset::VolatileMarket));
        assert_eq!("slow-banks".parse::<Preset>(), Ok(Preset::SlowBanks));
        assert!("calm".parse::<Preset>().is_err());
    }
}
