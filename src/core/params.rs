use crate::core::error::ParameterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shortest settlement duration accepted for the on-chain path, in hours.
pub const MIN_OPTIMIZED_SETTLEMENT_HOURS: f64 = 0.01;

/// Smallest monthly volume accepted, in dollars.
///
/// The volume curve steps in 5 % increments of the current volume, which
/// must stay a positive normal number.
pub const MIN_MONTHLY_VOLUME: f64 = 0.01;

/// Largest monthly volume accepted, in dollars. Twice this value, the top
/// of the volume curve, stays finite.
pub const MAX_MONTHLY_VOLUME: f64 = 1.0e15;

/// The full set of inputs describing a ramp business and its market.
///
/// A parameter set is a plain value owned by the caller. The engine only
/// ever reads it; to explore a what-if, build a modified copy with
/// [`ParameterSet::with_value`] or struct update syntax.
///
/// Percentages are expressed as whole numbers (`12.0` means 12 %), fees in
/// basis points as whole basis points, money in dollars.
///
/// # Examples
///
/// ```
/// use ramp_economics::core::params::{ParameterField, ParameterSet};
///
/// let base = ParameterSet::default();
/// let stressed = base.with_value(ParameterField::FxVolatilityPct, 25.0);
/// assert_eq!(stressed.fx_volatility_pct, 25.0);
/// assert_eq!(base.fx_volatility_pct, 12.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterSet {
    // --- Scale ---
    /// Average user transaction, in dollars.
    pub average_ticket_size: f64,
    /// Dollar volume processed per month.
    pub monthly_volume: f64,
    /// Rebalancing cycles per month.
    pub rebalancing_frequency: f64,
    /// Share of flow moving in the dominant direction (50 = balanced).
    pub demand_imbalance_pct: f64,
    /// Share of transactions that come from first-time users.
    pub new_user_rate_pct: f64,

    // --- Market ---
    /// Annualized exchange-rate volatility.
    pub fx_volatility_pct: f64,
    /// Hours a bank-wire rebalance leaves inventory exposed.
    pub traditional_settlement_hours: f64,
    /// Hours an on-chain rebalance leaves inventory exposed.
    pub optimized_settlement_hours: f64,
    /// Annual yield of the tokenized local instrument.
    pub yield_rate_pct: f64,
    /// Annual risk-free reference rate.
    pub reference_rate_pct: f64,
    /// Annual rate paid on idle bank balances.
    pub bank_deposit_rate_pct: f64,
    /// Share of optimized inventory held in the yield instrument.
    pub yield_allocation_pct: f64,

    // --- Fees ---
    pub international_wire_fee: f64,
    pub domestic_wire_fee: f64,
    pub local_wire_fee: f64,
    pub fx_spread_bps: f64,
    pub exchange_fee_bps: f64,
    pub swap_spread_bps: f64,
    pub bank_network_fee_per_tx: f64,
    pub network_fee_per_tx: f64,
    pub kyc_cost_per_new_user: f64,
    pub op_cost_per_tx: f64,
    /// Fee charged to users on every transaction.
    pub user_fee_bps: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            average_ticket_size: 25.0,
            monthly_volume: 10_000_000.0,
            rebalancing_frequency: 4.0,
            demand_imbalance_pct: 100.0,
            new_user_rate_pct: 15.0,

            fx_volatility_pct: 12.0,
            traditional_settlement_hours: 48.0,
            optimized_settlement_hours: MIN_OPTIMIZED_SETTLEMENT_HOURS,
            yield_rate_pct: 7.0,
            reference_rate_pct: 4.5,
            bank_deposit_rate_pct: 0.0,
            yield_allocation_pct: 100.0,

            international_wire_fee: 35.0,
            domestic_wire_fee: 0.0,
            local_wire_fee: 0.25,
            fx_spread_bps: 0.0,
            exchange_fee_bps: 0.0,
            swap_spread_bps: 8.0,
            bank_network_fee_per_tx: 0.0,
            network_fee_per_tx: 0.000_01,
            kyc_cost_per_new_user: 0.0,
            op_cost_per_tx: 0.0,
            user_fee_bps: 150.0,
        }
    }
}

impl ParameterSet {
    /// Check every field against the engine's input contract.
    ///
    /// Fields are checked in [`ParameterField::ALL`] order and the first
    /// violation is reported.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for field in ParameterField::ALL {
            field.check(field.get(self))?;
        }
        Ok(())
    }

    /// Return a copy with one field replaced.
    pub fn with_value(&self, field: ParameterField, value: f64) -> Self {
        let mut next = *self;
        field.set(&mut next, value);
        next
    }

    /// Working inventory replenished each cycle.
    pub fn inventory_amount(&self) -> f64 {
        self.monthly_volume / self.rebalancing_frequency
    }

    /// Fraction of flow that must be rebalanced, in `[0, 1]`.
    ///
    /// Perfectly balanced two-way demand (50 %) needs no rebalancing; fully
    /// one-sided demand rebalances everything.
    pub fn imbalance_factor(&self) -> f64 {
        ((self.demand_imbalance_pct / 100.0) - 0.5).abs() * 2.0
    }

    /// Monthly volume that has to cross the rebalancing rail.
    pub fn rebalanced_volume(&self) -> f64 {
        self.monthly_volume * self.imbalance_factor()
    }

    /// Inventory exposed to FX movement during one rebalancing window.
    pub fn exposed_volume(&self) -> f64 {
        self.inventory_amount() * self.imbalance_factor()
    }

    /// User transactions per month.
    pub fn transaction_count(&self) -> f64 {
        self.monthly_volume / self.average_ticket_size
    }

    /// Transactions originated by first-time users.
    pub fn new_user_transactions(&self) -> f64 {
        self.transaction_count() * self.new_user_rate_pct / 100.0
    }

    /// Fee revenue collected from users per month.
    pub fn revenue(&self) -> f64 {
        revenue_at(self.monthly_volume, self.user_fee_bps)
    }
}

/// Revenue earned on `volume` at a user fee of `fee_bps`.
pub(crate) fn revenue_at(volume: f64, fee_bps: f64) -> f64 {
    volume * fee_bps / 10_000.0
}

/// Rule a field's value must satisfy beyond being finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Constraint {
    NonNegative,
    Positive,
    /// Strictly positive and inside `[min, max]`.
    PositiveWithin(f64, f64),
    AtLeast(f64),
    Percent,
}

/// One named dimension of a [`ParameterSet`].
///
/// Used to address fields generically: sweeps, CLI overrides, random
/// sampling and validation all go through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    AverageTicketSize,
    MonthlyVolume,
    RebalancingFrequency,
    DemandImbalancePct,
    NewUserRatePct,
    FxVolatilityPct,
    TraditionalSettlementHours,
    OptimizedSettlementHours,
    YieldRatePct,
    ReferenceRatePct,
    BankDepositRatePct,
    YieldAllocationPct,
    InternationalWireFee,
    DomesticWireFee,
    LocalWireFee,
    FxSpreadBps,
    ExchangeFeeBps,
    SwapSpreadBps,
    BankNetworkFeePerTx,
    NetworkFeePerTx,
    KycCostPerNewUser,
    OpCostPerTx,
    UserFeeBps,
}

impl ParameterField {
    pub const ALL: [ParameterField; 23] = [
        ParameterField::AverageTicketSize,
        ParameterField::MonthlyVolume,
        ParameterField::RebalancingFrequency,
        ParameterField::DemandImbalancePct,
        ParameterField::NewUserRatePct,
        ParameterField::FxVolatilityPct,
        ParameterField::TraditionalSettlementHours,
        ParameterField::OptimizedSettlementHours,
        ParameterField::YieldRatePct,
        ParameterField::ReferenceRatePct,
        ParameterField::BankDepositRatePct,
        ParameterField::YieldAllocationPct,
        ParameterField::InternationalWireFee,
        ParameterField::DomesticWireFee,
        ParameterField::LocalWireFee,
        ParameterField::FxSpreadBps,
        ParameterField::ExchangeFeeBps,
        ParameterField::SwapSpreadBps,
        ParameterField::BankNetworkFeePerTx,
        ParameterField::NetworkFeePerTx,
        ParameterField::KycCostPerNewUser,
        ParameterField::OpCostPerTx,
        ParameterField::UserFeeBps,
    ];

    /// Stable snake_case name, matching the serialized field name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AverageTicketSize => "average_ticket_size",
            Self::MonthlyVolume => "monthly_volume",
            Self::RebalancingFrequency => "rebalancing_frequency",
            Self::DemandImbalancePct => "demand_imbalance_pct",
            Self::NewUserRatePct => "new_user_rate_pct",
            Self::FxVolatilityPct => "fx_volatility_pct",
            Self::TraditionalSettlementHours => "traditional_settlement_hours",
            Self::OptimizedSettlementHours => "optimized_settlement_hours",
            Self::YieldRatePct => "yield_rate_pct",
            Self::ReferenceRatePct => "reference_rate_pct",
            Self::BankDepositRatePct => "bank_deposit_rate_pct",
            Self::YieldAllocationPct => "yield_allocation_pct",
            Self::InternationalWireFee => "international_wire_fee",
            Self::DomesticWireFee => "domestic_wire_fee",
            Self::LocalWireFee => "local_wire_fee",
            Self::FxSpreadBps => "fx_spread_bps",
            Self::ExchangeFeeBps => "exchange_fee_bps",
            Self::SwapSpreadBps => "swap_spread_bps",
            Self::BankNetworkFeePerTx => "bank_network_fee_per_tx",
            Self::NetworkFeePerTx => "network_fee_per_tx",
            Self::KycCostPerNewUser => "kyc_cost_per_new_user",
            Self::OpCostPerTx => "op_cost_per_tx",
            Self::UserFeeBps => "user_fee_bps",
        }
    }

    pub fn get(&self, params: &ParameterSet) -> f64 {
        match self {
            Self::AverageTicketSize => params.average_ticket_size,
            Self::MonthlyVolume => params.monthly_volume,
            Self::RebalancingFrequency => params.rebalancing_frequency,
            Self::DemandImbalancePct => params.demand_imbalance_pct,
            Self::NewUserRatePct => params.new_user_rate_pct,
            Self::FxVolatilityPct => params.fx_volatility_pct,
            Self::TraditionalSettlementHours => params.traditional_settlement_hours,
            Self::OptimizedSettlementHours => params.optimized_settlement_hours,
            Self::YieldRatePct => params.yield_rate_pct,
            Self::ReferenceRatePct => params.reference_rate_pct,
            Self::BankDepositRatePct => params.bank_deposit_rate_pct,
            Self::YieldAllocationPct => params.yield_allocation_pct,
            Self::InternationalWireFee => params.international_wire_fee,
            Self::DomesticWireFee => params.domestic_wire_fee,
            Self::LocalWireFee => params.local_wire_fee,
            Self::FxSpreadBps => params.fx_spread_bps,
            Self::ExchangeFeeBps => params.exchange_fee_bps,
            Self::SwapSpreadBps => params.swap_spread_bps,
            Self::BankNetworkFeePerTx => params.bank_network_fee_per_tx,
            Self::NetworkFeePerTx => params.network_fee_per_tx,
            Self::KycCostPerNewUser => params.kyc_cost_per_new_user,
            Self::OpCostPerTx => params.op_cost_per_tx,
            Self::UserFeeBps => params.user_fee_bps,
        }
    }

    pub fn set(&self, params: &mut ParameterSet, value: f64) {
        let slot = match self {
            Self::AverageTicketSize => &mut params.average_ticket_size,
            Self::MonthlyVolume => &mut params.monthly_volume,
            Self::RebalancingFrequency => &mut params.rebalancing_frequency,
            Self::DemandImbalancePct => &mut params.demand_imbalance_pct,
            Self::NewUserRatePct => &mut params.new_user_rate_pct,
            Self::FxVolatilityPct => &mut params.fx_volatility_pct,
            Self::TraditionalSettlementHours => &mut params.traditional_settlement_hours,
            Self::OptimizedSettlementHours => &mut params.optimized_settlement_hours,
            Self::YieldRatePct => &mut params.yield_rate_pct,
            Self::ReferenceRatePct => &mut params.reference_rate_pct,
            Self::BankDepositRatePct => &mut params.bank_deposit_rate_pct,
            Self::YieldAllocationPct => &mut params.yield_allocation_pct,
            Self::InternationalWireFee => &mut params.international_wire_fee,
            Self::DomesticWireFee => &mut params.domestic_wire_fee,
            Self::LocalWireFee => &mut params.local_wire_fee,
            Self::FxSpreadBps => &mut params.fx_spread_bps,
            Self::ExchangeFeeBps => &mut params.exchange_fee_bps,
            Self::SwapSpreadBps => &mut params.swap_spread_bps,
            Self::BankNetworkFeePerTx => &mut params.bank_network_fee_per_tx,
            Self::NetworkFeePerTx => &mut params.network_fee_per_tx,
            Self::KycCostPerNewUser => &mut params.kyc_cost_per_new_user,
            Self::OpCostPerTx => &mut params.op_cost_per_tx,
            Self::UserFeeBps => &mut params.user_fee_bps,
        };
        *slot = value;
    }

    /// Slider range suggested to interactive callers, `(min, max)`.
    ///
    /// Advisory only: the engine accepts any value that passes
    /// [`ParameterField::check`].
    pub fn advisory_range(&self) -> (f64, f64) {
        match self {
            Self::AverageTicketSize => (10.0, 2_000.0),
            Self::MonthlyVolume => (10_000.0, 50_000_000.0),
            Self::RebalancingFrequency => (1.0, 30.0),
            Self::DemandImbalancePct => (50.0, 100.0),
            Self::NewUserRatePct => (0.0, 100.0),
            Self::FxVolatilityPct => (1.0, 30.0),
            Self::TraditionalSettlementHours => (4.0, 168.0),
            Self::OptimizedSettlementHours => (MIN_OPTIMIZED_SETTLEMENT_HOURS, 24.0),
            Self::YieldRatePct => (0.0, 15.0),
            Self::ReferenceRatePct => (0.0, 10.0),
            Self::BankDepositRatePct => (0.0, 5.0),
            Self::YieldAllocationPct => (0.0, 100.0),
            Self::InternationalWireFee => (0.0, 75.0),
            Self::DomesticWireFee => (0.0, 50.0),
            Self::LocalWireFee => (0.0, 5.0),
            Self::FxSpreadBps => (0.0, 100.0),
            Self::ExchangeFeeBps => (0.0, 50.0),
            Self::SwapSpreadBps => (0.0, 30.0),
            Self::BankNetworkFeePerTx => (0.0, 1.0),
            Self::NetworkFeePerTx => (0.0, 0.5),
            Self::KycCostPerNewUser => (0.0, 20.0),
            Self::OpCostPerTx => (0.0, 5.0),
            Self::UserFeeBps => (10.0, 500.0),
        }
    }

    fn constraint(&self) -> Constraint {
        match self {
            Self::AverageTicketSize | Self::RebalancingFrequency => Constraint::Positive,
            Self::MonthlyVolume => {
                Constraint::PositiveWithin(MIN_MONTHLY_VOLUME, MAX_MONTHLY_VOLUME)
            }
            Self::OptimizedSettlementHours => Constraint::AtLeast(MIN_OPTIMIZED_SETTLEMENT_HOURS),
            Self::DemandImbalancePct | Self::NewUserRatePct | Self::YieldAllocationPct => {
                Constraint::Percent
            }
            _ => Constraint::NonNegative,
        }
    }

    /// Validate a candidate value for this field.
    pub fn check(&self, value: f64) -> Result<(), ParameterError> {
        let field = self.name();
        if !value.is_finite() {
            return Err(ParameterError::NonFinite { field, value });
        }
        if value < 0.0 {
            return Err(ParameterError::Negative { field, value });
        }
        match self.constraint() {
            Constraint::NonNegative => Ok(()),
            Constraint::Positive if value == 0.0 => {
                Err(ParameterError::NotPositive { field, value })
            }
            Constraint::Positive => Ok(()),
            Constraint::PositiveWithin(..) if value == 0.0 => {
                Err(ParameterError::NotPositive { field, value })
            }
            Constraint::PositiveWithin(minimum, _) if value < minimum => {
                Err(ParameterError::BelowMinimum {
                    field,
                    value,
                    minimum,
                })
            }
            Constraint::PositiveWithin(_, maximum) if value > maximum => {
                Err(ParameterError::AboveMaximum {
                    field,
                    value,
                    maximum,
                })
            }
            Constraint::PositiveWithin(..) => Ok(()),
            Constraint::AtLeast(minimum) if value < minimum => Err(ParameterError::BelowMinimum {
                field,
                value,
                minimum,
            }),
            Constraint::AtLeast(_) => Ok(()),
            Constraint::Percent if value > 100.0 => {
                Err(ParameterError::AbovePercentCap { field, value })
            }
            Constraint::Percent => Ok(()),
        }
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ParameterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown parameter '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ParameterSet::default().validate().is_ok());
    }

    #[test]
    fn test_default_derived_quantities() {
        let p = ParameterSet::default();
        assert_eq!(p.inventory_amount(), 2_500_000.0);
        assert_eq!(p.imbalance_factor(), 1.0);
        assert_eq!(p.exposed_volume(), 2_500_000.0);
        assert_eq!(p.transaction_count(), 400_000.0);
        assert_eq!(p.revenue(), 150_000.0);
    }

    #[test]
    fn test_balanced_demand_needs_no_rebalancing() {
        let p = ParameterSet {
            demand_imbalance_pct: 50.0,
            ..Default::default()
        };
        assert_eq!(p.imbalance_factor(), 0.0);
        assert_eq!(p.rebalanced_volume(), 0.0);
    }

    #[test]
    fn test_zero_volume_rejected() {
        let p = ParameterSet {
            monthly_volume: 0.0,
            ..Default::default()
        };
        assert_eq!(
            p.validate(),
            Err(ParameterError::NotPositive {
                field: "monthly_volume",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let p = ParameterSet {
            fx_volatility_pct: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::NonFinite {
                field: "fx_volatility_pct",
                ..
            })
        ));

        let p = ParameterSet {
            swap_spread_bps: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(ParameterError::NonFinite { .. })));
    }

    #[test]
    fn test_negative_rejected() {
        let p = ParameterSet {
            international_wire_fee: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::Negative {
                field: "international_wire_fee",
                ..
            })
        ));
    }

    #[test]
    fn test_optimized_duration_minimum() {
        let p = ParameterSet {
            optimized_settlement_hours: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::BelowMinimum { minimum, .. })
                if minimum == MIN_OPTIMIZED_SETTLEMENT_HOURS
        ));
    }

    #[test]
    fn test_zero_traditional_duration_is_valid() {
        let p = ParameterSet {
            traditional_settlement_hours: 0.0,
            fx_volatility_pct: 0.0,
            ..Default::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_percent_cap() {
        let p = ParameterSet {
            yield_allocation_pct: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::AbovePercentCap { .. })
        ));
    }

    #[test]
    fn test_with_value_leaves_original_untouched() {
        let base = ParameterSet::default();
        let next = base.with_value(ParameterField::MonthlyVolume, 1_000.0);
        assert_eq!(next.monthly_volume, 1_000.0);
        assert_eq!(base.monthly_volume, 10_000_000.0);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in ParameterField::ALL {
            assert_eq!(field.name().parse::<ParameterField>(), Ok(field));
        }
        assert!("not_a_field".parse::<ParameterField>().is_err());
    }

    #[test]
    fn test_field_names_match_serde() {
        let json = serde_json::to_value(ParameterSet::default()).unwrap();
        for field in ParameterField::ALL {
            assert!(json.get(field.name()).is_some(), "missing {}", field);
        }
    }

    #[test]
    fn test_monthly_volume_bounds() {
        let tiny = ParameterSet {
            monthly_volume: 5e-324,
            ..Default::default()
        };
        assert!(matches!(
            tiny.validate(),
            Err(ParameterError::BelowMinimum {
                field: "monthly_volume",
                ..
            })
        ));

        let huge = ParameterSet {
            monthly_volume: 1e308,
            ..Default::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(ParameterError::AboveMaximum {
                field: "monthly_volume",
                maximum,
                ..
            }) if maximum == MAX_MONTHLY_VOLUME
        ));

        for edge in [MIN_MONTHLY_VOLUME, MAX_MONTHLY_VOLUME] {
            assert!(ParameterField::MonthlyVolume.check(edge).is_ok());
        }
    }

    #[test]
    fn test_unknown_json_field_rejected() {
        let typo = serde_json::from_str::<ParameterSet>(r#"{ "monthly_volum": 500000 }"#);
        let err = typo.unwrap_err().to_string();
        assert!(err.contains("monthly_volum"), "unexpected error: {}", err);
    }

    #[test]
    fn test_missing_json_fields_default() {
        let p: ParameterSet = serde_json::from_str(r#"{ "monthly_volume": 500000 }"#).unwrap();
        assert_eq!(p.monthly_volume, 500_000.0);
        assert_eq!(p.average_ticket_size, 25.0);
    }

    #[test]
    fn test_advisory_ranges_contain_defaults() {
        let p = ParameterSet::default();
        for field in ParameterField::ALL {
            let (lo, hi) = field.advisory_range();
            let v = field.get(&p);
            assert!(v >= lo && v <= hi, "{} = {} outside {}..={}", field, v, lo, hi);
            assert!(field.check(lo).is_ok());
            assert!(field.check(hi).is_ok());
        }
    }
}
