use crate::core::params::ParameterSet;
use crate::model::breakdown::CostBreakdown;
use serde::{Deserialize, Serialize};

/// Revenue-side view of one path: what the business keeps after costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathEconomics {
    pub revenue: f64,
    /// Revenue minus the path's total cost.
    pub profit: f64,
    /// Profit as a percentage of revenue, zero when there is no revenue.
    pub margin_pct: f64,
    /// Total cost in basis points of monthly volume. Negative when the
    /// path earns more than it spends.
    pub cost_bps: f64,
}

impl PathEconomics {
    pub fn compute(params: &ParameterSet, costs: &CostBreakdown) -> Self {
        let revenue = params.revenue();
        let profit = revenue - costs.total;
        let margin_pct = if revenue > 0.0 {
            profit / revenue * 100.0
        } else {
            0.0
        };
        Self {
            revenue,
            profit,
            margin_pct,
            cost_bps: costs.total / params.monthly_volume * 10_000.0,
        }
    }
}

/// Head-to-head figures derived from both cost breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub transaction_count: f64,
    pub inventory_amount: f64,
    /// Traditional total minus optimized total. Negative when the
    /// optimized path is the more expensive one.
    pub net_savings: f64,
    pub net_margin_per_transaction: f64,
    /// Margin per transaction relative to the average ticket.
    pub net_margin_percent: f64,
    /// Share of the traditional risk buffer removed by the optimized path.
    ///
    /// 100 when the traditional buffer is zero. Not clamped: an optimized
    /// buffer larger than the traditional one yields a negative value.
    pub risk_reduction_percent: f64,
    pub traditional: PathEconomics,
    pub optimized: PathEconomics,
    /// Optimized margin minus traditional margin, in percentage points.
    pub margin_lift_pct: f64,
    /// Traditional cost basis minus optimized cost basis.
    pub bps_saved: f64,
}

impl DerivedMetrics {
    /// Derive metrics from a validated parameter set and its two
    /// breakdowns.
    pub fn compute(
        params: &ParameterSet,
        traditional: &CostBreakdown,
        optimized: &CostBreakdown,
    ) -> Self {
        let transaction_count = params.transaction_count();
        let net_savings = traditional.total - optimized.total;
        let net_margin_per_transaction = net_savings / transaction_count;
        let net_margin_percent = net_margin_per_transaction / params.average_ticket_size * 100.0;

        let risk_reduction_percent = if traditional.risk_buffer > 0.0 {
            (traditional.risk_buffer - optimized.risk_buffer) / traditional.risk_buffer * 100.0
        } else {
            100.0
        };

        if net_savings < 0.0 || risk_reduction_percent < 0.0 {
            log::debug!(
                "optimized path not ahead: net savings {:.2}, risk reduction {:.1}%",
                net_savings,
                risk_reduction_percent
            );
        }

        let trad_econ = PathEconomics::compute(params, traditional);
        let opt_econ = PathEconomics::compute(params, optimized);

        Self {
            transaction_count,
            inventory_amount: params.inventory_amount(),
            net_savings,
            net_margin_per_transaction,
            net_margin_percent,
            risk_reduction_percent,
            traditional: trad_econ,
            optimized: opt_econ,
            margin_lift_pct: opt_econ.margin_pct - trad_econ.margin_pct,
            bps_saved: trad_econ.cost_bps - opt_econ.cost_bps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::optimized::OptimizedModel;
    use crate::model::traditional::TraditionalModel;
    use crate::model::CostModel;
    use approx::assert_relative_eq;

    fn derive(params: &ParameterSet) -> DerivedMetrics {
        let t = TraditionalModel::costs(params);
        let o = OptimizedModel::costs(params);
        DerivedMetrics::compute(params, &t, &o)
    }

    #[test]
    fn test_net_savings_identity() {
        let params = ParameterSet::default();
        let t = TraditionalModel::costs(&params);
        let o = OptimizedModel::costs(&params);
        let m = DerivedMetrics::compute(&params, &t, &o);
        assert_eq!(m.net_savings, t.total - o.total);
    }

    #[test]
    fn test_margin_per_transaction() {
        let params = ParameterSet::default();
        let m = derive(&params);
        assert_eq!(m.transaction_count, 400_000.0);
        assert_relative_eq!(m.net_margin_per_transaction, m.net_savings / 400_000.0);
        assert_relative_eq!(
            m.net_margin_percent,
            m.net_margin_per_transaction / 25.0 * 100.0
        );
    }

    #[test]
    fn test_risk_reduction_is_100_without_baseline_risk() {
        let params = ParameterSet {
            fx_volatility_pct: 0.0,
            ..Default::default()
        };
        assert_eq!(derive(&params).risk_reduction_percent, 100.0);
    }

    #[test]
    fn test_risk_reduction_can_go_negative() {
        let params = ParameterSet {
            traditional_settlement_hours: 1.0,
            optimized_settlement_hours: 4.0,
            ..Default::default()
        };
        let m = derive(&params);
        assert_relative_eq!(m.risk_reduction_percent, -100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_path_economics() {
        let params = ParameterSet::default();
        let t = TraditionalModel::costs(&params);
        let econ = PathEconomics::compute(&params, &t);
        assert_eq!(econ.revenue, 150_000.0);
        assert_relative_eq!(econ.profit, 150_000.0 - t.total);
        assert_relative_eq!(econ.cost_bps, t.total / 10_000_000.0 * 10_000.0);
    }

    #[test]
    fn test_zero_fee_margin_is_zero() {
        let params = ParameterSet {
            user_fee_bps: 0.0,
            ..Default::default()
        };
        let m = derive(&params);
        assert_eq!(m.traditional.margin_pct, 0.0);
        assert_eq!(m.optimized.margin_pct, 0.0);
        assert_eq!(m.margin_lift_pct, 0.0);
    }

    #[test]
    fn test_savings_can_be_negative() {
        // Expensive DEX, cheap fast banks.
        let params = ParameterSet {
            swap_spread_bps: 500.0,
            international_wire_fee: 0.0,
            traditional_settlement_hours: 0.0,
            reference_rate_pct: 0.0,
            yield_rate_pct: 0.0,
            ..Default::default()
        };
        let m = derive(&params);
        assert!(m.net_savings < 0.0);
        assert!(m.bps_saved < 0.0);
    }
}
