use crate::core::params::ParameterSet;
use crate::model::breakdown::{CostBreakdown, CostComponent, LineItem, RebalancingPath};
use crate::model::risk::var_buffer;
use crate::model::CostModel;

/// Share of traditional KYC spend still incurred when identity checks are
/// reusable across on-chain anchors.
pub const REUSABLE_KYC_FACTOR: f64 = 0.2;

/// On-chain rebalancing: inventory parked in a tokenized local yield
/// instrument, swapped through a DEX and settled on the network.
///
/// There is no international wire leg. The FX buffer uses the same formula
/// as the traditional path; the much shorter settlement window is the only
/// reason it comes out small.
pub struct OptimizedModel;

impl OptimizedModel {
    /// Monthly yield earned by the inventory: the allocated share earns the
    /// instrument yield, the rest sits at the bank deposit rate.
    pub fn monthly_yield(params: &ParameterSet) -> f64 {
        let inventory = params.inventory_amount();
        let in_instrument = inventory * (params.yield_allocation_pct / 100.0);
        let in_cash = inventory - in_instrument;
        (in_instrument * params.yield_rate_pct + in_cash * params.bank_deposit_rate_pct)
            / 100.0
            / 12.0
    }

    /// Reference-rate opportunity cost minus the yield actually earned.
    /// Negative whenever the inventory out-earns the reference rate.
    pub fn net_capital_cost(params: &ParameterSet) -> f64 {
        params.inventory_amount() * params.reference_rate_pct / 100.0 / 12.0
            - Self::monthly_yield(params)
    }

    /// Residual FX buffer over the on-chain settlement window.
    pub fn risk_buffer(params: &ParameterSet) -> f64 {
        var_buffer(
            params.exposed_volume(),
            params.fx_volatility_pct,
            params.optimized_settlement_hours,
        )
    }

    fn direct_items(params: &ParameterSet) -> Vec<LineItem> {
        let tx_count = params.transaction_count();

        vec![
            LineItem::new(
                CostComponent::Kyc,
                params.kyc_cost_per_new_user * REUSABLE_KYC_FACTOR * params.new_user_transactions(),
            ),
            LineItem::new(CostComponent::Operations, params.op_cost_per_tx * tx_count),
            LineItem::new(
                CostComponent::LocalWires,
                params.local_wire_fee * params.rebalancing_frequency,
            ),
            LineItem::new(
                CostComponent::SwapSpread,
                params.swap_spread_bps / 10_000.0 * params.rebalanced_volume(),
            ),
            LineItem::new(CostComponent::NetworkFees, params.network_fee_per_tx * tx_count),
        ]
    }
}

impl CostModel for OptimizedModel {
    const PATH: RebalancingPath = RebalancingPath::Optimized;

    fn costs(params: &ParameterSet) -> CostBreakdown {
        CostBreakdown::assemble(
            Self::PATH,
            Self::direct_items(params),
            Self::net_capital_cost(params),
            Self::risk_buffer(params),
        )
    }
}
