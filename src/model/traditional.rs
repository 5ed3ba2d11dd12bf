use crate::core::params::ParameterSet;
use crate::model::breakdown::{CostBreakdown, CostComponent, LineItem, RebalancingPath};
use crate::model::risk::var_buffer;
use crate::model::CostModel;

/// Bank-wire rebalancing: domestic and international wires each cycle, an
/// off-chain exchange charging spread and fees on rebalanced volume, and
/// inventory idling in a bank account while the wire settles.
pub struct TraditionalModel;

impl TraditionalModel {
    /// Monthly opportunity cost of inventory earning the deposit rate
    /// instead of the reference rate. Negative when deposits pay more.
    pub fn net_capital_cost(params: &ParameterSet) -> f64 {
        params.inventory_amount()
            * (params.reference_rate_pct - params.bank_deposit_rate_pct)
            / 100.0
            / 12.0
    }

    /// FX buffer for one bank-wire settlement window.
    pub fn risk_buffer(params: &ParameterSet) -> f64 {
        var_buffer(
            params.exposed_volume(),
            params.fx_volatility_pct,
            params.traditional_settlement_hours,
        )
    }

    fn direct_items(params: &ParameterSet) -> Vec<LineItem> {
        let cycles = params.rebalancing_frequency;
        let rebalanced = params.rebalanced_volume();
        let tx_count = params.transaction_count();

        vec![
            LineItem::new(
                CostComponent::Kyc,
                params.kyc_cost_per_new_user * params.new_user_transactions(),
            ),
            LineItem::new(CostComponent::Operations, params.op_cost_per_tx * tx_count),
            LineItem::new(CostComponent::DomesticWires, params.domestic_wire_fee * cycles),
            LineItem::new(
                CostComponent::InternationalWires,
                params.international_wire_fee * cycles,
            ),
            LineItem::new(
                CostComponent::FxSpread,
                params.fx_spread_bps / 10_000.0 * rebalanced,
            ),
            LineItem::new(
                CostComponent::ExchangeFees,
                params.exchange_fee_bps / 10_000.0 * rebalanced,
            ),
            LineItem::new(
                CostComponent::BankNetworkFees,
                params.bank_network_fee_per_tx * tx_count,
            ),
        ]
    }
}

impl CostModel for TraditionalModel {
    const PATH: RebalancingPath = RebalancingPath::Traditional;

    fn costs(params: &ParameterSet) -> CostBreakdown {
        CostBreakdown::assemble(
            Self::PATH,
            Self::direct_items(params),
            Self::net_capital_cost(params),
            Self::risk_buffer(params),
        )
    }
}
