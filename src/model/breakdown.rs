use crate::core::money::to_cents;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which rebalancing strategy a breakdown describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebalancingPath {
    /// Bank wires and an off-chain exchange.
    Traditional,
    /// Tokenized yield instrument plus on-chain DEX settlement.
    Optimized,
}

impl RebalancingPath {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Traditional => "Traditional",
            Self::Optimized => "Stellar-optimized",
        }
    }
}

impl fmt::Display for RebalancingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A named contributor to a path's monthly cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostComponent {
    Kyc,
    Operations,
    DomesticWires,
    InternationalWires,
    LocalWires,
    FxSpread,
    ExchangeFees,
    SwapSpread,
    BankNetworkFees,
    NetworkFees,
    RiskBuffer,
    CostOfCapital,
    YieldIncome,
}

impl CostComponent {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kyc => "KYC/Compliance",
            Self::Operations => "Operations",
            Self::DomesticWires => "Bank Wires",
            Self::InternationalWires => "Int'l Wires",
            Self::LocalWires => "Local Wires",
            Self::FxSpread => "FX Spread",
            Self::ExchangeFees => "Exchange Fees",
            Self::SwapSpread => "DEX Swap Spread",
            Self::BankNetworkFees => "Bank Network Fees",
            Self::NetworkFees => "Network Fees",
            Self::RiskBuffer => "FX Risk Buffer",
            Self::CostOfCapital => "Cost of Capital",
            Self::YieldIncome => "Yield Income",
        }
    }

    /// Income components reduce the total instead of adding to it.
    pub fn is_income(&self) -> bool {
        matches!(self, Self::YieldIncome)
    }
}

/// One line of a cost decomposition. `amount` is always non-negative; use
/// [`LineItem::signed_amount`] to get its contribution to the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub component: CostComponent,
    pub amount: f64,
}

impl LineItem {
    pub fn new(component: CostComponent, amount: f64) -> Self {
        Self { component, amount }
    }

    pub fn signed_amount(&self) -> f64 {
        if self.component.is_income() {
            -self.amount
        } else {
            self.amount
        }
    }
}

/// Monthly cost of running one rebalancing path.
///
/// `capital_cost` and `yield_income` are never both positive: a net
/// opportunity cost lands in the first, net earnings in the second. The
/// total is `direct_costs + capital_cost - yield_income + risk_buffer` and
/// may be negative when yield outweighs everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub path: RebalancingPath,
    /// Deterministic fees: wires, spreads, KYC, operations, network.
    pub direct_costs: f64,
    /// Opportunity cost of inventory earning below the reference rate.
    pub capital_cost: f64,
    /// Earnings of inventory above the reference rate.
    pub yield_income: f64,
    /// FX value-at-risk buffer over the settlement window.
    pub risk_buffer: f64,
    pub total: f64,
    /// Non-zero contributors, direct fees first.
    pub line_items: Vec<LineItem>,
}

impl CostBreakdown {
    /// Assemble a breakdown from its direct fee lines, the signed capital
    /// cost (negative = income) and the risk buffer.
    pub fn assemble(
        path: RebalancingPath,
        direct_items: Vec<LineItem>,
        net_capital_cost: f64,
        risk_buffer: f64,
    ) -> Self {
        let direct_costs: f64 = direct_items.iter().map(|item| item.amount).sum();
        // Comparisons rather than `f64::max`, which would turn NaN into 0.
        let (capital_cost, yield_income) = if net_capital_cost < 0.0 {
            (0.0, -net_capital_cost)
        } else {
            (net_capital_cost, 0.0)
        };
        let risk_buffer = if risk_buffer < 0.0 { 0.0 } else { risk_buffer };
        let total = direct_costs + capital_cost - yield_income + risk_buffer;

        let mut line_items = direct_items;
        line_items.push(LineItem::new(CostComponent::RiskBuffer, risk_buffer));
        line_items.push(LineItem::new(CostComponent::CostOfCapital, capital_cost));
        line_items.push(LineItem::new(CostComponent::YieldIncome, yield_income));
        line_items.retain(|item| item.amount > 0.0);

        Self {
            path,
            direct_costs,
            capital_cost,
            yield_income,
            risk_buffer,
            total,
            line_items,
        }
    }

    /// Capital cost net of yield income; negative means net earnings.
    pub fn net_capital_cost(&self) -> f64 {
        self.capital_cost - self.yield_income
    }

    /// Amount contributed by a single component, zero if absent.
    pub fn component(&self, component: CostComponent) -> f64 {
        self.line_items
            .iter()
            .filter(|item| item.component == component)
            .map(|item| item.amount)
            .sum()
    }

    /// Every field scaled to cost per $100 of monthly volume.
    ///
    /// `monthly_volume` must be strictly positive; the engine guarantees
    /// this for breakdowns it produces.
    pub fn per_100(&self, monthly_volume: f64) -> Per100Breakdown {
        let norm = 100.0 / monthly_volume;
        Per100Breakdown {
            direct_costs: self.direct_costs * norm,
            capital_cost: self.capital_cost * norm,
            yield_income: self.yield_income * norm,
            risk_buffer: self.risk_buffer * norm,
            total: self.total * norm,
        }
    }
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.path)?;
        for item in &self.line_items {
            let sign = if item.component.is_income() { "-" } else { " " };
            writeln!(
                f,
                "  {:<20}{}{:>14}",
                item.component.label(),
                sign,
                to_cents(item.amount)
            )?;
        }
        writeln!(f, "  {:<20} {:>14}", "Direct Costs", to_cents(self.direct_costs))?;
        writeln!(f, "  {:<20} {:>14}", "Total", to_cents(self.total))
    }
}

/// A [`CostBreakdown`] normalized to dollars per $100 of volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Per100Breakdown {
    pub direct_costs: f64,
    pub capital_cost: f64,
    pub yield_income: f64,
    pub risk_buffer: f64,
    pub total: f64,
}
