use crate::analysis::metrics::DerivedMetrics;
use crate::core::error::EngineError;
use crate::core::money::{round_to, to_cents};
use crate::core::params::ParameterSet;
use crate::model::breakdown::{CostBreakdown, Per100Breakdown};
use crate::model::optimized::OptimizedModel;
use crate::model::traditional::TraditionalModel;
use crate::model::CostModel;
use crate::sensitivity::curves::Sensitivities;
use serde::{Deserialize, Serialize};

/// Both breakdowns normalized per $100 of monthly volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Per100Comparison {
    pub traditional: Per100Breakdown,
    pub optimized: Per100Breakdown,
}

/// Cost side of a comparison, without the sensitivity curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComparison {
    pub traditional: CostBreakdown,
    pub optimized: CostBreakdown,
    pub per_100: Per100Comparison,
    pub derived: DerivedMetrics,
}

/// Everything the engine reports for one parameter set.
///
/// A comparison is a snapshot: it holds a copy of the parameters it was
/// computed from and is never updated in place. Recompute on any change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub parameters: ParameterSet,
    pub traditional: CostBreakdown,
    pub optimized: CostBreakdown,
    pub per_100: Per100Comparison,
    pub derived: DerivedMetrics,
    pub sensitivities: Sensitivities,
}

/// Validate `params` and cost both paths, skipping the sensitivity curves.
///
/// Cheaper than [`compute_comparison`] when only the headline numbers are
/// needed, e.g. when sampling many scenarios.
pub fn compare_costs(params: &ParameterSet) -> Result<CostComparison, EngineError> {
    params.validate()?;

    let traditional = TraditionalModel::costs(params);
    let optimized = OptimizedModel::costs(params);
    let derived = DerivedMetrics::compute(params, &traditional, &optimized);
    let per_100 = Per100Comparison {
        traditional: traditional.per_100(params.monthly_volume),
        optimized: optimized.per_100(params.monthly_volume),
    };

    log::debug!(
        "traditional total {:.2}, optimized total {:.2}, net savings {:.2}",
        traditional.total,
        optimized.total,
        derived.net_savings
    );

    let result = CostComparison {
        traditional,
        optimized,
        per_100,
        derived,
    };
    match result.first_non_finite() {
        Some(quantity) => Err(EngineError::NonFiniteResult { quantity }),
        None => Ok(result),
    }
}

impl CostComparison {
    /// Name of the first reported quantity that overflowed, if any.
    ///
    /// Inputs that pass validation can still be large enough for products
    /// like inventory × rate to leave the range of `f64`.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let (t, o, d) = (&self.traditional, &self.optimized, &self.derived);
        let (pt, po) = (&self.per_100.traditional, &self.per_100.optimized);
        let quantities = [
            ("traditional.direct_costs", t.direct_costs),
            ("traditional.capital_cost", t.capital_cost),
            ("traditional.yield_income", t.yield_income),
            ("traditional.risk_buffer", t.risk_buffer),
            ("traditional.total", t.total),
            ("optimized.direct_costs", o.direct_costs),
            ("optimized.capital_cost", o.capital_cost),
            ("optimized.yield_income", o.yield_income),
            ("optimized.risk_buffer", o.risk_buffer),
            ("optimized.total", o.total),
            ("per_100.traditional.direct_costs", pt.direct_costs),
            ("per_100.traditional.capital_cost", pt.capital_cost),
            ("per_100.traditional.yield_income", pt.yield_income),
            ("per_100.traditional.risk_buffer", pt.risk_buffer),
            ("per_100.traditional.total", pt.total),
            ("per_100.optimized.direct_costs", po.direct_costs),
            ("per_100.optimized.capital_cost", po.capital_cost),
            ("per_100.optimized.yield_income", po.yield_income),
            ("per_100.optimized.risk_buffer", po.risk_buffer),
            ("per_100.optimized.total", po.total),
            ("derived.transaction_count", d.transaction_count),
            ("derived.inventory_amount", d.inventory_amount),
            ("derived.net_savings", d.net_savings),
            ("derived.net_margin_per_transaction", d.net_margin_per_transaction),
            ("derived.net_margin_percent", d.net_margin_percent),
            ("derived.risk_reduction_percent", d.risk_reduction_percent),
            ("derived.traditional.profit", d.traditional.profit),
            ("derived.traditional.margin_pct", d.traditional.margin_pct),
            ("derived.traditional.cost_bps", d.traditional.cost_bps),
            ("derived.optimized.profit", d.optimized.profit),
            ("derived.optimized.margin_pct", d.optimized.margin_pct),
            ("derived.optimized.cost_bps", d.optimized.cost_bps),
            ("derived.margin_lift_pct", d.margin_lift_pct),
            ("derived.bps_saved", d.bps_saved),
        ];
        quantities
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }
}

/// Compute the full comparison for one parameter set.
///
/// This is the engine's entry point. It is pure: no I/O, no retained
/// state, and identical input gives bit-identical output. Invalid input is
/// rejected up front; no partial result is returned.
///
/// # Examples
///
/// ```
/// use ramp_economics::analysis::comparison::compute_comparison;
/// use ramp_economics::core::params::ParameterSet;
///
/// let result = compute_comparison(&ParameterSet::default()).unwrap();
/// assert!(result.derived.net_savings > 0.0);
///
/// let broken = ParameterSet { monthly_volume: 0.0, ..Default::default() };
/// assert!(compute_comparison(&broken).is_err());
/// ```
pub fn compute_comparison(params: &ParameterSet) -> Result<Comparison, EngineError> {
    let CostComparison {
        traditional,
        optimized,
        per_100,
        derived,
    } = compare_costs(params)?;
    let sensitivities = Sensitivities::compute(params)?;
    if let Some(quantity) = sensitivities.first_non_finite() {
        return Err(EngineError::NonFiniteResult { quantity });
    }

    if derived.net_savings < 0.0 {
        log::warn!(
            "optimized path costs more than traditional (net savings {:.2})",
            derived.net_savings
        );
    }
    if derived.risk_reduction_percent < 0.0 {
        log::warn!(
            "optimized risk buffer exceeds traditional (risk reduction {:.1}%)",
            derived.risk_reduction_percent
        );
    }

    Ok(Comparison {
        parameters: *params,
        traditional,
        optimized,
        per_100,
        derived,
        sensitivities,
    })
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = &self.derived;
        writeln!(f, "=== Ramp Economics Comparison ===")?;
        writeln!(f, "Monthly Volume:     {}", to_cents(self.parameters.monthly_volume))?;
        writeln!(f, "Transactions:       {:.0}", d.transaction_count)?;
        writeln!(f, "Inventory / Cycle:  {}", to_cents(d.inventory_amount))?;
        writeln!(f)?;
        write!(f, "{}", self.traditional)?;
        write!(f, "{}", self.optimized)?;

        writeln!(f, "\n--- Cost per $100 ---")?;
        writeln!(f, "  {:<16}{:>12}{:>12}", "", "Traditional", "Optimized")?;
        let (t, o) = (&self.per_100.traditional, &self.per_100.optimized);
        let rows = [
            ("Direct", t.direct_costs, o.direct_costs),
            ("Capital", t.capital_cost, o.capital_cost),
            ("Yield Income", t.yield_income, o.yield_income),
            ("Risk Buffer", t.risk_buffer, o.risk_buffer),
            ("Total", t.total, o.total),
        ];
        for (label, traditional, optimized) in rows {
            writeln!(
                f,
                "  {:<16}{:>12}{:>12}",
                label,
                round_to(traditional, 4),
                round_to(optimized, 4)
            )?;
        }

        writeln!(f, "\n--- Headline ---")?;
        writeln!(f, "Net Savings:        {}", to_cents(d.net_savings))?;
        writeln!(f, "Margin / Tx:        {}", round_to(d.net_margin_per_transaction, 4))?;
        writeln!(f, "Margin % of Ticket: {:.3}%", d.net_margin_percent)?;
        writeln!(f, "Risk Reduction:     {:.1}%", d.risk_reduction_percent)?;
        writeln!(
            f,
            "Profit:             {} (traditional) vs {} (optimized)",
            to_cents(d.traditional.profit),
            to_cents(d.optimized.profit)
        )?;
        writeln!(f, "Margin Lift:        {:.1} pts", d.margin_lift_pct)?;
        writeln!(f, "Cost Basis Saved:   {:.1} bps", d.bps_saved)
    }
}
