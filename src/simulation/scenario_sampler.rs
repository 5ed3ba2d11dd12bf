//! Random scenario sampling for stress runs.
//!
//! Draws parameter sets uniformly from each field's advisory slider range
//! and summarizes how the two paths compare across them.

use crate::analysis::comparison::compare_costs;
use crate::core::error::EngineError;
use crate::core::params::{ParameterField, ParameterSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for a batch of random scenarios.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Number of scenarios to draw.
    pub count: usize,
    /// Seed for reproducible batches; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Fields to randomize. Everything else keeps the base value.
    pub fields: Vec<ParameterField>,
    /// Values used for fields that are not randomized.
    pub base: ParameterSet,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            count: 1_000,
            seed: None,
            fields: ParameterField::ALL.to_vec(),
            base: ParameterSet::default(),
        }
    }
}

/// Generate random parameter sets within the advisory ranges.
pub fn generate_random_scenarios(config: &SamplerConfig) -> Vec<ParameterSet> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    (0..config.count)
        .map(|_| {
            config.fields.iter().fold(config.base, |params, field| {
                let (lo, hi) = field.advisory_range();
                params.with_value(*field, rng.gen_range(lo..=hi))
            })
        })
        .collect()
}

/// Aggregate outcome of a sampled batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressSummary {
    pub scenarios: usize,
    /// Scenarios where the optimized path is strictly cheaper.
    pub optimized_wins: usize,
    pub mean_net_savings: f64,
    pub min_net_savings: f64,
    pub max_net_savings: f64,
    /// Scenarios whose risk reduction came out negative.
    pub negative_risk_reduction: usize,
    /// Parameters of the scenario with the lowest net savings.
    pub worst_case: Option<ParameterSet>,
}

impl StressSummary {
    pub fn win_rate(&self) -> f64 {
        if self.scenarios == 0 {
            return 0.0;
        }
        self.optimized_wins as f64 / self.scenarios as f64
    }
}

impl std::fmt::Display for StressSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Stress Summary ===")?;
        writeln!(f, "Scenarios:          {}", self.scenarios)?;
        writeln!(
            f,
            "Optimized Wins:     {} ({:.1}%)",
            self.optimized_wins,
            self.win_rate() * 100.0
        )?;
        writeln!(f, "Mean Net Savings:   {:.2}", self.mean_net_savings)?;
        writeln!(f, "Min Net Savings:    {:.2}", self.min_net_savings)?;
        writeln!(f, "Max Net Savings:    {:.2}", self.max_net_savings)?;
        writeln!(f, "Negative Risk Red.: {}", self.negative_risk_reduction)
    }
}

/// Cost every scenario and summarize the results.
pub fn run_stress(scenarios: &[ParameterSet]) -> Result<StressSummary, EngineError> {
    let mut summary = StressSummary {
        scenarios: scenarios.len(),
        optimized_wins: 0,
        mean_net_savings: 0.0,
        min_net_savings: 0.0,
        max_net_savings: 0.0,
        negative_risk_reduction: 0,
        worst_case: None,
    };
    let mut total = 0.0;

    for (i, params) in scenarios.iter().enumerate() {
        let derived = compare_costs(params)?.derived;
        let savings = derived.net_savings;

        if savings > 0.0 {
            summary.optimized_wins += 1;
        }
        if derived.risk_reduction_percent < 0.0 {
            summary.negative_risk_reduction += 1;
        }
        if i == 0 || savings < summary.min_net_savings {
            summary.min_net_savings = savings;
            summary.worst_case = Some(*params);
        }
        if i == 0 || savings > summary.max_net_savings {
            summary.max_net_savings = savings;
        }
        total += savings;
    }

    if !scenarios.is_empty() {
        summary.mean_net_savings = total / scenarios.len() as f64;
    }
    if summary.min_net_savings < 0.0 || summary.negative_risk_reduction > 0 {
        log::warn!(
            "stress run: worst net savings {:.2}, {} scenarios with negative risk reduction",
            summary.min_net_savings,
            summary.negative_risk_reduction
        );
    }
    log::debug!(
        "stress run: {} of {} scenarios favour the optimized path",
        summary.optimized_wins,
        summary.scenarios
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_scenarios_are_valid() {
        let config = SamplerConfig {
            count: 200,
            seed: Some(7),
            ..Default::default()
        };
        let scenarios = generate_random_scenarios(&config);
        assert_eq!(scenarios.len(), 200);
        for params in &scenarios {
            assert!(params.validate().is_ok(), "invalid sample {:?}", params);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let config = SamplerConfig {
            count: 10,
            seed: Some(42),
            ..Default::default()
        };
        assert_eq!(
            generate_random_scenarios(&config),
            generate_random_scenarios(&config)
        );
    }

    #[test]
    fn test_only_selected_fields_vary() {
        let config = SamplerConfig {
            count: 20,
            seed: Some(1),
            fields: vec![ParameterField::FxVolatilityPct],
            ..Default::default()
        };
        let base = ParameterSet::default();
        for params in generate_random_scenarios(&config) {
            assert_eq!(params.monthly_volume, base.monthly_volume);
            assert!(params.fx_volatility_pct >= 1.0 && params.fx_volatility_pct <= 30.0);
        }
    }

    #[test]
    fn test_stress_summary() {
        let config = SamplerConfig {
            count: 100,
            seed: Some(3),
            ..Default::default()
        };
        let summary = run_stress(&generate_random_scenarios(&config)).unwrap();
        assert_eq!(summary.scenarios, 100);
        assert!(summary.min_net_savings <= summary.mean_net_savings);
        assert!(summary.mean_net_savings <= summary.max_net_savings);
        assert!(summary.worst_case.is_some());
        assert!(summary.win_rate() >= 0.0 && summary.win_rate() <= 1.0);
    }

    #[test]
    fn test_losing_batch_is_counted() {
        // Slow on-chain settlement, wide swap spread and no yield: the
        // optimized path loses on cost and on risk in every scenario.
        let losing = ParameterSet {
            optimized_settlement_hours: 200.0,
            swap_spread_bps: 30.0,
            yield_rate_pct: 0.0,
            ..Default::default()
        };
        let summary = run_stress(&[losing; 5]).unwrap();
        assert_eq!(summary.optimized_wins, 0);
        assert_eq!(summary.negative_risk_reduction, 5);
        assert!(summary.max_net_savings < 0.0);
        assert_eq!(summary.worst_case, Some(losing));
    }

    #[test]
    fn test_empty_batch() {
        let summary = run_stress(&[]).unwrap();
        assert_eq!(summary.scenarios, 0);
        assert_eq!(summary.win_rate(), 0.0);
        assert!(summary.worst_case.is_none());
    }
}
