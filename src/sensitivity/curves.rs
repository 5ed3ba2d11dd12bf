//! The four canonical sensitivity curves shown next to the comparison.

use crate::core::error::SweepError;
use crate::core::params::{revenue_at, ParameterField, ParameterSet};
use crate::model::optimized::OptimizedModel;
use crate::model::traditional::TraditionalModel;
use crate::model::CostModel;
use crate::sensitivity::sweep::{sweep, SensitivitySeries, SweepRange};
use serde::{Deserialize, Serialize};

/// Bank settlement windows from one hour to one week.
pub const SETTLEMENT_HOURS_RANGE: SweepRange = SweepRange::new(1.0, 168.0, 1.0);
/// User fees from 25 to 400 bps.
pub const USER_FEE_RANGE: SweepRange = SweepRange::new(25.0, 400.0, 25.0);
/// Instrument yields from 0 to 15 %.
pub const YIELD_RATE_RANGE: SweepRange = SweepRange::new(0.0, 15.0, 0.5);

/// Monthly volume from 5 % to 200 % of `current`, in 5 % steps.
pub fn volume_range(current: f64) -> SweepRange {
    SweepRange::new(current * 0.05, current * 2.0, current * 0.05)
}

/// Breakeven user fee and FX buffer at one bank settlement duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationPoint {
    pub duration_hours: f64,
    /// User fee, in bps, at which the traditional path breaks even.
    pub traditional_fee_bps: f64,
    /// Breakeven fee of the optimized path, which keeps its own window.
    pub optimized_fee_bps: f64,
    pub traditional_risk: f64,
    pub optimized_risk: f64,
}

/// Profit of both paths at one user fee level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeePoint {
    pub fee_bps: f64,
    pub traditional_profit: f64,
    pub optimized_profit: f64,
}

/// Profit of both paths at one monthly volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub monthly_volume: f64,
    pub traditional_profit: f64,
    pub optimized_profit: f64,
}

/// Optimized cost of capital at one instrument yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldPoint {
    pub yield_rate_pct: f64,
    /// Net cost of capital of the optimized inventory; negative is income.
    pub cost_of_capital: f64,
    /// Income part of `cost_of_capital`, zero while it is still a cost.
    pub income: f64,
    /// Traditional net cost of capital, unaffected by the yield.
    pub traditional_cost_of_capital: f64,
}

fn breakeven_bps(total: f64, monthly_volume: f64) -> f64 {
    total / monthly_volume * 10_000.0
}

/// Sweep the bank settlement duration and report what fee each path needs
/// to break even.
///
/// Only the traditional window moves; the optimized path stays at its own
/// configured duration, so its curve is flat.
pub fn settlement_duration(
    params: &ParameterSet,
    range: SweepRange,
) -> Result<SensitivitySeries<DurationPoint>, SweepError> {
    let optimized = OptimizedModel::costs(params);
    let optimized_fee_bps = breakeven_bps(optimized.total, params.monthly_volume);

    sweep(
        params,
        ParameterField::TraditionalSettlementHours,
        range,
        |hours, swept| {
            let traditional = TraditionalModel::costs(swept);
            DurationPoint {
                duration_hours: hours,
                traditional_fee_bps: breakeven_bps(traditional.total, swept.monthly_volume),
                optimized_fee_bps,
                traditional_risk: traditional.risk_buffer,
                optimized_risk: optimized.risk_buffer,
            }
        },
    )
}

/// Sweep the user fee; costs do not depend on it, only revenue does.
pub fn user_fee(
    params: &ParameterSet,
    range: SweepRange,
) -> Result<SensitivitySeries<FeePoint>, SweepError> {
    let traditional_total = TraditionalModel::costs(params).total;
    let optimized_total = OptimizedModel::costs(params).total;

    sweep(params, ParameterField::UserFeeBps, range, |fee, swept| {
        let revenue = revenue_at(swept.monthly_volume, fee);
        FeePoint {
            fee_bps: fee,
            traditional_profit: revenue - traditional_total,
            optimized_profit: revenue - optimized_total,
        }
    })
}

/// Sweep monthly volume, scaling the current costs in proportion to the
/// volume ratio rather than re-deriving fixed per-cycle fees.
///
/// Only revenue and scaled totals are evaluated, so points are not
/// re-validated: the curve may run past the accepted volume bounds, e.g.
/// up to twice [`MAX_MONTHLY_VOLUME`](crate::core::params::MAX_MONTHLY_VOLUME).
pub fn monthly_volume(
    params: &ParameterSet,
    range: SweepRange,
) -> Result<SensitivitySeries<VolumePoint>, SweepError> {
    let traditional_total = TraditionalModel::costs(params).total;
    let optimized_total = OptimizedModel::costs(params).total;
    let base_volume = params.monthly_volume;

    let points = range
        .values()?
        .into_iter()
        .map(|volume| {
            let ratio = volume / base_volume;
            let revenue = revenue_at(volume, params.user_fee_bps);
            VolumePoint {
                monthly_volume: volume,
                traditional_profit: revenue - traditional_total * ratio,
                optimized_profit: revenue - optimized_total * ratio,
            }
        })
        .collect();

    Ok(SensitivitySeries {
        field: ParameterField::MonthlyVolume,
        range,
        points,
    })
}

/// Sweep the instrument yield to find where holding it turns from a cost
/// into income.
pub fn yield_rate(
    params: &ParameterSet,
    range: SweepRange,
) -> Result<SensitivitySeries<YieldPoint>, SweepError> {
    let traditional_cost_of_capital = TraditionalModel::net_capital_cost(params);

    sweep(params, ParameterField::YieldRatePct, range, |rate, swept| {
        let cost_of_capital = OptimizedModel::net_capital_cost(swept);
        YieldPoint {
            yield_rate_pct: rate,
            cost_of_capital,
            income: (-cost_of_capital).max(0.0),
            traditional_cost_of_capital,
        }
    })
}

/// All four canonical curves over their default ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensitivities {
    pub settlement_duration: SensitivitySeries<DurationPoint>,
    pub user_fee: SensitivitySeries<FeePoint>,
    pub monthly_volume: SensitivitySeries<VolumePoint>,
    pub yield_rate: SensitivitySeries<YieldPoint>,
}

impl Sensitivities {
    /// Name of the first curve holding a non-finite value, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let duration = self.settlement_duration.points.iter().all(|p| {
            [
                p.traditional_fee_bps,
                p.optimized_fee_bps,
                p.traditional_risk,
                p.optimized_risk,
            ]
            .iter()
            .all(|v| v.is_finite())
        });
        let fee = self
            .user_fee
            .points
            .iter()
            .all(|p| p.traditional_profit.is_finite() && p.optimized_profit.is_finite());
        let volume = self
            .monthly_volume
            .points
            .iter()
            .all(|p| p.traditional_profit.is_finite() && p.optimized_profit.is_finite());
        let yield_rate = self.yield_rate.points.iter().all(|p| {
            p.cost_of_capital.is_finite() && p.traditional_cost_of_capital.is_finite()
        });

        [
            ("sensitivities.settlement_duration", duration),
            ("sensitivities.user_fee", fee),
            ("sensitivities.monthly_volume", volume),
            ("sensitivities.yield_rate", yield_rate),
        ]
        .into_iter()
        .find(|(_, finite)| !finite)
        .map(|(name, _)| name)
    }

    pub fn compute(params: &ParameterSet) -> Result<Self, SweepError> {
        Ok(Self {
            settlement_duration: settlement_duration(params, SETTLEMENT_HOURS_RANGE)?,
            user_fee: user_fee(params, USER_FEE_RANGE)?,
            monthly_volume: monthly_volume(params, volume_range(params.monthly_volume))?,
            yield_rate: yield_rate(params, YIELD_RATE_RANGE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_canonical_lengths() {
        let s = Sensitivities::compute(&ParameterSet::default()).unwrap();
        assert_eq!(s.settlement_duration.len(), 168);
        assert_eq!(s.user_fee.len(), 16);
        assert_eq!(s.monthly_volume.len(), 40);
        assert_eq!(s.yield_rate.len(), 31);
    }

    #[test]
    fn test_duration_curve_monotone_and_optimized_flat() {
        let params = ParameterSet::default();
        let series = settlement_duration(&params, SETTLEMENT_HOURS_RANGE).unwrap();
        for pair in series.points.windows(2) {
            assert!(pair[1].traditional_risk >= pair[0].traditional_risk);
            assert!(pair[1].traditional_fee_bps >= pair[0].traditional_fee_bps);
            assert_eq!(pair[1].optimized_fee_bps, pair[0].optimized_fee_bps);
        }
        for point in &series.points {
            assert!(point.optimized_risk < point.traditional_risk);
        }
    }

    #[test]
    fn test_duration_point_matches_model() {
        let params = ParameterSet::default();
        let series = settlement_duration(&params, SweepRange::new(48.0, 48.0, 1.0)).unwrap();
        let t = TraditionalModel::costs(&params);
        assert_relative_eq!(series.points[0].traditional_risk, t.risk_buffer);
        assert_relative_eq!(
            series.points[0].traditional_fee_bps,
            t.total / params.monthly_volume * 10_000.0
        );
    }

    #[test]
    fn test_fee_curve_is_linear_in_fee() {
        let params = ParameterSet::default();
        let series = user_fee(&params, USER_FEE_RANGE).unwrap();
        let first = series.points[0];
        let second = series.points[1];
        // Each 25 bps step adds 25 bps of revenue on $10M.
        assert_relative_eq!(
            second.traditional_profit - first.traditional_profit,
            25_000.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            second.optimized_profit - first.optimized_profit,
            25_000.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_volume_curve_at_current_volume_matches_profit() {
        let params = ParameterSet::default();
        let series = monthly_volume(&params, volume_range(params.monthly_volume)).unwrap();
        let at_current = series
            .points
            .iter()
            .find(|p| (p.monthly_volume - params.monthly_volume).abs() < 1e-6)
            .unwrap();
        let t = TraditionalModel::costs(&params);
        assert_relative_eq!(
            at_current.traditional_profit,
            params.revenue() - t.total,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_yield_crossover_at_reference_rate() {
        let params = ParameterSet {
            reference_rate_pct: 5.0,
            ..Default::default()
        };
        let series = yield_rate(&params, YIELD_RATE_RANGE).unwrap();
        for point in &series.points {
            if point.yield_rate_pct < 5.0 {
                assert!(point.cost_of_capital > 0.0);
                assert_eq!(point.income, 0.0);
            } else if point.yield_rate_pct > 5.0 {
                assert!(point.cost_of_capital < 0.0);
                assert!(point.income > 0.0);
            }
        }
    }

    #[test]
    fn test_volume_curve_at_volume_bounds() {
        use crate::core::params::{MAX_MONTHLY_VOLUME, MIN_MONTHLY_VOLUME};

        for volume in [MIN_MONTHLY_VOLUME, MAX_MONTHLY_VOLUME] {
            let params = ParameterSet {
                monthly_volume: volume,
                ..Default::default()
            };
            let series = monthly_volume(&params, volume_range(volume)).unwrap();
            assert_eq!(series.len(), 40);
            assert!(series.points.iter().all(|p| p.monthly_volume > 0.0));
            assert!(series.points.last().unwrap().monthly_volume.is_finite());
        }
    }

    #[test]
    fn test_default_curves_are_finite() {
        let s = Sensitivities::compute(&ParameterSet::default()).unwrap();
        assert_eq!(s.first_non_finite(), None);
    }

    #[test]
    fn test_invalid_range_propagates() {
        let params = ParameterSet::default();
        assert!(settlement_duration(&params, SweepRange::new(10.0, 1.0, 1.0)).is_err());
    }
}
