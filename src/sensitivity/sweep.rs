use crate::core::error::SweepError;
use crate::core::params::{ParameterField, ParameterSet};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of points a single sweep may produce.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Slack allowed when deciding whether `end` is reached, in units of
/// `step`. Absorbs float error in ranges like `0.0..=15.0` step `0.5`.
const STEP_TOLERANCE: f64 = 1e-9;

/// An inclusive `start..=end` range walked in fixed `step` increments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl SweepRange {
    pub const fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Swept values, computed as `start + i × step` so that error does not
    /// accumulate along the range.
    pub fn values(&self) -> Result<Vec<f64>, SweepError> {
        let invalid = |reason| SweepError::InvalidRange {
            start: self.start,
            end: self.end,
            step: self.step,
            reason,
        };
        if !(self.start.is_finite() && self.end.is_finite() && self.step.is_finite()) {
            return Err(invalid("bounds and step must be finite"));
        }
        if self.step <= 0.0 {
            return Err(invalid("step must be positive"));
        }
        if self.end < self.start {
            return Err(invalid("end must not precede start"));
        }

        let span = (self.end - self.start) / self.step + STEP_TOLERANCE;
        if span >= MAX_SWEEP_POINTS as f64 {
            return Err(SweepError::TooManyPoints {
                points: span.min(usize::MAX as f64) as usize + 1,
                limit: MAX_SWEEP_POINTS,
            });
        }
        let count = span.floor() as usize + 1;

        Ok((0..count)
            .map(|i| self.start + i as f64 * self.step)
            .collect())
    }
}

/// Ordered results of sweeping one parameter with all others held fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivitySeries<T> {
    pub field: ParameterField,
    pub range: SweepRange,
    pub points: Vec<T>,
}

impl<T> SensitivitySeries<T> {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Re-evaluate `metric` at every value of `range` substituted into `field`.
///
/// Each swept parameter set is validated before `metric` sees it, so the
/// closure can rely on the same guarantees as the main engine. The first
/// invalid swept value aborts the sweep.
///
/// # Examples
///
/// ```
/// use ramp_economics::core::params::{ParameterField, ParameterSet};
/// use ramp_economics::sensitivity::sweep::{sweep, SweepRange};
///
/// let series = sweep(
///     &ParameterSet::default(),
///     ParameterField::UserFeeBps,
///     SweepRange::new(50.0, 150.0, 50.0),
///     |fee, p| (fee, p.revenue()),
/// )
/// .unwrap();
/// assert_eq!(series.points, vec![(50.0, 50_000.0), (100.0, 100_000.0), (150.0, 150_000.0)]);
/// ```
pub fn sweep<T, F>(
    params: &ParameterSet,
    field: ParameterField,
    range: SweepRange,
    mut metric: F,
) -> Result<SensitivitySeries<T>, SweepError>
where
    F: FnMut(f64, &ParameterSet) -> T,
{
    let values = range.values()?;
    log::trace!(
        "sweeping {} over {} points ({}..={} step {})",
        field,
        values.len(),
        range.start,
        range.end,
        range.step
    );

    let mut points = Vec::with_capacity(values.len());
    for value in values {
        let swept = params.with_value(field, value);
        swept
            .validate()
            .map_err(|source| SweepError::Parameter { value, source })?;
        points.push(metric(value, &swept));
    }

    Ok(SensitivitySeries {
        field,
        range,
        points,
    })
}
