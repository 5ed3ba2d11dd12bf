//! The two rebalancing cost models and the pieces they share.

pub mod breakdown;
pub mod optimized;
pub mod risk;
pub mod traditional;

use crate::core::params::ParameterSet;
use breakdown::{CostBreakdown, RebalancingPath};

/// A rebalancing strategy whose monthly cost is a pure function of the
/// parameter set.
///
/// Implementations assume the parameters have already been validated.
pub trait CostModel {
    const PATH: RebalancingPath;

    fn costs(params: &ParameterSet) -> CostBreakdown;
}
