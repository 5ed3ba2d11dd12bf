//! # ramp-economics
//!
//! Unit-economics engine for a currency on/off-ramp.
//!
//! Given a set of business and market parameters, the engine costs two
//! ways of rebalancing the ramp's working inventory and compares them:
//! a traditional bank-wire path and an on-chain path that parks inventory
//! in a tokenized local yield instrument and settles through a DEX.
//!
//! ## Architecture
//!
//! - **core**: Parameter set, presets, validation errors, money rounding
//! - **model**: Traditional and optimized cost models, FX value-at-risk
//! - **analysis**: Derived metrics and the `compute_comparison` entry point
//! - **sensitivity**: Parameter sweeps and the canonical sensitivity curves
//! - **simulation**: Random scenario sampling for stress runs
//!
//! Every computation is a pure function of a caller-owned
//! [`ParameterSet`](core::params::ParameterSet).

pub mod analysis;
pub mod core;
pub mod model;
pub mod sensitivity;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::analysis::comparison::{compare_costs, compute_comparison, Comparison};
    pub use crate::analysis::metrics::DerivedMetrics;
    pub use crate::core::error::{EngineError, ParameterError, SweepError};
    pub use crate::core::params::{ParameterField, ParameterSet};
    pub use crate::core::preset::Preset;
    pub use crate::model::breakdown::{CostBreakdown, RebalancingPath};
    pub use crate::model::risk::VAR_CONFIDENCE_MULTIPLIER;
    pub use crate::sensitivity::sweep::{sweep, SensitivitySeries, SweepRange};
}
