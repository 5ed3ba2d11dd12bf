//! Sensitivity sweeps: re-run the cost formulas while one input varies.

pub mod curves;
pub mod sweep;
