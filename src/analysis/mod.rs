pub mod comparison;
pub mod metrics;
