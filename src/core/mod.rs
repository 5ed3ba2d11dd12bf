pub mod error;
pub mod money;
pub mod params;
pub mod preset;
