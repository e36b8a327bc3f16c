//! Command implementations.

pub mod rate;

pub use rate::run_rate;
