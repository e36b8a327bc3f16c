//! Variable Interest Rate Model
//!
//! This crate evaluates one time step of a lending-pool variable interest
//! rate model with exact decimal arithmetic.
//!
//! # Overview
//!
//! Each step:
//! - Adapts the full-utilization rate toward the target utilization band
//!   ([`adjuster`])
//! - Evaluates a three-segment rate curve anchored at that rate ([`curve`])
//!
//! Both stages are pure functions of their inputs and a shared, validated
//! [`RateCurveConfig`]; they hold no state and can be called from any number
//! of threads at once.
//!
//! # Example
//!
//! ```rust
//! use vir_rs_sim::{get_new_rate, Fixed, RateCurveConfig, RateInput};
//!
//! let f = |s: &str| s.parse::<Fixed>().unwrap();
//! let config = RateCurveConfig {
//!     min_target_util: f("0.75"),
//!     max_target_util: f("0.85"),
//!     vertex1_util: f("0.8"),
//!     vertex2_util: f("0.95"),
//!     vertex1_rate_pct: f("0.1"),
//!     vertex2_rate_pct: f("0.2"),
//!     zero_util_rate: f("0.000000000158247046"),
//!     min_full_util_rate: f("0.000000000158247046"),
//!     max_full_util_rate: f("0.000000146248476607"),
//!     rate_half_life: Fixed::from(172_800u64),
//! };
//! config.validate().unwrap();
//!
//! let input = RateInput {
//!     delta_time: Fixed::from(3_600u64),
//!     utilization: f("0.5"),
//!     previous_full_utilization_rate: f("0.000000146090229566"),
//! };
//! let result = get_new_rate(&input, &config).unwrap();
//!
//! // Below the band the full-utilization rate decays
//! assert!(result.full_utilization_rate < input.previous_full_utilization_rate);
//! ```

pub mod adjuster;
pub mod config;
pub mod curve;
pub mod error;
pub mod irm;
pub mod math;

// Re-export commonly used types
pub use error::{Result, SimError};

// Math exports
pub use math::{
    Fixed, ParseFixedError, DIVISION_DECIMALS, MAX_SCALE, RATE_DECIMALS, SECONDS_PER_YEAR,
    UTILIZATION_DECIMALS,
};

// Config exports
pub use config::{RateCurveConfig, ScaledRateCurveConfig};

// Model exports
pub use adjuster::{adjust_full_utilization_rate, BandPosition};
pub use curve::{evaluate_rate_curve, CurvePoint, CurveSegment, RateCurve, SegmentSelector};
pub use irm::{
    get_new_rate, get_new_rate_scaled, RateInput, RateResult, ScaledRateInput, ScaledRateResult,
};
