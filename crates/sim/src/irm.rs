//! Variable interest rate model step.
//!
//! One evaluation takes the elapsed time, the current utilization and the
//! full-utilization rate carried over from the previous step, and returns
//!
//! 1. the new full-utilization rate from [`adjust_full_utilization_rate`], then
//! 2. the per-second rate from [`evaluate_rate_curve`] anchored at that new rate.
//!
//! Nothing is stored between calls: the caller passes
//! [`RateResult::full_utilization_rate`] back in as the next
//! [`RateInput::previous_full_utilization_rate`].
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::U256;
//! use vir_rs_sim::{get_new_rate_scaled, ScaledRateCurveConfig, ScaledRateInput};
//!
//! let config = ScaledRateCurveConfig {
//!     min_target_util: U256::from(75_000u64),
//!     max_target_util: U256::from(85_000u64),
//!     vertex1_util: U256::from(80_000u64),
//!     vertex2_util: U256::from(95_000u64),
//!     vertex1_rate_pct: U256::from(10_000u64),
//!     vertex2_rate_pct: U256::from(200_000_000_000_000_000u64),
//!     zero_util_rate: U256::from(158_247_046u64),
//!     min_full_util_rate: U256::from(158_247_046u64),
//!     max_full_util_rate: U256::from(146_248_476_607u64),
//!     rate_half_life: U256::from(172_800u64),
//! };
//! let input = ScaledRateInput {
//!     delta_time: U256::from(1_637u64),
//!     utilization: U256::from(86_542u64),
//!     previous_full_utilization_rate: U256::from(146_090_229_566u64),
//! };
//!
//! // 86.542% is above the 85% band ceiling, so the full-utilization rate grows
//! let result = get_new_rate_scaled(&input, &config).unwrap();
//! assert_eq!(result.rate_per_second, U256::from(12_888_683_180u64));
//! assert_eq!(result.full_utilization_rate, U256::from(146_104_855_121u64));
//! ```

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adjuster::adjust_full_utilization_rate;
use crate::config::{check_fraction, RateCurveConfig, ScaledRateCurveConfig};
use crate::curve::evaluate_rate_curve;
use crate::error::{Result, SimError};
use crate::math::{Fixed, RATE_DECIMALS, SECONDS_PER_YEAR, UTILIZATION_DECIMALS};

/// Inputs of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateInput {
    /// Seconds since the previous update
    pub delta_time: Fixed,
    /// Current utilization as a fraction of one
    pub utilization: Fixed,
    /// Full-utilization rate from the previous update (per second)
    pub previous_full_utilization_rate: Fixed,
}

/// Inputs of one evaluation as scaled integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledRateInput {
    /// Seconds
    pub delta_time: U256,
    /// 1e5 = 100%
    pub utilization: U256,
    /// 1e18 scaled per-second rate
    pub previous_full_utilization_rate: U256,
}

impl RateInput {
    /// Converts scaled integers. Utilization above 100% is rejected.
    pub fn from_scaled(scaled: &ScaledRateInput) -> Result<Self> {
        let input = Self {
            delta_time: Fixed::from_scaled(scaled.delta_time, 0)?,
            utilization: Fixed::from_scaled(scaled.utilization, UTILIZATION_DECIMALS)?,
            previous_full_utilization_rate: Fixed::from_scaled(
                scaled.previous_full_utilization_rate,
                RATE_DECIMALS,
            )?,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<()> {
        check_fraction("utilization", self.utilization)?;
        for value in [self.delta_time, self.previous_full_utilization_rate] {
            if value.is_negative() {
                return Err(SimError::NegativeValue { value });
            }
        }
        Ok(())
    }
}

/// Outputs of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateResult {
    /// Instantaneous per-second rate
    pub rate_per_second: Fixed,
    /// Adapted full-utilization rate to carry into the next evaluation
    pub full_utilization_rate: Fixed,
}

/// Outputs of one evaluation scaled by 1e18 and rounded half up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledRateResult {
    pub rate_per_second: U256,
    pub full_utilization_rate: U256,
}

impl RateResult {
    /// Rounds both rates to the 1e18 output scale.
    pub fn to_scaled(self) -> Result<ScaledRateResult> {
        Ok(ScaledRateResult {
            rate_per_second: self.rate_per_second.to_scaled(RATE_DECIMALS)?,
            full_utilization_rate: self.full_utilization_rate.to_scaled(RATE_DECIMALS)?,
        })
    }

    /// Simple (non-compounded) annual rate: `rate_per_second * SECONDS_PER_YEAR`.
    pub fn annualized_rate(self) -> Result<Fixed> {
        annualize(self.rate_per_second)
    }

    /// Simple annual rate of the full-utilization rate.
    pub fn annualized_full_utilization_rate(self) -> Result<Fixed> {
        annualize(self.full_utilization_rate)
    }
}

fn annualize(rate_per_second: Fixed) -> Result<Fixed> {
    rate_per_second.checked_mul(Fixed::from(SECONDS_PER_YEAR))
}

/// Runs one evaluation: adapt the full-utilization rate, then evaluate the curve.
pub fn get_new_rate(input: &RateInput, config: &RateCurveConfig) -> Result<RateResult> {
    input.validate()?;

    let full_utilization_rate = adjust_full_utilization_rate(
        input.delta_time,
        input.utilization,
        input.previous_full_utilization_rate,
        config,
    )?;
    let rate_per_second = evaluate_rate_curve(input.utilization, full_utilization_rate, config)?;

    debug!(
        delta_time = %input.delta_time,
        utilization = %input.utilization,
        %rate_per_second,
        %full_utilization_rate,
        "computed new rate"
    );
    Ok(RateResult {
        rate_per_second,
        full_utilization_rate,
    })
}

/// [`get_new_rate`] on scaled integers, the way the external interface calls it.
pub fn get_new_rate_scaled(
    input: &ScaledRateInput,
    config: &ScaledRateCurveConfig,
) -> Result<ScaledRateResult> {
    let config = RateCurveConfig::from_scaled(config)?;
    let input = RateInput::from_scaled(input)?;
    get_new_rate(&input, &config)?.to_scaled()
}
