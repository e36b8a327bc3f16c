//! Rate curve configuration.
//!
//! A [`RateCurveConfig`] is immutable once validated and is shared by
//! reference between the adjuster and the curve evaluator. The interface
//! carries configuration as scaled integers ([`ScaledRateCurveConfig`]):
//! utilizations with 5 decimals, rates and percentages with 18 decimals,
//! the half-life in whole seconds.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::math::{Fixed, RATE_DECIMALS, UTILIZATION_DECIMALS};

/// Configuration of the variable rate model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCurveConfig {
    /// Lower bound of the target utilization band
    pub min_target_util: Fixed,
    /// Upper bound of the target utilization band
    pub max_target_util: Fixed,
    /// Utilization of the first curve vertex
    pub vertex1_util: Fixed,
    /// Utilization of the second curve vertex
    pub vertex2_util: Fixed,
    /// Share of `full - zero` added to the zero rate at the first vertex
    pub vertex1_rate_pct: Fixed,
    /// Share of `full - zero` added to the zero rate at the second vertex
    pub vertex2_rate_pct: Fixed,
    /// Per-second rate at 0% utilization
    pub zero_util_rate: Fixed,
    /// Lower clamp of the full-utilization rate
    pub min_full_util_rate: Fixed,
    /// Upper clamp of the full-utilization rate
    pub max_full_util_rate: Fixed,
    /// Adjustment time constant in seconds
    pub rate_half_life: Fixed,
}

/// Configuration as scaled integers, the way it crosses the process boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledRateCurveConfig {
    /// 1e5 = 100%
    pub min_target_util: U256,
    /// 1e5 = 100%
    pub max_target_util: U256,
    /// 1e5 = 100%
    pub vertex1_util: U256,
    /// 1e5 = 100%
    pub vertex2_util: U256,
    /// 1e18 = 100%
    pub vertex1_rate_pct: U256,
    /// 1e18 = 100%
    pub vertex2_rate_pct: U256,
    /// 1e18 scaled per-second rate
    pub zero_util_rate: U256,
    /// 1e18 scaled per-second rate
    pub min_full_util_rate: U256,
    /// 1e18 scaled per-second rate
    pub max_full_util_rate: U256,
    /// Seconds
    pub rate_half_life: U256,
}

impl RateCurveConfig {
    /// Converts scaled integers and validates the result.
    pub fn from_scaled(scaled: &ScaledRateCurveConfig) -> Result<Self> {
        let util = |value| Fixed::from_scaled(value, UTILIZATION_DECIMALS);
        let rate = |value| Fixed::from_scaled(value, RATE_DECIMALS);

        let config = Self {
            min_target_util: util(scaled.min_target_util)?,
            max_target_util: util(scaled.max_target_util)?,
            vertex1_util: util(scaled.vertex1_util)?,
            vertex2_util: util(scaled.vertex2_util)?,
            vertex1_rate_pct: rate(scaled.vertex1_rate_pct)?,
            vertex2_rate_pct: rate(scaled.vertex2_rate_pct)?,
            zero_util_rate: rate(scaled.zero_util_rate)?,
            min_full_util_rate: rate(scaled.min_full_util_rate)?,
            max_full_util_rate: rate(scaled.max_full_util_rate)?,
            rate_half_life: Fixed::from_scaled(scaled.rate_half_life, 0)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that would divide by zero or describe an
    /// inverted band, inverted vertices or an inverted clamp.
    pub fn validate(&self) -> Result<()> {
        for value in [
            self.min_target_util,
            self.max_target_util,
            self.vertex1_util,
            self.vertex2_util,
            self.vertex1_rate_pct,
            self.vertex2_rate_pct,
            self.zero_util_rate,
            self.min_full_util_rate,
            self.max_full_util_rate,
            self.rate_half_life,
        ] {
            if value.is_negative() {
                return Err(SimError::NegativeValue { value });
            }
        }

        if self.min_target_util.is_zero() {
            return Err(SimError::ZeroMinTargetUtilization);
        }
        if self.max_target_util == Fixed::ONE {
            return Err(SimError::FullMaxTargetUtilization);
        }

        for (field, value) in [
            ("min_target_util", self.min_target_util),
            ("max_target_util", self.max_target_util),
            ("vertex1_util", self.vertex1_util),
            ("vertex2_util", self.vertex2_util),
            ("vertex1_rate_pct", self.vertex1_rate_pct),
            ("vertex2_rate_pct", self.vertex2_rate_pct),
        ] {
            check_fraction(field, value)?;
        }

        if self.max_target_util <= self.min_target_util {
            return Err(SimError::InvalidTargetBand {
                min: self.min_target_util,
                max: self.max_target_util,
            });
        }
        if self.vertex1_util > self.vertex2_util {
            return Err(SimError::InvalidVertexOrder {
                vertex1: self.vertex1_util,
                vertex2: self.vertex2_util,
            });
        }
        if self.vertex1_util == self.vertex2_util {
            return Err(SimError::CoincidentVertices {
                utilization: self.vertex1_util,
            });
        }
        if self.vertex2_util == Fixed::ONE {
            return Err(SimError::VertexAtFullUtilization {
                utilization: self.vertex2_util,
            });
        }
        if self.max_full_util_rate < self.min_full_util_rate {
            return Err(SimError::InvalidFullUtilizationRateBounds {
                min: self.min_full_util_rate,
                max: self.max_full_util_rate,
            });
        }
        if self.rate_half_life.is_zero() {
            return Err(SimError::ZeroRateHalfLife);
        }

        Ok(())
    }
}

/// Fails when a value meant as a fraction lies outside `[0, 1]`.
pub(crate) fn check_fraction(field: &'static str, value: Fixed) -> Result<()> {
    if value.is_negative() {
        return Err(SimError::NegativeValue { value });
    }
    if value > Fixed::ONE {
        return Err(SimError::FractionOutOfRange { field, value });
    }
    Ok(())
}
