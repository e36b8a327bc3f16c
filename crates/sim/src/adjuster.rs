//! Full-utilization rate adaptation.
//!
//! Outside the target band the full-utilization rate relaxes over time:
//!
//! ```text
//! u < min_target:  delta  = (min_target - u) / min_target
//!                  growth = half_life + delta^2 * dt
//!                  rate'  = rate * half_life / growth      (decay)
//!
//! u > max_target:  delta  = (u - max_target) / (1 - max_target)
//!                  growth = half_life + delta^2 * dt
//!                  rate'  = rate * growth / half_life      (growth)
//! ```
//!
//! Inside the band (bounds included) the rate is carried over unchanged.
//! The result is always clamped to `[min_full_util_rate, max_full_util_rate]`.

use tracing::{debug, trace};

use crate::config::RateCurveConfig;
use crate::error::Result;
use crate::math::Fixed;

/// Position of a utilization relative to the target band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPosition {
    /// Below `min_target_util`: the rate decays
    Below,
    /// Within the band: the rate is kept
    Inside,
    /// Above `max_target_util`: the rate grows
    Above,
}

impl BandPosition {
    /// Classifies `utilization`. The lower bound is checked first.
    pub fn of(utilization: Fixed, config: &RateCurveConfig) -> Self {
        if utilization < config.min_target_util {
            Self::Below
        } else if utilization > config.max_target_util {
            Self::Above
        } else {
            Self::Inside
        }
    }
}

/// `half_life + delta^2 * dt`
fn decay_growth(delta: Fixed, delta_time: Fixed, half_life: Fixed) -> Result<Fixed> {
    let weighted = delta.checked_mul(delta)?.checked_mul(delta_time)?;
    half_life.checked_add(weighted)
}

/// Computes the full-utilization rate after `delta_time` seconds at `utilization`.
///
/// # Arguments
///
/// * `delta_time` - Seconds elapsed since the previous update
/// * `utilization` - Current utilization as a fraction of one
/// * `previous_rate` - Full-utilization rate carried from the previous update
/// * `config` - Validated model configuration
///
/// # Example
///
/// ```rust
/// use vir_rs_sim::{adjust_full_utilization_rate, Fixed, RateCurveConfig};
///
/// let f = |s: &str| s.parse::<Fixed>().unwrap();
/// let config = RateCurveConfig {
///     min_target_util: f("0.8"),
///     max_target_util: f("0.9"),
///     vertex1_util: f("0.5"),
///     vertex2_util: f("0.75"),
///     vertex1_rate_pct: f("0.25"),
///     vertex2_rate_pct: f("0.5"),
///     zero_util_rate: Fixed::ZERO,
///     min_full_util_rate: f("0.01"),
///     max_full_util_rate: f("100"),
///     rate_half_life: Fixed::from(100u64),
/// };
///
/// // 40% utilization is half-way to zero from the 80% floor: delta = 0.5,
/// // so 400 seconds double the denominator and halve the rate.
/// let rate = adjust_full_utilization_rate(Fixed::from(400u64), f("0.4"), f("1"), &config).unwrap();
/// assert_eq!(rate, f("0.5"));
/// ```
pub fn adjust_full_utilization_rate(
    delta_time: Fixed,
    utilization: Fixed,
    previous_rate: Fixed,
    config: &RateCurveConfig,
) -> Result<Fixed> {
    let half_life = config.rate_half_life;

    let position = BandPosition::of(utilization, config);
    let candidate = match position {
        BandPosition::Below => {
            let delta = config
                .min_target_util
                .checked_sub(utilization)?
                .checked_div(config.min_target_util)?;
            let growth = decay_growth(delta, delta_time, half_life)?;
            trace!(%delta, %growth, "decaying full utilization rate");
            previous_rate.checked_mul(half_life)?.checked_div(growth)?
        }
        BandPosition::Above => {
            let delta = utilization
                .checked_sub(config.max_target_util)?
                .checked_div(Fixed::ONE.checked_sub(config.max_target_util)?)?;
            let growth = decay_growth(delta, delta_time, half_life)?;
            trace!(%delta, %growth, "growing full utilization rate");
            previous_rate.checked_mul(growth)?.checked_div(half_life)?
        }
        BandPosition::Inside => previous_rate,
    };

    let clamped = config
        .min_full_util_rate
        .max(config.max_full_util_rate.min(candidate));
    debug!(
        ?position,
        %previous_rate,
        %candidate,
        %clamped,
        "adjusted full utilization rate"
    );
    Ok(clamped)
}
