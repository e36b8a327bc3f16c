//! Three-segment piecewise-linear rate curve.
//!
//! The curve runs through four anchors:
//!
//! ```text
//! rate
//!  ^                                          * full
//!  |                                        /
//!  |                                      /
//!  |                         vertex2 * --
//!  |                 ______-----
//!  |      vertex1 *--
//!  |   __--
//!  * --  zero
//!  +-----------------+-----------+----------+--> utilization
//!  0                 v1          v2         1
//! ```
//!
//! The vertex rates are `zero + (full - zero) * pct`. Segments are tried in
//! order and the first one whose selector matches wins, so a utilization
//! exactly at a vertex always belongs to the segment starting there.

use tracing::debug;

use crate::config::RateCurveConfig;
use crate::error::Result;
use crate::math::Fixed;

/// A point on the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurvePoint {
    pub utilization: Fixed,
    pub rate: Fixed,
}

/// Which utilizations a segment claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSelector {
    /// Utilizations strictly below the bound
    Below(Fixed),
    /// Utilizations at or above the bound
    AtLeast(Fixed),
}

impl SegmentSelector {
    pub fn matches(self, utilization: Fixed) -> bool {
        match self {
            Self::Below(bound) => utilization < bound,
            Self::AtLeast(bound) => utilization >= bound,
        }
    }
}

/// One linear piece of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSegment {
    pub selector: SegmentSelector,
    pub start: CurvePoint,
    pub end: CurvePoint,
}

impl CurveSegment {
    /// Linear interpolation as `start.rate + slope * (utilization - start.utilization)`.
    pub fn interpolate(&self, utilization: Fixed) -> Result<Fixed> {
        let slope = self
            .end
            .rate
            .checked_sub(self.start.rate)?
            .checked_div(self.end.utilization.checked_sub(self.start.utilization)?)?;
        slope
            .checked_mul(utilization.checked_sub(self.start.utilization)?)?
            .checked_add(self.start.rate)
    }
}

/// The curve for a given full-utilization rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateCurve {
    pub segments: [CurveSegment; 3],
    /// Returned when no segment matches; unreachable with a validated config
    pub fallback: Fixed,
}

impl RateCurve {
    /// Builds the segment list anchored at `full_utilization_rate`.
    pub fn new(full_utilization_rate: Fixed, config: &RateCurveConfig) -> Result<Self> {
        let zero = config.zero_util_rate;
        let span = full_utilization_rate.checked_sub(zero)?;
        let vertex1_rate = span.checked_mul(config.vertex1_rate_pct)?.checked_add(zero)?;
        let vertex2_rate = span.checked_mul(config.vertex2_rate_pct)?.checked_add(zero)?;

        let origin = CurvePoint {
            utilization: Fixed::ZERO,
            rate: zero,
        };
        let vertex1 = CurvePoint {
            utilization: config.vertex1_util,
            rate: vertex1_rate,
        };
        let vertex2 = CurvePoint {
            utilization: config.vertex2_util,
            rate: vertex2_rate,
        };
        let full = CurvePoint {
            utilization: Fixed::ONE,
            rate: full_utilization_rate,
        };

        Ok(Self {
            segments: [
                CurveSegment {
                    selector: SegmentSelector::Below(config.vertex1_util),
                    start: origin,
                    end: vertex1,
                },
                CurveSegment {
                    selector: SegmentSelector::Below(config.vertex2_util),
                    start: vertex1,
                    end: vertex2,
                },
                CurveSegment {
                    selector: SegmentSelector::AtLeast(config.vertex2_util),
                    start: vertex2,
                    end: full,
                },
            ],
            fallback: vertex1_rate,
        })
    }

    /// Index of the first segment claiming `utilization`, if any.
    pub fn segment_index(&self, utilization: Fixed) -> Option<usize> {
        self.segments
            .iter()
            .position(|segment| segment.selector.matches(utilization))
    }

    /// Rate at `utilization`.
    pub fn rate_at(&self, utilization: Fixed) -> Result<Fixed> {
        match self.segment_index(utilization) {
            Some(index) => {
                let rate = self.segments[index].interpolate(utilization)?;
                debug!(segment = index + 1, %utilization, %rate, "evaluated rate curve");
                Ok(rate)
            }
            None => Ok(self.fallback),
        }
    }
}

/// Per-second rate at `utilization` for a curve anchored at `full_utilization_rate`.
pub fn evaluate_rate_curve(
    utilization: Fixed,
    full_utilization_rate: Fixed,
    config: &RateCurveConfig,
) -> Result<Fixed> {
    RateCurve::new(full_utilization_rate, config)?.rate_at(utilization)
}
