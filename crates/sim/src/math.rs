//! Exact decimal arithmetic.
//!
//! Every value in the rate model is a [`Fixed`]: a signed 256-bit mantissa
//! with its own number of decimal places, up to [`MAX_SCALE`]. Values are
//! kept with trailing zeros stripped, so equal numbers compare equal
//! field by field.
//!
//! # Rounding
//!
//! Addition, subtraction and multiplication are exact. Only
//! [`Fixed::checked_div`] rounds: quotients are quantized to
//! [`DIVISION_DECIMALS`] places, ties away from zero. [`Fixed::to_scaled`]
//! rounds the same way at the requested scale.
//!
//! ```rust
//! use vir_rs_sim::math::Fixed;
//!
//! let one: Fixed = "1".parse().unwrap();
//! let three = Fixed::from(3u64);
//! let third = one.checked_div(three).unwrap();
//! assert_eq!(third.to_string(), "0.33333333333333333333");
//!
//! // Products keep every digit
//! let product = third.checked_mul(third).unwrap();
//! assert_eq!(product.scale(), 40);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Sign, I256, U256, U512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::error::{Result, SimError};

/// Largest number of decimal places a [`Fixed`] can carry (10^77 < 2^256)
pub const MAX_SCALE: u8 = 77;

/// Decimal places kept by a quotient
pub const DIVISION_DECIMALS: u8 = 20;

/// Decimals of utilization values at the interface (1e5 = 100%)
pub const UTILIZATION_DECIMALS: u8 = 5;

/// Decimals of per-second rates and percentages at the interface (1e18 = 1)
pub const RATE_DECIMALS: u8 = 18;

/// Seconds in a 365-day year
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

const TEN: U256 = U256::from_limbs([10, 0, 0, 0]);

/// Returns 10^exp. `exp` must not exceed [`MAX_SCALE`].
fn pow10(exp: u8) -> U256 {
    TEN.pow(U256::from(exp))
}

/// Returns 10^exp in 512 bits, exact up to 10^154.
fn pow10_wide(exp: u32) -> U512 {
    U512::from(10u64).pow(U512::from(exp))
}

fn widen(value: U256) -> U512 {
    let limbs = value.as_limbs();
    U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

fn narrow(value: U512) -> Option<U256> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|&limb| limb != 0) {
        return None;
    }
    Some(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Divides rounding half away from zero. `den` must be non-zero.
fn div_round_half_up(num: U512, den: U512) -> U512 {
    let (quotient, remainder) = num.div_rem(den);
    if remainder >= den - remainder {
        quotient + U512::from(1u64)
    } else {
        quotient
    }
}

/// Signed exact decimal number.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fixed {
    mantissa: I256,
    scale: u8,
}

impl Fixed {
    /// Zero
    pub const ZERO: Self = Self {
        mantissa: I256::ZERO,
        scale: 0,
    };

    /// One (100% when the value is a fraction)
    pub const ONE: Self = Self {
        mantissa: I256::from_raw(U256::from_limbs([1, 0, 0, 0])),
        scale: 0,
    };

    /// Builds `mantissa * 10^-scale`.
    pub fn from_parts(mantissa: I256, scale: u8) -> Result<Self> {
        Self::from_mantissa(mantissa, scale, "scale conversion")
    }

    /// The mantissa with trailing zeros stripped.
    pub const fn mantissa(self) -> I256 {
        self.mantissa
    }

    /// Decimal places of the mantissa.
    pub const fn scale(self) -> u8 {
        self.scale
    }

    /// Converts an unsigned integer carrying `decimals` implied decimals.
    ///
    /// `Fixed::from_scaled(U256::from(75_000u64), 5)` is `0.75`.
    pub fn from_scaled(value: U256, decimals: u8) -> Result<Self> {
        if decimals > MAX_SCALE {
            return Err(SimError::InvalidScale {
                decimals,
                max: MAX_SCALE,
            });
        }
        Self::normalize(Sign::Positive, value, decimals, "scale conversion")
    }

    /// Rounds to `decimals` implied decimals (half up) and returns the integer.
    ///
    /// Negative values have no unsigned representation and are rejected.
    pub fn to_scaled(self, decimals: u8) -> Result<U256> {
        if decimals > MAX_SCALE {
            return Err(SimError::InvalidScale {
                decimals,
                max: MAX_SCALE,
            });
        }
        if self.is_negative() {
            return Err(SimError::NegativeValue { value: self });
        }
        let abs = self.mantissa.unsigned_abs();
        if decimals >= self.scale {
            return abs
                .checked_mul(pow10(decimals - self.scale))
                .ok_or(SimError::Overflow {
                    operation: "scale conversion",
                });
        }
        let rounded = div_round_half_up(widen(abs), widen(pow10(self.scale - decimals)));
        narrow(rounded).ok_or(SimError::Overflow {
            operation: "scale conversion",
        })
    }

    pub fn is_zero(self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.mantissa.is_negative()
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        let scale = self.scale.max(rhs.scale);
        let lhs = self.mantissa_at(scale, "add")?;
        let rhs = rhs.mantissa_at(scale, "add")?;
        let sum = lhs
            .checked_add(rhs)
            .ok_or(SimError::Overflow { operation: "add" })?;
        Self::from_mantissa(sum, scale, "add")
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        let scale = self.scale.max(rhs.scale);
        let lhs = self.mantissa_at(scale, "sub")?;
        let rhs = rhs.mantissa_at(scale, "sub")?;
        let difference = lhs
            .checked_sub(rhs)
            .ok_or(SimError::Overflow { operation: "sub" })?;
        Self::from_mantissa(difference, scale, "sub")
    }

    /// Multiplies exactly. The decimal places of the operands add up.
    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        let (lhs_sign, lhs_abs) = self.mantissa.into_sign_and_abs();
        let (rhs_sign, rhs_abs) = rhs.mantissa.into_sign_and_abs();
        let product = lhs_abs
            .checked_mul(rhs_abs)
            .ok_or(SimError::Overflow { operation: "mul" })?;
        let scale = self
            .scale
            .checked_add(rhs.scale)
            .ok_or(SimError::Overflow { operation: "mul" })?;
        Self::normalize(product_sign(lhs_sign, rhs_sign), product, scale, "mul")
    }

    /// Divides, rounding to [`DIVISION_DECIMALS`] places half away from zero.
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(SimError::DivisionByZero);
        }
        let overflow = SimError::Overflow { operation: "div" };
        let (lhs_sign, lhs_abs) = self.mantissa.into_sign_and_abs();
        let (rhs_sign, rhs_abs) = rhs.mantissa.into_sign_and_abs();

        // quotient * 10^20 = lhs * 10^(20 + rhs.scale - lhs.scale) / rhs
        let shift = i32::from(DIVISION_DECIMALS) + i32::from(rhs.scale) - i32::from(self.scale);
        let (num, den) = if shift >= 0 {
            let num = widen(lhs_abs)
                .checked_mul(pow10_wide(shift.unsigned_abs()))
                .ok_or(overflow.clone())?;
            (num, widen(rhs_abs))
        } else {
            let den = widen(rhs_abs)
                .checked_mul(pow10_wide(shift.unsigned_abs()))
                .ok_or(overflow.clone())?;
            (widen(lhs_abs), den)
        };
        let quotient = narrow(div_round_half_up(num, den)).ok_or(overflow)?;
        Self::normalize(
            product_sign(lhs_sign, rhs_sign),
            quotient,
            DIVISION_DECIMALS,
            "div",
        )
    }

    /// The mantissa rescaled to `scale` decimal places (`scale >= self.scale`).
    fn mantissa_at(self, scale: u8, operation: &'static str) -> Result<I256> {
        let (sign, abs) = self.mantissa.into_sign_and_abs();
        let abs = abs
            .checked_mul(pow10(scale - self.scale))
            .ok_or(SimError::Overflow { operation })?;
        I256::checked_from_sign_and_abs(sign, abs).ok_or(SimError::Overflow { operation })
    }

    fn from_mantissa(mantissa: I256, scale: u8, operation: &'static str) -> Result<Self> {
        let (sign, abs) = mantissa.into_sign_and_abs();
        Self::normalize(sign, abs, scale, operation)
    }

    /// Strips trailing zeros and checks the result fits.
    fn normalize(
        sign: Sign,
        mut abs: U256,
        mut scale: u8,
        operation: &'static str,
    ) -> Result<Self> {
        while scale > 0 {
            let (quotient, remainder) = abs.div_rem(TEN);
            if !remainder.is_zero() {
                break;
            }
            abs = quotient;
            scale -= 1;
        }
        if scale > MAX_SCALE {
            return Err(SimError::Overflow { operation });
        }
        let mantissa =
            I256::checked_from_sign_and_abs(sign, abs).ok_or(SimError::Overflow { operation })?;
        Ok(Self { mantissa, scale })
    }
}

fn product_sign(lhs: Sign, rhs: Sign) -> Sign {
    if lhs == rhs {
        Sign::Positive
    } else {
        Sign::Negative
    }
}

impl Ord for Fixed {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (negative, _) => {
                // Align both magnitudes to the larger scale; a 256-bit value
                // times 10^77 always fits in 512 bits.
                let scale = self.scale.max(other.scale);
                let lhs = widen(self.mantissa.unsigned_abs()) * widen(pow10(scale - self.scale));
                let rhs =
                    widen(other.mantissa.unsigned_abs()) * widen(pow10(scale - other.scale));
                let ordering = lhs.cmp(&rhs);
                if negative {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        }
    }
}

impl PartialOrd for Fixed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for Fixed {
    fn from(value: u64) -> Self {
        Self {
            mantissa: I256::from_raw(U256::from(value)),
            scale: 0,
        }
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, abs) = self.mantissa.into_sign_and_abs();
        let (integer, fraction) = abs.div_rem(pow10(self.scale));
        if sign == Sign::Negative && !abs.is_zero() {
            write!(f, "-")?;
        }
        write!(f, "{integer}")?;
        if self.scale > 0 {
            write!(
                f,
                ".{:0>width$}",
                fraction.to_string(),
                width = usize::from(self.scale)
            )?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({self})")
    }
}

/// Errors produced when parsing a [`Fixed`] from a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFixedError {
    #[error("empty decimal string")]
    Empty,

    #[error("invalid decimal string: {0}")]
    InvalidDigit(String),

    #[error("too many decimal places: {places} (max {max})")]
    TooManyDecimals { places: usize, max: u8 },

    #[error("decimal value out of range: {0}")]
    OutOfRange(String),
}

impl FromStr for Fixed {
    type Err = ParseFixedError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (sign, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (Sign::Negative, rest),
            None => (Sign::Positive, s),
        };
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if integer.is_empty() && fraction.is_empty() {
            return Err(ParseFixedError::Empty);
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(integer) || !all_digits(fraction) {
            return Err(ParseFixedError::InvalidDigit(s.to_string()));
        }
        let scale = u8::try_from(fraction.len())
            .ok()
            .filter(|&places| places <= MAX_SCALE)
            .ok_or(ParseFixedError::TooManyDecimals {
                places: fraction.len(),
                max: MAX_SCALE,
            })?;

        let out_of_range = || ParseFixedError::OutOfRange(s.to_string());
        let abs = U256::from_str_radix(&format!("{integer}{fraction}"), 10)
            .map_err(|_| out_of_range())?;
        Self::normalize(sign, abs, scale, "parse").map_err(|_| out_of_range())
    }
}

impl Serialize for Fixed {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fixed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
