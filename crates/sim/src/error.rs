//! Error types for the rate model.

use thiserror::Error;

use crate::math::Fixed;

/// Errors that can occur while validating a configuration or evaluating a step
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The lower bound of the target band is zero, which would divide by zero
    #[error("Minimum target utilization must be greater than zero")]
    ZeroMinTargetUtilization,

    /// The upper bound of the target band is 100%, which would divide by zero
    #[error("Maximum target utilization must be below 100%")]
    FullMaxTargetUtilization,

    /// The target band is empty or inverted
    #[error("Invalid target utilization band: max {max} must be greater than min {min}")]
    InvalidTargetBand { min: Fixed, max: Fixed },

    /// The full-utilization rate clamp is inverted
    #[error("Invalid full utilization rate bounds: max {max} is below min {min}")]
    InvalidFullUtilizationRateBounds { min: Fixed, max: Fixed },

    /// Vertices are out of order
    #[error("Invalid vertex order: vertex1 {vertex1} is above vertex2 {vertex2}")]
    InvalidVertexOrder { vertex1: Fixed, vertex2: Fixed },

    /// Both vertices sit at the same utilization
    #[error("Vertex utilizations coincide at {utilization}")]
    CoincidentVertices { utilization: Fixed },

    /// The second vertex leaves no room for the last curve segment
    #[error("Vertex2 utilization {utilization} must be below 100%")]
    VertexAtFullUtilization { utilization: Fixed },

    /// A value that must be a fraction of one is larger than one
    #[error("{field} must be at most 1, got {value}")]
    FractionOutOfRange { field: &'static str, value: Fixed },

    /// Half-life of zero would divide by zero
    #[error("Rate half-life must be greater than zero")]
    ZeroRateHalfLife,

    /// Scaled integer input uses more decimals than a mantissa can carry
    #[error("Unsupported scale: {decimals} decimals (max {max})")]
    InvalidScale { decimals: u8, max: u8 },

    /// An intermediate value left the 256-bit range
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// A negative value cannot be expressed as an unsigned output
    #[error("Negative value {value} cannot be converted to an unsigned integer")]
    NegativeValue { value: Fixed },
}

/// Result type alias for rate model operations.
pub type Result<T> = std::result::Result<T, SimError>;
