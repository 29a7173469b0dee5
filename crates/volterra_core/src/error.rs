use thiserror::Error;

/// Validation failures raised before integration starts.
///
/// All inputs are checked once up front; a simulation never fails mid-run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulateError {
    /// A rate parameter is zero, negative, or non-finite.
    #[error("invalid parameter: {name} must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// An initial population is negative or non-finite.
    #[error("invalid state: {name} must be non-negative and finite, got {value}")]
    InvalidState { name: &'static str, value: f64 },

    /// The step size or horizon is zero, negative, or non-finite.
    #[error("invalid step: {name} must be positive and finite, got {value}")]
    InvalidStep { name: &'static str, value: f64 },
}
