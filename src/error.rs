// src/error.rs

use thiserror::Error;

/// Input-validation failures. All validation happens at the entry points
/// (`CoilGeometry::new`, the filter calculators); no error crosses into the
/// numeric core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

/// Check that a parameter is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f64) -> Result<f64, InvalidInput> {
    if !value.is_finite() {
        return Err(InvalidInput::NonFinite { name, value });
    }
    if value <= 0.0 {
        return Err(InvalidInput::NonPositive { name, value });
    }
    Ok(value)
}

/// Check that a parameter is finite (sign unconstrained, e.g. coil current).
pub fn require_finite(name: &'static str, value: f64) -> Result<f64, InvalidInput> {
    if !value.is_finite() {
        return Err(InvalidInput::NonFinite { name, value });
    }
    Ok(value)
}
