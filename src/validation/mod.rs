// src/validation/mod.rs

//! Consistency checks the engine runs on its state while evolving a circuit.

use crate::core::constants::tolerances::{AMPLITUDE_TOLERANCE, NORM_TOLERANCE};
use crate::core::{EngineError, StateVector};

/// Checks that the squared norm of `state` is within `tolerance` of 1.0.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance (default `NORM_TOLERANCE`).
/// * `Err(EngineError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), EngineError> {
    let tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > tolerance {
        return Err(EngineError::Incoherence {
            message: format!(
                "state vector normalization failed: sum |c_i|^2 = {norm_sq} (deviation > {tolerance})"
            ),
        });
    }
    Ok(())
}

/// Rejects a measurement probability that is not finite or lies outside `[0, 1]`.
pub fn check_probability(probability: f64) -> Result<f64, EngineError> {
    if !probability.is_finite()
        || probability < -AMPLITUDE_TOLERANCE
        || probability > 1.0 + NORM_TOLERANCE
    {
        return Err(EngineError::Instability {
            message: format!("measurement probability {probability} is outside [0, 1]"),
        });
    }
    Ok(probability.clamp(0.0, 1.0))
}

/// Runs every state check with default tolerances.
pub fn validate_state(state: &StateVector) -> Result<(), EngineError> {
    check_normalization(state, None)
}
