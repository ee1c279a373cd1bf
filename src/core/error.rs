//! Error handling for the simulation engine

use thiserror::Error;

use super::qubit::QubitId;

/// Faults raised by the engine while executing a demonstration.
///
/// Every variant means the engine could not produce an `Outcome`. A wrong
/// answer is never an `EngineError`; the harness reports that separately as a
/// verification failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The state vector lost normalization while evolving.
    #[error("Incoherence: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// A measurement could not select an outcome.
    #[error("Instability: {message}")]
    Instability {
        /// Instability failure message
        message: String,
    },

    /// An operation referenced a qubit that is not part of the circuit.
    #[error("Unknown qubit {qubit}: {message}")]
    UnknownQubit {
        /// The offending qubit
        qubit: QubitId,
        /// UnknownQubit failure message
        message: String,
    },

    /// An operation or parameter set is inconsistent with the demonstration.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// The engine could not be acquired or failed internally.
    #[error("Simulation error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EngineError::InvalidOperation { message: message.into() }
    }

    pub(crate) fn simulation(message: impl Into<String>) -> Self {
        EngineError::SimulationError { message: message.into() }
    }
}
