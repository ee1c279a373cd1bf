//! Failures that escape a single dispatch.

use std::io;

use thiserror::Error;

use super::engine::{DemonstrationId, Outcome, Parameters};
use super::verifier::{VerificationFailure, VerifyError};
use crate::core::EngineError;

/// Errors surfaced by the dispatcher.
///
/// `Engine` and `Verification` are faults of one demonstration run; the
/// interactive loop reports them and keeps going. `Console` means the
/// operator can no longer be talked to and ends the session.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("{demo} failed for {input}: {source}")]
    Engine {
        demo: DemonstrationId,
        input: Parameters,
        #[source]
        source: EngineError,
    },

    #[error("{demo} verification failed: {failure}")]
    Verification {
        demo: DemonstrationId,
        failure: VerificationFailure<Parameters, Outcome>,
    },

    #[error("{demo} has an empty verification domain")]
    EmptyDomain { demo: DemonstrationId },

    #[error("{demo} is not registered")]
    Unregistered { demo: DemonstrationId },

    #[error("console error: {0}")]
    Console(#[from] io::Error),
}

impl HarnessError {
    pub(crate) fn from_verify(demo: DemonstrationId, err: VerifyError<Parameters, Outcome>) -> Self {
        match err {
            VerifyError::EmptyDomain => HarnessError::EmptyDomain { demo },
            VerifyError::Engine { input, source } => HarnessError::Engine { demo, input, source },
            VerifyError::Mismatch(failure) => HarnessError::Verification { demo, failure },
        }
    }

    /// Whether the error belongs to a single demonstration run rather than
    /// to the session itself.
    pub fn is_fault(&self) -> bool {
        !matches!(self, HarnessError::Console(_))
    }
}

/// Problems building the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("key '{0}' is already bound")]
    DuplicateKey(char),

    #[error("{0} is already registered")]
    DuplicateDemonstration(DemonstrationId),

    #[error("{0} is registered for verification with an empty domain")]
    EmptyDomain(DemonstrationId),

    #[error("parity sweep needs 1..={max} qubits, got {qubits}")]
    QubitsOutOfRange { qubits: usize, max: usize },
}
