// src/harness/mod.rs

//! The selection-and-verification harness.
//!
//! A [`Dispatcher`] shows the [`Registry`] as a menu, reads one key from an
//! [`InputSource`], and either invokes the selected demonstration once or
//! hands its whole parameter domain to [`verify`]. Demonstrations run on an
//! [`Engine`] obtained from an [`EngineProvider`] for the duration of a
//! single dispatch.

pub mod console;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod registry;
pub mod verifier;

pub use console::{InputSource, Key, ScriptedInput, TerminalInput};
pub use dispatcher::{DispatchState, Dispatcher, FaultPolicy, Report, SessionSummary};
pub use engine::{DemonstrationId, Engine, EngineProvider, MAX_PARITY_QUBITS, Outcome, Parameters};
pub use error::{HarnessError, RegistryError};
pub use registry::{Choice, Entry, Mode, Registry};
pub use verifier::{VerificationFailure, VerificationReport, VerifyError, verify};
