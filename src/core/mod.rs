// src/core/mod.rs

//! Core data structures and types

pub mod constants;
pub mod error;
pub mod qubit;
pub mod state;

pub use error::EngineError;
pub use qubit::QubitId;
pub use state::{Pauli, PauliTerm, StateVector};
