// src/simulation/mod.rs

//! Executes `Circuit`s on a state-vector engine and exposes the simulator to
//! the harness as an [`EngineProvider`].
//!
//! [`Simulator`] is cheap to clone and holds only configuration. Acquiring it
//! yields a [`SimulationSession`], the engine the harness invokes; the session
//! is released when it goes out of scope.

mod results;
mod session;
pub(crate) mod engine;

pub use results::SimulationResult;
pub use session::SimulationSession;

use rand::rngs::StdRng;

use crate::circuits::Circuit;
use crate::core::{EngineError, PauliTerm};
use crate::harness::engine::EngineProvider;
use crate::operations::Operation;
use engine::SimulationEngine;

/// Settings shared by every session acquired from a `Simulator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Base seed; each invocation derives its own seed from it.
    pub seed: u64,
    /// Register width used by demonstrations invoked with default parameters.
    pub qubits: usize,
    /// Games played per CHSH invocation.
    pub rounds: u32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_0F_C45E,
            qubits: 4,
            rounds: 1000,
        }
    }
}

/// The main simulator orchestrating the execution of circuits.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs `circuit` from `|0...0>`, drawing measurement outcomes from `rng`.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` with the bit of every measured qubit.
    /// * `Err(EngineError)` if the circuit is empty of qubits, references an
    ///   unknown qubit, or the state stops being normalized.
    pub fn run(&self, circuit: &Circuit, rng: &mut StdRng) -> Result<SimulationResult, EngineError> {
        let mut engine = SimulationEngine::init(circuit.qubits())?;
        let mut result = SimulationResult::new();
        for op in circuit.operations() {
            match op {
                Operation::Measure { targets } => engine.measure(targets, rng, &mut result)?,
                _ => engine.apply_operation(op)?,
            }
        }
        tracing::trace!(operations = circuit.len(), "circuit run complete");
        Ok(result)
    }

    /// Evolves a measurement-free `circuit` and returns `<psi| H |psi>` for the
    /// Hamiltonian given as a sum of Pauli terms.
    pub fn expectation(&self, circuit: &Circuit, hamiltonian: &[PauliTerm]) -> Result<f64, EngineError> {
        let mut engine = SimulationEngine::init(circuit.qubits())?;
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        tracing::trace!(dim = engine.state().dim(), "evaluating expectation value");
        hamiltonian
            .iter()
            .map(|term| engine.expectation(term))
            .sum()
    }
}

impl EngineProvider for Simulator {
    type Engine = SimulationSession;

    fn acquire(&self) -> Result<SimulationSession, EngineError> {
        SimulationSession::open(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::{Pauli, QubitId};
    use rand::SeedableRng;

    fn qid(id: u64) -> QubitId {
        QubitId(id)
    }

    #[test]
    fn run_records_measured_bits() -> Result<(), EngineError> {
        let circuit = CircuitBuilder::new()
            .add_op(Operation::PauliX { target: qid(0) })
            .add_op(Operation::ControlledNot { control: qid(0), target: qid(1) })
            .add_op(Operation::Measure { targets: vec![qid(0), qid(1)] })
            .build();
        let mut rng = StdRng::seed_from_u64(1);
        let result = Simulator::new().run(&circuit, &mut rng)?;
        assert_eq!(result.read_register(&[qid(0), qid(1)])?, 0b11);
        Ok(())
    }

    #[test]
    fn expectation_rejects_measurements() {
        let circuit = CircuitBuilder::new()
            .add_op(Operation::Measure { targets: vec![qid(0)] })
            .build();
        let err = Simulator::new()
            .expectation(&circuit, &[PauliTerm::identity(1.0)])
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidOperation { .. }));
    }

    #[test]
    fn expectation_sums_terms() -> Result<(), EngineError> {
        let circuit = CircuitBuilder::new()
            .add_op(Operation::Hadamard { target: qid(0) })
            .build();
        let hamiltonian = [
            PauliTerm::identity(-1.0),
            PauliTerm::new(0.5, vec![(qid(0), Pauli::X)]),
            PauliTerm::new(3.0, vec![(qid(0), Pauli::Z)]),
        ];
        let energy = Simulator::new().expectation(&circuit, &hamiltonian)?;
        assert!((energy + 0.5).abs() < 1e-12);
        Ok(())
    }
}
