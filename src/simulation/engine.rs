// src/simulation/engine.rs
use crate::core::{EngineError, Pauli, PauliTerm, QubitId, StateVector};
use crate::operations::Operation;
use crate::simulation::SimulationResult;
use crate::validation::{check_probability, validate_state};
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use std::collections::{BTreeSet, HashMap};

/// Evolves the state vector of one circuit run.
pub(crate) struct SimulationEngine {
    /// Maps qubit ids to their position in the state vector.
    qubit_positions: HashMap<QubitId, usize>,
    state: StateVector,
}

impl SimulationEngine {
    /// Initializes `|0...0>` over `qubits`, assigning positions in ascending id order.
    pub(crate) fn init(qubits: &BTreeSet<QubitId>) -> Result<Self, EngineError> {
        if qubits.is_empty() {
            return Err(EngineError::invalid(
                "cannot initialize simulation engine with zero qubits",
            ));
        }
        let qubit_positions = qubits
            .iter()
            .enumerate()
            .map(|(position, qubit)| (*qubit, position))
            .collect();
        let state = StateVector::new(qubits.len())?;
        Ok(Self { qubit_positions, state })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), EngineError> {
        if state.dim() != self.state.dim() {
            return Err(EngineError::simulation(format!(
                "cannot set state: dimension {} does not match engine dimension {}",
                state.dim(),
                self.state.dim()
            )));
        }
        self.state = state;
        Ok(())
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    fn position(&self, qubit: &QubitId) -> Result<usize, EngineError> {
        self.qubit_positions
            .get(qubit)
            .copied()
            .ok_or_else(|| EngineError::UnknownQubit {
                qubit: *qubit,
                message: "qubit is not part of this simulation".to_string(),
            })
    }

    /// Applies a gate operation. Measurements go through `measure`.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), EngineError> {
        match op {
            Operation::ControlledNot { control, target } => {
                let control = self.position(control)?;
                let target = self.position(target)?;
                self.state.apply_controlled(control, target, &Pauli::X.matrix())?;
            }
            Operation::Measure { .. } => {
                return Err(EngineError::invalid(
                    "measurement must not be passed to apply_operation",
                ));
            }
            Operation::Hadamard { target }
            | Operation::PauliX { target }
            | Operation::PauliZ { target }
            | Operation::RotateY { target, .. } => {
                let position = self.position(target)?;
                let matrix = op
                    .single_qubit_matrix()
                    .ok_or_else(|| EngineError::simulation(format!("no matrix for {op}")))?;
                self.state.apply_single(position, &matrix)?;
            }
        }
        validate_state(&self.state)
    }

    /// Measures `targets` one after another, collapsing the state each time.
    ///
    /// The outcome of each qubit is drawn from `rng`; a qubit in a basis
    /// state always yields that basis value.
    pub(crate) fn measure(
        &mut self,
        targets: &[QubitId],
        rng: &mut StdRng,
        result: &mut SimulationResult,
    ) -> Result<(), EngineError> {
        for qubit in targets {
            let position = self.position(qubit)?;
            let p_one = check_probability(self.state.probability_of_one(position)?)?;
            let sample: f64 = StandardUniform.sample(rng);
            let bit = sample < p_one;
            self.state.collapse(position, bit)?;
            result.record(*qubit, bit);
        }
        validate_state(&self.state)
    }

    /// Expectation value of a weighted Pauli product in the current state.
    pub(crate) fn expectation(&self, term: &PauliTerm) -> Result<f64, EngineError> {
        let factors = term
            .factors
            .iter()
            .map(|(qubit, pauli)| Ok((self.position(qubit)?, *pauli)))
            .collect::<Result<Vec<_>, EngineError>>()?;
        Ok(term.coefficient * self.state.pauli_expectation(&factors)?)
    }
}
