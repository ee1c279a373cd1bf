//! Bernstein-Vazirani: recover the hidden bitstring `r` of
//! `f(x) = x · r (mod 2)` with a single oracle query.

use rand::rngs::StdRng;

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{EngineError, QubitId};
use crate::harness::engine::MAX_PARITY_QUBITS;
use crate::operations::Operation;
use crate::simulation::Simulator;

/// Builds the circuit for `qubits` input bits hiding `parity`.
///
/// Inputs are `Q(0)..Q(qubits - 1)`, the ancilla is `Q(qubits)`. Bit `i` of
/// `parity` is wired as a CNOT from input `i` onto the ancilla.
///
/// Returns the circuit and the measured input register.
pub fn circuit(qubits: usize, parity: u64) -> Result<(Circuit, Vec<QubitId>), EngineError> {
    if qubits == 0 || qubits > MAX_PARITY_QUBITS {
        return Err(EngineError::invalid(format!(
            "Bernstein-Vazirani needs 1..={MAX_PARITY_QUBITS} input qubits, got {qubits}"
        )));
    }
    if parity >> qubits != 0 {
        return Err(EngineError::invalid(format!(
            "parity {parity} does not fit in {qubits} bits"
        )));
    }

    let inputs = QubitId::range(0, qubits);
    let ancilla = QubitId(qubits as u64);

    // Ancilla in |->, inputs in uniform superposition.
    let mut builder = CircuitBuilder::new()
        .add_op(Operation::PauliX { target: ancilla })
        .add_op(Operation::Hadamard { target: ancilla })
        .on_each(&inputs, |target| Operation::Hadamard { target });

    for (bit, input) in inputs.iter().enumerate() {
        if parity >> bit & 1 == 1 {
            builder = builder.add_op(Operation::ControlledNot { control: *input, target: ancilla });
        }
    }

    let circuit = builder
        .on_each(&inputs, |target| Operation::Hadamard { target })
        .add_op(Operation::Measure { targets: inputs.clone() })
        .build();
    Ok((circuit, inputs))
}

/// Runs the algorithm once and returns the measured parity.
pub fn recover_parity(
    simulator: &Simulator,
    qubits: usize,
    parity: u64,
    rng: &mut StdRng,
) -> Result<u64, EngineError> {
    let (circuit, inputs) = circuit(qubits, parity)?;
    let result = simulator.run(&circuit, rng)?;
    result.read_register(&inputs)
}
