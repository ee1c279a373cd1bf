// src/circuits/mod.rs

//! Ordered sequences of `Operation`s and a builder for assembling them.

use crate::core::QubitId;
use crate::operations::Operation;
use std::collections::BTreeSet;
use std::fmt;

/// An ordered list of operations together with the qubits they touch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circuit {
    /// Every qubit mentioned by any operation, in ascending order.
    qubits: BTreeSet<QubitId>,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `op` and registers the qubits it involves.
    pub fn add_operation(&mut self, op: Operation) {
        self.qubits.extend(op.involved_qubits());
        self.operations.push(op);
    }

    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    pub fn qubits(&self) -> &BTreeSet<QubitId> {
        &self.qubits
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Method-chaining builder for `Circuit`.
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Applies `gate` to each qubit in `targets`.
    pub fn on_each<F>(mut self, targets: &[QubitId], gate: F) -> Self
    where
        F: Fn(QubitId) -> Operation,
    {
        self.circuit.add_operations(targets.iter().copied().map(gate));
        self
    }

    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit[{} operations on {} qubits]",
            self.operations.len(),
            self.qubits.len()
        )?;
        for (step, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {step:>3}: {op}")?;
        }
        Ok(())
    }
}
