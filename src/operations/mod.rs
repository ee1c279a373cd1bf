// src/operations/mod.rs

//! Gate and measurement operations understood by the simulation engine.

use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use crate::core::state::Matrix2;
use crate::core::{Pauli, QubitId};

/// A single step of a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Hadamard gate.
    Hadamard {
        target: QubitId,
    },
    /// Bit flip (Pauli X).
    PauliX {
        target: QubitId,
    },
    /// Phase flip (Pauli Z).
    PauliZ {
        target: QubitId,
    },
    /// Rotation about the Y axis by `theta` radians.
    ///
    /// `RotateY { theta: -2α }` followed by a measurement reads the qubit in
    /// the real basis rotated by `α`.
    RotateY {
        target: QubitId,
        theta: f64,
    },
    /// Flips `target` when `control` is `|1>`.
    ControlledNot {
        control: QubitId,
        target: QubitId,
    },
    /// Projective measurement in the computational basis.
    Measure {
        targets: Vec<QubitId>,
    },
}

impl Operation {
    /// Returns every qubit the operation touches.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Hadamard { target }
            | Operation::PauliX { target }
            | Operation::PauliZ { target }
            | Operation::RotateY { target, .. } => vec![*target],
            Operation::ControlledNot { control, target } => vec![*control, *target],
            Operation::Measure { targets } => targets.clone(),
        }
    }

    /// The single-qubit matrix for gate operations, `None` for the rest.
    pub(crate) fn single_qubit_matrix(&self) -> Option<Matrix2> {
        match self {
            Operation::Hadamard { .. } => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                Some([[h, h], [h, -h]])
            }
            Operation::PauliX { .. } => Some(Pauli::X.matrix()),
            Operation::PauliZ { .. } => Some(Pauli::Z.matrix()),
            Operation::RotateY { theta, .. } => Some(rotate_y_matrix(*theta)),
            Operation::ControlledNot { .. } | Operation::Measure { .. } => None,
        }
    }

    /// Short label used when rendering circuits.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Hadamard { .. } => "H",
            Operation::PauliX { .. } => "X",
            Operation::PauliZ { .. } => "Z",
            Operation::RotateY { .. } => "Ry",
            Operation::ControlledNot { .. } => "CX",
            Operation::Measure { .. } => "M",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::RotateY { target, theta } => write!(f, "Ry({theta:.4}) {target}"),
            Operation::ControlledNot { control, target } => write!(f, "CX {control} -> {target}"),
            Operation::Measure { targets } => {
                write!(f, "M")?;
                for t in targets {
                    write!(f, " {t}")?;
                }
                Ok(())
            }
            Operation::Hadamard { target }
            | Operation::PauliX { target }
            | Operation::PauliZ { target } => write!(f, "{} {target}", self.symbol()),
        }
    }
}

fn rotate_y_matrix(theta: f64) -> Matrix2 {
    let (sin, cos) = (theta / 2.0).sin_cos();
    [
        [Complex::new(cos, 0.0), Complex::new(-sin, 0.0)],
        [Complex::new(sin, 0.0), Complex::new(cos, 0.0)],
    ]
}
