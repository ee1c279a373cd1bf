// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

use super::constants::tolerances::AMPLITUDE_TOLERANCE;
use super::error::EngineError;
use super::qubit::QubitId;

/// A 2x2 complex matrix acting on a single qubit.
pub type Matrix2 = [[Complex<f64>; 2]; 2];

/// Amplitudes of an `n`-qubit register in the computational basis.
///
/// Position `p` (0-based, in the engine's ordering of qubits) corresponds to
/// bit `n - 1 - p` of the basis index, so position 0 is the most
/// significant bit of `|q0 q1 ... qn-1>`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Creates the `|0...0>` state on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Result<Self, EngineError> {
        let dim = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or_else(|| {
                EngineError::simulation(format!(
                    "{num_qubits} qubits overflow the state vector dimension"
                ))
            })?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::one();
        Ok(Self { amplitudes, num_qubits })
    }

    /// Wraps raw amplitudes. The length must be a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Result<Self, EngineError> {
        if amplitudes.is_empty() || !amplitudes.len().is_power_of_two() {
            return Err(EngineError::simulation(format!(
                "state vector length {} is not a power of two",
                amplitudes.len()
            )));
        }
        let num_qubits = amplitudes.len().trailing_zeros() as usize;
        Ok(Self { amplitudes, num_qubits })
    }

    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    fn bit_mask(&self, position: usize) -> usize {
        1 << (self.num_qubits - 1 - position)
    }

    fn check_position(&self, position: usize) -> Result<(), EngineError> {
        if position >= self.num_qubits {
            return Err(EngineError::simulation(format!(
                "qubit position {position} out of range for {} qubits",
                self.num_qubits
            )));
        }
        Ok(())
    }

    /// Applies `matrix` to the qubit at `position`.
    pub fn apply_single(&mut self, position: usize, matrix: &Matrix2) -> Result<(), EngineError> {
        self.check_position(position)?;
        let mask = self.bit_mask(position);
        for i0 in 0..self.dim() {
            if i0 & mask != 0 {
                continue;
            }
            let i1 = i0 | mask;
            let psi_0 = self.amplitudes[i0];
            let psi_1 = self.amplitudes[i1];
            self.amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            self.amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    /// Applies `matrix` to `target` on the subspace where `control` is `|1>`.
    pub fn apply_controlled(
        &mut self,
        control: usize,
        target: usize,
        matrix: &Matrix2,
    ) -> Result<(), EngineError> {
        self.check_position(control)?;
        self.check_position(target)?;
        if control == target {
            return Err(EngineError::invalid(
                "control and target of a controlled operation must differ",
            ));
        }
        let control_mask = self.bit_mask(control);
        let target_mask = self.bit_mask(target);
        for i0 in 0..self.dim() {
            if i0 & control_mask == 0 || i0 & target_mask != 0 {
                continue;
            }
            let i1 = i0 | target_mask;
            let psi_0 = self.amplitudes[i0];
            let psi_1 = self.amplitudes[i1];
            self.amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            self.amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    /// Probability of reading `1` on the qubit at `position`.
    pub fn probability_of_one(&self, position: usize) -> Result<f64, EngineError> {
        self.check_position(position)?;
        let mask = self.bit_mask(position);
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(k, _)| k & mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum())
    }

    /// Projects the qubit at `position` onto `bit` and renormalizes.
    pub fn collapse(&mut self, position: usize, bit: bool) -> Result<(), EngineError> {
        let p_one = self.probability_of_one(position)?;
        let p_kept = if bit { p_one } else { 1.0 - p_one };
        if p_kept < AMPLITUDE_TOLERANCE {
            return Err(EngineError::Instability {
                message: format!(
                    "cannot collapse position {position} onto {} with probability {p_kept:.3e}",
                    u8::from(bit)
                ),
            });
        }
        let mask = self.bit_mask(position);
        let scale = 1.0 / p_kept.sqrt();
        for (k, amp) in self.amplitudes.iter_mut().enumerate() {
            if (k & mask != 0) == bit {
                *amp *= scale;
            } else {
                *amp = Complex::zero();
            }
        }
        Ok(())
    }

    /// Expectation value `<psi| P |psi>` of a Pauli product over positions.
    pub fn pauli_expectation(&self, factors: &[(usize, Pauli)]) -> Result<f64, EngineError> {
        let mut image = self.clone();
        for (position, pauli) in factors {
            image.apply_single(*position, &pauli.matrix())?;
        }
        let overlap: Complex<f64> = self
            .amplitudes
            .iter()
            .zip(image.amplitudes.iter())
            .map(|(a, b)| a.conj() * b)
            .sum();
        Ok(overlap.re)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

/// Single-qubit Pauli operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pauli {
    X,
    Y,
    Z,
}

impl Pauli {
    pub fn matrix(self) -> Matrix2 {
        match self {
            Pauli::X => [
                [Complex::zero(), Complex::one()],
                [Complex::one(), Complex::zero()],
            ],
            Pauli::Y => [
                [Complex::zero(), -Complex::i()],
                [Complex::i(), Complex::zero()],
            ],
            Pauli::Z => [
                [Complex::one(), Complex::zero()],
                [Complex::zero(), -Complex::one()],
            ],
        }
    }
}

/// A weighted product of Pauli operators; an empty product is the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct PauliTerm {
    pub coefficient: f64,
    pub factors: Vec<(QubitId, Pauli)>,
}

impl PauliTerm {
    pub fn new(coefficient: f64, factors: Vec<(QubitId, Pauli)>) -> Self {
        Self { coefficient, factors }
    }

    pub fn identity(coefficient: f64) -> Self {
        Self::new(coefficient, Vec::new())
    }
}
