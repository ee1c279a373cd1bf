//! Ground-state energy of molecular hydrogen by a one-parameter variational
//! sweep over the reduced two-qubit Hamiltonian.

use std::f64::consts::FRAC_PI_2;

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::constants::hydrogen as h2;
use crate::core::{EngineError, Pauli, PauliTerm, QubitId};
use crate::operations::Operation;
use crate::simulation::Simulator;

const Q0: QubitId = QubitId(0);
const Q1: QubitId = QubitId(1);

/// Grid points of the coarse sweep over `[-π/2, π/2]`.
const SWEEP_STEPS: u32 = 180;
/// Golden-section iterations refining the best grid cell.
const REFINE_ITERATIONS: u32 = 60;

/// The reduced H₂ Hamiltonian as a sum of Pauli terms.
pub fn hamiltonian() -> Vec<PauliTerm> {
    vec![
        PauliTerm::identity(h2::IDENTITY),
        PauliTerm::new(h2::Z0, vec![(Q0, Pauli::Z)]),
        PauliTerm::new(h2::Z1, vec![(Q1, Pauli::Z)]),
        PauliTerm::new(h2::Z0_Z1, vec![(Q0, Pauli::Z), (Q1, Pauli::Z)]),
        PauliTerm::new(h2::X0_X1, vec![(Q0, Pauli::X), (Q1, Pauli::X)]),
    ]
}

/// Prepares `cos θ |Q0=1, Q1=0> + sin θ |Q0=0, Q1=1>`.
pub fn ansatz(theta: f64) -> Circuit {
    CircuitBuilder::new()
        .add_op(Operation::PauliX { target: Q0 })
        .add_op(Operation::RotateY { target: Q1, theta: 2.0 * theta })
        .add_op(Operation::ControlledNot { control: Q1, target: Q0 })
        .build()
}

/// Electronic energy of the ansatz at `theta`.
pub fn electronic_energy(simulator: &Simulator, theta: f64) -> Result<f64, EngineError> {
    simulator.expectation(&ansatz(theta), &hamiltonian())
}

/// Minimum total energy (electronic plus nuclear repulsion), in Hartree.
pub fn ground_state_energy(simulator: &Simulator) -> Result<f64, EngineError> {
    let step = 2.0 * FRAC_PI_2 / f64::from(SWEEP_STEPS);
    let mut best_theta = -FRAC_PI_2;
    let mut best_energy = f64::INFINITY;
    for i in 0..=SWEEP_STEPS {
        let theta = -FRAC_PI_2 + step * f64::from(i);
        let energy = electronic_energy(simulator, theta)?;
        if energy < best_energy {
            best_theta = theta;
            best_energy = energy;
        }
    }

    let (theta, energy) = golden_section(
        |theta| electronic_energy(simulator, theta),
        best_theta - step,
        best_theta + step,
    )?;
    tracing::debug!(theta, energy, "variational sweep converged");
    Ok(energy.min(best_energy) + h2::NUCLEAR_REPULSION)
}

/// Minimizes a unimodal `f` on `[lo, hi]`, returning the argmin and minimum.
fn golden_section<F>(mut f: F, mut lo: f64, mut hi: f64) -> Result<(f64, f64), EngineError>
where
    F: FnMut(f64) -> Result<f64, EngineError>,
{
    let ratio = (5f64.sqrt() - 1.0) / 2.0;
    let mut a = hi - ratio * (hi - lo);
    let mut b = lo + ratio * (hi - lo);
    let mut fa = f(a)?;
    let mut fb = f(b)?;
    for _ in 0..REFINE_ITERATIONS {
        if fa < fb {
            hi = b;
            b = a;
            fb = fa;
            a = hi - ratio * (hi - lo);
            fa = f(a)?;
        } else {
            lo = a;
            a = b;
            fa = fb;
            b = lo + ratio * (hi - lo);
            fb = f(b)?;
        }
    }
    Ok(if fa < fb { (a, fa) } else { (b, fb) })
}
