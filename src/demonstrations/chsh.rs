//! The CHSH game.
//!
//! A referee sends independent random bits `x` to Alice and `y` to Bob. They
//! answer `a` and `b` without communicating and win when `a XOR b == x AND y`.
//! No classical strategy wins more than 75% of games; players sharing a Bell
//! pair win `cos²(π/8) ≈ 85.4%` of them.

use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use std::f64::consts::{FRAC_PI_4, FRAC_PI_8};

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{EngineError, QubitId};
use crate::operations::Operation;
use crate::simulation::Simulator;

const ALICE: QubitId = QubitId(0);
const BOB: QubitId = QubitId(1);

/// Whether answers `(a, b)` win the round with questions `(x, y)`.
pub fn wins(x: bool, y: bool, a: bool, b: bool) -> bool {
    (a ^ b) == (x && y)
}

fn referee(rng: &mut StdRng) -> (bool, bool) {
    (StandardUniform.sample(rng), StandardUniform.sample(rng))
}

fn check_rounds(rounds: u32) -> Result<(), EngineError> {
    if rounds == 0 {
        return Err(EngineError::invalid("CHSH needs at least one round"));
    }
    Ok(())
}

/// Fraction of `rounds` games won when both players always answer `0`.
pub fn classical_win_rate(rounds: u32, rng: &mut StdRng) -> Result<f64, EngineError> {
    check_rounds(rounds)?;
    let won = (0..rounds)
        .filter(|_| {
            let (x, y) = referee(rng);
            wins(x, y, false, false)
        })
        .count();
    Ok(won as f64 / f64::from(rounds))
}

/// Measurement angle of Alice (`0` or `π/4`) and Bob (`±π/8`).
fn measurement_angles(x: bool, y: bool) -> (f64, f64) {
    let alice = if x { FRAC_PI_4 } else { 0.0 };
    let bob = if y { -FRAC_PI_8 } else { FRAC_PI_8 };
    (alice, bob)
}

/// One round of the entangled strategy for questions `(x, y)`.
pub fn quantum_round(x: bool, y: bool) -> Circuit {
    let (alice, bob) = measurement_angles(x, y);
    CircuitBuilder::new()
        .add_op(Operation::Hadamard { target: ALICE })
        .add_op(Operation::ControlledNot { control: ALICE, target: BOB })
        .add_op(Operation::RotateY { target: ALICE, theta: -2.0 * alice })
        .add_op(Operation::RotateY { target: BOB, theta: -2.0 * bob })
        .add_op(Operation::Measure { targets: vec![ALICE, BOB] })
        .build()
}

/// Fraction of `rounds` games won with a shared Bell pair.
pub fn quantum_win_rate(simulator: &Simulator, rounds: u32, rng: &mut StdRng) -> Result<f64, EngineError> {
    check_rounds(rounds)?;
    let mut won = 0u32;
    for _ in 0..rounds {
        let (x, y) = referee(rng);
        let result = simulator.run(&quantum_round(x, y), rng)?;
        let answers = result.read_register(&[ALICE, BOB])?;
        if wins(x, y, answers & 1 == 1, answers & 2 == 2) {
            won += 1;
        }
    }
    Ok(f64::from(won) / f64::from(rounds))
}
