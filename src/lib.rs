// src/lib.rs

//! `qharness` - An interactive harness for small quantum algorithm demonstrations
//!
//! The library pairs a compact state-vector simulator with a menu-driven
//! dispatcher. Each demonstration runs ad hoc, or is verified exhaustively
//! against the outcome it must produce for every value in its domain.

pub mod circuits;
pub mod cli;
pub mod config;
pub mod core;
pub mod demonstrations;
pub mod harness;
pub mod operations;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use circuits::{Circuit, CircuitBuilder};
pub use config::{ConfigError, Settings};
pub use core::{EngineError, QubitId, StateVector};
pub use harness::{
    Choice, DemonstrationId, DispatchState, Dispatcher, Engine, EngineProvider, FaultPolicy,
    HarnessError, Outcome, Parameters, Registry, VerificationReport, VerifyError, verify,
};
pub use operations::Operation;
pub use simulation::{SimulationResult, SimulationSession, Simulator, SimulatorConfig};
pub use validation::{check_normalization, validate_state};

// Example 1: Bell pair
// Entangles two qubits and measures both; the outcomes always agree.
/// ```
/// use qharness::{CircuitBuilder, Operation, QubitId, Simulator, EngineError};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let (q0, q1) = (QubitId(0), QubitId(1));
/// let circuit = CircuitBuilder::new()
///     .add_op(Operation::Hadamard { target: q0 })
///     .add_op(Operation::ControlledNot { control: q0, target: q1 })
///     .add_op(Operation::Measure { targets: vec![q0, q1] })
///     .build();
///
/// let simulator = Simulator::new();
/// let mut rng = StdRng::seed_from_u64(7);
/// for _ in 0..8 {
///     let result = simulator.run(&circuit, &mut rng)?;
///     assert_eq!(result.measurement(&q0), result.measurement(&q1));
/// }
/// # Ok::<(), EngineError>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Verifying an engine
// Acquires an engine and checks Bernstein-Vazirani over every 3-bit parity.
/// ```
/// use qharness::{DemonstrationId, Engine, EngineProvider, Outcome, Parameters, Simulator, verify};
///
/// let simulator = Simulator::new();
/// let mut engine = simulator.acquire().unwrap();
/// let report = verify(
///     |p: &Parameters| engine.invoke(DemonstrationId::BernsteinVazirani, p),
///     Parameters::parity_domain(3),
///     |p: &Parameters| Outcome::Bits(p.parity()),
/// )
/// .unwrap();
/// assert_eq!(report.invocations, 8);
/// ```
#[doc(hidden)]
const _: () = ();
