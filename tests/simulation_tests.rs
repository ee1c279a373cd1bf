// tests/simulation_tests.rs

use qharness::{
    CircuitBuilder, DemonstrationId, Engine, EngineError, EngineProvider, Operation, Outcome, Parameters, QubitId,
    Simulator, SimulatorConfig,
};
use qharness::simulation::SimulationResult;

use rand::SeedableRng;
use rand::rngs::StdRng;

// Helper function to create QubitId for tests
fn qid(id: u64) -> QubitId {
    QubitId(id)
}

fn check_bit(result: &SimulationResult, qubit: QubitId, expected: bool) {
    match result.measurement(&qubit) {
        Some(bit) => assert_eq!(bit, expected, "Mismatch for qubit {}", qubit),
        None => panic!("qubit {} was not measured", qubit),
    }
}

fn simulator(qubits: usize, rounds: u32) -> Simulator {
    Simulator::with_config(SimulatorConfig { qubits, rounds, ..SimulatorConfig::default() })
}

#[test]
fn test_empty_circuit_is_rejected() {
    let circuit = CircuitBuilder::new().build();
    let mut rng = StdRng::seed_from_u64(0);
    let err = Simulator::new().run(&circuit, &mut rng).unwrap_err();
    assert!(matches!(err, EngineError::InvalidOperation { .. }));
}

#[test]
fn test_initial_state_measures_zero() -> Result<(), EngineError> {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::Measure { targets: vec![qid(0), qid(1)] })
        .build();
    let mut rng = StdRng::seed_from_u64(0);
    let result = Simulator::new().run(&circuit, &mut rng)?;

    assert_eq!(result.all_measurements().len(), 2);
    check_bit(&result, qid(0), false);
    check_bit(&result, qid(1), false);
    Ok(())
}

#[test]
fn test_controlled_not_flips_target() -> Result<(), EngineError> {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::PauliX { target: qid(0) })
        .add_op(Operation::ControlledNot { control: qid(0), target: qid(2) })
        .add_op(Operation::Measure { targets: vec![qid(0), qid(1), qid(2)] })
        .build();
    let mut rng = StdRng::seed_from_u64(0);
    let result = Simulator::new().run(&circuit, &mut rng)?;

    check_bit(&result, qid(0), true);
    check_bit(&result, qid(1), false);
    check_bit(&result, qid(2), true);
    assert_eq!(result.read_register(&[qid(0), qid(1), qid(2)])?, 0b101);
    Ok(())
}

#[test]
fn test_hadamard_twice_is_identity() -> Result<(), EngineError> {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::Hadamard { target: qid(0) })
        .add_op(Operation::Hadamard { target: qid(0) })
        .add_op(Operation::Measure { targets: vec![qid(0)] })
        .build();
    let simulator = Simulator::new();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..16 {
        check_bit(&simulator.run(&circuit, &mut rng)?, qid(0), false);
    }
    Ok(())
}

#[test]
fn test_unmeasured_register_is_an_error() -> Result<(), EngineError> {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::PauliX { target: qid(0) })
        .add_op(Operation::PauliX { target: qid(1) })
        .add_op(Operation::Measure { targets: vec![qid(0)] })
        .build();
    let mut rng = StdRng::seed_from_u64(0);
    let result = Simulator::new().run(&circuit, &mut rng)?;
    let err = result.read_register(&[qid(0), qid(1)]).unwrap_err();
    assert!(matches!(err, EngineError::UnknownQubit { qubit: QubitId(1), .. }));
    Ok(())
}

#[test]
fn test_session_recovers_every_parity() -> Result<(), EngineError> {
    let mut session = simulator(5, 100).acquire()?;
    for params in Parameters::parity_domain(5) {
        let outcome = session.invoke(DemonstrationId::BernsteinVazirani, &params)?;
        assert_eq!(outcome, Outcome::Bits(params.parity()), "wrong parity for {params}");
    }
    assert_eq!(session.invocations(), 32);
    Ok(())
}

#[test]
fn test_default_parameters_hide_zero() -> Result<(), EngineError> {
    let mut session = simulator(3, 100).acquire()?;
    let outcome = session.invoke(DemonstrationId::BernsteinVazirani, &Parameters::Default)?;
    assert_eq!(outcome, Outcome::Bits(0));
    Ok(())
}

#[test]
fn test_oversized_parity_is_an_engine_fault() -> Result<(), EngineError> {
    let mut session = Simulator::new().acquire()?;
    let params = Parameters::HiddenParity { qubits: 2, parity: 4 };
    let err = session.invoke(DemonstrationId::BernsteinVazirani, &params).unwrap_err();
    assert!(matches!(err, EngineError::InvalidOperation { .. }));
    Ok(())
}

#[test]
fn test_chsh_quantum_beats_classical() -> Result<(), EngineError> {
    let mut session = simulator(4, 4000).acquire()?;
    let classical = match session.invoke(DemonstrationId::ChshClassical, &Parameters::Default)? {
        Outcome::WinRate(rate) => rate,
        other => panic!("unexpected outcome {other:?}"),
    };
    let quantum = match session.invoke(DemonstrationId::ChshQuantum, &Parameters::Default)? {
        Outcome::WinRate(rate) => rate,
        other => panic!("unexpected outcome {other:?}"),
    };

    assert!((classical - 0.75).abs() < 0.04, "classical win rate {classical}");
    assert!((quantum - 0.8536).abs() < 0.04, "quantum win rate {quantum}");
    assert!(quantum > classical);
    Ok(())
}

#[test]
fn test_hydrogen_ground_state() -> Result<(), EngineError> {
    let mut session = Simulator::new().acquire()?;
    match session.invoke(DemonstrationId::HydrogenGroundState, &Parameters::Default)? {
        Outcome::Energy(energy) => assert!((energy + 1.137306).abs() < 1e-4, "energy {energy}"),
        other => panic!("unexpected outcome {other:?}"),
    }
    Ok(())
}

#[test]
fn test_repeated_invocations_agree() -> Result<(), EngineError> {
    let simulator = simulator(4, 500);
    for demo in DemonstrationId::ALL {
        let first = simulator.acquire()?.invoke(demo, &Parameters::Default)?;
        let mut session = simulator.acquire()?;
        assert_eq!(session.invoke(demo, &Parameters::Default)?, first, "{demo} is not repeatable");
        assert_eq!(session.invoke(demo, &Parameters::Default)?, first, "{demo} is not repeatable");
    }
    Ok(())
}

#[test]
fn test_seed_changes_sampled_outcomes() -> Result<(), EngineError> {
    let base = SimulatorConfig { rounds: 200, ..SimulatorConfig::default() };
    let a = Simulator::with_config(base)
        .acquire()?
        .invoke(DemonstrationId::ChshClassical, &Parameters::Default)?;
    let b = Simulator::with_config(SimulatorConfig { seed: base.seed ^ 0xFFFF, ..base })
        .acquire()?
        .invoke(DemonstrationId::ChshClassical, &Parameters::Default)?;
    // Different seeds draw different referee questions; the rates stay close.
    match (a, b) {
        (Outcome::WinRate(a), Outcome::WinRate(b)) => assert!((a - b).abs() < 0.15),
        other => panic!("unexpected outcomes {other:?}"),
    }
    Ok(())
}
