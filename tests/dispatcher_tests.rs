//! Menu loop behavior against a counting mock engine.

use std::cell::RefCell;
use std::rc::Rc;

use qharness::harness::{Key, Report, ScriptedInput, SessionSummary};
use qharness::{
    Choice, DemonstrationId, DispatchState, Dispatcher, Engine, EngineError, EngineProvider, FaultPolicy,
    HarnessError, Outcome, Parameters, Registry, Simulator, SimulatorConfig,
};

#[derive(Debug, Default)]
struct Counters {
    acquired: usize,
    released: usize,
    invocations: Vec<(DemonstrationId, Parameters)>,
}

/// Echoes the hidden parity back, except for the parities listed in
/// `corrupt` (answered off by one) and `faulty` (answered with an error).
#[derive(Clone, Default)]
struct MockProvider {
    counters: Rc<RefCell<Counters>>,
    corrupt: Vec<u64>,
    faulty: Vec<u64>,
    refuse: bool,
}

struct MockEngine {
    provider: MockProvider,
}

impl EngineProvider for MockProvider {
    type Engine = MockEngine;

    fn acquire(&self) -> Result<MockEngine, EngineError> {
        if self.refuse {
            return Err(EngineError::SimulationError { message: "no engine available".into() });
        }
        self.counters.borrow_mut().acquired += 1;
        Ok(MockEngine { provider: self.clone() })
    }
}

impl Engine for MockEngine {
    fn invoke(&mut self, demo: DemonstrationId, params: &Parameters) -> Result<Outcome, EngineError> {
        self.provider.counters.borrow_mut().invocations.push((demo, *params));
        let parity = params.parity();
        if self.provider.faulty.contains(&parity) {
            return Err(EngineError::Instability { message: format!("collapse failed at {parity}") });
        }
        if self.provider.corrupt.contains(&parity) {
            return Ok(Outcome::Bits(parity + 1));
        }
        Ok(Outcome::Bits(parity))
    }
}

impl Drop for MockEngine {
    fn drop(&mut self) {
        self.provider.counters.borrow_mut().released += 1;
    }
}

fn session(
    provider: MockProvider,
    keys: Vec<Key>,
) -> Dispatcher<MockProvider, ScriptedInput, Vec<u8>> {
    let registry = Registry::standard(2).unwrap();
    Dispatcher::new(registry, provider, ScriptedInput::new(keys), Vec::new())
}

fn transcript(dispatcher: &Dispatcher<MockProvider, ScriptedInput, Vec<u8>>) -> String {
    String::from_utf8_lossy(dispatcher.output()).into_owned()
}

#[test]
fn quit_immediately() {
    let provider = MockProvider::default();
    let counters = Rc::clone(&provider.counters);
    let mut dispatcher = session(provider, vec![Key::Escape]);

    let summary = dispatcher.run().unwrap();

    assert_eq!(summary, SessionSummary { menus_shown: 1, dispatched: 0, faults: 0 });
    assert_eq!(dispatcher.state(), DispatchState::Terminated);
    let text = transcript(&dispatcher);
    assert_eq!(text.matches("Available demonstrations:").count(), 1);
    assert!(text.ends_with("Exiting...\n"));
    assert_eq!(counters.borrow().acquired, 0);
}

#[test]
fn ctrl_c_quits_like_escape() {
    let mut dispatcher = session(MockProvider::default(), vec![Key::Interrupt]);
    dispatcher.run().unwrap();
    assert_eq!(dispatcher.state(), DispatchState::Terminated);
}

#[test]
fn unrecognized_key_touches_no_engine() {
    let provider = MockProvider::default();
    let counters = Rc::clone(&provider.counters);
    let mut dispatcher = session(provider, vec![Key::Char('x')]);

    assert_eq!(dispatcher.step().unwrap(), DispatchState::AwaitingChoice);
    assert_eq!(counters.borrow().acquired, 0);
    assert!(counters.borrow().invocations.is_empty());

    // The menu comes back on the next pass, then the script runs out.
    assert_eq!(dispatcher.step().unwrap(), DispatchState::Terminated);
    assert_eq!(transcript(&dispatcher).matches("Available demonstrations:").count(), 2);
}

#[test]
fn ad_hoc_runs_once_with_defaults() {
    let provider = MockProvider::default();
    let counters = Rc::clone(&provider.counters);
    let mut dispatcher = session(provider, vec![Key::Char('0'), Key::Escape]);

    dispatcher.run().unwrap();

    let counters = counters.borrow();
    assert_eq!(counters.invocations, vec![(DemonstrationId::HydrogenGroundState, Parameters::Default)]);
    assert_eq!((counters.acquired, counters.released), (1, 1));
    assert!(transcript(&dispatcher).contains("The result is 0.\n\n"));
}

#[test]
fn verified_sweep_reports_success() {
    let provider = MockProvider::default();
    let counters = Rc::clone(&provider.counters);
    let dispatcher = session(provider, vec![]);

    let report = dispatcher.dispatch(DemonstrationId::BernsteinVazirani).unwrap();

    assert!(matches!(report, Report::Verified(r) if r.invocations == 4));
    let parities: Vec<u64> = counters.borrow().invocations.iter().map(|(_, p)| p.parity()).collect();
    assert_eq!(parities, vec![0, 1, 2, 3]);
    assert_eq!((counters.borrow().acquired, counters.borrow().released), (1, 1));
}

#[test]
fn mismatch_is_reported_and_the_loop_continues() {
    let provider = MockProvider { corrupt: vec![2], ..MockProvider::default() };
    let counters = Rc::clone(&provider.counters);
    let mut dispatcher = session(provider, vec![Key::Char('1'), Key::Char('2'), Key::Escape]);

    let summary = dispatcher.run().unwrap();

    assert_eq!(summary, SessionSummary { menus_shown: 3, dispatched: 2, faults: 1 });
    let text = transcript(&dispatcher);
    assert!(text.contains(
        "Error: bernstein-vazirani verification failed: measured 3 for parity 2 (10) on 2 qubits, but expected 2\n"
    ));
    assert!(text.contains("The result is 0."));
    let counters = counters.borrow();
    // Sweep stopped at parity 2, then one ad hoc CHSH run.
    assert_eq!(counters.invocations.len(), 4);
    assert_eq!((counters.acquired, counters.released), (2, 2));
}

#[test]
fn engine_fault_releases_the_engine() {
    let provider = MockProvider { faulty: vec![1], ..MockProvider::default() };
    let counters = Rc::clone(&provider.counters);
    let dispatcher = session(provider, vec![]);

    let err = dispatcher.dispatch(DemonstrationId::BernsteinVazirani).unwrap_err();

    match &err {
        HarnessError::Engine { demo, input, source } => {
            assert_eq!(*demo, DemonstrationId::BernsteinVazirani);
            assert_eq!(input.parity(), 1);
            assert!(matches!(source, EngineError::Instability { .. }));
        }
        other => panic!("expected an engine fault, got {other:?}"),
    }
    assert!(err.is_fault());
    assert_eq!(counters.borrow().invocations.len(), 2);
    assert_eq!((counters.borrow().acquired, counters.borrow().released), (1, 1));
}

#[test]
fn abort_policy_ends_the_session() {
    let provider = MockProvider { faulty: vec![0], ..MockProvider::default() };
    let mut dispatcher =
        session(provider, vec![Key::Char('3'), Key::Char('2')]).with_policy(FaultPolicy::Abort);

    let err = dispatcher.run().unwrap_err();

    assert!(matches!(err, HarnessError::Engine { demo: DemonstrationId::ChshQuantum, .. }));
    assert_eq!(dispatcher.state(), DispatchState::Terminated);
    assert_eq!(dispatcher.summary().dispatched, 1);
    assert!(transcript(&dispatcher).contains("Error: chsh-quantum failed for default parameters"));
}

#[test]
fn refused_acquisition_is_a_fault() {
    let provider = MockProvider { refuse: true, ..MockProvider::default() };
    let counters = Rc::clone(&provider.counters);
    let mut dispatcher = session(provider, vec![Key::Char('2')]);

    assert_eq!(dispatcher.handle(Choice::Run(DemonstrationId::ChshClassical)).unwrap(), DispatchState::AwaitingChoice);
    assert_eq!(dispatcher.summary().faults, 1);
    assert!(counters.borrow().invocations.is_empty());
    assert!(transcript(&dispatcher).contains("Error: chsh-classical failed for default parameters: "));
}

#[test]
fn unregistered_demonstration_is_a_fault() {
    let dispatcher = Dispatcher::new(
        Registry::new(),
        MockProvider::default(),
        ScriptedInput::default(),
        Vec::new(),
    );
    let err = dispatcher.dispatch(DemonstrationId::ChshQuantum).unwrap_err();
    assert!(matches!(err, HarnessError::Unregistered { demo: DemonstrationId::ChshQuantum }));
}

#[test]
fn full_session_on_the_simulator() {
    let simulator = Simulator::with_config(SimulatorConfig { qubits: 3, rounds: 200, ..SimulatorConfig::default() });
    let registry = Registry::standard(3).unwrap();
    let keys = vec![Key::Char('1'), Key::Char('2'), Key::Char('3'), Key::Char('0'), Key::Escape];
    let mut dispatcher = Dispatcher::new(registry, simulator, ScriptedInput::new(keys), Vec::new());

    let summary = dispatcher.run().unwrap();

    assert_eq!(summary, SessionSummary { menus_shown: 5, dispatched: 4, faults: 0 });
    let text = String::from_utf8(dispatcher.into_output()).unwrap();
    assert!(text.contains("All 8 cases verified successfully!"));
    assert_eq!(text.matches("The result is ").count(), 3);
    assert!(text.contains(" Ha."));
    assert!(!text.contains("Error:"));
}
