//! The interactive loop: show the menu, read a key, run the selection,
//! report, repeat until the operator quits.
//!
//! ```text
//! AwaitingChoice --valid key--> Dispatching --done--> Reporting --> AwaitingChoice
//!       |  ^
//!       |  +--unrecognized key (menu shown again)
//!       +--quit key--> Terminated
//! ```

use std::io::Write;

use super::console::InputSource;
use super::engine::{DemonstrationId, Engine, EngineProvider, Outcome, Parameters};
use super::error::HarnessError;
use super::registry::{Choice, Mode, Registry};
use super::verifier::{VerificationReport, verify};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    AwaitingChoice,
    Dispatching,
    Reporting,
    Terminated,
}

/// What to do when a demonstration run faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    /// Print the fault and return to the menu.
    #[default]
    Report,
    /// Print the fault and end the session with it.
    Abort,
}

/// Result of one successful dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Report {
    Outcome(Outcome),
    Verified(VerificationReport),
}

/// Counters for a finished (or running) session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub menus_shown: usize,
    pub dispatched: usize,
    pub faults: usize,
}

pub struct Dispatcher<P, In, W> {
    registry: Registry,
    provider: P,
    input: In,
    out: W,
    policy: FaultPolicy,
    state: DispatchState,
    summary: SessionSummary,
}

impl<P, In, W> Dispatcher<P, In, W>
where
    P: EngineProvider,
    In: InputSource,
    W: Write,
{
    pub fn new(registry: Registry, provider: P, input: In, out: W) -> Self {
        Self {
            registry,
            provider,
            input,
            out,
            policy: FaultPolicy::default(),
            state: DispatchState::AwaitingChoice,
            summary: SessionSummary::default(),
        }
    }

    pub fn with_policy(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn present_menu(&mut self) -> Result<(), HarnessError> {
        self.registry.render_menu(&mut self.out)?;
        self.out.flush()?;
        self.summary.menus_shown += 1;
        Ok(())
    }

    /// Blocks for one key and maps it onto a choice.
    pub fn read_choice(&mut self) -> Result<Choice, HarnessError> {
        let key = self.input.read_key()?;
        let choice = self.registry.choice_for(key);
        tracing::trace!(?key, ?choice, "key read");
        Ok(choice)
    }

    /// Runs `demo` on a freshly acquired engine.
    ///
    /// The engine lives for this call only and is dropped on every return
    /// path, including faults.
    pub fn dispatch(&self, demo: DemonstrationId) -> Result<Report, HarnessError> {
        let entry = self
            .registry
            .entry(demo)
            .ok_or(HarnessError::Unregistered { demo })?;
        let mut engine = self.provider.acquire().map_err(|source| HarnessError::Engine {
            demo,
            input: Parameters::Default,
            source,
        })?;
        tracing::info!(%demo, "dispatching");

        match &entry.mode {
            Mode::AdHoc => {
                let input = Parameters::Default;
                engine
                    .invoke(demo, &input)
                    .map(Report::Outcome)
                    .map_err(|source| HarnessError::Engine { demo, input, source })
            }
            Mode::Verified { domain, expected } => verify(
                |params: &Parameters| engine.invoke(demo, params),
                domain.iter().copied(),
                |params: &Parameters| expected(params),
            )
            .map(Report::Verified)
            .map_err(|err| HarnessError::from_verify(demo, err)),
        }
    }

    /// Acts on a choice that has already been read.
    pub fn handle(&mut self, choice: Choice) -> Result<DispatchState, HarnessError> {
        match choice {
            Choice::Quit => {
                writeln!(self.out, "Exiting...")?;
                self.out.flush()?;
                self.state = DispatchState::Terminated;
                tracing::info!(summary = ?self.summary, "session terminated");
            }
            Choice::None => {
                tracing::debug!("unrecognized input");
                self.state = DispatchState::AwaitingChoice;
            }
            Choice::Run(demo) => {
                self.state = DispatchState::Dispatching;
                self.summary.dispatched += 1;
                let result = self.dispatch(demo);
                self.state = DispatchState::Reporting;
                self.report(result)?;
                self.state = DispatchState::AwaitingChoice;
            }
        }
        Ok(self.state)
    }

    fn report(&mut self, result: Result<Report, HarnessError>) -> Result<(), HarnessError> {
        match result {
            Ok(Report::Outcome(outcome)) => writeln!(self.out, "The result is {outcome}.")?,
            Ok(Report::Verified(report)) => writeln!(
                self.out,
                "All {} cases verified successfully!",
                report.invocations
            )?,
            Err(err) if err.is_fault() => {
                self.summary.faults += 1;
                tracing::warn!(error = %err, "demonstration fault");
                writeln!(self.out, "Error: {err}")?;
                if self.policy == FaultPolicy::Abort {
                    self.out.flush()?;
                    self.state = DispatchState::Terminated;
                    return Err(err);
                }
            }
            Err(err) => {
                self.state = DispatchState::Terminated;
                return Err(err);
            }
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    /// One pass of the loop: menu, key, action.
    pub fn step(&mut self) -> Result<DispatchState, HarnessError> {
        if self.state == DispatchState::Terminated {
            return Ok(self.state);
        }
        self.present_menu()?;
        let choice = self.read_choice()?;
        self.handle(choice)
    }

    /// Loops until the operator quits.
    ///
    /// # Returns
    /// * `Ok(SessionSummary)` after the quit key.
    /// * `Err(HarnessError)` if the console fails, or on the first fault
    ///   under `FaultPolicy::Abort`.
    pub fn run(&mut self) -> Result<SessionSummary, HarnessError> {
        tracing::info!(policy = ?self.policy, "session started");
        while self.state != DispatchState::Terminated {
            if let Err(err) = self.step() {
                self.state = DispatchState::Terminated;
                return Err(err);
            }
        }
        Ok(self.summary)
    }
}
