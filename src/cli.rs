//! Command-line entry point: argument parsing, logging setup and the choice
//! between an interactive session and a one-shot dispatch.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Settings;
use crate::harness::{
    Choice, Dispatcher, EngineProvider, FaultPolicy, Key, Registry, ScriptedInput, TerminalInput,
};
use crate::simulation::{Simulator, SimulatorConfig};

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Run and verify small quantum algorithm demonstrations.
#[derive(Debug, Parser)]
#[command(name = "qharness")]
#[command(version)]
pub struct Cli {
    /// Register width of the Bernstein-Vazirani parity sweep
    #[arg(long, default_value_t = SimulatorConfig::default().qubits)]
    pub qubits: usize,

    /// Games played per CHSH invocation
    #[arg(long, default_value_t = SimulatorConfig::default().rounds)]
    pub rounds: u32,

    /// Base seed for measurement outcomes and referee questions
    #[arg(long, default_value_t = SimulatorConfig::default().seed)]
    pub seed: u64,

    /// Log filter written to stderr (e.g. "warn", "qharness=debug")
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// End the interactive session on the first demonstration fault
    #[arg(long)]
    pub fatal_faults: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dispatch a single menu key and exit
    Run {
        /// Menu key of the demonstration (see `list`)
        key: char,
    },
    /// Print the menu and exit
    List,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            qubits: self.qubits,
            rounds: self.rounds,
            seed: self.seed,
            fatal_faults: self.fatal_faults,
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(&cli.log_level) {
        eprintln!("Error: {err:#}");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let settings = cli.settings();
    if let Err(err) = settings.validate() {
        eprintln!("Error: {err}");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    ExitCode::from(exit_code(execute(cli.command, settings)))
}

/// Maps the outcome of a session onto the process exit code, printing any
/// error that ended it.
fn exit_code(result: anyhow::Result<u8>) -> u8 {
    match result {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "session ended with an error");
            eprintln!("Error: {err:#}");
            EXIT_ERROR
        }
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level).with_context(|| format!("invalid --log-level '{level}'"))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init()
        .context("installing the log subscriber")?;
    Ok(())
}

fn execute(command: Option<Command>, settings: Settings) -> anyhow::Result<u8> {
    let registry = Registry::standard(settings.qubits).context("building the demonstration registry")?;
    let simulator = Simulator::with_config(settings.simulator_config());
    tracing::debug!(?settings, "starting");

    match command {
        None => {
            let mut dispatcher = Dispatcher::new(registry, simulator, TerminalInput::new(), io::stdout())
                .with_policy(settings.fault_policy());
            let summary = dispatcher.run()?;
            tracing::info!(?summary, "session finished");
            Ok(EXIT_SUCCESS)
        }
        Some(Command::List) => {
            let mut out = io::stdout().lock();
            registry.render_menu(&mut out)?;
            out.flush()?;
            Ok(EXIT_SUCCESS)
        }
        Some(Command::Run { key }) => run_once(registry, simulator, key, io::stdout()),
    }
}

/// Dispatches the demonstration bound to `key` without showing the menu.
///
/// Any fault aborts with an error; an unbound key is an argument error.
pub(crate) fn run_once<P, W>(registry: Registry, provider: P, key: char, out: W) -> anyhow::Result<u8>
where
    P: EngineProvider,
    W: Write,
{
    let demo = match registry.choice_for(Key::Char(key)) {
        Choice::Run(demo) => demo,
        _ => {
            eprintln!("Error: no demonstration is bound to key '{key}'");
            return Ok(EXIT_INVALID_ARGS);
        }
    };
    let mut dispatcher = Dispatcher::new(registry, provider, ScriptedInput::default(), out)
        .with_policy(FaultPolicy::Abort);
    dispatcher
        .handle(Choice::Run(demo))
        .with_context(|| format!("running {demo}"))?;
    Ok(EXIT_SUCCESS)
}
