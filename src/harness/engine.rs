//! The boundary between the harness and whatever executes demonstrations.
//!
//! The harness only relies on [`Engine::invoke`]: given a demonstration and
//! its parameters, produce an [`Outcome`] or fail with an [`EngineError`].
//! Engines are obtained from an [`EngineProvider`] and released by dropping
//! them, so the scope that acquired an engine also bounds its lifetime.

use std::fmt;

use crate::core::EngineError;

/// Largest register the Bernstein-Vazirani sweep accepts.
pub const MAX_PARITY_QUBITS: usize = 12;

/// Every demonstration the engine knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DemonstrationId {
    HydrogenGroundState = 0,
    BernsteinVazirani = 1,
    ChshClassical = 2,
    ChshQuantum = 3,
}

impl DemonstrationId {
    pub const ALL: [DemonstrationId; 4] = [
        DemonstrationId::HydrogenGroundState,
        DemonstrationId::BernsteinVazirani,
        DemonstrationId::ChshClassical,
        DemonstrationId::ChshQuantum,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DemonstrationId::HydrogenGroundState => "hydrogen-ground-state",
            DemonstrationId::BernsteinVazirani => "bernstein-vazirani",
            DemonstrationId::ChshClassical => "chsh-classical",
            DemonstrationId::ChshQuantum => "chsh-quantum",
        }
    }
}

impl fmt::Display for DemonstrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Input handed to a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameters {
    /// Run with the engine's configured defaults.
    Default,
    /// Recover `parity` hidden in an oracle over `qubits` input bits.
    HiddenParity { qubits: usize, parity: u64 },
}

impl Parameters {
    /// Every hidden parity of a `qubits`-bit register, in ascending order.
    ///
    /// Empty unless `qubits` is in `1..=MAX_PARITY_QUBITS`.
    pub fn parity_domain(qubits: usize) -> Vec<Parameters> {
        if !(1..=MAX_PARITY_QUBITS).contains(&qubits) {
            return Vec::new();
        }
        (0..1u64 << qubits)
            .map(|parity| Parameters::HiddenParity { qubits, parity })
            .collect()
    }

    /// The hidden parity these parameters ask for; `Default` hides zero.
    pub fn parity(&self) -> u64 {
        match self {
            Parameters::Default => 0,
            Parameters::HiddenParity { parity, .. } => *parity,
        }
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameters::Default => f.write_str("default parameters"),
            Parameters::HiddenParity { qubits, parity } => {
                write!(f, "parity {parity} ({parity:0width$b}) on {qubits} qubits", width = *qubits)
            }
        }
    }
}

/// Value produced by one invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// A measured register, e.g. a recovered parity.
    Bits(u64),
    /// Fraction of games won.
    WinRate(f64),
    /// An energy in Hartree.
    Energy(f64),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Bits(bits) => write!(f, "{bits}"),
            Outcome::WinRate(rate) => write!(f, "{rate:.4}"),
            Outcome::Energy(energy) => write!(f, "{energy:.6} Ha"),
        }
    }
}

/// Something that can run demonstrations.
pub trait Engine {
    fn invoke(&mut self, demo: DemonstrationId, params: &Parameters) -> Result<Outcome, EngineError>;
}

/// Hands out engines. Dropping the returned engine releases it.
pub trait EngineProvider {
    type Engine: Engine;

    fn acquire(&self) -> Result<Self::Engine, EngineError>;
}

impl<E: Engine + ?Sized> Engine for &mut E {
    fn invoke(&mut self, demo: DemonstrationId, params: &Parameters) -> Result<Outcome, EngineError> {
        (**self).invoke(demo, params)
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn invoke(&mut self, demo: DemonstrationId, params: &Parameters) -> Result<Outcome, EngineError> {
        (**self).invoke(demo, params)
    }
}
