//! The menu: a lookup table from keys to demonstrations, built once.

use std::fmt;
use std::io::{self, Write};

use super::console::Key;
use super::engine::{DemonstrationId, MAX_PARITY_QUBITS, Outcome, Parameters};
use super::error::RegistryError;

/// What the operator asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Quit,
    Run(DemonstrationId),
    /// Unrecognized input; the menu is shown again.
    None,
}

/// Maps a domain value to the outcome it must produce.
pub type ExpectedFn = fn(&Parameters) -> Outcome;

/// How a demonstration is driven when selected.
#[derive(Clone)]
pub enum Mode {
    /// One invocation with default parameters; the outcome is printed.
    AdHoc,
    /// One invocation per domain value, each checked against `expected`.
    Verified {
        domain: Vec<Parameters>,
        expected: ExpectedFn,
    },
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::AdHoc => f.write_str("AdHoc"),
            Mode::Verified { domain, .. } => f
                .debug_struct("Verified")
                .field("domain_len", &domain.len())
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub key: char,
    pub id: DemonstrationId,
    pub label: String,
    pub mode: Mode,
}

/// Expected outcome of Bernstein-Vazirani: the hidden parity itself.
pub fn recovered_parity(params: &Parameters) -> Outcome {
    Outcome::Bits(params.parity())
}

/// Ordered catalog of menu entries. Every key and every demonstration
/// appears at most once.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard catalog, with the parity sweep over `qubits` bits.
    ///
    /// `qubits` must be in `1..=MAX_PARITY_QUBITS`.
    pub fn standard(qubits: usize) -> Result<Self, RegistryError> {
        if !(1..=MAX_PARITY_QUBITS).contains(&qubits) {
            return Err(RegistryError::QubitsOutOfRange { qubits, max: MAX_PARITY_QUBITS });
        }
        let mut registry = Self::new();
        registry.register(Entry {
            key: '0',
            id: DemonstrationId::HydrogenGroundState,
            label: "Hydrogen ground-state energy".to_string(),
            mode: Mode::AdHoc,
        })?;
        let domain = Parameters::parity_domain(qubits);
        registry.register(Entry {
            key: '1',
            id: DemonstrationId::BernsteinVazirani,
            label: format!(
                "Bernstein-Vazirani parity sweep ({qubits} qubits, {} cases)",
                domain.len()
            ),
            mode: Mode::Verified { domain, expected: recovered_parity },
        })?;
        registry.register(Entry {
            key: '2',
            id: DemonstrationId::ChshClassical,
            label: "CHSH game, classical strategy".to_string(),
            mode: Mode::AdHoc,
        })?;
        registry.register(Entry {
            key: '3',
            id: DemonstrationId::ChshQuantum,
            label: "CHSH game, quantum strategy".to_string(),
            mode: Mode::AdHoc,
        })?;
        Ok(registry)
    }

    pub fn register(&mut self, entry: Entry) -> Result<(), RegistryError> {
        if self.entries.iter().any(|e| e.key == entry.key) {
            return Err(RegistryError::DuplicateKey(entry.key));
        }
        if self.entries.iter().any(|e| e.id == entry.id) {
            return Err(RegistryError::DuplicateDemonstration(entry.id));
        }
        if let Mode::Verified { domain, .. } = &entry.mode
            && domain.is_empty()
        {
            return Err(RegistryError::EmptyDomain(entry.id));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: DemonstrationId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Maps one key press onto a choice.
    pub fn choice_for(&self, key: Key) -> Choice {
        match key {
            Key::Escape | Key::Interrupt => Choice::Quit,
            Key::Char(c) => self
                .entries
                .iter()
                .find(|e| e.key == c)
                .map_or(Choice::None, |e| Choice::Run(e.id)),
            Key::Other => Choice::None,
        }
    }

    pub fn render_menu<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Available demonstrations:")?;
        for entry in &self.entries {
            writeln!(out, "{}: {}", entry.key, entry.label)?;
        }
        writeln!(out, "ESC: Quit")?;
        writeln!(out)
    }
}
