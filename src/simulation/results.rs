// src/simulation/results.rs
use crate::core::{EngineError, QubitId};
use std::collections::HashMap;
use std::fmt;

/// Measured bits of a circuit run, keyed by qubit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationResult {
    measurements: HashMap<QubitId, bool>,
}

impl SimulationResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a measured bit. A later measurement of the same qubit wins.
    pub(crate) fn record(&mut self, qubit: QubitId, bit: bool) {
        self.measurements.insert(qubit, bit);
    }

    /// The measured bit for `qubit`, or `None` if it was never measured.
    pub fn measurement(&self, qubit: &QubitId) -> Option<bool> {
        self.measurements.get(qubit).copied()
    }

    pub fn all_measurements(&self) -> &HashMap<QubitId, bool> {
        &self.measurements
    }

    /// Packs the bits of `register` into an integer, `register[i]` being bit `i`.
    pub fn read_register(&self, register: &[QubitId]) -> Result<u64, EngineError> {
        if register.len() > 64 {
            return Err(EngineError::invalid(format!(
                "register of {} qubits does not fit in 64 bits",
                register.len()
            )));
        }
        register.iter().enumerate().try_fold(0u64, |acc, (i, qubit)| {
            let bit = self.measurement(qubit).ok_or_else(|| EngineError::UnknownQubit {
                qubit: *qubit,
                message: "qubit was not measured".to_string(),
            })?;
            Ok(acc | (u64::from(bit) << i))
        })
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.measurements.is_empty() {
            return writeln!(f, "  No qubits were measured.");
        }
        let mut sorted: Vec<_> = self.measurements.iter().collect();
        sorted.sort_by_key(|(id, _)| **id);
        for (id, bit) in sorted {
            writeln!(f, "  {}: {}", id, u8::from(*bit))?;
        }
        Ok(())
    }
}
