//! Runtime settings, assembled from the command line and checked once at
//! startup.

use thiserror::Error;

use crate::harness::{FaultPolicy, MAX_PARITY_QUBITS};
use crate::simulation::SimulatorConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("--qubits must be between 1 and {max}, got {qubits}")]
    QubitsOutOfRange { qubits: usize, max: usize },

    #[error("--rounds must be at least 1")]
    ZeroRounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Width of the Bernstein-Vazirani register swept by the verifier.
    pub qubits: usize,
    /// Games played per CHSH invocation.
    pub rounds: u32,
    pub seed: u64,
    /// End the session on the first demonstration fault.
    pub fatal_faults: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let sim = SimulatorConfig::default();
        Self {
            qubits: sim.qubits,
            rounds: sim.rounds,
            seed: sim.seed,
            fatal_faults: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.qubits == 0 || self.qubits > MAX_PARITY_QUBITS {
            return Err(ConfigError::QubitsOutOfRange {
                qubits: self.qubits,
                max: MAX_PARITY_QUBITS,
            });
        }
        if self.rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        Ok(())
    }

    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            seed: self.seed,
            qubits: self.qubits,
            rounds: self.rounds,
        }
    }

    pub fn fault_policy(&self) -> FaultPolicy {
        if self.fatal_faults {
            FaultPolicy::Abort
        } else {
            FaultPolicy::Report
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.qubits, 4);
        assert_eq!(settings.rounds, 1000);
        assert_eq!(settings.fault_policy(), FaultPolicy::Report);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let settings = Settings { qubits: 0, ..Settings::default() };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::QubitsOutOfRange { qubits: 0, max: MAX_PARITY_QUBITS })
        );

        let settings = Settings { qubits: MAX_PARITY_QUBITS + 1, ..Settings::default() };
        assert!(settings.validate().is_err());

        let settings = Settings { rounds: 0, ..Settings::default() };
        assert_eq!(settings.validate(), Err(ConfigError::ZeroRounds));
    }

    #[test]
    fn settings_flow_into_simulator() {
        let settings = Settings { qubits: 6, rounds: 50, seed: 9, fatal_faults: true };
        let sim = settings.simulator_config();
        assert_eq!((sim.qubits, sim.rounds, sim.seed), (6, 50, 9));
        assert_eq!(settings.fault_policy(), FaultPolicy::Abort);
    }
}
