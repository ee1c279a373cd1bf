// src/simulation/session.rs
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::Simulator;
use crate::core::EngineError;
use crate::demonstrations::{bernstein_vazirani, chsh, hydrogen};
use crate::harness::engine::{DemonstrationId, Engine, Outcome, Parameters};

/// An acquired simulator. Dropping the session releases it.
#[derive(Debug)]
pub struct SimulationSession {
    simulator: Simulator,
    invocations: u64,
}

impl SimulationSession {
    pub(crate) fn open(simulator: Simulator) -> Result<Self, EngineError> {
        let config = simulator.config();
        if config.qubits == 0 || config.rounds == 0 {
            return Err(EngineError::simulation(format!(
                "cannot open a session with {} qubits and {} rounds",
                config.qubits, config.rounds
            )));
        }
        tracing::debug!(seed = config.seed, "simulation session acquired");
        Ok(Self { simulator, invocations: 0 })
    }

    /// Number of invocations served so far.
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Seed of one invocation: a pure function of the configured seed, the
    /// demonstration and its parameters, so repeating an invocation repeats
    /// its outcome on every platform and toolchain.
    fn invocation_seed(&self, demo: DemonstrationId, params: &Parameters) -> u64 {
        let words = match *params {
            Parameters::Default => [0, 0, 0],
            Parameters::HiddenParity { qubits, parity } => [1, qubits as u64, parity],
        };
        std::iter::once(demo as u64)
            .chain(words)
            .fold(splitmix64(self.simulator.config().seed), |acc, word| splitmix64(acc ^ word))
    }

    fn invocation_rng(&self, demo: DemonstrationId, params: &Parameters) -> StdRng {
        StdRng::seed_from_u64(self.invocation_seed(demo, params))
    }
}

/// One SplitMix64 output step for `state`.
fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl Engine for SimulationSession {
    fn invoke(&mut self, demo: DemonstrationId, params: &Parameters) -> Result<Outcome, EngineError> {
        self.invocations += 1;
        let mut rng = self.invocation_rng(demo, params);
        let config = *self.simulator.config();
        let simulator = &self.simulator;

        let outcome = match demo {
            DemonstrationId::HydrogenGroundState => {
                Outcome::Energy(hydrogen::ground_state_energy(simulator)?)
            }
            DemonstrationId::BernsteinVazirani => {
                let qubits = match params {
                    Parameters::HiddenParity { qubits, .. } => *qubits,
                    Parameters::Default => config.qubits,
                };
                let parity = bernstein_vazirani::recover_parity(simulator, qubits, params.parity(), &mut rng)?;
                Outcome::Bits(parity)
            }
            DemonstrationId::ChshClassical => {
                Outcome::WinRate(chsh::classical_win_rate(config.rounds, &mut rng)?)
            }
            DemonstrationId::ChshQuantum => {
                Outcome::WinRate(chsh::quantum_win_rate(simulator, config.rounds, &mut rng)?)
            }
        };
        tracing::debug!(%demo, %params, %outcome, "invocation complete");
        Ok(outcome)
    }
}

impl Drop for SimulationSession {
    fn drop(&mut self) {
        tracing::debug!(invocations = self.invocations, "simulation session released");
    }
}
