//! Numerical constants shared by the engine and the demonstrations.

/// Tolerances used while evolving and validating state vectors.
pub mod tolerances {
    /// Allowed deviation of the squared norm from 1.0.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Amplitudes with a squared magnitude below this are treated as zero.
    pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;
}

/// Reduced two-qubit Hamiltonian of molecular hydrogen at 0.735 Å
/// (parity mapping with two-qubit reduction), in Hartree.
pub mod hydrogen {
    /// Coefficient of the identity term.
    pub const IDENTITY: f64 = -1.052_373_245_772_859;
    /// Coefficient of `Z` on qubit 0.
    pub const Z0: f64 = 0.397_937_424_843_180_45;
    /// Coefficient of `Z` on qubit 1.
    pub const Z1: f64 = -0.397_937_424_843_180_45;
    /// Coefficient of `Z0 Z1`.
    pub const Z0_Z1: f64 = -0.011_280_104_256_235_38;
    /// Coefficient of `X0 X1`.
    pub const X0_X1: f64 = 0.180_931_199_784_231_56;
    /// Nuclear repulsion energy added to the electronic energy.
    pub const NUCLEAR_REPULSION: f64 = 0.719_968_994_448_979_7;
}
