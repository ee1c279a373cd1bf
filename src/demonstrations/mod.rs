// src/demonstrations/mod.rs

//! Algorithm bodies run by the simulator on behalf of the harness.
//!
//! Each demonstration builds circuits from `crate::operations` and executes
//! them on a [`crate::simulation::Simulator`]. Randomness comes from the
//! caller's seeded RNG so an invocation can be replayed exactly.

pub mod bernstein_vazirani;
pub mod chsh;
pub mod hydrogen;
