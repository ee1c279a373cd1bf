//! Exhaustive checking of a demonstration over a parameter domain.
//!
//! [`verify`] invokes the demonstration once per domain value and compares
//! each outcome with the expected one, stopping at the first mismatch. An
//! engine fault is reported as [`VerifyError::Engine`], never as a mismatch.

use std::fmt;

use thiserror::Error;

use crate::core::EngineError;

/// Summary of a fully successful sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationReport {
    /// Number of domain values invoked (equals the domain size).
    pub invocations: usize,
}

/// The first domain value whose outcome differed from the expected one.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("measured {actual} for {input}, but expected {expected}")]
pub struct VerificationFailure<I, O> {
    pub input: I,
    pub actual: O,
    pub expected: O,
    /// Invocations performed up to and including the failing one.
    pub invocations: usize,
}

/// Why a sweep did not succeed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerifyError<I: fmt::Debug, O: fmt::Debug> {
    /// The domain had no values to check.
    #[error("verification domain is empty")]
    EmptyDomain,
    /// The engine could not produce an outcome for `input`.
    #[error("engine failure for {input}: {source}")]
    Engine { input: I, source: EngineError },
    /// The engine produced a wrong outcome.
    #[error("{0}")]
    Mismatch(VerificationFailure<I, O>),
}

/// Checks `demonstration(v) == expected(v)` for every `v` in `domain`.
///
/// Values are visited in the domain's iteration order and each is invoked
/// exactly once. The sweep stops at the first engine fault or mismatch.
///
/// # Returns
/// * `Ok(VerificationReport)` when every value matched.
/// * `Err(VerifyError::EmptyDomain)` when `domain` yields nothing.
/// * `Err(VerifyError::Engine)` when an invocation faulted.
/// * `Err(VerifyError::Mismatch)` with the offending input, actual and
///   expected outcome on the first mismatch.
pub fn verify<I, O, D, F, X>(
    mut demonstration: F,
    domain: D,
    expected: X,
) -> Result<VerificationReport, VerifyError<I, O>>
where
    D: IntoIterator<Item = I>,
    F: FnMut(&I) -> Result<O, EngineError>,
    X: Fn(&I) -> O,
    I: fmt::Debug,
    O: PartialEq + fmt::Debug,
{
    let mut invocations = 0;
    for input in domain {
        invocations += 1;
        let actual = match demonstration(&input) {
            Ok(actual) => actual,
            Err(source) => {
                tracing::warn!(?input, %source, "engine failure during verification");
                return Err(VerifyError::Engine { input, source });
            }
        };
        let wanted = expected(&input);
        if actual != wanted {
            tracing::warn!(?input, ?actual, expected = ?wanted, invocations, "verification mismatch");
            return Err(VerifyError::Mismatch(VerificationFailure {
                input,
                actual,
                expected: wanted,
                invocations,
            }));
        }
        tracing::trace!(?input, ?actual, "verified");
    }

    if invocations == 0 {
        return Err(VerifyError::EmptyDomain);
    }
    tracing::debug!(invocations, "verification sweep passed");
    Ok(VerificationReport { invocations })
}
