// src/core/qubit.rs

use std::fmt;

/// Identifier of a qubit within a single circuit.
///
/// Identifiers only need to be unique inside one circuit; the engine maps
/// them onto state-vector positions in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl QubitId {
    /// Returns `count` consecutive identifiers starting at `first`.
    pub fn range(first: u64, count: usize) -> Vec<QubitId> {
        (first..first + count as u64).map(QubitId).collect()
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_consecutive() {
        assert_eq!(QubitId::range(3, 3), vec![QubitId(3), QubitId(4), QubitId(5)]);
        assert!(QubitId::range(0, 0).is_empty());
    }
}
