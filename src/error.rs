// error.rs - Error taxonomy for coupling analysis

use thiserror::Error;

/// Errors surfaced by the estimation engine.
///
/// Numeric degeneracies (zero normalisation weight, zero APC mean, pairs with
/// no common window) are never reported here; they resolve to sentinel cells
/// or an uncorrected matrix. Per-window failures are collected as
/// [`crate::core::ChunkFailure`] records instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CouplingError {
    /// Alignment holds no sequences or zero-length sequences
    #[error("Empty alignment: no sequences or zero alignment length")]
    EmptyAlignment,
    /// A record does not share the alignment length
    #[error("Sequence '{name}' has length {found}, expected {expected}")]
    UnequalLength {
        name: String,
        expected: usize,
        found: usize,
    },
    /// Every position was removed by gap/conservation filtering
    #[error("No valid positions remain after filtering ({positions} positions examined)")]
    NoValidPositions { positions: usize },
    /// Parameter set is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CouplingError {
    /// Structural problems with the input; fatal and never retried.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CouplingError::EmptyAlignment
                | CouplingError::UnequalLength { .. }
                | CouplingError::NoValidPositions { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(CouplingError::EmptyAlignment.is_input_error());
        assert!(CouplingError::NoValidPositions { positions: 10 }.is_input_error());
        assert!(!CouplingError::InvalidConfig("overlap".to_string()).is_input_error());
    }

    #[test]
    fn test_error_messages() {
        let err = CouplingError::UnequalLength {
            name: "seq_2".to_string(),
            expected: 12,
            found: 9,
        };
        assert_eq!(err.to_string(), "Sequence 'seq_2' has length 9, expected 12");
    }
}
