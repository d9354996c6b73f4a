// config.rs - Immutable parameter set for coupling analysis

use crate::core::alphabet::Pseudocount;
use crate::error::CouplingError;
use serde::{Deserialize, Serialize};

/// Parameters for one coupling analysis. Built once at the boundary and
/// passed by reference into every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingConfig {
    /// Alignments longer than this are split into windows
    pub max_length: usize,
    pub chunk_size: usize,
    pub overlap: usize,
    /// Maximum gap fraction for a position to be scored
    pub gap_threshold: f64,
    /// Accepted (low, high) conservation of the most common symbol
    pub conservation_range: (f64, f64),
    pub pseudocount: Pseudocount,
    pub use_sequence_weighting: bool,
    /// Sequences more identical than this are treated as redundant
    pub identity_threshold: f64,
    pub min_pair_separation: usize,
    pub top_k: usize,
    pub smoothing: bool,
    pub smoothing_sigma: f64,
    pub short_range_damping: bool,
    /// Drop whole sequences whose gap fraction exceeds this
    pub sequence_gap_threshold: Option<f64>,
    /// Keep at most this many sequences (highest weight first)
    pub max_sequences: Option<usize>,
    pub parallel: bool,
    pub show_progress: bool,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            max_length: 750,
            chunk_size: 600,
            overlap: 200,
            gap_threshold: 0.5,
            conservation_range: (0.2, 0.95),
            pseudocount: Pseudocount::Adaptive,
            use_sequence_weighting: true,
            identity_threshold: 0.8,
            min_pair_separation: 4,
            top_k: 100,
            smoothing: true,
            smoothing_sigma: 0.6,
            short_range_damping: false,
            sequence_gap_threshold: None,
            max_sequences: None,
            parallel: true,
            show_progress: false,
        }
    }
}

impl CouplingConfig {
    /// Check parameter consistency.
    pub fn validate(&self) -> Result<(), CouplingError> {
        let invalid = |msg: String| Err(CouplingError::InvalidConfig(msg));

        if self.chunk_size == 0 {
            return invalid("chunk_size must be greater than 0".to_string());
        }
        if self.overlap >= self.chunk_size {
            return invalid(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            ));
        }
        if !(0.0..=1.0).contains(&self.gap_threshold) {
            return invalid("gap_threshold must be between 0.0 and 1.0".to_string());
        }
        let (low, high) = self.conservation_range;
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
            return invalid(format!(
                "conservation_range must satisfy 0.0 <= low <= high <= 1.0, got ({}, {})",
                low, high
            ));
        }
        if let Pseudocount::Fixed(alpha) = self.pseudocount {
            if !alpha.is_finite() || alpha < 0.0 {
                return invalid(format!("pseudocount must be non-negative, got {}", alpha));
            }
        }
        if !(0.0..=1.0).contains(&self.identity_threshold) {
            return invalid("identity_threshold must be between 0.0 and 1.0".to_string());
        }
        if self.smoothing && !(self.smoothing_sigma.is_finite() && self.smoothing_sigma > 0.0) {
            return invalid(format!(
                "smoothing_sigma must be positive, got {}",
                self.smoothing_sigma
            ));
        }
        if let Some(threshold) = self.sequence_gap_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return invalid("sequence_gap_threshold must be between 0.0 and 1.0".to_string());
            }
        }
        if self.max_sequences == Some(0) {
            return invalid("max_sequences must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CouplingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_overlap_not_smaller_than_chunk() {
        let config = CouplingConfig {
            chunk_size: 200,
            overlap: 200,
            ..CouplingConfig::default()
        };
        assert!(matches!(config.validate(), Err(CouplingError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_inverted_conservation_range() {
        let config = CouplingConfig {
            conservation_range: (0.9, 0.2),
            ..CouplingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_pseudocount() {
        let config = CouplingConfig {
            pseudocount: Pseudocount::Fixed(-0.1),
            ..CouplingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip_of_pseudocount_choice() {
        let config = CouplingConfig {
            pseudocount: Pseudocount::Fixed(0.3),
            ..CouplingConfig::default()
        };
        let text = serde_json::to_string(&config).unwrap();
        let parsed: CouplingConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
