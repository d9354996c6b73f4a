// mod.rs - Sequence weighting module root

pub mod identity;
pub mod uniform;

pub use identity::IdentityWeighter;
pub use uniform::UniformWeighter;

use crate::core::config::CouplingConfig;
use crate::core::executor::Execution;

/// Assigns each aligned sequence a non-negative weight so that clusters of
/// near-identical sequences do not dominate frequency estimates.
pub trait SequenceWeighter: Send + Sync + std::fmt::Debug {
    /// Weights for `rows`, one per row, in row order
    fn weigh(&self, rows: &[&[u8]], exec: &Execution) -> Vec<f64>;

    /// Scheme name for logs and result metadata
    fn name(&self) -> &'static str;

    fn description(&self) -> String;
}

/// Effective number of sequences: the sum of the weights
pub fn effective_count(weights: &[f64]) -> f64 {
    weights.iter().sum()
}

/// Pick the weighting scheme the configuration asks for
pub fn weighter_from_config(config: &CouplingConfig) -> Box<dyn SequenceWeighter> {
    if config.use_sequence_weighting {
        Box::new(IdentityWeighter::new(config.identity_threshold))
    } else {
        Box::new(UniformWeighter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_follows_config() {
        let weighted = weighter_from_config(&CouplingConfig::default());
        assert_eq!(weighted.name(), "identity");

        let config = CouplingConfig {
            use_sequence_weighting: false,
            ..CouplingConfig::default()
        };
        assert_eq!(weighter_from_config(&config).name(), "uniform");
    }

    #[test]
    fn test_effective_count() {
        assert_eq!(effective_count(&[0.5, 0.5, 1.0]), 2.0);
        assert_eq!(effective_count(&[]), 0.0);
    }
}
