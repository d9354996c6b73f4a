// identity.rs - Redundancy down-weighting by pairwise sequence identity

use super::SequenceWeighter;
use crate::core::alphabet::GAP;
use crate::core::executor::{Execution, Executor};

/// Weight `1 / (1 + n)` where `n` counts the other sequences whose identity
/// with this one exceeds `threshold`. Identity is measured over the columns
/// where neither sequence has a gap; a pair with no such columns is not
/// similar.
#[derive(Debug, Clone, Copy)]
pub struct IdentityWeighter {
    threshold: f64,
}

impl IdentityWeighter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Identity over jointly non-gap columns, `None` when there are none
pub fn pairwise_identity(a: &[u8], b: &[u8]) -> Option<f64> {
    let mut compared = 0usize;
    let mut matches = 0usize;
    for (&x, &y) in a.iter().zip(b.iter()) {
        if x == GAP || y == GAP {
            continue;
        }
        compared += 1;
        if x == y {
            matches += 1;
        }
    }
    if compared == 0 {
        None
    } else {
        Some(matches as f64 / compared as f64)
    }
}

impl SequenceWeighter for IdentityWeighter {
    fn weigh(&self, rows: &[&[u8]], exec: &Execution) -> Vec<f64> {
        let n = rows.len();

        // similar[i] for each row, computed independently per row
        let similar: Vec<usize> = exec.map_indexed(n, |i| {
            (0..n)
                .filter(|&j| j != i)
                .filter(|&j| {
                    pairwise_identity(rows[i], rows[j])
                        .map(|id| id > self.threshold)
                        .unwrap_or(false)
                })
                .count()
        });

        similar.into_iter().map(|count| 1.0 / (1.0 + count as f64)).collect()
    }

    fn name(&self) -> &'static str {
        "identity"
    }

    fn description(&self) -> String {
        format!("Identity weighting (threshold: {:.2})", self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alphabet::encode_sequence;

    fn rows(seqs: &[&str]) -> Vec<Vec<u8>> {
        seqs.iter().map(|s| encode_sequence(s.as_bytes())).collect()
    }

    #[test]
    fn test_identical_pair_is_halved() {
        let encoded = rows(&["ACGUACGU", "ACGUACGU", "UGCAUGCA"]);
        let views: Vec<&[u8]> = encoded.iter().map(|r| r.as_slice()).collect();
        let weights = IdentityWeighter::new(0.8).weigh(&views, &Execution::Sequential);
        assert_eq!(weights, vec![0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_identity_ignores_gap_columns() {
        let a = encode_sequence(b"AC--GU");
        let b = encode_sequence(b"ACGGGA");
        // compared: A/A C/C G/G U/A
        assert_eq!(pairwise_identity(&a, &b), Some(0.75));
        let gaps = encode_sequence(b"------");
        assert_eq!(pairwise_identity(&a, &gaps), None);
    }

    #[test]
    fn test_threshold_is_strict() {
        // identity exactly 0.75 does not exceed 0.75
        let encoded = rows(&["ACGU", "ACGA"]);
        let views: Vec<&[u8]> = encoded.iter().map(|r| r.as_slice()).collect();
        let weights = IdentityWeighter::new(0.75).weigh(&views, &Execution::Parallel);
        assert_eq!(weights, vec![1.0, 1.0]);
    }

    #[test]
    fn test_strategies_agree() {
        let encoded = rows(&["ACGUAC", "ACGUAA", "GGGUAC", "ACG-AC", "UUUUUU"]);
        let views: Vec<&[u8]> = encoded.iter().map(|r| r.as_slice()).collect();
        let weighter = IdentityWeighter::new(0.6);
        assert_eq!(
            weighter.weigh(&views, &Execution::Sequential),
            weighter.weigh(&views, &Execution::Parallel)
        );
    }
}
