// frequency.rs - Weighted, pseudocount-smoothed frequency tables

use crate::core::alphabet::{ALPHABET_SIZE, GAP};
use crate::core::config::CouplingConfig;
use crate::data::alignment::AlignmentWindow;

const PAIR_CELLS: f64 = (ALPHABET_SIZE * ALPHABET_SIZE) as f64;

/// Single-position distribution over the full alphabet (gap included)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteFrequencies {
    pub probs: [f64; ALPHABET_SIZE],
}

impl SiteFrequencies {
    pub fn total(&self) -> f64 {
        self.probs.iter().sum()
    }
}

/// Joint distribution for a position pair, `probs[a][b]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairFrequencies {
    pub probs: [[f64; ALPHABET_SIZE]; ALPHABET_SIZE],
}

impl PairFrequencies {
    pub fn total(&self) -> f64 {
        self.probs.iter().flat_map(|row| row.iter()).sum()
    }
}

/// Filtering statistics of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnProfile {
    /// Unweighted fraction of gap symbols
    pub gap_fraction: f64,
    /// Weighted frequency of the most common symbol (gaps included)
    pub conservation: f64,
    /// Total weight of sequences carrying a non-gap symbol
    pub residue_weight: f64,
}

/// Gap and conservation thresholds deciding which columns are scored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFilter {
    pub gap_threshold: f64,
    pub conservation_range: (f64, f64),
}

impl PositionFilter {
    pub fn from_config(config: &CouplingConfig) -> Self {
        Self {
            gap_threshold: config.gap_threshold,
            conservation_range: config.conservation_range,
        }
    }

    pub fn accepts(&self, profile: &ColumnProfile) -> bool {
        let (low, high) = self.conservation_range;
        profile.residue_weight > 0.0
            && profile.gap_fraction <= self.gap_threshold
            && profile.conservation >= low
            && profile.conservation <= high
    }
}

/// Builds frequency tables from encoded columns with fixed sequence weights
/// and a concrete pseudocount α.
///
/// `P(a)   = (Σ w·[a] + α/|A|)  / (W + α)`
/// `P(a,b) = (Σ w·[a,b] + α/|A|²) / (W + α)`
///
/// With α = 0 the pseudocount terms are skipped entirely and the plain
/// weighted counts are divided by W.
#[derive(Debug, Clone)]
pub struct FrequencyEstimator<'w> {
    weights: &'w [f64],
    total_weight: f64,
    pseudocount: f64,
}

impl<'w> FrequencyEstimator<'w> {
    pub fn new(weights: &'w [f64], pseudocount: f64) -> Self {
        Self {
            weights,
            total_weight: weights.iter().sum(),
            pseudocount,
        }
    }

    pub fn pseudocount(&self) -> f64 {
        self.pseudocount
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    fn site_counts(&self, column: &[u8]) -> [f64; ALPHABET_SIZE] {
        let mut counts = [0.0; ALPHABET_SIZE];
        for (&symbol, &w) in column.iter().zip(self.weights) {
            counts[symbol as usize] += w;
        }
        counts
    }

    pub fn profile(&self, column: &[u8]) -> ColumnProfile {
        let counts = self.site_counts(column);
        let gaps = column.iter().filter(|&&s| s == GAP).count();
        let gap_fraction = if column.is_empty() {
            1.0
        } else {
            gaps as f64 / column.len() as f64
        };
        let conservation = if self.total_weight > 0.0 {
            counts.iter().cloned().fold(0.0, f64::max) / self.total_weight
        } else {
            0.0
        };
        ColumnProfile {
            gap_fraction,
            conservation,
            residue_weight: self.total_weight - counts[GAP as usize],
        }
    }

    /// Single-position distribution, `None` when no weight carries a residue
    /// at this column.
    pub fn site(&self, column: &[u8]) -> Option<SiteFrequencies> {
        let counts = self.site_counts(column);
        if self.total_weight <= 0.0 || self.total_weight - counts[GAP as usize] <= 0.0 {
            return None;
        }

        let mut probs = [0.0; ALPHABET_SIZE];
        if self.pseudocount > 0.0 {
            let denom = self.total_weight + self.pseudocount;
            let share = self.pseudocount / ALPHABET_SIZE as f64;
            for (p, c) in probs.iter_mut().zip(counts.iter()) {
                *p = (c + share) / denom;
            }
        } else {
            for (p, c) in probs.iter_mut().zip(counts.iter()) {
                *p = c / self.total_weight;
            }
        }
        Some(SiteFrequencies { probs })
    }

    /// Joint distribution of two columns
    pub fn pair(&self, first: &[u8], second: &[u8]) -> PairFrequencies {
        let mut probs = [[0.0; ALPHABET_SIZE]; ALPHABET_SIZE];
        for ((&a, &b), &w) in first.iter().zip(second).zip(self.weights) {
            probs[a as usize][b as usize] += w;
        }

        if self.total_weight <= 0.0 {
            return PairFrequencies { probs };
        }
        if self.pseudocount > 0.0 {
            let denom = self.total_weight + self.pseudocount;
            let share = self.pseudocount / PAIR_CELLS;
            for cell in probs.iter_mut().flat_map(|row| row.iter_mut()) {
                *cell = (*cell + share) / denom;
            }
        } else {
            for cell in probs.iter_mut().flat_map(|row| row.iter_mut()) {
                *cell /= self.total_weight;
            }
        }
        PairFrequencies { probs }
    }

    /// Site tables for every column of `window`; filtered or unsupported
    /// columns are `None`.
    pub fn window_sites(
        &self,
        window: &AlignmentWindow<'_>,
        filter: &PositionFilter,
    ) -> Vec<Option<SiteFrequencies>> {
        filtered_sites(window, filter, self, self)
    }
}

/// Site tables from `counter` for the columns whose `profiler` statistics
/// pass `filter`. The two estimators differ when filtering uses sequence
/// weights but counting does not.
pub fn filtered_sites(
    window: &AlignmentWindow<'_>,
    filter: &PositionFilter,
    profiler: &FrequencyEstimator<'_>,
    counter: &FrequencyEstimator<'_>,
) -> Vec<Option<SiteFrequencies>> {
    (0..window.width())
        .map(|local| {
            let column = window.column(local);
            if filter.accepts(&profiler.profile(column)) {
                counter.site(column)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alphabet::encode_sequence;
    use crate::data::alignment::Alignment;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_pseudocount_formula() {
        // A A C G
        let column = encode_sequence(b"AACG");
        let weights = vec![1.0; 4];
        let site = FrequencyEstimator::new(&weights, 0.5).site(&column).unwrap();
        assert_relative_eq!(site.probs[0], (2.0 + 0.5 / 7.0) / 4.5, epsilon = 1e-12);
        assert_relative_eq!(site.probs[3], (0.5 / 7.0) / 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_pseudocount_leaves_unseen_at_zero() {
        let column = encode_sequence(b"AACG");
        let weights = vec![1.0; 4];
        let estimator = FrequencyEstimator::new(&weights, 0.0);
        let site = estimator.site(&column).unwrap();
        assert_eq!(site.probs[0], 0.5);
        assert_eq!(site.probs[3], 0.0);

        let pair = estimator.pair(&column, &column);
        assert_eq!(pair.probs[0][0], 0.5);
        assert_eq!(pair.probs[0][1], 0.0);
    }

    #[test]
    fn test_distributions_normalized() {
        let mut rng = StdRng::seed_from_u64(7);
        let symbols = b"ACGU-N.";
        for alpha in [0.0, 0.2, 0.5, 3.0] {
            let col_a: Vec<u8> = (0..40)
                .map(|_| symbols[rng.gen_range(0..symbols.len())])
                .collect();
            let col_b: Vec<u8> = (0..40)
                .map(|_| symbols[rng.gen_range(0..symbols.len())])
                .collect();
            let weights: Vec<f64> = (0..40).map(|_| rng.gen_range(0.05..1.0)).collect();
            let estimator = FrequencyEstimator::new(&weights, alpha);

            let col_a = encode_sequence(&col_a);
            let col_b = encode_sequence(&col_b);
            if let Some(site) = estimator.site(&col_a) {
                assert!((site.total() - 1.0).abs() < 1e-9);
            }
            assert!((estimator.pair(&col_a, &col_b).total() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_all_gap_column_has_no_support() {
        let column = encode_sequence(b"----");
        let weights = vec![1.0; 4];
        let estimator = FrequencyEstimator::new(&weights, 0.5);
        assert!(estimator.site(&column).is_none());

        let profile = estimator.profile(&column);
        assert_eq!(profile.gap_fraction, 1.0);
        assert_eq!(profile.residue_weight, 0.0);

        let permissive = PositionFilter {
            gap_threshold: 1.0,
            conservation_range: (0.0, 1.0),
        };
        assert!(!permissive.accepts(&profile));
    }

    #[test]
    fn test_window_sites_apply_filter() {
        let aln = Alignment::from_sequences(&["AAC-", "AAG-", "AAU-", "ACA-"]).unwrap();
        let weights = vec![1.0; 4];
        let estimator = FrequencyEstimator::new(&weights, 0.0);
        let filter = PositionFilter {
            gap_threshold: 0.5,
            conservation_range: (0.2, 0.95),
        };
        let sites = estimator.window_sites(&aln.full_window(), &filter);
        // fully conserved, 0.75 conserved, 0.25 conserved, all gap
        assert!(sites[0].is_none());
        assert!(sites[1].is_some());
        assert!(sites[2].is_some());
        assert!(sites[3].is_none());
    }

    #[test]
    fn test_weighted_conservation() {
        let column = encode_sequence(b"AAC");
        let weights = vec![0.5, 0.5, 1.0];
        let profile = FrequencyEstimator::new(&weights, 0.0).profile(&column);
        assert_relative_eq!(profile.conservation, 0.5);
    }
}
