// mutual_info.rs - Pairwise mutual information over a window

use crate::core::alphabet::ALPHABET_SIZE;
use crate::core::executor::{Execution, Executor};
use crate::core::frequency::{FrequencyEstimator, PairFrequencies, SiteFrequencies};
use crate::data::alignment::AlignmentWindow;
use crate::data::matrix::ScoreMatrix;
use indicatif::{ProgressBar, ProgressStyle};

/// MI in bits. Terms with a zero joint or marginal probability contribute
/// nothing, so α = 0 never produces a non-finite value.
pub fn mutual_information(
    pair: &PairFrequencies,
    first: &SiteFrequencies,
    second: &SiteFrequencies,
) -> f64 {
    let mut mi = 0.0;
    for a in 0..ALPHABET_SIZE {
        let pa = first.probs[a];
        if pa <= 0.0 {
            continue;
        }
        for b in 0..ALPHABET_SIZE {
            let pab = pair.probs[a][b];
            let pb = second.probs[b];
            if pab <= 0.0 || pb <= 0.0 {
                continue;
            }
            mi += pab * (pab / (pa * pb)).log2();
        }
    }
    mi
}

/// Progress bar for pair loops, hidden unless `visible`
pub fn pair_progress(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Raw MI matrix in window-local coordinates. Only pairs where both sites
/// are `Some` are scored; every other cell stays sentinel. Each pair is
/// computed once and written to both cells.
pub fn compute_mi_matrix(
    window: &AlignmentWindow<'_>,
    sites: &[Option<SiteFrequencies>],
    estimator: &FrequencyEstimator<'_>,
    exec: &Execution,
    show_progress: bool,
) -> ScoreMatrix {
    let width = window.width();
    let valid: Vec<usize> = (0..width).filter(|&k| sites[k].is_some()).collect();
    let pairs: Vec<(usize, usize)> = valid
        .iter()
        .enumerate()
        .flat_map(|(n, &i)| valid[n + 1..].iter().map(move |&j| (i, j)))
        .collect();

    let pb = pair_progress(pairs.len(), show_progress);
    let scores = exec.map_indexed(pairs.len(), |n| {
        let (i, j) = pairs[n];
        let joint = estimator.pair(window.column(i), window.column(j));
        let score = match (&sites[i], &sites[j]) {
            (Some(si), Some(sj)) => mutual_information(&joint, si, sj),
            _ => 0.0,
        };
        pb.inc(1);
        score
    });
    pb.finish_and_clear();

    let mut matrix = ScoreMatrix::new(width);
    for (&(i, j), score) in pairs.iter().zip(scores) {
        matrix.set_pair(i, j, Some(score));
    }
    matrix
}
