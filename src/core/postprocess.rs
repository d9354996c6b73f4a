// postprocess.rs - Score smoothing, short-range damping and top pairs

use crate::data::matrix::ScoreMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Closest sequence separation that gets damped
const DAMPING_MIN_DISTANCE: usize = 2;
/// Farthest sequence separation that gets damped
const DAMPING_MAX_DISTANCE: usize = 8;

/// Ranked pair, `i < j`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopPair {
    pub i: usize,
    pub j: usize,
    pub score: f64,
}

/// Damping factor for a pair at sequence distance `d`, 1.0 outside [2, 8]
pub fn damping_factor(distance: usize) -> f64 {
    if (DAMPING_MIN_DISTANCE..=DAMPING_MAX_DISTANCE).contains(&distance) {
        0.7 + 0.3 * (distance as f64).ln() / (DAMPING_MAX_DISTANCE as f64).ln()
    } else {
        1.0
    }
}

/// Scale down scores of near-diagonal pairs, which mostly reflect stacking
/// rather than long-range coupling.
pub fn damp_short_range(matrix: &ScoreMatrix) -> ScoreMatrix {
    matrix.map_scored(|i, j, v| v * damping_factor(j - i))
}

/// Gaussian-weighted local average over non-sentinel neighbours within
/// `ceil(3 sigma)` cells, renormalised by the weight actually used.
/// Sentinel cells stay sentinel.
pub fn smooth(matrix: &ScoreMatrix, sigma: f64) -> ScoreMatrix {
    if sigma <= 0.0 {
        return matrix.clone();
    }
    let size = matrix.size() as isize;
    let radius = (3.0 * sigma).ceil() as isize;
    let denom = 2.0 * sigma * sigma;

    let kernel: Vec<(isize, isize, f64)> = (-radius..=radius)
        .flat_map(|di| (-radius..=radius).map(move |dj| (di, dj)))
        .map(|(di, dj)| (di, dj, (-((di * di + dj * dj) as f64) / denom).exp()))
        .collect();

    matrix.map_scored(|i, j, _| {
        let (mut weighted, mut total) = (0.0, 0.0);
        for &(di, dj, w) in &kernel {
            let (ni, nj) = (i as isize + di, j as isize + dj);
            if ni < 0 || nj < 0 || ni >= size || nj >= size {
                continue;
            }
            if let Some(v) = matrix.get(ni as usize, nj as usize) {
                weighted += w * v;
                total += w;
            }
        }
        weighted / total
    })
}

/// The `k` highest-scoring pairs with `j - i >= min_separation` and both
/// positions valid, sorted by descending score then ascending `(i, j)`.
pub fn top_pairs(
    matrix: &ScoreMatrix,
    valid: &BTreeSet<usize>,
    k: usize,
    min_separation: usize,
) -> Vec<TopPair> {
    if k == 0 {
        return Vec::new();
    }
    let mut pairs: Vec<TopPair> = matrix
        .upper_triangle()
        .filter(|&(i, j, score)| {
            j - i >= min_separation && valid.contains(&i) && valid.contains(&j) && score.is_finite()
        })
        .map(|(i, j, score)| TopPair { i, j, score })
        .collect();

    pairs.sort_by(|a, b| b.score.total_cmp(&a.score).then((a.i, a.j).cmp(&(b.i, b.j))));
    pairs.truncate(k);
    pairs
}
