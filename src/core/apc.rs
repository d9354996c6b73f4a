// apc.rs - Average product correction of raw MI

use crate::data::matrix::ScoreMatrix;
use log::warn;

/// Row means and overall mean of MI over the valid positions
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundMeans {
    /// Indexed like the matrix; entries for invalid positions are 0.0
    pub row_means: Vec<f64>,
    pub total_mean: f64,
}

/// Background coupling statistics restricted to `valid` positions.
/// `None` when fewer than two positions are valid.
pub fn background_means(mi: &ScoreMatrix, valid: &[usize]) -> Option<BackgroundMeans> {
    if valid.len() < 2 {
        return None;
    }

    let mut row_means = vec![0.0; mi.size()];
    for &i in valid {
        let (sum, count) = valid
            .iter()
            .filter(|&&j| j != i)
            .filter_map(|&j| mi.get(i, j))
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        if count > 0 {
            row_means[i] = sum / count as f64;
        }
    }

    let mut sum = 0.0;
    let mut count = 0usize;
    for (n, &i) in valid.iter().enumerate() {
        for &j in &valid[n + 1..] {
            if let Some(v) = mi.get(i, j) {
                sum += v;
                count += 1;
            }
        }
    }
    let total_mean = if count > 0 { sum / count as f64 } else { 0.0 };

    Some(BackgroundMeans {
        row_means,
        total_mean,
    })
}

/// `APC(i,j) = MI(i,j) - mean_i * mean_j / mean_total` over valid pairs.
/// A zero background (or fewer than two valid positions) leaves the raw MI
/// unchanged. Sentinel cells stay sentinel.
pub fn apply_apc(mi: &ScoreMatrix, valid: &[usize]) -> ScoreMatrix {
    let means = match background_means(mi, valid) {
        Some(means) if means.total_mean.abs() >= f64::EPSILON => means,
        Some(_) => {
            warn!("Mean MI is zero, skipping APC correction");
            return mi.clone();
        }
        None => return mi.clone(),
    };

    let mut apc = ScoreMatrix::new(mi.size());
    for (n, &i) in valid.iter().enumerate() {
        for &j in &valid[n + 1..] {
            if let Some(v) = mi.get(i, j) {
                let background = means.row_means[i] * means.row_means[j] / means.total_mean;
                apc.set_pair(i, j, Some(v - background));
            }
        }
    }
    apc
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn matrix(values: &[(usize, usize, f64)], size: usize) -> ScoreMatrix {
        let mut m = ScoreMatrix::new(size);
        for &(i, j, v) in values {
            m.set_pair(i, j, Some(v));
        }
        m
    }

    #[test]
    fn test_apc_formula() {
        let mi = matrix(&[(0, 1, 1.0), (0, 2, 0.4), (1, 2, 0.1)], 3);
        let apc = apply_apc(&mi, &[0, 1, 2]);

        let mean0 = (1.0 + 0.4) / 2.0;
        let mean1 = (1.0 + 0.1) / 2.0;
        let total = (1.0 + 0.4 + 0.1) / 3.0;
        assert_relative_eq!(apc.get(0, 1).unwrap(), 1.0 - mean0 * mean1 / total, epsilon = 1e-12);
        assert!(apc.is_symmetric());
        assert_eq!(apc.get(1, 1), None);
    }

    #[test]
    fn test_zero_background_passes_through() {
        let mi = matrix(&[(0, 1, 0.0), (0, 2, 0.0), (1, 2, 0.0)], 3);
        let apc = apply_apc(&mi, &[0, 1, 2]);
        assert_eq!(apc, mi);
        assert!(apc.upper_triangle().all(|(_, _, v)| v.is_finite()));
    }

    #[test]
    fn test_invalid_rows_excluded_from_means() {
        // position 3 is filtered; its stray value must not leak into means
        let mut mi = matrix(&[(0, 1, 0.6), (0, 2, 0.3), (1, 2, 0.3)], 4);
        mi.set_pair(0, 3, Some(50.0));
        let apc = apply_apc(&mi, &[0, 1, 2]);
        let means = background_means(&mi, &[0, 1, 2]).unwrap();
        assert_relative_eq!(means.total_mean, 0.4, epsilon = 1e-12);
        assert_eq!(apc.get(0, 3), None);
    }

    #[test]
    fn test_single_valid_position() {
        let mi = ScoreMatrix::new(3);
        assert!(background_means(&mi, &[1]).is_none());
        assert_eq!(apply_apc(&mi, &[1]), mi);
    }
}
