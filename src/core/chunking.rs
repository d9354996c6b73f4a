// chunking.rs - Overlapping window planning and recombination

use crate::core::executor::{Execution, Executor};
use crate::data::matrix::ScoreMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Contiguous column range `[start, end)` in global coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, position: usize) -> bool {
        position >= self.start && position < self.end
    }

    /// Local index of a global position
    pub fn local(&self, position: usize) -> usize {
        position - self.start
    }

    /// Distance to the nearest window edge plus one
    pub fn edge_weight(&self, position: usize) -> f64 {
        let from_start = position - self.start;
        let from_end = self.end - 1 - position;
        (from_start.min(from_end) + 1) as f64
    }
}

/// Split `[0, length)` into overlapping windows.
///
/// A single window spans everything when `length <= max_length` or when one
/// chunk already covers the alignment. Otherwise `n` windows of `chunk_size`
/// columns are spread evenly so the first starts at 0, the last ends at
/// `length`, and neighbours share at least `overlap` columns.
pub fn plan_chunks(length: usize, max_length: usize, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    if length == 0 {
        return Vec::new();
    }
    if length <= max_length || chunk_size >= length || chunk_size == 0 {
        return vec![Chunk::new(0, length)];
    }

    let step = chunk_size.saturating_sub(overlap).max(1);
    let span = length - chunk_size;
    let n = 1 + span.div_ceil(step);

    (0..n)
        .map(|k| {
            let start = k * span / (n - 1);
            Chunk::new(start, start + chunk_size)
        })
        .collect()
}

/// Output of one window run through weighting, MI and APC
#[derive(Debug, Clone)]
pub struct WindowResult {
    pub chunk: Chunk,
    /// Raw MI, window-local coordinates
    pub mi: ScoreMatrix,
    /// APC-corrected MI, window-local coordinates
    pub apc: ScoreMatrix,
    /// Valid positions, global coordinates
    pub valid: Vec<usize>,
}

/// A window whose computation failed; its exclusive pairs stay sentinel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkFailure {
    pub start: usize,
    pub end: usize,
    pub reason: String,
}

/// Full-length matrices assembled from window results
#[derive(Debug, Clone)]
pub struct Recombined {
    pub mi: ScoreMatrix,
    pub apc: ScoreMatrix,
    pub valid: BTreeSet<usize>,
}

/// Edge-weighted average of `(weight, value)` contributions; a single
/// contribution is returned as is.
fn combine(contributions: &[(f64, f64)]) -> Option<f64> {
    match contributions {
        [] => None,
        [(_, value)] => Some(*value),
        many => {
            let (weighted, total) = many
                .iter()
                .fold((0.0, 0.0), |(s, t), &(w, v)| (s + w * v, t + w));
            Some(weighted / total)
        }
    }
}

/// Merge window matrices into one `length x length` result.
///
/// For each pair `(p, q)`, every window covering both positions with a score
/// contributes with weight `edge_weight(p) * edge_weight(q)`. Pairs no
/// window covers stay sentinel.
pub fn recombine(length: usize, windows: &[WindowResult], exec: &Execution) -> Recombined {
    let rows = exec.map_indexed(length, |p| {
        let covering: Vec<&WindowResult> = windows.iter().filter(|w| w.chunk.contains(p)).collect();
        let mut row = Vec::new();
        if covering.is_empty() {
            return row;
        }

        let mut mi_parts = Vec::with_capacity(covering.len());
        let mut apc_parts = Vec::with_capacity(covering.len());
        for q in p + 1..length {
            mi_parts.clear();
            apc_parts.clear();
            for window in covering.iter().filter(|w| w.chunk.contains(q)) {
                let chunk = window.chunk;
                let weight = chunk.edge_weight(p) * chunk.edge_weight(q);
                let (lp, lq) = (chunk.local(p), chunk.local(q));
                if let Some(v) = window.mi.get(lp, lq) {
                    mi_parts.push((weight, v));
                }
                if let Some(v) = window.apc.get(lp, lq) {
                    apc_parts.push((weight, v));
                }
            }
            let mi = combine(&mi_parts);
            let apc = combine(&apc_parts);
            if mi.is_some() || apc.is_some() {
                row.push((q, mi, apc));
            }
        }
        row
    });

    let mut mi = ScoreMatrix::new(length);
    let mut apc = ScoreMatrix::new(length);
    for (p, row) in rows.into_iter().enumerate() {
        for (q, mi_value, apc_value) in row {
            mi.set_pair(p, q, mi_value);
            apc.set_pair(p, q, apc_value);
        }
    }

    let valid = windows.iter().flat_map(|w| w.valid.iter().copied()).collect();
    Recombined { mi, apc, valid }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uniform_window(chunk: Chunk, value: f64) -> WindowResult {
        let mut m = ScoreMatrix::new(chunk.len());
        for i in 0..chunk.len() {
            for j in i + 1..chunk.len() {
                m.set_pair(i, j, Some(value));
            }
        }
        WindowResult {
            chunk,
            mi: m.clone(),
            apc: m,
            valid: (chunk.start..chunk.end).collect(),
        }
    }

    #[test]
    fn test_plan_short_alignment_is_single_window() {
        assert_eq!(plan_chunks(300, 750, 600, 200), vec![Chunk::new(0, 300)]);
        assert_eq!(plan_chunks(300, 100, 400, 150), vec![Chunk::new(0, 300)]);
        assert!(plan_chunks(0, 750, 600, 200).is_empty());
    }

    #[test]
    fn test_plan_long_alignment() {
        let chunks = plan_chunks(1000, 500, 400, 150);
        assert_eq!(
            chunks,
            vec![
                Chunk::new(0, 400),
                Chunk::new(200, 600),
                Chunk::new(400, 800),
                Chunk::new(600, 1000)
            ]
        );
    }

    #[test]
    fn test_plan_overlap_and_coverage() {
        for (length, chunk, overlap) in [(1001, 400, 150), (2345, 600, 200), (751, 600, 200), (999, 100, 99)] {
            let chunks = plan_chunks(length, 500, chunk, overlap);
            assert_eq!(chunks.first().unwrap().start, 0);
            assert_eq!(chunks.last().unwrap().end, length);
            for pair in chunks.windows(2) {
                assert_eq!(pair[0].len(), chunk);
                assert!(pair[0].end >= pair[1].start + overlap);
                assert!(pair[1].start > pair[0].start);
            }
        }
    }

    #[test]
    fn test_edge_weight() {
        let chunk = Chunk::new(200, 600);
        assert_eq!(chunk.edge_weight(200), 1.0);
        assert_eq!(chunk.edge_weight(599), 1.0);
        assert_eq!(chunk.edge_weight(450), 150.0);
    }

    #[test]
    fn test_single_window_copies_values() {
        let chunk = Chunk::new(0, 4);
        let mut window = uniform_window(chunk, 0.0);
        window.apc.set_pair(1, 3, Some(0.123456789));
        window.apc.set_pair(0, 2, None);
        let merged = recombine(4, &[window], &Execution::Sequential);
        assert_eq!(merged.apc.get(3, 1), Some(0.123456789));
        assert_eq!(merged.apc.get(0, 2), None);
        assert_eq!(merged.valid.len(), 4);
    }

    #[test]
    fn test_overlap_is_weighted_average() {
        let first = uniform_window(Chunk::new(0, 6), 1.0);
        let second = uniform_window(Chunk::new(3, 9), 3.0);
        let merged = recombine(9, &[first, second], &Execution::Parallel);

        // pair (4, 5): weight 2*1 in the first window, 2*3 in the second
        let expected = (2.0 * 1.0 + 6.0 * 3.0) / 8.0;
        assert_relative_eq!(merged.apc.get(4, 5).unwrap(), expected, epsilon = 1e-12);
        assert!(merged.apc.is_symmetric());

        // only one window covers (1, 4)
        assert_eq!(merged.apc.get(1, 4), Some(1.0));
        // disjoint coverage
        assert_eq!(merged.apc.get(0, 8), None);
    }

    #[test]
    fn test_missing_window_leaves_sentinels() {
        let only = uniform_window(Chunk::new(0, 5), 2.0);
        let merged = recombine(10, &[only], &Execution::Sequential);
        assert_eq!(merged.mi.get(6, 8), None);
        assert_eq!(merged.mi.get(1, 2), Some(2.0));
        assert!(!merged.valid.contains(&7));
    }
}
