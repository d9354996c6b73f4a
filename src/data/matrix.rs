// matrix.rs - Square score matrix with sentinel cells

use serde::{Deserialize, Serialize};

/// Square matrix of pair scores. `None` is the sentinel for "no data"
/// (diagonal, filtered positions, pairs no window covered), distinct from a
/// score of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMatrix {
    size: usize,
    cells: Vec<Option<f64>>,
}

impl ScoreMatrix {
    /// All-sentinel matrix
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.cells[i * self.size + j]
    }

    /// Write one value into both (i,j) and (j,i)
    #[inline]
    pub fn set_pair(&mut self, i: usize, j: usize, value: Option<f64>) {
        self.cells[i * self.size + j] = value;
        self.cells[j * self.size + i] = value;
    }

    /// Scored cells of the upper triangle as (i, j, score) with i < j
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.size).flat_map(move |i| {
            (i + 1..self.size).filter_map(move |j| self.get(i, j).map(|v| (i, j, v)))
        })
    }

    /// Number of scored pairs (i < j)
    pub fn scored_pairs(&self) -> usize {
        self.upper_triangle().count()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Row-major nested copy
    pub fn to_rows(&self) -> Vec<Vec<Option<f64>>> {
        self.cells.chunks(self.size.max(1)).map(|r| r.to_vec()).collect()
    }

    /// Apply `f` to every scored cell, leaving sentinels untouched
    pub fn map_scored<F: Fn(usize, usize, f64) -> f64>(&self, f: F) -> Self {
        let mut out = ScoreMatrix::new(self.size);
        for (i, j, v) in self.upper_triangle() {
            out.set_pair(i, j, Some(f(i, j, v)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_are_mirrored() {
        let mut m = ScoreMatrix::new(4);
        m.set_pair(1, 3, Some(0.25));
        assert_eq!(m.get(3, 1), Some(0.25));
        assert_eq!(m.get(0, 0), None);
        assert!(m.is_symmetric());
        assert_eq!(m.scored_pairs(), 1);
    }

    #[test]
    fn test_upper_triangle_order() {
        let mut m = ScoreMatrix::new(3);
        m.set_pair(0, 2, Some(1.0));
        m.set_pair(0, 1, Some(2.0));
        m.set_pair(1, 2, Some(3.0));
        let cells: Vec<_> = m.upper_triangle().collect();
        assert_eq!(cells, vec![(0, 1, 2.0), (0, 2, 1.0), (1, 2, 3.0)]);
    }

    #[test]
    fn test_map_scored_keeps_sentinels() {
        let mut m = ScoreMatrix::new(3);
        m.set_pair(0, 1, Some(2.0));
        let doubled = m.map_scored(|_, _, v| v * 2.0);
        assert_eq!(doubled.get(1, 0), Some(4.0));
        assert_eq!(doubled.get(1, 2), None);
        assert_eq!(doubled.to_rows()[0], vec![None, Some(4.0), None]);
    }
}
