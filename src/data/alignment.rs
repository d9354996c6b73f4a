// alignment.rs - Encoded multiple sequence alignment and column windows

use crate::core::alphabet::{encode_sequence, GAP};
use crate::error::CouplingError;

/// One aligned sequence, symbols already encoded to alphabet indices
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRecord {
    pub name: String,
    pub symbols: Vec<u8>,
}

impl SequenceRecord {
    /// Fraction of gap symbols in this record
    pub fn gap_fraction(&self) -> f64 {
        if self.symbols.is_empty() {
            return 0.0;
        }
        let gaps = self.symbols.iter().filter(|&&s| s == GAP).count();
        gaps as f64 / self.symbols.len() as f64
    }
}

/// Immutable alignment of equal-length records
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    records: Vec<SequenceRecord>,
    length: usize,
}

impl Alignment {
    /// Build from named raw sequences. Every record must share the first
    /// record's length.
    pub fn from_records<I, S>(records: I) -> Result<Self, CouplingError>
    where
        I: IntoIterator<Item = (String, S)>,
        S: AsRef<[u8]>,
    {
        let records: Vec<SequenceRecord> = records
            .into_iter()
            .map(|(name, seq)| SequenceRecord {
                name,
                symbols: encode_sequence(seq.as_ref()),
            })
            .collect();

        let length = match records.first() {
            Some(first) => first.symbols.len(),
            None => return Err(CouplingError::EmptyAlignment),
        };
        if length == 0 {
            return Err(CouplingError::EmptyAlignment);
        }
        if let Some(bad) = records.iter().find(|r| r.symbols.len() != length) {
            return Err(CouplingError::UnequalLength {
                name: bad.name.clone(),
                expected: length,
                found: bad.symbols.len(),
            });
        }

        Ok(Self { records, length })
    }

    /// Build from unnamed sequences (named `seq_0`, `seq_1`, ...)
    pub fn from_sequences<S: AsRef<[u8]>>(sequences: &[S]) -> Result<Self, CouplingError> {
        Self::from_records(
            sequences
                .iter()
                .enumerate()
                .map(|(i, s)| (format!("seq_{}", i), s.as_ref())),
        )
    }

    pub fn num_sequences(&self) -> usize {
        self.records.len()
    }

    /// Alignment length L
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn sequence(&self, index: usize) -> &[u8] {
        &self.records[index].symbols
    }

    /// New alignment holding only the given records, in the given order
    pub fn select(&self, indices: &[usize]) -> Result<Self, CouplingError> {
        if indices.is_empty() {
            return Err(CouplingError::EmptyAlignment);
        }
        Ok(Self {
            records: indices.iter().map(|&i| self.records[i].clone()).collect(),
            length: self.length,
        })
    }

    /// Column window `[start, end)`, clamped to the alignment
    pub fn window(&self, start: usize, end: usize) -> AlignmentWindow<'_> {
        let end = end.min(self.length);
        let start = start.min(end);
        let rows: Vec<&[u8]> = self.records.iter().map(|r| &r.symbols[start..end]).collect();
        let columns = (0..end - start)
            .map(|local| rows.iter().map(|row| row[local]).collect())
            .collect();
        AlignmentWindow {
            offset: start,
            rows,
            columns,
        }
    }

    /// Window spanning every column
    pub fn full_window(&self) -> AlignmentWindow<'_> {
        self.window(0, self.length)
    }
}

/// Sub-alignment restricted to a column range, held both row-major
/// (for sequence comparison) and column-major (for frequency counting).
/// Local index `k` maps to global position `offset + k`.
#[derive(Debug, Clone)]
pub struct AlignmentWindow<'a> {
    offset: usize,
    rows: Vec<&'a [u8]>,
    columns: Vec<Vec<u8>>,
}

impl<'a> AlignmentWindow<'a> {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn num_sequences(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[&'a [u8]] {
        &self.rows
    }

    pub fn column(&self, local: usize) -> &[u8] {
        &self.columns[local]
    }

    pub fn global(&self, local: usize) -> usize {
        self.offset + local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unequal_lengths() {
        let err = Alignment::from_sequences(&["ACGU", "ACG"]).unwrap_err();
        assert_eq!(
            err,
            CouplingError::UnequalLength {
                name: "seq_1".to_string(),
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_rejects_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(Alignment::from_sequences(&empty), Err(CouplingError::EmptyAlignment));
        assert_eq!(Alignment::from_sequences(&["", ""]), Err(CouplingError::EmptyAlignment));
    }

    #[test]
    fn test_window_layout() {
        let aln = Alignment::from_sequences(&["ACGUA", "GG-UC"]).unwrap();
        let window = aln.window(1, 4);
        assert_eq!(window.offset(), 1);
        assert_eq!(window.width(), 3);
        assert_eq!(window.column(1), &[2, GAP]);
        assert_eq!(window.rows()[0], &[1, 2, 3]);
        assert_eq!(window.global(2), 3);
    }

    #[test]
    fn test_gap_fraction_and_select() {
        let aln = Alignment::from_sequences(&["AC--", "ACGU", "----"]).unwrap();
        assert_eq!(aln.records()[0].gap_fraction(), 0.5);
        let picked = aln.select(&[1]).unwrap();
        assert_eq!(picked.num_sequences(), 1);
        assert_eq!(picked.names(), vec!["seq_1"]);
        assert!(aln.select(&[]).is_err());
    }
}
