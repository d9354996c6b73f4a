// fasta.rs - Aligned FASTA loader

use crate::data::alignment::Alignment;
use bio::io::fasta;
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Include/exclude patterns applied to record identifiers
#[derive(Debug, Clone, Default)]
pub struct SequenceFilter {
    pub include: Option<Regex>,
    pub exclude: Option<Regex>,
}

impl SequenceFilter {
    pub fn accepts(&self, id: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(id) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(id) {
                return false;
            }
        }
        true
    }

    pub fn is_active(&self) -> bool {
        self.include.is_some() || self.exclude.is_some()
    }
}

/// Read `(id, sequence)` pairs from any FASTA source, in file order
pub fn read_fasta_records<R: Read>(source: R) -> Result<Vec<(String, Vec<u8>)>, String> {
    let reader = fasta::Reader::new(source);
    let mut records = Vec::new();
    for record_result in reader.records() {
        let record = record_result.map_err(|e| format!("Invalid FASTA record: {}", e))?;
        records.push((record.id().to_string(), record.seq().to_vec()));
    }
    Ok(records)
}

/// Load an aligned FASTA file, keeping records the filter accepts
pub fn load_alignment(path: &Path, filter: &SequenceFilter) -> Result<Alignment, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open alignment file {}: {}", path.display(), e))?;
    let records = read_fasta_records(BufReader::new(file))
        .map_err(|e| format!("{} ({})", e, path.display()))?;
    let total = records.len();

    let kept: Vec<(String, Vec<u8>)> = records
        .into_iter()
        .filter(|(id, _)| filter.accepts(id))
        .collect();
    if filter.is_active() {
        println!("🔍 Sequence filters kept {} of {} records", kept.len(), total);
    }

    Alignment::from_records(kept)
        .map_err(|e| format!("Invalid alignment in {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MSA: &[u8] = b">ref\nACGU-ACGU\n>hom_1\nACGA-ACGU\n>hom_2 description\nUCGU\n-ACGA\n";

    #[test]
    fn test_reads_multiline_records() {
        let records = read_fasta_records(MSA).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].0, "hom_2");
        assert_eq!(records[2].1, b"UCGU-ACGA".to_vec());
    }

    #[test]
    fn test_filter_patterns() {
        let filter = SequenceFilter {
            include: Some(Regex::new("^hom").unwrap()),
            exclude: Some(Regex::new("_2$").unwrap()),
        };
        assert!(filter.accepts("hom_1"));
        assert!(!filter.accepts("hom_2"));
        assert!(!filter.accepts("ref"));
        assert!(SequenceFilter::default().accepts("anything"));
    }

    #[test]
    fn test_load_alignment_from_file() {
        let path = std::env::temp_dir().join(format!("rnami_loader_{}.fasta", std::process::id()));
        std::fs::write(&path, MSA).unwrap();

        let alignment = load_alignment(&path, &SequenceFilter::default()).unwrap();
        assert_eq!(alignment.num_sequences(), 3);
        assert_eq!(alignment.length(), 9);

        let filter = SequenceFilter {
            include: Some(Regex::new("hom").unwrap()),
            exclude: None,
        };
        let filtered = load_alignment(&path, &filter).unwrap();
        assert_eq!(filtered.names(), vec!["hom_1", "hom_2"]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unequal_records_rejected() {
        let path = std::env::temp_dir().join(format!("rnami_ragged_{}.fasta", std::process::id()));
        std::fs::write(&path, b">a\nACGU\n>b\nACG\n").unwrap();
        let err = load_alignment(&path, &SequenceFilter::default()).unwrap_err();
        assert!(err.contains("has length 3, expected 4"));
        std::fs::remove_file(&path).ok();
    }
}
