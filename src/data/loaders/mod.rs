// mod.rs - Alignment file loaders

pub mod fasta;

pub use fasta::{load_alignment, read_fasta_records, SequenceFilter};
