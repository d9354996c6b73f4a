// mod.rs - Core logic module

pub mod alphabet;
pub mod apc;
pub mod chunking;
pub mod config;
pub mod executor;
pub mod frequency;
pub mod mutual_info;
pub mod pipeline;
pub mod postprocess;
pub mod weighting;

// Re-export main types for convenience
pub use alphabet::{adaptive_pseudocount, Pseudocount, ALPHABET, ALPHABET_SIZE};
pub use apc::apply_apc;
pub use chunking::{plan_chunks, recombine, Chunk, ChunkFailure, WindowResult};
pub use config::CouplingConfig;
pub use executor::{Execution, Executor, Parallel, Sequential};
pub use frequency::{FrequencyEstimator, PairFrequencies, PositionFilter, SiteFrequencies};
pub use mutual_info::{compute_mi_matrix, mutual_information};
pub use pipeline::{ChunkingReport, CouplingEngine, CouplingParams, CouplingResult};
pub use postprocess::{smooth, top_pairs, TopPair};
pub use weighting::{IdentityWeighter, SequenceWeighter, UniformWeighter};
