// lib.rs - rnami library root

//! # rnami - Mutual-information coupling matrices from RNA alignments
//!
//! Computes pairwise mutual information between the columns of an RNA
//! multiple sequence alignment, corrects it with the average product
//! correction, and ranks the strongest coupled position pairs.
//!
//! ## Features
//!
//! - **Redundancy weighting**: identity-based down-weighting of near-duplicate sequences
//! - **Adaptive pseudocounts**: smoothing strength chosen from the effective sequence count
//! - **Long alignments**: overlapping windows merged with edge-weighted averaging
//! - **Parallel**: pair-level and window-level parallelism on rayon
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use rnami::prelude::*;
//!
//! let alignment = Alignment::from_sequences(&["ACGUAGCU", "ACGAAGCU", "UCGUAGCA"])?;
//! let engine = CouplingEngine::new(CouplingConfig::default())?;
//! let result = engine.analyze(&alignment)?;
//!
//! for pair in &result.top_pairs {
//!     println!("{} {} {:.3}", pair.i, pair.j, pair.score);
//! }
//! # Ok::<(), rnami::CouplingError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{adaptive_pseudocount, Pseudocount};
    pub use crate::core::{CouplingConfig, CouplingEngine, CouplingResult, TopPair};
    pub use crate::core::{Execution, Executor};
    pub use crate::data::{load_alignment, Alignment, ScoreMatrix, SequenceFilter};
    pub use crate::error::CouplingError;
    pub use crate::output::{write_results, OutputFormat};
}

// Re-export main types at the root level for convenience
pub use core::{CouplingConfig, CouplingEngine, CouplingResult};
pub use data::{Alignment, ScoreMatrix};
pub use error::CouplingError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "rnami v{} - Mutual-information coupling analysis for RNA alignments",
        VERSION
    )
}
