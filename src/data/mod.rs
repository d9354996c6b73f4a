// mod.rs - Data structures module

pub mod alignment;
pub mod loaders;
pub mod matrix;

// Re-export main types for convenience
pub use alignment::{Alignment, AlignmentWindow, SequenceRecord};
pub use loaders::{load_alignment, SequenceFilter};
pub use matrix::ScoreMatrix;
