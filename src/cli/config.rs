// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub msa: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,

    // Presets
    pub length_profile: Option<String>,
    pub quality: Option<String>,

    // Chunking
    pub max_length: Option<usize>,
    pub chunk_size: Option<usize>,
    pub overlap: Option<usize>,

    // Position filters
    pub gap_threshold: Option<f64>,
    pub conservation_min: Option<f64>,
    pub conservation_max: Option<f64>,

    // Estimation
    pub pseudocount: Option<String>,
    pub no_weighting: Option<bool>,
    pub identity_threshold: Option<f64>,
    pub sequence_gap_threshold: Option<f64>,
    pub max_sequences: Option<usize>,

    // Post-processing
    pub min_separation: Option<usize>,
    pub top_k: Option<usize>,
    pub no_smoothing: Option<bool>,
    pub smoothing_sigma: Option<f64>,
    pub short_range_damping: Option<bool>,

    // Sequence filtering
    pub include_sequences: Option<String>,
    pub exclude_sequences: Option<String>,

    // Performance
    pub threads: Option<usize>,
    pub sequential: Option<bool>,

    // Flags
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# rnami.toml - Configuration file for rnami
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Aligned FASTA file
msa = "/path/to/alignment.fasta"

# Output directory (scores, mi_matrix, apc_matrix, top_pairs.csv, summary.json)
output = "results"

# Matrix format: tsv, csv
format = "tsv"

# =============================================================================
# PRESETS
# =============================================================================

# Length preset: default, short, medium, long, very-long
length_profile = "default"

# MSA quality preset: high, medium, low
# quality = "medium"

# =============================================================================
# CHUNKING (alignments longer than max_length are split into windows)
# =============================================================================

# max_length = 750
# chunk_size = 600
# overlap = 200

# =============================================================================
# POSITION FILTERS
# =============================================================================

# Maximum gap fraction for a scored position (0.0-1.0)
gap_threshold = 0.5

# Accepted conservation of the most common symbol
conservation_min = 0.2
conservation_max = 0.95

# =============================================================================
# ESTIMATION
# =============================================================================

# Pseudocount: "adaptive" or a number
pseudocount = "adaptive"

# Disable identity-based sequence weighting
no_weighting = false

# Sequences more identical than this share their weight
identity_threshold = 0.8

# Drop sequences with more gaps than this
# sequence_gap_threshold = 0.5

# Keep at most this many sequences
# max_sequences = 5000

# =============================================================================
# POST-PROCESSING
# =============================================================================

# Minimum |i - j| for ranked pairs
min_separation = 4

# Number of ranked pairs to report
top_k = 100

# Gaussian smoothing of the APC matrix
no_smoothing = false
smoothing_sigma = 0.6

# Damp pairs 2-8 positions apart
short_range_damping = false

# =============================================================================
# SEQUENCE FILTERING
# =============================================================================

# Include only sequences matching regex pattern
# include_sequences = "^Rfam"

# Exclude sequences matching regex pattern
# exclude_sequences = "partial"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# Run single-threaded
sequential = false

# =============================================================================
# FLAGS
# =============================================================================

# Validate inputs without computation (dry run)
dry_run = false
"#
        .to_string()
    }
}
