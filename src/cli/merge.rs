// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.msa.is_none() {
            self.msa = config.msa;
        }
        if self.output.is_none() {
            self.output = config.output;
        }
        // Only override defaults, not explicit CLI values
        if self.format == "tsv" {
            if let Some(format) = config.format {
                self.format = format;
            }
        }

        // Presets
        if self.length_profile == "default" {
            if let Some(profile) = config.length_profile {
                self.length_profile = profile;
            }
        }
        if self.quality.is_none() {
            self.quality = config.quality;
        }

        // Chunking
        self.max_length = self.max_length.or(config.max_length);
        self.chunk_size = self.chunk_size.or(config.chunk_size);
        self.overlap = self.overlap.or(config.overlap);

        // Position filters
        self.gap_threshold = self.gap_threshold.or(config.gap_threshold);
        self.conservation_min = self.conservation_min.or(config.conservation_min);
        self.conservation_max = self.conservation_max.or(config.conservation_max);

        // Estimation
        if self.pseudocount.is_none() {
            self.pseudocount = config.pseudocount;
        }
        self.identity_threshold = self.identity_threshold.or(config.identity_threshold);
        self.sequence_gap_threshold = self.sequence_gap_threshold.or(config.sequence_gap_threshold);
        self.max_sequences = self.max_sequences.or(config.max_sequences);

        // Post-processing
        self.min_separation = self.min_separation.or(config.min_separation);
        self.top_k = self.top_k.or(config.top_k);
        self.smoothing_sigma = self.smoothing_sigma.or(config.smoothing_sigma);

        // Sequence filtering
        if self.include_sequences.is_none() {
            self.include_sequences = config.include_sequences;
        }
        if self.exclude_sequences.is_none() {
            self.exclude_sequences = config.exclude_sequences;
        }

        // Performance
        self.threads = self.threads.or(config.threads);

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.no_weighting && config.no_weighting.unwrap_or(false) {
            self.no_weighting = true;
        }
        if !self.no_smoothing && config.no_smoothing.unwrap_or(false) {
            self.no_smoothing = true;
        }
        if !self.short_range_damping && config.short_range_damping.unwrap_or(false) {
            self.short_range_damping = true;
        }
        if !self.sequential && config.sequential.unwrap_or(false) {
            self.sequential = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
