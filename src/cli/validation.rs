// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::cli::presets::{LengthProfile, QualityProfile};
use crate::core::alphabet::Pseudocount;
use crate::core::config::CouplingConfig;
use crate::data::loaders::SequenceFilter;
use crate::output::OutputFormat;
use regex::Regex;
use std::str::FromStr;

pub struct ValidationResult {
    pub coupling_config: CouplingConfig,
    pub sequence_filter: SequenceFilter,
    pub format: OutputFormat,
    pub length_profile: LengthProfile,
    pub quality_profile: Option<QualityProfile>,
}

/// Validate all command line arguments and build the analysis configuration.
/// Precedence: defaults < length preset < quality preset < explicit options.
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let format = OutputFormat::from_str(&args.format)?;

    let length_profile = LengthProfile::from_name(&args.length_profile)?;
    let quality_profile = match &args.quality {
        Some(name) => Some(QualityProfile::from_name(name)?),
        None => None,
    };

    let mut config = CouplingConfig {
        max_length: length_profile.max_length,
        chunk_size: length_profile.chunk_size,
        overlap: length_profile.overlap,
        ..CouplingConfig::default()
    };
    if let Some(quality) = &quality_profile {
        config.gap_threshold = quality.gap_threshold;
        config.identity_threshold = quality.identity_threshold;
        config.conservation_range = quality.conservation_range;
        config.pseudocount = quality.pseudocount;
        config.max_sequences = quality.max_sequences;
    }

    // Chunking
    if let Some(v) = args.max_length {
        config.max_length = v;
    }
    if let Some(v) = args.chunk_size {
        config.chunk_size = v;
    }
    if let Some(v) = args.overlap {
        config.overlap = v;
    }

    // Position filters
    if let Some(v) = args.gap_threshold {
        config.gap_threshold = v;
    }
    if let Some(v) = args.conservation_min {
        config.conservation_range.0 = v;
    }
    if let Some(v) = args.conservation_max {
        config.conservation_range.1 = v;
    }

    // Estimation
    if let Some(text) = &args.pseudocount {
        config.pseudocount = Pseudocount::from_str(text)?;
    }
    if args.no_weighting {
        config.use_sequence_weighting = false;
    }
    if let Some(v) = args.identity_threshold {
        config.identity_threshold = v;
    }
    if let Some(v) = args.sequence_gap_threshold {
        config.sequence_gap_threshold = Some(v);
    }
    if let Some(v) = args.max_sequences {
        config.max_sequences = Some(v);
    }

    // Post-processing
    if let Some(v) = args.min_separation {
        config.min_pair_separation = v;
    }
    if let Some(v) = args.top_k {
        config.top_k = v;
    }
    if args.no_smoothing {
        config.smoothing = false;
    }
    if let Some(v) = args.smoothing_sigma {
        config.smoothing_sigma = v;
    }
    config.short_range_damping = args.short_range_damping;

    // Execution
    config.parallel = !args.sequential;
    config.show_progress = args.progress;

    config.validate().map_err(|e| e.to_string())?;

    if let Some(threads) = args.threads {
        if threads == 0 {
            return Err("Number of threads must be at least 1".to_string());
        }
    }

    // Compile regex patterns
    let include = if let Some(pattern) = &args.include_sequences {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid include_sequences regex: {}", e))?)
    } else {
        None
    };

    let exclude = if let Some(pattern) = &args.exclude_sequences {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid exclude_sequences regex: {}", e))?)
    } else {
        None
    };

    Ok(ValidationResult {
        coupling_config: config,
        sequence_filter: SequenceFilter { include, exclude },
        format,
        length_profile,
        quality_profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn parse(cli: &[&str]) -> Args {
        Args::from_args(&["rnami"], cli).unwrap()
    }

    #[test]
    fn test_defaults() {
        let result = validate_args(&parse(&["--msa", "a.fasta"])).unwrap();
        assert_eq!(result.coupling_config, CouplingConfig::default());
        assert_eq!(result.format, OutputFormat::Tsv);
        assert!(!result.sequence_filter.is_active());
    }

    #[test]
    fn test_presets_then_overrides() {
        let args = parse(&[
            "--length-profile",
            "very-long",
            "--quality",
            "low",
            "--overlap",
            "100",
            "--pseudocount",
            "adaptive",
            "--no-smoothing",
        ]);
        let config = validate_args(&args).unwrap().coupling_config;
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.overlap, 100);
        assert_eq!(config.gap_threshold, 0.6);
        assert_eq!(config.conservation_range, (0.1, 0.99));
        assert_eq!(config.pseudocount, Pseudocount::Adaptive);
        assert!(!config.smoothing);
        assert_eq!(config.max_sequences, Some(1000));

        let capped = parse(&["--quality", "low", "--max-sequences", "250"]);
        assert_eq!(validate_args(&capped).unwrap().coupling_config.max_sequences, Some(250));
        assert_eq!(validate_args(&parse(&["--msa", "a.fasta"])).unwrap().coupling_config.max_sequences, None);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(validate_args(&parse(&["--overlap", "700"])).is_err());
        assert!(validate_args(&parse(&["--pseudocount", "lots"])).is_err());
        assert!(validate_args(&parse(&["--format", "xlsx"])).is_err());
        assert!(validate_args(&parse(&["--quality", "great"])).is_err());
        assert!(validate_args(&parse(&["--include-sequences", "(["])).is_err());
        assert!(validate_args(&parse(&["--threads", "0"])).is_err());
    }
}
