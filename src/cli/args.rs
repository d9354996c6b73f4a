// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// rnami - Mutual-information coupling matrices from RNA alignments
pub struct Args {
    /// path to aligned FASTA file (MSA)
    #[argh(option)]
    pub msa: Option<String>,

    /// output directory for matrices, ranked pairs and summary
    #[argh(option)]
    pub output: Option<String>,

    /// matrix output format: tsv, csv (default: tsv)
    #[argh(option, default = "String::from(\"tsv\")")]
    pub format: String,

    /// length preset: default, short, medium, long, very-long (default: default)
    #[argh(option, default = "String::from(\"default\")")]
    pub length_profile: String,

    /// MSA quality preset: high, medium, low (overrides filtering thresholds)
    #[argh(option)]
    pub quality: Option<String>,

    /// alignments longer than this are processed in overlapping windows
    #[argh(option)]
    pub max_length: Option<usize>,

    /// window width for long alignments
    #[argh(option)]
    pub chunk_size: Option<usize>,

    /// overlap between consecutive windows
    #[argh(option)]
    pub overlap: Option<usize>,

    /// maximum gap fraction for a scored position (0.0-1.0)
    #[argh(option)]
    pub gap_threshold: Option<f64>,

    /// minimum conservation of the most common symbol (0.0-1.0)
    #[argh(option)]
    pub conservation_min: Option<f64>,

    /// maximum conservation of the most common symbol (0.0-1.0)
    #[argh(option)]
    pub conservation_max: Option<f64>,

    /// pseudocount: adaptive or a non-negative number (default: adaptive)
    #[argh(option)]
    pub pseudocount: Option<String>,

    /// disable identity-based sequence weighting
    #[argh(switch)]
    pub no_weighting: bool,

    /// identity above which two sequences count as redundant (0.0-1.0)
    #[argh(option)]
    pub identity_threshold: Option<f64>,

    /// drop sequences whose gap fraction exceeds this (0.0-1.0)
    #[argh(option)]
    pub sequence_gap_threshold: Option<f64>,

    /// keep at most this many sequences (highest weight first)
    #[argh(option)]
    pub max_sequences: Option<usize>,

    /// minimum |i - j| for ranked pairs
    #[argh(option)]
    pub min_separation: Option<usize>,

    /// number of ranked pairs to report
    #[argh(option)]
    pub top_k: Option<usize>,

    /// disable Gaussian smoothing of the APC matrix
    #[argh(switch)]
    pub no_smoothing: bool,

    /// smoothing kernel width (default: 0.6)
    #[argh(option)]
    pub smoothing_sigma: Option<f64>,

    /// damp scores of pairs 2-8 positions apart
    #[argh(switch)]
    pub short_range_damping: bool,

    /// include only sequences whose identifier matches regex pattern
    #[argh(option)]
    pub include_sequences: Option<String>,

    /// exclude sequences whose identifier matches regex pattern
    #[argh(option)]
    pub exclude_sequences: Option<String>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// run single-threaded
    #[argh(switch)]
    pub sequential: bool,

    /// show progress bars for pair computation
    #[argh(switch)]
    pub progress: bool,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// verbose (debug) logging
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
