// main.rs - CLI entry point

use rnami::cli::Config;
use rnami::prelude::*;
use std::path::Path;
use std::time::Instant;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let msa = args.msa.clone().ok_or("--msa is required")?;
    let output = if args.dry_run {
        None
    } else {
        Some(args.output.clone().ok_or("--output is required")?)
    };

    println!("🚀 rnami v{}", env!("CARGO_PKG_VERSION"));

    let validation = validate_args(&args)?;
    let config = &validation.coupling_config;

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else if config.parallel {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    } else {
        println!("🧵 Threads: 1 (sequential)");
    }

    if let Some(description) = &validation.length_profile.description {
        println!("📏 Length profile: {} ({})", args.length_profile, description);
    }
    if let Some(quality) = &validation.quality_profile {
        println!(
            "🎚️  MSA quality: {} ({})",
            args.quality.as_deref().unwrap_or("-"),
            quality.description.as_deref().unwrap_or("")
        );
    }

    let total_start = Instant::now();

    // Load alignment
    println!("🧬 Loading alignment: {}", msa);
    let alignment = load_alignment(Path::new(&msa), &validation.sequence_filter)?;
    println!(
        "📊 Alignment: {} sequences × {} columns",
        alignment.num_sequences(),
        alignment.length()
    );

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        return Ok(());
    }

    println!(
        "⚙️  Windowing: max length {}, chunk {}, overlap {}",
        config.max_length, config.chunk_size, config.overlap
    );
    println!(
        "🔍 Filters: gap ≤ {}, conservation {:.2}-{:.2}, pseudocount {}",
        config.gap_threshold, config.conservation_range.0, config.conservation_range.1, config.pseudocount
    );

    let engine = CouplingEngine::new(config.clone()).map_err(|e| e.to_string())?;
    let result = engine.analyze(&alignment).map_err(|e| e.to_string())?;

    println!("\n📈 === COUPLING ANALYSIS ===");
    println!(
        "  • Effective sequences: {:.2} (pseudocount {})",
        result.effective_sequences, result.params.pseudocount_used
    );
    println!(
        "  • Valid positions: {}/{}",
        result.valid_positions.len(),
        result.length()
    );
    println!("  • Scored pairs: {}", result.scores.scored_pairs());
    if let Some(report) = &result.chunking {
        println!(
            "  • Windows: {} ({} failed)",
            report.windows.len(),
            report.failures.len()
        );
        for failure in &report.failures {
            println!("  ⚠️  Window [{}, {}) failed: {}", failure.start, failure.end, failure.reason);
        }
    }
    if let Some(best) = result.top_pairs.first() {
        println!("  • Strongest pair: {}-{} ({:.4})", best.i, best.j, best.score);
    }

    // Write outputs
    if let Some(dir) = output {
        let files = write_results(Path::new(&dir), &result, validation.format, &msa, &command_line)?;
        for file in &files {
            println!("✅ Written: {}", file);
        }
    }

    println!(
        "\n🎉 Completed in {:.2}s{}",
        total_start.elapsed().as_secs_f64(),
        if result.is_complete() { "" } else { " (partial: some windows failed)" }
    );
    Ok(())
}
