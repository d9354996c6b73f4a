// mod.rs - Output writers for coupling results

use crate::core::chunking::ChunkFailure;
use crate::core::pipeline::{ChunkingReport, CouplingParams, CouplingResult};
use crate::core::postprocess::TopPair;
use crate::data::matrix::ScoreMatrix;
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Matrix file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Csv,
}

impl OutputFormat {
    pub fn delimiter(&self) -> char {
        match self {
            OutputFormat::Tsv => '\t',
            OutputFormat::Csv => ',',
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}. Use: tsv, csv", s)),
        }
    }
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        create_dir_all(parent).map_err(|e| {
            format!("Failed to create parent directory '{}': {}", parent.display(), e)
        })?;
    }
    Ok(())
}

fn write_err(e: std::io::Error) -> String {
    format!("Write error: {}", e)
}

/// Write a score matrix with `NA` for sentinel cells
pub fn write_matrix(
    file_path: &Path,
    matrix: &ScoreMatrix,
    format: OutputFormat,
    command_line: &str,
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path.display(), e))?;
    let mut writer = BufWriter::new(file);
    let sep = format.delimiter();

    // Write command header
    writeln!(writer, "# Command: {}", command_line).map_err(write_err)?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))
        .map_err(write_err)?;
    writeln!(writer, "# rnami v{}", env!("CARGO_PKG_VERSION")).map_err(write_err)?;

    // Write header
    write!(writer, "Position").map_err(write_err)?;
    for j in 0..matrix.size() {
        write!(writer, "{}{}", sep, j).map_err(write_err)?;
    }
    writeln!(writer).map_err(write_err)?;

    // Write matrix
    for i in 0..matrix.size() {
        write!(writer, "{}", i).map_err(write_err)?;
        for j in 0..matrix.size() {
            let cell = match matrix.get(i, j) {
                Some(v) => format!("{:.6}", v),
                None => "NA".to_string(),
            };
            write!(writer, "{}{}", sep, cell).map_err(write_err)?;
        }
        writeln!(writer).map_err(write_err)?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

/// Write ranked pairs as CSV (`rank,i,j,score`)
pub fn write_top_pairs(file_path: &Path, pairs: &[TopPair]) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let mut writer = csv::Writer::from_path(file_path)
        .map_err(|e| format!("Failed to create top pairs file '{}': {}", file_path.display(), e))?;

    writer
        .write_record(["rank", "i", "j", "score"])
        .map_err(|e| format!("Failed to write top pairs header: {}", e))?;
    for (rank, pair) in pairs.iter().enumerate() {
        writer
            .write_record(&[
                (rank + 1).to_string(),
                pair.i.to_string(),
                pair.j.to_string(),
                format!("{:.6}", pair.score),
            ])
            .map_err(|e| format!("Failed to write top pair: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Failed to flush top pairs: {}", e))?;
    Ok(())
}

/// JSON run summary
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated: String,
    pub command: &'a str,
    pub input: &'a str,
    pub length: usize,
    pub num_sequences: usize,
    pub effective_sequences: f64,
    pub valid_positions: usize,
    pub scored_pairs: usize,
    pub complete: bool,
    pub params: &'a CouplingParams,
    pub chunking: Option<&'a ChunkingReport>,
    pub failures: Vec<&'a ChunkFailure>,
    pub calculation_time: Option<f64>,
    pub top_pairs: &'a [TopPair],
}

impl<'a> RunSummary<'a> {
    pub fn new(result: &'a CouplingResult, input: &'a str, command: &'a str) -> Self {
        Self {
            tool: "rnami",
            version: env!("CARGO_PKG_VERSION"),
            generated: chrono::Utc::now().to_rfc3339(),
            command,
            input,
            length: result.length(),
            num_sequences: result.weights.len(),
            effective_sequences: result.effective_sequences,
            valid_positions: result.valid_positions.len(),
            scored_pairs: result.scores.scored_pairs(),
            complete: result.is_complete(),
            params: &result.params,
            chunking: result.chunking.as_ref(),
            failures: result
                .chunking
                .iter()
                .flat_map(|c| c.failures.iter())
                .collect(),
            calculation_time: result.calculation_time,
            top_pairs: &result.top_pairs,
        }
    }
}

/// Write the JSON summary
pub fn write_summary(file_path: &Path, summary: &RunSummary<'_>) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create summary file '{}': {}", file_path.display(), e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .map_err(|e| format!("Failed to write summary: {}", e))?;
    Ok(())
}

/// Write every output of one analysis into `dir`; returns the files written
pub fn write_results(
    dir: &Path,
    result: &CouplingResult,
    format: OutputFormat,
    input: &str,
    command_line: &str,
) -> Result<Vec<String>, String> {
    create_dir_all(dir)
        .map_err(|e| format!("Failed to create output directory '{}': {}", dir.display(), e))?;
    let ext = format.extension();
    let mut written = Vec::new();

    for (name, matrix) in [
        ("scores", &result.scores),
        ("mi_matrix", &result.mi_matrix),
        ("apc_matrix", &result.apc_matrix),
    ] {
        let path = dir.join(format!("{}.{}", name, ext));
        write_matrix(&path, matrix, format, command_line)?;
        written.push(path.display().to_string());
    }

    let pairs_path = dir.join("top_pairs.csv");
    write_top_pairs(&pairs_path, &result.top_pairs)?;
    written.push(pairs_path.display().to_string());

    let summary_path = dir.join("summary.json");
    write_summary(&summary_path, &RunSummary::new(result, input, command_line))?;
    written.push(summary_path.display().to_string());

    Ok(written)
}
