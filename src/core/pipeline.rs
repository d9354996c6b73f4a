// pipeline.rs - End-to-end coupling analysis of one alignment

use crate::core::alphabet::ALPHABET_SIZE;
use crate::core::apc::apply_apc;
use crate::core::chunking::{plan_chunks, recombine, Chunk, ChunkFailure, WindowResult};
use crate::core::config::CouplingConfig;
use crate::core::executor::{Execution, Executor};
use crate::core::frequency::{filtered_sites, FrequencyEstimator, PositionFilter};
use crate::core::mutual_info::compute_mi_matrix;
use crate::core::postprocess::{damp_short_range, smooth, top_pairs, TopPair};
use crate::core::weighting::{effective_count, weighter_from_config, SequenceWeighter};
use crate::data::alignment::{Alignment, AlignmentWindow};
use crate::data::matrix::ScoreMatrix;
use crate::error::CouplingError;
use log::{debug, info, warn};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::time::Instant;

/// Parameters actually used for a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouplingParams {
    pub pseudocount_used: f64,
    pub alphabet_size: usize,
    pub gap_threshold: f64,
    pub conservation_range: (f64, f64),
    pub sequence_weighting: String,
    pub identity_threshold: f64,
}

/// How a long alignment was split, and which windows failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkingReport {
    pub windows: Vec<Chunk>,
    pub chunk_size: usize,
    /// Overlap asked for in the configuration
    pub requested_overlap: usize,
    /// Smallest overlap between neighbouring planned windows
    pub min_overlap: usize,
    pub failures: Vec<ChunkFailure>,
}

/// Result record of one analysis
#[derive(Debug, Clone, Serialize)]
pub struct CouplingResult {
    pub mi_matrix: ScoreMatrix,
    pub apc_matrix: ScoreMatrix,
    /// APC after optional damping and smoothing
    pub scores: ScoreMatrix,
    pub top_pairs: Vec<TopPair>,
    pub valid_positions: BTreeSet<usize>,
    /// Whole-alignment sequence weights, one per retained sequence
    pub weights: Vec<f64>,
    pub effective_sequences: f64,
    /// Names of the sequences that entered the analysis
    pub sequence_names: Vec<String>,
    pub params: CouplingParams,
    pub chunking: Option<ChunkingReport>,
    pub calculation_time: Option<f64>,
}

impl CouplingResult {
    pub fn length(&self) -> usize {
        self.mi_matrix.size()
    }

    /// False when some window failed and its exclusive pairs are sentinel
    pub fn is_complete(&self) -> bool {
        self.chunking
            .as_ref()
            .map(|report| report.failures.is_empty())
            .unwrap_or(true)
    }
}

/// Smallest number of columns shared by consecutive windows, 0 for one window
fn min_overlap(chunks: &[Chunk]) -> usize {
    chunks
        .windows(2)
        .map(|pair| pair[0].end.saturating_sub(pair[1].start))
        .min()
        .unwrap_or(0)
}

/// Runs weighting, frequency estimation, MI, APC, chunk recombination and
/// post-processing with one fixed configuration.
#[derive(Debug)]
pub struct CouplingEngine {
    config: CouplingConfig,
    execution: Execution,
    weighter: Box<dyn SequenceWeighter>,
}

impl CouplingEngine {
    pub fn new(config: CouplingConfig) -> Result<Self, CouplingError> {
        config.validate()?;
        Ok(Self {
            execution: Execution::from_config(&config),
            weighter: weighter_from_config(&config),
            config,
        })
    }

    /// Override the execution strategy chosen by the configuration
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    pub fn config(&self) -> &CouplingConfig {
        &self.config
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Sequence weights for a set of rows
    pub fn weigh(&self, rows: &[&[u8]]) -> Vec<f64> {
        self.weighter.weigh(rows, &self.execution)
    }

    /// Analyze one alignment. Structural problems (empty input, nothing left
    /// to score) are errors; numeric degeneracies and failing windows are
    /// reported inside the result.
    pub fn analyze(&self, alignment: &Alignment) -> Result<CouplingResult, CouplingError> {
        let started = Instant::now();
        let alignment = self.prefilter(alignment)?;
        let length = alignment.length();

        let full = alignment.full_window();
        let weights = self.weigh(full.rows());
        let effective = effective_count(&weights);
        let alpha = self.config.pseudocount.resolve(effective);

        let chunks = plan_chunks(
            length,
            self.config.max_length,
            self.config.chunk_size,
            self.config.overlap,
        );
        info!(
            "Analyzing {} sequences x {} columns (effective {:.2}, pseudocount {}, {} window(s), {})",
            alignment.num_sequences(),
            length,
            effective,
            alpha,
            chunks.len(),
            self.execution.name()
        );

        let (recombined, chunking) = if chunks.len() == 1 {
            let window = self.run_window(&full, &weights, alpha)?;
            (recombine(length, &[window], &self.execution), None)
        } else {
            let outcomes = self.execution.map_indexed(chunks.len(), |k| {
                self.analyze_window(&alignment, chunks[k], alpha)
            });

            let mut windows = Vec::with_capacity(chunks.len());
            let mut failures = Vec::new();
            for (chunk, outcome) in chunks.iter().zip(outcomes) {
                match outcome {
                    Ok(window) => windows.push(window),
                    Err(e) => {
                        warn!("Window [{}, {}) failed: {}", chunk.start, chunk.end, e);
                        failures.push(ChunkFailure {
                            start: chunk.start,
                            end: chunk.end,
                            reason: e.to_string(),
                        });
                    }
                }
            }
            if windows.is_empty() {
                return Err(CouplingError::NoValidPositions { positions: length });
            }

            let report = ChunkingReport {
                windows: chunks.clone(),
                chunk_size: self.config.chunk_size,
                requested_overlap: self.config.overlap,
                min_overlap: min_overlap(&chunks),
                failures,
            };
            (recombine(length, &windows, &self.execution), Some(report))
        };

        if recombined.valid.is_empty() {
            return Err(CouplingError::NoValidPositions { positions: length });
        }

        let mut scores = recombined.apc.clone();
        if self.config.short_range_damping {
            scores = damp_short_range(&scores);
        }
        if self.config.smoothing {
            scores = smooth(&scores, self.config.smoothing_sigma);
        }
        let top = top_pairs(
            &scores,
            &recombined.valid,
            self.config.top_k,
            self.config.min_pair_separation,
        );

        let elapsed = started.elapsed().as_secs_f64();
        info!(
            "{} of {} positions valid, {} scored pairs in {:.2}s",
            recombined.valid.len(),
            length,
            scores.scored_pairs(),
            elapsed
        );

        Ok(CouplingResult {
            mi_matrix: recombined.mi,
            apc_matrix: recombined.apc,
            scores,
            top_pairs: top,
            valid_positions: recombined.valid,
            weights,
            effective_sequences: effective,
            sequence_names: alignment.names().iter().map(|n| n.to_string()).collect(),
            params: CouplingParams {
                pseudocount_used: alpha,
                alphabet_size: ALPHABET_SIZE,
                gap_threshold: self.config.gap_threshold,
                conservation_range: self.config.conservation_range,
                sequence_weighting: self.weighter.name().to_string(),
                identity_threshold: self.config.identity_threshold,
            },
            chunking,
            calculation_time: Some(elapsed),
        })
    }

    /// Process one column window on its own: weights, filtering, MI and APC
    /// are all re-evaluated from the window's columns only.
    pub fn analyze_window(
        &self,
        alignment: &Alignment,
        chunk: Chunk,
        alpha: f64,
    ) -> Result<WindowResult, CouplingError> {
        let window = alignment.window(chunk.start, chunk.end);
        let weights = self.weigh(window.rows());
        self.run_window(&window, &weights, alpha)
    }

    fn run_window(
        &self,
        window: &AlignmentWindow<'_>,
        weights: &[f64],
        alpha: f64,
    ) -> Result<WindowResult, CouplingError> {
        // alpha = 0 counts every sequence once (plain plug-in estimate);
        // weights still drive position filtering.
        let unit_weights;
        let counting_weights: &[f64] = if alpha > 0.0 {
            weights
        } else {
            unit_weights = vec![1.0; weights.len()];
            &unit_weights
        };
        let profiler = FrequencyEstimator::new(weights, alpha);
        let estimator = FrequencyEstimator::new(counting_weights, alpha);
        let filter = PositionFilter::from_config(&self.config);
        let sites = filtered_sites(window, &filter, &profiler, &estimator);

        let local_valid: Vec<usize> = (0..window.width()).filter(|&k| sites[k].is_some()).collect();
        if local_valid.is_empty() {
            return Err(CouplingError::NoValidPositions {
                positions: window.width(),
            });
        }
        debug!(
            "Window [{}, {}): {} of {} positions valid",
            window.offset(),
            window.offset() + window.width(),
            local_valid.len(),
            window.width()
        );

        let mi = compute_mi_matrix(
            window,
            &sites,
            &estimator,
            &self.execution,
            self.config.show_progress,
        );
        let apc = apply_apc(&mi, &local_valid);

        Ok(WindowResult {
            chunk: Chunk::new(window.offset(), window.offset() + window.width()),
            mi,
            apc,
            valid: local_valid.iter().map(|&k| window.global(k)).collect(),
        })
    }

    /// Drop gappy sequences, then cap the count keeping the highest weights
    fn prefilter<'a>(&self, alignment: &'a Alignment) -> Result<Cow<'a, Alignment>, CouplingError> {
        let mut current = Cow::Borrowed(alignment);

        if let Some(threshold) = self.config.sequence_gap_threshold {
            let keep: Vec<usize> = current
                .records()
                .iter()
                .enumerate()
                .filter(|(_, r)| r.gap_fraction() <= threshold)
                .map(|(i, _)| i)
                .collect();
            if keep.len() < current.num_sequences() {
                debug!(
                    "Dropped {} sequences above gap fraction {}",
                    current.num_sequences() - keep.len(),
                    threshold
                );
                current = Cow::Owned(current.select(&keep)?);
            }
        }

        if let Some(limit) = self.config.max_sequences {
            if current.num_sequences() > limit {
                let full = current.full_window();
                let weights = self.weigh(full.rows());
                let mut order: Vec<usize> = (0..weights.len()).collect();
                order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]).then(a.cmp(&b)));
                order.truncate(limit);
                order.sort_unstable();
                debug!("Keeping {} of {} sequences by weight", limit, current.num_sequences());
                current = Cow::Owned(current.select(&order)?);
            }
        }

        Ok(current)
    }
}
