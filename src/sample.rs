//! Synthetic benchmark results in the same CSV layout the benchmark runner
//! writes, for trying the report without running the benchmarks.

use crate::config::ReportConfig;
use crate::grammar::{list, queue, Grammar, Workload};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Variant benchmarked through an adapter type in the queue suite
const WRAPPED_QUEUE: &str = "BoundedQueue";

const QUEUE_BASE_THROUGHPUT: f64 = 4.0e6;

/// Configuration for sample generation
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub grammar: Grammar,
    /// Repeated trials per configuration
    pub trials: usize,
    pub thread_counts: Vec<u64>,
    /// Probability that a trial is written as a failed measurement
    pub failure_rate: f64,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl SampleConfig {
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar,
            trials: 3,
            thread_counts: vec![1, 2, 4, 8, 16],
            failure_rate: 0.02,
            seed: 42,
        }
    }
}

/// One generated row
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub name: String,
    pub iterations: u64,
    /// `None` for a failed trial
    pub throughput: Option<f64>,
}

pub struct SampleGenerator {
    config: SampleConfig,
    report: ReportConfig,
}

impl SampleGenerator {
    pub fn new(config: SampleConfig) -> Self {
        let report = ReportConfig::for_grammar(config.grammar);
        Self { config, report }
    }

    /// Generate every row, trials of one configuration adjacent.
    pub fn generate(&self) -> Vec<SampleRow> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut rows = Vec::new();

        for size in &self.report.sizes_to_report {
            let size = size.value();
            for (variant_idx, (variant, _)) in self.report.variant_colors.iter().enumerate() {
                for &threads in &self.config.thread_counts {
                    match self.config.grammar {
                        Grammar::List => {
                            for workload in Workload::all() {
                                let name = list::encode(*workload, variant, threads, size);
                                let base = list_base_throughput(*workload, size);
                                self.push_trials(
                                    &mut rows,
                                    &mut rng,
                                    name,
                                    base,
                                    variant_idx,
                                    threads,
                                );
                            }
                        }
                        Grammar::Queue => {
                            let name = queue_case_name(variant, size, threads);
                            self.push_trials(
                                &mut rows,
                                &mut rng,
                                name,
                                QUEUE_BASE_THROUGHPUT,
                                variant_idx,
                                threads,
                            );
                        }
                    }
                }
            }
        }

        debug!(rows = rows.len(), family = self.config.grammar.name(), "generated sample rows");
        rows
    }

    fn push_trials(
        &self,
        rows: &mut Vec<SampleRow>,
        rng: &mut StdRng,
        name: String,
        base: f64,
        variant_idx: usize,
        threads: u64,
    ) {
        // Later variants in the configured order scale better with threads.
        let exponent = -0.4 + 0.25 * variant_idx as f64;
        let expected = base * (threads as f64).powf(exponent);

        for _ in 0..self.config.trials {
            let failed = self.config.failure_rate > 0.0
                && rng.gen_bool(self.config.failure_rate.min(1.0));
            let throughput = if failed {
                None
            } else {
                Some((expected * rng.gen_range(0.9..1.1)).round())
            };
            rows.push(SampleRow {
                name: name.clone(),
                iterations: rng.gen_range(100..10_000),
                throughput,
            });
        }
    }

    /// Write rows as CSV with the family's throughput column.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let rows = self.generate();
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record([
            "name",
            "iterations",
            self.config.grammar.throughput_column(),
            "error_occurred",
            "error_message",
        ])?;

        for row in &rows {
            let iterations = row.iterations.to_string();
            let (value, error_occurred, error_message) = match row.throughput {
                Some(v) => (v.to_string(), "", ""),
                None => (String::new(), "true", "benchmark run failed"),
            };
            csv.write_record([
                row.name.as_str(),
                iterations.as_str(),
                value.as_str(),
                error_occurred,
                error_message,
            ])?;
        }

        csv.flush()?;
        Ok(rows.len())
    }

    pub fn write_to(&self, path: &Path) -> Result<usize> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        self.write_csv(std::io::BufWriter::new(file))
    }
}

fn list_base_throughput(workload: Workload, size: u64) -> f64 {
    let mix = match workload {
        Workload::ReadHeavy => 1.0,
        Workload::Balanced => 0.7,
        Workload::WriteHeavy => 0.5,
    };
    // Longer lists mean longer traversals.
    mix * 5.0e8 / size as f64
}

fn queue_case_name(variant: &str, operations: u64, threads: u64) -> String {
    let type_name = if variant == WRAPPED_QUEUE {
        format!("{}{}", variant, queue::WRAPPER_SUFFIX)
    } else {
        variant.to_string()
    };
    format!(
        "BM_QueueThroughput<{}<int>>/{}/{}/{}",
        type_name,
        operations,
        threads,
        queue::REAL_TIME
    )
}
