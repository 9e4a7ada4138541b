use crate::grammar::{CaseKey, DecodedCase};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Mean throughput of every valid trial sharing one configuration key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedPoint {
    #[serde(flatten)]
    pub key: CaseKey,
    pub throughput: f64,
    /// Number of numeric trials behind `throughput`
    pub trials: usize,
}

#[derive(Debug, Default)]
struct Accumulator {
    sum: f64,
    valid: usize,
    excluded: usize,
}

impl Accumulator {
    fn add(&mut self, throughput: Option<f64>) {
        match throughput {
            Some(value) => {
                self.sum += value;
                self.valid += 1;
            }
            None => self.excluded += 1,
        }
    }

    fn mean(&self) -> Option<f64> {
        if self.valid == 0 {
            None
        } else {
            Some(self.sum / self.valid as f64)
        }
    }
}

/// Merge repeated trials into one point per configuration.
///
/// Trials without a numeric throughput are left out of the mean; a key with
/// no numeric trial at all produces no point. Points come back sorted by key.
pub fn aggregate<I>(cases: I) -> Vec<AggregatedPoint>
where
    I: IntoIterator<Item = DecodedCase>,
{
    let mut groups: BTreeMap<CaseKey, Accumulator> = BTreeMap::new();
    let mut total = 0usize;

    for case in cases {
        groups.entry(case.key).or_default().add(case.throughput);
        total += 1;
    }

    let mut excluded = 0usize;
    let mut dropped = Vec::new();
    let mut points = Vec::with_capacity(groups.len());

    for (key, acc) in groups {
        excluded += acc.excluded;
        match acc.mean() {
            Some(throughput) => points.push(AggregatedPoint {
                key,
                throughput,
                trials: acc.valid,
            }),
            None => dropped.push(key),
        }
    }

    if excluded > 0 {
        warn!(excluded, "trials without a numeric throughput left out of the mean");
    }
    for key in &dropped {
        warn!(
            variant = %key.variant,
            threads = key.thread_count,
            size = %key.problem_size,
            "configuration has no numeric trials; dropped"
        );
    }
    debug!(
        trials = total,
        points = points.len(),
        dropped = dropped.len(),
        "aggregated trials"
    );

    points
}

/// Print aggregated points to console
pub fn print_summary(points: &[AggregatedPoint]) {
    println!("\n{:=<80}", "");
    println!("Aggregated Results");
    println!("{:=<80}\n", "");

    println!(
        "  {:<24} {:<20} {:>12} {:>8} {:>16} {:>7}",
        "Variant", "Workload", "Size", "Threads", "Throughput", "Trials"
    );
    println!("  {:-<92}", "");

    for point in points {
        let workload = point.key.workload.map(|w| w.tag()).unwrap_or("-");
        println!(
            "  {:<24} {:<20} {:>12} {:>8} {:>16.0} {:>7}",
            point.key.variant,
            workload,
            point.key.problem_size.to_string(),
            point.key.thread_count,
            point.throughput,
            point.trials
        );
    }
    println!();
}
