//! Benchmark case-name grammars.
//!
//! A case name such as `BM_ReadHeavyWorkload<LockFreeList>/8/1000` packs the
//! variant, workload, thread count and problem size of one benchmark trial
//! into a single string. Each benchmark family has its own layout, so decoding
//! is split into one profile per family behind [`Grammar`].

pub mod list;
pub mod queue;

use crate::error::DecodeError;
use crate::input::{RawRecord, Unit};
use serde::Serialize;
use std::fmt;

/// Suffixes the benchmark runner appends to repetition summary rows.
const SUMMARY_SUFFIXES: &[&str] = &["_mean", "_median", "_stddev", "_cv"];

/// Operation mix applied during a list benchmark trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Workload {
    #[serde(rename = "ReadHeavyWorkload")]
    ReadHeavy,
    #[serde(rename = "WriteHeavyWorkload")]
    WriteHeavy,
    #[serde(rename = "BalancedWorkload")]
    Balanced,
}

impl Workload {
    pub fn all() -> &'static [Workload] {
        &[Workload::ReadHeavy, Workload::WriteHeavy, Workload::Balanced]
    }

    /// Tag as it appears in case names.
    pub fn tag(&self) -> &'static str {
        match self {
            Workload::ReadHeavy => "ReadHeavyWorkload",
            Workload::WriteHeavy => "WriteHeavyWorkload",
            Workload::Balanced => "BalancedWorkload",
        }
    }

    /// Read/insert/remove ratio, used for chart titles.
    pub fn description(&self) -> &'static str {
        match self {
            Workload::ReadHeavy => "80% contains, 15% add, 5% remove",
            Workload::WriteHeavy => "20% contains, 40% add, 40% remove",
            Workload::Balanced => "33% contains, 33% add, 33% remove",
        }
    }

    /// Case-sensitive lookup by tag.
    pub fn from_tag(tag: &str) -> Option<Workload> {
        Workload::all().iter().copied().find(|w| w.tag() == tag)
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Size dimension of a case. List benchmarks pre-populate a number of
/// elements; queue benchmarks run a fixed number of operations instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProblemSize {
    Elements(u64),
    Operations(u64),
}

impl ProblemSize {
    pub fn value(&self) -> u64 {
        match self {
            ProblemSize::Elements(n) | ProblemSize::Operations(n) => *n,
        }
    }
}

impl fmt::Display for ProblemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemSize::Elements(n) => write!(f, "size={}", n),
            ProblemSize::Operations(n) => write!(f, "ops={}", n),
        }
    }
}

/// The four dimensions decoded from a case name. Two names that decode to the
/// same key are repeated trials of one configuration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CaseKey {
    pub variant: String,
    pub workload: Option<Workload>,
    pub thread_count: u64,
    pub problem_size: ProblemSize,
}

/// One trial: its decoded key plus the measured throughput, if numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCase {
    pub key: CaseKey,
    pub throughput: Option<f64>,
}

/// Decoding profile for one benchmark family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Grammar {
    /// `BM_<Workload><<Variant>>/<threads>/<size>`
    List,
    /// `..<Variant[Wrapper]<..>>/<operations>/<threads>/real_time`
    Queue,
}

impl Grammar {
    pub fn decode(&self, name: &str) -> Result<CaseKey, DecodeError> {
        match self {
            Grammar::List => list::decode(name),
            Grammar::Queue => queue::decode(name),
        }
    }

    pub fn decode_record(&self, record: &RawRecord) -> Result<DecodedCase, DecodeError> {
        Ok(DecodedCase {
            key: self.decode(&record.case_name)?,
            throughput: record.measured_value,
        })
    }

    /// Column holding the throughput measurement for this family.
    pub fn throughput_column(&self) -> &'static str {
        match self {
            Grammar::List => "ops",
            Grammar::Queue => "items_per_second",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            Grammar::List => Unit::OpsPerSec,
            Grammar::Queue => Unit::ItemsPerSec,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Grammar::List => "list",
            Grammar::Queue => "queue",
        }
    }
}

/// Whether `name` is a repetition summary (mean, median, ...) computed by the
/// benchmark runner rather than a trial.
pub fn is_runner_summary(name: &str) -> bool {
    let last = name.rsplit('/').next().unwrap_or(name);
    SUMMARY_SUFFIXES.iter().any(|suffix| last.ends_with(suffix))
}

/// Parse a strictly positive decimal count. Signs, whitespace and zero are
/// rejected.
pub(crate) fn parse_count(
    name: &str,
    field: &'static str,
    value: &str,
) -> Result<u64, DecodeError> {
    let invalid = || DecodeError::InvalidInteger {
        name: name.to_string(),
        field,
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_tags_are_case_sensitive() {
        assert_eq!(
            Workload::from_tag("ReadHeavyWorkload"),
            Some(Workload::ReadHeavy)
        );
        assert_eq!(Workload::from_tag("readheavyworkload"), None);
        assert_eq!(Workload::from_tag("ReadHeavy"), None);
    }

    #[test]
    fn test_workload_descriptions() {
        assert_eq!(
            Workload::WriteHeavy.description(),
            "20% contains, 40% add, 40% remove"
        );
        for w in Workload::all() {
            assert_eq!(Workload::from_tag(w.tag()), Some(*w));
        }
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("n", "thread count", "8").unwrap(), 8);
        assert!(parse_count("n", "thread count", "0").is_err());
        assert!(parse_count("n", "thread count", "+8").is_err());
        assert!(parse_count("n", "thread count", " 8").is_err());
        assert!(parse_count("n", "thread count", "").is_err());
        assert!(parse_count("n", "thread count", "99999999999999999999999").is_err());
    }

    #[test]
    fn test_runner_summary_detection() {
        assert!(is_runner_summary("BM_Q<BoundedQueue<int>>/10000/4/real_time_mean"));
        assert!(is_runner_summary("BM_Q<BoundedQueue<int>>/10000/4/real_time_stddev"));
        assert!(!is_runner_summary("BM_Q<BoundedQueue<int>>/10000/4/real_time"));
        assert!(!is_runner_summary("BM_ReadHeavyWorkload<LazyList>/4/100"));
    }

    #[test]
    fn test_grammar_columns() {
        assert_eq!(Grammar::List.throughput_column(), "ops");
        assert_eq!(Grammar::Queue.throughput_column(), "items_per_second");
        assert_eq!(Grammar::Queue.unit(), Unit::ItemsPerSec);
    }

    #[test]
    fn test_decode_record_keeps_throughput() {
        let record = RawRecord {
            case_name: "BM_BalancedWorkload<FineList>/2/100".to_string(),
            measured_value: Some(42.0),
            unit: Unit::OpsPerSec,
        };
        let case = Grammar::List.decode_record(&record).unwrap();
        assert_eq!(case.key.variant, "FineList");
        assert_eq!(case.throughput, Some(42.0));
    }
}
