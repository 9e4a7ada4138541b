use crate::aggregate::AggregatedPoint;
use crate::config::ReportConfig;
use crate::grammar::{CaseKey, ProblemSize, Workload};
use plotters::style::RGBColor;

/// The fixed selection that makes up one chart panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub workload: Option<Workload>,
    pub problem_size: ProblemSize,
}

impl Slice {
    pub fn list(workload: Workload, size: u64) -> Self {
        Self {
            workload: Some(workload),
            problem_size: ProblemSize::Elements(size),
        }
    }

    pub fn queue(operations: u64) -> Self {
        Self {
            workload: None,
            problem_size: ProblemSize::Operations(operations),
        }
    }

    pub fn matches(&self, key: &CaseKey) -> bool {
        key.workload == self.workload && key.problem_size == self.problem_size
    }
}

/// Throughput against thread count for one variant, ascending by threads
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub variant: String,
    pub color: RGBColor,
    pub points: Vec<(u64, f64)>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One series per configured variant, in configured order. Variants with no
/// data in the slice get an empty series.
pub fn project(points: &[AggregatedPoint], slice: Slice, config: &ReportConfig) -> Vec<Series> {
    config
        .variant_colors
        .iter()
        .map(|(variant, color)| {
            let mut data: Vec<(u64, f64)> = points
                .iter()
                .filter(|p| p.key.variant == *variant && slice.matches(&p.key))
                .map(|p| (p.key.thread_count, p.throughput))
                .collect();
            data.sort_by_key(|(threads, _)| *threads);

            Series {
                variant: variant.clone(),
                color: *color,
                points: data,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ORANGE, PURPLE};

    fn point(
        variant: &str,
        workload: Workload,
        threads: u64,
        size: u64,
        tp: f64,
    ) -> AggregatedPoint {
        AggregatedPoint {
            key: CaseKey {
                variant: variant.to_string(),
                workload: Some(workload),
                thread_count: threads,
                problem_size: ProblemSize::Elements(size),
            },
            throughput: tp,
            trials: 1,
        }
    }

    #[test]
    fn test_projection_sorts_by_threads() {
        let points = vec![
            point("LockFreeList", Workload::ReadHeavy, 8, 1000, 900_000.0),
            point("LockFreeList", Workload::ReadHeavy, 1, 1000, 150_000.0),
            point("LockFreeList", Workload::ReadHeavy, 4, 1000, 500_000.0),
        ];
        let config = ReportConfig::list();
        let series = project(&points, Slice::list(Workload::ReadHeavy, 1000), &config);

        assert_eq!(series.len(), config.variant_colors.len());
        let lock_free = series.iter().find(|s| s.variant == "LockFreeList").unwrap();
        assert_eq!(lock_free.color, ORANGE);
        assert_eq!(
            lock_free.points,
            vec![(1, 150_000.0), (4, 500_000.0), (8, 900_000.0)]
        );
    }

    #[test]
    fn test_projection_filters_slice() {
        let points = vec![
            point("LazyList", Workload::ReadHeavy, 2, 1000, 1.0),
            point("LazyList", Workload::WriteHeavy, 2, 1000, 2.0),
            point("LazyList", Workload::ReadHeavy, 2, 100, 3.0),
        ];
        let config = ReportConfig::list();
        let series = project(&points, Slice::list(Workload::WriteHeavy, 1000), &config);

        let lazy = series.iter().find(|s| s.variant == "LazyList").unwrap();
        assert_eq!(lazy.color, PURPLE);
        assert_eq!(lazy.points, vec![(2, 2.0)]);
    }

    #[test]
    fn test_empty_slice_yields_empty_series() {
        let points = vec![point("LazyList", Workload::ReadHeavy, 2, 1000, 1.0)];
        let config = ReportConfig::list();
        let series = project(&points, Slice::list(Workload::Balanced, 10_000), &config);

        assert_eq!(series.len(), 5);
        assert!(series.iter().all(Series::is_empty));
    }

    #[test]
    fn test_series_follow_configured_order() {
        let config = ReportConfig::queue();
        let series = project(&[], Slice::queue(10_000), &config);
        let names: Vec<&str> = series.iter().map(|s| s.variant.as_str()).collect();
        assert_eq!(
            names,
            ["BoundedQueue", "LockFreeQueueRecycle", "LockFreeQueue", "UnboundedQueue"]
        );
    }

    #[test]
    fn test_unconfigured_variants_are_not_projected() {
        let points = vec![point("SkipList", Workload::ReadHeavy, 2, 1000, 1.0)];
        let series = project(
            &points,
            Slice::list(Workload::ReadHeavy, 1000),
            &ReportConfig::list(),
        );
        assert!(series.iter().all(|s| s.variant != "SkipList" && s.is_empty()));
    }
}
