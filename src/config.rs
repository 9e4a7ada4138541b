use crate::grammar::{Grammar, ProblemSize, Workload};
use plotters::style::RGBColor;

// Named colors the charts have always used
pub const BLUE: RGBColor = RGBColor(0, 0, 255);
pub const RED: RGBColor = RGBColor(255, 0, 0);
pub const GREEN: RGBColor = RGBColor(0, 128, 0);
pub const PURPLE: RGBColor = RGBColor(128, 0, 128);
pub const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Fixed report configuration for one benchmark family.
///
/// Variant order and colors come from here rather than from the data so a
/// variant keeps the same identity across runs.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub grammar: Grammar,
    /// Input file read when none is given
    pub default_input: &'static str,
    /// Plotted variants in legend order
    pub variant_colors: Vec<(String, RGBColor)>,
    /// Workload panels in display order (empty for queues)
    pub workload_descriptions: Vec<(Workload, String)>,
    /// Problem sizes (list) or operation counts (queue) to chart
    pub sizes_to_report: Vec<ProblemSize>,
}

impl ReportConfig {
    pub fn for_grammar(grammar: Grammar) -> Self {
        match grammar {
            Grammar::List => Self::list(),
            Grammar::Queue => Self::queue(),
        }
    }

    pub fn list() -> Self {
        Self {
            grammar: Grammar::List,
            default_input: "list_benchmark_result.csv",
            variant_colors: colors(&[
                ("CoarseList", BLUE),
                ("FineList", RED),
                ("OptimisticList", GREEN),
                ("LazyList", PURPLE),
                ("LockFreeList", ORANGE),
            ]),
            workload_descriptions: Workload::all()
                .iter()
                .map(|w| (*w, w.description().to_string()))
                .collect(),
            sizes_to_report: [100, 1_000, 10_000]
                .into_iter()
                .map(ProblemSize::Elements)
                .collect(),
        }
    }

    pub fn queue() -> Self {
        Self {
            grammar: Grammar::Queue,
            default_input: "queue_benchmark.csv",
            variant_colors: colors(&[
                ("BoundedQueue", BLUE),
                ("LockFreeQueueRecycle", GREEN),
                ("LockFreeQueue", RED),
                ("UnboundedQueue", PURPLE),
            ]),
            workload_descriptions: Vec::new(),
            sizes_to_report: [10_000, 100_000, 1_000_000]
                .into_iter()
                .map(ProblemSize::Operations)
                .collect(),
        }
    }

    pub fn color_of(&self, variant: &str) -> Option<RGBColor> {
        self.variant_colors
            .iter()
            .find(|(name, _)| name == variant)
            .map(|(_, color)| *color)
    }

    pub fn workload_description(&self, workload: Workload) -> &str {
        self.workload_descriptions
            .iter()
            .find(|(w, _)| *w == workload)
            .map(|(_, desc)| desc.as_str())
            .unwrap_or_else(|| workload.description())
    }
}

fn colors(entries: &[(&str, RGBColor)]) -> Vec<(String, RGBColor)> {
    entries
        .iter()
        .map(|(name, color)| (name.to_string(), *color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_defaults() {
        let config = ReportConfig::list();
        let names: Vec<&str> = config.variant_colors.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            ["CoarseList", "FineList", "OptimisticList", "LazyList", "LockFreeList"]
        );
        assert_eq!(config.color_of("LockFreeList"), Some(ORANGE));
        assert_eq!(config.color_of("BoundedQueue"), None);
        assert_eq!(
            config.sizes_to_report,
            vec![
                ProblemSize::Elements(100),
                ProblemSize::Elements(1_000),
                ProblemSize::Elements(10_000)
            ]
        );
        assert_eq!(
            config.workload_description(Workload::ReadHeavy),
            "80% contains, 15% add, 5% remove"
        );
    }

    #[test]
    fn test_queue_defaults() {
        let config = ReportConfig::for_grammar(Grammar::Queue);
        assert_eq!(config.grammar, Grammar::Queue);
        assert_eq!(config.color_of("LockFreeQueue"), Some(RED));
        assert_eq!(config.color_of("BoundedQueue"), Some(BLUE));
        assert!(config.workload_descriptions.is_empty());
        assert_eq!(config.sizes_to_report[2], ProblemSize::Operations(1_000_000));
    }
}
