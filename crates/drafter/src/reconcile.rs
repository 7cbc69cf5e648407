//! Reconciliation of rendered counts against declared expectations.
//!
//! A spec may declare how many nodes, edges, and clusters it should
//! produce. After rendering, the reconciler compares those expectations
//! against what was actually emitted and reports a per-axis ratio plus
//! an overall accuracy figure. Axes the spec does not declare are
//! skipped entirely.

use std::fmt;

use log::debug;

use drafter_core::graph::{Counts, ExpectedCounts};

/// Comparison result for a single count axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisReport {
    pub expected: usize,
    pub actual: usize,
    /// `actual / expected`; an expectation of zero yields 1.0 when met
    /// exactly and 0.0 otherwise.
    pub ratio: f64,
}

impl AxisReport {
    fn new(expected: usize, actual: usize) -> Self {
        let ratio = if expected == 0 {
            if actual == 0 { 1.0 } else { 0.0 }
        } else {
            actual as f64 / expected as f64
        };
        Self {
            expected,
            actual,
            ratio,
        }
    }

    fn within(&self, tolerance: f64) -> bool {
        (self.ratio - 1.0).abs() <= tolerance
    }
}

/// Full reconciliation report across all declared axes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileReport {
    pub nodes: Option<AxisReport>,
    pub edges: Option<AxisReport>,
    pub clusters: Option<AxisReport>,
    /// Mean of the declared axes' ratios; 1.0 when nothing was declared.
    pub accuracy: f64,
    /// True when every declared axis is within tolerance.
    pub passed: bool,
}

impl ReconcileReport {
    fn axes(&self) -> impl Iterator<Item = (&'static str, &AxisReport)> {
        [
            ("nodes", self.nodes.as_ref()),
            ("edges", self.edges.as_ref()),
            ("clusters", self.clusters.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, axis)| axis.map(|axis| (name, axis)))
    }
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, axis) in self.axes() {
            writeln!(
                f,
                "{name}: expected {}, rendered {} ({:.1}%)",
                axis.expected,
                axis.actual,
                axis.ratio * 100.0
            )?;
        }
        write!(
            f,
            "accuracy {:.1}%: {}",
            self.accuracy * 100.0,
            if self.passed { "pass" } else { "fail" }
        )
    }
}

/// Compare rendered counts to declared expectations.
///
/// `tolerance` is a relative slack on each axis ratio; `0.0` demands
/// exact counts. A spec that declares no expectations passes trivially.
pub fn reconcile(expected: &ExpectedCounts, actual: &Counts, tolerance: f64) -> ReconcileReport {
    let nodes = expected.nodes.map(|e| AxisReport::new(e, actual.nodes));
    let edges = expected.edges.map(|e| AxisReport::new(e, actual.edges));
    let clusters = expected.clusters.map(|e| AxisReport::new(e, actual.clusters));

    let declared: Vec<&AxisReport> = [nodes.as_ref(), edges.as_ref(), clusters.as_ref()]
        .into_iter()
        .flatten()
        .collect();

    let accuracy = if declared.is_empty() {
        1.0
    } else {
        declared.iter().map(|axis| axis.ratio).sum::<f64>() / declared.len() as f64
    };
    let passed = declared.iter().all(|axis| axis.within(tolerance));

    debug!(accuracy = accuracy, passed = passed; "Counts reconciled");

    ReconcileReport {
        nodes,
        edges,
        clusters,
        accuracy,
        passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(nodes: usize, edges: usize, clusters: usize) -> Counts {
        Counts {
            nodes,
            edges,
            clusters,
        }
    }

    #[test]
    fn test_exact_match_passes() {
        let expected = ExpectedCounts {
            nodes: Some(22),
            edges: Some(13),
            clusters: Some(13),
        };
        let report = reconcile(&expected, &counts(22, 13, 13), 0.0);

        assert!(report.passed);
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.nodes.unwrap().ratio, 1.0);
    }

    #[test]
    fn test_shortfall_fails_at_zero_tolerance() {
        let expected = ExpectedCounts {
            nodes: Some(10),
            ..ExpectedCounts::default()
        };
        let report = reconcile(&expected, &counts(9, 0, 0), 0.0);

        assert!(!report.passed);
        assert_eq!(report.accuracy, 0.9);
    }

    #[test]
    fn test_tolerance_absorbs_small_drift() {
        let expected = ExpectedCounts {
            nodes: Some(10),
            ..ExpectedCounts::default()
        };
        let report = reconcile(&expected, &counts(9, 0, 0), 0.15);
        assert!(report.passed);
    }

    #[test]
    fn test_undeclared_axes_are_skipped() {
        let expected = ExpectedCounts {
            edges: Some(5),
            ..ExpectedCounts::default()
        };
        // Node and cluster counts are arbitrary; only edges are judged.
        let report = reconcile(&expected, &counts(99, 5, 99), 0.0);

        assert!(report.passed);
        assert!(report.nodes.is_none());
        assert!(report.clusters.is_none());
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn test_no_expectations_passes_trivially() {
        let report = reconcile(&ExpectedCounts::default(), &counts(3, 2, 1), 0.0);
        assert!(report.passed);
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn test_zero_expectation() {
        let expected = ExpectedCounts {
            clusters: Some(0),
            ..ExpectedCounts::default()
        };
        assert!(reconcile(&expected, &counts(0, 0, 0), 0.0).passed);
        let report = reconcile(&expected, &counts(0, 0, 2), 0.0);
        assert!(!report.passed);
        assert_eq!(report.clusters.unwrap().ratio, 0.0);
    }

    #[test]
    fn test_accuracy_is_mean_of_declared_axes() {
        let expected = ExpectedCounts {
            nodes: Some(10),
            edges: Some(4),
            clusters: None,
        };
        let report = reconcile(&expected, &counts(10, 2, 7), 0.0);
        assert!((report.accuracy - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display_report() {
        let expected = ExpectedCounts {
            nodes: Some(4),
            ..ExpectedCounts::default()
        };
        let report = reconcile(&expected, &counts(4, 0, 0), 0.0);
        let text = report.to_string();

        assert!(text.contains("nodes: expected 4, rendered 4 (100.0%)"));
        assert!(text.contains("accuracy 100.0%: pass"));
    }
}
