// ============================================================
// Layer 3 — Metric Report Domain Type
// ============================================================
// The result a classifier hands back after testing.
//
// A MetricReport is an ORDERED list of (name, value) pairs.
// Insertion order is the single source of truth for:
//   - the multi-line textual rendering (Display)
//   - the CSV header line
//   - the CSV data line
// so header and data columns can never drift apart.
//
// ConfusionMatrix is the standard way to build a report:
// tally (actual, predicted) pairs, then derive the usual
// binary-classification metrics from the four counts.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

use std::fmt;

use serde::{Deserialize, Serialize};

/// One named metric value inside a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub name:  String,
    pub value: f64,
}

/// An ordered metric name → value record.
/// Read-only once stored in the harness results registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricReport {
    metrics: Vec<Metric>,
}

impl MetricReport {
    pub fn new() -> Self {
        Self { metrics: Vec::new() }
    }

    /// Append a metric. Position in the report is position
    /// in every rendering.
    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.metrics.push(Metric { name: name.into(), value });
    }

    /// Look a metric up by name (first match wins).
    pub fn get(&self, name: &str) -> Option<f64> {
        self.metrics.iter().find(|m| m.name == name).map(|m| m.value)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }

    /// CSV header line: the metric names joined by `separator`.
    pub fn csv_header(&self, separator: &str) -> String {
        self.metrics
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// CSV data line: the metric values joined by `separator`,
    /// in exactly the header's column order.
    pub fn csv_row(&self, separator: &str) -> String {
        self.metrics
            .iter()
            .map(|m| m.value.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Multi-line rendering, one ` * name -> value` line per metric.
impl fmt::Display for MetricReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pad names so the arrows line up in terminal output
        let width = self
            .metrics
            .iter()
            .map(|m| m.name.len())
            .max()
            .unwrap_or(0);

        for (i, m) in self.metrics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, " * {:<width$} -> {}", m.name, m.value, width = width)?;
        }
        Ok(())
    }
}

// ─── Confusion Matrix ─────────────────────────────────────────────────────────
// Tally of the four outcomes of binary prediction.
// The positive class is "is a DGA domain".
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfusionMatrix {
    /// DGA predicted as DGA
    pub tp: u64,
    /// legitimate predicted as DGA
    pub fp: u64,
    /// legitimate predicted as legitimate
    pub tn: u64,
    /// DGA predicted as legitimate
    pub fn_: u64,
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one prediction against the ground truth.
    pub fn record(&mut self, actual: bool, predicted: bool) {
        match (actual, predicted) {
            (true, true)   => self.tp += 1,
            (false, true)  => self.fp += 1,
            (false, false) => self.tn += 1,
            (true, false)  => self.fn_ += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.tn + self.fn_
    }

    /// Derive the standard binary-classification metrics.
    ///
    /// Every ratio is guarded: a zero denominator yields 0.0
    /// instead of NaN, so downstream CSV stays machine-readable
    /// even on degenerate test sets.
    ///
    /// Column order (== CSV order):
    ///   accuracy, precision, recall, f1, fpr, tpr, fp, fn, tp, tn,
    ///   mcc, kappa
    pub fn report(&self) -> MetricReport {
        let tp = self.tp as f64;
        let fp = self.fp as f64;
        let tn = self.tn as f64;
        let fn_ = self.fn_ as f64;
        let total = tp + fp + tn + fn_;

        let accuracy  = ratio(tp + tn, total);
        let precision = ratio(tp, tp + fp);
        let recall    = ratio(tp, tp + fn_);
        let f1 = if precision + recall != 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        let fpr = ratio(fp, fp + tn);
        let tpr = ratio(tp, tp + fn_);

        // Matthews correlation coefficient
        let mcc_denom = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
        let mcc = if mcc_denom != 0.0 {
            (tp * tn - fp * fn_) / mcc_denom
        } else {
            0.0
        };

        // Cohen's kappa: observed agreement vs. chance agreement
        let kappa = if total != 0.0 {
            let p0 = (tp + tn) / total;
            let p_yes = ((tp + fn_) / total) * ((tp + fp) / total);
            let p_no  = ((tn + fp) / total) * ((tn + fn_) / total);
            let pe = p_yes + p_no;
            if (1.0 - pe) != 0.0 {
                (p0 - pe) / (1.0 - pe)
            } else {
                0.0
            }
        } else {
            0.0
        };

        let mut report = MetricReport::new();
        report.push("accuracy", accuracy);
        report.push("precision", precision);
        report.push("recall", recall);
        report.push("f1", f1);
        report.push("fpr", fpr);
        report.push("tpr", tpr);
        report.push("fp", fp);
        report.push("fn", fn_);
        report.push("tp", tp);
        report.push("tn", tn);
        report.push("mcc", mcc);
        report.push("kappa", kappa);
        report
    }
}

/// numerator / denominator, or 0.0 when the denominator is zero
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_drives_all_renderings() {
        let mut r = MetricReport::new();
        r.push("accuracy", 0.5);
        r.push("f1", 0.25);
        assert_eq!(r.csv_header(";"), "accuracy;f1");
        assert_eq!(r.csv_row(";"), "0.5;0.25");
        let text = r.to_string();
        let acc_pos = text.find("accuracy").unwrap();
        let f1_pos  = text.find("f1").unwrap();
        assert!(acc_pos < f1_pos);
    }

    #[test]
    fn test_header_and_row_have_matching_arity() {
        let mut r = MetricReport::new();
        r.push("a", 1.0);
        r.push("b", 2.0);
        r.push("c", 3.0);
        assert_eq!(
            r.csv_header(",").split(',').count(),
            r.csv_row(",").split(',').count()
        );
    }

    #[test]
    fn test_get_finds_first_match() {
        let mut r = MetricReport::new();
        r.push("x", 1.0);
        r.push("x", 2.0);
        assert_eq!(r.get("x"), Some(1.0));
        assert_eq!(r.get("missing"), None);
    }

    #[test]
    fn test_perfect_classifier_metrics() {
        let mut cm = ConfusionMatrix::new();
        for _ in 0..10 {
            cm.record(true, true);
            cm.record(false, false);
        }
        let r = cm.report();
        assert_eq!(r.get("accuracy"), Some(1.0));
        assert_eq!(r.get("precision"), Some(1.0));
        assert_eq!(r.get("recall"), Some(1.0));
        assert_eq!(r.get("f1"), Some(1.0));
        assert_eq!(r.get("fpr"), Some(0.0));
        assert_eq!(r.get("mcc"), Some(1.0));
        assert_eq!(r.get("kappa"), Some(1.0));
    }

    #[test]
    fn test_balanced_coin_flip_metrics() {
        // tp=1, fp=1, tn=1, fn=1: accuracy 0.5, chance-level agreement
        let mut cm = ConfusionMatrix::new();
        cm.record(true, true);
        cm.record(false, true);
        cm.record(false, false);
        cm.record(true, false);
        let r = cm.report();
        assert_eq!(r.get("accuracy"), Some(0.5));
        assert_eq!(r.get("precision"), Some(0.5));
        assert_eq!(r.get("recall"), Some(0.5));
        assert_eq!(r.get("mcc"), Some(0.0));
        assert_eq!(r.get("kappa"), Some(0.0));
    }

    #[test]
    fn test_degenerate_denominators_guard_to_zero() {
        // Empty matrix: every metric must be 0.0, never NaN
        let r = ConfusionMatrix::new().report();
        for m in r.iter() {
            assert_eq!(m.value, 0.0, "metric {} not guarded", m.name);
        }
    }
}
