// ============================================================
// Layer 5 — Baseline Classifiers
// ============================================================
// The two floor models every real classifier must beat:
//
//   MajorityClassifier — always predicts whichever label was
//     more common in the train set. Accuracy equals the class
//     balance of the test set.
//
//   RandomClassifier — a seeded coin flip. Accuracy ~0.5 on a
//     balanced test set, and exactly reproducible for a given
//     seed so experiment runs can be compared.
//
// Both speak the same Classifier capability as any neural
// model registered from outside the crate.
//
// Reference: Rust Book §10 (Traits)
//            rand crate documentation (StdRng)

use std::collections::HashSet;

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::record::LabeledRecord;
use crate::domain::report::{ConfusionMatrix, MetricReport};
use crate::domain::traits::Classifier;

// ─── MajorityClassifier ───────────────────────────────────────────────────────

/// Predicts the majority train label unconditionally.
pub struct MajorityClassifier {
    /// None until trained; ties resolve to `false` (legitimate)
    majority: Option<bool>,
}

impl MajorityClassifier {
    pub fn new() -> Self {
        Self { majority: None }
    }
}

impl Default for MajorityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for MajorityClassifier {
    fn name(&self) -> &str {
        "majority"
    }

    fn train(
        &mut self,
        train_set: &HashSet<LabeledRecord>,
        _validation_set: &HashSet<LabeledRecord>,
    ) -> Result<()> {
        let dga = train_set.iter().filter(|r| r.is_dga).count();
        let legit = train_set.len() - dga;
        self.majority = Some(dga > legit);
        tracing::debug!("majority label: {} dga vs {} legit", dga, legit);
        Ok(())
    }

    fn test(&mut self, test_set: &HashSet<LabeledRecord>) -> Result<MetricReport> {
        let Some(majority) = self.majority else {
            bail!("majority classifier has not been trained yet");
        };

        let mut matrix = ConfusionMatrix::new();
        for record in test_set {
            matrix.record(record.is_dga, majority);
        }
        Ok(matrix.report())
    }
}

// ─── RandomClassifier ─────────────────────────────────────────────────────────

/// Unbiased coin flip per record, seeded for reproducibility.
/// Needs no training, but mirrors the full contract anyway.
pub struct RandomClassifier {
    rng: StdRng,
}

impl RandomClassifier {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Classifier for RandomClassifier {
    fn name(&self) -> &str {
        "random"
    }

    fn train(
        &mut self,
        _train_set: &HashSet<LabeledRecord>,
        _validation_set: &HashSet<LabeledRecord>,
    ) -> Result<()> {
        // Nothing to fit
        Ok(())
    }

    fn test(&mut self, test_set: &HashSet<LabeledRecord>) -> Result<MetricReport> {
        let mut matrix = ConfusionMatrix::new();

        // HashSet iteration order is arbitrary; sort so a given
        // seed always meets the records in the same order
        let mut records: Vec<&LabeledRecord> = test_set.iter().collect();
        records.sort_by(|a, b| (&a.domain, a.is_dga).cmp(&(&b.domain, b.is_dga)));

        for record in records {
            matrix.record(record.is_dga, self.rng.gen_bool(0.5));
        }
        Ok(matrix.report())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn set(records: &[(&str, bool)]) -> HashSet<LabeledRecord> {
        records
            .iter()
            .map(|(d, l)| LabeledRecord::new(*d, *l))
            .collect()
    }

    #[test]
    fn test_majority_predicts_the_dominant_label() {
        let train = set(&[
            ("a.com", true),
            ("b.com", true),
            ("c.com", true),
            ("d.com", false),
        ]);
        let test = set(&[("x.com", true), ("y.com", false)]);

        let mut clf = MajorityClassifier::new();
        clf.train(&train, &HashSet::new()).unwrap();
        let report = clf.test(&test).unwrap();

        // Everything predicted DGA: one hit, one false positive
        assert_eq!(report.get("tp"), Some(1.0));
        assert_eq!(report.get("fp"), Some(1.0));
        assert_eq!(report.get("accuracy"), Some(0.5));
    }

    #[test]
    fn test_majority_untested_untrained_fails() {
        let mut clf = MajorityClassifier::new();
        assert!(clf.test(&set(&[("a.com", true)])).is_err());
    }

    #[test]
    fn test_random_is_reproducible_per_seed() {
        let test = set(&[
            ("a.com", true),
            ("b.com", false),
            ("c.com", true),
            ("d.com", false),
            ("e.com", true),
        ]);

        let report_a = RandomClassifier::new(7).test(&test).unwrap();
        let report_b = RandomClassifier::new(7).test(&test).unwrap();
        assert_eq!(report_a.get("tp"), report_b.get("tp"));
        assert_eq!(report_a.get("fp"), report_b.get("fp"));
        assert_eq!(report_a.get("tn"), report_b.get("tn"));
        assert_eq!(report_a.get("fn"), report_b.get("fn"));
    }

    #[test]
    fn test_random_counts_every_record_once() {
        let test = set(&[("a.com", true), ("b.com", false), ("c.com", true)]);
        let mut clf = RandomClassifier::new(1);
        let report = clf.test(&test).unwrap();
        let counted = report.get("tp").unwrap()
            + report.get("fp").unwrap()
            + report.get("tn").unwrap()
            + report.get("fn").unwrap();
        assert_eq!(counted, 3.0);
    }
}
