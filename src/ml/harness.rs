// ============================================================
// Layer 5 — Classifier Harness
// ============================================================
// Drives every registered classifier through the train/test
// lifecycle against the Partition Manager's sets.
//
// Two registries move in lock step at all times:
//   classifiers[i] — the i-th registered classifier
//   results[i]     — its result slot (None until tested)
//
// The by-INDEX operations are the authoritative API: every
// access is bounds-checked and an invalid index is a fatal,
// diagnosable error. The by-NAME operations are conveniences
// layered on top: a lookup miss degrades to a warning and a
// no-op instead of failing.
//
// Per-slot lifecycle: Registered → Trained → Tested.
// Re-training and re-testing are always legal, and nothing
// here forbids testing an untrained classifier — how that
// behaves is the classifier's own contract.
//
// Reference: Rust Book §8 (Vectors), §17 (Trait Objects)

use crate::data::partition::PartitionManager;
use crate::domain::report::MetricReport;
use crate::domain::traits::Classifier;
use crate::error::{Error, Result};

/// Ordered, index-addressable registry of classifiers and
/// their results, plus the partition manager feeding them.
pub struct Harness {
    partitions:  PartitionManager,
    classifiers: Vec<Box<dyn Classifier>>,
    results:     Vec<Option<MetricReport>>,
    debug:       bool,
}

impl Harness {
    /// Create a harness around a partition manager.
    pub fn new(partitions: PartitionManager) -> Self {
        Self {
            partitions,
            classifiers: Vec::new(),
            results:     Vec::new(),
            debug:       false,
        }
    }

    /// Create a harness with the debug diagnostics enabled.
    /// Only a debug harness may call [`Harness::dump_datasets`].
    pub fn new_debug(partitions: PartitionManager) -> Self {
        println!("#############################################");
        println!("########### DEBUG MODE ACTIVATED ############");
        println!("#############################################");
        Self {
            debug: true,
            ..Self::new(partitions)
        }
    }

    // ─── Dataset proxies ──────────────────────────────────────────────────────

    /// Read-only view of the partition manager.
    pub fn partitions(&self) -> &PartitionManager {
        &self.partitions
    }

    /// Mutable access for configuration (percentages, clear).
    pub fn partitions_mut(&mut self) -> &mut PartitionManager {
        &mut self.partitions
    }

    /// Split a combined corpus file across the three sets.
    /// In debug mode the new set sizes are reported.
    pub fn add_dataset(&mut self, path: impl AsRef<std::path::Path>, randomize: bool) -> Result<()> {
        self.partitions.add(path, randomize)?;
        if self.debug {
            println!("  new size of TRAIN set      : {}", self.partitions.train_set().len());
            println!("  new size of VALIDATION set : {}", self.partitions.validation_set().len());
            println!("  new size of TEST set       : {}", self.partitions.test_set().len());
        }
        Ok(())
    }

    /// Read a pre-split file straight into the train set.
    pub fn add_train_dataset(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.partitions.add_train(path)
    }

    /// Read a pre-split file straight into the validation set.
    pub fn add_validation_dataset(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.partitions.add_validation(path)
    }

    /// Read a pre-split file straight into the test set.
    pub fn add_test_dataset(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.partitions.add_test(path)
    }

    // ─── Registry ─────────────────────────────────────────────────────────────

    /// Append a classifier and its (absent) result slot.
    /// No de-duplication: registering the same model twice
    /// gives it two independent slots.
    pub fn add_classifier(&mut self, classifier: Box<dyn Classifier>) {
        tracing::info!("registered classifier '{}'", classifier.name());
        self.classifiers.push(classifier);
        self.results.push(None);
    }

    /// Number of registered classifiers (== number of result slots).
    pub fn classifier_count(&self) -> usize {
        self.classifiers.len()
    }

    /// Bounds-checked access to the classifier at `index`.
    pub fn classifier_by_index(&self, index: usize) -> Result<&dyn Classifier> {
        self.check_index("classifiers", index)?;
        Ok(self.classifiers[index].as_ref())
    }

    /// Bounds-checked access to the result slot at `index`.
    /// `Ok(None)` means the slot exists but was never tested —
    /// distinct from a produced all-zero report.
    pub fn result_by_index(&self, index: usize) -> Result<Option<&MetricReport>> {
        if index >= self.results.len() {
            return Err(Error::IndexOutOfRange {
                what:  "results",
                total: self.results.len(),
                index,
            });
        }
        Ok(self.results[index].as_ref())
    }

    /// First registry index whose classifier carries `name`.
    /// A miss is advisory: logs a warning, returns None.
    pub fn classifier_index(&self, name: &str) -> Option<usize> {
        let found = self.classifiers.iter().position(|c| c.name() == name);
        if found.is_none() {
            tracing::warn!("classifier '{name}' is not registered");
        }
        found
    }

    /// Every result slot in registry order, absent entries included.
    pub fn results(&self) -> &[Option<MetricReport>] {
        &self.results
    }

    /// Empty both registries together, preserving the
    /// lock-step invariant.
    pub fn clear_classifiers(&mut self) {
        self.classifiers.clear();
        self.results.clear();
    }

    // ─── Train / test lifecycle ───────────────────────────────────────────────

    /// Train the classifier at `index` on the current train and
    /// validation sets. Training alone never touches results.
    pub fn train_by_index(&mut self, index: usize) -> Result<()> {
        self.check_index("classifiers", index)?;
        tracing::info!("training '{}'", self.classifiers[index].name());
        self.classifiers[index]
            .train(self.partitions.train_set(), self.partitions.validation_set())?;
        Ok(())
    }

    /// Test the classifier at `index` on the current test set and
    /// store its report, overwriting any prior result in the slot.
    pub fn test_by_index(&mut self, index: usize) -> Result<()> {
        self.check_index("classifiers", index)?;
        tracing::info!("testing '{}'", self.classifiers[index].name());
        let report = self.classifiers[index].test(self.partitions.test_set())?;
        self.results[index] = Some(report);
        Ok(())
    }

    /// Train then test the classifier at `index` as one unit.
    /// An invalid index fails once, before either sub-step runs.
    pub fn run_by_index(&mut self, index: usize) -> Result<()> {
        self.check_index("classifiers", index)?;
        self.train_by_index(index)?;
        self.test_by_index(index)
    }

    /// Train every registered classifier in index order.
    /// A failing classifier stops the iteration and propagates;
    /// earlier slots keep whatever state they reached.
    pub fn train_all(&mut self) -> Result<()> {
        for index in 0..self.classifiers.len() {
            self.train_by_index(index)?;
        }
        Ok(())
    }

    /// Test every registered classifier in index order.
    pub fn test_all(&mut self) -> Result<()> {
        for index in 0..self.classifiers.len() {
            self.test_by_index(index)?;
        }
        Ok(())
    }

    /// Train and test every registered classifier in index order.
    pub fn run_all(&mut self) -> Result<()> {
        for index in 0..self.classifiers.len() {
            self.train_by_index(index)?;
            self.test_by_index(index)?;
        }
        Ok(())
    }

    // ─── By-name conveniences ─────────────────────────────────────────────────
    // Layered over the index API; an unknown name is a warned no-op.

    /// Train the first classifier registered under `name`.
    pub fn train_named(&mut self, name: &str) -> Result<()> {
        match self.classifier_index(name) {
            Some(index) => self.train_by_index(index),
            None => Ok(()),
        }
    }

    /// Test the first classifier registered under `name`.
    pub fn test_named(&mut self, name: &str) -> Result<()> {
        match self.classifier_index(name) {
            Some(index) => self.test_by_index(index),
            None => Ok(()),
        }
    }

    /// Train and test the first classifier registered under `name`.
    pub fn run_named(&mut self, name: &str) -> Result<()> {
        match self.classifier_index(name) {
            Some(index) => self.run_by_index(index),
            None => Ok(()),
        }
    }

    /// Result of the first classifier registered under `name`.
    /// None when the classifier is unknown OR not yet tested.
    pub fn result_named(&self, name: &str) -> Option<&MetricReport> {
        self.classifier_index(name)
            .and_then(|index| self.results[index].as_ref())
    }

    // ─── Debug diagnostics ────────────────────────────────────────────────────

    /// Print every record in every set. Interactive inspection
    /// only — calling this on a non-debug harness is a
    /// programmer error and terminates the process.
    pub fn dump_datasets(&self) {
        if !self.debug {
            eprintln!("ERROR: debug mode is NOT activated");
            eprintln!("not allowed to execute dump_datasets() without debug mode");
            std::process::exit(1);
        }

        let sections = [
            ("TRAIN SET", self.partitions.train_set()),
            ("VALIDATION SET", self.partitions.validation_set()),
            ("TEST SET", self.partitions.test_set()),
        ];
        for (title, set) in sections {
            println!("########## {title} ##########");
            for record in set {
                println!("  - {} -> {}", record.domain, record.is_dga);
            }
            println!();
        }
    }

    fn check_index(&self, what: &'static str, index: usize) -> Result<()> {
        if index >= self.classifiers.len() {
            return Err(Error::IndexOutOfRange {
                what,
                total: self.classifiers.len(),
                index,
            });
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::LabeledRecord;
    use anyhow::bail;
    use std::collections::HashSet;

    /// Scripted classifier: counts calls, optionally fails,
    /// reports its train-call count as a metric so tests can
    /// tell runs apart.
    struct StubClassifier {
        name:         String,
        trainings:    usize,
        tests:        usize,
        fail_train:   bool,
        fail_test:    bool,
    }

    impl StubClassifier {
        fn named(name: &str) -> Self {
            Self {
                name:       name.to_string(),
                trainings:  0,
                tests:      0,
                fail_train: false,
                fail_test:  false,
            }
        }

        fn failing_train(name: &str) -> Self {
            Self { fail_train: true, ..Self::named(name) }
        }
    }

    impl Classifier for StubClassifier {
        fn name(&self) -> &str {
            &self.name
        }

        fn train(
            &mut self,
            _train: &HashSet<LabeledRecord>,
            _validation: &HashSet<LabeledRecord>,
        ) -> anyhow::Result<()> {
            if self.fail_train {
                bail!("scripted training failure");
            }
            self.trainings += 1;
            Ok(())
        }

        fn test(&mut self, _test: &HashSet<LabeledRecord>) -> anyhow::Result<MetricReport> {
            if self.fail_test {
                bail!("scripted test failure");
            }
            self.tests += 1;
            let mut report = MetricReport::new();
            report.push("trainings", self.trainings as f64);
            report.push("tests", self.tests as f64);
            Ok(report)
        }
    }

    fn harness_with(names: &[&str]) -> Harness {
        let mut h = Harness::new(PartitionManager::new());
        for name in names {
            h.add_classifier(Box::new(StubClassifier::named(name)));
        }
        h
    }

    #[test]
    fn test_registration_keeps_registries_in_lock_step() {
        let h = harness_with(&["a", "b", "c"]);
        assert_eq!(h.classifier_count(), 3);
        assert_eq!(h.results().len(), 3);
        assert!(h.results().iter().all(Option::is_none));
    }

    #[test]
    fn test_same_name_may_occupy_two_slots() {
        let h = harness_with(&["twin", "twin"]);
        assert_eq!(h.classifier_count(), 2);
        // by-name lookup resolves to the first slot
        assert_eq!(h.classifier_index("twin"), Some(0));
    }

    #[test]
    fn test_index_bounds_are_enforced() {
        let h = harness_with(&["a", "b"]);
        assert!(h.classifier_by_index(0).is_ok());
        assert!(h.classifier_by_index(1).is_ok());

        let err = h.classifier_by_index(2).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfRange { what: "classifiers", total: 2, index: 2 }
        ));

        let err = h.result_by_index(2).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfRange { what: "results", total: 2, index: 2 }
        ));
    }

    #[test]
    fn test_bounds_error_on_empty_registry() {
        let h = harness_with(&[]);
        assert!(h.classifier_by_index(0).is_err());
    }

    #[test]
    fn test_training_alone_produces_no_result() {
        let mut h = harness_with(&["a"]);
        h.train_by_index(0).unwrap();
        assert!(h.result_by_index(0).unwrap().is_none());
    }

    #[test]
    fn test_run_by_index_fills_the_slot() {
        let mut h = harness_with(&["a"]);
        h.run_by_index(0).unwrap();
        let report = h.result_by_index(0).unwrap().expect("tested slot");
        assert_eq!(report.get("trainings"), Some(1.0));
        assert_eq!(report.get("tests"), Some(1.0));
    }

    #[test]
    fn test_run_by_index_rejects_bad_index_before_any_sub_step() {
        let mut h = harness_with(&["a"]);
        assert!(h.run_by_index(1).is_err());
        assert!(h.result_by_index(0).unwrap().is_none());
    }

    #[test]
    fn test_retesting_overwrites_the_result() {
        let mut h = harness_with(&["a"]);
        h.run_by_index(0).unwrap();
        h.run_by_index(0).unwrap();
        let report = h.result_by_index(0).unwrap().expect("tested slot");
        assert_eq!(report.get("trainings"), Some(2.0));
        assert_eq!(report.get("tests"), Some(2.0));
    }

    #[test]
    fn test_run_all_visits_every_slot_in_order() {
        let mut h = harness_with(&["a", "b", "c"]);
        h.run_all().unwrap();
        for index in 0..3 {
            assert!(h.result_by_index(index).unwrap().is_some());
        }
    }

    #[test]
    fn test_failure_stops_iteration_and_keeps_earlier_results() {
        let mut h = harness_with(&["ok"]);
        h.add_classifier(Box::new(StubClassifier::failing_train("broken")));
        h.add_classifier(Box::new(StubClassifier::named("never-reached")));

        let err = h.run_all().unwrap_err();
        assert!(matches!(err, Error::Classifier(_)));

        // slot 0 finished before the failure, slot 2 was never reached
        assert!(h.result_by_index(0).unwrap().is_some());
        assert!(h.result_by_index(1).unwrap().is_none());
        assert!(h.result_by_index(2).unwrap().is_none());
    }

    #[test]
    fn test_by_name_operations_are_noops_on_unknown_names() {
        let mut h = harness_with(&["a"]);
        h.run_named("ghost").unwrap();
        h.train_named("ghost").unwrap();
        h.test_named("ghost").unwrap();
        assert!(h.result_named("ghost").is_none());
        // nothing ran against the real classifier either
        assert!(h.result_by_index(0).unwrap().is_none());
    }

    #[test]
    fn test_by_name_operations_hit_the_first_match() {
        let mut h = harness_with(&["a", "b"]);
        h.run_named("b").unwrap();
        assert!(h.result_by_index(0).unwrap().is_none());
        assert!(h.result_by_index(1).unwrap().is_some());
        assert!(h.result_named("b").is_some());
    }

    #[test]
    fn test_clear_classifiers_empties_both_registries() {
        let mut h = harness_with(&["a", "b"]);
        h.run_all().unwrap();
        h.clear_classifiers();
        assert_eq!(h.classifier_count(), 0);
        assert!(h.results().is_empty());
    }
}
