// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The capability contract every pluggable classifier must
// satisfy. The harness only ever talks to this trait —
// it has no idea whether the implementation is a lookup
// table, an n-gram model or a neural network living in
// another crate.
//
// By programming against the trait instead of concrete types,
// classifiers can be swapped at registration time without
// touching the orchestration code (Dependency Inversion).
//
// Collaborator failures are opaque to the core, so train/test
// report through anyhow::Result rather than the crate's own
// error enum.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use std::collections::HashSet;
use std::fmt;

use anyhow::Result;

use crate::domain::record::LabeledRecord;
use crate::domain::report::MetricReport;

/// Anything that can be trained on labeled domains and then
/// evaluated against a held-out test set.
///
/// Implementations in this crate:
///   - MajorityClassifier → predicts the majority train label
///   - RandomClassifier   → seeded coin flip
///   - NgramClassifier    → character-bigram language models
///
/// The harness imposes NO ordering between train and test —
/// an implementation tested before training decides for itself
/// how to fail (the bundled ones return a descriptive error).
pub trait Classifier {
    /// Stable display name, also the key for by-name lookups
    /// in the harness registry.
    fn name(&self) -> &str;

    /// Fit the model on the train set. The validation set is
    /// handed over for the implementation's own use (early
    /// stopping, threshold tuning, progress reporting) — the
    /// harness never looks at what it does with it.
    fn train(
        &mut self,
        train_set:      &HashSet<LabeledRecord>,
        validation_set: &HashSet<LabeledRecord>,
    ) -> Result<()>;

    /// Evaluate on the test set and hand back a metric report.
    fn test(&mut self, test_set: &HashSet<LabeledRecord>) -> Result<MetricReport>;
}

/// Trait objects of `Classifier` are debug-printed by their stable
/// display name, so a `&dyn Classifier` can flow through helpers such
/// as `Result::unwrap_err` that require their `Ok` type to be `Debug`.
impl fmt::Debug for dyn Classifier + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("name", &self.name())
            .finish()
    }
}
