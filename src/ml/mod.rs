// ============================================================
// Layer 5 — ML Layer
// ============================================================
// The classifier harness (the orchestration core) and the
// bundled reference classifiers.
//
// The harness never depends on a concrete model — anything
// implementing domain::traits::Classifier can be registered,
// including models defined entirely outside this crate.
//
// Reference: Rust Book §7 (Modules), §17 (Trait Objects)

// Train/test orchestration over the classifier registry
pub mod harness;

// Majority and seeded-random floor models
pub mod baseline;

// Character-bigram naive Bayes model
pub mod ngram;
