// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the core can produce, as one typed enum.
//
// The split between fatal and advisory conditions:
//   - Fatal   → a variant below, returned through Result
//   - Advisory → tracing::warn! only (percentage ordering,
//                by-name lookup misses); the operation proceeds
//
// Classifier failures are opaque to the core — collaborators
// report through anyhow and the harness propagates them
// unchanged via the transparent Classifier variant.
//
// Reference: Rust Book §9 (Error Handling)
//            thiserror crate documentation

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// All fatal error conditions of the harness core.
#[derive(Debug, Error)]
pub enum Error {
    /// Split percentages out of range or not summing to exactly 100.
    /// Carries all three inputs so the message can show the arithmetic.
    #[error(
        "wrong percentages for train, validation and test: \
         {train} + {validation} + {test} = {sum} (each must be in 0..=100 and sum to 100)",
        sum = .train + .validation + .test
    )]
    InvalidPercentages {
        train:      i32,
        validation: i32,
        test:       i32,
    },

    /// Registry access outside [0, count).
    /// `what` names the registry ("classifiers" or "results").
    #[error(
        "index out of bounds: {what} holds {total} entries \
         (valid indexes: 0..{total}), got {index}"
    )]
    IndexOutOfRange {
        what:  &'static str,
        total: usize,
        index: usize,
    },

    /// A source line that is not `domain;True` / `domain;False`.
    #[error("cannot parse record on line {line_no}: {reason} (line: {line:?})")]
    Parse {
        line_no: usize,
        line:    String,
        reason:  String,
    },

    /// Source read failure, propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A classifier collaborator failed during train or test.
    #[error(transparent)]
    Classifier(#[from] anyhow::Error),
}
