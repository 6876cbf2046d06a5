// ============================================================
// Layer 3 — Labeled Record Domain Type
// ============================================================
// Represents one labeled domain name from the corpus.
// This is a plain data struct with no behaviour —
// just the domain string and its ground-truth label.
//
// Equality and hashing are derived over BOTH fields, which is
// what gives the partition sets their dedup semantics:
//   - same domain, same label  → one membership entry
//   - same domain, other label → two distinct entries
//     (a label conflict the harness does not resolve;
//     see the tests at the bottom of this file)
//
// Reference: Rust Book §5 (Structs and Methods)
//            Rust Book §10 (Derive Macros)

use serde::{Deserialize, Serialize};

/// One domain name with its binary ground-truth label.
/// `is_dga = true` means the name came from a Domain
/// Generation Algorithm; `false` means a legitimate name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabeledRecord {
    /// The domain name, e.g. "example.com"
    pub domain: String,

    /// Ground-truth label: true = DGA, false = legitimate
    pub is_dga: bool,
}

impl LabeledRecord {
    /// Create a new LabeledRecord.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(domain: impl Into<String>, is_dga: bool) -> Self {
        Self {
            domain: domain.into(),
            is_dga,
        }
    }
}
