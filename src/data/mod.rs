// ============================================================
// Layer 4 — Data Layer
// ============================================================
// Everything that turns corpus files into in-memory records:
//   - parser:    one `domain;True|False` line → LabeledRecord
//   - partition: the train/validation/test membership sets
//                and the percentage-driven splitter
//
// Reference: Rust Book §7 (Modules)

// Strict record-line parsing
pub mod parser;

// The Dataset Partition Manager
pub mod partition;
