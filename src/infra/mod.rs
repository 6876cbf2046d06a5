// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the filesystem on the way OUT of an
// experiment: persisted results and run snapshots.
//
// (Corpus reading on the way IN lives in Layer 4 next to the
// parsing it feeds.)
//
// Reference: Rust Book §12 (I/O and File Handling)

// CSV + JSON experiment artifacts
pub mod results_writer;
