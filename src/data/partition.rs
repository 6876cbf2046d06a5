// ============================================================
// Layer 4 — Dataset Partition Manager
// ============================================================
// Owns the three membership sets (train / validation / test)
// and the split configuration, and converts a raw record file
// into correctly proportioned subsets.
//
// Why three sets with set semantics?
//   - Training set:   used to fit model parameters
//   - Validation set: used to measure generalisation while fitting
//   - Test set:       touched only by the final evaluation
//   Byte-identical records (same domain AND same label)
//   collapse to one entry; the split never drops or
//   duplicates a record otherwise.
//
// Why shuffle before splitting?
//   Corpus files are often ordered (e.g. a block of DGA names
//   followed by a block of legitimate ones). Without shuffling,
//   the test set would only contain one kind of name.
//   `randomize = true` applies a uniform Fisher-Yates shuffle
//   to the whole in-memory sequence first.
//
// Split boundaries TRUNCATE rather than round:
//   train_end = total * train_pct / 100
//   val_end   = total * (train_pct + validation_pct) / 100
// so individual subset sizes may be a fraction of a percent
// off, but [0,train_end) / [train_end,val_end) / [val_end,total)
// always partition the input exactly once each.
//
// Every instance owns its sets and percentages independently —
// there is no process-wide state.
//
// Reference: Rust Book §8 (Vectors, HashSet)
//            rand crate documentation (SliceRandom)

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::seq::SliceRandom;

use crate::data::parser::parse_record;
use crate::domain::record::LabeledRecord;
use crate::error::{Error, Result};

/// Default split: 80% train, 10% validation, 10% test.
const DEFAULT_TRAIN_PCT:      i32 = 80;
const DEFAULT_VALIDATION_PCT: i32 = 10;
const DEFAULT_TEST_PCT:       i32 = 10;

/// Owns the train/validation/test membership sets and the
/// split percentages. Created empty; grown by the add
/// operations; cleared only by an explicit `clear()`.
pub struct PartitionManager {
    train_set:      HashSet<LabeledRecord>,
    validation_set: HashSet<LabeledRecord>,
    test_set:       HashSet<LabeledRecord>,
    train_pct:      i32,
    validation_pct: i32,
    test_pct:       i32,
}

impl PartitionManager {
    /// Create an empty manager with the default 80/10/10 split.
    pub fn new() -> Self {
        Self {
            train_set:      HashSet::new(),
            validation_set: HashSet::new(),
            test_set:       HashSet::new(),
            train_pct:      DEFAULT_TRAIN_PCT,
            validation_pct: DEFAULT_VALIDATION_PCT,
            test_pct:       DEFAULT_TEST_PCT,
        }
    }

    /// Replace the three split percentages.
    ///
    /// Fatal when any value falls outside 0..=100 or the three
    /// do not sum to exactly 100 — the stored percentages are
    /// left untouched in that case. `train <= validation` is
    /// merely advisory: it logs a warning and the new values
    /// still apply.
    pub fn set_percentages(&mut self, train: i32, validation: i32, test: i32) -> Result<()> {
        let in_range = |p: i32| (0..=100).contains(&p);
        if !in_range(train) || !in_range(validation) || !in_range(test)
            || train + validation + test != 100
        {
            return Err(Error::InvalidPercentages { train, validation, test });
        }

        if train <= validation {
            tracing::warn!(
                "train percentage should be greater than validation percentage: \
                 {train} <= {validation}"
            );
        }

        // Atomic replace: all three or none
        self.train_pct      = train;
        self.validation_pct = validation;
        self.test_pct       = test;
        Ok(())
    }

    /// The configured (train, validation, test) percentages.
    pub fn percentages(&self) -> (i32, i32, i32) {
        (self.train_pct, self.validation_pct, self.test_pct)
    }

    /// Read a combined corpus file and split it across the
    /// three sets under the configured percentages.
    ///
    /// The whole file is parsed before anything is inserted,
    /// so a malformed line aborts the call with the sets
    /// exactly as they were.
    pub fn add(&mut self, path: impl AsRef<Path>, randomize: bool) -> Result<()> {
        let records = read_records(path.as_ref())?;
        self.add_records(records, randomize);
        Ok(())
    }

    /// Split an in-memory record sequence across the three sets.
    /// This is `add` minus the file read — the entry point for
    /// callers that already hold parsed records.
    pub fn add_records(&mut self, mut records: Vec<LabeledRecord>, randomize: bool) {
        if randomize {
            // Fisher-Yates — every permutation equally likely
            let mut rng = rand::thread_rng();
            records.shuffle(&mut rng);
        }

        let total     = records.len();
        let train_end = total * self.train_pct as usize / 100;
        let val_end   = total * (self.train_pct + self.validation_pct) as usize / 100;

        // split_off(n) leaves [0, n) behind and returns [n, total)
        let mut validation = records.split_off(train_end);
        let test           = validation.split_off(val_end - train_end);

        self.train_set.extend(records);
        self.validation_set.extend(validation);
        self.test_set.extend(test);

        tracing::debug!(
            "partitioned {} records -> train {} / validation {} / test {}",
            total,
            self.train_set.len(),
            self.validation_set.len(),
            self.test_set.len(),
        );
    }

    /// Read a pre-split file straight into the train set,
    /// bypassing the percentage logic entirely.
    pub fn add_train(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let records = read_records(path.as_ref())?;
        self.train_set.extend(records);
        Ok(())
    }

    /// Read a pre-split file straight into the validation set.
    pub fn add_validation(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let records = read_records(path.as_ref())?;
        self.validation_set.extend(records);
        Ok(())
    }

    /// Read a pre-split file straight into the test set.
    pub fn add_test(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let records = read_records(path.as_ref())?;
        self.test_set.extend(records);
        Ok(())
    }

    /// Empty all three sets. Percentages are untouched.
    pub fn clear(&mut self) {
        self.train_set.clear();
        self.validation_set.clear();
        self.test_set.clear();
    }

    /// Read-only view of the training set.
    pub fn train_set(&self) -> &HashSet<LabeledRecord> {
        &self.train_set
    }

    /// Read-only view of the validation set.
    pub fn validation_set(&self) -> &HashSet<LabeledRecord> {
        &self.validation_set
    }

    /// Read-only view of the test set.
    pub fn test_set(&self) -> &HashSet<LabeledRecord> {
        &self.test_set
    }
}

impl Default for PartitionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse every record line of `path`, in file order.
/// Blank lines (e.g. a trailing newline) are skipped; the
/// first malformed line aborts the read.
fn read_records(path: &Path) -> Result<Vec<LabeledRecord>> {
    let file   = File::open(path)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_record(&line, idx + 1)?);
    }

    tracing::debug!("read {} records from '{}'", records.len(), path.display());
    Ok(records)
}
