// ============================================================
// Layer 2 — SplitUseCase
// ============================================================
// Partition-only inspection: load the corpus, split it under
// the configured percentages, and report what landed where —
// without training anything.
//
// Useful for sanity-checking a corpus before an expensive run:
// a wildly unbalanced validation set here usually means the
// input file was block-ordered and `randomize` was left off.

use anyhow::Result;

use crate::data::partition::PartitionManager;
use crate::domain::record::LabeledRecord;

/// Per-set breakdown of one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSummary {
    pub total: usize,
    pub dga:   usize,
    pub legit: usize,
}

impl SetSummary {
    fn of(set: &std::collections::HashSet<LabeledRecord>) -> Self {
        let dga = set.iter().filter(|r| r.is_dga).count();
        Self {
            total: set.len(),
            dga,
            legit: set.len() - dga,
        }
    }
}

pub struct SplitUseCase {
    datasets:       Vec<String>,
    train_pct:      i32,
    validation_pct: i32,
    test_pct:       i32,
    randomize:      bool,
}

impl SplitUseCase {
    pub fn new(
        datasets: Vec<String>,
        percentages: (i32, i32, i32),
        randomize: bool,
    ) -> Self {
        Self {
            datasets,
            train_pct:      percentages.0,
            validation_pct: percentages.1,
            test_pct:       percentages.2,
            randomize,
        }
    }

    /// Split the corpus and return the three summaries
    /// (train, validation, test).
    pub fn execute(&self) -> Result<(SetSummary, SetSummary, SetSummary)> {
        let mut partitions = PartitionManager::new();
        partitions.set_percentages(self.train_pct, self.validation_pct, self.test_pct)?;

        for path in &self.datasets {
            tracing::info!("splitting dataset '{path}'");
            partitions.add(path, self.randomize)?;
        }

        Ok((
            SetSummary::of(partitions.train_set()),
            SetSummary::of(partitions.validation_set()),
            SetSummary::of(partitions.test_set()),
        ))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_summaries_reflect_the_split() {
        let path = std::env::temp_dir()
            .join(format!("dga_bench_split_{}", std::process::id()));
        let lines: String = (0..20)
            .map(|i| format!("d{i}.com;{}\n", if i < 10 { "True" } else { "False" }))
            .collect();
        fs::write(&path, lines).unwrap();

        let use_case = SplitUseCase::new(
            vec![path.to_string_lossy().into_owned()],
            (50, 25, 25),
            false,
        );
        let (train, validation, test) = use_case.execute().unwrap();

        assert_eq!(train.total, 10);
        assert_eq!(validation.total, 5);
        assert_eq!(test.total, 5);
        // Block-ordered input without randomisation: the first
        // half (all DGA) is exactly the train set
        assert_eq!(train.dga, 10);
        assert_eq!(train.legit, 0);
        assert_eq!(test.legit, 5);

        fs::remove_file(&path).ok();
    }
}
