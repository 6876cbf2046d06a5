// ============================================================
// Layer 2 — ExperimentUseCase
// ============================================================
// Runs one full classification experiment in order:
//
//   Step 1: Configure the split percentages   (Layer 4 - data)
//   Step 2: Build the harness                 (Layer 5 - ml)
//   Step 3: Load the corpus files             (Layer 4 - data)
//   Step 4: Register the selected classifiers (Layer 5 - ml)
//   Step 5: Train + test every classifier     (Layer 5 - ml)
//   Step 6: Print every report                (Layer 1 - cli)
//   Step 7: Persist CSV + JSON artifacts      (Layer 6 - infra)
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::partition::PartitionManager;
use crate::infra::results_writer::{ResultEntry, ResultsWriter};
use crate::ml::{
    baseline::{MajorityClassifier, RandomClassifier},
    harness::Harness,
    ngram::NgramClassifier,
};

// ─── Experiment Configuration ─────────────────────────────────────────────────
// Everything one run needs, serialisable so the exact setup is
// stored next to the results it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Combined corpus files, split under the percentages
    pub datasets:         Vec<String>,
    /// Pre-split files fed straight into the named sets
    pub train_files:      Vec<String>,
    pub validation_files: Vec<String>,
    pub test_files:       Vec<String>,
    pub train_pct:        i32,
    pub validation_pct:   i32,
    pub test_pct:         i32,
    pub randomize:        bool,
    /// Registry order of the classifiers to run
    pub classifiers:      Vec<String>,
    /// Seed for the random baseline
    pub seed:             u64,
    pub out_dir:          String,
    pub debug:            bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            datasets:         Vec::new(),
            train_files:      Vec::new(),
            validation_files: Vec::new(),
            test_files:       Vec::new(),
            train_pct:        80,
            validation_pct:   10,
            test_pct:         10,
            randomize:        true,
            classifiers:      vec![
                "majority".to_string(),
                "random".to_string(),
                "ngram".to_string(),
            ],
            seed:             42,
            out_dir:          "results".to_string(),
            debug:            false,
        }
    }
}

// ─── ExperimentUseCase ────────────────────────────────────────────────────────
// Owns the config and drives the full experiment end to end.
pub struct ExperimentUseCase {
    config: ExperimentConfig,
}

impl ExperimentUseCase {
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }

    /// Execute the experiment and leave the artifacts in
    /// `config.out_dir`.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Partition configuration ──────────────────────────────────
        let mut partitions = PartitionManager::new();
        partitions.set_percentages(cfg.train_pct, cfg.validation_pct, cfg.test_pct)?;

        // ── Step 2: Build the harness ────────────────────────────────────────
        let mut harness = if cfg.debug {
            Harness::new_debug(partitions)
        } else {
            Harness::new(partitions)
        };

        // ── Step 3: Load the corpus ──────────────────────────────────────────
        // Combined files go through the percentage split;
        // pre-split files land in their named set directly.
        for path in &cfg.datasets {
            tracing::info!("adding combined dataset '{path}'");
            harness.add_dataset(path, cfg.randomize)?;
        }
        for path in &cfg.train_files {
            harness.add_train_dataset(path)?;
        }
        for path in &cfg.validation_files {
            harness.add_validation_dataset(path)?;
        }
        for path in &cfg.test_files {
            harness.add_test_dataset(path)?;
        }

        tracing::info!(
            "corpus ready: {} train / {} validation / {} test",
            harness.partitions().train_set().len(),
            harness.partitions().validation_set().len(),
            harness.partitions().test_set().len(),
        );
        if cfg.debug {
            harness.dump_datasets();
        }

        // ── Step 4: Register the selected classifiers ────────────────────────
        for name in &cfg.classifiers {
            harness.add_classifier(build_classifier(name, cfg.seed)?);
        }

        // ── Step 5: Train and test everything, in registry order ─────────────
        harness.run_all()?;

        // ── Step 6: Print every report ───────────────────────────────────────
        for index in 0..harness.classifier_count() {
            let name = harness.classifier_by_index(index)?.name();
            println!("\n{name}");
            match harness.result_by_index(index)? {
                Some(report) => println!("{report}"),
                None => println!("  (not tested)"),
            }
        }

        // ── Step 7: Persist the artifacts ────────────────────────────────────
        let entries: Vec<ResultEntry<'_>> = (0..harness.classifier_count())
            .map(|index| {
                Ok((
                    harness.classifier_by_index(index)?.name(),
                    harness.result_by_index(index)?,
                ))
            })
            .collect::<Result<_>>()?;

        let writer = ResultsWriter::new(&cfg.out_dir)?;
        let csv_path = writer.write_csv(&entries, ",")?;
        writer.write_json(cfg, &entries)?;
        println!("\nResults written to {}", csv_path.display());

        Ok(())
    }
}

/// Map a configured classifier name to its implementation.
/// Selection happens here, at registration time — the harness
/// itself never knows concrete types.
fn build_classifier(
    name: &str,
    seed: u64,
) -> Result<Box<dyn crate::domain::traits::Classifier>> {
    match name {
        "majority" => Ok(Box::new(MajorityClassifier::new())),
        "random"   => Ok(Box::new(RandomClassifier::new(seed))),
        "ngram"    => Ok(Box::new(NgramClassifier::new())),
        other => bail!(
            "unknown classifier '{other}' (available: majority, random, ngram)"
        ),
    }
}
