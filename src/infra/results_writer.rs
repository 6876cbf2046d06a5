// ============================================================
// Layer 6 — Results Writer
// ============================================================
// Persists an experiment's outcome to the output directory.
//
// Two artifacts per run:
//   results.csv      — one row per tested classifier
//   experiment.json  — config + full results snapshot
//
// The CSV columns come straight from the reports' own ordered
// metric lists, so the header and every data row are driven by
// the same source and can never drift apart.
//
// Example CSV output:
//   classifier,accuracy,precision,recall,f1,...
//   majority,0.5,0.5,1,0.6666666666666666,...
//   ngram,0.98,0.97,0.99,0.9799,...
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::Write,
    path::PathBuf,
};
use serde::Serialize;

use crate::application::experiment_use_case::ExperimentConfig;
use crate::domain::report::MetricReport;

/// A classifier's name with its (possibly absent) report.
pub type ResultEntry<'a> = (&'a str, Option<&'a MetricReport>);

/// Writes experiment artifacts into one output directory.
pub struct ResultsWriter {
    dir: PathBuf,
}

impl ResultsWriter {
    /// Create a writer rooted at `dir`, creating the directory
    /// (and parents) if needed.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)
            .with_context(|| format!("cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Write `results.csv`: a `classifier` column followed by
    /// the metric columns of the first present report.
    ///
    /// Untested classifiers have no row. With no tested
    /// classifier at all, only the header's `classifier`
    /// column is written.
    pub fn write_csv(&self, entries: &[ResultEntry<'_>], separator: &str) -> Result<PathBuf> {
        let path = self.dir.join("results.csv");
        let mut f = File::create(&path)
            .with_context(|| format!("cannot create '{}'", path.display()))?;

        // Header columns from the first tested classifier
        let first = entries.iter().find_map(|(_, report)| *report);
        match first {
            Some(report) => {
                writeln!(f, "classifier{separator}{}", report.csv_header(separator))?
            }
            None => writeln!(f, "classifier")?,
        }

        for (name, report) in entries {
            if let Some(report) = report {
                writeln!(f, "{name}{separator}{}", report.csv_row(separator))?;
            }
        }

        tracing::debug!("wrote results CSV: '{}'", path.display());
        Ok(path)
    }

    /// Write `experiment.json`: the run configuration plus every
    /// result slot (absent slots serialise as null, so a reader
    /// can tell "never tested" from "scored zero").
    pub fn write_json(
        &self,
        config:  &ExperimentConfig,
        entries: &[ResultEntry<'_>],
    ) -> Result<PathBuf> {
        #[derive(Serialize)]
        struct Slot<'a> {
            classifier: &'a str,
            result:     Option<&'a MetricReport>,
        }

        #[derive(Serialize)]
        struct Snapshot<'a> {
            config:  &'a ExperimentConfig,
            results: Vec<Slot<'a>>,
        }

        let snapshot = Snapshot {
            config,
            results: entries
                .iter()
                .map(|(classifier, result)| Slot { classifier, result: *result })
                .collect(),
        };

        let path = self.dir.join("experiment.json");
        fs::write(&path, serde_json::to_string_pretty(&snapshot)?)
            .with_context(|| format!("cannot write '{}'", path.display()))?;

        tracing::debug!("wrote experiment snapshot: '{}'", path.display());
        Ok(path)
    }
}
