// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `run` and `split`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → i32, u64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::experiment_use_case::ExperimentConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full experiment: split, train, test, persist results
    Run(RunArgs),

    /// Show how a corpus would split, without training anything
    Split(SplitArgs),
}

/// All arguments for the `run` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Combined corpus file with one `domain;True|False` record
    /// per line; repeat the flag for several files
    #[arg(long = "dataset")]
    pub datasets: Vec<String>,

    /// Pre-split file added straight to the TRAIN set (repeatable)
    #[arg(long = "train-file")]
    pub train_files: Vec<String>,

    /// Pre-split file added straight to the VALIDATION set (repeatable)
    #[arg(long = "validation-file")]
    pub validation_files: Vec<String>,

    /// Pre-split file added straight to the TEST set (repeatable)
    #[arg(long = "test-file")]
    pub test_files: Vec<String>,

    /// Percentage of combined datasets used for training
    #[arg(long, default_value_t = 80)]
    pub train_pct: i32,

    /// Percentage of combined datasets used for validation
    #[arg(long, default_value_t = 10)]
    pub validation_pct: i32,

    /// Percentage of combined datasets used for testing
    #[arg(long, default_value_t = 10)]
    pub test_pct: i32,

    /// Shuffle each combined dataset before splitting,
    /// breaking any block ordering in the input file
    #[arg(long)]
    pub randomize: bool,

    /// Classifiers to run, in registry order
    #[arg(long, value_delimiter = ',', default_value = "majority,random,ngram")]
    pub classifiers: Vec<String>,

    /// Seed for the random baseline classifier
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Directory receiving results.csv and experiment.json
    #[arg(long, default_value = "results")]
    pub out_dir: String,

    /// Enable the harness debug diagnostics
    #[arg(long)]
    pub debug: bool,
}

/// Convert CLI RunArgs into the application-layer config.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<RunArgs> for ExperimentConfig {
    fn from(a: RunArgs) -> Self {
        ExperimentConfig {
            datasets:         a.datasets,
            train_files:      a.train_files,
            validation_files: a.validation_files,
            test_files:       a.test_files,
            train_pct:        a.train_pct,
            validation_pct:   a.validation_pct,
            test_pct:         a.test_pct,
            randomize:        a.randomize,
            classifiers:      a.classifiers,
            seed:             a.seed,
            out_dir:          a.out_dir,
            debug:            a.debug,
        }
    }
}

/// All arguments for the `split` command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Combined corpus file to split (repeatable)
    #[arg(long = "dataset")]
    pub datasets: Vec<String>,

    /// Percentage of records for the train set
    #[arg(long, default_value_t = 80)]
    pub train_pct: i32,

    /// Percentage of records for the validation set
    #[arg(long, default_value_t = 10)]
    pub validation_pct: i32,

    /// Percentage of records for the test set
    #[arg(long, default_value_t = 10)]
    pub test_pct: i32,

    /// Shuffle before splitting
    #[arg(long)]
    pub randomize: bool,
}
