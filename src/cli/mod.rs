// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `run`   — runs a full train/test experiment
//   2. `split` — previews the dataset partition only
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, RunArgs, SplitArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "dga-bench",
    version = "0.1.0",
    about = "Train and compare DGA domain classifiers on a labeled corpus."
)]
pub struct Cli {
    /// The subcommand to run (run or split)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)   => Self::run_experiment(args),
            Commands::Split(args) => Self::run_split(args),
        }
    }

    /// Handles the `run` subcommand.
    /// Converts CLI args into an ExperimentConfig and hands off to Layer 2.
    fn run_experiment(args: RunArgs) -> Result<()> {
        use crate::application::experiment_use_case::ExperimentUseCase;

        tracing::info!("starting experiment over {} dataset file(s)", args.datasets.len());

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = ExperimentUseCase::new(args.into());
        use_case.execute()?;

        println!("Experiment complete.");
        Ok(())
    }

    /// Handles the `split` subcommand.
    /// Splits the corpus and prints the per-set breakdown.
    fn run_split(args: SplitArgs) -> Result<()> {
        use crate::application::split_use_case::SplitUseCase;

        let use_case = SplitUseCase::new(
            args.datasets,
            (args.train_pct, args.validation_pct, args.test_pct),
            args.randomize,
        );
        let (train, validation, test) = use_case.execute()?;

        println!("Set         Total    DGA      Legit");
        println!("train       {:<8} {:<8} {}", train.total, train.dga, train.legit);
        println!("validation  {:<8} {:<8} {}", validation.total, validation.dga, validation.legit);
        println!("test        {:<8} {:<8} {}", test.total, test.dga, test.legit);
        Ok(())
    }
}
