// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction, parsed with clap.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`   - trains the classifier on labelled line files
//   2. `predict` - loads the artifacts and labels raw text

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;

use commands::{Commands, PredictArgs, TrainArgs};

/// The main CLI struct; clap reads the fields and generates the
/// argument parsing code via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "text-sentiment",
    version = "0.1.0",
    about = "Train a binary sentiment classifier on labelled sentences, then predict."
)]
pub struct Cli {
    /// The subcommand to run (train or predict)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin: it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
            Commands::Predict(args) => Self::run_predict(args),
        }
    }

    /// Handles the `train` subcommand.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("starting training on '{}'", args.train_file);

        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Artifacts saved.");
        Ok(())
    }

    /// Handles the `predict` subcommand. Prints a JSON array of
    /// labels, one per input, in input order.
    fn run_predict(args: PredictArgs) -> Result<()> {
        use crate::application::predict_use_case::PredictUseCase;
        use crate::domain::traits::SentimentPredictor;

        let use_case = PredictUseCase::new(&args.model_dir)?;

        let response = match &args.request {
            Some(request) => use_case.respond(request)?,
            None => serde_json::to_string(&use_case.predict(&args.texts)?)?,
        };
        println!("{response}");
        Ok(())
    }
}
