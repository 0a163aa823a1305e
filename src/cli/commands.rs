// ============================================================
// Layer 1: CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `predict`, and all
// their configurable flags. clap's derive macros generate the
// help text, the error messages, and the type conversions.

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the sentiment classifier on labelled sentence files
    Train(TrainArgs),

    /// Label raw text with a trained model
    Predict(PredictArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Training file: one example per line, "label tok tok ..."
    #[arg(long, default_value = "data/train")]
    pub train_file: String,

    /// Validation file, same format as the training file
    #[arg(long, default_value = "data/test")]
    pub val_file: String,

    /// Directory to write the model, vocabulary, and metrics into
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Number of examples processed together in one forward pass
    #[arg(long, default_value_t = 8)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 2)]
    pub epochs: usize,

    /// Optimizer step scale
    #[arg(long, default_value_t = 0.01)]
    pub learning_rate: f64,

    /// Dimensionality of the token embedding vectors
    #[arg(long, default_value_t = 50)]
    pub embedding_size: usize,

    /// Batches between training-progress log lines
    #[arg(long, default_value_t = 1000)]
    pub log_interval: usize,

    /// Explicit bucket boundaries, ascending (e.g. 10,25,50).
    /// Omit to derive them from the training length distribution
    #[arg(long, value_delimiter = ',')]
    pub buckets: Option<Vec<usize>>,

    /// Drop tokens seen fewer than this many times
    #[arg(long, default_value_t = 1)]
    pub min_count: usize,

    /// Cap on the number of real tokens in the vocabulary
    #[arg(long, default_value_t = 100_000)]
    pub max_vocab: usize,

    /// Shuffle seed, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2; the
/// application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            train_file:     a.train_file,
            val_file:       a.val_file,
            model_dir:      a.model_dir,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            learning_rate:  a.learning_rate,
            embedding_size: a.embedding_size,
            log_interval:   a.log_interval,
            buckets:        a.buckets,
            min_count:      a.min_count,
            max_vocab:      a.max_vocab,
            seed:           a.seed,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Directory where the trained artifacts were saved
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Texts to label, one argument each
    #[arg(required_unless_present = "request", conflicts_with = "request")]
    pub texts: Vec<String>,

    /// A raw JSON-array request instead of positional texts
    #[arg(long)]
    pub request: Option<String>,
}
