use thiserror::Error;

/// The error taxonomy of the pipeline.
///
/// Everything here is fatal for the operation that raised it,
/// except `InvalidInput`, which is recoverable per request: the
/// predict surface rejects only the offending element and keeps
/// serving the rest of the batch.
///
/// Note that sentences discarded for exceeding the largest bucket
/// are NOT an error. Discarding is a counted, logged filtering
/// policy applied during batch construction.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// No usable training examples. Raised before training starts,
    /// either when the training file yields no examples or when
    /// every example was discarded during encoding.
    #[error("no usable training examples")]
    EmptyDataset,

    /// Artifact write or read failure. The vocabulary and the model
    /// parameters are persisted as a pair; a failure on either half
    /// aborts the whole operation.
    #[error("cannot persist or restore model artifacts: {reason}")]
    Persistence { reason: String },

    /// A malformed inference input, e.g. a text with no tokens.
    #[error("invalid inference input: {reason}")]
    InvalidInput { reason: String },

    /// The training loss went non-finite. Continuing would silently
    /// corrupt the parameters, so the run aborts instead.
    #[error("non-finite loss at epoch {epoch}, batch {batch}; aborting the run")]
    NonFiniteLoss { epoch: usize, batch: usize },
}
