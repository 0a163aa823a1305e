use serde::{Deserialize, Serialize};

/// One labelled sentence from the training or validation split.
///
/// The tokens are already whitespace-separated in the input file,
/// so no further tokenisation happens after loading. The label is
/// strictly binary: 0 = negative, 1 = positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    /// The sentiment label, always 0 or 1
    pub label: u8,

    /// The ordered token sequence, never empty
    pub tokens: Vec<String>,
}

impl Example {
    pub fn new(label: u8, tokens: Vec<String>) -> Self {
        Self { label, tokens }
    }

    /// Sentence length in tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
