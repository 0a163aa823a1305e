use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally; do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct SentimentNetConfig {
    pub vocab_size:     usize,
    pub embedding_size: usize,
    #[config(default = 2)]
    pub num_classes:    usize,
}

impl SentimentNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SentimentNet<B> {
        SentimentNet {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embedding_size).init(device),
            output:    LinearConfig::new(self.embedding_size, self.num_classes).init(device),
        }
    }
}

/// Embedding lookup, length-masked mean pooling over the token
/// axis, then a linear projection to the class logits.
#[derive(Module, Debug)]
pub struct SentimentNet<B: Backend> {
    pub embedding: Embedding<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> SentimentNet<B> {
    /// tokens: [batch, seq_len], mask: [batch, seq_len] → logits: [batch, 2]
    ///
    /// Padding positions are zeroed via the mask and the sum is
    /// divided by the true length, so a sentence pools to the same
    /// representation no matter which bucket padded it.
    pub fn forward(&self, tokens: Tensor<B, 2, Int>, mask: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch, seq_len] = tokens.dims();

        let embedded = self.embedding.forward(tokens); // [batch, seq_len, emb]
        let [_, _, emb_size] = embedded.dims();

        let mask3 = mask.clone().reshape([batch, seq_len, 1]);
        let summed = (embedded * mask3)
            .sum_dim(1)
            .reshape([batch, emb_size]);

        // clamp guards the all-padding row; real rows have length >= 1
        let lengths = mask.sum_dim(1).clamp_min(1.0); // [batch, 1]
        let pooled = summed / lengths;

        self.output.forward(pooled)
    }

    /// Forward pass plus softmax cross-entropy against the labels.
    pub fn forward_loss(
        &self,
        tokens: Tensor<B, 2, Int>,
        mask:   Tensor<B, 2>,
        labels: Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(tokens, mask);
        let loss = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits.clone(), labels);
        (loss, logits)
    }
}
