// ============================================================
// Layer 4: Tensor Batcher
// ============================================================
// Converts a CPU-side TokenBatch into Burn tensors on the target
// device. The ids are already rectangular (rows * seq_len), so
// batching is a flatten-then-reshape. The padding mask is built
// from the true lengths: 1.0 for a real token, 0.0 for padding.

use burn::prelude::*;

use crate::data::batches::TokenBatch;

/// A batch ready for the model forward pass. All tensors have the
/// batch size as their first dimension.
#[derive(Debug, Clone)]
pub struct SentimentBatch<B: Backend> {
    /// Token ids, shape [batch, seq_len]
    pub tokens: Tensor<B, 2, Int>,

    /// Padding mask, shape [batch, seq_len]: 1.0 = real token
    pub mask: Tensor<B, 2>,

    /// True labels, shape [batch]
    pub labels: Tensor<B, 1, Int>,
}

/// Holds the target device so tensors land where the model lives.
#[derive(Clone, Debug)]
pub struct SentimentBatcher<B: Backend> {
    device: B::Device,
}

impl<B: Backend> SentimentBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    pub fn batch(&self, batch: &TokenBatch) -> SentimentBatch<B> {
        let rows = batch.size();
        let seq_len = batch.seq_len;

        let ids_flat: Vec<i32> = batch.token_ids.iter().map(|&id| id as i32).collect();
        let mask_flat: Vec<f32> = batch
            .lengths
            .iter()
            .flat_map(|&length| (0..seq_len).map(move |t| if t < length { 1.0 } else { 0.0 }))
            .collect();
        let labels: Vec<i32> = batch.labels.iter().map(|&label| label as i32).collect();

        let tokens = Tensor::<B, 1, Int>::from_ints(ids_flat.as_slice(), &self.device)
            .reshape([rows, seq_len]);
        let mask = Tensor::<B, 1>::from_floats(mask_flat.as_slice(), &self.device)
            .reshape([rows, seq_len]);
        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        SentimentBatch { tokens, mask, labels }
    }
}
