// ============================================================
// Layer 5: Inferencer
// ============================================================
use anyhow::Result;
use burn::prelude::*;

use crate::data::encoder::SentenceEncoder;
use crate::domain::error::SentimentError;
use crate::domain::vocabulary::Vocabulary;
use crate::infra::artifacts::ArtifactStore;
use crate::ml::model::SentimentNet;

pub type InferBackend = burn::backend::NdArray<f32>;

/// Labels raw text with the loaded artifact pair. The parameters
/// and the vocabulary are read-only after loading, so calls are
/// independent and reentrant.
pub struct Inferencer {
    model:   SentimentNet<InferBackend>,
    vocab:   Vocabulary,
    encoder: SentenceEncoder,
    device:  <InferBackend as Backend>::Device,
}

impl Inferencer {
    pub fn from_artifacts(store: &ArtifactStore) -> Result<Self> {
        let device = <InferBackend as Backend>::Device::default();
        let (model, vocab, config) = store.load::<InferBackend>(&device)?;
        let encoder = SentenceEncoder::new(config.buckets)?;
        tracing::info!("model loaded, ready to predict");
        Ok(Self { model, vocab, encoder, device })
    }

    /// Label each text: 0 = negative, 1 = positive. The output is
    /// order-preserving and has the same length as the input; an
    /// empty input yields an empty output.
    ///
    /// Unknown tokens map to `<unk>`; a text longer than the
    /// largest bucket is truncated to it, never dropped. A text
    /// with no tokens at all is `InvalidInput`.
    pub fn predict(&self, texts: &[String]) -> Result<Vec<u8>> {
        texts.iter().map(|text| self.predict_one(text)).collect()
    }

    pub fn predict_one(&self, text: &str) -> Result<u8> {
        // whitespace split, matching the pre-tokenised training format
        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Err(SentimentError::InvalidInput {
                reason: format!("text has no tokens: {text:?}"),
            }
            .into());
        }

        let (ids, length) = self.encoder.encode_clamped(&self.vocab, &tokens);
        let seq_len = ids.len();

        let ids_flat: Vec<i32> = ids.iter().map(|&id| id as i32).collect();
        let mask_flat: Vec<f32> = (0..seq_len)
            .map(|t| if t < length { 1.0 } else { 0.0 })
            .collect();

        let tokens_tensor = Tensor::<InferBackend, 1, Int>::from_ints(
            ids_flat.as_slice(),
            &self.device,
        )
        .reshape([1, seq_len]);
        let mask = Tensor::<InferBackend, 1>::from_floats(mask_flat.as_slice(), &self.device)
            .reshape([1, seq_len]);

        let logits = self.model.forward(tokens_tensor, mask);
        let label: i64 = logits.argmax(1).flatten::<1>(0, 1).into_scalar().elem();
        Ok(label as u8)
    }
}
