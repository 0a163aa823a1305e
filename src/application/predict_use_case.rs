// ============================================================
// Layer 2: PredictUseCase
// ============================================================
// Loads the trained artifact pair once, then answers prediction
// requests. Two surfaces:
//
//   predict() - the typed API: a list of texts in, a label per
//               text out, order-preserving.
//
//   respond() - the JSON API mirroring the serving contract: a
//               JSON array in, a JSON array out. One malformed
//               element (a non-string, or a text with no tokens)
//               never fails the whole batch; it becomes `null` at
//               its position, with a warning, and every other
//               element is still predicted.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::error::SentimentError;
use crate::domain::traits::SentimentPredictor;
use crate::infra::artifacts::ArtifactStore;
use crate::ml::inferencer::Inferencer;

pub struct PredictUseCase {
    inferencer: Inferencer,
}

impl PredictUseCase {
    /// Load the artifact pair from `model_dir`.
    pub fn new(model_dir: &str) -> Result<Self> {
        let store = ArtifactStore::new(model_dir);
        let inferencer = Inferencer::from_artifacts(&store)
            .with_context(|| format!("loading model artifacts from '{model_dir}'"))?;
        Ok(Self { inferencer })
    }

    /// Answer a raw JSON-array request with a JSON-array response.
    pub fn respond(&self, request: &str) -> Result<String> {
        let parsed: Value =
            serde_json::from_str(request).context("request is not valid JSON")?;
        let items = parsed.as_array().ok_or_else(|| SentimentError::InvalidInput {
            reason: "request must be a JSON array of strings".to_string(),
        })?;

        let mut outputs = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(text) => match self.inferencer.predict_one(text) {
                    Ok(label) => outputs.push(Value::from(label)),
                    Err(e) => {
                        tracing::warn!("request element {index} rejected: {e}");
                        outputs.push(Value::Null);
                    }
                },
                None => {
                    tracing::warn!("request element {index} is not a string");
                    outputs.push(Value::Null);
                }
            }
        }

        Ok(serde_json::to_string(&Value::Array(outputs))?)
    }
}

/// The typed prediction surface delegates straight to the engine.
impl SentimentPredictor for PredictUseCase {
    fn predict(&self, texts: &[String]) -> Result<Vec<u8>> {
        self.inferencer.predict(texts)
    }
}
