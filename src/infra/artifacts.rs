// ============================================================
// Layer 6: Artifact Store
// ============================================================
// The single hand-off point between training-time mutable
// ownership of the parameters and inference-time read-only
// ownership. A successful run writes three files into the model
// directory:
//
//   model.mpk          - network parameters (Burn CompactRecorder)
//   vocab.json         - flat token-to-id map
//   model_config.json  - vocab size, embedding size, class count,
//                        and bucket boundaries, everything needed
//                        to rebuild the exact network for loading
//
// The three are written by one `save` call and read back by one
// `load` call; neither half of the (vocabulary, parameters) pair
// is ever used without the other.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{Deserialize, Serialize};

use crate::domain::error::SentimentError;
use crate::domain::traits::Persistable;
use crate::domain::vocabulary::Vocabulary;
use crate::ml::model::{SentimentNet, SentimentNetConfig};

const MODEL_FILE: &str = "model";
const VOCAB_FILE: &str = "vocab.json";
const CONFIG_FILE: &str = "model_config.json";

/// Everything inference needs to rebuild the network before the
/// saved parameters can be loaded into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub vocab_size:     usize,
    pub embedding_size: usize,
    pub num_classes:    usize,
    pub buckets:        Vec<usize>,
}

impl ArtifactConfig {
    pub fn net_config(&self) -> SentimentNetConfig {
        SentimentNetConfig::new(self.vocab_size, self.embedding_size)
            .with_num_classes(self.num_classes)
    }
}

/// Saves and restores the trained artifact triple.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Point the store at a directory, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist parameters, vocabulary, and config together. Called
    /// once, at the end of a successful run.
    pub fn save<B: Backend>(
        &self,
        model: &SentimentNet<B>,
        vocab: &Vocabulary,
        config: &ArtifactConfig,
    ) -> Result<()> {
        let model_path = self.dir.join(MODEL_FILE);
        CompactRecorder::new()
            .record(model.clone().into_record(), model_path.clone())
            .map_err(|e| SentimentError::Persistence {
                reason: format!("cannot write model weights to '{}': {e}", model_path.display()),
            })?;

        vocab
            .save(&self.dir.join(VOCAB_FILE))
            .map_err(|e| SentimentError::Persistence { reason: e.to_string() })?;

        let config_path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&config_path, json).map_err(|e| SentimentError::Persistence {
            reason: format!("cannot write '{}': {e}", config_path.display()),
        })?;

        tracing::info!("artifacts saved to '{}'", self.dir.display());
        Ok(())
    }

    /// Load the artifact pair back for inference. The network is
    /// rebuilt from the saved config, then the recorded parameters
    /// are loaded into it.
    pub fn load<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<(SentimentNet<B>, Vocabulary, ArtifactConfig)> {
        let config_path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&config_path).with_context(|| {
            format!(
                "cannot read '{}'. Have you run 'train' first?",
                config_path.display()
            )
        })?;
        let config: ArtifactConfig = serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a valid model config", config_path.display()))?;

        let vocab = Vocabulary::load(&self.dir.join(VOCAB_FILE))?;
        if vocab.len() != config.vocab_size {
            return Err(SentimentError::Persistence {
                reason: format!(
                    "vocabulary has {} ids but the model was trained with {}",
                    vocab.len(),
                    config.vocab_size
                ),
            }
            .into());
        }

        let model_path = self.dir.join(MODEL_FILE);
        let record = CompactRecorder::new()
            .load(model_path.clone(), device)
            .map_err(|e| SentimentError::Persistence {
                reason: format!("cannot load model weights from '{}': {e}", model_path.display()),
            })?;
        let model = config.net_config().init::<B>(device).load_record(record);

        tracing::info!("artifacts loaded from '{}'", self.dir.display());
        Ok((model, vocab, config))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::Example;

    type TestBackend = burn::backend::NdArray<f32>;

    #[test]
    fn save_then_load_reconstructs_the_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let examples = vec![Example::new(1, vec!["good".to_string(), "film".to_string()])];
        let vocab = Vocabulary::build(&examples, 1, 100_000).unwrap();
        let config = ArtifactConfig {
            vocab_size:     vocab.len(),
            embedding_size: 8,
            num_classes:    2,
            buckets:        vec![4, 8],
        };
        let device = Default::default();
        let model = config.net_config().init::<TestBackend>(&device);

        store.save(&model, &vocab, &config).unwrap();
        let (_, loaded_vocab, loaded_config) = store.load::<TestBackend>(&device).unwrap();

        assert_eq!(loaded_vocab.len(), vocab.len());
        assert_eq!(loaded_vocab.id("good"), vocab.id("good"));
        assert_eq!(loaded_config.buckets, vec![4, 8]);
        assert_eq!(loaded_config.embedding_size, 8);
    }

    #[test]
    fn loading_from_an_untrained_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let device = Default::default();
        assert!(store.load::<TestBackend>(&device).is_err());
    }
}
