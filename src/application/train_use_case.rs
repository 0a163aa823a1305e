// ============================================================
// Layer 2: TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the train and validation files   (Layer 4 - data)
//   Step 2: Build the vocabulary (train split)    (Layer 3 - domain)
//   Step 3: Fix the bucket boundaries             (Layer 4 - data)
//   Step 4: Encode both splits                    (Layer 4 - data)
//   Step 5: Group into bucketed batches           (Layer 4 - data)
//   Step 6: Open artifact store + metrics log     (Layer 6 - infra)
//   Step 7: Run the training loop                 (Layer 5 - ml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::batches::BucketBatches;
use crate::data::encoder::{derive_buckets, SentenceEncoder};
use crate::data::loader::load_examples;
use crate::domain::error::SentimentError;
use crate::domain::vocabulary::Vocabulary;
use crate::infra::artifacts::{ArtifactConfig, ArtifactStore};
use crate::infra::metrics::MetricsLogger;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Serialisable so a run
// can be reproduced from a saved config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub train_file:     String,
    pub val_file:       String,
    pub model_dir:      String,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub learning_rate:  f64,
    pub embedding_size: usize,
    pub log_interval:   usize,
    /// Explicit bucket boundaries; None derives them from the
    /// training split's length distribution
    pub buckets:        Option<Vec<usize>>,
    /// Drop tokens seen fewer than this many times
    pub min_count:      usize,
    /// Cap on the number of real tokens in the vocabulary
    pub max_vocab:      usize,
    /// Shuffle seed for reproducible runs; None draws from entropy
    pub seed:           Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            train_file:     "data/train".to_string(),
            val_file:       "data/test".to_string(),
            model_dir:      "model".to_string(),
            batch_size:     8,
            epochs:         2,
            learning_rate:  0.01,
            embedding_size: 50,
            log_interval:   1000,
            buckets:        None,
            min_count:      1,
            max_vocab:      100_000,
            seed:           None,
        }
    }
}

impl TrainConfig {
    /// Reject values that would stall or crash the training loop
    /// before any work is done.
    pub fn validate(&self) -> Result<(), SentimentError> {
        if self.batch_size == 0 {
            return Err(SentimentError::InvalidInput {
                reason: "batch_size must be at least 1".to_string(),
            });
        }
        if self.log_interval == 0 {
            return Err(SentimentError::InvalidInput {
                reason: "log_interval must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
/// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load both splits ──────────────────────────────────────────
        let train_examples = load_examples(Path::new(&cfg.train_file))?;
        let val_examples = load_examples(Path::new(&cfg.val_file))?;

        // ── Step 2: Build the vocabulary from the training split only ─────────
        let vocab = Vocabulary::build(&train_examples, cfg.min_count, cfg.max_vocab)
            .with_context(|| format!("building vocabulary from '{}'", cfg.train_file))?;
        tracing::info!("vocabulary built: {} ids", vocab.len());

        // ── Step 3: Fix the bucket boundaries ─────────────────────────────────
        let buckets = match &cfg.buckets {
            Some(buckets) => buckets.clone(),
            None => derive_buckets(&train_examples, cfg.batch_size),
        };
        let encoder = SentenceEncoder::new(buckets.clone())?;
        tracing::info!("bucket boundaries: {:?}", buckets);

        // ── Step 4: Encode both splits (overlong sentences discarded) ─────────
        let (train_encoded, _) = encoder.encode_all(&vocab, &train_examples);
        let (val_encoded, _) = encoder.encode_all(&vocab, &val_examples);
        if train_encoded.is_empty() {
            return Err(SentimentError::EmptyDataset).with_context(|| {
                format!("every sentence in '{}' was discarded during encoding", cfg.train_file)
            });
        }

        // ── Step 5: Group into bucketed, shuffled batches ─────────────────────
        let train_data = BucketBatches::new(&buckets, train_encoded, cfg.batch_size, cfg.seed);
        let val_data = BucketBatches::new(&buckets, val_encoded, cfg.batch_size, cfg.seed);
        tracing::info!(
            "{} training examples, {} validation examples",
            train_data.example_count(),
            val_data.example_count(),
        );

        // ── Step 6: Artifact store + metrics log ──────────────────────────────
        let store = ArtifactStore::new(&cfg.model_dir);
        let metrics = MetricsLogger::new(&cfg.model_dir)?;

        // ── Step 7: Run the training loop (Layer 5) ───────────────────────────
        let artifact_cfg = ArtifactConfig {
            vocab_size:     vocab.len(),
            embedding_size: cfg.embedding_size,
            num_classes:    2,
            buckets,
        };
        run_training(cfg, artifact_cfg, train_data, val_data, &vocab, &store, &metrics)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_batch_size_is_rejected_before_training() {
        let config = TrainConfig { batch_size: 0, ..TrainConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(SentimentError::InvalidInput { .. })
        ));
        assert!(TrainUseCase::new(config).execute().is_err());
    }

    #[test]
    fn zero_log_interval_is_rejected_before_training() {
        let config = TrainConfig { log_interval: 0, ..TrainConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(SentimentError::InvalidInput { .. })
        ));
    }
}
