// ============================================================
// Layer 5: Training Loop
// ============================================================
// Drives the epochs: forward, loss, backward, Adam step, running
// accuracy, then a no-gradient validation pass at every epoch end.
// The run is single-threaded; the loop exclusively owns the
// parameters until the final save hands them to the artifact
// store.
//
// Burn backend notes:
//   - training runs on Autodiff<NdArray> for gradients
//   - model.valid() returns the model on the inner backend, with
//     no autodiff overhead, for the validation pass and the save
//
// Accuracy is diagnostic only: there is no early stopping and no
// best-checkpoint selection. The model is saved once, at run end.

use anyhow::Result;
use std::time::Instant;

use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::batcher::SentimentBatcher;
use crate::data::batches::BucketBatches;
use crate::domain::error::SentimentError;
use crate::domain::vocabulary::Vocabulary;
use crate::infra::artifacts::{ArtifactConfig, ArtifactStore};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::SentimentNet;

pub type InnerBackend = burn::backend::NdArray<f32>;
pub type TrainBackend = burn::backend::Autodiff<InnerBackend>;

pub fn run_training(
    cfg:            &TrainConfig,
    artifact_cfg:   ArtifactConfig,
    mut train_data: BucketBatches,
    mut val_data:   BucketBatches,
    vocab:          &Vocabulary,
    store:          &ArtifactStore,
    metrics:        &MetricsLogger,
) -> Result<()> {
    let device = <InnerBackend as Backend>::Device::default();

    let mut model: SentimentNet<TrainBackend> = artifact_cfg.net_config().init(&device);
    tracing::info!(
        "model ready: vocab_size={}, embedding_size={}, buckets={:?}",
        artifact_cfg.vocab_size,
        artifact_cfg.embedding_size,
        artifact_cfg.buckets,
    );

    let mut optim = AdamConfig::new().init();
    let train_batcher = SentimentBatcher::<TrainBackend>::new(device.clone());
    let val_batcher = SentimentBatcher::<InnerBackend>::new(device.clone());

    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut seen = 0usize;
        let mut correct = 0usize;
        let mut interval_examples = 0usize;
        let mut interval_start = Instant::now();

        for (batch_index, cpu_batch) in train_data.next_epoch().enumerate() {
            let batch = train_batcher.batch(&cpu_batch);
            let (loss, logits) =
                model.forward_loss(batch.tokens, batch.mask, batch.labels.clone());

            let loss_value: f64 = loss.clone().into_scalar().elem();
            if !loss_value.is_finite() {
                return Err(SentimentError::NonFiniteLoss { epoch, batch: batch_index }.into());
            }

            // Backward pass + Adam update
            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(cfg.learning_rate, model, grads);

            // Running accuracy: correct-so-far / seen-so-far this epoch
            let predictions = logits.argmax(1).flatten::<1>(0, 1);
            let batch_correct: i64 = predictions
                .equal(batch.labels)
                .int()
                .sum()
                .into_scalar()
                .elem();
            correct += batch_correct as usize;
            seen += cpu_batch.size();
            interval_examples += cpu_batch.size();

            if batch_index > 0 && batch_index % cfg.log_interval == 0 {
                let elapsed = interval_start.elapsed().as_secs_f64();
                tracing::info!(
                    "[epoch {} batch {}] training: accuracy={:.6}, {:.1} samples/s",
                    epoch,
                    batch_index,
                    correct as f64 / seen as f64,
                    interval_examples as f64 / elapsed.max(1e-9),
                );
                interval_examples = 0;
                interval_start = Instant::now();
            }
        }

        let train_accuracy = if seen > 0 { correct as f64 / seen as f64 } else { 0.0 };
        tracing::info!("[epoch {}] training: accuracy={:.6}", epoch, train_accuracy);

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → SentimentNet<InnerBackend>: no gradients
        let model_valid = model.valid();
        let (val_correct, val_seen) = evaluate(&model_valid, &val_batcher, &mut val_data);
        let validation_accuracy =
            if val_seen > 0 { val_correct as f64 / val_seen as f64 } else { 0.0 };
        tracing::info!("[epoch {}] validation: accuracy={:.6}", epoch, validation_accuracy);

        metrics.log(&EpochMetrics::new(epoch, train_accuracy, validation_accuracy))?;
    }

    // ── Save ──────────────────────────────────────────────────────────────────
    store.save(&model.valid(), vocab, &artifact_cfg)?;
    tracing::info!("training complete");
    Ok(())
}

/// Full pass over a split with gradients disabled. Returns
/// (correct, seen).
fn evaluate(
    model:   &SentimentNet<InnerBackend>,
    batcher: &SentimentBatcher<InnerBackend>,
    data:    &mut BucketBatches,
) -> (usize, usize) {
    let mut correct = 0usize;
    let mut seen = 0usize;
    for cpu_batch in data.next_epoch() {
        let batch = batcher.batch(&cpu_batch);
        let logits = model.forward(batch.tokens, batch.mask);
        let predictions = logits.argmax(1).flatten::<1>(0, 1);
        let batch_correct: i64 = predictions
            .equal(batch.labels)
            .int()
            .sum()
            .into_scalar()
            .elem();
        correct += batch_correct as usize;
        seen += cpu_batch.size();
    }
    (correct, seen)
}
