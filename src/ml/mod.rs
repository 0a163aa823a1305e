// ============================================================
// Layer 5: ML / Model Layer (Burn)
// ============================================================
// All Burn-specific code lives in this layer (the tensor batcher
// in data/ aside): the network, the training loop, and the
// inference engine.
//
//   model.rs      - embedding lookup, length-masked mean pooling,
//                   linear projection to the two classes
//
//   trainer.rs    - epoch loop: forward, loss, backward, Adam
//                   step, running accuracy, no-gradient
//                   validation pass, end-of-run artifact save
//
//   inferencer.rs - rebuilds the network from saved artifacts and
//                   labels raw text

/// The classifier network
pub mod model;

/// The training loop
pub mod trainer;

/// Inference engine over loaded artifacts
pub mod inferencer;
