// ============================================================
// Layer 6: Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   artifacts.rs - the artifact store. Writes the trained model
//                  parameters, the vocabulary, and the model
//                  config as one atomic hand-off from training
//                  to inference, and loads them back as a pair.
//
//   metrics.rs   - appends per-epoch train/validation accuracy
//                  to a CSV file for later analysis.

/// Model/vocabulary/config persistence
pub mod artifacts;

/// Training metrics CSV logger
pub mod metrics;
