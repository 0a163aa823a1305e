// ============================================================
// Layer 4: Data Pipeline
// ============================================================
// Everything from the raw labelled line files to tensor batches.
//
// The pipeline flows in this order:
//
//   train / validation files (one "label tok tok ..." per line)
//       │
//       ▼
//   loader            → parses lines into Examples
//       │
//       ▼
//   Vocabulary        → token-to-id map (domain layer)
//       │
//       ▼
//   SentenceEncoder   → id sequences, bucketed by length,
//                       padded, overlong sentences discarded
//       │
//       ▼
//   BucketBatches     → shuffled fixed-size batches per epoch
//       │
//       ▼
//   SentimentBatcher  → stacks a batch into Burn tensors

/// Parses labelled line files into Examples
pub mod loader;

/// Id-encoding, length buckets, padding, counted discards
pub mod encoder;

/// Per-epoch shuffled, bucket-by-bucket batch iteration
pub mod batches;

/// Converts CPU batches into tensor batches for the model
pub mod batcher;
