#![recursion_limit = "256"]

// ============================================================
// text-sentiment
// ============================================================
// A binary sentiment classifier over pre-tokenised sentences:
// train on labelled line files, persist the vocabulary and
// model parameters, then serve predictions over raw text.
//
// The crate is organised in layers, top to bottom:
//
//   cli          - clap commands (`train`, `predict`)
//   application  - use cases that orchestrate the layers below
//   domain       - plain structs, the vocabulary, error taxonomy
//   data         - line-file loading, encoding, bucketed batching
//   ml           - the Burn model, training loop, inferencer
//   infra        - artifact persistence and metrics logging

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;
