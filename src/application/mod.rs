// ============================================================
// Layer 2: Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
// training a classifier, or labelling text with a trained one.
// No ML math, no printing, no direct tensor code here; only
// workflow coordination.

// The training workflow
pub mod train_use_case;

// The inference workflow
pub mod predict_use_case;
