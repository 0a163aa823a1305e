// ============================================================
// Layer 3: Core Traits (Abstractions)
// ============================================================
// The seams between layers. Callers program against these
// traits, so implementations can be swapped without touching
// the code that uses them.

use anyhow::Result;
use std::path::Path;

// ─── SentimentPredictor ───────────────────────────────────────────────────────
/// Any component that can label raw text.
///
/// Implementations:
///   - PredictUseCase → runs the trained network
pub trait SentimentPredictor {
    /// Label each input text with 0 (negative) or 1 (positive).
    ///
    /// The output has the same length and order as the input;
    /// an empty input list yields an empty output list.
    fn predict(&self, texts: &[String]) -> Result<Vec<u8>>;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved and restored from disk.
///
/// Implementations:
///   - Vocabulary → saves/loads the token-to-id map as JSON
pub trait Persistable: Sized {
    /// Save this component's state to the given path
    fn save(&self, path: &Path) -> Result<()>;

    /// Load a component's state from the given path.
    /// Returns Self so callers can use the loaded instance directly.
    fn load(path: &Path) -> Result<Self>;
}
