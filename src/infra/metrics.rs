// ============================================================
// Layer 6: Metrics Logger
// ============================================================
// Appends one row of accuracy metrics per epoch to a CSV file in
// the model directory, so learning curves can be plotted after
// the run.
//
// Example output (model/metrics.csv):
//   epoch,train_accuracy,validation_accuracy
//   1,0.712500,0.655000
//   2,0.843750,0.720000

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

/// One row of metrics for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Cumulative accuracy over the whole training epoch
    pub train_accuracy: f64,

    /// Accuracy of the no-gradient pass over the validation split
    pub validation_accuracy: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_accuracy: f64, validation_accuracy: f64) -> Self {
        Self { epoch, train_accuracy, validation_accuracy }
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header only if the file is new, so runs can
    /// append to an existing log.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut file = fs::File::create(&csv_path)?;
            writeln!(file, "epoch,train_accuracy,validation_accuracy")?;
            tracing::debug!("created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            file,
            "{},{:.6},{:.6}",
            m.epoch, m.train_accuracy, m.validation_accuracy,
        )?;
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_once_and_appends_rows() {
        let dir = tempfile::tempdir().unwrap();

        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(1, 0.5, 0.4)).unwrap();

        // a second logger over the same directory must not rewrite the header
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(2, 0.75, 0.6)).unwrap();

        let content = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "epoch,train_accuracy,validation_accuracy");
        assert_eq!(lines[1], "1,0.500000,0.400000");
        assert_eq!(lines[2], "2,0.750000,0.600000");
        assert_eq!(lines.len(), 3);
    }
}
