// ============================================================
// Layer 4: Dataset Loader
// ============================================================
// Reads a plain-text dataset file, one example per line. The
// first whitespace-delimited field is the integer label (0 or 1),
// the remainder is the already-tokenised sentence.
//
// A malformed line (non-binary label, or no tokens after the
// label) is skipped with a warning rather than aborting the run.
// A missing or unreadable file aborts immediately with its cause.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::domain::example::Example;

/// Load every well-formed example from `path`.
pub fn load_examples(path: &Path) -> Result<Vec<Example>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read dataset file '{}'", path.display()))?;

    let mut examples = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(example) => examples.push(example),
            None => {
                skipped += 1;
                tracing::warn!(
                    "skipping malformed line {} in '{}'",
                    index + 1,
                    path.display()
                );
            }
        }
    }

    tracing::info!(
        "loaded {} examples from '{}' ({} malformed lines skipped)",
        examples.len(),
        path.display(),
        skipped
    );
    Ok(examples)
}

/// Parse one `label tok tok ...` line. Returns None when the line
/// cannot yield a valid Example.
fn parse_line(line: &str) -> Option<Example> {
    let mut fields = line.split_whitespace();
    let label: u8 = fields.next()?.parse().ok()?;
    if label > 1 {
        return None;
    }
    let tokens: Vec<String> = fields.map(str::to_string).collect();
    if tokens.is_empty() {
        return None;
    }
    Some(Example::new(label, tokens))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dataset(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{content}").unwrap();
        (dir, path)
    }

    #[test]
    fn parses_labelled_lines() {
        let (_dir, path) = write_dataset("1 a fine film\n0 what a mess\n");
        let examples = load_examples(&path).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].label, 1);
        assert_eq!(examples[0].tokens, vec!["a", "fine", "film"]);
        assert_eq!(examples[1].label, 0);
    }

    #[test]
    fn skips_malformed_lines_and_keeps_going() {
        let (_dir, path) = write_dataset("1 good\nnot-a-label oops\n2 out of range\n0\n\n0 bad\n");
        let examples = load_examples(&path).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].tokens, vec!["good"]);
        assert_eq!(examples[1].tokens, vec!["bad"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_examples(Path::new("/nonexistent/train")).is_err());
    }
}
