// ============================================================
// Layer 3: Vocabulary
// ============================================================
// The immutable token-to-id mapping built once from the training
// split and shared, by explicit argument, with every component
// that needs it: the sentence encoder and the embedding layer at
// training time, the inferencer at serving time.
//
// Id layout (fixed, dense):
//   0 = <pad>   padding positions in a batch
//   1 = <unk>   any token not seen during training
//   2 = <s>     reserved sequence-start symbol
//   3 = </s>    reserved sequence-end symbol
//   4.. = real tokens, most frequent first
//
// On disk the vocabulary is a flat token-to-id JSON object
// (vocab.json), so the file can be inspected by hand and the id
// of any word looked up with a text editor.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::domain::error::SentimentError;
use crate::domain::example::Example;
use crate::domain::traits::Persistable;

/// Id used to right-pad sentences up to their bucket boundary.
pub const PAD_ID: u32 = 0;

/// Id substituted for any token absent from the vocabulary.
pub const UNK_ID: u32 = 1;

const RESERVED: [&str; 4] = ["<pad>", "<unk>", "<s>", "</s>"];

/// Bidirectional token/id mapping. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    token_to_id: HashMap<String, u32>,
    id_to_token: Vec<String>,
}

impl Vocabulary {
    /// Build the vocabulary from the training split.
    ///
    /// Tokens are ranked by frequency, ties broken by the token
    /// itself, so the result is deterministic given fixed input.
    /// Tokens seen fewer than `min_count` times are pruned, and at
    /// most `max_tokens` real tokens are kept.
    ///
    /// Fails with `EmptyDataset` when there are no examples.
    pub fn build(examples: &[Example], min_count: usize, max_tokens: usize) -> Result<Self> {
        if examples.is_empty() {
            return Err(SentimentError::EmptyDataset.into());
        }

        let mut freq: HashMap<&str, usize> = HashMap::new();
        for example in examples {
            for token in &example.tokens {
                // Reserved symbols keep their fixed ids even if they
                // appear verbatim in the corpus.
                if RESERVED.contains(&token.as_str()) {
                    continue;
                }
                *freq.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = freq
            .into_iter()
            .filter(|&(_, count)| count >= min_count)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_tokens);

        let mut id_to_token: Vec<String> = RESERVED.iter().map(|s| s.to_string()).collect();
        id_to_token.extend(ranked.into_iter().map(|(token, _)| token.to_string()));

        Ok(Self::from_ordered_tokens(id_to_token))
    }

    fn from_ordered_tokens(id_to_token: Vec<String>) -> Self {
        let token_to_id = id_to_token
            .iter()
            .enumerate()
            .map(|(id, token)| (token.clone(), id as u32))
            .collect();
        Self { token_to_id, id_to_token }
    }

    /// Look up a token's id, substituting `<unk>` for anything
    /// not seen during training. Total on arbitrary text.
    pub fn id(&self, token: &str) -> u32 {
        self.token_to_id.get(token).copied().unwrap_or(UNK_ID)
    }

    /// Reverse lookup, for diagnostics
    pub fn token(&self, id: u32) -> Option<&str> {
        self.id_to_token.get(id as usize).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_to_id.contains_key(token)
    }

    /// Total number of ids, reserved symbols included.
    /// This is the embedding-table height.
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }
}

impl Persistable for Vocabulary {
    fn save(&self, path: &Path) -> Result<()> {
        // BTreeMap so the file is stable across runs
        let map: BTreeMap<&str, u32> = self
            .token_to_id
            .iter()
            .map(|(token, &id)| (token.as_str(), id))
            .collect();
        let json = serde_json::to_string_pretty(&map)?;
        fs::write(path, json)
            .with_context(|| format!("cannot write vocabulary to '{}'", path.display()))?;
        tracing::info!("vocabulary ({} tokens) saved to '{}'", self.len(), path.display());
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("cannot read vocabulary from '{}'", path.display()))?;
        let map: HashMap<String, u32> = serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a token-to-id map", path.display()))?;

        // Rebuild the dense reverse mapping; a gap or duplicate id
        // means the file was edited or truncated.
        let mut id_to_token = vec![String::new(); map.len()];
        for (token, &id) in &map {
            let slot = id_to_token.get_mut(id as usize).ok_or_else(|| {
                SentimentError::Persistence {
                    reason: format!("vocabulary id {id} out of range in '{}'", path.display()),
                }
            })?;
            if !slot.is_empty() {
                return Err(SentimentError::Persistence {
                    reason: format!("duplicate vocabulary id {id} in '{}'", path.display()),
                }
                .into());
            }
            *slot = token.clone();
        }

        tracing::info!("vocabulary ({} tokens) loaded from '{}'", map.len(), path.display());
        Ok(Self::from_ordered_tokens(id_to_token))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn corpus() -> Vec<Example> {
        vec![
            Example::new(1, to_tokens("a great great movie")),
            Example::new(0, to_tokens("a dull movie")),
        ]
    }

    fn to_tokens(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn token_set_matches_training_split() {
        let vocab = Vocabulary::build(&corpus(), 1, 100_000).unwrap();
        let observed: HashSet<&str> = ["a", "great", "movie", "dull"].into_iter().collect();
        for token in &observed {
            assert!(vocab.contains(token), "missing '{token}'");
        }
        assert_eq!(vocab.len(), RESERVED.len() + observed.len());
    }

    #[test]
    fn unknown_id_assigned_to_no_real_token() {
        let vocab = Vocabulary::build(&corpus(), 1, 100_000).unwrap();
        for token in ["a", "great", "movie", "dull"] {
            assert_ne!(vocab.id(token), UNK_ID);
            assert_ne!(vocab.id(token), PAD_ID);
        }
        assert_eq!(vocab.id("never-seen"), UNK_ID);
    }

    #[test]
    fn frequency_then_token_order_is_deterministic() {
        let vocab = Vocabulary::build(&corpus(), 1, 100_000).unwrap();
        // "a", "great", and "movie" each occur twice; the tie is
        // resolved alphabetically. "dull" occurs once and comes last.
        assert_eq!(vocab.id("a"), 4);
        assert_eq!(vocab.id("great"), 5);
        assert_eq!(vocab.id("movie"), 6);
        assert_eq!(vocab.id("dull"), 7);
    }

    #[test]
    fn min_count_prunes_rare_tokens() {
        let vocab = Vocabulary::build(&corpus(), 2, 100_000).unwrap();
        assert!(vocab.contains("great"));
        assert!(!vocab.contains("dull"));
        assert_eq!(vocab.id("dull"), UNK_ID);
    }

    #[test]
    fn empty_training_split_fails() {
        let err = Vocabulary::build(&[], 1, 100_000).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SentimentError>(),
            Some(SentimentError::EmptyDataset)
        ));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");

        let vocab = Vocabulary::build(&corpus(), 1, 100_000).unwrap();
        vocab.save(&path).unwrap();
        let reloaded = Vocabulary::load(&path).unwrap();

        assert_eq!(reloaded.len(), vocab.len());
        for token in ["a", "great", "movie", "dull", "<pad>", "<unk>"] {
            assert_eq!(reloaded.id(token), vocab.id(token), "id drift for '{token}'");
        }
    }
}
