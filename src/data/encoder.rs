// ============================================================
// Layer 4: Sentence Encoder
// ============================================================
// Maps token sequences to padded id sequences grouped into
// length buckets.
//
// Bucketing keeps batches rectangular without padding every
// sentence to the global maximum: each sentence goes to the
// smallest bucket boundary that can contain it and is right-padded
// with <pad> up to that boundary. The true length is carried
// alongside so padding positions can be masked out downstream.
//
// Sentences longer than the largest bucket are DISCARDED during
// training-time encoding. This is an intentional, counted,
// logged filtering policy, not an error. At inference time
// nothing may be dropped, so `encode_clamped` truncates instead.

use anyhow::{bail, Result};
use std::collections::BTreeMap;

use crate::domain::example::Example;
use crate::domain::vocabulary::{Vocabulary, PAD_ID};

/// One sentence after encoding: padded ids, the true token count,
/// the label, and the index of the bucket it was assigned to.
#[derive(Debug, Clone)]
pub struct EncodedExample {
    pub ids:    Vec<u32>,
    pub length: usize,
    pub label:  u8,
    pub bucket: usize,
}

/// Assigns sentences to length buckets and pads them.
#[derive(Debug, Clone)]
pub struct SentenceEncoder {
    buckets: Vec<usize>,
}

impl SentenceEncoder {
    /// Create an encoder over a fixed set of bucket boundaries.
    /// Boundaries must be non-empty, positive, and strictly ascending.
    pub fn new(buckets: Vec<usize>) -> Result<Self> {
        if buckets.is_empty() {
            bail!("at least one bucket boundary is required");
        }
        if buckets[0] == 0 {
            bail!("bucket boundaries must be positive");
        }
        if !buckets.windows(2).all(|w| w[0] < w[1]) {
            bail!("bucket boundaries must be strictly ascending: {buckets:?}");
        }
        Ok(Self { buckets })
    }

    pub fn buckets(&self) -> &[usize] {
        &self.buckets
    }

    /// The largest representable sentence length
    pub fn max_length(&self) -> usize {
        *self.buckets.last().unwrap()
    }

    /// Encode one training example, or None when the sentence
    /// exceeds the largest bucket and must be discarded.
    pub fn encode(&self, vocab: &Vocabulary, example: &Example) -> Option<EncodedExample> {
        let bucket = self
            .buckets
            .iter()
            .position(|&boundary| boundary >= example.tokens.len())?;
        Some(EncodedExample {
            ids:    self.pad_to(vocab, &example.tokens, self.buckets[bucket]),
            length: example.tokens.len(),
            label:  example.label,
            bucket,
        })
    }

    /// Encode a whole split, counting discarded sentences. The count
    /// is reported once per pass as a warning.
    pub fn encode_all(&self, vocab: &Vocabulary, examples: &[Example]) -> (Vec<EncodedExample>, usize) {
        let mut encoded = Vec::with_capacity(examples.len());
        let mut discarded = 0usize;
        for example in examples {
            match self.encode(vocab, example) {
                Some(e) => encoded.push(e),
                None => discarded += 1,
            }
        }
        if discarded > 0 {
            tracing::warn!("discarded {} sentences longer than the largest bucket", discarded);
        }
        (encoded, discarded)
    }

    /// Inference-time encoding: never discards. A sentence longer
    /// than the largest bucket is truncated to it. Returns the
    /// padded ids and the true (possibly truncated) length.
    pub fn encode_clamped(&self, vocab: &Vocabulary, tokens: &[String]) -> (Vec<u32>, usize) {
        let length = tokens.len().min(self.max_length());
        let tokens = &tokens[..length];
        // length <= max_length, so a bucket always exists
        let boundary = self
            .buckets
            .iter()
            .copied()
            .find(|&b| b >= length)
            .unwrap_or_else(|| self.max_length());
        (self.pad_to(vocab, tokens, boundary), length)
    }

    fn pad_to(&self, vocab: &Vocabulary, tokens: &[String], boundary: usize) -> Vec<u32> {
        let mut ids: Vec<u32> = tokens.iter().map(|t| vocab.id(t)).collect();
        ids.resize(boundary, PAD_ID);
        ids
    }
}

/// Derive bucket boundaries from the observed length distribution:
/// every length that occurs at least `batch_size` times becomes a
/// boundary, ascending. Falls back to a single bucket at the
/// maximum observed length when the histogram is too sparse.
pub fn derive_buckets(examples: &[Example], batch_size: usize) -> Vec<usize> {
    let mut histogram: BTreeMap<usize, usize> = BTreeMap::new();
    for example in examples {
        *histogram.entry(example.len()).or_insert(0) += 1;
    }

    let buckets: Vec<usize> = histogram
        .iter()
        .filter(|&(_, &count)| count >= batch_size)
        .map(|(&length, _)| length)
        .collect();

    if !buckets.is_empty() {
        return buckets;
    }
    let max_length = histogram.keys().next_back().copied().unwrap_or(1);
    vec![max_length]
}
