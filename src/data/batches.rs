// ============================================================
// Layer 4: Bucketed Batch Iteration
// ============================================================
// Produces the per-epoch batch sequence the training loop
// consumes. Each epoch:
//
//   1. every bucket's examples are reshuffled (seeded when the
//      caller wants reproducibility),
//   2. batches of `batch_size` are yielded bucket by bucket in
//      ascending boundary order,
//   3. the final partial batch of each bucket is yielded
//      undersized rather than padded or dropped.
//
// Every retained example therefore appears exactly once per epoch.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data::encoder::EncodedExample;

/// A CPU-side rectangular mini-batch: row-major token ids of shape
/// (rows, seq_len), plus parallel true lengths and labels.
#[derive(Debug, Clone)]
pub struct TokenBatch {
    pub token_ids: Vec<u32>,
    pub lengths:   Vec<usize>,
    pub labels:    Vec<u8>,
    pub seq_len:   usize,
}

impl TokenBatch {
    /// Number of examples in the batch
    pub fn size(&self) -> usize {
        self.labels.len()
    }
}

/// Holds a split's encoded sentences grouped by bucket and hands
/// out one epoch of batches at a time.
pub struct BucketBatches {
    boundaries: Vec<usize>,
    data:       Vec<Vec<EncodedExample>>,
    batch_size: usize,
    rng:        StdRng,
}

impl BucketBatches {
    /// Group `encoded` by its bucket assignment. A `seed` makes the
    /// whole epoch sequence reproducible; None draws from entropy.
    pub fn new(
        boundaries: &[usize],
        encoded: Vec<EncodedExample>,
        batch_size: usize,
        seed: Option<u64>,
    ) -> Self {
        let mut data: Vec<Vec<EncodedExample>> = vec![Vec::new(); boundaries.len()];
        for example in encoded {
            data[example.bucket].push(example);
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            boundaries: boundaries.to_vec(),
            data,
            // a zero batch size would never advance the epoch cursor
            batch_size: batch_size.max(1),
            rng,
        }
    }

    /// Total number of retained examples
    pub fn example_count(&self) -> usize {
        self.data.iter().map(Vec::len).sum()
    }

    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Reshuffle within every bucket and return this epoch's lazy
    /// batch sequence.
    pub fn next_epoch(&mut self) -> EpochBatches<'_> {
        for bucket in &mut self.data {
            bucket.shuffle(&mut self.rng);
        }
        EpochBatches {
            source: self,
            bucket: 0,
            offset: 0,
        }
    }
}

/// One epoch's batches, yielded bucket by bucket.
pub struct EpochBatches<'a> {
    source: &'a BucketBatches,
    bucket: usize,
    offset: usize,
}

impl Iterator for EpochBatches<'_> {
    type Item = TokenBatch;

    fn next(&mut self) -> Option<TokenBatch> {
        loop {
            let bucket = self.source.data.get(self.bucket)?;
            if self.offset >= bucket.len() {
                self.bucket += 1;
                self.offset = 0;
                continue;
            }

            let end = (self.offset + self.source.batch_size).min(bucket.len());
            let rows = &bucket[self.offset..end];
            self.offset = end;

            let seq_len = self.source.boundaries[self.bucket];
            let mut token_ids = Vec::with_capacity(rows.len() * seq_len);
            let mut lengths = Vec::with_capacity(rows.len());
            let mut labels = Vec::with_capacity(rows.len());
            for row in rows {
                token_ids.extend_from_slice(&row.ids);
                lengths.push(row.length);
                labels.push(row.label);
            }

            return Some(TokenBatch {
                token_ids,
                lengths,
                labels,
                seq_len,
            });
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoder::SentenceEncoder;
    use crate::domain::example::Example;
    use crate::domain::vocabulary::Vocabulary;

    fn encoded_corpus(sentences: &[(&str, u8)]) -> (Vec<usize>, Vec<EncodedExample>) {
        let examples: Vec<Example> = sentences
            .iter()
            .map(|(s, label)| {
                Example::new(*label, s.split_whitespace().map(str::to_string).collect())
            })
            .collect();
        let vocab = Vocabulary::build(&examples, 1, 100_000).unwrap();
        let boundaries = vec![2, 4];
        let encoder = SentenceEncoder::new(boundaries.clone()).unwrap();
        let (encoded, _) = encoder.encode_all(&vocab, &examples);
        (boundaries, encoded)
    }

    #[test]
    fn every_example_appears_exactly_once_per_epoch() {
        let (boundaries, encoded) = encoded_corpus(&[
            ("a b", 0),
            ("c d", 1),
            ("e f", 0),
            ("g h i", 1),
            ("j k l m", 0),
        ]);
        let mut batches = BucketBatches::new(&boundaries, encoded, 2, Some(7));

        for _ in 0..3 {
            let total: usize = batches.next_epoch().map(|b| b.size()).sum();
            assert_eq!(total, 5);
        }
    }

    #[test]
    fn final_partial_batch_is_undersized() {
        let (boundaries, encoded) =
            encoded_corpus(&[("a b", 0), ("c d", 1), ("e f", 0)]);
        let mut batches = BucketBatches::new(&boundaries, encoded, 2, Some(7));
        let sizes: Vec<usize> = batches.next_epoch().map(|b| b.size()).collect();
        assert_eq!(sizes, vec![2, 1]);
    }

    #[test]
    fn buckets_are_visited_in_ascending_order() {
        let (boundaries, encoded) = encoded_corpus(&[
            ("a b c d", 0),
            ("e f", 1),
            ("g h i j", 0),
            ("k l", 1),
        ]);
        let mut batches = BucketBatches::new(&boundaries, encoded, 1, Some(7));
        let seq_lens: Vec<usize> = batches.next_epoch().map(|b| b.seq_len).collect();
        assert_eq!(seq_lens, vec![2, 2, 4, 4]);
    }

    #[test]
    fn zero_batch_size_still_terminates_each_epoch() {
        let (boundaries, encoded) = encoded_corpus(&[("a b", 0)]);
        let mut batches = BucketBatches::new(&boundaries, encoded, 0, Some(1));
        let sizes: Vec<usize> = batches.next_epoch().map(|b| b.size()).collect();
        assert_eq!(sizes, vec![1]);
    }

    #[test]
    fn seeded_iteration_is_reproducible() {
        let sentences = [("a b", 0u8), ("c d", 1), ("e f", 0), ("g h", 1)];
        let (boundaries, encoded) = encoded_corpus(&sentences);
        let (_, encoded_again) = encoded_corpus(&sentences);

        let mut first = BucketBatches::new(&boundaries, encoded, 2, Some(42));
        let mut second = BucketBatches::new(&boundaries, encoded_again, 2, Some(42));

        for _ in 0..2 {
            let a: Vec<Vec<u8>> = first.next_epoch().map(|b| b.labels).collect();
            let b: Vec<Vec<u8>> = second.next_epoch().map(|b| b.labels).collect();
            assert_eq!(a, b);
        }
    }
}
