//! Greedy mining of candidate sentence pairs.
//!
//! For every seed sentence, the miner walks the oracle's similarity ranking
//! and keeps the candidates that are semantically close yet lexically
//! distinct enough to be non-trivial to judge. Sentences that already
//! produced their share of pairs are excluded for the rest of the run, for
//! more variability in the output.

use hashbrown::HashSet;
use log::warn;

use crate::corpus::SentenceStore;
use crate::errors::{MineError, Result};
use crate::oracle::SimilarityOracle;
use crate::tokenize::tokenize;
use crate::vocab::Vocabulary;

/// Sentences with fewer tokens than this cannot support the lexical
/// divergence checks and are never paired.
const MIN_SENTENCE_TOKENS: usize = 5;

/// Mining thresholds and quotas. The library asserts no defaults; every
/// field is the caller's decision.
#[derive(Clone, Copy, Debug)]
pub struct MinerConfig {
    /// Scores below this stop the scan of the current seed.
    pub minimum_score: f64,
    /// Scores at or above this mark a near-duplicate, which is skipped.
    pub maximum_score: f64,
    /// Total number of pairs to mine; 0 means unbounded.
    pub num_pairs: usize,
    /// Number of pairs a sentence may seed before it is excluded.
    pub pairs_per_sentence: usize,
    /// Minimum number of tokens exclusive to each sentence of a pair.
    pub minimum_sentence_diff: usize,
    /// Minimum proportion of each sentence's token set that must be
    /// exclusive to it, in the range [0, 1].
    pub minimum_proportion_diff: f64,
}

impl MinerConfig {
    /// Checks the thresholds for contradictions. Contradictory values are
    /// an error, never silently clamped.
    pub fn validate(&self) -> Result<()> {
        if self.minimum_score > self.maximum_score {
            return Err(MineError::config(
                "minimum_score must not exceed maximum_score",
            ));
        }
        if !(0. ..=1.).contains(&self.minimum_proportion_diff) {
            return Err(MineError::config(
                "minimum_proportion_diff must lie in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// A mined pair: a seed sentence and a candidate match, with the similarity
/// the oracle assigned them.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidatePair {
    /// The seed sentence text.
    pub seed: String,
    /// The candidate sentence text.
    pub candidate: String,
    /// The store index of the seed.
    pub seed_index: usize,
    /// The store index of the candidate.
    pub candidate_index: usize,
    /// The similarity score of the pair.
    pub score: f64,
}

/// Mines candidate pairs from a sentence store.
///
/// The exclusion set and the accepted-pair counter live on the instance, so
/// independent miners never share state; both are reset at the start of
/// each [`Miner::mine`] call.
pub struct Miner {
    config: MinerConfig,
    used: HashSet<usize>,
    num_accepted: usize,
}

impl Miner {
    /// Creates a miner with the given configuration.
    pub fn new(config: MinerConfig) -> Self {
        Self {
            config,
            used: HashSet::new(),
            num_accepted: 0,
        }
    }

    /// Mines candidate pairs over all seeds in store order, returning them
    /// in discovery order. An empty store mines to an empty sequence.
    pub fn mine<O>(
        &mut self,
        store: &SentenceStore,
        vocab: &Vocabulary,
        oracle: &O,
    ) -> Result<Vec<CandidatePair>>
    where
        O: SimilarityOracle,
    {
        self.config.validate()?;
        self.used.clear();
        self.num_accepted = 0;

        let mut pairs = vec![];
        for (i, bow) in store.iter_bows(vocab).enumerate() {
            // too short to support the divergence checks; the bow counts
            // tokens surviving the vocabulary filters
            if bow.len() < MIN_SENTENCE_TOKENS {
                continue;
            }
            let seed = store.get(i)?;
            let seed_tokens = tokenize(seed, false);
            let seed_set: HashSet<&str> = seed_tokens.iter().map(String::as_str).collect();

            let mut accepted_for_seed = 0;
            let mut prev_score = f64::INFINITY;
            let mut warned = false;
            for hit in oracle.rank(&bow) {
                if hit.score > prev_score && !warned {
                    warn!(
                        "ranking for sentence {} is not sorted by descending score",
                        i
                    );
                    warned = true;
                }
                prev_score = hit.score;

                if hit.score < self.config.minimum_score {
                    // scores only decrease from here on
                    break;
                }
                if hit.index == i
                    || hit.score >= self.config.maximum_score
                    || self.used.contains(&hit.index)
                {
                    // the seed itself, a near copy, or an exhausted sentence
                    continue;
                }
                let candidate = store.get(hit.index)?;
                let cand_tokens = tokenize(candidate, false);
                if cand_tokens.len() < MIN_SENTENCE_TOKENS {
                    continue;
                }
                let cand_set: HashSet<&str> =
                    cand_tokens.iter().map(String::as_str).collect();

                let diff1 = seed_set.difference(&cand_set).count();
                let diff2 = cand_set.difference(&seed_set).count();
                if diff1 < self.config.minimum_sentence_diff
                    || diff2 < self.config.minimum_sentence_diff
                {
                    continue;
                }
                let proportion1 = diff1 as f64 / seed_set.len() as f64;
                let proportion2 = diff2 as f64 / cand_set.len() as f64;
                if proportion1 < self.config.minimum_proportion_diff
                    || proportion2 < self.config.minimum_proportion_diff
                {
                    continue;
                }

                pairs.push(CandidatePair {
                    seed: seed.to_owned(),
                    candidate: candidate.to_owned(),
                    seed_index: i,
                    candidate_index: hit.index,
                    score: hit.score,
                });
                self.num_accepted += 1;
                if self.config.num_pairs != 0 && self.num_accepted == self.config.num_pairs {
                    return Ok(pairs);
                }
                accepted_for_seed += 1;
                if accepted_for_seed >= self.config.pairs_per_sentence {
                    self.used.insert(i);
                    break;
                }
            }
        }
        Ok(pairs)
    }
}
