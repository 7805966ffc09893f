//! Similarity ranking over the sentence store.
//!
//! The miner only depends on the [`SimilarityOracle`] trait; how scores are
//! computed is the oracle's business. [`TfidfOracle`] is the shipped
//! implementation, ranking by cosine similarity of L2-normalized tf-idf
//! vectors.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::corpus::SentenceStore;
use crate::errors::Result;
use crate::tfidf::{self, Idf};
use crate::vocab::{Bow, Vocabulary};

/// A ranked match: a sentence index in the store and its similarity to the
/// query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ranked {
    /// The index of the matched sentence in the store.
    pub index: usize,
    /// The similarity score, higher is more similar.
    pub score: f64,
}

/// Ranks stored sentences by similarity to a query document.
pub trait SimilarityOracle {
    /// Returns one entry per stored sentence, sorted by descending score
    /// with ties broken by ascending index. When the query is itself a
    /// stored sentence, its own entry is included.
    fn rank(&self, bow: &Bow) -> Vec<Ranked>;
}

/// A similarity oracle over L2-normalized tf-idf vectors.
#[derive(Debug, Serialize, Deserialize)]
pub struct TfidfOracle {
    idf: Idf,
    vectors: Vec<Vec<(u32, f64)>>,
}

impl TfidfOracle {
    /// Indexes every sentence of the store against the given vocabulary.
    pub fn build(store: &SentenceStore, vocab: &Vocabulary) -> Self {
        let bows: Vec<Bow> = store.iter_bows(vocab).collect();
        let mut idf = Idf::new();
        for bow in &bows {
            idf.add(bow);
        }
        let vectors = bows.iter().map(|bow| vectorize(&idf, bow)).collect();
        info!("indexed {} sentences", store.len());
        Self { idf, vectors }
    }

    /// Gets the number of indexed sentences.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Checks if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Saves the index as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let wtr = BufWriter::new(File::create(path)?);
        serde_json::to_writer(wtr, self)?;
        Ok(())
    }

    /// Loads an index saved by [`TfidfOracle::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let rdr = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(rdr)?)
    }

    /// Loads the index at `path`, falling back to rebuilding it from the
    /// store when it is missing or unreadable. The fallback is logged as a
    /// warning, never surfaced as a failure.
    pub fn load_or_build(path: &Path, store: &SentenceStore, vocab: &Vocabulary) -> Self {
        match Self::load(path) {
            Ok(oracle) => oracle,
            Err(e) => {
                warn!(
                    "could not load index from {}: {}; rebuilding from the store",
                    path.display(),
                    e
                );
                Self::build(store, vocab)
            }
        }
    }
}

impl SimilarityOracle for TfidfOracle {
    fn rank(&self, bow: &Bow) -> Vec<Ranked> {
        let query = vectorize(&self.idf, bow);
        let mut hits: Vec<Ranked> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, vector)| Ranked {
                index,
                score: dot(&query, vector),
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.index.cmp(&b.index)));
        hits
    }
}

/// Turns a bow into an L2-normalized tf-idf vector, sorted by id.
fn vectorize(idf: &Idf, bow: &Bow) -> Vec<(u32, f64)> {
    let mut terms = tfidf::weigh(bow);
    tfidf::tf(&mut terms);
    for (id, weight) in terms.iter_mut() {
        *weight *= idf.idf(*id);
    }
    let norm = terms.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0. {
        for (_, weight) in terms.iter_mut() {
            *weight /= norm;
        }
    }
    terms
}

/// Dot product of two sparse vectors sorted by id.
fn dot(lhs: &[(u32, f64)], rhs: &[(u32, f64)]) -> f64 {
    let mut sum = 0.;
    let (mut i, mut j) = (0, 0);
    while i < lhs.len() && j < rhs.len() {
        match lhs[i].0.cmp(&rhs[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += lhs[i].1 * rhs[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SentenceSplitter;

    fn fixture() -> (SentenceStore, Vocabulary) {
        let docs = [
            "O gato comeu o peixe inteiro.\nO cachorro dormiu na varanda.\nO gato comeu o peixe cru.",
        ];
        let store = SentenceStore::from_documents(docs, &SentenceSplitter::new());
        let mut vocab = Vocabulary::new();
        for tokens in store.iter_tokens() {
            vocab.add_document(&tokens);
        }
        (store, vocab)
    }

    #[test]
    fn test_rank_covers_the_store_in_descending_order() {
        let (store, vocab) = fixture();
        let oracle = TfidfOracle::build(&store, &vocab);
        assert_eq!(oracle.len(), store.len());

        let bow = store.iter_bows(&vocab).next().unwrap();
        let ranking = oracle.rank(&bow);
        assert_eq!(ranking.len(), store.len());
        for pair in ranking.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_self_match_ranks_first() {
        let (store, vocab) = fixture();
        let oracle = TfidfOracle::build(&store, &vocab);
        let bow = store.iter_bows(&vocab).next().unwrap();
        let ranking = oracle.rank(&bow);
        assert_eq!(ranking[0].index, 0);
        assert!((ranking[0].score - 1.).abs() < 1e-9);
    }

    #[test]
    fn test_similar_sentence_outranks_dissimilar() {
        let (store, vocab) = fixture();
        let oracle = TfidfOracle::build(&store, &vocab);
        // sentence 2 shares almost all tokens with sentence 0; sentence 1
        // shares only the article
        let bow = store.iter_bows(&vocab).next().unwrap();
        let ranking = oracle.rank(&bow);
        assert_eq!(ranking[1].index, 2);
        assert_eq!(ranking[2].index, 1);
        assert!(ranking[1].score > ranking[2].score);
    }

    #[test]
    fn test_save_load_round_trip() {
        let (store, vocab) = fixture();
        let oracle = TfidfOracle::build(&store, &vocab);
        let dir = std::env::temp_dir().join("entail-mine-oracle-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("index.json");
        oracle.save(&path).unwrap();

        let loaded = TfidfOracle::load(&path).unwrap();
        assert_eq!(loaded.len(), oracle.len());
        let bow = store.iter_bows(&vocab).next().unwrap();
        assert_eq!(loaded.rank(&bow), oracle.rank(&bow));
    }

    #[test]
    fn test_load_or_build_recovers_from_missing_file() {
        let (store, vocab) = fixture();
        let path = std::env::temp_dir().join("entail-mine-no-such-index.json");
        let _ = std::fs::remove_file(&path);
        let oracle = TfidfOracle::load_or_build(&path, &store, &vocab);
        assert_eq!(oracle.len(), store.len());
    }
}
