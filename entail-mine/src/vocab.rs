//! Token vocabulary with document frequencies.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use hashbrown::{HashMap, HashSet};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A token-id multiset: `(id, count)` pairs sorted by id, one entry per
/// distinct id.
pub type Bow = Vec<(u32, u32)>;

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\W+$").unwrap());

/// A mapping between tokens and integer ids, tracking in how many documents
/// each token appears.
///
/// Build it by streaming documents through [`Vocabulary::add_document`],
/// then prune it once with [`Vocabulary::remove_stopwords`] and
/// [`Vocabulary::prune`]. Pruning reassigns ids, so bows produced before and
/// after a prune are not comparable.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    token2id: HashMap<String, u32>,
    dfs: HashMap<u32, u32>,
    num_docs: u32,
}

impl Vocabulary {
    /// Creates an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one document's tokens, assigning ids to unseen tokens and
    /// counting each distinct token once towards its document frequency.
    pub fn add_document<S>(&mut self, tokens: &[S])
    where
        S: AsRef<str>,
    {
        let mut distinct = HashSet::new();
        for token in tokens {
            let token = token.as_ref();
            let id = match self.token2id.get(token) {
                Some(&id) => id,
                None => {
                    let id = self.token2id.len() as u32;
                    self.token2id.insert(token.to_owned(), id);
                    id
                }
            };
            if distinct.insert(id) {
                *self.dfs.entry(id).or_insert(0) += 1;
            }
        }
        self.num_docs += 1;
    }

    /// Removes the given stopwords from the vocabulary. Words not present
    /// are ignored. Ids are reassigned.
    pub fn remove_stopwords<I, S>(&mut self, stopwords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let drop: HashSet<u32> = stopwords
            .into_iter()
            .filter_map(|w| self.token2id.get(w.as_ref()).copied())
            .collect();
        self.retain(|id, _, _| !drop.contains(&id));
    }

    /// Removes punctuation-only tokens, tokens appearing in fewer than
    /// `min_df` documents, and tokens appearing in more than `max_df_frac`
    /// of all documents. Ids are reassigned.
    pub fn prune(&mut self, min_df: u32, max_df_frac: f64) {
        let max_df = (max_df_frac * f64::from(self.num_docs)) as u32;
        let before = self.len();
        self.retain(|_, token, df| {
            !PUNCTUATION.is_match(token) && df >= min_df && df <= max_df
        });
        info!(
            "pruned vocabulary from {} to {} tokens",
            before,
            self.len()
        );
    }

    /// Keeps only the entries accepted by `keep` and compacts ids back into
    /// a contiguous range, preserving relative id order.
    fn retain<F>(&mut self, keep: F)
    where
        F: Fn(u32, &str, u32) -> bool,
    {
        let mut entries: Vec<(u32, String)> = self
            .token2id
            .drain()
            .map(|(token, id)| (id, token))
            .collect();
        entries.sort_unstable_by_key(|&(id, _)| id);

        let old_dfs = std::mem::take(&mut self.dfs);
        for (old_id, token) in entries {
            let df = old_dfs.get(&old_id).copied().unwrap_or(0);
            if keep(old_id, &token, df) {
                let new_id = self.token2id.len() as u32;
                self.token2id.insert(token, new_id);
                self.dfs.insert(new_id, df);
            }
        }
    }

    /// Returns the id of the given token, or `None` if it is not mapped.
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.token2id.get(token).copied()
    }

    /// Returns the document frequency of the given id.
    pub fn document_frequency(&self, id: u32) -> u32 {
        self.dfs.get(&id).copied().unwrap_or(0)
    }

    /// Returns the number of documents registered so far.
    pub const fn num_docs(&self) -> u32 {
        self.num_docs
    }

    /// Returns the number of mapped tokens.
    pub fn len(&self) -> usize {
        self.token2id.len()
    }

    /// Checks if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.token2id.is_empty()
    }

    /// Converts a token sequence into a token-id multiset. Unmapped tokens
    /// are dropped.
    pub fn doc_to_bow<S>(&self, tokens: &[S]) -> Bow
    where
        S: AsRef<str>,
    {
        let mut counts = HashMap::new();
        for token in tokens {
            if let Some(id) = self.token_to_id(token.as_ref()) {
                *counts.entry(id).or_insert(0u32) += 1;
            }
        }
        let mut bow: Bow = counts.into_iter().collect();
        bow.sort_unstable_by_key(|&(id, _)| id);
        bow
    }

    /// Saves the vocabulary as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let wtr = BufWriter::new(File::create(path)?);
        serde_json::to_writer(wtr, self)?;
        Ok(())
    }

    /// Loads a vocabulary saved by [`Vocabulary::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let rdr = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(rdr)?)
    }
}
