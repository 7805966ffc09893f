//! In-memory, deduplicated sentence storage.

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashSet;

use crate::errors::{MineError, Result};
use crate::segment::{BoundaryDetector, SentenceSplitter};
use crate::tokenize::tokenize;
use crate::vocab::{Bow, Vocabulary};

/// Discards unwanted sentences at store-construction time.
///
/// An empty filter discards nothing but empty sentences; the builder methods
/// enable further checks.
#[derive(Clone, Debug, Default)]
pub struct SentenceFilter {
    require_final_period: bool,
    skip_prefixes: Vec<String>,
}

impl SentenceFilter {
    /// Creates a filter that only discards empty sentences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards sentences that do not end in a period.
    pub fn require_final_period(mut self, yes: bool) -> Self {
        self.require_final_period = yes;
        self
    }

    /// Discards sentences starting with any of the given prefixes.
    pub fn skip_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    fn discards(&self, sentence: &str) -> bool {
        if sentence.is_empty() {
            return true;
        }
        if self.require_final_period && !sentence.ends_with('.') {
            return true;
        }
        self.skip_prefixes
            .iter()
            .any(|prefix| sentence.starts_with(prefix.as_str()))
    }
}

/// An ordered, duplicate-free collection of sentences with stable indices.
///
/// The store is built once from a document collection and is immutable
/// afterwards. Sentences are deduplicated by exact string equality; each
/// surviving sentence keeps the index assigned when it was first seen.
/// Callers must not rely on any particular order across source documents.
pub struct SentenceStore {
    sentences: Vec<String>,
}

impl SentenceStore {
    /// Builds a store from the given documents, splitting each into
    /// sentences and removing exact repeats.
    pub fn from_documents<I, D, Det>(documents: I, splitter: &SentenceSplitter<Det>) -> Self
    where
        I: IntoIterator<Item = D>,
        D: AsRef<str>,
        Det: BoundaryDetector,
    {
        Self::from_documents_filtered(documents, splitter, &SentenceFilter::new())
    }

    /// Builds a store like [`SentenceStore::from_documents`], additionally
    /// discarding sentences rejected by the filter.
    pub fn from_documents_filtered<I, D, Det>(
        documents: I,
        splitter: &SentenceSplitter<Det>,
        filter: &SentenceFilter,
    ) -> Self
    where
        I: IntoIterator<Item = D>,
        D: AsRef<str>,
        Det: BoundaryDetector,
    {
        let mut seen = HashSet::new();
        let mut sentences = vec![];
        for document in documents {
            for sentence in splitter.split(document.as_ref()) {
                if filter.discards(&sentence) {
                    continue;
                }
                if seen.insert(sentence.clone()) {
                    sentences.push(sentence);
                }
            }
        }
        Self { sentences }
    }

    /// Returns the sentence at the given index.
    pub fn get(&self, index: usize) -> Result<&str> {
        self.sentences
            .get(index)
            .map(String::as_str)
            .ok_or(MineError::out_of_range(index, self.sentences.len()))
    }

    /// Returns the number of stored sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Checks if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Iterates over the stored sentences as normalized token sequences, in
    /// store order. Iteration can be repeated and always yields the same
    /// sequences.
    pub fn iter_tokens(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.sentences.iter().map(|s| tokenize(s, true))
    }

    /// Iterates over the stored sentences as token-id multisets against the
    /// given vocabulary, in store order. Tokens absent from the vocabulary
    /// are dropped. Iteration can be repeated and always yields the same
    /// multisets.
    pub fn iter_bows<'a>(&'a self, vocab: &'a Vocabulary) -> impl Iterator<Item = Bow> + 'a {
        self.sentences
            .iter()
            .map(move |s| vocab.doc_to_bow(&tokenize(s, true)))
    }
}

/// Reads every file under the directory into one document string,
/// descending into subdirectories when `recursive`. Files are visited in
/// path order within each directory. An unreadable or non-UTF-8 file is an
/// input error.
pub fn read_documents(dir: &Path, recursive: bool) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| MineError::input(format!("could not list {}: {}", dir.display(), e)))?;
    let mut paths: Vec<PathBuf> = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()
        .map_err(|e| MineError::input(format!("could not list {}: {}", dir.display(), e)))?;
    paths.sort();

    let mut documents = vec![];
    for path in paths {
        if path.is_dir() {
            if recursive {
                documents.extend(read_documents(&path, recursive)?);
            }
            continue;
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| MineError::input(format!("could not read {}: {}", path.display(), e)))?;
        documents.push(text);
    }
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_from(docs: &[&str]) -> SentenceStore {
        SentenceStore::from_documents(docs, &SentenceSplitter::new())
    }

    #[test]
    fn test_deduplicates_exact_repeats() {
        let store = store_from(&[
            "O menino caiu. A mãe correu.",
            "O menino caiu. O pai chegou.",
            "O menino caiu.",
        ]);
        assert_eq!(store.len(), 3);
        let count = (0..store.len())
            .filter(|&i| store.get(i).unwrap() == "O menino caiu.")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_get_out_of_range() {
        let store = store_from(&["Uma frase."]);
        assert!(store.get(0).is_ok());
        assert!(matches!(store.get(1), Err(MineError::OutOfRange(_))));
    }

    #[test]
    fn test_case_sensitive_dedup() {
        let store = store_from(&["O menino caiu.", "o menino caiu."]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_iter_tokens_is_idempotent() {
        let store = store_from(&["O menino caiu. A mãe correu em 2012."]);
        let first: Vec<_> = store.iter_tokens().collect();
        let second: Vec<_> = store.iter_tokens().collect();
        assert_eq!(first, second);
        assert_eq!(
            first[1],
            vec!["a", "mãe", "correu", "em", "9999", "."]
        );
    }

    #[test]
    fn test_filter_final_period() {
        let filter = SentenceFilter::new().require_final_period(true);
        let store = SentenceStore::from_documents_filtered(
            ["Sem ponto final\nCom ponto final."],
            &SentenceSplitter::new(),
            &filter,
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap(), "Com ponto final.");
    }

    #[test]
    fn test_filter_prefixes() {
        let filter = SentenceFilter::new().skip_prefixes(["Foto:"]);
        let store = SentenceStore::from_documents_filtered(
            ["Foto: o autor em casa.\nUma frase normal."],
            &SentenceSplitter::new(),
            &filter,
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_documents() {
        let store = store_from(&[]);
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    fn write_corpus_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("b.txt"), "Segundo documento.").unwrap();
        fs::write(dir.join("a.txt"), "Primeiro documento.").unwrap();
        fs::write(dir.join("sub").join("c.txt"), "Documento aninhado.").unwrap();
        dir
    }

    #[test]
    fn test_read_documents_sorted() {
        let dir = write_corpus_dir("entail-mine-corpus-sorted-test");
        let documents = read_documents(&dir, false).unwrap();
        assert_eq!(documents, vec!["Primeiro documento.", "Segundo documento."]);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_read_documents_recursive() {
        let dir = write_corpus_dir("entail-mine-corpus-recursive-test");
        let documents = read_documents(&dir, true).unwrap();
        assert_eq!(
            documents,
            vec![
                "Primeiro documento.",
                "Segundo documento.",
                "Documento aninhado.",
            ]
        );
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_read_documents_missing_dir() {
        let dir = std::env::temp_dir().join("entail-mine-no-such-corpus");
        let result = read_documents(&dir, false);
        assert!(matches!(result, Err(MineError::Input(_))));
    }
}
