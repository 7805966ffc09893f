//! Mining candidate sentence pairs for textual-entailment corpora.
//!
//! Given a corpus of raw text documents, this library finds pairs of
//! sentences that are close in meaning yet lexically distinct enough to be
//! non-trivial to classify as entailment, contradiction, or neutral. Human
//! judgements label the mined pairs in a later phase.
//!
//! The pipeline: documents are split into sentences ([`segment`]),
//! deduplicated into an indexed store ([`corpus`]), tokenized ([`tokenize`])
//! and mapped to token-id multisets ([`vocab`]), ranked by a similarity
//! oracle ([`oracle`]), and finally filtered into candidate pairs by the
//! miner ([`miner`]).
#![deny(missing_docs)]

pub mod corpus;
pub mod errors;
pub mod export;
pub mod miner;
pub mod oracle;
pub mod segment;
pub mod tfidf;
pub mod tokenize;
pub mod vocab;

pub use corpus::{read_documents, SentenceFilter, SentenceStore};
pub use errors::{MineError, Result};
pub use export::XmlWriter;
pub use miner::{CandidatePair, Miner, MinerConfig};
pub use oracle::{Ranked, SimilarityOracle, TfidfOracle};
pub use segment::SentenceSplitter;
pub use vocab::Vocabulary;
