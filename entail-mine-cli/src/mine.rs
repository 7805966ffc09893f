use std::fs;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;

use entail_mine::{
    read_documents, Miner, MinerConfig, SentenceSplitter, SentenceStore, TfidfOracle, Vocabulary,
    XmlWriter,
};

#[derive(Parser, Debug)]
#[clap(
    name = "mine",
    about = "A program to mine candidate sentence pairs for an entailment corpus."
)]
struct Args {
    /// Directory containing corpus text files.
    #[clap(short = 'i', long)]
    corpus_dir: PathBuf,

    /// File with stopwords, one per line.
    #[clap(short = 's', long)]
    stopwords: Option<PathBuf>,

    /// Path of a saved similarity index. When missing or unreadable, the
    /// index is rebuilt from the corpus.
    #[clap(long)]
    index: Option<PathBuf>,

    /// File to write the pair XML to; stdout when omitted.
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,

    /// Do not descend into subdirectories of the corpus directory.
    #[clap(long)]
    flat: bool,

    /// Minimum similarity a candidate pair must reach.
    #[clap(long, default_value = "0.8")]
    minimum_score: f64,

    /// Similarity at which a candidate counts as a near duplicate.
    #[clap(long, default_value = "0.99")]
    maximum_score: f64,

    /// Number of pairs to mine; 0 means unbounded.
    #[clap(short = 'n', long, default_value = "0")]
    num_pairs: usize,

    /// Number of pairs a sentence may seed.
    #[clap(long, default_value = "1")]
    pairs_per_sentence: usize,

    /// Minimum number of tokens exclusive to each sentence of a pair.
    #[clap(long, default_value = "3")]
    minimum_sentence_diff: usize,

    /// Minimum proportion of exclusive tokens in each sentence of a pair.
    #[clap(long, default_value = "0.2")]
    minimum_proportion_diff: f64,

    /// Minimum document frequency a token needs to stay in the vocabulary.
    #[clap(long, default_value = "2")]
    minimum_df: u32,

    /// Tag exported pairs with this cluster number.
    #[clap(long)]
    cluster: Option<u32>,

    /// Quiet mode; suppress logging.
    #[clap(short = 'q', long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if !args.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
    }

    let documents = read_documents(&args.corpus_dir, !args.flat)?;
    let splitter = SentenceSplitter::new();
    let store = SentenceStore::from_documents(&documents, &splitter);
    info!(
        "loaded {} unique sentences from {} documents",
        store.len(),
        documents.len()
    );

    let mut vocab = Vocabulary::new();
    for tokens in store.iter_tokens() {
        vocab.add_document(&tokens);
    }
    if let Some(path) = &args.stopwords {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read stopwords from {}", path.display()))?;
        vocab.remove_stopwords(text.lines());
    }
    vocab.prune(args.minimum_df, 0.9);

    let oracle = match &args.index {
        Some(path) => TfidfOracle::load_or_build(path, &store, &vocab),
        None => TfidfOracle::build(&store, &vocab),
    };

    let config = MinerConfig {
        minimum_score: args.minimum_score,
        maximum_score: args.maximum_score,
        num_pairs: args.num_pairs,
        pairs_per_sentence: args.pairs_per_sentence,
        minimum_sentence_diff: args.minimum_sentence_diff,
        minimum_proportion_diff: args.minimum_proportion_diff,
    };
    let mut miner = Miner::new(config);
    let start = Instant::now();
    let pairs = miner.mine(&store, &vocab, &oracle)?;
    info!(
        "mined {} pairs in {} sec",
        pairs.len(),
        start.elapsed().as_secs_f64()
    );

    let mut writer = XmlWriter::new();
    writer.add_pairs(pairs, args.cluster);
    match &args.output {
        Some(path) => {
            let wtr = BufWriter::new(
                fs::File::create(path)
                    .with_context(|| format!("could not create {}", path.display()))?,
            );
            writer.write(wtr)?;
        }
        None => writer.write(io::stdout().lock())?,
    }
    Ok(())
}
