use entail_mine::{Miner, MinerConfig, SentenceSplitter, SentenceStore, TfidfOracle, Vocabulary};

fn main() {
    let documents = vec![
        "O governo anunciou nesta semana um corte de impostos para pequenas empresas.\n\
         O corte de impostos anunciado pelo governo beneficia as pequenas empresas do país.\n\
         A seleção brasileira venceu o amistoso por dois a zero na noite de ontem.\n\
         Com gols no segundo tempo, a seleção brasileira derrotou o adversário no amistoso.",
    ];

    // Splits the documents into deduplicated sentences.
    let store = SentenceStore::from_documents(&documents, &SentenceSplitter::new());

    // Builds the token vocabulary from the store's normalized tokens.
    let mut vocab = Vocabulary::new();
    for tokens in store.iter_tokens() {
        vocab.add_document(&tokens);
    }
    vocab.prune(1, 1.0);

    // Indexes the sentences and mines pairs that are similar in topic but
    // lexically distinct.
    let oracle = TfidfOracle::build(&store, &vocab);
    let config = MinerConfig {
        minimum_score: 0.15,
        maximum_score: 0.99,
        num_pairs: 0,
        pairs_per_sentence: 1,
        minimum_sentence_diff: 3,
        minimum_proportion_diff: 0.2,
    };
    let pairs = Miner::new(config).mine(&store, &vocab, &oracle).unwrap();

    for pair in &pairs {
        println!(
            "[{:.3}] {} <-> {}",
            pair.score, pair.seed, pair.candidate
        );
    }
}
