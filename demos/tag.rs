use clap::Parser;
use hmmpos::{hmm, Corpus, HmmModel, HmmOptions, StateSpace};

const CORPUS: &str = "\
The=DET dog=NOUN barks=VERB .=PUNCT
The=DET old=ADJ dog=NOUN sleeps=VERB .=PUNCT
A=DET cat=NOUN sees=VERB the=DET dog=NOUN .=PUNCT
Dogs=NOUN bark=VERB at=ADP cats=NOUN .=PUNCT
The=DET bark=NOUN of=ADP the=DET tree=NOUN is=VERB rough=ADJ .=PUNCT
";

/// Compare the greedy tagger with the Viterbi decoder on a sentence (TOKENS),
/// using a small built-in corpus
#[derive(Debug, Parser)]
struct Argv {
    /// decode over every observed tag, not only tags that precede another tag
    #[arg(short, long)]
    all_tags: bool,
    #[arg(value_name = "TOKENS")]
    tokens: Vec<String>,
}

fn main() {
    env_logger::init();
    let argv = Argv::parse();
    let corpus: Corpus = CORPUS.parse().expect("failed to parse corpus");
    let options = HmmOptions {
        state_space: if argv.all_tags { StateSpace::AllTags } else { StateSpace::Predecessors },
        ..Default::default()
    };
    let model = HmmModel::build_with(&corpus, options).expect("failed to estimate model");
    let tokens = if argv.tokens.is_empty() {
        "The old cat barks .".split_whitespace().map(String::from).collect()
    } else {
        argv.tokens
    };

    let greedy = hmm::tag_greedy(&model, &tokens).expect("failed to tag");
    let path = model.viterbi_tagger().decode(&tokens).expect("failed to decode");
    println!("{:<12}{:<10}{:<10}{:<10}", "token", "greedy", "viterbi", "state");
    for (i, token) in tokens.iter().enumerate() {
        println!("{:<12}{:<10}{:<10}{:<10}", token, greedy[i], path.labels[i], path.states[i]);
    }
    println!("log-probability: {:.4}", path.score);
}
