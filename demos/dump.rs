use std::{io::stdout, path::PathBuf};

use clap::Parser;
use hmmpos::{Corpus, HmmModel, HmmOptions};

/// estimate a model from the corpus (CORPUS) and print its tables in a plain-text format
#[derive(Debug, Parser)]
struct Argv {
    #[arg(short, long, required = true, value_name = "CORPUS")]
    corpus: PathBuf,
    /// decode over every observed tag, not only tags that precede another tag
    #[arg(short, long)]
    all_tags: bool,
}

fn main() {
    env_logger::init();
    let argv = Argv::parse();
    let corpus = Corpus::from_path(&argv.corpus).expect("failed to read corpus");
    let mut options = HmmOptions::default();
    if argv.all_tags {
        options.set("state_space", "all_tags").expect("failed to set state_space");
    }
    let model = HmmModel::build_with(&corpus, options).expect("failed to estimate model");
    model.dump(stdout().lock()).expect("failed to dump model");
}
