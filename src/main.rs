use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use hmmpos::{
    Corpus, Evaluation, GreedyTagger, HmmModel, HmmOptions, Result, Tagger, ViterbiTagger,
};

/// Train a hidden Markov model on a tagged corpus (CORPUS), then assign tags
/// to the sentences given by files (FILE), one whitespace-tokenized sentence
/// per line. If no FILE is given, sentences are read from STDIN.
/// With -t, the input is tagged (token=tag) and the performance is reported.
#[derive(Debug, Parser)]
#[command(version)]
struct Argv {
    /// read the training corpus from a file (CORPUS), one sentence of token=tag items per line
    #[arg(short, long, required = true, value_name = "CORPUS")]
    corpus: PathBuf,
    /// read options from a JSON file (CONFIG)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// set an option, NAME=VALUE (smoothing=<k>, state_space=predecessors|all_tags)
    #[arg(short)]
    parameters: Vec<String>,
    /// tag every token on its own instead of decoding the whole sentence
    #[arg(short, long)]
    greedy: bool,
    /// report the performance of the model on tagged input
    #[arg(short = 't', long = "test")]
    evaluate: bool,
    /// report the performance as JSON
    #[arg(long, requires = "evaluate")]
    json: bool,
    /// suppress tagging results (useful for test mode)
    #[arg(short, long)]
    quiet: bool,
    #[arg(value_name = "FILE")]
    datasets: Vec<PathBuf>,
}

fn options(argv: &Argv) -> Result<HmmOptions> {
    let mut options = match &argv.config {
        Some(path) => HmmOptions::from_path(path)?,
        None => HmmOptions::default(),
    };
    for s in &argv.parameters {
        if let Some((name, value)) = s.split_once('=') {
            options.set(name, value)?;
        } else {
            log::warn!("invalid parameter: {s}");
        }
    }
    Ok(options)
}

enum Decoder<'a> {
    Greedy(GreedyTagger<'a>),
    Viterbi(ViterbiTagger<'a>),
}

impl<'a> Tagger for Decoder<'a> {
    fn tag<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<String>> {
        match self {
            Self::Greedy(tagger) => tagger.tag(tokens),
            Self::Viterbi(tagger) => tagger.tag(tokens),
        }
    }
}

fn write_tagged<W: Write>(w: &mut W, tokens: &[String], tags: &[String]) -> io::Result<()> {
    let items: Vec<String> = tokens.iter().zip(tags).map(|(token, tag)| format!("{token}={tag}")).collect();
    writeln!(w, "{}", items.join(" "))
}

fn run(argv: Argv) -> Result<()> {
    let options = options(&argv)?;
    let corpus = Corpus::from_path(&argv.corpus)?;
    let model = HmmModel::build_with(&corpus, options)?;
    let tagger = if argv.greedy {
        Decoder::Greedy(model.greedy_tagger())
    } else {
        Decoder::Viterbi(model.viterbi_tagger())
    };

    let mut readers: Vec<Box<dyn BufRead>> = Vec::new();
    if argv.datasets.is_empty() {
        readers.push(Box::new(io::stdin().lock()));
    }
    for fpath in &argv.datasets {
        readers.push(Box::new(BufReader::new(File::open(fpath)?)));
    }

    let begin = Instant::now();
    let mut evaluation = Evaluation::default();
    let mut num_sentences = 0;
    let mut out = io::stdout().lock();
    for reader in readers {
        if argv.evaluate {
            let gold = Corpus::read(reader)?;
            for sentence in &gold {
                let prediction = tagger.tag(&sentence.tokens)?;
                evaluation.accumulate(&sentence.tags, &prediction);
                if !argv.quiet {
                    write_tagged(&mut out, &sentence.tokens, &prediction)?;
                }
                num_sentences += 1;
            }
        } else {
            for line in reader.lines() {
                let tokens: Vec<String> = line?.split_whitespace().map(String::from).collect();
                if tokens.is_empty() {
                    continue;
                }
                let prediction = tagger.tag(&tokens)?;
                if !argv.quiet {
                    write_tagged(&mut out, &tokens, &prediction)?;
                }
                num_sentences += 1;
            }
        }
    }
    log::info!("tagged {num_sentences} sentences, time cost: {:?}", begin.elapsed());

    if argv.evaluate {
        if argv.json {
            let report = serde_json::json!({
                "estimation": evaluation.evaluate(),
                "evaluation": evaluation,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        } else {
            write!(out, "{}", evaluation)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let argv = Argv::parse();
    log::info!("{:?}", argv);
    match run(argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
