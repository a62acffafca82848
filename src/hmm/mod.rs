mod counts;
pub mod greedy;
pub mod model;
pub mod options;
pub mod viterbi;

pub use greedy::GreedyTagger;
pub use model::{Distribution, HmmModel};
pub use options::{HmmOptions, StateSpace};
pub use viterbi::{Path, ViterbiTagger};

use crate::{Corpus, Result};

/// Tag reported for tokens never seen in training.
pub const UNK: &str = "<UNK>";

pub trait Tagger {
    /// Tags `tokens`, one output tag per input token.
    fn tag<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<String>>;
}

/// Estimates a model from `corpus` with the default options.
pub fn build(corpus: &Corpus) -> Result<HmmModel> {
    HmmModel::build(corpus)
}

pub fn tag_greedy<S: AsRef<str>>(model: &HmmModel, tokens: &[S]) -> Result<Vec<String>> {
    model.greedy_tagger().tag(tokens)
}

pub fn tag_viterbi<S: AsRef<str>>(model: &HmmModel, tokens: &[S]) -> Result<Vec<String>> {
    model.viterbi_tagger().tag(tokens)
}
