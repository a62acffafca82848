//! Part-of-speech tagging with a first-order hidden Markov model.
//!
//! A [`HmmModel`] is estimated once from a tagged [`Corpus`] and is read-only
//! afterwards. Two taggers borrow it: [`GreedyTagger`] picks the best tag of
//! every token on its own, [`ViterbiTagger`] finds the best tag sequence.
//!
//! ```
//! use hmmpos::{hmm, Corpus};
//!
//! let corpus: Corpus = "The=DET dog=NOUN barks=VERB .=PUNCT".parse().unwrap();
//! let model = hmm::build(&corpus).unwrap();
//! let tags = hmm::tag_viterbi(&model, &["The", "dog", "barks"]).unwrap();
//! assert_eq!(tags, ["DET", "NOUN", "VERB"]);
//! ```

pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod hmm;
pub mod quark;

pub use dataset::{Corpus, Sentence};
pub use error::{Error, Result};
pub use evaluation::{Estimation, Evaluation};
pub use hmm::{
    Distribution, GreedyTagger, HmmModel, HmmOptions, Path, StateSpace, Tagger, ViterbiTagger,
    UNK,
};
