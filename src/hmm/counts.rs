use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{Corpus, Result, Sentence};

/// Outcome -> count, for one conditioning context.
pub(crate) type Table = BTreeMap<String, usize>;

/// Raw frequencies gathered in one pass over a corpus.
///
/// Only lives between the pass and the estimation of an
/// [`HmmModel`](super::HmmModel).
#[derive(Debug, Default)]
pub(crate) struct Counts {
    pub num_sentences: usize,
    pub num_tokens: usize,
    /// first tag of each sentence
    pub initial: Table,
    /// previous tag -> following tag
    pub transitions: BTreeMap<String, Table>,
    /// tag -> token
    pub emissions: BTreeMap<String, Table>,
    /// token -> every tag seen with it
    pub observed: HashMap<String, BTreeSet<String>>,
}

impl Counts {
    pub fn collect(corpus: &Corpus) -> Result<Self> {
        corpus.validate()?;
        Ok(corpus.iter().fold(Self::default(), |mut counts, sentence| {
            counts.add(sentence);
            counts
        }))
    }

    fn add(&mut self, sentence: &Sentence) {
        self.num_sentences += 1;
        let mut prev: Option<&str> = None;
        for (token, tag) in sentence.pairs() {
            /* The first tag has no predecessor; the last one starts no bigram. */
            match prev {
                None => *self.initial.entry(tag.to_string()).or_default() += 1,
                Some(p) => {
                    *self
                        .transitions
                        .entry(p.to_string())
                        .or_default()
                        .entry(tag.to_string())
                        .or_default() += 1
                }
            }
            *self
                .emissions
                .entry(tag.to_string())
                .or_default()
                .entry(token.to_string())
                .or_default() += 1;
            self.observed
                .entry(token.to_string())
                .or_default()
                .insert(tag.to_string());
            self.num_tokens += 1;
            prev = Some(tag);
        }
    }
}
