use std::{
    convert::TryFrom,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use crate::{hmm::UNK, Error, Result};

/// A training sentence: tokens with their gold tags, position by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sentence {
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
}

impl Sentence {
    pub fn push(&mut self, token: impl Into<String>, tag: impl Into<String>) {
        self.tokens.push(token.into());
        self.tags.push(tag.into());
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens
            .iter()
            .zip(&self.tags)
            .map(|(token, tag)| (token.as_str(), tag.as_str()))
    }
}

impl<T: Into<String>, L: Into<String>> FromIterator<(T, L)> for Sentence {
    fn from_iter<I: IntoIterator<Item = (T, L)>>(iter: I) -> Self {
        let mut sentence = Sentence::default();
        for (token, tag) in iter {
            sentence.push(token, tag);
        }
        sentence
    }
}

/// Ordered collection of tagged sentences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pub sentences: Vec<Sentence>,
}

impl Corpus {
    /// Reads `token=tag` items, one sentence per line. Blank lines are skipped.
    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let mut corpus = Corpus::default();
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            let sentence = parse_line(&line).map_err(|e| match e {
                Error::InvalidCorpus(msg) => Error::InvalidCorpus(format!("line {}: {msg}", n + 1)),
                e => e,
            })?;
            if !sentence.is_empty() {
                corpus.push(sentence);
            }
        }
        log::info!(
            "read corpus (sentences: {}, tokens: {})",
            corpus.len(),
            corpus.total_items()
        );
        Ok(corpus)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path)?;
        Self::try_from(f)
    }

    pub fn push(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }

    pub fn max_length(&self) -> usize {
        self.sentences.iter().map(|x| x.len()).max().unwrap_or_default()
    }

    pub fn total_items(&self) -> usize {
        self.sentences.iter().map(|x| x.len()).sum()
    }

    /// Checks the shape the estimator relies on: at least one sentence,
    /// no empty sentence, no empty token or tag, and no use of the
    /// reserved `<UNK>` tag.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidCorpus("no sentences".into()));
        }
        for (i, sentence) in self.iter().enumerate() {
            if sentence.is_empty() {
                return Err(Error::InvalidCorpus(format!("sentence {i} is empty")));
            }
            if sentence.tokens.len() != sentence.tags.len() {
                return Err(Error::InvalidCorpus(format!(
                    "sentence {i} has {} tokens but {} tags",
                    sentence.tokens.len(),
                    sentence.tags.len()
                )));
            }
            for (j, (token, tag)) in sentence.pairs().enumerate() {
                if token.is_empty() || tag.is_empty() {
                    return Err(Error::InvalidCorpus(format!(
                        "sentence {i}, item {j}: missing token or tag"
                    )));
                }
                if tag == UNK {
                    return Err(Error::InvalidCorpus(format!(
                        "sentence {i}, item {j}: tag {UNK} is reserved"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}

impl FromIterator<Sentence> for Corpus {
    fn from_iter<I: IntoIterator<Item = Sentence>>(iter: I) -> Self {
        Self {
            sentences: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<File> for Corpus {
    type Error = Error;

    fn try_from(value: File) -> Result<Self> {
        Self::read(BufReader::new(value))
    }
}

impl FromStr for Corpus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::read(s.as_bytes())
    }
}

/* The pair is split at the last '=' so that a token such as "=" survives. */
fn parse_line(line: &str) -> Result<Sentence> {
    let mut sentence = Sentence::default();
    for item in line.split_whitespace() {
        match item.rsplit_once('=') {
            Some((token, tag)) if !token.is_empty() && !tag.is_empty() => {
                sentence.push(token, tag)
            }
            _ => {
                return Err(Error::InvalidCorpus(format!(
                    "malformed item {item:?}, expected token=tag"
                )))
            }
        }
    }
    Ok(sentence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_lines() {
        let s = "The=DET dog=NOUN barks=VERB .=PUNCT\n\n  A=DET cat=NOUN  \n";
        let corpus: Corpus = s.parse().unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.total_items(), 6);
        assert_eq!(corpus.max_length(), 4);
        assert_eq!(corpus.sentences[0].tags, ["DET", "NOUN", "VERB", "PUNCT"]);
        assert_eq!(corpus.sentences[1].tokens, ["A", "cat"]);
    }

    #[test]
    fn token_with_equals_sign() {
        let corpus: Corpus = "x=NOUN ==PUNCT a=b=X".parse().unwrap();
        let pairs: Vec<_> = corpus.sentences[0].pairs().collect();
        assert_eq!(pairs, [("x", "NOUN"), ("=", "PUNCT"), ("a=b", "X")]);
    }

    #[test]
    fn malformed_item_reports_line() {
        let ret = "a=DET\nb=NOUN c\n".parse::<Corpus>();
        match ret {
            Err(Error::InvalidCorpus(msg)) => assert!(msg.starts_with("line 2"), "{msg}"),
            _ => panic!("test fail"),
        }
        assert!(matches!("a=".parse::<Corpus>(), Err(Error::InvalidCorpus(..))));
        assert!(matches!("=DET".parse::<Corpus>(), Err(Error::InvalidCorpus(..))));
    }

    #[test]
    fn validate() {
        assert!(matches!(Corpus::default().validate(), Err(Error::InvalidCorpus(..))));

        let mut corpus = Corpus::default();
        corpus.push([("a", "DET")].into_iter().collect());
        assert!(corpus.validate().is_ok());

        corpus.push(Sentence::default());
        assert!(matches!(corpus.validate(), Err(Error::InvalidCorpus(..))));

        let corpus: Corpus = [[("a", "")].into_iter().collect::<Sentence>()]
            .into_iter()
            .collect();
        assert!(matches!(corpus.validate(), Err(Error::InvalidCorpus(..))));

        let corpus: Corpus = "a=<UNK>".parse().unwrap();
        assert!(matches!(corpus.validate(), Err(Error::InvalidCorpus(..))));
    }
}
