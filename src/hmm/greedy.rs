use super::{model::HmmModel, Tagger, UNK};
use crate::Result;

/// Baseline tagger: every token independently gets the observed tag
/// with the highest emission probability.
#[derive(Debug, Clone, Copy)]
pub struct GreedyTagger<'a> {
    model: &'a HmmModel,
}

impl<'a> GreedyTagger<'a> {
    pub fn new(model: &'a HmmModel) -> Self {
        Self { model }
    }

    /// Best tag for a single token; `<UNK>` when the token was never seen.
    pub fn tag_token(&self, token: &str) -> &'a str {
        let Some(candidates) = self.model.observed_tags(token) else {
            return UNK;
        };
        let mut best = UNK;
        let mut max_score = f64::NEG_INFINITY;
        /* Candidates iterate in lexicographic order; only a strictly better score wins. */
        for tag in candidates {
            let score = self.model.emission_log_prob(tag, token);
            if max_score < score {
                max_score = score;
                best = tag.as_str();
            }
        }
        best
    }
}

impl<'a> Tagger for GreedyTagger<'a> {
    fn tag<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<String>> {
        Ok(tokens
            .iter()
            .map(|token| self.tag_token(token.as_ref()).to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Corpus;

    fn model(s: &str) -> HmmModel {
        HmmModel::build(&s.parse::<Corpus>().unwrap()).unwrap()
    }

    #[test]
    fn tag() {
        let model = model("The=DET dog=NOUN barks=VERB .=PUNCT");
        let tagger = model.greedy_tagger();
        let tags = tagger.tag(&["The", "dog", "barks", "."]).unwrap();
        assert_eq!(tags, ["DET", "NOUN", "VERB", "PUNCT"]);
    }

    #[test]
    fn unknown_tokens() {
        let model = model("The=DET dog=NOUN barks=VERB .=PUNCT");
        let tags = model.greedy_tagger().tag(&["A", "dog", "runs", "."]).unwrap();
        assert_eq!(tags, [UNK, "NOUN", UNK, "PUNCT"]);
    }

    #[test]
    fn most_frequent_tag_wins() {
        let model = model("the=DET run=NOUN\nI=PRON run=VERB\nwe=PRON run=VERB");
        assert_eq!(model.greedy_tagger().tag_token("run"), "VERB");
    }

    #[test]
    fn ties_break_lexicographically() {
        /* NOUN and VERB give "run" exactly the same probability. */
        let corpus = "I=PRON run=VERB\nI=PRON walk=VERB\nthe=DET run=NOUN\nthe=DET walk=NOUN";
        let model = model(corpus);
        assert_eq!(
            model.emission("NOUN").unwrap().log_prob("run"),
            model.emission("VERB").unwrap().log_prob("run")
        );
        assert_eq!(model.greedy_tagger().tag_token("run"), "NOUN");

        /* One more VERB observation breaks the tie. */
        let model = self::model(&format!("{corpus}\nI=PRON run=VERB"));
        assert_eq!(model.greedy_tagger().tag_token("run"), "VERB");
    }

    #[test]
    fn empty_input() {
        let model = model("Hi=INTJ");
        let tokens: [&str; 0] = [];
        assert!(model.greedy_tagger().tag(&tokens).unwrap().is_empty());
    }

    #[test]
    fn idempotent() {
        let model = model("The=DET dog=NOUN barks=VERB .=PUNCT\nA=DET bark=NOUN");
        let tagger = model.greedy_tagger();
        let tokens = ["A", "dog", "bark", "loudly"];
        assert_eq!(tagger.tag(&tokens).unwrap(), tagger.tag(&tokens).unwrap());
    }
}
