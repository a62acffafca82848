use super::{model::HmmModel, Tagger, UNK};
use crate::{Error, Result};

/// Best tag sequence found for one input.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Reported tags: `<UNK>` at every position whose token was never seen in training.
    pub labels: Vec<String>,
    /// States the path actually went through; transitions are scored on these.
    pub states: Vec<String>,
    /// Log-probability of the path.
    pub score: f64,
}

/// Sequence decoder over the model's state space.
#[derive(Debug, Clone)]
pub struct ViterbiTagger<'a> {
    model: &'a HmmModel,
    /// Number of decodable states (L).
    num_labels: usize,
    /**
     * Initial scores.
     *  This is a [L] vector whose element [l] is the log-probability of a
     *  sentence starting with label #l.
     */
    init: Vec<f64>,
    /**
     * Transition scores.
     *  This is a [L][L] matrix whose element [i][j] is the log-probability
     *  of label #j following label #i.
     */
    trans: Vec<f64>,
}

#[allow(non_snake_case)]
impl<'a> ViterbiTagger<'a> {
    pub fn new(model: &'a HmmModel) -> Self {
        let states = model.states();
        let L = states.len();
        let init = states.iter().map(|s| model.initial().log_prob(s)).collect();
        let mut trans = vec![0.0; L * L];
        for (i, prev) in states.iter().enumerate() {
            for (j, next) in states.iter().enumerate() {
                trans[L * i + j] = model.transition_log_prob(prev, next);
            }
        }
        Self {
            model,
            num_labels: L,
            init,
            trans,
        }
    }

    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    pub fn decode<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Path> {
        let T = tokens.len();
        let L = self.num_labels;
        if T == 0 {
            return Err(Error::EmptyInput);
        }
        if L == 0 {
            return Err(Error::UndecodableState);
        }
        let names = self.model.states();

        /*
         * Emission scores.
         *  This is a [T][L] matrix whose element [t][l] is the log-probability
         *  of label #l emitting the token at #t.
         */
        let mut state = vec![0.0; T * L];
        for (t, token) in tokens.iter().enumerate() {
            for (l, name) in names.iter().enumerate() {
                state[L * t + l] = self.model.emission_log_prob(name, token.as_ref());
            }
        }

        /* Best score of a path arriving at (t, l), and the label at t-1 it came from. */
        let mut score = vec![0.0; T * L];
        let mut backward_edge = vec![0usize; T * L];

        /* Compute the scores at (0, *). */
        for j in 0..L {
            score[j] = self.init[j] + state[j];
        }
        /* Compute the scores at (t, *). */
        for t in 1..T {
            for j in 0..L {
                let mut max_score = f64::NEG_INFINITY;
                let mut argmax_score = 0;
                for i in 0..L {
                    /* Transit from (t-1, i) to (t, j). */
                    let s = score[L * (t - 1) + i] + self.trans[L * i + j];
                    /* Ties keep the smallest label id, i.e. the lexicographically first tag. */
                    if max_score < s {
                        max_score = s;
                        argmax_score = i;
                    }
                }
                backward_edge[L * t + j] = argmax_score;
                score[L * t + j] = max_score + state[L * t + j];
            }
        }

        /* Find the node (T-1, i) with the maximum score. */
        let mut labels = vec![0usize; T];
        let mut max_score = f64::NEG_INFINITY;
        for i in 0..L {
            let s = score[L * (T - 1) + i];
            if max_score < s {
                max_score = s;
                labels[T - 1] = i;
            }
        }
        /* Tag labels by tracing the backward links. */
        for t in (0..T - 1).rev() {
            labels[t] = backward_edge[L * (t + 1) + labels[t + 1]];
        }

        let states = labels
            .iter()
            .map(|&l| names.to_str(l).map(String::from).ok_or(Error::UndecodableState))
            .collect::<Result<Vec<String>>>()?;
        let labels = tokens
            .iter()
            .zip(&states)
            .map(|(token, s)| {
                if self.model.is_known(token.as_ref()) {
                    s.clone()
                } else {
                    UNK.to_string()
                }
            })
            .collect();
        log::debug!("viterbi (T: {T}, L: {L}) score: {max_score}");
        Ok(Path {
            labels,
            states,
            score: max_score,
        })
    }
}

impl<'a> Tagger for ViterbiTagger<'a> {
    fn tag<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<String>> {
        Ok(self.decode(tokens)?.labels)
    }
}
