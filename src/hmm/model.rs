use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    io::Write,
    time::Instant,
};

use serde::Serialize;

use super::{
    counts::{Counts, Table},
    greedy::GreedyTagger,
    options::{HmmOptions, StateSpace},
    viterbi::ViterbiTagger,
    UNK,
};
use crate::{quark::Quark, Corpus, Error, Result};

/// Additively smoothed log-probability distribution of one context.
///
/// For a context with `N` observations over `V` distinct outcomes,
/// an outcome seen `c` times gets `ln((c + k) / (N + k * (V + 1)))` and
/// every unseen outcome shares the sentinel value `ln(k / (N + k * (V + 1)))`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    log_probs: BTreeMap<String, f64>,
    unknown: f64,
}

impl Distribution {
    /// Fails with [`Error::InvalidParameter`] when `k` is so large or so small
    /// for this context that a log-probability would not be finite.
    pub(crate) fn estimate(counts: &Table, k: f64) -> Result<Self> {
        let n: usize = counts.values().sum();
        let v = counts.len();
        let denom = n as f64 + k * (v as f64 + 1.0);
        let unknown = (k / denom).ln();
        if !(denom.is_finite() && unknown.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "smoothing {k} is out of range for {n} observations of {v} outcomes"
            )));
        }
        let log_probs = counts
            .iter()
            .map(|(x, &c)| (x.clone(), ((c as f64 + k) / denom).ln()))
            .collect();
        Ok(Self { log_probs, unknown })
    }

    /// Log-probability of an observed outcome.
    pub fn get(&self, x: &str) -> Option<f64> {
        self.log_probs.get(x).copied()
    }

    /// Log-probability of any outcome, unseen ones falling back to the sentinel entry.
    #[inline]
    pub fn log_prob(&self, x: &str) -> f64 {
        self.get(x).unwrap_or(self.unknown)
    }

    /// The sentinel (`<UNK>`) entry.
    #[inline]
    pub fn unknown(&self) -> f64 {
        self.unknown
    }

    /// Number of observed outcomes, the sentinel excluded.
    pub fn len(&self) -> usize {
        self.log_probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log_probs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.log_probs.iter().map(|(x, &p)| (x.as_str(), p))
    }

    /// Probability mass of the observed outcomes plus the sentinel; ~1.
    pub fn total_mass(&self) -> f64 {
        self.iter().map(|(_, p)| p.exp()).sum::<f64>() + self.unknown.exp()
    }
}

/// Trained hidden Markov model: states are tags, emissions are tokens.
///
/// Immutable once built; taggers borrow it.
#[derive(Debug, Clone)]
pub struct HmmModel {
    options: HmmOptions,
    initial: Distribution,
    transitions: BTreeMap<String, Distribution>,
    emissions: BTreeMap<String, Distribution>,
    /* Scores transitions out of a tag that never preceded another one. */
    orphan: Distribution,
    observed: HashMap<String, BTreeSet<String>>,
    tags: Quark,
    states: Quark,
    num_sentences: usize,
    num_tokens: usize,
}

impl HmmModel {
    pub fn build(corpus: &Corpus) -> Result<Self> {
        Self::build_with(corpus, HmmOptions::default())
    }

    pub fn build_with(corpus: &Corpus, options: HmmOptions) -> Result<Self> {
        options.validate()?;
        let begin = Instant::now();
        let counts = Counts::collect(corpus)?;
        let model = Self::estimate(counts, options)?;
        log::info!(
            "estimated model (sentences: {}, tokens: {}, vocabulary: {}, tags: {}, states: {}, k: {}), time cost: {:?}",
            model.num_sentences,
            model.num_tokens,
            model.observed.len(),
            model.tags.len(),
            model.states.len(),
            model.options.smoothing,
            begin.elapsed()
        );
        Ok(model)
    }

    fn estimate(counts: Counts, options: HmmOptions) -> Result<Self> {
        let k = options.smoothing;
        let estimate_all = |tables: &BTreeMap<String, Table>| -> Result<BTreeMap<String, Distribution>> {
            tables
                .iter()
                .map(|(ctx, table)| -> Result<(String, Distribution)> {
                    Ok((ctx.clone(), Distribution::estimate(table, k)?))
                })
                .collect()
        };
        let transitions = estimate_all(&counts.transitions)?;
        let emissions = estimate_all(&counts.emissions)?;

        /* Every tag emits, and map keys come out sorted, so ids follow tag order. */
        let tags: Quark = emissions.keys().cloned().collect();
        let states: Quark = match options.state_space {
            StateSpace::Predecessors => transitions.keys().cloned().collect(),
            StateSpace::AllTags => tags.clone(),
        };
        let excluded: Vec<&str> = tags.iter().filter(|t| !states.contains(t)).collect();
        if !excluded.is_empty() {
            log::warn!(
                "tags never followed by another tag cannot be decoded (state_space: {}): {:?}",
                options.state_space,
                excluded
            );
        }

        Ok(Self {
            initial: Distribution::estimate(&counts.initial, k)?,
            transitions,
            emissions,
            orphan: Distribution::estimate(&Table::new(), k)?,
            observed: counts.observed,
            tags,
            states,
            num_sentences: counts.num_sentences,
            num_tokens: counts.num_tokens,
            options,
        })
    }

    pub fn options(&self) -> &HmmOptions {
        &self.options
    }

    /// Distribution of the first tag of a sentence.
    pub fn initial(&self) -> &Distribution {
        &self.initial
    }

    /// Distribution of the tag following `prev`, if `prev` ever had a successor.
    pub fn transition(&self, prev: &str) -> Option<&Distribution> {
        self.transitions.get(prev)
    }

    /// Distribution of the tokens emitted by `tag`.
    pub fn emission(&self, tag: &str) -> Option<&Distribution> {
        self.emissions.get(tag)
    }

    /// Every tag `token` carried in training, in lexicographic order.
    pub fn observed_tags(&self, token: &str) -> Option<&BTreeSet<String>> {
        self.observed.get(token)
    }

    pub fn is_known(&self, token: &str) -> bool {
        self.observed.contains_key(token)
    }

    /// All training tags, ids in lexicographic order.
    pub fn tags(&self) -> &Quark {
        &self.tags
    }

    /// Tags the Viterbi decoder can assign, ids in lexicographic order.
    pub fn states(&self) -> &Quark {
        &self.states
    }

    pub fn num_sentences(&self) -> usize {
        self.num_sentences
    }

    pub fn num_tokens(&self) -> usize {
        self.num_tokens
    }

    pub fn vocabulary_size(&self) -> usize {
        self.observed.len()
    }

    pub(crate) fn transition_log_prob(&self, prev: &str, next: &str) -> f64 {
        self.transitions.get(prev).unwrap_or(&self.orphan).log_prob(next)
    }

    pub(crate) fn emission_log_prob(&self, tag: &str, token: &str) -> f64 {
        self.emissions.get(tag).unwrap_or(&self.orphan).log_prob(token)
    }

    pub fn greedy_tagger(&self) -> GreedyTagger<'_> {
        GreedyTagger::new(self)
    }

    pub fn viterbi_tagger(&self) -> ViterbiTagger<'_> {
        ViterbiTagger::new(self)
    }

    /// Writes the probability tables in a plain-text format.
    pub fn dump<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        writeln!(w, "OPTIONS = {{")?;
        writeln!(w, "  smoothing: {}", self.options.smoothing)?;
        writeln!(w, "  state_space: {}", self.options.state_space)?;
        writeln!(w, "}}\n")?;

        writeln!(w, "INITIAL = {{")?;
        dump_distribution(&mut w, &self.initial)?;
        writeln!(w, "}}\n")?;

        writeln!(w, "TRANSITIONS = {{")?;
        for (prev, dist) in &self.transitions {
            writeln!(w, "  {prev} -> {{")?;
            dump_distribution(&mut w, dist)?;
            writeln!(w, "  }}")?;
        }
        writeln!(w, "}}\n")?;

        writeln!(w, "EMISSIONS = {{")?;
        for (tag, dist) in &self.emissions {
            writeln!(w, "  {tag} -> {{")?;
            dump_distribution(&mut w, dist)?;
            writeln!(w, "  }}")?;
        }
        writeln!(w, "}}\n")?;

        writeln!(w, "STATES = {:?}", self.states.iter().collect::<Vec<_>>())
    }
}

fn dump_distribution<W: Write>(w: &mut W, dist: &Distribution) -> std::io::Result<()> {
    for (x, p) in dist.iter() {
        writeln!(w, "    {x:?}: {p:.6}")?;
    }
    writeln!(w, "    {UNK}: {:.6}", dist.unknown())
}
