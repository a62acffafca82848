use std::{collections::BTreeMap, fmt::Display, iter::zip};

use serde::Serialize;

/// Label-wise performance values.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LabelMeasure {
    /// Number of correct predictions.
    pub num_correct: usize,
    /// Number of occurrences of the label in the gold-standard data.
    pub num_observation: usize,
    /// Number of predictions.
    pub num_prediction: usize,
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

impl LabelMeasure {
    fn compute(&mut self) {
        self.precision = 0.0;
        self.recall = 0.0;
        self.fmeasure = 0.0;
        if self.num_prediction > 0 {
            self.precision = self.num_correct as f64 / self.num_prediction as f64;
        }
        if self.num_observation > 0 {
            self.recall = self.num_correct as f64 / self.num_observation as f64;
        }
        if self.precision + self.recall > 0.0 {
            self.fmeasure = self.precision * self.recall * 2.0 / (self.precision + self.recall);
        }
    }
}

/// Accumulates tagging results against gold tags, sentence by sentence.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Evaluation {
    /// Label-wise evaluations, by tag.
    labels: BTreeMap<String, LabelMeasure>,
    /// Number of correctly predicted items.
    item_total_correct: usize,
    /// Total number of items.
    item_total_num: usize,
    /// Number of correctly predicted instances.
    inst_total_correct: usize,
    /// Total number of instances.
    inst_total_num: usize,
}

/// Summary of an [`Evaluation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimation {
    pub item_accuracy: f64,
    pub inst_accuracy: f64,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_fmeasure: f64,
}

impl Evaluation {
    pub fn accumulate<R: AsRef<str>, P: AsRef<str>>(&mut self, reference: &[R], prediction: &[P]) {
        if reference.len() != prediction.len() {
            log::warn!(
                "length mismatch: {} reference vs {} predicted labels",
                reference.len(),
                prediction.len()
            );
        }
        let mut matched = 0;
        for (r, p) in zip(reference, prediction) {
            let (r, p) = (r.as_ref(), p.as_ref());
            self.labels.entry(r.to_string()).or_default().num_observation += 1;
            self.labels.entry(p.to_string()).or_default().num_prediction += 1;
            if r == p {
                self.labels.entry(r.to_string()).or_default().num_correct += 1;
                matched += 1;
            }
            self.item_total_num += 1;
        }
        self.item_total_correct += matched;

        if matched == reference.len() && matched == prediction.len() {
            self.inst_total_correct += 1;
        }
        self.inst_total_num += 1;
    }

    /// Computes label-wise and overall scores. Macro averages run over the
    /// labels present in the gold data.
    pub fn evaluate(&mut self) -> Estimation {
        let mut macro_precision = 0.0;
        let mut macro_recall = 0.0;
        let mut macro_fmeasure = 0.0;
        let mut num_labels = 0;
        for lev in self.labels.values_mut() {
            lev.compute();
            if lev.num_observation == 0 {
                continue;
            }
            macro_precision += lev.precision;
            macro_recall += lev.recall;
            macro_fmeasure += lev.fmeasure;
            num_labels += 1;
        }
        let ratio = |a: f64, b: usize| if b > 0 { a / b as f64 } else { 0.0 };
        Estimation {
            item_accuracy: ratio(self.item_total_correct as f64, self.item_total_num),
            inst_accuracy: ratio(self.inst_total_correct as f64, self.inst_total_num),
            macro_precision: ratio(macro_precision, num_labels),
            macro_recall: ratio(macro_recall, num_labels),
            macro_fmeasure: ratio(macro_fmeasure, num_labels),
        }
    }

    pub fn label(&self, tag: &str) -> Option<&LabelMeasure> {
        self.labels.get(tag)
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut this = self.clone();
        let est = this.evaluate();
        writeln!(f, "Performance by label (#match, #model, #ref) (precision, recall, F1):")?;
        for (label, lev) in &this.labels {
            if lev.num_observation == 0 {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) (******, ******, ******)",
                    label, lev.num_correct, lev.num_prediction, lev.num_observation
                )?;
            } else {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})",
                    label,
                    lev.num_correct,
                    lev.num_prediction,
                    lev.num_observation,
                    lev.precision,
                    lev.recall,
                    lev.fmeasure
                )?;
            }
        }
        writeln!(
            f,
            "Macro-average precision, recall, F1: ({:.6}, {:.6}, {:.6})",
            est.macro_precision, est.macro_recall, est.macro_fmeasure
        )?;
        writeln!(
            f,
            "Item accuracy: {} / {} ({:.4})",
            self.item_total_correct, self.item_total_num, est.item_accuracy
        )?;
        writeln!(
            f,
            "Instance accuracy: {} / {} ({:.4})",
            self.inst_total_correct, self.inst_total_num, est.inst_accuracy
        )
    }
}
