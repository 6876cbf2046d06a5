// ============================================================
// Layer 5 — Character N-gram Classifier
// ============================================================
// A per-class character-bigram language model — the smallest
// model that actually exploits how DGA names look.
//
// Why bigrams work on DGA names:
//   Algorithmically generated names ("xqzj3f8h.biz") draw
//   characters near-uniformly, so their adjacent-character
//   pairs are rare in human-registered names ("wikipedia.org")
//   and vice versa. Two bigram frequency tables — one per
//   class — separate the two surprisingly well.
//
// Training:
//   1. Pad each domain as ^domain$ and count its bigrams
//      into the table of its label's class
//   2. Class priors from the label balance of the train set
//   3. Score the validation set and log its accuracy through
//      the advisory channel
//
// Prediction is naive Bayes: the class with the higher
//   log prior + Σ log P(bigram | class)
// wins, with add-one smoothing over the joint bigram
// vocabulary so unseen pairs never zero a product out.
//
// Reference: Jurafsky & Martin ch. 3 (N-gram LMs)
//            Rust Book §8 (HashMaps)

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};

use crate::domain::record::LabeledRecord;
use crate::domain::report::{ConfusionMatrix, MetricReport};
use crate::domain::traits::Classifier;

/// Start / end padding markers around each domain
const START: char = '^';
const END:   char = '$';

/// Bigram counts for one class.
#[derive(Debug, Default)]
struct ClassTable {
    counts: HashMap<(char, char), u64>,
    total:  u64,
}

impl ClassTable {
    fn observe(&mut self, domain: &str) {
        for bigram in bigrams(domain) {
            *self.counts.entry(bigram).or_insert(0) += 1;
            self.total += 1;
        }
    }

    /// Smoothed log-likelihood of one bigram.
    fn log_prob(&self, bigram: (char, char), vocab: usize) -> f64 {
        let count = self.counts.get(&bigram).copied().unwrap_or(0);
        ((count + 1) as f64 / (self.total + vocab as u64) as f64).ln()
    }
}

/// The fitted model: one table per class plus log priors.
#[derive(Debug)]
struct FittedModel {
    dga:         ClassTable,
    legit:       ClassTable,
    dga_prior:   f64,
    legit_prior: f64,
    /// Distinct bigrams across both classes (smoothing denominator)
    vocab:       usize,
}

/// Character-bigram naive Bayes over domain names.
pub struct NgramClassifier {
    model: Option<FittedModel>,
}

impl NgramClassifier {
    pub fn new() -> Self {
        Self { model: None }
    }

    /// Predicted label for one domain, None until trained.
    pub fn predict(&self, domain: &str) -> Option<bool> {
        let model = self.model.as_ref()?;

        let mut dga_score   = model.dga_prior;
        let mut legit_score = model.legit_prior;
        for bigram in bigrams(domain) {
            dga_score   += model.dga.log_prob(bigram, model.vocab);
            legit_score += model.legit.log_prob(bigram, model.vocab);
        }

        // Ties resolve to legitimate
        Some(dga_score > legit_score)
    }
}

impl Default for NgramClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for NgramClassifier {
    fn name(&self) -> &str {
        "ngram"
    }

    fn train(
        &mut self,
        train_set:      &HashSet<LabeledRecord>,
        validation_set: &HashSet<LabeledRecord>,
    ) -> Result<()> {
        if train_set.is_empty() {
            bail!("cannot fit the ngram classifier on an empty train set");
        }

        let mut dga   = ClassTable::default();
        let mut legit = ClassTable::default();
        let mut dga_records = 0u64;

        for record in train_set {
            if record.is_dga {
                dga.observe(&record.domain);
                dga_records += 1;
            } else {
                legit.observe(&record.domain);
            }
        }

        let total = train_set.len() as f64;
        // Add-one on the priors too, so a single-class corpus
        // still yields finite scores
        let dga_prior   = ((dga_records as f64 + 1.0) / (total + 2.0)).ln();
        let legit_prior = ((total - dga_records as f64 + 1.0) / (total + 2.0)).ln();

        let vocab = dga
            .counts
            .keys()
            .chain(legit.counts.keys())
            .collect::<HashSet<_>>()
            .len()
            .max(1);

        self.model = Some(FittedModel { dga, legit, dga_prior, legit_prior, vocab });

        // Validation pass — purely informational
        if !validation_set.is_empty() {
            let correct = validation_set
                .iter()
                .filter(|r| self.predict(&r.domain) == Some(r.is_dga))
                .count();
            tracing::info!(
                "ngram validation accuracy: {:.4} ({}/{})",
                correct as f64 / validation_set.len() as f64,
                correct,
                validation_set.len(),
            );
        }

        Ok(())
    }

    fn test(&mut self, test_set: &HashSet<LabeledRecord>) -> Result<MetricReport> {
        if self.model.is_none() {
            bail!("ngram classifier has not been trained yet");
        }

        let mut matrix = ConfusionMatrix::new();
        for record in test_set {
            // predict() is Some for a fitted model
            let predicted = self.predict(&record.domain).unwrap_or(false);
            matrix.record(record.is_dga, predicted);
        }
        Ok(matrix.report())
    }
}

/// `^domain$`-padded adjacent character pairs, lowercased.
fn bigrams(domain: &str) -> Vec<(char, char)> {
    let lowered = domain.to_lowercase();
    let chars: Vec<char> = std::iter::once(START)
        .chain(lowered.chars())
        .chain(std::iter::once(END))
        .collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn set(records: &[(&str, bool)]) -> HashSet<LabeledRecord> {
        records
            .iter()
            .map(|(d, l)| LabeledRecord::new(*d, *l))
            .collect()
    }

    fn toy_train() -> HashSet<LabeledRecord> {
        set(&[
            ("mail.com", false),
            ("maps.com", false),
            ("main.com", false),
            ("mario.com", false),
            ("xqzj.biz", true),
            ("xqzk.biz", true),
            ("xqzq.biz", true),
            ("xkqz.biz", true),
        ])
    }

    #[test]
    fn test_bigrams_pad_and_lowercase() {
        let grams = bigrams("Ab");
        assert_eq!(grams, vec![('^', 'a'), ('a', 'b'), ('b', '$')]);
    }

    #[test]
    fn test_separates_distinct_alphabets() {
        let mut clf = NgramClassifier::new();
        clf.train(&toy_train(), &HashSet::new()).unwrap();

        assert_eq!(clf.predict("mailing.com"), Some(false));
        assert_eq!(clf.predict("xqzzkj.biz"), Some(true));
    }

    #[test]
    fn test_reports_full_marks_on_separable_corpus() {
        let mut clf = NgramClassifier::new();
        clf.train(&toy_train(), &HashSet::new()).unwrap();

        let test = set(&[("maid.com", false), ("xqzz.biz", true)]);
        let report = clf.test(&test).unwrap();
        assert_eq!(report.get("accuracy"), Some(1.0));
    }

    #[test]
    fn test_untrained_prediction_and_test_fail() {
        let mut clf = NgramClassifier::new();
        assert_eq!(clf.predict("example.com"), None);
        assert!(clf.test(&set(&[("a.com", true)])).is_err());
    }

    #[test]
    fn test_empty_train_set_is_rejected() {
        let mut clf = NgramClassifier::new();
        assert!(clf.train(&HashSet::new(), &HashSet::new()).is_err());
    }
}
