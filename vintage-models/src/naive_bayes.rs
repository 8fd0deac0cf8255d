#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use vintage_core::{
    encode, laplace_log_prob, read_document, Bow, Corpus, Float, Result, Token, VintageError,
    Vocabulary,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Label pair used by [`NaiveBayes::default`]: the two publication years
/// the stock corpus distinguishes.
pub const DEFAULT_LABELS: [&str; 2] = ["2016", "2020"];

/// One training document after encoding: its label (as an index into the
/// configured label pair) and its bag-of-words.
///
/// Records exist only during fitting; the trained [`Model`] keeps the
/// aggregated statistics, not the records themselves.
#[derive(Debug, Clone)]
struct LabeledRecord {
    label: usize,
    bow: Bow,
}

/// Laplace-smoothed log-likelihood table for one label: every vocabulary
/// word plus the out-of-vocabulary sentinel, over a shared denominator.
///
/// With vocabulary size `V`, the table covers `V + 1` outcomes and the
/// smoothed probabilities sum to 1 (a proper multinomial distribution).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodTable {
    words: HashMap<String, Float>,
    unknown: Float,
}

impl LikelihoodTable {
    /// Log-probability of `token` under this label.
    ///
    /// Returns `None` only for a vocabulary word missing from the table,
    /// which cannot happen when the bag-of-words was encoded with the same
    /// vocabulary the table was trained on.
    pub fn log_prob(&self, token: &Token) -> Option<Float> {
        match token {
            Token::Word(word) => self.words.get(word).copied(),
            Token::Unknown => Some(self.unknown),
        }
    }

    /// Log-probability of a vocabulary word, `None` if the word is not in
    /// the table.
    pub fn word_log_prob(&self, word: &str) -> Option<Float> {
        self.words.get(word).copied()
    }

    /// Log-probability of the out-of-vocabulary sentinel.
    pub fn unknown_log_prob(&self) -> Float {
        self.unknown
    }

    /// Number of outcomes covered: vocabulary size plus the sentinel.
    pub fn outcomes(&self) -> usize {
        self.words.len() + 1
    }
}

/// The trained artifact of the classifier.
///
/// A model holds everything classification needs and nothing training
/// needed along the way:
///
/// - the label pair,
/// - the vocabulary the bag-of-words encoder must use,
/// - the smoothed log-prior per label,
/// - one [`LikelihoodTable`] per label.
///
/// Models are read-only: once constructed by [`NaiveBayes::fit`] they are
/// never mutated, so sharing one across readers is safe.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    labels: [String; 2],
    vocabulary: Vocabulary,
    log_prior: [Float; 2],
    likelihoods: [LikelihoodTable; 2],
}

impl Model {
    /// The configured label pair, in score order.
    pub fn labels(&self) -> &[String; 2] {
        &self.labels
    }

    /// The vocabulary the model was trained over.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Smoothed log-priors, aligned with [`labels`](Model::labels).
    pub fn log_priors(&self) -> [Float; 2] {
        self.log_prior
    }

    /// Likelihood table for the label at `index` (0 or 1).
    pub fn likelihood(&self, index: usize) -> &LikelihoodTable {
        &self.likelihoods[index]
    }

    /// Scores a document (given as its raw word stream) against both
    /// labels and picks the higher-scoring one.
    ///
    /// # Algorithm
    ///
    /// 1. Start each label's score at its log-prior.
    /// 2. Encode the document into a bag-of-words with the model's own
    ///    vocabulary.
    /// 3. For every `(token, count)` entry, add
    ///    `count × log P(token | label)` to each label's score.
    /// 4. Predict label 0 iff its score is strictly greater; an exact tie
    ///    resolves to label 1.
    ///
    /// An empty document therefore scores exactly the log-priors, and a
    /// document of only out-of-vocabulary words shifts both scores by the
    /// occurrence count times the respective unknown log-likelihood.
    ///
    /// # Errors
    ///
    /// - [`VintageError::InternalError`] if a bag-of-words token is missing
    ///   from a likelihood table. This indicates the bag-of-words was built
    ///   against a different vocabulary than the model's: a caller
    ///   contract violation, not a recoverable condition.
    ///
    /// # Complexity
    ///
    /// Let `t` = tokens in the document, `V` = vocabulary size.
    /// - Time: `O(t log V)` (vocabulary lookup per token, then `O(1)` per
    ///   distinct token and label).
    /// - Space: `O(min(t, V))` for the bag-of-words.
    pub fn classify(&self, lines: &[String]) -> Result<Classification> {
        let mut scores = self.log_prior;
        let bow = encode(&self.vocabulary, lines);

        for (token, &count) in &bow {
            for (side, score) in scores.iter_mut().enumerate() {
                let log_prob = self.likelihoods[side]
                    .log_prob(token)
                    .ok_or(VintageError::InternalError)?;
                *score += count as Float * log_prob;
            }
        }

        // Only a strictly greater score selects the first label.
        let predicted = if scores[0] > scores[1] { 0 } else { 1 };

        Ok(Classification {
            labels: self.labels.clone(),
            log_posterior: scores,
            predicted,
        })
    }

    /// Reads the document at `path` and classifies it.
    ///
    /// # Errors
    ///
    /// - [`VintageError::Io`] if the file cannot be read.
    /// - [`VintageError::Decode`] if it is not valid UTF-8.
    /// - Anything [`classify`](Model::classify) can return.
    pub fn classify_file(&self, path: impl AsRef<Path>) -> Result<Classification> {
        let lines = read_document(path)?;
        self.classify(&lines)
    }
}

/// Outcome of classifying one document: the predicted label and the
/// log-posterior score the document received under each label.
///
/// Computed fresh per [`Model::classify`] call; never persisted.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    labels: [String; 2],
    log_posterior: [Float; 2],
    predicted: usize,
}

impl Classification {
    /// Index (0 or 1) of the predicted label.
    pub fn predicted_index(&self) -> usize {
        self.predicted
    }

    /// Name of the predicted label.
    pub fn predicted_label(&self) -> &str {
        &self.labels[self.predicted]
    }

    /// The label pair the scores refer to.
    pub fn labels(&self) -> &[String; 2] {
        &self.labels
    }

    /// Log-posterior scores, aligned with [`labels`](Classification::labels).
    pub fn log_posteriors(&self) -> [Float; 2] {
        self.log_posterior
    }

    /// Log-posterior score under `label`, `None` if `label` is not one of
    /// the pair.
    pub fn log_posterior(&self, label: &str) -> Option<Float> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.log_posterior[i])
    }
}

/// Binary **Naive Bayes** text classifier over bag-of-words features.
///
/// Documents are word streams (one token per line); training data is a
/// [`Corpus`] holding one document collection per label. The classifier is
/// fixed to exactly two labels, configured at construction.
///
/// # Algorithm
///
/// **Training** ([`fit`](NaiveBayes::fit)):
/// 1. Build the vocabulary: every word occurring at least `cutoff` times
///    corpus-wide, sorted and deduplicated.
/// 2. Encode every document into a bag-of-words; words outside the
///    vocabulary collapse into the out-of-vocabulary sentinel.
/// 3. Estimate smoothed log-priors from per-label document counts:
///
/// ```text
/// log P(label) = ln((n_label + 1) / (n_total + 2))
/// ```
///
/// 4. Estimate per-label smoothed log-likelihoods over the `V + 1`
///    outcomes (vocabulary words plus the sentinel):
///
/// ```text
/// log P(w | label) = ln((count_w + 1) / (total_words + V + 1))
/// ```
///
/// **Prediction** ([`predict`](NaiveBayes::predict)): sum each label's
/// log-prior and the log-likelihoods of the document's tokens, weighted by
/// occurrence count; the higher score wins. Ties resolve to the second
/// label.
///
/// # Degenerate corpora
///
/// A label with zero documents does not fail training: smoothing keeps
/// every probability finite, and the resulting model simply favors the
/// populated label. Only a corpus with no documents under *either*
/// configured label is rejected.
///
/// # Example
///
/// ```rust
/// use vintage_core::MemoryCorpus;
/// use vintage_models::NaiveBayes;
///
/// let mut corpus = MemoryCorpus::new();
/// corpus.add_document("2016", &["rio", "olympics"]);
/// corpus.add_document("2020", &["tokyo", "olympics"]);
///
/// let mut model = NaiveBayes::default();
/// model.fit(&corpus).unwrap();
///
/// let result = model.predict(&["rio".to_string()]).unwrap();
/// assert_eq!(result.predicted_label(), "2016");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    labels: [String; 2],
    cutoff: usize,
    model: Option<Model>,
}

impl Default for NaiveBayes {
    fn default() -> Self {
        Self::new(DEFAULT_LABELS[0], DEFAULT_LABELS[1], 1)
    }
}

impl NaiveBayes {
    /// Creates a new, unfitted classifier for the given label pair.
    ///
    /// # Parameters
    ///
    /// - `label_a`, `label_b`: The two labels. Order matters for
    ///   tie-breaking (an exact score tie predicts `label_b`) but not for
    ///   the math.
    /// - `cutoff`: Minimum corpus-wide occurrence count for a word to enter
    ///   the vocabulary. Must be at least 1.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let model = NaiveBayes::new("2016", "2020", 2);
    /// ```
    pub fn new(label_a: impl Into<String>, label_b: impl Into<String>, cutoff: usize) -> Self {
        Self {
            labels: [label_a.into(), label_b.into()],
            cutoff,
            model: None,
        }
    }

    /// Trains the classifier on `corpus`.
    ///
    /// Builds the vocabulary over *all* labels present in the corpus, then
    /// loads labeled records for the two configured labels only, and
    /// estimates priors and both likelihood tables. Collections under
    /// other labels contribute words to the vocabulary but no records.
    ///
    /// # Errors
    ///
    /// - [`VintageError::InvalidHyperparameter`] if `cutoff == 0` or the
    ///   two configured labels are equal.
    /// - [`VintageError::EmptyTrainingData`] if neither configured label
    ///   has any documents.
    /// - Any I/O or decode error from the corpus provider; no partial
    ///   model is stored on failure.
    ///
    /// # Complexity
    ///
    /// Let `T` = total tokens in the corpus, `V` = vocabulary size,
    /// `n` = number of documents.
    /// - Time: `O(T log V + V)` (vocabulary lookup per token, one smoothed
    ///   probability per vocabulary word and label).
    /// - Space: `O(V + n)` beyond the documents themselves.
    pub fn fit<C: Corpus>(&mut self, corpus: &C) -> Result<()> {
        if self.labels[0] == self.labels[1] {
            return Err(VintageError::InvalidHyperparameter {
                name: "labels".into(),
                value: self.labels[0].clone(),
            });
        }

        let vocabulary = Vocabulary::build(corpus, self.cutoff)?;
        let records = load_records(corpus, &vocabulary, &self.labels)?;
        if records.is_empty() {
            return Err(VintageError::EmptyTrainingData);
        }

        let log_prior = log_priors(&records);
        let likelihoods = [
            word_likelihoods(&vocabulary, &records, 0),
            word_likelihoods(&vocabulary, &records, 1),
        ];

        self.model = Some(Model {
            labels: self.labels.clone(),
            vocabulary,
            log_prior,
            likelihoods,
        });
        Ok(())
    }

    /// The trained model, `None` before [`fit`](NaiveBayes::fit).
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Consumes the classifier and returns the trained model, `None`
    /// before [`fit`](NaiveBayes::fit).
    pub fn into_model(self) -> Option<Model> {
        self.model
    }

    /// Classifies a document given as its raw word stream.
    ///
    /// # Errors
    ///
    /// - [`VintageError::NotFitted`] before [`fit`](NaiveBayes::fit).
    /// - Anything [`Model::classify`] can return.
    pub fn predict(&self, lines: &[String]) -> Result<Classification> {
        self.model
            .as_ref()
            .ok_or(VintageError::NotFitted)?
            .classify(lines)
    }

    /// Classifies the document file at `path`.
    ///
    /// # Errors
    ///
    /// - [`VintageError::NotFitted`] before [`fit`](NaiveBayes::fit).
    /// - Anything [`Model::classify_file`] can return.
    pub fn predict_file(&self, path: impl AsRef<Path>) -> Result<Classification> {
        self.model
            .as_ref()
            .ok_or(VintageError::NotFitted)?
            .classify_file(path)
    }

    /// Fraction of a labeled corpus' documents the trained model assigns
    /// to their own label.
    ///
    /// Only the two configured labels are evaluated; other collections in
    /// `corpus` are ignored.
    ///
    /// # Errors
    ///
    /// - [`VintageError::NotFitted`] before [`fit`](NaiveBayes::fit).
    /// - [`VintageError::EmptyTrainingData`] if the corpus has no
    ///   documents under either configured label.
    /// - Any I/O or decode error from the corpus provider.
    pub fn score<C: Corpus>(&self, corpus: &C) -> Result<Float> {
        let model = self.model.as_ref().ok_or(VintageError::NotFitted)?;

        let mut correct = 0usize;
        let mut total = 0usize;
        for (index, label) in model.labels().iter().enumerate() {
            for lines in corpus.documents(label)? {
                if model.classify(&lines)?.predicted_index() == index {
                    correct += 1;
                }
                total += 1;
            }
        }

        if total == 0 {
            return Err(VintageError::EmptyTrainingData);
        }
        Ok(correct as Float / total as Float)
    }

    /// The configured label pair.
    pub fn labels(&self) -> &[String; 2] {
        &self.labels
    }

    /// The configured vocabulary cutoff.
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }
}

/// Encodes every document of the two configured labels into a labeled
/// record, in provider traversal order.
fn load_records<C: Corpus>(
    corpus: &C,
    vocabulary: &Vocabulary,
    labels: &[String; 2],
) -> Result<Vec<LabeledRecord>> {
    let mut records = Vec::new();
    for (index, label) in labels.iter().enumerate() {
        let documents = corpus.documents(label)?;

        #[cfg(feature = "parallel")]
        let bows: Vec<Bow> = documents
            .par_iter()
            .map(|lines| encode(vocabulary, lines))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let bows: Vec<Bow> = documents
            .iter()
            .map(|lines| encode(vocabulary, lines))
            .collect();

        records.extend(bows.into_iter().map(|bow| LabeledRecord { label: index, bow }));
    }
    Ok(records)
}

/// Smoothed log-prior per label from document counts:
/// `ln((n_label + 1) / (n_total + 2))`.
///
/// Well-defined even when one label has zero documents.
fn log_priors(records: &[LabeledRecord]) -> [Float; 2] {
    let n_first = records.iter().filter(|r| r.label == 0).count();
    let n_second = records.len() - n_first;
    let total = records.len();
    [
        laplace_log_prob(n_first, total, 2),
        laplace_log_prob(n_second, total, 2),
    ]
}

/// Smoothed log-likelihood table for one label.
///
/// Sums per-word occurrence counts across the label's records, plus the
/// total token count (sentinel included) for the shared denominator:
/// `ln((count + 1) / (total + V + 1))` over `V + 1` outcomes.
fn word_likelihoods(
    vocabulary: &Vocabulary,
    records: &[LabeledRecord],
    label: usize,
) -> LikelihoodTable {
    let mut word_counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;
    let mut unknown = 0usize;

    for record in records.iter().filter(|r| r.label == label) {
        for (token, &count) in &record.bow {
            total += count as usize;
            match token {
                Token::Word(word) => *word_counts.entry(word.as_str()).or_insert(0) += count as usize,
                Token::Unknown => unknown += count as usize,
            }
        }
    }

    let outcomes = vocabulary.len() + 1;

    #[cfg(feature = "parallel")]
    let words: HashMap<String, Float> = vocabulary
        .words()
        .par_iter()
        .map(|word| {
            let count = word_counts.get(word.as_str()).copied().unwrap_or(0);
            (word.clone(), laplace_log_prob(count, total, outcomes))
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let words: HashMap<String, Float> = vocabulary
        .iter()
        .map(|word| {
            let count = word_counts.get(word.as_str()).copied().unwrap_or(0);
            (word.clone(), laplace_log_prob(count, total, outcomes))
        })
        .collect();

    LikelihoodTable {
        words,
        unknown: laplace_log_prob(unknown, total, outcomes),
    }
}
