#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{Corpus, Result, VintageError};

/// The set of words a model is trained over.
///
/// A vocabulary is built once from a training corpus and is immutable
/// afterwards. Words are stored sorted ascending and deduplicated, so the
/// storage order is canonical: two corpora with the same retained words
/// produce byte-identical vocabularies regardless of traversal order.
///
/// Membership queries run as a binary search over the sorted storage.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Builds a vocabulary by scanning every document of every label in
    /// `corpus` and retaining the words that occur at least `cutoff` times
    /// corpus-wide (all labels combined).
    ///
    /// Each document line is trimmed of surrounding whitespace; lines that
    /// are empty after trimming never enter the vocabulary.
    ///
    /// # Parameters
    ///
    /// - `corpus`: Training document provider.
    /// - `cutoff`: Minimum corpus-wide occurrence count. Must be at least 1.
    ///
    /// # Errors
    ///
    /// - [`VintageError::InvalidHyperparameter`] if `cutoff == 0`.
    /// - Any error from the corpus provider. No partial vocabulary is
    ///   returned on failure.
    pub fn build<C: Corpus>(corpus: &C, cutoff: usize) -> Result<Self> {
        if cutoff == 0 {
            return Err(VintageError::InvalidHyperparameter {
                name: "cutoff".into(),
                value: "0".into(),
            });
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        for label in corpus.labels()? {
            for document in corpus.documents(&label)? {
                for line in &document {
                    let word = line.trim();
                    if word.is_empty() {
                        continue;
                    }
                    *counts.entry(word.to_owned()).or_insert(0) += 1;
                }
            }
        }

        let mut words: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count >= cutoff)
            .map(|(word, _)| word)
            .collect();
        words.sort();

        Ok(Self { words })
    }

    /// Builds a vocabulary directly from a word list, normalizing it into
    /// canonical form: words are trimmed, empties dropped, the rest sorted
    /// and deduplicated.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| w.into().trim().to_owned())
            .filter(|w| !w.is_empty())
            .collect();
        words.sort();
        words.dedup();
        Self { words }
    }

    /// Returns `true` if `word` was retained in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|probe| probe.as_str().cmp(word))
            .is_ok()
    }

    /// Number of retained words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if no word survived the cutoff.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The retained words, sorted ascending.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Iterates the retained words in sorted order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }
}
