#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{Count, Vocabulary};

/// A single bag-of-words key.
///
/// Every word that survives vocabulary lookup is carried as
/// [`Token::Word`]; everything else collapses into the single
/// out-of-vocabulary sentinel [`Token::Unknown`]. The sentinel is a
/// distinct variant rather than a reserved string, so it can never collide
/// with a vocabulary word: vocabulary words are arbitrary strings and any
/// in-band placeholder could legitimately occur in a document.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    /// A word present in the vocabulary.
    Word(String),
    /// Any word not present in the vocabulary.
    Unknown,
}

/// Bag-of-words for one document: token → occurrence count.
///
/// Counts are strictly positive; a token that never occurs has no entry.
pub type Bow = HashMap<Token, Count>;

/// Encodes one document's raw word stream into a bag-of-words against a
/// fixed vocabulary.
///
/// Each line is trimmed of surrounding whitespace. Lines that are empty
/// after trimming are skipped. A trimmed word found in the vocabulary
/// increments its own count; any other word increments the
/// [`Token::Unknown`] count.
///
/// The result may be empty (empty document) or contain only the unknown
/// sentinel (empty vocabulary, or no line matched).
pub fn encode(vocabulary: &Vocabulary, lines: &[String]) -> Bow {
    let mut bow = Bow::new();
    for line in lines {
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        let token = if vocabulary.contains(word) {
            Token::Word(word.to_owned())
        } else {
            Token::Unknown
        };
        *bow.entry(token).or_insert(0) += 1;
    }
    bow
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_encode_counts_known_words() {
        let vocab = Vocabulary::from_words(["a", "b"]);
        let bow = encode(&vocab, &lines(&["a", "b", "a", "a"]));

        assert_eq!(bow.get(&Token::Word("a".into())), Some(&3));
        assert_eq!(bow.get(&Token::Word("b".into())), Some(&1));
        assert_eq!(bow.get(&Token::Unknown), None);
    }

    #[test]
    fn test_encode_collapses_unknown_words() {
        let vocab = Vocabulary::from_words(["a"]);
        let bow = encode(&vocab, &lines(&["a", "x", "y", "x"]));

        assert_eq!(bow.get(&Token::Word("a".into())), Some(&1));
        assert_eq!(bow.get(&Token::Unknown), Some(&3));
        assert_eq!(bow.len(), 2);
    }

    #[test]
    fn test_encode_empty_document() {
        let vocab = Vocabulary::from_words(["a"]);
        let bow = encode(&vocab, &[]);
        assert!(bow.is_empty());
    }

    #[test]
    fn test_encode_empty_vocabulary_is_all_unknown() {
        let vocab = Vocabulary::default();
        let bow = encode(&vocab, &lines(&["a", "b"]));

        assert_eq!(bow.len(), 1);
        assert_eq!(bow.get(&Token::Unknown), Some(&2));
    }

    #[test]
    fn test_encode_trims_and_skips_blank_lines() {
        let vocab = Vocabulary::from_words(["a"]);
        let bow = encode(&vocab, &lines(&["  a ", "", "   ", "a"]));

        assert_eq!(bow.len(), 1);
        assert_eq!(bow.get(&Token::Word("a".into())), Some(&2));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_token_serialize_roundtrip() {
        // The sentinel must survive serialization as a distinct variant,
        // not as a magic string that could collide with a word.
        let tokens = vec![Token::Word("unknown".into()), Token::Unknown];

        let serialized = serde_json::to_string(&tokens).expect("Failed to serialize");
        let deserialized: Vec<Token> =
            serde_json::from_str(&serialized).expect("Failed to deserialize");

        assert_eq!(tokens, deserialized);
        assert_ne!(deserialized[0], deserialized[1]);
    }

    #[test]
    fn test_unknown_sentinel_distinct_from_any_word() {
        // A vocabulary containing a would-be placeholder string still maps
        // that string to its own token, never to the sentinel.
        let vocab = Vocabulary::from_words(["<unk>"]);
        let bow = encode(&vocab, &lines(&["<unk>", "other"]));

        assert_eq!(bow.get(&Token::Word("<unk>".into())), Some(&1));
        assert_eq!(bow.get(&Token::Unknown), Some(&1));
    }
}
