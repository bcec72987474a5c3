//! # Cardinal Dictionary
//!
//! Membership index over cardinal-number words ("two", "dozen", "million").
//! Words are stored in a radix trie so a lookup walks at most the length of
//! the queried word.
//!
//! The dictionary is built once from a newline-delimited word list and never
//! mutated afterwards, so a single instance can be shared across threads.
//! Matching is exact and case-sensitive: "Two" is not found when the list
//! contains "two".

use std::fmt;

use radix_trie::{Trie, TrieCommon};
use tracing::debug;

use crate::error::{CirrusError, Result};

/// Word list compiled into the crate, one cardinal per line.
pub const EMBEDDED_CARDINALS: &str = include_str!("../data/cardinals.txt");

/// Trie of cardinal-number words.
pub struct CardinalDictionary {
    words: Trie<String, ()>,
}

impl fmt::Debug for CardinalDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardinalDictionary")
            .field("words", &self.len())
            .finish()
    }
}

impl CardinalDictionary {
    /// Builds the dictionary from newline-delimited content.
    ///
    /// Surrounding whitespace (including a trailing `\r`) is trimmed from each
    /// line and blank lines are skipped, so an empty string is never a member.
    /// Fails with [`CirrusError::EmptyDictionary`] if no word remains.
    pub fn from_word_list(content: &str) -> Result<Self> {
        let mut words = Trie::new();
        for word in content.lines().map(str::trim).filter(|w| !w.is_empty()) {
            words.insert(word.to_string(), ());
        }

        if words.is_empty() {
            return Err(CirrusError::EmptyDictionary);
        }

        debug!(words = words.len(), "cardinal dictionary built");
        Ok(Self { words })
    }

    /// Builds the dictionary from [`EMBEDDED_CARDINALS`].
    pub fn embedded() -> Result<Self> {
        Self::from_word_list(EMBEDDED_CARDINALS)
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.words.get(word).is_some()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_contains_common_cardinals() {
        let dict = CardinalDictionary::embedded().unwrap();
        for word in ["two", "dozen", "hundred", "million"] {
            assert!(dict.contains(word), "{word} should be a cardinal");
        }
        assert!(!dict.contains("something"));
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let dict = CardinalDictionary::from_word_list("two\ntwenty\n").unwrap();
        assert!(dict.contains("two"));
        assert!(dict.contains("twenty"));
        assert!(!dict.contains("tw"));
        assert!(!dict.contains("twos"));
        assert!(!dict.contains("Two"));
    }

    #[test]
    fn test_blank_lines_are_not_members() {
        let dict = CardinalDictionary::from_word_list("\none\r\n\n  \ntwo\n").unwrap();
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("one"));
        assert!(!dict.contains(""));
    }

    #[test]
    fn test_duplicates_collapse() {
        let dict = CardinalDictionary::from_word_list("ten\nten\nten").unwrap();
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_empty_word_list_is_an_error() {
        assert_eq!(
            CardinalDictionary::from_word_list("\n\n   \n").unwrap_err(),
            CirrusError::EmptyDictionary
        );
    }
}
