//! Stopword sets and the filter that removes them.
//!
//! Stopword lists are data supplied by the caller; [`StopWords::english`]
//! provides the Snowball English list so English is always available.
//! Membership is tested on the lowercased token text, so `The` and `THE`
//! are both removed by a list containing `the`.
//!
//! # Examples
//!
//! ```
//! use tessera::analysis::token::Token;
//! use tessera::analysis::token_filter::Filter;
//! use tessera::analysis::token_filter::stop::{StopFilter, StopWords};
//!
//! let filter = StopFilter::new(StopWords::english());
//! let tokens = vec![Token::word("The", 0), Token::word("vote", 1)];
//!
//! let result = filter.filter(tokens);
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "vote");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, renumber};
use crate::analysis::token_filter::Filter;

/// Snowball English stopword list.
///
/// The tokenizer splits contractions at the apostrophe, so `don't` arrives
/// as `don`, `'` and `t`. The list carries those fragments instead of the
/// contracted forms. Fragments that are also ordinary words (`won`, `can`,
/// `let`) are left out.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "would",
    "should", "could", "ought", "cannot", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about", "against", "between",
    "into", "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "in", "out", "on", "off", "over", "under", "again", "further", "then", "once", "here",
    "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more", "most",
    "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too",
    "very", "will",
    // contraction fragments
    "s", "t", "d", "m", "ll", "re", "ve", "don", "isn", "aren", "wasn", "weren", "hasn",
    "haven", "hadn", "doesn", "didn", "wouldn", "shan", "shouldn", "couldn", "mustn",
];

static ENGLISH_STOP_WORDS_SET: LazyLock<Arc<HashSet<String>>> = LazyLock::new(|| {
    Arc::new(ENGLISH_STOP_WORDS.iter().map(|&s| s.to_string()).collect())
});

/// An immutable, cheaply clonable set of lowercased stopwords.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct StopWords {
    words: Arc<HashSet<String>>,
}

impl StopWords {
    /// The built-in English list.
    pub fn english() -> Self {
        StopWords {
            words: Arc::clone(&ENGLISH_STOP_WORDS_SET),
        }
    }

    /// Build a set from custom words; entries are lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StopWords {
            words: Arc::new(words.into_iter().map(|w| w.as_ref().to_lowercase()).collect()),
        }
    }

    /// Check whether `word` (compared lowercased) is a stopword.
    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(char::is_uppercase) {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<Vec<String>> for StopWords {
    fn from(words: Vec<String>) -> Self {
        StopWords::from_words(words)
    }
}

impl From<StopWords> for Vec<String> {
    fn from(stop_words: StopWords) -> Self {
        let mut words: Vec<String> = stop_words.words.iter().cloned().collect();
        words.sort();
        words
    }
}

/// A filter that removes stopword tokens from the sequence.
///
/// Surviving tokens are renumbered so positions stay dense, which keeps
/// n-gram windows contiguous over the filtered sequence.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: StopWords,
}

impl StopFilter {
    /// Create a new stop filter over the given set.
    pub fn new(stop_words: StopWords) -> Self {
        StopFilter { stop_words }
    }

    /// Get the stopword set.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut kept: Vec<Token> = tokens
            .into_iter()
            .filter(|token| !self.stop_words.contains(&token.text))
            .collect();
        renumber(&mut kept);
        kept
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
