//! Stemming token filter and stemmer implementations.
//!
//! Stemmers are selected by a short language code. English uses the
//! classic Porter algorithm implemented in [`porter`]; every other supported
//! language is served by a Snowball stemmer (see [`snowball`]).
//!
//! # Examples
//!
//! ```
//! use tessera::analysis::token_filter::stem::{stem, stem_words, supported_languages};
//!
//! assert_eq!(stem("winning", "en").unwrap(), "win");
//! assert_eq!(
//!     stem_words(&["win", "winning", "wins"], "en").unwrap(),
//!     vec!["win", "win", "win"]
//! );
//! assert!(supported_languages().contains("ru"));
//! assert!(stem("word", "xx").is_err());
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use super::Filter;
use crate::analysis::token::{Token, TokenKind};
use crate::error::{Result, TesseraError};

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    ///
    /// Implementations are deterministic and never return a string with
    /// more characters than `word`.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

// Stemmer implementations
pub mod porter;
pub mod snowball;

// Re-export stemmers
pub use porter::PorterStemmer;
pub use snowball::SnowballStemmer;

/// Every language code a stemmer can be created for.
pub fn supported_languages() -> BTreeSet<&'static str> {
    let mut languages: BTreeSet<&'static str> = snowball::LANGUAGES
        .iter()
        .map(|(code, _)| *code)
        .collect();
    languages.insert(porter::LANGUAGE);
    languages
}

/// Create the stemmer for `language`.
pub fn stemmer_for(language: &str) -> Result<Arc<dyn Stemmer>> {
    if language == porter::LANGUAGE {
        return Ok(Arc::new(PorterStemmer::new()));
    }
    SnowballStemmer::for_language(language)
        .map(|stemmer| Arc::new(stemmer) as Arc<dyn Stemmer>)
        .ok_or_else(|| TesseraError::unsupported_language(language))
}

/// Stem a single word in `language`.
pub fn stem(word: &str, language: &str) -> Result<String> {
    Ok(stemmer_for(language)?.stem(word))
}

/// Stem every word in `words` with one stemmer instance.
pub fn stem_words<S: AsRef<str>>(words: &[S], language: &str) -> Result<Vec<String>> {
    let stemmer = stemmer_for(language)?;
    Ok(words.iter().map(|w| stemmer.stem(w.as_ref())).collect())
}

/// Filter that applies stemming to word tokens.
///
/// Mentions, hashtags, URLs, numbers and punctuation pass through untouched.
/// Stemmers work on lowercased text; the filter copies the casing of the
/// input word back onto the stem so that `Running` becomes `Run` and
/// case folding stays under the tokenizer's control.
pub struct StemFilter {
    /// The stemmer to use.
    stemmer: Arc<dyn Stemmer>,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl StemFilter {
    /// Create a stem filter for a language code.
    pub fn for_language(language: &str) -> Result<Self> {
        Ok(StemFilter {
            stemmer: stemmer_for(language)?,
        })
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|token| {
                if token.kind == TokenKind::Word {
                    let stemmed = restore_case(&token.text, &self.stemmer.stem(&token.text));
                    token.with_text(stemmed)
                } else {
                    token
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

/// Upper-case every character of `stem` whose counterpart in `original` is
/// upper case.
fn restore_case(original: &str, stem: &str) -> String {
    if !original.chars().any(char::is_uppercase) {
        return stem.to_string();
    }
    let mut restored = String::with_capacity(stem.len());
    let mut source = original.chars();
    for c in stem.chars() {
        match source.next() {
            Some(o) if o.is_uppercase() => {
                let mut upper = c.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(u), None) => restored.push(u),
                    _ => restored.push(c),
                }
            }
            _ => restored.push(c),
        }
    }
    restored
}
