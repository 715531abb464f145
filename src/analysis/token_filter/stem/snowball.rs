//! Snowball stemmers for the non-English languages.

use rust_stemmers::Algorithm;

use crate::analysis::token_filter::stem::Stemmer;

/// Language codes served by Snowball, with their algorithms.
pub const LANGUAGES: &[(&str, Algorithm)] = &[
    ("ar", Algorithm::Arabic),
    ("da", Algorithm::Danish),
    ("de", Algorithm::German),
    ("el", Algorithm::Greek),
    ("es", Algorithm::Spanish),
    ("fi", Algorithm::Finnish),
    ("fr", Algorithm::French),
    ("hu", Algorithm::Hungarian),
    ("it", Algorithm::Italian),
    ("nl", Algorithm::Dutch),
    ("no", Algorithm::Norwegian),
    ("pt", Algorithm::Portuguese),
    ("ro", Algorithm::Romanian),
    ("ru", Algorithm::Russian),
    ("sv", Algorithm::Swedish),
    ("ta", Algorithm::Tamil),
    ("tr", Algorithm::Turkish),
];

/// A stemmer backed by a Snowball algorithm.
///
/// Input is lowercased before stemming, as the Snowball algorithms expect.
pub struct SnowballStemmer {
    language: &'static str,
    inner: rust_stemmers::Stemmer,
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}

impl SnowballStemmer {
    /// Create the stemmer for a language code, if Snowball covers it.
    pub fn for_language(language: &str) -> Option<Self> {
        LANGUAGES
            .iter()
            .find(|(code, _)| *code == language)
            .map(|(code, algorithm)| SnowballStemmer {
                language: code,
                inner: rust_stemmers::Stemmer::create(*algorithm),
            })
    }

    /// The language code this stemmer was created for.
    pub fn language(&self) -> &'static str {
        self.language
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        let lowered = word.to_lowercase();
        let stemmed = self.inner.stem(&lowered);
        if stemmed.chars().count() > word.chars().count() {
            return word.to_string();
        }
        stemmed.into_owned()
    }

    fn name(&self) -> &'static str {
        "snowball"
    }
}
