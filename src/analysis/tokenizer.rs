//! Tokenizers that split document text into classified tokens.
//!
//! Tokenizers are the first step of the feature pipeline. They scan a string
//! left to right and emit an ordered sequence of [`Token`]s; whitespace only
//! separates tokens and is never emitted.
//!
//! # Available Tokenizers
//!
//! - [`social::SocialTokenizer`] - Word/punctuation splitting that keeps
//!   `@mentions`, `#hashtags` and URLs intact
//!
//! # Examples
//!
//! ```
//! use tessera::analysis::token::TokenKind;
//! use tessera::analysis::tokenizer::{tokenize, TokenizerOptions};
//!
//! let options = TokenizerOptions::default().lowercase(true);
//! let tokens = tokenize("Vote #EURef2016 @UKIP!", &options);
//!
//! assert_eq!(tokens[1].text, "#euref2016");
//! assert_eq!(tokens[1].kind, TokenKind::Hashtag);
//! assert_eq!(tokens[2].kind, TokenKind::Mention);
//! assert_eq!(tokens[3].kind, TokenKind::Punctuation);
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so one tokenizer can serve every worker
/// of a parallel corpus build.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into an ordered sequence of tokens.
    ///
    /// Empty input yields an empty sequence.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Options controlling normalization and which tokens are emitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerOptions {
    /// Lowercase token text after the token has been classified.
    pub lowercase: bool,

    /// Emit mentions, hashtags and URLs as single tokens instead of
    /// splitting them on their internal punctuation.
    pub preserve_social_tokens: bool,

    /// Drop punctuation tokens from the output.
    pub strip_punctuation: bool,

    /// Drop number tokens from the output.
    pub strip_numbers: bool,

    /// Drop URL tokens from the output.
    pub strip_urls: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        TokenizerOptions {
            lowercase: false,
            preserve_social_tokens: true,
            strip_punctuation: false,
            strip_numbers: false,
            strip_urls: false,
        }
    }
}

impl TokenizerOptions {
    /// Set whether token text is lowercased.
    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Set whether social-media tokens are kept whole.
    pub fn preserve_social_tokens(mut self, preserve: bool) -> Self {
        self.preserve_social_tokens = preserve;
        self
    }

    /// Set whether punctuation tokens are dropped.
    pub fn strip_punctuation(mut self, strip: bool) -> Self {
        self.strip_punctuation = strip;
        self
    }

    /// Set whether number tokens are dropped.
    pub fn strip_numbers(mut self, strip: bool) -> Self {
        self.strip_numbers = strip;
        self
    }

    /// Set whether URL tokens are dropped.
    pub fn strip_urls(mut self, strip: bool) -> Self {
        self.strip_urls = strip;
        self
    }
}

/// Tokenize `text` with a [`social::SocialTokenizer`] configured by `options`.
pub fn tokenize(text: &str, options: &TokenizerOptions) -> Vec<Token> {
    social::SocialTokenizer::new(options.clone()).tokenize(text)
}

pub mod social;

pub use social::SocialTokenizer;
