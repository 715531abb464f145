//! Token filters applied between tokenization and feature counting.
//!
//! # Available Filters
//!
//! - [`stem::StemFilter`] - Reduces word tokens to their stems
//! - [`stop::StopFilter`] - Removes stopwords
//!
//! Filters run in the order the feature pipeline needs them:
//!
//! ```text
//! Tokenizer → Stem (word tokens only) → Stopwords → N-grams → DFM
//! ```

use crate::analysis::token::Token;

/// Trait for filters that transform token sequences.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token sequence.
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod stem;
pub mod stop;

pub use stem::{PorterStemmer, SnowballStemmer, StemFilter, Stemmer};
pub use stop::{StopFilter, StopWords};
