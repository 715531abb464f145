//! # Tessera
//!
//! Quantitative text analysis for short documents such as social-media posts.
//!
//! ## Features
//!
//! - Tokenizer that keeps `@mentions`, `#hashtags` and URLs intact
//! - Porter stemming for English plus Snowball stemmers for other languages
//!   (the Porter stemmer leaves words with non-ASCII letters such as `cafés`
//!   unchanged)
//! - Deterministic n-gram expansion
//! - Corpora with schema-checked metadata and keyword-in-context search
//! - Sparse document-feature matrices built in parallel, with trimming and
//!   feature selection
//! - Regex extraction and substitution over raw text
//!
//! ## Example
//!
//! ```
//! use tessera::prelude::*;
//!
//! let corpus = Corpus::from_texts(vec![
//!     "Vote #Brexit today @UKIP",
//!     "Remain is winning #brexit",
//! ]);
//!
//! let options = DfmOptions::default()
//!     .tokenizer(TokenizerOptions::default().lowercase(true).strip_punctuation(true));
//! let dfm = DocumentFeatureMatrix::build(&corpus, &options, None).unwrap();
//!
//! assert_eq!(dfm.top_features(1), vec![("#brexit".to_string(), 2)]);
//!
//! let matcher = RegexMatcher::new();
//! let handles = matcher.find_all(corpus.texts()[0], r"@\w+", true).unwrap();
//! assert_eq!(handles[0].matched_text, "@UKIP");
//! ```

pub mod analysis;
pub mod corpus;
pub mod dfm;
pub mod error;
pub mod pattern;

pub mod prelude {
    pub use crate::analysis::token::{Token, TokenKind};
    pub use crate::analysis::token_filter::{StopWords, stem::stem, stem::supported_languages};
    pub use crate::analysis::tokenizer::{TokenizerOptions, tokenize};
    pub use crate::corpus::{Corpus, DocId, KwicResult, Metadata, MetadataBuilder, MetadataValue};
    pub use crate::dfm::{DfmOptions, DocumentFeatureMatrix, SelectionMode, TrimOptions};
    pub use crate::error::{Result, TesseraError};
    pub use crate::pattern::{PatternKind, PatternMatcher, RegexMatcher};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
