//! Text analysis module for Tessera.
//!
//! This module provides tokenization, stemming, stopword removal and n-gram
//! expansion: the per-document half of the feature pipeline.

pub mod ngram;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use ngram::NgramExpander;
pub use token::{Token, TokenKind};
pub use token_filter::{Filter, StemFilter, StopFilter, StopWords, Stemmer};
pub use tokenizer::{SocialTokenizer, Tokenizer, TokenizerOptions, tokenize};
