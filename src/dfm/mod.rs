//! Document-feature matrices.
//!
//! A [`DocumentFeatureMatrix`] counts, for every document of a corpus, how
//! often each feature occurs. Features are (optionally stemmed) tokens or
//! n-grams of tokens. Columns are numbered in the order features are first
//! seen scanning the corpus, so two builds from the same corpus and options
//! always agree column for column.
//!
//! # Examples
//!
//! ```
//! use tessera::analysis::token_filter::StopWords;
//! use tessera::corpus::Corpus;
//! use tessera::dfm::{DfmOptions, DocumentFeatureMatrix};
//!
//! let corpus = Corpus::from_texts(vec!["the vote is today", "vote leave", "leave now"]);
//! let options = DfmOptions::default();
//! let dfm = DocumentFeatureMatrix::build(&corpus, &options, Some(&StopWords::english())).unwrap();
//!
//! assert_eq!(dfm.features(), &["vote", "today", "leave", "now"]);
//! assert_eq!(dfm.top_features(1), vec![("vote".to_string(), 2)]);
//!
//! let common = dfm.trim(2).unwrap();
//! assert_eq!(common.features(), &["vote", "leave"]);
//! assert_eq!(common.row_count(), 3);
//! ```

pub mod builder;
pub mod matrix;
pub mod options;

pub use builder::FeatureIndex;
pub use matrix::{DocumentFeatureMatrix, SelectionMode};
pub use options::{DfmOptions, TrimOptions};
