//! Configuration for building and trimming a document-feature matrix.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::ngram::{DEFAULT_SEPARATOR, NgramExpander};
use crate::analysis::tokenizer::TokenizerOptions;
use crate::error::{Result, TesseraError};

/// Options for [`DocumentFeatureMatrix::build`](super::DocumentFeatureMatrix::build).
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes:
///
/// ```
/// use tessera::dfm::DfmOptions;
///
/// let options = DfmOptions::from_json(r#"{"language": "en", "ngram_max": 2}"#).unwrap();
/// assert_eq!(options.ngram_min, 1);
/// assert_eq!(options.ngram_max, 2);
/// assert_eq!(options.ngram_separator, "_");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DfmOptions {
    /// Tokenizer configuration.
    pub tokenizer: TokenizerOptions,

    /// Stemmer language code; `None` disables stemming. Stems keep the
    /// casing of the word they came from.
    pub language: Option<String>,

    /// Minimum n-gram order.
    pub ngram_min: usize,

    /// Maximum n-gram order.
    pub ngram_max: usize,

    /// Joins the tokens of an n-gram feature.
    pub ngram_separator: String,

    /// Allow n-grams that combine tokens of different kinds.
    pub allow_mixed_kind_ngrams: bool,

    /// Worker threads for the per-document phase; `None` uses every CPU.
    pub workers: Option<usize>,
}

impl Default for DfmOptions {
    fn default() -> Self {
        DfmOptions {
            tokenizer: TokenizerOptions::default(),
            language: None,
            ngram_min: 1,
            ngram_max: 1,
            ngram_separator: DEFAULT_SEPARATOR.to_string(),
            allow_mixed_kind_ngrams: true,
            workers: None,
        }
    }
}

impl DfmOptions {
    /// Parse options from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Set the tokenizer options.
    pub fn tokenizer(mut self, tokenizer: TokenizerOptions) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Enable stemming for a language.
    pub fn language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the n-gram order range.
    pub fn ngrams(mut self, min: usize, max: usize) -> Self {
        self.ngram_min = min;
        self.ngram_max = max;
        self
    }

    /// Set the n-gram separator.
    pub fn ngram_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.ngram_separator = separator.into();
        self
    }

    /// Set whether n-grams may mix token kinds.
    pub fn allow_mixed_kind_ngrams(mut self, allow: bool) -> Self {
        self.allow_mixed_kind_ngrams = allow;
        self
    }

    /// Set the worker count.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Worker count after applying the CPU default.
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }

    pub(crate) fn expander(&self) -> Result<NgramExpander> {
        Ok(NgramExpander::new(self.ngram_min, self.ngram_max)?
            .with_separator(self.ngram_separator.as_str())
            .allow_mixed_kinds(self.allow_mixed_kind_ngrams))
    }
}

/// Thresholds for [`DocumentFeatureMatrix::trim_with`](super::DocumentFeatureMatrix::trim_with).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimOptions {
    /// Drop features found in fewer documents than this.
    pub min_document_frequency: usize,
    /// Drop features whose total count is below this.
    pub min_term_frequency: usize,
}

impl Default for TrimOptions {
    fn default() -> Self {
        TrimOptions {
            min_document_frequency: 1,
            min_term_frequency: 1,
        }
    }
}

impl TrimOptions {
    /// Set the document-frequency threshold.
    pub fn min_document_frequency(mut self, min: usize) -> Self {
        self.min_document_frequency = min;
        self
    }

    /// Set the total-count threshold.
    pub fn min_term_frequency(mut self, min: usize) -> Self {
        self.min_term_frequency = min;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.min_document_frequency < 1 {
            return Err(TesseraError::invalid_threshold(format!(
                "min_document_frequency must be at least 1 (got {})",
                self.min_document_frequency
            )));
        }
        if self.min_term_frequency < 1 {
            return Err(TesseraError::invalid_threshold(format!(
                "min_term_frequency must be at least 1 (got {})",
                self.min_term_frequency
            )));
        }
        Ok(())
    }
}
