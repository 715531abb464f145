//! Document collections.
//!
//! A [`Corpus`] is an ordered, immutable collection of [`Document`]s, each
//! carrying its raw text and a metadata record. Every record has exactly the
//! corpus schema's fields; fields missing from an input row are filled with
//! [`MetadataValue::Null`]. Document ids are 1-based input positions and are
//! never renumbered, so a subset still refers to the same documents.
//!
//! # Examples
//!
//! ```
//! use tessera::corpus::Corpus;
//! use tessera::corpus::document::MetadataBuilder;
//!
//! let corpus = Corpus::build(
//!     vec!["we debated brexit today online", "nothing to see"],
//!     vec![
//!         MetadataBuilder::new().add_text("party", "lab").build(),
//!         MetadataBuilder::new().add_text("party", "con").build(),
//!     ],
//! )
//! .unwrap();
//!
//! let hits = corpus.kwic("brexit", 2, false).unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].pre_text(), "we debated");
//! assert_eq!(hits[0].post_text(), "today online");
//! ```

pub mod document;
pub mod kwic;

use std::collections::BTreeSet;

use ahash::AHashSet;
use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::analysis::tokenizer::{TokenizerOptions, tokenize};
use crate::error::{Result, TesseraError};
use crate::pattern::{PatternMatcher, RegexMatcher};

pub use document::{DocId, Document, Metadata, MetadataBuilder, MetadataValue};
pub use kwic::KwicResult;

/// A document skipped or flagged while building a corpus or matrix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildWarning {
    /// Id the document has, or would have had, in the corpus.
    pub document_id: DocId,
    /// What went wrong.
    pub message: String,
}

impl BuildWarning {
    pub(crate) fn new<S: Into<String>>(document_id: DocId, message: S) -> Self {
        BuildWarning {
            document_id,
            message: message.into(),
        }
    }
}

/// Token and type counts of one document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// The document.
    pub document_id: DocId,
    /// Number of tokens under default tokenizer options.
    pub tokens: usize,
    /// Number of distinct token texts.
    pub types: usize,
}

/// An ordered, immutable collection of documents.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Corpus {
    documents: Vec<Document>,
    schema: BTreeSet<String>,
    warnings: Vec<BuildWarning>,
}

impl Corpus {
    /// Build a corpus from texts and parallel metadata rows.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::SchemaMismatch`] if the two sequences differ
    /// in length.
    pub fn build<S: Into<String>>(texts: Vec<S>, metadata_rows: Vec<Metadata>) -> Result<Self> {
        check_lengths(texts.len(), metadata_rows.len())?;
        let entries = texts
            .into_iter()
            .zip(metadata_rows)
            .enumerate()
            .map(|(i, (text, row))| (i as DocId + 1, text.into(), row))
            .collect();
        Ok(Self::assemble(entries, Vec::new()))
    }

    /// Build a corpus with no metadata.
    pub fn from_texts<S: Into<String>>(texts: Vec<S>) -> Self {
        let entries = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| (i as DocId + 1, text.into(), Metadata::new()))
            .collect();
        Self::assemble(entries, Vec::new())
    }

    /// Build a corpus from raw bytes, skipping documents that are not valid
    /// UTF-8.
    ///
    /// Skipped documents are logged and recorded in [`Corpus::warnings`];
    /// surviving documents keep the id of their input position.
    pub fn from_bytes<B: AsRef<[u8]>>(raw: Vec<B>, metadata_rows: Vec<Metadata>) -> Result<Self> {
        check_lengths(raw.len(), metadata_rows.len())?;
        let mut entries = Vec::with_capacity(raw.len());
        let mut warnings = Vec::new();

        for (i, (bytes, row)) in raw.iter().zip(metadata_rows).enumerate() {
            let id = i as DocId + 1;
            match std::str::from_utf8(bytes.as_ref()) {
                Ok(text) => entries.push((id, text.to_string(), row)),
                Err(e) => {
                    warn!("Skipping document {id}: {e}");
                    warnings.push(BuildWarning::new(id, format!("invalid UTF-8: {e}")));
                }
            }
        }

        Ok(Self::assemble(entries, warnings))
    }

    fn assemble(entries: Vec<(DocId, String, Metadata)>, warnings: Vec<BuildWarning>) -> Self {
        let schema: BTreeSet<String> = entries
            .iter()
            .flat_map(|(_, _, row)| row.keys().cloned())
            .collect();

        let documents = entries
            .into_iter()
            .map(|(id, text, mut row)| {
                for field in &schema {
                    row.entry(field.clone()).or_insert(MetadataValue::Null);
                }
                Document::new(id, text, row)
            })
            .collect();

        Corpus {
            documents,
            schema,
            warnings,
        }
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in corpus order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Raw texts in corpus order.
    pub fn texts(&self) -> Vec<&str> {
        self.documents.iter().map(Document::text).collect()
    }

    /// Field names every metadata record carries.
    pub fn schema(&self) -> &BTreeSet<String> {
        &self.schema
    }

    /// Documents skipped while building this corpus.
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    /// Look up a document by id.
    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.documents
            .binary_search_by_key(&id, Document::id)
            .ok()
            .map(|i| &self.documents[i])
    }

    /// One field's value for every document, or `None` for a field outside
    /// the schema.
    pub fn metadata_values(&self, field: &str) -> Option<Vec<&MetadataValue>> {
        if !self.schema.contains(field) {
            return None;
        }
        Some(
            self.documents
                .iter()
                .filter_map(|doc| doc.get(field))
                .collect(),
        )
    }

    /// Keep the documents whose metadata satisfies `predicate`.
    ///
    /// Order and ids are preserved; the schema is unchanged.
    pub fn subset<F>(&self, predicate: F) -> Corpus
    where
        F: Fn(&Metadata) -> bool,
    {
        Corpus {
            documents: self
                .documents
                .iter()
                .filter(|doc| predicate(doc.metadata()))
                .cloned()
                .collect(),
            schema: self.schema.clone(),
            warnings: Vec::new(),
        }
    }

    /// Keep the documents whose `field` equals `value`.
    pub fn subset_where<V: Into<MetadataValue>>(&self, field: &str, value: V) -> Corpus {
        let value = value.into();
        self.subset(|row| row.get(field) == Some(&value))
    }

    /// Keyword-in-context search for a single-token pattern.
    ///
    /// Each document is tokenized with default options and every token whose
    /// text matches `pattern` yields one result with up to `window` tokens of
    /// context on each side.
    pub fn kwic(&self, pattern: &str, window: usize, case_sensitive: bool) -> Result<Vec<KwicResult>> {
        self.kwic_phrase(&[pattern], window, case_sensitive)
    }

    /// Keyword-in-context search for a run of consecutive tokens, one
    /// pattern per token.
    pub fn kwic_phrase(
        &self,
        patterns: &[&str],
        window: usize,
        case_sensitive: bool,
    ) -> Result<Vec<KwicResult>> {
        let matcher = RegexMatcher::new();
        let regexes = patterns
            .iter()
            .map(|p| matcher.compile(p, case_sensitive))
            .collect::<Result<Vec<_>>>()?;

        self.kwic_by(regexes.len(), window, |i, text| Ok(regexes[i].is_match(text)))
    }

    /// Keyword-in-context search through a caller-supplied matcher.
    pub fn kwic_with(
        &self,
        matcher: &dyn PatternMatcher,
        patterns: &[&str],
        window: usize,
        case_sensitive: bool,
    ) -> Result<Vec<KwicResult>> {
        for pattern in patterns {
            matcher.contains("", pattern, case_sensitive)?;
        }
        self.kwic_by(patterns.len(), window, |i, text| {
            matcher.contains(text, patterns[i], case_sensitive)
        })
    }

    fn kwic_by<F>(&self, width: usize, window: usize, is_match: F) -> Result<Vec<KwicResult>>
    where
        F: Fn(usize, &str) -> Result<bool> + Sync,
    {
        if width == 0 {
            return Err(TesseraError::pattern("KWIC needs at least one pattern"));
        }
        let options = TokenizerOptions::default();

        let per_document = self
            .documents
            .par_iter()
            .map(|doc| -> Result<Vec<KwicResult>> {
                let tokens = tokenize(doc.text(), &options);
                let mut results = Vec::new();
                if tokens.len() < width {
                    return Ok(results);
                }
                for start in 0..=tokens.len() - width {
                    if !phrase_matches(&tokens[start..start + width], &is_match)? {
                        continue;
                    }
                    let end = start + width;
                    results.push(KwicResult {
                        document_id: doc.id(),
                        position: start,
                        pre_context: tokens[start.saturating_sub(window)..start].to_vec(),
                        matched: tokens[start..end].to_vec(),
                        post_context: tokens[end..(end + window).min(tokens.len())].to_vec(),
                    });
                }
                Ok(results)
            })
            .collect::<Result<Vec<Vec<KwicResult>>>>()?;

        Ok(per_document.into_iter().flatten().collect())
    }

    /// Token and type counts per document under default tokenizer options.
    pub fn summary(&self) -> Vec<DocumentSummary> {
        let options = TokenizerOptions::default();
        self.documents
            .par_iter()
            .map(|doc| {
                let tokens = tokenize(doc.text(), &options);
                let types = tokens
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<AHashSet<_>>()
                    .len();
                DocumentSummary {
                    document_id: doc.id(),
                    tokens: tokens.len(),
                    types,
                }
            })
            .collect()
    }
}

fn phrase_matches<F>(tokens: &[Token], is_match: &F) -> Result<bool>
where
    F: Fn(usize, &str) -> Result<bool>,
{
    for (i, token) in tokens.iter().enumerate() {
        if !is_match(i, &token.text)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn check_lengths(texts: usize, rows: usize) -> Result<()> {
    if texts != rows {
        return Err(TesseraError::schema_mismatch(format!(
            "{texts} texts but {rows} metadata rows"
        )));
    }
    Ok(())
}
