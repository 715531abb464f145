//! Corpus to matrix construction.
//!
//! Construction runs in two phases. The per-document phase (tokenize, stem,
//! drop stopwords, expand n-grams, count) is a pure function of one text and
//! runs on a worker pool. The merge phase walks the per-document results in
//! corpus order and assigns column indices through a [`FeatureIndex`], so a
//! feature's column is the first time it is seen in corpus order no matter
//! how many workers ran the first phase.

use ahash::AHashMap;
use log::debug;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::analysis::ngram::NgramExpander;
use crate::analysis::token_filter::{Filter, StemFilter, StopFilter, StopWords};
use crate::analysis::tokenizer::{SocialTokenizer, Tokenizer};
use crate::corpus::{BuildWarning, Corpus, Document};
use crate::dfm::matrix::DocumentFeatureMatrix;
use crate::dfm::options::DfmOptions;
use crate::error::{Result, TesseraError};

/// Assigns dense column indices to features in first-seen order.
#[derive(Debug, Default)]
pub struct FeatureIndex {
    columns: AHashMap<String, u32>,
    features: Vec<String>,
}

impl FeatureIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Column of `feature`, assigning the next free one if it is new.
    pub fn intern(&mut self, feature: &str) -> u32 {
        if let Some(&column) = self.columns.get(feature) {
            return column;
        }
        let column = self.features.len() as u32;
        self.columns.insert(feature.to_string(), column);
        self.features.push(feature.to_string());
        column
    }

    /// Column of a known feature.
    pub fn get(&self, feature: &str) -> Option<u32> {
        self.columns.get(feature).copied()
    }

    /// Number of distinct features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if no feature has been seen.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features in column order.
    pub fn into_features(self) -> Vec<String> {
        self.features
    }
}

/// Per-document feature extraction.
struct Pipeline {
    tokenizer: SocialTokenizer,
    stemmer: Option<StemFilter>,
    stop: Option<StopFilter>,
    expander: NgramExpander,
}

impl Pipeline {
    fn new(options: &DfmOptions, stop_words: Option<&StopWords>) -> Result<Self> {
        let stemmer = options
            .language
            .as_deref()
            .map(StemFilter::for_language)
            .transpose()?;

        Ok(Pipeline {
            tokenizer: SocialTokenizer::new(options.tokenizer.clone()),
            stemmer,
            stop: stop_words.cloned().map(StopFilter::new),
            expander: options.expander()?,
        })
    }

    /// Feature counts of one text, in first-seen order.
    fn count(&self, text: &str) -> Vec<(String, u32)> {
        let mut tokens = self.tokenizer.tokenize(text);
        if let Some(stemmer) = &self.stemmer {
            tokens = stemmer.filter(tokens);
        }
        if let Some(stop) = &self.stop {
            tokens = stop.filter(tokens);
        }

        let mut slots: AHashMap<String, usize> = AHashMap::new();
        let mut counts: Vec<(String, u32)> = Vec::new();
        for feature in self.expander.expand_tokens(&tokens) {
            match slots.get(&feature) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slots.insert(feature.clone(), counts.len());
                    counts.push((feature, 1));
                }
            }
        }
        counts
    }
}

impl DocumentFeatureMatrix {
    /// Build a matrix from every document of `corpus`.
    ///
    /// Stemming applies only to word tokens and only when
    /// [`DfmOptions::language`] is set. Stopwords are compared lowercased
    /// after stemming. Documents that yield no features keep an all-zero row
    /// and are listed in [`DocumentFeatureMatrix::warnings`].
    ///
    /// # Errors
    ///
    /// Fails before any document is processed on an unsupported language,
    /// an invalid n-gram range, or a worker pool that cannot be started.
    pub fn build(
        corpus: &Corpus,
        options: &DfmOptions,
        stop_words: Option<&StopWords>,
    ) -> Result<Self> {
        let pipeline = Pipeline::new(options, stop_words)?;
        let workers = options.effective_workers();
        let documents = corpus.documents();

        let per_document: Vec<Vec<(String, u32)>> = if workers == 1 {
            documents.iter().map(|doc| pipeline.count(doc.text())).collect()
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("dfm-worker-{i}"))
                .build()
                .map_err(|e| TesseraError::internal(format!("Failed to create thread pool: {e}")))?;
            pool.install(|| {
                documents
                    .par_iter()
                    .map(|doc| pipeline.count(doc.text()))
                    .collect()
            })
        };

        let mut index = FeatureIndex::new();
        let mut rows = Vec::with_capacity(documents.len());
        let mut warnings = Vec::new();

        for (doc, counts) in documents.iter().zip(per_document) {
            if counts.is_empty() {
                warnings.push(BuildWarning::new(doc.id(), "document produced no features"));
            }
            let mut row: Vec<(u32, u32)> = counts
                .iter()
                .map(|(feature, count)| (index.intern(feature), *count))
                .collect();
            row.sort_unstable_by_key(|&(column, _)| column);
            rows.push(row);
        }

        let row_labels = documents.iter().map(Document::id).collect();
        let dfm = Self::from_rows(row_labels, index.into_features(), rows, warnings);
        debug!(
            "Built document-feature matrix: {} documents x {} features, {} non-zero cells, {} workers",
            dfm.row_count(),
            dfm.column_count(),
            dfm.nnz(),
            workers
        );
        Ok(dfm)
    }
}
