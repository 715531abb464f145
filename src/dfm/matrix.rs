//! Sparse document-feature count matrix.
//!
//! Storage is compressed sparse row: `row_offsets[r]..row_offsets[r + 1]`
//! indexes the `columns`/`counts` entries of row `r`, with column indices
//! strictly increasing inside a row. Only positive counts are stored, so a
//! cell lookup is a binary search over one row and nothing ever needs the
//! dense matrix.

use ahash::AHashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::corpus::{BuildWarning, DocId};
use crate::dfm::options::TrimOptions;
use crate::error::Result;
use crate::pattern::{PatternKind, RegexMatcher};

/// Whether [`DocumentFeatureMatrix::select`] keeps or removes matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Keep only matching features.
    #[default]
    Keep,
    /// Drop matching features.
    Remove,
}

/// A sparse document × feature count matrix.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DocumentFeatureMatrix {
    row_labels: Vec<DocId>,
    features: Vec<String>,
    row_offsets: Vec<usize>,
    columns: Vec<u32>,
    counts: Vec<u32>,
    warnings: Vec<BuildWarning>,
    #[serde(skip)]
    column_lookup: AHashMap<String, usize>,
}

impl PartialEq for DocumentFeatureMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.row_labels == other.row_labels
            && self.features == other.features
            && self.row_offsets == other.row_offsets
            && self.columns == other.columns
            && self.counts == other.counts
            && self.warnings == other.warnings
    }
}

impl Eq for DocumentFeatureMatrix {}

impl DocumentFeatureMatrix {
    /// Assemble a matrix from per-row `(column, count)` entries.
    ///
    /// Each row's entries must be sorted by column with positive counts.
    pub(crate) fn from_rows(
        row_labels: Vec<DocId>,
        features: Vec<String>,
        rows: Vec<Vec<(u32, u32)>>,
        warnings: Vec<BuildWarning>,
    ) -> Self {
        let nnz = rows.iter().map(Vec::len).sum();
        let mut row_offsets = Vec::with_capacity(rows.len() + 1);
        let mut columns = Vec::with_capacity(nnz);
        let mut counts = Vec::with_capacity(nnz);

        row_offsets.push(0);
        for row in rows {
            for (column, count) in row {
                debug_assert!(count > 0);
                columns.push(column);
                counts.push(count);
            }
            row_offsets.push(columns.len());
        }

        let column_lookup = features
            .iter()
            .enumerate()
            .map(|(i, f)| (f.clone(), i))
            .collect();

        DocumentFeatureMatrix {
            row_labels,
            features,
            row_offsets,
            columns,
            counts,
            warnings,
            column_lookup,
        }
    }

    /// Number of rows (documents).
    pub fn row_count(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of columns (features).
    pub fn column_count(&self) -> usize {
        self.features.len()
    }

    /// Number of stored non-zero cells.
    pub fn nnz(&self) -> usize {
        self.counts.len()
    }

    /// Document id of each row.
    pub fn row_labels(&self) -> &[DocId] {
        &self.row_labels
    }

    /// Feature of each column, in first-seen order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Documents flagged during the build.
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    /// Row index of a document.
    pub fn row_of(&self, id: DocId) -> Option<usize> {
        self.row_labels.binary_search(&id).ok()
    }

    /// Column index of a feature.
    pub fn column_of(&self, feature: &str) -> Option<usize> {
        self.column_lookup.get(feature).copied()
    }

    fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        self.row_offsets[row]..self.row_offsets[row + 1]
    }

    /// Count at `(row, column)`, zero when absent or out of bounds.
    pub fn get(&self, row: usize, column: usize) -> u32 {
        if row >= self.row_count() {
            return 0;
        }
        let range = self.row_range(row);
        let Ok(column) = u32::try_from(column) else {
            return 0;
        };
        match self.columns[range.clone()].binary_search(&column) {
            Ok(i) => self.counts[range.start + i],
            Err(_) => 0,
        }
    }

    /// Non-zero `(column, count)` entries of one row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        let range = if row < self.row_count() {
            self.row_range(row)
        } else {
            0..0
        };
        self.columns[range.clone()]
            .iter()
            .zip(&self.counts[range])
            .map(|(&c, &n)| (c as usize, n))
    }

    /// One row as a dense vector of column counts.
    pub fn to_dense_row(&self, row: usize) -> Option<Vec<u32>> {
        if row >= self.row_count() {
            return None;
        }
        let mut dense = vec![0; self.column_count()];
        for (column, count) in self.row(row) {
            dense[column] = count;
        }
        Some(dense)
    }

    /// Sum of all cells.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Sum of each row.
    pub fn row_totals(&self) -> Vec<u64> {
        (0..self.row_count())
            .map(|r| self.row(r).map(|(_, c)| u64::from(c)).sum())
            .collect()
    }

    /// Total count of each feature over all rows.
    pub fn feature_frequencies(&self) -> Vec<u64> {
        let mut totals = vec![0u64; self.column_count()];
        for (&column, &count) in self.columns.iter().zip(&self.counts) {
            totals[column as usize] += u64::from(count);
        }
        totals
    }

    /// Number of rows in which each feature occurs.
    pub fn document_frequencies(&self) -> Vec<usize> {
        let mut frequencies = vec![0usize; self.column_count()];
        for &column in &self.columns {
            frequencies[column as usize] += 1;
        }
        frequencies
    }

    /// The `n` most frequent features with their totals.
    ///
    /// Ties keep first-seen column order; `n` past the column count returns
    /// every column.
    pub fn top_features(&self, n: usize) -> Vec<(String, u64)> {
        let totals = self.feature_frequencies();
        let mut order: Vec<usize> = (0..self.column_count()).collect();
        order.sort_by(|&a, &b| totals[b].cmp(&totals[a]));
        order
            .into_iter()
            .take(n)
            .map(|i| (self.features[i].clone(), totals[i]))
            .collect()
    }

    /// Drop features found in fewer than `min_document_frequency` rows.
    ///
    /// Rows are all kept, even when they end up empty, and surviving columns
    /// keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidThreshold`](crate::error::TesseraError::InvalidThreshold)
    /// if the threshold is below 1.
    pub fn trim(&self, min_document_frequency: usize) -> Result<Self> {
        self.trim_with(TrimOptions::default().min_document_frequency(min_document_frequency))
    }

    /// Drop features below a document-frequency or total-count threshold.
    pub fn trim_with(&self, options: TrimOptions) -> Result<Self> {
        options.validate()?;
        let document_frequencies = self.document_frequencies();
        let feature_frequencies = self.feature_frequencies();

        let keep: Vec<bool> = document_frequencies
            .iter()
            .zip(&feature_frequencies)
            .map(|(&df, &tf)| {
                df >= options.min_document_frequency && tf >= options.min_term_frequency as u64
            })
            .collect();

        let trimmed = self.retain_columns(&keep);
        debug!(
            "Trimmed {} of {} features (min_docfreq={}, min_termfreq={})",
            self.column_count() - trimmed.column_count(),
            self.column_count(),
            options.min_document_frequency,
            options.min_term_frequency
        );
        Ok(trimmed)
    }

    /// Keep or remove the features matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Pattern`](crate::error::TesseraError::Pattern)
    /// for a pattern that does not compile.
    pub fn select(
        &self,
        pattern: &str,
        kind: PatternKind,
        mode: SelectionMode,
        case_sensitive: bool,
    ) -> Result<Self> {
        let regex = RegexMatcher::new().compile(&kind.to_regex(pattern), case_sensitive)?;
        let keep: Vec<bool> = self
            .features
            .iter()
            .map(|f| regex.is_match(f) == (mode == SelectionMode::Keep))
            .collect();
        Ok(self.retain_columns(&keep))
    }

    /// Rebuild with only the columns flagged in `keep`.
    fn retain_columns(&self, keep: &[bool]) -> Self {
        let mut remap = vec![None; self.column_count()];
        let mut features = Vec::new();
        for (old, feature) in self.features.iter().enumerate() {
            if keep[old] {
                remap[old] = Some(features.len() as u32);
                features.push(feature.clone());
            }
        }

        let rows = (0..self.row_count())
            .map(|r| {
                self.row(r)
                    .filter_map(|(column, count)| remap[column].map(|c| (c, count)))
                    .collect()
            })
            .collect();

        Self::from_rows(
            self.row_labels.clone(),
            features,
            rows,
            self.warnings.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TesseraError;

    // docs: 1 = {a:2, b:1}, 2 = {b:3, c:1}, 3 = {}
    fn sample() -> DocumentFeatureMatrix {
        DocumentFeatureMatrix::from_rows(
            vec![1, 2, 3],
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![(0, 2), (1, 1)], vec![(1, 3), (2, 1)], vec![]],
            Vec::new(),
        )
    }

    #[test]
    fn test_shape_and_get() {
        let dfm = sample();
        assert_eq!(dfm.row_count(), 3);
        assert_eq!(dfm.column_count(), 3);
        assert_eq!(dfm.nnz(), 4);
        assert_eq!(dfm.get(0, 0), 2);
        assert_eq!(dfm.get(0, 2), 0);
        assert_eq!(dfm.get(1, 1), 3);
        assert_eq!(dfm.get(9, 0), 0);
        assert_eq!(dfm.get(0, 99), 0);
    }

    #[test]
    fn test_frequencies() {
        let dfm = sample();
        assert_eq!(dfm.feature_frequencies(), vec![2, 4, 1]);
        assert_eq!(dfm.document_frequencies(), vec![1, 2, 1]);
        assert_eq!(dfm.row_totals(), vec![3, 4, 0]);
        assert_eq!(dfm.total(), 7);
    }

    #[test]
    fn test_lookup() {
        let dfm = sample();
        assert_eq!(dfm.row_of(2), Some(1));
        assert_eq!(dfm.row_of(7), None);
        assert_eq!(dfm.column_of("c"), Some(2));
        assert_eq!(dfm.column_of("z"), None);
        assert_eq!(dfm.to_dense_row(1), Some(vec![0, 3, 1]));
        assert_eq!(dfm.to_dense_row(3), None);
    }

    #[test]
    fn test_trim() {
        let dfm = sample();
        assert_eq!(dfm.trim(1).unwrap(), dfm);

        let trimmed = dfm.trim(2).unwrap();
        assert_eq!(trimmed.features(), &["b".to_string()]);
        assert_eq!(trimmed.row_count(), 3);
        assert_eq!(trimmed.get(1, 0), 3);
        assert_eq!(trimmed.column_of("b"), Some(0));

        let empty = dfm.trim(4).unwrap();
        assert_eq!(empty.column_count(), 0);
        assert_eq!(empty.row_count(), 3);
        assert_eq!(empty.total(), 0);

        assert!(matches!(dfm.trim(0), Err(TesseraError::InvalidThreshold(_))));
    }

    #[test]
    fn test_trim_by_term_frequency() {
        let trimmed = sample()
            .trim_with(TrimOptions::default().min_term_frequency(2))
            .unwrap();
        assert_eq!(trimmed.features(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_top_features_ties() {
        let dfm = DocumentFeatureMatrix::from_rows(
            vec![1],
            vec!["x".into(), "y".into(), "z".into()],
            vec![vec![(0, 1), (1, 2), (2, 1)]],
            Vec::new(),
        );
        assert_eq!(
            dfm.top_features(10),
            vec![("y".to_string(), 2), ("x".to_string(), 1), ("z".to_string(), 1)]
        );
        assert_eq!(dfm.top_features(1).len(), 1);
        assert!(dfm.top_features(0).is_empty());
    }

    #[test]
    fn test_select() {
        let dfm = DocumentFeatureMatrix::from_rows(
            vec![1],
            vec!["#brexit".into(), "@bob".into(), "vote".into()],
            vec![vec![(0, 1), (1, 1), (2, 1)]],
            Vec::new(),
        );
        let tags = dfm.select("#*", PatternKind::Glob, SelectionMode::Keep, true).unwrap();
        assert_eq!(tags.features(), &["#brexit".to_string()]);

        let no_mentions = dfm
            .select("^@", PatternKind::Regex, SelectionMode::Remove, true)
            .unwrap();
        assert_eq!(no_mentions.features(), &["#brexit".to_string(), "vote".to_string()]);
        assert_eq!(no_mentions.get(0, 1), 1);

        let fixed = dfm.select("VOTE", PatternKind::Fixed, SelectionMode::Keep, false).unwrap();
        assert_eq!(fixed.features(), &["vote".to_string()]);

        assert!(dfm.select("(", PatternKind::Regex, SelectionMode::Keep, true).is_err());
    }
}
