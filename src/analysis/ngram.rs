//! Token n-gram expansion.
//!
//! Turns a token sequence into compound features: every contiguous window of
//! `n` tokens for each order `n` in a range, joined by a separator. Output is
//! grouped by order (all unigrams, then all bigrams, …) and each group keeps
//! left-to-right order; the matrix builder relies on that traversal for its
//! first-seen column order.
//!
//! # Examples
//!
//! ```
//! use tessera::analysis::ngram::expand;
//!
//! let grams = expand(&["a", "b", "c"], 1, 2, "_").unwrap();
//! assert_eq!(grams, vec!["a", "b", "c", "a_b", "b_c"]);
//! ```

use crate::analysis::token::Token;
use crate::error::{Result, TesseraError};

/// Default separator between the tokens of an n-gram.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Expand `tokens` into all n-grams with order in `min_order..=max_order`.
///
/// # Errors
///
/// Returns [`TesseraError::InvalidRange`] if either bound is 0 or
/// `min_order > max_order`.
pub fn expand<S: AsRef<str>>(
    tokens: &[S],
    min_order: usize,
    max_order: usize,
    separator: &str,
) -> Result<Vec<String>> {
    let expander = NgramExpander::new(min_order, max_order)?.with_separator(separator);
    Ok(expander.expand(tokens))
}

/// Configured n-gram expander.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NgramExpander {
    /// Minimum n-gram order
    min_order: usize,
    /// Maximum n-gram order
    max_order: usize,
    separator: String,
    allow_mixed_kinds: bool,
}

impl NgramExpander {
    /// Create a new n-gram expander.
    ///
    /// # Arguments
    ///
    /// * `min_order` - Minimum n-gram order (must be >= 1)
    /// * `max_order` - Maximum n-gram order (must be >= min_order)
    pub fn new(min_order: usize, max_order: usize) -> Result<Self> {
        if min_order == 0 || max_order == 0 {
            return Err(TesseraError::invalid_range(format!(
                "n-gram orders must be at least 1 (got {min_order}..={max_order})"
            )));
        }
        if min_order > max_order {
            return Err(TesseraError::invalid_range(format!(
                "min_order ({min_order}) must be <= max_order ({max_order})"
            )));
        }
        Ok(NgramExpander {
            min_order,
            max_order,
            separator: DEFAULT_SEPARATOR.to_string(),
            allow_mixed_kinds: true,
        })
    }

    /// Unigrams only.
    pub fn unigram() -> Self {
        NgramExpander {
            min_order: 1,
            max_order: 1,
            separator: DEFAULT_SEPARATOR.to_string(),
            allow_mixed_kinds: true,
        }
    }

    /// Set the separator placed between joined tokens.
    pub fn with_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set whether a window may combine tokens of different kinds.
    pub fn allow_mixed_kinds(mut self, allow: bool) -> Self {
        self.allow_mixed_kinds = allow;
        self
    }

    /// Minimum order.
    pub fn min_order(&self) -> usize {
        self.min_order
    }

    /// Maximum order.
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Expand a plain string sequence.
    pub fn expand<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        self.expand_windows(tokens.len(), |i| tokens[i].as_ref(), |_| true)
    }

    /// Expand classified tokens, honoring the mixed-kind setting.
    pub fn expand_tokens(&self, tokens: &[Token]) -> Vec<String> {
        self.expand_windows(
            tokens.len(),
            |i| tokens[i].text.as_str(),
            |window: std::ops::Range<usize>| {
                self.allow_mixed_kinds || {
                    let kind = tokens[window.start].kind;
                    tokens[window].iter().all(|t| t.kind == kind)
                }
            },
        )
    }

    fn expand_windows<'a, T, W>(&self, len: usize, text: T, keep: W) -> Vec<String>
    where
        T: Fn(usize) -> &'a str,
        W: Fn(std::ops::Range<usize>) -> bool,
    {
        let mut grams = Vec::new();
        for n in self.min_order..=self.max_order {
            if n > len {
                break;
            }
            for start in 0..=len - n {
                if n > 1 && !keep(start..start + n) {
                    continue;
                }
                let mut gram = String::from(text(start));
                for i in start + 1..start + n {
                    gram.push_str(&self.separator);
                    gram.push_str(text(i));
                }
                grams.push(gram);
            }
        }
        grams
    }
}
