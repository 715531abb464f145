//! Pattern matching over raw strings.
//!
//! The [`PatternMatcher`] trait is the seam between the library and a regular
//! expression engine: search, extraction and substitution all go through it.
//! Patterns are always applied to the full raw string, never to a tokenized
//! form, so extracting `@handles` or URLs does not depend on how the
//! tokenizer happens to be configured.
//!
//! [`RegexMatcher`] is the default backend, built on the `regex` crate. It
//! keeps compiled expressions in a small cache so repeated queries with the
//! same pattern (for example a KWIC search over thousands of documents) only
//! compile once.
//!
//! # Examples
//!
//! ```
//! use tessera::pattern::{PatternMatcher, RegexMatcher};
//!
//! let matcher = RegexMatcher::new();
//! let text = "one user is @one and another user is @another";
//! let handles: Vec<String> = matcher
//!     .find_all(text, "@[0-9_A-Za-z]+", true)
//!     .unwrap()
//!     .into_iter()
//!     .map(|m| m.matched_text)
//!     .collect();
//!
//! assert_eq!(handles, vec!["@one", "@another"]);
//! ```

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TesseraError};

/// Compiled expressions kept before the cache is flushed.
const MAX_CACHED_PATTERNS: usize = 256;

/// A single match inside a string.
///
/// `start` and `end` are byte offsets into the searched text, so
/// `&text[m.start..m.end] == m.matched_text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
    /// The matched substring.
    pub matched_text: String,
}

impl Match {
    fn from_regex(m: regex::Match<'_>) -> Self {
        Match {
            start: m.start(),
            end: m.end(),
            matched_text: m.as_str().to_string(),
        }
    }

    /// Length of the match in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the match is empty (a zero-width match).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Trait for regular-expression backends.
///
/// All methods report a malformed pattern as [`TesseraError::Pattern`]; a
/// pattern that fails to compile is never treated as "no match".
pub trait PatternMatcher: Send + Sync {
    /// Find the leftmost match of `pattern` in `text`.
    fn find_first(&self, text: &str, pattern: &str, case_sensitive: bool)
    -> Result<Option<Match>>;

    /// Find all non-overlapping matches, left to right.
    fn find_all(&self, text: &str, pattern: &str, case_sensitive: bool) -> Result<Vec<Match>>;

    /// Check whether `pattern` matches anywhere in `text`.
    fn contains(&self, text: &str, pattern: &str, case_sensitive: bool) -> Result<bool> {
        Ok(self.find_first(text, pattern, case_sensitive)?.is_some())
    }

    /// Count the non-overlapping matches of `pattern` in `text`.
    fn count(&self, text: &str, pattern: &str, case_sensitive: bool) -> Result<usize> {
        Ok(self.find_all(text, pattern, case_sensitive)?.len())
    }

    /// Replace the leftmost match. `$1`/`${name}` in `replacement` refer to
    /// capture groups.
    fn replace_first(&self, text: &str, pattern: &str, replacement: &str) -> Result<String>;

    /// Replace every non-overlapping match.
    fn replace_all(&self, text: &str, pattern: &str, replacement: &str) -> Result<String>;

    /// Get the name of this matcher (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// The default [`PatternMatcher`] backed by the `regex` crate.
#[derive(Debug, Default)]
pub struct RegexMatcher {
    cache: Mutex<AHashMap<(String, bool), Arc<Regex>>>,
}

impl RegexMatcher {
    /// Create a new matcher with an empty compile cache.
    pub fn new() -> Self {
        RegexMatcher {
            cache: Mutex::new(AHashMap::new()),
        }
    }

    /// Compile `pattern`, reusing a cached expression when possible.
    pub fn compile(&self, pattern: &str, case_sensitive: bool) -> Result<Arc<Regex>> {
        let key = (pattern.to_string(), case_sensitive);
        if let Some(regex) = self.cache.lock().get(&key) {
            return Ok(Arc::clone(regex));
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| TesseraError::pattern(format!("Invalid regex pattern {pattern:?}: {e}")))?;
        let regex = Arc::new(regex);

        let mut cache = self.cache.lock();
        if cache.len() >= MAX_CACHED_PATTERNS {
            cache.clear();
        }
        cache.insert(key, Arc::clone(&regex));

        Ok(regex)
    }

    /// Number of compiled expressions currently cached.
    pub fn cached_patterns(&self) -> usize {
        self.cache.lock().len()
    }
}

impl PatternMatcher for RegexMatcher {
    fn find_first(
        &self,
        text: &str,
        pattern: &str,
        case_sensitive: bool,
    ) -> Result<Option<Match>> {
        let regex = self.compile(pattern, case_sensitive)?;
        Ok(regex.find(text).map(Match::from_regex))
    }

    fn find_all(&self, text: &str, pattern: &str, case_sensitive: bool) -> Result<Vec<Match>> {
        let regex = self.compile(pattern, case_sensitive)?;
        Ok(regex.find_iter(text).map(Match::from_regex).collect())
    }

    fn contains(&self, text: &str, pattern: &str, case_sensitive: bool) -> Result<bool> {
        let regex = self.compile(pattern, case_sensitive)?;
        Ok(regex.is_match(text))
    }

    fn replace_first(&self, text: &str, pattern: &str, replacement: &str) -> Result<String> {
        let regex = self.compile(pattern, true)?;
        Ok(regex.replace(text, replacement).into_owned())
    }

    fn replace_all(&self, text: &str, pattern: &str, replacement: &str) -> Result<String> {
        let regex = self.compile(pattern, true)?;
        Ok(regex.replace_all(text, replacement).into_owned())
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

/// How a user-supplied pattern string should be interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// A regular expression, used as-is (search semantics).
    Regex,
    /// A whole-string glob with `*` and `?` wildcards.
    #[default]
    Glob,
    /// A literal string that must equal the whole input.
    Fixed,
}

impl PatternKind {
    /// Translate `pattern` into a regular expression with this kind's semantics.
    pub fn to_regex(self, pattern: &str) -> String {
        match self {
            PatternKind::Regex => pattern.to_string(),
            PatternKind::Glob => glob_to_regex(pattern),
            PatternKind::Fixed => format!("^{}$", regex::escape(pattern)),
        }
    }
}

/// Convert a glob (`*` = any run, `?` = any single character) into an
/// anchored regular expression.
pub fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');
    let mut literal = String::new();
    for c in glob.chars() {
        match c {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');
    out
}
