//! Keyword-in-context results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::corpus::document::DocId;

/// One keyword match with its surrounding tokens.
///
/// Contexts are shorter than the requested window at document boundaries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KwicResult {
    /// Document the match was found in.
    pub document_id: DocId,
    /// Position of the first matched token in the document's token sequence.
    pub position: usize,
    /// Up to `window` tokens before the match.
    pub pre_context: Vec<Token>,
    /// The matched token, or tokens for a phrase match.
    pub matched: Vec<Token>,
    /// Up to `window` tokens after the match.
    pub post_context: Vec<Token>,
}

impl KwicResult {
    fn join(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Pre-context joined with single spaces.
    pub fn pre_text(&self) -> String {
        Self::join(&self.pre_context)
    }

    /// Matched tokens joined with single spaces.
    pub fn matched_text(&self) -> String {
        Self::join(&self.matched)
    }

    /// Post-context joined with single spaces.
    pub fn post_text(&self) -> String {
        Self::join(&self.post_context)
    }
}

impl fmt::Display for KwicResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] {} | {} | {}",
            self.document_id,
            self.position,
            self.pre_text(),
            self.matched_text(),
            self.post_text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let result = KwicResult {
            document_id: 4,
            position: 2,
            pre_context: vec![Token::word("we", 0), Token::word("debated", 1)],
            matched: vec![Token::word("brexit", 2)],
            post_context: vec![Token::word("today", 3)],
        };
        assert_eq!(result.to_string(), "[4, 2] we debated | brexit | today");
        assert_eq!(result.post_text(), "today");
    }
}
