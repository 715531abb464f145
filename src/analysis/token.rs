//! Token types for text analysis.
//!
//! A [`Token`] is a classified substring of a document: its (possibly
//! lowercased) text, its [`TokenKind`], its position in the token sequence and
//! the byte offsets of the source span in the original text. Tokens are
//! produced transiently by a tokenizer and flow through the filters of the
//! feature pipeline; they are never stored on their own.
//!
//! # Examples
//!
//! ```
//! use tessera::analysis::token::{Token, TokenKind};
//!
//! let token = Token::with_offsets("@Handle", TokenKind::Mention, 0, 0, 7);
//! assert_eq!(token.text, "@Handle");
//! assert!(token.is_social());
//! assert_eq!(token.with_text("@handle").text, "@handle");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a token's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Runs of letters, digits and underscores that are not purely numeric.
    Word,
    /// `@handle`
    Mention,
    /// `#tag`
    Hashtag,
    /// `http(s)://…` or `www.…`
    Url,
    /// Runs of symbols that are neither word characters nor whitespace.
    Punctuation,
    /// Runs of digits.
    Number,
}

impl TokenKind {
    /// Short lowercase name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Word => "word",
            TokenKind::Mention => "mention",
            TokenKind::Hashtag => "hashtag",
            TokenKind::Url => "url",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Number => "number",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// What kind of substring this token was classified as
    pub kind: TokenKind,

    /// The position of the token in the token sequence (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with the given text, kind and position.
    pub fn new<S: Into<String>>(text: S, kind: TokenKind, position: usize) -> Self {
        Token {
            text: text.into(),
            kind,
            position,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Create a new token with text, kind, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        kind: TokenKind,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            kind,
            position,
            start_offset,
            end_offset,
        }
    }

    /// Create a word token (convenience for tests and hand-built sequences).
    pub fn word<S: Into<String>>(text: S, position: usize) -> Self {
        Token::new(text, TokenKind::Word, position)
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether this token is a mention, hashtag or URL.
    pub fn is_social(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Mention | TokenKind::Hashtag | TokenKind::Url
        )
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Renumber positions after tokens were removed so they stay dense.
pub fn renumber(tokens: &mut [Token]) {
    for (position, token) in tokens.iter_mut().enumerate() {
        token.position = position;
    }
}
