//! Social-media aware tokenizer.
//!
//! At every position the scanner tries, in priority order, a URL, a mention,
//! a hashtag, a word run and a punctuation run, and emits the longest
//! candidate (earlier patterns win ties). Because the social patterns come
//! first, `#2020` is one hashtag rather than `#` followed by a number, and
//! that holds whether or not punctuation is being stripped.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::token::{Token, TokenKind};
use crate::analysis::tokenizer::{Tokenizer, TokenizerOptions};

static URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A(?i:https?://|www\.)").expect("valid URL prefix pattern"));
static URL_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\S+").expect("valid URL body pattern"));
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A@\w+").expect("valid mention pattern"));
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A#\w+").expect("valid hashtag pattern"));
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A\w+").expect("valid word pattern"));
// A lone `@`/`#` is its own token so it never glues onto a preceding run.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A(?:[@#]|[^\w\s@#]+)").expect("valid punctuation pattern"));

/// Characters a URL may not end with; they belong to the surrounding prose.
const URL_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '\'', '"', '>'];

/// A tokenizer for short social-media style texts.
#[derive(Clone, Debug, Default)]
pub struct SocialTokenizer {
    options: TokenizerOptions,
}

impl SocialTokenizer {
    /// Create a new tokenizer with the given options.
    pub fn new(options: TokenizerOptions) -> Self {
        SocialTokenizer { options }
    }

    /// Get the options this tokenizer was built with.
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Length in bytes and kind of the token starting at the beginning of `rest`.
    fn next_token(&self, rest: &str) -> (usize, TokenKind) {
        let mut best: Option<(usize, TokenKind)> = None;
        let mut consider = |len: usize, kind: TokenKind| {
            if len > 0 && best.is_none_or(|(best_len, _)| len > best_len) {
                best = Some((len, kind));
            }
        };

        if self.options.preserve_social_tokens {
            if let Some(len) = url_length(rest) {
                consider(len, TokenKind::Url);
            }
            if let Some(m) = MENTION.find(rest) {
                consider(m.end(), TokenKind::Mention);
            }
            if let Some(m) = HASHTAG.find(rest) {
                consider(m.end(), TokenKind::Hashtag);
            }
        }
        if let Some(m) = WORD.find(rest) {
            let kind = if m.as_str().chars().all(char::is_numeric) {
                TokenKind::Number
            } else {
                TokenKind::Word
            };
            consider(m.end(), kind);
        }
        if let Some(m) = PUNCTUATION.find(rest) {
            consider(m.end(), TokenKind::Punctuation);
        }

        // Every non-whitespace char is matched by either WORD or PUNCTUATION.
        best.unwrap_or_else(|| {
            let len = rest.chars().next().map_or(rest.len(), char::len_utf8);
            (len, TokenKind::Punctuation)
        })
    }

    fn keeps(&self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::Punctuation => !self.options.strip_punctuation,
            TokenKind::Number => !self.options.strip_numbers,
            TokenKind::Url => !self.options.strip_urls,
            _ => true,
        }
    }
}

/// Length of a URL at the start of `rest`, without trailing prose punctuation.
fn url_length(rest: &str) -> Option<usize> {
    let prefix = URL_PREFIX.find(rest)?;
    let body = URL_BODY.find(rest)?;
    let trimmed = body.as_str().trim_end_matches(URL_TRAILING);
    (trimmed.len() > prefix.end()).then_some(trimmed.len())
}

impl Tokenizer for SocialTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        while offset < text.len() {
            let rest = &text[offset..];
            let Some(c) = rest.chars().next() else {
                break;
            };
            if c.is_whitespace() {
                offset += c.len_utf8();
                continue;
            }

            let (len, kind) = self.next_token(rest);
            let start = offset;
            offset += len;

            if !self.keeps(kind) {
                continue;
            }

            let raw = &text[start..offset];
            let token_text = if self.options.lowercase {
                raw.to_lowercase()
            } else {
                raw.to_string()
            };
            tokens.push(Token::with_offsets(
                token_text,
                kind,
                tokens.len(),
                start,
                offset,
            ));
        }

        tokens
    }

    fn name(&self) -> &'static str {
        "social"
    }
}
