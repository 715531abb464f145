//! Integration tests for pattern extraction and substitution over raw text.

use tessera::error::{Result, TesseraError};
use tessera::pattern::{PatternKind, PatternMatcher, RegexMatcher, glob_to_regex};

#[test]
fn test_extract_handles_in_order() -> Result<()> {
    let matcher = RegexMatcher::new();
    let text = "one user is @one and another user is @another";
    let matches = matcher.find_all(text, "@[0-9_A-Za-z]+", true)?;

    let handles: Vec<&str> = matches.iter().map(|m| m.matched_text.as_str()).collect();
    assert_eq!(handles, vec!["@one", "@another"]);
    for m in &matches {
        assert_eq!(&text[m.start..m.end], m.matched_text);
    }
    Ok(())
}

#[test]
fn test_matching_uses_the_raw_string() -> Result<()> {
    let matcher = RegexMatcher::new();
    // A URL spans what the tokenizer could split on punctuation.
    let text = "read https://t.co/AbC123 now, then vote!";
    let url = matcher.find_first(text, r"https?://\S+", true)?;
    assert_eq!(url.map(|m| m.matched_text), Some("https://t.co/AbC123".to_string()));
    assert!(matcher.contains(text, "now, then", true)?);
    Ok(())
}

#[test]
fn test_case_insensitive_search() -> Result<()> {
    let matcher = RegexMatcher::new();
    assert_eq!(matcher.count("Brexit BREXIT brexit", "brexit", false)?, 3);
    assert_eq!(matcher.count("Brexit BREXIT brexit", "brexit", true)?, 1);
    assert!(matcher.find_first("nothing here", "brexit", false)?.is_none());
    assert!(matcher.find_all("nothing here", "brexit", false)?.is_empty());
    Ok(())
}

#[test]
fn test_cleaning_with_replacements() -> Result<()> {
    let matcher = RegexMatcher::new();
    let text = "RT @bob: so true https://t.co/x #tcot";

    let no_urls = matcher.replace_all(text, r"https?://\S+\s*", "")?;
    assert_eq!(no_urls, "RT @bob: so true #tcot");

    let no_rt = matcher.replace_first(&no_urls, r"^RT @\w+:\s*", "")?;
    assert_eq!(no_rt, "so true #tcot");

    let swapped = matcher.replace_all("a-b-c", "-", "+")?;
    assert_eq!(swapped, "a+b+c");
    Ok(())
}

#[test]
fn test_malformed_patterns_are_errors() {
    let matcher = RegexMatcher::new();
    for pattern in ["(", "[a-", "a{2,1}"] {
        assert!(
            matches!(matcher.find_all("abc", pattern, true), Err(TesseraError::Pattern(_))),
            "{pattern}"
        );
        assert!(matcher.contains("abc", pattern, false).is_err());
        assert!(matcher.replace_all("abc", pattern, "x").is_err());
    }
}

#[test]
fn test_pattern_kinds() -> Result<()> {
    let matcher = RegexMatcher::new();

    let glob = PatternKind::Glob.to_regex("vot*");
    assert!(matcher.contains("voters", &glob, true)?);
    assert!(!matcher.contains("devote", &glob, true)?);

    let fixed = PatternKind::Fixed.to_regex("a.b");
    assert!(matcher.contains("a.b", &fixed, true)?);
    assert!(!matcher.contains("axb", &fixed, true)?);

    assert_eq!(glob_to_regex("?x"), "^.x$");
    Ok(())
}
