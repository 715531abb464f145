//! Integration tests for corpus construction and keyword-in-context search.

use tessera::corpus::{Corpus, DocId, MetadataBuilder, MetadataValue};
use tessera::error::{Result, TesseraError};
use tessera::pattern::RegexMatcher;

fn tweets() -> Result<Corpus> {
    Corpus::build(
        vec![
            "we debated brexit today online",
            "@bob thinks #Brexit is done",
            "nothing about politics here",
            "Brexit brexit BREXIT",
        ],
        vec![
            MetadataBuilder::new().add_text("user", "alice").add_integer("likes", 3).build(),
            MetadataBuilder::new().add_text("user", "bob").build(),
            MetadataBuilder::new().add_text("user", "carol").add_boolean("verified", true).build(),
            MetadataBuilder::new().add_text("user", "alice").add_integer("likes", 10).build(),
        ],
    )
}

#[test]
fn test_kwic_window_of_two() -> Result<()> {
    let corpus = Corpus::from_texts(vec!["we debated brexit today online"]);
    let hits = corpus.kwic("brexit", 2, false)?;

    assert_eq!(hits.len(), 1);
    let hit = &hits[0];
    assert_eq!(hit.document_id, 1);
    assert_eq!(hit.position, 2);

    let pre: Vec<&str> = hit.pre_context.iter().map(|t| t.text.as_str()).collect();
    let matched: Vec<&str> = hit.matched.iter().map(|t| t.text.as_str()).collect();
    let post: Vec<&str> = hit.post_context.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(pre, vec!["we", "debated"]);
    assert_eq!(matched, vec!["brexit"]);
    assert_eq!(post, vec!["today", "online"]);

    Ok(())
}

#[test]
fn test_kwic_matches_tokens_not_substrings() -> Result<()> {
    let corpus = tweets()?;

    // The hashtag token "#Brexit" contains the pattern, so it matches too.
    let hits = corpus.kwic("brexit", 1, false)?;
    let ids: Vec<DocId> = hits.iter().map(|h| h.document_id).collect();
    assert_eq!(ids, vec![1, 2, 4, 4, 4]);

    let exact = corpus.kwic("^brexit$", 1, true)?;
    assert_eq!(exact.len(), 2);
    assert_eq!(exact[1].document_id, 4);
    assert_eq!(exact[1].pre_text(), "Brexit");
    assert_eq!(exact[1].post_text(), "BREXIT");

    Ok(())
}

#[test]
fn test_kwic_reports_bad_patterns() {
    let corpus = Corpus::from_texts(vec!["text"]);
    match corpus.kwic("(", 3, true) {
        Err(TesseraError::Pattern(_)) => {}
        other => panic!("expected a pattern error, got {other:?}"),
    }
}

#[test]
fn test_kwic_with_custom_matcher() -> Result<()> {
    let corpus = tweets()?;
    let matcher = RegexMatcher::new();
    let hits = corpus.kwic_with(&matcher, &["^#"], 0, false)?;

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].matched_text(), "#Brexit");
    assert!(hits[0].pre_context.is_empty());
    assert!(hits[0].post_context.is_empty());

    Ok(())
}

#[test]
fn test_schema_is_filled_with_nulls() -> Result<()> {
    let corpus = tweets()?;
    let schema: Vec<&str> = corpus.schema().iter().map(String::as_str).collect();
    assert_eq!(schema, vec!["likes", "user", "verified"]);

    for doc in corpus.documents() {
        assert_eq!(doc.metadata().len(), 3);
    }
    assert_eq!(corpus.get(2).and_then(|d| d.get("likes")), Some(&MetadataValue::Null));

    let likes = corpus.metadata_values("likes").unwrap();
    assert_eq!(likes[3].as_integer(), Some(10));

    Ok(())
}

#[test]
fn test_mismatched_rows_are_rejected() {
    let result = Corpus::build(vec!["a", "b", "c"], vec![MetadataBuilder::new().build()]);
    assert!(matches!(result, Err(TesseraError::SchemaMismatch(_))));
}

#[test]
fn test_subset_preserves_ids_and_order() -> Result<()> {
    let corpus = tweets()?;
    let alice = corpus.subset_where("user", "alice");

    let ids: Vec<DocId> = alice.documents().iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(alice.schema(), corpus.schema());

    let popular = corpus.subset(|row| {
        row.get("likes")
            .and_then(MetadataValue::as_integer)
            .is_some_and(|likes| likes > 5)
    });
    assert_eq!(popular.len(), 1);
    assert_eq!(popular.documents()[0].id(), 4);

    let none = corpus.subset(|_| false);
    assert!(none.is_empty());

    Ok(())
}

#[test]
fn test_summary_counts() -> Result<()> {
    let corpus = tweets()?;
    let summary = corpus.summary();

    assert_eq!(summary.len(), 4);
    // "@bob thinks #Brexit is done"
    assert_eq!(summary[1].tokens, 5);
    assert_eq!(summary[1].types, 5);
    // Default options are case sensitive.
    assert_eq!(summary[3].tokens, 3);
    assert_eq!(summary[3].types, 3);

    Ok(())
}

#[test]
fn test_invalid_utf8_is_skipped() -> Result<()> {
    let raw = vec![b"ok".to_vec(), vec![b'a', 0xc3], b"fine too".to_vec()];
    let rows = vec![MetadataBuilder::new().build(); 3];
    let corpus = Corpus::from_bytes(raw, rows)?;

    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.texts(), vec!["ok", "fine too"]);
    assert_eq!(corpus.warnings().len(), 1);
    assert_eq!(corpus.warnings()[0].document_id, 2);
    assert!(corpus.get(2).is_none());

    Ok(())
}
