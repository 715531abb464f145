//! Documents and their metadata records.
//!
//! A [`Document`] is one input string plus a metadata record mapping field
//! names to [`MetadataValue`]s. Documents are created by corpus construction
//! and never mutated afterwards.
//!
//! # Examples
//!
//! ```
//! use tessera::corpus::document::{MetadataBuilder, MetadataValue};
//!
//! let row = MetadataBuilder::new()
//!     .add_text("party", "Labour")
//!     .add_integer("retweets", 12)
//!     .build();
//!
//! assert_eq!(row.get("party").and_then(MetadataValue::as_text), Some("Labour"));
//! assert_eq!(row.get("retweets").and_then(MetadataValue::as_integer), Some(12));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a document: its 1-based position in the input sequence.
pub type DocId = u64;

/// A metadata value attached to a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Missing value; fields absent from a row are filled with this.
    #[default]
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
}

impl MetadataValue {
    /// Check for the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, MetadataValue::Null)
    }

    /// Convert to text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float; integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(f) => Some(*f),
            MetadataValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Convert to boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            MetadataValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Null => f.write_str("NA"),
            MetadataValue::Boolean(b) => write!(f, "{b}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(x) => write!(f, "{x}"),
            MetadataValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Integer(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Boolean(value)
    }
}

/// A metadata record: field name to value, ordered by field name.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Builder for metadata records.
#[derive(Debug, Clone, Default)]
pub struct MetadataBuilder {
    fields: Metadata,
}

impl MetadataBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        MetadataBuilder {
            fields: Metadata::new(),
        }
    }

    /// Add a text field.
    pub fn add_text<S: Into<String>, T: Into<String>>(mut self, name: S, value: T) -> Self {
        self.fields
            .insert(name.into(), MetadataValue::Text(value.into()));
        self
    }

    /// Add an integer field.
    pub fn add_integer<S: Into<String>>(mut self, name: S, value: i64) -> Self {
        self.fields.insert(name.into(), MetadataValue::Integer(value));
        self
    }

    /// Add a float field.
    pub fn add_float<S: Into<String>>(mut self, name: S, value: f64) -> Self {
        self.fields.insert(name.into(), MetadataValue::Float(value));
        self
    }

    /// Add a boolean field.
    pub fn add_boolean<S: Into<String>>(mut self, name: S, value: bool) -> Self {
        self.fields.insert(name.into(), MetadataValue::Boolean(value));
        self
    }

    /// Add any value.
    pub fn add<S: Into<String>, V: Into<MetadataValue>>(mut self, name: S, value: V) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Build the record.
    pub fn build(self) -> Metadata {
        self.fields
    }
}

/// A single document of a corpus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: DocId,
    text: String,
    metadata: Metadata,
}

impl Document {
    pub(crate) fn new(id: DocId, text: String, metadata: Metadata) -> Self {
        Document { id, text, metadata }
    }

    /// The document identifier.
    pub fn id(&self) -> DocId {
        self.id
    }

    /// The raw document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The full metadata record.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Get a metadata value by field name.
    pub fn get(&self, field: &str) -> Option<&MetadataValue> {
        self.metadata.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let row = MetadataBuilder::new()
            .add_text("user", "bob")
            .add_float("score", 0.5)
            .add_boolean("verified", true)
            .add("followers", 10_i64)
            .build();

        assert_eq!(row.len(), 4);
        assert_eq!(row["user"].as_text(), Some("bob"));
        assert_eq!(row["score"].as_float(), Some(0.5));
        assert_eq!(row["verified"].as_boolean(), Some(true));
        assert_eq!(row["followers"].as_float(), Some(10.0));
    }

    #[test]
    fn test_untagged_json() {
        let row: Metadata =
            serde_json::from_str(r#"{"a": null, "b": true, "c": 3, "d": 1.5, "e": "x"}"#).unwrap();
        assert!(row["a"].is_null());
        assert_eq!(row["b"], MetadataValue::Boolean(true));
        assert_eq!(row["c"], MetadataValue::Integer(3));
        assert_eq!(row["d"], MetadataValue::Float(1.5));
        assert_eq!(row["e"], MetadataValue::Text("x".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(MetadataValue::Null.to_string(), "NA");
        assert_eq!(MetadataValue::from("x").to_string(), "x");
        assert_eq!(MetadataValue::from(7_i64).to_string(), "7");
    }

    #[test]
    fn test_document_accessors() {
        let doc = Document::new(3, "hello".to_string(), MetadataBuilder::new().add_text("k", "v").build());
        assert_eq!(doc.id(), 3);
        assert_eq!(doc.text(), "hello");
        assert_eq!(doc.get("k").and_then(MetadataValue::as_text), Some("v"));
        assert!(doc.get("missing").is_none());
    }
}
