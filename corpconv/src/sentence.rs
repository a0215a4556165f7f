//! Pipeline value objects
//!
//! Immutable values flowing through the pipeline. [`RawSentence`] and
//! [`Line`] are transient: produced by the segmenter, consumed immediately by
//! the token stage, never persisted. [`Sentence`] and [`Token`] are the
//! public data model.

use serde::Serialize;

/// One raw input line with its 1-based position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

/// A sentence as grouped by the segmenter: the resolved (or synthesized) ID
/// plus the content lines it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSentence {
    pub id: String,
    pub lines: Vec<Line>,
}

/// The minimal annotated unit (e.g. a word): an ID and an ordered list of
/// fields. An empty-string field denotes a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub id: String,
    pub fields: Vec<String>,
}

impl Token {
    pub fn new(id: impl Into<String>, fields: Vec<String>) -> Self {
        Token {
            id: id.into(),
            fields,
        }
    }
}

/// An ordered group of tokens sharing one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub id: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(id: impl Into<String>, tokens: Vec<Token>) -> Self {
        Sentence {
            id: id.into(),
            tokens,
        }
    }
}

/// Copy of `fields` without the element at `index`, paired with the removed
/// element. `None` when `index` is out of range.
pub(crate) fn remove_field(fields: &[String], index: usize) -> Option<(String, Vec<String>)> {
    if index >= fields.len() {
        return None;
    }
    let mut remaining = Vec::with_capacity(fields.len() - 1);
    remaining.extend_from_slice(&fields[..index]);
    remaining.extend_from_slice(&fields[index + 1..]);
    Some((fields[index].clone(), remaining))
}

/// Copy of `fields` with `value` inserted at `index`; an index past the end
/// appends. Exact inverse of [`remove_field`] for in-range indices.
pub(crate) fn insert_field(fields: &[String], index: usize, value: &str) -> Vec<String> {
    let index = index.min(fields.len());
    let mut extended = Vec::with_capacity(fields.len() + 1);
    extended.extend_from_slice(&fields[..index]);
    extended.push(value.to_string());
    extended.extend_from_slice(&fields[index..]);
    extended
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_remove_field_shifts_later_indices_down() {
        let (id, rest) = remove_field(&fields(&["3", "word", "lemma"]), 0).unwrap();
        assert_eq!(id, "3");
        assert_eq!(rest, fields(&["word", "lemma"]));

        let (id, rest) = remove_field(&fields(&["word", "3", "lemma"]), 1).unwrap();
        assert_eq!(id, "3");
        assert_eq!(rest, fields(&["word", "lemma"]));
    }

    #[test]
    fn test_remove_field_out_of_range() {
        assert!(remove_field(&fields(&["a"]), 1).is_none());
        assert!(remove_field(&[], 0).is_none());
    }

    #[test]
    fn test_insert_field_is_the_inverse_of_remove_field() {
        let original = fields(&["3", "word", "lemma"]);
        for index in 0..original.len() {
            let (value, rest) = remove_field(&original, index).unwrap();
            assert_eq!(insert_field(&rest, index, &value), original);
        }
    }

    #[test]
    fn test_insert_field_clamps_past_the_end() {
        assert_eq!(
            insert_field(&fields(&["a", "b"]), 9, "z"),
            fields(&["a", "b", "z"])
        );
    }
}
