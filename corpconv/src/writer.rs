//! Descriptor-driven corpus emission
//!
//! The exact structural inverse of the reader. Per token: empty fields are
//! mapped back to the missing-value marker, then the token ID is re-inserted
//! at its field index (the inverse of extraction's removal), then fields are
//! joined by the field delimiter. Per sentence: tokens are joined by the
//! token delimiter and the body is wrapped according to the sentence
//! delimiter and ID policy. Output is a lazy sequence of lines.

use crate::descriptor::{
    FormatDescriptor, MissingValuePolicy, SentenceDelimiter, SentenceIdPolicy, TokenDelimiter,
    TokenIdPolicy,
};
use crate::diag::Diagnostics;
use crate::sentence::{insert_field, Sentence};
use crate::XmlOptions;
use std::collections::VecDeque;

/// Lazy line emitter over a sentence stream.
pub struct Emitter<I> {
    input: I,
    descriptor: FormatDescriptor,
    options: XmlOptions,
    diag: Diagnostics,
    pending: VecDeque<String>,
}

/// Assemble the emission pipeline over a sentence stream.
///
/// The returned iterator yields output lines (without trailing newlines) as
/// sentences are pulled from `sentences`.
pub fn write_sentences<I>(
    sentences: I,
    descriptor: &FormatDescriptor,
    options: &XmlOptions,
    diag: &Diagnostics,
) -> Emitter<I::IntoIter>
where
    I: IntoIterator<Item = Sentence>,
{
    Emitter {
        input: sentences.into_iter(),
        descriptor: descriptor.clone(),
        options: options.clone(),
        diag: diag.clone(),
        pending: VecDeque::new(),
    }
}

impl<I> Emitter<I> {
    fn emit(&self, sentence: &Sentence) -> Vec<String> {
        let mut rendered = Vec::with_capacity(sentence.tokens.len());
        for token in &sentence.tokens {
            let mut fields = token.fields.clone();
            match &self.descriptor.missing_value_policy {
                MissingValuePolicy::EmptyString => {}
                MissingValuePolicy::Forbidden => {
                    if fields.iter().any(String::is_empty) {
                        self.diag.warn(
                            None,
                            format!("empty field in sentence {}, token {}", sentence.id, token.id),
                        );
                    }
                }
                MissingValuePolicy::Marker(marker) => {
                    for field in &mut fields {
                        if field.is_empty() {
                            *field = marker.clone();
                        }
                    }
                }
            }
            if let TokenIdPolicy::FieldIndex(index) = self.descriptor.token_id_policy {
                fields = insert_field(&fields, index, &token.id);
            }
            let joined = match self.descriptor.field_delimiter.as_char() {
                Some(delimiter) => {
                    let separator = delimiter.to_string();
                    fields.join(&separator)
                }
                None if fields.len() > 1 => {
                    self.diag.warn(
                        None,
                        format!(
                            "no field delimiter but {} fields in sentence {}, token {}; skipping token",
                            fields.len(),
                            sentence.id,
                            token.id
                        ),
                    );
                    continue;
                }
                None => fields.pop().unwrap_or_default(),
            };
            rendered.push(joined);
        }

        let mut body: Vec<String> = match self.descriptor.token_delimiter {
            TokenDelimiter::Newline => rendered,
            TokenDelimiter::Space => vec![rendered.join(" ")],
            TokenDelimiter::Tab => vec![rendered.join("\t")],
        };
        if let Some(delimiter) = self.descriptor.sentence_id_policy.leading_delimiter() {
            // leading-field formats are single-line by construction
            if let Some(first) = body.first_mut() {
                let prefixed = format!("{}{}{}", sentence.id, delimiter, first);
                *first = prefixed;
            }
        }

        let mut lines = Vec::with_capacity(body.len() + 3);
        match self.descriptor.sentence_delimiter {
            SentenceDelimiter::XmlTag => {
                if self.descriptor.sentence_id_policy == SentenceIdPolicy::XmlAttribute {
                    lines.push(format!(
                        "<{} {}=\"{}\">",
                        self.options.tag, self.options.id_attribute, sentence.id
                    ));
                } else {
                    lines.push(format!("<{}>", self.options.tag));
                }
                lines.extend(body);
                lines.push(format!("</{}>", self.options.tag));
            }
            SentenceDelimiter::EmptyLine | SentenceDelimiter::Newline => {
                if self.descriptor.sentence_id_policy == SentenceIdPolicy::CommentLine {
                    lines.push(format!("# sent_id = {}", sentence.id));
                }
                lines.extend(body);
            }
        }
        if self.descriptor.sentence_delimiter == SentenceDelimiter::EmptyLine {
            lines.push(String::new());
        }
        lines
    }
}

impl<I> Iterator for Emitter<I>
where
    I: Iterator<Item = Sentence>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }
            let sentence = self.input.next()?;
            self.pending = self.emit(&sentence).into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::Token;

    fn emit(sentences: Vec<Sentence>, descriptor: &str, diag: &Diagnostics) -> Vec<String> {
        let descriptor: FormatDescriptor = descriptor.parse().unwrap();
        write_sentences(sentences, &descriptor, &XmlOptions::default(), diag).collect()
    }

    fn sentence(id: &str, tokens: &[(&str, &[&str])]) -> Sentence {
        Sentence::new(
            id,
            tokens
                .iter()
                .map(|(id, fields)| {
                    Token::new(*id, fields.iter().map(|f| f.to_string()).collect())
                })
                .collect(),
        )
    }

    #[test]
    fn test_conll_style_output() {
        let diag = Diagnostics::new();
        let input = vec![sentence(
            "s1",
            &[("1", &["A", "x"]), ("2", &["B", ""])],
        )];
        let lines = emit(input, "eltc0_", &diag);
        assert_eq!(
            lines,
            vec!["# sent_id = s1", "1\tA\tx", "2\tB\t_", ""]
        );
        assert!(diag.is_empty());
    }

    #[test]
    fn test_token_id_reinsertion_is_positional() {
        let diag = Diagnostics::new();
        let input = vec![sentence("s1", &[("3", &["word", "lemma"])])];
        let lines = emit(input, "eltn0e", &diag);
        assert_eq!(lines, vec!["3\tword\tlemma", ""]);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_xml_wrapping_with_attribute_id() {
        let diag = Diagnostics::new();
        let input = vec![sentence("s9", &[("t1", &["A", "x"])])];
        let lines = emit(input, "xltxne", &diag);
        assert_eq!(lines, vec!["<s id=\"s9\">", "A\tx", "</s>"]);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_xml_wrapping_without_id() {
        let diag = Diagnostics::new();
        let input = vec![sentence("s1", &[("t1", &["A"])])];
        let lines = emit(input, "xlnnne", &diag);
        assert_eq!(lines, vec!["<s>", "A", "</s>"]);
    }

    #[test]
    fn test_leading_id_field_prefix() {
        let diag = Diagnostics::new();
        let input = vec![sentence("u4", &[("t1", &["a", "b"]), ("t2", &["c", "d"])])];
        let lines = emit(input, "es/sne", &diag);
        assert_eq!(lines, vec!["u4 a/b c/d", ""]);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_single_line_sentences_without_ids() {
        let diag = Diagnostics::new();
        let input = vec![
            sentence("s1", &[("t1", &["a"]), ("t2", &["b"])]),
            sentence("s2", &[("t1", &["c"])]),
        ];
        let lines = emit(input, "lsnnne", &diag);
        assert_eq!(lines, vec!["a b", "c"]);
    }

    #[test]
    fn test_multi_field_token_without_field_delimiter_is_dropped() {
        let diag = Diagnostics::new();
        let input = vec![sentence("s1", &[("t1", &["a", "b"]), ("t2", &["c"])])];
        let lines = emit(input, "elnnne", &diag);
        assert_eq!(lines, vec!["c", ""]);
        assert_eq!(diag.warning_count(), 1);
    }

    #[test]
    fn test_forbidden_policy_warns_on_empty_fields() {
        let diag = Diagnostics::new();
        let input = vec![sentence("s1", &[("t1", &["a", ""])])];
        let lines = emit(input, "eltnnn", &diag);
        // the field is flagged but left unchanged
        assert_eq!(lines, vec!["a\t", ""]);
        assert_eq!(diag.warning_count(), 1);
    }

    #[test]
    fn test_zero_sentences_emit_zero_lines() {
        let diag = Diagnostics::new();
        let lines = emit(Vec::new(), "eltc0_", &diag);
        assert!(lines.is_empty());
        assert!(diag.is_empty());
    }

    #[test]
    fn test_zero_token_sentence_under_xml() {
        let diag = Diagnostics::new();
        let input = vec![sentence("u1", &[])];
        let lines = emit(input, "xltxne", &diag);
        assert_eq!(lines, vec!["<s id=\"u1\">", "</s>"]);
    }
}
