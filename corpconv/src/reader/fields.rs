//! Field extraction and normalization
//!
//! Final reader stage. Splits token strings into field lists, resolves the
//! token ID, and normalizes missing-value markers. The field count of the
//! first token of the run becomes the baseline; tokens that deviate from it
//! are reported with their source line but kept as-is.

use crate::descriptor::{FieldDelimiter, FormatDescriptor, MissingValuePolicy, TokenIdPolicy};
use crate::diag::Diagnostics;
use crate::reader::tokens::TokenizedSentence;
use crate::sentence::{remove_field, Sentence, Token};

pub struct FieldExtractor<I> {
    input: I,
    field_delimiter: FieldDelimiter,
    token_id_policy: TokenIdPolicy,
    missing: MissingValuePolicy,
    baseline: Option<usize>,
    diag: Diagnostics,
}

impl<I> FieldExtractor<I>
where
    I: Iterator<Item = TokenizedSentence>,
{
    pub fn new(input: I, descriptor: &FormatDescriptor, diag: Diagnostics) -> Self {
        FieldExtractor {
            input,
            field_delimiter: descriptor.field_delimiter,
            token_id_policy: descriptor.token_id_policy,
            missing: descriptor.missing_value_policy.clone(),
            baseline: None,
            diag,
        }
    }

    fn extract(&mut self, position: usize, text: &str, line: usize) -> Token {
        let mut fields: Vec<String> = match self.field_delimiter.as_char() {
            Some(delimiter) => text.split(delimiter).map(str::to_string).collect(),
            None => vec![text.to_string()],
        };
        match self.baseline {
            Some(expected) if fields.len() != expected => self.diag.warn(
                Some(line),
                format!("line {line} has {} fields instead of {expected}", fields.len()),
            ),
            Some(_) => {}
            None => self.baseline = Some(fields.len()),
        }
        let id = match self.token_id_policy {
            TokenIdPolicy::None => format!("t{position}"),
            TokenIdPolicy::FieldIndex(index) => match remove_field(&fields, index) {
                Some((id, remaining)) => {
                    fields = remaining;
                    id
                }
                None => {
                    self.diag.warn(
                        Some(line),
                        format!("token ID field {index} out of range in line {line}"),
                    );
                    format!("t{position}")
                }
            },
        };
        match &self.missing {
            MissingValuePolicy::EmptyString => {}
            MissingValuePolicy::Forbidden => {
                if fields.iter().any(String::is_empty) {
                    self.diag
                        .warn(Some(line), format!("empty field in line {line}"));
                }
            }
            MissingValuePolicy::Marker(marker) => {
                for field in &mut fields {
                    if field == marker {
                        field.clear();
                    }
                }
            }
        }
        Token { id, fields }
    }
}

impl<I> Iterator for FieldExtractor<I>
where
    I: Iterator<Item = TokenizedSentence>,
{
    type Item = Sentence;

    fn next(&mut self) -> Option<Sentence> {
        let tokenized = self.input.next()?;
        let mut tokens = Vec::with_capacity(tokenized.tokens.len());
        for (position, (text, line)) in tokenized
            .tokens
            .iter()
            .zip(&tokenized.lines)
            .enumerate()
        {
            tokens.push(self.extract(position + 1, text, *line));
        }
        Some(Sentence {
            id: tokenized.id,
            tokens,
        })
    }
}
