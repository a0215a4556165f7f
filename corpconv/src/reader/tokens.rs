//! Token segmentation
//!
//! Second reader stage: splits each sentence's lines into token strings,
//! carrying the source line number of every token for downstream
//! diagnostics. Space and tab token delimiters assume one sentence per
//! physical line; a sentence that violates that assumption cannot have its
//! fields attributed safely and is dropped with a warning.

use crate::descriptor::TokenDelimiter;
use crate::diag::Diagnostics;
use crate::sentence::RawSentence;

/// A sentence split into token strings, aligned 1:1 with source line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedSentence {
    pub id: String,
    pub tokens: Vec<String>,
    pub lines: Vec<usize>,
}

pub struct TokenSegmenter<I> {
    input: I,
    delimiter: TokenDelimiter,
    diag: Diagnostics,
}

impl<I> TokenSegmenter<I>
where
    I: Iterator<Item = RawSentence>,
{
    pub fn new(input: I, delimiter: TokenDelimiter, diag: Diagnostics) -> Self {
        TokenSegmenter {
            input,
            delimiter,
            diag,
        }
    }
}

impl<I> Iterator for TokenSegmenter<I>
where
    I: Iterator<Item = RawSentence>,
{
    type Item = TokenizedSentence;

    fn next(&mut self) -> Option<TokenizedSentence> {
        loop {
            let raw = self.input.next()?;
            let Some(delimiter) = self.delimiter.as_char() else {
                // one token per line
                return Some(TokenizedSentence {
                    id: raw.id,
                    tokens: raw.lines.iter().map(|l| l.text.clone()).collect(),
                    lines: raw.lines.iter().map(|l| l.number).collect(),
                });
            };
            if raw.lines.len() > 1 {
                let first = raw.lines[0].number;
                let last = raw.lines[raw.lines.len() - 1].number;
                self.diag.warn(
                    Some(first),
                    format!(
                        "sentence {} spans multiple lines ({first}-{last}); skipping sentence",
                        raw.id
                    ),
                );
                continue;
            }
            let Some(line) = raw.lines.first() else {
                return Some(TokenizedSentence {
                    id: raw.id,
                    tokens: Vec::new(),
                    lines: Vec::new(),
                });
            };
            let tokens: Vec<String> = line.text.split(delimiter).map(str::to_string).collect();
            let lines = vec![line.number; tokens.len()];
            return Some(TokenizedSentence {
                id: raw.id,
                tokens,
                lines,
            });
        }
    }
}
