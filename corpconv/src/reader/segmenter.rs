//! Sentence boundary detection and sentence-ID resolution
//!
//! First reader stage. Groups raw input lines into [`RawSentence`]s according
//! to the sentence delimiter and resolves the sentence identifier, which can
//! be encoded three ways: a `# sent_id = <id>` comment before the sentence, a
//! leading in-line field on each content line, or an attribute on the opening
//! sentence tag.
//!
//! No input is fatal here. Structural violations go to the diagnostic channel
//! and the segmenter falls back to a synthesized ID of the form `s<N>`, where
//! N is the 1-based ordinal of the sentence among all sentences produced so
//! far. Unterminated trailing content at end of input is flushed with a
//! warning rather than dropped.

use crate::descriptor::{FormatDescriptor, SentenceDelimiter, SentenceIdPolicy};
use crate::diag::Diagnostics;
use crate::error::ConvertError;
use crate::sentence::{Line, RawSentence};
use crate::XmlOptions;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern for `# sent_id = <id>` comment lines.
static COMMENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s*sent_id\s*=\s*(.+)$").unwrap());

/// Builds a pattern matching an opening tag and capturing its quoted ID
/// attribute value. Attribute-aware scan after Goyvaerts and Levithan,
/// Regular Expressions Cookbook, 2nd ed., section 9.7.
fn attribute_pattern(tag: &str, attribute: &str) -> Result<Regex, ConvertError> {
    let pattern = format!(
        r#"<{tag}\s(?:[^>"']|"[^"]*"|'[^']*')*?\b{attribute}\s*=\s*("[^"]*"|'[^']*')(?:[^>"']|"[^"]*"|'[^']*')*>"#,
        tag = regex::escape(tag),
        attribute = regex::escape(attribute),
    );
    Regex::new(&pattern).map_err(|e| {
        ConvertError::InvalidXmlOptions(format!(
            "cannot scan for attribute '{attribute}' on tag '{tag}': {e}"
        ))
    })
}

/// Groups raw lines into sentences. One instance per pipeline run.
pub struct RawLineSegmenter<I> {
    lines: I,
    delimiter: SentenceDelimiter,
    id_policy: SentenceIdPolicy,
    open_plain: String,
    open_prefix: String,
    close_tag: String,
    attribute: Option<Regex>,
    diag: Diagnostics,
    line_number: usize,
    sentence_counter: usize,
    pending_id: Option<String>,
    buffer: Vec<Line>,
    // Newline mode: whether the next line may be an ID comment.
    expect_id: bool,
}

impl<I> RawLineSegmenter<I>
where
    I: Iterator<Item = String>,
{
    pub fn new(
        lines: I,
        descriptor: &FormatDescriptor,
        options: &XmlOptions,
        diag: Diagnostics,
    ) -> Result<Self, ConvertError> {
        if descriptor.sentence_delimiter == SentenceDelimiter::XmlTag {
            options.validate()?;
        }
        let attribute = if descriptor.sentence_id_policy == SentenceIdPolicy::XmlAttribute {
            Some(attribute_pattern(&options.tag, &options.id_attribute)?)
        } else {
            None
        };
        Ok(RawLineSegmenter {
            lines,
            delimiter: descriptor.sentence_delimiter,
            id_policy: descriptor.sentence_id_policy,
            open_plain: format!("<{}>", options.tag),
            open_prefix: format!("<{} ", options.tag),
            close_tag: format!("</{}>", options.tag),
            attribute,
            diag,
            line_number: 0,
            sentence_counter: 0,
            pending_id: None,
            buffer: Vec::new(),
            expect_id: true,
        })
    }

    fn next_line(&mut self) -> Option<Line> {
        let text = self.lines.next()?;
        self.line_number += 1;
        Some(Line {
            number: self.line_number,
            text,
        })
    }

    /// Consume the leading in-line ID field, if the policy asks for one.
    /// The last content line's value wins.
    fn strip_leading_id(&mut self, line: &mut Line) {
        let Some(delimiter) = self.id_policy.leading_delimiter() else {
            return;
        };
        match line.text.split_once(delimiter) {
            Some((id, rest)) => {
                self.pending_id = Some(id.to_string());
                line.text = rest.to_string();
            }
            None => self.diag.warn(
                Some(line.number),
                format!("expected a leading sentence ID field in line {}", line.number),
            ),
        }
    }

    /// Close the current sentence, synthesizing an ID when none was found.
    fn flush(&mut self, at_line: usize) -> RawSentence {
        self.sentence_counter += 1;
        let id = match self.pending_id.take() {
            Some(id) => id,
            None => {
                if self.id_policy != SentenceIdPolicy::None {
                    self.diag.warn(
                        Some(at_line),
                        format!(
                            "missing ID for sentence {} (line {})",
                            self.sentence_counter, at_line
                        ),
                    );
                }
                format!("s{}", self.sentence_counter)
            }
        };
        RawSentence {
            id,
            lines: std::mem::take(&mut self.buffer),
        }
    }

    fn next_empty_line(&mut self) -> Option<RawSentence> {
        loop {
            let Some(mut line) = self.next_line() else {
                if self.buffer.is_empty() && self.pending_id.is_none() {
                    return None;
                }
                self.diag.warn(
                    Some(self.line_number),
                    "missing sentence delimiter at end of input",
                );
                return Some(self.flush(self.line_number));
            };
            if line.text.is_empty() {
                if self.buffer.is_empty() {
                    if line.number == 1 {
                        self.diag
                            .warn(Some(line.number), "empty line at beginning of input");
                    } else {
                        self.diag.warn(
                            Some(line.number),
                            format!("consecutive empty lines (line {})", line.number),
                        );
                    }
                    continue;
                }
                return Some(self.flush(line.number));
            }
            if self.id_policy == SentenceIdPolicy::CommentLine && self.buffer.is_empty() {
                if let Some(captures) = COMMENT_ID.captures(&line.text) {
                    self.pending_id = Some(captures[1].to_string());
                    continue;
                }
                if self.pending_id.is_none() {
                    self.diag.warn(
                        Some(line.number),
                        format!("expected a sentence ID comment in line {}", line.number),
                    );
                }
            }
            self.strip_leading_id(&mut line);
            self.buffer.push(line);
        }
    }

    fn next_newline(&mut self) -> Option<RawSentence> {
        loop {
            let Some(mut line) = self.next_line() else {
                if self.pending_id.take().is_some() {
                    self.diag.warn(
                        Some(self.line_number),
                        "dangling sentence ID at end of input",
                    );
                }
                return None;
            };
            if line.text.is_empty() {
                self.diag
                    .warn(Some(line.number), format!("ignoring empty line {}", line.number));
                continue;
            }
            if self.id_policy == SentenceIdPolicy::CommentLine && self.expect_id {
                if let Some(captures) = COMMENT_ID.captures(&line.text) {
                    self.pending_id = Some(captures[1].to_string());
                    self.expect_id = false;
                    continue;
                }
                self.diag.warn(
                    Some(line.number),
                    format!("expected a sentence ID comment in line {}", line.number),
                );
            }
            self.strip_leading_id(&mut line);
            self.expect_id = true;
            let number = line.number;
            self.buffer.push(line);
            return Some(self.flush(number));
        }
    }

    fn next_xml(&mut self) -> Option<RawSentence> {
        loop {
            let Some(mut line) = self.next_line() else {
                if self.buffer.is_empty() && self.pending_id.is_none() {
                    return None;
                }
                self.diag.warn(
                    Some(self.line_number),
                    format!("missing closing tag {} at end of input", self.close_tag),
                );
                return Some(self.flush(self.line_number));
            };
            if line.text == self.close_tag {
                return Some(self.flush(line.number));
            }
            if let Some(pattern) = &self.attribute {
                if line.text == self.open_plain || line.text.starts_with(&self.open_prefix) {
                    match pattern.captures(&line.text) {
                        Some(captures) => {
                            let quoted = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
                            // strip the surrounding quotes
                            self.pending_id = Some(quoted[1..quoted.len() - 1].to_string());
                        }
                        None => self.diag.warn(
                            Some(line.number),
                            format!("expected a sentence ID attribute in line {}", line.number),
                        ),
                    }
                    continue;
                }
            }
            if line.text.starts_with('<') {
                // other top-level markup is not sentence content
                continue;
            }
            if line.text.is_empty() {
                self.diag
                    .warn(Some(line.number), format!("ignoring empty line {}", line.number));
                continue;
            }
            self.strip_leading_id(&mut line);
            self.buffer.push(line);
        }
    }
}

impl<I> Iterator for RawLineSegmenter<I>
where
    I: Iterator<Item = String>,
{
    type Item = RawSentence;

    fn next(&mut self) -> Option<RawSentence> {
        match self.delimiter {
            SentenceDelimiter::EmptyLine => self.next_empty_line(),
            SentenceDelimiter::Newline => self.next_newline(),
            SentenceDelimiter::XmlTag => self.next_xml(),
        }
    }
}
