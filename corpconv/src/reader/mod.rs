//! Descriptor-driven corpus reading
//!
//! A three-stage, pull-based pipeline, one stage per module:
//!
//! - [`segmenter`]: groups raw lines into per-sentence line groups and
//!   resolves the sentence identifier
//! - [`tokens`]: splits each sentence's lines into token strings
//! - [`fields`]: splits tokens into fields, resolves the token ID, and
//!   normalizes missing values
//!
//! Each stage is an iterator adapter producing at most one sentence ahead of
//! its consumer. The running state a stage needs (sentence counter for ID
//! synthesis, field-count baseline) is owned by that stage for exactly one
//! run; nothing is shared between runs.

pub mod fields;
pub mod segmenter;
pub mod tokens;

pub use fields::FieldExtractor;
pub use segmenter::RawLineSegmenter;
pub use tokens::{TokenSegmenter, TokenizedSentence};

use crate::descriptor::FormatDescriptor;
use crate::diag::Diagnostics;
use crate::error::ConvertError;
use crate::sentence::Sentence;
use crate::XmlOptions;

/// Assemble the full reading pipeline over an iterator of raw lines.
///
/// Lines are expected without their trailing newline, as produced by
/// [`str::lines`]. The returned iterator yields sentences lazily; every
/// recoverable problem is reported through `diag` and parsing continues.
pub fn read_sentences<I>(
    lines: I,
    descriptor: &FormatDescriptor,
    options: &XmlOptions,
    diag: &Diagnostics,
) -> Result<impl Iterator<Item = Sentence>, ConvertError>
where
    I: Iterator<Item = String>,
{
    let raw = RawLineSegmenter::new(lines, descriptor, options, diag.clone())?;
    let tokenized = TokenSegmenter::new(raw, descriptor.token_delimiter, diag.clone());
    Ok(FieldExtractor::new(tokenized, descriptor, diag.clone()))
}
