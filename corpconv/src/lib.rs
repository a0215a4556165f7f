//! Descriptor-driven corpus format conversion
//!
//!     This crate converts text corpora between line-based formats. Instead of one
//!     bespoke parser per format, a format is described by six policy choices (the
//!     [`FormatDescriptor`]): sentence delimiter, token delimiter, field delimiter,
//!     sentence-ID policy, token-ID policy, and missing-value policy. A single
//!     generic reader/writer pipeline interprets any valid descriptor.
//!
//!     The model: a corpus consists of sentences separated by a sentence
//!     delimiter; a sentence consists of tokens separated by a token delimiter; a
//!     token consists of fields (word form, part of speech, lemma, ...) separated
//!     by a field delimiter. Sentences and tokens may carry IDs and fields may
//!     have missing values.
//!
//! Architecture
//!
//!     Reading is a three-stage, pull-based pipeline; each stage is an iterator
//!     adapter that produces at most one sentence ahead of its consumer:
//!
//!     raw lines -> [reader::segmenter] -> RawSentence
//!               -> [reader::tokens]    -> token strings + line numbers
//!               -> [reader::fields]    -> Sentence
//!
//!     Writing ([`writer`]) is the exact structural inverse, again lazy: a
//!     Sentence stream in, output lines out.
//!
//!     This is a pure lib, that is, it powers corpconv-cli but is shell agnostic:
//!     no printing, no process exit, no env access. Malformed input never aborts
//!     a run; every structural violation is reported on the per-run
//!     [`Diagnostics`] channel and the pipeline continues with a documented
//!     fallback (synthesized ID, skipped sentence, or pass-through). Only invalid
//!     configuration surfaces as a hard [`ConvertError`], and it surfaces before
//!     any input is consumed.
//!
//! Presets
//!
//!     Common fixed formats (CoNLL, TSV, VRT, OSL) are all expressible as
//!     descriptors and are provided as named presets via [`PresetRegistry`]
//!     rather than as separate code paths.

pub mod descriptor;
pub mod diag;
pub mod error;
pub mod reader;
pub mod registry;
pub mod sentence;
pub mod writer;

pub use descriptor::FormatDescriptor;
pub use diag::{Diagnostics, Warning};
pub use error::ConvertError;
pub use reader::read_sentences;
pub use registry::PresetRegistry;
pub use sentence::{Sentence, Token};
pub use writer::{write_sentences, Emitter};

/// Names used when sentences are delimited by markup tags.
///
/// Only consulted for descriptors with an XML sentence delimiter; other
/// formats ignore these options entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Tag that encloses one sentence.
    pub tag: String,
    /// Attribute on the opening tag that carries the sentence ID.
    pub id_attribute: String,
}

impl XmlOptions {
    pub fn new(tag: impl Into<String>, id_attribute: impl Into<String>) -> Self {
        XmlOptions {
            tag: tag.into(),
            id_attribute: id_attribute.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConvertError> {
        for (what, name) in [("tag", &self.tag), ("attribute", &self.id_attribute)] {
            if name.is_empty()
                || name
                    .chars()
                    .any(|c| c.is_whitespace() || c == '<' || c == '>' || c == '/')
            {
                return Err(ConvertError::InvalidXmlOptions(format!(
                    "not a valid XML {what} name: '{name}'"
                )));
            }
        }
        Ok(())
    }
}

impl Default for XmlOptions {
    fn default() -> Self {
        XmlOptions::new("s", "id")
    }
}

/// One-shot conversion between two descriptors.
///
/// Parses `source` under `from`, emits under `to`, and returns the output
/// text (every output line newline-terminated). The two pipelines run fused:
/// each sentence is emitted as soon as it is parsed. Warnings from both
/// directions accumulate on `diag`.
pub fn convert(
    source: &str,
    from: &FormatDescriptor,
    to: &FormatDescriptor,
    options: &XmlOptions,
    diag: &Diagnostics,
) -> Result<String, ConvertError> {
    let sentences = read_sentences(source.lines().map(str::to_string), from, options, diag)?;
    let mut output = String::new();
    for line in write_sentences(sentences, to, options, diag) {
        output.push_str(&line);
        output.push('\n');
    }
    Ok(output)
}
