//! The six-dimensional format descriptor
//!
//! A corpus format is fully described by six policy choices. The compact
//! string form is one character per dimension:
//!
//! ```text
//! pos1 sentence delimiter : e=empty-line | l=newline | x=xml-tag
//! pos2 token delimiter    : l=newline    | s=space   | t=tab
//! pos3 field delimiter    : n=none       | s=space   | t=tab | <char>=literal
//! pos4 sentence id policy : c=comment    | n=none    | s=space-prefixed | t=tab-prefixed | x=xml-attribute
//! pos5 token id policy    : n=none       | <digit>=zero-based field index
//! pos6 missing value      : e=empty-string | n=forbidden | <char>=marker
//! ```
//!
//! Cross-field constraints are enforced once, at construction, so the
//! pipeline stages can assume only valid, fully-resolved policy values and
//! never re-check them per sentence.

use crate::error::ConvertError;
use std::fmt;
use std::str::FromStr;

/// How sentences are separated in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceDelimiter {
    /// A blank line ends each sentence.
    EmptyLine,
    /// Every non-blank line is one sentence.
    Newline,
    /// Sentences are enclosed in an opening/closing tag pair on their own lines.
    XmlTag,
}

/// How tokens are separated within a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenDelimiter {
    /// One token per line.
    Newline,
    Space,
    Tab,
}

impl TokenDelimiter {
    /// The in-line splitting character; `None` for the one-token-per-line case.
    pub fn as_char(self) -> Option<char> {
        match self {
            TokenDelimiter::Newline => None,
            TokenDelimiter::Space => Some(' '),
            TokenDelimiter::Tab => Some('\t'),
        }
    }
}

/// How fields are separated within a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDelimiter {
    /// No token-level annotation: the whole token string is its single field.
    None,
    Space,
    Tab,
    /// Any literal character, e.g. `/` in `word/TAG`.
    Custom(char),
}

impl FieldDelimiter {
    pub fn as_char(self) -> Option<char> {
        match self {
            FieldDelimiter::None => None,
            FieldDelimiter::Space => Some(' '),
            FieldDelimiter::Tab => Some('\t'),
            FieldDelimiter::Custom(c) => Some(c),
        }
    }
}

/// Where the sentence ID is encoded, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceIdPolicy {
    /// A `# sent_id = <id>` comment line before the sentence.
    CommentLine,
    None,
    /// First space-separated field of each content line.
    LeadingSpaceField,
    /// First tab-separated field of each content line.
    LeadingTabField,
    /// An attribute on the opening sentence tag.
    XmlAttribute,
}

impl SentenceIdPolicy {
    /// Delimiter separating a leading in-line ID field from the content.
    pub(crate) fn leading_delimiter(self) -> Option<char> {
        match self {
            SentenceIdPolicy::LeadingSpaceField => Some(' '),
            SentenceIdPolicy::LeadingTabField => Some('\t'),
            _ => None,
        }
    }
}

/// Where the token ID is encoded, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenIdPolicy {
    None,
    /// The field at this zero-based index is the token ID. Reading removes it
    /// from the field list; writing inserts it back at the same position.
    FieldIndex(usize),
}

/// How missing field values are represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingValuePolicy {
    /// The empty string is the missing-value representation.
    EmptyString,
    /// Missing values are not allowed; empty fields are flagged.
    Forbidden,
    /// A literal marker stands for a missing value, e.g. `_` in CoNLL.
    Marker(String),
}

/// Validated 6-tuple of policy choices describing one corpus format.
///
/// Construct via [`FormatDescriptor::new`] or parse the compact string form;
/// both reject contradictory combinations so downstream code never sees an
/// invalid descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub sentence_delimiter: SentenceDelimiter,
    pub token_delimiter: TokenDelimiter,
    pub field_delimiter: FieldDelimiter,
    pub sentence_id_policy: SentenceIdPolicy,
    pub token_id_policy: TokenIdPolicy,
    pub missing_value_policy: MissingValuePolicy,
}

impl FormatDescriptor {
    pub fn new(
        sentence_delimiter: SentenceDelimiter,
        token_delimiter: TokenDelimiter,
        field_delimiter: FieldDelimiter,
        sentence_id_policy: SentenceIdPolicy,
        token_id_policy: TokenIdPolicy,
        missing_value_policy: MissingValuePolicy,
    ) -> Result<Self, ConvertError> {
        let descriptor = FormatDescriptor {
            sentence_delimiter,
            token_delimiter,
            field_delimiter,
            sentence_id_policy,
            token_id_policy,
            missing_value_policy,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    fn validate(&self) -> Result<(), ConvertError> {
        if self.sentence_delimiter == SentenceDelimiter::Newline
            && self.token_delimiter == TokenDelimiter::Newline
        {
            return Err(ConvertError::InvalidCombination(
                "cannot use newline as both sentence and token delimiter".to_string(),
            ));
        }
        let token_char = match self.token_delimiter {
            TokenDelimiter::Newline => '\n',
            TokenDelimiter::Space => ' ',
            TokenDelimiter::Tab => '\t',
        };
        if self.field_delimiter.as_char() == Some(token_char) {
            return Err(ConvertError::InvalidCombination(
                "cannot use the same delimiter for tokens and for fields".to_string(),
            ));
        }
        if self.field_delimiter == FieldDelimiter::None
            && self.token_id_policy != TokenIdPolicy::None
        {
            return Err(ConvertError::InvalidCombination(
                "token IDs require a field delimiter".to_string(),
            ));
        }
        if self.sentence_id_policy.leading_delimiter().is_some()
            && self.token_delimiter == TokenDelimiter::Newline
        {
            return Err(ConvertError::InvalidCombination(
                "a leading sentence ID field requires a space or tab token delimiter".to_string(),
            ));
        }
        match (self.sentence_id_policy, self.sentence_delimiter) {
            (SentenceIdPolicy::CommentLine, SentenceDelimiter::XmlTag) => {
                Err(ConvertError::InvalidCombination(
                    "comment-line sentence IDs cannot be combined with an XML sentence delimiter"
                        .to_string(),
                ))
            }
            (SentenceIdPolicy::XmlAttribute, delimiter)
                if delimiter != SentenceDelimiter::XmlTag =>
            {
                Err(ConvertError::InvalidCombination(
                    "XML-attribute sentence IDs require an XML sentence delimiter".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

impl FromStr for FormatDescriptor {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, ConvertError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 6 {
            return Err(ConvertError::InvalidDescriptor(format!(
                "a descriptor must consist of six characters: '{s}'"
            )));
        }
        let sentence_delimiter = match chars[0] {
            'e' => SentenceDelimiter::EmptyLine,
            'l' => SentenceDelimiter::Newline,
            'x' => SentenceDelimiter::XmlTag,
            c => {
                return Err(ConvertError::InvalidDescriptor(format!(
                    "not a valid sentence delimiter: '{c}'"
                )))
            }
        };
        let token_delimiter = match chars[1] {
            'l' => TokenDelimiter::Newline,
            's' => TokenDelimiter::Space,
            't' => TokenDelimiter::Tab,
            c => {
                return Err(ConvertError::InvalidDescriptor(format!(
                    "not a valid token delimiter: '{c}'"
                )))
            }
        };
        let field_delimiter = match chars[2] {
            'n' => FieldDelimiter::None,
            's' => FieldDelimiter::Space,
            't' => FieldDelimiter::Tab,
            c => FieldDelimiter::Custom(c),
        };
        let sentence_id_policy = match chars[3] {
            'c' => SentenceIdPolicy::CommentLine,
            'n' => SentenceIdPolicy::None,
            's' => SentenceIdPolicy::LeadingSpaceField,
            't' => SentenceIdPolicy::LeadingTabField,
            'x' => SentenceIdPolicy::XmlAttribute,
            c => {
                return Err(ConvertError::InvalidDescriptor(format!(
                    "not a valid choice for sentence ID: '{c}'"
                )))
            }
        };
        let token_id_policy = match chars[4] {
            'n' => TokenIdPolicy::None,
            c => match c.to_digit(10) {
                Some(index) => TokenIdPolicy::FieldIndex(index as usize),
                None => {
                    return Err(ConvertError::InvalidDescriptor(format!(
                        "not a valid choice for token ID: '{c}'"
                    )))
                }
            },
        };
        let missing_value_policy = match chars[5] {
            'e' => MissingValuePolicy::EmptyString,
            'n' => MissingValuePolicy::Forbidden,
            c => MissingValuePolicy::Marker(c.to_string()),
        };
        FormatDescriptor::new(
            sentence_delimiter,
            token_delimiter,
            field_delimiter,
            sentence_id_policy,
            token_id_policy,
            missing_value_policy,
        )
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sentence = match self.sentence_delimiter {
            SentenceDelimiter::EmptyLine => 'e',
            SentenceDelimiter::Newline => 'l',
            SentenceDelimiter::XmlTag => 'x',
        };
        let token = match self.token_delimiter {
            TokenDelimiter::Newline => 'l',
            TokenDelimiter::Space => 's',
            TokenDelimiter::Tab => 't',
        };
        let field = match self.field_delimiter {
            FieldDelimiter::None => 'n',
            FieldDelimiter::Space => 's',
            FieldDelimiter::Tab => 't',
            FieldDelimiter::Custom(c) => c,
        };
        let sentence_id = match self.sentence_id_policy {
            SentenceIdPolicy::CommentLine => 'c',
            SentenceIdPolicy::None => 'n',
            SentenceIdPolicy::LeadingSpaceField => 's',
            SentenceIdPolicy::LeadingTabField => 't',
            SentenceIdPolicy::XmlAttribute => 'x',
        };
        write!(f, "{sentence}{token}{field}{sentence_id}")?;
        match self.token_id_policy {
            TokenIdPolicy::None => write!(f, "n")?,
            TokenIdPolicy::FieldIndex(index) => write!(f, "{index}")?,
        }
        match &self.missing_value_policy {
            MissingValuePolicy::EmptyString => write!(f, "e"),
            MissingValuePolicy::Forbidden => write!(f, "n"),
            MissingValuePolicy::Marker(marker) => write!(f, "{marker}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conll_descriptor() {
        let descriptor: FormatDescriptor = "eltc0_".parse().unwrap();
        assert_eq!(descriptor.sentence_delimiter, SentenceDelimiter::EmptyLine);
        assert_eq!(descriptor.token_delimiter, TokenDelimiter::Newline);
        assert_eq!(descriptor.field_delimiter, FieldDelimiter::Tab);
        assert_eq!(descriptor.sentence_id_policy, SentenceIdPolicy::CommentLine);
        assert_eq!(descriptor.token_id_policy, TokenIdPolicy::FieldIndex(0));
        assert_eq!(
            descriptor.missing_value_policy,
            MissingValuePolicy::Marker("_".to_string())
        );
    }

    #[test]
    fn test_parse_custom_field_delimiter() {
        let descriptor: FormatDescriptor = "ls/nne".parse().unwrap();
        assert_eq!(descriptor.field_delimiter, FieldDelimiter::Custom('/'));
        assert_eq!(descriptor.missing_value_policy, MissingValuePolicy::EmptyString);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            "elt".parse::<FormatDescriptor>(),
            Err(ConvertError::InvalidDescriptor(_))
        ));
        assert!(matches!(
            "eltc0__".parse::<FormatDescriptor>(),
            Err(ConvertError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_choices() {
        assert!("qltc0_".parse::<FormatDescriptor>().is_err());
        assert!("eqtc0_".parse::<FormatDescriptor>().is_err());
        assert!("eltq0_".parse::<FormatDescriptor>().is_err());
        assert!("eltcq_".parse::<FormatDescriptor>().is_err());
    }

    #[test]
    fn test_rejects_newline_for_sentences_and_tokens() {
        assert!(matches!(
            "lltcne".parse::<FormatDescriptor>(),
            Err(ConvertError::InvalidCombination(_))
        ));
    }

    #[test]
    fn test_rejects_shared_token_and_field_delimiter() {
        assert!("ettcne".parse::<FormatDescriptor>().is_err());
        assert!("esscne".parse::<FormatDescriptor>().is_err());
    }

    #[test]
    fn test_rejects_token_id_without_fields() {
        assert!(matches!(
            "elnc0e".parse::<FormatDescriptor>(),
            Err(ConvertError::InvalidCombination(_))
        ));
    }

    #[test]
    fn test_rejects_leading_id_with_newline_tokens() {
        assert!("eltsne".parse::<FormatDescriptor>().is_err());
        assert!("es/sne".parse::<FormatDescriptor>().is_ok());
    }

    #[test]
    fn test_rejects_mismatched_xml_policies() {
        // comment IDs inside markup-delimited sentences
        assert!("xltcne".parse::<FormatDescriptor>().is_err());
        // XML-attribute IDs without markup delimiters
        assert!("eltxne".parse::<FormatDescriptor>().is_err());
        assert!("xltxne".parse::<FormatDescriptor>().is_ok());
        // markup delimiter without IDs is fine
        assert!("xltnne".parse::<FormatDescriptor>().is_ok());
    }

    #[test]
    fn test_display_round_trips_the_string_form() {
        for spec in ["eltc0_", "xltxne", "eltnne", "lstnne", "es/sne", "esnnnn"] {
            let descriptor: FormatDescriptor = spec.parse().unwrap();
            assert_eq!(descriptor.to_string(), spec);
        }
    }
}
