//! Error types for conversion operations
//!
//! Only configuration problems surface here, and they surface exactly once,
//! when a descriptor or the reader options are constructed. Malformed *input*
//! never produces a hard error: format violations are reported on the
//! [`Diagnostics`](crate::Diagnostics) channel and the run continues. I/O
//! failures are the caller's `std::io::Error` and are not wrapped.

use std::fmt;

/// Errors that can occur while configuring a conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// A descriptor string that does not follow the six-character grammar
    InvalidDescriptor(String),
    /// A syntactically valid descriptor with contradictory policy choices
    InvalidCombination(String),
    /// Format name not found in the preset registry
    PresetNotFound(String),
    /// Unusable XML tag or attribute name
    InvalidXmlOptions(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::InvalidDescriptor(msg) => write!(f, "Invalid format descriptor: {msg}"),
            ConvertError::InvalidCombination(msg) => {
                write!(f, "Invalid descriptor combination: {msg}")
            }
            ConvertError::PresetNotFound(name) => write!(f, "Format preset '{name}' not found"),
            ConvertError::InvalidXmlOptions(msg) => write!(f, "Invalid XML options: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}
