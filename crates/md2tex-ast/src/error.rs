//! Error handling for md2tex conversions
//!
//! Structural failures abort a conversion. Shortcode failures are not
//! represented here; the backend renders them as LaTeX comments instead.

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A construct the converter deliberately refuses to render
    UnsupportedConstruct {
        kind: String,
        suggestion: Option<String>,
    },
    /// Invalid input (e.g. not UTF-8)
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
    /// Internal error - the tree violates a structural contract
    InternalError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::UnsupportedConstruct { kind, suggestion } => {
                if let Some(sug) = suggestion {
                    write!(f, "unsupported: {}. {}", kind, sug)
                } else {
                    write!(f, "unsupported: {}", kind)
                }
            }
            ConversionError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            ConversionError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<std::str::Utf8Error> for ConversionError {
    fn from(err: std::str::Utf8Error) -> Self {
        ConversionError::invalid(format!("markdown source is not valid UTF-8 ({})", err))
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

// Convenience constructors for errors
impl ConversionError {
    pub fn unsupported(kind: impl Into<String>) -> Self {
        ConversionError::UnsupportedConstruct {
            kind: kind.into(),
            suggestion: None,
        }
    }

    pub fn unsupported_with_suggestion(
        kind: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        ConversionError::UnsupportedConstruct {
            kind: kind.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConversionError::InternalError {
            message: message.into(),
        }
    }

    /// Kind name for unsupported-construct errors.
    pub fn unsupported_kind(&self) -> Option<&str> {
        match self {
            ConversionError::UnsupportedConstruct { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = ConversionError::unsupported("ThematicBreak");
        assert_eq!(err.to_string(), "unsupported: ThematicBreak");
        assert_eq!(err.unsupported_kind(), Some("ThematicBreak"));
    }

    #[test]
    fn test_unsupported_with_suggestion() {
        let err = ConversionError::unsupported_with_suggestion(
            "Image",
            "Use the graphic shortcode",
        );
        let msg = err.to_string();
        assert!(msg.contains("Image"));
        assert!(msg.contains("graphic shortcode"));
    }

    #[test]
    fn test_utf8_error_is_invalid_input() {
        let bytes = [0x66, 0xff, 0x6f];
        let err: ConversionError = std::str::from_utf8(&bytes).unwrap_err().into();
        assert!(matches!(err, ConversionError::InvalidInput { .. }));
        assert!(err.unsupported_kind().is_none());
    }

    #[test]
    fn test_internal_error_display() {
        let err = ConversionError::internal("heading level 9");
        assert!(err.to_string().contains("Internal error"));
    }
}
