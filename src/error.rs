//! Error type shared by the color model and the transcoder.

use std::fmt;

/// Error type for color resolution and dialect selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// Malformed hex string, unknown color name or out-of-range numeric code.
    InvalidColorSpec(String),
    /// A dialect name with no tokenizer or renderer behind it.
    UnsupportedDialect(String),
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColorSpec(spec) => write!(f, "invalid color spec: {spec:?}"),
            Self::UnsupportedDialect(name) => write!(f, "unsupported dialect: {name:?}"),
        }
    }
}

impl std::error::Error for MarkupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_color_spec() {
        let err = MarkupError::InvalidColorSpec("#GG0000".to_string());
        assert_eq!(err.to_string(), "invalid color spec: \"#GG0000\"");
    }

    #[test]
    fn test_display_unsupported_dialect() {
        let err = MarkupError::UnsupportedDialect("html".to_string());
        assert_eq!(err.to_string(), "unsupported dialect: \"html\"");
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&MarkupError::InvalidColorSpec(String::new()));
    }
}
