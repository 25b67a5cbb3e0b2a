//! The three markup dialects understood by the transcoder.
//!
//! - [`Dialect::Bracket`]: `<c=red>text</c>` tags as used by the chat client.
//! - [`Dialect::ControlByte`]: mIRC-style `\x03FG,BG` color codes with `\x0F`
//!   resets, as carried over the relay chat protocol.
//! - [`Dialect::PlainText`]: no markup at all.

use std::fmt;
use std::str::FromStr;

use crate::error::MarkupError;

/// Control byte that introduces a color code (`^C`).
pub const COLOR_BYTE: char = '\x03';

/// Control byte that resets all formatting (`^O`).
pub const RESET_BYTE: char = '\x0F';

/// Markup dialect of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Bracket tags: `<c=VALUE>` ... `</c>`.
    #[default]
    Bracket,
    /// Control bytes: `\x03NN[,NN]`, bare `\x03` and `\x0F`.
    ControlByte,
    /// Text without markup.
    PlainText,
}

impl Dialect {
    /// All dialects, in declaration order.
    pub const ALL: [Self; 3] = [Self::Bracket, Self::ControlByte, Self::PlainText];

    /// Canonical short name of the dialect.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bracket => "pchum",
            Self::ControlByte => "irc",
            Self::PlainText => "plaintext",
        }
    }

    /// Returns true if open scopes must be closed explicitly in this dialect.
    ///
    /// The control-byte dialect closes colors implicitly at the end of a line.
    #[must_use]
    pub const fn requires_explicit_close(&self) -> bool {
        matches!(self, Self::Bracket)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bracket" | "pchum" | "pesterchum" => Ok(Self::Bracket),
            "control" | "controlbyte" | "irc" => Ok(Self::ControlByte),
            "plain" | "plaintext" | "text" => Ok(Self::PlainText),
            _ => Err(MarkupError::UnsupportedDialect(s.to_string())),
        }
    }
}
