//! Transcoding entry points.
//!
//! [`Transcoder`] bundles a source and target dialect with the output
//! options; [`transcode`] is the one-call shorthand.
//!
//! ```rust
//! use chatmarkup::{Dialect, Transcoder};
//!
//! let transcoder = Transcoder::new(Dialect::ControlByte, Dialect::Bracket).compress(true);
//! assert_eq!(transcoder.transcode("\x0304alert\x03 ok"), "<c=red>alert</c> ok");
//! ```

use std::borrow::Cow;

use crate::dialect::Dialect;
use crate::markup::{self, Token};
use crate::split::{sanitize, split_message};

/// Conversion settings between two dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transcoder {
    source: Dialect,
    target: Dialect,
    compress: bool,
    sanitize: bool,
    max_length: Option<usize>,
}

impl Transcoder {
    /// Create a transcoder with compression, sanitization and splitting off.
    #[must_use]
    pub fn new(source: Dialect, target: Dialect) -> Self {
        Self {
            source,
            target,
            compress: false,
            sanitize: false,
            max_length: None,
        }
    }

    /// Use the shortest color notation in bracket output.
    #[must_use]
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Flatten line breaks and tabs before tokenizing.
    #[must_use]
    pub fn sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    /// Maximum byte length of each line produced by [`Transcoder::split`].
    #[must_use]
    pub fn max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    #[must_use]
    pub fn source(&self) -> Dialect {
        self.source
    }

    #[must_use]
    pub fn target(&self) -> Dialect {
        self.target
    }

    fn prepare<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.sanitize {
            sanitize(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Tokenize `text` in the source dialect.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        markup::tokenize(&self.prepare(text), self.source)
    }

    /// Convert `text` into the target dialect.
    #[must_use]
    pub fn transcode(&self, text: &str) -> String {
        let balanced = markup::balance(self.tokenize(text), self.target);
        let rendered = markup::render(&balanced, self.target, self.compress);
        match self.target {
            Dialect::Bracket => settle_bracket(rendered, self.compress),
            Dialect::ControlByte | Dialect::PlainText => rendered,
        }
    }

    /// Convert `text` and split it into lines no longer than the configured
    /// maximum. Without a maximum the result is a single line.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        match self.max_length {
            Some(max_len) => {
                let tokens = match self.target {
                    Dialect::Bracket => markup::tokenize(&self.transcode(text), Dialect::Bracket),
                    Dialect::ControlByte | Dialect::PlainText => self.tokenize(text),
                };
                split_message(tokens, self.target, max_len, self.compress)
            }
            None => vec![self.transcode(text)],
        }
    }
}

/// Re-scan bracket output until it stops changing.
///
/// Dropping a stray marker joins the text around it, and the joined text can
/// spell a tag of its own. Every pass that changes the output turns text into
/// markup, so the text length bounds the number of passes.
fn settle_bracket(mut rendered: String, compress: bool) -> String {
    for _ in 0..rendered.len() {
        let tokens = markup::balance(markup::tokenize(&rendered, Dialect::Bracket), Dialect::Bracket);
        let next = markup::render(&tokens, Dialect::Bracket, compress);
        if next == rendered {
            break;
        }
        log::trace!("bracket output changed on re-scan");
        rendered = next;
    }
    rendered
}

/// Convert `text` from `source` to `target` markup.
///
/// ```rust
/// use chatmarkup::{Dialect, transcode};
///
/// assert_eq!(transcode("<c=red>hi</c>", Dialect::Bracket, Dialect::ControlByte, false), "\x0304hi\x03");
/// assert_eq!(transcode("\x034hi\x03", Dialect::ControlByte, Dialect::PlainText, false), "hi");
/// ```
#[must_use]
pub fn transcode(text: &str, source: Dialect, target: Dialect, compress: bool) -> String {
    Transcoder::new(source, target).compress(compress).transcode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let transcoder = Transcoder::new(Dialect::Bracket, Dialect::PlainText);
        assert_eq!(transcoder.source(), Dialect::Bracket);
        assert_eq!(transcoder.target(), Dialect::PlainText);
        assert_eq!(transcoder.split("<c=red>a b c</c>"), vec!["a b c"]);
    }

    #[test]
    fn test_builder_chain() {
        let transcoder = Transcoder::new(Dialect::Bracket, Dialect::Bracket)
            .compress(true)
            .sanitize(true)
            .max_length(Some(64));
        assert_eq!(
            transcoder,
            Transcoder {
                source: Dialect::Bracket,
                target: Dialect::Bracket,
                compress: true,
                sanitize: true,
                max_length: Some(64),
            }
        );
    }

    #[test]
    fn test_compress_shortens_bracket_values() {
        let plain = transcode("<c=#FF0000>x</c>", Dialect::Bracket, Dialect::Bracket, false);
        let compressed = transcode("<c=#FF0000>x</c>", Dialect::Bracket, Dialect::Bracket, true);
        assert_eq!(plain, "<c=255,0,0>x</c>");
        assert_eq!(compressed, "<c=red>x</c>");
    }

    #[test]
    fn test_sanitize_before_tokenize() {
        let transcoder = Transcoder::new(Dialect::Bracket, Dialect::PlainText).sanitize(true);
        assert_eq!(transcoder.transcode("a\nb\tc"), "a b    c");
        let raw = Transcoder::new(Dialect::Bracket, Dialect::PlainText);
        assert_eq!(raw.transcode("a\nb"), "a\nb");
    }

    #[test]
    fn test_split_with_limit() {
        let transcoder =
            Transcoder::new(Dialect::PlainText, Dialect::PlainText).max_length(Some(5));
        assert_eq!(transcoder.split("abc def ghi"), vec!["abc", "def", "ghi"]);
    }

    #[test]
    fn test_stray_close_cannot_forge_an_open_tag() {
        for input in ["<</c>c=red>hi", "<c</c>=red>hi", "<C</c>=RED>hi"] {
            assert_eq!(
                transcode(input, Dialect::Bracket, Dialect::Bracket, false),
                "<c=red>hi</c>",
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_forged_tag_compression_is_idempotent() {
        let once = transcode("<</c>c=red>", Dialect::Bracket, Dialect::Bracket, true);
        assert_eq!(once, "<c=red></c>");
        assert_eq!(transcode(&once, Dialect::Bracket, Dialect::Bracket, true), once);
    }

    #[test]
    fn test_literal_tags_from_other_dialects_are_balanced() {
        assert_eq!(
            transcode("<c=red>hi", Dialect::ControlByte, Dialect::Bracket, false),
            "<c=red>hi</c>"
        );
        assert_eq!(
            transcode("a</c>b", Dialect::PlainText, Dialect::Bracket, false),
            "ab"
        );
    }

    #[test]
    fn test_split_uses_settled_bracket_output() {
        let lines = Transcoder::new(Dialect::Bracket, Dialect::Bracket)
            .max_length(Some(64))
            .split("<</c>c=red>hi");
        assert_eq!(lines, vec!["<c=red>hi</c>"]);
    }

    #[test]
    fn test_same_dialect_normalizes() {
        assert_eq!(
            transcode("</c><c=red>x", Dialect::Bracket, Dialect::Bracket, false),
            "<c=red>x</c>"
        );
    }
}
