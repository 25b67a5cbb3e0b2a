//! Input sanitization and length-limited message splitting.
//!
//! Chat protocols cap the length of a single message, so long messages are
//! sent as several lines. Each line has to stand on its own: bracket output
//! closes every open color at the end of a line and reopens it on the next,
//! control-byte output re-emits the active color at the start of each
//! continuation line.

use std::borrow::Cow;

use crate::dialect::Dialect;
use crate::markup::{Balancer, Token, TokenKind, render};

/// Text is only split into the rest of a line with at least this much room.
const MIN_TEXT_ROOM: usize = 30;

/// Replace line breaks with spaces and tabs with four spaces.
///
/// ```rust
/// use chatmarkup::split::sanitize;
///
/// assert_eq!(sanitize("a\nb\tc"), "a b    c");
/// ```
#[must_use]
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.contains(['\n', '\r', '\t']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace(['\n', '\r'], " ").replace('\t', "    "))
}

/// Render `tokens` into `target` as lines of at most `max_len` bytes.
///
/// A line can only exceed `max_len` when the markup needed to reopen the
/// active colors is itself longer than the limit. Always returns at least one
/// line.
#[must_use]
pub fn split_message(
    tokens: impl IntoIterator<Item = Token>,
    target: Dialect,
    max_len: usize,
    compress: bool,
) -> Vec<String> {
    let mut splitter = Splitter::new(target, max_len, compress);
    for token in tokens {
        splitter.push(token);
    }
    splitter.finish()
}

struct Splitter {
    balancer: Balancer,
    max_len: usize,
    compress: bool,
    /// Rendered length of a single close in the target.
    close_len: usize,
    lines: Vec<String>,
    line: String,
    /// Length of the reopened markup the current line started with.
    reopen_len: usize,
    /// Whether the current line holds any text.
    has_text: bool,
}

impl Splitter {
    fn new(target: Dialect, max_len: usize, compress: bool) -> Self {
        let close_len = if target.requires_explicit_close() {
            Token::color_end(target).render(target, compress).len()
        } else {
            0
        };
        Self {
            balancer: Balancer::new(target),
            max_len,
            compress,
            close_len,
            lines: Vec::new(),
            line: String::new(),
            reopen_len: 0,
            has_text: false,
        }
    }

    fn render(&self, tokens: &[Token]) -> String {
        render(tokens, self.balancer.target(), self.compress)
    }

    /// Bytes reserved for closing the scopes currently open.
    fn reserved(&self) -> usize {
        self.balancer.depth() * self.close_len
    }

    fn room(&self) -> usize {
        self.max_len
            .saturating_sub(self.line.len() + self.reserved())
    }

    fn push(&mut self, token: Token) {
        // Snapshot the state the current line was built under.
        let closing = self.balancer.closing_tokens();
        let reopen = self.balancer.reopen_tokens();
        let emitted = self.balancer.feed(token);

        if let [single] = emitted.as_slice()
            && let TokenKind::Text(content) = &single.kind
        {
            self.push_text(content);
            return;
        }

        let unit = self.render(&emitted);
        if unit.is_empty() {
            return;
        }
        let needed = self.line.len() + unit.len() + self.reserved();
        if needed > self.max_len && self.line.len() > self.reopen_len {
            let closing = self.render(&closing);
            let reopen = self.render(&reopen);
            self.flush(&closing, reopen);
        }
        self.line.push_str(&unit);
    }

    fn push_text(&mut self, text: &str) {
        let mut rest = text;
        while !rest.is_empty() {
            let room = self.room();
            if rest.len() <= room {
                self.line.push_str(rest);
                self.has_text = true;
                return;
            }

            if room >= MIN_TEXT_ROOM || !self.has_text {
                let (head, tail) = split_at_room(rest, room);
                self.line.push_str(head);
                self.has_text = true;
                rest = tail;
            }
            self.flush_current();
            rest = rest.trim_start();
        }
    }

    fn flush_current(&mut self) {
        let closing = self.render(&self.balancer.closing_tokens());
        let reopen = self.render(&self.balancer.reopen_tokens());
        self.flush(&closing, reopen);
    }

    fn flush(&mut self, closing: &str, reopen: String) {
        let kept = self.line.trim_end().len();
        self.line.truncate(kept);
        self.line.push_str(closing);
        self.reopen_len = reopen.len();
        let line = std::mem::replace(&mut self.line, reopen);
        log::trace!("split line of {} bytes", line.len());
        self.lines.push(line);
        self.has_text = false;
    }

    fn finish(mut self) -> Vec<String> {
        let trailing = self.balancer.finish();
        let trailing = self.render(&trailing);
        if self.has_text || self.lines.is_empty() {
            self.line.push_str(&trailing);
            self.lines.push(self.line);
        }
        self.lines
    }
}

/// Split `text` so the head fits in `room` bytes, preferring the last space.
///
/// The head is never empty, so repeated splitting always makes progress.
fn split_at_room(text: &str, room: usize) -> (&str, &str) {
    let mut limit = room.min(text.len());
    while !text.is_char_boundary(limit) {
        limit -= 1;
    }
    if limit == 0 {
        limit = text.chars().next().map_or(text.len(), char::len_utf8);
    }

    if text[limit..].starts_with(' ') {
        return text.split_at(limit);
    }
    match text[..limit].rfind(' ') {
        Some(space) if space > 0 => text.split_at(space),
        _ => text.split_at(limit),
    }
}
