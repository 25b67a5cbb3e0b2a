//! Scope balancing and rendering.
//!
//! Source markup is frequently unbalanced: closes with nothing open, colors
//! that never close, resets in the middle of nested colors. [`Balancer`]
//! tracks open color scopes and rewrites the token stream so that it is
//! well-formed in the target dialect:
//!
//! - bracket output always has exactly one `</c>` per `<c=...>`;
//! - control-byte output restores the enclosing color after an inner one
//!   closes, since a bare `\x03` would drop every color at once.

use smallvec::SmallVec;

use super::token::{Token, TokenKind};
use crate::dialect::Dialect;

/// Tokens emitted for one fed token. Almost always zero to two.
pub type Emitted = SmallVec<[Token; 2]>;

#[derive(Debug, Clone)]
struct Scope {
    start: Token,
    line_scoped: bool,
}

/// Stateful rewriter from an arbitrary token stream to a balanced one.
#[derive(Debug, Clone)]
pub struct Balancer {
    target: Dialect,
    stack: Vec<Scope>,
    opened: usize,
    closed: usize,
}

impl Balancer {
    #[must_use]
    pub fn new(target: Dialect) -> Self {
        Self {
            target,
            stack: Vec::new(),
            opened: 0,
            closed: 0,
        }
    }

    #[must_use]
    pub fn target(&self) -> Dialect {
        self.target
    }

    /// Number of scopes currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Scopes opened so far.
    #[must_use]
    pub fn opened(&self) -> usize {
        self.opened
    }

    /// Scopes closed so far, including those closed by [`Balancer::finish`].
    #[must_use]
    pub fn closed(&self) -> usize {
        self.closed
    }

    /// Returns true if every scope opened so far has been closed.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.opened == self.closed
    }

    /// Tokens that would close every open scope right now, innermost first.
    ///
    /// Empty for targets that close colors implicitly at the end of a line.
    #[must_use]
    pub fn closing_tokens(&self) -> Vec<Token> {
        if !self.target.requires_explicit_close() {
            return Vec::new();
        }
        self.stack
            .iter()
            .rev()
            .map(|scope| Token::color_end(scope.start.origin))
            .collect()
    }

    /// Tokens that reproduce the current color state at the start of a fresh
    /// line.
    ///
    /// Bracket output reopens every scope, outermost first. Control-byte output
    /// only needs the innermost color.
    #[must_use]
    pub fn reopen_tokens(&self) -> Vec<Token> {
        match self.target {
            Dialect::Bracket => self.stack.iter().map(|scope| restored(&scope.start)).collect(),
            Dialect::ControlByte => self
                .stack
                .last()
                .map(|scope| restored(&scope.start))
                .into_iter()
                .collect(),
            Dialect::PlainText => Vec::new(),
        }
    }

    /// Feed one token and return what should be rendered in its place.
    pub fn feed(&mut self, token: Token) -> Emitted {
        let mut out = Emitted::new();
        match token.kind {
            TokenKind::Text(_) => out.push(token),
            TokenKind::ColorStart { line_scoped, .. } if token.opens_scope_in(self.target) => {
                self.stack.push(Scope {
                    start: token.clone(),
                    line_scoped,
                });
                self.opened += 1;
                out.push(token);
            }
            TokenKind::ColorStart { .. } => {
                // No usable color: the start acts as a close.
                log::trace!("color start without usable color treated as close");
                self.end_scope(token.origin, &mut out);
            }
            TokenKind::ColorEnd { line_scoped: false } => self.end_scope(token.origin, &mut out),
            TokenKind::ColorEnd { line_scoped: true } => self.end_line_scope(token.origin, &mut out),
            TokenKind::Reset => self.reset(token, &mut out),
        }
        out
    }

    /// Close whatever is still open at the end of the stream.
    ///
    /// Only bracket output emits anything; control-byte colors end with the
    /// line. The balancer is empty afterwards and can be reused.
    pub fn finish(&mut self) -> Emitted {
        let remaining = self.stack.len();
        let mut out = Emitted::new();
        if self.target.requires_explicit_close() {
            out.extend(self.closing_tokens());
        }
        self.stack.clear();
        self.closed += remaining;
        if remaining > 0 {
            log::trace!("closed {remaining} scope(s) left open at end of stream");
        }
        out
    }

    fn end_scope(&mut self, origin: Dialect, out: &mut Emitted) {
        let Some(top) = self.stack.last() else {
            log::trace!("dropping close with nothing open");
            return;
        };
        if top.line_scoped {
            log::trace!("dropping close that would end a line color");
            return;
        }
        self.stack.pop();
        self.closed += 1;
        self.emit_closes(1, origin, out);
    }

    fn end_line_scope(&mut self, origin: Dialect, out: &mut Emitted) {
        let mut popped = 0;
        while let Some(scope) = self.stack.pop() {
            popped += 1;
            if scope.line_scoped {
                break;
            }
        }
        self.closed += popped;
        self.emit_closes(popped, origin, out);
    }

    fn reset(&mut self, token: Token, out: &mut Emitted) {
        let mut popped = 0;
        while self.stack.last().is_some_and(|scope| !scope.line_scoped) {
            self.stack.pop();
            popped += 1;
        }
        self.closed += popped;

        match self.target {
            Dialect::ControlByte => {
                out.push(token);
                // The reset byte clears line colors too; put the survivor back.
                if let Some(scope) = self.stack.last() {
                    out.push(restored(&scope.start));
                }
            }
            Dialect::Bracket | Dialect::PlainText => {
                self.emit_closes(popped, token.origin, out);
            }
        }
    }

    /// Emit output for `count` scopes that were just popped.
    fn emit_closes(&self, count: usize, origin: Dialect, out: &mut Emitted) {
        if count == 0 {
            return;
        }
        match self.target {
            Dialect::ControlByte => match self.stack.last() {
                Some(scope) => out.push(restored(&scope.start)),
                None => out.push(Token::color_end(origin)),
            },
            Dialect::Bracket | Dialect::PlainText => {
                out.extend((0..count).map(|_| Token::color_end(origin)));
            }
        }
    }
}

/// Copy of a scope start for re-emission.
fn restored(start: &Token) -> Token {
    Token {
        kind: start.kind.clone(),
        origin: start.origin,
        source: None,
    }
}

/// Run a token stream through a fresh [`Balancer`] for `target`.
#[must_use]
pub fn balance(tokens: impl IntoIterator<Item = Token>, target: Dialect) -> Vec<Token> {
    let mut balancer = Balancer::new(target);
    let mut out: Vec<Token> = tokens
        .into_iter()
        .flat_map(|token| balancer.feed(token))
        .collect();
    out.extend(balancer.finish());
    out
}

/// Render tokens into `target` and concatenate them.
#[must_use]
pub fn render(tokens: &[Token], target: Dialect, compress: bool) -> String {
    tokens
        .iter()
        .map(|token| token.render(target, compress))
        .collect()
}
