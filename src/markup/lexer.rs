//! Multi-pass tokenizer.
//!
//! Each dialect has an ordered list of rules. Rule `i` scans only the text
//! left unclaimed by rules `0..i`, so earlier rules take precedence: the
//! control-byte color rule consumes `\x03` followed by digits before the
//! bare-`\x03` rule ever sees it.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::token::{Token, TokenKind};
use crate::color::Color;
use crate::dialect::Dialect;

/// A single tokenizer rule: a pattern and how to turn a match into a token.
struct LexRule {
    label: &'static str,
    pattern: Regex,
    build: fn(&Captures<'_>) -> TokenKind,
}

impl LexRule {
    fn new(label: &'static str, pattern: &str, build: fn(&Captures<'_>) -> TokenKind) -> Self {
        Self {
            label,
            pattern: Regex::new(pattern).expect("valid regex"),
            build,
        }
    }
}

static BRACKET_RULES: LazyLock<[LexRule; 2]> = LazyLock::new(|| {
    [
        LexRule::new("color", r"(?i)<c=(.*?)>", bracket_start),
        LexRule::new("end", r"(?i)</c>", |_| TokenKind::ColorEnd { line_scoped: false }),
    ]
});

static CONTROL_RULES: LazyLock<[LexRule; 3]> = LazyLock::new(|| {
    [
        LexRule::new("color", r"\x03([0-9]{1,2})(?:,([0-9]{1,2}))?", control_start),
        LexRule::new("end", r"\x03", |_| TokenKind::ColorEnd { line_scoped: false }),
        LexRule::new("reset", r"\x0F", |_| TokenKind::Reset),
    ]
});

fn rules(dialect: Dialect) -> &'static [LexRule] {
    match dialect {
        Dialect::Bracket => BRACKET_RULES.as_slice(),
        Dialect::ControlByte => CONTROL_RULES.as_slice(),
        Dialect::PlainText => &[],
    }
}

fn bracket_start(caps: &Captures<'_>) -> TokenKind {
    let value = caps.get(1).map_or("", |m| m.as_str());
    let foreground = match Color::parse(value) {
        Ok(color) => Some(color),
        Err(err) => {
            log::debug!("unresolved bracket color: {err}");
            None
        }
    };
    TokenKind::ColorStart {
        foreground,
        background: None,
        line_scoped: false,
    }
}

fn control_start(caps: &Captures<'_>) -> TokenKind {
    let lookup = |index: usize| {
        let digits = caps.get(index)?.as_str();
        match Color::from_code(digits) {
            Ok(color) => Some(color),
            Err(err) => {
                log::debug!("unresolved control color: {err}");
                None
            }
        }
    };
    TokenKind::ColorStart {
        foreground: lookup(1),
        background: lookup(2),
        line_scoped: false,
    }
}

/// Split `text` into tokens of the given dialect.
///
/// Empty input yields no tokens, and no empty text token is ever produced.
/// Text in [`Dialect::PlainText`] always comes back as a single text token.
#[must_use]
pub fn tokenize(text: &str, dialect: Dialect) -> Vec<Token> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut tokens = vec![Token::text(text, dialect)];
    for rule in rules(dialect) {
        let mut next = Vec::with_capacity(tokens.len());
        let mut matched = 0usize;

        for token in tokens {
            match token.kind {
                TokenKind::Text(content) => {
                    matched += split_text(&content, rule, dialect, &mut next);
                }
                kind => next.push(Token { kind, ..token }),
            }
        }

        log::trace!("{dialect} rule {}: {matched} match(es)", rule.label);
        tokens = next;
    }
    tokens
}

/// Apply one rule to a text span, pushing the resulting tokens.
fn split_text(content: &str, rule: &LexRule, origin: Dialect, out: &mut Vec<Token>) -> usize {
    let mut last_end = 0;
    let mut matched = 0;

    for caps in rule.pattern.captures_iter(content) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last_end {
            out.push(Token::text(&content[last_end..whole.start()], origin));
        }
        out.push(Token {
            kind: (rule.build)(&caps),
            origin,
            source: Some(whole.as_str().to_string()),
        });
        last_end = whole.end();
        matched += 1;
    }

    if last_end < content.len() {
        out.push(Token::text(&content[last_end..], origin));
    }
    matched
}
