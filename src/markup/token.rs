//! Tokens produced by the tokenizer and consumed by the balancer.

use std::fmt;

use crate::color::Color;
use crate::dialect::{COLOR_BYTE, Dialect, RESET_BYTE};
use crate::palette::SENTINEL_CODE;

/// What a token does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal text.
    Text(String),
    /// Start of a color scope. Either color may be missing when the written
    /// spec could not be resolved.
    ColorStart {
        foreground: Option<Color>,
        background: Option<Color>,
        line_scoped: bool,
    },
    /// End of the innermost color scope, or of the innermost line color when
    /// `line_scoped` is set.
    ColorEnd { line_scoped: bool },
    /// Reset all formatting back to the nearest line color.
    Reset,
}

/// One unit of parsed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Dialect this token was parsed from.
    pub origin: Dialect,
    /// The matched source text; `None` for text tokens and synthesized tokens.
    pub source: Option<String>,
}

impl Token {
    #[must_use]
    pub fn text(content: impl Into<String>, origin: Dialect) -> Self {
        Self {
            kind: TokenKind::Text(content.into()),
            origin,
            source: None,
        }
    }

    #[must_use]
    pub fn color_start(
        foreground: Option<Color>,
        background: Option<Color>,
        origin: Dialect,
    ) -> Self {
        Self {
            kind: TokenKind::ColorStart {
                foreground,
                background,
                line_scoped: false,
            },
            origin,
            source: None,
        }
    }

    /// A line color: persists until a line-scoped end or the end of the stream.
    #[must_use]
    pub fn line_color_start(foreground: Option<Color>, origin: Dialect) -> Self {
        Self {
            kind: TokenKind::ColorStart {
                foreground,
                background: None,
                line_scoped: true,
            },
            origin,
            source: None,
        }
    }

    #[must_use]
    pub fn color_end(origin: Dialect) -> Self {
        Self {
            kind: TokenKind::ColorEnd { line_scoped: false },
            origin,
            source: None,
        }
    }

    #[must_use]
    pub fn line_color_end(origin: Dialect) -> Self {
        Self {
            kind: TokenKind::ColorEnd { line_scoped: true },
            origin,
            source: None,
        }
    }

    #[must_use]
    pub fn reset(origin: Dialect) -> Self {
        Self {
            kind: TokenKind::Reset,
            origin,
            source: None,
        }
    }

    /// Attach the matched source text.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The literal content of a text token.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Text(content) => Some(content),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_line_scoped(&self) -> bool {
        match self.kind {
            TokenKind::ColorStart { line_scoped, .. } | TokenKind::ColorEnd { line_scoped } => {
                line_scoped
            }
            TokenKind::Text(_) | TokenKind::Reset => false,
        }
    }

    /// Returns true if this is a color start carrying any resolved color.
    #[must_use]
    pub fn has_color(&self) -> bool {
        matches!(
            &self.kind,
            TokenKind::ColorStart { foreground, background, .. }
                if foreground.is_some() || background.is_some()
        )
    }

    /// Returns true if this is a color start that `target` can express.
    ///
    /// The bracket dialect has no background colors, so a start with only a
    /// background does not open a bracket scope.
    #[must_use]
    pub fn opens_scope_in(&self, target: Dialect) -> bool {
        match &self.kind {
            TokenKind::ColorStart { foreground, .. } if target == Dialect::Bracket => {
                foreground.is_some()
            }
            TokenKind::ColorStart { .. } => self.has_color(),
            TokenKind::Text(_) | TokenKind::ColorEnd { .. } | TokenKind::Reset => false,
        }
    }

    /// Serialize this token into `target`.
    ///
    /// With `compress` set, bracket color values use whichever of name, RGB
    /// triple, hex or reduced hex is shortest.
    #[must_use]
    pub fn render(&self, target: Dialect, compress: bool) -> String {
        match (&self.kind, target) {
            (TokenKind::Text(content), _) => content.clone(),
            (_, Dialect::PlainText) => String::new(),

            (TokenKind::ColorStart { foreground: Some(fg), .. }, Dialect::Bracket) => {
                format!("<c={}>", bracket_value(fg, compress))
            }
            (TokenKind::ColorStart { .. } | TokenKind::ColorEnd { .. } | TokenKind::Reset, Dialect::Bracket) => {
                "</c>".to_string()
            }

            (TokenKind::ColorStart { foreground, background, .. }, Dialect::ControlByte) => {
                match (foreground, background) {
                    (Some(fg), Some(bg)) => format!("{COLOR_BYTE}{},{}", fg.code(), bg.code()),
                    (Some(fg), None) => format!("{COLOR_BYTE}{}", fg.code()),
                    (None, Some(bg)) => format!("{COLOR_BYTE}{SENTINEL_CODE:02},{}", bg.code()),
                    (None, None) => COLOR_BYTE.to_string(),
                }
            }
            (TokenKind::ColorEnd { .. }, Dialect::ControlByte) => COLOR_BYTE.to_string(),
            (TokenKind::Reset, Dialect::ControlByte) => RESET_BYTE.to_string(),
        }
    }
}

/// Written form of a color inside `<c=...>`.
fn bracket_value(color: &Color, compress: bool) -> String {
    let rgb = {
        let (r, g, b) = color.to_rgb_tuple();
        format!("{r},{g},{b}")
    };
    let hex = color.hex().to_string();

    if !compress {
        if let Some(name) = color.palette_name() {
            return name.to_string();
        }
        return if rgb.len() <= hex.len() { rgb } else { hex };
    }

    let reduced = Color::reduce_hex(&hex);
    let candidates = [color.exact_name().map(str::to_string), Some(rgb), Some(hex), Some(reduced)];
    // Strict comparison keeps the earliest of equally short candidates.
    candidates
        .into_iter()
        .flatten()
        .reduce(|best, candidate| if candidate.len() < best.len() { candidate } else { best })
        .unwrap_or_default()
}

impl fmt::Display for Token {
    /// Renders the token back into the dialect it came from.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(self.origin, false))
    }
}
