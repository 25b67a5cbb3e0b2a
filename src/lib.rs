//! # chatmarkup
//!
//! Color-markup transcoding between chat dialects.
//!
//! Text arrives in one of three dialects: bracket tags (`<c=red>hi</c>`),
//! control bytes (`\x0304hi\x03`) or plain text. This crate tokenizes it,
//! balances the color scopes, and renders it in any other dialect, mapping
//! colors between the named palette and the numeric-code palette by
//! perceptual (CIE Lab) distance.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatmarkup::{Dialect, transcode};
//!
//! let irc = transcode("<c=red>hi</c>", Dialect::Bracket, Dialect::ControlByte, false);
//! assert_eq!(irc, "\x0304hi\x03");
//!
//! let plain = transcode(&irc, Dialect::ControlByte, Dialect::PlainText, false);
//! assert_eq!(plain, "hi");
//! ```
//!
//! ## Core Concepts
//!
//! - **Color**: an RGB color with cached Lab coordinates and nearest-palette lookups
//! - **Dialect**: one of the three markup conventions
//! - **Token**: text, color start, color end or reset, produced by the tokenizer
//! - **Balancer**: the scope stack that makes any token stream well-formed
//! - **Transcoder**: source/target dialects plus output options

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod dialect;
pub mod error;
pub mod logging;
pub mod markup;
pub mod palette;
pub mod split;
pub mod sync;
pub mod transcode;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::color::{Color, JND, LabTuple, XyzTuple};
    pub use crate::dialect::Dialect;
    pub use crate::error::MarkupError;
    pub use crate::logging::ChatLogger;
    pub use crate::markup::{Balancer, Token, TokenKind};
    pub use crate::palette::init_palettes;
    pub use crate::transcode::{Transcoder, transcode};
}

// Re-export key types at crate root
pub use color::Color;
pub use dialect::Dialect;
pub use error::MarkupError;
pub use markup::{Token, TokenKind};
pub use palette::init_palettes;
pub use transcode::{Transcoder, transcode};
