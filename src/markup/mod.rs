//! Markup pipeline: tokenize text in one dialect, balance its color scopes
//! for another, and render the result.
//!
//! ```rust
//! use chatmarkup::Dialect;
//! use chatmarkup::markup::{balance, render, tokenize};
//!
//! let tokens = tokenize("<c=red>hi</c>", Dialect::Bracket);
//! let balanced = balance(tokens, Dialect::ControlByte);
//! assert_eq!(render(&balanced, Dialect::ControlByte, false), "\x0304hi\x03");
//! ```

pub mod lexer;
pub mod render;
pub mod token;

pub use lexer::tokenize;
pub use render::{Balancer, Emitted, balance, render};
pub use token::{Token, TokenKind};
