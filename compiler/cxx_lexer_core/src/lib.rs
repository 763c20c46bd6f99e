//! Low-level scanning primitives for C++ source text.
//!
//! This crate knows nothing about tokens. It provides:
//! - [`SourceBuffer`]: the decoded text of one file, read once from bytes in
//!   a declared [`Charset`]
//! - [`Cursor`]: the lexer's position in the buffer, tracking line and column
//! - [`Lookahead`]: a throw-away scanner that channels use to measure a
//!   candidate token, transparently skipping line splices
//! - [`Lexeme`]: the text a channel consumed, with its position
//!
//! # Line Splicing
//!
//! A backslash immediately followed by a line break is removed *inside*
//! a token without ending it. [`Lookahead`] skips splices wherever it reads,
//! so every channel gets the same treatment for free; [`Lexeme::value`]
//! returns the consumed text with the splices elided.

mod cursor;
mod lookahead;
mod source_buffer;

pub use cursor::{Cursor, Lexeme};
pub use lookahead::{remove_splices, splice_len, Lookahead};
pub use source_buffer::{Charset, DecodeError, SourceBuffer};
