//! Lexer for C++ source.
//!
//! Lexing is a loop over an ordered list of [`Channel`]s. At each position
//! the first channel that consumes input wins; whitespace is absorbed into
//! the next token's [`TokenFlags`](cxx_ir::TokenFlags), comments and
//! preprocessor directives become trivia, everything else lands in the
//! token stream the parser reads.
//!
//! [`Lexer::cxx`] builds the C++ pipeline. [`Lexer::builder`] accepts any
//! channel list, which is how small grammars get a lexer of their own.

mod channel;
pub mod channels;
mod lex_error;
mod lexer;

pub use channel::{Channel, TokenSink};
pub use lex_error::{LexError, LexErrorKind};
pub use lexer::{LexMode, LexOutput, Lexer, LexerBuilder, LexerConfig};
