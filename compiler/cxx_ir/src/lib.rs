//! C++ IR - shared token and location types.
//!
//! This crate contains the data structures that flow between the lexer,
//! the parsing machine and the symbol table:
//! - Spans for source locations
//! - Keywords and punctuators of the C++ language
//! - Tokens and `TokenList` for lexer output
//!
//! # Design Philosophy
//!
//! - **Immutable tokens**: a [`Token`] never changes after the lexer built it.
//! - **Index, don't point**: tokens are addressed by [`TokenIdx`], so trees
//!   built on top of a `TokenList` never hold references into it.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod span;
mod token;

pub use span::Span;
pub use token::{
    Keyword, Punctuator, SourceUri, Token, TokenFlags, TokenIdx, TokenKind, TokenList,
};
