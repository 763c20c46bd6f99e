//! Token kinds.

use std::fmt;

use super::{Keyword, Punctuator};

/// The type of a token.
///
/// Literal and identifier kinds carry no payload: the text lives in
/// [`Token::value`](super::Token::value), so `TokenKind` stays `Copy`
/// and is what grammar matchers compare against.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword(Keyword),
    Punctuator(Punctuator),
    /// Integer or floating literal, with any suffix.
    Number,
    /// String literal, ordinary or raw, with any prefix and suffix.
    String,
    /// Character literal.
    Character,
    /// Preprocessor directive: one whole logical line starting with `#`.
    Preprocessor,
    /// `//` or `/* */` comment.
    Comment,
    /// A character no channel could consume (recovery mode only).
    Error,
    Eof,
}

impl TokenKind {
    /// Trivia kinds never reach the parser's token stream.
    pub const fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::Preprocessor)
    }
}

impl From<Keyword> for TokenKind {
    fn from(keyword: Keyword) -> Self {
        TokenKind::Keyword(keyword)
    }
}

impl From<Punctuator> for TokenKind {
    fn from(punctuator: Punctuator) -> Self {
        TokenKind::Punctuator(punctuator)
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => f.write_str("IDENTIFIER"),
            TokenKind::Keyword(k) => write!(f, "Keyword({})", k.as_str()),
            TokenKind::Punctuator(p) => write!(f, "Punctuator({})", p.as_str()),
            TokenKind::Number => f.write_str("NUMBER"),
            TokenKind::String => f.write_str("STRING"),
            TokenKind::Character => f.write_str("CHARACTER"),
            TokenKind::Preprocessor => f.write_str("PREPROCESSOR"),
            TokenKind::Comment => f.write_str("COMMENT"),
            TokenKind::Error => f.write_str("ERROR"),
            TokenKind::Eof => f.write_str("EOF"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(k) => write!(f, "'{}'", k.as_str()),
            TokenKind::Punctuator(p) => write!(f, "'{}'", p.as_str()),
            other => fmt::Debug::fmt(other, f),
        }
    }
}
