//! Lexer errors.
//!
//! A [`LexError`] is raised when no channel consumes the character at the
//! cursor. In strict mode it ends lexing of the file; in recovery mode it
//! is recorded next to an error token and lexing continues.

use cxx_ir::Span;
use cxx_lexer_core::Cursor;

/// A character no channel could consume, with its position.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    /// 1-based line.
    pub line: u32,
    /// 0-based column, in characters.
    pub column: u32,
}

/// What the lexer found that it could not consume.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    /// Interior null byte in source.
    #[error("null byte in source")]
    NullByte,
}

impl LexError {
    /// Error for the character at the cursor.
    pub fn at(cursor: &Cursor<'_>) -> Self {
        let c = cursor.current_char().unwrap_or('\0');
        let kind = if c == '\0' {
            LexErrorKind::NullByte
        } else {
            LexErrorKind::UnexpectedChar(c)
        };
        LexError {
            kind,
            span: Span::from_range(cursor.pos()..cursor.pos() + c.len_utf8()),
            line: cursor.line(),
            column: cursor.column(),
        }
    }
}

#[cfg(test)]
mod tests;
