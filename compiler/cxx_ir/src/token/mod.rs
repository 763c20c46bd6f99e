//! Token types for the C++ lexer.
//!
//! A [`Token`] carries its kind, its value (line splices removed, string
//! literals reduced to their content), the original source text, and its
//! position. Tokens are immutable once the lexer has produced them.

mod flags;
mod keyword;
mod kind;
mod list;
mod punctuator;

pub use flags::TokenFlags;
pub use keyword::Keyword;
pub use kind::TokenKind;
pub use list::{TokenIdx, TokenList};
pub use punctuator::Punctuator;

use std::fmt;
use std::sync::Arc;

use super::Span;

/// URI of the source a token was read from.
///
/// Shared by every token of one file; cloning is a reference-count bump.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct SourceUri(Arc<str>);

impl SourceUri {
    pub fn new(uri: impl AsRef<str>) -> Self {
        SourceUri(Arc::from(uri.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for SourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A token with its value and location in the source.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// Token value: line splices removed; for string and character
    /// literals, the content between the delimiters.
    pub value: String,
    /// Source text when it differs from `value`.
    original: Option<Box<str>>,
    /// 1-based line of the first character.
    pub line: u32,
    /// 0-based column of the first character, counted in characters.
    pub column: u32,
    pub span: Span,
    pub flags: TokenFlags,
    pub uri: SourceUri,
}

impl Token {
    /// Create a token whose value equals its source text.
    pub fn new(kind: TokenKind, value: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            kind,
            value: value.into(),
            original: None,
            line,
            column,
            span: Span::DUMMY,
            flags: TokenFlags::empty(),
            uri: SourceUri::default(),
        }
    }

    /// Set the original source text. Dropped when it equals the value.
    #[must_use]
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        let original = original.into();
        self.original = (original != self.value).then(|| original.into_boxed_str());
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_uri(mut self, uri: SourceUri) -> Self {
        self.uri = uri;
        self
    }

    /// The token exactly as written in the source.
    pub fn original(&self) -> &str {
        self.original.as_deref().unwrap_or(&self.value)
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Last line touched by this token (multi-line literals and comments).
    pub fn end_line(&self) -> u32 {
        let text = self.original();
        let breaks = text.matches('\n').count()
            + text.matches('\r').count()
            - text.matches("\r\n").count();
        self.line + u32::try_from(breaks).unwrap_or(u32::MAX - self.line)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({:?}) @ {}:{}",
            self.kind, self.value, self.line, self.column
        )
    }
}
