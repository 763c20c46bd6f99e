//! The channel contract and the sink channels write tokens into.

use std::borrow::Cow;

use cxx_ir::{SourceUri, Span, Token, TokenFlags, TokenKind, TokenList};
use cxx_lexer_core::{Cursor, Lexeme};

/// One token category recognised at the current input position.
pub trait Channel: Send + Sync {
    /// Short name, used in traces.
    fn name(&self) -> &'static str;

    /// Consume one token at `cursor`, writing it to `sink`.
    ///
    /// Returns `false` with the cursor untouched when the input at the
    /// cursor does not belong to this channel. A channel that returns
    /// `true` must have consumed at least one byte.
    fn consume(&self, cursor: &mut Cursor<'_>, sink: &mut TokenSink) -> bool;
}

/// Collects the tokens of one file along with the layout around them.
#[derive(Debug)]
pub struct TokenSink {
    tokens: TokenList,
    uri: SourceUri,
    pending: TokenFlags,
    line_start: bool,
    keep_comments: bool,
}

impl TokenSink {
    pub(crate) fn new(uri: SourceUri, keep_comments: bool) -> Self {
        TokenSink {
            tokens: TokenList::new(),
            uri,
            pending: TokenFlags::LINE_START,
            line_start: true,
            keep_comments,
        }
    }

    /// True while only whitespace and comments precede the cursor on its line.
    pub fn at_line_start(&self) -> bool {
        self.line_start
    }

    /// Record horizontal whitespace before the next token.
    pub fn space(&mut self) {
        self.pending |= TokenFlags::SPACE_BEFORE;
    }

    /// Record a line break before the next token.
    pub fn newline(&mut self) {
        self.pending |= TokenFlags::NEWLINE_BEFORE | TokenFlags::LINE_START;
        self.line_start = true;
    }

    /// Emit a token whose value is the lexeme with splices removed.
    pub fn push(&mut self, kind: TokenKind, lexeme: &Lexeme<'_>) {
        let value = lexeme.value();
        let spliced = matches!(value, Cow::Owned(_));
        self.emit(kind, lexeme, value.into_owned(), spliced);
    }

    /// Emit a token with an explicit value (literal content, canonical
    /// punctuator spelling).
    pub fn push_value(&mut self, kind: TokenKind, lexeme: &Lexeme<'_>, value: String) {
        self.emit(kind, lexeme, value, lexeme.is_spliced());
    }

    fn emit(&mut self, kind: TokenKind, lexeme: &Lexeme<'_>, value: String, spliced: bool) {
        let mut flags = self.pending;
        if spliced {
            flags |= TokenFlags::SPLICED;
        }
        if kind.is_trivia() {
            self.pending |= TokenFlags::TRIVIA_BEFORE;
            if kind == TokenKind::Preprocessor {
                self.line_start = false;
            } else if !self.keep_comments {
                return;
            }
        } else {
            self.pending = TokenFlags::empty();
            self.line_start = false;
        }
        let token = Token::new(kind, value, lexeme.line, lexeme.column)
            .with_original(lexeme.text)
            .with_span(Span::from_range(lexeme.start..lexeme.end()))
            .with_flags(flags)
            .with_uri(self.uri.clone());
        self.tokens.push(token);
    }

    /// Append the end-of-file token and hand over the list.
    pub(crate) fn finish(mut self, cursor: &Cursor<'_>) -> TokenList {
        let eof = Token::new(TokenKind::Eof, "EOF", cursor.line(), cursor.column())
            .with_span(Span::from_range(cursor.pos()..cursor.pos()))
            .with_flags(self.pending)
            .with_uri(self.uri);
        self.tokens.push(eof);
        self.tokens
    }
}
