use cxx_ir::{Keyword, TokenKind};
use cxx_lexer_core::Cursor;

use crate::{Channel, TokenSink};

/// Identifiers and keywords.
///
/// Any non-ASCII byte is accepted as an identifier character.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentifierChannel;

#[inline]
fn is_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

#[inline]
fn is_continue(b: u8) -> bool {
    is_start(b) || b.is_ascii_digit()
}

impl Channel for IdentifierChannel {
    fn name(&self) -> &'static str {
        "identifier"
    }

    fn consume(&self, cursor: &mut Cursor<'_>, sink: &mut TokenSink) -> bool {
        if cursor.is_eof() || !is_start(cursor.current()) {
            return false;
        }
        let mut la = cursor.lookahead();
        la.eat_while(is_continue);
        let lexeme = cursor.advance(la.len());
        let value = lexeme.value();
        let kind = Keyword::from_ident(&value).map_or(TokenKind::Identifier, TokenKind::Keyword);
        sink.push(kind, &lexeme);
        true
    }
}
