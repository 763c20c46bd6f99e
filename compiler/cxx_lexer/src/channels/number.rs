use cxx_ir::TokenKind;
use cxx_lexer_core::Cursor;

use crate::{Channel, TokenSink};

/// Numeric literals, read as preprocessing numbers.
///
/// One rule covers decimal, octal, hex and binary integers, floating
/// literals with exponents (`e+`, `p-`), digit separators and suffixes:
/// a digit (or `.` digit) followed by identifier characters, dots, signed
/// exponents and `'` separators.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumberChannel;

impl Channel for NumberChannel {
    fn name(&self) -> &'static str {
        "number"
    }

    fn consume(&self, cursor: &mut Cursor<'_>, sink: &mut TokenSink) -> bool {
        let mut la = cursor.lookahead();
        match (la.current(), la.peek()) {
            (b'0'..=b'9', _) => la.bump(),
            (b'.', b'0'..=b'9') => {
                la.bump();
                la.bump();
            }
            _ => return false,
        }
        while !la.is_eof() {
            let next = la.peek();
            match la.current() {
                b'e' | b'E' | b'p' | b'P' if matches!(next, b'+' | b'-') => {
                    la.bump();
                    la.bump();
                }
                b'\'' if next.is_ascii_alphanumeric() || next == b'_' => {
                    la.bump();
                    la.bump();
                }
                b if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' => la.bump(),
                _ => break,
            }
        }
        let lexeme = cursor.advance(la.len());
        sink.push(TokenKind::Number, &lexeme);
        true
    }
}
