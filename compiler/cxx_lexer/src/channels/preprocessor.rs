use cxx_ir::TokenKind;
use cxx_lexer_core::{Cursor, Lookahead};

use crate::{Channel, TokenSink};

/// Preprocessor directives: a `#` (or `%:`) first on its line, through the
/// end of the logical line.
///
/// A block comment that starts inside the directive extends it to the
/// comment's end. Directives are trivia; the parser never sees them.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreprocessorChannel;

impl Channel for PreprocessorChannel {
    fn name(&self) -> &'static str {
        "preprocessor"
    }

    fn consume(&self, cursor: &mut Cursor<'_>, sink: &mut TokenSink) -> bool {
        if !sink.at_line_start() || !matches!(cursor.current(), b'#' | b'%') {
            return false;
        }
        let mut la = cursor.lookahead();
        if !la.eat(b'#') && !la.eat_bytes(b"%:") {
            return false;
        }
        while !la.is_eof() {
            match la.current() {
                b'\n' | b'\r' => break,
                b'/' if la.peek() == b'*' => {
                    la.bump();
                    la.bump();
                    la.skip_past_pair(b'*', b'/');
                }
                b'/' if la.peek() == b'/' => {
                    la.skip_to_line_end();
                    break;
                }
                quote @ (b'"' | b'\'') => skip_quoted(&mut la, quote),
                _ => la.bump(),
            }
        }
        let lexeme = cursor.advance(la.len());
        sink.push(TokenKind::Preprocessor, &lexeme);
        true
    }
}

/// Skip a quoted run inside a directive, stopping at the line end.
fn skip_quoted(la: &mut Lookahead<'_>, quote: u8) {
    la.bump();
    while !la.is_eof() {
        match la.current() {
            b'\n' | b'\r' => return,
            b'\\' => {
                la.bump();
                la.bump();
            }
            b if b == quote => {
                la.bump();
                return;
            }
            _ => la.bump(),
        }
    }
}
