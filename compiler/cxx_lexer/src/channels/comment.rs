use cxx_ir::TokenKind;
use cxx_lexer_core::Cursor;

use crate::{Channel, TokenSink};

/// `// line` and `/* block */` comments.
///
/// A line comment stops before the line break that ends its logical line.
/// An unterminated block comment is not a comment.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommentChannel;

impl Channel for CommentChannel {
    fn name(&self) -> &'static str {
        "comment"
    }

    fn consume(&self, cursor: &mut Cursor<'_>, sink: &mut TokenSink) -> bool {
        if cursor.current() != b'/' {
            return false;
        }
        let mut la = cursor.lookahead();
        if la.eat_bytes(b"//") {
            la.skip_to_line_end();
        } else if la.eat_bytes(b"/*") {
            if !la.skip_past_pair(b'*', b'/') {
                return false;
            }
        } else {
            return false;
        }
        let lexeme = cursor.advance(la.len());
        sink.push(TokenKind::Comment, &lexeme);
        true
    }
}
