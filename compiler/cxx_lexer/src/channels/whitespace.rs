use cxx_lexer_core::{splice_len, Cursor};

use crate::{Channel, TokenSink};

/// Whitespace and line splices between tokens. Produces no token.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceChannel;

impl Channel for WhitespaceChannel {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn consume(&self, cursor: &mut Cursor<'_>, sink: &mut TokenSink) -> bool {
        let bytes = cursor.remaining().as_bytes();
        let mut len = 0;
        let mut space = false;
        let mut newline = false;
        loop {
            match bytes.get(len) {
                Some(b' ' | b'\t' | 0x0B | 0x0C) => {
                    space = true;
                    len += 1;
                }
                Some(b'\n' | b'\r') => {
                    newline = true;
                    len += 1;
                }
                Some(b'\\') => match splice_len(bytes, len) {
                    0 => break,
                    n => len += n,
                },
                _ => break,
            }
        }
        if len == 0 {
            return false;
        }
        cursor.advance(len);
        if space {
            sink.space();
        }
        if newline {
            sink.newline();
        }
        true
    }
}
