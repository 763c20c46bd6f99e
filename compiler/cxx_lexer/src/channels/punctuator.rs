use cxx_ir::{Punctuator, TokenKind};
use cxx_lexer_core::Cursor;

use crate::{Channel, TokenSink};

/// Operators and punctuation, by maximal munch.
///
/// Digraphs are emitted with the kind of the punctuator they stand for
/// (`<%` lexes as `{`), keeping the digraph as the original text. `<::`
/// not followed by `:` or `>` lexes as `<` then `::`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PunctuatorChannel;

impl Channel for PunctuatorChannel {
    fn name(&self) -> &'static str {
        "punctuator"
    }

    fn consume(&self, cursor: &mut Cursor<'_>, sink: &mut TokenSink) -> bool {
        let start = cursor.lookahead();
        let mut probe = start;
        let mut text = String::with_capacity(Punctuator::MAX_LEN);
        let mut ends = [0; Punctuator::MAX_LEN];
        for end in &mut ends {
            let b = probe.current();
            if probe.is_eof() || !b.is_ascii_punctuation() {
                break;
            }
            text.push(char::from(b));
            probe.bump();
            *end = probe.len();
        }
        let Some(mut punctuator) = Punctuator::longest_prefix(&text) else {
            return false;
        };
        if punctuator == Punctuator::DigraphLBracket
            && text.starts_with("<::")
            && !matches!(start.nth(3), b':' | b'>')
        {
            punctuator = Punctuator::Less;
        }
        let len = ends[punctuator.as_str().len() - 1];
        let lexeme = cursor.advance(len);
        let canonical = punctuator.canonical();
        sink.push_value(TokenKind::Punctuator(canonical), &lexeme, canonical.as_str().to_owned());
        true
    }
}
