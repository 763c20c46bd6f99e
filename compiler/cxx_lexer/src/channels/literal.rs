//! String and character literals.
//!
//! Both accept an encoding prefix (`u8`, `u`, `U`, `L`) and a user-defined
//! suffix. The token value is the content between the delimiters with
//! escapes kept verbatim and line splices removed; the original text is
//! the literal as written. A literal with no closing delimiter before end
//! of input is not consumed.

use std::ops::Range;

use cxx_ir::TokenKind;
use cxx_lexer_core::{remove_splices, Cursor, Lookahead};

use crate::{Channel, TokenSink};

/// String literals, ordinary (`"..."`) and raw (`R"delim(...)delim"`).
#[derive(Clone, Copy, Debug, Default)]
pub struct StringChannel;

/// Character literals (`'x'`).
#[derive(Clone, Copy, Debug, Default)]
pub struct CharacterChannel;

impl Channel for StringChannel {
    fn name(&self) -> &'static str {
        "string"
    }

    fn consume(&self, cursor: &mut Cursor<'_>, sink: &mut TokenSink) -> bool {
        let mut la = cursor.lookahead();
        let raw = scan_prefix(&mut la);
        if !la.eat(b'"') {
            return false;
        }
        let content = if raw {
            scan_raw(&mut la)
        } else {
            scan_quoted(&mut la, b'"')
        };
        let Some(content) = content else {
            return false;
        };
        emit(cursor, sink, la, content, TokenKind::String);
        true
    }
}

impl Channel for CharacterChannel {
    fn name(&self) -> &'static str {
        "character"
    }

    fn consume(&self, cursor: &mut Cursor<'_>, sink: &mut TokenSink) -> bool {
        let mut la = cursor.lookahead();
        if scan_prefix(&mut la) || !la.eat(b'\'') {
            return false;
        }
        let Some(content) = scan_quoted(&mut la, b'\'') else {
            return false;
        };
        emit(cursor, sink, la, content, TokenKind::Character);
        true
    }
}

fn emit(
    cursor: &mut Cursor<'_>,
    sink: &mut TokenSink,
    mut la: Lookahead<'_>,
    content: Range<usize>,
    kind: TokenKind,
) {
    scan_ud_suffix(&mut la);
    let lexeme = cursor.advance(la.len());
    let base = lexeme.start;
    let text = lexeme
        .text
        .get(content.start - base..content.end - base)
        .unwrap_or_default();
    sink.push_value(kind, &lexeme, remove_splices(text).into_owned());
}

/// Consume an encoding prefix and the raw marker. Returns true for raw.
fn scan_prefix(la: &mut Lookahead<'_>) -> bool {
    match la.current() {
        b'u' => {
            la.bump();
            la.eat(b'8');
        }
        b'U' | b'L' => la.bump(),
        _ => {}
    }
    la.eat(b'R')
}

/// Scan to the closing `quote`; a backslash escapes the next character.
///
/// Character literals may not span lines; string literals run to the
/// closing quote wherever it is.
fn scan_quoted(la: &mut Lookahead<'_>, quote: u8) -> Option<Range<usize>> {
    let start = la.offset();
    while !la.is_eof() {
        let end = la.offset();
        match la.current() {
            b if b == quote => {
                la.bump();
                return Some(start..end);
            }
            b'\\' => {
                la.bump();
                la.bump();
            }
            b'\n' | b'\r' if quote == b'\'' => return None,
            _ => la.bump(),
        }
    }
    None
}

/// Scan `delim( ... )delim"` after the opening quote of a raw string.
///
/// The delimiter is everything up to the first `(`, whatever it holds.
/// A `)` that is not followed by the full delimiter and a quote is
/// content; scanning resumes right after it.
fn scan_raw(la: &mut Lookahead<'_>) -> Option<Range<usize>> {
    let mut delimiter = Vec::new();
    while la.current() != b'(' {
        if la.is_eof() {
            return None;
        }
        delimiter.push(la.current());
        la.bump();
    }
    la.bump();
    let start = la.offset();
    while !la.is_eof() {
        if la.current() == b')' {
            let end = la.offset();
            let mut close = *la;
            close.bump();
            if close.eat_bytes(&delimiter) && close.eat(b'"') {
                *la = close;
                return Some(start..end);
            }
        }
        la.bump();
    }
    None
}

/// Consume a user-defined literal suffix.
///
/// Digits are part of the suffix only after a non-digit suffix character;
/// a suffix that would start with a digit is not consumed at all.
fn scan_ud_suffix(la: &mut Lookahead<'_>) {
    let mark = la.offset();
    let mut seen_non_digit = false;
    while !la.is_eof() {
        let b = la.current();
        if b.is_ascii_alphabetic() || b == b'_' {
            seen_non_digit = true;
        } else if b.is_ascii_digit() {
            if !seen_non_digit {
                la.reset(mark);
                return;
            }
        } else {
            return;
        }
        la.bump();
    }
}
