//! Lexer position over a decoded source buffer.
//!
//! The cursor only moves forward, one consumed token at a time. Channels
//! measure candidate tokens with a [`Lookahead`] and hand the measured
//! length back to [`Cursor::advance`], which updates line and column.

use std::borrow::Cow;

use crate::lookahead::{remove_splices, Lookahead};

/// Lexer position: byte offset plus 1-based line and 0-based column.
///
/// The cursor is [`Copy`], so a channel can snapshot it freely.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Cursor {
            text,
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// 1-based line of the current position.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 0-based column of the current position, in characters.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Byte at the current position; `0x00` at EOF.
    ///
    /// Interior null bytes also read as `0x00`; use [`is_eof()`](Self::is_eof)
    /// to tell them apart.
    #[inline]
    pub fn current(&self) -> u8 {
        self.text.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    /// Character at the current position.
    #[inline]
    pub fn current_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Unconsumed text.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or("")
    }

    /// Splice-aware scanner starting at the current position.
    #[inline]
    pub fn lookahead(&self) -> Lookahead<'a> {
        Lookahead::new(self.text.as_bytes(), self.pos)
    }

    /// Consume `len` bytes and return them as a [`Lexeme`].
    ///
    /// `len` is clamped to the end of the text and widened to the next
    /// character boundary, so a lexeme never splits a UTF-8 sequence.
    pub fn advance(&mut self, len: usize) -> Lexeme<'a> {
        let start = self.pos;
        let mut end = (start + len).min(self.text.len());
        while !self.text.is_char_boundary(end) {
            end += 1;
        }
        let lexeme = Lexeme {
            text: &self.text[start..end],
            start,
            line: self.line,
            column: self.column,
        };

        let bytes = self.text.as_bytes();
        for (i, &b) in bytes[start..end].iter().enumerate() {
            match b {
                b'\n' => {
                    self.line += 1;
                    self.column = 0;
                }
                // A lone CR breaks the line; in CRLF the LF does.
                b'\r' if bytes.get(start + i + 1) != Some(&b'\n') => {
                    self.line += 1;
                    self.column = 0;
                }
                b'\r' => {}
                // UTF-8 continuation bytes do not start a character.
                0x80..=0xBF => {}
                _ => self.column += 1,
            }
        }
        self.pos = end;
        lexeme
    }

    /// Consume exactly one character (one UTF-8 sequence).
    pub fn advance_char(&mut self) -> Lexeme<'a> {
        let len = self.current_char().map_or(1, char::len_utf8);
        self.advance(len)
    }
}

/// Text consumed by one [`Cursor::advance`] call, with its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lexeme<'a> {
    /// Source text exactly as written.
    pub text: &'a str,
    /// Byte offset of the first byte.
    pub start: usize,
    pub line: u32,
    pub column: u32,
}

impl<'a> Lexeme<'a> {
    /// Byte offset one past the last byte.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Text with line splices removed.
    pub fn value(&self) -> Cow<'a, str> {
        remove_splices(self.text)
    }

    /// True when the text contains at least one line splice.
    pub fn is_spliced(&self) -> bool {
        matches!(self.value(), Cow::Owned(_))
    }
}

#[cfg(test)]
mod tests;
