//! Splice-aware forward scanning.
//!
//! A [`Lookahead`] reads the bytes ahead of the cursor as if every line
//! splice (backslash + line break) had already been removed. It never
//! changes the cursor: a channel scans, measures [`Lookahead::len`], and
//! only then asks the cursor to consume that many bytes. A channel that
//! gives up simply drops its lookahead, which restores the original
//! position for free.

use std::borrow::Cow;

/// Length of the line splice starting at `at`, or 0 when there is none.
///
/// Recognizes `\` followed by `\n`, `\r\n` or a lone `\r`.
#[inline]
pub fn splice_len(bytes: &[u8], at: usize) -> usize {
    if bytes.get(at) != Some(&b'\\') {
        return 0;
    }
    match (bytes.get(at + 1), bytes.get(at + 2)) {
        (Some(b'\r'), Some(b'\n')) => 3,
        (Some(b'\n' | b'\r'), _) => 2,
        _ => 0,
    }
}

/// Remove every line splice from `text`.
///
/// Borrows when there is nothing to remove.
pub fn remove_splices(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut search = 0;
    while let Some(found) = memchr::memchr(b'\\', &bytes[search..]) {
        let at = search + found;
        let len = splice_len(bytes, at);
        if len == 0 {
            search = at + 1;
            continue;
        }
        let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
        buf.push_str(&text[copied..at]);
        copied = at + len;
        search = copied;
    }
    match out {
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

/// Forward scanner that reads through line splices.
#[derive(Clone, Copy, Debug)]
pub struct Lookahead<'a> {
    bytes: &'a [u8],
    start: usize,
    pos: usize,
}

impl<'a> Lookahead<'a> {
    pub fn new(bytes: &'a [u8], start: usize) -> Self {
        Lookahead {
            bytes,
            start,
            pos: start,
        }
    }

    /// Physical offset of the next logical byte (splices skipped).
    #[inline]
    fn logical(&self) -> usize {
        let mut p = self.pos;
        loop {
            let n = splice_len(self.bytes, p);
            if n == 0 {
                return p;
            }
            p += n;
        }
    }

    /// Current logical byte; `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.bytes.get(self.logical()).copied().unwrap_or(0)
    }

    /// Logical byte `n` positions ahead of the current one.
    pub fn nth(&self, n: usize) -> u8 {
        let mut ahead = *self;
        for _ in 0..n {
            ahead.bump();
        }
        ahead.current()
    }

    #[inline]
    pub fn peek(&self) -> u8 {
        self.nth(1)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.logical() >= self.bytes.len()
    }

    /// Step over the current logical byte (and any splices before it).
    #[inline]
    pub fn bump(&mut self) {
        let p = self.logical();
        if p < self.bytes.len() {
            self.pos = p + 1;
        }
    }

    /// Consume `byte` if it is next.
    #[inline]
    pub fn eat(&mut self, byte: u8) -> bool {
        if !self.is_eof() && self.current() == byte {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `expected` if it comes next in full; otherwise consume nothing.
    pub fn eat_bytes(&mut self, expected: &[u8]) -> bool {
        let mut ahead = *self;
        for &b in expected {
            if !ahead.eat(b) {
                return false;
            }
        }
        *self = ahead;
        true
    }

    /// Consume bytes while `pred` holds; returns how many were consumed.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let mut count = 0;
        while !self.is_eof() && pred(self.current()) {
            self.bump();
            count += 1;
        }
        count
    }

    /// Physical bytes consumed since the lookahead started.
    #[inline]
    pub fn len(&self) -> usize {
        self.pos - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.start
    }

    /// Physical byte offset, usable with [`reset`](Self::reset).
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Return to an offset previously read from [`offset`](Self::offset).
    #[inline]
    pub fn reset(&mut self, offset: usize) {
        debug_assert!(offset >= self.start && offset <= self.bytes.len());
        self.pos = offset;
    }

    /// Advance to the line break that ends the current logical line,
    /// without consuming it. Spliced line breaks do not end the line.
    pub fn skip_to_line_end(&mut self) {
        let mut search = self.pos;
        loop {
            let Some(found) = memchr::memchr2(b'\n', b'\r', &self.bytes[search..]) else {
                self.pos = self.bytes.len();
                return;
            };
            let at = search + found;
            if at > 0 && self.bytes[at - 1] == b'\\' {
                let crlf = self.bytes[at] == b'\r' && self.bytes.get(at + 1) == Some(&b'\n');
                search = at + if crlf { 2 } else { 1 };
                continue;
            }
            self.pos = at;
            return;
        }
    }

    /// Advance past the first logical occurrence of `first` immediately
    /// followed by `second` (e.g. `*/`). Returns `false`, consuming
    /// everything, when there is none.
    pub fn skip_past_pair(&mut self, first: u8, second: u8) -> bool {
        let mut search = self.pos;
        while let Some(found) = memchr::memchr(first, &self.bytes[search..]) {
            let at = search + found;
            self.pos = at + 1;
            if self.eat(second) {
                return true;
            }
            search = at + 1;
        }
        self.pos = self.bytes.len();
        false
    }
}

#[cfg(test)]
mod tests;
