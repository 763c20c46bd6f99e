//! Decoded source text of one file.
//!
//! The file is read once into memory before lexing starts; decoding from
//! the declared [`Charset`] happens here and is the only fallible step.
//! Byte order marks are stripped: a UTF-8 BOM always, a UTF-16 BOM when
//! it matches the declared byte order.

use std::fmt;
use std::str::FromStr;

use crate::Cursor;

/// Character encoding of a source file.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Charset {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    /// ISO-8859-1: every byte is the code point of the same value.
    Latin1,
}

impl Charset {
    /// Resolve a charset label such as `"UTF-8"` or `"ISO-8859-1"`.
    ///
    /// Matching ignores ASCII case, `-` and `_`.
    pub fn from_label(label: &str) -> Option<Charset> {
        let normalized: String = label
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "utf8" => Some(Charset::Utf8),
            "utf16le" => Some(Charset::Utf16Le),
            "utf16be" | "utf16" => Some(Charset::Utf16Be),
            "iso88591" | "latin1" | "l1" => Some(Charset::Latin1),
            _ => None,
        }
    }

    /// Canonical label.
    pub const fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Latin1 => "ISO-8859-1",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Charset::from_label(s).ok_or_else(|| DecodeError::UnknownCharset(s.to_owned()))
    }
}

/// The source bytes could not be decoded in the declared charset.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid {charset} sequence at byte offset {offset}")]
    InvalidSequence { charset: Charset, offset: usize },
    #[error("odd number of bytes ({len}) in {charset} input")]
    OddLength { charset: Charset, len: usize },
    #[error("unknown charset '{0}'")]
    UnknownCharset(String),
}

/// Decoded source text of one file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SourceBuffer {
    text: String,
}

impl SourceBuffer {
    /// Create a buffer from text that is already decoded.
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.starts_with('\u{FEFF}') {
            text.replace_range(..'\u{FEFF}'.len_utf8(), "");
        }
        SourceBuffer { text }
    }

    /// Decode raw file bytes in the declared charset.
    pub fn decode(bytes: &[u8], charset: Charset) -> Result<Self, DecodeError> {
        let text = match charset {
            Charset::Utf8 => decode_utf8(bytes)?,
            Charset::Utf16Le => decode_utf16(bytes, charset, u16::from_le_bytes)?,
            Charset::Utf16Be => decode_utf16(bytes, charset, u16::from_be_bytes)?,
            Charset::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        };
        Ok(SourceBuffer::new(text))
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Create a [`Cursor`] at the start of the text.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.text)
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String, DecodeError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| DecodeError::InvalidSequence {
            charset: Charset::Utf8,
            offset: e.valid_up_to(),
        })
}

fn decode_utf16(
    bytes: &[u8],
    charset: Charset,
    unit: fn([u8; 2]) -> u16,
) -> Result<String, DecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::OddLength {
            charset,
            len: bytes.len(),
        });
    }
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));

    let mut text = String::with_capacity(bytes.len() / 2);
    let mut offset = 0;
    for decoded in char::decode_utf16(units) {
        match decoded {
            Ok(c) => {
                text.push(c);
                offset += c.len_utf16() * 2;
            }
            Err(_) => return Err(DecodeError::InvalidSequence { charset, offset }),
        }
    }
    Ok(text)
}
