use super::*;
use pretty_assertions::assert_eq;

#[test]
fn unexpected_char_position() {
    let mut cursor = Cursor::new("ab\n  @");
    cursor.advance(5);
    let err = LexError::at(&cursor);
    assert_eq!(err.kind, LexErrorKind::UnexpectedChar('@'));
    assert_eq!((err.line, err.column), (2, 2));
    assert_eq!(err.span, Span::new(5, 6));
}

#[test]
fn null_byte_is_its_own_kind() {
    let cursor = Cursor::new("\0x");
    assert_eq!(LexError::at(&cursor).kind, LexErrorKind::NullByte);
}

#[test]
fn multi_byte_span() {
    let cursor = Cursor::new("\u{20ac}");
    assert_eq!(LexError::at(&cursor).span, Span::new(0, 3));
}

#[test]
fn message() {
    let cursor = Cursor::new("`");
    assert_eq!(
        LexError::at(&cursor).to_string(),
        "unexpected character '`' at line 1, column 0"
    );
}
