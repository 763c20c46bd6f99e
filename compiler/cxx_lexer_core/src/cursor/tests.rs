use super::*;
use pretty_assertions::assert_eq;

#[test]
fn starts_at_line_one_column_zero() {
    let c = Cursor::new("int x;");
    assert_eq!((c.pos(), c.line(), c.column()), (0, 1, 0));
    assert_eq!(c.current(), b'i');
}

#[test]
fn current_is_zero_at_eof() {
    let mut c = Cursor::new("a");
    c.advance(1);
    assert!(c.is_eof());
    assert_eq!(c.current(), 0);
    assert_eq!(c.remaining(), "");
}

#[test]
fn advance_returns_lexeme_with_start_position() {
    let mut c = Cursor::new("int x;");
    let kw = c.advance(3);
    assert_eq!(kw.text, "int");
    assert_eq!((kw.start, kw.end(), kw.line, kw.column), (0, 3, 1, 0));
    c.advance(1);
    let x = c.advance(1);
    assert_eq!((x.text, x.line, x.column), ("x", 1, 4));
}

#[test]
fn newline_forms_all_break_lines() {
    let mut c = Cursor::new("a\nb\r\nc\rd");
    c.advance(2);
    assert_eq!((c.line(), c.column()), (2, 0));
    c.advance(3);
    assert_eq!((c.line(), c.column()), (3, 0));
    c.advance(2);
    assert_eq!((c.line(), c.column()), (4, 0));
    assert_eq!(c.current(), b'd');
}

#[test]
fn columns_count_characters_not_bytes() {
    let mut c = Cursor::new("\u{e9}\u{e9}x");
    c.advance(4);
    assert_eq!(c.column(), 2);
    assert_eq!(c.current(), b'x');
}

#[test]
fn advance_never_splits_a_character() {
    let mut c = Cursor::new("\u{20ac}!");
    let lexeme = c.advance(1);
    assert_eq!(lexeme.text, "\u{20ac}");
    assert_eq!(c.current(), b'!');
}

#[test]
fn advance_char_consumes_one_sequence() {
    let mut c = Cursor::new("\u{1F600}a");
    assert_eq!(c.advance_char().text, "\u{1F600}");
    assert_eq!(c.advance_char().text, "a");
    assert!(c.is_eof());
}

#[test]
fn advance_clamps_at_end() {
    let mut c = Cursor::new("ab");
    assert_eq!(c.advance(10).text, "ab");
    assert!(c.is_eof());
}

#[test]
fn lexeme_value_drops_splices() {
    let mut c = Cursor::new("ab\\\ncd rest");
    let lexeme = c.advance(6);
    assert_eq!(lexeme.text, "ab\\\ncd");
    assert_eq!(lexeme.value(), "abcd");
    assert!(lexeme.is_spliced());
    assert_eq!((c.line(), c.column()), (2, 2));
}

#[test]
fn plain_lexeme_is_not_spliced() {
    let mut c = Cursor::new("a\\b");
    let lexeme = c.advance(3);
    assert_eq!(lexeme.value(), "a\\b");
    assert!(!lexeme.is_spliced());
}
