use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn la(text: &str) -> Lookahead<'_> {
    Lookahead::new(text.as_bytes(), 0)
}

#[test]
fn splice_forms() {
    assert_eq!(splice_len(b"\\\nx", 0), 2);
    assert_eq!(splice_len(b"\\\r\nx", 0), 3);
    assert_eq!(splice_len(b"\\\rx", 0), 2);
    assert_eq!(splice_len(b"\\x", 0), 0);
    assert_eq!(splice_len(b"\\", 0), 0);
    assert_eq!(splice_len(b"x\\\n", 0), 0);
}

#[test]
fn remove_splices_borrows_when_clean() {
    assert!(matches!(remove_splices("a\\tb"), Cow::Borrowed("a\\tb")));
}

#[test]
fn remove_splices_handles_every_form() {
    assert_eq!(remove_splices("a\\\nb\\\r\nc\\\rd"), "abcd");
    assert_eq!(remove_splices("\\\\\nx"), "\\x");
}

#[test]
fn reads_through_splices() {
    let mut l = la("a\\\nb");
    assert_eq!(l.current(), b'a');
    assert_eq!(l.peek(), b'b');
    l.bump();
    assert_eq!(l.current(), b'b');
    l.bump();
    assert!(l.is_eof());
    assert_eq!(l.len(), 4);
}

#[test]
fn leading_splices_are_skipped() {
    let l = la("\\\n\\\r\nx");
    assert_eq!(l.current(), b'x');
    assert!(!l.is_eof());
}

#[test]
fn trailing_splice_is_not_consumed() {
    let mut l = la("ab\\\n");
    l.eat_while(|b| b.is_ascii_alphabetic());
    assert_eq!(l.len(), 2);
    assert!(l.is_eof());
}

#[test]
fn eat_bytes_is_all_or_nothing() {
    let mut l = la("R\\\n\"(x");
    assert!(!l.eat_bytes(b"R\"["));
    assert!(l.is_empty());
    assert!(l.eat_bytes(b"R\"("));
    assert_eq!(l.current(), b'x');
}

#[test]
fn reset_restores_offset() {
    let mut l = la("abc");
    l.bump();
    let mark = l.offset();
    l.bump();
    l.reset(mark);
    assert_eq!(l.current(), b'b');
}

#[test]
fn skip_to_line_end_honours_splices() {
    let mut l = la("// a \\\n b\nnext");
    l.skip_to_line_end();
    assert_eq!(l.offset(), 9);
    assert_eq!(l.current(), b'\n');

    let mut l = la("x \\\r\n y\r\nz");
    l.skip_to_line_end();
    assert_eq!(l.offset(), 7);
    assert_eq!(l.current(), b'\r');

    let mut l = la("no newline");
    l.skip_to_line_end();
    assert!(l.is_eof());
}

#[test]
fn skip_past_pair_finds_spliced_terminator() {
    let mut l = la("/* a *\\\n/ b");
    l.bump();
    l.bump();
    assert!(l.skip_past_pair(b'*', b'/'));
    assert_eq!(l.current(), b' ');
    assert_eq!(l.offset(), 9);
}

#[test]
fn skip_past_pair_consumes_all_when_missing() {
    let mut l = la("/* never closed *");
    assert!(!l.skip_past_pair(b'*', b'/'));
    assert!(l.is_eof());
}

proptest! {
    #[test]
    fn removal_only_shrinks(s in "[a-z\\\\\r\n]{0,40}") {
        let cleaned = remove_splices(&s);
        prop_assert!(cleaned.len() <= s.len());
        prop_assert_eq!(cleaned.len() == s.len(), matches!(cleaned, Cow::Borrowed(_)));
    }

    #[test]
    fn logical_bytes_match_removed_text(s in "[a-z\\\\\n]{0,40}") {
        let mut l = la(&s);
        let mut seen = Vec::new();
        while !l.is_eof() {
            seen.push(l.current());
            l.bump();
        }
        let cleaned = remove_splices(&s);
        prop_assert_eq!(seen, cleaned.as_bytes().to_vec());
    }
}
