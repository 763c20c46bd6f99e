use cxx_ir::{Keyword, Punctuator, SourceUri, Token, TokenFlags, TokenKind};
use pretty_assertions::assert_eq;

use crate::{LexMode, Lexer, LexerConfig};

fn lex_all(source: &str) -> (Vec<Token>, Vec<Token>) {
    let out = Lexer::cxx(LexerConfig::default())
        .lex(source, &SourceUri::new("test.cc"))
        .unwrap();
    (out.tokens.as_slice().to_vec(), out.tokens.trivia().to_vec())
}

/// Kind and value of every non-EOF token.
fn lex(source: &str) -> Vec<(TokenKind, String)> {
    let (tokens, _) = lex_all(source);
    tokens
        .into_iter()
        .filter(|t| !t.is_eof())
        .map(|t| (t.kind, t.value))
        .collect()
}

fn single(source: &str) -> Token {
    let (tokens, _) = lex_all(source);
    assert_eq!(tokens.len(), 2, "expected one token plus EOF: {tokens:?}");
    tokens[0].clone()
}

fn kw(k: Keyword) -> TokenKind {
    TokenKind::Keyword(k)
}

fn p(p: Punctuator) -> TokenKind {
    TokenKind::Punctuator(p)
}

// ─── Strings ───

#[test]
fn raw_string_value_is_its_content() {
    let token = single(r#"R"(hello)""#);
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.value, "hello");
    assert_eq!(token.original(), r#"R"(hello)""#);
}

#[test]
fn raw_string_delimiter_backtracks() {
    assert_eq!(single(r#"R"x(a)b)x""#).value, "a)b");
    assert_eq!(single(r#"R"ab()a")ab""#).value, r#")a""#);
}

#[test]
fn raw_string_delimiter_is_anything_before_the_paren() {
    let long = single(r#"R"12345678901234567(x)12345678901234567""#);
    assert_eq!((long.kind, long.value.as_str()), (TokenKind::String, "x"));
    let spaced = single(r#"R"a b(say "hi")a b""#);
    assert_eq!((spaced.kind, spaced.value.as_str()), (TokenKind::String, r#"say "hi""#));
}

#[test]
fn raw_string_keeps_backslashes_and_newlines() {
    assert_eq!(single("R\"(a\\nb\nc)\"").value, "a\\nb\nc");
}

#[test]
fn raw_string_with_prefix_and_suffix() {
    let token = single(r#"u8R"--(x)--"_s"#);
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.value, "x");
}

#[test]
fn spliced_string_decodes_without_the_splice() {
    let token = single("\"ab\\\ncd\"");
    assert_eq!(token.value, "abcd");
    assert_eq!(token.original(), "\"ab\\\ncd\"");
    assert!(token.flags.contains(TokenFlags::SPLICED));
}

#[test]
fn crlf_splice_is_removed_too() {
    assert_eq!(single("\"ab\\\r\ncd\"").value, "abcd");
}

#[test]
fn escapes_are_kept_verbatim() {
    assert_eq!(single(r#""a\"b\\""#).value, r#"a\"b\\"#);
}

#[test]
fn encoding_prefixes() {
    assert_eq!(
        lex(r#"u8"a" u"b" U"c" L"d""#),
        vec![
            (TokenKind::String, "a".into()),
            (TokenKind::String, "b".into()),
            (TokenKind::String, "c".into()),
            (TokenKind::String, "d".into()),
        ]
    );
}

#[test]
fn prefix_letters_alone_are_identifiers() {
    assert_eq!(
        lex("u8 R L x"),
        vec![
            (TokenKind::Identifier, "u8".into()),
            (TokenKind::Identifier, "R".into()),
            (TokenKind::Identifier, "L".into()),
            (TokenKind::Identifier, "x".into()),
        ]
    );
}

#[test]
fn user_defined_suffix() {
    let token = single(r#""abc"_sv"#);
    assert_eq!(token.value, "abc");
    assert_eq!(token.original(), r#""abc"_sv"#);

    assert_eq!(single(r#""x"_a1"#).original(), r#""x"_a1"#);
}

#[test]
fn suffix_may_not_start_with_a_digit() {
    assert_eq!(
        lex(r#""x"1"#),
        vec![(TokenKind::String, "x".into()), (TokenKind::Number, "1".into())]
    );
}

#[test]
fn unterminated_string_falls_through() {
    let err = Lexer::cxx(LexerConfig {
        mode: LexMode::Strict,
        keep_comments: true,
    })
    .lex("\"abc", &SourceUri::new("t.cc"))
    .unwrap_err();
    assert_eq!(err.kind, crate::LexErrorKind::UnexpectedChar('"'));
    assert_eq!(
        lex("\"abc"),
        vec![
            (TokenKind::Error, "\"".into()),
            (TokenKind::Identifier, "abc".into())
        ]
    );
}

#[test]
fn unterminated_raw_string_falls_through() {
    assert_eq!(lex(r#"R"x(abc)""#)[0], (TokenKind::Identifier, "R".into()));
}

// ─── Characters ───

#[test]
fn character_literals() {
    assert_eq!(
        lex(r"'a' '\'' u8'b' L'\n'"),
        vec![
            (TokenKind::Character, "a".into()),
            (TokenKind::Character, r"\'".into()),
            (TokenKind::Character, "b".into()),
            (TokenKind::Character, r"\n".into()),
        ]
    );
}

#[test]
fn character_literal_stops_at_line_end() {
    let kinds: Vec<_> = lex("'a\nb'").into_iter().map(|(k, _)| k).collect();
    assert_eq!(kinds[0], TokenKind::Error);
}

// ─── Numbers ───

#[test]
fn number_forms_are_single_tokens() {
    for n in [
        "0", "42", "0x1F", "0b1010", "017", "1'000'000", "3.14", "3.14e-10", ".5f", "1e10",
        "0x1.8p+3", "42ull", "1.0L", "100_km",
    ] {
        let token = single(n);
        assert_eq!((token.kind, token.value.as_str()), (TokenKind::Number, n));
    }
}

#[test]
fn member_access_is_not_a_number() {
    assert_eq!(
        lex("a.b"),
        vec![
            (TokenKind::Identifier, "a".into()),
            (p(Punctuator::Dot), ".".into()),
            (TokenKind::Identifier, "b".into()),
        ]
    );
}

// ─── Identifiers ───

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        lex("class Foo_1 and_eq int"),
        vec![
            (kw(Keyword::Class), "class".into()),
            (TokenKind::Identifier, "Foo_1".into()),
            (kw(Keyword::AndEq), "and_eq".into()),
            (kw(Keyword::Int), "int".into()),
        ]
    );
}

#[test]
fn spliced_identifier_is_one_token() {
    let token = single("ab\\\ncd");
    assert_eq!(token.value, "abcd");
    assert_eq!(token.kind, TokenKind::Identifier);
}

#[test]
fn spliced_keyword_is_a_keyword() {
    assert_eq!(single("ret\\\nurn").kind, kw(Keyword::Return));
}

#[test]
fn non_ascii_identifier() {
    assert_eq!(single("caf\u{e9}").value, "caf\u{e9}");
}

// ─── Comments and directives ───

#[test]
fn comments_are_trivia() {
    let (tokens, trivia) = lex_all("int /* c */ x; // tail");
    let values: Vec<_> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, ["int", "x", ";", "EOF"]);
    let comments: Vec<_> = trivia.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(comments, ["/* c */", "// tail"]);
    assert!(tokens[1].flags.contains(TokenFlags::TRIVIA_BEFORE));
}

#[test]
fn block_comment_with_spliced_terminator() {
    let (tokens, trivia) = lex_all("/* a *\\\n/ x");
    assert_eq!(trivia.len(), 1);
    assert_eq!(trivia[0].value, "/* a */");
    assert_eq!(tokens[0].value, "x");
}

#[test]
fn unterminated_block_comment_is_punctuation() {
    assert_eq!(
        lex("/* x"),
        vec![
            (p(Punctuator::Slash), "/".into()),
            (p(Punctuator::Star), "*".into()),
            (TokenKind::Identifier, "x".into()),
        ]
    );
}

#[test]
fn line_comment_continues_across_splice() {
    let (tokens, trivia) = lex_all("// a \\\n still comment\nx");
    assert_eq!(trivia.len(), 1);
    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[0].line, 3);
}

#[test]
fn directives_are_trivia() {
    let (tokens, trivia) = lex_all("#include <vector>\nint x;");
    assert_eq!(trivia[0].kind, TokenKind::Preprocessor);
    assert_eq!(trivia[0].value, "#include <vector>");
    assert_eq!(tokens[0].value, "int");
    assert!(tokens[0].flags.contains(TokenFlags::LINE_START));
}

#[test]
fn spliced_directive_is_one_token() {
    let (tokens, trivia) = lex_all("  #define A \\\n  1\nint");
    assert_eq!(trivia.len(), 1);
    assert_eq!(trivia[0].value, "#define A   1");
    assert_eq!(tokens[0].line, 3);
}

#[test]
fn block_comment_extends_directive() {
    let (tokens, trivia) = lex_all("#if X /* a\nb */ Y\nint");
    assert_eq!(trivia.len(), 1);
    assert_eq!(tokens[0].value, "int");
}

#[test]
fn hash_mid_line_is_punctuation() {
    assert_eq!(
        lex("a # b"),
        vec![
            (TokenKind::Identifier, "a".into()),
            (p(Punctuator::Hash), "#".into()),
            (TokenKind::Identifier, "b".into()),
        ]
    );
}

// ─── Punctuators ───

#[test]
fn maximal_munch() {
    let kinds: Vec<_> = lex("<<= ->* ... <=> :: ++").into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        [
            p(Punctuator::ShlAssign),
            p(Punctuator::ArrowStar),
            p(Punctuator::Ellipsis),
            p(Punctuator::Spaceship),
            p(Punctuator::ColonColon),
            p(Punctuator::PlusPlus),
        ]
    );
}

#[test]
fn greater_is_never_merged() {
    let (tokens, _) = lex_all("a>>=b");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Identifier,
            p(Punctuator::Greater),
            p(Punctuator::Greater),
            p(Punctuator::Assign),
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
    assert!(tokens[2].flags.is_adjacent());
    assert!(tokens[3].flags.is_adjacent());
}

#[test]
fn digraphs_lex_as_their_punctuator() {
    let (tokens, _) = lex_all("<% %>");
    assert_eq!(tokens[0].kind, p(Punctuator::LBrace));
    assert_eq!(tokens[0].value, "{");
    assert_eq!(tokens[0].original(), "<%");
    assert_eq!(tokens[1].kind, p(Punctuator::RBrace));
}

#[test]
fn less_colon_colon_special_case() {
    let kinds: Vec<_> = lex("v<::std::string>").into_iter().map(|(k, _)| k).collect();
    assert_eq!(kinds[1], p(Punctuator::Less));
    assert_eq!(kinds[2], p(Punctuator::ColonColon));

    let kinds: Vec<_> = lex("a<::>").into_iter().map(|(k, _)| k).collect();
    assert_eq!(kinds[1], p(Punctuator::LBracket));
    assert_eq!(kinds[2], p(Punctuator::RBracket));
}

#[test]
fn spliced_punctuator() {
    let token = single("-\\\n>");
    assert_eq!(token.kind, p(Punctuator::Arrow));
    assert!(token.flags.contains(TokenFlags::SPLICED));
}
