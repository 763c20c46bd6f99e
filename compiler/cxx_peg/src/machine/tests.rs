use cxx_ir::{Punctuator, Token, TokenFlags, TokenKind, TokenList};
use pretty_assertions::assert_eq;

use super::*;
use crate::{
    any, first_of, joined, kind, next, next_not, one_or_more, optional, repeat, text, Expr, GrammarBuilder,
    Matcher, RuleOptions,
};

/// Identifier tokens for space-separated words, then EOF.
fn words(source: &str) -> TokenList {
    let mut column = 0;
    let mut tokens = TokenList::new();
    for word in source.split(' ').filter(|w| !w.is_empty()) {
        tokens.push(Token::new(TokenKind::Identifier, word, 1, column));
        column += u32::try_from(word.len()).unwrap() + 1;
    }
    tokens.push(Token::new(TokenKind::Eof, "EOF", 1, column));
    tokens
}

fn program(expr: impl Into<Expr>) -> Program {
    let mut g = GrammarBuilder::new();
    let r = g.rule("r");
    g.define(r, expr).set_root(r);
    Program::compile(&g.build().unwrap())
}

#[test]
fn full_parse_consumes_everything() {
    let p = program([text("a"), text("b")]);
    let cst = Machine::parse(&p, words("a b")).unwrap();
    let root = cst.root();
    assert_eq!(root.rule_name(), Some("r"));
    let children: Vec<_> = root.children().map(|c| c.token_value()).collect();
    assert_eq!(children, ["a", "b", "EOF"]);
    assert!(root.last_child().unwrap().is(TokenKind::Eof));
    assert_eq!(root.tokens().len(), 3);
}

#[test]
fn text_ignores_literal_contents() {
    let p = program(text("override"));
    for kind in [TokenKind::String, TokenKind::Character] {
        let mut tokens = TokenList::new();
        tokens.push(Token::new(kind, "override", 1, 0).with_original("\"override\""));
        tokens.push(Token::new(TokenKind::Eof, "EOF", 1, 10));
        let err = Machine::parse(&p, tokens).unwrap_err();
        assert_eq!(err.token, 0);
        assert_eq!(err.expected, ["'override'"]);
    }
    assert!(Machine::parse(&p, words("override")).is_ok());
}

#[test]
fn leftover_input_fails_expecting_eof() {
    let p = program(text("a"));
    let err = Machine::parse(&p, words("a b")).unwrap_err();
    assert_eq!(err.token, 1);
    assert_eq!(err.expected, ["EOF"]);
    assert_eq!(err.found, "'b'");
}

#[test]
fn grammar_may_match_eof_itself() {
    let p = program([text("a"), crate::kind(TokenKind::Eof)]);
    let cst = Machine::parse(&p, words("a")).unwrap();
    assert_eq!(cst.root().children().len(), 2);
}

#[test]
fn negative_lookahead() {
    let p = program([text("a"), next_not(text("b"))]);
    let r = p.root();

    let ok = Machine::match_prefix(&p, r, words("a c")).unwrap();
    assert_eq!(ok.consumed, 1);
    assert!(Machine::match_prefix(&p, r, words("a b")).is_err());

    let full = program([text("a"), next_not(text("b")), any()]);
    assert!(Machine::parse(&full, words("a c")).is_ok());
    assert!(Machine::parse(&full, words("a b")).is_err());
}

#[test]
fn positive_lookahead_consumes_nothing() {
    let p = program([next(text("a")), any()]);
    let r = p.root();
    assert_eq!(Machine::match_prefix(&p, r, words("a")).unwrap().consumed, 1);
    assert!(Machine::match_prefix(&p, r, words("b")).is_err());
}

#[test]
fn lookahead_failures_are_not_diagnostics() {
    let p = program([next_not([text("a"), text("q")]), text("a"), text("b")]);
    assert!(Machine::parse(&p, words("a b")).is_ok());
    let err = Machine::parse(&p, words("a c")).unwrap_err();
    assert_eq!(err.token, 1);
    assert_eq!(err.expected, ["'b'"]);
}

#[test]
fn recursive_rules() {
    let mut g = GrammarBuilder::new();
    let nested = g.rule("nested");
    g.define(
        nested,
        first_of([[text("("), nested.into(), text(")")].into(), text("x")]),
    );
    g.set_root(nested);
    let p = Program::compile(&g.build().unwrap());

    let cst = Machine::parse(&p, words("( ( x ) )")).unwrap();
    let depth = cst
        .root()
        .descendants()
        .filter(|n| n.rule_name() == Some("nested"))
        .count();
    assert_eq!(depth, 2);
    assert!(Machine::parse(&p, words("( ( x )")).is_err());
}

#[test]
fn deep_nesting_does_not_use_the_host_stack() {
    let mut g = GrammarBuilder::new();
    let nested = g.rule("nested");
    g.define(
        nested,
        first_of([[text("("), nested.into(), text(")")].into(), text("x")]),
    );
    g.set_root(nested);
    let p = Program::compile(&g.build().unwrap());

    let depth = 20_000;
    let source = format!("{} x {}", "( ".repeat(depth), ") ".repeat(depth));
    let cst = Machine::parse(&p, words(&source)).unwrap();
    assert_eq!(cst.root().descendants().count(), 3 * depth + 2);
}

#[test]
fn furthest_failure_beats_last_failure() {
    let p = program(first_of([
        [text("a"), text("b"), text("c"), text("d")].into(),
        [text("a"), text("x")].into(),
    ]));
    let err = Machine::parse(&p, words("a b c e")).unwrap_err();
    assert_eq!(err.token, 3);
    assert_eq!((err.line, err.column), (1, 6));
    assert_eq!(err.expected, ["'d'"]);
    assert_eq!(err.found, "'e'");
}

#[test]
fn expected_set_accumulates() {
    let p = program([text("a"), first_of([text("b"), text("c")])]);
    let err = Machine::parse(&p, words("a d")).unwrap_err();
    assert_eq!(err.expected, ["'b'", "'c'"]);
    assert_eq!(
        err.to_string(),
        "parse error at line 1, column 2: expected one of: 'b', 'c', found 'd'"
    );
}

#[test]
fn failure_at_end_of_input() {
    let p = program([text("a"), text("b")]);
    let err = Machine::parse(&p, words("a")).unwrap_err();
    assert_eq!(err.found, "end of input");
    assert_eq!(err.to_string(), "parse error at line 1, column 2: expected 'b', found end of input");
}

#[test]
fn backtracking_discards_abandoned_nodes() {
    let mut g = GrammarBuilder::new();
    let root = g.rule("root");
    let item = g.rule("item");
    g.define(item, text("x"));
    g.define(
        root,
        first_of([
            [Expr::from(item), text("z")].into(),
            [Expr::from(item), text("y")].into(),
        ]),
    );
    g.set_root(root);
    let p = Program::compile(&g.build().unwrap());

    let cst = Machine::parse(&p, words("x y")).unwrap();
    // root, item, x, y, EOF
    assert_eq!(cst.len(), 5);
    let kinds: Vec<_> = cst.root().children().map(|c| c.rule_name()).collect();
    assert_eq!(kinds, [Some("item"), None, None]);
}

#[test]
fn skip_if_one_child_collapses() {
    let mut g = GrammarBuilder::new();
    let sum = g.rule("sum");
    let term = g.rule("term");
    let top = g.rule("top");
    g.define(top, sum);
    g.define(sum, [Expr::from(term), crate::zero_or_more([text("+"), term.into()])])
        .options(sum, RuleOptions::SKIP_IF_ONE_CHILD);
    g.define(term, TokenKind::Identifier);
    g.set_root(top);
    let p = Program::compile(&g.build().unwrap());

    let single = Machine::parse(&p, words("x")).unwrap();
    assert_eq!(single.root().child(0).unwrap().rule_name(), Some("term"));

    let chain = Machine::parse(&p, words("x + y")).unwrap();
    assert_eq!(chain.root().child(0).unwrap().rule_name(), Some("sum"));
}

#[test]
fn transparent_rules_add_no_node() {
    let mut g = GrammarBuilder::new();
    let top = g.rule("top");
    let pair = g.rule("pair");
    g.define(top, one_or_more(pair));
    g.define(pair, [text("k"), text("v")])
        .options(pair, RuleOptions::TRANSPARENT);
    g.set_root(top);
    let p = Program::compile(&g.build().unwrap());

    let cst = Machine::parse(&p, words("k v k v")).unwrap();
    assert_eq!(cst.root().children().len(), 5);
    assert!(cst.root().children().all(|c| c.is_token()));
}

#[test]
fn root_always_gets_a_node() {
    let mut g = GrammarBuilder::new();
    let top = g.rule("top");
    g.define(top, text("x"))
        .options(top, RuleOptions::SKIP_IF_ONE_CHILD);
    g.set_root(top);
    let p = Program::compile(&g.build().unwrap());
    let cst = Machine::parse(&p, words("x")).unwrap();
    assert_eq!(cst.root().rule_name(), Some("top"));
}

#[test]
fn bounded_repetition() {
    let p = program(repeat(text("a"), 2, Some(3)));
    let r = p.root();
    assert_eq!(
        Machine::match_prefix(&p, r, words("a a a a")).unwrap().consumed,
        3
    );
    assert_eq!(Machine::match_prefix(&p, r, words("a a")).unwrap().consumed, 2);
    assert!(Machine::match_prefix(&p, r, words("a")).is_err());
}

#[test]
fn optional_and_empty_match() {
    let p = program(optional(text("a")));
    let cst = Machine::parse(&p, words("")).unwrap();
    let root = cst.root();
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.child(0).unwrap().token_value(), "EOF");
}

#[test]
fn prefix_match_of_inner_rule() {
    let mut g = GrammarBuilder::new();
    let top = g.rule("top");
    let pair = g.rule("pair");
    g.define(top, [Expr::from(pair), text(";")]);
    g.define(pair, [text("k"), text("v")]);
    g.set_root(top);
    let p = Program::compile(&g.build().unwrap());

    let m = Machine::match_prefix(&p, pair, words("k v ;")).unwrap();
    assert_eq!(m.consumed, 2);
    assert_eq!(m.cst.root().rule_name(), Some("pair"));
}

#[test]
fn hand_assembled_jump() {
    let p = Program::from_parts(
        vec![
            Instr::Call {
                addr: 2,
                rule: RuleId::from_raw(0),
            },
            Instr::End,
            Instr::Jump(4),
            Instr::Fail,
            Instr::Match(MatcherId::from_raw(1)),
            Instr::Return,
        ],
        vec![Matcher::Kind(TokenKind::Eof), Matcher::Text("a".into())],
        vec![2],
        &["r"],
    );
    assert!(Machine::parse(&p, words("a")).is_ok());
    assert!(Machine::parse(&p, words("b")).is_err());
}

#[test]
fn joined_requires_adjacent_tokens() {
    let gt = TokenKind::Punctuator(Punctuator::Greater);
    let p = program([kind(gt), joined(gt)]);
    let split = |flags: TokenFlags| -> TokenList {
        [
            Token::new(gt, ">", 1, 0),
            Token::new(gt, ">", 1, 1).with_flags(flags),
            Token::new(TokenKind::Eof, "EOF", 1, 2),
        ]
        .into_iter()
        .collect()
    };
    assert!(Machine::parse(&p, split(TokenFlags::empty())).is_ok());
    assert!(Machine::parse(&p, split(TokenFlags::SPACE_BEFORE)).is_err());
}
