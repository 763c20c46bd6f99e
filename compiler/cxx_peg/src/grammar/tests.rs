use super::*;
use crate::{first_of, optional, repeat, text, zero_or_more};
use pretty_assertions::assert_eq;

#[test]
fn forward_references_resolve() {
    let mut g = GrammarBuilder::new();
    let list = g.rule("list");
    let item = g.rule("item");
    g.define(list, zero_or_more(item));
    g.define(item, text("x"));
    g.set_root(list);
    let grammar = g.build().unwrap();
    assert_eq!(grammar.len(), 2);
    assert_eq!(grammar.root(), list);
    assert_eq!(grammar.rule_by_name("item"), Some(item));
    assert_eq!(grammar.name(item), "item");
}

#[test]
fn rule_is_declared_once() {
    let mut g = GrammarBuilder::new();
    let a = g.rule("a");
    assert_eq!(g.rule("a"), a);
}

#[test]
fn missing_root() {
    let mut g = GrammarBuilder::new();
    let a = g.rule("a");
    g.define(a, text("x"));
    assert_eq!(g.build().unwrap_err(), GrammarError::MissingRoot);
}

#[test]
fn undefined_rule() {
    let mut g = GrammarBuilder::new();
    let a = g.rule("a");
    let b = g.rule("b");
    g.define(a, [text("x"), Expr::from(b)]);
    g.set_root(a);
    assert_eq!(
        g.build().unwrap_err(),
        GrammarError::UndefinedRule("b".into())
    );
}

#[test]
fn duplicate_definition() {
    let mut g = GrammarBuilder::new();
    let a = g.rule("a");
    g.define(a, text("x")).define(a, text("y")).set_root(a);
    assert_eq!(
        g.build().unwrap_err(),
        GrammarError::DuplicateDefinition("a".into())
    );
}

#[test]
fn nullable_repetition_is_rejected() {
    let mut g = GrammarBuilder::new();
    let a = g.rule("a");
    let maybe = g.rule("maybe");
    g.define(maybe, optional(text("x")));
    g.define(a, zero_or_more(maybe));
    g.set_root(a);
    assert_eq!(
        g.build().unwrap_err(),
        GrammarError::NullableRepetition("a".into())
    );
}

#[test]
fn bounded_repetition_of_nullable_is_fine() {
    let mut g = GrammarBuilder::new();
    let a = g.rule("a");
    g.define(a, repeat(optional(text("x")), 0, Some(3)));
    g.set_root(a);
    assert!(g.build().is_ok());
}

#[test]
fn left_recursion_is_rejected() {
    let mut g = GrammarBuilder::new();
    let expr = g.rule("expr");
    let term = g.rule("term");
    g.define(
        expr,
        first_of([
            [Expr::from(expr), text("+"), term.into()].into(),
            Expr::from(term),
        ]),
    );
    g.define(term, text("x"));
    g.set_root(expr);
    assert_eq!(
        g.build().unwrap_err(),
        GrammarError::LeftRecursion("expr".into())
    );
}

#[test]
fn left_recursion_through_nullable_prefix() {
    let mut g = GrammarBuilder::new();
    let a = g.rule("a");
    let b = g.rule("b");
    g.define(a, [optional(text("x")), b.into()]);
    g.define(b, [Expr::from(a), text("y")]);
    g.set_root(a);
    assert!(matches!(
        g.build().unwrap_err(),
        GrammarError::LeftRecursion(_)
    ));
}

#[test]
fn right_recursion_is_fine() {
    let mut g = GrammarBuilder::new();
    let list = g.rule("list");
    g.define(list, [text("x"), optional(list)]);
    g.set_root(list);
    assert!(g.build().is_ok());
}

#[test]
fn nullability_reaches_a_fixpoint() {
    let mut g = GrammarBuilder::new();
    let top = g.rule("top");
    let pair = g.rule("pair");
    let maybe = g.rule("maybe");
    let word = g.rule("word");
    g.define(top, [Expr::from(pair), word.into()]);
    g.define(pair, [Expr::from(maybe), maybe.into()]);
    g.define(maybe, optional(word));
    g.define(word, text("w"));
    g.set_root(top);
    let grammar = g.build().unwrap();
    assert_eq!(grammar.nullable_rules(), vec![false, true, true, false]);
}

#[test]
fn options_are_kept() {
    let mut g = GrammarBuilder::new();
    let a = g.rule("a");
    g.define(a, text("x"))
        .options(a, RuleOptions::SKIP_IF_ONE_CHILD)
        .set_root(a);
    assert!(g.build().unwrap().options(a).skip_if_one_child);
}
