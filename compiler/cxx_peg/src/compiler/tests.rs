use super::*;
use crate::{first_of, next_not, text, zero_or_more, GrammarBuilder};
use pretty_assertions::assert_eq;

fn compile_one(expr: Expr) -> Program {
    let mut g = GrammarBuilder::new();
    let r = g.rule("r");
    g.define(r, expr).set_root(r);
    Program::compile(&g.build().unwrap())
}

fn m(i: u32) -> MatcherId {
    MatcherId(i)
}

#[test]
fn entry_stub_calls_root() {
    let program = compile_one(text("a"));
    let root = program.root();
    assert_eq!(
        program.code(),
        &[
            Instr::Call { addr: 2, rule: root },
            Instr::End,
            Instr::Match(m(1)),
            Instr::Return,
        ]
    );
    assert_eq!(program.entry(root), 2);
    assert_eq!(program.matcher(MatcherId::END), &Matcher::Kind(cxx_ir::TokenKind::Eof));
}

#[test]
fn ordered_choice_layout() {
    let program = compile_one(first_of([text("a"), text("b")]));
    assert_eq!(
        &program.code()[2..],
        &[
            Instr::Choice(5),
            Instr::Match(m(1)),
            Instr::Commit(6),
            Instr::Match(m(2)),
            Instr::Return,
        ]
    );
}

#[test]
fn three_way_choice_commits_to_the_end() {
    let program = compile_one(first_of([text("a"), text("b"), text("c")]));
    assert_eq!(
        &program.code()[2..],
        &[
            Instr::Choice(5),
            Instr::Match(m(1)),
            Instr::Commit(9),
            Instr::Choice(8),
            Instr::Match(m(2)),
            Instr::Commit(9),
            Instr::Match(m(3)),
            Instr::Return,
        ]
    );
}

#[test]
fn negative_lookahead_layout() {
    let program = compile_one(next_not(text("a")));
    assert_eq!(
        &program.code()[2..],
        &[
            Instr::PredicateChoice(5),
            Instr::Match(m(1)),
            Instr::FailTwice,
            Instr::Return,
        ]
    );
}

#[test]
fn positive_lookahead_layout() {
    let program = compile_one(crate::next(text("a")));
    assert_eq!(
        &program.code()[2..],
        &[
            Instr::PredicateChoice(5),
            Instr::Match(m(1)),
            Instr::BackCommit(6),
            Instr::Fail,
            Instr::Return,
        ]
    );
}

#[test]
fn star_loops_back() {
    let program = compile_one(zero_or_more(text("a")));
    assert_eq!(
        &program.code()[2..],
        &[
            Instr::Choice(5),
            Instr::Match(m(1)),
            Instr::Commit(2),
            Instr::Return,
        ]
    );
}

#[test]
fn bounded_repetition_unrolls() {
    let program = compile_one(crate::repeat(text("a"), 1, Some(2)));
    assert_eq!(
        &program.code()[2..],
        &[
            Instr::Match(m(1)),
            Instr::Choice(6),
            Instr::Match(m(1)),
            Instr::Commit(6),
            Instr::Return,
        ]
    );
}

#[test]
fn matchers_are_shared() {
    let program = compile_one([text("a"), text("a"), text("b")].into());
    assert_eq!(
        &program.code()[2..5],
        &[Instr::Match(m(1)), Instr::Match(m(1)), Instr::Match(m(2))]
    );
}

#[test]
fn recursive_calls_are_patched() {
    let mut g = GrammarBuilder::new();
    let list = g.rule("list");
    let item = g.rule("item");
    g.define(list, [Expr::from(item), crate::optional(list)]);
    g.define(item, text("x"));
    g.set_root(list);
    let program = Program::compile(&g.build().unwrap());
    let calls: Vec<_> = program
        .code()
        .iter()
        .filter_map(|i| match i {
            Instr::Call { addr, rule } => Some((*addr, *rule)),
            _ => None,
        })
        .collect();
    assert_eq!(
        calls,
        [
            (program.entry(list), list),
            (program.entry(item), item),
            (program.entry(list), list),
        ]
    );
}

#[test]
fn disassembly_labels_rules() {
    let program = compile_one(first_of([text("a"), text("b")]));
    let listing = program.to_string();
    assert!(listing.starts_with("     0  call 2  ; r\n     1  end\nr:\n     2  choice 5\n"));
    assert!(listing.contains("match #1  ; 'a'"));
}
