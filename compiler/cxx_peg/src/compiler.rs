//! Grammar compiler: expressions to a flat instruction array.
//!
//! Each rule body is compiled once, ends in `Return`, and is entered by
//! `Call`. Forward jumps are emitted with a placeholder target and patched
//! once the target address is known; calls are patched after every body
//! has been placed. The translation, with `Lx:` marking addresses:
//!
//! ```text
//! e1 e2 ... en      e1; e2; ...; en
//! e1 / e2           Choice L1; e1; Commit L2; L1: e2; L2:
//! e*                L1: Choice L2; e; Commit L1; L2:
//! e{min,max}        e (min times); then (max - min) times: Choice END; e; Commit next; END:
//! &e                PredicateChoice L1; e; BackCommit L2; L1: Fail; L2:
//! !e                PredicateChoice L1; e; FailTwice; L1:
//! rule              Call rule
//! ```
//!
//! Address 0 holds the entry stub `Call root; End`.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{Expr, Grammar, Matcher, RuleId, RuleOptions};

/// Instruction address.
pub type Addr = u32;

/// Index into a program's matcher table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct MatcherId(u32);

impl MatcherId {
    /// Always the first matcher: the EOF token, expected when a parse
    /// stops short of the end of input.
    pub const END: MatcherId = MatcherId(0);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        MatcherId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One parsing-machine instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Instr {
    /// Consume the current token if the matcher accepts it, else fail.
    Match(MatcherId),
    /// Push a choice point resuming at the address.
    Choice(Addr),
    /// Push a choice point that opens a lookahead; failures inside it are
    /// not parse diagnostics.
    PredicateChoice(Addr),
    /// Pop the top choice point and jump.
    Commit(Addr),
    /// Pop the top choice point, restore the input it saved, and jump.
    BackCommit(Addr),
    Jump(Addr),
    Call { addr: Addr, rule: RuleId },
    Return,
    /// Backtrack to the top choice point.
    Fail,
    /// Drop the top choice point, then backtrack.
    FailTwice,
    /// Accept.
    End,
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Match(m) => write!(f, "match #{}", m.0),
            Instr::Choice(a) => write!(f, "choice {a}"),
            Instr::PredicateChoice(a) => write!(f, "predicate-choice {a}"),
            Instr::Commit(a) => write!(f, "commit {a}"),
            Instr::BackCommit(a) => write!(f, "back-commit {a}"),
            Instr::Jump(a) => write!(f, "jump {a}"),
            Instr::Call { addr, .. } => write!(f, "call {addr}"),
            Instr::Return => f.write_str("return"),
            Instr::Fail => f.write_str("fail"),
            Instr::FailTwice => f.write_str("fail-twice"),
            Instr::End => f.write_str("end"),
        }
    }
}

/// A compiled grammar. Immutable; share it freely.
#[derive(Clone, Debug)]
pub struct Program {
    code: Vec<Instr>,
    matchers: Vec<Matcher>,
    entries: Vec<Addr>,
    names: Arc<[Box<str>]>,
    options: Vec<RuleOptions>,
    root: RuleId,
}

/// Address of the entry stub's `End`.
pub(crate) const END_ADDR: Addr = 1;

impl Program {
    /// Compile every rule of `grammar`.
    pub fn compile(grammar: &Grammar) -> Program {
        let mut c = Compiler {
            code: Vec::new(),
            matchers: Vec::new(),
            matcher_ids: FxHashMap::default(),
            calls: Vec::new(),
        };
        c.matcher(Matcher::Kind(cxx_ir::TokenKind::Eof));
        c.call(grammar.root());
        c.emit(Instr::End);

        let mut entries = vec![0; grammar.len()];
        for rule in grammar.rule_ids() {
            entries[rule.index()] = c.here();
            c.expr(grammar.expr(rule));
            c.emit(Instr::Return);
        }
        for &(at, rule) in &c.calls {
            c.code[at] = Instr::Call {
                addr: entries[rule.index()],
                rule,
            };
        }

        tracing::debug!(
            rules = grammar.len(),
            instructions = c.code.len(),
            matchers = c.matchers.len(),
            "compiled grammar"
        );
        Program {
            code: c.code,
            matchers: c.matchers,
            entries,
            names: grammar.rule_ids().map(|r| grammar.name(r).into()).collect(),
            options: grammar.rule_ids().map(|r| grammar.options(r)).collect(),
            root: grammar.root(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        code: Vec<Instr>,
        matchers: Vec<Matcher>,
        entries: Vec<Addr>,
        names: &[&str],
    ) -> Program {
        Program {
            code,
            matchers,
            options: vec![RuleOptions::default(); entries.len()],
            entries,
            names: names.iter().map(|&n| n.into()).collect(),
            root: RuleId::from_raw(0),
        }
    }

    pub fn code(&self) -> &[Instr] {
        &self.code
    }

    pub fn root(&self) -> RuleId {
        self.root
    }

    /// Entry address of a rule's body.
    pub fn entry(&self, rule: RuleId) -> Addr {
        self.entries[rule.index()]
    }

    pub fn matcher(&self, id: MatcherId) -> &Matcher {
        &self.matchers[id.index()]
    }

    pub fn rule_name(&self, rule: RuleId) -> &str {
        &self.names[rule.index()]
    }

    pub fn rule_by_name(&self, name: &str) -> Option<RuleId> {
        let index = self.names.iter().position(|n| &**n == name)?;
        Some(RuleId::from_raw(u32::try_from(index).ok()?))
    }

    pub fn options(&self, rule: RuleId) -> RuleOptions {
        self.options[rule.index()]
    }

    pub(crate) fn names(&self) -> &Arc<[Box<str>]> {
        &self.names
    }

    #[inline]
    pub(crate) fn instr(&self, addr: Addr) -> Instr {
        self.code[addr as usize]
    }
}

/// Disassembly: one instruction per line, rule entries labelled.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels: FxHashMap<Addr, Vec<&str>> = FxHashMap::default();
        for (i, &addr) in self.entries.iter().enumerate() {
            labels.entry(addr).or_default().push(&self.names[i]);
        }
        for (addr, instr) in self.code.iter().enumerate() {
            let addr = Addr::try_from(addr).unwrap_or(Addr::MAX);
            if let Some(names) = labels.get(&addr) {
                for name in names {
                    writeln!(f, "{name}:")?;
                }
            }
            write!(f, "{addr:>6}  {instr}")?;
            match instr {
                Instr::Match(m) => write!(f, "  ; {}", self.matcher(*m))?,
                Instr::Call { rule, .. } => write!(f, "  ; {}", self.rule_name(*rule))?,
                _ => {}
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

struct Compiler {
    code: Vec<Instr>,
    matchers: Vec<Matcher>,
    matcher_ids: FxHashMap<Matcher, MatcherId>,
    /// Call sites waiting for their rule's entry address.
    calls: Vec<(usize, RuleId)>,
}

impl Compiler {
    fn here(&self) -> Addr {
        Addr::try_from(self.code.len()).unwrap_or(Addr::MAX)
    }

    fn emit(&mut self, instr: Instr) -> usize {
        self.code.push(instr);
        self.code.len() - 1
    }

    /// Point the jump at `at` to the current address.
    fn patch_here(&mut self, at: usize) {
        let target = self.here();
        self.code[at] = match self.code[at] {
            Instr::Choice(_) => Instr::Choice(target),
            Instr::PredicateChoice(_) => Instr::PredicateChoice(target),
            Instr::Commit(_) => Instr::Commit(target),
            Instr::BackCommit(_) => Instr::BackCommit(target),
            Instr::Jump(_) => Instr::Jump(target),
            other => other,
        };
    }

    fn matcher(&mut self, matcher: Matcher) -> MatcherId {
        if let Some(&id) = self.matcher_ids.get(&matcher) {
            return id;
        }
        let id = MatcherId(u32::try_from(self.matchers.len()).unwrap_or(u32::MAX));
        self.matchers.push(matcher.clone());
        self.matcher_ids.insert(matcher, id);
        id
    }

    fn call(&mut self, rule: RuleId) {
        let at = self.emit(Instr::Call { addr: 0, rule });
        self.calls.push((at, rule));
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Match(m) => {
                let id = self.matcher(m.clone());
                self.emit(Instr::Match(id));
            }
            Expr::Sequence(items) => {
                for item in items {
                    self.expr(item);
                }
            }
            Expr::FirstOf(items) => self.first_of(items),
            Expr::Repeat { expr, min, max } => {
                for _ in 0..*min {
                    self.expr(expr);
                }
                match max {
                    None => {
                        let top = self.here();
                        let choice = self.emit(Instr::Choice(0));
                        self.expr(expr);
                        self.emit(Instr::Commit(top));
                        self.patch_here(choice);
                    }
                    Some(max) => {
                        let mut exits = Vec::new();
                        for _ in *min..*max {
                            exits.push(self.emit(Instr::Choice(0)));
                            self.expr(expr);
                            let commit = self.emit(Instr::Commit(0));
                            self.patch_here(commit);
                        }
                        for exit in exits {
                            self.patch_here(exit);
                        }
                    }
                }
            }
            Expr::NextAhead(expr) => {
                let choice = self.emit(Instr::PredicateChoice(0));
                self.expr(expr);
                let back = self.emit(Instr::BackCommit(0));
                self.patch_here(choice);
                self.emit(Instr::Fail);
                self.patch_here(back);
            }
            Expr::NextNot(expr) => {
                let choice = self.emit(Instr::PredicateChoice(0));
                self.expr(expr);
                self.emit(Instr::FailTwice);
                self.patch_here(choice);
            }
            Expr::Rule(rule) => self.call(*rule),
        }
    }

    fn first_of(&mut self, items: &[Expr]) {
        let Some((last, init)) = items.split_last() else {
            self.emit(Instr::Fail);
            return;
        };
        let mut commits = Vec::with_capacity(init.len());
        for item in init {
            let choice = self.emit(Instr::Choice(0));
            self.expr(item);
            commits.push(self.emit(Instr::Commit(0)));
            self.patch_here(choice);
        }
        self.expr(last);
        for commit in commits {
            self.patch_here(commit);
        }
    }
}

#[cfg(test)]
mod tests;
