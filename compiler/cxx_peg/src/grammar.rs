//! Grammar definition and validation.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{Expr, GrammarError};

/// Index of a rule in its grammar, in declaration order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        RuleId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleId({})", self.0)
    }
}

/// How a rule's match shows up in the tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RuleOptions {
    /// Don't create a node when the match has exactly one child; the
    /// child takes its place. Keeps precedence chains flat.
    pub skip_if_one_child: bool,
    /// Never create a node; children attach to the caller's node.
    pub transparent: bool,
}

impl RuleOptions {
    pub const SKIP_IF_ONE_CHILD: RuleOptions = RuleOptions {
        skip_if_one_child: true,
        transparent: false,
    };

    pub const TRANSPARENT: RuleOptions = RuleOptions {
        skip_if_one_child: false,
        transparent: true,
    };
}

#[derive(Clone, Debug)]
struct RuleDef {
    name: Box<str>,
    expr: Option<Expr>,
    options: RuleOptions,
}

/// Collects rule definitions. Rules may be referenced before they are
/// defined, which is how recursive grammars are written.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    rules: Vec<RuleDef>,
    by_name: FxHashMap<Box<str>, RuleId>,
    root: Option<RuleId>,
    duplicates: Vec<RuleId>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        GrammarBuilder::default()
    }

    /// Id of the rule called `name`, declaring it on first use.
    pub fn rule(&mut self, name: &str) -> RuleId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = RuleId(u32::try_from(self.rules.len()).unwrap_or(u32::MAX));
        self.rules.push(RuleDef {
            name: name.into(),
            expr: None,
            options: RuleOptions::default(),
        });
        self.by_name.insert(name.into(), id);
        id
    }

    /// Give `rule` its expression.
    pub fn define(&mut self, rule: impl Into<RuleId>, expr: impl Into<Expr>) -> &mut Self {
        let rule = rule.into();
        let def = &mut self.rules[rule.index()];
        if def.expr.is_some() {
            self.duplicates.push(rule);
        } else {
            def.expr = Some(expr.into());
        }
        self
    }

    pub fn options(&mut self, rule: impl Into<RuleId>, options: RuleOptions) -> &mut Self {
        self.rules[rule.into().index()].options = options;
        self
    }

    pub fn set_root(&mut self, rule: impl Into<RuleId>) -> &mut Self {
        self.root = Some(rule.into());
        self
    }

    /// Validate and freeze the grammar.
    ///
    /// # Errors
    ///
    /// The first problem found, checking in this order: duplicate
    /// definitions, a missing root, rules referenced but never defined,
    /// unbounded repetitions over nullable expressions, left recursion.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        if let Some(&dup) = self.duplicates.first() {
            return Err(GrammarError::DuplicateDefinition(
                self.rules[dup.index()].name.to_string(),
            ));
        }
        let root = self.root.ok_or(GrammarError::MissingRoot)?;
        let mut rules = Vec::with_capacity(self.rules.len());
        for def in self.rules {
            let Some(expr) = def.expr else {
                return Err(GrammarError::UndefinedRule(def.name.into()));
            };
            rules.push(Rule {
                name: def.name,
                expr,
                options: def.options,
            });
        }
        let grammar = Grammar { rules, root };
        grammar.validate()?;
        Ok(grammar)
    }
}

#[derive(Clone, Debug)]
struct Rule {
    name: Box<str>,
    expr: Expr,
    options: RuleOptions,
}

/// A validated grammar: every rule defined, a root chosen, and no
/// expression that could make the parsing machine loop forever.
#[derive(Clone, Debug)]
pub struct Grammar {
    rules: Vec<Rule>,
    root: RuleId,
}

impl Grammar {
    pub fn root(&self) -> RuleId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_ids(&self) -> impl Iterator<Item = RuleId> {
        (0..self.rules.len()).map(|i| RuleId(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    pub fn name(&self, rule: RuleId) -> &str {
        &self.rules[rule.index()].name
    }

    pub fn expr(&self, rule: RuleId) -> &Expr {
        &self.rules[rule.index()].expr
    }

    pub fn options(&self, rule: RuleId) -> RuleOptions {
        self.rules[rule.index()].options
    }

    pub fn rule_by_name(&self, name: &str) -> Option<RuleId> {
        self.rule_ids().find(|&id| self.name(id) == name)
    }

    /// Which rules can match empty input, by fixpoint iteration.
    pub fn nullable_rules(&self) -> Vec<bool> {
        let mut nullable = vec![false; self.rules.len()];
        loop {
            let mut changed = false;
            for (i, rule) in self.rules.iter().enumerate() {
                if !nullable[i] && rule.expr.is_nullable(&|r: RuleId| nullable[r.index()]) {
                    nullable[i] = true;
                    changed = true;
                }
            }
            if !changed {
                return nullable;
            }
        }
    }

    fn validate(&self) -> Result<(), GrammarError> {
        let nullable = self.nullable_rules();
        let is_nullable = |r: RuleId| nullable[r.index()];

        for id in self.rule_ids() {
            if self.expr(id).has_nullable_loop(&is_nullable) {
                return Err(GrammarError::NullableRepetition(self.name(id).into()));
            }
        }

        // Left recursion: a cycle in the "calls before consuming" graph.
        let leading: Vec<Vec<RuleId>> = self
            .rule_ids()
            .map(|id| {
                let mut out = Vec::new();
                self.expr(id).leading_rules(&is_nullable, &mut out);
                out
            })
            .collect();
        let mut state = vec![Visit::New; self.rules.len()];
        for start in self.rule_ids() {
            if state[start.index()] != Visit::New {
                continue;
            }
            let mut stack = vec![(start, 0usize)];
            state[start.index()] = Visit::Open;
            while let Some(top) = stack.last_mut() {
                let (rule, next) = *top;
                top.1 += 1;
                match leading[rule.index()].get(next) {
                    Some(&callee) => match state[callee.index()] {
                        Visit::Open => {
                            return Err(GrammarError::LeftRecursion(self.name(callee).into()));
                        }
                        Visit::New => {
                            state[callee.index()] = Visit::Open;
                            stack.push((callee, 0));
                        }
                        Visit::Done => {}
                    },
                    None => {
                        state[rule.index()] = Visit::Done;
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Visit {
    New,
    Open,
    Done,
}

#[cfg(test)]
mod tests;
