//! Parsing expressions.
//!
//! Grammars are built from [`Expr`] values. Token kinds, keywords,
//! punctuators and rule ids convert into expressions directly, and arrays
//! or vectors of expressions convert into sequences, so a rule definition
//! reads close to the grammar it encodes:
//!
//! ```
//! # use cxx_ir::{Punctuator, TokenKind};
//! # use cxx_peg::{optional, Expr};
//! let e: Expr = [
//!     TokenKind::Identifier.into(),
//!     optional([Expr::from(Punctuator::Assign), TokenKind::Number.into()]),
//! ]
//! .into();
//! ```

use std::fmt;

use cxx_ir::{Keyword, Punctuator, Token, TokenKind};

use crate::RuleId;

/// Test applied to a single token.
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum Matcher {
    /// Token of this kind.
    Kind(TokenKind),
    /// Word or punctuation token whose value is exactly this text.
    /// String and character literals never match, whatever they hold.
    Text(Box<str>),
    /// Token of this kind with nothing between it and the previous token.
    ///
    /// Lets a grammar reassemble operators the lexer splits, such as `>>`.
    Joined(TokenKind),
    /// Any token except EOF.
    Any,
}

impl Matcher {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Matcher::Kind(kind) => token.kind == *kind,
            Matcher::Text(text) => {
                !matches!(token.kind, TokenKind::Eof | TokenKind::String | TokenKind::Character)
                    && token.value == **text
            }
            Matcher::Joined(kind) => token.kind == *kind && token.flags.is_adjacent(),
            Matcher::Any => !token.is_eof(),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Kind(kind) | Matcher::Joined(kind) => write!(f, "{kind}"),
            Matcher::Text(text) => write!(f, "'{text}'"),
            Matcher::Any => f.write_str("any token"),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A parsing expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Match(Matcher),
    /// All of the expressions, in order.
    Sequence(Vec<Expr>),
    /// The first expression that matches (ordered choice).
    FirstOf(Vec<Expr>),
    /// `min` to `max` (unbounded when `None`) greedy repetitions.
    Repeat {
        expr: Box<Expr>,
        min: u32,
        max: Option<u32>,
    },
    /// Succeeds without consuming when the expression would match.
    NextAhead(Box<Expr>),
    /// Succeeds without consuming when the expression would not match.
    NextNot(Box<Expr>),
    /// Invocation of a rule; the rule's match becomes a node of the tree.
    Rule(RuleId),
}

impl Expr {
    /// Can this expression succeed without consuming a token?
    ///
    /// `nullable_rule` answers the same question for rules.
    pub(crate) fn is_nullable(&self, nullable_rule: &impl Fn(RuleId) -> bool) -> bool {
        match self {
            Expr::Match(_) => false,
            Expr::Sequence(items) => items.iter().all(|e| e.is_nullable(nullable_rule)),
            Expr::FirstOf(items) => items.iter().any(|e| e.is_nullable(nullable_rule)),
            Expr::Repeat { expr, min, .. } => *min == 0 || expr.is_nullable(nullable_rule),
            Expr::NextAhead(_) | Expr::NextNot(_) => true,
            Expr::Rule(rule) => nullable_rule(*rule),
        }
    }

    /// Rules this expression may call before consuming any token.
    pub(crate) fn leading_rules(
        &self,
        nullable_rule: &impl Fn(RuleId) -> bool,
        out: &mut Vec<RuleId>,
    ) {
        match self {
            Expr::Match(_) => {}
            Expr::Sequence(items) => {
                for item in items {
                    item.leading_rules(nullable_rule, out);
                    if !item.is_nullable(nullable_rule) {
                        break;
                    }
                }
            }
            Expr::FirstOf(items) => {
                for item in items {
                    item.leading_rules(nullable_rule, out);
                }
            }
            Expr::Repeat { expr, .. } | Expr::NextAhead(expr) | Expr::NextNot(expr) => {
                expr.leading_rules(nullable_rule, out);
            }
            Expr::Rule(rule) => out.push(*rule),
        }
    }

    /// Every rule referenced anywhere in this expression.
    pub(crate) fn for_each_rule(&self, f: &mut impl FnMut(RuleId)) {
        match self {
            Expr::Match(_) => {}
            Expr::Sequence(items) | Expr::FirstOf(items) => {
                for item in items {
                    item.for_each_rule(f);
                }
            }
            Expr::Repeat { expr, .. } | Expr::NextAhead(expr) | Expr::NextNot(expr) => {
                expr.for_each_rule(f);
            }
            Expr::Rule(rule) => f(*rule),
        }
    }

    /// Unbounded repetitions whose body can match empty input.
    pub(crate) fn has_nullable_loop(&self, nullable_rule: &impl Fn(RuleId) -> bool) -> bool {
        match self {
            Expr::Match(_) | Expr::Rule(_) => false,
            Expr::Sequence(items) | Expr::FirstOf(items) => {
                items.iter().any(|e| e.has_nullable_loop(nullable_rule))
            }
            Expr::Repeat { expr, max, .. } => {
                (max.is_none() && expr.is_nullable(nullable_rule))
                    || expr.has_nullable_loop(nullable_rule)
            }
            Expr::NextAhead(expr) | Expr::NextNot(expr) => expr.has_nullable_loop(nullable_rule),
        }
    }
}

impl From<Matcher> for Expr {
    fn from(matcher: Matcher) -> Self {
        Expr::Match(matcher)
    }
}

impl From<TokenKind> for Expr {
    fn from(kind: TokenKind) -> Self {
        Expr::Match(Matcher::Kind(kind))
    }
}

impl From<Keyword> for Expr {
    fn from(keyword: Keyword) -> Self {
        TokenKind::Keyword(keyword).into()
    }
}

impl From<Punctuator> for Expr {
    fn from(punctuator: Punctuator) -> Self {
        TokenKind::Punctuator(punctuator).into()
    }
}

impl From<RuleId> for Expr {
    fn from(rule: RuleId) -> Self {
        Expr::Rule(rule)
    }
}

impl From<Vec<Expr>> for Expr {
    fn from(items: Vec<Expr>) -> Self {
        sequence(items)
    }
}

impl<const N: usize> From<[Expr; N]> for Expr {
    fn from(items: [Expr; N]) -> Self {
        sequence(Vec::from(items))
    }
}

fn sequence(mut items: Vec<Expr>) -> Expr {
    if items.len() == 1 {
        items.swap_remove(0)
    } else {
        Expr::Sequence(items)
    }
}

/// Token of the given kind.
pub fn kind(kind: impl Into<TokenKind>) -> Expr {
    Expr::Match(Matcher::Kind(kind.into()))
}

/// Token of the given kind directly following the previous token.
pub fn joined(kind: impl Into<TokenKind>) -> Expr {
    Expr::Match(Matcher::Joined(kind.into()))
}

/// Token with exactly this value.
pub fn text(text: &str) -> Expr {
    Expr::Match(Matcher::Text(text.into()))
}

/// Any token but EOF.
pub fn any() -> Expr {
    Expr::Match(Matcher::Any)
}

/// Ordered choice.
pub fn first_of(alternatives: impl IntoIterator<Item = Expr>) -> Expr {
    let mut items: Vec<Expr> = alternatives.into_iter().collect();
    if items.len() == 1 {
        items.swap_remove(0)
    } else {
        Expr::FirstOf(items)
    }
}

pub fn repeat(expr: impl Into<Expr>, min: u32, max: Option<u32>) -> Expr {
    Expr::Repeat {
        expr: Box::new(expr.into()),
        min,
        max,
    }
}

pub fn optional(expr: impl Into<Expr>) -> Expr {
    repeat(expr, 0, Some(1))
}

pub fn zero_or_more(expr: impl Into<Expr>) -> Expr {
    repeat(expr, 0, None)
}

pub fn one_or_more(expr: impl Into<Expr>) -> Expr {
    repeat(expr, 1, None)
}

/// Positive lookahead.
pub fn next(expr: impl Into<Expr>) -> Expr {
    Expr::NextAhead(Box::new(expr.into()))
}

/// Negative lookahead.
pub fn next_not(expr: impl Into<Expr>) -> Expr {
    Expr::NextNot(Box::new(expr.into()))
}
