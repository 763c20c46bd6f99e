//! The C++ grammar.
//!
//! Rules follow the standard's grammar, rewritten for ordered choice:
//! left recursion becomes repetition, and wherever the standard relies on
//! knowing which names are types the alternatives are ordered so that the
//! reading a compiler would pick is tried first. A few consequences:
//!
//! - A declaration statement is tried before an expression statement.
//! - A declaration specifier sequence holds at most one named type, so in
//!   `Foo bar;` the name `bar` is left for the declarator.
//! - A parenthesized declarator must start with a pointer operator, which
//!   keeps calls such as `f(x);` out of the declaration path.
//! - The lexer never merges `>`, so `>>`, `>=` and `>>=` are reassembled
//!   from adjacent tokens and template argument lists close naturally.
//!
//! Expression precedence levels collapse when they have a single child,
//! so `x = 1` yields an `assignment_expression` whose first child is the
//! `id_expression` for `x`.

use cxx_ir::{Keyword as K, TokenKind};
use cxx_peg::{text, Expr, Grammar, GrammarBuilder, GrammarError, RuleOptions};

use crate::CxxRule;

/// Sequence of expressions.
macro_rules! seq {
    ($($e:expr),+ $(,)?) => {
        ::cxx_peg::Expr::from(vec![$(::cxx_peg::Expr::from($e)),+])
    };
}

/// Ordered choice between expressions.
macro_rules! alt {
    ($($e:expr),+ $(,)?) => {
        ::cxx_peg::first_of([$(::cxx_peg::Expr::from($e)),+])
    };
}

mod classes;
mod declarations;
mod declarators;
mod expressions;
mod statements;
mod templates;

const IDENT: TokenKind = TokenKind::Identifier;
const STRING: TokenKind = TokenKind::String;

const SKIP_IF_ONE_CHILD: &[CxxRule] = &[
    CxxRule::TypeName,
    CxxRule::TemplateArgument,
    CxxRule::InitializerClause,
    CxxRule::InitStatement,
    CxxRule::Expression,
    CxxRule::ConstantExpression,
    CxxRule::AssignmentExpression,
    CxxRule::ConditionalExpression,
    CxxRule::LogicalOrExpression,
    CxxRule::LogicalAndExpression,
    CxxRule::InclusiveOrExpression,
    CxxRule::ExclusiveOrExpression,
    CxxRule::AndExpression,
    CxxRule::EqualityExpression,
    CxxRule::RelationalExpression,
    CxxRule::CompareExpression,
    CxxRule::ShiftExpression,
    CxxRule::AdditiveExpression,
    CxxRule::MultiplicativeExpression,
    CxxRule::PmExpression,
    CxxRule::CastExpression,
    CxxRule::UnaryExpression,
    CxxRule::PostfixExpression,
    CxxRule::PrimaryExpression,
];

const TRANSPARENT: &[CxxRule] = &[CxxRule::UnqualifiedId, CxxRule::BalancedTokens];

/// Build and validate the C++ grammar.
///
/// # Errors
///
/// A [`GrammarError`] means the rule definitions themselves are broken.
pub fn grammar() -> Result<Grammar, GrammarError> {
    let mut g = GrammarBuilder::new();
    for rule in CxxRule::ALL {
        g.rule(rule.name());
    }

    declarations::define(&mut g);
    templates::define(&mut g);
    classes::define(&mut g);
    declarators::define(&mut g);
    statements::define(&mut g);
    expressions::define(&mut g);

    for &rule in SKIP_IF_ONE_CHILD {
        g.options(rule, RuleOptions::SKIP_IF_ONE_CHILD);
    }
    for &rule in TRANSPARENT {
        g.options(rule, RuleOptions::TRANSPARENT);
    }
    g.set_root(CxxRule::TranslationUnit);
    g.build()
}

/// Fundamental type keywords, `auto` included.
fn builtin_type() -> Expr {
    alt![
        K::Char,
        K::Char8T,
        K::Char16T,
        K::Char32T,
        K::WcharT,
        K::Bool,
        K::Short,
        K::Int,
        K::Long,
        K::Signed,
        K::Unsigned,
        K::Float,
        K::Double,
        K::Void,
        K::Auto,
    ]
}

fn cv_qualifier() -> Expr {
    alt![K::Const, K::Volatile]
}

/// `override` and `final` are ordinary identifiers outside this position.
fn virt_specifier() -> Expr {
    alt![text("override"), text("final")]
}
