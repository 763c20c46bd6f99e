//! Templates, concepts and template arguments.

use cxx_ir::{Keyword as K, Punctuator as P};
use cxx_peg::{next, optional, zero_or_more, Expr, GrammarBuilder};

use super::IDENT;
use crate::CxxRule::*;

/// `parameter (, parameter)*` between the angle brackets of a template head.
pub(super) fn template_parameter_list() -> Expr {
    let parameter = alt![TypeParameter, ParameterDeclaration];
    seq![parameter.clone(), zero_or_more(seq![P::Comma, parameter])]
}

pub(super) fn define(g: &mut GrammarBuilder) {
    g.define(
        TemplateDeclaration,
        seq![TemplateHead, alt![ConceptDefinition, Declaration]],
    );
    g.define(
        TemplateHead,
        seq![
            K::Template,
            P::Less,
            optional(template_parameter_list()),
            P::Greater,
            optional(RequiresClause),
        ],
    );

    // A type parameter must end the parameter, or `typename T::type N`
    // would stop after `T`.
    let end = next(alt![P::Comma, P::Greater]);
    g.define(
        TypeParameter,
        alt![
            seq![
                TemplateHead,
                alt![K::Class, K::Typename],
                optional(P::Ellipsis),
                optional(IDENT),
                optional(seq![P::Assign, IdExpression]),
                end.clone(),
            ],
            seq![
                alt![K::Class, K::Typename],
                optional(P::Ellipsis),
                optional(IDENT),
                optional(seq![P::Assign, TypeId]),
                end.clone(),
            ],
            seq![
                optional(NestedNameSpecifier),
                alt![SimpleTemplateId, IDENT],
                optional(P::Ellipsis),
                optional(IDENT),
                optional(seq![P::Assign, TypeId]),
                end,
            ],
        ],
    );

    g.define(
        ExplicitInstantiation,
        seq![optional(K::Extern), K::Template, Declaration],
    );
    g.define(
        ConceptDefinition,
        seq![
            K::Concept,
            IDENT,
            P::Assign,
            ConstantExpression,
            P::Semicolon,
        ],
    );
    g.define(
        RequiresClause,
        seq![
            K::Requires,
            PrimaryExpression,
            zero_or_more(seq![
                alt![P::AndAnd, P::OrOr, K::And, K::Or],
                PrimaryExpression,
            ]),
        ],
    );

    let argument = seq![TemplateArgument, optional(P::Ellipsis)];
    g.define(
        SimpleTemplateId,
        seq![
            IDENT,
            P::Less,
            optional(seq![
                argument.clone(),
                zero_or_more(seq![P::Comma, argument]),
            ]),
            P::Greater,
        ],
    );
    // Arguments stop below the relational level, so the first `>` at this
    // depth closes the list.
    g.define(
        TemplateArgument,
        alt![
            seq![TypeId, next(alt![P::Comma, P::Greater, P::Ellipsis])],
            ShiftExpression,
        ],
    );
}
