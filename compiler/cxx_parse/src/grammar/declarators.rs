//! Declarators, parameters, type ids and initializers.

use cxx_ir::{Keyword as K, Punctuator as P};
use cxx_peg::{one_or_more, optional, zero_or_more, Expr, GrammarBuilder};

use super::{cv_qualifier, IDENT};
use crate::CxxRule::*;

fn array_suffix() -> Expr {
    seq![P::LBracket, optional(ConstantExpression), P::RBracket]
}

pub(super) fn define(g: &mut GrammarBuilder) {
    g.define(
        InitDeclaratorList,
        seq![InitDeclarator, zero_or_more(seq![P::Comma, InitDeclarator])],
    );
    g.define(
        InitDeclarator,
        seq![Declarator, optional(RequiresClause), optional(Initializer)],
    );

    // Every declarator names something: the id, a structured binding list,
    // or a parenthesized declarator behind a pointer operator.
    g.define(
        Declarator,
        seq![
            zero_or_more(PtrOperator),
            alt![
                seq![DeclaratorId, zero_or_more(AttributeSpecifier)],
                seq![
                    P::LBracket,
                    DeclaratorId,
                    zero_or_more(seq![P::Comma, DeclaratorId]),
                    P::RBracket,
                ],
                seq![P::LParen, PtrOperator, Declarator, P::RParen],
            ],
            zero_or_more(alt![
                ParametersAndQualifiers,
                seq![array_suffix(), zero_or_more(AttributeSpecifier)],
            ]),
            optional(TrailingReturnType),
        ],
    );
    g.define(
        PtrOperator,
        alt![
            seq![
                P::Star,
                zero_or_more(AttributeSpecifier),
                zero_or_more(cv_qualifier()),
            ],
            seq![alt![P::Amp, P::AndAnd], zero_or_more(AttributeSpecifier)],
            seq![NestedNameSpecifier, P::Star, zero_or_more(cv_qualifier())],
        ],
    );
    g.define(DeclaratorId, seq![optional(P::Ellipsis), IdExpression]);

    g.define(
        ParametersAndQualifiers,
        seq![
            P::LParen,
            ParameterDeclarationClause,
            P::RParen,
            zero_or_more(cv_qualifier()),
            optional(alt![P::Amp, P::AndAnd]),
            optional(NoexceptSpecifier),
            zero_or_more(AttributeSpecifier),
        ],
    );
    let parameters = seq![
        ParameterDeclaration,
        zero_or_more(seq![P::Comma, ParameterDeclaration]),
    ];
    g.define(
        ParameterDeclarationClause,
        optional(alt![
            seq![
                parameters,
                optional(seq![optional(P::Comma), P::Ellipsis]),
            ],
            P::Ellipsis,
        ]),
    );
    g.define(
        ParameterDeclaration,
        seq![
            zero_or_more(AttributeSpecifier),
            optional(K::This),
            DeclSpecifierSeq,
            optional(alt![Declarator, AbstractDeclarator]),
            optional(seq![P::Assign, InitializerClause]),
        ],
    );
    g.define(
        NoexceptSpecifier,
        alt![
            seq![
                K::Noexcept,
                optional(seq![P::LParen, ConstantExpression, P::RParen]),
            ],
            seq![
                K::Throw,
                P::LParen,
                optional(seq![TypeId, zero_or_more(seq![P::Comma, TypeId])]),
                P::RParen,
            ],
        ],
    );
    g.define(TrailingReturnType, seq![P::Arrow, TypeId]);

    let abstract_suffix = alt![ParametersAndQualifiers, array_suffix()];
    let noptr_abstract = seq![
        alt![
            seq![
                P::LParen,
                AbstractDeclarator,
                P::RParen,
                zero_or_more(abstract_suffix.clone()),
            ],
            one_or_more(abstract_suffix),
        ],
        optional(TrailingReturnType),
    ];
    g.define(
        AbstractDeclarator,
        alt![
            seq![one_or_more(PtrOperator), optional(noptr_abstract.clone())],
            noptr_abstract,
            P::Ellipsis,
        ],
    );
    g.define(TypeId, seq![TypeSpecifierSeq, optional(AbstractDeclarator)]);

    g.define(
        Initializer,
        alt![
            BraceOrEqualInitializer,
            seq![P::LParen, optional(ExpressionList), P::RParen],
        ],
    );
    g.define(
        BraceOrEqualInitializer,
        alt![seq![P::Assign, InitializerClause], BracedInitList],
    );
    g.define(InitializerClause, alt![BracedInitList, AssignmentExpression]);
    g.define(
        BracedInitList,
        seq![
            P::LBrace,
            optional(seq![ExpressionList, optional(P::Comma)]),
            P::RBrace,
        ],
    );
    let item = seq![
        optional(seq![P::Dot, IDENT, optional(P::Assign)]),
        InitializerClause,
        optional(P::Ellipsis),
    ];
    g.define(
        ExpressionList,
        seq![item.clone(), zero_or_more(seq![P::Comma, item])],
    );
}
