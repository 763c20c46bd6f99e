//! Expressions, from the comma operator down to primary expressions.

use cxx_ir::{Keyword as K, Punctuator as P, TokenKind};
use cxx_peg::{joined, next, one_or_more, optional, zero_or_more, Expr, GrammarBuilder};

use super::templates::template_parameter_list;
use super::{builtin_type, IDENT, STRING};
use crate::CxxRule::{self, *};

/// `operand (op operand)*`, one precedence level.
fn binary(g: &mut GrammarBuilder, rule: CxxRule, operand: CxxRule, op: Expr) {
    g.define(rule, seq![operand, zero_or_more(seq![op, operand])]);
}

fn overloadable_operator() -> Expr {
    alt![
        seq![alt![K::New, K::Delete], optional(seq![P::LBracket, P::RBracket])],
        K::CoAwait,
        seq![P::LParen, P::RParen],
        seq![P::LBracket, P::RBracket],
        seq![P::Greater, joined(P::Greater), joined(P::Assign)],
        seq![P::Greater, joined(P::Greater)],
        seq![P::Greater, joined(P::Assign)],
        P::ArrowStar,
        P::Arrow,
        P::Spaceship,
        P::ShlAssign,
        P::Shl,
        P::EqEq,
        P::NotEq,
        P::LessEq,
        P::AndAnd,
        P::OrOr,
        P::PlusPlus,
        P::MinusMinus,
        P::PlusAssign,
        P::MinusAssign,
        P::StarAssign,
        P::SlashAssign,
        P::PercentAssign,
        P::AndAssign,
        P::OrAssign,
        P::XorAssign,
        P::Plus,
        P::Minus,
        P::Star,
        P::Slash,
        P::Percent,
        P::Caret,
        P::Amp,
        P::Pipe,
        P::Tilde,
        P::Bang,
        P::Assign,
        P::Less,
        P::Greater,
        P::Comma,
    ]
}

pub(super) fn define(g: &mut GrammarBuilder) {
    binary(g, Expression, AssignmentExpression, P::Comma.into());
    g.define(ConstantExpression, ConditionalExpression);

    // The conditional expression doubles as the left operand of an
    // assignment, so the operand is parsed once whichever way it goes.
    g.define(
        AssignmentExpression,
        alt![
            ThrowExpression,
            seq![K::CoYield, alt![AssignmentExpression, BracedInitList]],
            seq![
                ConditionalExpression,
                optional(seq![AssignmentOperator, InitializerClause]),
            ],
        ],
    );
    g.define(
        AssignmentOperator,
        alt![
            P::Assign,
            P::StarAssign,
            P::SlashAssign,
            P::PercentAssign,
            P::PlusAssign,
            P::MinusAssign,
            seq![P::Greater, joined(P::Greater), joined(P::Assign)],
            P::ShlAssign,
            P::AndAssign,
            P::XorAssign,
            P::OrAssign,
            K::AndEq,
            K::OrEq,
            K::XorEq,
        ],
    );
    g.define(
        ConditionalExpression,
        seq![
            LogicalOrExpression,
            optional(seq![
                P::Question,
                Expression,
                P::Colon,
                AssignmentExpression,
            ]),
        ],
    );

    binary(g, LogicalOrExpression, LogicalAndExpression, alt![P::OrOr, K::Or]);
    binary(g, LogicalAndExpression, InclusiveOrExpression, alt![P::AndAnd, K::And]);
    binary(g, InclusiveOrExpression, ExclusiveOrExpression, alt![P::Pipe, K::Bitor]);
    binary(g, ExclusiveOrExpression, AndExpression, alt![P::Caret, K::Xor]);
    binary(g, AndExpression, EqualityExpression, alt![P::Amp, K::Bitand]);
    binary(g, EqualityExpression, RelationalExpression, alt![P::EqEq, P::NotEq, K::NotEq]);
    binary(
        g,
        RelationalExpression,
        CompareExpression,
        alt![
            P::LessEq,
            seq![P::Greater, joined(P::Assign)],
            P::Less,
            P::Greater,
        ],
    );
    binary(g, CompareExpression, ShiftExpression, P::Spaceship.into());
    binary(
        g,
        ShiftExpression,
        AdditiveExpression,
        alt![P::Shl, seq![P::Greater, joined(P::Greater)]],
    );
    binary(g, AdditiveExpression, MultiplicativeExpression, alt![P::Plus, P::Minus]);
    binary(
        g,
        MultiplicativeExpression,
        PmExpression,
        alt![P::Star, P::Slash, P::Percent],
    );
    binary(g, PmExpression, CastExpression, alt![P::DotStar, P::ArrowStar]);

    g.define(
        CastExpression,
        alt![
            seq![P::LParen, TypeId, P::RParen, CastExpression],
            UnaryExpression,
        ],
    );
    g.define(
        UnaryExpression,
        alt![
            seq![alt![P::PlusPlus, P::MinusMinus], CastExpression],
            seq![
                alt![
                    P::Star,
                    P::Amp,
                    P::Plus,
                    P::Minus,
                    P::Bang,
                    P::Tilde,
                    K::Not,
                    K::Compl,
                ],
                CastExpression,
            ],
            seq![K::Sizeof, P::Ellipsis, P::LParen, IDENT, P::RParen],
            seq![K::Sizeof, P::LParen, TypeId, P::RParen],
            seq![K::Sizeof, UnaryExpression],
            seq![K::Alignof, P::LParen, TypeId, P::RParen],
            seq![K::Noexcept, P::LParen, Expression, P::RParen],
            seq![K::CoAwait, CastExpression],
            NewExpression,
            DeleteExpression,
            PostfixExpression,
        ],
    );
    g.define(
        NewExpression,
        seq![
            optional(P::ColonColon),
            K::New,
            optional(seq![P::LParen, ExpressionList, P::RParen]),
            alt![
                seq![P::LParen, TypeId, P::RParen],
                seq![
                    TypeSpecifierSeq,
                    zero_or_more(PtrOperator),
                    zero_or_more(seq![P::LBracket, optional(Expression), P::RBracket]),
                ],
            ],
            optional(alt![
                seq![P::LParen, optional(ExpressionList), P::RParen],
                BracedInitList,
            ]),
        ],
    );
    g.define(
        DeleteExpression,
        seq![
            optional(P::ColonColon),
            K::Delete,
            optional(seq![P::LBracket, P::RBracket]),
            CastExpression,
        ],
    );
    g.define(
        ThrowExpression,
        seq![K::Throw, optional(AssignmentExpression)],
    );

    g.define(
        PostfixExpression,
        seq![
            alt![
                seq![
                    alt![one_or_more(builtin_type()), TypenameSpecifier],
                    alt![
                        seq![P::LParen, optional(ExpressionList), P::RParen],
                        BracedInitList,
                    ],
                ],
                seq![
                    alt![
                        K::DynamicCast,
                        K::StaticCast,
                        K::ReinterpretCast,
                        K::ConstCast,
                    ],
                    P::Less,
                    TypeId,
                    P::Greater,
                    P::LParen,
                    Expression,
                    P::RParen,
                ],
                seq![
                    K::Typeid,
                    P::LParen,
                    alt![seq![TypeId, next(P::RParen)], Expression],
                    P::RParen,
                ],
                PrimaryExpression,
            ],
            zero_or_more(alt![
                seq![P::LBracket, alt![Expression, BracedInitList], P::RBracket],
                seq![P::LParen, optional(ExpressionList), P::RParen],
                BracedInitList,
                seq![
                    alt![P::Dot, P::Arrow],
                    optional(K::Template),
                    IdExpression,
                ],
                P::PlusPlus,
                P::MinusMinus,
            ]),
        ],
    );
    g.define(
        PrimaryExpression,
        alt![
            Literal,
            K::This,
            seq![P::LParen, Expression, P::RParen],
            LambdaExpression,
            IdExpression,
        ],
    );
    g.define(
        Literal,
        alt![
            TokenKind::Number,
            one_or_more(STRING),
            TokenKind::Character,
            K::True,
            K::False,
            K::Nullptr,
        ],
    );

    g.define(
        LambdaExpression,
        seq![
            LambdaIntroducer,
            optional(seq![P::Less, template_parameter_list(), P::Greater]),
            optional(LambdaDeclarator),
            CompoundStatement,
        ],
    );
    let capture = alt![
        seq![P::Star, K::This],
        K::This,
        seq![
            optional(P::Amp),
            optional(P::Ellipsis),
            IDENT,
            optional(P::Ellipsis),
            optional(Initializer),
        ],
        P::Amp,
        P::Assign,
    ];
    g.define(
        LambdaIntroducer,
        seq![
            P::LBracket,
            optional(seq![capture.clone(), zero_or_more(seq![P::Comma, capture])]),
            P::RBracket,
        ],
    );
    g.define(
        LambdaDeclarator,
        seq![
            P::LParen,
            ParameterDeclarationClause,
            P::RParen,
            zero_or_more(alt![K::Mutable, K::Constexpr, K::Consteval, K::Static]),
            optional(NoexceptSpecifier),
            zero_or_more(AttributeSpecifier),
            optional(TrailingReturnType),
            optional(RequiresClause),
        ],
    );

    g.define(IdExpression, alt![QualifiedId, UnqualifiedId]);
    g.define(
        QualifiedId,
        seq![NestedNameSpecifier, optional(K::Template), UnqualifiedId],
    );
    g.define(
        UnqualifiedId,
        alt![
            OperatorFunctionId,
            ConversionFunctionId,
            seq![K::Operator, STRING, optional(IDENT)],
            seq![P::Tilde, alt![DecltypeSpecifier, TypeName]],
            SimpleTemplateId,
            IDENT,
        ],
    );
    g.define(
        NestedNameSpecifier,
        alt![
            seq![
                optional(P::ColonColon),
                one_or_more(seq![
                    optional(K::Template),
                    alt![DecltypeSpecifier, SimpleTemplateId, IDENT],
                    P::ColonColon,
                ]),
            ],
            P::ColonColon,
        ],
    );
    g.define(
        OperatorFunctionId,
        seq![K::Operator, overloadable_operator()],
    );
    g.define(
        ConversionFunctionId,
        seq![K::Operator, TypeSpecifierSeq, zero_or_more(PtrOperator)],
    );
}
