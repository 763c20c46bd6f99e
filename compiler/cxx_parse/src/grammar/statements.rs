//! Statements.

use cxx_ir::{Keyword as K, Punctuator as P};
use cxx_peg::{one_or_more, optional, zero_or_more, GrammarBuilder};

use super::IDENT;
use crate::CxxRule::*;

pub(super) fn define(g: &mut GrammarBuilder) {
    g.define(
        Statement,
        seq![
            zero_or_more(AttributeSpecifier),
            alt![
                LabeledStatement,
                CompoundStatement,
                SelectionStatement,
                IterationStatement,
                JumpStatement,
                TryBlock,
                DeclarationStatement,
                ExpressionStatement,
            ],
        ],
    );
    g.define(
        LabeledStatement,
        seq![
            alt![
                seq![IDENT, P::Colon],
                seq![K::Case, ConstantExpression, P::Colon],
                seq![K::Default, P::Colon],
            ],
            optional(Statement),
        ],
    );
    g.define(
        CompoundStatement,
        seq![P::LBrace, zero_or_more(Statement), P::RBrace],
    );
    g.define(ExpressionStatement, seq![optional(Expression), P::Semicolon]);
    g.define(
        DeclarationStatement,
        alt![
            SimpleDeclaration,
            AliasDeclaration,
            UsingDirective,
            UsingDeclaration,
            StaticAssertDeclaration,
            NamespaceAliasDefinition,
            AsmDeclaration,
            OpaqueEnumDeclaration,
        ],
    );

    g.define(
        SelectionStatement,
        alt![
            seq![
                K::If,
                optional(K::Constexpr),
                P::LParen,
                optional(InitStatement),
                Condition,
                P::RParen,
                Statement,
                optional(seq![K::Else, Statement]),
            ],
            seq![
                K::If,
                optional(P::Bang),
                K::Consteval,
                CompoundStatement,
                optional(seq![K::Else, Statement]),
            ],
            seq![
                K::Switch,
                P::LParen,
                optional(InitStatement),
                Condition,
                P::RParen,
                Statement,
            ],
        ],
    );
    g.define(
        IterationStatement,
        alt![
            seq![K::While, P::LParen, Condition, P::RParen, Statement],
            seq![
                K::Do,
                Statement,
                K::While,
                P::LParen,
                Expression,
                P::RParen,
                P::Semicolon,
            ],
            seq![
                K::For,
                P::LParen,
                InitStatement,
                optional(Condition),
                P::Semicolon,
                optional(Expression),
                P::RParen,
                Statement,
            ],
            seq![
                K::For,
                P::LParen,
                optional(InitStatement),
                ForRangeDeclaration,
                P::Colon,
                alt![Expression, BracedInitList],
                P::RParen,
                Statement,
            ],
        ],
    );
    g.define(InitStatement, alt![SimpleDeclaration, ExpressionStatement]);
    g.define(
        Condition,
        alt![
            seq![
                zero_or_more(AttributeSpecifier),
                DeclSpecifierSeq,
                Declarator,
                BraceOrEqualInitializer,
            ],
            Expression,
        ],
    );
    g.define(
        ForRangeDeclaration,
        seq![zero_or_more(AttributeSpecifier), DeclSpecifierSeq, Declarator],
    );
    g.define(
        JumpStatement,
        alt![
            seq![K::Break, P::Semicolon],
            seq![K::Continue, P::Semicolon],
            seq![
                alt![K::Return, K::CoReturn],
                optional(alt![Expression, BracedInitList]),
                P::Semicolon,
            ],
            seq![K::Goto, IDENT, P::Semicolon],
        ],
    );

    g.define(
        TryBlock,
        seq![K::Try, CompoundStatement, one_or_more(Handler)],
    );
    g.define(
        Handler,
        seq![
            K::Catch,
            P::LParen,
            alt![
                P::Ellipsis,
                seq![
                    zero_or_more(AttributeSpecifier),
                    TypeSpecifierSeq,
                    optional(alt![Declarator, AbstractDeclarator]),
                ],
            ],
            P::RParen,
            CompoundStatement,
        ],
    );
}
