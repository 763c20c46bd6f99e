//! Namespace-level declarations and declaration specifiers.

use cxx_ir::{Keyword as K, Punctuator as P};
use cxx_peg::{any, next_not, one_or_more, optional, text, zero_or_more, GrammarBuilder};

use super::{builtin_type, cv_qualifier, virt_specifier, IDENT, STRING};
use crate::CxxRule::*;

pub(super) fn define(g: &mut GrammarBuilder) {
    g.define(TranslationUnit, zero_or_more(Declaration));

    // Function definitions come before `simple_declaration`, or the body
    // of `void f() {}` would be read as a braced initializer.
    g.define(
        Declaration,
        alt![
            P::Semicolon,
            AttributeDeclaration,
            TemplateDeclaration,
            ExplicitInstantiation,
            LinkageSpecification,
            NamespaceDefinition,
            NamespaceAliasDefinition,
            UsingDirective,
            AliasDeclaration,
            UsingDeclaration,
            StaticAssertDeclaration,
            AsmDeclaration,
            FunctionDefinition,
            SimpleDeclaration,
            OpaqueEnumDeclaration,
        ],
    );

    g.define(
        AttributeDeclaration,
        seq![one_or_more(AttributeSpecifier), P::Semicolon],
    );
    g.define(
        SimpleDeclaration,
        seq![
            zero_or_more(AttributeSpecifier),
            DeclSpecifierSeq,
            optional(InitDeclaratorList),
            P::Semicolon,
        ],
    );

    // Constructors, destructors and conversion functions have no type
    // before the declarator.
    g.define(
        FunctionDefinition,
        seq![
            zero_or_more(AttributeSpecifier),
            alt![
                seq![DeclSpecifierSeq, Declarator],
                seq![zero_or_more(DeclSpecifier), Declarator],
            ],
            zero_or_more(virt_specifier()),
            optional(RequiresClause),
            FunctionBody,
        ],
    );
    g.define(
        FunctionBody,
        alt![
            seq![optional(CtorInitializer), CompoundStatement],
            seq![
                K::Try,
                optional(CtorInitializer),
                CompoundStatement,
                one_or_more(Handler),
            ],
            seq![P::Assign, alt![K::Default, K::Delete], P::Semicolon],
        ],
    );
    g.define(
        CtorInitializer,
        seq![
            P::Colon,
            MemInitializer,
            zero_or_more(seq![P::Comma, MemInitializer]),
        ],
    );
    g.define(
        MemInitializer,
        seq![
            alt![
                DecltypeSpecifier,
                seq![optional(NestedNameSpecifier), TypeName],
            ],
            alt![
                seq![P::LParen, optional(ExpressionList), P::RParen],
                BracedInitList,
            ],
            optional(P::Ellipsis),
        ],
    );

    g.define(
        LinkageSpecification,
        seq![
            K::Extern,
            STRING,
            alt![
                seq![P::LBrace, zero_or_more(Declaration), P::RBrace],
                Declaration,
            ],
        ],
    );
    g.define(
        NamespaceDefinition,
        seq![
            optional(K::Inline),
            K::Namespace,
            zero_or_more(AttributeSpecifier),
            optional(seq![
                IDENT,
                zero_or_more(seq![P::ColonColon, optional(K::Inline), IDENT]),
            ]),
            P::LBrace,
            zero_or_more(Declaration),
            P::RBrace,
        ],
    );
    g.define(
        NamespaceAliasDefinition,
        seq![
            K::Namespace,
            IDENT,
            P::Assign,
            optional(NestedNameSpecifier),
            IDENT,
            P::Semicolon,
        ],
    );
    g.define(
        UsingDirective,
        seq![
            zero_or_more(AttributeSpecifier),
            K::Using,
            K::Namespace,
            optional(NestedNameSpecifier),
            IDENT,
            P::Semicolon,
        ],
    );
    g.define(
        AliasDeclaration,
        seq![
            K::Using,
            IDENT,
            zero_or_more(AttributeSpecifier),
            P::Assign,
            TypeId,
            P::Semicolon,
        ],
    );
    let using_declarator = seq![
        optional(K::Typename),
        optional(NestedNameSpecifier),
        UnqualifiedId,
        optional(P::Ellipsis),
    ];
    g.define(
        UsingDeclaration,
        seq![
            K::Using,
            alt![
                seq![K::Enum, ElaboratedTypeSpecifier],
                seq![
                    using_declarator.clone(),
                    zero_or_more(seq![P::Comma, using_declarator]),
                ],
            ],
            P::Semicolon,
        ],
    );
    g.define(
        StaticAssertDeclaration,
        seq![
            K::StaticAssert,
            P::LParen,
            ConstantExpression,
            optional(seq![P::Comma, one_or_more(STRING)]),
            P::RParen,
            P::Semicolon,
        ],
    );
    g.define(
        AsmDeclaration,
        seq![
            zero_or_more(AttributeSpecifier),
            K::Asm,
            zero_or_more(alt![K::Volatile, K::Inline, K::Goto]),
            P::LParen,
            BalancedTokens,
            P::RParen,
            P::Semicolon,
        ],
    );
    g.define(OpaqueEnumDeclaration, seq![EnumHead, P::Semicolon]);

    // One type per sequence: after it only qualifiers, storage classes and
    // further fundamental type keywords may follow.
    g.define(
        DeclSpecifierSeq,
        seq![
            zero_or_more(DeclSpecifier),
            TypeSpecifier,
            zero_or_more(alt![DeclSpecifier, builtin_type()]),
            zero_or_more(AttributeSpecifier),
        ],
    );
    g.define(
        DeclSpecifier,
        alt![
            K::Static,
            K::Extern,
            K::Mutable,
            K::Register,
            K::ThreadLocal,
            K::Inline,
            K::Virtual,
            seq![
                K::Explicit,
                optional(seq![P::LParen, ConstantExpression, P::RParen]),
            ],
            K::Friend,
            K::Typedef,
            K::Constexpr,
            K::Consteval,
            K::Constinit,
            cv_qualifier(),
            text("__inline"),
            text("__forceinline"),
        ],
    );
    g.define(
        TypeSpecifierSeq,
        seq![
            zero_or_more(cv_qualifier()),
            TypeSpecifier,
            zero_or_more(alt![cv_qualifier(), builtin_type()]),
        ],
    );
    g.define(
        TypeSpecifier,
        alt![
            ClassSpecifier,
            EnumSpecifier,
            ElaboratedTypeSpecifier,
            TypenameSpecifier,
            DecltypeSpecifier,
            one_or_more(builtin_type()),
            // A name followed by `::` qualifies something, as in `A::~A()`.
            seq![
                optional(NestedNameSpecifier),
                optional(K::Template),
                TypeName,
                next_not(P::ColonColon),
            ],
        ],
    );
    g.define(TypeName, alt![SimpleTemplateId, IDENT]);
    g.define(
        ElaboratedTypeSpecifier,
        seq![
            alt![K::Class, K::Struct, K::Union, K::Enum],
            zero_or_more(AttributeSpecifier),
            optional(NestedNameSpecifier),
            alt![SimpleTemplateId, IDENT],
        ],
    );
    g.define(
        TypenameSpecifier,
        seq![
            K::Typename,
            NestedNameSpecifier,
            optional(K::Template),
            alt![SimpleTemplateId, IDENT],
        ],
    );
    g.define(
        DecltypeSpecifier,
        seq![K::Decltype, P::LParen, alt![K::Auto, Expression], P::RParen],
    );

    g.define(
        AttributeSpecifier,
        alt![
            seq![
                P::LBracket,
                P::LBracket,
                BalancedTokens,
                P::RBracket,
                P::RBracket,
            ],
            seq![K::Alignas, P::LParen, BalancedTokens, P::RParen],
            seq![
                alt![text("__attribute__"), text("__declspec")],
                P::LParen,
                BalancedTokens,
                P::RParen,
            ],
        ],
    );
    g.define(
        BalancedTokens,
        zero_or_more(alt![
            seq![P::LParen, BalancedTokens, P::RParen],
            seq![P::LBracket, BalancedTokens, P::RBracket],
            seq![P::LBrace, BalancedTokens, P::RBrace],
            seq![
                next_not(alt![
                    P::LParen,
                    P::RParen,
                    P::LBracket,
                    P::RBracket,
                    P::LBrace,
                    P::RBrace,
                ]),
                any(),
            ],
        ]),
    );
}
