//! Classes and enumerations.

use cxx_ir::{Keyword as K, Punctuator as P};
use cxx_peg::{one_or_more, optional, text, zero_or_more, GrammarBuilder};

use super::{virt_specifier, IDENT};
use crate::CxxRule::*;

pub(super) fn define(g: &mut GrammarBuilder) {
    g.define(
        ClassSpecifier,
        seq![ClassHead, P::LBrace, optional(MemberSpecification), P::RBrace],
    );
    g.define(
        ClassHead,
        seq![
            alt![K::Class, K::Struct, K::Union],
            zero_or_more(AttributeSpecifier),
            optional(seq![ClassHeadName, optional(text("final"))]),
            optional(BaseClause),
        ],
    );
    g.define(
        ClassHeadName,
        seq![optional(NestedNameSpecifier), alt![SimpleTemplateId, IDENT]],
    );
    g.define(
        BaseClause,
        seq![
            P::Colon,
            BaseSpecifier,
            zero_or_more(seq![P::Comma, BaseSpecifier]),
        ],
    );
    g.define(
        BaseSpecifier,
        seq![
            zero_or_more(AttributeSpecifier),
            zero_or_more(alt![K::Virtual, AccessSpecifier]),
            alt![
                DecltypeSpecifier,
                seq![optional(NestedNameSpecifier), alt![SimpleTemplateId, IDENT]],
            ],
            optional(P::Ellipsis),
        ],
    );
    g.define(AccessSpecifier, alt![K::Public, K::Protected, K::Private]);

    g.define(
        MemberSpecification,
        one_or_more(alt![seq![AccessSpecifier, P::Colon], MemberDeclaration]),
    );
    g.define(
        MemberDeclaration,
        alt![
            FunctionDefinition,
            seq![
                zero_or_more(AttributeSpecifier),
                DeclSpecifierSeq,
                optional(MemberDeclaratorList),
                P::Semicolon,
            ],
            seq![
                zero_or_more(AttributeSpecifier),
                zero_or_more(DeclSpecifier),
                MemberDeclaratorList,
                P::Semicolon,
            ],
            AliasDeclaration,
            UsingDeclaration,
            StaticAssertDeclaration,
            seq![TemplateHead, MemberDeclaration],
            OpaqueEnumDeclaration,
            P::Semicolon,
        ],
    );
    g.define(
        MemberDeclaratorList,
        seq![
            MemberDeclarator,
            zero_or_more(seq![P::Comma, MemberDeclarator]),
        ],
    );
    // Bit-fields first: `x : 3` must not stop after the declarator `x`.
    g.define(
        MemberDeclarator,
        alt![
            seq![
                optional(IDENT),
                P::Colon,
                ConstantExpression,
                optional(BraceOrEqualInitializer),
            ],
            seq![
                Declarator,
                zero_or_more(virt_specifier()),
                optional(RequiresClause),
                optional(BraceOrEqualInitializer),
            ],
        ],
    );

    g.define(
        EnumSpecifier,
        seq![
            EnumHead,
            P::LBrace,
            optional(seq![
                EnumeratorDefinition,
                zero_or_more(seq![P::Comma, EnumeratorDefinition]),
                optional(P::Comma),
            ]),
            P::RBrace,
        ],
    );
    g.define(
        EnumHead,
        seq![
            K::Enum,
            optional(alt![K::Class, K::Struct]),
            zero_or_more(AttributeSpecifier),
            optional(seq![optional(NestedNameSpecifier), IDENT]),
            optional(seq![P::Colon, TypeSpecifierSeq]),
        ],
    );
    g.define(
        EnumeratorDefinition,
        seq![
            IDENT,
            zero_or_more(AttributeSpecifier),
            optional(seq![P::Assign, ConstantExpression]),
        ],
    );
}
