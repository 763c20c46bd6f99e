//! Node kinds of the C++ grammar.

use cxx_peg::{Expr, NodeType, RuleId};

macro_rules! cxx_rules {
    ($($variant:ident => $name:literal,)*) => {
        /// A rule of the C++ grammar, and the kind of the nodes it produces.
        ///
        /// Rules are registered in declaration order, so a variant's
        /// discriminant is its [`RuleId`] in the compiled grammar.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        #[repr(u32)]
        pub enum CxxRule {
            $($variant,)*
        }

        impl CxxRule {
            pub const ALL: &'static [CxxRule] = &[$(CxxRule::$variant,)*];

            /// Rule name as it appears in trees and diagnostics.
            pub const fn name(self) -> &'static str {
                match self {
                    $(CxxRule::$variant => $name,)*
                }
            }
        }
    };
}

cxx_rules! {
    TranslationUnit => "translation_unit",

    // Declarations
    Declaration => "declaration",
    SimpleDeclaration => "simple_declaration",
    FunctionDefinition => "function_definition",
    FunctionBody => "function_body",
    CtorInitializer => "ctor_initializer",
    MemInitializer => "mem_initializer",
    AttributeDeclaration => "attribute_declaration",
    LinkageSpecification => "linkage_specification",
    NamespaceDefinition => "namespace_definition",
    NamespaceAliasDefinition => "namespace_alias_definition",
    UsingDirective => "using_directive",
    UsingDeclaration => "using_declaration",
    AliasDeclaration => "alias_declaration",
    StaticAssertDeclaration => "static_assert_declaration",
    AsmDeclaration => "asm_declaration",
    OpaqueEnumDeclaration => "opaque_enum_declaration",
    DeclSpecifierSeq => "decl_specifier_seq",
    DeclSpecifier => "decl_specifier",
    TypeSpecifierSeq => "type_specifier_seq",
    TypeSpecifier => "type_specifier",
    TypeName => "type_name",
    ElaboratedTypeSpecifier => "elaborated_type_specifier",
    TypenameSpecifier => "typename_specifier",
    DecltypeSpecifier => "decltype_specifier",
    AttributeSpecifier => "attribute_specifier",
    BalancedTokens => "balanced_tokens",

    // Templates
    TemplateDeclaration => "template_declaration",
    TemplateHead => "template_head",
    TypeParameter => "type_parameter",
    ExplicitInstantiation => "explicit_instantiation",
    ConceptDefinition => "concept_definition",
    RequiresClause => "requires_clause",
    SimpleTemplateId => "simple_template_id",
    TemplateArgument => "template_argument",

    // Classes and enumerations
    ClassSpecifier => "class_specifier",
    ClassHead => "class_head",
    ClassHeadName => "class_head_name",
    BaseClause => "base_clause",
    BaseSpecifier => "base_specifier",
    AccessSpecifier => "access_specifier",
    MemberSpecification => "member_specification",
    MemberDeclaration => "member_declaration",
    MemberDeclaratorList => "member_declarator_list",
    MemberDeclarator => "member_declarator",
    EnumSpecifier => "enum_specifier",
    EnumHead => "enum_head",
    EnumeratorDefinition => "enumerator_definition",

    // Declarators
    InitDeclaratorList => "init_declarator_list",
    InitDeclarator => "init_declarator",
    Declarator => "declarator",
    PtrOperator => "ptr_operator",
    DeclaratorId => "declarator_id",
    ParametersAndQualifiers => "parameters_and_qualifiers",
    ParameterDeclarationClause => "parameter_declaration_clause",
    ParameterDeclaration => "parameter_declaration",
    NoexceptSpecifier => "noexcept_specifier",
    TrailingReturnType => "trailing_return_type",
    AbstractDeclarator => "abstract_declarator",
    TypeId => "type_id",
    Initializer => "initializer",
    BraceOrEqualInitializer => "brace_or_equal_initializer",
    InitializerClause => "initializer_clause",
    BracedInitList => "braced_init_list",
    ExpressionList => "expression_list",

    // Statements
    Statement => "statement",
    LabeledStatement => "labeled_statement",
    CompoundStatement => "compound_statement",
    ExpressionStatement => "expression_statement",
    DeclarationStatement => "declaration_statement",
    SelectionStatement => "selection_statement",
    IterationStatement => "iteration_statement",
    JumpStatement => "jump_statement",
    TryBlock => "try_block",
    Handler => "handler",
    Condition => "condition",
    InitStatement => "init_statement",
    ForRangeDeclaration => "for_range_declaration",

    // Expressions
    Expression => "expression",
    ConstantExpression => "constant_expression",
    AssignmentExpression => "assignment_expression",
    AssignmentOperator => "assignment_operator",
    ConditionalExpression => "conditional_expression",
    LogicalOrExpression => "logical_or_expression",
    LogicalAndExpression => "logical_and_expression",
    InclusiveOrExpression => "inclusive_or_expression",
    ExclusiveOrExpression => "exclusive_or_expression",
    AndExpression => "and_expression",
    EqualityExpression => "equality_expression",
    RelationalExpression => "relational_expression",
    CompareExpression => "compare_expression",
    ShiftExpression => "shift_expression",
    AdditiveExpression => "additive_expression",
    MultiplicativeExpression => "multiplicative_expression",
    PmExpression => "pm_expression",
    CastExpression => "cast_expression",
    UnaryExpression => "unary_expression",
    NewExpression => "new_expression",
    DeleteExpression => "delete_expression",
    ThrowExpression => "throw_expression",
    PostfixExpression => "postfix_expression",
    PrimaryExpression => "primary_expression",
    Literal => "literal",
    LambdaExpression => "lambda_expression",
    LambdaIntroducer => "lambda_introducer",
    LambdaDeclarator => "lambda_declarator",
    IdExpression => "id_expression",
    QualifiedId => "qualified_id",
    UnqualifiedId => "unqualified_id",
    NestedNameSpecifier => "nested_name_specifier",
    OperatorFunctionId => "operator_function_id",
    ConversionFunctionId => "conversion_function_id",
}

impl CxxRule {
    #[inline]
    pub const fn id(self) -> RuleId {
        RuleId::from_raw(self as u32)
    }

    /// The rule with this id, if the id belongs to the C++ grammar.
    pub fn from_id(id: RuleId) -> Option<CxxRule> {
        CxxRule::ALL.get(id.index()).copied()
    }
}

impl From<CxxRule> for RuleId {
    fn from(rule: CxxRule) -> Self {
        rule.id()
    }
}

impl From<CxxRule> for NodeType {
    fn from(rule: CxxRule) -> Self {
        NodeType::Rule(rule.id())
    }
}

impl From<CxxRule> for Expr {
    fn from(rule: CxxRule) -> Self {
        Expr::Rule(rule.id())
    }
}

#[cfg(test)]
mod tests;
