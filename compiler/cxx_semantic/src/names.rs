//! Names of declarations and the scopes around them.
//!
//! Qualified names are built from source text alone: components joined
//! with `::`, template arguments dropped, no lookup of what a qualifier
//! refers to.

use cxx_ir::{Keyword, Punctuator, TokenKind};
use cxx_parse::CxxRule;
use cxx_peg::NodeRef;

const SCOPE: &str = "::";

/// Nodes whose contents belong to another declaration.
pub(crate) const NESTED: &[CxxRule] = &[
    CxxRule::ClassSpecifier,
    CxxRule::FunctionDefinition,
    CxxRule::LambdaExpression,
    CxxRule::ParameterDeclaration,
];

fn is_any(node: NodeRef<'_>, rules: &[CxxRule]) -> bool {
    rules.iter().any(|&rule| node.is(rule))
}

/// Descendants of `node` of the `targets` kinds, in source order.
///
/// The search neither enters a match nor goes below a node of the
/// `stops` kinds.
pub(crate) fn find<'a>(
    node: NodeRef<'a>,
    targets: &[CxxRule],
    stops: &[CxxRule],
) -> Vec<NodeRef<'a>> {
    let mut found = Vec::new();
    let mut stack: Vec<NodeRef<'a>> = node.children().rev().collect();
    while let Some(next) = stack.pop() {
        if is_any(next, targets) {
            found.push(next);
        } else if !is_any(next, stops) {
            stack.extend(next.children().rev());
        }
    }
    found
}

/// The ids a declarator introduces: one, or several for a structured
/// binding.
pub(crate) fn declarator_ids(declarator: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    find(declarator, &[CxxRule::DeclaratorId], NESTED)
}

/// The `declarator_id` naming a function definition.
pub(crate) fn function_declarator_id(function: NodeRef<'_>) -> Option<NodeRef<'_>> {
    let declarator = function.first_child(CxxRule::Declarator)?;
    declarator_ids(declarator).into_iter().next()
}

/// Name of a named class, with the `class_head_name` node spelling it.
pub(crate) fn class_name(class: NodeRef<'_>) -> Option<(String, NodeRef<'_>)> {
    let head = class
        .first_child(CxxRule::ClassHead)?
        .first_child(CxxRule::ClassHeadName)?;
    let mut parts = Vec::new();
    for child in head.children() {
        if child.is(CxxRule::NestedNameSpecifier) {
            parts.extend(child.children().filter_map(scope_component));
        } else if let Some(part) = scope_component(child) {
            parts.push(part);
        }
    }
    Some((parts.join(SCOPE), head))
}

/// `a::b` for `namespace a::b { ... }`; `None` for an unnamed namespace.
pub(crate) fn namespace_name(namespace: NodeRef<'_>) -> Option<String> {
    let parts: Vec<&str> = namespace
        .children()
        .take_while(|child| !child.is(Punctuator::LBrace))
        .filter(|child| child.is(TokenKind::Identifier))
        .map(|child| child.token_value())
        .collect();
    (!parts.is_empty()).then(|| parts.join(SCOPE))
}

/// An identifier or template name inside a qualifier.
fn scope_component(node: NodeRef<'_>) -> Option<String> {
    if node.is(TokenKind::Identifier) {
        Some(node.token_value().to_owned())
    } else if node.is(CxxRule::SimpleTemplateId) {
        node.child(0).map(|name| name.token_value().to_owned())
    } else {
        None
    }
}

/// Name spelled by a `declarator_id` or `id_expression`.
///
/// Qualifiers are kept, template arguments are not: `std::vector<int>`
/// names `std::vector`. Operator and destructor names keep their
/// punctuation, as in `operator==` and `~Widget`.
pub fn id_name(id: NodeRef<'_>) -> String {
    let expression = id.first_child(CxxRule::IdExpression).unwrap_or(id);
    let target = expression
        .first_child(CxxRule::QualifiedId)
        .unwrap_or(expression);

    let mut parts = Vec::new();
    let mut last = String::new();
    for child in target.children() {
        if child.is(CxxRule::NestedNameSpecifier) {
            parts.extend(child.children().filter_map(scope_component));
        } else if child.is(CxxRule::SimpleTemplateId) {
            last.extend(scope_component(child));
        } else if !child.is(Keyword::Template) && !child.is(Punctuator::Ellipsis) {
            last.push_str(&child.text());
        }
    }
    if !last.is_empty() {
        parts.push(last);
    }
    parts.join(SCOPE)
}

/// Last `::` component of a name.
pub fn unqualified_name(name: &str) -> &str {
    name.rsplit(SCOPE).next().unwrap_or(name)
}

/// Fully-qualified name of `name` declared at `declaration`.
///
/// A name that is already qualified is returned as is. Otherwise every
/// enclosing named namespace, class and function contributes a
/// component, outermost first, and the translation unit a leading `::`:
/// `x` declared in member function `m` of class `Outer` is `::Outer::m::x`.
pub fn fully_qualified_name(name: &str, declaration: NodeRef<'_>) -> String {
    if name.contains(SCOPE) {
        return name.to_owned();
    }
    let mut parts: Vec<String> = declaration
        .ancestors()
        .filter_map(|ancestor| scope_name(ancestor, declaration))
        .collect();
    parts.reverse();
    parts.push(name.to_owned());
    format!("{SCOPE}{}", parts.join(SCOPE))
}

/// Component an enclosing scope adds to qualified names, unless
/// `declaration` is that scope's own name.
fn scope_name(ancestor: NodeRef<'_>, declaration: NodeRef<'_>) -> Option<String> {
    if ancestor.is(CxxRule::FunctionDefinition) {
        let id = function_declarator_id(ancestor)?;
        (id != declaration).then(|| id_name(id))
    } else if ancestor.is(CxxRule::ClassSpecifier) {
        let (name, head) = class_name(ancestor)?;
        (head != declaration).then_some(name)
    } else if ancestor.is(CxxRule::NamespaceDefinition) {
        namespace_name(ancestor)
    } else {
        None
    }
}
