use std::fmt;

use cxx_peg::NodeRef;

/// A tree whose shape the symbol table builder cannot work with, such as a
/// declarator that names nothing.
///
/// Trees produced by the C++ grammar never have this shape, so the error
/// points at a grammar or tree-construction bug rather than bad input.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub struct StructuralError {
    /// Kind of the offending node.
    pub kind: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl StructuralError {
    pub(crate) fn at(node: NodeRef<'_>, message: impl Into<String>) -> Self {
        StructuralError {
            kind: node.rule_name().unwrap_or("token").to_owned(),
            line: node.line(),
            column: node.column(),
            message: message.into(),
        }
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed {} at line {}, column {}: {}",
            self.kind, self.line, self.column, self.message
        )
    }
}
