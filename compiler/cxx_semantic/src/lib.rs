//! Symbol tables for C++ translation units.
//!
//! [`SymbolTable::build`] walks a parsed tree once, opening a scope for
//! the translation unit and for every namespace, class and function, and
//! records each declared name as a [`Symbol`] with its write and read
//! usages. Reads resolve through the enclosing scopes at the point they
//! are seen; a read of a name not declared yet stays unresolved.

mod error;
mod names;
mod table;

pub use error::StructuralError;
pub use names::{fully_qualified_name, id_name, unqualified_name};
pub use table::{Scope, ScopeId, Symbol, SymbolId, SymbolTable, Usage};
