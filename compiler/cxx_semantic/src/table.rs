//! Scopes, symbols, and the single pass that builds them.

use cxx_ir::TokenKind;
use cxx_parse::CxxRule;
use cxx_peg::{Cst, Event, NodeId, NodeRef};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::names::{self, NESTED};
use crate::StructuralError;

/// Index of a scope in its table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The translation unit.
    pub const ROOT: ScopeId = ScopeId(0);

    fn from_index(index: usize) -> Self {
        ScopeId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a symbol in its table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    fn from_index(index: usize) -> Self {
        SymbolId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One occurrence of a symbol's name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Usage {
    pub node: NodeId,
    pub line: u32,
    pub column: u32,
}

impl Usage {
    fn of(node: NodeRef<'_>) -> Self {
        Usage {
            node: node.id(),
            line: node.line(),
            column: node.column(),
        }
    }
}

/// A lexical region: the translation unit, a namespace, a class or a
/// function.
#[derive(Clone, Debug)]
pub struct Scope {
    parent: Option<ScopeId>,
    root: NodeId,
    symbols: Vec<SymbolId>,
    by_name: FxHashMap<String, SymbolId>,
}

impl Scope {
    fn new(parent: Option<ScopeId>, root: NodeId) -> Self {
        Scope {
            parent,
            root,
            symbols: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// Enclosing scope; `None` for the translation unit.
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Node that opened the scope.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Symbols declared here, in declaration order.
    pub fn symbols(&self) -> &[SymbolId] {
        &self.symbols
    }
}

/// Every write and read of one name declared in one scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    fully_qualified_name: String,
    scope: ScopeId,
    declaration: Usage,
    writes: Vec<Usage>,
    reads: Vec<Usage>,
}

impl Symbol {
    /// The name as written at the declaration, qualifiers included.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unqualified_name(&self) -> &str {
        names::unqualified_name(&self.name)
    }

    pub fn fully_qualified_name(&self) -> &str {
        &self.fully_qualified_name
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// The first write.
    pub fn declaration(&self) -> Usage {
        self.declaration
    }

    /// Declarations and assignments, in source order.
    pub fn writes(&self) -> &[Usage] {
        &self.writes
    }

    pub fn reads(&self) -> &[Usage] {
        &self.reads
    }
}

/// Scopes and symbols of one translation unit.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
    by_root: FxHashMap<NodeId, ScopeId>,
}

impl SymbolTable {
    /// Build the table for `cst` in one walk.
    ///
    /// # Errors
    ///
    /// A [`StructuralError`] for a function definition or declarator
    /// without a `declarator_id`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn build(cst: &Cst) -> Result<SymbolTable, StructuralError> {
        let root = cst.root();
        let mut builder = Builder {
            table: SymbolTable {
                scopes: vec![Scope::new(None, root.id())],
                symbols: Vec::new(),
                by_root: FxHashMap::default(),
            },
            reads: FxHashSet::default(),
        };
        builder.table.by_root.insert(root.id(), ScopeId::ROOT);

        let mut stack = vec![ScopeId::ROOT];
        for event in cst.events() {
            match event {
                Event::Enter(node) => builder.enter(node, &mut stack)?,
                Event::Leave(node) => {
                    if opens_scope(node) && stack.len() > 1 {
                        stack.pop();
                    }
                }
            }
        }

        let table = builder.table;
        tracing::debug!(
            scopes = table.scopes.len(),
            symbols = table.symbols.len(),
            "built symbol table"
        );
        Ok(table)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, scope)| (ScopeId::from_index(i), scope))
    }

    /// Every symbol, in declaration order.
    pub fn all_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// The scope opened by `node`, if it opens one.
    pub fn scope_at(&self, node: NodeRef<'_>) -> Option<ScopeId> {
        self.by_root.get(&node.id()).copied()
    }

    /// Symbols of the scope opened by `node`; nothing for a node that
    /// opens no scope.
    pub fn symbols(&self, node: NodeRef<'_>) -> impl Iterator<Item = &Symbol> {
        let ids = match self.scope_at(node) {
            Some(scope) => self.scope(scope).symbols(),
            None => &[],
        };
        ids.iter().map(|&id| self.symbol(id))
    }

    /// Innermost scope containing `node`.
    pub fn scope_of(&self, node: NodeRef<'_>) -> ScopeId {
        std::iter::once(node)
            .chain(node.ancestors())
            .find_map(|n| self.scope_at(n))
            .unwrap_or(ScopeId::ROOT)
    }

    /// Resolve `name` from `scope` outwards.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        self.resolve(scope, name).map(|id| self.symbol(id))
    }

    fn resolve(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut next = Some(scope);
        while let Some(id) = next {
            let scope = self.scope(id);
            if let Some(&symbol) = scope.by_name.get(name) {
                return Some(symbol);
            }
            next = scope.parent;
        }
        None
    }
}

fn opens_scope(node: NodeRef<'_>) -> bool {
    node.is(CxxRule::ClassSpecifier)
        || node.is(CxxRule::FunctionDefinition)
        || node.is(CxxRule::NamespaceDefinition)
}

struct Builder {
    table: SymbolTable,
    /// Nodes already attached as a read of some symbol.
    reads: FxHashSet<NodeId>,
}

impl Builder {
    fn enter(&mut self, node: NodeRef<'_>, stack: &mut Vec<ScopeId>) -> Result<(), StructuralError> {
        let Some(rule) = node.rule().and_then(CxxRule::from_id) else {
            return Ok(());
        };
        let current = stack.last().copied().unwrap_or(ScopeId::ROOT);
        match rule {
            CxxRule::ClassSpecifier => {
                let scope = self.open(node, current, stack);
                if let Some((name, head)) = names::class_name(node) {
                    self.write(scope, name, head);
                }
            }
            CxxRule::FunctionDefinition => {
                let scope = self.open(node, current, stack);
                self.function(node, scope)?;
            }
            CxxRule::NamespaceDefinition => {
                self.open(node, current, stack);
            }
            CxxRule::MemberDeclaration => self.member_declaration(node, current)?,
            CxxRule::SimpleDeclaration => {
                if !node.parent().is_some_and(|p| p.is(CxxRule::DeclarationStatement)) {
                    self.declaration(node, stack)?;
                }
            }
            CxxRule::DeclarationStatement => self.declaration(node, stack)?,
            CxxRule::ExpressionStatement => self.assignments(node, stack),
            CxxRule::ConditionalExpression => {
                for id in node.descendants_of(CxxRule::IdExpression) {
                    self.read(id, stack);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn open(&mut self, node: NodeRef<'_>, parent: ScopeId, stack: &mut Vec<ScopeId>) -> ScopeId {
        let id = ScopeId::from_index(self.table.scopes.len());
        self.table.scopes.push(Scope::new(Some(parent), node.id()));
        self.table.by_root.insert(node.id(), id);
        stack.push(id);
        tracing::trace!(scope = id.0, kind = node.rule_name(), line = node.line(), "opened scope");
        id
    }

    /// The function's own name and its parameters, all in its scope.
    fn function(&mut self, node: NodeRef<'_>, scope: ScopeId) -> Result<(), StructuralError> {
        let Some(declarator) = node.first_child(CxxRule::Declarator) else {
            return Err(StructuralError::at(node, "function definition without a declarator"));
        };
        let Some(id) = names::function_declarator_id(node) else {
            return Err(StructuralError::at(node, "function definition without a declarator id"));
        };
        self.write(scope, names::id_name(id), id);

        for parameter in names::find(declarator, &[CxxRule::ParameterDeclaration], NESTED) {
            for named in names::find(parameter, &[CxxRule::Declarator], NESTED) {
                self.declarator(named, scope)?;
            }
        }
        Ok(())
    }

    fn member_declaration(&mut self, node: NodeRef<'_>, scope: ScopeId) -> Result<(), StructuralError> {
        let mut stops = NESTED.to_vec();
        stops.push(CxxRule::MemberDeclaration);
        for member in names::find(node, &[CxxRule::MemberDeclarator], &stops) {
            if let Some(declarator) = member.first_child(CxxRule::Declarator) {
                self.declarator(declarator, scope)?;
            } else if let Some(name) = member.first_child(TokenKind::Identifier) {
                // Named bit-field.
                self.write(scope, name.token_value().to_owned(), name);
            }
        }
        for initializer in names::find(node, &[CxxRule::BraceOrEqualInitializer], &stops) {
            for id in initializer.descendants_of(CxxRule::IdExpression) {
                self.read_in(id, scope);
            }
        }
        Ok(())
    }

    /// Declared names are written first, then initializers are read.
    fn declaration(&mut self, node: NodeRef<'_>, stack: &[ScopeId]) -> Result<(), StructuralError> {
        let scope = stack.last().copied().unwrap_or(ScopeId::ROOT);
        for declarator in names::find(node, &[CxxRule::Declarator], NESTED) {
            self.declarator(declarator, scope)?;
        }
        for initializer in names::find(node, &[CxxRule::Initializer], NESTED) {
            for id in initializer.descendants_of(CxxRule::IdExpression) {
                self.read(id, stack);
            }
        }
        Ok(())
    }

    fn declarator(&mut self, declarator: NodeRef<'_>, scope: ScopeId) -> Result<(), StructuralError> {
        let ids = names::declarator_ids(declarator);
        if ids.is_empty() {
            return Err(StructuralError::at(declarator, "declarator without a declarator id"));
        }
        for id in ids {
            self.write(scope, names::id_name(id), id);
        }
        Ok(())
    }

    /// `x = ...` writes `x` and reads every name on the right.
    fn assignments(&mut self, node: NodeRef<'_>, stack: &[ScopeId]) {
        let scope = stack.last().copied().unwrap_or(ScopeId::ROOT);
        let operators = names::find(node, &[CxxRule::AssignmentOperator], NESTED);
        for operator in &operators {
            if let Some(target) = operator.previous_sibling() {
                if target.is(CxxRule::IdExpression) {
                    self.write(scope, names::id_name(target), target);
                }
            }
        }
        for operator in &operators {
            if let Some(value) = operator.next_sibling() {
                if value.is(CxxRule::IdExpression) {
                    self.read(value, stack);
                }
                for id in value.descendants_of(CxxRule::IdExpression) {
                    self.read(id, stack);
                }
            }
        }
    }

    fn write(&mut self, scope: ScopeId, name: String, node: NodeRef<'_>) {
        if name.is_empty() {
            return;
        }
        let usage = Usage::of(node);
        let id = match self.table.scope(scope).by_name.get(&name) {
            Some(&id) => id,
            None => {
                let id = SymbolId::from_index(self.table.symbols.len());
                let fully_qualified_name = names::fully_qualified_name(&name, node);
                tracing::trace!(%name, %fully_qualified_name, line = usage.line, "new symbol");
                let data = &mut self.table.scopes[scope.index()];
                data.symbols.push(id);
                data.by_name.insert(name.clone(), id);
                self.table.symbols.push(Symbol {
                    name,
                    fully_qualified_name,
                    scope,
                    declaration: usage,
                    writes: Vec::new(),
                    reads: Vec::new(),
                });
                id
            }
        };
        let symbol = &mut self.table.symbols[id.index()];
        if !symbol.writes.contains(&usage) {
            tracing::trace!(name = %symbol.name, line = usage.line, "write");
            symbol.writes.push(usage);
        }
    }

    fn read(&mut self, node: NodeRef<'_>, stack: &[ScopeId]) {
        let scope = stack.last().copied().unwrap_or(ScopeId::ROOT);
        self.read_in(node, scope);
    }

    /// Attach a read to the symbol `node` resolves to from `scope`, once.
    fn read_in(&mut self, node: NodeRef<'_>, scope: ScopeId) {
        if self.reads.contains(&node.id()) {
            return;
        }
        let name = names::id_name(node);
        let Some(id) = self.table.resolve(scope, &name) else {
            tracing::trace!(%name, line = node.line(), "unresolved read");
            return;
        };
        let usage = Usage::of(node);
        let symbol = &mut self.table.symbols[id.index()];
        if symbol.writes.contains(&usage) {
            return;
        }
        tracing::trace!(name = %symbol.name, line = usage.line, "read");
        symbol.reads.push(usage);
        self.reads.insert(node.id());
    }
}
