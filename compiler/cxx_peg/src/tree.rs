//! Concrete syntax tree.
//!
//! Nodes live in one arena per parse and are addressed by [`NodeId`].
//! Children are stored as contiguous runs of ids, parents as plain ids:
//! the parent link is a lookup aid and owns nothing. Every traversal here
//! is iterative.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use cxx_ir::{Keyword, Punctuator, Token, TokenKind, TokenList};

use crate::RuleId;

/// Index of a node in its tree.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// What a node is: a rule match or a single token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeType {
    Rule(RuleId),
    Token(TokenKind),
}

impl From<RuleId> for NodeType {
    fn from(rule: RuleId) -> Self {
        NodeType::Rule(rule)
    }
}

impl From<TokenKind> for NodeType {
    fn from(kind: TokenKind) -> Self {
        NodeType::Token(kind)
    }
}

impl From<Keyword> for NodeType {
    fn from(keyword: Keyword) -> Self {
        NodeType::Token(TokenKind::Keyword(keyword))
    }
}

impl From<Punctuator> for NodeType {
    fn from(punctuator: Punctuator) -> Self {
        NodeType::Token(TokenKind::Punctuator(punctuator))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    kind: NodeType,
    pub(crate) parent: Option<NodeId>,
    /// Range into the tree's edge list.
    pub(crate) children: Range<usize>,
    /// Range into the token list.
    pub(crate) tokens: Range<usize>,
}

impl Node {
    pub(crate) fn new(kind: NodeType, children: Range<usize>, tokens: Range<usize>) -> Self {
        Node {
            kind,
            parent: None,
            children,
            tokens,
        }
    }
}

/// The tree produced by one parse, owning its tokens.
pub struct Cst {
    nodes: Vec<Node>,
    edges: Vec<NodeId>,
    root: NodeId,
    tokens: TokenList,
    rule_names: Arc<[Box<str>]>,
}

impl Cst {
    pub(crate) fn new(
        nodes: Vec<Node>,
        edges: Vec<NodeId>,
        root: NodeId,
        tokens: TokenList,
        rule_names: Arc<[Box<str>]>,
    ) -> Self {
        Cst {
            nodes,
            edges,
            root,
            tokens,
            rule_names,
        }
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.node(self.root)
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { cst: self, id }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn tokens(&self) -> &TokenList {
        &self.tokens
    }

    pub fn rule_name(&self, rule: RuleId) -> &str {
        &self.rule_names[rule.index()]
    }

    /// Pre-order enter / post-order leave events for the whole tree.
    pub fn events(&self) -> Events<'_> {
        self.root().events()
    }

    fn data(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl fmt::Debug for Cst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Indented outline: one node per line, tokens with their value.
impl fmt::Display for Cst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0usize;
        for event in self.events() {
            match event {
                Event::Enter(node) => {
                    write!(f, "{:indent$}", "", indent = depth * 2)?;
                    match node.token() {
                        Some(token) if node.is_token() => {
                            writeln!(f, "{:?} {:?}", token.kind, token.value)?;
                        }
                        _ => writeln!(f, "{}", node.rule_name().unwrap_or("?"))?,
                    }
                    depth += 1;
                }
                Event::Leave(_) => depth -= 1,
            }
        }
        Ok(())
    }
}

/// A node together with its tree.
#[derive(Copy, Clone)]
pub struct NodeRef<'a> {
    cst: &'a Cst,
    id: NodeId,
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.cst, other.cst) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeType::Rule(rule) => write!(f, "{}", self.cst.rule_name(rule))?,
            NodeType::Token(kind) => write!(f, "{kind:?}")?,
        }
        match self.token() {
            Some(t) => write!(f, " {:?} @ {}:{}", t.value, t.line, t.column),
            None => f.write_str(" (empty)"),
        }
    }
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a Node {
        self.cst.data(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn cst(&self) -> &'a Cst {
        self.cst
    }

    pub fn kind(&self) -> NodeType {
        self.data().kind
    }

    pub fn is(&self, kind: impl Into<NodeType>) -> bool {
        self.kind() == kind.into()
    }

    pub fn is_any(&self, kinds: &[NodeType]) -> bool {
        kinds.contains(&self.kind())
    }

    pub fn rule(&self) -> Option<RuleId> {
        match self.kind() {
            NodeType::Rule(rule) => Some(rule),
            NodeType::Token(_) => None,
        }
    }

    pub fn rule_name(&self) -> Option<&'a str> {
        self.rule().map(|r| self.cst.rule_name(r))
    }

    /// True for token leaves.
    pub fn is_token(&self) -> bool {
        matches!(self.kind(), NodeType::Token(_))
    }

    /// Every token the node spans.
    pub fn tokens(&self) -> &'a [Token] {
        let range = self.data().tokens.clone();
        self.cst.tokens.as_slice().get(range).unwrap_or_default()
    }

    /// First token of the node; `None` for a rule that matched nothing.
    pub fn token(&self) -> Option<&'a Token> {
        self.tokens().first()
    }

    pub fn last_token(&self) -> Option<&'a Token> {
        self.tokens().last()
    }

    /// Value of the first token, or `""`.
    pub fn token_value(&self) -> &'a str {
        self.token().map_or("", |t| t.value.as_str())
    }

    /// Values of all spanned tokens, concatenated.
    pub fn text(&self) -> String {
        self.tokens()
            .iter()
            .filter(|t| !t.is_eof())
            .map(|t| t.value.as_str())
            .collect()
    }

    /// Line of the first token; the line of the following token for an
    /// empty node.
    pub fn line(&self) -> u32 {
        self.anchor().map_or(1, |t| t.line)
    }

    pub fn column(&self) -> u32 {
        self.anchor().map_or(0, |t| t.column)
    }

    fn anchor(&self) -> Option<&'a Token> {
        let start = self.data().tokens.start;
        self.cst
            .tokens
            .as_slice()
            .get(start)
            .or_else(|| self.cst.tokens.last())
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| self.cst.node(id))
    }

    pub fn children(&self) -> Children<'a> {
        let range = self.data().children.clone();
        Children {
            cst: self.cst,
            ids: self.cst.edges[range].iter(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.data().children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        self.children().nth(index)
    }

    pub fn first_child(&self, kind: impl Into<NodeType>) -> Option<NodeRef<'a>> {
        let kind = kind.into();
        self.children().find(|c| c.kind() == kind)
    }

    pub fn last_child(&self) -> Option<NodeRef<'a>> {
        self.children().next_back()
    }

    pub fn next_sibling(&self) -> Option<NodeRef<'a>> {
        let mut siblings = self.parent()?.children();
        siblings.by_ref().find(|s| s.id == self.id)?;
        siblings.next()
    }

    pub fn previous_sibling(&self) -> Option<NodeRef<'a>> {
        let mut siblings = self.parent()?.children().rev();
        siblings.by_ref().find(|s| s.id == self.id)?;
        siblings.next()
    }

    /// Parent, grandparent, and so on up to the root.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors { next: self.parent() }
    }

    pub fn first_ancestor(&self, kind: impl Into<NodeType>) -> Option<NodeRef<'a>> {
        let kind = kind.into();
        self.ancestors().find(|a| a.kind() == kind)
    }

    pub fn has_ancestor(&self, kind: impl Into<NodeType>) -> bool {
        self.first_ancestor(kind).is_some()
    }

    /// Descendants in pre-order, not including the node itself.
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.children().map(|c| c.id).collect();
        stack.reverse();
        Descendants {
            cst: self.cst,
            stack,
        }
    }

    pub fn first_descendant(&self, kind: impl Into<NodeType>) -> Option<NodeRef<'a>> {
        let kind = kind.into();
        self.descendants().find(|d| d.kind() == kind)
    }

    pub fn has_descendant(&self, kind: impl Into<NodeType>) -> bool {
        self.first_descendant(kind).is_some()
    }

    /// All descendants of the given kind, in pre-order.
    pub fn descendants_of(&self, kind: impl Into<NodeType>) -> impl Iterator<Item = NodeRef<'a>> {
        let kind = kind.into();
        self.descendants().filter(move |d| d.kind() == kind)
    }

    /// Enter/leave events for this subtree.
    pub fn events(&self) -> Events<'a> {
        Events {
            cst: self.cst,
            stack: vec![(self.id, false)],
        }
    }
}

/// Iterator over a node's children.
#[derive(Clone)]
pub struct Children<'a> {
    cst: &'a Cst,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| self.cst.node(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|&id| self.cst.node(id))
    }
}

impl ExactSizeIterator for Children<'_> {}

/// Iterator up the parent chain.
pub struct Ancestors<'a> {
    next: Option<NodeRef<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    cst: &'a Cst,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.cst.node(id);
        let children = &self.cst.edges[node.data().children.clone()];
        self.stack.extend(children.iter().rev());
        Some(node)
    }
}

/// A step of a depth-first walk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event<'a> {
    Enter(NodeRef<'a>),
    Leave(NodeRef<'a>),
}

/// Depth-first walk: `Enter` before a node's children, `Leave` after
/// them, children left to right.
pub struct Events<'a> {
    cst: &'a Cst,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> Iterator for Events<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, entered) = self.stack.pop()?;
        let node = self.cst.node(id);
        if entered {
            return Some(Event::Leave(node));
        }
        self.stack.push((id, true));
        let children = &self.cst.edges[node.data().children.clone()];
        self.stack.extend(children.iter().rev().map(|&c| (c, false)));
        Some(Event::Enter(node))
    }
}
