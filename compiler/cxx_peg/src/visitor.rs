//! Subscription-based tree walking.
//!
//! A [`Visitor`] names the node kinds it cares about and receives `enter`
//! and `leave` calls for exactly those, plus `visit_token` for every token
//! leaf. [`walk`] drives any number of visitors through one depth-first
//! pass: pre-order enter, post-order leave, children left to right.
//!
//! # Example
//!
//! ```text
//! struct CountCalls(usize);
//!
//! impl Visitor for CountCalls {
//!     fn subscribed(&self) -> Vec<NodeType> {
//!         vec![CALL_EXPRESSION.into()]
//!     }
//!
//!     fn enter(&mut self, _node: NodeRef<'_>) {
//!         self.0 += 1;
//!     }
//! }
//! ```

use cxx_ir::Token;
use rustc_hash::FxHashSet;

use crate::{Cst, Event, NodeRef, NodeType};

/// Observer of a tree walk. Every hook defaults to doing nothing.
pub trait Visitor {
    /// Node kinds for which `enter` and `leave` are called.
    fn subscribed(&self) -> Vec<NodeType> {
        Vec::new()
    }

    fn visit_file(&mut self, _cst: &Cst) {}

    fn enter(&mut self, _node: NodeRef<'_>) {}

    fn leave(&mut self, _node: NodeRef<'_>) {}

    /// Called for every token leaf, EOF included, in source order.
    fn visit_token(&mut self, _token: &Token) {}

    fn leave_file(&mut self, _cst: &Cst) {}
}

/// Walk `cst` once, dispatching to every visitor.
///
/// Visitors are entered in slice order and left in reverse order.
pub fn walk(cst: &Cst, visitors: &mut [&mut dyn Visitor]) {
    let subscriptions: Vec<FxHashSet<NodeType>> = visitors
        .iter()
        .map(|v| v.subscribed().into_iter().collect())
        .collect();

    for visitor in visitors.iter_mut() {
        visitor.visit_file(cst);
    }
    for event in cst.events() {
        match event {
            Event::Enter(node) => {
                let kind = node.kind();
                for (visitor, kinds) in visitors.iter_mut().zip(&subscriptions) {
                    if kinds.contains(&kind) {
                        visitor.enter(node);
                    }
                }
                if let (true, Some(token)) = (node.is_token(), node.token()) {
                    for visitor in visitors.iter_mut() {
                        visitor.visit_token(token);
                    }
                }
            }
            Event::Leave(node) => {
                let kind = node.kind();
                for (visitor, kinds) in visitors.iter_mut().zip(&subscriptions).rev() {
                    if kinds.contains(&kind) {
                        visitor.leave(node);
                    }
                }
            }
        }
    }
    for visitor in visitors.iter_mut().rev() {
        visitor.leave_file(cst);
    }
}
