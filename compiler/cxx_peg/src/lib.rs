//! Parsing-expression grammars over token streams.
//!
//! A grammar is written once with [`GrammarBuilder`], validated into a
//! [`Grammar`], and compiled into a flat [`Program`]. The program is
//! immutable and can be shared by any number of threads; each parse runs
//! its own [`Machine`] with explicit choice and call stacks, so neither
//! backtracking depth nor rule nesting touch the host stack.
//!
//! A successful parse yields a [`Cst`]: an arena of nodes indexed by
//! [`NodeId`], queried through [`NodeRef`] and walked by [`Visitor`]s.
//!
//! # Example
//!
//! ```
//! use cxx_ir::{Token, TokenKind, TokenList};
//! use cxx_peg::{text, GrammarBuilder, Machine, Program};
//!
//! let mut g = GrammarBuilder::new();
//! let greeting = g.rule("greeting");
//! g.define(greeting, [text("hello"), text("world")]);
//! g.set_root(greeting);
//! let program = Program::compile(&g.build().unwrap());
//!
//! let tokens: TokenList = ["hello", "world"]
//!     .into_iter()
//!     .map(|w| Token::new(TokenKind::Identifier, w, 1, 0))
//!     .chain([Token::new(TokenKind::Eof, "EOF", 1, 11)])
//!     .collect();
//! let cst = Machine::parse(&program, tokens).unwrap();
//! assert_eq!(cst.root().rule_name(), Some("greeting"));
//! ```

mod compiler;
mod error;
mod expr;
mod grammar;
mod machine;
mod tree;
mod visitor;

pub use compiler::{Addr, Instr, MatcherId, Program};
pub use error::{GrammarError, ParseError};
pub use expr::{
    any, first_of, joined, kind, next, next_not, one_or_more, optional, repeat, text, zero_or_more, Expr,
    Matcher,
};
pub use grammar::{Grammar, GrammarBuilder, RuleId, RuleOptions};
pub use machine::{Machine, PrefixMatch};
pub use tree::{Ancestors, Children, Cst, Descendants, Event, Events, NodeId, NodeRef, NodeType};
pub use visitor::{walk, Visitor};
