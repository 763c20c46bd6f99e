//! Line metrics, computed by visitors.

use std::collections::BTreeSet;

use cxx_ir::{Punctuator, Token, TokenKind};
use cxx_parse::CxxRule;
use cxx_peg::{Cst, NodeRef, NodeType, Visitor};

/// Lines of code in one function body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FunctionLines {
    /// Line of the body's first token.
    pub line: u32,
    pub lines: u32,
}

/// Counts the lines of code in every function body.
///
/// A line counts when a statement or a brace starts on it. The opening
/// brace's line is always counted once, so `{ return 0; }` on one line is
/// a single line.
#[derive(Clone, Debug, Default)]
pub struct FunctionBodyLines {
    functions: Vec<FunctionLines>,
}

impl FunctionBodyLines {
    /// Bodies in source order.
    pub fn functions(&self) -> &[FunctionLines] {
        &self.functions
    }
}

impl Visitor for FunctionBodyLines {
    fn subscribed(&self) -> Vec<NodeType> {
        vec![CxxRule::FunctionBody.into()]
    }

    fn enter(&mut self, body: NodeRef<'_>) {
        let first = body.line();
        let mut lines = 1;
        let mut previous = first;
        for node in body.descendants().filter(|&n| counts_as_code(n)) {
            let line = node.line();
            if line != previous {
                lines += 1;
                previous = line;
            }
        }
        self.functions.push(FunctionLines { line: first, lines });
    }
}

fn counts_as_code(node: NodeRef<'_>) -> bool {
    node.is(CxxRule::Statement) || node.is(Punctuator::LBrace) || node.is(Punctuator::RBrace)
}

/// Which lines of a file hold code and which hold comments.
///
/// Preprocessor directives count as code. A line can be both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileLines {
    code: BTreeSet<u32>,
    comments: BTreeSet<u32>,
}

impl FileLines {
    pub fn code(&self) -> &BTreeSet<u32> {
        &self.code
    }

    pub fn comments(&self) -> &BTreeSet<u32> {
        &self.comments
    }

    pub fn lines_of_code(&self) -> usize {
        self.code.len()
    }

    pub fn comment_lines(&self) -> usize {
        self.comments.len()
    }
}

impl Visitor for FileLines {
    fn visit_token(&mut self, token: &Token) {
        if !token.is_eof() {
            self.code.extend(token.line..=token.end_line());
        }
    }

    fn leave_file(&mut self, cst: &Cst) {
        for trivia in cst.tokens().trivia() {
            let lines = trivia.line..=trivia.end_line();
            match trivia.kind {
                TokenKind::Comment => self.comments.extend(lines),
                _ => self.code.extend(lines),
            }
        }
    }
}
