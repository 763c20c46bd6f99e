//! The parsing machine.
//!
//! Executes a [`Program`] over a token slice with two explicit stacks:
//! choice points (where to resume after a failure, and what to restore)
//! and call frames (where to return, and which rule's node to close).
//! The tree under construction is an arena that is truncated on
//! backtracking, so abandoned alternatives leave nothing behind.
//!
//! The machine also tracks the furthest failure: the deepest token index
//! at which any match failed, and every matcher that failed there.
//! Failures inside lookaheads do not count.

use std::ops::Range;

use cxx_ir::{Token, TokenList};

use crate::compiler::END_ADDR;
use crate::tree::Node;
use crate::{Addr, Cst, Instr, MatcherId, NodeId, NodeType, ParseError, Program, RuleId};

#[derive(Copy, Clone, Debug)]
struct ChoicePoint {
    resume: Addr,
    cursor: usize,
    frames: usize,
    pending: usize,
    nodes: usize,
    edges: usize,
    in_predicate: bool,
}

#[derive(Copy, Clone, Debug)]
struct Frame {
    ret: Addr,
    rule: RuleId,
    pending_start: usize,
    token_start: usize,
}

/// Result of [`Machine::match_prefix`].
#[derive(Debug)]
pub struct PrefixMatch {
    /// Tree rooted at the matched rule.
    pub cst: Cst,
    /// Number of tokens the rule consumed.
    pub consumed: usize,
}

/// Tree parts of a successful run, detached from the token borrow.
struct Parsed {
    nodes: Vec<Node>,
    edges: Vec<NodeId>,
    root: NodeId,
    consumed: usize,
}

impl Parsed {
    fn into_cst(self, program: &Program, tokens: TokenList) -> Cst {
        Cst::new(
            self.nodes,
            self.edges,
            self.root,
            tokens,
            program.names().clone(),
        )
    }
}

/// One parse in progress.
pub struct Machine<'p, 't> {
    program: &'p Program,
    tokens: &'t [Token],
    full: bool,
    ip: Addr,
    cursor: usize,
    choices: Vec<ChoicePoint>,
    frames: Vec<Frame>,
    /// Finished nodes not yet attached to a parent.
    pending: Vec<NodeId>,
    nodes: Vec<Node>,
    edges: Vec<NodeId>,
    furthest: usize,
    expected: Vec<MatcherId>,
}

impl<'p, 't> Machine<'p, 't> {
    fn new(program: &'p Program, tokens: &'t [Token], full: bool) -> Self {
        Machine {
            program,
            tokens,
            full,
            ip: 0,
            cursor: 0,
            choices: Vec::new(),
            frames: Vec::new(),
            pending: Vec::new(),
            nodes: Vec::with_capacity(tokens.len() * 2),
            edges: Vec::with_capacity(tokens.len() * 2),
            furthest: 0,
            expected: Vec::new(),
        }
    }

    /// Parse `tokens` with the program's root rule.
    ///
    /// The whole token stream must be consumed; a trailing EOF token the
    /// grammar did not match becomes the root's last child.
    ///
    /// # Errors
    ///
    /// The furthest failure when no alternative matches.
    pub fn parse(program: &Program, tokens: TokenList) -> Result<Cst, ParseError> {
        let mut machine = Machine::new(program, tokens.as_slice(), true);
        let matched = machine.run();
        let parsed = machine.finish(matched)?;
        Ok(parsed.into_cst(program, tokens))
    }

    /// Match `rule` against a prefix of `tokens`.
    ///
    /// # Errors
    ///
    /// The furthest failure when the rule does not match at the start.
    pub fn match_prefix(
        program: &Program,
        rule: RuleId,
        tokens: TokenList,
    ) -> Result<PrefixMatch, ParseError> {
        let mut machine = Machine::new(program, tokens.as_slice(), false);
        machine.frames.push(Frame {
            ret: END_ADDR,
            rule,
            pending_start: 0,
            token_start: 0,
        });
        machine.ip = program.entry(rule);
        let matched = machine.run();
        let parsed = machine.finish(matched)?;
        let consumed = parsed.consumed;
        Ok(PrefixMatch {
            cst: parsed.into_cst(program, tokens),
            consumed,
        })
    }

    fn finish(self, matched: bool) -> Result<Parsed, ParseError> {
        let root = match (matched, self.pending.as_slice()) {
            (true, &[root]) => root,
            _ => {
                let error = self.error();
                tracing::debug!(
                    token = error.token,
                    line = error.line,
                    column = error.column,
                    "parse failed"
                );
                return Err(error);
            }
        };
        tracing::debug!(
            nodes = self.nodes.len(),
            consumed = self.cursor,
            "parse succeeded"
        );
        Ok(Parsed {
            nodes: self.nodes,
            edges: self.edges,
            root,
            consumed: self.cursor,
        })
    }

    fn run(&mut self) -> bool {
        loop {
            match self.program.instr(self.ip) {
                Instr::Match(m) => {
                    let token = self.tokens.get(self.cursor);
                    if token.is_some_and(|t| self.program.matcher(m).matches(t)) {
                        self.leaf(self.cursor..self.cursor + 1);
                        self.cursor += 1;
                        self.ip += 1;
                    } else {
                        self.expect(m);
                        if !self.backtrack() {
                            return false;
                        }
                    }
                }
                Instr::Choice(resume) => {
                    self.push_choice(resume, false);
                    self.ip += 1;
                }
                Instr::PredicateChoice(resume) => {
                    self.push_choice(resume, true);
                    self.ip += 1;
                }
                Instr::Commit(target) => {
                    self.choices.pop();
                    self.ip = target;
                }
                Instr::BackCommit(target) => {
                    if let Some(choice) = self.choices.pop() {
                        self.restore(&choice);
                    }
                    self.ip = target;
                }
                Instr::Jump(target) => self.ip = target,
                Instr::Call { addr, rule } => {
                    self.frames.push(Frame {
                        ret: self.ip + 1,
                        rule,
                        pending_start: self.pending.len(),
                        token_start: self.cursor,
                    });
                    self.ip = addr;
                }
                Instr::Return => {
                    let Some(frame) = self.frames.pop() else {
                        return false;
                    };
                    self.close(frame);
                    self.ip = frame.ret;
                }
                Instr::Fail => {
                    if !self.backtrack() {
                        return false;
                    }
                }
                Instr::FailTwice => {
                    self.choices.pop();
                    if !self.backtrack() {
                        return false;
                    }
                }
                Instr::End => {
                    if self.accept() {
                        return true;
                    }
                    self.expect(MatcherId::END);
                    if !self.backtrack() {
                        return false;
                    }
                }
            }
        }
    }

    fn in_predicate(&self) -> bool {
        self.choices.last().is_some_and(|c| c.in_predicate)
    }

    fn push_choice(&mut self, resume: Addr, predicate: bool) {
        let in_predicate = predicate || self.in_predicate();
        self.choices.push(ChoicePoint {
            resume,
            cursor: self.cursor,
            frames: self.frames.len(),
            pending: self.pending.len(),
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            in_predicate,
        });
    }

    fn restore(&mut self, choice: &ChoicePoint) {
        self.cursor = choice.cursor;
        self.frames.truncate(choice.frames);
        self.pending.truncate(choice.pending);
        self.nodes.truncate(choice.nodes);
        self.edges.truncate(choice.edges);
    }

    /// Resume at the most recent choice point. False when there is none.
    fn backtrack(&mut self) -> bool {
        let Some(choice) = self.choices.pop() else {
            return false;
        };
        self.restore(&choice);
        self.ip = choice.resume;
        true
    }

    fn expect(&mut self, matcher: MatcherId) {
        if self.in_predicate() {
            return;
        }
        if self.cursor > self.furthest {
            self.furthest = self.cursor;
            self.expected.clear();
        }
        if self.cursor == self.furthest && !self.expected.contains(&matcher) {
            self.expected.push(matcher);
        }
    }

    fn leaf(&mut self, tokens: Range<usize>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let kind = NodeType::Token(self.tokens[tokens.start].kind);
        let edges = self.edges.len();
        self.nodes.push(Node::new(kind, edges..edges, tokens));
        self.pending.push(id);
        id
    }

    /// Close a rule's frame, turning its pending children into a node
    /// unless the rule's options say otherwise.
    fn close(&mut self, frame: Frame) {
        let options = self.program.options(frame.rule);
        let outermost = self.frames.is_empty();
        let count = self.pending.len() - frame.pending_start;
        if !outermost && (options.transparent || (options.skip_if_one_child && count == 1)) {
            return;
        }
        let id = NodeId::from_index(self.nodes.len());
        let start = self.edges.len();
        for &child in &self.pending[frame.pending_start..] {
            self.nodes[child.index()].parent = Some(id);
        }
        self.edges.extend(self.pending.drain(frame.pending_start..));
        self.nodes.push(Node::new(
            NodeType::Rule(frame.rule),
            start..self.edges.len(),
            frame.token_start..self.cursor,
        ));
        self.pending.push(id);
    }

    /// `End`: in prefix mode anything goes; a full parse must have
    /// consumed every token but a final EOF, which joins the root.
    fn accept(&mut self) -> bool {
        if !self.full {
            return true;
        }
        match &self.tokens[self.cursor..] {
            [] => true,
            [eof] if eof.is_eof() => {
                let Some(&root) = self.pending.last() else {
                    return false;
                };
                let leaf = self.leaf(self.cursor..self.cursor + 1);
                self.pending.pop();
                self.nodes[leaf.index()].parent = Some(root);
                self.edges.push(leaf);
                self.cursor += 1;
                let root = &mut self.nodes[root.index()];
                debug_assert_eq!(root.children.end + 1, self.edges.len());
                root.children.end += 1;
                root.tokens.end = self.cursor;
                true
            }
            _ => false,
        }
    }

    fn error(&self) -> ParseError {
        let token = self
            .tokens
            .get(self.furthest)
            .or_else(|| self.tokens.last());
        let found = match token {
            Some(t) if t.is_eof() => "end of input".to_owned(),
            Some(t) => format!("'{}'", t.original()),
            None => "end of input".to_owned(),
        };
        ParseError {
            token: self.furthest,
            line: token.map_or(1, |t| t.line),
            column: token.map_or(0, |t| t.column),
            expected: self
                .expected
                .iter()
                .map(|&m| self.program.matcher(m).to_string())
                .collect(),
            found,
        }
    }
}

#[cfg(test)]
mod tests;
