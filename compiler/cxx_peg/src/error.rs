//! Grammar and parse errors.

use std::fmt;

/// A grammar that cannot be compiled.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GrammarError {
    #[error("rule `{0}` is referenced but never defined")]
    UndefinedRule(String),
    #[error("no root rule set")]
    MissingRoot,
    #[error("rule `{0}` is defined twice")]
    DuplicateDefinition(String),
    /// An unbounded repetition whose body can match empty input.
    #[error("rule `{0}` repeats an expression that can match empty input")]
    NullableRepetition(String),
    #[error("rule `{0}` is left-recursive")]
    LeftRecursion(String),
}

/// The furthest point any parse attempt reached, with what it expected.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub struct ParseError {
    /// Index of the token at the furthest failure.
    pub token: usize,
    pub line: u32,
    pub column: u32,
    /// Every matcher that failed at that token, in first-tried order.
    pub expected: Vec<String>,
    /// Source text of the token found there.
    pub found: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at line {}, column {}: ", self.line, self.column)?;
        match self.expected.as_slice() {
            [] => {}
            [one] => write!(f, "expected {one}, ")?,
            many => write!(f, "expected one of: {}, ", many.join(", "))?,
        }
        write!(f, "found {}", self.found)
    }
}
