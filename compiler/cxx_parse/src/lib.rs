//! C++ parsing: the grammar, its compiled program, and the entry points
//! that turn source into a [`Cst`].
//!
//! The grammar is compiled once per process on first use and shared
//! read-only by every parse, whichever thread it runs on.
//!
//! # Example
//!
//! ```
//! use cxx_ir::SourceUri;
//! use cxx_lexer::LexerConfig;
//! use cxx_parse::{parse_str, CxxRule};
//!
//! let parsed = parse_str("int x = 1;", &SourceUri::new("x.cc"), LexerConfig::default()).unwrap();
//! assert!(parsed.cst.root().is(CxxRule::TranslationUnit));
//! ```

mod grammar;
mod rule;

use std::sync::OnceLock;

use cxx_ir::SourceUri;
use cxx_lexer::{LexError, Lexer, LexerConfig};
use cxx_lexer_core::{Charset, DecodeError, SourceBuffer};
use cxx_peg::{Cst, GrammarError, Machine, ParseError, PrefixMatch, Program};

pub use grammar::grammar;
pub use rule::CxxRule;

/// Why a file could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The built-in grammar failed validation.
    #[error("invalid C++ grammar: {0}")]
    Grammar(GrammarError),
}

/// A parsed file.
#[derive(Debug)]
pub struct Parsed {
    pub cst: Cst,
    /// Characters the lexer skipped in recovery mode.
    pub lex_errors: Vec<LexError>,
}

/// The compiled C++ grammar.
///
/// # Errors
///
/// [`Error::Grammar`] if the grammar does not validate. The outcome is
/// computed once and every call returns the same answer.
pub fn program() -> Result<&'static Program, Error> {
    static PROGRAM: OnceLock<Result<Program, GrammarError>> = OnceLock::new();
    PROGRAM
        .get_or_init(|| {
            let compiled = grammar().map(|g| Program::compile(&g));
            match &compiled {
                Ok(program) => tracing::debug!(
                    rules = CxxRule::ALL.len(),
                    instructions = program.code().len(),
                    "compiled C++ grammar"
                ),
                Err(error) => tracing::error!(%error, "C++ grammar is invalid"),
            }
            compiled
        })
        .as_ref()
        .map_err(|e| Error::Grammar(e.clone()))
}

/// Lex and parse a decoded source buffer.
///
/// # Errors
///
/// A strict-mode lex error, or the furthest parse failure.
#[tracing::instrument(level = "debug", skip_all, fields(uri = %uri))]
pub fn parse(buffer: &SourceBuffer, uri: &SourceUri, config: LexerConfig) -> Result<Parsed, Error> {
    let program = program()?;
    let output = Lexer::cxx(config).lex(buffer.text(), uri)?;
    let cst = Machine::parse(program, output.tokens)?;
    Ok(Parsed {
        cst,
        lex_errors: output.errors,
    })
}

/// Decode raw file bytes in `charset`, then [`parse`] them.
///
/// # Errors
///
/// Decoding failures in addition to those of [`parse`].
pub fn parse_bytes(
    bytes: &[u8],
    charset: Charset,
    uri: &SourceUri,
    config: LexerConfig,
) -> Result<Parsed, Error> {
    let buffer = SourceBuffer::decode(bytes, charset)?;
    parse(&buffer, uri, config)
}

/// [`parse`] already decoded text.
///
/// # Errors
///
/// As for [`parse`].
pub fn parse_str(source: &str, uri: &SourceUri, config: LexerConfig) -> Result<Parsed, Error> {
    parse(&SourceBuffer::new(source), uri, config)
}

/// Match a single rule against the start of `source`.
///
/// The rule need not reach the end of the input; `consumed` says how far
/// it got.
///
/// # Errors
///
/// A lex error, or the furthest failure when the rule does not match.
pub fn match_rule(rule: CxxRule, source: &str) -> Result<PrefixMatch, Error> {
    let program = program()?;
    let output = Lexer::cxx(LexerConfig::default()).lex(source, &SourceUri::default())?;
    Ok(Machine::match_prefix(program, rule.id(), output.tokens)?)
}
