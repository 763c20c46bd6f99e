//! One file's analysis context and the drivers that produce it.

use std::path::{Path, PathBuf};

use cxx_ir::SourceUri;
use cxx_lexer::{LexError, LexerConfig};
use cxx_lexer_core::{Charset, SourceBuffer};
use cxx_peg::{walk, Cst, Visitor};
use cxx_semantic::{StructuralError, SymbolTable};
use rayon::prelude::*;

/// How source files are read and lexed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub charset: Charset,
    pub lexer: LexerConfig,
}

/// Why a file could not be analysed. Each variant is fatal for its file
/// only.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] cxx_parse::Error),
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

/// Everything known about one parsed file.
#[derive(Debug)]
pub struct FileAnalysis {
    path: PathBuf,
    cst: Cst,
    symbols: SymbolTable,
    lex_errors: Vec<LexError>,
}

impl FileAnalysis {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cst(&self) -> &Cst {
        &self.cst
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Characters skipped in recovery mode.
    pub fn lex_errors(&self) -> &[LexError] {
        &self.lex_errors
    }

    /// Run `visitors` over the tree in one depth-first pass.
    pub fn scan(&self, visitors: &mut [&mut dyn Visitor]) {
        walk(&self.cst, visitors);
    }
}

/// Read, decode, parse and index one file.
///
/// # Errors
///
/// The file cannot be read, decoded, lexed or parsed, or its tree has a
/// shape the symbol table builder rejects.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<FileAnalysis, AnalysisError> {
    let bytes = std::fs::read(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let buffer = SourceBuffer::decode(&bytes, config.charset).map_err(cxx_parse::Error::from)?;
    analyze(path, &buffer, config)
}

/// Analyse in-memory text as if it had been read from `path`.
///
/// # Errors
///
/// As [`analyze_file`], minus reading and decoding.
pub fn analyze_source(
    path: impl AsRef<Path>,
    source: &str,
    config: &AnalysisConfig,
) -> Result<FileAnalysis, AnalysisError> {
    analyze(path.as_ref(), &SourceBuffer::new(source), config)
}

fn analyze(path: &Path, buffer: &SourceBuffer, config: &AnalysisConfig) -> Result<FileAnalysis, AnalysisError> {
    let uri = SourceUri::new(path.to_string_lossy());
    let parsed = cxx_parse::parse(buffer, &uri, config.lexer)?;
    let symbols = SymbolTable::build(&parsed.cst)?;
    Ok(FileAnalysis {
        path: path.to_path_buf(),
        cst: parsed.cst,
        symbols,
        lex_errors: parsed.lex_errors,
    })
}

/// Analyse `paths` in parallel.
///
/// Results come back in input order, one per path; a failing file does
/// not affect the others.
pub fn analyze_files<P>(paths: &[P], config: &AnalysisConfig) -> Vec<Result<FileAnalysis, AnalysisError>>
where
    P: AsRef<Path> + Sync,
{
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let result = analyze_file(path, config);
            if let Err(error) = &result {
                tracing::warn!(path = %path.display(), %error, "analysis failed");
            }
            result
        })
        .collect();
    tracing::debug!(
        files = results.len(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        "analysed batch"
    );
    results
}

#[cfg(test)]
mod tests;
