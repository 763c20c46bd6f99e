//! Analysis of C++ files.
//!
//! [`analyze_file`] reads, decodes and parses one file and builds its
//! symbol table, producing a [`FileAnalysis`] that checks and metrics
//! observe through [`Visitor`]s. [`analyze_files`] does the same for a
//! batch of files in parallel, sharing the compiled grammar.
//!
//! # Example
//!
//! ```
//! use cxx_squid::{analyze_source, AnalysisConfig, FunctionBodyLines};
//!
//! let analysis = analyze_source("f.cc", "int f() { return 0; }", &AnalysisConfig::default()).unwrap();
//! let mut lines = FunctionBodyLines::default();
//! analysis.scan(&mut [&mut lines]);
//! assert_eq!(lines.functions()[0].lines, 1);
//! ```

mod analysis;
mod metrics;

use std::sync::Once;

pub use analysis::{analyze_file, analyze_files, analyze_source, AnalysisConfig, AnalysisError, FileAnalysis};
pub use cxx_peg::Visitor;
pub use metrics::{FileLines, FunctionBodyLines, FunctionLines};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=cxx_squid=debug` or `RUST_LOG=cxx_semantic=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
