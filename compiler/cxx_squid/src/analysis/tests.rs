use std::path::Path;

use cxx_lexer::{LexMode, LexerConfig};
use cxx_parse::CxxRule;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn analysis_bundles_tree_and_symbols() {
    let analysis = analyze_source("a.cc", "int x = 1;\nint f() { return x; }", &AnalysisConfig::default()).unwrap();
    assert_eq!(analysis.path(), Path::new("a.cc"));
    assert!(analysis.cst().root().is(CxxRule::TranslationUnit));
    let names: Vec<&str> = analysis.symbols().all_symbols().map(|s| s.name()).collect();
    assert_eq!(names, ["x", "f"]);
    assert!(analysis.lex_errors().is_empty());
    assert_eq!(analysis.cst().tokens().as_slice()[0].uri.as_str(), "a.cc");
}

#[test]
fn recovered_characters_still_fail_the_parse() {
    let result = analyze_source("a.cc", "int x = 1; `\nint y;", &AnalysisConfig::default());
    let Err(AnalysisError::Parse(cxx_parse::Error::Parse(error))) = result else {
        panic!("expected a parse failure");
    };
    assert_eq!((error.line, error.column), (1, 11));
}

#[test]
fn strict_mode_fails_on_stray_characters() {
    let config = AnalysisConfig {
        lexer: LexerConfig {
            mode: LexMode::Strict,
            ..LexerConfig::default()
        },
        ..AnalysisConfig::default()
    };
    let result = analyze_source("a.cc", "int x = `;", &config);
    assert!(matches!(result, Err(AnalysisError::Parse(cxx_parse::Error::Lex(_)))));
}

#[test]
fn parse_failures_carry_the_position() {
    let Err(AnalysisError::Parse(cxx_parse::Error::Parse(error))) =
        analyze_source("a.cc", "int f() {\n  return 0\n}", &AnalysisConfig::default())
    else {
        panic!("expected a parse failure");
    };
    assert_eq!(error.line, 3);
    assert_eq!(error.found, "'}'");
}

#[test]
fn missing_files_are_io_errors() {
    let path = Path::new("definitely/not/here.cc");
    let error = analyze_file(path, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(&error, AnalysisError::Io { path: p, .. } if p == path));
    assert!(error.to_string().starts_with("cannot read definitely/not/here.cc"));
}

#[test]
fn structural_errors_render_their_location() {
    let error = AnalysisError::from(cxx_semantic::StructuralError {
        kind: "declarator".to_owned(),
        line: 3,
        column: 4,
        message: "declarator without a declarator id".to_owned(),
    });
    assert!(matches!(error, AnalysisError::Structural(_)));
    assert_eq!(
        error.to_string(),
        "malformed declarator at line 3, column 4: declarator without a declarator id"
    );
}
