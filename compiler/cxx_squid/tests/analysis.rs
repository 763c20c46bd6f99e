//! End-to-end analysis of the fixtures under `tests/fixtures`.

use std::path::PathBuf;

use cxx_parse::CxxRule;
use cxx_peg::NodeRef;
use cxx_semantic::{Symbol, SymbolTable};
use cxx_squid::{analyze_file, analyze_files, AnalysisConfig, AnalysisError, FileAnalysis, FileLines, FunctionBodyLines};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn symbols() -> FileAnalysis {
    analyze_file(&fixture("symbols.cc"), &AnalysisConfig::default()).unwrap()
}

/// The definition of the function whose own symbol is `name`.
fn function<'a>(analysis: &'a FileAnalysis, name: &str) -> NodeRef<'a> {
    let table = analysis.symbols();
    analysis
        .cst()
        .root()
        .descendants_of(CxxRule::FunctionDefinition)
        .find(|&f| table.symbols(f).next().is_some_and(|s| s.name() == name))
        .unwrap()
}

fn names<'t>(table: &'t SymbolTable, scope: NodeRef<'_>) -> Vec<&'t str> {
    table.symbols(scope).map(Symbol::name).collect()
}

fn symbol<'t>(table: &'t SymbolTable, scope: NodeRef<'_>, name: &str) -> &'t Symbol {
    table.symbols(scope).find(|s| s.name() == name).unwrap()
}

fn lines(symbol: &Symbol) -> (Vec<u32>, Vec<u32>) {
    (
        symbol.writes().iter().map(|u| u.line).collect(),
        symbol.reads().iter().map(|u| u.line).collect(),
    )
}

#[test]
fn module_variable() {
    let analysis = symbols();
    let table = analysis.symbols();
    let root = analysis.cst().root();
    assert_eq!(names(table, root), ["global1"]);
    assert_eq!(lines(symbol(table, root, "global1")), (vec![4], vec![31]));
}

#[test]
fn non_scope_tree() {
    let analysis = symbols();
    let statement = analysis
        .cst()
        .root()
        .first_descendant(CxxRule::ExpressionStatement)
        .unwrap();
    assert_eq!(analysis.symbols().symbols(statement).count(), 0);
}

#[test]
fn class_members() {
    let analysis = symbols();
    let class = analysis.cst().root().first_descendant(CxxRule::ClassSpecifier).unwrap();
    let table = analysis.symbols();
    assert_eq!(
        names(table, class),
        ["CMotorController", "setSpeed", "setDirectionAndSpeed", "checkSpeed", "speed", "direction"]
    );
    assert_eq!(symbol(table, class, "speed").fully_qualified_name(), "::CMotorController::speed");
}

#[test]
fn parameters() {
    let analysis = symbols();
    let table = analysis.symbols();

    let set_speed = function(&analysis, "CMotorController::setSpeed");
    assert_eq!(names(table, set_speed), ["CMotorController::setSpeed", "speed"]);
    assert_eq!(lines(symbol(table, set_speed, "speed")), (vec![21], vec![22]));

    let both = function(&analysis, "CMotorController::setDirectionAndSpeed");
    assert_eq!(
        names(table, both),
        ["CMotorController::setDirectionAndSpeed", "direction", "speed"]
    );
    assert_eq!(lines(symbol(table, both, "direction")), (vec![25], vec![26]));
    assert_eq!(lines(symbol(table, both, "speed")), (vec![25], vec![27]));
}

#[test]
fn local_variables() {
    let analysis = symbols();
    let table = analysis.symbols();
    let check_speed = function(&analysis, "CMotorController::checkSpeed");
    assert_eq!(names(table, check_speed), ["CMotorController::checkSpeed", "limit", "test1"]);

    let test1 = symbol(table, check_speed, "test1");
    assert_eq!(lines(test1), (vec![33, 35], vec![]));
    assert_eq!(test1.declaration().line, 33);
    assert_eq!(test1.fully_qualified_name(), "::CMotorController::checkSpeed::test1");
}

#[test]
fn constructors_have_their_own_scope() {
    let analysis = symbols();
    let constructor = function(&analysis, "CMotorController::CMotorController");
    assert_eq!(names(analysis.symbols(), constructor), ["CMotorController::CMotorController"]);
}

#[test]
fn metrics() {
    let analysis = symbols();
    let mut bodies = FunctionBodyLines::default();
    let mut file = FileLines::default();
    analysis.scan(&mut [&mut bodies, &mut file]);

    let bodies: Vec<(u32, u32)> = bodies.functions().iter().map(|f| (f.line, f.lines)).collect();
    assert_eq!(bodies, [(18, 2), (21, 3), (25, 4), (30, 8)]);
    assert_eq!(file.lines_of_code(), 29);
    assert_eq!(file.comments().iter().copied().collect::<Vec<_>>(), [1]);
}

#[test]
fn batch_reports_each_file() {
    let paths = [fixture("symbols.cc"), fixture("broken.cc"), fixture("missing.cc")];
    let results = analyze_files(&paths, &AnalysisConfig::default());
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().map(|a| a.path().to_path_buf()).ok(), Some(paths[0].clone()));
    assert!(matches!(results[1], Err(AnalysisError::Parse(cxx_parse::Error::Parse(_)))));
    assert!(matches!(results[2], Err(AnalysisError::Io { .. })));
}
