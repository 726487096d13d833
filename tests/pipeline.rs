use hoist::diagnostic::*;
use hoist::pipeline::*;
use hoist::program::Program;
use hoist::source::{self, Source};
use hoist::HoistConfig;
use std::cell::Cell;
use std::rc::Rc;

mod common;
use common::*;

/// Frontend that counts how often it was asked to parse.
struct CountingFrontend {
    calls: Rc<Cell<usize>>,
}

impl Frontend for CountingFrontend {
    fn parse(&self, source: Source, reporter: Rc<dyn Reporter>) -> Result<Program, ParseError> {
        self.calls.set(self.calls.get() + 1);
        StandardFrontend.parse(source, reporter)
    }
}

/// Backend that only reports how many top level statements it saw.
struct StatementCountBackend;

impl Backend for StatementCountBackend {
    fn generate(&self, program: &Program) -> String {
        program.statements.len().to_string()
    }
}

#[test]
fn injected_capabilities_are_used() -> TestResult {
    let calls = Rc::new(Cell::new(0));
    let (reporter, _) = TestReporter::new();
    let transformer = Transformer::new(
        Box::new(CountingFrontend {
            calls: Rc::clone(&calls),
        }),
        Box::new(StatementCountBackend),
        reporter,
        HoistConfig::default(),
    );

    let output = transformer
        .hoist_text("var a = 1; f(a);")
        .map_err(|e| e.to_string())?;

    assert_eq!(calls.get(), 1);
    // header, assignment, call
    assert_eq!(output, "3");
    Ok(())
}

#[test]
fn diagnostics_reach_injected_reporter() {
    let (reporter, mut diagnostics) = TestReporter::new();
    let transformer = Transformer::new(
        Box::new(StandardFrontend),
        Box::new(SourceBackend),
        reporter,
        HoistConfig::default(),
    );

    let error = transformer
        .hoist_source(source::named("var x = ;", "broken.js"))
        .unwrap_err();

    let reported = diagnostics.unwrap();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].message, "Expected expression");
    assert_eq!(error.diagnostics(), &reported[..]);
    assert_eq!(
        error.to_string(),
        "failed to parse broken.js: Expected expression at broken.js:1:9"
    );
}

#[test]
fn tree_backend_dumps_hoisted_tree() -> TestResult {
    let (reporter, _) = TestReporter::new();
    let transformer = Transformer::new(
        Box::new(StandardFrontend),
        Box::new(TreeBackend),
        reporter,
        HoistConfig::default(),
    );

    let output = transformer
        .hoist_text("var x = 1; log(x);")
        .map_err(|e| e.to_string())?;

    let expected = [
        "VariableDecl",
        "|--Declarator(name: x)",
        "ExpressionStmt",
        "|--Assignment(=)",
        "|  |--Variable(x)",
        "|  |--Literal(1)",
        "ExpressionStmt",
        "|--Call",
        "|  |--Variable(log)",
        "|  |--Args",
        "|  |  |--Variable(x)",
    ];
    assert_eq!(output, expected.join("\n"));
    Ok(())
}

#[test]
fn steps_can_run_separately() -> TestResult {
    let transformer = Transformer::standard(HoistConfig::default());
    let program = transformer
        .parse(source::text("if (a) var b = 2;"))
        .map_err(|e| e.to_string())?;
    let hoisted = transformer.hoist_program(program);
    assert_eq!(hoisted.statements.len(), 2);
    assert_eq!(transformer.generate(&hoisted), "var b;\nif (a)\n  b = 2;");
    Ok(())
}

#[test]
fn standard_transformer_survives_failures() -> TestResult {
    let transformer = Transformer::standard(HoistConfig::default());

    let first = transformer.hoist_text("var = 1;").unwrap_err();
    assert_eq!(first.diagnostics().len(), 1);
    let second = transformer.hoist_text("f(;").unwrap_err();
    assert_eq!(second.diagnostics().len(), 1);
    assert_eq!(second.diagnostics()[0].message, "Expected expression");

    let output = transformer
        .hoist_text("var x = 1; f(x);")
        .map_err(|e| e.to_string())?;
    assert_eq!(output, "var x;\nx = 1;\nf(x);");
    Ok(())
}
