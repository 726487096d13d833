pub use hoist::diagnostic::*;
use hoist::lexing::Lexer;
use hoist::parsing::{ASTPrinter, Parser};
use hoist::program::Program;
use std::cell::RefCell;
use std::rc::Rc;

pub type TestResult = std::result::Result<(), String>;

#[allow(dead_code)]
pub mod test_source {

    use hoist::source::{self, Source};

    pub fn new_text(text: &str) -> Source {
        source::named(text, "<test>")
    }
}

#[allow(dead_code)]
pub mod test_span {

    use super::test_source;
    use hoist::source::*;

    pub fn new(index: usize, length: usize) -> Span {
        Span::new(&test_source::new_text(""), index, length, 1)
    }
}

pub struct DiagnosticCapture {
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl DiagnosticCapture {
    pub fn unwrap(&mut self) -> Vec<Diagnostic> {
        let captured = RefCell::new(Vec::new());
        self.diagnostics.swap(&captured);
        captured.into_inner()
    }
}

pub struct TestReporter {
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl TestReporter {
    pub fn new() -> (Rc<dyn Reporter>, DiagnosticCapture) {
        let diagnostics = Rc::new(RefCell::new(Vec::new()));
        (
            Rc::new(TestReporter {
                diagnostics: Rc::clone(&diagnostics),
            }),
            DiagnosticCapture { diagnostics },
        )
    }
}

impl Reporter for TestReporter {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    fn has_errored(&self) -> bool {
        !self.diagnostics.borrow().is_empty()
    }
}

/// Lexes and parses `text`, returning the tree and everything reported.
#[allow(dead_code)]
pub fn test_parse(text: &str) -> (Program, Vec<Diagnostic>) {
    let (reporter, mut diagnostics) = TestReporter::new();
    let lexed = Lexer::new(test_source::new_text(text), Rc::clone(&reporter)).lex();
    let program = Parser::new(lexed, reporter).parse();
    (program, diagnostics.unwrap())
}

#[allow(dead_code)]
pub fn parse_clean(text: &str) -> std::result::Result<Program, String> {
    let (program, diagnostics) = test_parse(text);
    if diagnostics.is_empty() {
        Ok(program)
    } else {
        Err(format!(
            "Expected no diagnostics for {:?}, got: {}",
            text,
            diagnostics.diagnostic_string()
        ))
    }
}

#[allow(dead_code)]
pub fn tree_lines(program: &Program) -> Vec<String> {
    let mut printer = ASTPrinter::new();
    printer.print(&program.statements);
    printer.collected().to_vec()
}

/// Passes when both texts parse to the same tree.
#[allow(dead_code)]
pub fn assert_structurally_equal(got: &str, expected: &str) -> TestResult {
    let got_tree = tree_lines(&parse_clean(got)?);
    let expected_tree = tree_lines(&parse_clean(expected)?);

    if got_tree == expected_tree {
        Ok(())
    } else {
        println!();
        println!("Expected:");
        println!("{}", expected_tree.join("\n"));
        println!("Got:");
        println!("{}", got_tree.join("\n"));
        println!();
        Err(format!("Trees differ:\n{}\n---\n{}", got, expected))
    }
}

#[allow(dead_code)]
pub fn assert_slices_equal<T, U>(
    kind: &str,
    got: &[T],
    expected: &[T],
    test: U,
    list: &str,
) -> TestResult
where
    T: std::fmt::Display,
    U: Fn(&T, &T) -> bool,
{
    if got.len() != expected.len() {
        let one_line = format!("Expected {} {}, got {}", expected.len(), kind, got.len());
        println!("{}\n{}", &one_line, list);
        return Err(one_line);
    }

    for (lhs, rhs) in got.iter().zip(expected) {
        if !test(lhs, rhs) {
            println!("Expected:\n  {}\nGot:\n  {}", rhs, lhs);
            return Err(String::from("Unexpected item"));
        }
    }

    Ok(())
}
