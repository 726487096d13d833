use crate::source::*;
use colored::*;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub span: Span,
    pub message: String,
}

pub type DiagnosticResult<T> = std::result::Result<T, Diagnostic>;

impl Diagnostic {
    pub fn error<T: ContainsSpan>(span: &T, message: &str) -> Self {
        Diagnostic {
            span: span.span().clone(),
            message: String::from(message),
        }
    }
}

impl PartialEq for Diagnostic {
    fn eq(&self, other: &Self) -> bool {
        self.span.index == other.span.index
            && self.span.length == other.span.length
            && self.message == other.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Diagnostic(msg: {}, span: {}, lexeme: {:?})",
            self.message,
            self.span.location(),
            self.span.lexeme()
        )
    }
}

pub trait DiagnosticString {
    fn diagnostic_string(&self) -> String;
}

impl DiagnosticString for [Diagnostic] {
    fn diagnostic_string(&self) -> String {
        let lines: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        format!("[{}]", lines.join(", "))
    }
}

pub trait Reporter {
    fn report(&self, diagnostic: Diagnostic);
    fn has_errored(&self) -> bool;
}

pub struct DefaultReporter {
    errored: Cell<bool>,
}

impl DefaultReporter {
    pub fn new() -> Rc<Self> {
        Rc::new(DefaultReporter {
            errored: Cell::new(false),
        })
    }
}

impl Reporter for DefaultReporter {
    fn report(&self, diagnostic: Diagnostic) {
        self.errored.set(true);
        eprintln!("\n{} {}\n", "• Error:".red().bold(), diagnostic.message);
        let (line, offset) = diagnostic.span.entire_line();
        eprintln!("  {}", line);

        let offset = (0..offset).map(|_| " ").collect::<String>();
        let underline = (0..diagnostic.span.length.max(1))
            .map(|_| "^")
            .collect::<String>();
        eprintln!("  {}{}", offset, underline);
        eprintln!("  {}\n", diagnostic.span.location());
    }

    fn has_errored(&self) -> bool {
        self.errored.get()
    }
}

/// Remembers that something went wrong and drops the diagnostic itself.
pub struct QuietReporter {
    errored: Cell<bool>,
}

impl QuietReporter {
    pub fn new() -> Rc<Self> {
        Rc::new(QuietReporter {
            errored: Cell::new(false),
        })
    }
}

impl Reporter for QuietReporter {
    fn report(&self, _diagnostic: Diagnostic) {
        self.errored.set(true);
    }

    fn has_errored(&self) -> bool {
        self.errored.get()
    }
}

/// Keeps the diagnostics of one run while passing each one on to a longer
/// lived reporter.
pub struct CaptureReporter {
    diagnostics: RefCell<Vec<Diagnostic>>,
    forward: Rc<dyn Reporter>,
}

impl CaptureReporter {
    pub fn forwarding(to: Rc<dyn Reporter>) -> Rc<Self> {
        Rc::new(CaptureReporter {
            diagnostics: RefCell::new(Vec::new()),
            forward: to,
        })
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        self.diagnostics.replace(Vec::new())
    }
}

impl Reporter for CaptureReporter {
    fn report(&self, diagnostic: Diagnostic) {
        self.forward.report(diagnostic.clone());
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    fn has_errored(&self) -> bool {
        !self.diagnostics.borrow().is_empty()
    }
}

#[derive(Debug, Error)]
#[error("failed to parse {source_name}: {summary}")]
pub struct ParseError {
    source_name: String,
    summary: String,
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(source_name: &str, diagnostics: Vec<Diagnostic>) -> Self {
        let summary = match diagnostics.first() {
            Some(first) if diagnostics.len() == 1 => {
                format!("{} at {}", first.message, first.span.location())
            }
            Some(first) => format!(
                "{} at {} (and {} more)",
                first.message,
                first.span.location(),
                diagnostics.len() - 1
            ),
            None => String::from("unknown error"),
        };
        ParseError {
            source_name: String::from(source_name),
            summary,
            diagnostics,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source;

    #[test]
    fn parse_error_summarizes_first_error() {
        let src = source::named("var = ;", "bad.js");
        let first = Diagnostic::error(&Span::new(&src, 4, 1, 1), "Expect variable name");
        let second = Diagnostic::error(&Span::new(&src, 6, 1, 1), "Expected expression");
        let error = ParseError::new("bad.js", vec![first, second]);
        assert_eq!(
            error.to_string(),
            "failed to parse bad.js: Expect variable name at bad.js:1:5 (and 1 more)"
        );
        assert_eq!(error.diagnostics().len(), 2);
    }

    #[test]
    fn capture_forwards() {
        let inner = QuietReporter::new();
        let outer = CaptureReporter::forwarding(inner.clone());
        let src = source::text("x");
        assert!(!outer.has_errored());
        assert!(!inner.has_errored());
        outer.report(Diagnostic::error(&Span::new(&src, 0, 1, 1), "odd"));
        assert!(outer.has_errored());
        assert!(inner.has_errored());
        assert_eq!(outer.take().len(), 1);
        assert!(outer.take().is_empty());
    }
}
