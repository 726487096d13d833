use crate::codegen::Generator;
use crate::diagnostic::*;
use crate::lexing::Lexer;
use crate::parsing::{ASTPrinter, Parser};
use crate::program::Program;
use crate::source::{self, Source};
use crate::transform::{HoistConfig, Hoister};
use log::debug;
use std::rc::Rc;

/// Turns source text into a tree.
pub trait Frontend {
    fn parse(&self, source: Source, reporter: Rc<dyn Reporter>) -> Result<Program, ParseError>;
}

/// Turns a tree into text.
pub trait Backend {
    fn generate(&self, program: &Program) -> String;
}

pub struct StandardFrontend;

impl Frontend for StandardFrontend {
    fn parse(&self, source: Source, reporter: Rc<dyn Reporter>) -> Result<Program, ParseError> {
        let name = source.name.clone();
        let capture = CaptureReporter::forwarding(reporter);

        let lexed = Lexer::new(source, capture.clone()).lex();
        let program = Parser::new(lexed, capture.clone()).parse();

        if capture.has_errored() {
            Err(ParseError::new(&name, capture.take()))
        } else {
            Ok(program)
        }
    }
}

/// Emits source text.
pub struct SourceBackend;

impl Backend for SourceBackend {
    fn generate(&self, program: &Program) -> String {
        Generator::generate(program)
    }
}

/// Emits the indented tree dump.
pub struct TreeBackend;

impl Backend for TreeBackend {
    fn generate(&self, program: &Program) -> String {
        let mut printer = ASTPrinter::new();
        printer.print(&program.statements);
        printer.into_string()
    }
}

pub struct Transformer {
    frontend: Box<dyn Frontend>,
    backend: Box<dyn Backend>,
    reporter: Rc<dyn Reporter>,
    config: HoistConfig,
}

impl Transformer {
    pub fn new(
        frontend: Box<dyn Frontend>,
        backend: Box<dyn Backend>,
        reporter: Rc<dyn Reporter>,
        config: HoistConfig,
    ) -> Self {
        Transformer {
            frontend,
            backend,
            reporter,
            config,
        }
    }

    /// Lexer and parser in front, source text out the back. Diagnostics only
    /// reach the caller through the returned `ParseError`.
    pub fn standard(config: HoistConfig) -> Self {
        Transformer::new(
            Box::new(StandardFrontend),
            Box::new(SourceBackend),
            QuietReporter::new(),
            config,
        )
    }

    pub fn parse(&self, source: Source) -> Result<Program, ParseError> {
        self.frontend.parse(source, Rc::clone(&self.reporter))
    }

    pub fn hoist_program(&self, program: Program) -> Program {
        Hoister::hoist(program, self.config)
    }

    pub fn generate(&self, program: &Program) -> String {
        self.backend.generate(program)
    }

    pub fn hoist_source(&self, source: Source) -> Result<String, ParseError> {
        debug!("Hoisting {} with {:?}", source.name, self.config);
        let program = self.parse(source)?;
        let hoisted = self.hoist_program(program);
        Ok(self.generate(&hoisted))
    }

    pub fn hoist_text(&self, text: &str) -> Result<String, ParseError> {
        self.hoist_source(source::text(text))
    }
}

/// Hoists `text` with the default configuration.
pub fn hoist(text: &str) -> Result<String, ParseError> {
    hoist_with(text, HoistConfig::default())
}

pub fn hoist_with(text: &str, config: HoistConfig) -> Result<String, ParseError> {
    Transformer::standard(config).hoist_text(text)
}
