use crate::parsing::Stmt;
use crate::source::Source;

pub struct Program {
    pub source: Source,
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(source: Source, statements: Vec<Stmt>) -> Self {
        Program { source, statements }
    }
}
