mod ast;
mod ast_printer;
mod expr;
mod parser;

pub use ast::{
    Declarator, ForInit, ForStmt, FunctionDecl, Stmt, StmtKind, StmtVisitor, VariableDecl,
};
pub use ast_printer::ASTPrinter;
pub use expr::{Expr, ExprKind, ExprVisitor, Property};
pub use parser::Parser;
