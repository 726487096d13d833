use super::Expr;
use crate::lexing::Token;
use crate::source::*;

pub struct Declarator {
    pub name: Token,
    pub initial_value: Option<Expr>,
    pub span: Span,
}

impl Declarator {
    pub fn new(name: Token, initial_value: Option<Expr>) -> Self {
        let span = Span::join_opt(&name, &initial_value);
        Declarator {
            name,
            initial_value,
            span,
        }
    }
}

impl ContainsSpan for Declarator {
    fn span(&self) -> &Span {
        &self.span
    }
}

/// A `var` statement; one or more names, each optionally initialized.
pub struct VariableDecl {
    pub declarators: Vec<Declarator>,
    pub span: Span,
}

impl VariableDecl {
    pub fn new(var_span: Span, declarators: Vec<Declarator>) -> Self {
        let span = match declarators.last() {
            Some(last) => Span::join(&var_span, last),
            None => var_span,
        };
        VariableDecl { declarators, span }
    }
}

impl ContainsSpan for VariableDecl {
    fn span(&self) -> &Span {
        &self.span
    }
}

/// Shared by function declarations and function expressions; only the
/// expression form may be anonymous.
pub struct FunctionDecl {
    pub name: Option<Token>,
    pub parameters: Vec<Token>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl ContainsSpan for FunctionDecl {
    fn span(&self) -> &Span {
        &self.span
    }
}

pub enum ForInit {
    VariableDecl(VariableDecl),
    Expression(Expr),
}

pub struct ForStmt {
    pub init: Option<ForInit>,
    pub condition: Option<Expr>,
    pub increment: Option<Expr>,
    pub body: Box<Stmt>,
}

pub enum StmtKind {
    VariableDecl(VariableDecl),
    FunctionDecl(FunctionDecl),
    IfStmt(Expr, Box<Stmt>, Option<Box<Stmt>>),
    WhileStmt(Expr, Box<Stmt>),
    ForStmt(ForStmt),
    Block(Vec<Stmt>),
    ReturnStmt(Option<Expr>),
    BreakStmt,
    ContinueStmt,
    ExpressionStmt(Expr),
    EmptyStmt,
}

pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    pub fn accept<V: StmtVisitor>(&self, visitor: &mut V) -> V::StmtResult {
        match &self.kind {
            StmtKind::VariableDecl(decl) => visitor.visit_variable_decl(decl),
            StmtKind::FunctionDecl(decl) => visitor.visit_function_decl(decl),
            StmtKind::IfStmt(condition, body, else_body) => {
                visitor.visit_if_stmt(condition, body, else_body.as_deref())
            }
            StmtKind::WhileStmt(condition, body) => visitor.visit_while_stmt(condition, body),
            StmtKind::ForStmt(for_stmt) => visitor.visit_for_stmt(for_stmt),
            StmtKind::Block(stmts) => visitor.visit_block_stmt(stmts),
            StmtKind::ReturnStmt(expr) => visitor.visit_return_stmt(expr.as_ref()),
            StmtKind::BreakStmt => visitor.visit_break_stmt(),
            StmtKind::ContinueStmt => visitor.visit_continue_stmt(),
            StmtKind::ExpressionStmt(expr) => visitor.visit_expression_stmt(expr),
            StmtKind::EmptyStmt => visitor.visit_empty_stmt(),
        }
    }

    pub fn variable_decl(decl: VariableDecl) -> Self {
        let span = decl.span.clone();
        Stmt::new(StmtKind::VariableDecl(decl), span)
    }

    pub fn function_decl(
        function_span: Span,
        name: Token,
        parameters: Vec<Token>,
        body: Vec<Stmt>,
        right_brace: &Token,
    ) -> Self {
        let span = Span::join(&function_span, right_brace);
        let decl = FunctionDecl {
            name: Some(name),
            parameters,
            body,
            span: span.clone(),
        };
        Stmt::new(StmtKind::FunctionDecl(decl), span)
    }

    pub fn if_stmt(if_span: Span, condition: Expr, body: Stmt, else_body: Option<Stmt>) -> Self {
        let span = match &else_body {
            Some(else_body) => Span::join(&if_span, else_body),
            None => Span::join(&if_span, &body),
        };
        Stmt::new(
            StmtKind::IfStmt(condition, Box::new(body), else_body.map(Box::new)),
            span,
        )
    }

    pub fn while_stmt(while_span: Span, condition: Expr, body: Stmt) -> Self {
        let span = Span::join(&while_span, &body);
        Stmt::new(StmtKind::WhileStmt(condition, Box::new(body)), span)
    }

    pub fn for_stmt(
        for_span: Span,
        init: Option<ForInit>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Stmt,
    ) -> Self {
        let span = Span::join(&for_span, &body);
        let for_stmt = ForStmt {
            init,
            condition,
            increment,
            body: Box::new(body),
        };
        Stmt::new(StmtKind::ForStmt(for_stmt), span)
    }

    pub fn block(left_brace: Span, stmts: Vec<Stmt>, right_brace: &Token) -> Self {
        let span = Span::join(&left_brace, right_brace);
        Stmt::new(StmtKind::Block(stmts), span)
    }

    pub fn return_stmt(return_keyword: Span, expr: Option<Expr>) -> Self {
        let span = Span::join_opt(&return_keyword, &expr);
        Stmt::new(StmtKind::ReturnStmt(expr), span)
    }

    pub fn expression(expr: Expr) -> Self {
        let span = expr.span.clone();
        Stmt::new(StmtKind::ExpressionStmt(expr), span)
    }

    pub fn empty(span: Span) -> Self {
        Stmt::new(StmtKind::EmptyStmt, span)
    }

    pub fn is_variable_decl(&self) -> bool {
        match self.kind {
            StmtKind::VariableDecl(_) => true,
            _ => false,
        }
    }
}

impl ContainsSpan for Stmt {
    fn span(&self) -> &Span {
        &self.span
    }
}

pub trait StmtVisitor {
    type StmtResult;

    fn visit_variable_decl(&mut self, decl: &VariableDecl) -> Self::StmtResult;

    fn visit_function_decl(&mut self, decl: &FunctionDecl) -> Self::StmtResult;

    fn visit_if_stmt(
        &mut self,
        condition: &Expr,
        body: &Stmt,
        else_body: Option<&Stmt>,
    ) -> Self::StmtResult;

    fn visit_while_stmt(&mut self, condition: &Expr, body: &Stmt) -> Self::StmtResult;

    fn visit_for_stmt(&mut self, for_stmt: &ForStmt) -> Self::StmtResult;

    fn visit_block_stmt(&mut self, stmts: &[Stmt]) -> Self::StmtResult;

    fn visit_return_stmt(&mut self, expr: Option<&Expr>) -> Self::StmtResult;

    fn visit_break_stmt(&mut self) -> Self::StmtResult;

    fn visit_continue_stmt(&mut self) -> Self::StmtResult;

    fn visit_expression_stmt(&mut self, expr: &Expr) -> Self::StmtResult;

    fn visit_empty_stmt(&mut self) -> Self::StmtResult;
}
