use super::config::*;
use crate::lexing::Token;
use crate::parsing::*;
use crate::program::Program;
use crate::source::Span;
use log::{debug, trace};
use std::collections::HashSet;

/// Names collected for one scope root, in first-appearance order.
struct Scope {
    names: Vec<Token>,
    seen: HashSet<String>,
    parameters: HashSet<String>,
}

impl Scope {
    fn new(parameters: HashSet<String>) -> Self {
        Scope {
            names: Vec::new(),
            seen: HashSet::new(),
            parameters,
        }
    }

    fn declare(&mut self, name: &Token) {
        let lexeme = name.lexeme();
        if self.parameters.contains(lexeme) || !self.seen.insert(lexeme.to_string()) {
            return;
        }
        self.names.push(name.clone());
    }
}

pub struct Hoister {
    config: HoistConfig,
    scopes: Vec<Scope>,
}

impl Hoister {
    pub fn new(config: HoistConfig) -> Self {
        Hoister {
            config,
            scopes: Vec::new(),
        }
    }

    pub fn hoist(program: Program, config: HoistConfig) -> Program {
        let mut hoister = Hoister::new(config);
        let statements = hoister.hoist_scope(program.statements, HashSet::new());
        Program::new(program.source, statements)
    }

    /// Rewrites one scope root. A statement list made only of declarations
    /// is already hoisted and keeps its shape.
    fn hoist_scope(&mut self, stmts: Vec<Stmt>, parameters: HashSet<String>) -> Vec<Stmt> {
        if stmts.iter().all(Stmt::is_variable_decl) {
            trace!("Scope holds only declarations, leaving it in place");
            return stmts
                .into_iter()
                .map(|stmt| self.rewrite_initializers(stmt))
                .collect();
        }

        self.scopes.push(Scope::new(parameters));
        let body = self.rewrite_list(stmts);
        let scope = match self.scopes.pop() {
            Some(scope) => scope,
            None => return body,
        };

        debug!(
            "Hoisting {} declaration(s) to the top of a {} scope",
            scope.names.len(),
            self.config.scope
        );

        let mut hoisted = self.header(scope.names);
        hoisted.extend(body);
        hoisted
    }

    fn header(&self, names: Vec<Token>) -> Vec<Stmt> {
        if names.is_empty() {
            return Vec::new();
        }
        let declare = |names: Vec<Token>| {
            let declarators = names
                .into_iter()
                .map(|name| Declarator::new(name, None))
                .collect();
            Stmt::variable_decl(VariableDecl::new(Span::synthetic("var"), declarators))
        };
        match self.config.header {
            HeaderStyle::PerName => names.into_iter().map(|name| declare(vec![name])).collect(),
            HeaderStyle::Combined => vec![declare(names)],
        }
    }

    fn rewrite_list(&mut self, stmts: Vec<Stmt>) -> Vec<Stmt> {
        let mut rewritten = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            match stmt.kind {
                StmtKind::VariableDecl(decl) => {
                    let assignments = self.split(decl);
                    rewritten.extend(assignments.into_iter().map(Stmt::expression));
                }
                kind => rewritten.push(self.rewrite_stmt(Stmt::new(kind, stmt.span))),
            }
        }
        rewritten
    }

    /// Rewrites a statement that must stay a single statement, such as the
    /// body of an `if` without braces.
    fn rewrite_stmt(&mut self, stmt: Stmt) -> Stmt {
        let span = stmt.span;
        let kind = match stmt.kind {
            StmtKind::VariableDecl(decl) => {
                let assignments = self.split(decl);
                if assignments.is_empty() {
                    return Stmt::empty(span);
                }
                return Stmt::expression(Expr::sequence(assignments));
            }
            StmtKind::FunctionDecl(decl) => StmtKind::FunctionDecl(self.rewrite_function(decl)),
            StmtKind::IfStmt(condition, body, else_body) => StmtKind::IfStmt(
                self.rewrite_expr(condition),
                Box::new(self.rewrite_stmt(*body)),
                else_body.map(|else_body| Box::new(self.rewrite_stmt(*else_body))),
            ),
            StmtKind::WhileStmt(condition, body) => StmtKind::WhileStmt(
                self.rewrite_expr(condition),
                Box::new(self.rewrite_stmt(*body)),
            ),
            StmtKind::ForStmt(for_stmt) => StmtKind::ForStmt(self.rewrite_for(for_stmt)),
            StmtKind::Block(stmts) => match self.config.scope {
                ScopeMode::Function => StmtKind::Block(self.rewrite_list(stmts)),
                ScopeMode::Block => {
                    let parameters = self.enclosing_parameters();
                    StmtKind::Block(self.hoist_scope(stmts, parameters))
                }
            },
            StmtKind::ReturnStmt(value) => {
                StmtKind::ReturnStmt(value.map(|value| self.rewrite_expr(value)))
            }
            StmtKind::ExpressionStmt(expr) => StmtKind::ExpressionStmt(self.rewrite_expr(expr)),
            kind @ StmtKind::BreakStmt
            | kind @ StmtKind::ContinueStmt
            | kind @ StmtKind::EmptyStmt => kind,
        };
        Stmt::new(kind, span)
    }

    fn rewrite_for(&mut self, for_stmt: ForStmt) -> ForStmt {
        let init = match for_stmt.init {
            Some(ForInit::VariableDecl(decl)) => {
                let assignments = self.split(decl);
                if assignments.is_empty() {
                    None
                } else {
                    Some(ForInit::Expression(Expr::sequence(assignments)))
                }
            }
            Some(ForInit::Expression(expr)) => Some(ForInit::Expression(self.rewrite_expr(expr))),
            None => None,
        };
        ForStmt {
            init,
            condition: for_stmt.condition.map(|c| self.rewrite_expr(c)),
            increment: for_stmt.increment.map(|i| self.rewrite_expr(i)),
            body: Box::new(self.rewrite_stmt(*for_stmt.body)),
        }
    }

    /// Records every declared name in the current scope and returns the
    /// assignments that replace the initializers, in source order.
    fn split(&mut self, decl: VariableDecl) -> Vec<Expr> {
        let mut assignments = Vec::new();
        for declarator in decl.declarators {
            trace!("Hoisting '{}'", declarator.name.lexeme());
            if let Some(scope) = self.scopes.last_mut() {
                scope.declare(&declarator.name);
            }
            if let Some(value) = declarator.initial_value {
                let value = self.rewrite_expr(value);
                assignments.push(Expr::simple_assignment(declarator.name, value));
            }
        }
        assignments
    }

    fn rewrite_initializers(&mut self, stmt: Stmt) -> Stmt {
        match stmt.kind {
            StmtKind::VariableDecl(decl) => {
                let declarators = decl
                    .declarators
                    .into_iter()
                    .map(|d| Declarator {
                        initial_value: d.initial_value.map(|value| self.rewrite_expr(value)),
                        name: d.name,
                        span: d.span,
                    })
                    .collect();
                let decl = VariableDecl {
                    declarators,
                    span: decl.span,
                };
                Stmt::new(StmtKind::VariableDecl(decl), stmt.span)
            }
            kind => Stmt::new(kind, stmt.span),
        }
    }

    /// Parameters of the innermost function, which blocks inside it must not
    /// declare again.
    fn enclosing_parameters(&self) -> HashSet<String> {
        self.scopes
            .last()
            .map(|scope| scope.parameters.clone())
            .unwrap_or_default()
    }

    fn rewrite_function(&mut self, decl: FunctionDecl) -> FunctionDecl {
        let FunctionDecl {
            name,
            parameters,
            body,
            span,
        } = decl;
        let names = parameters.iter().map(|p| p.lexeme().to_string()).collect();
        let body = self.hoist_scope(body, names);
        FunctionDecl {
            name,
            parameters,
            body,
            span,
        }
    }

    /// Only function expressions change; everything else is rebuilt as is.
    fn rewrite_expr(&mut self, expr: Expr) -> Expr {
        let span = expr.span;
        let kind = match expr.kind {
            ExprKind::Function(decl) => ExprKind::Function(self.rewrite_function(decl)),
            ExprKind::Assignment(target, op, value) => ExprKind::Assignment(
                self.rewrite_boxed(target),
                op,
                self.rewrite_boxed(value),
            ),
            ExprKind::Binary(lhs, op, rhs) => {
                ExprKind::Binary(self.rewrite_boxed(lhs), op, self.rewrite_boxed(rhs))
            }
            ExprKind::Unary(op, operand) => ExprKind::Unary(op, self.rewrite_boxed(operand)),
            ExprKind::Update(op, target, prefix) => {
                ExprKind::Update(op, self.rewrite_boxed(target), prefix)
            }
            ExprKind::Conditional(condition, then_value, else_value) => ExprKind::Conditional(
                self.rewrite_boxed(condition),
                self.rewrite_boxed(then_value),
                self.rewrite_boxed(else_value),
            ),
            ExprKind::Call(callee, args) => {
                ExprKind::Call(self.rewrite_boxed(callee), self.rewrite_all(args))
            }
            ExprKind::Field(target, field) => ExprKind::Field(self.rewrite_boxed(target), field),
            ExprKind::Subscript(target, index) => {
                ExprKind::Subscript(self.rewrite_boxed(target), self.rewrite_boxed(index))
            }
            ExprKind::Array(elements) => ExprKind::Array(self.rewrite_all(elements)),
            ExprKind::Object(properties) => ExprKind::Object(
                properties
                    .into_iter()
                    .map(|p| Property {
                        key: p.key,
                        value: self.rewrite_expr(p.value),
                    })
                    .collect(),
            ),
            ExprKind::Grouping(inner) => ExprKind::Grouping(self.rewrite_boxed(inner)),
            ExprKind::Sequence(exprs) => ExprKind::Sequence(self.rewrite_all(exprs)),
            kind @ ExprKind::Literal(_) | kind @ ExprKind::Variable(_) => kind,
        };
        Expr::new(kind, span)
    }

    fn rewrite_boxed(&mut self, expr: Box<Expr>) -> Box<Expr> {
        Box::new(self.rewrite_expr(*expr))
    }

    fn rewrite_all(&mut self, exprs: Vec<Expr>) -> Vec<Expr> {
        exprs.into_iter().map(|e| self.rewrite_expr(e)).collect()
    }
}
