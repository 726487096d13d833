use super::FunctionDecl;
use crate::lexing::{Token, TokenKind};
use crate::source::*;

pub struct Property {
    pub key: Token,
    pub value: Expr,
}

pub enum ExprKind {
    Assignment(Box<Expr>, Token, Box<Expr>),
    Binary(Box<Expr>, Token, Box<Expr>),
    Unary(Token, Box<Expr>),
    /// `++`/`--`; the flag is true for the prefix form.
    Update(Token, Box<Expr>, bool),
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    Field(Box<Expr>, Token),
    Subscript(Box<Expr>, Box<Expr>),
    Literal(Token),
    Variable(Token),
    Array(Vec<Expr>),
    Object(Vec<Property>),
    Function(FunctionDecl),
    Grouping(Box<Expr>),
    Sequence(Vec<Expr>),
}

pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn accept<V: ExprVisitor>(&self, visitor: &mut V) -> V::ExprResult {
        match &self.kind {
            ExprKind::Assignment(target, op, value) => {
                visitor.visit_assignment_expr(target, op, value)
            }
            ExprKind::Binary(lhs, op, rhs) => visitor.visit_binary_expr(lhs, op, rhs),
            ExprKind::Unary(op, expr) => visitor.visit_unary_expr(op, expr),
            ExprKind::Update(op, target, prefix) => {
                visitor.visit_update_expr(op, target, *prefix)
            }
            ExprKind::Conditional(condition, then_value, else_value) => {
                visitor.visit_conditional_expr(condition, then_value, else_value)
            }
            ExprKind::Call(callee, args) => visitor.visit_call_expr(callee, args),
            ExprKind::Field(target, field) => visitor.visit_field_expr(target, field),
            ExprKind::Subscript(target, index) => visitor.visit_subscript_expr(target, index),
            ExprKind::Literal(token) => visitor.visit_literal_expr(token),
            ExprKind::Variable(name) => visitor.visit_variable_expr(name),
            ExprKind::Array(elements) => visitor.visit_array_expr(elements),
            ExprKind::Object(properties) => visitor.visit_object_expr(properties),
            ExprKind::Function(decl) => visitor.visit_function_expr(decl),
            ExprKind::Grouping(inner) => visitor.visit_grouping_expr(inner),
            ExprKind::Sequence(exprs) => visitor.visit_sequence_expr(exprs),
        }
    }

    pub fn assignment(target: Expr, operator: Token, value: Expr) -> Self {
        let span = Span::join(&target, &value);
        Expr::new(
            ExprKind::Assignment(Box::new(target), operator, Box::new(value)),
            span,
        )
    }

    /// `name = value`, built outside the parser.
    pub fn simple_assignment(name: Token, value: Expr) -> Self {
        let operator = Token::synthetic(TokenKind::Equal, "=");
        Expr::assignment(Expr::variable(name), operator, value)
    }

    pub fn binary(lhs: Expr, operator: Token, rhs: Expr) -> Self {
        let span = Span::join(&lhs, &rhs);
        Expr::new(
            ExprKind::Binary(Box::new(lhs), operator, Box::new(rhs)),
            span,
        )
    }

    pub fn unary(op: Token, expr: Expr) -> Self {
        let span = Span::join(&op, &expr);
        Expr::new(ExprKind::Unary(op, Box::new(expr)), span)
    }

    pub fn prefix_update(op: Token, target: Expr) -> Self {
        let span = Span::join(&op, &target);
        Expr::new(ExprKind::Update(op, Box::new(target), true), span)
    }

    pub fn postfix_update(target: Expr, op: Token) -> Self {
        let span = Span::join(&target, &op);
        Expr::new(ExprKind::Update(op, Box::new(target), false), span)
    }

    pub fn conditional(condition: Expr, then_value: Expr, else_value: Expr) -> Self {
        let span = Span::join(&condition, &else_value);
        Expr::new(
            ExprKind::Conditional(
                Box::new(condition),
                Box::new(then_value),
                Box::new(else_value),
            ),
            span,
        )
    }

    pub fn call(callee: Expr, args: Vec<Expr>, right_paren: &Token) -> Self {
        let span = Span::join(&callee, right_paren);
        Expr::new(ExprKind::Call(Box::new(callee), args), span)
    }

    pub fn field(target: Expr, name: Token) -> Self {
        let span = Span::join(&target, &name);
        Expr::new(ExprKind::Field(Box::new(target), name), span)
    }

    pub fn subscript(target: Expr, index: Expr, right_bracket: &Token) -> Self {
        let span = Span::join(&target, right_bracket);
        Expr::new(ExprKind::Subscript(Box::new(target), Box::new(index)), span)
    }

    pub fn literal(token: &Token) -> Self {
        Expr::new(ExprKind::Literal(token.clone()), token.span.clone())
    }

    pub fn variable(name: Token) -> Self {
        let span = name.span.clone();
        Expr::new(ExprKind::Variable(name), span)
    }

    pub fn array(left_bracket: Span, elements: Vec<Expr>, right_bracket: &Token) -> Self {
        let span = Span::join(&left_bracket, right_bracket);
        Expr::new(ExprKind::Array(elements), span)
    }

    pub fn object(left_brace: Span, properties: Vec<Property>, right_brace: &Token) -> Self {
        let span = Span::join(&left_brace, right_brace);
        Expr::new(ExprKind::Object(properties), span)
    }

    pub fn function(decl: FunctionDecl) -> Self {
        let span = decl.span.clone();
        Expr::new(ExprKind::Function(decl), span)
    }

    pub fn grouping(left_paren: Span, inner: Expr, right_paren: &Token) -> Self {
        let span = Span::join(&left_paren, right_paren);
        Expr::new(ExprKind::Grouping(Box::new(inner)), span)
    }

    /// Collapses to the lone element when there is only one.
    pub fn sequence(mut exprs: Vec<Expr>) -> Self {
        if exprs.len() == 1 {
            return exprs.remove(0);
        }
        let span = match (exprs.first(), exprs.last()) {
            (Some(first), Some(last)) => Span::join(first, last),
            _ => Span::empty(),
        };
        Expr::new(ExprKind::Sequence(exprs), span)
    }

    pub fn is_assignable(&self) -> bool {
        match self.kind {
            ExprKind::Variable(_) | ExprKind::Field(..) | ExprKind::Subscript(..) => true,
            _ => false,
        }
    }
}

impl ContainsSpan for Expr {
    fn span(&self) -> &Span {
        &self.span
    }
}

pub trait ExprVisitor {
    type ExprResult;

    fn visit_assignment_expr(
        &mut self,
        target: &Expr,
        op: &Token,
        value: &Expr,
    ) -> Self::ExprResult;
    fn visit_binary_expr(&mut self, lhs: &Expr, op: &Token, rhs: &Expr) -> Self::ExprResult;
    fn visit_unary_expr(&mut self, op: &Token, operand: &Expr) -> Self::ExprResult;
    fn visit_update_expr(&mut self, op: &Token, target: &Expr, prefix: bool)
        -> Self::ExprResult;
    fn visit_conditional_expr(
        &mut self,
        condition: &Expr,
        then_value: &Expr,
        else_value: &Expr,
    ) -> Self::ExprResult;
    fn visit_call_expr(&mut self, callee: &Expr, args: &[Expr]) -> Self::ExprResult;
    fn visit_field_expr(&mut self, target: &Expr, field: &Token) -> Self::ExprResult;
    fn visit_subscript_expr(&mut self, target: &Expr, index: &Expr) -> Self::ExprResult;
    fn visit_literal_expr(&mut self, token: &Token) -> Self::ExprResult;
    fn visit_variable_expr(&mut self, name: &Token) -> Self::ExprResult;
    fn visit_array_expr(&mut self, elements: &[Expr]) -> Self::ExprResult;
    fn visit_object_expr(&mut self, properties: &[Property]) -> Self::ExprResult;
    fn visit_function_expr(&mut self, decl: &FunctionDecl) -> Self::ExprResult;
    fn visit_grouping_expr(&mut self, inner: &Expr) -> Self::ExprResult;
    fn visit_sequence_expr(&mut self, exprs: &[Expr]) -> Self::ExprResult;
}
