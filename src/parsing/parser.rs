use super::ast::*;
use super::expr::*;
use crate::diagnostic::*;
use crate::lexing::*;
use crate::program::Program;
use crate::source::*;
use log::trace;
use std::rc::Rc;

type Result<T> = DiagnosticResult<T>;

pub struct Parser {
    source: Source,
    tokens: Vec<Token>,
    index: usize,
    reporter: Rc<dyn Reporter>,
}

impl Parser {
    pub fn new(program: LexedProgram, reporter: Rc<dyn Reporter>) -> Self {
        Parser {
            source: program.source,
            tokens: program.tokens,
            index: 0,
            reporter,
        }
    }

    pub fn parse(mut self) -> Program {
        let statements = self.stmt_list(None);
        trace!(
            "Parsed {} top level statements from {}",
            statements.len(),
            self.source.name
        );
        Program::new(self.source, statements)
    }

    fn stmt_list(&mut self, end: Option<TokenKind>) -> Vec<Stmt> {
        let mut stmts: Vec<Stmt> = Vec::new();
        while !self.is_at_end() && Some(self.peek()) != end {
            let before = self.index;
            match self.statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(diagnostic) => {
                    self.reporter.report(diagnostic);
                    self.synchronize();
                    if self.index == before {
                        self.advance();
                    }
                }
            }
        }
        stmts
    }

    fn block(&mut self) -> Result<Stmt> {
        let left_brace = self.previous().span.clone();
        let stmts = self.stmt_list(Some(TokenKind::RightBrace));
        let right_brace = self.consume(TokenKind::RightBrace, "Expect '}' after block")?;
        Ok(Stmt::block(left_brace, stmts, right_brace))
    }

    fn statement(&mut self) -> Result<Stmt> {
        if self.matches(TokenKind::Var) {
            let decl = self.variable_decl()?;
            self.consume_semicolon("Expect ';' after variable declaration")?;
            Ok(Stmt::variable_decl(decl))
        } else if self.matches(TokenKind::Function) {
            self.function_decl()
        } else if self.matches(TokenKind::If) {
            self.if_stmt()
        } else if self.matches(TokenKind::While) {
            self.while_stmt()
        } else if self.matches(TokenKind::For) {
            self.for_stmt()
        } else if self.matches(TokenKind::Return) {
            self.return_stmt()
        } else if self.matches(TokenKind::Break) {
            let keyword = self.previous().span.clone();
            self.consume_semicolon("Expect ';' after 'break'")?;
            Ok(Stmt::new(StmtKind::BreakStmt, keyword))
        } else if self.matches(TokenKind::Continue) {
            let keyword = self.previous().span.clone();
            self.consume_semicolon("Expect ';' after 'continue'")?;
            Ok(Stmt::new(StmtKind::ContinueStmt, keyword))
        } else if self.matches(TokenKind::LeftBrace) {
            self.block()
        } else if self.matches(TokenKind::Semicolon) {
            Ok(Stmt::empty(self.previous().span.clone()))
        } else {
            let stmt = Stmt::expression(self.expression()?);
            self.consume_semicolon("Expect ';' after expression")?;
            Ok(stmt)
        }
    }

    fn synchronize(&mut self) {
        while !self.is_at_end() && self.previous().kind != TokenKind::Semicolon {
            let done = match self.peek() {
                TokenKind::Var
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Return
                | TokenKind::RightBrace => true,
                TokenKind::Semicolon => {
                    self.advance();
                    true
                }
                _ => {
                    self.advance();
                    false
                }
            };
            if done {
                break;
            }
        }
    }

    fn variable_decl(&mut self) -> Result<VariableDecl> {
        let var_span = self.previous().span.clone();
        let mut declarators = Vec::new();
        loop {
            let name = self
                .consume(TokenKind::Identifier, "Expect variable name")?
                .clone();
            let value = if self.matches(TokenKind::Equal) {
                Some(self.assignment()?)
            } else {
                None
            };
            declarators.push(Declarator::new(name, value));
            if !self.matches(TokenKind::Comma) {
                break;
            }
        }
        Ok(VariableDecl::new(var_span, declarators))
    }

    fn function_decl(&mut self) -> Result<Stmt> {
        let function_span = self.previous().span.clone();
        let name = self
            .consume(TokenKind::Identifier, "Expect function name")?
            .clone();
        let parameters = self.parameters()?;
        self.consume(TokenKind::LeftBrace, "Expect '{' before function body")?;
        let body = self.stmt_list(Some(TokenKind::RightBrace));
        let right_brace = self.consume(TokenKind::RightBrace, "Expect '}' after function body")?;

        Ok(Stmt::function_decl(
            function_span,
            name,
            parameters,
            body,
            right_brace,
        ))
    }

    fn parameters(&mut self) -> Result<Vec<Token>> {
        let mut params: Vec<Token> = Vec::new();
        self.consume(TokenKind::LeftParen, "Expect '(' before parameters")?;
        while !self.is_at_end() && self.peek() != TokenKind::RightParen {
            let param = self.consume(TokenKind::Identifier, "Expect parameter name")?;
            params.push(param.clone());
            if self.peek() != TokenKind::RightParen {
                self.consume(TokenKind::Comma, "Expect ',' separating parameters")?;
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after parameters")?;
        Ok(params)
    }

    fn if_stmt(&mut self) -> Result<Stmt> {
        let if_span = self.previous().span.clone();

        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition")?;

        let body = self.statement()?;
        let else_body = if self.matches(TokenKind::Else) {
            Some(self.statement()?)
        } else {
            None
        };

        Ok(Stmt::if_stmt(if_span, condition, body, else_body))
    }

    fn while_stmt(&mut self) -> Result<Stmt> {
        let while_span = self.previous().span.clone();

        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition")?;

        let body = self.statement()?;
        Ok(Stmt::while_stmt(while_span, condition, body))
    }

    fn for_stmt(&mut self) -> Result<Stmt> {
        let for_span = self.previous().span.clone();
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'")?;

        let init = if self.matches(TokenKind::Semicolon) {
            None
        } else {
            let init = if self.matches(TokenKind::Var) {
                ForInit::VariableDecl(self.variable_decl()?)
            } else {
                ForInit::Expression(self.expression()?)
            };
            self.consume(TokenKind::Semicolon, "Expect ';' after loop initializer")?;
            Some(init)
        };

        let condition = self.optional_expression(TokenKind::Semicolon)?;
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition")?;

        let increment = self.optional_expression(TokenKind::RightParen)?;
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses")?;

        let body = self.statement()?;
        Ok(Stmt::for_stmt(for_span, init, condition, increment, body))
    }

    fn return_stmt(&mut self) -> Result<Stmt> {
        let return_span = self.previous().span.clone();
        let value = if self.at_statement_end() {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume_semicolon("Expect ';' after return value")?;
        Ok(Stmt::return_stmt(return_span, value))
    }

    fn optional_expression(&mut self, terminator: TokenKind) -> Result<Option<Expr>> {
        if self.peek() == terminator {
            Ok(None)
        } else {
            Ok(Some(self.expression()?))
        }
    }

    // Expressions

    fn expression(&mut self) -> Result<Expr> {
        let mut exprs = vec![self.assignment()?];
        while self.matches(TokenKind::Comma) {
            exprs.push(self.assignment()?);
        }
        Ok(Expr::sequence(exprs))
    }

    fn assignment(&mut self) -> Result<Expr> {
        self.parse_precedence(Precedence::Assignment)
    }

    fn parse_precedence(&mut self, prec: Precedence) -> Result<Expr> {
        if self.is_at_end() {
            return Err(Diagnostic::error(self.current(), "Expected expression"));
        }

        let prefix = self
            .advance()
            .kind
            .prefix()
            .ok_or_else(|| Diagnostic::error(self.previous(), "Expected expression"))?;

        let mut lhs = prefix(self)?;

        while !self.is_at_end() {
            if let Some((infix_func, infix_prec)) = self.peek().infix_entry() {
                if infix_prec >= prec {
                    self.advance();
                    lhs = infix_func(self, lhs)?;
                    continue;
                }
            }

            break;
        }

        Ok(lhs)
    }

    fn assign(&mut self, lhs: Expr) -> Result<Expr> {
        let operator = self.previous().clone();
        if !lhs.is_assignable() {
            return Err(Diagnostic::error(&lhs, "Invalid assignment target"));
        }
        let value = self.parse_precedence(Precedence::Assignment)?;
        Ok(Expr::assignment(lhs, operator, value))
    }

    fn conditional(&mut self, condition: Expr) -> Result<Expr> {
        let then_value = self.assignment()?;
        self.consume(TokenKind::Colon, "Expect ':' in conditional expression")?;
        let else_value = self.assignment()?;
        Ok(Expr::conditional(condition, then_value, else_value))
    }

    fn binary(&mut self, lhs: Expr) -> Result<Expr> {
        let operator = self.previous().clone();
        let next_prec = Precedence::for_kind(operator.kind).next();
        let rhs = self.parse_precedence(next_prec)?;
        Ok(Expr::binary(lhs, operator, rhs))
    }

    fn unary(&mut self) -> Result<Expr> {
        let operator = self.previous().clone();
        let expr = self.parse_precedence(Precedence::Unary)?;
        Ok(Expr::unary(operator, expr))
    }

    fn prefix_update(&mut self) -> Result<Expr> {
        let operator = self.previous().clone();
        let target = self.parse_precedence(Precedence::Unary)?;
        if !target.is_assignable() {
            return Err(Diagnostic::error(&target, "Invalid update target"));
        }
        Ok(Expr::prefix_update(operator, target))
    }

    fn postfix_update(&mut self, target: Expr) -> Result<Expr> {
        let operator = self.previous().clone();
        if !target.is_assignable() {
            return Err(Diagnostic::error(&target, "Invalid update target"));
        }
        Ok(Expr::postfix_update(target, operator))
    }

    fn call(&mut self, callee: Expr) -> Result<Expr> {
        let mut args: Vec<Expr> = Vec::new();
        while !self.is_at_end() && self.peek() != TokenKind::RightParen {
            args.push(self.assignment()?);
            if self.peek() != TokenKind::RightParen {
                self.consume(TokenKind::Comma, "Expect ',' between arguments")?;
            }
        }
        let right_paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments")?;
        Ok(Expr::call(callee, args, right_paren))
    }

    fn field(&mut self, target: Expr) -> Result<Expr> {
        let field = self.consume(TokenKind::Identifier, "Expect field name after '.'")?;
        Ok(Expr::field(target, field.clone()))
    }

    fn subscript(&mut self, target: Expr) -> Result<Expr> {
        let index = self.expression()?;
        let right_bracket = self.consume(TokenKind::RightBracket, "Expect ']' after index")?;
        Ok(Expr::subscript(target, index, right_bracket))
    }

    fn literal(&mut self) -> Result<Expr> {
        Ok(Expr::literal(self.previous()))
    }

    fn variable(&mut self) -> Result<Expr> {
        Ok(Expr::variable(self.previous().clone()))
    }

    fn grouping(&mut self) -> Result<Expr> {
        let left_paren = self.previous().span.clone();
        let inner = self.expression()?;
        let right_paren = self.consume(TokenKind::RightParen, "Expect ')' after expression")?;
        Ok(Expr::grouping(left_paren, inner, right_paren))
    }

    fn array(&mut self) -> Result<Expr> {
        let left_bracket = self.previous().span.clone();
        let mut elements: Vec<Expr> = Vec::new();
        while !self.is_at_end() && self.peek() != TokenKind::RightBracket {
            elements.push(self.assignment()?);
            if self.peek() != TokenKind::RightBracket {
                self.consume(TokenKind::Comma, "Expect ',' between elements")?;
            }
        }
        let right_bracket = self.consume(TokenKind::RightBracket, "Expect ']' after elements")?;
        Ok(Expr::array(left_bracket, elements, right_bracket))
    }

    fn object(&mut self) -> Result<Expr> {
        let left_brace = self.previous().span.clone();
        let mut properties: Vec<Property> = Vec::new();
        while !self.is_at_end() && self.peek() != TokenKind::RightBrace {
            let key = match self.peek() {
                TokenKind::Identifier | TokenKind::String | TokenKind::Number => {
                    self.advance().clone()
                }
                _ => return Err(Diagnostic::error(self.current(), "Expect property name")),
            };
            self.consume(TokenKind::Colon, "Expect ':' after property name")?;
            let value = self.assignment()?;
            properties.push(Property { key, value });
            if self.peek() != TokenKind::RightBrace {
                self.consume(TokenKind::Comma, "Expect ',' between properties")?;
            }
        }
        let right_brace = self.consume(TokenKind::RightBrace, "Expect '}' after properties")?;
        Ok(Expr::object(left_brace, properties, right_brace))
    }

    fn function_expr(&mut self) -> Result<Expr> {
        let function_span = self.previous().span.clone();
        let name = if self.peek() == TokenKind::Identifier {
            Some(self.advance().clone())
        } else {
            None
        };
        let parameters = self.parameters()?;
        self.consume(TokenKind::LeftBrace, "Expect '{' before function body")?;
        let body = self.stmt_list(Some(TokenKind::RightBrace));
        let right_brace = self.consume(TokenKind::RightBrace, "Expect '}' after function body")?;
        let span = Span::join(&function_span, right_brace);
        Ok(Expr::function(FunctionDecl {
            name,
            parameters,
            body,
            span,
        }))
    }

    // Helpers

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    /// Semicolons may be left out before a `}`, at the end of input, or
    /// when the next token starts a new line.
    fn consume_semicolon(&mut self, message: &str) -> Result<()> {
        if self.matches(TokenKind::Semicolon) || self.at_statement_end() {
            Ok(())
        } else {
            Err(Diagnostic::error(self.current(), message))
        }
    }

    fn at_statement_end(&self) -> bool {
        match self.peek() {
            TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::EOF => true,
            _ => self.index > 0 && self.current().span.line > self.previous().span.line,
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<&Token> {
        if self.is_at_end() {
            return Err(Diagnostic::error(self.current(), message));
        }

        if self.matches(kind) {
            Ok(self.previous())
        } else {
            Err(Diagnostic::error(self.current(), message))
        }
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        if self.peek() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.index += 1;
        }
        self.previous()
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.index.saturating_sub(1)]
    }

    fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn is_at_end(&self) -> bool {
        self.peek() == TokenKind::EOF
    }
}

// ParseTable

type PrefixFn = fn(&mut Parser) -> Result<Expr>;
type InfixFn = fn(&mut Parser, lhs: Expr) -> Result<Expr>;

impl TokenKind {
    fn prefix(&self) -> Option<PrefixFn> {
        match self {
            TokenKind::Minus | TokenKind::Plus | TokenKind::Bang | TokenKind::Typeof => {
                Some(Parser::unary)
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus => Some(Parser::prefix_update),
            TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::Number
            | TokenKind::String => Some(Parser::literal),
            TokenKind::Identifier => Some(Parser::variable),
            TokenKind::LeftParen => Some(Parser::grouping),
            TokenKind::LeftBracket => Some(Parser::array),
            TokenKind::LeftBrace => Some(Parser::object),
            TokenKind::Function => Some(Parser::function_expr),
            _ => None,
        }
    }

    fn infix_entry(&self) -> Option<(InfixFn, Precedence)> {
        match self {
            kind if kind.is_assignment() => Some((Parser::assign, Precedence::Assignment)),
            TokenKind::Question => Some((Parser::conditional, Precedence::Conditional)),
            TokenKind::BarBar => Some((Parser::binary, Precedence::Or)),
            TokenKind::AmpersandAmpersand => Some((Parser::binary, Precedence::And)),
            TokenKind::EqualEqual
            | TokenKind::BangEqual
            | TokenKind::EqualEqualEqual
            | TokenKind::BangEqualEqual => Some((Parser::binary, Precedence::Equality)),
            TokenKind::Greater
            | TokenKind::GreaterEqual
            | TokenKind::Less
            | TokenKind::LessEqual => Some((Parser::binary, Precedence::Comparison)),
            TokenKind::Plus | TokenKind::Minus => Some((Parser::binary, Precedence::Term)),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
                Some((Parser::binary, Precedence::Factor))
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                Some((Parser::postfix_update, Precedence::Postfix))
            }
            TokenKind::LeftParen => Some((Parser::call, Precedence::Call)),
            TokenKind::Period => Some((Parser::field, Precedence::Call)),
            TokenKind::LeftBracket => Some((Parser::subscript, Precedence::Call)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, PartialOrd)]
enum Precedence {
    Assignment,
    Conditional,
    Or,
    And,
    Equality,
    Comparison,
    Term,
    Factor,
    Unary,
    Postfix,
    Call,
    Atom,
}

impl Precedence {
    fn for_kind(kind: TokenKind) -> Precedence {
        kind.infix_entry()
            .map(|(_, prec)| prec)
            .unwrap_or(Precedence::Atom)
    }

    fn next(&self) -> Precedence {
        match self {
            Precedence::Assignment => Precedence::Conditional,
            Precedence::Conditional => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Unary,
            Precedence::Unary => Precedence::Postfix,
            Precedence::Postfix => Precedence::Call,
            Precedence::Call | Precedence::Atom => Precedence::Atom,
        }
    }
}
