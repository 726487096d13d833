use crate::lexing::Token;
use crate::parsing::*;
use crate::program::Program;

const INDENT: &str = "  ";

/// Writes a tree back out as source text that parses to the same tree.
pub struct Generator {
    lines: Vec<String>,
    indent: usize,
}

impl Generator {
    fn new(indent: usize) -> Self {
        Generator {
            lines: Vec::new(),
            indent,
        }
    }

    pub fn generate(program: &Program) -> String {
        Generator::generate_stmts(&program.statements)
    }

    pub fn generate_stmts(stmts: &[Stmt]) -> String {
        let mut generator = Generator::new(0);
        generator.write_block(stmts);
        generator.lines.join("\n")
    }

    fn write_block(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            stmt.accept(self);
        }
    }

    fn indented<T>(&mut self, block: T)
    where
        T: FnOnce(&mut Generator),
    {
        self.indent += 1;
        block(self);
        self.indent -= 1;
    }

    fn indentation(&self) -> String {
        INDENT.repeat(self.indent)
    }

    fn writeln(&mut self, line: &str) {
        let line = format!("{}{}", self.indentation(), line);
        self.lines.push(line);
    }

    /// Removes a trailing `}` at the current indentation so that an `else`
    /// can continue on the same line.
    fn take_closing_brace(&mut self) -> bool {
        let closing = format!("{}}}", self.indentation());
        if self.lines.last() == Some(&closing) {
            self.lines.pop();
            true
        } else {
            false
        }
    }

    fn write_clause(&mut self, header: &str, body: &Stmt) {
        match &body.kind {
            StmtKind::Block(stmts) => {
                self.writeln(&format!("{} {{", header));
                self.indented(|generator| generator.write_block(stmts));
                self.writeln("}");
            }
            _ => {
                self.writeln(header);
                self.indented(|generator| body.accept(generator));
            }
        }
    }

    fn write_if(&mut self, prefix: &str, condition: &Expr, body: &Stmt, else_body: Option<&Stmt>) {
        let condition = condition.accept(self);
        self.write_clause(&format!("{}if ({})", prefix, condition), body);

        if let Some(else_body) = else_body {
            let prefix = if self.take_closing_brace() {
                "} else"
            } else {
                "else"
            };
            match &else_body.kind {
                StmtKind::IfStmt(condition, body, else_body) => self.write_if(
                    &format!("{} ", prefix),
                    condition,
                    body,
                    else_body.as_deref(),
                ),
                _ => self.write_clause(prefix, else_body),
            }
        }
    }

    fn form_variable_decl(&mut self, decl: &VariableDecl) -> String {
        let declarators: Vec<String> = decl
            .declarators
            .iter()
            .map(|d| match &d.initial_value {
                Some(value) => format!("{} = {}", d.name.lexeme(), value.accept(self)),
                None => d.name.lexeme().to_string(),
            })
            .collect();
        format!("var {}", declarators.join(", "))
    }

    fn form_function(&mut self, decl: &FunctionDecl) -> String {
        let params: Vec<&str> = decl.parameters.iter().map(|p| p.lexeme()).collect();
        let header = match &decl.name {
            Some(name) => format!("function {}({})", name.lexeme(), params.join(", ")),
            None => format!("function({})", params.join(", ")),
        };
        if decl.body.is_empty() {
            return format!("{} {{}}", header);
        }

        let mut body = Generator::new(self.indent + 1);
        body.write_block(&decl.body);

        let mut lines = vec![format!("{} {{", header)];
        lines.extend(body.lines);
        lines.push(format!("{}}}", self.indentation()));
        lines.join("\n")
    }

    fn form_all(&mut self, exprs: &[Expr]) -> String {
        let formed: Vec<String> = exprs.iter().map(|e| e.accept(self)).collect();
        formed.join(", ")
    }
}

impl StmtVisitor for Generator {
    type StmtResult = ();

    fn visit_variable_decl(&mut self, decl: &VariableDecl) {
        let line = format!("{};", self.form_variable_decl(decl));
        self.writeln(&line);
    }

    fn visit_function_decl(&mut self, decl: &FunctionDecl) {
        let function = self.form_function(decl);
        self.writeln(&function);
    }

    fn visit_if_stmt(&mut self, condition: &Expr, body: &Stmt, else_body: Option<&Stmt>) {
        self.write_if("", condition, body, else_body);
    }

    fn visit_while_stmt(&mut self, condition: &Expr, body: &Stmt) {
        let header = format!("while ({})", condition.accept(self));
        self.write_clause(&header, body);
    }

    fn visit_for_stmt(&mut self, for_stmt: &ForStmt) {
        let init = match &for_stmt.init {
            Some(ForInit::VariableDecl(decl)) => self.form_variable_decl(decl),
            Some(ForInit::Expression(expr)) => expr.accept(self),
            None => String::new(),
        };
        let mut clause = |expr: &Option<Expr>| match expr {
            Some(expr) => format!(" {}", expr.accept(self)),
            None => String::new(),
        };
        let condition = clause(&for_stmt.condition);
        let increment = clause(&for_stmt.increment);
        let header = format!("for ({};{};{})", init, condition, increment);
        self.write_clause(&header, &for_stmt.body);
    }

    fn visit_block_stmt(&mut self, stmts: &[Stmt]) {
        self.writeln("{");
        self.indented(|generator| generator.write_block(stmts));
        self.writeln("}");
    }

    fn visit_return_stmt(&mut self, expr: Option<&Expr>) {
        let line = match expr {
            Some(expr) => format!("return {};", expr.accept(self)),
            None => String::from("return;"),
        };
        self.writeln(&line);
    }

    fn visit_break_stmt(&mut self) {
        self.writeln("break;");
    }

    fn visit_continue_stmt(&mut self) {
        self.writeln("continue;");
    }

    fn visit_expression_stmt(&mut self, expr: &Expr) {
        let line = format!("{};", expr.accept(self));
        self.writeln(&line);
    }

    fn visit_empty_stmt(&mut self) {
        self.writeln(";");
    }
}

impl ExprVisitor for Generator {
    type ExprResult = String;

    fn visit_assignment_expr(&mut self, target: &Expr, op: &Token, value: &Expr) -> String {
        format!("{} {} {}", target.accept(self), op.lexeme(), value.accept(self))
    }

    fn visit_binary_expr(&mut self, lhs: &Expr, op: &Token, rhs: &Expr) -> String {
        format!("{} {} {}", lhs.accept(self), op.lexeme(), rhs.accept(self))
    }

    fn visit_unary_expr(&mut self, op: &Token, operand: &Expr) -> String {
        let op = op.lexeme();
        let operand = operand.accept(self);
        let needs_space = op.chars().all(char::is_alphabetic)
            || operand.starts_with(op)
            || (op == "-" && operand.starts_with("--"))
            || (op == "+" && operand.starts_with("++"));
        if needs_space {
            format!("{} {}", op, operand)
        } else {
            format!("{}{}", op, operand)
        }
    }

    fn visit_update_expr(&mut self, op: &Token, target: &Expr, prefix: bool) -> String {
        if prefix {
            format!("{}{}", op.lexeme(), target.accept(self))
        } else {
            format!("{}{}", target.accept(self), op.lexeme())
        }
    }

    fn visit_conditional_expr(
        &mut self,
        condition: &Expr,
        then_value: &Expr,
        else_value: &Expr,
    ) -> String {
        format!(
            "{} ? {} : {}",
            condition.accept(self),
            then_value.accept(self),
            else_value.accept(self)
        )
    }

    fn visit_call_expr(&mut self, callee: &Expr, args: &[Expr]) -> String {
        format!("{}({})", callee.accept(self), self.form_all(args))
    }

    fn visit_field_expr(&mut self, target: &Expr, field: &Token) -> String {
        format!("{}.{}", target.accept(self), field.lexeme())
    }

    fn visit_subscript_expr(&mut self, target: &Expr, index: &Expr) -> String {
        format!("{}[{}]", target.accept(self), index.accept(self))
    }

    fn visit_literal_expr(&mut self, token: &Token) -> String {
        token.lexeme().to_string()
    }

    fn visit_variable_expr(&mut self, name: &Token) -> String {
        name.lexeme().to_string()
    }

    fn visit_array_expr(&mut self, elements: &[Expr]) -> String {
        format!("[{}]", self.form_all(elements))
    }

    fn visit_object_expr(&mut self, properties: &[Property]) -> String {
        if properties.is_empty() {
            return String::from("{}");
        }
        let properties: Vec<String> = properties
            .iter()
            .map(|p| format!("{}: {}", p.key.lexeme(), p.value.accept(self)))
            .collect();
        format!("{{ {} }}", properties.join(", "))
    }

    fn visit_function_expr(&mut self, decl: &FunctionDecl) -> String {
        self.form_function(decl)
    }

    fn visit_grouping_expr(&mut self, inner: &Expr) -> String {
        format!("({})", inner.accept(self))
    }

    fn visit_sequence_expr(&mut self, exprs: &[Expr]) -> String {
        self.form_all(exprs)
    }
}
