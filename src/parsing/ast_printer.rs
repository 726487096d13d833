use super::*;
use crate::lexing::Token;

/// Renders a tree one node per line, children indented under `|--`.
/// Spans are left out so that trees built by a transformation compare equal
/// to trees parsed from the equivalent text.
pub struct ASTPrinter {
    indent: i32,
    lines: Vec<String>,
}

impl ASTPrinter {
    pub fn new() -> ASTPrinter {
        ASTPrinter {
            indent: 0,
            lines: Vec::new(),
        }
    }

    pub fn print(&mut self, stmts: &[Stmt]) {
        stmts.iter().for_each(|s| s.accept(self));
    }

    pub fn collected(&self) -> &[String] {
        &self.lines
    }

    pub fn into_string(self) -> String {
        self.lines.join("\n")
    }

    fn write_ln(&mut self, token: &str) {
        let indent = if self.indent > 0 {
            (1..self.indent).map(|_| "|  ").collect::<String>() + "|--"
        } else {
            String::new()
        };

        self.lines.push(format!("{}{}", indent, token));
    }

    fn indent<T>(&mut self, block: T)
    where
        T: FnOnce(&mut ASTPrinter),
    {
        self.indent += 1;
        block(self);
        self.indent -= 1;
    }

    fn write_section(&mut self, title: &str, stmts: &[Stmt]) {
        self.write_ln(title);
        self.indent(|visitor| visitor.print(stmts));
    }

    fn write_function(&mut self, kind: &str, decl: &FunctionDecl) {
        let name = decl.name.as_ref().map(|n| n.lexeme()).unwrap_or("<anonymous>");
        let params: Vec<&str> = decl.parameters.iter().map(|p| p.lexeme()).collect();
        self.write_ln(&format!(
            "{}(name: {}, params: ({}))",
            kind,
            name,
            params.join(", ")
        ));
        self.indent(|visitor| visitor.print(&decl.body));
    }

    fn write_variable_decl(&mut self, decl: &VariableDecl) {
        self.write_ln("VariableDecl");
        self.indent(|visitor| {
            for declarator in &decl.declarators {
                visitor.write_ln(&format!("Declarator(name: {})", declarator.name.lexeme()));
                if let Some(value) = &declarator.initial_value {
                    visitor.indent(|visitor| value.accept(visitor));
                }
            }
        });
    }

    fn write_optional(&mut self, title: &str, expr: Option<&Expr>) {
        self.write_ln(title);
        if let Some(expr) = expr {
            self.indent(|visitor| expr.accept(visitor));
        }
    }
}

impl StmtVisitor for ASTPrinter {
    type StmtResult = ();

    fn visit_variable_decl(&mut self, decl: &VariableDecl) {
        self.write_variable_decl(decl);
    }

    fn visit_function_decl(&mut self, decl: &FunctionDecl) {
        self.write_function("FunctionDecl", decl);
    }

    fn visit_if_stmt(&mut self, condition: &Expr, body: &Stmt, else_body: Option<&Stmt>) {
        self.write_ln("IfStmt");
        self.indent(|visitor| {
            condition.accept(visitor);
            visitor.write_section("Body", std::slice::from_ref(body));
            if let Some(else_body) = else_body {
                visitor.write_section("Else", std::slice::from_ref(else_body));
            }
        });
    }

    fn visit_while_stmt(&mut self, condition: &Expr, body: &Stmt) {
        self.write_ln("WhileStmt");
        self.indent(|visitor| {
            condition.accept(visitor);
            visitor.write_section("Body", std::slice::from_ref(body));
        });
    }

    fn visit_for_stmt(&mut self, for_stmt: &ForStmt) {
        self.write_ln("ForStmt");
        self.indent(|visitor| {
            visitor.write_ln("Init");
            visitor.indent(|visitor| match &for_stmt.init {
                Some(ForInit::VariableDecl(decl)) => visitor.write_variable_decl(decl),
                Some(ForInit::Expression(expr)) => expr.accept(visitor),
                None => (),
            });
            visitor.write_optional("Condition", for_stmt.condition.as_ref());
            visitor.write_optional("Increment", for_stmt.increment.as_ref());
            visitor.write_section("Body", std::slice::from_ref(&*for_stmt.body));
        });
    }

    fn visit_block_stmt(&mut self, stmts: &[Stmt]) {
        self.write_section("Block", stmts);
    }

    fn visit_return_stmt(&mut self, expr: Option<&Expr>) {
        self.write_optional("ReturnStmt", expr);
    }

    fn visit_break_stmt(&mut self) {
        self.write_ln("BreakStmt");
    }

    fn visit_continue_stmt(&mut self) {
        self.write_ln("ContinueStmt");
    }

    fn visit_expression_stmt(&mut self, expr: &Expr) {
        self.write_ln("ExpressionStmt");
        self.indent(|visitor| expr.accept(visitor));
    }

    fn visit_empty_stmt(&mut self) {
        self.write_ln("EmptyStmt");
    }
}

impl ExprVisitor for ASTPrinter {
    type ExprResult = ();

    fn visit_assignment_expr(&mut self, target: &Expr, op: &Token, value: &Expr) {
        self.write_ln(&format!("Assignment({})", op.lexeme()));
        self.indent(|visitor| {
            target.accept(visitor);
            value.accept(visitor);
        });
    }

    fn visit_binary_expr(&mut self, lhs: &Expr, op: &Token, rhs: &Expr) {
        self.write_ln(&format!("Binary({})", op.lexeme()));
        self.indent(|visitor| {
            lhs.accept(visitor);
            rhs.accept(visitor);
        });
    }

    fn visit_unary_expr(&mut self, op: &Token, operand: &Expr) {
        self.write_ln(&format!("Unary({})", op.lexeme()));
        self.indent(|visitor| operand.accept(visitor));
    }

    fn visit_update_expr(&mut self, op: &Token, target: &Expr, prefix: bool) {
        let position = if prefix { "prefix" } else { "postfix" };
        self.write_ln(&format!("Update({}, {})", op.lexeme(), position));
        self.indent(|visitor| target.accept(visitor));
    }

    fn visit_conditional_expr(&mut self, condition: &Expr, then_value: &Expr, else_value: &Expr) {
        self.write_ln("Conditional");
        self.indent(|visitor| {
            condition.accept(visitor);
            then_value.accept(visitor);
            else_value.accept(visitor);
        });
    }

    fn visit_call_expr(&mut self, callee: &Expr, args: &[Expr]) {
        self.write_ln("Call");
        self.indent(|visitor| {
            callee.accept(visitor);
            visitor.write_ln("Args");
            visitor.indent(|visitor| args.iter().for_each(|a| a.accept(visitor)));
        });
    }

    fn visit_field_expr(&mut self, target: &Expr, field: &Token) {
        self.write_ln(&format!("Field({})", field.lexeme()));
        self.indent(|visitor| target.accept(visitor));
    }

    fn visit_subscript_expr(&mut self, target: &Expr, index: &Expr) {
        self.write_ln("Subscript");
        self.indent(|visitor| {
            target.accept(visitor);
            index.accept(visitor);
        });
    }

    fn visit_literal_expr(&mut self, token: &Token) {
        self.write_ln(&format!("Literal({})", token.lexeme()));
    }

    fn visit_variable_expr(&mut self, name: &Token) {
        self.write_ln(&format!("Variable({})", name.lexeme()));
    }

    fn visit_array_expr(&mut self, elements: &[Expr]) {
        self.write_ln("Array");
        self.indent(|visitor| elements.iter().for_each(|e| e.accept(visitor)));
    }

    fn visit_object_expr(&mut self, properties: &[Property]) {
        self.write_ln("Object");
        self.indent(|visitor| {
            for property in properties {
                visitor.write_ln(&format!("Property({})", property.key.lexeme()));
                visitor.indent(|visitor| property.value.accept(visitor));
            }
        });
    }

    fn visit_function_expr(&mut self, decl: &FunctionDecl) {
        self.write_function("FunctionExpr", decl);
    }

    fn visit_grouping_expr(&mut self, inner: &Expr) {
        self.write_ln("Grouping");
        self.indent(|visitor| inner.accept(visitor));
    }

    fn visit_sequence_expr(&mut self, exprs: &[Expr]) {
        self.write_ln("Sequence");
        self.indent(|visitor| exprs.iter().for_each(|e| e.accept(visitor)));
    }
}
