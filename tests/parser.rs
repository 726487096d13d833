use hoist::diagnostic::*;

mod common;
use common::*;

#[test]
fn precedence() -> TestResult {
    assert_tree(
        "5 + 4 * 6;",
        &[
            "ExpressionStmt",
            "|--Binary(+)",
            "|  |--Literal(5)",
            "|  |--Binary(*)",
            "|  |  |--Literal(4)",
            "|  |  |--Literal(6)",
        ],
    )
}

#[test]
fn declaration_list() -> TestResult {
    assert_tree(
        "var a = 1, b;",
        &[
            "VariableDecl",
            "|--Declarator(name: a)",
            "|  |--Literal(1)",
            "|--Declarator(name: b)",
        ],
    )
}

#[test]
fn assignment_is_right_associative() -> TestResult {
    assert_tree(
        "a = b += 2;",
        &[
            "ExpressionStmt",
            "|--Assignment(=)",
            "|  |--Variable(a)",
            "|  |--Assignment(+=)",
            "|  |  |--Variable(b)",
            "|  |  |--Literal(2)",
        ],
    )
}

#[test]
fn member_calls() -> TestResult {
    assert_tree(
        "console.log(x[0], 'it is');",
        &[
            "ExpressionStmt",
            "|--Call",
            "|  |--Field(log)",
            "|  |  |--Variable(console)",
            "|  |--Args",
            "|  |  |--Subscript",
            "|  |  |  |--Variable(x)",
            "|  |  |  |--Literal(0)",
            "|  |  |--Literal('it is')",
        ],
    )
}

#[test]
fn conditional_and_logic() -> TestResult {
    assert_tree(
        "x = a || b ? !c : d;",
        &[
            "ExpressionStmt",
            "|--Assignment(=)",
            "|  |--Variable(x)",
            "|  |--Conditional",
            "|  |  |--Binary(||)",
            "|  |  |  |--Variable(a)",
            "|  |  |  |--Variable(b)",
            "|  |  |--Unary(!)",
            "|  |  |  |--Variable(c)",
            "|  |  |--Variable(d)",
        ],
    )
}

#[test]
fn for_loop() -> TestResult {
    assert_tree(
        "for (var i = 0; i < 3; i++) total += i;",
        &[
            "ForStmt",
            "|--Init",
            "|  |--VariableDecl",
            "|  |  |--Declarator(name: i)",
            "|  |  |  |--Literal(0)",
            "|--Condition",
            "|  |--Binary(<)",
            "|  |  |--Variable(i)",
            "|  |  |--Literal(3)",
            "|--Increment",
            "|  |--Update(++, postfix)",
            "|  |  |--Variable(i)",
            "|--Body",
            "|  |--ExpressionStmt",
            "|  |  |--Assignment(+=)",
            "|  |  |  |--Variable(total)",
            "|  |  |  |--Variable(i)",
        ],
    )
}

#[test]
fn function_expression() -> TestResult {
    assert_tree(
        "var sub = function(a, b) { return a - b; };",
        &[
            "VariableDecl",
            "|--Declarator(name: sub)",
            "|  |--FunctionExpr(name: <anonymous>, params: (a, b))",
            "|  |  |--ReturnStmt",
            "|  |  |  |--Binary(-)",
            "|  |  |  |  |--Variable(a)",
            "|  |  |  |  |--Variable(b)",
        ],
    )
}

#[test]
fn semicolons_optional_at_line_end() -> TestResult {
    let program = parse_clean("var sub = function() {}\nwhile (x) { x-- }")?;
    assert_eq!(program.statements.len(), 2);
    Ok(())
}

#[test]
fn object_literal() -> TestResult {
    assert_tree(
        "o = { a: 1, 'b': [2] };",
        &[
            "ExpressionStmt",
            "|--Assignment(=)",
            "|  |--Variable(o)",
            "|  |--Object",
            "|  |  |--Property(a)",
            "|  |  |  |--Literal(1)",
            "|  |  |--Property('b')",
            "|  |  |  |--Array",
            "|  |  |  |  |--Literal(2)",
        ],
    )
}

#[test]
fn invalid_assignment() -> TestResult {
    assert_failure(
        "5 + 6 = 4;",
        &[Diagnostic::error(
            &test_span::new(0, 5),
            "Invalid assignment target",
        )],
    )
}

#[test]
fn missing_semicolon_on_same_line() -> TestResult {
    assert_failure(
        "var a = 1 var b = 2;",
        &[Diagnostic::error(
            &test_span::new(10, 3),
            "Expect ';' after variable declaration",
        )],
    )
}

#[test]
fn unbalanced_braces() {
    let (_, diagnostics) = test_parse("function f() { var x = 1;");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Expect '}' after function body");
}

#[test]
fn recovers_after_error() {
    let (program, diagnostics) = test_parse("var = 1;\nvar ok = 2;\nx = ;\ny = 3;");
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn stray_closing_brace() {
    let (_, diagnostics) = test_parse("var x; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Expected expression");
}

//
// Helpers
//

fn assert_tree(text: &str, expected: &[&str]) -> TestResult {
    let program = parse_clean(text)?;
    let got = tree_lines(&program);

    if got == expected {
        Ok(())
    } else {
        println!();
        println!("Expected:");
        println!("{}", expected.join("\n"));
        println!("Got:");
        println!("{}", got.join("\n"));
        println!();
        Err(String::from("Parse failed"))
    }
}

fn assert_failure(text: &str, expected: &[Diagnostic]) -> TestResult {
    let (_, got) = test_parse(text);
    let got: &[Diagnostic] = &got;

    assert_slices_equal(
        "diagnostics",
        got,
        expected,
        |lhs, rhs| lhs == rhs,
        &got.diagnostic_string(),
    )
}
