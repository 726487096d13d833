use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

mod common;
use common::*;

fn run(args: &[&str]) -> std::result::Result<Output, String> {
    Command::new(env!("CARGO_BIN_EXE_hoist"))
        .args(args)
        .output()
        .map_err(|e| e.to_string())
}

fn write_temp(name: &str, content: &str) -> std::result::Result<PathBuf, String> {
    let path = std::env::temp_dir().join(format!("hoist-{}-{}.js", name, std::process::id()));
    fs::write(&path, content).map_err(|e| e.to_string())?;
    Ok(path)
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn hoists_built_in_samples() -> TestResult {
    let output = run(&[])?;
    assert!(output.status.success());

    let expected = [
        "// <loop sample>",
        "var sub;\nvar x;\nfunction add(a, b) {\n  var c;\n  c = 3;\n  return a + b;\n}\nsub = function(a, b) {\n  var c;\n  c = 3;\n  return a - b;\n};\nwhile (shift <= 200) {\n  x = add(1, shift);\n  shift += 14;\n}\n",
        "// <conditional sample>",
        "var foo;\nvar bar;\nfoo = 1;\nbar = foo + 2 < 3;\nif (foo + 2 < 3) {\n  console.log('it is');\n}\nconsole.log(foo);\n",
        "// <single declaration sample>",
        "var foo = 1;\n\n",
    ];
    assert_eq!(stdout_of(&output), expected.join("\n"));
    Ok(())
}

#[test]
fn block_scope_combined_tree() -> TestResult {
    let path = write_temp("tree", "{ f(); var a = 1, b; }")?;
    let output = run(&[
        "--scope",
        "block",
        "--combine",
        "--tree",
        &path.to_string_lossy(),
    ])?;
    let _ = fs::remove_file(&path);
    assert!(output.status.success());

    let expected = [
        "Block",
        "|--VariableDecl",
        "|  |--Declarator(name: a)",
        "|  |--Declarator(name: b)",
        "|--ExpressionStmt",
        "|  |--Call",
        "|  |  |--Variable(f)",
        "|  |  |--Args",
        "|--ExpressionStmt",
        "|  |--Assignment(=)",
        "|  |  |--Variable(a)",
        "|  |  |--Literal(1)",
        "",
        "",
    ];
    assert_eq!(stdout_of(&output), expected.join("\n"));
    Ok(())
}

#[test]
fn malformed_file_fails() -> TestResult {
    let path = write_temp("malformed", "function f() { var x = 1;")?;
    let output = run(&[&path.to_string_lossy()])?;
    let _ = fs::remove_file(&path);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Expect '}' after function body"));
    assert!(stderr.contains("failed to parse"));
    Ok(())
}

#[test]
fn unknown_scope_is_rejected() -> TestResult {
    let output = run(&["--scope", "module"])?;
    assert!(!output.status.success());
    Ok(())
}
