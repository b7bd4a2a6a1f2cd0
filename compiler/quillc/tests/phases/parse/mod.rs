//! Parser phase tests.
//!
//! Lexical and syntax errors as reported by the full pipeline: codes,
//! positions, and the rendered `ERROR (at line:col)` line.

use pretty_assertions::assert_eq;
use quillc::ErrorCode;

use crate::common::{compile_err, compile_ok};

#[test]
fn unknown_character_is_lexical_error() {
    let err = compile_err("function f(): int {\n  return 1 @ 2;\n}");
    assert_eq!(err.code, ErrorCode::E0002);
    assert_eq!(err.to_string(), "ERROR (at 2:12): Unknown token '@'");
}

#[test]
fn comments_and_whitespace_ignored() {
    compile_ok(
        "// leading comment
         function f(): int {   // trailing comment
             return 1;
         }",
    );
}

#[test]
fn program_of_several_functions() {
    let wat = compile_ok(
        "function a(): int { return 1; }
         function b(int x): int { return x; }
         function c(double d): double { return d; }",
    );
    for name in ["a", "b", "c"] {
        assert!(wat.contains(&format!("(export \"{name}\" (func ${name}))")));
    }
}

#[test]
fn non_associative_comparison_chain() {
    let err = compile_err("function f(int a): int { return a == a == a; }");
    assert_eq!(err.code, ErrorCode::E1003);
    assert_eq!(err.message, "Operator '==' is non-associative.");
}

#[test]
fn parenthesized_comparisons_accepted() {
    compile_ok("function f(int a, int b, int c): int { return (a < b) && (b < c); }");
}

#[test]
fn missing_semicolon_reports_found_token() {
    let err = compile_err("function f(): int {\n  int x = 1\n  return x;\n}");
    assert_eq!(err.to_string(), "ERROR (at 3:3): Expected ';', but found 'return'.");
}

#[test]
fn error_at_end_of_input_points_at_last_token() {
    let err = compile_err("function f(): int {\n  return 1;");
    assert_eq!(err.pos.line, 2);
    assert_eq!(err.message, "Statement blocks must end with '}'.");
}

#[test]
fn statement_outside_function() {
    let err = compile_err("return 1;");
    assert_eq!(err.code, ErrorCode::E1006);
}

#[test]
fn unknown_variable_is_parse_time() {
    let err = compile_err("function f(): int { x = 1; return 0; }");
    assert_eq!(err.code, ErrorCode::E2001);
    assert_eq!(err.message, "Unknown variable 'x'.");
}

#[test]
fn string_type_rejected() {
    let err = compile_err("function f(): string { return 1; }");
    assert_eq!(err.code, ErrorCode::E1005);
}

#[test]
fn whole_file_is_lexed_before_parsing() {
    let err = compile_err(
        "function f(): int { return y; }
         function g(): int { return @; }",
    );
    assert_eq!(err.code, ErrorCode::E0002);
}
