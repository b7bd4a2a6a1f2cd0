//! Type checker phase tests.
//!
//! Promotion, conversion insertion, return-path analysis and type errors as
//! they surface from `compile`.

use pretty_assertions::assert_eq;
use quillc::ErrorCode;

use crate::common::{compile_bare, compile_err, compile_ok};

#[test]
fn if_else_returning_on_both_paths() {
    compile_ok("function f(int c): int { if (c) { return 1; } else { return 2; } }");
}

#[test]
fn if_without_else_misses_a_path() {
    let err = compile_err("function f(int c): int { if (c) { return 1; } }");
    assert_eq!(err.code, ErrorCode::E3001);
    assert_eq!(
        err.message,
        "Function 'f' must guarantee a return statement through all paths."
    );
}

#[test]
fn loop_with_return_misses_a_path() {
    let err = compile_err("function f(int c): int { while (c) { return 1; } }");
    assert_eq!(err.code, ErrorCode::E3001);
}

#[test]
fn unreachable_code_after_return() {
    let err = compile_err("function f(int x): int {\n  { return 1; x = 2; }\n}");
    assert_eq!(err.code, ErrorCode::E3002);
    assert_eq!(err.to_string(), "ERROR (at 2:15): Unreachable code.");
}

#[test]
fn shadowing_in_inner_block() {
    let wat = compile_bare(
        "function f(): int {
            int x = 1;
            { int x = 2; }
            return x;
        }",
    );
    assert!(wat.contains("(local $var1 i32)"));
    assert!(wat.contains("(local $var2 i32)"));
}

#[test]
fn redeclaration_cites_original_line() {
    let err = compile_err("function f(): int {\n  int x;\n  double x;\n  return 0;\n}");
    assert_eq!(err.code, ErrorCode::E2002);
    assert_eq!(
        err.to_string(),
        "ERROR (at 3:10): Redeclaration of variable 'x' (original declaration on line 2)."
    );
}

#[test]
fn mixed_arithmetic_promotes_narrower_side() {
    let wat = compile_bare("function f(int i, double d): double { return i * d; }");
    assert!(wat.contains("(local.get $var0)\n    (f64.convert_i32_s)\n    (local.get $var1)\n    (f64.mul)"));
}

#[test]
fn modulus_requires_ints() {
    let err = compile_err("function f(double d): int { return 5 % d; }");
    assert_eq!(err.code, ErrorCode::E2003);
    assert_eq!(err.message, "Cannot use operator '%' on types int and double");
}

#[test]
fn logical_operators_require_ints() {
    let err = compile_err("function f(double d): int { return d && 1; }");
    assert_eq!(err.code, ErrorCode::E2003);
}

#[test]
fn assignment_cannot_narrow() {
    let err = compile_err("function f(double d): int { int i = d; return i; }");
    assert_eq!(err.code, ErrorCode::E2003);
    assert_eq!(err.message, "Cannot use operator '=' on types int and double");
}

#[test]
fn assignment_to_non_variable() {
    let err = compile_err("function f(int a): int { a + 1 = 2; return a; }");
    assert_eq!(err.code, ErrorCode::E2005);
    assert_eq!(err.message, "Left-hand-side of assignment must be a variable.");
}

#[test]
fn condition_must_be_int() {
    let err = compile_err("function f(double d): int { if (d) { return 1; } return 0; }");
    assert_eq!(err.code, ErrorCode::E2004);
    assert_eq!(
        err.message,
        "Condition for if-statement must evaluate to type int, not double"
    );

    let err = compile_err("function f(double d): int { while (d) { } return 0; }");
    assert_eq!(
        err.message,
        "Condition for while-statement must evaluate to type int, not double"
    );
}

#[test]
fn return_widening_and_narrowing() {
    let wat = compile_bare("function f(int i): double { return i; }");
    assert!(wat.contains("(f64.convert_i32_s)"));

    let err = compile_err("function f(double d): int { return d; }");
    assert_eq!(err.code, ErrorCode::E2006);
    assert_eq!(
        err.message,
        "Cannot return double from function 'f' returning int"
    );
}

#[test]
fn unary_operand_rules() {
    let err = compile_err("function f(): int { return -'a'; }");
    assert_eq!(
        err.message,
        "Unary operator NEGATE (-) cannot be used on type 'char'."
    );

    let err = compile_err("function f(double d): int { return !d; }");
    assert_eq!(
        err.message,
        "Unary operator NOT (!) can only be used on 'int' types."
    );
}

#[test]
fn sqrt_inserts_double_conversion() {
    let wat = compile_bare("function f(): double { return sqrt(2); }");
    assert!(wat.contains("(i32.const 2)\n    (f64.convert_i32_s)\n    (f64.sqrt)"));
}

#[test]
fn initializer_may_reference_declared_name() {
    compile_ok("function f(): int { int x = x + 1; return x; }");
}
