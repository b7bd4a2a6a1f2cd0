//! End-to-end tests: compile, assemble with `wat`, and execute under `wasmi`.

use crate::common::{run_double, run_double_int, run_int, run_int2_int, run_int_int};

#[test]
fn arithmetic_precedence() {
    assert_eq!(run_int("function main(): int { return 1 + 2 * 3; }", "main"), 7);
}

#[test]
fn countdown_loop_reaches_zero() {
    let source = "function f(int x): int { while (x > 0) { x = x - 1; } return x; }";
    for input in [1, 5, 100] {
        assert_eq!(run_int_int(source, "f", input), 0, "input {input}");
    }
}

#[test]
fn sqrt_of_int_literal() {
    let result = run_double("function f(): double { return sqrt(2); }", "f");
    assert!((result - std::f64::consts::SQRT_2).abs() < 1e-12, "got {result}");
}

#[test]
fn factorial() {
    let source = "
        function fact(int n): int {
            int acc = 1;
            while (n > 1) {
                acc = acc * n;
                n = n - 1;
            }
            return acc;
        }";
    assert_eq!(run_int_int(source, "fact", 1), 1);
    assert_eq!(run_int_int(source, "fact", 5), 120);
    assert_eq!(run_int_int(source, "fact", 10), 3_628_800);
}

#[test]
fn break_and_continue() {
    let source = "
        function f(int n): int {
            int sum = 0;
            int i = 0;
            while (i < n) {
                i = i + 1;
                if (i % 2 == 0) { continue; }
                if (i > 7) { break; }
                sum = sum + i;
            }
            return sum;
        }";
    assert_eq!(run_int_int(source, "f", 4), 4);
    assert_eq!(run_int_int(source, "f", 100), 16);
}

#[test]
fn nested_if_else_in_final_position() {
    let source = "
        function sign(int x): int {
            if (x < 0) {
                return -1;
            } else if (x == 0) {
                return 0;
            } else {
                return 1;
            }
        }";
    assert_eq!(run_int_int(source, "sign", -5), -1);
    assert_eq!(run_int_int(source, "sign", 0), 0);
    assert_eq!(run_int_int(source, "sign", 9), 1);
}

#[test]
fn early_return_from_loop() {
    let source = "
        function first_multiple(int k): int {
            int i = 1;
            while (1) {
                if (i % k == 0) { return i; }
                i = i + 1;
            }
            return 0;
        }";
    assert_eq!(run_int_int(source, "first_multiple", 1), 1);
    assert_eq!(run_int_int(source, "first_multiple", 6), 6);
}

#[test]
fn gcd_with_block_local() {
    let source = "
        function gcd(int a, int b): int {
            while (b != 0) {
                int t = b;
                b = a % b;
                a = t;
            }
            return a;
        }";
    assert_eq!(run_int2_int(source, "gcd", 48, 18), 6);
    assert_eq!(run_int2_int(source, "gcd", 17, 5), 1);
}

#[test]
fn signed_remainder_and_division() {
    assert_eq!(run_int("function f(): int { return -7 % 3; }", "f"), -1);
    assert_eq!(run_int("function f(): int { return -7 / 2; }", "f"), -3);
    assert_eq!(run_int("function f(): int { return -3 < 2; }", "f"), 1);
}

#[test]
fn logical_results_are_normalized() {
    let source = "function f(int a, int b): int { return a && b; }";
    assert_eq!(run_int2_int(source, "f", 5, 7), 1);
    assert_eq!(run_int2_int(source, "f", 5, 0), 0);

    let source = "function f(int a, int b): int { return a || b; }";
    assert_eq!(run_int2_int(source, "f", 0, 9), 1);
    assert_eq!(run_int2_int(source, "f", 0, 0), 0);

    assert_eq!(run_int("function f(): int { return !0; }", "f"), 1);
    assert_eq!(run_int("function f(): int { return !42; }", "f"), 0);
}

#[test]
fn or_skips_right_operand() {
    let source = "
        function f(): int {
            int b = 0;
            int a = 1;
            if (a || (b = 1)) { }
            return b;
        }";
    assert_eq!(run_int(source, "f"), 0);
}

#[test]
fn and_skips_right_operand() {
    let source = "
        function f(): int {
            int b = 0;
            int a = 0;
            if (a && (b = 1)) { }
            return b;
        }";
    assert_eq!(run_int(source, "f"), 0);
}

#[test]
fn chained_assignment() {
    let source = "
        function f(): int {
            int a = 0;
            int b = 0;
            a = b = 3;
            return a + b;
        }";
    assert_eq!(run_int(source, "f"), 6);
}

#[test]
fn char_arithmetic_widens_to_int() {
    let source = "function f(): int { char c = 'a'; return c + 1; }";
    assert_eq!(run_int(source, "f"), 98);
}

#[test]
fn mixed_arithmetic_promotes_to_double() {
    let source = "function half(): double { int x = 5; return x / 2.0; }";
    assert!((run_double(source, "half") - 2.5).abs() < f64::EPSILON);
}

#[test]
fn int_return_widens_to_double() {
    let source = "function f(): double { return 3; }";
    assert!((run_double(source, "f") - 3.0).abs() < f64::EPSILON);
}

#[test]
fn explicit_conversion_truncates() {
    let source = "function f(double d): int { return (d * 2.5) : int; }";
    assert_eq!(run_double_int(source, "f", 4.0), 10);
    assert_eq!(run_double_int(source, "f", -1.5), -3);
}

#[test]
fn shadowed_variable_is_independent() {
    let source = "
        function f(): int {
            int x = 1;
            {
                int x = 10;
                x = x + 1;
            }
            return x;
        }";
    assert_eq!(run_int(source, "f"), 1);
}

#[test]
fn functions_are_exported_independently() {
    let source = "
        function one(): int { return 1; }
        function two(): int { return 2; }";
    assert_eq!(run_int(source, "one"), 1);
    assert_eq!(run_int(source, "two"), 2);
}

#[test]
fn long_operator_chain_evaluates() {
    let terms = vec!["1"; 20_000].join(" + ");
    let source = format!("function f(): double {{ return {terms}; }}");
    assert!((run_double(&source, "f") - 20_000.0).abs() < f64::EPSILON);
}
