//! Code generation phase tests.
//!
//! Shape of the emitted module: layout, labels, final-node handling, and the
//! no-output-on-error guarantee.

use pretty_assertions::assert_eq;
use quillc::ErrorCode;

use crate::common::{compile_bare, compile_err, compile_ok};

#[test]
fn minimal_module_text() {
    let wat = compile_bare("function main(): int { return 7; }");
    let expected = "\
(module
  (memory (export \"memory\") 1)
  (global $free_mem (mut i32) (i32.const 0))

  (func $_alloc_str (param $size i32) (result i32)
    (local $null_pos i32)
    (global.get $free_mem)
    (global.get $free_mem)
    (local.get $size)
    (i32.add)
    (local.set $null_pos)
    (i32.store8 (local.get $null_pos) (i32.const 0))
    (i32.add (i32.const 1) (local.get $null_pos))
    (global.set $free_mem)
  )

  (func $main (result i32)

    (i32.const 7)
  )

  (export \"main\" (func $main))

)
";
    assert_eq!(wat, expected);
}

#[test]
fn comments_are_aligned() {
    let wat = compile_ok("function main(): int { return 7; }");
    let columns: Vec<usize> = wat
        .lines()
        .filter(|line| !line.trim_start().starts_with(";;"))
        .filter_map(|line| line.find(";;"))
        .collect();
    assert!(!columns.is_empty());
    assert!(columns.iter().all(|&col| col == columns[0]));
}

#[test]
fn locals_are_commented_with_source_names() {
    let wat = compile_ok("function f(): int { int total = 0; return total; }");
    assert!(wat.contains(";; Variables"));
    assert!(wat.contains("(local $var1 i32)"));
    assert!(wat.contains(";; Variable: total"));
}

#[test]
fn labels_are_unique_across_functions() {
    let wat = compile_bare(
        "function f(int x): int { while (x) { x = x - 1; } return x; }
         function g(int x): int { while (x) { while (x) { break; } x = x - 1; } return x; }",
    );
    for label in ["$exit1", "$exit2", "$exit3", "$loop1", "$loop2", "$loop3"] {
        assert!(
            wat.contains(&format!("(block {label}")) || wat.contains(&format!("(loop {label}")),
            "missing {label}"
        );
    }
}

#[test]
fn break_and_continue_target_innermost_loop() {
    let wat = compile_bare(
        "function f(int x): int {
            while (x) {
                while (x) { break; }
                continue;
            }
            return x;
        }",
    );
    assert!(wat.contains("(br $exit2)"));
    assert!(wat.contains("(br $loop1)"));
}

#[test]
fn break_outside_loop_produces_no_output() {
    let err = compile_err("function f(): int { break; return 0; }");
    assert_eq!(err.code, ErrorCode::E3003);
    assert_eq!(err.to_string(), "ERROR (at 1:21): No loop for `break` to exit.");
}

#[test]
fn continue_outside_loop() {
    let err = compile_err("function f(): int { continue; return 0; }");
    assert_eq!(err.code, ErrorCode::E3003);
}

#[test]
fn nested_final_if_carries_result() {
    let wat = compile_bare(
        "function f(int a, int b): int {
            if (a) {
                if (b) { return 1; } else { return 2; }
            } else {
                return 3;
            }
        }",
    );
    assert_eq!(wat.matches("(if (result i32)").count(), 2);
    assert!(!wat.contains("(return)"));
}

#[test]
fn deterministic_output() {
    let source = "function f(int n): int {
        int acc = 1;
        while (n > 1) { acc = acc * n; n = n - 1; }
        return acc;
    }";
    assert_eq!(compile_ok(source), compile_ok(source));
}

#[test]
fn long_operator_chain() {
    let terms = vec!["1"; 20_000].join(" + ");
    let wat = compile_bare(&format!("function f(): int {{ return {terms}; }}"));
    // 19 999 additions, plus the one in `$_alloc_str`.
    assert_eq!(wat.matches("(i32.add)").count(), 20_000);
}
