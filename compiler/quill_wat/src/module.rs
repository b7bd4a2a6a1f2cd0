//! Module and function layout.

use quill_diagnostic::CompileResult;
use quill_ir::{Function, Module};
use tracing::debug;

use crate::context::CodegenContext;
use crate::emit::{emit_discard, wat_type};

/// Allocates `$size` bytes plus a NUL terminator from `$free_mem` and returns
/// the start address.
const ALLOC_STR: &[(&str, &str)] = &[
    ("(func $_alloc_str (param $size i32) (result i32)", ""),
    ("  (local $null_pos i32)", "Local variable to place null terminator."),
    ("  (global.get $free_mem)", "Old free mem is alloc start."),
    ("  (global.get $free_mem)", "Adjust new free mem."),
    ("  (local.get $size)", ""),
    ("  (i32.add)", ""),
    ("  (local.set $null_pos)", ""),
    ("  (i32.store8 (local.get $null_pos) (i32.const 0))", "Place null terminator."),
    ("  (i32.add (i32.const 1) (local.get $null_pos))", ""),
    ("  (global.set $free_mem)", "Update free memory start."),
    (")", ""),
];

pub(crate) fn emit_module(ctx: &mut CodegenContext<'_>, module: &Module) -> CompileResult<()> {
    ctx.code("(module").indent(2);

    let pages = ctx.options().memory_pages;
    ctx.comment_line(format!("Define a memory block with {pages} page(s) of 64KiB"))
        .code(format!("(memory (export \"memory\") {pages})"));
    // Constant data would be placed here; the free pointer starts past it.
    let heap_start = ctx.mem_pos();
    ctx.code(format!("(global $free_mem (mut i32) (i32.const {heap_start}))"))
        .code("");

    ctx.comment_line("Function to allocate a string; add one to size and places null there.");
    for (code, comment) in ALLOC_STR {
        ctx.code(*code);
        if !comment.is_empty() {
            ctx.comment(*comment);
        }
    }
    ctx.code("");

    for function in &module.functions {
        emit_function(ctx, function)?;
    }

    ctx.dedent(2).code(")").comment("END program module");
    Ok(())
}

/// `(func $name (param ...) (result T) locals body)` followed by its export.
fn emit_function(ctx: &mut CodegenContext<'_>, function: &Function) -> CompileResult<()> {
    let symbols = ctx.symbols;
    let name = symbols.name_of(function.id);

    let mut header = format!("(func ${name}");
    for &param in &function.params {
        let ty = wat_type(symbols.type_of(param), function.pos)?;
        header.push_str(&format!(" (param {} {ty})", CodegenContext::var_name(param)));
    }
    let ret = wat_type(&function.return_type(symbols), function.pos)?;
    header.push_str(&format!(" (result {ret})"));
    ctx.code(header).indent(2);

    ctx.comment_line("Variables");
    for &local in &function.locals {
        let ty = wat_type(symbols.type_of(local), function.pos)?;
        ctx.code(format!("(local {} {ty})", CodegenContext::var_name(local)))
            .comment(format!("Variable: {}", symbols.name_of(local)));
    }
    ctx.code("");

    // The body is the function's only node, so it is in final position.
    ctx.set_final_node(true);
    emit_discard(ctx, &function.body)?;

    ctx.dedent(2)
        .code(")")
        .comment(format!("END '{name}' function definition."))
        .code("")
        .code(format!("(export \"{name}\" (func ${name}))"))
        .code("");

    debug!(name, locals = function.locals.len(), "function emitted");
    Ok(())
}
