//! WebAssembly text backend for Quill.
//!
//! # Architecture
//!
//! ```text
//! Module + SymbolTable
//!        ↓
//!   CodegenContext   (buffered lines, labels, loop targets, final-node flag)
//!        ↓
//!    emit_module     (memory, free-pointer global, helpers, functions)
//!        ↓
//!     render()       (WAT text with aligned comments)
//! ```
//!
//! Emission is a single depth-first walk. Each node reports whether it left a
//! value on the WASM stack, and the caller drops values it does not need, so
//! the stack stays balanced by construction.

mod context;
mod emit;
mod module;

use quill_diagnostic::CompileResult;
use quill_ir::{Module, SymbolTable};

pub use context::CodegenContext;

/// Knobs for the emitted module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Size of the exported linear memory, in 64 KiB pages.
    pub memory_pages: u32,
    /// Emit `;;` comments alongside instructions.
    pub emit_comments: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions {
            memory_pages: 1,
            emit_comments: true,
        }
    }
}

/// Generate the WAT text for a type-checked module.
///
/// Nothing is returned unless every function was emitted successfully.
#[tracing::instrument(level = "debug", skip_all, fields(functions = module.functions.len()))]
pub fn generate(
    module: &Module,
    symbols: &SymbolTable,
    options: CodegenOptions,
) -> CompileResult<String> {
    let mut ctx = CodegenContext::new(symbols, options);
    module::emit_module(&mut ctx, module)?;
    Ok(ctx.render())
}
