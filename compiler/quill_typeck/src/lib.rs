//! Type checker for Quill.
//!
//! Runs over one parsed [`Function`] at a time, bottom-up: children are
//! checked first so their types are settled, then the node validates its
//! operands and splices in any implicit conversion it needs. That splice is
//! the only mutation any phase performs on a built tree.

mod check;
mod promote;

use quill_diagnostic::CompileResult;
use quill_ir::{Function, SymbolTable};
use tracing::debug;

pub use promote::{binary_promotion, Promotion};

use check::Checker;

/// Type-check a function body in place.
#[tracing::instrument(level = "debug", skip_all, fields(function = symbols.name_of(func.id)))]
pub fn check_function(func: &mut Function, symbols: &SymbolTable) -> CompileResult<()> {
    let checker = Checker::new(symbols, func.id);
    checker.check(&mut func.body)?;
    debug!("function type-checked");
    Ok(())
}
