//! Quill compiler library.
//!
//! Runs the whole pipeline on one source string:
//!
//! ```text
//! source → lex → parse + type-check (per function) → WAT emission → String
//! ```
//!
//! Compilation stops at the first error. Output is only produced when every
//! phase succeeded.

use std::sync::Once;

pub use quill_diagnostic::{CompileResult, Diagnostic, ErrorCode};
pub use quill_wat::CodegenOptions;

/// Compile `source` to WAT text with default options.
pub fn compile(source: &str) -> CompileResult<String> {
    compile_with(source, CodegenOptions::default())
}

/// Compile `source` to WAT text.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn compile_with(source: &str, options: CodegenOptions) -> CompileResult<String> {
    let tokens = quill_lexer::lex(source)?;
    let program = quill_parse::parse(&tokens)?;
    quill_wat::generate(&program.module, &program.symbols, options)
}

static TRACING_INIT: Once = Once::new();

/// Install a stderr tracing subscriber when `QUILL_LOG` is set.
///
/// The filter uses `EnvFilter` syntax, e.g. `QUILL_LOG=quill_parse=trace`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if let Ok(filter) = EnvFilter::try_from_env("QUILL_LOG") {
            tracing_subscriber::registry()
                .with(
                    HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .with(filter)
                .init();
        }
    });
}
