//! Diagnostic system for Quill compile errors.
//!
//! Every phase reports failure as a [`Diagnostic`]: an error code for
//! searchability, the source position, and a one-line message. Compilation is
//! fail-fast, so a phase returns the first diagnostic it hits through
//! [`CompileResult`] and the driver decides how to print it.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{internal_error, type_mismatch, unexpected_token, Diagnostic};
pub use error_code::ErrorCode;

/// Result type threaded through every compiler phase.
pub type CompileResult<T> = Result<T, Diagnostic>;
