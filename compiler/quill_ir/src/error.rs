//! Errors raised by IR-level invariants.
//!
//! `quill_ir` sits below the diagnostic crate, so these are plain errors;
//! `quill_diagnostic` turns each one into a coded `Diagnostic`.

use thiserror::Error;

use crate::SourcePos;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IrError {
    /// A name declared twice in the same scope.
    #[error("Redeclaration of {what} '{name}' (original declaration on line {original_line}).")]
    Redeclaration {
        what: &'static str,
        name: String,
        pos: SourcePos,
        original_line: u32,
    },

    #[error("Unknown variable '{name}'.")]
    UnknownIdentifier { name: String, pos: SourcePos },

    /// A statement appended to a block after a guaranteed return.
    #[error("Unreachable code.")]
    UnreachableCode { pos: SourcePos },

    #[error("Internal error: attempted to pop the global scope.")]
    PopGlobalScope,
}

impl IrError {
    /// Source position the error refers to, if it has one.
    pub fn pos(&self) -> Option<SourcePos> {
        match self {
            IrError::Redeclaration { pos, .. }
            | IrError::UnknownIdentifier { pos, .. }
            | IrError::UnreachableCode { pos } => Some(*pos),
            IrError::PopGlobalScope => None,
        }
    }
}
