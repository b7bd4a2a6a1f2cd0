use std::fmt;

use quill_ir::{IrError, SourcePos};

use crate::ErrorCode;

/// A compile diagnostic.
///
/// Compilation is fail-fast, so every diagnostic is an error. `Display`
/// renders the one-line channel format `ERROR (at line:col): message`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Where it went wrong.
    pub pos: SourcePos,
    /// Main error message.
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic. Position defaults to 1:1 until set.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            pos: SourcePos::START,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn at(mut self, pos: SourcePos) -> Self {
        self.pos = pos;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR (at {}): {}", self.pos, self.message)
    }
}

impl std::error::Error for Diagnostic {}

impl From<IrError> for Diagnostic {
    fn from(err: IrError) -> Self {
        let code = match &err {
            IrError::Redeclaration { .. } => ErrorCode::E2002,
            IrError::UnknownIdentifier { .. } => ErrorCode::E2001,
            IrError::UnreachableCode { .. } => ErrorCode::E3002,
            IrError::PopGlobalScope => ErrorCode::E9001,
        };
        Diagnostic::error(code)
            .at(err.pos().unwrap_or(SourcePos::START))
            .with_message(err.to_string())
    }
}

/// "Expected X, but found Y" at the offending token.
pub fn unexpected_token(pos: SourcePos, expected: &str, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .at(pos)
        .with_message(format!("Expected {expected}, but found {found}."))
}

/// An operator whose operand types admit no legal promotion.
pub fn type_mismatch(pos: SourcePos, op: &str, lhs: &str, rhs: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2003)
        .at(pos)
        .with_message(format!("Cannot use operator '{op}' on types {lhs} and {rhs}"))
}

/// A broken compiler invariant, reported through the normal channel.
pub fn internal_error(pos: SourcePos, message: impl fmt::Display) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001)
        .at(pos)
        .with_message(format!("Internal error: {message}"))
}
