//! Quill IR - Intermediate Representation Types
//!
//! This crate contains the core data structures shared by every phase of the
//! Quill compiler:
//! - Source positions for diagnostics
//! - Value types and their conversion relations
//! - Tokens produced by the lexer
//! - The typed AST (`Node`, `Function`, `Module`)
//! - The scoped symbol table
//!
//! # Design Philosophy
//!
//! - **Closed variants**: AST nodes and types are enums, matched exhaustively.
//! - **Exclusive ownership**: every child is boxed and owned by one parent.
//! - **Dense ids**: symbols are addressed by `SymbolId(u32)`, stable for the
//!   whole compilation even after their scope is popped.

pub mod ast;
mod error;
mod pos;
mod symbol;
mod token;
mod ty;

pub use ast::{Assoc, BinaryOp, Function, Module, Node, NodeKind, UnaryOp};
pub use error::IrError;
pub use pos::SourcePos;
pub use symbol::{Symbol, SymbolId, SymbolTable};
pub use token::{Token, TokenKind};
pub use ty::Type;
