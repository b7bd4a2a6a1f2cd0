//! Recursive descent parser for Quill.
//!
//! Statements and functions are parsed by recursive descent; expressions by
//! precedence climbing over [`BinaryOp::precedence`](quill_ir::BinaryOp).
//! Identifiers are resolved against the symbol table as they are read, so an
//! undeclared name is a parse-time error.
//!
//! Each function is type-checked as soon as it has been parsed, so errors are
//! reported in source order of functions.

mod cursor;
mod grammar;

use quill_diagnostic::CompileResult;
use quill_ir::{Module, SymbolTable, Token};
use tracing::debug;

pub use cursor::Cursor;

/// A parsed, type-checked program plus the symbols its nodes refer to.
#[derive(Debug)]
pub struct ParseOutput {
    pub module: Module,
    pub symbols: SymbolTable,
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    symbols: SymbolTable,
}

impl<'a> Parser<'a> {
    /// Fails if `tokens` does not end with `Eof`.
    pub fn new(tokens: &'a [Token]) -> CompileResult<Self> {
        Ok(Parser {
            cursor: Cursor::new(tokens)?,
            symbols: SymbolTable::new(),
        })
    }

    /// Parse every function up to end of input.
    pub fn parse_module(mut self) -> CompileResult<ParseOutput> {
        let mut module = Module::default();
        while !self.cursor.is_at_end() {
            let mut function = self.parse_function()?;
            quill_typeck::check_function(&mut function, &self.symbols)?;
            debug!(
                name = self.symbols.name_of(function.id),
                locals = function.locals.len(),
                "parsed function"
            );
            module.functions.push(function);
        }
        Ok(ParseOutput {
            module,
            symbols: self.symbols,
        })
    }
}

/// Parse and type-check a token stream.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token]) -> CompileResult<ParseOutput> {
    Parser::new(tokens)?.parse_module()
}
