//! Function definitions and type names.

use quill_diagnostic::{CompileResult, Diagnostic, ErrorCode};
use quill_ir::{Function, SourcePos, TokenKind, Type};

use crate::Parser;

impl Parser<'_> {
    /// `function name ( [type id {, type id}] ) : type { ... }`
    pub(crate) fn parse_function(&mut self) -> CompileResult<Function> {
        let keyword = self.cursor.peek();
        if !self.cursor.eat(TokenKind::Function) {
            return Err(Diagnostic::error(ErrorCode::E1006)
                .at(keyword.pos)
                .with_message("Outermost scope must define functions."));
        }

        let name = self
            .cursor
            .expect_or(TokenKind::Ident, "Function must have a name.")?;
        self.cursor.expect_or(
            TokenKind::LParen,
            "Function declaration must have '(' after name.",
        )?;

        // Parameters live in the function's own scope, outside the body block.
        self.symbols.push_scope();
        self.symbols.clear_function_vars();

        let mut params = Vec::new();
        let mut param_types = Vec::new();
        while !self.cursor.eat(TokenKind::RParen) {
            if !params.is_empty() && !self.cursor.eat(TokenKind::Comma) {
                return Err(Diagnostic::error(ErrorCode::E1004)
                    .at(self.cursor.error_pos())
                    .with_message(format!(
                        "Parameters must be separated by commas (found {}).",
                        self.cursor.describe_current()
                    )));
            }
            let ty =
                self.parse_type("Function parameters must have a type followed by identifier.")?;
            let param = self.cursor.expect_or(
                TokenKind::Ident,
                "Function parameters must have a type followed by identifier.",
            )?;
            params.push(self.symbols.declare(&param.lexeme, ty.clone(), param.pos)?);
            param_types.push(ty);
        }

        self.cursor.expect_or(
            TokenKind::Colon,
            format!("Function '{}' must declare a return type after ':'.", name.lexeme),
        )?;
        let ret = self.parse_type("Function return type must be a type name.")?;

        // Declared before the body so it can call itself by name.
        let id = self
            .symbols
            .declare_function(&name.lexeme, param_types, ret, name.pos)?;
        // Parameters are not locals.
        self.symbols.clear_function_vars();

        let body = self.parse_block()?;
        self.symbols.pop_scope()?;

        if !body.is_return() {
            return Err(Diagnostic::error(ErrorCode::E3001)
                .at(name.pos)
                .with_message(format!(
                    "Function '{}' must guarantee a return statement through all paths.",
                    name.lexeme
                )));
        }

        Ok(Function {
            id,
            params,
            locals: self.symbols.function_vars().to_vec(),
            body,
            pos: name.pos,
        })
    }

    /// Read a type keyword; `message` is reported when the next token is not one.
    pub(crate) fn parse_type(&mut self, message: &str) -> CompileResult<Type> {
        let token = self.cursor.expect_or(TokenKind::Type, message)?;
        Type::from_keyword(&token.lexeme)
            .ok_or_else(|| Self::unsupported_type(&token.lexeme, token.pos))
    }

    pub(crate) fn unsupported_type(name: &str, pos: SourcePos) -> Diagnostic {
        Diagnostic::error(ErrorCode::E1005)
            .at(pos)
            .with_message(format!("Type '{name}' is not supported."))
    }

    pub(crate) fn syntax_error(&self, message: String) -> Diagnostic {
        Diagnostic::error(ErrorCode::E1001)
            .at(self.cursor.error_pos())
            .with_message(message)
    }
}
