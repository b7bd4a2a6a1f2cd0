//! Token cursor for navigating the token stream.
//!
//! Provides lookahead-1 access and consumption. The stream always ends in
//! `Eof`, and the cursor never moves past it.

use quill_diagnostic::{
    internal_error, unexpected_token, CompileResult, Diagnostic, ErrorCode,
};
use quill_ir::{SourcePos, Token, TokenKind};
use tracing::trace;

pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// `tokens` must be non-empty and end with `Eof`, as produced by
    /// `quill_lexer::lex`; anything else is an internal error.
    pub fn new(tokens: &'a [Token]) -> CompileResult<Self> {
        match tokens.last() {
            Some(last) if last.is(TokenKind::Eof) => Ok(Cursor { tokens, pos: 0 }),
            last => Err(internal_error(
                last.map_or(SourcePos::START, |token| token.pos),
                "token stream is not terminated by end of file",
            )),
        }
    }

    /// The next unconsumed token.
    #[inline]
    pub fn peek(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume and return the next token. At `Eof` the cursor stays put.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !token.is(TokenKind::Eof) {
            trace!(?token, "advance");
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind`, or fail with "Expected X, but found Y".
    pub fn expect(&mut self, kind: TokenKind) -> CompileResult<&'a Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(unexpected_token(
            self.error_pos(),
            kind.display_name(),
            &self.describe_current(),
        ))
    }

    /// Consume a token of `kind`, or fail with a custom message.
    pub fn expect_or(
        &mut self,
        kind: TokenKind,
        message: impl Into<String>,
    ) -> CompileResult<&'a Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(Diagnostic::error(ErrorCode::E1001)
            .at(self.error_pos())
            .with_message(message))
    }

    /// Where to report an error about the next token.
    ///
    /// At end of input this is the last real token, since `Eof` is placed on it.
    pub fn error_pos(&self) -> SourcePos {
        self.peek().pos
    }

    /// The next token as it should appear in a message.
    pub fn describe_current(&self) -> String {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => "end of file".to_owned(),
            _ => format!("'{}'", token.lexeme),
        }
    }
}
