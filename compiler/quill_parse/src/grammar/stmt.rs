//! Statements and blocks.

use quill_diagnostic::CompileResult;
use quill_ir::ast::push_statement;
use quill_ir::{BinaryOp, Node, NodeKind, SourcePos, TokenKind};
use quill_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::Parser;

impl Parser<'_> {
    /// Parse one statement. Empty statements and declarations without an
    /// initializer produce no node.
    pub(crate) fn parse_statement(&mut self) -> CompileResult<Option<Node>> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> CompileResult<Option<Node>> {
        let token = self.cursor.peek();
        trace!(kind = %token.kind, pos = %token.pos, "statement");

        let node = match token.kind {
            TokenKind::Type => return self.parse_declaration(),
            TokenKind::If => self.parse_if()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::Return => {
                self.cursor.advance();
                let value = self.parse_expr()?;
                self.cursor.expect(TokenKind::Semicolon)?;
                Node::new(NodeKind::Return(Box::new(value)), token.pos)
            }
            TokenKind::Break => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::Semicolon)?;
                Node::new(NodeKind::Break, token.pos)
            }
            TokenKind::Continue => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::Semicolon)?;
                Node::new(NodeKind::Continue, token.pos)
            }
            TokenKind::LBrace => self.parse_block()?,
            TokenKind::Semicolon => {
                self.cursor.advance();
                return Ok(None);
            }
            _ => {
                let expr = self.parse_expr()?;
                self.cursor.expect(TokenKind::Semicolon)?;
                expr
            }
        };
        Ok(Some(node))
    }

    /// `type id [= expr] ;`
    ///
    /// The name is declared before the initializer is read, so the
    /// initializer may already refer to it.
    fn parse_declaration(&mut self) -> CompileResult<Option<Node>> {
        let ty = self.parse_type("Declarations must have a type followed by identifier.")?;
        let name = self.cursor.expect_or(
            TokenKind::Ident,
            "Declarations must have a type followed by identifier.",
        )?;
        let id = self.symbols.declare(&name.lexeme, ty, name.pos)?;

        if self.cursor.eat(TokenKind::Semicolon) {
            return Ok(None);
        }
        if !self.cursor.eat(TokenKind::Eq) {
            return Err(self.syntax_error(format!(
                "Expected ';' or '=' after declaration of variable '{}'.",
                name.lexeme
            )));
        }

        let value = self.parse_expr()?;
        self.cursor.expect(TokenKind::Semicolon)?;
        let target = Node::new(NodeKind::Var(id), name.pos);
        Ok(Some(Node::binary(BinaryOp::Assign, target, value, name.pos)))
    }

    /// `if ( expr ) statement [else statement]`
    fn parse_if(&mut self) -> CompileResult<Node> {
        let pos = self.cursor.advance().pos;
        self.cursor
            .expect_or(TokenKind::LParen, "If commands must be followed by a '('.")?;
        let cond = self.parse_expr()?;
        self.cursor.expect(TokenKind::RParen)?;

        let then_branch = self.parse_branch(pos)?;
        let else_branch = if self.cursor.eat(TokenKind::Else) {
            Some(Box::new(self.parse_branch(pos)?))
        } else {
            None
        };

        Ok(Node::new(
            NodeKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch,
            },
            pos,
        ))
    }

    /// `while ( expr ) statement`
    fn parse_while(&mut self) -> CompileResult<Node> {
        let pos = self.cursor.advance().pos;
        self.cursor
            .expect_or(TokenKind::LParen, "While commands must be followed by a '('.")?;
        let cond = self.parse_expr()?;
        self.cursor.expect(TokenKind::RParen)?;
        let body = self.parse_branch(pos)?;

        Ok(Node::new(
            NodeKind::While {
                cond: Box::new(cond),
                body: Box::new(body),
            },
            pos,
        ))
    }

    /// The body of an `if`, `else` or `while`. An empty statement becomes an
    /// empty block.
    fn parse_branch(&mut self, owner: SourcePos) -> CompileResult<Node> {
        Ok(self
            .parse_statement()?
            .unwrap_or_else(|| Node::block(owner)))
    }

    /// `{ statement* }` in a fresh scope.
    pub(crate) fn parse_block(&mut self) -> CompileResult<Node> {
        let open = self
            .cursor
            .expect_or(TokenKind::LBrace, "Statement blocks must start with '{'.")?;
        self.symbols.push_scope();

        let mut stmts = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            if let Some(stmt) = self.parse_statement()? {
                push_statement(&mut stmts, stmt)?;
            }
        }

        self.cursor
            .expect_or(TokenKind::RBrace, "Statement blocks must end with '}'.")?;
        self.symbols.pop_scope()?;
        Ok(Node::new(NodeKind::Block(stmts), open.pos))
    }
}
