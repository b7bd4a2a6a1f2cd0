//! Expression parsing by precedence climbing.

use quill_diagnostic::{CompileResult, Diagnostic, ErrorCode};
use quill_ir::{Assoc, BinaryOp, Node, NodeKind, TokenKind, UnaryOp};
use quill_stack::ensure_sufficient_stack;

use crate::Parser;

/// Loosest level; every binary operator fits under it.
const MAX_PRECEDENCE: u8 = BinaryOp::Assign.precedence();

impl Parser<'_> {
    /// Parse a full expression, assignment included.
    pub(crate) fn parse_expr(&mut self) -> CompileResult<Node> {
        self.parse_expr_within(MAX_PRECEDENCE)
    }

    /// Parse an expression whose operators bind at `limit` or tighter.
    fn parse_expr_within(&mut self, limit: u8) -> CompileResult<Node> {
        ensure_sufficient_stack(|| self.parse_expr_inner(limit))
    }

    fn parse_expr_inner(&mut self, limit: u8) -> CompileResult<Node> {
        let mut lhs = self.parse_term()?;
        // Level of a non-associative operator just folded at this depth.
        let mut blocked: Option<u8> = None;

        while let Some(op) = self.match_binary_op() {
            let level = op.precedence();
            if level > limit {
                break;
            }
            let op_token = self.cursor.peek();
            if blocked == Some(level) {
                return Err(Diagnostic::error(ErrorCode::E1003)
                    .at(op_token.pos)
                    .with_message(format!(
                        "Operator '{}' is non-associative.",
                        op.as_symbol()
                    )));
            }
            self.cursor.advance();

            let next_limit = match op.assoc() {
                Assoc::Right => level,
                Assoc::Left | Assoc::NonAssoc => level - 1,
            };
            let rhs = self.parse_expr_within(next_limit)?;
            lhs = Node::binary(op, lhs, rhs, op_token.pos);
            blocked = (op.assoc() == Assoc::NonAssoc).then_some(level);
        }

        Ok(lhs)
    }

    fn match_binary_op(&self) -> Option<BinaryOp> {
        match self.cursor.peek_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Rem),
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            TokenKind::AmpAmp => Some(BinaryOp::And),
            TokenKind::PipePipe => Some(BinaryOp::Or),
            TokenKind::Eq => Some(BinaryOp::Assign),
            _ => None,
        }
    }

    /// Parse a unary term: prefix operators, a primary, and an optional
    /// `: type` conversion suffix.
    fn parse_term(&mut self) -> CompileResult<Node> {
        ensure_sufficient_stack(|| self.parse_term_inner())
    }

    fn parse_term_inner(&mut self) -> CompileResult<Node> {
        let token = self.cursor.advance();
        let pos = token.pos;

        let node = match token.kind {
            // Unary plus is a no-op.
            TokenKind::Plus => return self.parse_term(),
            TokenKind::Minus => return Ok(Node::unary(UnaryOp::Neg, self.parse_term()?, pos)),
            TokenKind::Bang => return Ok(Node::unary(UnaryOp::Not, self.parse_term()?, pos)),
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.cursor.expect(TokenKind::RParen)?;
                inner
            }
            TokenKind::Ident => {
                let id = self.symbols.resolve(&token.lexeme, pos)?;
                Node::new(NodeKind::Var(id), pos)
            }
            TokenKind::Int => {
                let value = token.lexeme.parse::<i32>().map_err(|_| {
                    Diagnostic::error(ErrorCode::E0003)
                        .at(pos)
                        .with_message(format!(
                            "Integer literal '{}' is out of range.",
                            token.lexeme
                        ))
                })?;
                Node::new(NodeKind::IntLit(value), pos)
            }
            TokenKind::Float => {
                let value = token.lexeme.parse::<f64>().map_err(|_| {
                    Diagnostic::error(ErrorCode::E1002)
                        .at(pos)
                        .with_message(format!("Invalid float literal '{}'.", token.lexeme))
                })?;
                Node::new(NodeKind::FloatLit(value), pos)
            }
            TokenKind::Char => {
                let value = quill_lexer::char_value(&token.lexeme).ok_or_else(|| {
                    Diagnostic::error(ErrorCode::E0001)
                        .at(pos)
                        .with_message(format!("Malformed character literal {}", token.lexeme))
                })?;
                Node::new(NodeKind::CharLit(value), pos)
            }
            TokenKind::Sqrt => {
                self.cursor
                    .expect_or(TokenKind::LParen, "'sqrt' must be followed by '('.")?;
                let arg = self.parse_expr()?;
                self.cursor.expect(TokenKind::RParen)?;
                Node::unary(UnaryOp::Sqrt, arg, pos)
            }
            TokenKind::Eof => {
                return Err(Diagnostic::error(ErrorCode::E1002)
                    .at(pos)
                    .with_message("Expected an expression, but found end of file."));
            }
            _ => {
                return Err(Diagnostic::error(ErrorCode::E1002)
                    .at(pos)
                    .with_message(format!("Unexpected token '{}'", token.lexeme)));
            }
        };

        self.parse_cast_suffix(node)
    }

    /// `term : double` or `term : int`.
    fn parse_cast_suffix(&mut self, node: Node) -> CompileResult<Node> {
        if !self.cursor.eat(TokenKind::Colon) {
            return Ok(node);
        }
        let type_token = self
            .cursor
            .expect_or(TokenKind::Type, "Expected a type specified after ':'.")?;
        let pos = node.pos;
        let kind = match type_token.lexeme.as_str() {
            "double" => NodeKind::ToDouble(Box::new(node)),
            "int" => NodeKind::ToInt(Box::new(node)),
            "char" => {
                return Err(Diagnostic::error(ErrorCode::E1005)
                    .at(type_token.pos)
                    .with_message("Explicit conversion to 'char' is not supported."));
            }
            other => return Err(Self::unsupported_type(other, type_token.pos)),
        };
        Ok(Node::new(kind, pos))
    }
}
