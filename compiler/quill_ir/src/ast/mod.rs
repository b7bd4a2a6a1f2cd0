//! Typed AST.
//!
//! The tree is a closed sum type: every query (`is_return`, `may_return`,
//! `value_type`, `first_pos`, `can_assign`) is an exhaustive match over
//! [`NodeKind`]. Each child is a `Box<Node>` owned by exactly one parent.
//!
//! Types are never cached on nodes; `value_type` recomputes from children and
//! the symbol table. The type checker is the only phase that mutates a built
//! tree, and only by wrapping a child slot in a conversion node.
//!
//! Every recursive query runs under [`ensure_sufficient_stack`], and `Node`
//! drops its subtree with an explicit worklist, so a long operator chain
//! never exhausts the native stack.

mod operators;

pub use operators::{Assoc, BinaryOp, UnaryOp};

use quill_stack::ensure_sufficient_stack;

use crate::{IrError, SourcePos, SymbolId, SymbolTable, Type};

/// An AST node with its source position.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub pos: SourcePos,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// `{ stmt* }`. Build through [`push_statement`] to keep the
    /// unreachable-code invariant.
    Block(Vec<Node>),
    If {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    While {
        cond: Box<Node>,
        body: Box<Node>,
    },
    Return(Box<Node>),
    Break,
    Continue,
    /// Implicit or explicit conversion to `double`.
    ToDouble(Box<Node>),
    /// Implicit or explicit conversion to `int`.
    ToInt(Box<Node>),
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    /// Character literal, stored as its byte value.
    CharLit(u8),
    IntLit(i32),
    FloatLit(f64),
    Var(SymbolId),
}

impl Node {
    #[inline]
    pub fn new(kind: NodeKind, pos: SourcePos) -> Self {
        Node { kind, pos }
    }

    pub fn block(pos: SourcePos) -> Self {
        Node::new(NodeKind::Block(Vec::new()), pos)
    }

    pub fn binary(op: BinaryOp, lhs: Node, rhs: Node, pos: SourcePos) -> Self {
        Node::new(
            NodeKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            pos,
        )
    }

    pub fn unary(op: UnaryOp, operand: Node, pos: SourcePos) -> Self {
        Node::new(
            NodeKind::Unary {
                op,
                operand: Box::new(operand),
            },
            pos,
        )
    }

    /// Does this node guarantee control never falls through past it?
    pub fn is_return(&self) -> bool {
        ensure_sufficient_stack(|| match &self.kind {
            NodeKind::Return(_) => true,
            NodeKind::Block(stmts) => stmts.last().is_some_and(Node::is_return),
            NodeKind::If {
                then_branch,
                else_branch: Some(else_branch),
                ..
            } => then_branch.is_return() && else_branch.is_return(),
            // A loop body may run zero times.
            NodeKind::If { .. }
            | NodeKind::While { .. }
            | NodeKind::Break
            | NodeKind::Continue
            | NodeKind::ToDouble(_)
            | NodeKind::ToInt(_)
            | NodeKind::Unary { .. }
            | NodeKind::Binary { .. }
            | NodeKind::CharLit(_)
            | NodeKind::IntLit(_)
            | NodeKind::FloatLit(_)
            | NodeKind::Var(_) => false,
        })
    }

    /// Does some path through this node return?
    pub fn may_return(&self) -> bool {
        ensure_sufficient_stack(|| match &self.kind {
            NodeKind::Return(_) => true,
            NodeKind::Block(stmts) => stmts.iter().any(Node::may_return),
            NodeKind::If {
                then_branch,
                else_branch,
                ..
            } => then_branch.may_return() || else_branch.as_ref().is_some_and(|e| e.may_return()),
            NodeKind::While { body, .. } => body.may_return(),
            NodeKind::Break
            | NodeKind::Continue
            | NodeKind::ToDouble(_)
            | NodeKind::ToInt(_)
            | NodeKind::Unary { .. }
            | NodeKind::Binary { .. }
            | NodeKind::CharLit(_)
            | NodeKind::IntLit(_)
            | NodeKind::FloatLit(_)
            | NodeKind::Var(_) => false,
        })
    }

    /// The static type of the value this node leaves behind.
    pub fn value_type(&self, symbols: &SymbolTable) -> Type {
        ensure_sufficient_stack(|| match &self.kind {
            NodeKind::Block(stmts) => stmts
                .last()
                .map_or(Type::Void, |last| last.value_type(symbols)),
            NodeKind::If { then_branch, .. } => then_branch.value_type(symbols),
            NodeKind::While { body, .. } => body.value_type(symbols),
            NodeKind::Return(expr) => expr.value_type(symbols),
            NodeKind::Break | NodeKind::Continue => Type::Void,
            NodeKind::ToDouble(_) => Type::Double,
            NodeKind::ToInt(_) => Type::Int,
            NodeKind::Unary { op, operand } => match op {
                UnaryOp::Neg => operand.value_type(symbols),
                UnaryOp::Not => Type::Int,
                UnaryOp::Sqrt => Type::Double,
            },
            NodeKind::Binary { op, lhs, rhs } => {
                if *op == BinaryOp::Assign {
                    lhs.value_type(symbols)
                } else if op.yields_int() {
                    Type::Int
                } else {
                    let l = lhs.value_type(symbols);
                    let r = rhs.value_type(symbols);
                    l.wider(&r).clone()
                }
            }
            NodeKind::CharLit(_) => Type::Char,
            NodeKind::IntLit(_) => Type::Int,
            NodeKind::FloatLit(_) => Type::Double,
            NodeKind::Var(id) => symbols.type_of(*id).clone(),
        })
    }

    /// Earliest source position anywhere in this subtree.
    pub fn first_pos(&self) -> SourcePos {
        ensure_sufficient_stack(|| self.first_pos_inner())
    }

    fn first_pos_inner(&self) -> SourcePos {
        let children_min = match &self.kind {
            NodeKind::Block(stmts) => stmts.iter().map(Node::first_pos).min(),
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let mut first = cond.first_pos().min(then_branch.first_pos());
                if let Some(else_branch) = else_branch {
                    first = first.min(else_branch.first_pos());
                }
                Some(first)
            }
            NodeKind::While { cond, body } => Some(cond.first_pos().min(body.first_pos())),
            NodeKind::Binary { lhs, rhs, .. } => Some(lhs.first_pos().min(rhs.first_pos())),
            NodeKind::Return(child)
            | NodeKind::ToDouble(child)
            | NodeKind::ToInt(child)
            | NodeKind::Unary { operand: child, .. } => Some(child.first_pos()),
            NodeKind::Break
            | NodeKind::Continue
            | NodeKind::CharLit(_)
            | NodeKind::IntLit(_)
            | NodeKind::FloatLit(_)
            | NodeKind::Var(_) => None,
        };
        children_min.map_or(self.pos, |first| first.min(self.pos))
    }

    /// Only variable references may appear on the left of `=`.
    pub fn can_assign(&self) -> bool {
        matches!(self.kind, NodeKind::Var(_))
    }

    /// Replace this node, in place, with a `ToDouble` wrapping it.
    pub fn wrap_to_double(&mut self) {
        self.wrap_with(NodeKind::ToDouble);
    }

    /// Replace this node, in place, with a `ToInt` wrapping it.
    pub fn wrap_to_int(&mut self) {
        self.wrap_with(NodeKind::ToInt);
    }

    fn wrap_with(&mut self, make: fn(Box<Node>) -> NodeKind) {
        let pos = self.pos;
        let inner = std::mem::replace(self, Node::new(NodeKind::Break, pos));
        *self = Node::new(make(Box::new(inner)), pos);
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(&mut self.kind, &mut pending);
        // Each popped node has no children left when its own drop runs.
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node.kind, &mut pending);
        }
    }
}

/// Move every child of `kind` into `out`, leaving `kind` a leaf.
fn detach_children(kind: &mut NodeKind, out: &mut Vec<Node>) {
    match kind {
        NodeKind::Block(stmts) => out.append(stmts),
        NodeKind::If { .. }
        | NodeKind::While { .. }
        | NodeKind::Return(_)
        | NodeKind::ToDouble(_)
        | NodeKind::ToInt(_)
        | NodeKind::Unary { .. }
        | NodeKind::Binary { .. } => {
            match std::mem::replace(kind, NodeKind::Break) {
                NodeKind::If {
                    cond,
                    then_branch,
                    else_branch,
                } => {
                    out.push(*cond);
                    out.push(*then_branch);
                    out.extend(else_branch.map(|node| *node));
                }
                NodeKind::While { cond, body } => {
                    out.push(*cond);
                    out.push(*body);
                }
                NodeKind::Binary { lhs, rhs, .. } => {
                    out.push(*lhs);
                    out.push(*rhs);
                }
                NodeKind::Return(child)
                | NodeKind::ToDouble(child)
                | NodeKind::ToInt(child)
                | NodeKind::Unary { operand: child, .. } => out.push(*child),
                NodeKind::Block(_)
                | NodeKind::Break
                | NodeKind::Continue
                | NodeKind::CharLit(_)
                | NodeKind::IntLit(_)
                | NodeKind::FloatLit(_)
                | NodeKind::Var(_) => {}
            }
        }
        NodeKind::Break
        | NodeKind::Continue
        | NodeKind::CharLit(_)
        | NodeKind::IntLit(_)
        | NodeKind::FloatLit(_)
        | NodeKind::Var(_) => {}
    }
}

/// Append a statement to a block's statement list.
///
/// Anything appended after a statement that guarantees a return can never
/// run, so it is rejected at the new statement's first position.
pub fn push_statement(stmts: &mut Vec<Node>, stmt: Node) -> Result<(), IrError> {
    if stmts.last().is_some_and(Node::is_return) {
        return Err(IrError::UnreachableCode {
            pos: stmt.first_pos(),
        });
    }
    stmts.push(stmt);
    Ok(())
}

/// A function definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    /// Symbol of the function itself (global scope).
    pub id: SymbolId,
    pub params: Vec<SymbolId>,
    /// Every local declared anywhere in the body, flattened across scopes.
    pub locals: Vec<SymbolId>,
    /// Always a `Block`.
    pub body: Node,
    pub pos: SourcePos,
}

impl Function {
    /// Declared return type, from the function's signature.
    pub fn return_type(&self, symbols: &SymbolTable) -> Type {
        symbols
            .type_of(self.id)
            .return_type()
            .cloned()
            .unwrap_or_default()
    }
}

/// A whole program: functions in declaration order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Module {
    pub functions: Vec<Function>,
}
