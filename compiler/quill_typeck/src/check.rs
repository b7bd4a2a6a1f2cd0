use quill_diagnostic::{internal_error, type_mismatch, CompileResult, Diagnostic, ErrorCode};
use quill_ir::{BinaryOp, Node, NodeKind, SourcePos, SymbolId, SymbolTable, Type, UnaryOp};
use quill_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::promote::{binary_promotion, Promotion};

/// Per-function checking state.
pub(crate) struct Checker<'a> {
    symbols: &'a SymbolTable,
    fn_name: &'a str,
    fn_ret: Type,
}

impl<'a> Checker<'a> {
    pub(crate) fn new(symbols: &'a SymbolTable, fn_id: SymbolId) -> Self {
        Checker {
            symbols,
            fn_name: symbols.name_of(fn_id),
            fn_ret: symbols
                .type_of(fn_id)
                .return_type()
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Check `node` and return the type of the value it leaves behind, as
    /// [`Node::value_type`] would compute it after conversions are spliced in.
    pub(crate) fn check(&self, node: &mut Node) -> CompileResult<Type> {
        ensure_sufficient_stack(|| self.check_node(node))
    }

    fn check_node(&self, node: &mut Node) -> CompileResult<Type> {
        let pos = node.pos;
        let ty = match &mut node.kind {
            NodeKind::Block(stmts) => {
                let mut last = Type::Void;
                for stmt in stmts {
                    last = self.check(stmt)?;
                }
                last
            }
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond_ty = self.check(cond)?;
                let then_ty = self.check(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.check(else_branch)?;
                }
                Self::require_int_condition(&cond_ty, "if", pos)?;
                then_ty
            }
            NodeKind::While { cond, body } => {
                let cond_ty = self.check(cond)?;
                let body_ty = self.check(body)?;
                Self::require_int_condition(&cond_ty, "while", cond.pos)?;
                body_ty
            }
            NodeKind::Return(expr) => {
                let ty = self.check(expr)?;
                self.check_return_value(expr, ty, pos)?
            }
            NodeKind::Break | NodeKind::Continue => Type::Void,
            NodeKind::ToDouble(child) => {
                let ty = self.check(child)?;
                Self::require_castable(&ty, &Type::Double, pos)?;
                Type::Double
            }
            NodeKind::ToInt(child) => {
                let ty = self.check(child)?;
                Self::require_castable(&ty, &Type::Int, pos)?;
                Type::Int
            }
            NodeKind::Unary { op, operand } => {
                let ty = self.check(operand)?;
                Self::check_unary(*op, operand, ty, pos)?
            }
            NodeKind::Binary { op, lhs, rhs } => {
                let lhs_ty = self.check(lhs)?;
                let rhs_ty = self.check(rhs)?;

                if *op == BinaryOp::Assign && !lhs.can_assign() {
                    return Err(Diagnostic::error(ErrorCode::E2005)
                        .at(pos)
                        .with_message("Left-hand-side of assignment must be a variable."));
                }

                let promotion = binary_promotion(*op, &lhs_ty, &rhs_ty).ok_or_else(|| {
                    type_mismatch(
                        pos,
                        op.as_symbol(),
                        &lhs_ty.to_string(),
                        &rhs_ty.to_string(),
                    )
                })?;
                if promotion != Promotion::None {
                    trace!(op = op.as_symbol(), ?promotion, "promoting operand");
                }
                match promotion {
                    Promotion::None => {}
                    Promotion::LhsToInt => lhs.wrap_to_int(),
                    Promotion::LhsToDouble => lhs.wrap_to_double(),
                    Promotion::RhsToInt => rhs.wrap_to_int(),
                    Promotion::RhsToDouble => rhs.wrap_to_double(),
                }

                if *op == BinaryOp::Assign {
                    lhs_ty
                } else if op.yields_int() {
                    Type::Int
                } else {
                    lhs_ty.wider(&rhs_ty).clone()
                }
            }
            NodeKind::CharLit(_) => Type::Char,
            NodeKind::IntLit(_) => Type::Int,
            NodeKind::FloatLit(_) => Type::Double,
            NodeKind::Var(id) => {
                if id.index() >= self.symbols.len() {
                    return Err(internal_error(pos, format!("unresolved symbol {id}")));
                }
                self.symbols.type_of(*id).clone()
            }
        };
        Ok(ty)
    }

    fn require_int_condition(ty: &Type, what: &str, pos: SourcePos) -> CompileResult<()> {
        if ty.is_int() {
            return Ok(());
        }
        Err(Diagnostic::error(ErrorCode::E2004)
            .at(pos)
            .with_message(format!(
                "Condition for {what}-statement must evaluate to type int, not {ty}"
            )))
    }

    fn require_castable(ty: &Type, target: &Type, pos: SourcePos) -> CompileResult<()> {
        if ty.castable_to(target) {
            return Ok(());
        }
        Err(Diagnostic::error(ErrorCode::E2007)
            .at(pos)
            .with_message(format!("Cannot convert type {ty} to {target}.")))
    }

    fn check_unary(
        op: UnaryOp,
        operand: &mut Node,
        ty: Type,
        pos: SourcePos,
    ) -> CompileResult<Type> {
        let message = match op {
            UnaryOp::Neg if ty.is_char() || !ty.is_numeric() => {
                format!("Unary operator NEGATE (-) cannot be used on type '{ty}'.")
            }
            UnaryOp::Not if !ty.is_int() => {
                "Unary operator NOT (!) can only be used on 'int' types.".to_owned()
            }
            UnaryOp::Sqrt if !ty.is_numeric() => {
                "Square root (sqrt) must have a numeric argument.".to_owned()
            }
            UnaryOp::Sqrt => {
                if !ty.is_double() {
                    operand.wrap_to_double();
                }
                return Ok(Type::Double);
            }
            UnaryOp::Neg => return Ok(ty),
            UnaryOp::Not => return Ok(Type::Int),
        };
        Err(Diagnostic::error(ErrorCode::E2003)
            .at(pos)
            .with_message(message))
    }

    /// A returned value must convert implicitly to the declared return type;
    /// narrower numerics get the matching conversion. Yields the type the
    /// `return` node carries afterwards.
    fn check_return_value(
        &self,
        expr: &mut Node,
        ty: Type,
        pos: SourcePos,
    ) -> CompileResult<Type> {
        if ty == self.fn_ret {
            return Ok(ty);
        }
        if ty.convertible_to(&self.fn_ret) {
            match self.fn_ret {
                Type::Double => expr.wrap_to_double(),
                Type::Int => expr.wrap_to_int(),
                Type::Void | Type::Char | Type::Function { .. } => return Ok(ty),
            }
            return Ok(self.fn_ret.clone());
        }
        Err(Diagnostic::error(ErrorCode::E2006)
            .at(pos)
            .with_message(format!(
                "Cannot return {ty} from function '{}' returning {}",
                self.fn_name, self.fn_ret
            )))
    }
}
