//! Operand promotion rules for binary operators.

use quill_ir::{BinaryOp, Type};

/// Which operand, if any, needs a conversion wrapper.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Promotion {
    /// Operand types already agree.
    None,
    LhsToInt,
    LhsToDouble,
    RhsToInt,
    RhsToDouble,
}

/// Decide how to reconcile `lhs op rhs`, or `None` if the types are illegal
/// for the operator.
///
/// - `%`, `&&`, `||`: both sides must already be `int`.
/// - `=`: exact match (never a function), or widen the right side into
///   `double` / `int` from `char`.
/// - every other operator: both numeric, narrower side widened to the wider.
pub fn binary_promotion(op: BinaryOp, lhs: &Type, rhs: &Type) -> Option<Promotion> {
    match op {
        BinaryOp::Rem | BinaryOp::And | BinaryOp::Or => {
            (lhs.is_int() && rhs.is_int()).then_some(Promotion::None)
        }
        BinaryOp::Assign => {
            if lhs == rhs && !lhs.is_function() {
                Some(Promotion::None)
            } else if lhs.is_double() && rhs.is_numeric() {
                Some(Promotion::RhsToDouble)
            } else if lhs.is_int() && rhs.is_char() {
                Some(Promotion::RhsToInt)
            } else {
                None
            }
        }
        BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq
        | BinaryOp::Eq
        | BinaryOp::NotEq => align_numeric(lhs, rhs),
    }
}

fn align_numeric(lhs: &Type, rhs: &Type) -> Option<Promotion> {
    if !lhs.is_numeric() || !rhs.is_numeric() {
        return None;
    }
    let promotion = if lhs == rhs {
        Promotion::None
    } else if lhs.is_double() {
        Promotion::RhsToDouble
    } else if rhs.is_double() {
        Promotion::LhsToDouble
    } else if rhs.is_int() {
        Promotion::LhsToInt
    } else {
        Promotion::RhsToInt
    };
    Some(promotion)
}
