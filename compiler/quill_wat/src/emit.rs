//! Node emission.
//!
//! Every emitter returns the type of the value it left on the WASM stack, or
//! `None` if it left nothing. Callers that need a value go through
//! [`emit_value`]; callers that do not drop it through [`emit_discard`].

use quill_diagnostic::{internal_error, CompileResult, Diagnostic, ErrorCode};
use quill_ir::{BinaryOp, Node, NodeKind, SourcePos, SymbolId, Type, UnaryOp};
use quill_stack::ensure_sufficient_stack;

use crate::context::CodegenContext;

/// The WAT value type for `ty`; only numeric types have one.
pub(crate) fn wat_type(ty: &Type, pos: SourcePos) -> CompileResult<&'static str> {
    ty.wat()
        .ok_or_else(|| internal_error(pos, format!("type {ty} has no WAT representation")))
}

/// Emit `node`, which must leave a value; returns the value's type.
pub(crate) fn emit_value(ctx: &mut CodegenContext<'_>, node: &Node) -> CompileResult<Type> {
    emit_node(ctx, node)?.ok_or_else(|| internal_error(node.pos, "expression produced no value"))
}

/// Emit `node` for its effects only, dropping any value it leaves.
pub(crate) fn emit_discard(ctx: &mut CodegenContext<'_>, node: &Node) -> CompileResult<()> {
    if emit_node(ctx, node)?.is_some() {
        ctx.drop_value();
    }
    Ok(())
}

fn emit_node(ctx: &mut CodegenContext<'_>, node: &Node) -> CompileResult<Option<Type>> {
    ensure_sufficient_stack(|| emit_node_inner(ctx, node))
}

fn emit_node_inner(ctx: &mut CodegenContext<'_>, node: &Node) -> CompileResult<Option<Type>> {
    match &node.kind {
        NodeKind::Block(stmts) => emit_block(ctx, stmts),
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        } => emit_if(ctx, node, cond, then_branch, else_branch.as_deref()),
        NodeKind::While { cond, body } => emit_while(ctx, cond, body),
        NodeKind::Return(value) => {
            emit_value(ctx, value)?;
            if !ctx.is_final_node() {
                ctx.code("(return)").comment("Halt and return value.");
            }
            Ok(None)
        }
        NodeKind::Break => {
            let label = ctx.break_label().map(str::to_owned).ok_or_else(|| {
                Diagnostic::error(ErrorCode::E3003)
                    .at(node.pos)
                    .with_message("No loop for `break` to exit.")
            })?;
            ctx.code(format!("(br {label})")).comment("'break' command.");
            Ok(None)
        }
        NodeKind::Continue => {
            let label = ctx.continue_label().map(str::to_owned).ok_or_else(|| {
                Diagnostic::error(ErrorCode::E3003)
                    .at(node.pos)
                    .with_message("No loop for `continue` to operate on.")
            })?;
            ctx.code(format!("(br {label})")).comment("'continue' command.");
            Ok(None)
        }
        NodeKind::ToDouble(child) => {
            if !emit_value(ctx, child)?.is_double() {
                ctx.code("(f64.convert_i32_s)").comment("Convert to double.");
            }
            Ok(Some(Type::Double))
        }
        NodeKind::ToInt(child) => {
            if emit_value(ctx, child)?.is_double() {
                ctx.code("(i32.trunc_f64_s)").comment("Convert to int.");
            }
            Ok(Some(Type::Int))
        }
        NodeKind::Unary { op, operand } => emit_unary(ctx, node, *op, operand),
        NodeKind::Binary { op, lhs, rhs } => emit_binary(ctx, node, *op, lhs, rhs),
        NodeKind::CharLit(value) => {
            ctx.code(format!("(i32.const {value})"))
                .comment(format!("Put char {:?} on the stack", char::from(*value)));
            Ok(Some(Type::Char))
        }
        NodeKind::IntLit(value) => {
            ctx.code(format!("(i32.const {value})"))
                .comment(format!("Put a {value} on the stack"));
            Ok(Some(Type::Int))
        }
        NodeKind::FloatLit(value) => {
            ctx.code(format!("(f64.const {value})"))
                .comment(format!("Put a {value} on the stack"));
            Ok(Some(Type::Double))
        }
        NodeKind::Var(id) => Ok(Some(emit_get(ctx, *id))),
    }
}

fn emit_get(ctx: &mut CodegenContext<'_>, id: SymbolId) -> Type {
    let symbols = ctx.symbols;
    ctx.code(format!("(local.get {})", CodegenContext::var_name(id)))
        .comment(format!("Place var '{}' onto stack", symbols.name_of(id)));
    symbols.type_of(id).clone()
}

/// Statements in order; only the last inherits the final-node flag.
fn emit_block(ctx: &mut CodegenContext<'_>, stmts: &[Node]) -> CompileResult<Option<Type>> {
    let is_final = ctx.is_final_node();
    ctx.set_final_node(false);
    for (i, stmt) in stmts.iter().enumerate() {
        if i + 1 == stmts.len() {
            ctx.set_final_node(is_final);
        }
        emit_discard(ctx, stmt)?;
    }
    Ok(None)
}

fn emit_if(
    ctx: &mut CodegenContext<'_>,
    node: &Node,
    cond: &Node,
    then_branch: &Node,
    else_branch: Option<&Node>,
) -> CompileResult<Option<Type>> {
    ctx.comment_line("Test condition for if.");
    emit_value(ctx, cond)?;

    // In final position both branches leave the function's result.
    let header = if ctx.is_final_node() {
        let ty = wat_type(&node.value_type(ctx.symbols), node.pos)?;
        format!("(if (result {ty})")
    } else {
        "(if".to_owned()
    };
    ctx.code(header)
        .comment("Execute code based on result of condition.")
        .indent(2)
        .code("(then")
        .comment("'then' block")
        .indent(2);
    emit_discard(ctx, then_branch)?;
    ctx.dedent(2).code(")").comment("End 'then'");

    if let Some(else_branch) = else_branch {
        ctx.code("(else").comment("'else' block").indent(2);
        emit_discard(ctx, else_branch)?;
        ctx.dedent(2).code(")").comment("End 'else'");
    }

    ctx.dedent(2).code(")").comment("End 'if'");
    Ok(None)
}

/// `(block $exitN (loop $loopN ...))`. The body may run again, so nothing
/// inside it is in final position.
fn emit_while(
    ctx: &mut CodegenContext<'_>,
    cond: &Node,
    body: &Node,
) -> CompileResult<Option<Type>> {
    let was_final = ctx.is_final_node();
    ctx.set_final_node(false);

    let exit = ctx.make_label("$exit");
    let head = ctx.make_label("$loop");
    ctx.push_loop(exit.clone(), head.clone());

    ctx.code(format!("(block {exit}"))
        .comment("Outer block for breaking while loop.")
        .code(format!("  (loop {head}"))
        .comment("Inner loop for continuing while.")
        .indent(4)
        .comment_line("WHILE Test condition...");
    emit_value(ctx, cond)?;
    ctx.code("(i32.eqz)")
        .comment("Invert the result of the test condition.")
        .code(format!("(br_if {exit})"))
        .comment("If condition is false (0), exit the loop")
        .comment_line("WHILE Loop body...");
    emit_discard(ctx, body)?;
    ctx.comment_line("WHILE start next loop.")
        .code(format!("(br {head})"))
        .comment("Jump back to the start of the loop")
        .dedent(4)
        .code("  )")
        .comment("End loop")
        .code(")")
        .comment("End block");

    ctx.pop_loop();
    ctx.set_final_node(was_final);
    Ok(None)
}

fn emit_unary(
    ctx: &mut CodegenContext<'_>,
    node: &Node,
    op: UnaryOp,
    operand: &Node,
) -> CompileResult<Option<Type>> {
    let ty = match op {
        UnaryOp::Neg => {
            // The zero goes below the operand, so its type is needed first.
            let ty = node.value_type(ctx.symbols);
            let wat = wat_type(&ty, node.pos)?;
            ctx.code(format!("({wat}.const 0)"))
                .comment("Setup unary negation");
            emit_value(ctx, operand)?;
            ctx.code(format!("({wat}.sub)")).comment("Unary negation.");
            ty
        }
        UnaryOp::Not => {
            emit_value(ctx, operand)?;
            ctx.code("(i32.eqz)").comment("Boolean NOT.");
            Type::Int
        }
        UnaryOp::Sqrt => {
            emit_value(ctx, operand)?;
            ctx.code("(f64.sqrt)").comment("Square root.");
            Type::Double
        }
    };
    Ok(Some(ty))
}

fn emit_binary(
    ctx: &mut CodegenContext<'_>,
    node: &Node,
    op: BinaryOp,
    lhs: &Node,
    rhs: &Node,
) -> CompileResult<Option<Type>> {
    let ty = match op {
        BinaryOp::Assign => emit_assign(ctx, node, lhs, rhs)?,
        BinaryOp::And => emit_and(ctx, lhs, rhs)?,
        BinaryOp::Or => emit_or(ctx, lhs, rhs)?,
        _ => {
            let lhs_ty = emit_value(ctx, lhs)?;
            let rhs_ty = emit_value(ctx, rhs)?;
            let wat = wat_type(&lhs_ty, lhs.pos)?;
            let instr = instruction(op, wat).ok_or_else(|| {
                internal_error(node.pos, format!("no instruction for '{}'", op.as_symbol()))
            })?;
            ctx.code(format!("({instr})"))
                .comment(format!("Stack2 {} Stack1", op.as_symbol()));
            if op.yields_int() {
                Type::Int
            } else {
                lhs_ty.wider(&rhs_ty).clone()
            }
        }
    };
    Ok(Some(ty))
}

/// Instruction for an arithmetic or comparison operator on `ty` operands.
/// Integer division, remainder and ordering are signed.
fn instruction(op: BinaryOp, ty: &str) -> Option<String> {
    let (name, signed) = match op {
        BinaryOp::Mul => ("mul", false),
        BinaryOp::Div => ("div", true),
        BinaryOp::Rem => ("rem", true),
        BinaryOp::Add => ("add", false),
        BinaryOp::Sub => ("sub", false),
        BinaryOp::Lt => ("lt", true),
        BinaryOp::LtEq => ("le", true),
        BinaryOp::Gt => ("gt", true),
        BinaryOp::GtEq => ("ge", true),
        BinaryOp::Eq => ("eq", false),
        BinaryOp::NotEq => ("ne", false),
        BinaryOp::And | BinaryOp::Or | BinaryOp::Assign => return None,
    };
    Some(if signed && ty == "i32" {
        format!("{ty}.{name}_s")
    } else {
        format!("{ty}.{name}")
    })
}

/// Store, then read back: assignment is an expression.
fn emit_assign(
    ctx: &mut CodegenContext<'_>,
    node: &Node,
    lhs: &Node,
    rhs: &Node,
) -> CompileResult<Type> {
    let NodeKind::Var(id) = lhs.kind else {
        return Err(internal_error(
            node.pos,
            "left-hand-side of assignment must be a variable",
        ));
    };
    emit_value(ctx, rhs)?;
    let symbols = ctx.symbols;
    ctx.code(format!("(local.set {})", CodegenContext::var_name(id)))
        .comment(format!("Set var '{}' from stack", symbols.name_of(id)));
    Ok(emit_get(ctx, id))
}

/// Short-circuit `&&`, normalized to 0 or 1.
fn emit_and(ctx: &mut CodegenContext<'_>, lhs: &Node, rhs: &Node) -> CompileResult<Type> {
    ctx.comment_line("Setup the && operation");
    emit_value(ctx, lhs)?;
    ctx.code("(if (result i32)")
        .comment("Setup for && operator")
        .code("  (then")
        .indent(4);
    emit_value(ctx, rhs)?;
    ctx.code("(i32.const 0)")
        .comment("Put a zero on the stack for comparison")
        .code("(i32.ne)")
        .comment("Set any non-zero value to one.")
        .dedent(4)
        .code("  )")
        .code("  (else")
        .code("    (i32.const 0)")
        .comment("First clause of && was false.")
        .code("  )")
        .code(")")
        .comment_line("End of && operation");
    Ok(Type::Int)
}

/// Short-circuit `||`, normalized to 0 or 1.
fn emit_or(ctx: &mut CodegenContext<'_>, lhs: &Node, rhs: &Node) -> CompileResult<Type> {
    ctx.comment_line("Setup the || operation");
    emit_value(ctx, lhs)?;
    ctx.code("(if (result i32)")
        .comment("Setup for || operator")
        .code("  (then")
        .code("    (i32.const 1)")
        .comment("First clause of || was true.")
        .code("  )")
        .code("  (else")
        .indent(4);
    emit_value(ctx, rhs)?;
    ctx.code("(i32.const 0)")
        .comment("Put a zero on the stack for comparison")
        .code("(i32.ne)")
        .comment("Set any non-zero value to one.")
        .dedent(4)
        .code("  )")
        .code(")")
        .comment_line("End of || operation");
    Ok(Type::Int)
}
