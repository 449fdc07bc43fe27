//! Slot eligibility prescan.
//!
//! A unit may keep its locals in an indexed array only when its own body
//! declares no nested function, lambda or class. Nested units are not
//! entered: a lambda inside a lambda only affects the outer lambda.

use lume_ir::ast::{
    AssignTarget, Block, Element, Expr, ExprKind, Function, InterpolationPart, Stmt, StmtKind,
};

/// Whether `function` can use slot storage.
pub(crate) fn function_is_slot_eligible(function: &Function) -> bool {
    let defaults_declare = function
        .params
        .iter()
        .filter_map(|p| p.default.as_ref())
        .any(expr_declares_unit);
    !defaults_declare && !block_declares_unit(&function.body)
}

/// Whether the top-level body can use slot storage.
pub(crate) fn program_is_slot_eligible(body: &Block) -> bool {
    !block_declares_unit(body)
}

fn block_declares_unit(block: &Block) -> bool {
    block.stmts.iter().any(stmt_declares_unit)
        || block.tail.as_deref().is_some_and(expr_declares_unit)
}

fn stmt_declares_unit(stmt: &Stmt) -> bool {
    match &stmt.kind {
        StmtKind::Function { .. } | StmtKind::Class(_) => true,
        StmtKind::Let { init, .. } => expr_declares_unit(init),
        StmtKind::Expr(e) => expr_declares_unit(e),
    }
}

fn elements_declare_unit(elements: &[Element]) -> bool {
    elements.iter().any(|e| expr_declares_unit(e.expr()))
}

fn target_declares_unit(target: &AssignTarget) -> bool {
    match target {
        AssignTarget::Var(_) => false,
        AssignTarget::Member { object, .. } => expr_declares_unit(object),
        AssignTarget::Index { object, index } => {
            expr_declares_unit(object) || expr_declares_unit(index)
        }
    }
}

fn expr_declares_unit(expr: &Expr) -> bool {
    lume_stack::ensure_sufficient_stack(|| match &expr.kind {
        ExprKind::Lambda(_) => true,

        ExprKind::Literal(_)
        | ExprKind::Ident(_)
        | ExprKind::This
        | ExprKind::Break
        | ExprKind::Continue => false,

        ExprKind::Interpolation(parts) => parts.iter().any(|part| match part {
            InterpolationPart::Text(_) => false,
            InterpolationPart::Expr(e) => expr_declares_unit(e),
        }),
        ExprKind::List(elements) | ExprKind::SuperCall { args: elements, .. } => {
            elements_declare_unit(elements)
        }
        ExprKind::Map(entries) => entries.iter().any(|(_, e)| expr_declares_unit(e)),
        ExprKind::Assign { target, value, .. } => {
            target_declares_unit(target) || expr_declares_unit(value)
        }
        ExprKind::Update { target, .. } => target_declares_unit(target),
        ExprKind::Binary { left, right, .. } => {
            expr_declares_unit(left) || expr_declares_unit(right)
        }
        ExprKind::Unary { operand, .. } => expr_declares_unit(operand),
        ExprKind::Call { callee, args } => {
            expr_declares_unit(callee) || elements_declare_unit(args)
        }
        ExprKind::Member { object, .. } => expr_declares_unit(object),
        ExprKind::Index { object, index } => {
            expr_declares_unit(object) || expr_declares_unit(index)
        }
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            expr_declares_unit(cond)
                || block_declares_unit(then_branch)
                || else_branch.as_deref().is_some_and(expr_declares_unit)
        }
        ExprKind::While { cond, body } => expr_declares_unit(cond) || block_declares_unit(body),
        ExprKind::For { iterable, body, .. } => {
            expr_declares_unit(iterable) || block_declares_unit(body)
        }
        ExprKind::Block(block) => block_declares_unit(block),
        ExprKind::Try {
            body,
            catch,
            finally,
        } => {
            block_declares_unit(body)
                || catch.as_ref().is_some_and(|c| block_declares_unit(&c.body))
                || finally.as_ref().is_some_and(block_declares_unit)
        }
        ExprKind::Throw(e) | ExprKind::Await(e) => expr_declares_unit(e),
        ExprKind::Range { start, end, .. } => expr_declares_unit(start) || expr_declares_unit(end),
        ExprKind::Match { subject, arms } => {
            expr_declares_unit(subject)
                || arms.iter().any(|arm| {
                    arm.guard.as_ref().is_some_and(expr_declares_unit)
                        || expr_declares_unit(&arm.body)
                })
        }
        ExprKind::Return(value) => value.as_deref().is_some_and(expr_declares_unit),
    })
}
