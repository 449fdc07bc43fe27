//! Dynamic operator dispatch.
//!
//! Used whenever the compiler could not prove both operands numeric. The
//! value set is closed, so dispatch is a match over `(left, right)` kinds.
//! Every boolean result goes through `Value::boolean`.

use std::cmp::Ordering;

use lume_ir::{BinaryOp, UnaryOp, UpdateOp};

use crate::errors::{
    cannot_compare, division_by_zero, invalid_operation, type_mismatch, EvalError, EvalResult,
};
use crate::Value;

/// Evaluate `left op right` for any operand kinds.
///
/// `&&` and `||` are accepted with both operands already evaluated; the
/// interpreter short-circuits them before reaching here.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over freshly evaluated operands"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::boolean(left == right)),
        BinaryOp::NotEq => Ok(Value::boolean(left != right)),
        BinaryOp::And => Ok(Value::boolean(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::boolean(left.is_truthy() || right.is_truthy())),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            if let (Value::Number(a), Value::Number(b)) = (&left, &right) {
                return evaluate_numbers(*a, *b, op);
            }
            let ordering = compare_values(&left, &right)?;
            Ok(Value::boolean(ordering_satisfies(ordering, op)))
        }
        BinaryOp::Add => add(&left, &right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => evaluate_numbers(*a, *b, op),
            _ => Err(arithmetic_mismatch(&left, &right)),
        },
    }
}

/// `a op b` on two numbers with native float semantics.
///
/// Shared by the inlined numeric path and dynamic dispatch, so both agree
/// on every result, including `DivisionByZero` for `/ 0` and `% 0`.
#[inline]
pub fn evaluate_numbers(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Add => Value::Number(a + b),
        BinaryOp::Sub => Value::Number(a - b),
        BinaryOp::Mul => Value::Number(a * b),
        BinaryOp::Div if b == 0.0 => return Err(division_by_zero()),
        BinaryOp::Div => Value::Number(a / b),
        BinaryOp::Mod if b == 0.0 => return Err(division_by_zero()),
        BinaryOp::Mod => Value::Number(a % b),
        BinaryOp::Eq => Value::boolean(a == b),
        BinaryOp::NotEq => Value::boolean(a != b),
        BinaryOp::Lt => Value::boolean(a < b),
        BinaryOp::LtEq => Value::boolean(a <= b),
        BinaryOp::Gt => Value::boolean(a > b),
        BinaryOp::GtEq => Value::boolean(a >= b),
        BinaryOp::And | BinaryOp::Or => {
            return evaluate_binary(Value::Number(a), Value::Number(b), op)
        }
    };
    Ok(value)
}

fn add(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(_), _) | (_, Value::Str(_)) => {
            let mut out = left.display_string();
            out.push_str(&right.display_string());
            Ok(Value::string(out))
        }
        (Value::List(a), Value::List(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        _ => Err(arithmetic_mismatch(left, right)),
    }
}

/// Ordering for `<`, `<=`, `>`, `>=`.
///
/// Numbers compare numerically and strings lexicographically. `null` on
/// either side is an invalid operation; other pairings cannot be compared.
pub fn compare_values(left: &Value, right: &Value) -> Result<Ordering, EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a
            .partial_cmp(b)
            .ok_or_else(|| invalid_operation("cannot order NaN")),
        (Value::Str(a), Value::Str(b)) => Ok((**a).cmp(&**b)),
        (Value::Null, _) | (_, Value::Null) => Err(invalid_operation(format!(
            "cannot compare {} with {}",
            left.type_name(),
            right.type_name()
        ))),
        _ => Err(cannot_compare(left.type_name(), right.type_name())),
    }
}

fn ordering_satisfies(ordering: Ordering, op: BinaryOp) -> bool {
    match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::GtEq => ordering != Ordering::Less,
        _ => false,
    }
}

#[cold]
fn arithmetic_mismatch(left: &Value, right: &Value) -> EvalError {
    let culprit = if matches!(left, Value::Number(_)) {
        right
    } else {
        left
    };
    type_mismatch("number", culprit.type_name())
}

/// Evaluate `-x` or `!x`.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (Value::Number(n), UnaryOp::Neg) => Ok(Value::Number(-n)),
        (_, UnaryOp::Neg) => Err(type_mismatch("number", value.type_name())),
        (_, UnaryOp::Not) => Ok(Value::boolean(!value.is_truthy())),
    }
}

/// New value of the operand of `++` / `--`.
pub fn apply_update(value: &Value, op: UpdateOp) -> EvalResult {
    match value {
        Value::Number(n) => Ok(Value::Number(n + op.delta())),
        other => Err(type_mismatch("number", other.type_name())),
    }
}

#[cfg(test)]
mod tests;
