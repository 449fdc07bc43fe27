//! Evaluator of the executable IR.
//!
//! Every storage and dispatch decision was made by the compiler, so
//! evaluation is one exhaustive match over `Code`. The pieces:
//!
//! - `storage`: the per-unit [`Frame`] and variable access by slot or name
//! - `call`: both calling conventions, constructors and method dispatch
//! - `control`: loops, `try` / `catch` / `finally` and `match`

mod call;
mod control;
mod storage;

use std::rc::Rc;
use std::sync::Arc;

use lume_ir::code::{Access, BlockCode, Code, CodeElement, FunctionCode, ProgramCode};
use lume_ir::{Span, UnaryOp};
use lume_runtime::access::{get_member, index_value};
use lume_runtime::operators::{evaluate_binary, evaluate_numbers, evaluate_unary};
use lume_runtime::{
    invalid_operation, null_reference, thrown, type_mismatch, Callable, ClassValue, Closure,
    ControlAction, EvalError, EvalResult, ExecResult, MapValue, Value,
};
use lume_stack::ensure_sufficient_stack;

use crate::context::ExecutionContext;

pub(crate) use storage::Frame;

/// Attach a position to errors raised by runtime helpers.
trait AtSpan<T> {
    fn at(self, span: Span) -> Result<T, EvalError>;
}

impl<T> AtSpan<T> for Result<T, EvalError> {
    #[inline]
    fn at(self, span: Span) -> Result<T, EvalError> {
        self.map_err(|e| e.or_span(span))
    }
}

pub(crate) struct Interpreter<'ctx> {
    ctx: &'ctx mut ExecutionContext,
}

impl<'ctx> Interpreter<'ctx> {
    pub(crate) fn new(ctx: &'ctx mut ExecutionContext) -> Self {
        Interpreter { ctx }
    }

    /// Run a top-level unit. Map storage defines straight into the globals.
    pub(crate) fn run_program(&mut self, program: &ProgramCode) -> EvalResult {
        let base = self.ctx.globals_scope().clone();
        let mut frame = Frame::new(program.storage.slot_count(), base);
        self.eval(&program.body, &mut frame)
            .map_err(ControlAction::into_eval_error)
    }

    pub(crate) fn eval(&mut self, code: &Code, frame: &mut Frame) -> ExecResult {
        ensure_sufficient_stack(|| self.eval_inner(code, frame))
    }

    fn eval_inner(&mut self, code: &Code, frame: &mut Frame) -> ExecResult {
        match code {
            Code::Constant(literal) => Ok(Value::from_literal(literal)),
            Code::Interpolate(parts) => {
                let mut out = String::new();
                for part in parts {
                    out.push_str(&self.eval(part, frame)?.display_string());
                }
                Ok(Value::string(out))
            }
            Code::List(elements) => Ok(Value::list(self.eval_elements(elements, frame)?)),
            Code::Map(entries) => {
                let mut map = MapValue::with_capacity(entries.len());
                for (key, value) in entries {
                    let value = self.eval(value, frame)?;
                    map.insert(key.clone(), value);
                }
                Ok(Value::map(map))
            }

            Code::Load { access, span } => Ok(self.load(access, frame).at(*span)?),
            Code::This { span } => Ok(frame
                .receiver
                .clone()
                .ok_or_else(|| null_reference("this"))
                .at(*span)?),
            Code::Declare {
                pattern,
                value,
                span,
            } => {
                let value = self.eval(value, frame)?;
                frame.bind_pattern(pattern, value).at(*span)?;
                Ok(Value::Null)
            }
            Code::Assign {
                target,
                op,
                value,
                span,
            } => self.eval_assign(target, *op, value, *span, frame),
            Code::Update {
                target,
                op,
                prefix,
                span,
            } => self.eval_update(target, *op, *prefix, *span, frame),

            Code::NumBinary {
                op,
                left,
                right,
                span,
            } => {
                let left = self.eval(left, frame)?;
                let right = self.eval(right, frame)?;
                let result = match (left, right) {
                    (Value::Number(a), Value::Number(b)) => evaluate_numbers(a, b, *op),
                    (left, right) => evaluate_binary(left, right, *op),
                };
                Ok(result.at(*span)?)
            }
            Code::NumNeg(operand) => match self.eval(operand, frame)? {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Ok(evaluate_unary(&other, UnaryOp::Neg)?),
            },
            Code::Binary {
                op,
                left,
                right,
                span,
            } => {
                let left = self.eval(left, frame)?;
                let right = self.eval(right, frame)?;
                Ok(evaluate_binary(left, right, *op).at(*span)?)
            }
            Code::And(left, right) => {
                if !self.eval(left, frame)?.is_truthy() {
                    return Ok(Value::FALSE);
                }
                Ok(Value::boolean(self.eval(right, frame)?.is_truthy()))
            }
            Code::Or(left, right) => {
                if self.eval(left, frame)?.is_truthy() {
                    return Ok(Value::TRUE);
                }
                Ok(Value::boolean(self.eval(right, frame)?.is_truthy()))
            }
            Code::Unary { op, operand, span } => {
                let value = self.eval(operand, frame)?;
                Ok(evaluate_unary(&value, *op).at(*span)?)
            }

            Code::Call { callee, args, span } => {
                let callee = self.eval(callee, frame)?;
                let args = self.eval_elements(args, frame)?;
                Ok(self.call_value(&callee, args, *span)?)
            }
            Code::MethodCall {
                object,
                method,
                args,
                span,
            } => {
                let receiver = self.eval(object, frame)?;
                let args = self.eval_elements(args, frame)?;
                Ok(self.call_method(&receiver, method, args, *span)?)
            }
            Code::SuperCall { method, args, span } => {
                let args = self.eval_elements(args, frame)?;
                Ok(self.call_super(method, args, *span, frame)?)
            }
            Code::Member { object, name, span } => {
                let object = self.eval(object, frame)?;
                Ok(get_member(&object, name).at(*span)?)
            }
            Code::Index {
                object,
                index,
                span,
            } => {
                let object = self.eval(object, frame)?;
                let index = self.eval(index, frame)?;
                Ok(index_value(&object, &index).at(*span)?)
            }

            Code::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(cond, frame)?.is_truthy() {
                    self.eval(then_branch, frame)
                } else if let Some(else_branch) = else_branch {
                    self.eval(else_branch, frame)
                } else {
                    Ok(Value::Null)
                }
            }
            Code::While { cond, body } => self.eval_while(cond, body, frame),
            Code::For {
                target,
                iterable,
                body,
                scoped,
                span,
            } => self.eval_for(target, iterable, body, *scoped, *span, frame),
            Code::Block(block) => self.eval_block(block, frame),

            Code::Lambda(function) => Ok(make_closure(function, frame)),
            Code::DefineFunction { target, function } => {
                let closure = make_closure(function, frame);
                frame.define(target, closure);
                Ok(Value::Null)
            }
            Code::DefineClass {
                target,
                class,
                parent,
                span,
            } => {
                let parent = match parent {
                    Some(access) => Some(self.load_class(access, frame).at(*span)?),
                    None => None,
                };
                let value = ClassValue::new(Arc::clone(class), parent, frame.env.current());
                frame.define(target, Value::class(Rc::new(value)));
                Ok(Value::Null)
            }

            Code::Try {
                body,
                catch,
                finally,
            } => self.eval_try(body, catch.as_ref(), finally.as_deref(), frame),
            Code::Throw { value, span } => {
                let value = self.eval(value, frame)?;
                Err(thrown(value).with_span(*span).into())
            }
            Code::Range {
                start,
                end,
                inclusive,
                span,
            } => {
                let start = self.eval(start, frame)?;
                let end = self.eval(end, frame)?;
                Ok(range(&start, &end, *inclusive).at(*span)?)
            }
            Code::Match {
                subject,
                arms,
                scoped,
                span,
            } => self.eval_match(subject, arms, *scoped, *span, frame),

            Code::Return(value) => {
                let value = match value {
                    Some(value) => self.eval(value, frame)?,
                    None => Value::Null,
                };
                Err(ControlAction::Return(value))
            }
            Code::Break => Err(ControlAction::Break),
            Code::Continue => Err(ControlAction::Continue),
            // Async bodies already ran to completion when called.
            Code::Await(value) => self.eval(value, frame),
        }
    }

    fn eval_block(&mut self, block: &BlockCode, frame: &mut Frame) -> ExecResult {
        if !block.scoped {
            return self.eval_block_body(block, frame);
        }
        frame.env.push_scope();
        let result = self.eval_block_body(block, frame);
        frame.env.pop_scope();
        result
    }

    fn eval_block_body(&mut self, block: &BlockCode, frame: &mut Frame) -> ExecResult {
        for stmt in &block.stmts {
            self.eval(stmt, frame)?;
        }
        match &block.tail {
            Some(tail) => self.eval(tail, frame),
            None => Ok(Value::Null),
        }
    }

    /// Arguments and list items, with spreads flattened.
    fn eval_elements(
        &mut self,
        elements: &[CodeElement],
        frame: &mut Frame,
    ) -> Result<Vec<Value>, ControlAction> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                CodeElement::Item(code) => values.push(self.eval(code, frame)?),
                CodeElement::Spread(code) => match self.eval(code, frame)? {
                    Value::List(items) => values.extend(items.borrow().iter().cloned()),
                    other => return Err(type_mismatch("list", other.type_name()).into()),
                },
            }
        }
        Ok(values)
    }

    fn load_class(
        &self,
        access: &Access,
        frame: &Frame,
    ) -> Result<Rc<ClassValue>, EvalError> {
        match self.load(access, frame)? {
            Value::Function(Callable::Class(class)) => Ok(class),
            other => Err(type_mismatch("class", other.type_name())),
        }
    }
}

/// Closures capture the innermost scope, and inside methods also the
/// receiver, so `this` and fields keep working from nested functions.
fn make_closure(function: &Arc<FunctionCode>, frame: &Frame) -> Value {
    Value::closure(Closure {
        code: Arc::clone(function),
        env: frame.env.current(),
        receiver: frame.receiver.clone(),
        super_class: frame.super_class.clone(),
    })
}

/// Longest list a range may produce.
const MAX_RANGE_LEN: usize = 1 << 24;

/// Every integer up to this magnitude is exact in `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// `start..end` as a list of numbers stepping by one.
fn range(start: &Value, end: &Value, inclusive: bool) -> EvalResult {
    let (start, end) = match (start, end) {
        (Value::Number(a), Value::Number(b)) => (*a, *b),
        (Value::Number(_), other) | (other, _) => {
            return Err(type_mismatch("number", other.type_name()));
        }
    };
    if !start.is_finite() || !end.is_finite() {
        return Err(invalid_operation("range bounds must be finite"));
    }
    let distance = end - start;
    let count = if inclusive {
        (distance.floor() + 1.0).max(0.0)
    } else {
        distance.ceil().max(0.0)
    };
    if count > MAX_RANGE_LEN as f64 {
        return Err(invalid_operation(format!(
            "range of {count} elements exceeds the limit of {MAX_RANGE_LEN}"
        )));
    }
    if count > 1.0 && (start.abs() > MAX_EXACT_INTEGER || end.abs() > MAX_EXACT_INTEGER) {
        return Err(invalid_operation("range bounds are too large to step by one"));
    }
    let items = (0..count as usize)
        .map(|i| Value::Number(start + i as f64))
        .collect();
    Ok(Value::list(items))
}
