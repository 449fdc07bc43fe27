//! Variable storage: slot arrays and dynamic scopes behind one interface.
//!
//! The compiler picked the storage of every access, so `load` / `store` /
//! `define` only dispatch on the `Access` or `Target` they are given.

use std::rc::Rc;

use lume_ir::code::{Access, AssignCode, Code, PatternCode, Target};
use lume_ir::{BinaryOp, Mutability, Span, UpdateOp};
use lume_runtime::access::{get_member, index_value, set_index, set_member};
use lume_runtime::operators::{apply_update, evaluate_binary};
use lume_runtime::{
    immutable_assignment, null_reference, type_mismatch, unbound_variable, AssignError,
    ClassValue, EvalError, EvalResult, Environment, ExecResult, Instance, Scope, Shared, Value,
};
use smallvec::SmallVec;

use super::{AtSpan, Interpreter};

/// Locals of one executing unit.
pub(crate) struct Frame {
    slots: SmallVec<[Value; 8]>,
    pub(super) env: Environment,
    pub(super) receiver: Option<Value>,
    pub(super) super_class: Option<Rc<ClassValue>>,
}

impl Frame {
    pub(crate) fn new(slot_count: usize, base: Shared<Scope>) -> Self {
        Frame {
            slots: SmallVec::from_elem(Value::Null, slot_count),
            env: Environment::new(base),
            receiver: None,
            super_class: None,
        }
    }

    #[inline]
    fn slot(&self, index: u32) -> Value {
        self.slots
            .get(index as usize)
            .cloned()
            .unwrap_or(Value::Null)
    }

    #[inline]
    pub(super) fn set_slot(&mut self, index: u32, value: Value) {
        if let Some(slot) = self.slots.get_mut(index as usize) {
            *slot = value;
        }
    }

    /// Bind a declaration: `let`, `var`, parameters, loop and catch bindings.
    pub(super) fn define(&mut self, target: &Target, value: Value) {
        match target {
            Target::Slot(index) => self.set_slot(*index, value),
            Target::Name { name, mutable } => {
                self.env
                    .define(name.clone(), value, Mutability::from_mutable(*mutable));
            }
        }
    }

    /// Destructure `value` into the targets of `pattern`. Missing elements
    /// and keys bind `null`.
    pub(super) fn bind_pattern(
        &mut self,
        pattern: &PatternCode,
        value: Value,
    ) -> Result<(), EvalError> {
        match pattern {
            PatternCode::Bind(target) => self.define(target, value),
            PatternCode::List { items, rest } => {
                let elements = match &value {
                    Value::List(list) => list.borrow().clone(),
                    Value::Null => return Err(null_reference("list destructuring")),
                    other => return Err(type_mismatch("list", other.type_name())),
                };
                for (i, target) in items.iter().enumerate() {
                    self.define(target, elements.get(i).cloned().unwrap_or(Value::Null));
                }
                if let Some(rest) = rest {
                    let remaining = elements.get(items.len()..).unwrap_or_default().to_vec();
                    self.define(rest, Value::list(remaining));
                }
            }
            PatternCode::Map { entries } => {
                let values: Vec<Value> = match &value {
                    Value::Map(map) => {
                        let map = map.borrow();
                        entries
                            .iter()
                            .map(|(key, _)| map.get(key).cloned().unwrap_or(Value::Null))
                            .collect()
                    }
                    Value::Instance(instance) => entries
                        .iter()
                        .map(|(key, _)| instance.get_field(key).unwrap_or(Value::Null))
                        .collect(),
                    Value::Null => return Err(null_reference("map destructuring")),
                    other => return Err(type_mismatch("map", other.type_name())),
                };
                for ((_, target), value) in entries.iter().zip(values) {
                    self.define(target, value);
                }
            }
        }
        Ok(())
    }

    fn instance_receiver(&self) -> Result<&Rc<Instance>, EvalError> {
        match &self.receiver {
            Some(Value::Instance(instance)) => Ok(instance),
            _ => Err(null_reference("this")),
        }
    }
}

fn assign_error(name: &str, err: AssignError) -> EvalError {
    match err {
        AssignError::Immutable => immutable_assignment(name),
        AssignError::Undefined => unbound_variable(name),
    }
}

impl Interpreter<'_> {
    pub(super) fn load(&self, access: &Access, frame: &Frame) -> EvalResult {
        match access {
            Access::Slot(index) => Ok(frame.slot(*index)),
            Access::Name(name) => frame.env.lookup(name).ok_or_else(|| unbound_variable(name)),
            Access::Global(name) => self.ctx.global(name).ok_or_else(|| unbound_variable(name)),
            // A field read before its initializer ran is still null.
            Access::Field(name) => Ok(frame
                .instance_receiver()?
                .get_field(name)
                .unwrap_or(Value::Null)),
        }
    }

    pub(super) fn store(
        &mut self,
        access: &Access,
        value: Value,
        frame: &mut Frame,
    ) -> Result<(), EvalError> {
        match access {
            Access::Slot(index) => {
                frame.set_slot(*index, value);
                Ok(())
            }
            Access::Name(name) => frame
                .env
                .assign(name, value)
                .map_err(|e| assign_error(name, e)),
            Access::Global(name) => self
                .ctx
                .globals_scope()
                .borrow_mut()
                .assign(name, value)
                .map_err(|e| assign_error(name, e)),
            Access::Field(name) => {
                frame.instance_receiver()?.set_field(name.clone(), value);
                Ok(())
            }
        }
    }

    /// `target = value` and `target op= value`. Evaluates to the stored value.
    pub(super) fn eval_assign(
        &mut self,
        target: &AssignCode,
        op: Option<BinaryOp>,
        value: &Code,
        span: Span,
        frame: &mut Frame,
    ) -> ExecResult {
        match target {
            AssignCode::Var(access) => {
                let current = match op {
                    Some(_) => Some(self.load(access, frame).at(span)?),
                    None => None,
                };
                let rhs = self.eval(value, frame)?;
                let new = combine(current, rhs, op).at(span)?;
                self.store(access, new.clone(), frame).at(span)?;
                Ok(new)
            }
            AssignCode::Member { object, name } => {
                let object = self.eval(object, frame)?;
                let current = match op {
                    Some(_) => Some(get_member(&object, name).at(span)?),
                    None => None,
                };
                let rhs = self.eval(value, frame)?;
                let new = combine(current, rhs, op).at(span)?;
                set_member(&object, name, new.clone()).at(span)?;
                Ok(new)
            }
            AssignCode::Index { object, index } => {
                let object = self.eval(object, frame)?;
                let index = self.eval(index, frame)?;
                let current = match op {
                    Some(_) => Some(index_value(&object, &index).at(span)?),
                    None => None,
                };
                let rhs = self.eval(value, frame)?;
                let new = combine(current, rhs, op).at(span)?;
                set_index(&object, &index, new.clone()).at(span)?;
                Ok(new)
            }
        }
    }

    /// `++` / `--`. Prefix forms evaluate to the new value, postfix to the old.
    pub(super) fn eval_update(
        &mut self,
        target: &AssignCode,
        op: UpdateOp,
        prefix: bool,
        span: Span,
        frame: &mut Frame,
    ) -> ExecResult {
        let (old, new) = match target {
            AssignCode::Var(access) => {
                let old = self.load(access, frame).at(span)?;
                let new = apply_update(&old, op).at(span)?;
                self.store(access, new.clone(), frame).at(span)?;
                (old, new)
            }
            AssignCode::Member { object, name } => {
                let object = self.eval(object, frame)?;
                let old = get_member(&object, name).at(span)?;
                let new = apply_update(&old, op).at(span)?;
                set_member(&object, name, new.clone()).at(span)?;
                (old, new)
            }
            AssignCode::Index { object, index } => {
                let object = self.eval(object, frame)?;
                let index = self.eval(index, frame)?;
                let old = index_value(&object, &index).at(span)?;
                let new = apply_update(&old, op).at(span)?;
                set_index(&object, &index, new.clone()).at(span)?;
                (old, new)
            }
        };
        Ok(if prefix { new } else { old })
    }
}

fn combine(current: Option<Value>, rhs: Value, op: Option<BinaryOp>) -> EvalResult {
    match (current, op) {
        (Some(current), Some(op)) => evaluate_binary(current, rhs, op),
        _ => Ok(rhs),
    }
}
