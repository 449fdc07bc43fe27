//! Invocation: closures, natives, constructors and method dispatch.
//!
//! Every invocation pushes one call frame before its body runs and pops it
//! on every exit. Errors leaving a body pick up the backtrace at the
//! innermost frame.

use std::rc::Rc;

use lume_ir::code::Target;
use lume_ir::{Name, Span};
use lume_runtime::access::call_builtin_method;
use lume_runtime::{
    invalid_operation, not_callable, null_reference, undefined_member, wrong_argument_count,
    CallFrame, Callable, ClassValue, Closure, ControlAction, EvalError, EvalResult, ExecResult,
    Instance, NativeFunction, Value,
};
use lume_stack::ensure_sufficient_stack;

use super::{Frame, Interpreter};

impl Interpreter<'_> {
    pub(super) fn call_value(
        &mut self,
        callee: &Value,
        args: Vec<Value>,
        span: Span,
    ) -> EvalResult {
        let Value::Function(callable) = callee else {
            return Err(not_callable(callee.type_name()).or_span(span));
        };
        tracing::trace!(callee = %callable.name(), args = args.len(), "call");
        match callable {
            Callable::Closure(closure) => self.call_closure(closure, args, span),
            Callable::Native(native) => self.call_native(native, &args, span),
            Callable::Class(class) => self.construct(class, args, span),
        }
    }

    pub(super) fn call_closure(
        &mut self,
        closure: &Closure,
        args: Vec<Value>,
        span: Span,
    ) -> EvalResult {
        self.with_call_frame(&closure.code.name, span, |this| {
            ensure_sufficient_stack(|| this.invoke(closure, args))
        })
    }

    fn call_native(&mut self, native: &NativeFunction, args: &[Value], span: Span) -> EvalResult {
        self.with_call_frame(native.name(), span, |_| {
            native.call(args).map_err(|e| e.or_span(span))
        })
    }

    /// Push a frame for `name`, run `body`, pop on every path.
    fn with_call_frame(
        &mut self,
        name: &Name,
        span: Span,
        body: impl FnOnce(&mut Self) -> EvalResult,
    ) -> EvalResult {
        self.ctx
            .call_stack
            .push(CallFrame::new(name.clone(), span))
            .map_err(|e| e.or_span(span))?;
        let result = body(self).map_err(|err| self.attach_backtrace(err));
        self.ctx.call_stack.pop();
        result
    }

    fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if err.trace.is_some() {
            return err;
        }
        err.with_backtrace(self.ctx.call_stack.capture())
    }

    /// Run a closure's body with `args` bound. Absorbs `return`.
    fn invoke(&mut self, closure: &Closure, args: Vec<Value>) -> EvalResult {
        match self.invoke_body(closure, args) {
            Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
            Err(other) => Err(other.into_eval_error()),
        }
    }

    fn invoke_body(&mut self, closure: &Closure, args: Vec<Value>) -> ExecResult {
        let code = &closure.code;
        let mut frame = if closure.receiver.is_none()
            && code.accepts_fast_call()
            && args.len() == code.arity()
        {
            fast_frame(closure, args)
        } else {
            self.bind_arguments(closure, args)?
        };
        self.eval(&code.body, &mut frame)
    }

    /// General calling convention: defaults, rest parameters, map storage
    /// and bound receivers.
    fn bind_arguments(
        &mut self,
        closure: &Closure,
        args: Vec<Value>,
    ) -> Result<Frame, ControlAction> {
        let code = &closure.code;
        if code.rest.is_none() && args.len() > code.arity() {
            return Err(wrong_argument_count(&code.name, code.arity(), args.len()).into());
        }
        let mut frame = Frame::new(code.storage.slot_count(), closure.env.clone());
        frame.receiver = closure.receiver.clone();
        frame.super_class = closure.super_class.clone();
        if !code.storage.uses_slots() {
            frame.env.push_scope();
        }

        let mut args = args.into_iter();
        for param in &code.params {
            let value = match (args.next(), &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval(default, &mut frame)?,
                (None, None) => Value::Null,
            };
            frame.define(&param.target, value);
        }
        if let Some(rest) = &code.rest {
            frame.define(rest, Value::list(args.collect()));
        }
        Ok(frame)
    }

    /// Allocate an instance, run field initializers root class first, then
    /// `init` with the constructor arguments.
    fn construct(&mut self, class: &Rc<ClassValue>, args: Vec<Value>, span: Span) -> EvalResult {
        self.with_call_frame(class.name(), span, |this| {
            ensure_sufficient_stack(|| this.initialize(class, args))
        })
    }

    fn initialize(&mut self, class: &Rc<ClassValue>, args: Vec<Value>) -> EvalResult {
        let instance = Instance::new(Rc::clone(class));
        let receiver = Value::Instance(Rc::clone(&instance));

        for owner in class.lineage() {
            for field in &owner.code.fields {
                let value = match &field.init {
                    Some(init) => {
                        let mut frame = Frame::new(0, owner.env.clone());
                        frame.receiver = Some(receiver.clone());
                        frame.super_class = owner.parent.clone();
                        frame.env.push_scope();
                        self.eval(init, &mut frame)
                            .map_err(ControlAction::into_eval_error)?
                    }
                    None => Value::Null,
                };
                instance.set_field(field.name.clone(), value);
            }
        }

        match class.bind_method("init", receiver.clone()) {
            Some(init) => {
                self.invoke(&init, args)?;
            }
            None if !args.is_empty() => {
                return Err(wrong_argument_count(class.name(), 0, args.len()));
            }
            None => {}
        }
        Ok(receiver)
    }

    /// `receiver.method(args)`: a callable field or map entry, then a class
    /// method, then a builtin.
    pub(super) fn call_method(
        &mut self,
        receiver: &Value,
        method: &Name,
        args: Vec<Value>,
        span: Span,
    ) -> EvalResult {
        match receiver {
            Value::Instance(instance) => {
                if let Some(field) = instance.get_field(method) {
                    return self.call_value(&field, args, span);
                }
                match instance.class().bind_method(method, receiver.clone()) {
                    Some(bound) => self.call_closure(&bound, args, span),
                    None => Err(undefined_member(method, instance.class().name()).with_span(span)),
                }
            }
            Value::Map(entries) => {
                let entry = entries.borrow().get(method).cloned();
                match entry {
                    Some(entry) => self.call_value(&entry, args, span),
                    None => call_builtin(receiver, method, &args, span),
                }
            }
            Value::Null => Err(null_reference(&format!("call to .{method}")).with_span(span)),
            _ => call_builtin(receiver, method, &args, span),
        }
    }

    /// `super.method(args)` from inside a method of a subclass.
    pub(super) fn call_super(
        &mut self,
        method: &Name,
        args: Vec<Value>,
        span: Span,
        frame: &Frame,
    ) -> EvalResult {
        let (Some(receiver), Some(parent)) = (&frame.receiver, &frame.super_class) else {
            return Err(invalid_operation("super outside of a subclass method").with_span(span));
        };
        match parent.bind_method(method, receiver.clone()) {
            Some(bound) => self.call_closure(&bound, args, span),
            None => Err(undefined_member(method, parent.name()).with_span(span)),
        }
    }
}

/// Exact positional call into slot storage: arguments go straight into the
/// parameter slots.
fn fast_frame(closure: &Closure, args: Vec<Value>) -> Frame {
    let code = &closure.code;
    let mut frame = Frame::new(code.storage.slot_count(), closure.env.clone());
    for (param, arg) in code.params.iter().zip(args) {
        if let Target::Slot(index) = param.target {
            frame.set_slot(index, arg);
        }
    }
    frame
}

fn call_builtin(receiver: &Value, method: &Name, args: &[Value], span: Span) -> EvalResult {
    call_builtin_method(receiver, method, args)
        .unwrap_or_else(|| Err(undefined_member(method, receiver.type_name())))
        .map_err(|e| e.or_span(span))
}
