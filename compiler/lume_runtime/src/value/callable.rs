//! Closures, native functions and the callable wrapper.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use lume_ir::code::FunctionCode;
use lume_ir::Name;

use super::{ClassValue, Value};
use crate::errors::{wrong_argument_count, EvalResult};
use crate::{Scope, Shared};

/// Anything a call expression can invoke.
#[derive(Clone)]
pub enum Callable {
    Closure(Rc<Closure>),
    Native(NativeFunction),
    /// Calling a class constructs an instance.
    Class(Rc<ClassValue>),
}

impl Callable {
    /// Diagnostic name.
    pub fn name(&self) -> &Name {
        match self {
            Callable::Closure(c) => &c.code.name,
            Callable::Native(n) => &n.name,
            Callable::Class(c) => c.name(),
        }
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Closure(a), Callable::Closure(b)) => Rc::ptr_eq(a, b),
            (Callable::Native(a), Callable::Native(b)) => Rc::ptr_eq(&a.func, &b.func),
            (Callable::Class(a), Callable::Class(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A compiled function paired with the scope it was created in.
///
/// The code is shared with every other closure made from the same
/// declaration. Methods additionally carry the bound receiver and the parent
/// class that `super` dispatches through.
pub struct Closure {
    pub code: Arc<FunctionCode>,
    /// Scope the closure captured. Map-storage calls push their own scope on
    /// top of it; slot-storage calls read outer names through it.
    pub env: Shared<Scope>,
    pub receiver: Option<Value>,
    pub super_class: Option<Rc<ClassValue>>,
}

impl Closure {
    pub fn is_bound(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Signature of host-provided functions.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult;

/// A function implemented by the host.
#[derive(Clone)]
pub struct NativeFunction {
    name: Name,
    /// `None` for variadic functions.
    arity: Option<usize>,
    func: Rc<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<Name>,
        arity: Option<usize>,
        func: impl Fn(&[Value]) -> EvalResult + 'static,
    ) -> Self {
        NativeFunction {
            name: name.into(),
            arity,
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn call(&self, args: &[Value]) -> EvalResult {
        if let Some(arity) = self.arity {
            if args.len() != arity {
                return Err(wrong_argument_count(&self.name, arity, args.len()));
            }
        }
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Closure(c) if c.is_bound() => write!(f, "<method {}>", c.code.name),
            Callable::Closure(c) => write!(f, "<fn {}>", c.code.name),
            Callable::Native(n) => write!(f, "<native fn {}>", n.name),
            Callable::Class(c) => write!(f, "<class {}>", c.name()),
        }
    }
}
