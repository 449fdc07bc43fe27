//! Runtime values.
//!
//! `Value` is a tagged union with one variant per runtime kind. Operators
//! match on it exhaustively (see `crate::operators`); nothing inspects types
//! any other way.
//!
//! Heap payloads are only built through the factory methods:
//!
//! ```text
//! let s = Value::string("hello");
//! let xs = Value::list(vec![Value::Number(1.0)]);
//! ```
//!
//! # Booleans
//!
//! Booleans are inline, and every boolean-producing operation returns
//! [`Value::TRUE`] or [`Value::FALSE`] via [`Value::boolean`]. Two evaluations
//! of `3 < 5` are therefore the same instance under [`Value::same`] and never
//! allocate.

mod callable;
mod class;
mod heap;

use std::fmt::{self, Write as _};
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;
use lume_ir::{Literal, Name};
use lume_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use crate::Shared;

pub use callable::{Callable, Closure, NativeFn, NativeFunction};
pub use class::{ClassValue, Instance};
pub use heap::Heap;

/// Contents of a map value: insertion-ordered string keys.
pub type MapValue = IndexMap<Name, Value>;

#[derive(Clone)]
pub enum Value {
    Number(f64),
    Str(Heap<str>),
    Bool(bool),
    Null,
    List(Shared<Vec<Value>>),
    Map(Shared<MapValue>),
    Instance(Rc<Instance>),
    Function(Callable),
}

// Factory methods

impl Value {
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);

    /// The canonical boolean for `b`.
    #[inline]
    pub const fn boolean(b: bool) -> Value {
        if b {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    #[inline]
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(Heap::from_arc(s.into()))
    }

    /// String value sharing a name's storage.
    #[inline]
    pub fn from_name(name: &Name) -> Self {
        Value::Str(Heap::from_arc(Arc::clone(name.as_arc())))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Shared::new(items))
    }

    #[inline]
    pub fn map(entries: MapValue) -> Self {
        Value::Map(Shared::new(entries))
    }

    pub fn native(native: NativeFunction) -> Self {
        Value::Function(Callable::Native(native))
    }

    pub fn closure(closure: Closure) -> Self {
        Value::Function(Callable::Closure(Rc::new(closure)))
    }

    pub fn class(class: Rc<ClassValue>) -> Self {
        Value::Function(Callable::Class(class))
    }

    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::Number(n) => Value::Number(*n),
            Literal::Str(s) => Value::from_name(s),
            Literal::Bool(b) => Value::boolean(*b),
            Literal::Null => Value::Null,
        }
    }
}

// Inspection

impl Value {
    /// Only `false` and `null` are falsy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Null => false,
            _ => true,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the runtime kind, used in error messages and `type_of`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Instance(_) => "instance",
            Value::Function(Callable::Class(_)) => "class",
            Value::Function(_) => "function",
        }
    }

    /// Identity comparison.
    ///
    /// Booleans and `null` are canonical, so equal ones are always the same.
    /// Numbers are the same when their bits are. Heap values are the same
    /// only when they share storage.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// The display string used by `print`, interpolation and `+`.
    pub fn display_string(&self) -> String {
        self.to_string()
    }
}

/// Language equality: values of different kinds are never equal, equal kinds
/// compare by value, instances and callables by identity.
///
/// A list or map may contain itself. A pair of containers met again while
/// comparing is assumed equal, so cyclic values compare structurally and the
/// walk terminates.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        values_equal(self, other, &mut FxHashSet::default())
    }
}

type SeenPairs = FxHashSet<(*const (), *const ())>;

fn values_equal(left: &Value, right: &Value, seen: &mut SeenPairs) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        (Value::List(a), Value::List(b)) => {
            if a.ptr_eq(b) || !seen.insert((a.addr(), b.addr())) {
                return true;
            }
            let (a, b) = (a.borrow(), b.borrow());
            a.len() == b.len()
                && a.iter().zip(b.iter()).all(|(x, y)| {
                    ensure_sufficient_stack(|| values_equal(x, y, seen))
                })
        }
        (Value::Map(a), Value::Map(b)) => {
            if a.ptr_eq(b) || !seen.insert((a.addr(), b.addr())) {
                return true;
            }
            let (a, b) = (a.borrow(), b.borrow());
            a.len() == b.len()
                && a.iter().all(|(key, x)| {
                    b.get(key).is_some_and(|y| {
                        ensure_sufficient_stack(|| values_equal(x, y, seen))
                    })
                })
        }
        (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
        (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
        _ => false,
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

/// Numbers print with a fractional part: `55.0`, `0.5`, `-3.0`.
pub(crate) fn write_number(f: &mut impl fmt::Write, n: f64) -> fmt::Result {
    write!(f, "{n:?}")
}

/// Containers being written, outermost first. A container already on the
/// path is written as a placeholder instead of recursing into itself.
type DisplayPath = Vec<*const ()>;

/// Nested strings are quoted so `["a"]` and `[a]` print differently.
fn write_nested(f: &mut fmt::Formatter<'_>, value: &Value, path: &mut DisplayPath) -> fmt::Result {
    match value {
        Value::Str(s) => write!(f, "{:?}", &**s),
        other => ensure_sufficient_stack(|| write_value(f, other, path)),
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, path: &mut DisplayPath) -> fmt::Result {
    match value {
        Value::Number(n) => write_number(f, *n),
        Value::Str(s) => f.write_str(s),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Null => f.write_str("null"),
        Value::List(items) => {
            let addr = items.addr();
            if path.contains(&addr) {
                return f.write_str("[...]");
            }
            path.push(addr);
            let result = write_list(f, &items.borrow(), path);
            path.pop();
            result
        }
        Value::Map(entries) => {
            let addr = entries.addr();
            if path.contains(&addr) {
                return f.write_str("{...}");
            }
            path.push(addr);
            let result = write_map(f, &entries.borrow(), path);
            path.pop();
            result
        }
        Value::Instance(instance) => {
            let addr = Rc::as_ptr(instance).cast::<()>();
            if path.contains(&addr) {
                return write!(f, "{} {{...}}", instance.class().name());
            }
            path.push(addr);
            let result = write_instance(f, instance, path);
            path.pop();
            result
        }
        Value::Function(callable) => write!(f, "{callable:?}"),
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value], path: &mut DisplayPath) -> fmt::Result {
    f.write_char('[')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_nested(f, item, path)?;
    }
    f.write_char(']')
}

fn write_map(
    f: &mut fmt::Formatter<'_>,
    entries: &MapValue,
    path: &mut DisplayPath,
) -> fmt::Result {
    f.write_char('{')?;
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}: ")?;
        write_nested(f, value, path)?;
    }
    f.write_char('}')
}

fn write_instance(
    f: &mut fmt::Formatter<'_>,
    instance: &Instance,
    path: &mut DisplayPath,
) -> fmt::Result {
    let fields = instance.fields();
    write!(f, "{} {{", instance.class().name())?;
    if fields.is_empty() {
        return f.write_char('}');
    }
    for (i, (name, value)) in fields.iter().enumerate() {
        f.write_str(if i > 0 { ", " } else { " " })?;
        write!(f, "{name}: ")?;
        write_nested(f, value, path)?;
    }
    f.write_str(" }")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut DisplayPath::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", &**s),
            other => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests;
