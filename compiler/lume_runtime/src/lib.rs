//! Lume runtime: the pieces every executing program shares.
//!
//! - [`Value`], the tagged value model, with closures, classes and instances
//! - [`Environment`] and [`Scope`], the dynamic-map storage used by units
//!   that are not slot-eligible and by the context's globals
//! - [`CallStack`], pushed and popped around every invocation
//! - [`EvalError`] and [`ControlAction`], runtime failures and the
//!   `return` / `break` / `continue` signals
//! - `operators` and `access`, the dynamic dispatch used whenever the
//!   compiler could not inline an operation
//!
//! # Threading
//!
//! Runtime values use `Rc` and `RefCell`: one execution context runs on one
//! thread. Compiled code (`lume_ir::code`) is the only part shared between
//! contexts.

pub mod access;
mod call_stack;
mod environment;
mod errors;
pub mod operators;
mod shared;
mod value;

pub use call_stack::{CallFrame, CallStack};
pub use environment::{AssignError, Environment, Scope};
pub use errors::{
    cannot_compare, division_by_zero, immutable_assignment, index_out_of_range, invalid_operation,
    key_not_found, no_matching_arm, not_callable, null_reference, stack_overflow, thrown,
    type_mismatch, unbound_variable, undefined_member, wrong_argument_count, BacktraceFrame,
    ControlAction, EvalBacktrace, EvalError, EvalErrorKind, EvalResult, ExecResult,
};
pub use shared::Shared;
pub use value::{
    Callable, ClassValue, Closure, Heap, Instance, MapValue, NativeFn, NativeFunction, Value,
};

pub use lume_ir::{Mutability, Name};
