//! Execution context: globals, call stack and print handler.
//!
//! A context runs one top-level execution at a time and may be reused for
//! the next one. Its globals persist between runs, which is what a REPL
//! relies on: names defined by one input are visible to the next, because
//! [`ExecutionContext::prelude`] hands them to the resolver.

use lume_ir::{Mutability, Name};
use lume_resolve::Prelude;
use lume_runtime::{CallStack, NativeFunction, Scope, Shared, Value};

use crate::prelude::builtins;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Call depth allowed when none is configured.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Construction-time settings of an [`ExecutionContext`].
#[derive(Clone)]
pub struct ContextConfig {
    /// `None` disables the limit; the native stack still grows on demand.
    pub max_call_depth: Option<usize>,
    pub print: SharedPrintHandler,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            print: stdout_handler(),
        }
    }
}

pub struct ExecutionContext {
    globals: Shared<Scope>,
    pub(crate) call_stack: CallStack,
    print: SharedPrintHandler,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> Self {
        let mut ctx = ExecutionContext {
            globals: Shared::new(Scope::new()),
            call_stack: CallStack::new(config.max_call_depth),
            print: config.print,
        };
        ctx.install_builtins();
        ctx
    }

    fn install_builtins(&mut self) {
        for native in builtins(&self.print) {
            self.register_native(native);
        }
    }

    /// Seed a global binding before resolution. Redefining a name replaces it.
    pub fn register(&mut self, name: impl Into<Name>, value: Value, mutability: Mutability) {
        self.globals
            .borrow_mut()
            .define(name.into(), value, mutability);
    }

    /// Register a host function as a read-only global.
    pub fn register_native(&mut self, native: NativeFunction) {
        let name = native.name().clone();
        self.register(name, Value::native(native), Mutability::Immutable);
    }

    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get_local(name)
    }

    /// Every global binding, sorted by name.
    pub fn globals(&self) -> Vec<(Name, Value, Mutability)> {
        self.globals.borrow().bindings()
    }

    pub fn remove_global(&mut self, name: &str) -> Option<Value> {
        self.globals.borrow_mut().remove(name)
    }

    /// Drop every global, then reinstall the builtins. Host registrations
    /// are dropped too.
    pub fn clear_globals(&mut self) {
        *self.globals.borrow_mut() = Scope::new();
        self.install_builtins();
        tracing::debug!("globals cleared");
    }

    /// The names the resolver must treat as already declared.
    pub fn prelude(&self) -> Prelude {
        self.globals
            .borrow()
            .bindings()
            .into_iter()
            .map(|(name, _, mutability)| (name, mutability))
            .collect()
    }

    #[inline]
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Output captured by a buffer print handler.
    pub fn output(&self) -> String {
        self.print.get_output()
    }

    pub(crate) fn globals_scope(&self) -> &Shared<Scope> {
        &self.globals
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
