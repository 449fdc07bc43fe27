//! Dynamic-map storage.
//!
//! Units that are not slot-eligible keep their locals in a chain of
//! [`Scope`]s. Closures capture the current scope handle, so a captured
//! binding lives as long as any closure that can still see it.

use std::fmt;

use lume_ir::{Mutability, Name};
use rustc_hash::FxHashMap;

use crate::{Shared, Value};

/// Error returned by `Scope::assign`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The binding exists but is read-only.
    Immutable,
    /// No scope in the chain binds the name.
    Undefined,
}

#[derive(Clone)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

/// One level of name bindings with a link to the enclosing level.
#[derive(Clone, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Binding>,
    parent: Option<Shared<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: Shared<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Define or redefine `name` in this scope.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value, mutability: Mutability) {
        self.bindings.insert(name, Binding { value, mutability });
    }

    /// Look `name` up here, then in each enclosing scope.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.value.clone());
        }
        let mut current = self.parent.clone();
        while let Some(scope) = current {
            let scope = scope.borrow();
            if let Some(binding) = scope.bindings.get(name) {
                return Some(binding.value.clone());
            }
            current = scope.parent.clone();
        }
        None
    }

    /// Assign to the nearest binding of `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.bindings.get_mut(name) {
            return Self::store(binding, value);
        }
        let mut current = self.parent.clone();
        while let Some(scope) = current {
            let mut guard = scope.borrow_mut();
            if let Some(binding) = guard.bindings.get_mut(name) {
                return Self::store(binding, value);
            }
            current = guard.parent.clone();
        }
        Err(AssignError::Undefined)
    }

    fn store(binding: &mut Binding, value: Value) -> Result<(), AssignError> {
        if !binding.mutability.is_mutable() {
            return Err(AssignError::Immutable);
        }
        binding.value = value;
        Ok(())
    }

    /// Binding in this scope only.
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).map(|b| b.value.clone())
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name).map(|b| b.value)
    }

    /// Bindings of this scope, sorted by name.
    pub fn bindings(&self) -> Vec<(Name, Value, Mutability)> {
        let mut out: Vec<_> = self
            .bindings
            .iter()
            .map(|(name, b)| (name.clone(), b.value.clone(), b.mutability))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.bindings.keys().map(Name::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Scope")
            .field("names", &names)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// The scope stack of one executing unit.
///
/// The base scope is the closure's captured scope (or the globals for the
/// top level). Blocks of map-storage units push and pop scopes above it.
pub struct Environment {
    scopes: Vec<Shared<Scope>>,
    base: Shared<Scope>,
}

impl Environment {
    pub fn new(base: Shared<Scope>) -> Self {
        Environment {
            scopes: Vec::new(),
            base,
        }
    }

    /// Number of scopes pushed above the base.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current();
        self.scopes.push(Shared::new(Scope::with_parent(parent)));
    }

    /// Pop the innermost pushed scope. The base is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Handle to the innermost scope, as captured by closures.
    #[inline]
    pub fn current(&self) -> Shared<Scope> {
        self.current_ref().clone()
    }

    #[inline]
    fn current_ref(&self) -> &Shared<Scope> {
        self.scopes.last().unwrap_or(&self.base)
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value, mutability: Mutability) {
        self.current_ref()
            .borrow_mut()
            .define(name, value, mutability);
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current_ref().borrow().lookup(name)
    }

    #[inline]
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        self.current_ref().borrow_mut().assign(name, value)
    }
}
