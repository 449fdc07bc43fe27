//! Compiled functions, classes and programs.

use super::{Code, Target};
use crate::{Name, Span};
use std::sync::Arc;

/// Local storage strategy of one unit.
#[derive(Clone, Debug, PartialEq)]
pub enum Storage {
    /// Locals live in an array. `locals[i]` names slot `i`.
    Slots { locals: Vec<Name> },
    /// Locals live in a dynamic name-keyed scope.
    Map,
}

impl Storage {
    pub fn slot_count(&self) -> usize {
        match self {
            Storage::Slots { locals } => locals.len(),
            Storage::Map => 0,
        }
    }

    pub fn uses_slots(&self) -> bool {
        matches!(self, Storage::Slots { .. })
    }
}

/// A compiled function, lambda or method.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCode {
    pub name: Name,
    pub params: Vec<ParamCode>,
    pub rest: Option<Target>,
    pub storage: Storage,
    pub body: Code,
    pub is_async: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParamCode {
    pub name: Name,
    pub target: Target,
    pub default: Option<Code>,
}

impl FunctionCode {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether an exact positional call can write its arguments straight
    /// into the local array, skipping default and rest handling.
    pub fn accepts_fast_call(&self) -> bool {
        self.storage.uses_slots()
            && self.rest.is_none()
            && self
                .params
                .iter()
                .all(|p| p.default.is_none() && matches!(p.target, Target::Slot(_)))
    }
}

/// A compiled class declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassCode {
    pub name: Name,
    /// Own fields in declaration order.
    pub fields: Vec<FieldCode>,
    pub methods: Vec<Arc<FunctionCode>>,
    pub span: Span,
}

impl ClassCode {
    pub fn method(&self, name: &str) -> Option<&Arc<FunctionCode>> {
        self.methods.iter().find(|m| &*m.name == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldCode {
    pub name: Name,
    /// Evaluated per instance in a dynamic scope over the class's environment.
    pub init: Option<Code>,
}

/// A compiled top-level unit.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgramCode {
    pub storage: Storage,
    pub body: Code,
}
