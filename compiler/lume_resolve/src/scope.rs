//! Lexical scopes tracked while resolving.

use lume_ir::{Name, Span};
use rustc_hash::FxHashMap;

/// Index into the resolver's class table.
pub(crate) type ClassId = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    /// Host-registered names. Always the bottom scope.
    Prelude,
    /// Field names of the enclosing class, visible inside its methods.
    Fields,
    /// Boundary of a function, lambda, method or the top-level unit.
    Function,
    Block,
}

/// Everything known about one declared name.
#[derive(Clone, Debug)]
pub(crate) struct VariableInfo {
    pub read_only: bool,
    /// `None` when the declaring unit uses the dynamic map.
    pub slot: Option<u32>,
    pub used: bool,
    /// Referenced from a nested unit.
    pub captured: bool,
    pub is_field: bool,
    /// Set when the name was bound by a class declaration.
    pub class: Option<ClassId>,
    pub span: Span,
}

impl VariableInfo {
    pub fn new(read_only: bool, slot: Option<u32>, span: Span) -> Self {
        VariableInfo {
            read_only,
            slot,
            used: false,
            captured: false,
            is_field: false,
            class: None,
            span,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Scope {
    pub kind: ScopeKind,
    /// Unit that owns the scope, as an index into the unit stack. `None` for
    /// the prelude and field scopes.
    pub unit: Option<usize>,
    vars: FxHashMap<Name, VariableInfo>,
    order: Vec<Name>,
}

impl Scope {
    pub fn new(kind: ScopeKind, unit: Option<usize>) -> Self {
        Scope {
            kind,
            unit,
            vars: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut VariableInfo> {
        self.vars.get_mut(name)
    }

    /// Insert or replace `name`. Replacement is only used for field scopes,
    /// where a subclass field overrides an inherited one.
    pub fn insert(&mut self, name: Name, info: VariableInfo) {
        if self.vars.insert(name.clone(), info).is_none() {
            self.order.push(name);
        }
    }

    /// Declarations in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &VariableInfo)> {
        self.order
            .iter()
            .filter_map(|name| self.vars.get(name).map(|info| (name, info)))
    }
}

/// Kind of unit being resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum UnitKind {
    TopLevel,
    Function,
    Lambda,
    Method,
    /// A field initializer. Always uses the dynamic map.
    Initializer,
}

impl UnitKind {
    pub fn allows_return(self) -> bool {
        matches!(self, UnitKind::Function | UnitKind::Lambda | UnitKind::Method)
    }
}

/// Per-unit state: storage eligibility, slot allocation and loop nesting.
#[derive(Debug)]
pub(crate) struct UnitState {
    pub kind: UnitKind,
    pub slot_eligible: bool,
    /// Slot order. `locals[i]` names slot `i`.
    pub locals: Vec<Name>,
    pub loop_depth: u32,
}

impl UnitState {
    pub fn new(kind: UnitKind, slot_eligible: bool) -> Self {
        UnitState {
            kind,
            slot_eligible,
            locals: Vec::new(),
            loop_depth: 0,
        }
    }

    /// Next slot for `name`, or `None` under dynamic-map storage.
    pub fn allocate(&mut self, name: &Name) -> Option<u32> {
        if !self.slot_eligible {
            return None;
        }
        let slot = u32::try_from(self.locals.len()).ok()?;
        self.locals.push(name.clone());
        Some(slot)
    }
}

/// A class declaration seen so far, for parent checks and inherited fields.
#[derive(Debug)]
pub(crate) struct ClassInfo {
    pub parent: Option<ClassId>,
    /// Own fields in declaration order.
    pub fields: Vec<Name>,
}
