//! The resolving walk.
//!
//! One depth-first pass over the tree. Scopes live on a stack; units
//! (top level, functions, lambdas, methods, field initializers) live on a
//! second stack so that a reference can tell whether it crossed a unit
//! boundary. Slots are handed out at declaration time because eligibility
//! is known up front from the prescan.

mod expr;
mod stmt;

use lume_ir::ast::{Resolution, VarDecl, VarRef};
use lume_ir::{Mutability, Name, Span};

use crate::errors::{ResolveError, ResolveErrorKind};
use crate::scope::{ClassId, ClassInfo, Scope, ScopeKind, UnitKind, UnitState, VariableInfo};
use crate::Prelude;

/// Result of looking a name up through the scope chain.
#[derive(Copy, Clone, Debug)]
struct Lookup {
    resolution: Resolution,
    read_only: bool,
    class: Option<ClassId>,
}

/// Innermost enclosing class declaration.
#[derive(Copy, Clone, Debug)]
struct ClassContext {
    has_parent: bool,
}

pub(crate) struct Resolver {
    scopes: Vec<Scope>,
    units: Vec<UnitState>,
    classes: Vec<ClassInfo>,
    class_stack: Vec<ClassContext>,
    errors: Vec<ResolveError>,
}

impl Resolver {
    pub(crate) fn new(prelude: &Prelude) -> Self {
        let mut globals = Scope::new(ScopeKind::Prelude, None);
        for (name, mutability) in prelude.iter() {
            let mut info = VariableInfo::new(!mutability.is_mutable(), None, Span::DUMMY);
            info.used = true;
            globals.insert(name.clone(), info);
        }
        Resolver {
            scopes: vec![globals],
            units: Vec::new(),
            classes: Vec::new(),
            class_stack: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn into_errors(self) -> Vec<ResolveError> {
        self.errors
    }

    #[cold]
    fn error(&mut self, kind: ResolveErrorKind, span: Span) {
        self.errors.push(ResolveError::new(kind, span));
    }

    // Units

    fn push_unit(&mut self, kind: UnitKind, slot_eligible: bool) {
        self.units.push(UnitState::new(kind, slot_eligible));
    }

    fn pop_unit(&mut self) -> Option<UnitState> {
        self.units.pop()
    }

    fn current_unit(&self) -> Option<&UnitState> {
        self.units.last()
    }

    fn current_unit_mut(&mut self) -> Option<&mut UnitState> {
        self.units.last_mut()
    }

    // Scopes

    fn push_scope(&mut self, kind: ScopeKind) {
        let unit = match kind {
            ScopeKind::Prelude | ScopeKind::Fields => None,
            ScopeKind::Function | ScopeKind::Block => self.units.len().checked_sub(1),
        };
        self.scopes.push(Scope::new(kind, unit));
    }

    fn pop_scope(&mut self) {
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        if matches!(scope.kind, ScopeKind::Function | ScopeKind::Block) {
            for (name, info) in scope.iter() {
                if !info.used && !name.starts_with('_') {
                    tracing::debug!(
                        name = %name,
                        line = info.span.line,
                        column = info.span.column,
                        "unused local"
                    );
                }
            }
        }
    }

    fn current_scope_mut(&mut self) -> Option<&mut Scope> {
        self.scopes.last_mut()
    }

    // Declarations and references

    /// Declare a name in the current scope and record its slot in `decl`.
    fn declare(&mut self, decl: &mut VarDecl, mutability: Mutability) {
        self.declare_with_class(decl, mutability, None);
    }

    fn declare_with_class(
        &mut self,
        decl: &mut VarDecl,
        mutability: Mutability,
        class: Option<ClassId>,
    ) {
        let duplicate = self
            .scopes
            .last()
            .is_some_and(|scope| scope.contains(&decl.name));
        if duplicate {
            self.error(
                ResolveErrorKind::VariableAlreadyDeclared {
                    name: decl.name.clone(),
                },
                decl.span,
            );
            return;
        }
        let slot = self
            .current_unit_mut()
            .and_then(|unit| unit.allocate(&decl.name));
        decl.slot = slot;
        let mut info = VariableInfo::new(!mutability.is_mutable(), slot, decl.span);
        info.class = class;
        if let Some(scope) = self.current_scope_mut() {
            scope.insert(decl.name.clone(), info);
        }
    }

    /// Search the scope chain, innermost first, marking the binding used and,
    /// when the reference crosses a unit boundary, captured.
    fn lookup(&mut self, name: &str) -> Option<Lookup> {
        let current_unit = self.units.len().checked_sub(1);
        for scope in self.scopes.iter_mut().rev() {
            let kind = scope.kind;
            let owner = scope.unit;
            let Some(info) = scope.get_mut(name) else {
                continue;
            };
            info.used = true;
            let resolution = match kind {
                ScopeKind::Prelude => Resolution::Global,
                ScopeKind::Fields => Resolution::Field,
                ScopeKind::Function | ScopeKind::Block if owner == current_unit => {
                    Resolution::Local { slot: info.slot }
                }
                ScopeKind::Function | ScopeKind::Block => {
                    info.captured = true;
                    Resolution::Outer
                }
            };
            return Some(Lookup {
                resolution,
                read_only: info.read_only && !info.is_field,
                class: info.class,
            });
        }
        None
    }

    /// Resolve a read of `var`.
    fn reference(&mut self, var: &mut VarRef) -> Option<Lookup> {
        let found = self.lookup(&var.name);
        match found {
            Some(lookup) => var.resolution = lookup.resolution,
            None => self.error(
                ResolveErrorKind::UndefinedVariable {
                    name: var.name.clone(),
                },
                var.span,
            ),
        }
        found
    }

    /// Resolve a write to `var`.
    fn assign(&mut self, var: &mut VarRef) {
        if let Some(lookup) = self.reference(var) {
            if lookup.read_only {
                self.error(
                    ResolveErrorKind::CannotAssignToLet {
                        name: var.name.clone(),
                    },
                    var.span,
                );
            }
        }
    }

    // Classes

    fn register_class(&mut self, parent: Option<ClassId>, fields: Vec<Name>) -> ClassId {
        self.classes.push(ClassInfo { parent, fields });
        self.classes.len() - 1
    }

    /// Fields visible in `class`: inherited ones first, root class first.
    fn all_fields(&self, class: ClassId) -> Vec<Name> {
        let mut chain = Vec::new();
        let mut current = Some(class);
        while let Some(id) = current {
            if chain.contains(&id) {
                break;
            }
            chain.push(id);
            current = self.classes.get(id).and_then(|info| info.parent);
        }
        chain
            .iter()
            .rev()
            .filter_map(|id| self.classes.get(*id))
            .flat_map(|info| info.fields.iter().cloned())
            .collect()
    }

    fn enclosing_class(&self) -> Option<ClassContext> {
        self.class_stack.last().copied()
    }
}
