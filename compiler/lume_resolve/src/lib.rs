//! Scope and slot resolution.
//!
//! The resolver walks a parsed [`Program`] once and fills in every
//! annotation the compiler needs:
//!
//! - each [`VarRef`](lume_ir::ast::VarRef) gets a [`Resolution`](lume_ir::ast::Resolution):
//!   local (with its slot, if any), outer, class field or prelude global
//! - each declaration gets its slot index, or `None` for dynamic-map storage
//! - each function and the top-level unit get a [`UnitInfo`](lume_ir::ast::UnitInfo)
//!   recording whether the unit is slot-eligible and its locals in slot order
//!
//! A unit is slot-eligible when its own body declares no nested function,
//! lambda or class. Captured variables therefore always live in dynamic
//! scopes that outlive the call that created them.
//!
//! Errors are accumulated for the whole program. Compilation only accepts a
//! [`ResolvedProgram`], which exists only when no error was found.

mod eligibility;
mod errors;
mod resolver;
mod scope;


use lume_ir::ast::Program;
use lume_ir::{Mutability, Name};

pub use errors::{ResolveError, ResolveErrorKind};

use resolver::Resolver;

/// Names the resolver treats as already declared: the built-in prelude and
/// anything a host registered on its execution context.
#[derive(Clone, Debug, Default)]
pub struct Prelude {
    names: Vec<(Name, Mutability)>,
}

impl Prelude {
    pub fn new() -> Self {
        Prelude::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<Name>, mutability: Mutability) -> Self {
        self.insert(name.into(), mutability);
        self
    }

    /// Add or replace `name`.
    pub fn insert(&mut self, name: Name, mutability: Mutability) {
        match self.names.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = mutability,
            None => self.names.push((name, mutability)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|(n, _)| &**n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, Mutability)> {
        self.names.iter().map(|(n, m)| (n, *m))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(Name, Mutability)> for Prelude {
    fn from_iter<I: IntoIterator<Item = (Name, Mutability)>>(iter: I) -> Self {
        let mut prelude = Prelude::new();
        for (name, mutability) in iter {
            prelude.insert(name, mutability);
        }
        prelude
    }
}

/// The annotated program together with every error found.
#[derive(Clone, Debug)]
pub struct ResolveOutput {
    pub program: Program,
    pub errors: Vec<ResolveError>,
}

impl ResolveOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The program, if resolution succeeded.
    pub fn into_resolved(self) -> Result<ResolvedProgram, Vec<ResolveError>> {
        if self.errors.is_empty() {
            Ok(ResolvedProgram {
                program: self.program,
            })
        } else {
            Err(self.errors)
        }
    }
}

/// A program that resolved without errors. Only [`ResolveOutput::into_resolved`]
/// creates one.
#[derive(Clone, Debug)]
pub struct ResolvedProgram {
    program: Program,
}

impl ResolvedProgram {
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn into_program(self) -> Program {
        self.program
    }
}

/// Resolve `program` against `prelude`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve(mut program: Program, prelude: &Prelude) -> ResolveOutput {
    let mut resolver = Resolver::new(prelude);
    resolver.resolve_program(&mut program);
    let errors = resolver.into_errors();
    tracing::debug!(
        errors = errors.len(),
        slot_eligible = program.unit.slot_eligible,
        "resolved program"
    );
    ResolveOutput { program, errors }
}
