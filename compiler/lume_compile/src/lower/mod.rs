//! Syntax tree to executable code.
//!
//! The `Lowerer` keeps a stack with one entry per unit being lowered,
//! recording whether that unit stores locals in slots. Every storage
//! decision below reads the top of that stack.

mod expr;
mod patterns;
mod stmt;

use lume_ir::ast::{Resolution, VarDecl, VarRef};
use lume_ir::code::{Access, Storage, Target};
use lume_ir::Name;

use crate::CompileOptions;

pub(crate) struct Lowerer {
    options: CompileOptions,
    /// Whether each enclosing unit uses slot storage, innermost last.
    units: Vec<bool>,
}

impl Lowerer {
    pub(crate) fn new(options: CompileOptions) -> Self {
        Lowerer {
            options,
            units: Vec::new(),
        }
    }

    fn uses_slots(&self) -> bool {
        self.units.last().copied().unwrap_or(false)
    }

    /// Run `f` with a unit on the stack.
    fn in_unit<R>(&mut self, uses_slots: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        self.units.push(uses_slots);
        let result = f(self);
        self.units.pop();
        result
    }

    /// Nested blocks need their own dynamic scope only under map storage.
    fn scoped(&self) -> bool {
        !self.uses_slots()
    }

    /// Where a declaration stores its value.
    fn target(&self, decl: &VarDecl, mutable: bool) -> Target {
        match decl.slot {
            Some(slot) if self.uses_slots() => Target::Slot(slot),
            _ => Target::Name {
                name: decl.name.clone(),
                mutable,
            },
        }
    }

    /// How a reference reads and writes its variable.
    fn access(&self, var: &VarRef) -> Access {
        match var.resolution {
            Resolution::Local { slot: Some(slot) } if self.uses_slots() => Access::Slot(slot),
            Resolution::Local { .. } | Resolution::Outer | Resolution::Unresolved => {
                Access::Name(var.name.clone())
            }
            Resolution::Field => Access::Field(var.name.clone()),
            Resolution::Global => Access::Global(var.name.clone()),
        }
    }
}

fn storage(uses_slots: bool, locals: &[Name]) -> Storage {
    if uses_slots {
        Storage::Slots {
            locals: locals.to_vec(),
        }
    } else {
        Storage::Map
    }
}
