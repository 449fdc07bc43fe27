//! Executable compiler.
//!
//! Lowers a [`ResolvedProgram`] into [`ProgramCode`], the executable IR in
//! `lume_ir::code`. Lowering makes every decision the evaluator would
//! otherwise repeat on each execution:
//!
//! - **Storage**: each unit uses its slot array or the dynamic map, and each
//!   variable access becomes a slot index, a dynamic name, a prelude global
//!   or a receiver field.
//! - **Operator inlining**: arithmetic and comparisons whose operands are
//!   statically numeric become `NumBinary` / `NumNeg`. Everything else,
//!   string concatenation included, goes through dynamic dispatch.
//! - **Scoping**: only units under dynamic-map storage push scopes for
//!   nested blocks. Slot units resolved shadowing to distinct slots.
//! - **Hoisting**: named functions are defined at the top of their block.

mod lower;


use lume_ir::code::ProgramCode;
use lume_resolve::ResolvedProgram;

/// Compiler switches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Let a slot-eligible top-level unit keep its bindings in a slot array.
    /// Those bindings are then gone after the run instead of staying in the
    /// context's globals.
    pub optimize_top_level: bool,
    /// Let slot-eligible functions use slot arrays. Turning this off forces
    /// dynamic-map storage everywhere.
    pub slot_locals: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            optimize_top_level: false,
            slot_locals: true,
        }
    }
}

impl CompileOptions {
    /// Dynamic-map storage for every unit.
    pub fn dynamic() -> Self {
        CompileOptions {
            optimize_top_level: false,
            slot_locals: false,
        }
    }

    /// Slot storage wherever the resolver allowed it.
    pub fn optimized() -> Self {
        CompileOptions {
            optimize_top_level: true,
            slot_locals: true,
        }
    }
}

/// Lower a resolved program.
#[tracing::instrument(level = "debug", skip_all)]
pub fn lower(program: &ResolvedProgram, options: CompileOptions) -> ProgramCode {
    lower::Lowerer::new(options).lower_program(program.program())
}
