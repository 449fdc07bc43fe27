//! Lume evaluator and host API.
//!
//! Runs compiled programs against an [`ExecutionContext`]:
//!
//! ```text
//! let resolved = lume_resolve::resolve(tree, &ctx.prelude()).into_resolved()?;
//! let exe = lume_eval::compile(&resolved, CompileOptions::default());
//! let value = exe.run(&mut ctx)?;
//! ```
//!
//! An [`Executable`] is immutable and `Send + Sync`: compile once, run it
//! any number of times, from any number of contexts. A context is
//! single-threaded and owns its globals, call stack and print handler.
//!
//! # Calling conventions
//!
//! Calls to slot-storage functions with exactly their positional arity and
//! no bound receiver write the arguments straight into the callee's slots.
//! Every other call takes the general path: missing arguments bind `null`
//! or their default (evaluated in the callee, after earlier parameters), a
//! rest parameter collects extras, and surplus arguments without one are a
//! `WrongArgumentCount` error.

mod context;
mod errors;
mod interpreter;
mod prelude;
pub mod print_handler;

use std::sync::{Arc, Once};

use lume_ir::ast::Program;
use lume_ir::code::{ProgramCode, Storage};
use lume_resolve::ResolvedProgram;

use interpreter::Interpreter;

pub use context::{ContextConfig, ExecutionContext, DEFAULT_MAX_CALL_DEPTH};
pub use errors::ScriptError;
pub use lume_compile::CompileOptions;
pub use lume_runtime::{EvalError, EvalErrorKind, NativeFunction, Value};
pub use print_handler::{buffer_handler, silent_handler, stdout_handler, SharedPrintHandler};

/// A compiled program.
#[derive(Clone, Debug)]
pub struct Executable {
    program: Arc<ProgramCode>,
}

impl Executable {
    /// Run to completion on `ctx`. The value is the top-level block's
    /// trailing expression, or `null`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&self, ctx: &mut ExecutionContext) -> Result<Value, ScriptError> {
        let result = Interpreter::new(ctx).run_program(&self.program);
        if let Err(err) = &result {
            tracing::debug!(code = %err.code(), "run failed");
        }
        result.map_err(ScriptError::Runtime)
    }

    /// Storage chosen for the top-level unit.
    pub fn storage(&self) -> &Storage {
        &self.program.storage
    }

    pub fn code(&self) -> &ProgramCode {
        &self.program
    }
}

pub fn compile(program: &ResolvedProgram, options: CompileOptions) -> Executable {
    Executable {
        program: Arc::new(lume_compile::lower(program, options)),
    }
}

/// Resolve against the context's globals, compile and run.
pub fn eval_program(
    program: Program,
    ctx: &mut ExecutionContext,
    options: CompileOptions,
) -> Result<Value, ScriptError> {
    let resolved = lume_resolve::resolve(program, &ctx.prelude())
        .into_resolved()
        .map_err(ScriptError::Resolve)?;
    compile(&resolved, options).run(ctx)
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
