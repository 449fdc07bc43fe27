//! Shared helpers for the evaluator's integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]
#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use lume_diagnostic::ErrorCode;
use lume_eval::{
    buffer_handler, compile, eval_program, CompileOptions, ContextConfig, ExecutionContext,
    Executable, ScriptError, Value,
};
use lume_ir::ast::{Program, Stmt};
use lume_ir::build::{
    add, call_named, fn_decl, ident, if_else, le, num, sub, value_block,
};

pub fn run(tree: Program) -> Result<Value, ScriptError> {
    run_with(tree, CompileOptions::default())
}

pub fn run_with(tree: Program, options: CompileOptions) -> Result<Value, ScriptError> {
    eval_program(tree, &mut ExecutionContext::new(), options)
}

pub fn value(tree: Program) -> Value {
    run(tree).unwrap()
}

/// Code of the first error a failing run reports.
pub fn error_code(tree: Program) -> ErrorCode {
    run(tree).unwrap_err().code().unwrap()
}

/// A context whose `print` output is captured.
pub fn buffered_context() -> ExecutionContext {
    ExecutionContext::with_config(ContextConfig {
        print: buffer_handler(),
        ..ContextConfig::default()
    })
}

pub fn compile_in(ctx: &ExecutionContext, tree: Program, options: CompileOptions) -> Executable {
    let resolved = lume_resolve::resolve(tree, &ctx.prelude())
        .into_resolved()
        .unwrap();
    compile(&resolved, options)
}

pub fn numbers(values: &[f64]) -> Value {
    Value::list(values.iter().copied().map(Value::Number).collect())
}

pub fn strings(values: &[&str]) -> Value {
    Value::list(values.iter().map(|s| Value::string(*s)).collect())
}

/// `fn fib(n) { if (n <= 1) { n } else { fib(n - 1) + fib(n - 2) } }`
pub fn fib_decl() -> Stmt {
    fn_decl(
        "fib",
        &["n"],
        value_block(if_else(
            le(ident("n"), num(1.0)),
            ident("n"),
            add(
                call_named("fib", vec![sub(ident("n"), num(1.0))]),
                call_named("fib", vec![sub(ident("n"), num(2.0))]),
            ),
        )),
    )
}

/// `fn tarai(x, y, z) { if (x <= y) { y } else { tarai(tarai(x - 1, y, z),
/// tarai(y - 1, z, x), tarai(z - 1, x, y)) } }`
pub fn tarai_decl() -> Stmt {
    let step = |a: &str, b: &str, c: &str| {
        call_named(
            "tarai",
            vec![sub(ident(a), num(1.0)), ident(b), ident(c)],
        )
    };
    fn_decl(
        "tarai",
        &["x", "y", "z"],
        value_block(if_else(
            le(ident("x"), ident("y")),
            ident("y"),
            call_named(
                "tarai",
                vec![step("x", "y", "z"), step("y", "z", "x"), step("z", "x", "y")],
            ),
        )),
    )
}
