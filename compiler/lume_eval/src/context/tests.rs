use lume_ir::Mutability;
use pretty_assertions::assert_eq;

use super::*;
use crate::print_handler::buffer_handler;

#[test]
fn new_context_has_the_builtins() {
    let ctx = ExecutionContext::new();
    let names: Vec<String> = ctx.globals().iter().map(|(n, _, _)| n.to_string()).collect();
    assert_eq!(names, ["len", "print", "str", "type_of"]);
    assert!(ctx.prelude().contains("print"));
    assert_eq!(ctx.call_depth(), 0);
}

#[test]
fn registered_bindings_reach_the_prelude() {
    let mut ctx = ExecutionContext::new();
    ctx.register("limit", Value::Number(3.0), Mutability::Immutable);
    ctx.register("count", Value::Number(0.0), Mutability::Mutable);

    let prelude = ctx.prelude();
    let count = prelude.iter().find(|(n, _)| &***n == "count").map(|(_, m)| m);
    assert_eq!(count, Some(Mutability::Mutable));
    assert_eq!(ctx.global("limit"), Some(Value::Number(3.0)));
}

#[test]
fn clear_globals_keeps_only_builtins() {
    let mut ctx = ExecutionContext::new();
    ctx.register("x", Value::Null, Mutability::Mutable);
    ctx.clear_globals();
    assert_eq!(ctx.global("x"), None);
    assert!(ctx.global("len").is_some());
    assert_eq!(ctx.globals().len(), 4);
}

#[test]
fn remove_global_returns_the_value() {
    let mut ctx = ExecutionContext::new();
    ctx.register("x", Value::Number(1.0), Mutability::Mutable);
    assert_eq!(ctx.remove_global("x"), Some(Value::Number(1.0)));
    assert_eq!(ctx.remove_global("x"), None);
}

#[test]
fn config_sets_depth_limit_and_print_target() {
    let print = buffer_handler();
    let ctx = ExecutionContext::with_config(ContextConfig {
        max_call_depth: Some(7),
        print: SharedPrintHandler::clone(&print),
    });
    assert_eq!(ctx.call_stack().max_depth(), Some(7));
    print.println("hi");
    assert_eq!(ctx.output(), "hi\n");
}
