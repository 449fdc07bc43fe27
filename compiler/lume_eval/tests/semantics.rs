//! Language guarantees that must hold under every compilation strategy.

#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

mod common;

use common::{compile_in, error_code, run, run_with, value};
use lume_diagnostic::ErrorCode;
use lume_eval::{CompileOptions, ContextConfig, ExecutionContext, Value};
use lume_ir::ast::{Program, Stmt};
use lume_ir::build::*;
use lume_ir::code::Code;
use lume_ir::BinaryOp;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

mod bindings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn let_cannot_be_reassigned() {
        let tree = program(vec![let_("x", num(1.0)), expr_stmt(assign("x", num(2.0)))], None);
        assert_eq!(error_code(tree), ErrorCode::CannotAssignToLet);
    }

    #[test]
    fn var_reassignment_is_visible() {
        let tree = program(
            vec![var("x", num(1.0)), expr_stmt(assign("x", num(2.0)))],
            Some(ident("x")),
        );
        assert_eq!(value(tree), Value::Number(2.0));
    }

    #[test]
    fn resolution_errors_are_all_reported() {
        let tree = program(
            vec![
                let_("x", num(1.0)),
                expr_stmt(assign("x", num(2.0))),
                expr_stmt(ident("missing")),
            ],
            None,
        );
        let err = run(tree).unwrap_err();
        assert_eq!(
            err.codes(),
            [ErrorCode::CannotAssignToLet, ErrorCode::UndefinedVariable]
        );
        assert!(err.runtime_error().is_none());
    }

    #[test]
    fn inner_declarations_shadow_only_inside() {
        // var x = 1; { var x = 2; x = 3 }; x
        let at_top = program(
            vec![
                var("x", num(1.0)),
                expr_stmt(block_expr(
                    vec![var("x", num(2.0)), expr_stmt(assign("x", num(3.0)))],
                    None,
                )),
            ],
            Some(ident("x")),
        );
        assert_eq!(value(at_top), Value::Number(1.0));

        // Same inside a slot-storage function.
        let in_function = program(
            vec![fn_decl(
                "f",
                &[],
                block(
                    vec![
                        var("x", num(1.0)),
                        expr_stmt(block_expr(
                            vec![var("x", num(2.0)), expr_stmt(assign("x", num(3.0)))],
                            None,
                        )),
                    ],
                    Some(ident("x")),
                ),
            )],
            Some(call_named("f", vec![])),
        );
        assert_eq!(value(in_function), Value::Number(1.0));
    }
}

mod booleans {
    use super::*;

    #[test]
    fn comparisons_return_canonical_instances() {
        let less = || value(program(vec![], Some(lt(num(3.0), num(5.0)))));
        assert!(less().same(&less()));
        assert!(less().same(&Value::TRUE));

        let greater = || value(program(vec![], Some(lt(num(5.0), num(3.0)))));
        assert!(greater().same(&greater()));
        assert!(greater().same(&Value::FALSE));
    }

    #[test]
    fn dynamic_comparisons_are_canonical_too() {
        let tree = || {
            program(
                vec![let_("a", num(3.0))],
                Some(list(vec![lt(ident("a"), num(5.0)), eq(ident("a"), str_("3"))])),
            )
        };
        let Value::List(first) = value(tree()) else {
            panic!("expected a list");
        };
        let first = first.borrow();
        assert!(first[0].same(&Value::TRUE));
        assert!(first[1].same(&Value::FALSE));
    }
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    const OPS: [BinaryOp; 4] = [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div];

    fn native(op: BinaryOp, a: f64, b: f64) -> f64 {
        match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            _ => a / b,
        }
    }

    /// `a op b` on literals, inlined by the compiler.
    fn inlined(op: BinaryOp, a: f64, b: f64) -> Program {
        program(vec![], Some(binary(op, num(a), num(b))))
    }

    /// `let a = ..; let b = ..; a op b`, routed through dynamic dispatch.
    fn dispatched(op: BinaryOp, a: f64, b: f64) -> Program {
        program(
            vec![let_("a", num(a)), let_("b", num(b))],
            Some(binary(op, ident("a"), ident("b"))),
        )
    }

    #[test]
    fn literal_operands_are_inlined() {
        let prelude = ExecutionContext::new().prelude();
        let resolved = lume_resolve::resolve(inlined(BinaryOp::Add, 1.0, 2.0), &prelude)
            .into_resolved()
            .unwrap();
        let exe = lume_eval::compile(&resolved, CompileOptions::default());
        let Code::Block(body) = &exe.code().body else {
            panic!("expected a block");
        };
        assert!(matches!(body.tail.as_deref(), Some(Code::NumBinary { .. })));
    }

    #[test]
    fn division_and_modulo_by_zero() {
        assert_eq!(error_code(inlined(BinaryOp::Div, 4.0, 0.0)), ErrorCode::DivisionByZero);
        assert_eq!(error_code(dispatched(BinaryOp::Div, 4.0, 0.0)), ErrorCode::DivisionByZero);
        assert_eq!(error_code(dispatched(BinaryOp::Mod, 4.0, 0.0)), ErrorCode::DivisionByZero);
    }

    #[test]
    fn string_plus_number_concatenates() {
        let tree = program(vec![let_("n", num(1.5))], Some(add(str_("v"), ident("n"))));
        assert_eq!(value(tree), Value::string("v1.5"));
    }

    #[test]
    fn ordering_against_null_fails() {
        let tree = program(vec![let_("n", null())], Some(lt(ident("n"), num(1.0))));
        assert_eq!(error_code(tree), ErrorCode::InvalidOperation);
        let tree = program(vec![let_("s", str_("a"))], Some(lt(ident("s"), num(1.0))));
        assert_eq!(error_code(tree), ErrorCode::CannotCompare);
    }

    proptest! {
        #[test]
        fn compiled_arithmetic_matches_native(
            a in -1.0e6f64..1.0e6,
            b in -1.0e6f64..1.0e6,
            op_index in 0usize..4,
        ) {
            prop_assume!(b != 0.0);
            let op = OPS[op_index];
            let expected = Value::Number(native(op, a, b));
            prop_assert_eq!(value(inlined(op, a, b)), expected.clone());
            prop_assert_eq!(value(dispatched(op, a, b)), expected);
        }
    }
}

mod storage {
    use super::*;
    use pretty_assertions::assert_eq;

    /// fn poly(a, b) { var acc = 0; var i = 0;
    ///   while (i < 3) { acc = acc + a * i - b; i++ };
    ///   if (acc < 0) { -acc } else { acc } }
    fn poly() -> Stmt {
        fn_decl(
            "poly",
            &["a", "b"],
            block(
                vec![
                    var("acc", num(0.0)),
                    var("i", num(0.0)),
                    expr_stmt(while_(
                        lt(ident("i"), num(3.0)),
                        block(
                            vec![
                                expr_stmt(assign(
                                    "acc",
                                    sub(add(ident("acc"), mul(ident("a"), ident("i"))), ident("b")),
                                )),
                                expr_stmt(post_inc("i")),
                            ],
                            None,
                        ),
                    )),
                ],
                Some(if_else(
                    lt(ident("acc"), num(0.0)),
                    neg(ident("acc")),
                    ident("acc"),
                )),
            ),
        )
    }

    fn call_poly(a: f64, b: f64) -> Program {
        program(vec![poly()], Some(call_named("poly", vec![num(a), num(b)])))
    }

    #[test]
    fn options_pick_the_function_storage() {
        let ctx = ExecutionContext::new();
        let cases = [
            (CompileOptions::default(), true),
            (CompileOptions::dynamic(), false),
        ];
        for (options, slots) in cases {
            let exe = compile_in(&ctx, call_poly(1.0, 2.0), options);
            let Code::Block(body) = &exe.code().body else {
                panic!("expected a block");
            };
            let Some(Code::DefineFunction { function, .. }) = body.stmts.first() else {
                panic!("expected the hoisted function first");
            };
            assert_eq!(function.storage.uses_slots(), slots);
        }
    }

    proptest! {
        #[test]
        fn slot_and_map_storage_agree(a in -100i32..100, b in -100i32..100) {
            let (a, b) = (f64::from(a), f64::from(b));
            let slots = run_with(call_poly(a, b), CompileOptions::optimized()).unwrap();
            let maps = run_with(call_poly(a, b), CompileOptions::dynamic()).unwrap();
            prop_assert_eq!(slots, maps);
        }
    }
}

mod call_stack {
    use super::*;
    use pretty_assertions::assert_eq;

    /// fn boom(n) { if (n <= 0) { 1 / 0 } else { boom(n - 1) } }
    fn boom() -> Stmt {
        fn_decl(
            "boom",
            &["n"],
            value_block(if_else(
                le(ident("n"), num(0.0)),
                div(num(1.0), num(0.0)),
                call_named("boom", vec![sub(ident("n"), num(1.0))]),
            )),
        )
    }

    #[test]
    fn failing_calls_pop_every_frame() {
        let mut ctx = ExecutionContext::new();
        let tree = program(vec![boom()], Some(call_named("boom", vec![num(5.0)])));
        let err = lume_eval::eval_program(tree, &mut ctx, CompileOptions::default()).unwrap_err();

        let runtime = err.runtime_error().unwrap();
        assert_eq!(runtime.code(), ErrorCode::DivisionByZero);
        assert_eq!(runtime.trace.as_ref().unwrap().len(), 6);

        let stack = ctx.call_stack();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.total_pushes(), 6);
        assert_eq!(stack.total_pushes(), stack.total_pops());
    }

    #[test]
    fn caught_errors_leave_the_stack_balanced() {
        let mut ctx = ExecutionContext::new();
        let tree = program(
            vec![boom()],
            Some(try_(
                value_block(call_named("boom", vec![num(3.0)])),
                Some((None, value_block(str_("recovered")))),
                None,
            )),
        );
        let result = lume_eval::eval_program(tree, &mut ctx, CompileOptions::default()).unwrap();
        assert_eq!(result, Value::string("recovered"));
        assert_eq!(ctx.call_stack().total_pushes(), ctx.call_stack().total_pops());
    }

    #[test]
    fn unbounded_recursion_overflows_at_the_limit() {
        let mut ctx = ExecutionContext::with_config(ContextConfig {
            max_call_depth: Some(200),
            ..ContextConfig::default()
        });
        // fn down(n) { down(n + 1) }; down(0)
        let tree = program(
            vec![fn_decl(
                "down",
                &["n"],
                value_block(call_named("down", vec![add(ident("n"), num(1.0))])),
            )],
            Some(call_named("down", vec![num(0.0)])),
        );
        let err = lume_eval::eval_program(tree, &mut ctx, CompileOptions::default()).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::StackOverflow));
        assert_eq!(ctx.call_depth(), 0);
        assert_eq!(ctx.call_stack().total_pushes(), 200);
        assert_eq!(ctx.call_stack().total_pops(), 200);
    }
}
