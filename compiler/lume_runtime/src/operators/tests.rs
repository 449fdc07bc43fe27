#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use super::*;
use lume_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn num(n: f64) -> Value {
    Value::Number(n)
}

fn code_of(result: EvalResult) -> ErrorCode {
    match result {
        Ok(v) => panic!("expected an error, got {v}"),
        Err(e) => e.code(),
    }
}

#[test]
fn string_concatenation_uses_display_strings() {
    let v = evaluate_binary(Value::string("n = "), num(5.0), BinaryOp::Add).unwrap();
    assert_eq!(v, Value::string("n = 5.0"));
    let v = evaluate_binary(Value::TRUE, Value::string("!"), BinaryOp::Add).unwrap();
    assert_eq!(v, Value::string("true!"));
    let v = evaluate_binary(Value::Null, Value::string("x"), BinaryOp::Add).unwrap();
    assert_eq!(v, Value::string("nullx"));
}

#[test]
fn list_concatenation_copies() {
    let a = Value::list(vec![num(1.0)]);
    let b = Value::list(vec![num(2.0)]);
    let joined = evaluate_binary(a.clone(), b, BinaryOp::Add).unwrap();
    assert_eq!(joined, Value::list(vec![num(1.0), num(2.0)]));
    assert!(!joined.same(&a));
    assert_eq!(a, Value::list(vec![num(1.0)]));
}

#[test]
fn different_kinds_are_never_equal() {
    let pairs = [
        (Value::Null, num(0.0)),
        (Value::Null, Value::FALSE),
        (num(1.0), Value::string("1")),
        (Value::list(vec![]), Value::map(Default::default())),
    ];
    for (a, b) in pairs {
        let eq = evaluate_binary(a.clone(), b.clone(), BinaryOp::Eq).unwrap();
        assert!(eq.same(&Value::FALSE), "{a:?} == {b:?}");
        let ne = evaluate_binary(a, b, BinaryOp::NotEq).unwrap();
        assert!(ne.same(&Value::TRUE));
    }
}

#[test]
fn equal_kinds_compare_by_value() {
    let a = Value::list(vec![num(1.0), Value::string("x")]);
    let b = Value::list(vec![num(1.0), Value::string("x")]);
    assert_eq!(evaluate_binary(a, b, BinaryOp::Eq).unwrap(), Value::TRUE);
    assert_eq!(
        evaluate_binary(Value::Null, Value::Null, BinaryOp::Eq).unwrap(),
        Value::TRUE
    );
}

#[test]
fn ordering_rules() {
    assert_eq!(
        evaluate_binary(Value::string("apple"), Value::string("banana"), BinaryOp::Lt).unwrap(),
        Value::TRUE
    );
    assert_eq!(
        code_of(evaluate_binary(num(1.0), Value::string("2"), BinaryOp::Lt)),
        ErrorCode::CannotCompare
    );
    assert_eq!(
        code_of(evaluate_binary(Value::Null, num(1.0), BinaryOp::GtEq)),
        ErrorCode::InvalidOperation
    );
    assert_eq!(
        code_of(evaluate_binary(Value::TRUE, Value::FALSE, BinaryOp::Gt)),
        ErrorCode::CannotCompare
    );
}

#[test]
fn comparisons_return_canonical_booleans() {
    let first = evaluate_numbers(3.0, 5.0, BinaryOp::Lt).unwrap();
    let second = evaluate_binary(num(3.0), num(5.0), BinaryOp::Lt).unwrap();
    assert!(first.same(&second));
    assert!(first.same(&Value::TRUE));
    let first = evaluate_numbers(5.0, 3.0, BinaryOp::Lt).unwrap();
    let second = evaluate_numbers(5.0, 3.0, BinaryOp::Lt).unwrap();
    assert!(first.same(&second));
    assert!(first.same(&Value::FALSE));
}

#[test]
fn division_and_modulo_by_zero() {
    assert_eq!(
        code_of(evaluate_numbers(1.0, 0.0, BinaryOp::Div)),
        ErrorCode::DivisionByZero
    );
    assert_eq!(
        code_of(evaluate_binary(num(1.0), num(-0.0), BinaryOp::Mod)),
        ErrorCode::DivisionByZero
    );
    assert_eq!(evaluate_numbers(7.0, 3.0, BinaryOp::Mod).unwrap(), num(1.0));
    assert_eq!(evaluate_numbers(-7.0, 3.0, BinaryOp::Mod).unwrap(), num(-1.0));
}

#[test]
fn arithmetic_on_non_numbers() {
    assert_eq!(
        code_of(evaluate_binary(num(1.0), Value::Null, BinaryOp::Sub)),
        ErrorCode::TypeMismatch
    );
    assert_eq!(
        code_of(evaluate_binary(Value::TRUE, num(1.0), BinaryOp::Add)),
        ErrorCode::TypeMismatch
    );
}

#[test]
fn unary_and_update() {
    assert_eq!(evaluate_unary(&num(2.0), UnaryOp::Neg).unwrap(), num(-2.0));
    assert_eq!(
        code_of(evaluate_unary(&Value::string("2"), UnaryOp::Neg)),
        ErrorCode::TypeMismatch
    );
    assert!(evaluate_unary(&Value::Null, UnaryOp::Not).unwrap().same(&Value::TRUE));
    assert!(evaluate_unary(&num(0.0), UnaryOp::Not).unwrap().same(&Value::FALSE));
    assert_eq!(apply_update(&num(1.0), UpdateOp::Increment).unwrap(), num(2.0));
    assert_eq!(apply_update(&num(1.0), UpdateOp::Decrement).unwrap(), num(0.0));
    assert_eq!(
        code_of(apply_update(&Value::Null, UpdateOp::Increment)),
        ErrorCode::TypeMismatch
    );
}

proptest! {
    #[test]
    fn dynamic_arithmetic_matches_native(a in -1.0e12f64..1.0e12, b in -1.0e12f64..1.0e12) {
        prop_assume!(b != 0.0);
        let cases = [
            (BinaryOp::Add, a + b),
            (BinaryOp::Sub, a - b),
            (BinaryOp::Mul, a * b),
            (BinaryOp::Div, a / b),
        ];
        for (op, expected) in cases {
            let got = evaluate_binary(num(a), num(b), op).unwrap();
            prop_assert_eq!(got.as_number().map(f64::to_bits), Some(expected.to_bits()));
        }
    }

    #[test]
    fn number_ordering_matches_native(a in any::<f64>(), b in any::<f64>()) {
        prop_assume!(!a.is_nan() && !b.is_nan());
        let got = evaluate_binary(num(a), num(b), BinaryOp::LtEq).unwrap();
        prop_assert!(got.same(&Value::boolean(a <= b)));
    }
}
