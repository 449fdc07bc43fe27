use super::*;
use pretty_assertions::assert_eq;

#[test]
fn factories_map_to_runtime_codes() {
    let cases = [
        (division_by_zero(), ErrorCode::DivisionByZero),
        (index_out_of_range(4.0, 2), ErrorCode::IndexOutOfRange),
        (key_not_found("k"), ErrorCode::KeyNotFound),
        (null_reference("call"), ErrorCode::NullReference),
        (type_mismatch("number", "string"), ErrorCode::TypeMismatch),
        (not_callable("number"), ErrorCode::NotCallable),
        (cannot_compare("list", "map"), ErrorCode::CannotCompare),
        (invalid_operation("x"), ErrorCode::InvalidOperation),
        (unbound_variable("x"), ErrorCode::UnboundVariable),
        (wrong_argument_count("f", 1, 2), ErrorCode::WrongArgumentCount),
        (stack_overflow(10), ErrorCode::StackOverflow),
        (undefined_member("x", "map"), ErrorCode::UndefinedMember),
        (no_matching_arm(&Value::Null), ErrorCode::NoMatchingArm),
        (thrown(Value::Null), ErrorCode::Thrown),
        (immutable_assignment("print"), ErrorCode::ImmutableAssignment),
    ];
    for (err, code) in cases {
        assert_eq!(err.code(), code, "{err}");
        assert!(err.code().is_runtime_error());
    }
}

#[test]
fn or_span_keeps_innermost_position() {
    let err = division_by_zero()
        .or_span(Span::new(2, 9))
        .or_span(Span::new(1, 1));
    assert_eq!(err.span, Some(Span::new(2, 9)));

    let err = division_by_zero().or_span(Span::DUMMY);
    assert_eq!(err.span, None);
}

#[test]
fn thrown_value_is_caught_as_is() {
    let err = thrown(Value::string("boom"));
    assert_eq!(err.to_value(), Value::string("boom"));
}

#[test]
fn builtin_error_is_caught_as_code_and_message() {
    let value = division_by_zero().to_value();
    let Value::Map(entries) = &value else {
        panic!("expected a map, got {value}");
    };
    let entries = entries.borrow();
    assert_eq!(entries.get("code"), Some(&Value::Number(300.0)));
    assert_eq!(entries.get("message"), Some(&Value::string("division by zero")));
}

#[test]
fn diagnostic_carries_code_span_and_frames() {
    let err = division_by_zero()
        .with_span(Span::new(3, 7))
        .with_backtrace(EvalBacktrace::new(vec![BacktraceFrame {
            name: Name::new("avg"),
            span: Span::new(5, 1),
        }]));
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::DivisionByZero);
    assert_eq!(diag.span, Some(Span::new(3, 7)));
    assert_eq!(diag.notes, ["in avg at 5:1"]);
}

#[test]
fn escaped_control_signals_become_errors() {
    assert_eq!(
        ControlAction::Break.into_eval_error().code(),
        ErrorCode::InvalidOperation
    );
    let err = ControlAction::from(key_not_found("a")).into_eval_error();
    assert_eq!(err.code(), ErrorCode::KeyNotFound);
}
