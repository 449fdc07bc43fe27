use super::*;
use crate::Literal;

fn slot_function(params: u32, body: Code) -> FunctionCode {
    FunctionCode {
        name: Name::new("f"),
        params: (0..params)
            .map(|i| ParamCode {
                name: Name::new(format!("p{i}")),
                target: Target::Slot(i),
                default: None,
            })
            .collect(),
        rest: None,
        storage: Storage::Slots {
            locals: (0..params).map(|i| Name::new(format!("p{i}"))).collect(),
        },
        body,
        is_async: false,
        span: Span::DUMMY,
    }
}

#[test]
fn fast_call_requires_plain_slot_params() {
    let f = slot_function(2, Code::NULL);
    assert!(f.accepts_fast_call());

    let mut with_default = f.clone();
    with_default.params[1].default = Some(Code::Constant(Literal::Number(1.0)));
    assert!(!with_default.accepts_fast_call());

    let mut with_rest = f.clone();
    with_rest.rest = Some(Target::Slot(2));
    assert!(!with_rest.accepts_fast_call());

    let mut map_unit = f;
    map_unit.storage = Storage::Map;
    assert!(!map_unit.accepts_fast_call());
}

#[test]
fn static_numeric_shapes() {
    let one = Code::Constant(Literal::Number(1.0));
    assert!(one.is_statically_numeric());
    assert!(Code::NumNeg(Box::new(one.clone())).is_statically_numeric());

    let sum = Code::NumBinary {
        op: crate::BinaryOp::Add,
        left: Box::new(one.clone()),
        right: Box::new(one.clone()),
        span: Span::DUMMY,
    };
    assert!(sum.is_statically_numeric());

    let cmp = Code::NumBinary {
        op: crate::BinaryOp::Lt,
        left: Box::new(one.clone()),
        right: Box::new(one),
        span: Span::DUMMY,
    };
    assert!(!cmp.is_statically_numeric());
    assert!(!Code::Constant(Literal::Str(Name::new("1"))).is_statically_numeric());
}

#[test]
fn compiled_code_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProgramCode>();
    assert_send_sync::<Arc<FunctionCode>>();
}
