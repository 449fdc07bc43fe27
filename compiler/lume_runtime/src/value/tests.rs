#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use super::*;
use crate::Instance;
use lume_ir::code::ClassCode;
use lume_ir::Span;
use pretty_assertions::assert_eq;

fn num(n: f64) -> Value {
    Value::Number(n)
}

#[test]
fn only_false_and_null_are_falsy() {
    assert!(!Value::FALSE.is_truthy());
    assert!(!Value::Null.is_truthy());
    for truthy in [
        num(0.0),
        Value::string(""),
        Value::list(Vec::new()),
        Value::map(MapValue::default()),
        Value::TRUE,
    ] {
        assert!(truthy.is_truthy(), "{truthy:?}");
    }
}

#[test]
fn booleans_are_canonical() {
    assert!(Value::boolean(true).same(&Value::TRUE));
    assert!(Value::from(false).same(&Value::FALSE));
    assert!(!Value::TRUE.same(&Value::FALSE));
    assert!(Value::from_literal(&Literal::Bool(true)).same(&Value::TRUE));
}

#[test]
fn identity_versus_equality() {
    let a = Value::list(vec![num(1.0)]);
    let b = Value::list(vec![num(1.0)]);
    assert_eq!(a, b);
    assert!(!a.same(&b));
    assert!(a.same(&a.clone()));

    let s = Value::string("x");
    assert!(s.same(&s.clone()));
    assert!(!s.same(&Value::string("x")));
}

#[test]
fn numbers_display_with_fraction() {
    assert_eq!(num(55.0).to_string(), "55.0");
    assert_eq!(num(0.5).to_string(), "0.5");
    assert_eq!(num(-3.0).to_string(), "-3.0");
}

#[test]
fn nested_strings_are_quoted() {
    let mut entries = MapValue::default();
    entries.insert(Name::new("k"), Value::string("v"));
    let value = Value::list(vec![
        num(1.0),
        Value::string("a"),
        Value::Null,
        Value::map(entries),
    ]);
    assert_eq!(value.to_string(), r#"[1.0, "a", null, {k: "v"}]"#);
    assert_eq!(Value::string("top").to_string(), "top");
    assert_eq!(format!("{:?}", Value::string("top")), r#""top""#);
}

#[test]
fn instances_display_fields_in_order() {
    let code = ClassCode {
        name: Name::new("Point"),
        fields: Vec::new(),
        methods: Vec::new(),
        span: Span::DUMMY,
    };
    let class = Rc::new(ClassValue::new(Arc::new(code), None, Shared::default()));
    let instance = Instance::new(Rc::clone(&class));
    assert_eq!(Value::Instance(Rc::clone(&instance)).to_string(), "Point {}");

    instance.set_field(Name::new("y"), num(2.0));
    instance.set_field(Name::new("x"), num(1.0));
    assert_eq!(
        Value::Instance(instance).to_string(),
        "Point { y: 2.0, x: 1.0 }"
    );
    assert_eq!(Value::class(class).to_string(), "<class Point>");
}

#[test]
fn type_names() {
    let native = Value::native(NativeFunction::new("f", Some(0), |_| Ok(Value::Null)));
    let cases = [
        (num(1.0), "number"),
        (Value::string("s"), "string"),
        (Value::TRUE, "boolean"),
        (Value::Null, "null"),
        (Value::list(Vec::new()), "list"),
        (Value::map(MapValue::default()), "map"),
        (native.clone(), "function"),
    ];
    for (value, expected) in cases {
        assert_eq!(value.type_name(), expected);
    }
    assert_eq!(native.to_string(), "<native fn f>");
}

#[test]
fn native_arity_is_checked() {
    let f = NativeFunction::new("double", Some(1), |args| {
        Ok(Value::Number(args[0].as_number().unwrap_or(0.0) * 2.0))
    });
    assert_eq!(f.call(&[num(4.0)]).unwrap(), num(8.0));
    let err = f.call(&[]).unwrap_err();
    assert_eq!(err.code(), lume_diagnostic::ErrorCode::WrongArgumentCount);
}

fn self_containing_list() -> Value {
    let list = Value::list(vec![num(1.0)]);
    if let Value::List(items) = &list {
        items.borrow_mut().push(list.clone());
    }
    list
}

#[test]
fn cyclic_lists_compare_structurally() {
    let a = self_containing_list();
    let b = self_containing_list();
    assert!(!a.same(&b));
    assert_eq!(a, b);
    assert_eq!(a, a.clone());

    let other = Value::list(vec![num(2.0), Value::Null]);
    assert_ne!(a, other);
}

#[test]
fn cyclic_maps_compare_structurally() {
    let cyclic_map = |tag: f64| {
        let map = Value::map(MapValue::default());
        if let Value::Map(entries) = &map {
            entries.borrow_mut().insert(Name::new("tag"), num(tag));
            entries.borrow_mut().insert(Name::new("me"), map.clone());
        }
        map
    };
    assert_eq!(cyclic_map(1.0), cyclic_map(1.0));
    assert_ne!(cyclic_map(1.0), cyclic_map(2.0));
}

#[test]
fn cyclic_containers_display_a_placeholder() {
    assert_eq!(self_containing_list().to_string(), "[1.0, [...]]");

    let map = Value::map(MapValue::default());
    if let Value::Map(entries) = &map {
        entries.borrow_mut().insert(Name::new("me"), map.clone());
    }
    assert_eq!(map.to_string(), "{me: {...}}");
}

#[test]
fn shared_but_acyclic_values_print_in_full() {
    let inner = Value::list(vec![num(1.0)]);
    let outer = Value::list(vec![inner.clone(), inner]);
    assert_eq!(outer.to_string(), "[[1.0], [1.0]]");
}

#[test]
fn self_referencing_instance_displays_a_placeholder() {
    let code = ClassCode {
        name: Name::new("Node"),
        fields: Vec::new(),
        methods: Vec::new(),
        span: Span::DUMMY,
    };
    let class = Rc::new(ClassValue::new(Arc::new(code), None, Shared::default()));
    let node = Instance::new(class);
    node.set_field(Name::new("next"), Value::Instance(Rc::clone(&node)));
    assert_eq!(
        Value::Instance(node).to_string(),
        "Node { next: Node {...} }"
    );
}

#[test]
fn deeply_nested_lists_compare_and_print() {
    let build = || {
        let mut value = Value::Null;
        for _ in 0..2_000 {
            value = Value::list(vec![value]);
        }
        value
    };
    let (a, b) = (build(), build());
    assert_eq!(a, b);
    assert!(a.to_string().starts_with("[[[["));
}
