#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use std::rc::Rc;
use std::sync::Arc;

use super::*;
use crate::{ClassValue, Instance, MapValue, Scope, Shared};
use lume_diagnostic::ErrorCode;
use lume_ir::code::{ClassCode, Code, FunctionCode, Storage};
use lume_ir::Span;
use pretty_assertions::assert_eq;

fn num(n: f64) -> Value {
    Value::Number(n)
}

fn name(s: &str) -> Name {
    Name::new(s)
}

fn code_of(result: EvalResult) -> ErrorCode {
    match result {
        Ok(v) => panic!("expected an error, got {v}"),
        Err(e) => e.code(),
    }
}

fn point_class() -> Rc<ClassValue> {
    let describe = FunctionCode {
        name: name("describe"),
        params: Vec::new(),
        rest: None,
        storage: Storage::Map,
        body: Code::NULL,
        is_async: false,
        span: Span::DUMMY,
    };
    let code = ClassCode {
        name: name("Point"),
        fields: Vec::new(),
        methods: vec![Arc::new(describe)],
        span: Span::DUMMY,
    };
    Rc::new(ClassValue::new(Arc::new(code), None, Shared::new(Scope::new())))
}

#[test]
fn instance_fields_shadow_methods() {
    let instance = Instance::new(point_class());
    instance.set_field(name("x"), num(1.0));
    let object = Value::Instance(Rc::clone(&instance));

    assert_eq!(get_member(&object, &name("x")).unwrap(), num(1.0));

    let method = get_member(&object, &name("describe")).unwrap();
    let Value::Function(crate::Callable::Closure(closure)) = &method else {
        panic!("expected a bound method, got {method:?}");
    };
    assert!(closure.receiver.as_ref().unwrap().same(&object));

    instance.set_field(name("describe"), num(2.0));
    assert_eq!(get_member(&object, &name("describe")).unwrap(), num(2.0));

    assert_eq!(
        code_of(get_member(&object, &name("missing"))),
        ErrorCode::UndefinedMember
    );
}

#[test]
fn map_keys_win_over_builtin_length() {
    let mut entries = MapValue::default();
    entries.insert(name("a"), num(1.0));
    let map = Value::map(entries);
    assert_eq!(get_member(&map, &name("length")).unwrap(), num(1.0));

    set_member(&map, &name("length"), Value::string("custom")).unwrap();
    assert_eq!(
        get_member(&map, &name("length")).unwrap(),
        Value::string("custom")
    );
}

#[test]
fn length_counts_characters() {
    assert_eq!(
        get_member(&Value::string("héllo"), &name("length")).unwrap(),
        num(5.0)
    );
    assert_eq!(
        get_member(&Value::list(vec![Value::Null; 3]), &name("length")).unwrap(),
        num(3.0)
    );
    assert_eq!(
        code_of(get_member(&Value::Null, &name("length"))),
        ErrorCode::NullReference
    );
    assert_eq!(
        code_of(get_member(&num(1.0), &name("length"))),
        ErrorCode::UndefinedMember
    );
}

#[test]
fn list_builtins() {
    let list = Value::list(vec![num(1.0)]);
    let pushed = call_builtin_method(&list, "push", &[num(2.0), num(3.0)]).unwrap();
    assert!(pushed.unwrap().is_null());
    assert_eq!(list, Value::list(vec![num(1.0), num(2.0), num(3.0)]));

    let contains = call_builtin_method(&list, "contains", &[num(2.0)]).unwrap();
    assert!(contains.unwrap().same(&Value::TRUE));

    assert_eq!(call_builtin_method(&list, "pop", &[]).unwrap().unwrap(), num(3.0));
    let empty = Value::list(Vec::new());
    assert!(call_builtin_method(&empty, "pop", &[]).unwrap().unwrap().is_null());

    assert!(call_builtin_method(&list, "keys", &[]).is_none());
    assert_eq!(
        code_of(call_builtin_method(&list, "pop", &[num(1.0)]).unwrap()),
        ErrorCode::WrongArgumentCount
    );
}

#[test]
fn map_builtins_keep_insertion_order() {
    let mut entries = MapValue::default();
    entries.insert(name("z"), num(1.0));
    entries.insert(name("a"), num(2.0));
    let map = Value::map(entries);

    let keys = call_builtin_method(&map, "keys", &[]).unwrap().unwrap();
    assert_eq!(keys, Value::list(vec![Value::string("z"), Value::string("a")]));

    let has = call_builtin_method(&map, "contains", &[Value::string("a")]).unwrap();
    assert!(has.unwrap().same(&Value::TRUE));
    assert_eq!(
        code_of(call_builtin_method(&map, "contains", &[num(1.0)]).unwrap()),
        ErrorCode::TypeMismatch
    );
}

#[test]
fn list_indexing_bounds() {
    let list = Value::list(vec![num(10.0), num(20.0)]);
    assert_eq!(index_value(&list, &num(1.0)).unwrap(), num(20.0));
    for bad in [2.0, -1.0, 0.5] {
        assert_eq!(
            code_of(index_value(&list, &num(bad))),
            ErrorCode::IndexOutOfRange
        );
    }
    assert_eq!(
        code_of(index_value(&list, &Value::string("0"))),
        ErrorCode::TypeMismatch
    );

    set_index(&list, &num(0.0), num(5.0)).unwrap();
    assert_eq!(list, Value::list(vec![num(5.0), num(20.0)]));
    assert_eq!(
        set_index(&list, &num(2.0), num(0.0)).unwrap_err().code(),
        ErrorCode::IndexOutOfRange
    );
}

#[test]
fn map_and_string_indexing() {
    let map = Value::map(MapValue::default());
    assert_eq!(
        code_of(index_value(&map, &Value::string("k"))),
        ErrorCode::KeyNotFound
    );
    set_index(&map, &Value::string("k"), num(1.0)).unwrap();
    assert_eq!(index_value(&map, &Value::string("k")).unwrap(), num(1.0));

    assert_eq!(
        index_value(&Value::string("abc"), &num(2.0)).unwrap(),
        Value::string("c")
    );
    assert_eq!(
        code_of(index_value(&Value::Null, &num(0.0))),
        ErrorCode::NullReference
    );
}

#[test]
fn iteration_snapshots_lists() {
    let list = Value::list(vec![num(1.0), num(2.0)]);
    let items = iterate(&list).unwrap();
    call_builtin_method(&list, "push", &[num(3.0)]).unwrap().unwrap();
    assert_eq!(items, vec![num(1.0), num(2.0)]);

    assert_eq!(
        iterate(&Value::string("ab")).unwrap(),
        vec![Value::string("a"), Value::string("b")]
    );
    assert_eq!(iterate(&num(1.0)).unwrap_err().code(), ErrorCode::TypeMismatch);
    assert_eq!(length_of(&list).unwrap(), num(3.0));
}
