//! Member access, indexing, builtin methods and iteration.
//!
//! Instance members resolve fields before methods. Lists, maps and strings
//! expose a small fixed set of builtins (`length`, `push`, `pop`,
//! `contains`, `keys`).

use lume_ir::Name;

use crate::errors::{
    index_out_of_range, key_not_found, null_reference, type_mismatch, undefined_member,
    wrong_argument_count, EvalError, EvalResult,
};
use crate::Value;

/// Read `object.name`.
pub fn get_member(object: &Value, name: &Name) -> EvalResult {
    match object {
        Value::Instance(instance) => {
            if let Some(value) = instance.get_field(name) {
                return Ok(value);
            }
            instance
                .class()
                .bind_method(name, object.clone())
                .map(Value::closure)
                .ok_or_else(|| undefined_member(name, instance.class().name()))
        }
        Value::Map(entries) => {
            if let Some(value) = entries.borrow().get(name.as_str()) {
                return Ok(value.clone());
            }
            match name.as_str() {
                "length" => Ok(length_value(entries.borrow().len())),
                _ => Err(undefined_member(name, "map")),
            }
        }
        Value::List(items) if name.as_str() == "length" => Ok(length_value(items.borrow().len())),
        Value::Str(s) if name.as_str() == "length" => Ok(length_value(s.chars().count())),
        Value::Null => Err(null_reference("member access")),
        other => Err(undefined_member(name, other.type_name())),
    }
}

/// Write `object.name = value`. Instances and maps accept new keys.
pub fn set_member(object: &Value, name: &Name, value: Value) -> Result<(), EvalError> {
    match object {
        Value::Instance(instance) => {
            instance.set_field(name.clone(), value);
            Ok(())
        }
        Value::Map(entries) => {
            entries.borrow_mut().insert(name.clone(), value);
            Ok(())
        }
        Value::Null => Err(null_reference("member assignment")),
        other => Err(type_mismatch("instance or map", other.type_name())),
    }
}

/// Dispatch a builtin method on a list, map or string.
///
/// Returns `None` when `receiver` has no builtin called `method`, so the
/// caller can report the miss with its own context.
pub fn call_builtin_method(receiver: &Value, method: &str, args: &[Value]) -> Option<EvalResult> {
    let result = match (receiver, method) {
        (Value::List(items), "push") => {
            items.borrow_mut().extend(args.iter().cloned());
            Ok(Value::Null)
        }
        (Value::List(items), "pop") => {
            expect_args(method, args, 0).map(|()| items.borrow_mut().pop().unwrap_or(Value::Null))
        }
        (Value::List(items), "contains") => expect_args(method, args, 1)
            .map(|()| Value::boolean(items.borrow().iter().any(|item| *item == args[0]))),
        (Value::Map(entries), "keys") => expect_args(method, args, 0).map(|()| {
            Value::list(entries.borrow().keys().map(Value::from_name).collect())
        }),
        (Value::Map(entries), "contains") => expect_args(method, args, 1).and_then(|()| {
            let key = expect_key(&args[0])?;
            Ok(Value::boolean(entries.borrow().contains_key(key)))
        }),
        (Value::Str(s), "contains") => expect_args(method, args, 1).and_then(|()| {
            let needle = args[0]
                .as_str()
                .ok_or_else(|| type_mismatch("string", args[0].type_name()))?;
            Ok(Value::boolean(s.contains(needle)))
        }),
        _ => return None,
    };
    Some(result)
}

fn expect_args(method: &str, args: &[Value], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(wrong_argument_count(method, expected, args.len()))
    }
}

fn expect_key(key: &Value) -> Result<&str, EvalError> {
    key.as_str()
        .ok_or_else(|| type_mismatch("string", key.type_name()))
}

/// Read `object[index]`.
pub fn index_value(object: &Value, index: &Value) -> EvalResult {
    match object {
        Value::List(items) => {
            let items = items.borrow();
            let i = list_index(index, items.len())?;
            Ok(items[i].clone())
        }
        Value::Map(entries) => {
            let key = expect_key(index)?;
            entries
                .borrow()
                .get(key)
                .cloned()
                .ok_or_else(|| key_not_found(key))
        }
        Value::Str(s) => {
            let len = s.chars().count();
            let i = list_index(index, len)?;
            s.chars()
                .nth(i)
                .map(|c| Value::string(c.to_string()))
                .ok_or_else(|| index_out_of_range(i as f64, len))
        }
        Value::Null => Err(null_reference("index")),
        other => Err(type_mismatch("list, map or string", other.type_name())),
    }
}

/// Write `object[index] = value`. Lists only overwrite existing positions;
/// maps insert or replace.
pub fn set_index(object: &Value, index: &Value, value: Value) -> Result<(), EvalError> {
    match object {
        Value::List(items) => {
            let mut items = items.borrow_mut();
            let i = list_index(index, items.len())?;
            items[i] = value;
            Ok(())
        }
        Value::Map(entries) => {
            let key = expect_key(index)?;
            entries.borrow_mut().insert(Name::from(key), value);
            Ok(())
        }
        Value::Null => Err(null_reference("index assignment")),
        other => Err(type_mismatch("list or map", other.type_name())),
    }
}

/// Index must be a non-negative integral number below `len`.
fn list_index(index: &Value, len: usize) -> Result<usize, EvalError> {
    let n = index
        .as_number()
        .ok_or_else(|| type_mismatch("number", index.type_name()))?;
    if n.fract() != 0.0 || n < 0.0 || n >= len as f64 {
        return Err(index_out_of_range(n, len));
    }
    Ok(n as usize)
}

/// Elements a `for` loop visits: list items (a snapshot), map keys in
/// insertion order, or the characters of a string.
pub fn iterate(value: &Value) -> Result<Vec<Value>, EvalError> {
    match value {
        Value::List(items) => Ok(items.borrow().clone()),
        Value::Map(entries) => Ok(entries.borrow().keys().map(Value::from_name).collect()),
        Value::Str(s) => Ok(s.chars().map(|c| Value::string(c.to_string())).collect()),
        Value::Null => Err(null_reference("iteration")),
        other => Err(type_mismatch("iterable", other.type_name())),
    }
}

/// Length used by `len(x)` and the `length` member.
pub fn length_of(value: &Value) -> EvalResult {
    match value {
        Value::List(items) => Ok(length_value(items.borrow().len())),
        Value::Map(entries) => Ok(length_value(entries.borrow().len())),
        Value::Str(s) => Ok(length_value(s.chars().count())),
        Value::Null => Err(null_reference("len")),
        other => Err(type_mismatch("list, map or string", other.type_name())),
    }
}

fn length_value(len: usize) -> Value {
    Value::Number(len as f64)
}

#[cfg(test)]
mod tests;
