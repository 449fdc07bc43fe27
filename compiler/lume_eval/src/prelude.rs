//! Built-in functions every context starts with.

use lume_runtime::access::length_of;
use lume_runtime::{NativeFunction, Value};

use crate::print_handler::SharedPrintHandler;

/// `print`, `len`, `str` and `type_of`. `print` writes to `print`.
pub(crate) fn builtins(print: &SharedPrintHandler) -> Vec<NativeFunction> {
    let handler = SharedPrintHandler::clone(print);
    vec![
        NativeFunction::new("print", None, move |args| {
            let line = args
                .iter()
                .map(Value::display_string)
                .collect::<Vec<_>>()
                .join(" ");
            handler.println(&line);
            Ok(Value::Null)
        }),
        NativeFunction::new("len", Some(1), |args| length_of(&args[0])),
        NativeFunction::new("str", Some(1), |args| {
            Ok(Value::string(args[0].display_string()))
        }),
        NativeFunction::new("type_of", Some(1), |args| {
            Ok(Value::string(args[0].type_name()))
        }),
    ]
}
