//! List iteration.

use super::MethodDef;
use crate::errors::{argument_count_mismatch, type_mismatch, EvalResult};
use crate::value::{Capabilities, Value};
use crate::Interpreter;

pub(super) const EACH: MethodDef = MethodDef {
    name: "each",
    params: &["fn"],
    func: each,
};

/// Call the argument once per item, in order. Stops at the first error.
fn each(interp: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let Value::List(list) = receiver else {
        return Err(type_mismatch("list", receiver.type_name()));
    };
    let [callee] = args else {
        return Err(argument_count_mismatch("each", 1, args.len()));
    };
    for item in list.items.iter() {
        callee.call(interp, std::slice::from_ref(item))?;
    }
    Ok(Value::Void)
}
