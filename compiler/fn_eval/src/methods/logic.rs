//! `and`, `or` and `eq`, shared by numbers, strings and booleans.

use super::MethodDef;
use crate::errors::{argument_count_mismatch, EvalError, EvalResult};
use crate::value::Value;
use crate::Interpreter;

const OTHER: &[&str] = &["other"];

pub(super) const AND: MethodDef = MethodDef {
    name: "and",
    params: OTHER,
    func: and,
};

pub(super) const OR: MethodDef = MethodDef {
    name: "or",
    params: OTHER,
    func: or,
};

pub(super) const EQ: MethodDef = MethodDef {
    name: "eq",
    params: OTHER,
    func: eq,
};

fn other<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, EvalError> {
    match args {
        [other] => Ok(other),
        _ => Err(argument_count_mismatch(name, 1, args.len())),
    }
}

fn and(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let other = other("and", args)?;
    Ok(Value::Bool(receiver.is_truthy() && other.is_truthy()))
}

fn or(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let other = other("or", args)?;
    Ok(Value::Bool(receiver.is_truthy() || other.is_truthy()))
}

/// Payload equality; values of different variants are never equal.
fn eq(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let other = other("eq", args)?;
    Ok(Value::Bool(receiver == other))
}
