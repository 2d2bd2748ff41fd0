//! Arithmetic and ordering on numbers.

use super::MethodDef;
use crate::errors::{argument_count_mismatch, type_mismatch, EvalError, EvalResult};
use crate::value::{Capabilities, Number, Value};
use crate::Interpreter;

const OTHER: &[&str] = &["other"];

pub(super) const ADD: MethodDef = MethodDef {
    name: "+",
    params: OTHER,
    func: add,
};

pub(super) const SUB: MethodDef = MethodDef {
    name: "-",
    params: OTHER,
    func: sub,
};

pub(super) const MUL: MethodDef = MethodDef {
    name: "*",
    params: OTHER,
    func: mul,
};

pub(super) const DIV: MethodDef = MethodDef {
    name: "/",
    params: OTHER,
    func: div,
};

pub(super) const MORE_THAN: MethodDef = MethodDef {
    name: "moreThan",
    params: OTHER,
    func: more_than,
};

pub(super) const LESS_THAN: MethodDef = MethodDef {
    name: "lessThan",
    params: OTHER,
    func: less_than,
};

fn as_number(value: &Value) -> Result<&Number, EvalError> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(type_mismatch("number", other.type_name())),
    }
}

/// Receiver and single argument, both numbers.
fn operands<'a>(
    receiver: &'a Value,
    args: &'a [Value],
) -> Result<(&'a Number, &'a Number), EvalError> {
    let [rhs] = args else {
        return Err(argument_count_mismatch("number method", 1, args.len()));
    };
    Ok((as_number(receiver)?, as_number(rhs)?))
}

fn add(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let (lhs, rhs) = operands(receiver, args)?;
    Ok(Value::Number(lhs.add(rhs)))
}

fn sub(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let (lhs, rhs) = operands(receiver, args)?;
    Ok(Value::Number(lhs.sub(rhs)))
}

fn mul(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let (lhs, rhs) = operands(receiver, args)?;
    Ok(Value::Number(lhs.mul(rhs)))
}

fn div(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let (lhs, rhs) = operands(receiver, args)?;
    Ok(Value::Number(lhs.div(rhs)?))
}

fn more_than(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let (lhs, rhs) = operands(receiver, args)?;
    Ok(Value::Bool(lhs.more_than(rhs)))
}

fn less_than(_: &mut Interpreter, receiver: &Value, args: &[Value]) -> EvalResult {
    let (lhs, rhs) = operands(receiver, args)?;
    Ok(Value::Bool(lhs.less_than(rhs)))
}
