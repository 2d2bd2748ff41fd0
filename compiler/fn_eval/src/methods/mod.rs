//! Methods carried by primitive values.
//!
//! Each variant has a static table of [`MethodDef`]s. Looking a name up on
//! a value binds the matching method to that value as its receiver.
//!
//! | Variant | Methods |
//! |---------|---------|
//! | number | `+ - * /`, `and or eq`, `moreThan lessThan`, `asString` |
//! | string | `eq and or`, `asString` |
//! | boolean | `and or eq`, `asString` |
//! | list | `each`, `asString` |
//! | function | `asString` |

mod collections;
mod logic;
mod numeric;

use crate::errors::EvalResult;
use crate::value::{Capabilities, Definitions, MethodFn, NativeFunction, Value};
use crate::Interpreter;

/// A method in a variant's table.
pub struct MethodDef {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub func: MethodFn,
}

impl MethodDef {
    fn bind(&self, receiver: &Value) -> Value {
        Value::NativeFunction(NativeFunction::bound(
            self.name,
            self.params,
            self.func,
            receiver.clone(),
        ))
    }
}

pub(crate) const AS_STRING: MethodDef = MethodDef {
    name: "asString",
    params: &[],
    func: as_string,
};

fn as_string(interp: &mut Interpreter, receiver: &Value, _args: &[Value]) -> EvalResult {
    Ok(Value::string(&receiver.display(interp.heap())))
}

static NUMBER_METHODS: &[MethodDef] = &[
    numeric::ADD,
    numeric::SUB,
    numeric::MUL,
    numeric::DIV,
    logic::AND,
    logic::OR,
    logic::EQ,
    numeric::MORE_THAN,
    numeric::LESS_THAN,
    AS_STRING,
];

static STRING_METHODS: &[MethodDef] = &[logic::EQ, logic::AND, logic::OR, AS_STRING];

static BOOL_METHODS: &[MethodDef] = &[logic::AND, logic::OR, logic::EQ, AS_STRING];

static LIST_METHODS: &[MethodDef] = &[collections::EACH, AS_STRING];

static FUNCTION_METHODS: &[MethodDef] = &[AS_STRING];

/// The method table for `value`'s variant.
///
/// Environments and `void` have none.
pub fn table(value: &Value) -> &'static [MethodDef] {
    match value {
        Value::Number(_) => NUMBER_METHODS,
        Value::Str(_) => STRING_METHODS,
        Value::Bool(_) => BOOL_METHODS,
        Value::List(_) => LIST_METHODS,
        Value::NativeFunction(_) | Value::Closure(_) => FUNCTION_METHODS,
        Value::Void | Value::Environment(_) => &[],
    }
}

/// Look up `name` in `value`'s table, bound to `value`.
pub fn bind(value: &Value, name: &str) -> Option<Value> {
    table(value)
        .iter()
        .find(|def| def.name == name)
        .map(|def| def.bind(value))
}

/// Every method in `value`'s table, bound to `value`.
pub fn bind_all(value: &Value) -> Definitions {
    table(value)
        .iter()
        .map(|def| (def.name.to_string(), def.bind(value)))
        .collect()
}
