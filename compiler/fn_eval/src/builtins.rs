//! Builtins bound in the root environment.
//!
//! The arithmetic operators dispatch to the first argument's own method of
//! the same name, so `1 + 2` ends up in the number `+` method with `2` as
//! its argument.

use crate::errors::{type_mismatch, EvalResult};
use crate::methods;
use crate::value::{Arity, Capabilities, NativeFunction, Value};
use crate::Interpreter;

const BINARY: Arity = Arity::Fixed(&["a", "b"]);
const UNARY: Arity = Arity::Fixed(&["a"]);

/// Name and value of every root binding.
pub fn root_bindings() -> Vec<(&'static str, Value)> {
    let natives = [
        NativeFunction::free("+", BINARY, add),
        NativeFunction::free("-", BINARY, sub),
        NativeFunction::free("*", BINARY, mul),
        NativeFunction::free("/", BINARY, div),
        NativeFunction::free("and", BINARY, and),
        NativeFunction::free("or", BINARY, or),
        NativeFunction::free("not", UNARY, not),
        NativeFunction::free("eq", BINARY, eq),
        NativeFunction::free("print", UNARY, print),
        NativeFunction::free("List", Arity::Variadic, list),
        NativeFunction::free("Boolean", Arity::Fixed(&["obj"]), boolean),
        NativeFunction::free("String", Arity::Fixed(&["obj"]), string),
    ];
    natives
        .into_iter()
        .map(|native| (native.name, Value::NativeFunction(native)))
        .collect()
}

/// Call `args[0]`'s own `method` with the remaining arguments.
fn call_on_first(interp: &mut Interpreter, method: &str, args: &[Value]) -> EvalResult {
    let Some((receiver, rest)) = args.split_first() else {
        return Err(type_mismatch(format!("a value with `{method}`"), "nothing"));
    };
    // Inherited bindings do not count: an environment or list would
    // otherwise find this very builtin in the root.
    let own = match receiver {
        Value::Environment(id) => interp.heap().get(*id).own(method).cloned(),
        _ => methods::bind(receiver, method),
    };
    let Some(callee) = own else {
        return Err(type_mismatch(
            format!("a value with `{method}`"),
            receiver.type_name(),
        ));
    };
    callee.call(interp, rest)
}

fn add(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    call_on_first(interp, "+", args)
}

fn sub(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    call_on_first(interp, "-", args)
}

fn mul(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    call_on_first(interp, "*", args)
}

fn div(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    call_on_first(interp, "/", args)
}

fn string(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    call_on_first(interp, "asString", args)
}

fn and(_: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(args.iter().all(Value::is_truthy)))
}

fn or(_: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(args.iter().any(Value::is_truthy)))
}

fn not(_: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(!args.iter().all(Value::is_truthy)))
}

fn eq(_: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(args.windows(2).all(|pair| pair[0] == pair[1])))
}

fn boolean(_: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(Value::Bool(args.iter().all(Value::is_truthy)))
}

fn print(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    for arg in args {
        let text = arg.display(interp.heap());
        interp.print_handler().println(&text);
    }
    Ok(Value::Void)
}

fn list(_: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(Value::list(args.to_vec()))
}
