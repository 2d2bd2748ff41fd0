//! Host functions exposed to Fn code.

use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::errors::{argument_count_mismatch, EvalResult};
use crate::Interpreter;

/// Signature of a free builtin.
pub type FreeFn = fn(&mut Interpreter, &[Value]) -> EvalResult;

/// Signature of a method: interpreter, receiver, arguments.
pub type MethodFn = fn(&mut Interpreter, &Value, &[Value]) -> EvalResult;

/// Accepted argument counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Exactly these formal parameters.
    Fixed(&'static [&'static str]),
    Variadic,
}

#[derive(Clone, Debug)]
pub enum NativeBody {
    Free(FreeFn),
    /// A method bound to the value it was looked up on.
    Bound { method: MethodFn, receiver: Rc<Value> },
}

#[derive(Clone, Debug)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: Arity,
    pub body: NativeBody,
}

impl NativeFunction {
    pub fn free(name: &'static str, arity: Arity, func: FreeFn) -> Self {
        NativeFunction {
            name,
            arity,
            body: NativeBody::Free(func),
        }
    }

    pub fn bound(
        name: &'static str,
        params: &'static [&'static str],
        method: MethodFn,
        receiver: Value,
    ) -> Self {
        NativeFunction {
            name,
            arity: Arity::Fixed(params),
            body: NativeBody::Bound {
                method,
                receiver: Rc::new(receiver),
            },
        }
    }

    /// Check the argument count, then run the host function.
    pub fn invoke(&self, interp: &mut Interpreter, args: &[Value]) -> EvalResult {
        if let Arity::Fixed(params) = self.arity {
            if params.len() != args.len() {
                return Err(argument_count_mismatch(self.name, params.len(), args.len()));
            }
        }
        match &self.body {
            NativeBody::Free(func) => func(interp, args),
            NativeBody::Bound { method, receiver } => method(interp, receiver, args),
        }
    }
}

/// Same builtin, and for methods the same receiver.
impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name {
            return false;
        }
        match (&self.body, &other.body) {
            (NativeBody::Free(_), NativeBody::Free(_)) => true,
            (NativeBody::Bound { receiver: a, .. }, NativeBody::Bound { receiver: b, .. }) => {
                a == b
            }
            _ => false,
        }
    }
}

impl fmt::Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity {
            Arity::Fixed(params) => write!(f, "({}) {{ ... }}", params.join(", ")),
            Arity::Variadic => write!(f, "{}(...)", self.name),
        }
    }
}
