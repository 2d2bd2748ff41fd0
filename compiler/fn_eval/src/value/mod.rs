//! Runtime values.
//!
//! Every value is also a scope: it has definitions that can be looked up
//! through `.`, it may accept new definitions, it renders to text and it
//! may be callable. These operations make up [`Capabilities`].

mod display;
mod native;
mod number;

use std::rc::Rc;

use fn_ir::Expr;
use rustc_hash::FxHashMap;

use crate::environment::{EnvId, Heap};
use crate::errors::{
    argument_count_mismatch, index_out_of_bounds, not_callable, not_definable, type_mismatch,
    EvalResult,
};
use crate::{methods, Interpreter};

pub use native::{Arity, FreeFn, MethodFn, NativeBody, NativeFunction};
pub use number::{Number, NumberKind};

/// Name to value map returned by [`Capabilities::definitions`].
pub type Definitions = FxHashMap<String, Value>;

/// The operations every value supports.
///
/// Defaults describe a value with no definitions that rejects both
/// `define` and `call`.
pub trait Capabilities {
    fn type_name(&self) -> &'static str;

    /// Everything visible through this value, own definitions winning.
    fn definitions(&self, _heap: &Heap) -> Definitions {
        Definitions::default()
    }

    /// Resolve one name. Same result as indexing [`Capabilities::definitions`].
    fn lookup(&self, heap: &Heap, name: &str) -> Option<Value> {
        self.definitions(heap).remove(name)
    }

    /// Add a definition, returning the scope that now holds it.
    fn define(&self, _heap: &mut Heap, _name: &str, _value: Value) -> EvalResult {
        Err(not_definable(self.type_name()))
    }

    fn display(&self, heap: &Heap) -> String;

    fn call(&self, _interp: &mut Interpreter, _args: &[Value]) -> EvalResult {
        Err(not_callable(self.type_name()))
    }
}

/// Fixed, ordered sequence of values.
#[derive(Clone, Debug, PartialEq)]
pub struct List {
    pub items: Rc<[Value]>,
}

impl List {
    pub fn new(items: Vec<Value>) -> Self {
        List {
            items: items.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A user function: parameters, body and the scope it was created in.
#[derive(Debug)]
pub struct Closure {
    pub params: Vec<String>,
    pub body: Rc<[Expr]>,
    pub captured: Value,
}

#[derive(Clone, Debug)]
pub enum Value {
    Void,
    Number(Number),
    Str(Rc<str>),
    Bool(bool),
    List(List),
    NativeFunction(NativeFunction),
    Closure(Rc<Closure>),
    Environment(EnvId),
}

impl Value {
    pub fn number(text: &str) -> Value {
        Value::Number(Number::from_text(text))
    }

    pub fn int(value: i64) -> Value {
        Value::Number(Number::from_i64(value))
    }

    pub fn string(text: &str) -> Value {
        Value::Str(text.into())
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(List::new(items))
    }

    /// Only `false` is falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    pub fn as_env(&self) -> Option<EnvId> {
        match self {
            Value::Environment(id) => Some(*id),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::NativeFunction(a), Value::NativeFunction(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Environment(a), Value::Environment(b)) => a == b,
            _ => false,
        }
    }
}

impl Capabilities for Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Void => "void",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::NativeFunction(_) | Value::Closure(_) => "function",
            Value::Environment(_) => "environment",
        }
    }

    fn definitions(&self, heap: &Heap) -> Definitions {
        match self {
            Value::Environment(id) => id.definitions(heap),
            Value::List(list) => list.definitions(heap),
            _ => methods::bind_all(self),
        }
    }

    fn lookup(&self, heap: &Heap, name: &str) -> Option<Value> {
        match self {
            Value::Environment(id) => id.lookup(heap, name),
            Value::List(list) => list.lookup(heap, name),
            _ => methods::bind(self, name),
        }
    }

    fn define(&self, heap: &mut Heap, name: &str, value: Value) -> EvalResult {
        match self {
            Value::Environment(id) => id.define(heap, name, value),
            _ => Err(not_definable(self.type_name())),
        }
    }

    fn display(&self, heap: &Heap) -> String {
        display::render(self, heap)
    }

    fn call(&self, interp: &mut Interpreter, args: &[Value]) -> EvalResult {
        match self {
            Value::NativeFunction(func) => func.call(interp, args),
            Value::Closure(closure) => closure.call(interp, args),
            Value::List(list) => list.call(interp, args),
            Value::Environment(id) => id.call(interp, args),
            _ => Err(not_callable(self.type_name())),
        }
    }
}

impl Capabilities for List {
    fn type_name(&self) -> &'static str {
        "list"
    }

    /// List methods plus every root builtin.
    fn definitions(&self, heap: &Heap) -> Definitions {
        let mut defs = heap.root().definitions(heap);
        defs.extend(methods::bind_all(&Value::List(self.clone())));
        defs
    }

    fn lookup(&self, heap: &Heap, name: &str) -> Option<Value> {
        methods::bind(&Value::List(self.clone()), name).or_else(|| heap.root().lookup(heap, name))
    }

    fn display(&self, heap: &Heap) -> String {
        display::render(&Value::List(self.clone()), heap)
    }

    /// Index with a single integer.
    fn call(&self, _interp: &mut Interpreter, args: &[Value]) -> EvalResult {
        let [arg] = args else {
            return Err(argument_count_mismatch("list", 1, args.len()));
        };
        let index = match arg {
            // Integers too large for i64 are out of bounds for any list.
            Value::Number(n) if n.kind() == NumberKind::Int => n.as_i64().unwrap_or(i64::MAX),
            Value::Number(_) => return Err(type_mismatch("integer index", "float")),
            other => return Err(type_mismatch("integer index", other.type_name())),
        };
        usize::try_from(index)
            .ok()
            .and_then(|idx| self.items.get(idx))
            .cloned()
            .ok_or_else(|| index_out_of_bounds(index, self.len()))
    }
}

impl Capabilities for NativeFunction {
    fn type_name(&self) -> &'static str {
        "function"
    }

    fn definitions(&self, _heap: &Heap) -> Definitions {
        methods::bind_all(&Value::NativeFunction(self.clone()))
    }

    fn display(&self, _heap: &Heap) -> String {
        self.to_string()
    }

    fn call(&self, interp: &mut Interpreter, args: &[Value]) -> EvalResult {
        self.invoke(interp, args)
    }
}

impl Capabilities for Rc<Closure> {
    fn type_name(&self) -> &'static str {
        "function"
    }

    fn definitions(&self, _heap: &Heap) -> Definitions {
        methods::bind_all(&Value::Closure(Rc::clone(self)))
    }

    fn display(&self, _heap: &Heap) -> String {
        format!("({}) {{ ... }}", self.params.join(", "))
    }

    fn call(&self, interp: &mut Interpreter, args: &[Value]) -> EvalResult {
        interp.call_closure(self, args)
    }
}
