//! Tree-walking evaluator.
//!
//! Evaluation threads an ambient scope through a statement sequence: each
//! statement yields a value and the scope the next statement runs in.
//! Scopes are values, so `a.b` evaluates `b` with `a` as the scope. In
//! `a.f(x)` only `f` resolves in `a`; `x` is evaluated where the call is
//! written.
//!
//! `=`, `.`, `import!` and `import` are handled here; every other call
//! resolves its operator in the current scope and calls it.

mod builder;
mod call_guard;
mod import;

use std::fmt;
use std::rc::Rc;

use fn_ir::{Conditional, Expr, FunctionCall};
use fn_parse::ParseError;
use fn_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::environment::Heap;
use crate::errors::{
    argument_count_mismatch, no_matching_branch, recursion_limit_exceeded, type_mismatch,
    undefined_identifier, EvalError, EvalResult,
};
use crate::loader::SourceLoader;
use crate::print_handler::SharedPrintHandler;
use crate::value::{Capabilities, Closure, Value};

pub use builder::InterpreterBuilder;
use call_guard::CallGuard;

/// Default limit on nested closure calls and imports.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// A value together with the scope the next statement runs in.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluated {
    pub value: Value,
    pub scope: Value,
}

impl Evaluated {
    pub fn new(value: Value, scope: &Value) -> Self {
        Evaluated {
            value,
            scope: scope.clone(),
        }
    }
}

pub type EvalOutcome = Result<Evaluated, EvalError>;

/// Failure to run a piece of source text.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceError {
    Syntax(ParseError),
    Runtime(EvalError),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Syntax(err) => write!(f, "{err}"),
            SourceError::Runtime(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<ParseError> for SourceError {
    fn from(err: ParseError) -> Self {
        SourceError::Syntax(err)
    }
}

impl From<EvalError> for SourceError {
    fn from(err: EvalError) -> Self {
        SourceError::Runtime(err)
    }
}

pub struct Interpreter {
    heap: Heap,
    print_handler: SharedPrintHandler,
    loader: Box<dyn SourceLoader>,
    max_call_depth: usize,
    call_depth: usize,
}

impl Interpreter {
    /// Interpreter printing to stdout and importing from the working directory.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// A fresh top-level scope: an empty child of the builtins root.
    pub fn new_scope(&mut self) -> Value {
        let root = self.heap.root();
        self.heap.child_of(&root)
    }

    /// Evaluate a program in a fresh top-level scope.
    pub fn run(&mut self, program: &[Expr]) -> EvalOutcome {
        let scope = self.new_scope();
        self.eval_sequence(program, &scope)
    }

    /// Parse and evaluate `source` in a fresh top-level scope.
    pub fn run_source(&mut self, source: &str) -> Result<Evaluated, SourceError> {
        let scope = self.new_scope();
        self.run_source_in(source, &scope)
    }

    /// Parse and evaluate `source` in an existing scope.
    ///
    /// Returns the scope to use for the next chunk, which lets a REPL keep
    /// definitions across lines.
    pub fn run_source_in(&mut self, source: &str, scope: &Value) -> Result<Evaluated, SourceError> {
        let program = fn_parse::parse_source(source)?;
        Ok(self.eval_sequence(&program, scope)?)
    }

    /// Evaluate statements in order, threading the scope.
    ///
    /// An empty sequence yields `void` and leaves the scope unchanged.
    pub fn eval_sequence(&mut self, exprs: &[Expr], scope: &Value) -> EvalOutcome {
        let mut current = Evaluated::new(Value::Void, scope);
        for expr in exprs {
            current = self.eval(expr, &current.scope)?;
        }
        Ok(current)
    }

    pub fn eval(&mut self, expr: &Expr, scope: &Value) -> EvalOutcome {
        ensure_sufficient_stack(|| self.eval_inner(expr, scope))
    }

    fn eval_inner(&mut self, expr: &Expr, scope: &Value) -> EvalOutcome {
        match expr {
            Expr::Number(text) => Ok(Evaluated::new(Value::number(text), scope)),
            Expr::Str(text) => Ok(Evaluated::new(Value::string(text), scope)),
            Expr::Bool(value) => Ok(Evaluated::new(Value::Bool(*value), scope)),
            Expr::Identifier(ident) => {
                let value = scope
                    .lookup(&self.heap, &ident.name)
                    .ok_or_else(|| undefined_identifier(&ident.name))?;
                Ok(Evaluated::new(value, scope))
            }
            Expr::Block(block) => {
                let child = self.heap.child_of(scope);
                self.eval_sequence(&block.body, &child)?;
                Ok(Evaluated::new(child, scope))
            }
            Expr::FunctionPrototype(proto) => {
                let closure = Closure {
                    params: proto.params.iter().map(|p| p.name.clone()).collect(),
                    body: Rc::clone(&proto.body.body),
                    captured: scope.clone(),
                };
                Ok(Evaluated::new(Value::Closure(Rc::new(closure)), scope))
            }
            Expr::Conditional(cond) => self.eval_conditional(cond, scope),
            Expr::FunctionCall(call) => self.eval_call(call, scope),
        }
    }

    /// First truthy branch runs in a fresh child scope.
    fn eval_conditional(&mut self, cond: &Conditional, scope: &Value) -> EvalOutcome {
        for branch in &cond.branches {
            let test = self.eval(&branch.condition, scope)?.value;
            if test.is_truthy() {
                let child = self.heap.child_of(scope);
                let result = self.eval_sequence(&branch.body.body, &child)?;
                return Ok(Evaluated::new(result.value, scope));
            }
        }
        Err(no_matching_branch())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(operator = %call.operator.name))]
    fn eval_call(&mut self, call: &FunctionCall, scope: &Value) -> EvalOutcome {
        match call.operator.name.as_str() {
            "=" => self.eval_definition(call, scope, scope),
            "." => self.eval_dereference(call, scope, scope),
            "import!" => self.eval_import(call, scope, true),
            "import" => self.eval_import(call, scope, false),
            _ => {
                let value = self.eval_named_call(call, scope, scope)?;
                Ok(Evaluated::new(value, scope))
            }
        }
    }

    /// Resolve the operator in `target` and call it with arguments
    /// evaluated in `caller`.
    fn eval_named_call(&mut self, call: &FunctionCall, target: &Value, caller: &Value) -> EvalResult {
        let name = call.operator.name.as_str();
        let callee = target
            .lookup(&self.heap, name)
            .ok_or_else(|| undefined_identifier(name))?;
        let args = call
            .args
            .iter()
            .map(|arg| self.eval(arg, caller).map(|e| e.value))
            .collect::<Result<Vec<_>, _>>()?;
        callee.call(self, &args)
    }

    /// `=(name, value)`: evaluate `value` in `caller` and define it in
    /// `target`. The target scope is both the result and the next scope.
    fn eval_definition(&mut self, call: &FunctionCall, target: &Value, caller: &Value) -> EvalOutcome {
        let [name, value] = call.args.as_slice() else {
            return Err(argument_count_mismatch("=", 2, call.args.len()));
        };
        let Expr::Identifier(name) = name else {
            return Err(type_mismatch("identifier", "expression"));
        };
        let value = self.eval(value, caller)?.value;
        let scope = target.define(&mut self.heap, &name.name, value)?;
        Ok(Evaluated {
            value: scope.clone(),
            scope,
        })
    }

    /// `.(receiver, member)`: `member` resolves names in the receiver,
    /// while arguments and assigned values still evaluate in `caller`.
    fn eval_dereference(&mut self, call: &FunctionCall, scope: &Value, caller: &Value) -> EvalOutcome {
        let [receiver, member] = call.args.as_slice() else {
            return Err(argument_count_mismatch(".", 2, call.args.len()));
        };
        let receiver = self.eval(receiver, scope)?.value;
        let value = self.eval_member(member, &receiver, caller)?;
        Ok(Evaluated::new(value, scope))
    }

    fn eval_member(&mut self, member: &Expr, receiver: &Value, caller: &Value) -> EvalResult {
        let Expr::FunctionCall(call) = member else {
            return Ok(self.eval(member, receiver)?.value);
        };
        match call.operator.name.as_str() {
            "=" => Ok(self.eval_definition(call, receiver, caller)?.value),
            "." => Ok(self.eval_dereference(call, receiver, caller)?.value),
            "import!" | "import" => Ok(self.eval(member, receiver)?.value),
            _ => self.eval_named_call(call, receiver, caller),
        }
    }

    /// Drop every environment not reachable from the builtins root or from
    /// `roots`, returning how many were freed.
    ///
    /// Values held anywhere else must be passed in `roots`; their
    /// environments may otherwise be reused. Drivers call this between
    /// top-level runs, never from inside an evaluation.
    pub fn collect_garbage(&mut self, roots: &[Value]) -> usize {
        let freed = self.heap.collect(roots);
        debug!(freed, live = self.heap.len(), "collected environments");
        freed
    }

    /// Call a closure in a fresh environment parented to its captured scope.
    pub(crate) fn call_closure(&mut self, closure: &Closure, args: &[Value]) -> EvalResult {
        if args.len() != closure.params.len() {
            return Err(argument_count_mismatch(
                "function",
                closure.params.len(),
                args.len(),
            ));
        }
        let mut frame = self.enter_call()?;
        let env = frame.heap.alloc(Some(closure.captured.clone()));
        for (param, arg) in closure.params.iter().zip(args) {
            frame.heap.define(env, param, arg.clone())?;
        }
        let result = frame.eval_sequence(&closure.body, &Value::Environment(env))?;
        Ok(result.value)
    }

    /// Count one level of call depth until the guard drops.
    fn enter_call(&mut self) -> Result<CallGuard<'_>, EvalError> {
        if self.call_depth >= self.max_call_depth {
            return Err(recursion_limit_exceeded(self.max_call_depth));
        }
        Ok(CallGuard::new(self))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
