//! Fn Eval - the Fn language runtime.
//!
//! Everything in Fn is a scope. Numbers, strings, lists and functions all
//! expose definitions through `.`, and environments are ordinary values
//! that can be passed around, printed and called. This crate provides:
//!
//! - [`Value`] and the [`Capabilities`] every value supports
//! - [`Heap`], the arena holding every [`Environment`]
//! - [`Interpreter`], which evaluates parsed programs
//! - the builtins of the root environment and per-type methods
//!
//! ```ignore
//! let mut interp = Interpreter::new();
//! let result = interp.run_source("x = 2.5 + 2; print(x)")?;
//! ```

mod builtins;
mod environment;
pub mod errors;
mod interpreter;
mod loader;
pub mod methods;
mod print_handler;
mod value;

pub use environment::{EnvId, Environment, Heap};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{
    EvalOutcome, Evaluated, Interpreter, InterpreterBuilder, SourceError, DEFAULT_MAX_CALL_DEPTH,
};
pub use loader::{FileLoader, LoadError, MemoryLoader, SourceLoader};
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
    StdoutPrintHandler,
};
pub use value::{
    Arity, Capabilities, Closure, Definitions, FreeFn, List, MethodFn, NativeBody, NativeFunction,
    Number, NumberKind, Value,
};

#[cfg(test)]
mod tests;
