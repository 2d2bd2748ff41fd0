//! `InterpreterBuilder` for creating configured interpreters.

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::environment::Heap;
use crate::loader::{FileLoader, SourceLoader};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for [`Interpreter`].
///
/// Defaults: output to stdout, imports read from the working directory,
/// call depth limited to [`DEFAULT_MAX_CALL_DEPTH`].
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    loader: Option<Box<dyn SourceLoader>>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            loader: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Where `print` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Where `import` and `import!` read source units from.
    #[must_use]
    pub fn loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Maximum nesting of closure calls and imports.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Build the interpreter. The builtins root is created here.
    pub fn build(self) -> Interpreter {
        Interpreter {
            heap: Heap::new(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            loader: self
                .loader
                .unwrap_or_else(|| Box::new(FileLoader::new())),
            max_call_depth: self.max_call_depth,
            call_depth: 0,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
