//! End-to-end tests running Fn source through the interpreter.

mod import_tests;
mod semantics_tests;

use crate::{buffer_handler, Evaluated, Interpreter, MemoryLoader, SourceError};

/// Output and outcome of running one program.
pub(crate) struct Run {
    pub result: Result<Evaluated, SourceError>,
    pub output: String,
    pub interp: Interpreter,
}

impl Run {
    /// Display text of the program's final value.
    #[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
    pub fn value_text(&self) -> String {
        use crate::Capabilities;
        self.result
            .as_ref()
            .unwrap()
            .value
            .display(self.interp.heap())
    }

    #[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
    pub fn error_kind(&self) -> crate::EvalErrorKind {
        match self.result.as_ref().unwrap_err() {
            SourceError::Runtime(err) => err.kind.clone(),
            SourceError::Syntax(err) => panic!("unexpected syntax error: {err}"),
        }
    }
}

pub(crate) fn run_with(source: &str, loader: MemoryLoader) -> Run {
    let handler = buffer_handler();
    let mut interp = Interpreter::builder()
        .print_handler(handler.clone())
        .loader(loader)
        .build();
    let result = interp.run_source(source);
    Run {
        result,
        output: handler.get_output(),
        interp,
    }
}

pub(crate) fn run(source: &str) -> Run {
    run_with(source, MemoryLoader::new())
}
