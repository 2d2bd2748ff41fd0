//! The `run` command: lex, parse and evaluate an Fn source file.

use super::{describe_error, fail, read_source, RunOptions};

/// Run a file to completion. The first error halts with status 1.
pub fn run_file(path: &str, options: &RunOptions) {
    let content = read_source(path).unwrap_or_else(|err| fail(err));
    let mut interp = options.interpreter();

    if let Err(err) = interp.run_source(&content) {
        fail(describe_error(path, &content, &err));
    }
}
