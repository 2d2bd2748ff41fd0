//! The `repl` command.
//!
//! Every line runs in one persistent scope, so definitions carry over.
//! Errors are reported and the session goes on. Environments no longer
//! reachable from the session scope are collected after each line.

use fn_eval::Capabilities;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::{describe_error, fail, RunOptions};

const PROMPT: &str = ">> ";

pub fn repl(options: &RunOptions) {
    println!("Fn v{}", env!("CARGO_PKG_VERSION"));

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => fail(format_args!("cannot start line editor: {err}")),
    };

    let mut interp = options.interpreter();
    let mut scope = interp.new_scope();

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "exit" || trimmed == "quit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                if let Err(err) = rl.add_history_entry(trimmed) {
                    tracing::warn!(%err, "history entry dropped");
                }

                match interp.run_source_in(&line, &scope) {
                    Ok(result) => {
                        if !result.value.is_void() {
                            println!("{}", result.value.display(interp.heap()));
                        }
                        scope = result.scope;
                        interp.collect_garbage(std::slice::from_ref(&scope));
                    }
                    Err(err) => eprintln!("error: {}", describe_error("repl", &line, &err)),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("error: {err}");
                break;
            }
        }
    }
}
