//! Command implementations for the `fn` binary.

mod debug;
mod repl;
mod run;

pub use debug::{lex_file, parse_file};
pub use repl::repl;
pub use run::run_file;

use std::fmt;
use std::io;

use fn_eval::{Interpreter, SourceError};
use fn_ir::line_col;

/// A command line problem that stops the driver before or after a run.
#[derive(Debug, PartialEq, Eq)]
pub enum CliError {
    InvalidMaxDepth(String),
    UnknownOption(String),
    Read { path: String, reason: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidMaxDepth(value) => {
                write!(f, "invalid --max-depth value '{value}' (expected a positive integer)")
            }
            CliError::UnknownOption(option) => write!(f, "unknown option '{option}'"),
            CliError::Read { path, reason } => write!(f, "cannot read '{path}': {reason}"),
        }
    }
}

/// Report `err` on stderr and exit with status 1.
pub fn fail(err: impl fmt::Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}

/// Options shared by `run` and `repl`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub path: Option<String>,
    pub max_depth: Option<usize>,
}

impl RunOptions {
    pub fn interpreter(&self) -> Interpreter {
        let mut builder = Interpreter::builder();
        if let Some(depth) = self.max_depth {
            builder = builder.max_call_depth(depth);
        }
        builder.build()
    }
}

/// Parse `[path] [--max-depth=N]`. Extra positional arguments are ignored.
pub fn parse_run_options(args: &[String]) -> Result<RunOptions, CliError> {
    let mut options = RunOptions::default();
    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            match depth.parse::<usize>() {
                Ok(depth) if depth > 0 => options.max_depth = Some(depth),
                _ => return Err(CliError::InvalidMaxDepth(depth.to_string())),
            }
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownOption(arg.clone()));
        } else if options.path.is_none() {
            options.path = Some(arg.clone());
        }
    }
    Ok(options)
}

/// Install a hierarchical tracing subscriber when `RUST_LOG` is set.
pub fn init_tracing() {
    use tracing_subscriber::{prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

/// Read a source file as UTF-8 text.
pub(super) fn read_source(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|err| CliError::Read {
        path: path.to_string(),
        reason: match err.kind() {
            io::ErrorKind::NotFound => "no such file".to_string(),
            io::ErrorKind::PermissionDenied => "permission denied".to_string(),
            io::ErrorKind::InvalidData => "not valid UTF-8".to_string(),
            _ => err.to_string(),
        },
    })
}

/// Render a run failure. Syntax errors carry `line:col`.
pub(super) fn describe_error(origin: &str, source: &str, err: &SourceError) -> String {
    match err {
        SourceError::Syntax(err) => {
            let (line, col) = line_col(source, err.span.start);
            format!("{origin}:{line}:{col}: {err}")
        }
        SourceError::Runtime(err) => format!("{origin}: {err}"),
    }
}
