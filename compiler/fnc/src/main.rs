//! Fn command line driver.

mod commands;

use commands::{fail, init_tracing, lex_file, parse_file, parse_run_options, repl, run_file};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let options = parse_run_options(&args[2..]).unwrap_or_else(|err| fail(err));
            let Some(path) = options.path.as_deref() else {
                eprintln!("error: missing file path");
                eprintln!("Usage: fn run <file.fn> [--max-depth=N]");
                std::process::exit(1);
            };
            run_file(path, &options);
        }
        "repl" => {
            let options = parse_run_options(&args[2..]).unwrap_or_else(|err| fail(err));
            repl(&options);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: fn lex <file.fn>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: fn parse <file.fn>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Fn {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare `.fn` path runs the file
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("fn"))
            {
                let options = parse_run_options(&args[1..]).unwrap_or_else(|err| fail(err));
                run_file(command, &options);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Fn language interpreter");
    println!();
    println!("Usage: fn <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.fn>        Evaluate an Fn program");
    println!("  repl                 Start an interactive session");
    println!("  parse <file.fn>      Parse and print the expression tree");
    println!("  lex <file.fn>        Tokenize and display tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --max-depth=<n>      Limit nested calls and imports (default: {})", fn_eval::DEFAULT_MAX_CALL_DEPTH);
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=fn_eval=debug) to trace evaluation.");
}
