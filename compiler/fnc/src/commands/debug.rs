//! Debug commands: `lex` and `parse` for inspecting the front end.

use fn_ir::line_col;

use super::{fail, read_source};

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_source(path).unwrap_or_else(|err| fail(err));

    let tokens = match fn_lexer::lex(&content) {
        Ok(tokens) => tokens,
        Err(err) => {
            let (line, col) = line_col(&content, err.span.start);
            fail(format_args!("{path}:{line}:{col}: {err}"));
        }
    };

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for tok in &tokens {
        println!("  {:?} @ {}", tok.kind, tok.span);
    }
}

/// Parse a file and print each top-level expression in call form.
pub fn parse_file(path: &str) {
    let content = read_source(path).unwrap_or_else(|err| fail(err));

    let program = match fn_parse::parse_source(&content) {
        Ok(program) => program,
        Err(err) => {
            let (line, col) = line_col(&content, err.span.start);
            fail(format_args!("{path}:{line}:{col}: {err}"));
        }
    };

    println!("Parse result for '{path}' ({} expressions):", program.len());
    for expr in &program {
        println!("  {expr}");
    }
}
