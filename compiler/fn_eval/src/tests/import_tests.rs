//! `import` and `import!`.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::{run_with, Run};
use crate::{buffer_handler, Capabilities, EvalErrorKind, Interpreter, MemoryLoader, SourceError};
use pretty_assertions::assert_eq;

const LIB: &str = "greet = (name) { print(name) }; answer = 42";

fn lib_loader() -> MemoryLoader {
    MemoryLoader::new().with_file("lib.fn", LIB)
}

fn run_lib(source: &str) -> Run {
    run_with(source, lib_loader())
}

#[test]
fn import_bang_merges_definitions() {
    let run = run_lib("import!(\"lib.fn\"); greet(\"hi\"); print(answer)");
    assert_eq!(run.output, "hi\n42\n");
}

#[test]
fn import_returns_unit_environment() {
    assert_eq!(run_lib("lib = import(\"lib.fn\"); lib.answer").value_text(), "42");
    assert_eq!(
        run_lib("import(\"lib.fn\"); answer").error_kind(),
        EvalErrorKind::UndefinedIdentifier {
            name: "answer".into()
        }
    );
}

#[test]
fn import_bang_value_is_unit_environment() {
    assert_eq!(
        run_lib("unit = import!(\"lib.fn\"); unit.answer").value_text(),
        "42"
    );
}

#[test]
fn import_bang_collision_merges_nothing() {
    let mut interp = Interpreter::builder()
        .print_handler(buffer_handler())
        .loader(lib_loader())
        .build();
    let scope = interp.new_scope();
    let scope = interp.run_source_in("answer = 1", &scope).unwrap().scope;

    let err = interp
        .run_source_in("import!(\"lib.fn\")", &scope)
        .unwrap_err();
    assert_eq!(
        err,
        SourceError::Runtime(crate::errors::duplicate_definition("answer"))
    );
    assert_eq!(scope.lookup(interp.heap(), "greet"), None);
    assert_eq!(scope.lookup(interp.heap(), "answer").unwrap().display(interp.heap()), "1");
}

#[test]
fn missing_file_is_import_failure() {
    assert_eq!(
        run_lib("import!(\"missing.fn\")").error_kind(),
        EvalErrorKind::ImportFailure {
            path: "missing.fn".into(),
            reason: "no such file".into(),
        }
    );
}

#[test]
fn syntax_error_in_unit_is_import_failure() {
    let loader = MemoryLoader::new().with_file("bad.fn", "x = 1\ny = (");
    let kind = run_with("import(\"bad.fn\")", loader).error_kind();
    let EvalErrorKind::ImportFailure { path, reason } = kind else {
        panic!("expected import failure, got {kind:?}");
    };
    assert_eq!(path, "bad.fn");
    assert!(reason.starts_with("2:"), "reason was {reason}");
}

#[test]
fn runtime_error_in_unit_propagates() {
    let loader = MemoryLoader::new().with_file("broken.fn", "x = undefined_name");
    assert_eq!(
        run_with("import(\"broken.fn\")", loader).error_kind(),
        EvalErrorKind::UndefinedIdentifier {
            name: "undefined_name".into()
        }
    );
}

#[test]
fn unit_cannot_see_importer_scope() {
    let loader = MemoryLoader::new().with_file("peek.fn", "y = secret");
    assert_eq!(
        run_with("secret = 1; import(\"peek.fn\")", loader).error_kind(),
        EvalErrorKind::UndefinedIdentifier {
            name: "secret".into()
        }
    );
}

#[test]
fn imports_are_not_cached() {
    let loader = MemoryLoader::new().with_file("noisy.fn", "print(\"loaded\")");
    let run = run_with("import(\"noisy.fn\"); import(\"noisy.fn\")", loader);
    assert_eq!(run.output, "loaded\nloaded\n");
}

#[test]
fn import_bang_into_non_environment_fails() {
    assert_eq!(
        run_lib("(1).import!(\"lib.fn\")").error_kind(),
        EvalErrorKind::NotDefinable {
            type_name: "number"
        }
    );
}

#[test]
fn import_path_must_be_string() {
    assert!(matches!(
        run_lib("import!(1)").error_kind(),
        EvalErrorKind::TypeMismatch { got: "number", .. }
    ));
}

#[test]
fn self_import_hits_call_depth_limit() {
    let loader = MemoryLoader::new().with_file("self.fn", "import!(\"self.fn\")");
    let mut interp = Interpreter::builder()
        .print_handler(buffer_handler())
        .loader(loader)
        .max_call_depth(8)
        .build();
    let err = interp.run_source("import!(\"self.fn\")").unwrap_err();
    assert_eq!(
        err,
        SourceError::Runtime(crate::errors::recursion_limit_exceeded(8))
    );
}
