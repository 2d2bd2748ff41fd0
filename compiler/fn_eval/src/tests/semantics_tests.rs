//! Core evaluation rules: scoping, definitions, dereference, functions and
//! conditionals.

use super::run;
use crate::EvalErrorKind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn float_addition_renders_shortest() {
    assert_eq!(run("print(2.5 + 2.5)").output, "5\n");
    assert_eq!(run("print(2.5 + 2)").output, "4.5\n");
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(run("1 + 2 * 3").value_text(), "7");
    assert_eq!(run("(1 + 2) * 3").value_text(), "9");
    assert_eq!(run("10 - 4 - 3").value_text(), "3");
    assert_eq!(run("7 / 2").value_text(), "3.5");
}

#[test]
fn redefinition_in_same_scope_fails() {
    let run = run("x = 1; x = 2");
    assert_eq!(
        run.error_kind(),
        EvalErrorKind::DuplicateDefinition { name: "x".into() }
    );
}

#[test]
fn block_shadows_without_touching_outer() {
    let run = run("x = 1; { x = 2; print(x) }; print(x)");
    assert_eq!(run.output, "2\n1\n");
}

#[test]
fn definition_value_is_the_scope() {
    assert_eq!(run("x = 1").value_text(), "{\n  x: 1\n}");
}

#[test]
fn undefined_identifier() {
    assert_eq!(
        run("y + 1").error_kind(),
        EvalErrorKind::UndefinedIdentifier { name: "y".into() }
    );
    assert_eq!(
        run("nope(1)").error_kind(),
        EvalErrorKind::UndefinedIdentifier {
            name: "nope".into()
        }
    );
}

#[test]
fn dereference_calls_member_function() {
    assert_eq!(run("x = { f = (a) { a + 1 } }; x.f(1)").value_text(), "2");
}

#[test]
fn dereference_scope_reverts() {
    assert_eq!(
        run("a = { q = 1 }; a.q; q").error_kind(),
        EvalErrorKind::UndefinedIdentifier { name: "q".into() }
    );
}

#[test]
fn dereference_evaluates_arguments_in_caller_scope() {
    assert_eq!(run("n = 3; (1).+(n)").value_text(), "4");
    assert_eq!(run("(1).+(2)").value_text(), "3");
    assert_eq!(
        run("x = { f = (a) { a } }; y = 5; x.f(y)").value_text(),
        "5"
    );
}

#[test]
fn dereference_missing_member_is_undefined() {
    assert_eq!(
        run("x = { }; x.nope(1)").error_kind(),
        EvalErrorKind::UndefinedIdentifier {
            name: "nope".into()
        }
    );
}

#[test]
fn each_accepts_named_function() {
    let run = run("g = (i) { print(i) }; List(3, 4).each(g)");
    assert_eq!(run.output, "3\n4\n");
}

#[test]
fn recursive_closure_inside_each_binds_per_call() {
    let source = "fact = (n) { when { n eq 0 { 1 } true { n * fact(n - 1) } } }; \
                  List(3, 4).each((i) { print(fact(i)) })";
    let run = run(source);
    assert_eq!(run.output, "6\n24\n");
    assert_eq!(run.value_text(), "void");
}

#[test]
fn methods_on_primitives() {
    assert_eq!(run("(3).moreThan(2)").value_text(), "true");
    assert_eq!(run("true.and(false)").value_text(), "false");
    assert_eq!(run("x = 2.5; x.asString()").value_text(), "2.5");
}

#[test]
fn assignment_through_dereference() {
    assert_eq!(run("a = { }; a.b = 1; a.b").value_text(), "1");
    assert_eq!(run("a = { b = { } }; a.b.c = 5; a.b.c").value_text(), "5");
    assert_eq!(run("y = 7; a = { }; a.b = y; a.b").value_text(), "7");
}

#[test]
fn defining_on_non_environments_fails() {
    assert_eq!(
        run("(1).foo = 1").error_kind(),
        EvalErrorKind::NotDefinable {
            type_name: "number"
        }
    );
    assert_eq!(
        run("print.foo = 1").error_kind(),
        EvalErrorKind::NotDefinable {
            type_name: "function"
        }
    );
    assert_eq!(
        run("x = 1; x.y = 2").error_kind(),
        EvalErrorKind::NotDefinable {
            type_name: "number"
        }
    );
}

#[test]
fn function_result_environment_is_inspectable() {
    assert_eq!(
        run("x = () { y = \"foo\" }; z = x(); z.y").value_text(),
        "foo"
    );
}

#[test]
fn closures_capture_definition_scope() {
    assert_eq!(
        run("make = (n) { (m) { n + m } }; add2 = make(2); add2(3)").value_text(),
        "5"
    );
}

#[test]
fn calls_do_not_mutate_captured_scope() {
    let run = run("x = 1; f = () { x = 2; x }; f(); print(f()); print(x)");
    assert_eq!(run.output, "2\n1\n");
}

#[test]
fn closure_argument_count_is_checked() {
    assert_eq!(
        run("f = (a) { a }; f()").error_kind(),
        EvalErrorKind::ArgumentCountMismatch {
            name: "function".into(),
            expected: 1,
            got: 0,
        }
    );
}

#[test]
fn recursion_binds_per_activation() {
    let source = "f = (n) { when { n eq 0 { 0 } true { r = f(n - 1); n } } }; f(3)";
    assert_eq!(run(source).value_text(), "3");
}

#[test]
fn factorial() {
    let source = "fact = (n) { when { n eq 0 { 1 } true { n * fact(n - 1) } } }; fact(10)";
    assert_eq!(run(source).value_text(), "3628800");
}

#[test]
fn deep_recursion_within_default_limit() {
    let source = "count = (n) { when { n eq 0 { 0 } true { 1 + count(n - 1) } } }; count(3000)";
    assert_eq!(run(source).value_text(), "3000");
}

#[test]
fn unbounded_recursion_hits_limit() {
    assert_eq!(
        run("f = () { f() }; f()").error_kind(),
        EvalErrorKind::RecursionLimitExceeded {
            depth: crate::DEFAULT_MAX_CALL_DEPTH
        }
    );
}

#[test]
fn when_picks_first_truthy_branch() {
    assert_eq!(run("when { false { 1 } true { 2 } true { 3 } }").value_text(), "2");
    assert_eq!(run("when { 0 { \"zero\" } }").value_text(), "zero");
    assert_eq!(run("when { true { } }").value_text(), "void");
}

#[test]
fn when_without_match_fails() {
    assert_eq!(
        run("when { false { 1 } }").error_kind(),
        EvalErrorKind::NoMatchingBranch
    );
    assert_eq!(run("when { }").error_kind(), EvalErrorKind::NoMatchingBranch);
}

#[test]
fn when_branch_has_its_own_scope() {
    assert_eq!(
        run("when { true { inner = 1 } }; inner").error_kind(),
        EvalErrorKind::UndefinedIdentifier {
            name: "inner".into()
        }
    );
}

#[test]
fn when_condition_errors_abort() {
    assert_eq!(
        run("when { missing { 1 } true { 2 } }").error_kind(),
        EvalErrorKind::UndefinedIdentifier {
            name: "missing".into()
        }
    );
}

#[test]
fn equality() {
    assert_eq!(run("1 eq 1").value_text(), "true");
    assert_eq!(run("1 eq 1.0").value_text(), "true");
    assert_eq!(run("1 eq \"1\"").value_text(), "false");
    assert_eq!(run("\"a\" eq \"a\"").value_text(), "true");
    assert_eq!(run("true eq false").value_text(), "false");
    assert_eq!(run("List(1, 2) eq List(1, 2)").value_text(), "true");
}

#[test]
fn lists() {
    let run = run("l = List(1, \"two\", true); print(l); l(0)");
    assert_eq!(run.output, "List(1, two, true)\n");
    assert_eq!(run.value_text(), "1");
}

#[test]
fn list_index_out_of_bounds() {
    assert_eq!(
        run("l = List(1); l(1)").error_kind(),
        EvalErrorKind::IndexOutOfBounds { index: 1, len: 1 }
    );
}

#[test]
fn list_each_sees_builtins() {
    let run = run("List(1, 2).each((item) { print(item) })");
    assert_eq!(run.output, "1\n2\n");
    assert_eq!(run.value_text(), "void");
}

#[test]
fn environment_with_call_binding_is_callable() {
    assert_eq!(
        run("double = { call = (x) { x * 2 } }; double(21)").value_text(),
        "42"
    );
}

#[test]
fn environment_display() {
    assert_eq!(
        run("e = { b = 2; a = 1 }; print(e)").output,
        "{\n  a: 1\n  b: 2\n}\n"
    );
    assert_eq!(run("e = { value = 42; x = 1 }; print(e)").output, "42\n");
}

#[test]
fn division_by_zero() {
    assert_eq!(run("1 / 0").error_kind(), EvalErrorKind::DivisionByZero);
}

#[test]
fn arithmetic_on_non_numbers() {
    assert!(matches!(
        run("1 + \"a\"").error_kind(),
        EvalErrorKind::TypeMismatch { got: "string", .. }
    ));
    assert!(matches!(
        run("\"a\" + 1").error_kind(),
        EvalErrorKind::TypeMismatch { got: "string", .. }
    ));
}

#[test]
fn errors_stop_the_program() {
    let run = run("print(1); missing; print(2)");
    assert_eq!(run.output, "1\n");
    assert!(run.result.is_err());
}

proptest! {
    #[test]
    fn integer_addition_displays_sum(a in 0i64..100_000, b in 0i64..100_000) {
        let run = run(&format!("{a} + {b}"));
        prop_assert_eq!(run.value_text(), (a + b).to_string());
    }

    #[test]
    fn decimal_addition_displays_f64_sum(
        a in 0u32..1000, af in 0u32..100, b in 0u32..1000, bf in 0u32..100,
    ) {
        let lhs = format!("{a}.{af:02}");
        let rhs = format!("{b}.{bf:02}");
        let expected: f64 = lhs.parse::<f64>().unwrap_or_default() + rhs.parse::<f64>().unwrap_or_default();
        let run = run(&format!("{lhs} + {rhs}"));
        prop_assert_eq!(run.value_text(), format!("{expected}"));
    }
}

#[test]
fn members_shadow_builtins_inside_receiver() {
    assert_eq!(run("x = { print = \"Hello\" }; x.print").value_text(), "Hello");
}

#[test]
fn when_takes_only_the_first_match() {
    let run = run("when { true { print(1) } true { print(2) } }");
    assert_eq!(run.output, "1\n");
}
