#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.into())
}

fn num(text: &str) -> TokenKind {
    TokenKind::Number(text.into())
}

#[test]
fn empty_source_is_just_eof() {
    assert_eq!(lex_kinds("").unwrap(), vec![TokenKind::Eof]);
    assert_eq!(lex_kinds("  \t\r\n # only a comment").unwrap(), vec![TokenKind::Eof]);
}

#[test]
fn assignment_with_arithmetic() {
    assert_eq!(
        lex_kinds("x = 2.5 + 2;").unwrap(),
        vec![
            ident("x"),
            TokenKind::Infix(InfixOp::Assign),
            num("2.5"),
            TokenKind::Infix(InfixOp::Add),
            num("2"),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn word_operators_and_literals() {
    assert_eq!(
        lex_kinds("a eq true and b or false").unwrap(),
        vec![
            ident("a"),
            TokenKind::Infix(InfixOp::Eq),
            TokenKind::Bool(true),
            TokenKind::Infix(InfixOp::And),
            ident("b"),
            TokenKind::Infix(InfixOp::Or),
            TokenKind::Bool(false),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn words_containing_operator_names_are_identifiers() {
    assert_eq!(
        lex_kinds("equal android order").unwrap(),
        vec![ident("equal"), ident("android"), ident("order"), TokenKind::Eof]
    );
}

#[test]
fn import_bang_is_an_identifier() {
    assert_eq!(
        lex_kinds("import!(\"lib.fn\")").unwrap(),
        vec![
            ident("import!"),
            TokenKind::LParen,
            TokenKind::Str("lib.fn".into()),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn trailing_dot_after_number_is_dereference() {
    assert_eq!(
        lex_kinds("1.asString").unwrap(),
        vec![
            num("1"),
            TokenKind::Infix(InfixOp::Dot),
            ident("asString"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn dereference_chain() {
    assert_eq!(
        lex_kinds("a.b.c").unwrap(),
        vec![
            ident("a"),
            TokenKind::Infix(InfixOp::Dot),
            ident("b"),
            TokenKind::Infix(InfixOp::Dot),
            ident("c"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn when_and_punctuation() {
    assert_eq!(
        lex_kinds("when { x { 1 } }").unwrap(),
        vec![
            TokenKind::When,
            TokenKind::LBrace,
            ident("x"),
            TokenKind::LBrace,
            num("1"),
            TokenKind::RBrace,
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comment_runs_to_end_of_line() {
    assert_eq!(
        lex_kinds("x # ignored ( \" \ny").unwrap(),
        vec![ident("x"), ident("y"), TokenKind::Eof]
    );
}

#[test]
fn string_keeps_contents_verbatim() {
    assert_eq!(
        lex_kinds("\"a # b (c)\"").unwrap(),
        vec![TokenKind::Str("a # b (c)".into()), TokenKind::Eof]
    );
}

#[test]
fn spans_cover_token_text() {
    let tokens = lex("ab = \"cd\"").unwrap();
    assert_eq!(tokens[0].span, Span::new(0, 2));
    assert_eq!(tokens[1].span, Span::new(3, 4));
    assert_eq!(tokens[2].span, Span::new(5, 9));
    assert_eq!(tokens[3].span, Span::point(9));
}

#[test]
fn unterminated_string_is_an_error() {
    let err = lex("x = \"oops").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.span, Span::new(4, 9));
    assert_eq!(err.to_string(), "unterminated string literal");
}

proptest! {
    #[test]
    fn lexing_never_panics(source in "\\PC*") {
        let _ = lex(&source);
    }

    #[test]
    fn successful_lex_ends_with_single_eof(source in "[a-z0-9 .=+*/(){};,\n-]*") {
        let kinds = lex_kinds(&source).unwrap();
        prop_assert_eq!(kinds.last(), Some(&TokenKind::Eof));
        prop_assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn integer_literals_lex_whole(n in 0u64..1_000_000) {
        let text = n.to_string();
        prop_assert_eq!(lex_kinds(&text).unwrap(), vec![num(&text), TokenKind::Eof]);
    }
}
