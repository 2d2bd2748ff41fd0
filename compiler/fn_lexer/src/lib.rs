//! Fn Lexer - turns source text into a flat token list.
//!
//! The language has no keywords beyond `when`, `true` and `false`; the word
//! operators `eq`, `and` and `or` are lexed as infix operators. Any other
//! run of non-delimiter characters is an identifier, so names like
//! `import!` need no special casing.
//!
//! The token list always ends with a single [`TokenKind::Eof`].

mod cursor;

use std::fmt;

use fn_ir::{InfixOp, Span, Token, TokenKind};

use cursor::Cursor;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A `"` with no closing quote before end of input.
    UnterminatedString,
}

/// Error produced while lexing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LexErrorKind::UnterminatedString => f.write_str("unterminated string literal"),
        }
    }
}

impl std::error::Error for LexError {}

/// Characters that end an identifier.
fn is_word_terminator(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(
            ch,
            '#' | '"' | '(' | ')' | '{' | '}' | ',' | ';' | '.' | '=' | '+' | '-' | '/' | '*'
        )
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "source files larger than 4 GiB are not supported"
)]
fn span(start: usize, end: usize) -> Span {
    Span::new(start as u32, end as u32)
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens
            .push(Token::new(kind, span(start, self.cursor.pos())));
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(ch) = self.cursor.current() {
            let start = self.cursor.pos();
            match ch {
                c if c.is_whitespace() => {
                    self.cursor.eat_while(char::is_whitespace);
                }
                '#' => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                '(' | ')' | '{' | '}' | ',' | ';' => {
                    self.cursor.bump();
                    let kind = match ch {
                        '(' => TokenKind::LParen,
                        ')' => TokenKind::RParen,
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        ',' => TokenKind::Comma,
                        _ => TokenKind::Semicolon,
                    };
                    self.push(kind, start);
                }
                '"' => self.string(start)?,
                c if c.is_ascii_digit() => self.number(start),
                c => {
                    if let Some(op) = InfixOp::from_symbol_char(c) {
                        self.cursor.bump();
                        self.push(TokenKind::Infix(op), start);
                    } else {
                        self.word(start);
                    }
                }
            }
        }
        let end = self.cursor.pos();
        self.tokens.push(Token::new(TokenKind::Eof, span(end, end)));
        Ok(self.tokens)
    }

    fn string(&mut self, start: usize) -> Result<(), LexError> {
        self.cursor.bump();
        let contents = self.cursor.eat_while(|c| c != '"');
        if self.cursor.is_eof() {
            return Err(LexError {
                kind: LexErrorKind::UnterminatedString,
                span: span(start, self.cursor.pos()),
            });
        }
        self.cursor.bump();
        self.push(TokenKind::Str(contents.to_owned()), start);
        Ok(())
    }

    /// Digits, then an optional `.` followed by at least one digit.
    /// A trailing `.` is left for the dereference operator.
    fn number(&mut self, start: usize) {
        let mut text = self.cursor.eat_while(|c| c.is_ascii_digit()).to_owned();
        if self.cursor.current() == Some('.')
            && self.cursor.peek().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.bump();
            text.push('.');
            text.push_str(self.cursor.eat_while(|c| c.is_ascii_digit()));
        }
        self.push(TokenKind::Number(text), start);
    }

    fn word(&mut self, start: usize) {
        let word = self.cursor.eat_while(|c| !is_word_terminator(c));
        let kind = match word {
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            "when" => TokenKind::When,
            other => match InfixOp::from_word(other) {
                Some(op) => TokenKind::Infix(op),
                None => TokenKind::Ident(other.to_owned()),
            },
        };
        self.push(kind, start);
    }
}

/// Lex `source` into tokens terminated by [`TokenKind::Eof`].
///
/// # Errors
///
/// Returns [`LexErrorKind::UnterminatedString`] if a string literal is not
/// closed before end of input.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

/// Token kinds only, for tests and debug dumps.
///
/// # Errors
///
/// Same as [`lex`].
pub fn lex_kinds(source: &str) -> Result<Vec<TokenKind>, LexError> {
    Ok(lex(source)?.into_iter().map(|t| t.kind).collect())
}

#[cfg(test)]
mod tests;
