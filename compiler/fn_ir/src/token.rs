//! Lexer output: tokens and infix operators.

use std::fmt;

use crate::Span;

/// An infix operator.
///
/// Every infix operator is sugar for a call to the function named by
/// [`InfixOp::as_symbol`], so `a + b` and `+(a, b)` mean the same thing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InfixOp {
    /// `.` dereference.
    Dot,
    /// `=` definition.
    Assign,
    Eq,
    And,
    Or,
    Mul,
    Div,
    Add,
    Sub,
}

impl InfixOp {
    /// Name of the function this operator lowers to.
    pub fn as_symbol(self) -> &'static str {
        match self {
            InfixOp::Dot => ".",
            InfixOp::Assign => "=",
            InfixOp::Eq => "eq",
            InfixOp::And => "and",
            InfixOp::Or => "or",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
        }
    }

    /// Operator for a single-character symbol.
    pub fn from_symbol_char(ch: char) -> Option<InfixOp> {
        match ch {
            '.' => Some(InfixOp::Dot),
            '=' => Some(InfixOp::Assign),
            '*' => Some(InfixOp::Mul),
            '/' => Some(InfixOp::Div),
            '+' => Some(InfixOp::Add),
            '-' => Some(InfixOp::Sub),
            _ => None,
        }
    }

    /// Operator for a word (`eq`, `and`, `or`).
    pub fn from_word(word: &str) -> Option<InfixOp> {
        match word {
            "eq" => Some(InfixOp::Eq),
            "and" => Some(InfixOp::And),
            "or" => Some(InfixOp::Or),
            _ => None,
        }
    }

    /// Left and right binding power for precedence climbing.
    ///
    /// Loosest to tightest: `=`, `or`, `and`, `eq`, `+ -`, `* /`, `.`.
    /// `=` is right associative, everything else left associative.
    pub fn binding_power(self) -> (u8, u8) {
        match self {
            InfixOp::Assign => (2, 1),
            InfixOp::Or => (3, 4),
            InfixOp::And => (5, 6),
            InfixOp::Eq => (7, 8),
            InfixOp::Add | InfixOp::Sub => (9, 10),
            InfixOp::Mul | InfixOp::Div => (11, 12),
            InfixOp::Dot => (13, 14),
        }
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Kind of a lexed token, with its payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Decimal literal text, e.g. `12` or `2.5`.
    Number(String),
    /// String literal contents without the quotes.
    Str(String),
    Bool(bool),
    Ident(String),
    Infix(InfixOp),
    When,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Eof,
}

impl TokenKind {
    /// Human-readable name for diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::Str(_) => "string",
            TokenKind::Bool(_) => "boolean",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Infix(_) => "infix operator",
            TokenKind::When => "`when`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(text) => write!(f, "number {text}"),
            TokenKind::Str(text) => write!(f, "string \"{text}\""),
            TokenKind::Bool(value) => write!(f, "boolean {value}"),
            TokenKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokenKind::Infix(op) => write!(f, "operator `{op}`"),
            other => f.write_str(other.display_name()),
        }
    }
}

/// A token and where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}
