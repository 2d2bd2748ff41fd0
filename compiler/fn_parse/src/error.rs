//! Parse error types.
//!
//! Errors carry the span of the offending token and the innermost
//! construct being parsed, for "while parsing X" messages.

use std::fmt;

use fn_ir::{Span, TokenKind};
use fn_lexer::LexError;

/// Construct being parsed when an error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    /// Top-level statement list.
    Program,
    Expression,
    Block,
    /// Argument list of a call.
    FunctionCall,
    /// Parameter list of a function prototype.
    FunctionParams,
    /// Parenthesized expression.
    Group,
    /// `when { ... }`.
    Conditional,
}

impl ErrorContext {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::Program => "a program",
            Self::Expression => "an expression",
            Self::Block => "a block",
            Self::FunctionCall => "a function call",
            Self::FunctionParams => "function parameters",
            Self::Group => "a parenthesized expression",
            Self::Conditional => "a when expression",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
    },
    UnexpectedEof {
        expected: &'static str,
    },
    /// `=` with a target that is neither a name nor `a.name`.
    InvalidAssignmentTarget,
    Lex(LexError),
}

/// A syntax error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub context: Option<ErrorContext>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError {
            kind,
            span,
            context: None,
        }
    }

    /// Attach `context` unless a more specific one is already present.
    #[must_use]
    pub fn or_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let span = err.span;
        ParseError::new(ParseErrorKind::Lex(err), span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")?;
            }
            ParseErrorKind::UnexpectedEof { expected } => {
                write!(f, "expected {expected}, found end of file")?;
            }
            ParseErrorKind::InvalidAssignmentTarget => {
                f.write_str("invalid assignment target: expected a name or `value.name`")?;
            }
            ParseErrorKind::Lex(err) => write!(f, "{err}")?,
        }
        if let Some(context) = self.context {
            write!(f, " while parsing {}", context.description())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
