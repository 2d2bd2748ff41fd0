//! Fn IR - shared front-end data structures.
//!
//! This crate holds the types that flow between the Fn lexer, parser and
//! evaluator:
//! - [`Span`] for byte-offset source locations
//! - [`Token`], [`TokenKind`] and [`InfixOp`] for lexer output
//! - [`Expr`] and its node structs for parser output
//!
//! The expression tree is a plain owned tree. Block bodies are reference
//! counted so closures can hold on to their body without copying it.

pub mod ast;
mod span;
mod token;

pub use ast::{Block, Branch, Conditional, Expr, FunctionCall, FunctionPrototype, Identifier};
pub use span::{line_col, Span};
pub use token::{InfixOp, Token, TokenKind};
