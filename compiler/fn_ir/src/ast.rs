//! Expression tree produced by the parser.
//!
//! The tree is assumed to be well formed by the time it reaches the
//! evaluator; shape checks happen in the parser.

use std::fmt;
use std::rc::Rc;

/// A name as written in source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier { name: name.into() }
    }
}

/// An ordered statement sequence in braces.
///
/// The body is shared so a closure can keep its body alive cheaply.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub body: Rc<[Expr]>,
}

impl Block {
    pub fn new(body: Vec<Expr>) -> Self {
        Block { body: body.into() }
    }
}

/// `(params) { body }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionPrototype {
    pub params: Vec<Identifier>,
    pub body: Block,
}

/// `operator(args...)`. Infix operators lower to this node too.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    pub operator: Identifier,
    pub args: Vec<Expr>,
}

/// One `condition { body }` arm of a `when`.
#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    pub condition: Expr,
    pub body: Block,
}

/// `when { cond { body } ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Conditional {
    pub branches: Vec<Branch>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Decimal literal, kept as text so integer and float origins stay distinct.
    Number(String),
    Str(String),
    Bool(bool),
    Identifier(Identifier),
    Block(Block),
    FunctionPrototype(FunctionPrototype),
    FunctionCall(FunctionCall),
    Conditional(Conditional),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Identifier(Identifier::new(name))
    }

    pub fn call(operator: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::FunctionCall(FunctionCall {
            operator: Identifier::new(operator),
            args,
        })
    }

    /// Returns the call node if this is a call to `operator`.
    pub fn as_call_to(&self, operator: &str) -> Option<&FunctionCall> {
        match self {
            Expr::FunctionCall(call) if call.operator.name == operator => Some(call),
            _ => None,
        }
    }
}

fn write_separated<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        write_separated(f, &self.body, "; ")?;
        f.write_str(" }")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(text) => f.write_str(text),
            Expr::Str(text) => write!(f, "\"{text}\""),
            Expr::Bool(value) => write!(f, "{value}"),
            Expr::Identifier(ident) => write!(f, "{ident}"),
            Expr::Block(block) => write!(f, "{block}"),
            Expr::FunctionPrototype(proto) => {
                f.write_str("(")?;
                write_separated(f, &proto.params, ", ")?;
                write!(f, ") {}", proto.body)
            }
            Expr::FunctionCall(call) => {
                write!(f, "{}(", call.operator)?;
                write_separated(f, &call.args, ", ")?;
                f.write_str(")")
            }
            Expr::Conditional(cond) => {
                f.write_str("when {")?;
                for branch in &cond.branches {
                    write!(f, " {} {}", branch.condition, branch.body)?;
                }
                f.write_str(" }")
            }
        }
    }
}
