//! Fn Parser - builds an expression tree from tokens.
//!
//! Infix expressions use precedence climbing driven by
//! [`InfixOp::binding_power`]. Every infix operator lowers to a
//! [`FunctionCall`](fn_ir::FunctionCall) named after the operator, so the
//! evaluator only ever sees calls.
//!
//! Assignment to a dereference, `a.b = v`, lowers to `a.(b = v)` so the
//! definition is evaluated with `a` as the ambient scope.

mod cursor;
mod error;

use fn_ir::{
    Block, Branch, Conditional, Expr, FunctionCall, FunctionPrototype, Identifier, InfixOp, Span,
    Token, TokenKind,
};
use fn_stack::ensure_sufficient_stack;
use tracing::trace;

use cursor::Cursor;
pub use error::{ErrorContext, ParseError, ParseErrorKind};

/// Parse a token list into the top-level statement sequence.
///
/// # Errors
///
/// Returns the first syntax error encountered.
pub fn parse(tokens: &[Token]) -> Result<Vec<Expr>, ParseError> {
    if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
        let span = tokens.last().map_or(Span::DUMMY, |t| t.span);
        return Err(ParseError::new(
            ParseErrorKind::UnexpectedEof {
                expected: "end of file marker",
            },
            span,
        ));
    }
    Parser::new(tokens).parse_program()
}

/// Lex and parse `source` in one step.
///
/// # Errors
///
/// Returns lexer errors as [`ParseErrorKind::Lex`], otherwise the first
/// syntax error.
pub fn parse_source(source: &str) -> Result<Vec<Expr>, ParseError> {
    let tokens = fn_lexer::lex(source)?;
    parse(&tokens)
}

struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    fn in_error_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        f(self).map_err(|err| err.or_context(context))
    }

    fn parse_program(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.in_error_context(ErrorContext::Program, |p| {
            let body = p.parse_statements(&TokenKind::Eof)?;
            trace!(statements = body.len(), "parsed program");
            Ok(body)
        })
    }

    /// Statements up to (not including) `terminator`, separated by
    /// optional semicolons.
    fn parse_statements(&mut self, terminator: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut body = Vec::new();
        loop {
            while self.cursor.eat(&TokenKind::Semicolon) {}
            if self.cursor.check(terminator) {
                return Ok(body);
            }
            if self.cursor.is_at_end() {
                return Err(self.cursor.unexpected(terminator.display_name()));
            }
            body.push(self.parse_expr(0)?);
        }
    }

    fn parse_expr(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner(min_bp))
    }

    fn parse_expr_inner(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let mut lhs = self.parse_primary()?;
        let mut lhs_span = start.merge(self.cursor.previous_span());

        while let TokenKind::Infix(op) = *self.cursor.current_kind() {
            let (left_bp, right_bp) = op.binding_power();
            if left_bp < min_bp {
                break;
            }
            self.cursor.advance();
            let rhs = self.parse_expr(right_bp)?;
            lhs = if op == InfixOp::Assign {
                lower_assignment(lhs, rhs, lhs_span)?
            } else {
                Expr::call(op.as_symbol(), vec![lhs, rhs])
            };
            lhs_span = lhs_span.merge(self.cursor.previous_span());
        }
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        match &token.kind {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                if self.cursor.check(&TokenKind::LParen) {
                    self.parse_call(name)
                } else {
                    Ok(Expr::ident(name.as_str()))
                }
            }
            // `+(1, 2)` calls the operator's function directly.
            TokenKind::Infix(op) if *self.cursor.peek_kind(1) == TokenKind::LParen => {
                self.cursor.advance();
                self.parse_call(op.as_symbol())
            }
            TokenKind::Number(text) => {
                self.cursor.advance();
                Ok(Expr::Number(text.clone()))
            }
            TokenKind::Str(text) => {
                self.cursor.advance();
                Ok(Expr::Str(text.clone()))
            }
            TokenKind::Bool(value) => {
                self.cursor.advance();
                Ok(Expr::Bool(*value))
            }
            TokenKind::LParen => {
                if self.starts_prototype() {
                    self.parse_prototype()
                } else {
                    self.parse_group()
                }
            }
            TokenKind::LBrace => Ok(Expr::Block(self.parse_block()?)),
            TokenKind::When => self.parse_conditional(),
            _ => Err(self
                .cursor
                .unexpected("expression")
                .or_context(ErrorContext::Expression)),
        }
    }

    /// Whether the `(` at the cursor opens a parameter list, i.e. its
    /// matching `)` is directly followed by `{`.
    fn starts_prototype(&self) -> bool {
        self.cursor
            .matching_paren()
            .is_some_and(|close| *self.cursor.peek_kind(close + 1) == TokenKind::LBrace)
    }

    fn parse_call(&mut self, operator: &str) -> Result<Expr, ParseError> {
        self.in_error_context(ErrorContext::FunctionCall, |p| {
            p.cursor.expect(&TokenKind::LParen)?;
            let mut args = Vec::new();
            while !p.cursor.check(&TokenKind::RParen) {
                args.push(p.parse_expr(0)?);
                if !p.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            p.cursor.expect(&TokenKind::RParen)?;
            Ok(Expr::FunctionCall(FunctionCall {
                operator: Identifier::new(operator),
                args,
            }))
        })
    }

    fn parse_prototype(&mut self) -> Result<Expr, ParseError> {
        let params = self.in_error_context(ErrorContext::FunctionParams, |p| {
            p.cursor.expect(&TokenKind::LParen)?;
            let mut params = Vec::new();
            while !p.cursor.check(&TokenKind::RParen) {
                match p.cursor.current_kind() {
                    TokenKind::Ident(name) => {
                        params.push(Identifier::new(name.as_str()));
                        p.cursor.advance();
                    }
                    _ => return Err(p.cursor.unexpected("parameter name")),
                }
                if !p.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            p.cursor.expect(&TokenKind::RParen)?;
            Ok(params)
        })?;
        let body = self.parse_block()?;
        Ok(Expr::FunctionPrototype(FunctionPrototype { params, body }))
    }

    fn parse_group(&mut self) -> Result<Expr, ParseError> {
        self.in_error_context(ErrorContext::Group, |p| {
            p.cursor.expect(&TokenKind::LParen)?;
            let inner = p.parse_expr(0)?;
            p.cursor.expect(&TokenKind::RParen)?;
            Ok(inner)
        })
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.in_error_context(ErrorContext::Block, |p| {
            p.cursor.expect(&TokenKind::LBrace)?;
            let body = p.parse_statements(&TokenKind::RBrace)?;
            p.cursor.expect(&TokenKind::RBrace)?;
            Ok(Block::new(body))
        })
    }

    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        self.in_error_context(ErrorContext::Conditional, |p| {
            p.cursor.expect(&TokenKind::When)?;
            p.cursor.expect(&TokenKind::LBrace)?;
            let mut branches = Vec::new();
            loop {
                while p.cursor.eat(&TokenKind::Semicolon) {}
                if p.cursor.eat(&TokenKind::RBrace) {
                    break;
                }
                if p.cursor.is_at_end() {
                    return Err(p.cursor.unexpected("`}`"));
                }
                let condition = p.parse_expr(0)?;
                let body = p.parse_block()?;
                branches.push(Branch { condition, body });
            }
            Ok(Expr::Conditional(Conditional { branches }))
        })
    }
}

/// Lower `target = value`.
///
/// `name = v` becomes `=(name, v)`; `a.name = v` becomes `.(a, =(name, v))`,
/// applied recursively so `a.b.c = v` defines `c` inside `a.b`.
fn lower_assignment(target: Expr, value: Expr, span: Span) -> Result<Expr, ParseError> {
    match target {
        Expr::Identifier(_) => Ok(Expr::call("=", vec![target, value])),
        Expr::FunctionCall(call) if is_dereference_of_name(&call) => {
            let mut args = call.args.into_iter();
            match (args.next(), args.next()) {
                (Some(receiver), Some(member)) => Ok(Expr::call(
                    ".",
                    vec![receiver, lower_assignment(member, value, span)?],
                )),
                _ => Err(ParseError::new(
                    ParseErrorKind::InvalidAssignmentTarget,
                    span,
                )),
            }
        }
        _ => Err(ParseError::new(
            ParseErrorKind::InvalidAssignmentTarget,
            span,
        )),
    }
}

fn is_dereference_of_name(call: &FunctionCall) -> bool {
    call.operator.name == InfixOp::Dot.as_symbol()
        && call.args.len() == 2
        && matches!(call.args[1], Expr::Identifier(_))
}
