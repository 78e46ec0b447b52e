//! Recursive-descent parser for the formula grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := NUMBER | IDENT | '-' factor | '(' expr ')'
//! ```
//!
//! Operators of equal precedence associate left-to-right; `*` and `/` bind
//! tighter than `+` and `-`.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::FormulaError;
use crate::lexer::{lex, Spanned, Token};

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn cur_position(&self) -> usize {
        self.cur().position
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn err(&self, msg: impl Into<String>) -> FormulaError {
        FormulaError::syntax(self.cur_position(), msg)
    }

    fn parse_expr(&mut self) -> Result<Expr, FormulaError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, FormulaError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, FormulaError> {
        match self.peek().clone() {
            Token::Number(n) => {
                self.advance();
                Ok(Expr::Literal(n))
            }
            Token::Ident(name) => {
                self.advance();
                Ok(Expr::Variable(name))
            }
            Token::Minus => {
                self.advance();
                let operand = self.parse_factor()?;
                Ok(Expr::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                })
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                if self.peek() != &Token::RParen {
                    return Err(self.err("expected ')'"));
                }
                self.advance();
                Ok(inner)
            }
            Token::RParen => Err(self.err("unexpected ')'")),
            Token::Eof => Err(self.err("unexpected end of formula")),
            other => Err(self.err(format!("unexpected token {:?}", other))),
        }
    }
}

/// Parse a formula string into an expression tree.
///
/// The entire input must be a single expression; trailing tokens are a
/// syntax error. An empty (or all-whitespace) formula is a syntax error at
/// position 0.
pub fn parse(src: &str) -> Result<Expr, FormulaError> {
    let tokens = lex(src)?;
    if tokens.len() == 1 {
        return Err(FormulaError::syntax(0, "empty formula"));
    }
    let mut parser = Parser::new(&tokens);
    let expr = parser.parse_expr()?;
    if parser.peek() != &Token::Eof {
        return Err(parser.err(format!("unexpected token {:?} after expression", parser.peek())));
    }
    Ok(expr)
}
