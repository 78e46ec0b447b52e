//! Tree-walking evaluator over `Expr`.
//!
//! All arithmetic uses `rust_decimal::Decimal` with checked operations; no
//! `f64` anywhere on the calculation path. Division by zero and overflow
//! surface as typed errors rather than infinities or panics.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::FormulaError;

impl Expr {
    /// Evaluate the expression against the given variable bindings.
    ///
    /// Pure: the result depends only on the tree and the bindings.
    pub fn eval(&self, bindings: &BTreeMap<String, Decimal>) -> Result<Decimal, FormulaError> {
        match self {
            Expr::Literal(n) => Ok(*n),
            Expr::Variable(name) => {
                bindings
                    .get(name)
                    .copied()
                    .ok_or_else(|| FormulaError::UnknownVariable { name: name.clone() })
            }
            Expr::Unary {
                op: UnaryOp::Neg,
                operand,
            } => Ok(-operand.eval(bindings)?),
            Expr::Binary { op, left, right } => {
                let l = left.eval(bindings)?;
                let r = right.eval(bindings)?;
                match op {
                    BinaryOp::Add => l
                        .checked_add(r)
                        .ok_or(FormulaError::Overflow { operation: "addition" }),
                    BinaryOp::Sub => l
                        .checked_sub(r)
                        .ok_or(FormulaError::Overflow { operation: "subtraction" }),
                    BinaryOp::Mul => l
                        .checked_mul(r)
                        .ok_or(FormulaError::Overflow { operation: "multiplication" }),
                    BinaryOp::Div => {
                        if r.is_zero() {
                            return Err(FormulaError::DivisionByZero);
                        }
                        l.checked_div(r)
                            .ok_or(FormulaError::Overflow { operation: "division" })
                    }
                }
            }
        }
    }
}
