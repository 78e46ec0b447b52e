//! garagepay-formula: the incentive formula expression language.
//!
//! Policies carry their payout formula as a string (e.g.
//! `"baseAmount + totalCreditPoints * multiplier"`). This crate turns that
//! string into a typed expression tree and evaluates it against a map of
//! variable bindings — a real tokenizer and recursive-descent parser, not
//! string substitution, so malformed input fails with a positioned
//! [`FormulaError::Syntax`] and a formula can never reach outside its
//! bindings.
//!
//! # Public API
//!
//! - [`parse()`] — formula string to [`Expr`] tree
//! - [`Expr::eval()`] — tree plus bindings to `Decimal`
//! - [`evaluate()`] — the two combined, for one-shot callers
//! - [`FormulaError`] — the full error taxonomy

pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

use std::collections::BTreeMap;

use rust_decimal::Decimal;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::FormulaError;
pub use parser::parse;

/// Parse and evaluate a formula in one call.
///
/// Pure function of its two inputs. Syntax errors, unknown variables, and
/// division by zero all surface as [`FormulaError`].
pub fn evaluate(
    src: &str,
    bindings: &BTreeMap<String, Decimal>,
) -> Result<Decimal, FormulaError> {
    parse(src)?.eval(bindings)
}
