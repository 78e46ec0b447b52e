use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::FormulaError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal (integer or decimal), parsed exactly
    Number(Decimal),
    /// Variable identifier
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    /// End of input
    Eof,
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    /// Zero-based character offset of the token's first character.
    pub position: usize,
}

/// Tokenize a formula string.
///
/// The minus sign is always lexed as an operator token; unary negation is
/// resolved by the parser, not here. Whitespace is insignificant.
pub fn lex(src: &str) -> Result<Vec<Spanned>, FormulaError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        let tok_pos = pos;

        // Number: digits with an optional fractional part. A '.' must be
        // followed by a digit to count as part of the literal.
        if c.is_ascii_digit() {
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos < chars.len()
                && chars[pos] == '.'
                && pos + 1 < chars.len()
                && chars[pos + 1].is_ascii_digit()
            {
                pos += 1; // consume '.'
                while pos < chars.len() && chars[pos].is_ascii_digit() {
                    pos += 1;
                }
            }
            let s: String = chars[tok_pos..pos].iter().collect();
            let n = Decimal::from_str(&s).map_err(|_| {
                FormulaError::syntax(tok_pos, format!("invalid number '{}'", s))
            })?;
            tokens.push(Spanned {
                token: Token::Number(n),
                position: tok_pos,
            });
            continue;
        }

        // Identifier: letters, digits, underscore; must not start with a digit
        if c.is_alphabetic() || c == '_' {
            while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            let word: String = chars[tok_pos..pos].iter().collect();
            tokens.push(Spanned {
                token: Token::Ident(word),
                position: tok_pos,
            });
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => {
                return Err(FormulaError::syntax(
                    tok_pos,
                    format!("unexpected character '{}'", c),
                ));
            }
        };
        tokens.push(Spanned {
            token,
            position: tok_pos,
        });
        pos += 1;
    }

    tokens.push(Spanned {
        token: Token::Eof,
        position: chars.len(),
    });
    Ok(tokens)
}
