/// Errors produced while lexing, parsing, or evaluating a formula.
///
/// Every variant is deterministic in the formula text and bindings, so none
/// of these conditions is worth retrying — the remedy is always to fix the
/// policy's formula or the data that feeds it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    /// Malformed formula text. `position` is the zero-based character offset
    /// at which lexing or parsing stopped.
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// The formula references a name absent from the bindings.
    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("division by zero")]
    DivisionByZero,

    /// Intermediate or final result exceeds Decimal's representable range.
    #[error("numeric overflow during {operation}")]
    Overflow { operation: &'static str },
}

impl FormulaError {
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        FormulaError::Syntax {
            position,
            message: message.into(),
        }
    }
}
