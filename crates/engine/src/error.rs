use garagepay_formula::FormulaError;

/// All errors the calculation engine can return.
///
/// Every variant is a deterministic function of the inputs; none is ever
/// retried. Formula errors come from evaluating a policy's formula and are
/// configuration defects in the policy; validation errors come from the
/// records supplied at data entry and name the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// A record field failed validation. `field` is the camelCase path the
    /// UI uses to highlight the input, e.g. `serviceItems[1].parts[0].unitCost`.
    #[error("invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Decimal arithmetic exceeded the representable range while rolling up
    /// costs or composing an incentive.
    #[error("numeric overflow: {0}")]
    Overflow(String),
}

impl EngineError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
