//! Error types for the planning core.
//!
//! Every failure here is a non-recoverable validation error: the caller
//! supplied inputs that violate a precondition, and no partial result is
//! produced. The CLI re-prompts or aborts; the core never retries.

use thiserror::Error;

/// A specialized Result type for planning operations.
pub type PlanResult<T> = Result<T, InvalidInputError>;

/// Validation failures raised by the planning core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    /// Holdings and targets do not cover the same set of assets.
    #[error(
        "holdings and targets must cover the same assets \
         (missing targets: {missing_targets:?}, missing holdings: {missing_holdings:?})"
    )]
    MismatchedAssets {
        /// Assets present in holdings but without a target weight.
        missing_targets: Vec<String>,
        /// Assets with a target weight but no holding entry.
        missing_holdings: Vec<String>,
    },

    /// A projection or goal horizon of zero years.
    #[error("years must be > 0")]
    NonPositiveYears,

    /// A negative assumed annual return.
    #[error("annual return must be >= 0 (got {rate})")]
    NegativeReturn {
        /// The offending rate, as a fraction.
        rate: f64,
    },

    /// A capital-gains tax rate outside [0, 1].
    #[error("tax rate must be between 0 and 1 (got {rate})")]
    TaxRateOutOfRange {
        /// The offending rate, as a fraction.
        rate: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_precondition() {
        let err = InvalidInputError::MismatchedAssets {
            missing_targets: vec!["BTC".to_string()],
            missing_holdings: vec![],
        };
        assert!(err.to_string().contains("same assets"));
        assert!(err.to_string().contains("BTC"));

        let err = InvalidInputError::TaxRateOutOfRange { rate: 1.5 };
        assert!(err.to_string().contains("between 0 and 1"));
        assert!(err.to_string().contains("1.5"));
    }
}
