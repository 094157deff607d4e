use thiserror::Error;

use crate::space::ExhaustionDiagnostics;

/// Errors raised while generating or validating numbers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BsnError {
    /// The requested length is not 6, 7, 8 or 9.
    #[error("length must be 6, 7, 8 or 9, got {length}")]
    InvalidLength { length: usize },
    /// The prefix leaves fewer than two free positions.
    #[error(
        "the given number has {prefix_len} digits which is longer than {length} or equal to \
         {length} - 1; that is not allowed"
    )]
    PrefixTooLong { prefix_len: usize, length: usize },
    /// A supplied string contains something other than '0'..='9'.
    #[error("the character '{character}' in '{value}' is not a digit; only use digits")]
    InvalidCharacter { character: char, value: String },
    /// A fully specified number does not pass the eleven test.
    #[error("the given number '{value}' is not valid")]
    ValidationFailed { value: String },
    /// The retry budget ran out before an allowed number was found.
    #[error("{0}")]
    RetryExhausted(Box<ExhaustionDiagnostics>),
}

/// Convenience alias for results returned by elfproef crates.
pub type Result<T> = std::result::Result<T, BsnError>;
