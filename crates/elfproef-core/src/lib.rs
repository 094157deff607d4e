//! Core contracts for elfproef.
//!
//! Defines the digit-string types, the eleven-test checksum, the size
//! estimate of a constrained number space, and the error taxonomy shared
//! by the generation engine and the CLI.

pub mod checksum;
pub mod digits;
pub mod error;
pub mod space;

pub use checksum::{check_digit, is_valid, remainder, weight, weighted_sum};
pub use digits::{BsnLength, DEFAULT_LENGTH, DigitString, INVALID_MARKER, Prefix, parse_digits};
pub use error::{BsnError, Result};
pub use space::{ExhaustionDiagnostics, SpaceEstimate};
