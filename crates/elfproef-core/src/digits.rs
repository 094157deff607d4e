use std::fmt;

use serde::{Deserialize, Serialize};

use crate::checksum;
use crate::error::{BsnError, Result};

/// Length used when the caller does not ask for anything else.
pub const DEFAULT_LENGTH: usize = 9;

/// Leading digits that request a number failing the eleven test.
pub const INVALID_MARKER: &str = "999";

/// Number of positions in a generated or validated number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct BsnLength(u8);

impl BsnLength {
    pub fn new(length: usize) -> Result<Self> {
        match length {
            6..=9 => Ok(Self(length as u8)),
            _ => Err(BsnError::InvalidLength { length }),
        }
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for BsnLength {
    fn default() -> Self {
        Self(DEFAULT_LENGTH as u8)
    }
}

impl TryFrom<usize> for BsnLength {
    type Error = BsnError;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<BsnLength> for usize {
    fn from(value: BsnLength) -> Self {
        value.get()
    }
}

impl fmt::Display for BsnLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a string of ASCII digits into their numeric values.
pub fn parse_digits(value: &str) -> Result<Vec<u8>> {
    value
        .chars()
        .map(|character| {
            character
                .to_digit(10)
                .map(|digit| digit as u8)
                .ok_or_else(|| BsnError::InvalidCharacter {
                    character,
                    value: value.to_string(),
                })
        })
        .collect()
}

/// Caller-supplied leading digits.
///
/// Only the character set is checked here; whether the prefix fits a
/// requested length is decided by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix {
    text: String,
    digits: Vec<u8>,
}

impl Prefix {
    pub fn parse(value: &str) -> Result<Self> {
        let digits = parse_digits(value)?;
        Ok(Self {
            text: value.to_string(),
            digits,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// True when the prefix asks for a deliberately invalid number.
    pub fn requests_invalid(&self) -> bool {
        self.text.starts_with(INVALID_MARKER)
    }
}

impl TryFrom<String> for Prefix {
    type Error = BsnError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Prefix> for String {
    fn from(value: Prefix) -> Self {
        value.text
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A complete number of 6 to 9 digits.
///
/// Holding a `DigitString` says nothing about the checksum: generated
/// numbers with an "999" prefix fail it on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DigitString(String);

impl DigitString {
    pub fn parse(value: &str) -> Result<Self> {
        BsnLength::new(value.chars().count())?;
        parse_digits(value)?;
        Ok(Self(value.to_string()))
    }

    pub fn from_digits(digits: &[u8]) -> Result<Self> {
        BsnLength::new(digits.len())?;
        let mut text = String::with_capacity(digits.len());
        for &digit in digits {
            let character = char::from_digit(u32::from(digit), 10).ok_or_else(|| {
                BsnError::InvalidCharacter {
                    character: char::REPLACEMENT_CHARACTER,
                    value: format!("{digits:?}"),
                }
            })?;
            text.push(character);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn digits(&self) -> Vec<u8> {
        self.0.bytes().map(|byte| byte - b'0').collect()
    }

    pub fn weighted_sum(&self) -> i64 {
        checksum::weighted_sum(&self.digits())
    }

    pub fn is_valid(&self) -> bool {
        checksum::is_valid(&self.digits())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DigitString {
    type Error = BsnError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DigitString> for String {
    fn from(value: DigitString) -> Self {
        value.0
    }
}

impl AsRef<str> for DigitString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_accepts_only_six_to_nine() {
        for length in 6..=9 {
            assert_eq!(BsnLength::new(length).map(BsnLength::get), Ok(length));
        }
        for length in [0, 5, 10, 11] {
            assert_eq!(
                BsnLength::new(length),
                Err(BsnError::InvalidLength { length })
            );
        }
    }

    #[test]
    fn prefix_rejects_non_digits() {
        let err = Prefix::parse("12a4").unwrap_err();
        assert_eq!(
            err,
            BsnError::InvalidCharacter {
                character: 'a',
                value: "12a4".to_string()
            }
        );
    }

    #[test]
    fn prefix_detects_invalid_marker() {
        assert!(Prefix::parse("9994").unwrap().requests_invalid());
        assert!(!Prefix::parse("99").unwrap().requests_invalid());
        assert!(Prefix::parse("").unwrap().is_empty());
    }

    #[test]
    fn digit_string_checks_length_before_characters() {
        assert_eq!(
            DigitString::parse("12345"),
            Err(BsnError::InvalidLength { length: 5 })
        );
        assert!(matches!(
            DigitString::parse("12345x789"),
            Err(BsnError::InvalidCharacter { character: 'x', .. })
        ));
    }

    #[test]
    fn digit_string_serializes_as_plain_string() {
        let value = DigitString::parse("211551557").unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"211551557\"");
        let err = serde_json::from_str::<DigitString>("\"21155\"");
        assert!(err.is_err());
    }
}
