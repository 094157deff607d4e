use elfproef_core::{BsnLength, DigitString, Prefix, Result};

use crate::builder::SequenceBuilder;

/// Checks a complete number against the eleven test.
pub fn validate(value: &str) -> Result<DigitString> {
    let length = BsnLength::new(value.chars().count())?;
    let given = Prefix::parse(value)?;
    SequenceBuilder::new(&given, length).check()
}

#[cfg(test)]
mod tests {
    use super::*;
    use elfproef_core::BsnError;

    #[test]
    fn accepts_known_valid_numbers() {
        for value in ["211551557", "853380107", "30340731"] {
            assert_eq!(validate(value).unwrap().as_str(), value);
        }
    }

    #[test]
    fn rejects_deliberately_invalid_number() {
        assert_eq!(
            validate("999450437"),
            Err(BsnError::ValidationFailed {
                value: "999450437".to_string()
            })
        );
    }

    #[test]
    fn rejects_wrong_length_and_characters() {
        assert_eq!(
            validate("2115515"),
            Err(BsnError::ValidationFailed {
                value: "2115515".to_string()
            })
        );
        assert_eq!(
            validate("21155155"),
            Err(BsnError::ValidationFailed {
                value: "21155155".to_string()
            })
        );
        assert_eq!(validate("2115"), Err(BsnError::InvalidLength { length: 4 }));
        assert_eq!(
            validate("2115515570"),
            Err(BsnError::InvalidLength { length: 10 })
        );
        assert!(matches!(
            validate("21155155a"),
            Err(BsnError::InvalidCharacter { character: 'a', .. })
        ));
    }
}
