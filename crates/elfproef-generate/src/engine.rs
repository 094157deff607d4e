use tracing::info;

use elfproef_core::{BsnError, BsnLength, DigitString, Prefix, Result, parse_digits};

use crate::model::{EngineOptions, GenerateRequest, SessionSnapshot};
use crate::sampler::BoundedSampler;
use crate::sets::ConstraintSets;
use crate::source::{DigitSource, RandomDigits};
use crate::validator;

/// Entry point for generating and validating numbers.
///
/// Owns the generated and excluded sets; their scope is the lifetime of
/// the engine, or shorter when the caller clears them.
#[derive(Debug, Clone)]
pub struct ElfproefEngine<S = RandomDigits> {
    options: EngineOptions,
    sampler: BoundedSampler,
    sets: ConstraintSets,
    source: S,
}

impl ElfproefEngine<RandomDigits> {
    pub fn new(options: EngineOptions) -> Self {
        let source = match options.seed {
            Some(seed) => RandomDigits::seeded(seed),
            None => RandomDigits::from_entropy(),
        };
        Self::with_source(options, source)
    }
}

impl Default for ElfproefEngine<RandomDigits> {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl<S: DigitSource> ElfproefEngine<S> {
    pub fn with_source(options: EngineOptions, source: S) -> Self {
        Self {
            sampler: BoundedSampler::new(options.max_attempts),
            options,
            sets: ConstraintSets::new(),
            source,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Generates a number of `length` digits starting with `prefix`.
    ///
    /// - a prefix starting with "999" yields a number failing the eleven test
    /// - a prefix of exactly `length` digits is validated and returned
    /// - `unique` keeps the result out of earlier unique results
    pub fn generate(&mut self, prefix: &str, length: usize, unique: bool) -> Result<DigitString> {
        let length = BsnLength::new(length)?;
        let prefix_len = prefix.chars().count();
        if prefix_len > length.get() || prefix_len + 1 == length.get() {
            return Err(BsnError::PrefixTooLong {
                prefix_len,
                length: length.get(),
            });
        }
        let prefix = Prefix::parse(prefix)?;

        self.sampler
            .sample(&prefix, length, unique, &mut self.sets, &mut self.source)
    }

    pub fn generate_with(&mut self, request: &GenerateRequest) -> Result<DigitString> {
        self.generate(&request.prefix, request.length, request.unique)
    }

    /// Fails with `ValidationFailed` when `value` does not pass the eleven test.
    pub fn validate(&self, value: &str) -> Result<()> {
        validator::validate(value).map(|_| ())
    }

    pub fn is_valid(&self, value: &str) -> bool {
        validator::validate(value).is_ok()
    }

    /// Adds numbers that must never be returned.
    ///
    /// The new values come first in [`Self::excluded`], followed by earlier
    /// ones. Nothing is merged when a value holds a non-digit.
    pub fn exclude<I, T>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let values = digit_strings(values)?;
        let added = values.len();
        self.sets.excluded.merge_front(values);
        info!(
            added,
            total = self.sets.excluded.len(),
            "excluded numbers merged"
        );
        Ok(())
    }

    pub fn clear_excluded(&mut self) -> usize {
        let count = self.sets.excluded.clear();
        info!(count, "list of excluded numbers has been cleared");
        count
    }

    pub fn clear_generated(&mut self) -> usize {
        let count = self.sets.generated.clear();
        info!(count, "list of generated numbers has been cleared");
        count
    }

    pub fn excluded(&self) -> Vec<String> {
        self.sets.excluded.all()
    }

    pub fn generated(&self) -> Vec<String> {
        self.sets.generated.all()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generated: self.generated(),
            excluded: self.excluded(),
        }
    }

    /// Replaces both sets with the contents of `snapshot`.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<()> {
        let generated = digit_strings(snapshot.generated)?;
        let excluded = digit_strings(snapshot.excluded)?;
        self.sets.generated.replace(generated);
        self.sets.excluded.replace(excluded);
        info!(
            generated = self.sets.generated.len(),
            excluded = self.sets.excluded.len(),
            "session restored"
        );
        Ok(())
    }
}

fn digit_strings<I, T>(values: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| {
            let value = value.as_ref();
            parse_digits(value)?;
            Ok(value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ElfproefEngine {
        ElfproefEngine::new(EngineOptions {
            seed: Some(8),
            ..EngineOptions::default()
        })
    }

    #[test]
    fn rejects_lengths_outside_six_to_nine() {
        let mut engine = engine();
        assert_eq!(
            engine.generate("", 5, true),
            Err(BsnError::InvalidLength { length: 5 })
        );
        assert_eq!(
            engine.generate("", 10, false),
            Err(BsnError::InvalidLength { length: 10 })
        );
    }

    #[test]
    fn rejects_prefix_of_length_minus_one_or_longer() {
        let mut engine = engine();
        assert_eq!(
            engine.generate("12345678", 9, true),
            Err(BsnError::PrefixTooLong {
                prefix_len: 8,
                length: 9
            })
        );
        assert_eq!(
            engine.generate("1234567890", 9, true),
            Err(BsnError::PrefixTooLong {
                prefix_len: 10,
                length: 9
            })
        );
    }

    #[test]
    fn length_error_wins_over_prefix_errors() {
        let mut engine = engine();
        assert_eq!(
            engine.generate("abc", 4, true),
            Err(BsnError::InvalidLength { length: 4 })
        );
    }

    #[test]
    fn rejects_non_digit_prefix() {
        let mut engine = engine();
        assert!(matches!(
            engine.generate("8x", 9, true),
            Err(BsnError::InvalidCharacter { character: 'x', .. })
        ));
        assert!(engine.generated().is_empty());
    }

    #[test]
    fn full_length_prefix_is_validated_not_recorded() {
        let mut engine = engine();
        let value = engine.generate("211551557", 9, true).unwrap();
        assert_eq!(value.as_str(), "211551557");
        assert!(engine.generated().is_empty());
        assert!(matches!(
            engine.generate("999450437", 9, true),
            Err(BsnError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn exclude_rejects_non_digits_without_merging() {
        let mut engine = engine();
        engine.exclude(["211551557"]).unwrap();
        let err = engine.exclude(["853380107", "85-338"]).unwrap_err();
        assert!(matches!(err, BsnError::InvalidCharacter { character: '-', .. }));
        assert_eq!(engine.excluded(), vec!["211551557"]);
    }

    #[test]
    fn exclude_puts_new_values_first() {
        let mut engine = engine();
        engine.exclude(["111111110", "222222220"]).unwrap();
        engine.exclude(vec!["333333330".to_string(), "222222220".to_string()]).unwrap();
        assert_eq!(
            engine.excluded(),
            vec!["333333330", "222222220", "111111110"]
        );
        assert_eq!(engine.clear_excluded(), 3);
        assert_eq!(engine.clear_excluded(), 0);
    }

    #[test]
    fn snapshot_restores_into_a_fresh_engine() {
        let mut engine = engine();
        engine.generate("85", 9, true).unwrap();
        engine.generate("85", 9, true).unwrap();
        engine.exclude(["853380107"]).unwrap();
        let snapshot = engine.snapshot();

        let mut restored = ElfproefEngine::default();
        restored.restore(snapshot.clone()).unwrap();
        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.generated().len(), 2);
    }

    #[test]
    fn restore_rejects_non_digits() {
        let mut engine = engine();
        let snapshot = SessionSnapshot {
            generated: vec!["abc".to_string()],
            excluded: Vec::new(),
        };
        assert!(engine.restore(snapshot).is_err());
    }

    #[test]
    fn same_seed_generates_same_sequence() {
        let mut left = engine();
        let mut right = engine();
        for _ in 0..50 {
            assert_eq!(
                left.generate("", 9, false).unwrap(),
                right.generate("", 9, false).unwrap()
            );
        }
    }
}
