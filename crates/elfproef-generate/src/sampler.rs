use tracing::{debug, warn};

use elfproef_core::{
    BsnError, BsnLength, DigitString, ExhaustionDiagnostics, Prefix, Result, SpaceEstimate,
};

use crate::builder::SequenceBuilder;
use crate::sets::ConstraintSets;
use crate::source::DigitSource;

/// Default number of candidates drawn before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Draws candidates until one is allowed by the constraint sets.
#[derive(Debug, Clone, Copy)]
pub struct BoundedSampler {
    max_attempts: u32,
}

impl Default for BoundedSampler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl BoundedSampler {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the first allowed candidate and, for unique requests,
    /// records it as generated.
    ///
    /// A fully specified prefix is validated and returned as is; neither
    /// set is consulted or changed.
    pub fn sample(
        &self,
        prefix: &Prefix,
        length: BsnLength,
        unique: bool,
        sets: &mut ConstraintSets,
        source: &mut dyn DigitSource,
    ) -> Result<DigitString> {
        let builder = SequenceBuilder::new(prefix, length);
        if builder.is_fully_specified() {
            return builder.check();
        }

        for attempt in 1..=self.max_attempts {
            let candidate = builder.build(source)?;
            if !sets.allows(candidate.as_str(), unique) {
                debug!(
                    candidate = %candidate,
                    attempt,
                    prefix = %prefix,
                    length = length.get(),
                    "candidate rejected"
                );
                continue;
            }

            if unique {
                sets.generated.add(candidate.as_str());
            }
            return Ok(candidate);
        }

        let diagnostics = self.diagnostics(prefix, length, unique, sets);
        warn!(
            prefix = %prefix,
            length = length.get(),
            unique,
            attempts = diagnostics.attempts,
            generated_matching = diagnostics.generated_matching,
            excluded_matching = diagnostics.excluded_matching,
            space_lower = diagnostics.space.lower,
            space_upper = diagnostics.space.upper,
            "retry budget exhausted"
        );
        Err(BsnError::RetryExhausted(Box::new(diagnostics)))
    }

    fn diagnostics(
        &self,
        prefix: &Prefix,
        length: BsnLength,
        unique: bool,
        sets: &ConstraintSets,
    ) -> ExhaustionDiagnostics {
        let length = length.get();
        let generated_matching = if unique {
            sets.generated.count_with_prefix(prefix.as_str(), length)
        } else {
            0
        };
        ExhaustionDiagnostics {
            prefix: prefix.as_str().to_string(),
            length,
            unique,
            attempts: self.max_attempts,
            generated_matching,
            excluded_matching: sets.excluded.count_with_prefix(prefix.as_str(), length),
            space: SpaceEstimate::new(prefix.len(), length, prefix.requests_invalid()),
        }
    }
}
