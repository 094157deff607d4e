use std::fmt;

use serde::{Deserialize, Serialize};

/// Estimated number of candidates reachable for a prefix and length.
///
/// Of `N = 10^free` completions, the multiples of 11 number either
/// `floor(N / 11)` or that plus one depending on the offset of the range.
/// Prefixes starting with "999" target the complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceEstimate {
    pub free_positions: u32,
    pub lower: u64,
    pub upper: u64,
    pub invalid_only: bool,
}

impl SpaceEstimate {
    pub fn new(prefix_len: usize, length: usize, invalid_only: bool) -> Self {
        let free_positions = length.saturating_sub(prefix_len) as u32;
        let total = 10_u64.pow(free_positions);
        let valid = total / 11;
        let (lower, upper) = if invalid_only {
            (total - valid - 1, total - valid)
        } else {
            (valid, valid + 1)
        };
        Self {
            free_positions,
            lower,
            upper,
            invalid_only,
        }
    }
}

/// Context attached to a generation that ran out of attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustionDiagnostics {
    pub prefix: String,
    pub length: usize,
    pub unique: bool,
    pub attempts: u32,
    /// Previously generated numbers sharing the prefix and length.
    pub generated_matching: usize,
    /// Excluded numbers sharing the prefix and length.
    pub excluded_matching: usize,
    pub space: SpaceEstimate,
}

impl ExhaustionDiagnostics {
    pub fn taken(&self) -> usize {
        self.generated_matching + self.excluded_matching
    }

    /// True when the disallowed numbers cover most of the estimated space,
    /// as opposed to an unlucky streak of draws.
    pub fn nearly_exhausted(&self) -> bool {
        self.taken() as u64 * 10 >= self.space.lower * 9
    }
}

impl fmt::Display for ExhaustionDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "not able to generate an allowed number after {} attempts \
             (prefix '{}', length {}, unique {})",
            self.attempts, self.prefix, self.length, self.unique
        )?;
        writeln!(
            f,
            "{} generated and {} excluded numbers match the prefix; \
             the space holds between {} and {} numbers",
            self.generated_matching, self.excluded_matching, self.space.lower, self.space.upper
        )?;
        writeln!(f, "possible solutions are:")?;
        writeln!(f, "- generate with unique disabled if unique numbers are not needed")?;
        writeln!(
            f,
            "- clear the generated numbers more often so they only need to be unique within a smaller scope"
        )?;
        writeln!(
            f,
            "- use a shorter prefix or avoid using the same prefix repeatedly"
        )?;
        write!(
            f,
            "- inspect the generated and excluded numbers to see which part of the space is used"
        )
    }
}
