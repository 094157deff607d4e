use elfproef_core::checksum;
use elfproef_core::{BsnError, BsnLength, DigitString, Prefix, Result};

use crate::source::DigitSource;

/// Builds one candidate number from a prefix, or checks a fully given one.
///
/// Positions are filled from the left, which is position `length` in the
/// eleven test, down to position 2. Position 1 is solved last.
#[derive(Debug, Clone, Copy)]
pub struct SequenceBuilder<'a> {
    prefix: &'a Prefix,
    length: BsnLength,
}

impl<'a> SequenceBuilder<'a> {
    /// The caller guarantees the prefix is either at most `length - 2`
    /// digits or exactly `length` digits.
    pub fn new(prefix: &'a Prefix, length: BsnLength) -> Self {
        Self { prefix, length }
    }

    pub fn is_fully_specified(&self) -> bool {
        self.prefix.len() == self.length.get()
    }

    pub fn build(&self, source: &mut dyn DigitSource) -> Result<DigitString> {
        if self.is_fully_specified() {
            return self.check();
        }

        let length = self.length.get();
        let mut digits = Vec::with_capacity(length);
        let mut sum = 0_i64;

        for &digit in self.prefix.digits() {
            sum += i64::from(digit) * checksum::weight(length - digits.len());
            digits.push(digit);
        }

        if digits.is_empty() {
            // Keeps the default range at 100000000..=799999999.
            let digit = source.draw(1, 7);
            sum += i64::from(digit) * checksum::weight(length);
            digits.push(digit);
        }

        while digits.len() < length - 1 {
            let position = length - digits.len();
            let digit = if position == length - 2 && digits[..2] == [9, 9] {
                source.draw(0, 8)
            } else {
                source.draw(0, 9)
            };
            sum += i64::from(digit) * checksum::weight(position);
            digits.push(digit);
        }

        let remainder = checksum::remainder(sum);
        let last = if self.prefix.requests_invalid() {
            source.draw_other_than(remainder)
        } else if remainder == 10 {
            repair_position_two(&mut digits, &mut sum, source)
        } else {
            remainder
        };
        digits.push(last);

        DigitString::from_digits(&digits)
    }

    /// Checks a fully specified prefix against the eleven test.
    pub fn check(&self) -> Result<DigitString> {
        let digits = self.prefix.digits();
        let length = digits.len();
        let Some((&last, body)) = digits.split_last() else {
            return Err(BsnError::InvalidLength { length });
        };

        let sum: i64 = body
            .iter()
            .enumerate()
            .map(|(index, &digit)| i64::from(digit) * checksum::weight(length - index))
            .sum();

        if checksum::check_digit(sum) == Some(last) {
            DigitString::from_digits(digits)
        } else {
            Err(BsnError::ValidationFailed {
                value: self.prefix.as_str().to_string(),
            })
        }
    }
}

/// Redraws the digit at position 2 and returns the new check digit.
///
/// Changing that digit by `d` moves the sum by `2 * d`, which is never a
/// multiple of 11 for `0 < |d| < 10`, so the remainder leaves 10.
fn repair_position_two(digits: &mut [u8], sum: &mut i64, source: &mut dyn DigitSource) -> u8 {
    let index = digits.len() - 1;
    let old = digits[index];
    let new = source.draw_other_than(old);
    digits[index] = new;
    *sum += 2 * (i64::from(new) - i64::from(old));

    let remainder = checksum::remainder(*sum);
    debug_assert!(remainder < 10, "position 2 redraw left remainder 10");
    remainder
}
