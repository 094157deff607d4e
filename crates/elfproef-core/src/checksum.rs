//! The eleven test.
//!
//! Positions are counted from the right, starting at 1. Every position
//! `p >= 2` contributes `digit * p`; position 1 contributes `-digit`. A
//! number passes when the total is divisible by 11. For `211551557`:
//!
//! `2*9 + 1*8 + 1*7 + 5*6 + 5*5 + 1*4 + 5*3 + 5*2 - 7*1 = 110`

/// Divisor of the eleven test.
pub const MODULUS: i64 = 11;

/// Weight of a 1-indexed position counted from the right.
pub fn weight(position: usize) -> i64 {
    if position == 1 { -1 } else { position as i64 }
}

/// Weighted sum of a complete digit sequence.
pub fn weighted_sum(digits: &[u8]) -> i64 {
    let length = digits.len();
    digits
        .iter()
        .enumerate()
        .map(|(index, &digit)| i64::from(digit) * weight(length - index))
        .sum()
}

pub fn is_valid(digits: &[u8]) -> bool {
    !digits.is_empty() && weighted_sum(digits).rem_euclid(MODULUS) == 0
}

/// Remainder of a partial sum over positions `length..=2`.
pub fn remainder(partial_sum: i64) -> u8 {
    partial_sum.rem_euclid(MODULUS) as u8
}

/// Digit for position 1 that completes a partial sum, if one exists.
///
/// A remainder of 10 cannot be matched by a single digit.
pub fn check_digit(partial_sum: i64) -> Option<u8> {
    let remainder = remainder(partial_sum);
    (remainder < 10).then_some(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn digits(value: &str) -> Vec<u8> {
        value.bytes().map(|byte| byte - b'0').collect()
    }

    #[test]
    fn known_values() {
        assert_eq!(weighted_sum(&digits("211551557")), 110);
        assert!(is_valid(&digits("211551557")));
        assert!(is_valid(&digits("853380107")));
        assert!(is_valid(&digits("771052066")));
        assert!(is_valid(&digits("30340731")));
        assert!(!is_valid(&digits("999450437")));
    }

    #[test]
    fn empty_input_is_not_valid() {
        assert!(!is_valid(&[]));
    }

    #[test]
    fn remainder_ten_has_no_check_digit() {
        assert_eq!(check_digit(21), None);
        assert_eq!(check_digit(22), Some(0));
        assert_eq!(check_digit(117), Some(7));
    }

    #[test]
    fn redrawing_position_two_never_keeps_remainder_ten() {
        // A sum with remainder 10 shifts by 2 * (new - old) when the digit at
        // position 2 changes; no such shift is a multiple of 11.
        for base in (10..=400_i64).filter(|sum| sum.rem_euclid(MODULUS) == 10) {
            for old in 0..=9_i64 {
                for new in (0..=9_i64).filter(|new| *new != old) {
                    let sum = base + 2 * (new - old);
                    assert!(
                        check_digit(sum).is_some(),
                        "base={base} old={old} new={new}"
                    );
                }
            }
        }
    }

    proptest! {
        #[test]
        fn completed_sequences_pass(body in proptest::collection::vec(0u8..=9, 5..=8)) {
            let length = body.len() + 1;
            let partial: i64 = body
                .iter()
                .enumerate()
                .map(|(index, &digit)| i64::from(digit) * weight(length - index))
                .sum();
            prop_assume!(check_digit(partial).is_some());
            let mut full = body.clone();
            full.push(check_digit(partial).unwrap());
            prop_assert!(is_valid(&full));
        }

        #[test]
        fn single_digit_changes_are_detected(
            body in proptest::collection::vec(0u8..=9, 5..=8),
            index in 0usize..9,
            delta in 1u8..=9,
        ) {
            let length = body.len() + 1;
            let partial: i64 = body
                .iter()
                .enumerate()
                .map(|(index, &digit)| i64::from(digit) * weight(length - index))
                .sum();
            prop_assume!(check_digit(partial).is_some());
            let mut full = body.clone();
            full.push(check_digit(partial).unwrap());
            let index = index % length;
            full[index] = (full[index] + delta) % 10;
            prop_assert!(!is_valid(&full));
        }
    }
}
