use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies the random digits a candidate is built from.
pub trait DigitSource {
    /// Draws a digit from `low..=high`.
    fn draw(&mut self, low: u8, high: u8) -> u8;

    /// Draws any digit in `0..=9` except `excluded`.
    fn draw_other_than(&mut self, excluded: u8) -> u8 {
        if excluded > 9 {
            return self.draw(0, 9);
        }
        let digit = self.draw(0, 8);
        if digit >= excluded { digit + 1 } else { digit }
    }
}

/// Digit source backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDigits<R = ChaCha8Rng> {
    rng: R,
}

impl RandomDigits<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

impl<R: RngCore> RandomDigits<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> DigitSource for RandomDigits<R> {
    fn draw(&mut self, low: u8, high: u8) -> u8 {
        self.rng.random_range(low..=high)
    }
}

/// Replays a fixed script of digits, cycling when it runs out.
///
/// Each scripted value is clamped into the range requested by the draw.
/// Useful for fixtures that must produce one exact candidate.
#[derive(Debug, Clone)]
pub struct ScriptedDigits {
    script: Vec<u8>,
    cursor: usize,
}

impl ScriptedDigits {
    pub fn new(script: &[u8]) -> Self {
        Self {
            script: script.to_vec(),
            cursor: 0,
        }
    }

    /// Number of draws served so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl DigitSource for ScriptedDigits {
    fn draw(&mut self, low: u8, high: u8) -> u8 {
        if self.script.is_empty() {
            return low;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value.clamp(low, high)
    }
}
