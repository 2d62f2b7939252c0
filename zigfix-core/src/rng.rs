//! Seeded random stream driving every generator.
//!
//! The stream is a Mulberry32 generator over a single `u32` state. Fixture
//! reproducibility depends on two things: the mixing function below, and the
//! order in which generators consume draws. Both are part of the output
//! contract; changing either changes every fixture downstream.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{RngCore, SeedableRng};

use crate::error::{GenerateError, Result};

const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Deterministic pseudo-random stream.
///
/// Two streams built from the same seed return identical values for identical
/// call sequences. The type is intentionally not `Clone`: one stream serves
/// exactly one sequential generation session.
///
/// # Examples
/// ```
/// use zigfix_core::RandomStream;
///
/// let mut left = RandomStream::new(7);
/// let mut right = RandomStream::new(7);
/// assert_eq!(left.int(0, 100), right.int(0, 100));
/// assert_eq!(left.hex(8), right.hex(8));
/// ```
#[derive(Debug)]
pub struct RandomStream {
    state: u32,
}

impl RandomStream {
    /// Creates a stream from an explicit seed.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Creates a stream seeded from the wall clock.
    ///
    /// Output is not reproducible; use [`Self::new`] for fixtures.
    #[must_use]
    pub fn from_clock() -> Self {
        Self::new(clock_seed())
    }

    fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(a | 1);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
        t ^ (t >> 14)
    }

    /// Returns a float in `[0, 1)`.
    #[expect(
        clippy::float_arithmetic,
        reason = "the stream contract is defined over a unit float"
    )]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_raw()) / TWO_POW_32
    }

    /// Returns an integer in `[min, max]` inclusive.
    ///
    /// An empty range (`max < min`) still consumes one draw and returns `min`
    /// so the call order stays fixed.
    ///
    /// # Examples
    /// ```
    /// use zigfix_core::RandomStream;
    ///
    /// let mut stream = RandomStream::new(1);
    /// let value = stream.int(30, 255);
    /// assert!((30..=255).contains(&value));
    /// ```
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        reason = "integers are derived by scaling the unit float"
    )]
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        let unit = self.next_f64();
        let span = max.saturating_sub(min).saturating_add(1);
        if span <= 0 {
            return min;
        }
        min + (unit * span as f64).floor() as i64
    }

    /// Typed form of [`Self::int`] for narrow integer types. Draws exactly
    /// like `int`.
    pub fn int_as<T>(&mut self, min: T, max: T) -> T
    where
        T: Copy + Into<i64> + TryFrom<i64>,
    {
        T::try_from(self.int(min.into(), max.into())).unwrap_or(min)
    }

    /// Returns a float in `[min, max)`.
    #[expect(
        clippy::float_arithmetic,
        reason = "floats are scaled from the unit float"
    )]
    pub fn float(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns `true` with probability `p`.
    pub fn bool(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Returns an index in `[0, len)`. `len` must be non-zero.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "indices are derived by scaling the unit float"
    )]
    fn index(&mut self, len: usize) -> usize {
        let scaled = (self.next_f64() * len as f64).floor() as usize;
        scaled.min(len.saturating_sub(1))
    }

    /// Picks one element uniformly.
    ///
    /// # Errors
    /// Returns [`GenerateError::EmptyInput`] when `items` is empty. No draw is
    /// consumed in that case.
    pub fn pick<'a, T>(&mut self, what: &'static str, items: &'a [T]) -> Result<&'a T> {
        if items.is_empty() {
            return Err(GenerateError::EmptyInput { what });
        }
        let index = self.index(items.len());
        items.get(index).ok_or(GenerateError::EmptyInput { what })
    }

    /// Returns one hexadecimal digit value in `0..16`.
    pub fn nibble(&mut self) -> u8 {
        let index = self.index(HEX_DIGITS.len());
        u8::try_from(index).unwrap_or(0)
    }

    /// Returns `len` lowercase hexadecimal digits.
    pub fn hex(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| {
                let digit = self.nibble();
                HEX_DIGITS
                    .get(usize::from(digit))
                    .map_or('0', |&byte| char::from(byte))
            })
            .collect()
    }
}

impl Default for RandomStream {
    fn default() -> Self {
        Self::from_clock()
    }
}

impl RngCore for RandomStream {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_raw());
        let low = u64::from(self.next_raw());
        (high << 32) | low
    }

    #[expect(
        clippy::little_endian_bytes,
        reason = "byte output is defined as the little-endian form of each word"
    )]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            for (slot, byte) in chunk.iter_mut().zip(bytes) {
                *slot = byte;
            }
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for RandomStream {
    type Seed = [u8; 4];

    #[expect(
        clippy::little_endian_bytes,
        reason = "seed bytes are read as a little-endian word"
    )]
    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the clock seed keeps only the low 32 bits of the millisecond count"
)]
pub(crate) fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| (elapsed.as_millis() & u128::from(u32::MAX)) as u32)
        .unwrap_or_default()
}
