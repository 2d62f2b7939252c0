//! Extended PAN identifier.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::rng::RandomStream;

const HEX_DIGITS: usize = 16;

/// Errors raised while parsing an [`ExtendedPanId`] from text.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ExtendedPanIdError {
    /// The text did not start with `0x`.
    #[error("extended PAN id must start with `0x`")]
    MissingPrefix,
    /// The text did not carry exactly sixteen digits.
    #[error("extended PAN id must have 16 hex digits (got {len})")]
    InvalidLength {
        /// Number of digits after the prefix.
        len: usize,
    },
    /// A digit was not hexadecimal.
    #[error("extended PAN id contains a non-hex digit")]
    InvalidDigit,
}

/// 64-bit extended PAN id of the mesh.
///
/// The textual form is `0x` followed by sixteen lowercase hex digits, most
/// significant first. The byte-array form is little-endian, matching how the
/// radio stack stores it.
///
/// # Examples
/// ```
/// use zigfix_core::ExtendedPanId;
///
/// let id: ExtendedPanId = "0xa08ff49b6f772632".parse()?;
/// assert_eq!(id.to_bytes(), [0x32, 0x26, 0x77, 0x6f, 0x9b, 0xf4, 0x8f, 0xa0]);
/// assert_eq!(id.to_string(), "0xa08ff49b6f772632");
/// # Ok::<(), zigfix_core::ExtendedPanIdError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ExtendedPanId(u64);

impl ExtendedPanId {
    /// Draws a new id from sixteen hex digits of the stream.
    pub fn generate(stream: &mut RandomStream) -> Self {
        let value = (0..HEX_DIGITS).fold(0_u64, |acc, _| (acc << 4) | u64::from(stream.nibble()));
        Self(value)
    }

    /// Builds an id from its little-endian byte form.
    #[expect(
        clippy::little_endian_bytes,
        reason = "the radio stack stores the id little-endian"
    )]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Returns the little-endian byte form.
    #[expect(
        clippy::little_endian_bytes,
        reason = "the radio stack stores the id little-endian"
    )]
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExtendedPanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

impl FromStr for ExtendedPanId {
    type Err = ExtendedPanIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let digits = raw
            .strip_prefix("0x")
            .ok_or(ExtendedPanIdError::MissingPrefix)?;
        if digits.len() != HEX_DIGITS {
            return Err(ExtendedPanIdError::InvalidLength { len: digits.len() });
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ExtendedPanIdError::InvalidDigit);
        }
        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ExtendedPanIdError::InvalidDigit)
    }
}

impl Serialize for ExtendedPanId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
