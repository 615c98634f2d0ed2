//! Implementation of `Hash`, a 256-bit identifier, and the fixed-size key types.

use crate::error::{PrimitiveError, PrimitiveResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The length of `Hash` values in bytes.
pub const HASH_SIZE: usize = 32;

/// A 256-bit identifier used for block ids and transaction ids.
///
/// The hex form is the raw byte order, without prefix, as the node reports it.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Returns the all-zero hash (the "null hash").
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; HASH_SIZE])
    }

    /// Checks if every byte is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Wraps a 32-byte array.
    #[inline]
    #[must_use]
    pub const fn from_array(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Creates a `Hash` from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` if the input is not exactly 32 bytes.
    pub fn from_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        let bytes: [u8; HASH_SIZE] = value.try_into().map_err(|_| {
            PrimitiveError::invalid_format(format!("Invalid length: {}", value.len()))
        })?;
        Ok(Self(bytes))
    }

    /// Returns the underlying bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Parses a `Hash` from a 64-character hexadecimal string.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` on wrong length or non-hex characters.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        if s.len() != HASH_SIZE * 2 {
            return Err(PrimitiveError::invalid_format(format!(
                "expected {} hex characters, got {}",
                HASH_SIZE * 2,
                s.len()
            )));
        }

        let bytes = hex::decode(s).map_err(|e| PrimitiveError::invalid_format(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Converts the `Hash` to a lowercase hexadecimal string.
    #[inline]
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex_string())
    }
}

impl FromStr for Hash {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

/// A 32-byte public key (output one-time key).
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; HASH_SIZE]);

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

/// A 32-byte key image attached to a key input.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct KeyImage(pub [u8; HASH_SIZE]);

impl fmt::Debug for KeyImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyImage({})", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_hash_is_default_and_null() {
        assert_eq!(Hash::default(), Hash::zero());
        assert!(Hash::zero().is_zero());
        assert!(!Hash::from_array([1u8; HASH_SIZE]).is_zero());
    }

    #[test]
    fn parse_keeps_raw_byte_order() {
        let mut text = String::from("01");
        text.push_str(&"00".repeat(31));
        let hash = Hash::parse(&text).unwrap();
        assert_eq!(hash.as_bytes()[0], 1);
        assert_eq!(hash.to_string(), text);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(Hash::parse("abcd").is_err());
        assert!(Hash::parse(&"zz".repeat(32)).is_err());
        assert!(Hash::parse(&format!("0x{}", "00".repeat(31))).is_err());
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        let err = Hash::from_bytes(&[0u8; 31]).unwrap_err();
        assert!(matches!(err, PrimitiveError::InvalidFormat { .. }));
    }

    proptest! {
        #[test]
        fn hex_form_parses_back(bytes in proptest::array::uniform32(any::<u8>())) {
            let hash = Hash::from_array(bytes);
            prop_assert_eq!(hash.to_hex_string().parse::<Hash>().unwrap(), hash);
        }
    }
}
