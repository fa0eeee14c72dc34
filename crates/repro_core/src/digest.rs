//! Content digests of replayed inputs.
//!
//! Uses BLAKE3. Two replays of the same file are byte-identical exactly
//! when their digests match.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A BLAKE3 digest of an input buffer (32 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InputDigest([u8; 32]);

impl InputDigest {
    /// The number of bytes in a digest
    pub const LEN: usize = 32;

    /// Compute the digest of data
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Convert to hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for InputDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_digest_deterministic() {
        let a = InputDigest::compute(&[0x00, 0xFF, 0x10]);
        let b = InputDigest::compute(&[0x00, 0xFF, 0x10]);
        assert_eq!(a, b);
        assert_ne!(a, InputDigest::compute(&[0x00, 0xFF]));
    }

    #[test]
    fn test_empty_input_has_digest() {
        let d = InputDigest::compute(&[]);
        assert_eq!(d.to_hex().len(), InputDigest::LEN * 2);
        assert_eq!(d.to_string(), d.to_hex());
    }

    proptest! {
        #[test]
        fn prop_digest_tracks_contents(
            data in proptest::collection::vec(any::<u8>(), 0..256),
            extra in any::<u8>(),
        ) {
            let d = InputDigest::compute(&data);
            prop_assert_eq!(InputDigest::compute(&data.clone()), d);

            let mut longer = data;
            longer.push(extra);
            prop_assert_ne!(InputDigest::compute(&longer), d);
        }
    }
}
