//! Content fingerprints - the dedup key carried by every evaluation record

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a rendered fingerprint (hex-encoded SHA-256)
pub const CODE_HASH_HEX_LEN: usize = 64;

/// SHA-256 fingerprint of an analyzed snippet
///
/// The digest is computed over the exact bytes of the snippet: no
/// normalization, no re-encoding, no salt. Identical content always yields an
/// identical hash, so downstream tooling can deduplicate records by it.
///
/// Deserialization goes through [`CodeHash::from_hex`], so a stored value
/// that is not a rendered SHA-256 digest is rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodeHash(String);

impl CodeHash {
    /// Fingerprint a snippet
    ///
    /// # Examples
    ///
    /// ```
    /// use sca_domain::CodeHash;
    ///
    /// let hash = CodeHash::of("");
    /// assert_eq!(
    ///     hash.as_str(),
    ///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    /// );
    /// ```
    pub fn of(snippet: &str) -> Self {
        Self::of_bytes(snippet.as_bytes())
    }

    /// Fingerprint raw bytes
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut hex = String::with_capacity(CODE_HASH_HEX_LEN);
        for byte in digest.iter() {
            hex.push_str(&format!("{:02x}", byte));
        }
        Self(hex)
    }

    /// Parse a previously rendered fingerprint
    pub fn from_hex(s: &str) -> Result<Self, String> {
        if s.len() != CODE_HASH_HEX_LEN {
            return Err(format!(
                "Invalid code hash length: expected {}, got {}",
                CODE_HASH_HEX_LEN,
                s.len()
            ));
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid code hash '{}': not hexadecimal", s));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Hex rendering
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for tables and log lines
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl TryFrom<String> for CodeHash {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<CodeHash> for String {
    fn from(hash: CodeHash) -> Self {
        hash.0
    }
}

impl fmt::Display for CodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: fingerprinting is a pure function of the content
        #[test]
        fn test_identical_content_identical_hash(content in ".*") {
            let copy = content.clone();
            prop_assert_eq!(CodeHash::of(&content), CodeHash::of(&copy));
        }

        /// Property: distinct content yields distinct hashes
        #[test]
        fn test_distinct_content_distinct_hash(a in ".*", b in ".*") {
            prop_assume!(a != b);
            prop_assert_ne!(CodeHash::of(&a), CodeHash::of(&b));
        }

        /// Property: rendering is always 64 lowercase hex characters
        #[test]
        fn test_hash_shape(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let hash = CodeHash::of_bytes(&bytes);
            prop_assert_eq!(hash.as_str().len(), CODE_HASH_HEX_LEN);
            prop_assert!(hash.as_str().chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }
}
