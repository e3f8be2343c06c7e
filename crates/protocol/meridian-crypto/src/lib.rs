//! Cryptographic primitives for the Meridian protocol.
//!
//! This crate provides the hashing functionality shared by the rest of the
//! protocol library:
//!
//! - **Identifier**: a 32-byte BLAKE2b-256 digest used to fingerprint
//!   protocol objects (parameter sets, upgrade histories)
//! - **Hashing**: computing identifiers over raw byte streams
//!
//! # Example
//!
//! ```
//! use meridian_crypto::{identifier_from_data, Identifier};
//!
//! let id = identifier_from_data(b"meridian");
//! assert_eq!(id.as_bytes().len(), 32);
//!
//! // Identifiers render and parse as lowercase hex.
//! let parsed: Identifier = id.to_string().parse().unwrap();
//! assert_eq!(parsed, id);
//! ```

mod error;
mod hash;

pub use error::CryptoError;
pub use hash::{identifier_from_data, verify_data};

/// A 32-byte BLAKE2b-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identifier(pub [u8; 32]);

impl Identifier {
    /// Create an Identifier from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the identifier.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The all-zero identifier, used as a placeholder before a real
    /// digest is known.
    pub fn empty() -> Self {
        Self([0u8; 32])
    }
}

impl std::fmt::Debug for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identifier({})", hex_string(&self.0[..8]))
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl AsRef<[u8]> for Identifier {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::str::FromStr for Identifier {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != 64 {
            return Err(CryptoError::InvalidIdentifierLength {
                expected: 64,
                actual: s.len(),
            });
        }

        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &s[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| CryptoError::InvalidHexDigit(pair.to_string()))?;
        }

        Ok(Self(bytes))
    }
}

/// Helper function to convert bytes to hex string (for Debug output).
fn hex_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
        + "..."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_display() {
        let id = identifier_from_data(b"test");
        let s = format!("{}", id);
        assert_eq!(s.len(), 64); // 32 bytes as hex
    }

    #[test]
    fn test_identifier_parse_roundtrip() {
        let id = identifier_from_data(b"roundtrip");
        let parsed: Identifier = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);

        let prefixed: Identifier = format!("0x{}", id).parse().unwrap();
        assert_eq!(prefixed, id);
    }

    #[test]
    fn test_identifier_parse_rejects_bad_input() {
        assert!(matches!(
            "abcd".parse::<Identifier>(),
            Err(CryptoError::InvalidIdentifierLength { .. })
        ));

        let bad = "zz".repeat(32);
        assert!(matches!(
            bad.parse::<Identifier>(),
            Err(CryptoError::InvalidHexDigit(_))
        ));
    }

    #[test]
    fn test_identifier_is_copy() {
        let id = identifier_from_data(b"copy");
        let copy = id;
        assert_eq!(id.0, copy.0);
    }
}
