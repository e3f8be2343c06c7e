//! Identifier hashing.
//!
//! Identifiers are computed as the BLAKE2b-256 digest of the raw input
//! bytes. The digest is consensus-relevant: every node must derive the
//! same identifier for the same byte stream, so no serialization framework
//! sits between the caller and the hash function.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use crate::Identifier;

type Blake2b256 = Blake2b<U32>;

/// Compute the identifier of the given bytes.
///
/// # Example
/// ```
/// use meridian_crypto::identifier_from_data;
///
/// let id = identifier_from_data(b"protocol parameters");
/// assert_ne!(id, identifier_from_data(b"something else"));
/// ```
pub fn identifier_from_data(data: &[u8]) -> Identifier {
    let mut hasher = Blake2b256::new();
    hasher.update(data);

    let result: [u8; 32] = hasher.finalize().into();
    Identifier(result)
}

/// Verify that data matches the expected identifier.
///
/// # Returns
/// `true` if `identifier_from_data(data) == expected`, `false` otherwise.
pub fn verify_data(data: &[u8], expected: &Identifier) -> bool {
    let computed = identifier_from_data(data);
    computed.0 == expected.0
}
