//! Error types for meridian-crypto

use thiserror::Error;

/// Errors that can occur in cryptographic operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Identifier string has the wrong length
    #[error("Invalid identifier length: expected {expected} hex digits, got {actual}")]
    InvalidIdentifierLength { expected: usize, actual: usize },

    /// Identifier string contains a non-hex digit
    #[error("Invalid hex digit: '{0}'")]
    InvalidHexDigit(String),
}
