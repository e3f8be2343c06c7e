//! Error types for meridian-types

use thiserror::Error;

/// Result type for parameter construction and validation.
pub type TypesResult<T> = Result<T, TypesError>;

/// Errors raised when constructing protocol parameters from untrusted
/// input (config files, gossiped parameter sets).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// Slot duration must be non-zero
    #[error("slot duration must be non-zero")]
    ZeroSlotDuration,

    /// Slots-per-epoch exponent would overflow the slot index width
    #[error("slots per epoch exponent {0} exceeds the slot index width")]
    SlotsPerEpochExponentTooLarge(u8),

    /// Mana bits count must leave room for a 64-bit representation
    #[error("mana bits count {0} exceeds 64")]
    ManaBitsCountTooLarge(u8),

    /// Generation rate exponent out of the supported fixed-point range
    #[error("generation rate exponent {0} exceeds the fixed-point range")]
    GenerationRateExponentTooLarge(u8),
}
