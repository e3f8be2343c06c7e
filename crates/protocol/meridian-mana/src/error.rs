//! Error types for meridian-mana

use meridian_types::{EpochIndex, SlotIndex};
use thiserror::Error;

/// Result type for Mana computations.
pub type ManaResult<T> = Result<T, ManaError>;

/// Errors raised by the Mana decay and generation math.
///
/// These are deterministic: identical inputs produce identical errors on
/// every node, so they can safely participate in validation verdicts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ManaError {
    /// The creation epoch lies after the target epoch
    #[error("creation epoch {created} is after target epoch {target}")]
    EpochOrder {
        created: EpochIndex,
        target: EpochIndex,
    },

    /// The creation slot lies after the target slot
    #[error("creation slot {created} is after target slot {target}")]
    SlotOrder { created: SlotIndex, target: SlotIndex },

    /// A fixed-point intermediate or result does not fit its integer
    /// width. Mana is a ledger-relevant value, so overflow is surfaced
    /// instead of saturating or wrapping.
    #[error("mana arithmetic overflow")]
    Overflow,
}
