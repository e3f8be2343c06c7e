//! Error types for meridian-params

use meridian_types::{EpochIndex, Version};
use thiserror::Error;

/// Result type for registry lookups and mutations.
pub type ParamsResult<T> = Result<T, ParamsError>;

/// Errors raised by the version registry.
///
/// These indicate a misconfigured or out-of-sync node rather than bad
/// caller input; the registry reports them as typed errors and leaves the
/// abort decision to the top-level caller.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParamsError {
    /// No parameter set registered for this version
    #[error("protocol parameters for version {0} are not set")]
    UnknownVersion(Version),

    /// No registered version covers this epoch; every epoch must be
    /// covered by some version starting at epoch 0
    #[error("no protocol version covers epoch {0}")]
    NoVersionForEpoch(EpochIndex),

    /// A version is known but has neither full parameters nor a future
    /// parameters hash
    #[error("version {0} has neither protocol parameters nor a parameters hash")]
    MissingParametersHash(Version),

    /// The registry has no parameter sets yet
    #[error("no protocol parameters have been registered")]
    Uninitialized,

    /// A registry lock was poisoned by a panicking writer
    #[error("version registry lock poisoned")]
    LockPoisoned,
}
