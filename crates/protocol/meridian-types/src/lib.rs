//! Data structures for the Meridian protocol.
//!
//! This crate provides the value types shared across the protocol library.
//! It contains no ledger logic, only type definitions with serialization
//! support.
//!
//! # Module Organization
//!
//! - [`params`] - Versioned protocol parameters and Mana parameters
//! - [`error`] - Parameter validation errors
//!
//! # Type Conventions
//!
//! Scalar protocol quantities are plain type aliases rather than newtypes:
//! slot and epoch indices are shifted, added, and compared constantly in
//! consensus code, and the alias form keeps that arithmetic readable.
//!
//! - [`SlotIndex`] is 1-based; slot `0` is reserved for "before genesis"
//! - [`EpochIndex`] is 0-based; an epoch is a power-of-two-aligned group
//!   of consecutive slots
//! - [`Mana`] values decay over epochs; [`BaseToken`] values do not

pub mod error;
pub mod params;

pub use error::{TypesError, TypesResult};
pub use params::{ManaParameters, ProtocolParameters};

/// Index of a slot, the fixed-duration unit of protocol time.
///
/// Slots are counted starting from 1; slot 0 is the pre-genesis sentinel.
pub type SlotIndex = u32;

/// Index of an epoch, a group of `2^slots_per_epoch_exponent` slots.
///
/// Epochs are counted starting from 0.
pub type EpochIndex = u32;

/// Version of a protocol rule-set.
pub type Version = u32;

/// Amount of Mana, the time-decaying resource used for congestion control.
pub type Mana = u64;

/// Amount of base tokens, the network's transferable currency unit.
pub type BaseToken = u64;
