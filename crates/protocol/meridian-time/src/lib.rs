//! Slot and epoch time conversion for the Meridian protocol.
//!
//! A [`TimeProvider`] converts between wall-clock time, slot indices, and
//! epoch indices for one protocol-parameter version. Providers are plain
//! immutable values: create one per parameter set and share it freely
//! across threads.
//!
//! Instants are expressed as unix nanoseconds so the "one nanosecond
//! before the next slot" boundary of a slot's end is representable
//! exactly.
//!
//! # Example
//!
//! ```
//! use meridian_time::TimeProvider;
//!
//! // 10 second slots, 8 slots per epoch.
//! let provider = TimeProvider::new(1_630_000_000, 10, 3);
//!
//! assert_eq!(provider.slot_from_unix_time(1_630_000_000), 1);
//! assert_eq!(provider.epoch_from_slot(8), 1);
//! assert_eq!(provider.epoch_start(1), 8);
//! ```

mod provider;

pub use provider::{TimeProvider, NANOS_PER_SECOND};
