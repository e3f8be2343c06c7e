//! The time provider itself.

use meridian_types::{EpochIndex, SlotIndex};

/// Nanoseconds in one second.
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Converts between unix time, slot indices, and epoch indices.
///
/// Slots are counted starting from 1 because slot 0 is reserved for the
/// genesis, which has to be addressable as its own slot as part of the
/// commitment chains. Epochs are counted starting from 0 and span
/// `2^slots_per_epoch_exponent` slots.
///
/// All conversions are pure and total. Values large enough to overflow
/// the fixed-width index types are outside the representable protocol
/// range and are not runtime-checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeProvider {
    /// Unix time (seconds) of the genesis.
    genesis_unix_time: i64,

    /// Slot duration in seconds.
    slot_duration_seconds: i64,

    /// Number of slots in an epoch expressed as an exponent of 2.
    slots_per_epoch_exponent: u8,
}

impl TimeProvider {
    /// Create a new time provider.
    pub fn new(
        genesis_unix_time: i64,
        slot_duration_seconds: i64,
        slots_per_epoch_exponent: u8,
    ) -> Self {
        Self {
            genesis_unix_time,
            slot_duration_seconds,
            slots_per_epoch_exponent,
        }
    }

    /// Unix time (seconds) of the genesis.
    pub fn genesis_unix_time(&self) -> i64 {
        self.genesis_unix_time
    }

    /// Unix nanoseconds of the genesis.
    pub fn genesis_unix_nanos(&self) -> i64 {
        self.genesis_unix_time * NANOS_PER_SECOND
    }

    /// Slot duration in seconds.
    pub fn slot_duration_seconds(&self) -> i64 {
        self.slot_duration_seconds
    }

    /// Number of slots in an epoch expressed as an exponent of 2.
    pub fn slots_per_epoch_exponent(&self) -> u8 {
        self.slots_per_epoch_exponent
    }

    /// Number of slots in one epoch.
    pub fn slots_per_epoch(&self) -> u32 {
        1u32 << self.slots_per_epoch_exponent
    }

    /// Duration of one epoch in seconds.
    pub fn epoch_duration_seconds(&self) -> i64 {
        self.slot_duration_seconds * i64::from(self.slots_per_epoch())
    }

    /// Calculate the slot index for the given unix time (seconds).
    ///
    /// Times before the genesis map to slot 0, the pre-genesis sentinel.
    pub fn slot_from_unix_time(&self, unix_time: i64) -> SlotIndex {
        let elapsed_seconds = unix_time - self.genesis_unix_time;
        if elapsed_seconds < 0 {
            return 0;
        }

        (elapsed_seconds / self.slot_duration_seconds) as SlotIndex + 1
    }

    /// Calculate the slot index for the given unix time (nanoseconds).
    pub fn slot_from_unix_nanos(&self, unix_nanos: i64) -> SlotIndex {
        self.slot_from_unix_time(unix_nanos.div_euclid(NANOS_PER_SECOND))
    }

    /// The start time of the given slot in unix nanoseconds.
    ///
    /// Slot 0 has no duration of its own and maps to the instant just
    /// before the genesis.
    pub fn slot_start_unix_nanos(&self, slot: SlotIndex) -> i64 {
        if slot == 0 {
            return self.genesis_unix_nanos() - 1;
        }

        self.genesis_unix_nanos()
            + i64::from(slot - 1) * self.slot_duration_seconds * NANOS_PER_SECOND
    }

    /// The latest possible timestamp belonging to the given slot, in unix
    /// nanoseconds. Anything later belongs to the next slot.
    pub fn slot_end_unix_nanos(&self, slot: SlotIndex) -> i64 {
        if slot == 0 {
            return self.genesis_unix_nanos() - 1;
        }

        // one nanosecond before the start of the next slot
        self.genesis_unix_nanos()
            + i64::from(slot) * self.slot_duration_seconds * NANOS_PER_SECOND
            - 1
    }

    /// Calculate the epoch index for the given slot.
    pub fn epoch_from_slot(&self, slot: SlotIndex) -> EpochIndex {
        slot >> self.slots_per_epoch_exponent
    }

    /// The first slot of the given epoch.
    pub fn epoch_start(&self, epoch: EpochIndex) -> SlotIndex {
        epoch << self.slots_per_epoch_exponent
    }

    /// The last slot of the given epoch (inclusive).
    pub fn epoch_end(&self, epoch: EpochIndex) -> SlotIndex {
        self.epoch_start(epoch + 1) - 1
    }

    /// The start time of the given epoch in unix nanoseconds.
    pub fn epoch_start_unix_nanos(&self, epoch: EpochIndex) -> i64 {
        self.slot_start_unix_nanos(self.epoch_start(epoch))
    }

    /// The latest possible timestamp belonging to the given epoch, in
    /// unix nanoseconds.
    pub fn epoch_end_unix_nanos(&self, epoch: EpochIndex) -> i64 {
        self.slot_end_unix_nanos(self.epoch_end(epoch))
    }

    /// Number of slots between the given slot and the start of the next
    /// epoch.
    pub fn slots_before_next_epoch(&self, slot: SlotIndex) -> SlotIndex {
        self.epoch_start(self.epoch_from_slot(slot) + 1) - slot
    }

    /// Number of slots between the start of the slot's epoch and the slot
    /// itself.
    pub fn slots_since_epoch_start(&self, slot: SlotIndex) -> SlotIndex {
        slot - self.epoch_start(self.epoch_from_slot(slot))
    }
}
