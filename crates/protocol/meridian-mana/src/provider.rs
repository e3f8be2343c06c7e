//! The Mana decay and generation engine.

use meridian_time::TimeProvider;
use meridian_types::{BaseToken, EpochIndex, Mana, ManaParameters, SlotIndex};

use crate::error::{ManaError, ManaResult};
use crate::fixed_point::fixed_point_multiply;

/// Deterministic fixed-point computation of Mana decay and generation.
///
/// Built once per protocol-parameter version; immutable afterwards.
#[derive(Debug, Clone)]
pub struct ManaDecayProvider {
    time_provider: TimeProvider,

    /// Mana generated by 1 base token in 1 slot, scaled by
    /// `2^-generation_rate_exponent`.
    generation_rate: u64,
    generation_rate_exponent: u32,

    /// Decay factor lookup table; entry `i` covers an epoch diff of `i + 1`.
    decay_factors: Vec<u32>,
    decay_factors_exponent: u32,

    decay_factor_epochs_sum: u64,
    decay_factor_epochs_sum_exponent: u32,
}

impl ManaDecayProvider {
    /// Create a new decay provider from a parameter set.
    pub fn new(time_provider: TimeProvider, params: &ManaParameters) -> Self {
        Self {
            time_provider,
            generation_rate: u64::from(params.generation_rate),
            generation_rate_exponent: u32::from(params.generation_rate_exponent),
            decay_factors: params.decay_factors.clone(),
            decay_factors_exponent: u32::from(params.decay_factors_exponent),
            decay_factor_epochs_sum: u64::from(params.decay_factor_epochs_sum),
            decay_factor_epochs_sum_exponent: u32::from(params.decay_factor_epochs_sum_exponent),
        }
    }

    /// The time provider this engine converts slots with.
    pub fn time_provider(&self) -> &TimeProvider {
        &self.time_provider
    }

    /// Apply `epoch_diff` epochs of decay to `value`.
    ///
    /// The lookup table covers a bounded range of epoch diffs; larger
    /// gaps consume the table repeatedly, so a one-year table serves
    /// arbitrarily large gaps in `O(epoch_diff / table_len)` steps.
    fn decay(&self, mut value: u64, epoch_diff: EpochIndex) -> ManaResult<u64> {
        if value == 0 || epoch_diff == 0 || self.decay_factors.is_empty() {
            // no decay to apply
            return Ok(value);
        }

        let table_len = self.decay_factors.len() as u32;
        let mut remaining = epoch_diff;
        while remaining > 0 {
            // consume at most the whole table per iteration
            let chunk = remaining.min(table_len);
            remaining -= chunk;

            // table index 0 covers an epoch diff of 1
            let factor = self.decay_factors[chunk as usize - 1];
            value = fixed_point_multiply(value, u64::from(factor), self.decay_factors_exponent)?;
        }

        Ok(value)
    }

    /// Mana generated by holding `amount` base tokens for `slot_diff`
    /// slots, without any decay applied.
    fn generate_mana(&self, amount: BaseToken, slot_diff: SlotIndex) -> ManaResult<Mana> {
        if slot_diff == 0 || self.generation_rate == 0 {
            return Ok(0);
        }

        let factor = u64::from(slot_diff)
            .checked_mul(self.generation_rate)
            .ok_or(ManaError::Overflow)?;

        fixed_point_multiply(amount, factor, self.generation_rate_exponent)
    }

    /// Decay `stored` Mana from its creation slot to the target slot.
    ///
    /// Decay acts on epoch boundaries only: two slots in the same epoch
    /// produce no decay.
    pub fn mana_with_decay(
        &self,
        stored: Mana,
        creation_slot: SlotIndex,
        target_slot: SlotIndex,
    ) -> ManaResult<Mana> {
        let creation_epoch = self.time_provider.epoch_from_slot(creation_slot);
        let target_epoch = self.time_provider.epoch_from_slot(target_slot);

        if creation_epoch > target_epoch {
            return Err(ManaError::EpochOrder {
                created: creation_epoch,
                target: target_epoch,
            });
        }

        self.decay(stored, target_epoch - creation_epoch)
    }

    /// Potential Mana generated by `amount` base tokens held from
    /// `creation_slot` to `target_slot`, with decay applied to the
    /// portions generated in earlier epochs.
    ///
    /// Mana generated in an epoch starts decaying at the next epoch
    /// boundary, which splits the computation by the number of epoch
    /// boundaries crossed:
    ///
    /// - none: plain generation over the slot diff
    /// - one: the first epoch's generation decays once, the rest does not
    /// - more: the epochs-sum constant closes the geometric series over
    ///   the intermediate epochs so no per-epoch loop is needed
    pub fn mana_generation_with_decay(
        &self,
        amount: BaseToken,
        creation_slot: SlotIndex,
        target_slot: SlotIndex,
    ) -> ManaResult<Mana> {
        if creation_slot > target_slot {
            return Err(ManaError::SlotOrder {
                created: creation_slot,
                target: target_slot,
            });
        }

        let creation_epoch = self.time_provider.epoch_from_slot(creation_slot);
        let target_epoch = self.time_provider.epoch_from_slot(target_slot);

        match target_epoch - creation_epoch {
            0 => self.generate_mana(amount, target_slot - creation_slot),
            1 => {
                let first_epoch = self.generate_mana(
                    amount,
                    self.time_provider.slots_before_next_epoch(creation_slot),
                )?;
                let decayed = self.decay(first_epoch, 1)?;
                let last_epoch = self.generate_mana(
                    amount,
                    self.time_provider.slots_since_epoch_start(target_slot),
                )?;

                decayed.checked_add(last_epoch).ok_or(ManaError::Overflow)
            }
            epoch_diff => {
                // closed form of the decayed generation over the
                // intermediate epochs
                let sum_scale = self
                    .decay_factor_epochs_sum_exponent
                    .checked_add(self.generation_rate_exponent)
                    .and_then(|s| {
                        s.checked_sub(u32::from(self.time_provider.slots_per_epoch_exponent()))
                    })
                    .ok_or(ManaError::Overflow)?;
                let sum_factor = self
                    .decay_factor_epochs_sum
                    .checked_mul(self.generation_rate)
                    .ok_or(ManaError::Overflow)?;
                let c = fixed_point_multiply(amount, sum_factor, sum_scale)?;

                let first_epoch = self.generate_mana(
                    amount,
                    self.time_provider.slots_before_next_epoch(creation_slot),
                )?;
                let first_decayed = self.decay(first_epoch, epoch_diff)?;
                let intermediate_decayed = self.decay(c, epoch_diff - 1)?;
                let last_epoch = self.generate_mana(
                    amount,
                    self.time_provider.slots_since_epoch_start(target_slot),
                )?;

                // c carries a rounding surplus of up to one table step;
                // subtract it before removing the decayed tail
                let result = c.checked_add(last_epoch).ok_or(ManaError::Overflow)?;
                let result = result
                    .checked_sub(c >> self.decay_factors_exponent)
                    .ok_or(ManaError::Overflow)?;
                let result = result
                    .checked_sub(intermediate_decayed)
                    .ok_or(ManaError::Overflow)?;

                result.checked_add(first_decayed).ok_or(ManaError::Overflow)
            }
        }
    }

    /// Decay `rewards` Mana from the epoch it was earned in to the epoch
    /// it is claimed in.
    pub fn rewards_with_decay(
        &self,
        rewards: Mana,
        reward_epoch: EpochIndex,
        claimed_epoch: EpochIndex,
    ) -> ManaResult<Mana> {
        if reward_epoch > claimed_epoch {
            return Err(ManaError::EpochOrder {
                created: reward_epoch,
                target: claimed_epoch,
            });
        }

        self.decay(rewards, claimed_epoch - reward_epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 10 second slots, 8 slots per epoch, single-entry decay table with a
    // factor of ~0.9 scaled by 2^32
    fn single_factor_provider() -> ManaDecayProvider {
        let time_provider = TimeProvider::new(1_630_000_000, 10, 3);
        let params = ManaParameters {
            generation_rate: 1,
            generation_rate_exponent: 17,
            decay_factors: vec![3_865_470_566],
            decay_factors_exponent: 32,
            decay_factor_epochs_sum: 2_262_417_561,
            decay_factor_epochs_sum_exponent: 21,
            bits_count: 63,
        };

        ManaDecayProvider::new(time_provider, &params)
    }

    fn no_decay_provider() -> ManaDecayProvider {
        let time_provider = TimeProvider::new(1_630_000_000, 10, 3);
        let params = ManaParameters {
            generation_rate: 1,
            generation_rate_exponent: 17,
            decay_factors: Vec::new(),
            decay_factors_exponent: 32,
            decay_factor_epochs_sum: 0,
            decay_factor_epochs_sum_exponent: 21,
            bits_count: 63,
        };

        ManaDecayProvider::new(time_provider, &params)
    }

    #[test]
    fn test_decay_identities() {
        let provider = single_factor_provider();

        // zero value stays zero over any gap
        assert_eq!(provider.decay(0, 1000).unwrap(), 0);
        // zero epoch diff is the identity
        assert_eq!(provider.decay(123_456, 0).unwrap(), 123_456);
        // an empty table disables decay entirely
        assert_eq!(no_decay_provider().decay(123_456, 1000).unwrap(), 123_456);
    }

    #[test]
    fn test_single_entry_table_chunks_correctly() {
        let provider = single_factor_provider();

        // a two-epoch gap over a one-entry table applies the factor twice
        let once = provider.decay(1_000_000, 1).unwrap();
        let twice = provider.decay(once, 1).unwrap();
        assert_eq!(provider.decay(1_000_000, 2).unwrap(), twice);
        assert_eq!(twice, 809_999);
    }

    #[test]
    fn test_decay_is_non_increasing() {
        let provider = single_factor_provider();

        let mut previous = 1_000_000_000u64;
        for epoch_diff in 1..50u32 {
            let decayed = provider.decay(1_000_000_000, epoch_diff).unwrap();
            assert!(decayed <= previous, "decay grew at diff {epoch_diff}");
            previous = decayed;
        }
    }

    #[test]
    fn test_mana_with_decay_same_epoch() {
        let provider = single_factor_provider();
        // slots 8..=15 are all epoch 1
        assert_eq!(provider.mana_with_decay(100, 8, 15).unwrap(), 100);
    }

    #[test]
    fn test_mana_with_decay_rejects_backwards_epochs() {
        let provider = single_factor_provider();
        assert_eq!(
            provider.mana_with_decay(100, 16, 8),
            Err(ManaError::EpochOrder {
                created: 2,
                target: 1
            })
        );
    }

    #[test]
    fn test_generation_zero_cases() {
        let provider = single_factor_provider();

        assert_eq!(provider.generate_mana(1_000_000, 0).unwrap(), 0);
        assert_eq!(
            provider.mana_generation_with_decay(1_000_000, 42, 42).unwrap(),
            0
        );

        let mut zero_rate = single_factor_provider();
        zero_rate.generation_rate = 0;
        assert_eq!(zero_rate.generate_mana(1_000_000, 100).unwrap(), 0);
    }

    #[test]
    fn test_generation_rejects_backwards_slots() {
        let provider = single_factor_provider();
        assert_eq!(
            provider.mana_generation_with_decay(100, 9, 8),
            Err(ManaError::SlotOrder {
                created: 9,
                target: 8
            })
        );
    }

    #[test]
    fn test_rewards_with_decay() {
        let provider = single_factor_provider();

        assert_eq!(provider.rewards_with_decay(1_000_000, 3, 3).unwrap(), 1_000_000);
        assert_eq!(provider.rewards_with_decay(1_000_000, 3, 4).unwrap(), 899_999);
        assert_eq!(
            provider.rewards_with_decay(1_000_000, 4, 3),
            Err(ManaError::EpochOrder {
                created: 4,
                target: 3
            })
        );
    }

    #[test]
    fn test_single_boundary_splits_generation() {
        let provider = single_factor_provider();

        // slots 10 -> 19: epochs 1 -> 2, 6 slots before the boundary and
        // 3 after it
        let result = provider.mana_generation_with_decay(1 << 40, 10, 19).unwrap();

        let first = provider.generate_mana(1 << 40, 6).unwrap();
        let expected = provider.decay(first, 1).unwrap()
            + provider.generate_mana(1 << 40, 3).unwrap();
        assert_eq!(result, expected);
    }
}
