//! Versioned protocol parameters.
//!
//! A `ProtocolParameters` value bundles the network-wide constants that
//! govern timing and Mana economics for one protocol version. Parameter
//! sets are gossiped between nodes and fingerprinted with a deterministic
//! byte layout, so the encoding here must be identical across
//! implementations.

use meridian_crypto::{identifier_from_data, Identifier};
use serde::{Deserialize, Serialize};

use crate::error::{TypesError, TypesResult};
use crate::{BaseToken, Mana, Version};

/// Parameters of the Mana decay and generation curves.
///
/// All factors are fixed-point values: `decay_factors[i]` is the fraction
/// of Mana retained after an epoch diff of `i + 1`, scaled by
/// `2^decay_factors_exponent`. Factors are stored as `u32` because the
/// fixed-point multiply requires them to fit in 32 bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ManaParameters {
    /// Mana generated by 1 base token in 1 slot, scaled by
    /// `2^-generation_rate_exponent`.
    pub generation_rate: u8,
    /// Scaling of `generation_rate` expressed as an exponent of 2.
    pub generation_rate_exponent: u8,
    /// Lookup table of epoch diff to decay factor; entry `i` covers an
    /// epoch diff of `i + 1`.
    pub decay_factors: Vec<u32>,
    /// Scaling of `decay_factors` expressed as an exponent of 2.
    pub decay_factors_exponent: u8,
    /// Integer approximation of the sum of the geometric decay series,
    /// used to skip the epoch-by-epoch loop when generating Mana across
    /// many epochs.
    pub decay_factor_epochs_sum: u32,
    /// Scaling of `decay_factor_epochs_sum` expressed as an exponent of 2.
    pub decay_factor_epochs_sum_exponent: u8,
    /// Number of bits a Mana value may occupy.
    pub bits_count: u8,
}

impl ManaParameters {
    /// The largest representable Mana value under these parameters.
    pub fn max_mana(&self) -> Mana {
        if self.bits_count >= 64 {
            return u64::MAX;
        }

        (1u64 << self.bits_count) - 1
    }
}

/// Versioned, network-wide constants governing timing and economics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProtocolParameters {
    /// Version of the rule-set these parameters describe.
    pub version: Version,
    /// Human-readable network name, also the source of the network ID.
    pub network_name: String,
    /// Unix time (seconds) of the genesis.
    pub genesis_unix_time: i64,
    /// Duration of a slot in seconds.
    pub slot_duration_seconds: u8,
    /// Number of slots in an epoch expressed as an exponent of 2.
    pub slots_per_epoch_exponent: u8,
    /// Total supply of base tokens.
    pub token_supply: BaseToken,
    /// Mana decay and generation parameters.
    pub mana: ManaParameters,
}

impl ProtocolParameters {
    /// Create a validated parameter set.
    ///
    /// Parameter sets arrive from config files and network gossip, so the
    /// fields that would make downstream arithmetic meaningless are
    /// rejected here instead of deep inside the conversion code.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        version: Version,
        network_name: impl Into<String>,
        genesis_unix_time: i64,
        slot_duration_seconds: u8,
        slots_per_epoch_exponent: u8,
        token_supply: BaseToken,
        mana: ManaParameters,
    ) -> TypesResult<Self> {
        if slot_duration_seconds == 0 {
            return Err(TypesError::ZeroSlotDuration);
        }
        if slots_per_epoch_exponent >= 32 {
            return Err(TypesError::SlotsPerEpochExponentTooLarge(
                slots_per_epoch_exponent,
            ));
        }
        if mana.bits_count > 64 {
            return Err(TypesError::ManaBitsCountTooLarge(mana.bits_count));
        }
        if mana.generation_rate_exponent >= 64 {
            return Err(TypesError::GenerationRateExponentTooLarge(
                mana.generation_rate_exponent,
            ));
        }

        Ok(Self {
            version,
            network_name: network_name.into(),
            genesis_unix_time,
            slot_duration_seconds,
            slots_per_epoch_exponent,
            token_supply,
            mana,
        })
    }

    /// Number of slots in one epoch.
    pub fn slots_per_epoch(&self) -> u32 {
        1u32 << self.slots_per_epoch_exponent
    }

    /// Duration of one epoch in seconds.
    pub fn epoch_duration_seconds(&self) -> i64 {
        i64::from(self.slot_duration_seconds) * i64::from(self.slots_per_epoch())
    }

    /// Numeric network ID derived from the network name: the first eight
    /// bytes of the name's identifier, little-endian.
    pub fn network_id(&self) -> u64 {
        let id = identifier_from_data(self.network_name.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&id.as_bytes()[..8]);

        u64::from_le_bytes(bytes)
    }

    /// Deterministic byte layout of the parameter set.
    ///
    /// Fixed-width little-endian fields in declaration order; the network
    /// name and the decay table are length-prefixed. This layout feeds the
    /// consensus fingerprint, so it must never change within a version.
    pub fn to_bytes(&self) -> Vec<u8> {
        let name = self.network_name.as_bytes();
        let mut bytes =
            Vec::with_capacity(40 + name.len() + self.mana.decay_factors.len() * 4);

        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&(name.len() as u16).to_le_bytes());
        bytes.extend_from_slice(name);
        bytes.extend_from_slice(&self.genesis_unix_time.to_le_bytes());
        bytes.push(self.slot_duration_seconds);
        bytes.push(self.slots_per_epoch_exponent);
        bytes.extend_from_slice(&self.token_supply.to_le_bytes());

        bytes.push(self.mana.generation_rate);
        bytes.push(self.mana.generation_rate_exponent);
        bytes.extend_from_slice(&(self.mana.decay_factors.len() as u16).to_le_bytes());
        for factor in &self.mana.decay_factors {
            bytes.extend_from_slice(&factor.to_le_bytes());
        }
        bytes.push(self.mana.decay_factors_exponent);
        bytes.extend_from_slice(&self.mana.decay_factor_epochs_sum.to_le_bytes());
        bytes.push(self.mana.decay_factor_epochs_sum_exponent);
        bytes.push(self.mana.bits_count);

        bytes
    }

    /// Fingerprint of the parameter set.
    pub fn hash(&self) -> Identifier {
        identifier_from_data(&self.to_bytes())
    }
}
