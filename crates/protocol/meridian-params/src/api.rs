//! One protocol version's rules, ready to use.

use meridian_crypto::Identifier;
use meridian_mana::ManaDecayProvider;
use meridian_time::TimeProvider;
use meridian_types::{ProtocolParameters, Version};

/// A parameter set bundled with the engines derived from it.
///
/// The time provider, the Mana decay provider, and the parameters hash
/// are all fixed by the parameters, so they are derived once here and the
/// whole bundle is shared as an `Arc<ProtocolApi>`. Immutable after
/// construction, freely usable from any thread.
#[derive(Debug, Clone)]
pub struct ProtocolApi {
    parameters: ProtocolParameters,
    time_provider: TimeProvider,
    mana_decay_provider: ManaDecayProvider,
    parameters_hash: Identifier,
}

impl ProtocolApi {
    /// Build the rule bundle for a parameter set.
    pub fn new(parameters: ProtocolParameters) -> Self {
        let time_provider = TimeProvider::new(
            parameters.genesis_unix_time,
            i64::from(parameters.slot_duration_seconds),
            parameters.slots_per_epoch_exponent,
        );
        let mana_decay_provider = ManaDecayProvider::new(time_provider, &parameters.mana);
        let parameters_hash = parameters.hash();

        Self {
            parameters,
            time_provider,
            mana_decay_provider,
            parameters_hash,
        }
    }

    /// The protocol version these rules belong to.
    pub fn version(&self) -> Version {
        self.parameters.version
    }

    /// The underlying parameter set.
    pub fn protocol_parameters(&self) -> &ProtocolParameters {
        &self.parameters
    }

    /// Slot and epoch time conversion under these rules.
    pub fn time_provider(&self) -> &TimeProvider {
        &self.time_provider
    }

    /// Mana decay and generation under these rules.
    pub fn mana_decay_provider(&self) -> &ManaDecayProvider {
        &self.mana_decay_provider
    }

    /// Fingerprint of the underlying parameter set.
    pub fn parameters_hash(&self) -> Identifier {
        self.parameters_hash
    }
}
