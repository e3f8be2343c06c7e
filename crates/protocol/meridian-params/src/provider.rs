//! The epoch-based rule-set registry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use meridian_crypto::{identifier_from_data, Identifier};
use meridian_types::{EpochIndex, ProtocolParameters, SlotIndex, Version};

use crate::api::ProtocolApi;
use crate::error::{ParamsError, ParamsResult};
use crate::versions::{ProtocolEpochVersion, ProtocolEpochVersions};

/// Fallback constructor consulted when a version has no registered
/// parameter set.
type MissingVersionConstructor =
    Box<dyn Fn(Version) -> ParamsResult<Arc<ProtocolApi>> + Send + Sync>;

/// Mutable registry of versioned protocol parameters, resolving the rules
/// in effect for any version, slot, epoch, or point in time.
///
/// One provider is created at node startup, wired into the components
/// that need rule resolution, and lives for the process lifetime. Reads
/// vastly outnumber writes: governance and version-learning events mutate
/// the registry, slot commitment advances the committed rule-set, and
/// everything else only looks things up.
///
/// Locking: one coarse read-write lock guards the parameter maps, the
/// version index, and the latest/committed rule cache; the committed slot
/// sits under a second, narrower lock. Writers that touch both always
/// acquire the coarse lock first.
pub struct EpochBasedProvider {
    inner: RwLock<Inner>,
    committed_slot: RwLock<SlotIndex>,
    api_for_missing_version: Option<MissingVersionConstructor>,
}

#[derive(Default)]
struct Inner {
    protocol_parameters_by_version: HashMap<Version, ProtocolParameters>,
    future_protocol_parameters_by_version: HashMap<Version, Identifier>,
    protocol_versions: ProtocolEpochVersions,

    /// Rules of the highest version with full parameters.
    latest_api: Option<Arc<ProtocolApi>>,
    /// Rules in effect at the committed slot. Never regresses to a lower
    /// version once set.
    committed_api: Option<Arc<ProtocolApi>>,
}

impl EpochBasedProvider {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            committed_slot: RwLock::new(0),
            api_for_missing_version: None,
        }
    }

    /// Configure a fallback constructor for versions without registered
    /// parameters (e.g. rules fetched from a trusted peer).
    pub fn with_api_for_missing_version(
        mut self,
        constructor: impl Fn(Version) -> ParamsResult<Arc<ProtocolApi>> + Send + Sync + 'static,
    ) -> Self {
        self.api_for_missing_version = Some(Box::new(constructor));
        self
    }

    /// Register a full parameter set.
    ///
    /// Supersedes any future-parameters hash recorded for the same
    /// version and advances the latest rule-set if the version is the
    /// highest seen so far.
    pub fn add_protocol_parameters(&self, parameters: ProtocolParameters) -> ParamsResult<()> {
        let mut inner = self.inner.write().map_err(|_| ParamsError::LockPoisoned)?;

        let version = parameters.version;
        inner.protocol_parameters_by_version.insert(version, parameters);
        inner.future_protocol_parameters_by_version.remove(&version);

        let latest_version = inner.latest_api.as_ref().map(|api| api.version());
        if latest_version.map_or(true, |latest| latest < version) {
            let api = self.build_api(&inner, version)?;
            inner.latest_api = Some(api);
            tracing::info!(version, "latest protocol version advanced");
        }

        tracing::debug!(version, "registered protocol parameters");

        Ok(())
    }

    /// Register a full parameter set together with its activation epoch.
    pub fn add_protocol_parameters_at_epoch(
        &self,
        parameters: ProtocolParameters,
        epoch: EpochIndex,
    ) -> ParamsResult<()> {
        let version = parameters.version;
        self.add_protocol_parameters(parameters)?;
        self.add_version(version, epoch)
    }

    /// Register a version activation epoch.
    ///
    /// Re-registering a known version is a no-op; the first activation
    /// epoch wins.
    pub fn add_version(&self, version: Version, epoch: EpochIndex) -> ParamsResult<()> {
        let mut inner = self.inner.write().map_err(|_| ParamsError::LockPoisoned)?;

        inner.protocol_versions.add(version, epoch);
        tracing::debug!(version, epoch, "registered protocol version activation");

        // coarse lock is held, so taking the slot lock here keeps the
        // nesting order
        let slot = *self
            .committed_slot
            .read()
            .map_err(|_| ParamsError::LockPoisoned)?;

        self.update_committed_api(&mut inner, slot)
    }

    /// Register a version whose full parameters are not yet known, only
    /// their fingerprint learned from the network.
    pub fn add_future_version(
        &self,
        version: Version,
        parameters_hash: Identifier,
        epoch: EpochIndex,
    ) -> ParamsResult<()> {
        let mut inner = self.inner.write().map_err(|_| ParamsError::LockPoisoned)?;

        inner.protocol_versions.add(version, epoch);
        inner
            .future_protocol_parameters_by_version
            .insert(version, parameters_hash);
        tracing::debug!(version, epoch, "registered future protocol version");

        Ok(())
    }

    /// Record the most recently committed slot and advance the committed
    /// rule-set if a higher version has activated by then.
    pub fn set_committed_slot(&self, slot: SlotIndex) -> ParamsResult<()> {
        let mut inner = self.inner.write().map_err(|_| ParamsError::LockPoisoned)?;

        {
            let mut committed = self
                .committed_slot
                .write()
                .map_err(|_| ParamsError::LockPoisoned)?;
            *committed = slot;
        }

        self.update_committed_api(&mut inner, slot)
    }

    /// The rules of the given version.
    pub fn api_for_version(&self, version: Version) -> ParamsResult<Arc<ProtocolApi>> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        self.build_api(&inner, version)
    }

    /// The rules in effect at the given epoch.
    pub fn api_for_epoch(&self, epoch: EpochIndex) -> ParamsResult<Arc<ProtocolApi>> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        let version = inner.protocol_versions.version_for_epoch(epoch)?;
        self.build_api(&inner, version)
    }

    /// The rules in effect at the given slot.
    ///
    /// The slot is converted to an epoch with the latest rule-set's time
    /// provider; this is exact as long as the timing parameters never
    /// change across versions.
    pub fn api_for_slot(&self, slot: SlotIndex) -> ParamsResult<Arc<ProtocolApi>> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        let latest = inner.latest_api.as_ref().ok_or(ParamsError::Uninitialized)?;
        let epoch = latest.time_provider().epoch_from_slot(slot);

        let version = inner.protocol_versions.version_for_epoch(epoch)?;
        self.build_api(&inner, version)
    }

    /// The rules in effect at the given unix time (nanoseconds).
    ///
    /// Uses the latest rule-set's time provider, like [`Self::api_for_slot`].
    pub fn api_for_time(&self, unix_nanos: i64) -> ParamsResult<Arc<ProtocolApi>> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        let latest = inner.latest_api.as_ref().ok_or(ParamsError::Uninitialized)?;
        let slot = latest.time_provider().slot_from_unix_nanos(unix_nanos);
        let epoch = latest.time_provider().epoch_from_slot(slot);

        let version = inner.protocol_versions.version_for_epoch(epoch)?;
        self.build_api(&inner, version)
    }

    /// The rules of the highest version with full parameters.
    pub fn latest_api(&self) -> ParamsResult<Arc<ProtocolApi>> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        inner.latest_api.clone().ok_or(ParamsError::Uninitialized)
    }

    /// The rules in effect at the committed slot.
    pub fn committed_api(&self) -> ParamsResult<Arc<ProtocolApi>> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        inner.committed_api.clone().ok_or(ParamsError::Uninitialized)
    }

    /// The registered parameter set of the given version.
    pub fn protocol_parameters(&self, version: Version) -> ParamsResult<ProtocolParameters> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        inner
            .protocol_parameters_by_version
            .get(&version)
            .cloned()
            .ok_or(ParamsError::UnknownVersion(version))
    }

    /// The parameters fingerprint of the given version, from the full
    /// parameters when registered, otherwise from the future-parameters
    /// record.
    pub fn protocol_parameters_hash(&self, version: Version) -> ParamsResult<Identifier> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        Self::parameters_hash_inner(&inner, version)
    }

    /// All known version activation records, ascending by version.
    pub fn protocol_epoch_versions(&self) -> ParamsResult<Vec<ProtocolEpochVersion>> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        Ok(inner.protocol_versions.slice())
    }

    /// The activation epoch of the given version, if it is known.
    pub fn epoch_for_version(&self, version: Version) -> ParamsResult<Option<EpochIndex>> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        Ok(inner.protocol_versions.epoch_for_version(version))
    }

    /// The version in effect at the given slot, resolved like
    /// [`Self::api_for_slot`].
    pub fn version_for_slot(&self, slot: SlotIndex) -> ParamsResult<Version> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        let latest = inner.latest_api.as_ref().ok_or(ParamsError::Uninitialized)?;
        let epoch = latest.time_provider().epoch_from_slot(slot);

        inner.protocol_versions.version_for_epoch(epoch)
    }

    /// Fingerprint of the whole upgrade history: every known version with
    /// its activation epoch and parameters hash, hashed in ascending
    /// version order. Two nodes agree on their entire parameter history
    /// exactly when these identifiers match.
    pub fn versions_and_protocol_parameters_hash(&self) -> ParamsResult<Identifier> {
        let inner = self.inner.read().map_err(|_| ParamsError::LockPoisoned)?;

        let entries = inner.protocol_versions.slice();
        let mut bytes = Vec::with_capacity(entries.len() * 40);
        for entry in entries {
            bytes.extend_from_slice(&entry.bytes());

            let parameters_hash = Self::parameters_hash_inner(&inner, entry.version)?;
            bytes.extend_from_slice(parameters_hash.as_bytes());
        }

        Ok(identifier_from_data(&bytes))
    }

    fn parameters_hash_inner(inner: &Inner, version: Version) -> ParamsResult<Identifier> {
        if let Some(params) = inner.protocol_parameters_by_version.get(&version) {
            return Ok(params.hash());
        }

        inner
            .future_protocol_parameters_by_version
            .get(&version)
            .copied()
            .ok_or(ParamsError::MissingParametersHash(version))
    }

    /// Resolve the rules of a version: latest/committed fast path, then
    /// the parameter map, then the missing-version fallback.
    fn build_api(&self, inner: &Inner, version: Version) -> ParamsResult<Arc<ProtocolApi>> {
        if let Some(latest) = &inner.latest_api {
            if latest.version() == version {
                return Ok(Arc::clone(latest));
            }
        }
        if let Some(committed) = &inner.committed_api {
            if committed.version() == version {
                return Ok(Arc::clone(committed));
            }
        }

        if let Some(params) = inner.protocol_parameters_by_version.get(&version) {
            return Ok(Arc::new(ProtocolApi::new(params.clone())));
        }

        if let Some(constructor) = &self.api_for_missing_version {
            return constructor(version);
        }

        Err(ParamsError::UnknownVersion(version))
    }

    /// Advance the committed rule-set for the given slot. The committed
    /// version only ever ratchets upwards.
    fn update_committed_api(&self, inner: &mut Inner, slot: SlotIndex) -> ParamsResult<()> {
        let Some(latest) = inner.latest_api.clone() else {
            // nothing is registered yet; commitment catches up later
            return Ok(());
        };

        let epoch = latest.time_provider().epoch_from_slot(slot);
        let version = match inner.protocol_versions.version_for_epoch(epoch) {
            Ok(version) => version,
            // no activation covers this epoch yet; commitment catches up
            // once one is registered
            Err(ParamsError::NoVersionForEpoch(_)) => return Ok(()),
            Err(err) => return Err(err),
        };

        let committed_version = inner.committed_api.as_ref().map(|api| api.version());
        if committed_version.map_or(true, |committed| version > committed) {
            let api = self.build_api(inner, version)?;
            inner.committed_api = Some(api);
            tracing::info!(version, slot, "committed protocol version advanced");
        }

        Ok(())
    }
}

impl Default for EpochBasedProvider {
    fn default() -> Self {
        Self::new()
    }
}
