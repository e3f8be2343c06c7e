//! The ordered index of protocol version activations.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use meridian_types::{EpochIndex, Version};

use crate::error::{ParamsError, ParamsResult};

/// One version activation record: `version` takes effect at `start_epoch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProtocolEpochVersion {
    pub version: Version,
    pub start_epoch: EpochIndex,
}

impl ProtocolEpochVersion {
    /// Deterministic byte layout of the record (little-endian, fixed
    /// width), used by the upgrade-history fingerprint.
    pub fn bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..].copy_from_slice(&self.start_epoch.to_le_bytes());

        bytes
    }
}

impl fmt::Display for ProtocolEpochVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "version {} from epoch {}", self.version, self.start_epoch)
    }
}

/// Ordered index of `(version, start epoch)` activation records.
///
/// Entries are kept sorted ascending by version. Upgrade governance only
/// ever activates higher versions at later epochs, so the version order
/// is expected to coincide with the start-epoch order; epoch resolution
/// relies on that.
#[derive(Debug, Clone, Default)]
pub struct ProtocolEpochVersions {
    versions_per_epoch: Vec<ProtocolEpochVersion>,
    known_versions: HashMap<Version, EpochIndex>,
}

impl ProtocolEpochVersions {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a version activation.
    ///
    /// The first registration of a version wins: re-adding a known
    /// version is a no-op and does not move its start epoch.
    pub fn add(&mut self, version: Version, start_epoch: EpochIndex) {
        if self.known_versions.contains_key(&version) {
            return;
        }

        self.versions_per_epoch.push(ProtocolEpochVersion {
            version,
            start_epoch,
        });
        self.known_versions.insert(version, start_epoch);

        self.versions_per_epoch.sort_by_key(|entry| entry.version);
    }

    /// The version in effect at the given epoch: the highest version
    /// whose start epoch is at or before it.
    pub fn version_for_epoch(&self, epoch: EpochIndex) -> ParamsResult<Version> {
        for entry in self.versions_per_epoch.iter().rev() {
            if entry.start_epoch <= epoch {
                return Ok(entry.version);
            }
        }

        // the registry is misconfigured: some version must start at epoch 0
        Err(ParamsError::NoVersionForEpoch(epoch))
    }

    /// The start epoch of the given version, if it is known.
    pub fn epoch_for_version(&self, version: Version) -> Option<EpochIndex> {
        self.known_versions.get(&version).copied()
    }

    /// All activation records, ascending by version.
    pub fn slice(&self) -> Vec<ProtocolEpochVersion> {
        self.versions_per_epoch.clone()
    }

    /// Concatenated byte layout of all records, ascending by version.
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.versions_per_epoch.len() * 8);
        for entry in &self.versions_per_epoch {
            bytes.extend_from_slice(&entry.bytes());
        }

        bytes
    }
}

impl fmt::Display for ProtocolEpochVersions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProtocolEpochVersions[")?;
        for (i, entry) in self.versions_per_epoch.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", entry)?;
        }
        write!(f, "]")
    }
}
