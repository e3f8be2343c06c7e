//! Protocol version registry and rule-set resolution.
//!
//! Protocol rules change over time through versioned parameter sets, each
//! activating at an epoch. This crate answers the question every other
//! node component keeps asking: *which rules are in effect here?*
//!
//! - [`ProtocolEpochVersions`] - ordered index of version activations
//! - [`ProtocolApi`] - one version's parameters bundled with its derived
//!   time and Mana engines
//! - [`EpochBasedProvider`] - the mutable, concurrently-read registry
//!   resolving versions for slots, epochs, times, and committed state
//!
//! # Example
//!
//! ```
//! use meridian_params::EpochBasedProvider;
//! use meridian_types::{ManaParameters, ProtocolParameters};
//!
//! let params = ProtocolParameters::new(
//!     3, "docs-net", 1_630_000_000, 10, 3, 1_000_000, ManaParameters::default(),
//! ).unwrap();
//!
//! let provider = EpochBasedProvider::new();
//! provider.add_protocol_parameters_at_epoch(params, 0).unwrap();
//!
//! assert_eq!(provider.api_for_epoch(0).unwrap().version(), 3);
//! ```

mod api;
mod error;
mod provider;
mod versions;

pub use api::ProtocolApi;
pub use error::{ParamsError, ParamsResult};
pub use provider::EpochBasedProvider;
pub use versions::{ProtocolEpochVersion, ProtocolEpochVersions};
