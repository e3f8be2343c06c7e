//! Fixed-point Mana decay and generation for the Meridian protocol.
//!
//! Mana decays over epochs and is generated by held base tokens over
//! slots. Both curves are consensus-relevant: every node must compute the
//! exact same values, so all arithmetic here is integer-only fixed-point
//! with truncating shifts. No floating point is used anywhere.
//!
//! A [`ManaDecayProvider`] is an immutable computation engine built from
//! one protocol-parameter version. It owns its
//! [`TimeProvider`](meridian_time::TimeProvider) and is freely shareable
//! across threads.
//!
//! # Example
//!
//! ```
//! use meridian_mana::ManaDecayProvider;
//! use meridian_time::TimeProvider;
//! use meridian_types::ManaParameters;
//!
//! let time_provider = TimeProvider::new(1_630_000_000, 10, 3);
//! let mana = ManaParameters {
//!     generation_rate: 1,
//!     generation_rate_exponent: 17,
//!     decay_factors: vec![u32::MAX],
//!     decay_factors_exponent: 32,
//!     decay_factor_epochs_sum: 1,
//!     decay_factor_epochs_sum_exponent: 21,
//!     bits_count: 63,
//! };
//! let provider = ManaDecayProvider::new(time_provider, &mana);
//!
//! // No epoch boundary crossed, no decay.
//! assert_eq!(provider.mana_with_decay(100, 8, 15).unwrap(), 100);
//! ```

mod error;
mod fixed_point;
mod provider;

pub use error::{ManaError, ManaResult};
pub use provider::ManaDecayProvider;
