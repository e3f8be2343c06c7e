//! Shared test fixtures for the Meridian protocol.
//!
//! Provides parameter presets used across the protocol crates' test
//! suites, so every suite exercises the same reference network.

pub mod presets;

pub use presets::{
    mainnet_protocol_parameters, protocol_parameters_with_version, tiny_time_provider,
};
