//! Registry behavior tests over the reference parameter set.

use std::sync::Arc;
use std::thread;

use meridian_crypto::identifier_from_data;
use meridian_params::{EpochBasedProvider, ParamsError, ProtocolApi};
use meridian_test_utils::protocol_parameters_with_version;
use meridian_time::NANOS_PER_SECOND;

const SLOTS_PER_EPOCH: u32 = 8192;

#[test]
fn version_at_genesis_resolves_for_epoch_zero() {
    let provider = EpochBasedProvider::new();
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(3), 0)
        .unwrap();

    assert_eq!(provider.api_for_epoch(0).unwrap().version(), 3);
    assert_eq!(provider.api_for_version(3).unwrap().version(), 3);
    assert_eq!(provider.latest_api().unwrap().version(), 3);
}

#[test]
fn empty_registry_reports_uninitialized() {
    let provider = EpochBasedProvider::new();

    assert_eq!(provider.latest_api().err(), Some(ParamsError::Uninitialized));
    assert_eq!(provider.committed_api().err(), Some(ParamsError::Uninitialized));
    assert_eq!(provider.api_for_slot(1).err(), Some(ParamsError::Uninitialized));
    assert_eq!(
        provider.api_for_version(3).err(),
        Some(ParamsError::UnknownVersion(3))
    );
}

#[test]
fn latest_api_tracks_highest_version_only() {
    let provider = EpochBasedProvider::new();

    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(3), 0)
        .unwrap();
    assert_eq!(provider.latest_api().unwrap().version(), 3);

    // a lower version does not regress the latest rule-set
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(2), 0)
        .unwrap();
    assert_eq!(provider.latest_api().unwrap().version(), 3);

    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(4), 100)
        .unwrap();
    assert_eq!(provider.latest_api().unwrap().version(), 4);
}

#[test]
fn slot_epoch_and_time_resolution_agree() {
    let provider = EpochBasedProvider::new();
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(3), 0)
        .unwrap();
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(4), 100)
        .unwrap();

    // epoch 99 is still version 3, epoch 100 switches to 4
    assert_eq!(provider.api_for_epoch(99).unwrap().version(), 3);
    assert_eq!(provider.api_for_epoch(100).unwrap().version(), 4);

    let last_v3_slot = 100 * SLOTS_PER_EPOCH - 1;
    let first_v4_slot = 100 * SLOTS_PER_EPOCH;
    assert_eq!(provider.api_for_slot(last_v3_slot).unwrap().version(), 3);
    assert_eq!(provider.api_for_slot(first_v4_slot).unwrap().version(), 4);
    assert_eq!(provider.version_for_slot(first_v4_slot).unwrap(), 4);

    // the time of the first version-4 slot resolves to version 4
    let latest = provider.latest_api().unwrap();
    let first_v4_time = latest.time_provider().slot_start_unix_nanos(first_v4_slot);
    assert_eq!(provider.api_for_time(first_v4_time).unwrap().version(), 4);
    assert_eq!(
        provider
            .api_for_time(first_v4_time - NANOS_PER_SECOND)
            .unwrap()
            .version(),
        3
    );
}

#[test]
fn committed_version_ratchets_upwards() {
    let provider = EpochBasedProvider::new();
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(3), 0)
        .unwrap();
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(4), 100)
        .unwrap();

    provider.set_committed_slot(SLOTS_PER_EPOCH).unwrap();
    assert_eq!(provider.committed_api().unwrap().version(), 3);

    provider.set_committed_slot(100 * SLOTS_PER_EPOCH).unwrap();
    assert_eq!(provider.committed_api().unwrap().version(), 4);

    // commitment of an older slot never regresses the committed rules
    provider.set_committed_slot(SLOTS_PER_EPOCH).unwrap();
    assert_eq!(provider.committed_api().unwrap().version(), 4);
}

#[test]
fn committed_api_advances_when_activation_is_learned_late() {
    let provider = EpochBasedProvider::new();
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(3), 0)
        .unwrap();
    provider
        .add_protocol_parameters(protocol_parameters_with_version(4))
        .unwrap();

    provider.set_committed_slot(200 * SLOTS_PER_EPOCH).unwrap();
    assert_eq!(provider.committed_api().unwrap().version(), 3);

    // learning the activation epoch re-evaluates the committed slot
    provider.add_version(4, 100).unwrap();
    assert_eq!(provider.committed_api().unwrap().version(), 4);
}

#[test]
fn upgrade_history_hash_is_order_independent() {
    let build = |order: &[u32]| {
        let provider = EpochBasedProvider::new();
        for &version in order {
            let epoch = (version - 3) * 100;
            provider
                .add_protocol_parameters_at_epoch(protocol_parameters_with_version(version), epoch)
                .unwrap();
        }
        provider.versions_and_protocol_parameters_hash().unwrap()
    };

    assert_eq!(build(&[3, 4, 5]), build(&[5, 3, 4]));
    assert_ne!(build(&[3, 4, 5]), build(&[3, 4]));
}

#[test]
fn upgrade_history_hash_covers_future_versions() {
    let provider = EpochBasedProvider::new();
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(3), 0)
        .unwrap();

    let future_hash = identifier_from_data(b"gossiped parameters");
    provider.add_future_version(5, future_hash, 300).unwrap();

    let with_future = provider.versions_and_protocol_parameters_hash().unwrap();

    // registering the real parameters replaces the gossiped fingerprint
    provider
        .add_protocol_parameters(protocol_parameters_with_version(5))
        .unwrap();
    let with_params = provider.versions_and_protocol_parameters_hash().unwrap();
    assert_ne!(with_future, with_params);

    assert_eq!(
        provider.protocol_parameters_hash(5).unwrap(),
        protocol_parameters_with_version(5).hash()
    );
}

#[test]
fn upgrade_history_hash_requires_parameters_or_fingerprint() {
    let provider = EpochBasedProvider::new();
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(3), 0)
        .unwrap();
    provider.add_version(6, 400).unwrap();

    assert_eq!(
        provider.versions_and_protocol_parameters_hash().err(),
        Some(ParamsError::MissingParametersHash(6))
    );
}

#[test]
fn activation_records_are_queryable() {
    let provider = EpochBasedProvider::new();
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(3), 0)
        .unwrap();
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(4), 100)
        .unwrap();

    let records = provider.protocol_epoch_versions().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].version, 3);
    assert_eq!(records[1].start_epoch, 100);

    assert_eq!(provider.epoch_for_version(4).unwrap(), Some(100));
    assert_eq!(provider.epoch_for_version(9).unwrap(), None);

    let params = provider.protocol_parameters(3).unwrap();
    assert_eq!(params.version, 3);
    assert_eq!(
        provider.protocol_parameters(9).err(),
        Some(ParamsError::UnknownVersion(9))
    );
}

#[test]
fn missing_version_fallback_is_consulted() {
    let fallback_params = protocol_parameters_with_version(7);
    let provider = EpochBasedProvider::new().with_api_for_missing_version(move |version| {
        assert_eq!(version, 7);
        Ok(Arc::new(ProtocolApi::new(fallback_params.clone())))
    });

    assert_eq!(provider.api_for_version(7).unwrap().version(), 7);
}

#[test]
fn concurrent_readers_observe_consistent_state() {
    let provider = Arc::new(EpochBasedProvider::new());
    provider
        .add_protocol_parameters_at_epoch(protocol_parameters_with_version(3), 0)
        .unwrap();

    let readers: Vec<_> = (0..4)
        .map(|i| {
            let provider = Arc::clone(&provider);
            thread::spawn(move || {
                for round in 0..500u32 {
                    let slot = (round % 200) * SLOTS_PER_EPOCH + i;
                    let api = provider.api_for_slot(slot).unwrap();
                    assert!(api.version() >= 3);
                    assert!(provider.latest_api().unwrap().version() >= 3);
                }
            })
        })
        .collect();

    for version in 4..8u32 {
        provider
            .add_protocol_parameters_at_epoch(
                protocol_parameters_with_version(version),
                (version - 3) * 50,
            )
            .unwrap();
        provider
            .set_committed_slot((version - 3) * 50 * SLOTS_PER_EPOCH)
            .unwrap();
    }

    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(provider.latest_api().unwrap().version(), 7);
    assert_eq!(provider.committed_api().unwrap().version(), 7);
}
