//! Integration tests for the association lifecycle.

use std::thread;

use alert_policy_channel::memory::Call;
use alert_policy_channel::{
    AssociationState, Channel, CompositeId, DecodeError, DecodeMode, DeleteOutcome,
    InMemoryAlerts, PolicyChannelConfig, PolicyChannelError, PolicyChannelResource, ReadOutcome,
    ResourceData, ResourceState, any_channel_belongs_to_policy,
};

// ==================== Helper Functions ====================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("alert_policy_channel=debug")
        .try_init();
}

fn platform() -> InMemoryAlerts {
    InMemoryAlerts::from_channels([
        Channel::new(2, "on-call email", "email"),
        Channel::new(3, "ops slack", "slack"),
        Channel::new(4, "pager", "pagerduty"),
        Channel::new(5, "audit hook", "webhook"),
    ])
}

// ==================== Lifecycle Tests ====================

#[test]
fn test_full_lifecycle() {
    init_tracing();
    let resource = PolicyChannelResource::new(platform());
    let mut state = ResourceData::new();
    assert_eq!(state.state(), AssociationState::Unknown);

    resource
        .create(&PolicyChannelConfig::new(10, vec![2, 3]), &mut state)
        .expect("create");
    assert_eq!(state.state(), AssociationState::Created);

    let outcome = resource.read(&mut state).expect("read");
    assert!(matches!(outcome, ReadOutcome::Confirmed(_)));
    assert_eq!(state.state(), AssociationState::Confirmed);

    let outcome = resource.delete(&mut state).expect("delete");
    assert_eq!(outcome, DeleteOutcome::Detached(vec![2, 3]));
    assert_eq!(state.state(), AssociationState::Removed);
    assert!(!state.exists());
}

#[test]
fn test_refresh_after_remote_removal() {
    init_tracing();
    let resource = PolicyChannelResource::new(platform());
    let mut state = ResourceData::new();
    resource
        .create(&PolicyChannelConfig::new(10, vec![2, 3]), &mut state)
        .expect("create");

    resource.api().remove_channel(2);
    resource.api().remove_channel(3);

    assert_eq!(resource.read(&mut state).expect("read"), ReadOutcome::Removed);
    assert_eq!(state.id(), "");
}

#[test]
fn test_not_found_then_associated_takes_two_lookups() {
    let ops = Channel::new(3, "ops", "slack").with_policy(1);
    let api = InMemoryAlerts::from_channels([ops]);

    let exists = any_channel_belongs_to_policy(&api, 1, &[2, 3]).expect("lookup");

    assert!(exists);
    assert_eq!(api.lookups(), vec![2, 3]);
}

#[test]
fn test_delete_after_remote_removal_succeeds() {
    let resource = PolicyChannelResource::new(platform());
    let mut state = ResourceData::new();
    resource
        .create(&PolicyChannelConfig::new(10, vec![4]), &mut state)
        .expect("create");
    resource.api().remove_channel(4);

    let outcome = resource.delete(&mut state).expect("delete");

    assert_eq!(outcome, DeleteOutcome::AlreadyRemoved);
    assert!(!state.exists());
}

#[test]
fn test_legacy_single_channel_state_is_readable() {
    let resource = PolicyChannelResource::new(platform());
    let mut state = ResourceData::new();
    resource
        .create(&PolicyChannelConfig::single(10, 5), &mut state)
        .expect("create");

    let legacy = CompositeId::decode(state.id(), DecodeMode::Fixed(2)).expect("legacy decode");
    assert_eq!(legacy.channel_ids(), &[5]);

    assert!(matches!(
        resource.read(&mut state).expect("read"),
        ReadOutcome::Confirmed(_)
    ));
}

#[test]
fn test_tampered_state_is_fatal() {
    let resource = PolicyChannelResource::new(platform());

    for bad in ["", "10", "10:", ":2", "10:two", "10;2"] {
        let mut state = ResourceData::with_id(bad);
        let err = resource.read(&mut state).expect_err(bad);
        assert!(
            matches!(
                err,
                PolicyChannelError::Decode(
                    DecodeError::InvalidInteger { .. } | DecodeError::ArityMismatch { .. }
                )
            ),
            "{bad}: {err}"
        );
        assert_eq!(state.id(), bad);
    }
    assert!(resource.api().calls().is_empty());
}

#[test]
fn test_config_from_host_attributes() {
    let resource = PolicyChannelResource::new(platform());
    let mut state = ResourceData::new();
    let config = PolicyChannelConfig::from_value(serde_json::json!({
        "policy_id": 77,
        "channel_ids": [5, 4, 3]
    }))
    .expect("config");

    resource.create(&config, &mut state).expect("create");

    assert_eq!(state.id(), "77:5:4:3");
    assert_eq!(resource.api().calls(), vec![Call::Update(77)]);
}

// ==================== Concurrency Tests ====================

#[test]
fn test_instances_driven_concurrently() {
    let api = platform();
    let resource = PolicyChannelResource::new(&api);

    thread::scope(|scope| {
        for policy_id in 100..108_u64 {
            let resource = &resource;
            scope.spawn(move || {
                let mut state = ResourceData::new();
                resource
                    .create(&PolicyChannelConfig::new(policy_id, vec![2, 3]), &mut state)
                    .expect("create");
                assert!(matches!(
                    resource.read(&mut state).expect("read"),
                    ReadOutcome::Confirmed(_)
                ));
            });
        }
    });

    let mut policies = api.channel(2).expect("channel").links.policy_ids;
    policies.sort_unstable();
    assert_eq!(policies, (100..108).collect::<Vec<u64>>());
}
