//! Alert policy ↔ notification channel associations.
//!
//! `alert-policy-channel` manages the attachment of notification channels to
//! an alerting policy as a single declarative resource. A host drives the
//! resource through create, read, delete and import; the crate translates
//! those into calls on an [`AlertsApi`] and keeps local state consistent
//! with what the API reports.
//!
//! # Features
//!
//! - **Composite identifiers**: the policy and its channels are persisted as
//!   one `:`-joined string such as `"12:34:56"` ([`CompositeId`])
//! - **Legacy decoding**: single-channel identifiers written by older
//!   configurations decode under [`DecodeMode::Fixed`]
//! - **Existence probing**: an association exists while any of its channels
//!   still lists the policy ([`any_channel_belongs_to_policy`])
//! - **Not-found tolerance**: channels that vanished remotely read as
//!   absent, and deletions of already-detached channels succeed
//!
//! # Example
//!
//! ```rust
//! use alert_policy_channel::{
//!     Channel, InMemoryAlerts, PolicyChannelConfig, PolicyChannelResource, ReadOutcome,
//!     ResourceData, ResourceState,
//! };
//!
//! let api = InMemoryAlerts::from_channels([
//!     Channel::new(2, "on-call email", "email"),
//!     Channel::new(3, "ops slack", "slack"),
//! ]);
//! let resource = PolicyChannelResource::new(api);
//!
//! let mut state = ResourceData::new();
//! let config = PolicyChannelConfig::new(1, vec![2, 3]);
//! resource.create(&config, &mut state).unwrap();
//! assert_eq!(state.id(), "1:2:3");
//!
//! let outcome = resource.read(&mut state).unwrap();
//! assert!(matches!(outcome, ReadOutcome::Confirmed(_)));
//! ```
//!
//! # Identifier codec
//!
//! ```rust
//! use alert_policy_channel::id::{parse_hashed_ids, parse_ids, serialize_ids};
//!
//! assert_eq!(serialize_ids(&[1, 2]), "1:2");
//! assert_eq!(parse_ids("1:2", 2).unwrap(), vec![1, 2]);
//! assert!(parse_ids("12", 2).is_err());
//! assert_eq!(parse_hashed_ids("1:2:3").unwrap(), vec![1, 2, 3]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod id;
pub mod memory;
pub mod reconcile;
pub mod resource;
pub mod state;

// Re-export main types at crate root
pub use client::{AlertsApi, Channel, ChannelLinks, Lookup, PolicyChannels};
pub use config::{PolicyChannelConfig, RESOURCE_TYPE};
pub use error::{Arity, ConfigError, DecodeError, LookupError, PolicyChannelError, Result};
pub use id::{CompositeId, DELIMITER, DecodeMode};
pub use memory::InMemoryAlerts;
pub use reconcile::{any_channel_belongs_to_policy, channel_belongs_to_policy};
pub use resource::{DeleteOutcome, PolicyChannelResource, ReadOutcome};
pub use state::{AssociationState, AttributeValue, ResourceData, ResourceState};
