//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`id`] - Encoding and decoding composite identifiers
//! - [`validate`] - Resource configuration validation
//! - [`check`] - Existence check against a channel snapshot

pub mod check;
pub mod id;
pub mod validate;

pub use check::CheckCommand;
pub use id::IdCommand;
pub use validate::ValidateCommand;
