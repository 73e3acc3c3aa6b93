//! # alert-policy-channel-cli
//!
//! Offline operator tool for alert policy channel associations.
//!
//! Provides commands for:
//! - Encoding and decoding composite identifiers
//! - Validating resource configuration files
//! - Checking an identifier against an exported snapshot of channels
//!
//! Nothing here talks to the alerting API; `check` works on a JSON export.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format};
pub use error::CliError;
pub use output::OutputFormat;
