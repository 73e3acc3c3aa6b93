//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect alert policy channel identifiers and configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "policy-channel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(
        short,
        long,
        value_enum,
        env = "POLICY_CHANNEL_FORMAT",
        default_value_t = Format::Table
    )]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the composite identifier for a policy and its channels.
    Encode {
        /// The policy ID.
        policy_id: u64,
        /// One or more channel IDs, in order.
        #[arg(required = true)]
        channel_ids: Vec<u64>,
    },

    /// Split a composite identifier into policy and channel IDs.
    Decode {
        /// The composite identifier, e.g. `12:34:56`.
        id: String,
        /// Require exactly this many elements (legacy identifiers use 2).
        #[arg(long)]
        arity: Option<usize>,
    },

    /// Validate a resource configuration file.
    Validate {
        /// JSON file holding `policy_id` and `channel_id` or `channel_ids`.
        config: PathBuf,
    },

    /// Check whether an association exists in a snapshot of channels.
    Check {
        /// The composite identifier.
        id: String,
        /// JSON file holding an array of channel records.
        #[arg(long)]
        channels: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_encode() {
        let cli = Cli::try_parse_from(["policy-channel", "encode", "1", "2", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Encode { policy_id: 1, ref channel_ids } if channel_ids == &[2, 3]
        ));
    }

    #[test]
    fn encode_requires_a_channel() {
        assert!(Cli::try_parse_from(["policy-channel", "encode", "1"]).is_err());
    }

    #[test]
    fn parse_decode_with_arity() {
        let args = ["policy-channel", "-f", "json", "decode", "1:2", "--arity", "2"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.format, Format::Json);
        assert!(matches!(
            cli.command,
            Commands::Decode { arity: Some(2), .. }
        ));
    }

    #[test]
    fn check_requires_snapshot() {
        assert!(Cli::try_parse_from(["policy-channel", "check", "1:2"]).is_err());
    }
}
