//! `policy-channel` binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use alert_policy_channel_cli::cli::{Cli, Commands};
use alert_policy_channel_cli::commands::{CheckCommand, IdCommand, ValidateCommand};
use alert_policy_channel_cli::{CliError, OutputFormat};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Encode {
            policy_id,
            channel_ids,
        } => IdCommand::new().encode(&mut stdout, &format, policy_id, &channel_ids),
        Commands::Decode { id, arity } => {
            IdCommand::new().decode(&mut stdout, &format, &id, arity)
        }
        Commands::Validate { config } => {
            ValidateCommand::new().execute(&mut stdout, &format, &config)
        }
        Commands::Check { id, channels } => {
            CheckCommand::new().execute(&mut stdout, &format, &id, &channels)
        }
    }
}
