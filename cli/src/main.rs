//! powtool: command-line access to the proof-of-work rules.

mod commands;
mod config;
mod window;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use pow_types::{CompactTarget, NetworkId};

use crate::config::{resolve_params, ConfigFile};

#[derive(Parser)]
#[command(name = "powtool", about = "Inspect compact targets, check work and compute retargets")]
struct Cli {
    /// Network preset: "main", "test", or "regtest".
    /// When a config file is provided, defaults to the file's network value.
    #[arg(long, env = "POWTOOL_NETWORK")]
    network: Option<NetworkId>,

    /// Path to a TOML configuration file. Its parameter overrides apply on
    /// top of the selected network's preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "POWTOOL_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Expand a compact target.
    Decode { bits: CompactTarget },
    /// Encode a 256-bit target (64 hex digits) in compact form.
    Encode { target: String },
    /// Check a block hash (big-endian hex) against a compact target.
    CheckWork { hash: String, bits: CompactTarget },
    /// Compute the target required after the last block of a window file.
    NextTarget { window: PathBuf },
    /// Print the effective consensus parameters.
    Params,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let file = cli.config.as_deref().map(ConfigFile::load).transpose()?;
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file.as_ref().and_then(|f| f.log_level.clone()))
        .unwrap_or_else(|| "info".into());
    pow_utils::init_tracing(&log_level);

    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }
    let (network, params) = resolve_params(cli.network, file)?;
    tracing::debug!(network = %network, "using consensus parameters");

    let report = match cli.command {
        Command::Decode { bits } => commands::decode(bits),
        Command::Encode { target } => commands::encode(&target)?,
        Command::CheckWork { hash, bits } => commands::check_work(&hash, bits, &params)?,
        Command::NextTarget { window } => commands::next_target(&window, &params)?,
        Command::Params => commands::params(&params)?,
    };

    println!("{}", report.text);
    Ok(if report.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
