//! Lock screen scenario replay binary.
//!
//! # Usage
//!
//! ```bash
//! # Replay on a virtual clock
//! keyguard-sim --script scenarios/puk_locked.keyguard
//!
//! # Pace `advance` steps in real time with a custom config
//! keyguard-sim --script toggle.keyguard --config keyguard.json --realtime
//! ```

use std::path::PathBuf;

use clap::Parser;
use keyguard_sim::{load_config, read, replay};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Lock screen scenario replay
#[derive(Parser, Debug)]
#[command(name = "keyguard-sim")]
#[command(about = "Replays lock screen scenario scripts")]
#[command(version)]
struct Args {
    /// Scenario script to replay
    #[arg(short, long)]
    script: PathBuf,

    /// Lock screen configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pace time steps on the wall clock instead of a virtual clock
    #[arg(long)]
    realtime: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = load_config(args.config.as_deref())?;
    let script = read(&args.script)?;
    tracing::info!(script = %args.script.display(), realtime = args.realtime, "replaying scenario");

    let report = replay(&script, config, args.realtime).await?;
    report.log();

    Ok(())
}
