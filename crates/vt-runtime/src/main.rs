//! # VeriTrust Runtime
//!
//! Replays a JSON call script against a fresh product registry and prints
//! the receipts of every block.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, `--config` file, `VT_*` env)
//! 2. Initialize logging (`RUST_LOG` overrides the configured level), then
//!    log where the configuration came from
//! 3. Deploy the registry with the configured owner
//! 4. Execute the script one block at a time
//! 5. Print receipts as JSON on stdout
//!
//! ## Script Format
//!
//! ```json
//! [
//!   [ { "caller": "0xd0d0...", "call": { "function": "add-manufacturer",
//!                                         "args": { "candidate": "0x0101..." } } } ],
//!   [ { "caller": "0x0101...", "call": { "function": "register-product",
//!                                         "args": { "product_id": "PROD123",
//!                                                   "description": "Authentic Product XYZ" } } } ]
//! ]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use vt_runtime::{build_executor, load_script, RuntimeConfig};

/// VeriTrust product registry replay runtime
#[derive(Parser, Debug)]
#[command(name = "vt-runtime")]
#[command(about = "Replay product registry calls block by block and print receipts")]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON script: an array of blocks, each an array of transactions
    #[arg(short, long)]
    script: PathBuf,

    /// Pretty-print the receipts
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let (config, sources) =
        RuntimeConfig::load(args.config.as_deref()).context("failed to load configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("invalid log level {:?}", config.log_level))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("===========================================");
    info!("  VeriTrust Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("  Owner: {}", config.owner);
    info!("===========================================");
    if let Some(path) = &sources.file {
        info!(path = %path.display(), "Loaded configuration file");
    }
    if !sources.env_overrides.is_empty() {
        info!(variables = ?sources.env_overrides, "Applied environment overrides");
    }

    let script = load_script(&args.script)?;
    let mut executor = build_executor(&config).context("failed to deploy registry")?;
    let blocks = executor.run_script(&script);

    let stats = executor.registry().stats();
    info!(
        blocks = blocks.len(),
        committed = stats.calls_committed,
        queries = stats.queries_served,
        rejected = stats.calls_rejected,
        "Script complete"
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&blocks)
    } else {
        serde_json::to_string(&blocks)
    }
    .context("failed to encode receipts")?;
    println!("{output}");

    Ok(())
}
