//! Tally main entry point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tally_api::start_server;
use tally_config::Config;
use tally_core::{EntryStore, JsonFileStore};
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(author = "Tally Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A minimal single-user expense tracker served over HTTP", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "tally.yaml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // A missing config file just means defaults; a broken one is fatal.
    let mut config = if args.config.exists() {
        Config::load(args.config.clone())?
    } else {
        Config::default()
    };
    let env_override = config.apply_env_overrides();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if let Err(e) = env_override {
        log::warn!("Ignoring environment override: {}", e);
    }
    if args.config.exists() {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::info!(
            "No config file at {}, using defaults",
            args.config.display()
        );
    }

    let rt = Runtime::new()?;

    rt.block_on(async {
        let store = JsonFileStore::new(config.entries_path());
        store.ensure_initialized().await?;

        let entries = store.read_all().await?;
        log::info!(
            "Loaded {} entries from {}",
            entries.len(),
            config.entries_path().display()
        );

        start_server(config, Arc::new(store)).await
    })
}
