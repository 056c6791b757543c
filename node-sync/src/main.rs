// File: node-sync/src/main.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use node_sync::constants::files;
use node_sync::errors::SyncError;
use node_sync::{
    logging, BackupManager, ConfigManager, DataStore, LocalTransfer, PowerControl, SyncConfig,
    SyncScheduler, SystemPower,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Scheduled backup, handoff and shutdown for a primary/secondary node pair", long_about = None)]
struct Cli {
    /// Configuration file (.toml, or .json for the legacy layout)
    #[arg(short, long, default_value = files::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log file, appended to
    #[arg(long, default_value = files::LOG_FILE)]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poll the clock and handle the noon/midnight checkpoints (default)
    Run,
    /// Back up the data directory now
    Backup,
    /// Delete bundles past the retention window
    Cleanup,
    /// Send a Wake-on-LAN packet to the secondary
    Wake {
        /// Overrides secondary_mac from the configuration
        #[arg(long)]
        mac: Option<String>,
    },
    /// Print configuration, backups and the stored snapshot summary
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_file)?;

    info!("Starting node sync agent");

    let config_manager = ConfigManager::new(cli.config.clone()).await?;
    let config = config_manager.get_current_config();
    info!(
        "Configuration loaded from {}: {} node",
        config_manager.source().display(),
        config.role
    );

    let store = DataStore::new(config.data_dir.clone());
    let backups = BackupManager::new(config.clone());
    let power = Arc::new(SystemPower::new(config.clone()));

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let transfer = Arc::new(LocalTransfer::new(config.clone(), store, backups));
            let scheduler = SyncScheduler::new(config.clone(), transfer, power);
            scheduler.run_until(shutdown_signal()).await;
        }
        Commands::Backup => match backups.backup().await {
            Some(bundle) => info!("Backup written to {}", bundle.display()),
            None => warn!("No backup written"),
        },
        Commands::Cleanup => {
            let deleted = backups.cleanup_old_backups().await;
            info!("Removed {} old backups", deleted);
        }
        Commands::Wake { mac } => {
            power.wake_peer(mac.as_deref()).await;
        }
        Commands::Status => {
            let status = status_report(&config, &backups, &store).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}

async fn status_report(
    config: &SyncConfig,
    backups: &BackupManager,
    store: &DataStore,
) -> Result<Value, SyncError> {
    let stats = backups.backup_stats().await?;
    let snapshot = match store.load().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("{}", e);
            None
        }
    };

    Ok(json!({
        "config": config,
        "backups": stats,
        "snapshot": snapshot.map(|s| json!({
            "timestamp": s.timestamp,
            "server_ip": s.server_ip,
            "players": s.players.len(),
            "game_stats": s.game_stats.len(),
            "messages": s.messages.len(),
        })),
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
