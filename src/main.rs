// Airport Tower - Main Entry Point
// Runs the authoritative tick over every stored game

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};

use airport_tower::content::ContentSource;
use airport_tower::logging::init_logging;
use airport_tower::models::{default_location, find_location, known_locations};
use airport_tower::operations::new_game;
use airport_tower::storage::SaveStore;
use airport_tower::{BatchRunner, ConfigManager, DEFAULT_CONFIG_FILE, JsonDirectoryStore, LiveContent};

#[derive(Parser, Debug)]
#[command(version, about = "Authoritative airport simulation and batch runner")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Increase log detail (-v basic, -vv full)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tick every stored game once and exit
    Tick,
    /// Tick every stored game on an interval until Ctrl-C
    Run,
    /// Create a new game for a player
    NewGame {
        #[arg(long)]
        player: String,
        /// Airport location (defaults to Krakow)
        #[arg(long)]
        location: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    tracing::info!("🗼 Airport Tower starting...");
    let mut config_manager = ConfigManager::new(&args.config)?;
    let config = Arc::new(config_manager.config().clone());

    let store: Arc<dyn SaveStore> = Arc::new(JsonDirectoryStore::new(&config.storage.saves_dir));
    let content: Arc<dyn ContentSource> = Arc::new(LiveContent::from_config(&config.content)?);

    match args.command {
        Command::Tick => {
            let runner = BatchRunner::new(store, content, config);
            let report = runner.run_once(Utc::now()).await?;
            for (player_id, reason) in &report.failures {
                tracing::warn!("⚠️ {}: {}", player_id, reason);
            }
        }
        Command::Run => {
            let mut runner = BatchRunner::new(store, content, Arc::clone(&config));
            let mut interval = Duration::from_secs(config.timing.tick_interval_seconds);
            tracing::info!("🔄 Ticking every {}s - press Ctrl+C to stop", interval.as_secs());

            loop {
                if let Err(e) = runner.run_once(Utc::now()).await {
                    tracing::error!("❌ Batch pass failed: {}", e);
                }

                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("🛑 Shutdown requested");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {}
                }

                if config_manager.check_and_reload() {
                    let reloaded = Arc::new(config_manager.config().clone());
                    interval = Duration::from_secs(reloaded.timing.tick_interval_seconds);
                    runner.set_config(reloaded);
                }
            }
        }
        Command::NewGame { player, location } => {
            let location = match location {
                Some(name) => find_location(&name).ok_or_else(|| {
                    let known: Vec<String> = known_locations().into_iter().map(|l| l.name).collect();
                    format!("Unknown location {}. Known locations: {}", name, known.join(", "))
                })?,
                None => default_location(),
            };

            let save = new_game(location, Utc::now(), content.as_ref(), &config).await;
            let revision = store.store(&player, &save, None).await?;
            tracing::info!(
                "✅ Created game for {} at {} (revision {}, {} flights, {} offers)",
                player,
                save.game_state.location_name().unwrap_or("unknown"),
                revision,
                save.game_state.flights.len(),
                save.available_contracts.len()
            );
        }
    }

    Ok(())
}
