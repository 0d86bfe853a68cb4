// Batch runner - ticks every stored game, isolating per-game failures
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::config::AirportConfig;
use crate::content::ContentSource;
use crate::error::{Error, Result};
use crate::simulation::TickRunner;
use crate::storage::SaveStore;

/// Outcome of one batch pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Games that were looked at
    pub processed: usize,
    /// Games whose record was written back
    pub updated: usize,
    /// `(player_id, reason)` for every game that failed
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

enum GameOutcome {
    Updated(u64),
    Unchanged,
}

pub struct BatchRunner {
    store: Arc<dyn SaveStore>,
    content: Arc<dyn ContentSource>,
    config: Arc<AirportConfig>,
}

impl BatchRunner {
    pub fn new(store: Arc<dyn SaveStore>, content: Arc<dyn ContentSource>, config: Arc<AirportConfig>) -> Self {
        Self { store, content, config }
    }

    /// Replace the configuration used by later passes
    pub fn set_config(&mut self, config: Arc<AirportConfig>) {
        self.config = config;
    }

    /// Tick every stored game to `now`.
    ///
    /// Only a failure to list the players fails the whole pass; anything
    /// that goes wrong inside one game is recorded in the report.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<BatchReport> {
        let players = self.store.list_players().await?;
        let mut report = BatchReport {
            processed: players.len(),
            ..BatchReport::default()
        };

        let permits = Arc::new(Semaphore::new(self.config.batch.max_concurrent_games.max(1)));
        let mut tasks = JoinSet::new();
        let mut task_players = HashMap::new();

        for player_id in players {
            let store = Arc::clone(&self.store);
            let content = Arc::clone(&self.content);
            let config = Arc::clone(&self.config);
            let permits = Arc::clone(&permits);
            let span = tracing::info_span!("game", player = %player_id);
            let task_player = player_id.clone();

            let handle = tasks.spawn(
                async move {
                    let _permit = permits
                        .acquire_owned()
                        .await
                        .map_err(|e| Error::TaskAborted(e.to_string()))?;
                    tick_game(store.as_ref(), content.as_ref(), &config, &player_id, now).await
                }
                .instrument(span),
            );
            task_players.insert(handle.id(), task_player);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, Ok(outcome))) => {
                    if let GameOutcome::Updated(revision) = outcome {
                        report.updated += 1;
                        if let Some(player_id) = task_players.get(&id) {
                            tracing::debug!("✅ {} stored at revision {}", player_id, revision);
                        }
                    }
                }
                Ok((id, Err(e))) => {
                    let player_id = task_players.get(&id).cloned().unwrap_or_default();
                    tracing::error!(player = %player_id, "❌ Tick failed: {}", e);
                    report.failures.push((player_id, e.to_string()));
                }
                Err(join_error) => {
                    let player_id = task_players.get(&join_error.id()).cloned().unwrap_or_default();
                    tracing::error!(player = %player_id, "💥 Game task aborted: {}", join_error);
                    report.failures.push((player_id, Error::TaskAborted(join_error.to_string()).to_string()));
                }
            }
        }

        report.failures.sort();
        tracing::info!(
            "📊 Processed {} games. {} updated, {} failed.",
            report.processed,
            report.updated,
            report.failed()
        );
        Ok(report)
    }
}

async fn tick_game(
    store: &dyn SaveStore,
    content: &dyn ContentSource,
    config: &AirportConfig,
    player_id: &str,
    now: DateTime<Utc>,
) -> Result<GameOutcome> {
    let record = store.load(player_id).await?;
    let before = record.save_data.game_state.game_time;

    let runner = TickRunner::new(content, config);
    let save = runner.run_tick(record.save_data, now).await?;

    if save.game_state.game_time == before {
        tracing::trace!("⏸️ Nothing to do");
        return Ok(GameOutcome::Unchanged);
    }

    let revision = store.store(player_id, &save, Some(record.revision)).await?;
    Ok(GameOutcome::Updated(revision))
}
