// Tick orchestration: rollover, dispatch and lifecycle for one saved game
use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::{AirportConfig, BalanceConfig};
use crate::content::ContentSource;
use crate::error::TickError;
use crate::models::{GameState, SaveData};
use crate::simulation::dispatcher::Dispatcher;
use crate::simulation::layout::AirportLayout;
use crate::simulation::lifecycle::FlightLifecycle;
use crate::simulation::settlement::{is_new_day, run_day_rollover};

/// Advances saved games to a target time.
///
/// Safe to call with any monotonically increasing `now`; elapsed time is
/// always measured from the stored game time, never from a fixed interval.
pub struct TickRunner<'a> {
    content: &'a dyn ContentSource,
    balance: &'a BalanceConfig,
    content_deadline: Duration,
}

impl<'a> TickRunner<'a> {
    pub fn new(content: &'a dyn ContentSource, config: &'a AirportConfig) -> Self {
        Self {
            content,
            balance: &config.balance,
            content_deadline: config.content.rollover_deadline(),
        }
    }

    pub fn with_balance(content: &'a dyn ContentSource, balance: &'a BalanceConfig, content_deadline: Duration) -> Self {
        Self { content, balance, content_deadline }
    }

    /// Advance `save` to `now`.
    ///
    /// A `now` that is not after the stored game time returns the save
    /// untouched. At most one day rollover runs per call, however many
    /// calendar days were skipped.
    pub async fn run_tick(&self, mut save: SaveData, now: DateTime<Utc>) -> Result<SaveData, TickError> {
        let elapsed_minutes = elapsed_minutes(save.game_state.game_time, now);
        if elapsed_minutes <= 0.0 {
            return Ok(save);
        }

        validate_save(&save)?;

        if is_new_day(save.game_state.game_time, now) {
            run_day_rollover(&mut save, now, self.content, self.balance, self.content_deadline).await;
        }

        advance_ground_operations(&mut save.game_state, now, elapsed_minutes, self.balance);
        save.game_state.game_time = now;

        Ok(save)
    }
}

/// Simulated minutes between two instants
pub fn elapsed_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    to.signed_duration_since(from).num_milliseconds() as f64 / 60_000.0
}

/// One deterministic pass of vehicle movement and flight transitions,
/// followed by removal of flights that reached a terminal status.
///
/// Flights are visited in collection order, so a vehicle freed earlier in
/// the pass may be claimed by a later flight in the same pass.
pub fn advance_ground_operations(state: &mut GameState, now: DateTime<Utc>, elapsed_minutes: f64, balance: &BalanceConfig) {
    let GameState {
        money,
        reputation,
        gates,
        stands,
        vehicles,
        log,
        flights,
        ..
    } = state;

    let parking_holders = flights
        .iter()
        .filter(|f| !f.status.is_terminal())
        .filter_map(|f| f.parking.map(|parking| (f.id.clone(), parking)))
        .collect();

    let mut dispatcher = Dispatcher::new(vehicles);
    dispatcher.advance_vehicles();

    let mut lifecycle = FlightLifecycle {
        dispatcher,
        money,
        reputation,
        log,
        layout: AirportLayout::new(*gates, *stands),
        balance,
        now,
        elapsed_minutes,
        parking_holders,
    };
    for flight in flights.iter_mut() {
        lifecycle.step(flight);
    }

    let before = flights.len();
    flights.retain(|f| !f.status.is_terminal());
    let removed = before - flights.len();

    let active: HashSet<&str> = flights.iter().map(|f| f.id.as_str()).collect();
    let released = lifecycle.dispatcher.release_orphans(&active);

    if removed > 0 || released > 0 {
        tracing::debug!("🧹 Removed {} finished flights, released {} vehicles", removed, released);
    }
}

/// Reject stored data the state machine cannot process safely
pub fn validate_save(save: &SaveData) -> Result<(), TickError> {
    let state = &save.game_state;

    let mut seen = HashSet::new();
    for flight in &state.flights {
        if !seen.insert(flight.id.as_str()) {
            return Err(TickError::DuplicateFlight(flight.id.clone()));
        }
        if flight.status.requires_parking() && flight.parking.is_none() {
            return Err(TickError::MissingParking {
                flight_number: flight.flight_number.clone(),
                status: flight.status.to_string(),
            });
        }
    }

    let mut seen = HashSet::new();
    for vehicle in &state.vehicles {
        if !seen.insert(vehicle.id.as_str()) {
            return Err(TickError::DuplicateVehicle(vehicle.id.clone()));
        }
    }

    Ok(())
}
