// New game setup - opening state plus the first day's content
use chrono::{DateTime, Utc};

use crate::config::AirportConfig;
use crate::content::{ContentSource, fallback};
use crate::models::*;
use crate::simulation::settlement::{bounded, materialize_flights};

/// Open a new airport at `location`.
///
/// Weather, the first contract offers and the first flight schedule are
/// requested together. Nothing is signed yet, so the schedule is built for
/// the default airline.
pub async fn new_game(
    location: Location,
    now: DateTime<Utc>,
    content: &dyn ContentSource,
    config: &AirportConfig,
) -> SaveData {
    tracing::info!("🛫 Opening a new airport at {}", location.name);

    let deadline = config.content.rollover_deadline();
    let state = GameState::new(location.clone(), now);
    let (weather, offers, stubs) = {
        let state = &state;
        tokio::join!(
            bounded("weather", deadline, content.fetch_weather(&location), fallback::fallback_weather),
            bounded("contracts", deadline, content.generate_contracts(state), || {
                fallback::fallback_contracts(state.gates)
            }),
            bounded("flights", deadline, content.generate_flights_for_day(state, &[]), || {
                fallback::fallback_flights(state, &[])
            }),
        )
    };

    let mut save = SaveData::new(state);
    let flights = materialize_flights(stubs, now, config.balance.ground_service_minutes);
    let state = &mut save.game_state;
    state.log.push(format!(
        "Current weather: {}. First flight schedule received ({} flights).",
        weather.description,
        flights.len()
    ));
    state.weather = Some(weather);
    state.flights = flights;
    save.available_contracts = offers;

    save
}
