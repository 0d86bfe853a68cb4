// Daily settlement and content refresh, run once per calendar-day rollover
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::BalanceConfig;
use crate::content::{ContentSource, fallback};
use crate::models::{Contract, Flight, FlightStub, GameState, SaveData};

/// True when `now` falls on a different UTC calendar day than `game_time`
pub fn is_new_day(game_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    game_time.date_naive() != now.date_naive()
}

/// Steps 1-2 of the rollover: pay every active contract for one day, then
/// drop the ones that ran out. Returns the contracts still running.
pub fn settle_contracts(state: &mut GameState, active_contracts: Vec<Contract>) -> Vec<Contract> {
    let mut settled: Vec<Contract> = active_contracts
        .into_iter()
        .map(|mut contract| {
            contract.days_remaining = Some(contract.remaining_days().saturating_sub(1));
            contract
        })
        .collect();

    let net_income: i64 = settled.iter().map(|c| c.terms.money_per_day).sum();
    state.money += net_income;
    state
        .log
        .push(format!("Contracts settled. Net income: {} $.", net_income));

    settled.retain(|contract| {
        let expired = contract.days_remaining.is_some_and(|days| days <= 0);
        if expired {
            state.log.push(format!("Contract with {} has expired.", contract.name));
        }
        !expired
    });

    settled
}

/// Turn generated schedule entries into Scheduled flights.
///
/// The "HH:MM" time is placed on `now`'s UTC date; a time already in the
/// past rolls to the next day. Entries without a valid time are skipped.
/// The result is ordered by actual time.
pub fn materialize_flights(stubs: Vec<FlightStub>, now: DateTime<Utc>, servicing_minutes: f64) -> Vec<Flight> {
    let mut flights: Vec<Flight> = stubs
        .into_iter()
        .filter_map(|stub| {
            let Some(wall_time) = stub.wall_time() else {
                tracing::warn!("⚠️ Skipping flight {} with unreadable time {:?}", stub.flight_number, stub.scheduled_time);
                return None;
            };

            let mut actual_time = now.date_naive().and_time(wall_time).and_utc();
            if actual_time < now {
                actual_time += chrono::Duration::days(1);
            }
            Some(Flight::from_stub(stub, actual_time, servicing_minutes))
        })
        .collect();

    flights.sort_by_key(|f| f.actual_time);
    flights
}

/// Full day rollover for one save.
///
/// Contract settlement happens first so that the schedule request sees the
/// surviving airline contracts. The three content requests are issued
/// together and each one is bounded by `deadline`; a request that overruns
/// contributes its fallback value instead.
pub async fn run_day_rollover(
    save: &mut SaveData,
    now: DateTime<Utc>,
    content: &dyn ContentSource,
    balance: &BalanceConfig,
    deadline: Duration,
) {
    let next_day = save.game_state.day + 1;
    tracing::info!("🌅 Day rollover to day {}", next_day);
    save.game_state
        .log
        .push(format!("A new day has begun. Day {}.", next_day));

    let active = std::mem::take(&mut save.active_contracts);
    save.active_contracts = settle_contracts(&mut save.game_state, active);

    let airline_contracts: Vec<Contract> = save
        .active_contracts
        .iter()
        .filter(|c| c.is_airline())
        .cloned()
        .collect();

    let state = &save.game_state;
    let (weather, offers, stubs) = tokio::join!(
        async {
            let Some(location) = state.location.as_ref() else {
                tracing::warn!("⚠️ Game has no location, using fallback weather");
                return fallback::fallback_weather();
            };
            bounded("weather", deadline, content.fetch_weather(location), fallback::fallback_weather).await
        },
        bounded("contracts", deadline, content.generate_contracts(state), || {
            fallback::fallback_contracts(state.gates)
        }),
        bounded(
            "flights",
            deadline,
            content.generate_flights_for_day(state, &airline_contracts),
            || fallback::fallback_flights(state, &airline_contracts),
        ),
    );

    let new_flights = materialize_flights(stubs, now, balance.ground_service_minutes);
    let flight_count = new_flights.len();
    let offer_count = offers.len();

    let state = &mut save.game_state;
    state.flights.extend(new_flights);
    state.flights.sort_by_key(|f| f.actual_time);

    save.available_contracts.extend(offers);

    let description = weather.description.clone();
    state.weather = Some(weather);
    state.day = next_day;
    state.log.push(format!(
        "New weather: {}. Received a new flight schedule ({} flights) and {} contract offers.",
        description, flight_count, offer_count
    ));
}

pub(crate) async fn bounded<T, F, D>(category: &str, deadline: Duration, request: F, fallback: D) -> T
where
    F: std::future::Future<Output = T>,
    D: FnOnce() -> T,
{
    match tokio::time::timeout(deadline, request).await {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("⏳ {} request exceeded {:?}, using fallback", category, deadline);
            fallback()
        }
    }
}
