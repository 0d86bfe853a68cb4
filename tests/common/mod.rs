// Shared fixtures for integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use airport_tower::models::*;

/// 2025-06-01 at `hour:minute` UTC
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0).unwrap()
}

pub fn minutes(n: i64) -> chrono::Duration {
    chrono::Duration::minutes(n)
}

pub fn new_state(now: DateTime<Utc>) -> GameState {
    GameState::new(default_location(), now)
}

pub fn new_save(now: DateTime<Utc>) -> SaveData {
    SaveData::new(new_state(now))
}

pub fn flight(
    number: &str,
    airline: &str,
    flight_type: FlightType,
    status: FlightStatus,
    actual_time: DateTime<Utc>,
) -> Flight {
    let stub = FlightStub {
        flight_number: number.to_string(),
        airline: airline.to_string(),
        flight_type,
        scheduled_time: actual_time.format("%H:%M").to_string(),
        origin: None,
        destination: None,
    };
    let mut flight = Flight::from_stub(stub, actual_time, 60.0);
    flight.status = status;
    flight
}

pub fn arrival(number: &str, status: FlightStatus, actual_time: DateTime<Utc>) -> Flight {
    flight(number, "Test Air", FlightType::Arrival, status, actual_time)
}

pub fn departure(number: &str, status: FlightStatus, actual_time: DateTime<Utc>) -> Flight {
    flight(number, "Test Air", FlightType::Departure, status, actual_time)
}

pub fn contract(name: &str, contract_type: ContractType, money_per_day: i64, days_remaining: Option<i32>) -> Contract {
    Contract {
        id: format!("{}-id", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        contract_type,
        description: String::new(),
        terms: ContractTerms {
            money_per_day,
            reputation_effect: 3,
            cancellation_penalty: Some(4),
        },
        duration: 10,
        days_remaining,
    }
}

pub fn vehicles_of(state: &GameState, vehicle_type: VehicleType) -> Vec<&Vehicle> {
    state
        .vehicles
        .iter()
        .filter(|v| v.vehicle_type == vehicle_type)
        .collect()
}
