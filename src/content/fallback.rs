// Deterministic content used whenever a collaborator cannot deliver
use async_trait::async_trait;

use crate::content::ContentSource;
use crate::models::{
    Contract, ContractTerms, ContractType, FlightStub, FlightType, GameState, Location, Severity, Weather,
};

pub const DEFAULT_AIRLINE: &str = "Generic Air";

pub fn fallback_weather() -> Weather {
    Weather {
        temperature: 15.0,
        wind_speed: 10.0,
        weather_code: 3,
        description: "Overcast".to_string(),
        severity: Severity::Low,
    }
}

/// One airline offer scaled by gate count and one fuel supply cost
pub fn fallback_contracts(gates: u32) -> Vec<Contract> {
    vec![
        Contract {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Cheap Wings".to_string(),
            contract_type: ContractType::Airline,
            description: "A low-cost carrier looking for a new hub.".to_string(),
            terms: ContractTerms {
                money_per_day: 80 * i64::from(gates),
                reputation_effect: 1,
                cancellation_penalty: Some(2),
            },
            duration: 30,
            days_remaining: None,
        },
        Contract {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Basic Fuel Supplier".to_string(),
            contract_type: ContractType::Fuel,
            description: "Reliable fuel deliveries at a standard price.".to_string(),
            terms: ContractTerms {
                money_per_day: -1500,
                reputation_effect: 0,
                cancellation_penalty: Some(1),
            },
            duration: 60,
            days_remaining: None,
        },
    ]
}

/// Airline names to schedule, "Generic Air" when nothing is signed
pub fn airline_names(airline_contracts: &[Contract]) -> Vec<String> {
    if airline_contracts.is_empty() {
        vec![DEFAULT_AIRLINE.to_string()]
    } else {
        airline_contracts.iter().map(|c| c.name.clone()).collect()
    }
}

/// Two arrival/departure rotations for the first contracted airline
pub fn fallback_flights(state: &GameState, airline_contracts: &[Contract]) -> Vec<FlightStub> {
    let airline = airline_names(airline_contracts)
        .into_iter()
        .next()
        .unwrap_or_else(|| DEFAULT_AIRLINE.to_string());
    let prefix: String = airline.chars().take(2).collect::<String>().to_uppercase();
    let home = state.location_name().unwrap_or("the airport").to_string();

    let rotation = |number: u32, flight_type: FlightType, time: &str, city: &str| {
        let (origin, destination) = match flight_type {
            FlightType::Arrival => (city.to_string(), home.clone()),
            FlightType::Departure => (home.clone(), city.to_string()),
        };
        FlightStub {
            flight_number: format!("{} {}", prefix, number),
            airline: airline.clone(),
            flight_type,
            scheduled_time: time.to_string(),
            origin: Some(origin),
            destination: Some(destination),
        }
    };

    vec![
        rotation(101, FlightType::Arrival, "08:30", "City A"),
        rotation(102, FlightType::Departure, "09:15", "City A"),
        rotation(203, FlightType::Arrival, "17:00", "City B"),
        rotation(204, FlightType::Departure, "18:30", "City B"),
    ]
}

/// Content source that never leaves the process
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineContent;

#[async_trait]
impl ContentSource for OfflineContent {
    async fn fetch_weather(&self, _location: &Location) -> Weather {
        fallback_weather()
    }

    async fn generate_contracts(&self, state: &GameState) -> Vec<Contract> {
        fallback_contracts(state.gates)
    }

    async fn generate_flights_for_day(&self, state: &GameState, airline_contracts: &[Contract]) -> Vec<FlightStub> {
        fallback_flights(state, airline_contracts)
    }
}
