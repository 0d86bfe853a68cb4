use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Contract, Flight, Location, Vehicle, VehicleType, Weather};

pub const MAX_REPUTATION: i32 = 100;
pub const LOG_CAPACITY: usize = 100;

/// Airport reputation, always within [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct Reputation(i32);

impl Reputation {
    pub fn new(value: i32) -> Self {
        Self(value.clamp(0, MAX_REPUTATION))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn adjust(&mut self, delta: i32) {
        self.0 = self.0.saturating_add(delta).clamp(0, MAX_REPUTATION);
    }
}

impl From<i32> for Reputation {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<Reputation> for i32 {
    fn from(reputation: Reputation) -> Self {
        reputation.0
    }
}

impl std::fmt::Display for Reputation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bounded, append-only game event log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct EventLog(Vec<String>);

impl EventLog {
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "airport_tower::game_log", "📝 {}", message);
        self.0.push(message);
        if self.0.len() > LOG_CAPACITY {
            let overflow = self.0.len() - LOG_CAPACITY;
            self.0.drain(..overflow);
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.iter().any(|entry| entry.contains(needle))
    }
}

impl From<Vec<String>> for EventLog {
    fn from(mut entries: Vec<String>) -> Self {
        if entries.len() > LOG_CAPACITY {
            entries.drain(..entries.len() - LOG_CAPACITY);
        }
        Self(entries)
    }
}

impl From<EventLog> for Vec<String> {
    fn from(log: EventLog) -> Self {
        log.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub money: i64,
    pub reputation: Reputation,
    pub day: u32,
    pub gates: u32,
    pub stands: u32,
    pub vehicles: Vec<Vehicle>,
    pub log: EventLog,
    pub game_time: DateTime<Utc>,
    pub flights: Vec<Flight>,
    pub location: Option<Location>,
    pub weather: Option<Weather>,
}

impl GameState {
    /// Opening state of a new airport: one vehicle of every kind at the depot
    pub fn new(location: Location, now: DateTime<Utc>) -> Self {
        let mut log = EventLog::default();
        log.push(format!(
            "Welcome to {} International! Your airport is ready for operations.",
            location.name
        ));

        Self {
            money: 150_000,
            reputation: Reputation::new(50),
            day: 1,
            gates: 4,
            stands: 2,
            vehicles: VehicleType::ALL.iter().map(|t| Vehicle::new(*t)).collect(),
            log,
            game_time: now,
            flights: Vec::new(),
            location: Some(location),
            weather: None,
        }
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref().map(|loc| loc.name.as_str())
    }

    pub fn flight(&self, flight_id: &str) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == flight_id)
    }

    pub fn vehicle(&self, vehicle_id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == vehicle_id)
    }
}

/// One persisted record per player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub game_state: GameState,
    #[serde(default)]
    pub active_contracts: Vec<Contract>,
    #[serde(default)]
    pub available_contracts: Vec<Contract>,
}

impl SaveData {
    pub fn new(game_state: GameState) -> Self {
        Self {
            game_state,
            active_contracts: Vec::new(),
            available_contracts: Vec::new(),
        }
    }
}
