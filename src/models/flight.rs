use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightType {
    Arrival,
    Departure,
}

/// Flight lifecycle states.
///
/// `Boarding`, `Delayed` and `Cancelled` are part of the persisted vocabulary
/// but no tick transition enters or leaves them; a flight loaded in one of
/// those states is carried unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightStatus {
    Scheduled,
    Inbound,
    #[serde(rename = "Awaiting Follow-Me")]
    AwaitingFollowMe,
    #[serde(rename = "Taxiing to Parking")]
    TaxiingToParking,
    Servicing,
    Boarding,
    #[serde(rename = "Awaiting Pushback")]
    AwaitingPushback,
    #[serde(rename = "Pushing Back")]
    PushingBack,
    #[serde(rename = "Taxiing to Runway")]
    TaxiingToRunway,
    #[serde(rename = "Taking Off")]
    TakingOff,
    Departed,
    Delayed,
    Diverted,
    Cancelled,
    Completed,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "Scheduled",
            FlightStatus::Inbound => "Inbound",
            FlightStatus::AwaitingFollowMe => "Awaiting Follow-Me",
            FlightStatus::TaxiingToParking => "Taxiing to Parking",
            FlightStatus::Servicing => "Servicing",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::AwaitingPushback => "Awaiting Pushback",
            FlightStatus::PushingBack => "Pushing Back",
            FlightStatus::TaxiingToRunway => "Taxiing to Runway",
            FlightStatus::TakingOff => "Taking Off",
            FlightStatus::Departed => "Departed",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Diverted => "Diverted",
            FlightStatus::Cancelled => "Cancelled",
            FlightStatus::Completed => "Completed",
        }
    }

    /// Statuses removed from the active flight list at the end of a tick
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FlightStatus::Completed | FlightStatus::Departed | FlightStatus::Diverted
        )
    }

    /// Statuses whose next transition reads the flight's parking reference
    pub fn requires_parking(&self) -> bool {
        matches!(
            self,
            FlightStatus::AwaitingFollowMe | FlightStatus::AwaitingPushback
        )
    }

    /// Parking may still be (re)assigned before the aircraft starts to taxi
    pub fn accepts_parking(&self) -> bool {
        matches!(
            self,
            FlightStatus::Scheduled | FlightStatus::Inbound | FlightStatus::AwaitingFollowMe
        )
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParkingKind {
    Gate,
    Stand,
}

/// A gate or aircraft stand, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parking {
    #[serde(rename = "type")]
    pub kind: ParkingKind,
    pub id: u32,
}

impl Parking {
    pub const fn gate(id: u32) -> Self {
        Self { kind: ParkingKind::Gate, id }
    }

    pub const fn stand(id: u32) -> Self {
        Self { kind: ParkingKind::Stand, id }
    }
}

impl std::fmt::Display for Parking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ParkingKind::Gate => write!(f, "gate {}", self.id),
            ParkingKind::Stand => write!(f, "stand {}", self.id),
        }
    }
}

/// Ground sub-service flags. Persisted for the presentation layer; the tick
/// does not consult them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Services {
    pub follow_me: bool,
    pub catering: bool,
    pub fuel: bool,
    pub baggage: bool,
    pub boarding: bool,
    pub pushback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: String,
    pub flight_number: String,
    pub airline: String,
    #[serde(rename = "type")]
    pub flight_type: FlightType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub status: FlightStatus,
    /// Display time as published in the schedule ("HH:MM")
    pub scheduled_time: String,
    /// Authoritative simulated time used by every transition
    pub actual_time: DateTime<Utc>,
    pub parking: Option<Parking>,
    pub position: Point,
    #[serde(default)]
    pub path: Vec<Point>,
    #[serde(default)]
    pub path_progress: f64,
    /// Remaining ground-service minutes
    pub servicing_timer: f64,
    #[serde(default)]
    pub services: Services,
}

impl Flight {
    /// Build a fresh Scheduled flight from a generated schedule entry
    pub fn from_stub(stub: FlightStub, actual_time: DateTime<Utc>, servicing_minutes: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            flight_number: stub.flight_number,
            airline: stub.airline,
            flight_type: stub.flight_type,
            origin: stub.origin,
            destination: stub.destination,
            status: FlightStatus::Scheduled,
            scheduled_time: stub.scheduled_time,
            actual_time,
            parking: None,
            position: crate::simulation::layout::OFF_MAP,
            path: Vec::new(),
            path_progress: 0.0,
            servicing_timer: servicing_minutes,
            services: Services::default(),
        }
    }

    /// Signed simulated minutes from `now` until the scheduled time
    pub fn minutes_to_scheduled(&self, now: DateTime<Utc>) -> f64 {
        self.actual_time.signed_duration_since(now).num_milliseconds() as f64 / 60_000.0
    }

    pub fn is_arrival(&self) -> bool {
        self.flight_type == FlightType::Arrival
    }
}

/// Partial flight returned by the schedule generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightStub {
    pub flight_number: String,
    pub airline: String,
    #[serde(rename = "type")]
    pub flight_type: FlightType,
    pub scheduled_time: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

impl FlightStub {
    /// Parse the "HH:MM" wall-clock time, `None` when it is not one
    pub fn wall_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.scheduled_time.trim(), "%H:%M").ok()
    }
}
