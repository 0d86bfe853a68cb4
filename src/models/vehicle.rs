use serde::{Deserialize, Serialize};

use crate::models::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "Follow-Me Car")]
    FollowMe,
    #[serde(rename = "Pushback Tug")]
    PushbackTug,
    #[serde(rename = "Passenger Bus")]
    PassengerBus,
    #[serde(rename = "Catering Truck")]
    CateringTruck,
    #[serde(rename = "Fuel Truck")]
    FuelTruck,
    #[serde(rename = "Baggage Cart")]
    BaggageCart,
    #[serde(rename = "Passenger Stairs")]
    Stairs,
}

impl VehicleType {
    pub const ALL: [VehicleType; 7] = [
        VehicleType::FollowMe,
        VehicleType::PushbackTug,
        VehicleType::Stairs,
        VehicleType::PassengerBus,
        VehicleType::CateringTruck,
        VehicleType::FuelTruck,
        VehicleType::BaggageCart,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::FollowMe => "Follow-Me Car",
            VehicleType::PushbackTug => "Pushback Tug",
            VehicleType::PassengerBus => "Passenger Bus",
            VehicleType::CateringTruck => "Catering Truck",
            VehicleType::FuelTruck => "Fuel Truck",
            VehicleType::BaggageCart => "Baggage Cart",
            VehicleType::Stairs => "Passenger Stairs",
        }
    }

    pub fn purchase_price(&self) -> i64 {
        match self {
            VehicleType::FollowMe => 5_000,
            VehicleType::PushbackTug => 7_500,
            VehicleType::PassengerBus => 12_000,
            VehicleType::CateringTruck => 8_000,
            VehicleType::FuelTruck => 10_000,
            VehicleType::BaggageCart => 4_000,
            VehicleType::Stairs => 6_000,
        }
    }

    pub fn resale_price(&self) -> i64 {
        match self {
            VehicleType::FollowMe => 2_000,
            VehicleType::PushbackTug => 3_000,
            VehicleType::PassengerBus => 5_000,
            VehicleType::CateringTruck => 3_200,
            VehicleType::FuelTruck => 4_000,
            VehicleType::BaggageCart => 1_500,
            VehicleType::Stairs => 2_500,
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleStatus {
    Idle,
    #[serde(rename = "To Job")]
    ToJob,
    #[serde(rename = "At Job")]
    AtJob,
    Returning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    pub position: Point,
    #[serde(default)]
    pub path: Vec<Point>,
    #[serde(default)]
    pub path_progress: f64,
    /// Flight currently served; a lookup key, not ownership
    pub flight_id: Option<String>,
}

impl Vehicle {
    /// New idle vehicle parked at the depot
    pub fn new(vehicle_type: VehicleType) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            vehicle_type,
            status: VehicleStatus::Idle,
            position: crate::simulation::layout::VEHICLE_DEPOT,
            path: Vec::new(),
            path_progress: 0.0,
            flight_id: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == VehicleStatus::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeType {
    Gate,
    #[serde(rename = "Aircraft Stand")]
    AircraftStand,
}

impl UpgradeType {
    pub fn cost(&self) -> i64 {
        match self {
            UpgradeType::Gate => 25_000,
            UpgradeType::AircraftStand => 15_000,
        }
    }

    /// One-time reputation gain on purchase
    pub fn reputation(&self) -> i32 {
        match self {
            UpgradeType::Gate => 2,
            UpgradeType::AircraftStand => 1,
        }
    }
}
