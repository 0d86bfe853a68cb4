// Fixed airport map geometry shared by the tick and the renderer
use crate::models::{Parking, ParkingKind, Point};

pub const MAP_WIDTH: f64 = 1000.0;
pub const MAP_HEIGHT: f64 = 600.0;

pub const VEHICLE_DEPOT: Point = Point::new(850.0, 50.0);
pub const RUNWAY_ARRIVAL_CONNECTOR: Point = Point::new(900.0, 325.0);
pub const RUNWAY_DEPARTURE_CONNECTOR: Point = Point::new(100.0, 325.0);
pub const GATE_LANE_Y: f64 = 210.0;
pub const STAND_LANE_Y: f64 = 410.0;

/// Where inbound aircraft appear, east of the runway
pub const INBOUND_SPAWN: Point = Point::new(MAP_WIDTH + 50.0, RUNWAY_ARRIVAL_CONNECTOR.y);
/// Where departing aircraft leave the map
pub const OFF_MAP_EXIT: Point = Point::new(-50.0, RUNWAY_DEPARTURE_CONNECTOR.y);
/// Position of flights that have not entered the map yet
pub const OFF_MAP: Point = Point::new(-100.0, -100.0);

const GATE_ROW_Y: f64 = 180.0;
const STAND_ROW_Y: f64 = 450.0;

/// Taxi lane y-coordinate serving a parking kind
pub fn lane_y(kind: ParkingKind) -> f64 {
    match kind {
        ParkingKind::Gate => GATE_LANE_Y,
        ParkingKind::Stand => STAND_LANE_Y,
    }
}

/// Gate and stand positions depend on how many the airport has built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirportLayout {
    pub gates: u32,
    pub stands: u32,
}

impl AirportLayout {
    pub fn new(gates: u32, stands: u32) -> Self {
        Self { gates, stands }
    }

    pub fn gate_position(&self, gate_id: u32) -> Point {
        let spacing = 450.0 / f64::from(self.gates.max(1));
        let index = f64::from(gate_id.saturating_sub(1));
        Point::new(275.0 + index * spacing, GATE_ROW_Y)
    }

    pub fn stand_position(&self, stand_id: u32) -> Point {
        let spacing = 800.0 / f64::from(self.stands + 1);
        let index = f64::from(stand_id.saturating_sub(1));
        Point::new(150.0 + index * spacing, STAND_ROW_Y)
    }

    pub fn parking_position(&self, parking: Parking) -> Point {
        match parking.kind {
            ParkingKind::Gate => self.gate_position(parking.id),
            ParkingKind::Stand => self.stand_position(parking.id),
        }
    }

    pub fn contains(&self, parking: Parking) -> bool {
        let capacity = match parking.kind {
            ParkingKind::Gate => self.gates,
            ParkingKind::Stand => self.stands,
        };
        (1..=capacity).contains(&parking.id)
    }
}
