// Ground vehicle dispatch: first-idle assignment, per-tick movement and release
use std::collections::HashSet;

use crate::models::{Point, Vehicle, VehicleStatus, VehicleType};
use crate::simulation::layout::VEHICLE_DEPOT;

/// Matches flights' service needs to idle vehicles.
///
/// Selection is first-idle-found in collection order. The order is arbitrary
/// but deterministic for a given snapshot, so two flights competing for one
/// vehicle always resolve the same way.
pub struct Dispatcher<'a> {
    vehicles: &'a mut Vec<Vehicle>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(vehicles: &'a mut Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    /// Movement pass run once per tick before any flight is processed.
    ///
    /// A vehicle with a pending path snaps to its last waypoint. Arriving at a
    /// job flips ToJob to AtJob; arriving back at the depot frees the vehicle.
    pub fn advance_vehicles(&mut self) {
        for vehicle in self.vehicles.iter_mut() {
            let Some(destination) = vehicle.path.last().copied() else {
                continue;
            };

            vehicle.position = destination;
            vehicle.path.clear();
            vehicle.path_progress = 0.0;

            match vehicle.status {
                VehicleStatus::ToJob => vehicle.status = VehicleStatus::AtJob,
                VehicleStatus::Returning => {
                    vehicle.status = VehicleStatus::Idle;
                    vehicle.flight_id = None;
                }
                VehicleStatus::Idle | VehicleStatus::AtJob => {}
            }
        }
    }

    /// Send the first idle vehicle of `vehicle_type` to `target` for a flight.
    /// Returns false when none is idle; the flight keeps waiting.
    pub fn dispatch(&mut self, vehicle_type: VehicleType, flight_id: &str, target: Point) -> bool {
        let Some(vehicle) = self
            .vehicles
            .iter_mut()
            .find(|v| v.vehicle_type == vehicle_type && v.is_idle())
        else {
            return false;
        };

        vehicle.status = VehicleStatus::ToJob;
        vehicle.flight_id = Some(flight_id.to_string());
        vehicle.path = vec![target];
        vehicle.path_progress = 0.0;
        tracing::debug!("🚐 {} {} dispatched to {} for flight {}", vehicle_type, vehicle.id, target, flight_id);
        true
    }

    /// Status of the vehicle of `vehicle_type` currently serving the flight
    pub fn assigned_status(&self, flight_id: &str, vehicle_type: VehicleType) -> Option<VehicleStatus> {
        self.vehicles
            .iter()
            .find(|v| v.vehicle_type == vehicle_type && v.flight_id.as_deref() == Some(flight_id))
            .map(|v| v.status)
    }

    /// Send the flight's vehicle of `vehicle_type` back to the depot
    pub fn release(&mut self, flight_id: &str, vehicle_type: VehicleType) -> bool {
        let Some(vehicle) = self
            .vehicles
            .iter_mut()
            .find(|v| v.vehicle_type == vehicle_type && v.flight_id.as_deref() == Some(flight_id))
        else {
            return false;
        };

        send_to_depot(vehicle);
        true
    }

    /// Detach vehicles whose flight is no longer active. Vehicles still on
    /// their way to or at the job head back to the depot.
    pub fn release_orphans(&mut self, active_flights: &HashSet<&str>) -> usize {
        let mut released = 0;
        for vehicle in self.vehicles.iter_mut() {
            let orphaned = vehicle
                .flight_id
                .as_deref()
                .is_some_and(|id| !active_flights.contains(id));
            if !orphaned {
                continue;
            }

            if matches!(vehicle.status, VehicleStatus::ToJob | VehicleStatus::AtJob) {
                send_to_depot(vehicle);
            }
            vehicle.flight_id = None;
            released += 1;
        }
        released
    }
}

fn send_to_depot(vehicle: &mut Vehicle) {
    vehicle.status = VehicleStatus::Returning;
    vehicle.path = vec![VEHICLE_DEPOT];
    vehicle.path_progress = 0.0;
}
