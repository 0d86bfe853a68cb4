// Flight lifecycle state machine
use chrono::{DateTime, Utc};

use crate::config::BalanceConfig;
use crate::models::{
    EventLog, Flight, FlightStatus, FlightType, Parking, Point, Reputation, VehicleStatus, VehicleType,
};
use crate::simulation::dispatcher::Dispatcher;
use crate::simulation::layout::{
    AirportLayout, INBOUND_SPAWN, OFF_MAP_EXIT, RUNWAY_ARRIVAL_CONNECTOR, RUNWAY_DEPARTURE_CONNECTOR, lane_y,
};
use crate::simulation::path::compute_taxi_path;

/// Drives every flight one step per tick.
///
/// Holds disjoint borrows of the game state so that a transition can pay
/// out, adjust reputation, log and dispatch vehicles while the flight list
/// itself is being iterated.
pub struct FlightLifecycle<'a> {
    pub dispatcher: Dispatcher<'a>,
    pub money: &'a mut i64,
    pub reputation: &'a mut Reputation,
    pub log: &'a mut EventLog,
    pub layout: AirportLayout,
    pub balance: &'a BalanceConfig,
    pub now: DateTime<Utc>,
    /// Simulated minutes elapsed since the previous tick
    pub elapsed_minutes: f64,
    /// `(flight_id, parking)` for every unfinished flight at the start of the pass
    pub parking_holders: Vec<(String, Parking)>,
}

impl<'a> FlightLifecycle<'a> {
    /// Advance one flight by at most one transition, then snap it to the end
    /// of whatever path that transition queued.
    pub fn step(&mut self, flight: &mut Flight) {
        let minutes_to_scheduled = flight.minutes_to_scheduled(self.now);
        let before = flight.status;

        match flight.status {
            FlightStatus::Scheduled => self.on_scheduled(flight, minutes_to_scheduled),
            FlightStatus::Inbound => self.on_inbound(flight, minutes_to_scheduled),
            FlightStatus::AwaitingFollowMe => self.on_awaiting_follow_me(flight),
            FlightStatus::TaxiingToParking => self.on_taxiing_to_parking(flight),
            FlightStatus::Servicing => self.on_servicing(flight, minutes_to_scheduled),
            FlightStatus::AwaitingPushback => self.on_awaiting_pushback(flight),
            FlightStatus::PushingBack => self.on_pushing_back(flight),
            FlightStatus::TaxiingToRunway => {
                if flight.position.x == RUNWAY_DEPARTURE_CONNECTOR.x {
                    flight.status = FlightStatus::TakingOff;
                    flight.path = vec![OFF_MAP_EXIT];
                }
            }
            FlightStatus::TakingOff => {
                if flight.position.x == OFF_MAP_EXIT.x {
                    flight.status = FlightStatus::Departed;
                    self.log.push(format!("Flight {} has departed.", flight.flight_number));
                }
            }
            // No transitions are defined into or out of these.
            FlightStatus::Boarding | FlightStatus::Delayed | FlightStatus::Cancelled => {}
            FlightStatus::Departed | FlightStatus::Diverted | FlightStatus::Completed => {}
        }

        if flight.status != before {
            tracing::debug!("✈️  {} {} → {}", flight.flight_number, before, flight.status);
        }

        // Server-side movement is a snap to the path end
        if let Some(destination) = flight.path.last().copied() {
            flight.position = destination;
            flight.path.clear();
            flight.path_progress = 0.0;
        }
    }

    fn on_scheduled(&mut self, flight: &mut Flight, minutes_to_scheduled: f64) {
        match flight.flight_type {
            FlightType::Arrival => {
                if minutes_to_scheduled <= self.balance.inbound_window_minutes {
                    flight.status = FlightStatus::Inbound;
                    flight.position = INBOUND_SPAWN;
                    flight.path = vec![RUNWAY_ARRIVAL_CONNECTOR];
                }
            }
            FlightType::Departure => {
                // Turnaround: a reserved departure is prepared at its parking
                let Some(parking) = flight.parking else {
                    return;
                };
                if minutes_to_scheduled > self.balance.ground_service_minutes {
                    return;
                }
                // One aircraft per spot: wait for the inbound pair to clear it
                if self.parking_held_by_other(&flight.id, parking) {
                    tracing::trace!("⏳ {} waits for {} to clear", flight.flight_number, parking);
                    return;
                }

                flight.status = FlightStatus::Servicing;
                flight.position = self.layout.parking_position(parking);
                flight.path.clear();
                self.log.push(format!(
                    "Flight {} is being prepared for departure at {}.",
                    flight.flight_number, parking
                ));
            }
        }
    }

    fn parking_held_by_other(&self, flight_id: &str, parking: Parking) -> bool {
        self.parking_holders
            .iter()
            .any(|(holder, held)| holder != flight_id && *held == parking)
    }

    fn on_inbound(&mut self, flight: &mut Flight, minutes_to_scheduled: f64) {
        if minutes_to_scheduled > 0.0 {
            return;
        }

        if flight.parking.is_some() {
            flight.status = FlightStatus::AwaitingFollowMe;
        } else {
            let penalty = self.balance.diversion_penalty;
            flight.status = FlightStatus::Diverted;
            self.reputation.adjust(-penalty);
            self.log.push(format!(
                "Flight {} was diverted! No parking available. Reputation -{}.",
                flight.flight_number, penalty
            ));
        }
    }

    fn on_awaiting_follow_me(&mut self, flight: &mut Flight) {
        let Some(parking) = flight.parking else {
            return;
        };
        let parking_position = self.layout.parking_position(parking);

        if self.dispatcher.dispatch(VehicleType::FollowMe, &flight.id, parking_position) {
            flight.status = FlightStatus::TaxiingToParking;
            flight.path = compute_taxi_path(flight.position, parking_position, parking.kind);
            flight.path_progress = 0.0;
        }
    }

    fn on_taxiing_to_parking(&mut self, flight: &mut Flight) {
        if self.dispatcher.assigned_status(&flight.id, VehicleType::FollowMe) == Some(VehicleStatus::AtJob) {
            flight.status = FlightStatus::Servicing;
            self.dispatcher.release(&flight.id, VehicleType::FollowMe);
        }
    }

    fn on_servicing(&mut self, flight: &mut Flight, minutes_to_scheduled: f64) {
        flight.servicing_timer -= self.elapsed_minutes;
        if flight.servicing_timer > 0.0 {
            return;
        }

        match flight.flight_type {
            FlightType::Departure => {
                if minutes_to_scheduled <= 0.0 {
                    flight.status = FlightStatus::AwaitingPushback;
                }
            }
            FlightType::Arrival => {
                let income = self.balance.flight_income;
                let bonus = self.balance.reputation_bonus;
                *self.money += income;
                self.reputation.adjust(bonus);
                self.log.push(format!(
                    "Flight {} finished ground service. +{} $, +{} reputation.",
                    flight.flight_number, income, bonus
                ));
                flight.status = FlightStatus::Completed;
            }
        }
    }

    fn on_awaiting_pushback(&mut self, flight: &mut Flight) {
        let Some(parking) = flight.parking else {
            return;
        };
        let pushback_point = Point::new(flight.position.x, lane_y(parking.kind));

        if self.dispatcher.dispatch(VehicleType::PushbackTug, &flight.id, pushback_point) {
            flight.status = FlightStatus::PushingBack;
            flight.path = vec![pushback_point];
        }
    }

    fn on_pushing_back(&mut self, flight: &mut Flight) {
        if self.dispatcher.assigned_status(&flight.id, VehicleType::PushbackTug) == Some(VehicleStatus::AtJob) {
            flight.status = FlightStatus::TaxiingToRunway;
            self.dispatcher.release(&flight.id, VehicleType::PushbackTug);
            flight.path = vec![RUNWAY_DEPARTURE_CONNECTOR];
        }
    }
}
