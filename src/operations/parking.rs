// Parking operations - assigning gates and stands to flights
use crate::error::IntentError;
use crate::models::*;
use crate::simulation::AirportLayout;

/// Outcome of a parking assignment
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingAssignment {
    pub flight_id: String,
    pub parking: Parking,
    /// Departure that now holds the same reservation, if one was paired
    pub paired_departure: Option<String>,
    /// Departure whose previous reservation was dropped, if any
    pub released_departure: Option<String>,
}

pub struct ParkingOperations<'a> {
    state: &'a mut GameState,
}

impl<'a> ParkingOperations<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Reserve `parking` for a flight.
    ///
    /// An arrival also reserves the same spot for the earliest unparked
    /// Scheduled departure of its airline that leaves after it lands. When
    /// the flight already held a spot, the departure paired with that old
    /// spot loses its reservation unless its turnaround has already begun.
    pub fn assign_parking(&mut self, flight_id: &str, parking: Parking) -> Result<ParkingAssignment, IntentError> {
        let flights = &self.state.flights;
        let index = flights
            .iter()
            .position(|f| f.id == flight_id)
            .ok_or_else(|| IntentError::FlightNotFound(flight_id.to_string()))?;
        let flight = &flights[index];

        if !flight.status.accepts_parking() {
            return Err(IntentError::NotReassignable(flight.flight_number.clone()));
        }

        let layout = AirportLayout::new(self.state.gates, self.state.stands);
        if !layout.contains(parking) {
            return Err(IntentError::ParkingOutOfRange(parking));
        }

        let stale_index = flight.parking.and_then(|old| {
            flights.iter().position(|f| {
                f.id != flight.id
                    && f.flight_type == FlightType::Departure
                    && f.status.accepts_parking()
                    && f.airline == flight.airline
                    && f.parking == Some(old)
            })
        });

        let holder = flights.iter().enumerate().find(|(i, f)| {
            *i != index && Some(*i) != stale_index && !f.status.is_terminal() && f.parking == Some(parking)
        });
        if let Some((_, holder)) = holder {
            return Err(IntentError::ParkingOccupied {
                parking,
                flight_number: holder.flight_number.clone(),
            });
        }

        // Validation done; from here on the state changes
        let flights = &mut self.state.flights;
        let released_departure = stale_index.map(|i| {
            flights[i].parking = None;
            flights[i].id.clone()
        });

        flights[index].parking = Some(parking);
        let flight = &flights[index];
        let mut message = format!("Assigned {} to flight {}.", parking, flight.flight_number);

        let mut paired_departure = None;
        if flight.flight_type == FlightType::Arrival {
            let (airline, landing) = (flight.airline.clone(), flight.actual_time);
            let departure = flights
                .iter_mut()
                .filter(|f| {
                    f.flight_type == FlightType::Departure
                        && f.airline == airline
                        && f.status == FlightStatus::Scheduled
                        && f.parking.is_none()
                        && f.actual_time > landing
                })
                .min_by_key(|f| f.actual_time);

            if let Some(departure) = departure {
                departure.parking = Some(parking);
                message.push_str(&format!(
                    " Parking reserved for the matching departure {}.",
                    departure.flight_number
                ));
                paired_departure = Some(departure.id.clone());
            }
        }

        self.state.log.push(message);

        Ok(ParkingAssignment {
            flight_id: flight_id.to_string(),
            parking,
            paired_departure,
            released_departure,
        })
    }

    /// Spots currently held by flights that have not finished
    pub fn occupied(&self) -> Vec<Parking> {
        self.state
            .flights
            .iter()
            .filter(|f| !f.status.is_terminal())
            .filter_map(|f| f.parking)
            .collect()
    }
}
