mod common;

use std::io;
use std::sync::{Arc, Mutex};

use airport_tower::config::{AirportConfig, BalanceConfig};
use airport_tower::content::OfflineContent;
use airport_tower::error::{Error, IntentError};
use airport_tower::models::*;
use airport_tower::operations::*;
use airport_tower::simulation::{advance_ground_operations, validate_save};
use airport_tower::storage::{MemorySaveStore, SaveStore, update_save};

use common::*;

#[test]
fn test_purchase_vehicle_adds_idle_vehicle_at_depot() {
    let mut state = new_state(at(10, 0));
    let mut fleet = FleetOperations::new(&mut state);

    let id = fleet.purchase_vehicle(VehicleType::FuelTruck).unwrap();
    assert_eq!(fleet.count(VehicleType::FuelTruck), 2);

    let vehicle = state.vehicle(&id).unwrap();
    assert!(vehicle.is_idle());
    assert_eq!(vehicle.position, airport_tower::simulation::layout::VEHICLE_DEPOT);
    assert_eq!(state.money, 140_000);
    assert!(state.log.contains("Purchased a new Fuel Truck for 10000 $."));
}

#[test]
fn test_purchase_vehicle_rejects_insufficient_funds() {
    let mut state = new_state(at(10, 0));
    state.money = 100;
    let before = state.clone();

    let result = FleetOperations::new(&mut state).purchase_vehicle(VehicleType::PassengerBus);

    assert_eq!(
        result,
        Err(IntentError::InsufficientFunds { needed: 12_000, available: 100 })
    );
    assert_eq!(state, before);
}

#[test]
fn test_sell_vehicle_only_sells_idle_vehicles() {
    let mut state = new_state(at(10, 0));
    let tug = state
        .vehicles
        .iter_mut()
        .find(|v| v.vehicle_type == VehicleType::PushbackTug)
        .unwrap();
    tug.status = VehicleStatus::AtJob;
    let before = state.clone();

    let result = FleetOperations::new(&mut state).sell_vehicle(VehicleType::PushbackTug);
    assert_eq!(result, Err(IntentError::NoIdleVehicle(VehicleType::PushbackTug)));
    assert_eq!(state, before);

    let price = FleetOperations::new(&mut state).sell_vehicle(VehicleType::BaggageCart).unwrap();
    assert_eq!(price, 1_500);
    assert_eq!(state.money, 151_500);
    assert!(vehicles_of(&state, VehicleType::BaggageCart).is_empty());
}

#[test]
fn test_purchase_upgrade_grows_capacity() {
    let mut state = new_state(at(10, 0));
    state.reputation = Reputation::new(99);

    InfrastructureOperations::new(&mut state)
        .purchase_upgrade(UpgradeType::Gate)
        .unwrap();
    assert_eq!(state.gates, 5);
    assert_eq!(state.money, 125_000);
    assert_eq!(state.reputation.value(), 100);

    InfrastructureOperations::new(&mut state)
        .purchase_upgrade(UpgradeType::AircraftStand)
        .unwrap();
    assert_eq!(state.stands, 3);
    assert_eq!(state.money, 110_000);

    state.money = 0;
    let result = InfrastructureOperations::new(&mut state).purchase_upgrade(UpgradeType::Gate);
    assert!(matches!(result, Err(IntentError::InsufficientFunds { .. })));
    assert_eq!(state.gates, 5);
}

#[test]
fn test_sign_and_cancel_contract() {
    let mut save = new_save(at(10, 0));
    let mut offer = contract("Sky Co", ContractType::Airline, 500, None);
    offer.terms.reputation_effect = 60;
    save.available_contracts.push(offer);

    let mut ops = ContractOperations::new(&mut save);
    let signed = ops.sign_contract("sky-co-id").unwrap();
    assert_eq!(signed.days_remaining, Some(10));
    assert!(save.available_contracts.is_empty());
    assert_eq!(save.active_contracts.len(), 1);
    assert_eq!(save.game_state.reputation.value(), 100);

    let cancelled = ContractOperations::new(&mut save).cancel_contract("sky-co-id").unwrap();
    assert_eq!(cancelled.name, "Sky Co");
    assert!(save.active_contracts.is_empty());
    assert_eq!(save.game_state.reputation.value(), 96);
    assert!(save.game_state.log.contains("Reputation penalty: -4."));
}

#[test]
fn test_cancel_penalty_defaults_to_zero_and_clamps() {
    let mut save = new_save(at(10, 0));
    let mut free = contract("Free Co", ContractType::Catering, -10, Some(3));
    free.terms.cancellation_penalty = None;
    let mut harsh = contract("Harsh Co", ContractType::Fuel, -10, Some(3));
    harsh.terms.cancellation_penalty = Some(80);
    save.active_contracts = vec![free, harsh];

    ContractOperations::new(&mut save).cancel_contract("free-co-id").unwrap();
    assert_eq!(save.game_state.reputation.value(), 50);

    ContractOperations::new(&mut save).cancel_contract("harsh-co-id").unwrap();
    assert_eq!(save.game_state.reputation.value(), 0);
}

#[test]
fn test_unknown_contract_is_rejected() {
    let mut save = new_save(at(10, 0));
    let before = save.clone();

    let mut ops = ContractOperations::new(&mut save);
    let result = ops.sign_contract("nope");
    assert_eq!(result.err(), Some(IntentError::ContractNotFound("nope".to_string())));
    let result = ContractOperations::new(&mut save).cancel_contract("nope");
    assert_eq!(result.err(), Some(IntentError::ContractNotFound("nope".to_string())));
    assert_eq!(save, before);
}

#[test]
fn test_assigning_arrival_pairs_next_departure_of_airline() {
    let t0 = at(10, 0);
    let mut state = new_state(t0);
    let inbound = arrival("TA 1", FlightStatus::Scheduled, t0 + minutes(60));
    let early = departure("TA 0", FlightStatus::Scheduled, t0 + minutes(30));
    let later = departure("TA 3", FlightStatus::Scheduled, t0 + minutes(240));
    let next = departure("TA 2", FlightStatus::Scheduled, t0 + minutes(150));
    let other = flight("OA 2", "Other Air", FlightType::Departure, FlightStatus::Scheduled, t0 + minutes(90));
    let (inbound_id, next_id) = (inbound.id.clone(), next.id.clone());
    state.flights = vec![inbound, early, later, next, other];

    let assignment = ParkingOperations::new(&mut state)
        .assign_parking(&inbound_id, Parking::gate(2))
        .unwrap();

    assert_eq!(assignment.paired_departure.as_deref(), Some(next_id.as_str()));
    assert_eq!(state.flight(&inbound_id).unwrap().parking, Some(Parking::gate(2)));
    assert_eq!(state.flight(&next_id).unwrap().parking, Some(Parking::gate(2)));
    let parked = state.flights.iter().filter(|f| f.parking.is_some()).count();
    assert_eq!(parked, 2);
    assert!(state.log.contains("Parking reserved for the matching departure TA 2."));
}

#[test]
fn test_reassigning_releases_stale_departure_reservation() {
    let t0 = at(10, 0);
    let mut state = new_state(t0);
    let inbound = arrival("TA 1", FlightStatus::Inbound, t0 + minutes(10));
    let outbound = departure("TA 2", FlightStatus::Scheduled, t0 + minutes(150));
    let (inbound_id, outbound_id) = (inbound.id.clone(), outbound.id.clone());
    state.flights = vec![inbound, outbound];

    let mut parking = ParkingOperations::new(&mut state);
    parking.assign_parking(&inbound_id, Parking::gate(1)).unwrap();
    let assignment = parking.assign_parking(&inbound_id, Parking::stand(2)).unwrap();

    // The old pair is released, then the departure is paired again
    assert_eq!(assignment.released_departure.as_deref(), Some(outbound_id.as_str()));
    assert_eq!(assignment.paired_departure.as_deref(), Some(outbound_id.as_str()));
    assert_eq!(state.flight(&outbound_id).unwrap().parking, Some(Parking::stand(2)));
    assert_eq!(state.flight(&inbound_id).unwrap().parking, Some(Parking::stand(2)));
}

#[test]
fn test_reassigning_keeps_reservation_of_departure_in_turnaround() {
    let t0 = at(9, 35);
    let mut save = new_save(t0);
    let mut inbound = arrival("TA 1", FlightStatus::Inbound, at(10, 0));
    inbound.parking = Some(Parking::gate(1));
    let mut outbound = departure("TA 2", FlightStatus::Servicing, at(10, 30));
    outbound.parking = Some(Parking::gate(1));
    let (inbound_id, outbound_id) = (inbound.id.clone(), outbound.id.clone());
    save.game_state.flights = vec![inbound, outbound];

    let assignment = ParkingOperations::new(&mut save.game_state)
        .assign_parking(&inbound_id, Parking::gate(2))
        .unwrap();

    assert_eq!(assignment.released_departure, None);
    assert_eq!(save.game_state.flight(&outbound_id).unwrap().parking, Some(Parking::gate(1)));

    // The departure keeps its spot through pushback, so every later tick stays valid
    let balance = BalanceConfig::default();
    for minute in 1..=80 {
        advance_ground_operations(&mut save.game_state, t0 + minutes(minute), 1.0, &balance);
        if let Err(e) = validate_save(&save) {
            panic!("invalid save at minute {}: {}", minute, e);
        }
    }
    assert!(save.game_state.log.contains("Flight TA 2 has departed."));
}

#[test]
fn test_assign_parking_rejections_leave_state_unchanged() {
    let t0 = at(10, 0);
    let mut state = new_state(t0);
    let mut holder = arrival("TA 1", FlightStatus::Servicing, t0);
    holder.parking = Some(Parking::gate(1));
    let taxiing = arrival("TA 4", FlightStatus::TaxiingToParking, t0);
    let waiting = arrival("TA 5", FlightStatus::Scheduled, t0 + minutes(60));
    let (taxiing_id, waiting_id) = (taxiing.id.clone(), waiting.id.clone());
    state.flights = vec![holder, taxiing, waiting];
    let before = state.clone();

    let mut parking = ParkingOperations::new(&mut state);
    assert_eq!(
        parking.assign_parking("missing", Parking::gate(2)),
        Err(IntentError::FlightNotFound("missing".to_string()))
    );
    assert_eq!(
        parking.assign_parking(&taxiing_id, Parking::gate(2)),
        Err(IntentError::NotReassignable("TA 4".to_string()))
    );
    assert_eq!(
        parking.assign_parking(&waiting_id, Parking::gate(5)),
        Err(IntentError::ParkingOutOfRange(Parking::gate(5)))
    );
    assert_eq!(
        parking.assign_parking(&waiting_id, Parking::gate(1)),
        Err(IntentError::ParkingOccupied {
            parking: Parking::gate(1),
            flight_number: "TA 1".to_string(),
        })
    );
    assert_eq!(parking.occupied(), vec![Parking::gate(1)]);
    assert_eq!(state, before);
}

#[tokio::test]
async fn test_new_game_comes_with_weather_offers_and_schedule() {
    let now = at(6, 0);
    let config = AirportConfig::default();

    let save = new_game(find_location("gdansk").unwrap(), now, &OfflineContent, &config).await;
    let state = &save.game_state;

    assert_eq!(state.location_name(), Some("Gdansk"));
    assert_eq!(state.money, 150_000);
    assert_eq!(state.reputation.value(), 50);
    assert_eq!((state.gates, state.stands), (4, 2));
    assert_eq!(state.vehicles.len(), VehicleType::ALL.len());
    assert!(state.weather.is_some());
    assert_eq!(save.available_contracts.len(), 2);
    assert!(save.active_contracts.is_empty());
    assert_eq!(state.flights.len(), 4);
    assert!(state.flights.iter().all(|f| f.airline == "Generic Air"));
    assert!(state.log.contains("Welcome to Gdansk International!"));
}

#[tokio::test]
async fn test_update_save_stores_only_accepted_intents() {
    let store = MemorySaveStore::new();
    let save = new_save(at(10, 0));
    store.store("player-1", &save, None).await.unwrap();

    let id = update_save(&store, "player-1", |save| {
        FleetOperations::new(&mut save.game_state).purchase_vehicle(VehicleType::FollowMe)
    })
    .await
    .unwrap();

    let record = store.load("player-1").await.unwrap();
    assert_eq!(record.revision, 2);
    assert!(record.save_data.game_state.vehicle(&id).is_some());

    let rejected = update_save(&store, "player-1", |save| {
        ContractOperations::new(save).sign_contract("missing").map(|c| c.id.clone())
    })
    .await;
    assert!(matches!(rejected, Err(Error::Intent(IntentError::ContractNotFound(_)))));
    assert_eq!(store.load("player-1").await.unwrap().revision, 2);
}

#[test]
fn test_signing_saturates_oversized_duration() {
    let mut save = new_save(at(10, 0));
    let mut offer = contract("Forever Air", ContractType::Airline, 100, None);
    offer.duration = u32::MAX;
    save.available_contracts.push(offer);

    let mut ops = ContractOperations::new(&mut save);
    let signed = ops.sign_contract("forever-air-id").unwrap();

    assert_eq!(signed.days_remaining, Some(i32::MAX));
}

/// Collects formatted tracing output for assertions
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_rejected_intent_is_logged() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let store = MemorySaveStore::new();
    let mut save = new_save(at(10, 0));
    save.game_state.money = 100;
    store.store("player-2", &save, None).await.unwrap();

    let rejected = update_save(&store, "player-2", |save| {
        FleetOperations::new(&mut save.game_state).purchase_vehicle(VehicleType::FuelTruck)
    })
    .await;

    let e = match rejected {
        Err(Error::Intent(e)) => e,
        other => panic!("expected an intent rejection, got {:?}", other),
    };
    let output = logs.contents();
    assert!(output.contains("WARN"), "{}", output);
    assert!(output.contains("player-2"), "{}", output);
    assert!(output.contains(&e.to_string()), "{}", output);
    assert_eq!(store.load("player-2").await.unwrap().revision, 1);
}
