// Simulation module - The authoritative per-game tick and its building blocks

pub mod layout;
pub mod path;
pub mod dispatcher;
pub mod lifecycle;
pub mod settlement;
pub mod tick;

pub use layout::AirportLayout;
pub use path::compute_taxi_path;
pub use dispatcher::Dispatcher;
pub use lifecycle::FlightLifecycle;
pub use settlement::{is_new_day, materialize_flights, run_day_rollover, settle_contracts};
pub use tick::{TickRunner, advance_ground_operations, validate_save};
