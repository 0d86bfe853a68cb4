// Content module - External suppliers of weather, contract offers and flight schedules
pub mod fallback;
pub mod generator;
pub mod live;
pub mod weather;

pub use fallback::OfflineContent;
pub use generator::{ContentGenerator, GeneratorClient, parse_json_from_text};
pub use live::LiveContent;
pub use weather::WeatherClient;

use async_trait::async_trait;

use crate::models::{Contract, FlightStub, GameState, Location, Weather};

/// Supplier of the day's fresh content.
///
/// Implementations never fail: transport errors, malformed payloads and an
/// unavailable generator all resolve to a deterministic fallback value.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_weather(&self, location: &Location) -> Weather;
    async fn generate_contracts(&self, state: &GameState) -> Vec<Contract>;
    async fn generate_flights_for_day(&self, state: &GameState, airline_contracts: &[Contract]) -> Vec<FlightStub>;
}
