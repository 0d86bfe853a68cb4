// Live content source backed by the weather API and the content generator
use std::future::Future;

use async_trait::async_trait;

use crate::config::ContentConfig;
use crate::content::generator::{
    ContentGenerator, contracts_prompt, flights_prompt, parse_contract_offers, parse_flight_stubs,
};
use crate::content::weather::WeatherClient;
use crate::content::{ContentSource, fallback};
use crate::error::ContentError;
use crate::models::{Contract, FlightStub, GameState, Location, Weather};

pub struct LiveContent {
    weather: WeatherClient,
    generator: ContentGenerator,
    max_retries: u32,
    contract_temperature: f64,
    flight_temperature: f64,
}

impl LiveContent {
    pub fn new(weather: WeatherClient, generator: ContentGenerator, config: &ContentConfig) -> Self {
        Self {
            weather,
            generator,
            max_retries: config.max_retries.max(1),
            contract_temperature: config.contract_temperature,
            flight_temperature: config.flight_temperature,
        }
    }

    pub fn from_config(config: &ContentConfig) -> Result<Self, ContentError> {
        let weather = WeatherClient::new(&config.weather_api_url, config.request_timeout())?;
        let generator = ContentGenerator::from_config(config);
        if generator.is_available() {
            tracing::info!("🤖 Content generator ready ({})", config.generator_model);
        }
        Ok(Self::new(weather, generator, config))
    }

    /// Run `attempt` up to `max_retries` times, returning the first success
    async fn with_retries<T, F, Fut>(&self, category: &str, mut attempt: F) -> Result<T, ContentError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ContentError>>,
    {
        let mut last_error = ContentError::Unavailable(format!("no {} attempt made", category));
        for attempt_number in 1..=self.max_retries {
            match attempt().await {
                Ok(value) => return Ok(value),
                // No point retrying without a client
                Err(e @ ContentError::Unavailable(_)) => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        "⚠️ {} attempt {}/{} failed: {}",
                        category,
                        attempt_number,
                        self.max_retries,
                        e
                    );
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

#[async_trait]
impl ContentSource for LiveContent {
    async fn fetch_weather(&self, location: &Location) -> Weather {
        let client = &self.weather;
        match self.with_retries("weather", move || client.current_weather(location)).await {
            Ok(weather) => {
                tracing::debug!("🌤️ Weather at {}: {}", location.name, weather.description);
                weather
            }
            Err(e) => {
                tracing::warn!("⚠️ Using fallback weather for {}: {}", location.name, e);
                fallback::fallback_weather()
            }
        }
    }

    async fn generate_contracts(&self, state: &GameState) -> Vec<Contract> {
        let Some(location_name) = state.location_name() else {
            tracing::warn!("⚠️ Game has no location, using fallback contracts");
            return fallback::fallback_contracts(state.gates);
        };

        let prompt = contracts_prompt(state, location_name);
        let (generator, prompt, temperature) = (&self.generator, prompt.as_str(), self.contract_temperature);
        let result = self
            .with_retries("contracts", move || async move {
                let client = generator.client()?;
                let payload = client.generate_json(prompt, temperature).await?;
                parse_contract_offers(payload)
            })
            .await;

        match result {
            Ok(offers) => {
                tracing::debug!("📄 Generated {} contract offers", offers.len());
                offers
            }
            Err(e) => {
                tracing::warn!("⚠️ Using fallback contracts: {}", e);
                fallback::fallback_contracts(state.gates)
            }
        }
    }

    async fn generate_flights_for_day(&self, state: &GameState, airline_contracts: &[Contract]) -> Vec<FlightStub> {
        let Some(location_name) = state.location_name() else {
            tracing::warn!("⚠️ Game has no location, using fallback schedule");
            return fallback::fallback_flights(state, airline_contracts);
        };

        let airlines = fallback::airline_names(airline_contracts);
        let prompt = flights_prompt(state, location_name, &airlines);
        let (generator, prompt, temperature) = (&self.generator, prompt.as_str(), self.flight_temperature);
        let result = self
            .with_retries("flights", move || async move {
                let client = generator.client()?;
                let payload = client.generate_json(prompt, temperature).await?;
                parse_flight_stubs(payload)
            })
            .await;

        match result {
            Ok(stubs) => {
                tracing::debug!("🗓️ Generated {} scheduled flights", stubs.len());
                stubs
            }
            Err(e) => {
                tracing::warn!("⚠️ Using fallback schedule: {}", e);
                fallback::fallback_flights(state, airline_contracts)
            }
        }
    }
}
