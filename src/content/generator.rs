// Generative content client for contract offers and daily schedules
use std::time::Duration;

use serde_json::Value;

use crate::config::ContentConfig;
use crate::error::ContentError;
use crate::models::{Contract, FlightStub, GameState, GenerateContentRequest, GenerateContentResponse, GeneratedContract};

#[derive(Clone)]
pub struct GeneratorClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeneratorClient {
    pub fn new(base_url: &str, model: &str, api_key: String, request_timeout: Duration) -> Result<Self, ContentError> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        })
    }

    /// Send a prompt that asks for JSON and return the parsed payload
    pub async fn generate_json(&self, prompt: &str, temperature: f64) -> Result<Value, ContentError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest::json_prompt(prompt, temperature);
        tracing::trace!("🌐 POST {} (temperature {})", url, temperature);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| "Could not read response".to_string());
            tracing::debug!("🌐 Generator responded {}: {}", status, error_body);
            return Err(ContentError::Status(status.as_u16()));
        }

        let generated: GenerateContentResponse = response.json().await?;
        let text = generated
            .text()
            .ok_or_else(|| ContentError::Malformed("response carried no text".to_string()))?;

        parse_json_from_text(&text)
    }
}

/// The generator capability, resolved once at start-up
#[derive(Clone)]
pub enum ContentGenerator {
    Available(GeneratorClient),
    Unavailable(String),
}

impl ContentGenerator {
    /// Build the client when an API key is present in the configured
    /// environment variable
    pub fn from_config(config: &ContentConfig) -> Self {
        let api_key = match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                let reason = format!("{} is not set; generated content is disabled", config.api_key_env);
                tracing::warn!("⚠️ {}", reason);
                return Self::Unavailable(reason);
            }
        };

        match GeneratorClient::new(
            &config.generator_api_url,
            &config.generator_model,
            api_key,
            config.request_timeout(),
        ) {
            Ok(client) => Self::Available(client),
            Err(e) => {
                tracing::error!("❌ Failed to initialise content generator: {}", e);
                Self::Unavailable(e.to_string())
            }
        }
    }

    pub fn client(&self) -> Result<&GeneratorClient, ContentError> {
        match self {
            Self::Available(client) => Ok(client),
            Self::Unavailable(reason) => Err(ContentError::Unavailable(reason.clone())),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Extract a JSON value from model output.
///
/// Accepts raw JSON, JSON wrapped in markdown fences, or JSON embedded in
/// surrounding prose (the outermost array/object is taken).
pub fn parse_json_from_text(text: &str) -> Result<Value, ContentError> {
    let mut json_str = text.trim();

    if let Some(fenced) = strip_fences(json_str) {
        json_str = fenced;
    }

    if !json_str.starts_with('[') && !json_str.starts_with('{') {
        let start = json_str.find(['[', '{']);
        let end = json_str.rfind([']', '}']);
        if let (Some(start), Some(end)) = (start, end) {
            if end > start {
                json_str = &json_str[start..=end];
            }
        }
    }

    serde_json::from_str(json_str)
        .map_err(|e| ContentError::Malformed(format!("invalid JSON from generator: {}", e)))
}

fn strip_fences(text: &str) -> Option<&str> {
    let inner = text.strip_prefix("```")?.strip_suffix("```")?;
    // Drop the info string ("json") on the opening fence line
    let (_, body) = inner.split_once('\n')?;
    Some(body.trim())
}

/// Validate a contract payload and assign fresh ids
pub fn parse_contract_offers(payload: Value) -> Result<Vec<Contract>, ContentError> {
    if !payload.is_array() {
        return Err(ContentError::Malformed("contract payload is not an array".to_string()));
    }

    let generated: Vec<GeneratedContract> = serde_json::from_value(payload)?;
    generated
        .into_iter()
        .map(|offer| {
            if offer.duration == 0 {
                return Err(ContentError::Malformed(format!("contract {} has no duration", offer.name)));
            }
            if offer.terms.cancellation_penalty.is_some_and(|p| p < 0) {
                return Err(ContentError::Malformed(format!(
                    "contract {} has a negative cancellation penalty",
                    offer.name
                )));
            }
            Ok(offer.into_offer())
        })
        .collect()
}

/// Validate a schedule payload; every entry needs an "HH:MM" time
pub fn parse_flight_stubs(payload: Value) -> Result<Vec<FlightStub>, ContentError> {
    if !payload.is_array() {
        return Err(ContentError::Malformed("flight payload is not an array".to_string()));
    }

    let stubs: Vec<FlightStub> = serde_json::from_value(payload)?;
    if let Some(bad) = stubs.iter().find(|s| s.wall_time().is_none()) {
        return Err(ContentError::Malformed(format!(
            "flight {} has scheduled time {:?}, expected HH:MM",
            bad.flight_number, bad.scheduled_time
        )));
    }
    Ok(stubs)
}

/// Number of flights to request for a day
pub fn daily_flight_count(state: &GameState) -> u32 {
    let by_capacity = state.gates * 2 + (state.reputation.value() / 10) as u32;
    by_capacity.max(2)
}

pub fn contracts_prompt(state: &GameState, location_name: &str) -> String {
    let snapshot = serde_json::json!({
        "day": state.day,
        "money": state.money,
        "reputation": state.reputation.value(),
        "gates": state.gates,
        "stands": state.stands,
    });

    format!(
        r#"You are a game master for an airport management simulator. Based on the current state of the airport provided below, generate a list of 3-4 potential business contracts.
The contracts should be a JSON array with objects following this structure: {{ "name": string, "type": "Airline" | "Catering" | "Fuel", "description": string, "terms": {{ "moneyPerDay": number, "reputationEffect": number, "cancellationPenalty": number }}, "duration": number (in days) }}.
- 'moneyPerDay' is the daily cash flow delta. Positive for income (like an airline), negative for cost (like a premium catering service).
- 'reputationEffect' is a one-time change to reputation upon signing.
- 'cancellationPenalty' is a one-time reputation hit if the contract is cancelled early.
- Make contract terms and names appropriate for the airport's size and reputation. A small, low-reputation airport gets offers from budget airlines, while a large, prestigious one attracts major international carriers. Use real-world airline names relevant to the airport's location: {location_name}.
- Generate a mix of contract types.

Current Airport State:
{snapshot}

IMPORTANT: Your response must be ONLY the raw JSON array, without any surrounding text, explanations, or markdown fences."#
    )
}

pub fn flights_prompt(state: &GameState, location_name: &str, airline_names: &[String]) -> String {
    let flight_count = daily_flight_count(state);
    let airlines = airline_names.join(", ");

    format!(
        r#"You are a flight schedule coordinator for an airport management simulator. Based on the airport's capacity and contracted airlines, create a flight schedule for the next 24 hours.

Airport Location: {location_name}
Contracted Airlines:
- {airlines}

Instructions:
- Generate a list of exactly {flight_count} flights.
- The output MUST be a JSON array of flight objects with this exact structure: {{ "flightNumber": string, "airline": string, "type": "Arrival" | "Departure", "scheduledTime": "HH:MM", "origin": string | null, "destination": string | null }}.
- Use ONLY the airlines from the provided list.
- For Arrivals, the 'destination' must be '{location_name}' and 'origin' should be a realistic city for that airline to fly from.
- For Departures, the 'origin' must be '{location_name}' and 'destination' should be a realistic city for that airline to fly to.
- Flight numbers should be plausible for the airline (e.g., "GA 123" for Generic Air).
- Distribute flights throughout a 24-hour period (00:00 to 23:59), with some clustering during morning (06:00-09:00) and evening (17:00-20:00) peak hours.
- Ensure a mix of Arrivals and Departures.

IMPORTANT: Your response must be ONLY the raw JSON array, without any surrounding text, explanations, or markdown fences."#
    )
}
