mod common;

use std::time::Duration;

use airport_tower::config::ContentConfig;
use airport_tower::content::fallback::*;
use airport_tower::content::generator::*;
use airport_tower::content::{ContentSource, LiveContent, OfflineContent, WeatherClient};
use airport_tower::error::ContentError;
use airport_tower::models::*;

use common::*;

#[test]
fn test_parse_json_from_text_is_lenient() {
    let fenced = "```json\n[{\"a\": 1}]\n```";
    assert_eq!(parse_json_from_text(fenced).unwrap(), serde_json::json!([{"a": 1}]));

    let chatty = "Sure! Here is the data: {\"a\": [1, 2]} Let me know if you need more.";
    assert_eq!(parse_json_from_text(chatty).unwrap(), serde_json::json!({"a": [1, 2]}));

    assert_eq!(parse_json_from_text("  [ ]  ").unwrap(), serde_json::json!([]));

    assert!(matches!(parse_json_from_text("no data today"), Err(ContentError::Malformed(_))));
    assert!(matches!(parse_json_from_text("[1, 2"), Err(ContentError::Malformed(_))));
}

#[test]
fn test_contract_offers_get_fresh_ids() {
    let payload = serde_json::json!([
        {
            "id": "model-chosen",
            "name": "LOT Polish Airlines",
            "type": "Airline",
            "description": "Regional routes",
            "terms": { "moneyPerDay": 1200, "reputationEffect": 3, "cancellationPenalty": 5 },
            "duration": 30
        },
        {
            "name": "Gourmet Skies",
            "type": "Catering",
            "terms": { "moneyPerDay": -400, "reputationEffect": 2 },
            "duration": 14
        }
    ]);

    let offers = parse_contract_offers(payload).unwrap();

    assert_eq!(offers.len(), 2);
    assert_ne!(offers[0].id, "model-chosen");
    assert_ne!(offers[0].id, offers[1].id);
    assert!(offers.iter().all(|c| c.days_remaining.is_none()));
    assert_eq!(offers[1].contract_type, ContractType::Catering);
    assert_eq!(offers[1].cancellation_penalty(), 0);
}

#[test]
fn test_invalid_contract_payloads_fail_the_attempt() {
    let not_array = serde_json::json!({ "contracts": [] });
    assert!(parse_contract_offers(not_array).is_err());

    let zero_days = serde_json::json!([{
        "name": "Never", "type": "Fuel",
        "terms": { "moneyPerDay": -1, "reputationEffect": 0 }, "duration": 0
    }]);
    assert!(parse_contract_offers(zero_days).is_err());

    let negative_penalty = serde_json::json!([{
        "name": "Odd", "type": "Fuel",
        "terms": { "moneyPerDay": -1, "reputationEffect": 0, "cancellationPenalty": -3 }, "duration": 5
    }]);
    assert!(parse_contract_offers(negative_penalty).is_err());

    let unknown_type = serde_json::json!([{
        "name": "Odd", "type": "Cleaning",
        "terms": { "moneyPerDay": -1, "reputationEffect": 0 }, "duration": 5
    }]);
    assert!(parse_contract_offers(unknown_type).is_err());
}

#[test]
fn test_flight_stubs_need_wall_clock_times() {
    let good = serde_json::json!([
        { "flightNumber": "LO 281", "airline": "LOT", "type": "Arrival", "scheduledTime": "07:45", "origin": "Warszawa", "destination": "Krakow" },
        { "flightNumber": "LO 282", "airline": "LOT", "type": "Departure", "scheduledTime": "08:30", "origin": "Krakow", "destination": null }
    ]);
    let stubs = parse_flight_stubs(good).unwrap();
    assert_eq!(stubs.len(), 2);
    assert_eq!(stubs[1].destination, None);

    let bad_time = serde_json::json!([
        { "flightNumber": "LO 283", "airline": "LOT", "type": "Arrival", "scheduledTime": "7.45pm" }
    ]);
    assert!(matches!(parse_flight_stubs(bad_time), Err(ContentError::Malformed(_))));
    assert!(parse_flight_stubs(serde_json::json!("LO 283")).is_err());
}

#[test]
fn test_daily_flight_count_scales_with_airport() {
    let mut state = new_state(at(0, 0));
    assert_eq!(daily_flight_count(&state), 13);

    state.gates = 0;
    state.reputation = Reputation::new(5);
    assert_eq!(daily_flight_count(&state), 2);
}

#[test]
fn test_prompts_carry_airport_context() {
    let state = new_state(at(0, 0));
    let prompt = contracts_prompt(&state, "Krakow");
    assert!(prompt.contains("Krakow"));
    assert!(prompt.contains("\"gates\":4"));

    let prompt = flights_prompt(&state, "Krakow", &["LOT".to_string(), "Ryanair".to_string()]);
    assert!(prompt.contains("exactly 13 flights"));
    assert!(prompt.contains("LOT, Ryanair"));
}

#[test]
fn test_generator_response_text_joins_parts() {
    let response: airport_tower::models::GenerateContentResponse = serde_json::from_value(serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": "[1," }, { "text": " 2]" }] } }]
    }))
    .unwrap();
    assert_eq!(response.text().as_deref(), Some("[1, 2]"));

    let empty: airport_tower::models::GenerateContentResponse =
        serde_json::from_value(serde_json::json!({ "candidates": [] })).unwrap();
    assert_eq!(empty.text(), None);
}

#[test]
fn test_fallback_content() {
    let weather = fallback_weather();
    assert_eq!((weather.temperature, weather.wind_speed, weather.weather_code), (15.0, 10.0, 3));
    assert_eq!(weather.severity, Severity::Low);

    let offers = fallback_contracts(5);
    assert_eq!(offers[0].name, "Cheap Wings");
    assert_eq!(offers[0].terms.money_per_day, 400);
    assert_eq!(offers[1].terms.money_per_day, -1500);
    assert_eq!(offers[1].duration, 60);

    let state = new_state(at(0, 0));
    let generic = fallback_flights(&state, &[]);
    let numbers: Vec<&str> = generic.iter().map(|f| f.flight_number.as_str()).collect();
    assert_eq!(numbers, vec!["GE 101", "GE 102", "GE 203", "GE 204"]);
    assert!(generic.iter().all(|f| f.wall_time().is_some()));

    let signed = vec![contract("Sky Co", ContractType::Airline, 100, Some(3))];
    let branded = fallback_flights(&state, &signed);
    assert_eq!(branded[0].flight_number, "SK 101");
    assert_eq!(branded[0].airline, "Sky Co");
    assert_eq!(branded[0].destination.as_deref(), Some("Krakow"));
    assert_eq!(branded[1].origin.as_deref(), Some("Krakow"));
    assert_eq!(branded[1].destination.as_deref(), Some("City A"));
}

#[test]
fn test_weather_codes_map_to_severity() {
    let storm = Weather::from_wmo(18.0, 40.0, 95);
    assert_eq!(storm.description, "Thunderstorm");
    assert_eq!(storm.severity, Severity::High);

    assert_eq!(describe_wmo_code(45), ("Fog", Severity::Medium));
    assert_eq!(describe_wmo_code(1234), ("Unknown weather", Severity::Low));
}

#[test]
fn test_generator_is_unavailable_without_key() {
    let config = ContentConfig {
        api_key_env: format!("AIRPORT_TOWER_UNSET_{}", uuid::Uuid::new_v4().simple()),
        ..ContentConfig::default()
    };
    let generator = ContentGenerator::from_config(&config);
    assert!(!generator.is_available());
    assert!(matches!(generator.client(), Err(ContentError::Unavailable(_))));
}

#[test]
fn test_forecast_url_uses_location() {
    let client = WeatherClient::new("https://weather.example/v1/forecast/", Duration::from_secs(1)).unwrap();
    let url = client.forecast_url(&default_location());
    assert_eq!(
        url,
        "https://weather.example/v1/forecast?latitude=50.06&longitude=19.94&current=temperature_2m,weather_code,wind_speed_10m"
    );
}

#[tokio::test]
async fn test_live_content_falls_back_when_everything_fails() {
    let config = ContentConfig {
        max_retries: 2,
        ..ContentConfig::default()
    };
    // Nothing listens on the discard port
    let weather = WeatherClient::new("http://127.0.0.1:9/v1/forecast", Duration::from_secs(2)).unwrap();
    let content = LiveContent::new(weather, ContentGenerator::Unavailable("no key".to_string()), &config);
    let state = new_state(at(0, 0));

    assert_eq!(content.fetch_weather(&default_location()).await, fallback_weather());

    let offers = content.generate_contracts(&state).await;
    let names: Vec<&str> = offers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Cheap Wings", "Basic Fuel Supplier"]);

    let stubs = content.generate_flights_for_day(&state, &[]).await;
    assert_eq!(stubs, fallback_flights(&state, &[]));
}

#[tokio::test]
async fn test_offline_content_matches_fallbacks() {
    let state = new_state(at(0, 0));
    assert_eq!(OfflineContent.fetch_weather(&default_location()).await, fallback_weather());
    assert_eq!(OfflineContent.generate_contracts(&state).await.len(), 2);
    assert_eq!(
        OfflineContent.generate_flights_for_day(&state, &[]).await,
        fallback_flights(&state, &[])
    );
}
