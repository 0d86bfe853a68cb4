// Open-Meteo current conditions client
use std::time::Duration;

use crate::error::ContentError;
use crate::models::{ForecastResponse, Location, Weather};

#[derive(Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ContentError> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn forecast_url(&self, location: &Location) -> String {
        format!(
            "{}?latitude={}&longitude={}&current=temperature_2m,weather_code,wind_speed_10m",
            self.base_url, location.latitude, location.longitude
        )
    }

    /// Current weather at `location`
    pub async fn current_weather(&self, location: &Location) -> Result<Weather, ContentError> {
        let url = self.forecast_url(location);
        tracing::trace!("🌐 GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status(status.as_u16()));
        }

        let response_text = response.text().await?;
        let forecast: ForecastResponse = serde_json::from_str(&response_text)?;
        let current = forecast.current;

        Ok(Weather::from_wmo(current.temperature_2m, current.wind_speed_10m, current.weather_code))
    }
}
