use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self { name: name.to_string(), latitude, longitude }
    }
}

/// Airports a new game can be opened at
pub fn known_locations() -> Vec<Location> {
    vec![
        Location::new("Krakow", 50.06, 19.94),
        Location::new("Warszawa", 52.23, 21.01),
        Location::new("Gdansk", 54.35, 18.64),
    ]
}

pub fn default_location() -> Location {
    Location::new("Krakow", 50.06, 19.94)
}

pub fn find_location(name: &str) -> Option<Location> {
    known_locations()
        .into_iter()
        .find(|loc| loc.name.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub temperature: f64,
    pub wind_speed: f64,
    pub weather_code: i32,
    pub description: String,
    pub severity: Severity,
}

impl Weather {
    /// Build a snapshot from a WMO weather code
    pub fn from_wmo(temperature: f64, wind_speed: f64, weather_code: i32) -> Self {
        let (description, severity) = describe_wmo_code(weather_code);
        Self {
            temperature,
            wind_speed,
            weather_code,
            description: description.to_string(),
            severity,
        }
    }
}

/// WMO code -> (description, severity)
pub fn describe_wmo_code(code: i32) -> (&'static str, Severity) {
    match code {
        0 => ("Clear sky", Severity::None),
        1 => ("Mainly clear", Severity::None),
        2 => ("Partly cloudy", Severity::None),
        3 => ("Overcast", Severity::Low),
        45 => ("Fog", Severity::Medium),
        48 => ("Depositing rime fog", Severity::Medium),
        51 => ("Light drizzle", Severity::Low),
        53 => ("Moderate drizzle", Severity::Low),
        55 => ("Dense drizzle", Severity::Low),
        61 => ("Light rain", Severity::Low),
        63 => ("Moderate rain", Severity::Medium),
        65 => ("Heavy rain", Severity::High),
        71 => ("Light snowfall", Severity::Medium),
        73 => ("Moderate snowfall", Severity::High),
        75 => ("Heavy snowfall", Severity::High),
        77 => ("Snow grains", Severity::Medium),
        80 => ("Light rain showers", Severity::Low),
        81 => ("Moderate rain showers", Severity::Medium),
        82 => ("Violent rain showers", Severity::High),
        85 => ("Light snow showers", Severity::Medium),
        86 => ("Heavy snow showers", Severity::High),
        95 => ("Thunderstorm", Severity::High),
        96 => ("Thunderstorm with light hail", Severity::High),
        99 => ("Thunderstorm with heavy hail", Severity::High),
        _ => ("Unknown weather", Severity::Low),
    }
}
