use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportConfig {
    pub balance: BalanceConfig,
    pub content: ContentConfig,
    pub timing: TimingConfig,
    pub storage: StorageConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    /// Minutes a parked flight spends in ground service
    pub ground_service_minutes: f64,
    /// Money credited when an arrival completes service
    pub flight_income: i64,
    /// Reputation gained when an arrival completes service
    pub reputation_bonus: i32,
    /// Reputation lost when an unparked arrival diverts
    pub diversion_penalty: i32,
    /// How long before its scheduled time an arrival appears inbound
    pub inbound_window_minutes: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Attempts per content request before the fallback is used
    pub max_retries: u32,
    /// Timeout for a single outbound HTTP request in seconds
    pub request_timeout_seconds: u64,
    /// Overall deadline for one content category during a rollover, in seconds
    pub rollover_deadline_seconds: u64,
    pub weather_api_url: String,
    pub generator_api_url: String,
    pub generator_model: String,
    /// Environment variable holding the generator API key
    pub api_key_env: String,
    pub contract_temperature: f64,
    pub flight_temperature: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay between batch runs in `run` mode, in seconds
    pub tick_interval_seconds: u64,
    /// Config hot-reload check interval in seconds
    pub config_reload_interval_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON save record per player
    pub saves_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Upper bound on games ticked at the same time
    pub max_concurrent_games: usize,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            ground_service_minutes: 60.0,
            flight_income: 750,
            reputation_bonus: 1,
            diversion_penalty: 5,
            inbound_window_minutes: 30.0,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            request_timeout_seconds: 10,
            rollover_deadline_seconds: 45,
            weather_api_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            generator_api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            generator_model: "gemini-2.5-flash".to_string(),
            api_key_env: "API_KEY".to_string(),
            contract_temperature: 1.1,
            flight_temperature: 0.8,
        }
    }
}

impl Default for AirportConfig {
    fn default() -> Self {
        Self {
            balance: BalanceConfig::default(),
            content: ContentConfig::default(),
            timing: TimingConfig {
                tick_interval_seconds: 60,
                config_reload_interval_seconds: 30,
            },
            storage: StorageConfig {
                saves_dir: "saves".to_string(),
            },
            batch: BatchConfig {
                max_concurrent_games: 16,
            },
        }
    }
}

impl ContentConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn rollover_deadline(&self) -> Duration {
        Duration::from_secs(self.rollover_deadline_seconds)
    }
}

impl AirportConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if Path::new(config_path).exists() {
            tracing::info!("📋 Loading configuration from {}", config_path);
            let config_str = fs::read_to_string(config_path)?;
            let config: AirportConfig = toml::from_str(&config_str)?;
            Ok(config)
        } else {
            tracing::info!("📋 Creating default configuration at {}", config_path);
            let config = AirportConfig::default();
            config.save(config_path)?;
            tracing::info!("💡 Edit {} to tune balance and content settings", config_path);
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = Path::new(config_path).parent() {
            fs::create_dir_all(parent)?;
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.balance.ground_service_minutes <= 0.0 {
            return Err("ground_service_minutes must be greater than 0".to_string());
        }
        if self.balance.inbound_window_minutes < 0.0 {
            return Err("inbound_window_minutes must not be negative".to_string());
        }
        if self.balance.reputation_bonus < 0 || self.balance.diversion_penalty < 0 {
            return Err("reputation_bonus and diversion_penalty must not be negative".to_string());
        }

        if self.content.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
        }
        if self.content.request_timeout_seconds == 0 || self.content.rollover_deadline_seconds == 0 {
            return Err("content timeouts must be greater than 0".to_string());
        }

        if self.timing.tick_interval_seconds == 0 {
            return Err("tick_interval_seconds must be greater than 0".to_string());
        }
        if self.batch.max_concurrent_games == 0 {
            return Err("max_concurrent_games must be greater than 0".to_string());
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        tracing::info!("📋 Configuration Summary:");
        tracing::info!("   ✈️  Ground service: {} min, income {} $", self.balance.ground_service_minutes, self.balance.flight_income);
        tracing::info!("   🌐 Content retries: {}, request timeout {}s", self.content.max_retries, self.content.request_timeout_seconds);
        tracing::info!("   ⏰ Tick interval: {}s", self.timing.tick_interval_seconds);
        tracing::info!("   💾 Saves: {}", self.storage.saves_dir);
        tracing::info!("   🔄 Config reload: {}s", self.timing.config_reload_interval_seconds);
    }
}

/// Owns the live configuration and swaps it when the file on disk changes.
///
/// The file is only stat'ed every `timing.config_reload_interval_seconds`;
/// an edit that fails to parse or validate leaves the running values alone.
#[derive(Debug)]
pub struct ConfigManager {
    config: AirportConfig,
    config_path: String,
    last_modified: Option<SystemTime>,
    last_reload_check: SystemTime,
}

fn modified_time(path: &str) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Values worth reporting when a reload changes them
fn reload_summary(config: &AirportConfig) -> String {
    format!(
        "tick {}s, service {} min, income {} $, {} concurrent games",
        config.timing.tick_interval_seconds,
        config.balance.ground_service_minutes,
        config.balance.flight_income,
        config.batch.max_concurrent_games
    )
}

impl ConfigManager {
    pub fn new(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = AirportConfig::load_or_create(config_path)?;
        config.validate()?;
        config.print_summary();

        Ok(Self {
            config,
            config_path: config_path.to_string(),
            last_modified: modified_time(config_path),
            last_reload_check: SystemTime::now(),
        })
    }

    pub fn config(&self) -> &AirportConfig {
        &self.config
    }

    /// Returns true when a new configuration was installed
    pub fn check_and_reload(&mut self) -> bool {
        let now = SystemTime::now();
        let interval = Duration::from_secs(self.config.timing.config_reload_interval_seconds);
        if now.duration_since(self.last_reload_check).unwrap_or_default() < interval {
            return false;
        }
        self.last_reload_check = now;

        match modified_time(&self.config_path) {
            Some(modified) if Some(modified) != self.last_modified => self.reload(modified),
            _ => false,
        }
    }

    fn reload(&mut self, modified: SystemTime) -> bool {
        let candidate = match AirportConfig::load_or_create(&self.config_path) {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::warn!("⚠️ Could not read {}, keeping current config: {}", self.config_path, e);
                return false;
            }
        };
        if let Err(e) = candidate.validate() {
            tracing::warn!("⚠️ Rejected edited config: {}", e);
            return false;
        }

        let (before, after) = (reload_summary(&self.config), reload_summary(&candidate));
        self.config = candidate;
        self.last_modified = Some(modified);

        if before == after {
            tracing::info!("🔄 Configuration reloaded");
        } else {
            tracing::info!("🔄 Configuration reloaded: {} → {}", before, after);
        }
        true
    }
}
