// Airport Tower - authoritative airport simulation and batch runner
// Every stored game advances on the server; clients only submit intents

pub mod batch;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod models;
pub mod operations;
pub mod simulation;
pub mod storage;

// Re-export commonly used types
pub use batch::{BatchReport, BatchRunner};
pub use config::{AirportConfig, ConfigManager};
pub use content::{ContentSource, LiveContent, OfflineContent};
pub use error::{Error, IntentError, Result, StorageError, TickError};
pub use models::{GameState, SaveData};
pub use simulation::TickRunner;
pub use storage::{JsonDirectoryStore, MemorySaveStore, SaveRecord, SaveStore, update_save};

// Constants
pub const DEFAULT_CONFIG_FILE: &str = "airport.toml";
