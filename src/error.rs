// Error taxonomy for storage, content collaborators, ticks and user intents
use thiserror::Error;

use crate::models::{Parking, VehicleType};

/// Result type for save-record persistence
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on save store: {0}")]
    Io(#[from] std::io::Error),

    #[error("save record could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no save record for player {0}")]
    NotFound(String),

    #[error("invalid player id {0:?}")]
    InvalidPlayerId(String),

    /// Another writer stored the record after it was loaded. An expected
    /// revision of 0 means the record was expected not to exist.
    #[error("stale write for player {player_id}: expected revision {expected}, found {found}")]
    StaleWrite {
        player_id: String,
        expected: u64,
        found: u64,
    },
}

/// Failures talking to a content collaborator. These never leave the
/// `content` module: every public entry point falls back instead.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed with status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("content generator unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum TickError {
    #[error("duplicate flight id {0} in save")]
    DuplicateFlight(String),

    #[error("duplicate vehicle id {0} in save")]
    DuplicateVehicle(String),

    #[error("flight {flight_number} is {status} but holds no parking")]
    MissingParking {
        flight_number: String,
        status: String,
    },
}

/// Rejections of user-intent handlers. The message is user facing.
#[derive(Debug, Error, PartialEq)]
pub enum IntentError {
    #[error("insufficient funds: {needed} $ needed, {available} $ available")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("no idle {0} available to sell")]
    NoIdleVehicle(VehicleType),

    #[error("contract {0} not found")]
    ContractNotFound(String),

    #[error("flight {0} not found")]
    FlightNotFound(String),

    #[error("{0} does not exist at this airport")]
    ParkingOutOfRange(Parking),

    #[error("{parking} is already held by flight {flight_number}")]
    ParkingOccupied {
        parking: Parking,
        flight_number: String,
    },

    #[error("flight {0} can no longer change parking")]
    NotReassignable(String),
}

/// Top-level error for the batch runner and the binary
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Tick(#[from] TickError),

    #[error(transparent)]
    Intent(#[from] IntentError),

    #[error("game task aborted: {0}")]
    TaskAborted(String),
}

pub type Result<T> = std::result::Result<T, Error>;
