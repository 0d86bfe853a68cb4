// Models module - Persisted game state and external payload shapes

pub mod position;
pub mod flight;
pub mod vehicle;
pub mod contract;
pub mod weather;
pub mod game_state;
pub mod responses;

// Re-export all models for easier imports
pub use position::*;
pub use flight::*;
pub use vehicle::*;
pub use contract::*;
pub use weather::*;
pub use game_state::*;
pub use responses::*;
