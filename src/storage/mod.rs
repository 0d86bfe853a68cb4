// Storage module for persistent save records
pub mod json_store;
pub mod memory_store;
pub mod save_store;

pub use json_store::*;
pub use memory_store::*;
pub use save_store::*;
