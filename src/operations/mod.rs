// Operations module - User intents applied to a saved game

pub mod contracts;
pub mod fleet;
pub mod infrastructure;
pub mod parking;
pub mod setup;

pub use contracts::*;
pub use fleet::*;
pub use infrastructure::*;
pub use parking::*;
pub use setup::*;
