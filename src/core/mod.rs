pub mod config;
pub mod error;
pub mod types;

pub use config::RealmConfig;
pub use error::{RealmError, Result};
pub use types::{Direction, EntityId, Position, Tick};
