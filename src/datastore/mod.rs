//! Columnar live state: entity, item and event tables

pub mod schema;
pub mod store;
pub mod table;

pub use schema::{EntityField, EventCode, EventField, Field, ItemField, TableKind};
pub use store::{Datastore, EventLog};
pub use table::Table;
