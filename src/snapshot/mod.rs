//! Read-only per-tick snapshots and the views that query them

pub mod cache;
pub mod game_state;
pub mod subject;
pub mod view;

pub use cache::{CacheKey, CacheValue, SnapshotCache, ViewKind};
pub use game_state::{GameState, GameStateGenerator};
pub use subject::{Subject, SubjectKey};
pub use view::{
    EntityView, EventCodeView, EventView, FieldValue, GroupView, ItemView, SnapshotField, SubjectField,
    TableView,
};
