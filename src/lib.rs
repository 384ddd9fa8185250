//! Realm Core - deterministic tile-world simulation with per-tick snapshots

pub mod core;
pub mod datastore;
pub mod entity;
pub mod realm;
pub mod skills;
pub mod snapshot;
pub mod world;

pub use realm::{Realm, StepSummary};
