//! Per-snapshot memo cache
//!
//! Lives inside one snapshot and dies with it. Readers share it behind an
//! `RwLock`; a miss computes outside the lock and the first insert wins.

use std::sync::{Arc, RwLock};

use ahash::AHashMap;

use crate::core::types::EntityId;
use crate::datastore::schema::{EventCode, TableKind};
use crate::datastore::table::Table;
use crate::snapshot::subject::SubjectKey;

/// Which projection a cached field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Entity,
    Item,
    Event,
    EventCode(EventCode),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Rows of `table` owned by the subject's agents
    Rows { table: TableKind, subject: SubjectKey },
    /// Subject's event rows narrowed to one code
    EventRows { code: EventCode, subject: SubjectKey },
    /// One column of a view
    Field {
        subject: SubjectKey,
        view: ViewKind,
        field: &'static str,
    },
    /// Entity row lookup by id
    Entity(EntityId),
}

#[derive(Debug, Clone)]
pub enum CacheValue {
    Table(Arc<Table>),
    Column(Arc<Vec<i64>>),
    Row(Option<Arc<Vec<i64>>>),
}

#[derive(Debug, Default)]
pub struct SnapshotCache {
    entries: RwLock<AHashMap<CacheKey, CacheValue>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    pub fn get_or_insert_with(&self, key: CacheKey, compute: impl FnOnce() -> CacheValue) -> CacheValue {
        if let Some(value) = self.get(&key) {
            return value;
        }

        let value = compute();
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.entry(key).or_insert(value).clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_runs_once_per_key() {
        let cache = SnapshotCache::new();
        let mut calls = 0;
        for _ in 0..3 {
            cache.get_or_insert_with(CacheKey::Entity(EntityId(1)), || {
                calls += 1;
                CacheValue::Row(None)
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }
}
