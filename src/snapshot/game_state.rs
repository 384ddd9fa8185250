//! Immutable per-tick snapshot of the live tables
//!
//! Generation copies the entity, item and event tables by value and indexes
//! each by its owning agent id. Every later query reads those copies, so the
//! live realm can move on without disturbing a snapshot already handed out.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ahash::AHashMap;
use rayon::prelude::*;

use crate::core::error::Result;
use crate::core::types::{EntityId, Position, Tick};
use crate::datastore::schema::{EntityField, Field, TableKind};
use crate::datastore::table::Table;
use crate::realm::Realm;
use crate::snapshot::cache::{CacheKey, CacheValue, SnapshotCache};
use crate::snapshot::subject::Subject;
use crate::snapshot::view::GroupView;

/// Builds snapshots for one episode
///
/// Player spawn positions are recorded once, when the generator is created
/// right after a reset, and shared by every snapshot it produces.
#[derive(Debug, Clone)]
pub struct GameStateGenerator {
    spawn_pos: Arc<BTreeMap<EntityId, Position>>,
}

impl GameStateGenerator {
    pub fn new(realm: &Realm) -> Self {
        let spawn_pos = realm.players.group.iter().map(|e| (e.id, e.pos)).collect();
        Self {
            spawn_pos: Arc::new(spawn_pos),
        }
    }

    pub fn spawn_pos(&self) -> &BTreeMap<EntityId, Position> {
        &self.spawn_pos
    }

    pub fn generate<O>(&self, realm: &Realm, env_obs: BTreeMap<EntityId, O>) -> GameState<O> {
        let entity = realm.datastore.entity_table().clone();
        let item = realm.datastore.item_table().clone();
        let event = realm.datastore.event_table().clone();

        let alive_agents = entity
            .rows()
            .map(|row| EntityId(row[EntityField::Id.col()] as i32))
            .filter(|id| id.is_player())
            .collect();

        let state = GameState {
            tick: realm.tick(),
            spawn_pos: Arc::clone(&self.spawn_pos),
            alive_agents,
            env_obs,
            entity_index: build_index(&entity, TableKind::Entity),
            item_index: build_index(&item, TableKind::Item),
            event_index: build_index(&event, TableKind::Event),
            entity,
            item,
            event,
            cache: SnapshotCache::new(),
            scans: AtomicUsize::new(0),
        };

        tracing::debug!(
            "Snapshot at tick {}: {} entities, {} items, {} events",
            state.tick,
            state.entity.len(),
            state.item.len(),
            state.event.len()
        );
        state
    }
}

/// Owner id to row positions, in table order
fn build_index(table: &Table, kind: TableKind) -> AHashMap<i64, Vec<usize>> {
    let col = kind.id_col();
    let mut index: AHashMap<i64, Vec<usize>> = AHashMap::new();
    for (idx, row) in table.rows().enumerate() {
        index.entry(row[col]).or_default().push(idx);
    }
    index
}

pub struct GameState<O> {
    tick: Tick,
    spawn_pos: Arc<BTreeMap<EntityId, Position>>,
    alive_agents: BTreeSet<EntityId>,
    env_obs: BTreeMap<EntityId, O>,
    entity: Table,
    item: Table,
    event: Table,
    entity_index: AHashMap<i64, Vec<usize>>,
    item_index: AHashMap<i64, Vec<usize>>,
    event_index: AHashMap<i64, Vec<usize>>,
    cache: SnapshotCache,
    /// Number of uncached subject lookups; lets tests observe memoization
    scans: AtomicUsize,
}

impl<O> GameState<O> {
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn spawn_pos(&self) -> &BTreeMap<EntityId, Position> {
        &self.spawn_pos
    }

    /// Players with a row in the entity table
    pub fn alive_agents(&self) -> &BTreeSet<EntityId> {
        &self.alive_agents
    }

    pub fn env_obs(&self) -> &BTreeMap<EntityId, O> {
        &self.env_obs
    }

    pub fn table(&self, kind: TableKind) -> &Table {
        match kind {
            TableKind::Entity => &self.entity,
            TableKind::Item => &self.item,
            TableKind::Event => &self.event,
        }
    }

    fn index(&self, kind: TableKind) -> &AHashMap<i64, Vec<usize>> {
        match kind {
            TableKind::Entity => &self.entity_index,
            TableKind::Item => &self.item_index,
            TableKind::Event => &self.event_index,
        }
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn index_scans(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }

    /// Rows of the named table owned by the subject's agents
    ///
    /// Fails with `InvalidTable` for anything but `entity`, `item` or `event`.
    pub fn where_in_id(&self, table: &str, subject: &Subject) -> Result<Arc<Table>> {
        let kind = TableKind::from_str(table)?;
        Ok(self.rows_in_id(kind, subject))
    }

    /// Typed form of [`GameState::where_in_id`]
    ///
    /// Rows are concatenated in subject order, each agent's rows in table
    /// order. Memoized for the life of the snapshot.
    pub fn rows_in_id(&self, kind: TableKind, subject: &Subject) -> Arc<Table> {
        let key = CacheKey::Rows {
            table: kind,
            subject: subject.key(),
        };
        let value = self.cache.get_or_insert_with(key, || {
            self.scans.fetch_add(1, Ordering::Relaxed);
            let index = self.index(kind);
            let rows: Vec<usize> = subject
                .agents()
                .iter()
                .filter_map(|id| index.get(&(id.0 as i64)))
                .flatten()
                .copied()
                .collect();
            CacheValue::Table(Arc::new(self.table(kind).select(&rows)))
        });

        match value {
            CacheValue::Table(table) => table,
            _ => Arc::new(Table::new(kind.width())),
        }
    }

    /// The entity's row, if it was alive when the snapshot was taken
    pub fn entity_or_none(&self, id: EntityId) -> Option<Arc<Vec<i64>>> {
        let value = self.cache.get_or_insert_with(CacheKey::Entity(id), || {
            let row = self
                .entity_index
                .get(&(id.0 as i64))
                .and_then(|rows| rows.first())
                .and_then(|&idx| self.entity.row(idx))
                .map(|row| Arc::new(row.to_vec()));
            CacheValue::Row(row)
        });

        match value {
            CacheValue::Row(row) => row,
            _ => None,
        }
    }

    /// Typed read of one entity's field
    pub fn entity_field(&self, id: EntityId, field: EntityField) -> Option<i64> {
        self.entity_or_none(id).map(|row| row[field.col()])
    }

    pub fn subject_view<'s>(&'s self, subject: &'s Subject) -> GroupView<'s, O> {
        GroupView::new(self, subject)
    }
}

impl<O: Sync> GameState<O> {
    /// Evaluate `f` for every subject in parallel, results in subject order
    pub fn par_evaluate<R, F>(&self, subjects: &[Subject], f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(&GroupView<'_, O>) -> R + Sync + Send,
    {
        subjects
            .par_iter()
            .map(|subject| f(&self.subject_view(subject)))
            .collect()
    }
}
