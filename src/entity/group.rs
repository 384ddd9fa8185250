//! Insertion-ordered population of entities
//!
//! Iteration order is spawn order. Updates run in that order, so two runs
//! with the same seed visit entities identically.

use ahash::AHashMap;
use indexmap::IndexMap;

use crate::core::types::EntityId;
use crate::entity::entity::{Action, Entity, EntityPacket};
use crate::skills::context::SkillContext;
use crate::world::map::TileMap;

#[derive(Debug, Clone, Default)]
pub struct EntityGroup {
    entities: IndexMap<EntityId, Entity>,
    dead_this_tick: IndexMap<EntityId, Entity>,
}

impl EntityGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entities(&self) -> &IndexMap<EntityId, Entity> {
        &self.entities
    }

    /// Entities removed by the most recent cull
    pub fn dead_this_tick(&self) -> &IndexMap<EntityId, Entity> {
        &self.dead_this_tick
    }

    /// Live entities followed by those that died this tick
    pub fn corporeal(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values().chain(self.dead_this_tick.values())
    }

    pub fn packet(&self) -> IndexMap<EntityId, EntityPacket> {
        self.corporeal().map(|e| (e.id, e.packet())).collect()
    }

    /// Register an entity and occupy its tile
    pub fn spawn(&mut self, entity: Entity, map: &mut TileMap) {
        map.add_entity(entity.pos, entity.id);
        self.entities.insert(entity.id, entity);
    }

    /// Move every dead entity into `dead_this_tick`
    ///
    /// Frees tile occupancy and destroys whatever the dead entity still
    /// carried. `dead_this_tick` is rebuilt from empty on every call.
    pub fn cull(&mut self, map: &mut TileMap) -> &IndexMap<EntityId, Entity> {
        self.dead_this_tick.clear();

        let dead: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| !e.alive)
            .map(|e| e.id)
            .collect();

        for id in dead {
            let Some(mut entity) = self.entities.shift_remove(&id) else {
                continue;
            };
            map.remove_entity(entity.pos, id);
            entity.inventory.destroy_all();
            tracing::debug!("Culled entity {} at ({}, {})", id, entity.pos.row, entity.pos.col);
            self.dead_this_tick.insert(id, entity);
        }

        &self.dead_this_tick
    }

    /// Apply one action per live entity in spawn order; missing actions mean Stay
    pub fn update(&mut self, actions: &AHashMap<EntityId, Action>, ctx: &mut SkillContext<'_>) {
        for (id, entity) in self.entities.iter_mut() {
            let action = actions.get(id).copied().unwrap_or_default();
            entity.update(action, ctx);
        }
    }

    /// Drop every entity for a new episode
    pub fn reset(&mut self, map: &mut TileMap) {
        for entity in self.entities.values_mut() {
            map.remove_entity(entity.pos, entity.id);
            entity.inventory.destroy_all();
        }
        self.entities.clear();
        self.dead_this_tick.clear();
    }
}
