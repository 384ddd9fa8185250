//! Player slot management
//!
//! Slots are numbered 1..=player_n and each slot spawns at most once per
//! episode. A loader decides which behavior binds to each new player and
//! where it appears.

use indexmap::IndexSet;

use crate::core::config::RealmConfig;
use crate::core::types::{EntityId, Position};
use crate::entity::entity::Entity;
use crate::entity::group::EntityGroup;
use crate::entity::spawn;
use crate::world::map::TileMap;

/// Supplies behaviors and spawn positions for player slots
pub trait AgentLoader: Send + Sync {
    /// Next behavior in the loader's fixed sequence
    fn next_agent(&mut self) -> String;

    /// Where slot `slot` (1-based) appears
    fn spawn_position(&self, slot: usize) -> Position;
}

/// Cycles through agent names and spaces slots evenly around the play-area ring
#[derive(Debug, Clone)]
pub struct SequentialLoader {
    agents: Vec<String>,
    cursor: usize,
    ring: Vec<Position>,
    player_n: usize,
}

impl SequentialLoader {
    pub fn new(config: &RealmConfig, agents: Vec<String>) -> Self {
        let agents = if agents.is_empty() {
            vec!["scripted".to_string()]
        } else {
            agents
        };
        Self {
            agents,
            cursor: 0,
            ring: spawn::perimeter(&config.map),
            player_n: config.population.player_n.max(1),
        }
    }
}

impl AgentLoader for SequentialLoader {
    fn next_agent(&mut self) -> String {
        let agent = self.agents[self.cursor % self.agents.len()].clone();
        self.cursor += 1;
        agent
    }

    fn spawn_position(&self, slot: usize) -> Position {
        let idx = (slot.saturating_sub(1) * self.ring.len()) / self.player_n;
        self.ring[idx % self.ring.len()]
    }
}

pub struct PlayerManager {
    pub group: EntityGroup,
    loader: Box<dyn AgentLoader>,
    spawned: IndexSet<EntityId>,
}

impl PlayerManager {
    pub fn new(loader: Box<dyn AgentLoader>) -> Self {
        Self {
            group: EntityGroup::new(),
            loader,
            spawned: IndexSet::new(),
        }
    }

    /// Start a new episode with a fresh loader
    pub fn reset(&mut self, map: &mut TileMap, loader: Box<dyn AgentLoader>) {
        self.group.reset(map);
        self.loader = loader;
        self.spawned.clear();
    }

    /// Slots spawned this episode, in spawn order
    pub fn spawned(&self) -> &IndexSet<EntityId> {
        &self.spawned
    }

    /// Spawn every configured slot that is neither live nor already spawned
    pub fn spawn(&mut self, config: &RealmConfig, map: &mut TileMap) -> usize {
        let mut placed = 0;
        for slot in 1..=config.population.player_n {
            let id = EntityId(slot as i32);
            if self.group.contains(id) || self.spawned.contains(&id) {
                continue;
            }

            let pos = self.loader.spawn_position(slot);
            let mut entity = Entity::new(id, pos, config);
            entity.agent = Some(self.loader.next_agent());
            self.group.spawn(entity, map);
            self.spawned.insert(id);
            placed += 1;
        }

        if placed > 0 {
            tracing::debug!("Spawned {} players", placed);
        }
        placed
    }
}
