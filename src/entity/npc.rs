//! Autonomous population management
//!
//! The population is held near a target size. Each spawn pass makes a
//! bounded number of placement attempts; when combat deaths have recorded
//! danger values, placement follows the most recent one.

use ahash::AHashMap;
use indexmap::IndexMap;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::core::config::RealmConfig;
use crate::core::types::{Direction, EntityId};
use crate::entity::entity::{Action, Entity};
use crate::entity::group::EntityGroup;
use crate::entity::spawn;
use crate::skills::experience::ExperienceCalculator;
use crate::world::map::TileMap;

/// Temperament, chosen from spawn danger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NpcKind {
    Passive = 1,
    Neutral = 2,
    Hostile = 3,
}

impl NpcKind {
    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn from_danger(danger: f32) -> Self {
        if danger < 1.0 / 3.0 {
            NpcKind::Passive
        } else if danger < 2.0 / 3.0 {
            NpcKind::Neutral
        } else {
            NpcKind::Hostile
        }
    }
}

/// Combat level for an entity spawned at `danger`
pub fn level_for_danger(danger: f32, level_max: u32) -> u32 {
    let span = level_max.saturating_sub(1) as f32;
    1 + (danger.clamp(0.0, 1.0) * span).round() as u32
}

#[derive(Debug, Clone)]
pub struct AutonomousManager {
    pub group: EntityGroup,
    next_id: i32,
    spawn_dangers: Vec<f32>,
}

impl Default for AutonomousManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AutonomousManager {
    pub fn new() -> Self {
        Self {
            group: EntityGroup::new(),
            next_id: -1,
            spawn_dangers: Vec::new(),
        }
    }

    pub fn reset(&mut self, map: &mut TileMap) {
        self.group.reset(map);
        self.next_id = -1;
        self.spawn_dangers.clear();
    }

    /// Id the next successful spawn will receive
    pub fn next_id(&self) -> EntityId {
        EntityId(self.next_id)
    }

    /// Recorded danger values, most recent last
    pub fn spawn_dangers(&self) -> &[f32] {
        &self.spawn_dangers
    }

    /// Record a danger value to bias upcoming placements
    pub fn push_danger(&mut self, danger: f32) {
        self.spawn_dangers.push(danger);
    }

    /// One bounded spawn pass. Returns how many entities were placed.
    ///
    /// The top of the danger stack biases every attempt of the pass and is
    /// popped once afterwards.
    pub fn spawn(
        &mut self,
        config: &RealmConfig,
        calc: &ExperienceCalculator,
        map: &mut TileMap,
        rng: &mut dyn RngCore,
    ) -> usize {
        let population = &config.population;
        if !population.npc_enabled {
            return 0;
        }

        let mut placed = 0;
        for _ in 0..population.npc_spawn_attempts {
            if self.group.len() >= population.npc_n {
                break;
            }

            let pos = match self.spawn_dangers.last() {
                Some(&danger) => spawn::danger_position(&config.map, danger, rng),
                None => spawn::uniform_position(&config.map, rng),
            };
            if !map.is_free(pos) {
                continue;
            }

            let danger = spawn::danger(&config.map, pos);
            let mut entity = Entity::new(EntityId(self.next_id), pos, config);
            entity.spawn_danger = danger;
            entity.npc_kind = Some(NpcKind::from_danger(danger));
            entity
                .skills
                .combat
                .set_levels(level_for_danger(danger, calc.level_max()), calc);

            self.group.spawn(entity, map);
            self.next_id -= 1;
            placed += 1;
        }

        self.spawn_dangers.pop();

        if placed > 0 {
            tracing::debug!("Spawned {} autonomous entities, population {}", placed, self.group.len());
        }
        placed
    }

    /// Generic cull, then record the dead's dangers and refill
    pub fn cull(
        &mut self,
        config: &RealmConfig,
        calc: &ExperienceCalculator,
        map: &mut TileMap,
        rng: &mut dyn RngCore,
    ) -> &IndexMap<EntityId, Entity> {
        let dangers: Vec<f32> = self
            .group
            .cull(map)
            .values()
            .map(|e| e.spawn_danger)
            .collect();
        self.spawn_dangers.extend(dangers);

        self.spawn(config, calc, map, rng);
        self.group.dead_this_tick()
    }

    /// Random walk: each entity picks a free neighbor, or stays when boxed in
    pub fn actions(&self, map: &TileMap, rng: &mut dyn RngCore) -> AHashMap<EntityId, Action> {
        self.group
            .iter()
            .map(|entity| {
                let open: Vec<Direction> = Direction::ALL
                    .into_iter()
                    .filter(|dir| entity.pos.step(*dir).map_or(false, |p| map.is_free(p)))
                    .collect();
                let action = if open.is_empty() {
                    Action::Stay
                } else {
                    Action::Move(open[rng.gen_range(0..open.len())])
                };
                (entity.id, action)
            })
            .collect()
    }
}
