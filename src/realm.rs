//! The world aggregate and tick driver
//!
//! A [`Realm`] owns everything one episode mutates: the tile map, both
//! populations, the live tables and the RNG. Nothing here is global; callers
//! hold the realm and pass it by reference to whatever reads it.
//!
//! Tick order is fixed:
//!
//! 1. autonomous entities decide
//! 2. players update, then autonomous entities update
//! 3. the map regenerates depleted tiles
//! 4. players are culled, then autonomous entities (with refill)
//! 5. the tick advances and the live tables are synced

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::core::config::RealmConfig;
use crate::core::error::Result;
use crate::core::types::{EntityId, Tick};
use crate::datastore::store::Datastore;
use crate::entity::entity::{Action, Entity};
use crate::entity::inventory::ItemIds;
use crate::entity::npc::AutonomousManager;
use crate::entity::player::{AgentLoader, PlayerManager, SequentialLoader};
use crate::skills::combat::CombatStyle;
use crate::skills::context::SkillContext;
use crate::skills::experience::ExperienceCalculator;
use crate::world::map::TileMap;
use crate::world::terrain::{RawTerrain, TerrainGenerator};

/// What one call to [`Realm::step`] did
#[derive(Debug, Clone, Default, Serialize)]
pub struct StepSummary {
    /// Tick after the step
    pub tick: Tick,
    pub players_alive: usize,
    pub npcs_alive: usize,
    pub players_died: Vec<EntityId>,
    pub npcs_died: Vec<EntityId>,
    pub tiles_restored: usize,
}

pub struct Realm {
    config: RealmConfig,
    pub map: TileMap,
    pub players: PlayerManager,
    pub npcs: AutonomousManager,
    pub datastore: Datastore,
    item_ids: ItemIds,
    calc: ExperienceCalculator,
    rng: ChaCha8Rng,
    tick: Tick,
}

impl Realm {
    pub fn new(config: RealmConfig) -> Result<Self> {
        config.validate()?;

        let loader = SequentialLoader::new(&config, Vec::new());
        Ok(Self {
            map: TileMap::new(&config),
            players: PlayerManager::new(Box::new(loader)),
            npcs: AutonomousManager::new(),
            datastore: Datastore::new(),
            item_ids: ItemIds::new(),
            calc: ExperienceCalculator::new(config.progression.level_max),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tick: 0,
            config,
        })
    }

    pub fn config(&self) -> &RealmConfig {
        &self.config
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn calc(&self) -> &ExperienceCalculator {
        &self.calc
    }

    /// Start a new episode with the default player loader
    pub fn reset(&mut self, raw: &RawTerrain, terrain: &dyn TerrainGenerator) -> Result<()> {
        let loader = SequentialLoader::new(&self.config, Vec::new());
        self.reset_with_loader(raw, terrain, Box::new(loader))
    }

    /// Start a new episode
    ///
    /// Reseeds the RNG, reloads the map, empties both populations and the
    /// live tables, then spawns the initial players and autonomous entities.
    pub fn reset_with_loader(
        &mut self,
        raw: &RawTerrain,
        terrain: &dyn TerrainGenerator,
        loader: Box<dyn AgentLoader>,
    ) -> Result<()> {
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.map.reset(&self.config, raw, terrain, &mut self.rng)?;

        self.players.reset(&mut self.map, loader);
        self.npcs.reset(&mut self.map);
        self.datastore.reset();
        self.item_ids = ItemIds::new();
        self.tick = 0;

        self.players.spawn(&self.config, &mut self.map);
        self.npcs
            .spawn(&self.config, &self.calc, &mut self.map, &mut self.rng);
        self.sync();

        tracing::info!(
            "Realm reset: seed {}, {} players, {} autonomous",
            self.config.seed,
            self.players.group.len(),
            self.npcs.group.len()
        );
        Ok(())
    }

    /// Advance one tick. Players without an entry in `player_actions` stay put.
    pub fn step(&mut self, player_actions: &AHashMap<EntityId, Action>) -> StepSummary {
        let npc_actions = self.npcs.actions(&self.map, &mut self.rng);

        {
            let mut ctx = SkillContext {
                config: &self.config,
                calc: &self.calc,
                map: &mut self.map,
                rng: &mut self.rng,
                item_ids: &mut self.item_ids,
                events: &mut self.datastore.events,
                tick: self.tick,
            };
            self.players.group.update(player_actions, &mut ctx);
            self.npcs.group.update(&npc_actions, &mut ctx);
        }

        let tiles_restored = self.map.step();

        let players_died: Vec<EntityId> = self.players.group.cull(&mut self.map).keys().copied().collect();
        let npcs_died: Vec<EntityId> = self
            .npcs
            .cull(&self.config, &self.calc, &mut self.map, &mut self.rng)
            .keys()
            .copied()
            .collect();

        self.tick += 1;
        self.sync();

        if !players_died.is_empty() {
            tracing::debug!("Tick {}: players died {:?}", self.tick, players_died);
        }

        StepSummary {
            tick: self.tick,
            players_alive: self.players.group.len(),
            npcs_alive: self.npcs.group.len(),
            players_died,
            npcs_died,
            tiles_restored,
        }
    }

    /// Entry point for the combat collaborator
    ///
    /// Applies `damage` to `target`, logs the hit, trains the attacker's
    /// `style` and logs a kill if the target died. Returns true on a kill.
    pub fn apply_attack(
        &mut self,
        attacker: EntityId,
        target: EntityId,
        style: CombatStyle,
        damage: u32,
    ) -> bool {
        if attacker == target || !self.entity(attacker).map_or(false, |e| e.alive) {
            return false;
        }

        let Some(victim) = self.entity_mut(target) else {
            return false;
        };
        if !victim.alive {
            return false;
        }
        let killed = victim.receive_damage(damage);
        let target_level = victim.level();

        let tick = self.tick;
        self.datastore
            .events
            .score_hit(attacker, tick, target, style, damage);

        if damage > 0 {
            let group = if attacker.is_player() {
                &mut self.players.group
            } else {
                &mut self.npcs.group
            };
            if let Some(entity) = group.get_mut(attacker) {
                let level_up = entity
                    .skills
                    .combat
                    .apply_damage(style, &self.config.progression, &self.calc);
                if let Some(level) = level_up {
                    self.datastore
                        .events
                        .level_up(attacker, tick, style.skill(), level);
                }
            }
        }

        if killed {
            self.datastore
                .events
                .player_kill(attacker, tick, target, target_level);
            tracing::debug!("{} killed {} with {:?}", attacker, target, style);
        }
        killed
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        if id.is_player() {
            self.players.group.get(id)
        } else {
            self.npcs.group.get(id)
        }
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id.is_player() {
            self.players.group.get_mut(id)
        } else {
            self.npcs.group.get_mut(id)
        }
    }

    /// Live players then live autonomous entities, each in spawn order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.players.group.iter().chain(self.npcs.group.iter())
    }

    /// Rebuild the live entity and item tables
    pub fn sync(&mut self) {
        self.datastore
            .sync(self.players.group.iter().chain(self.npcs.group.iter()));
    }
}
