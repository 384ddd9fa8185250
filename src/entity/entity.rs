//! A single agent in the realm, player-controlled or autonomous

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::config::RealmConfig;
use crate::core::types::{Direction, EntityId, Position, Tick};
use crate::datastore::schema::{EntityField, Field};
use crate::entity::inventory::{Equipment, Inventory};
use crate::entity::npc::NpcKind;
use crate::entity::resources::Resources;
use crate::skills::context::{SkillContext, SkillOwner};
use crate::skills::groups::{Packetizable, Skills, Updatable};
use crate::skills::skill::{SkillKind, SkillPacket};
use crate::world::map::TileMap;

/// One decision per entity per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Action {
    #[default]
    Stay,
    Move(Direction),
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Position,
    pub alive: bool,
    pub skills: Skills,
    pub inventory: Inventory,
    pub resources: Resources,
    pub equipment: Equipment,
    /// Danger of the spawn tile; recorded again when an autonomous entity dies
    pub spawn_danger: f32,
    /// Behavior bound by the player loader
    pub agent: Option<String>,
    /// Set for autonomous entities only
    pub npc_kind: Option<NpcKind>,
    pub time_alive: Tick,
}

/// Observer-facing summary of an entity
#[derive(Debug, Clone, Serialize)]
pub struct EntityPacket {
    pub id: EntityId,
    pub pos: Position,
    pub alive: bool,
    pub health: u32,
    pub food: u32,
    pub water: u32,
    pub items: usize,
    pub skills: BTreeMap<&'static str, SkillPacket>,
}

impl Entity {
    pub fn new(id: EntityId, pos: Position, config: &RealmConfig) -> Self {
        Self {
            id,
            pos,
            alive: true,
            skills: Skills::new(),
            inventory: Inventory::new(config.inventory_capacity),
            resources: Resources::new(&config.resource),
            equipment: Equipment::default(),
            spawn_danger: 0.0,
            agent: None,
            npc_kind: None,
            time_alive: 0,
        }
    }

    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }

    /// Highest combat level
    pub fn level(&self) -> u32 {
        self.skills.combat.combat_level()
    }

    /// Move one tile if the destination is habitable and unoccupied
    pub fn apply_move(&mut self, dir: Direction, map: &mut TileMap) -> bool {
        let Some(dest) = self.pos.step(dir) else {
            return false;
        };
        if !map.is_free(dest) {
            return false;
        }

        map.remove_entity(self.pos, self.id);
        map.add_entity(dest, self.id);
        self.pos = dest;
        true
    }

    /// Act, then run skills, then settle health
    ///
    /// Autonomous entities neither eat nor drink, so only players run the
    /// skill and health upkeep.
    pub fn update(&mut self, action: Action, ctx: &mut SkillContext<'_>) {
        if !self.alive {
            return;
        }

        if let Action::Move(dir) = action {
            self.apply_move(dir, ctx.map);
        }

        if self.is_player() {
            let Entity {
                id,
                pos,
                skills,
                inventory,
                resources,
                equipment,
                ..
            } = self;
            let mut owner = SkillOwner {
                id: *id,
                pos: *pos,
                inventory,
                equipment,
                resources,
            };
            skills.update(ctx, &mut owner);
            self.resources.update(&ctx.config.resource);
        }

        self.time_alive += 1;
        self.alive = self.resources.is_alive();
    }

    /// Apply damage from the combat collaborator. Returns true if this killed the entity.
    pub fn receive_damage(&mut self, amount: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.resources.health.decrement(amount);
        self.alive = self.resources.is_alive();
        !self.alive
    }

    /// Row in the live entity table
    pub fn to_row(&self) -> [i64; 16] {
        let mut row = [0i64; 16];
        let mut put = |field: EntityField, value: i64| row[field.col()] = value;

        put(EntityField::Id, self.id.0 as i64);
        put(EntityField::NpcType, self.npc_kind.map_or(0, |k| k.index() as i64));
        put(EntityField::Row, self.pos.row as i64);
        put(EntityField::Col, self.pos.col as i64);
        put(EntityField::Health, self.resources.health.val as i64);
        put(EntityField::Food, self.resources.food.val as i64);
        put(EntityField::Water, self.resources.water.val as i64);
        put(EntityField::TimeAlive, self.time_alive as i64);

        let levels = [
            (EntityField::Melee, SkillKind::Melee),
            (EntityField::Range, SkillKind::Range),
            (EntityField::Mage, SkillKind::Mage),
            (EntityField::Fishing, SkillKind::Fishing),
            (EntityField::Herbalism, SkillKind::Herbalism),
            (EntityField::Prospecting, SkillKind::Prospecting),
            (EntityField::Carving, SkillKind::Carving),
            (EntityField::Alchemy, SkillKind::Alchemy),
        ];
        for (field, kind) in levels {
            put(field, self.skills.get(kind).level() as i64);
        }
        row
    }

    pub fn packet(&self) -> EntityPacket {
        EntityPacket {
            id: self.id,
            pos: self.pos,
            alive: self.alive,
            health: self.resources.health.val,
            food: self.resources.food.val,
            water: self.resources.water.val,
            items: self.inventory.len(),
            skills: self.skills.packet(),
        }
    }
}
