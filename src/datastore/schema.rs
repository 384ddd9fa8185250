//! Column layouts for the entity, item and event tables
//!
//! Each table has an enumerated field set. Views resolve field names against
//! these enums once, so a typo fails loudly instead of silently reading the
//! wrong column.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::RealmError;

/// A column of one of the tables
pub trait Field: Copy + Eq + std::hash::Hash + std::fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn col(&self) -> usize;
    fn name(&self) -> &'static str;

    fn width() -> usize {
        Self::ALL.len()
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityField {
    Id,
    NpcType,
    Row,
    Col,
    Health,
    Food,
    Water,
    TimeAlive,
    Melee,
    Range,
    Mage,
    Fishing,
    Herbalism,
    Prospecting,
    Carving,
    Alchemy,
}

impl Field for EntityField {
    const ALL: &'static [Self] = &[
        EntityField::Id,
        EntityField::NpcType,
        EntityField::Row,
        EntityField::Col,
        EntityField::Health,
        EntityField::Food,
        EntityField::Water,
        EntityField::TimeAlive,
        EntityField::Melee,
        EntityField::Range,
        EntityField::Mage,
        EntityField::Fishing,
        EntityField::Herbalism,
        EntityField::Prospecting,
        EntityField::Carving,
        EntityField::Alchemy,
    ];

    fn col(&self) -> usize {
        *self as usize
    }

    fn name(&self) -> &'static str {
        match self {
            EntityField::Id => "id",
            EntityField::NpcType => "npc_type",
            EntityField::Row => "row",
            EntityField::Col => "col",
            EntityField::Health => "health",
            EntityField::Food => "food",
            EntityField::Water => "water",
            EntityField::TimeAlive => "time_alive",
            EntityField::Melee => "melee_level",
            EntityField::Range => "range_level",
            EntityField::Mage => "mage_level",
            EntityField::Fishing => "fishing_level",
            EntityField::Herbalism => "herbalism_level",
            EntityField::Prospecting => "prospecting_level",
            EntityField::Carving => "carving_level",
            EntityField::Alchemy => "alchemy_level",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemField {
    Id,
    OwnerId,
    Kind,
    Level,
    Quantity,
}

impl Field for ItemField {
    const ALL: &'static [Self] = &[
        ItemField::Id,
        ItemField::OwnerId,
        ItemField::Kind,
        ItemField::Level,
        ItemField::Quantity,
    ];

    fn col(&self) -> usize {
        *self as usize
    }

    fn name(&self) -> &'static str {
        match self {
            ItemField::Id => "id",
            ItemField::OwnerId => "owner_id",
            ItemField::Kind => "type_id",
            ItemField::Level => "level",
            ItemField::Quantity => "quantity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventField {
    EntId,
    Tick,
    Event,
    /// Skill index for LevelUp, item kind for HarvestItem, combat style for ScoreHit
    Kind,
    Level,
    Number,
    TargetEnt,
    Damage,
}

impl Field for EventField {
    const ALL: &'static [Self] = &[
        EventField::EntId,
        EventField::Tick,
        EventField::Event,
        EventField::Kind,
        EventField::Level,
        EventField::Number,
        EventField::TargetEnt,
        EventField::Damage,
    ];

    fn col(&self) -> usize {
        *self as usize
    }

    fn name(&self) -> &'static str {
        match self {
            EventField::EntId => "ent_id",
            EventField::Tick => "tick",
            EventField::Event => "event",
            EventField::Kind => "type",
            EventField::Level => "level",
            EventField::Number => "number",
            EventField::TargetEnt => "target_ent",
            EventField::Damage => "damage",
        }
    }
}

/// What an event row records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventCode {
    EatFood = 1,
    DrinkWater = 2,
    HarvestItem = 3,
    LevelUp = 4,
    ScoreHit = 5,
    PlayerKill = 6,
}

impl EventCode {
    pub const ALL: [EventCode; 6] = [
        EventCode::EatFood,
        EventCode::DrinkWater,
        EventCode::HarvestItem,
        EventCode::LevelUp,
        EventCode::ScoreHit,
        EventCode::PlayerKill,
    ];

    pub fn value(&self) -> i64 {
        *self as i64
    }

    pub fn name(&self) -> &'static str {
        match self {
            EventCode::EatFood => "eat_food",
            EventCode::DrinkWater => "drink_water",
            EventCode::HarvestItem => "harvest_item",
            EventCode::LevelUp => "level_up",
            EventCode::ScoreHit => "score_hit",
            EventCode::PlayerKill => "player_kill",
        }
    }
}

impl FromStr for EventCode {
    type Err = RealmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.name() == s)
            .ok_or_else(|| RealmError::InvalidEventCode(s.to_string()))
    }
}

/// The three snapshot tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Entity,
    Item,
    Event,
}

impl TableKind {
    pub fn name(&self) -> &'static str {
        match self {
            TableKind::Entity => "entity",
            TableKind::Item => "item",
            TableKind::Event => "event",
        }
    }

    /// Column holding the agent id a row belongs to
    pub fn id_col(&self) -> usize {
        match self {
            TableKind::Entity => EntityField::Id.col(),
            TableKind::Item => ItemField::OwnerId.col(),
            TableKind::Event => EventField::EntId.col(),
        }
    }

    pub fn width(&self) -> usize {
        match self {
            TableKind::Entity => EntityField::width(),
            TableKind::Item => ItemField::width(),
            TableKind::Event => EventField::width(),
        }
    }
}

impl FromStr for TableKind {
    type Err = RealmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entity" => Ok(TableKind::Entity),
            "item" => Ok(TableKind::Item),
            "event" => Ok(TableKind::Event),
            other => Err(RealmError::InvalidTable(other.to_string())),
        }
    }
}
