//! Live tables owned by the simulation
//!
//! The entity and item tables are rebuilt from the live groups at the end of
//! each tick. The event table is append-only for the whole episode.

use crate::core::types::{EntityId, Tick};
use crate::datastore::schema::{EntityField, EventCode, EventField, Field, ItemField};
use crate::datastore::table::Table;
use crate::entity::entity::Entity;
use crate::entity::inventory::ItemKind;
use crate::skills::combat::CombatStyle;
use crate::skills::skill::SkillKind;

/// Append-only event table
#[derive(Debug, Clone)]
pub struct EventLog {
    table: Table,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            table: Table::new(EventField::width()),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    fn record(&mut self, ent: EntityId, tick: Tick, code: EventCode, detail: EventDetail) {
        let mut row = [0i64; 8];
        row[EventField::EntId.col()] = ent.0 as i64;
        row[EventField::Tick.col()] = tick as i64;
        row[EventField::Event.col()] = code.value();
        row[EventField::Kind.col()] = detail.kind;
        row[EventField::Level.col()] = detail.level;
        row[EventField::Number.col()] = detail.number;
        row[EventField::TargetEnt.col()] = detail.target;
        row[EventField::Damage.col()] = detail.damage;
        self.table.push_row(&row);
    }

    pub fn eat_food(&mut self, ent: EntityId, tick: Tick) {
        self.record(ent, tick, EventCode::EatFood, EventDetail::default());
    }

    pub fn drink_water(&mut self, ent: EntityId, tick: Tick) {
        self.record(ent, tick, EventCode::DrinkWater, EventDetail::default());
    }

    pub fn harvest_item(&mut self, ent: EntityId, tick: Tick, kind: ItemKind, level: u32) {
        let detail = EventDetail {
            kind: kind.index() as i64,
            level: level as i64,
            number: 1,
            ..EventDetail::default()
        };
        self.record(ent, tick, EventCode::HarvestItem, detail);
    }

    pub fn level_up(&mut self, ent: EntityId, tick: Tick, skill: SkillKind, level: u32) {
        let detail = EventDetail {
            kind: skill.index() as i64,
            level: level as i64,
            ..EventDetail::default()
        };
        self.record(ent, tick, EventCode::LevelUp, detail);
    }

    pub fn score_hit(
        &mut self,
        ent: EntityId,
        tick: Tick,
        target: EntityId,
        style: CombatStyle,
        damage: u32,
    ) {
        let detail = EventDetail {
            kind: style.index() as i64,
            target: target.0 as i64,
            damage: damage as i64,
            ..EventDetail::default()
        };
        self.record(ent, tick, EventCode::ScoreHit, detail);
    }

    pub fn player_kill(&mut self, ent: EntityId, tick: Tick, target: EntityId, target_level: u32) {
        let detail = EventDetail {
            level: target_level as i64,
            target: target.0 as i64,
            ..EventDetail::default()
        };
        self.record(ent, tick, EventCode::PlayerKill, detail);
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct EventDetail {
    kind: i64,
    level: i64,
    number: i64,
    target: i64,
    damage: i64,
}

/// The live entity, item and event tables
#[derive(Debug, Clone)]
pub struct Datastore {
    entity: Table,
    item: Table,
    pub events: EventLog,
}

impl Default for Datastore {
    fn default() -> Self {
        Self::new()
    }
}

impl Datastore {
    pub fn new() -> Self {
        Self {
            entity: Table::new(EntityField::width()),
            item: Table::new(ItemField::width()),
            events: EventLog::new(),
        }
    }

    pub fn entity_table(&self) -> &Table {
        &self.entity
    }

    pub fn item_table(&self) -> &Table {
        &self.item
    }

    pub fn event_table(&self) -> &Table {
        self.events.table()
    }

    pub fn reset(&mut self) {
        self.entity.clear();
        self.item.clear();
        self.events.clear();
    }

    /// Rebuild entity and item rows from the live entities, in iteration order
    pub fn sync<'a>(&mut self, entities: impl Iterator<Item = &'a Entity>) {
        self.entity.clear();
        self.item.clear();

        for entity in entities {
            self.entity.push_row(&entity.to_row());
            for item in entity.inventory.items() {
                let mut row = [0i64; 5];
                row[ItemField::Id.col()] = item.id as i64;
                row[ItemField::OwnerId.col()] = entity.id.0 as i64;
                row[ItemField::Kind.col()] = item.kind.index() as i64;
                row[ItemField::Level.col()] = item.level as i64;
                row[ItemField::Quantity.col()] = item.quantity as i64;
                self.item.push_row(&row);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_rows() {
        let mut log = EventLog::new();
        log.eat_food(EntityId(1), 3);
        log.score_hit(EntityId(2), 4, EntityId(-1), CombatStyle::Range, 7);

        assert_eq!(log.len(), 2);
        let hit = log.table().row(1).unwrap();
        assert_eq!(hit[EventField::EntId.col()], 2);
        assert_eq!(hit[EventField::Tick.col()], 4);
        assert_eq!(hit[EventField::Event.col()], EventCode::ScoreHit.value());
        assert_eq!(hit[EventField::TargetEnt.col()], -1);
        assert_eq!(hit[EventField::Damage.col()], 7);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = Datastore::new();
        store.events.drink_water(EntityId(1), 0);
        store.reset();
        assert!(store.event_table().is_empty());
        assert!(store.entity_table().is_empty());
    }
}
