//! What a skill update may touch
//!
//! Skills live inside their entity, so the entity lends out its other parts
//! (position, inventory, equipment, resources) as a [`SkillOwner`] while the
//! realm lends the shared state as a [`SkillContext`].

use rand::RngCore;

use crate::core::config::RealmConfig;
use crate::core::types::{EntityId, Position, Tick};
use crate::datastore::store::EventLog;
use crate::entity::inventory::{Equipment, Inventory, ItemIds};
use crate::entity::resources::Resources;
use crate::skills::experience::ExperienceCalculator;
use crate::world::map::TileMap;

/// Realm-wide state borrowed for one entity's update
pub struct SkillContext<'a> {
    pub config: &'a RealmConfig,
    pub calc: &'a ExperienceCalculator,
    pub map: &'a mut TileMap,
    pub rng: &'a mut dyn RngCore,
    pub item_ids: &'a mut ItemIds,
    pub events: &'a mut EventLog,
    pub tick: Tick,
}

/// The skill owner's state, minus the skills themselves
pub struct SkillOwner<'a> {
    pub id: EntityId,
    pub pos: Position,
    pub inventory: &'a mut Inventory,
    pub equipment: &'a Equipment,
    pub resources: &'a mut Resources,
}
