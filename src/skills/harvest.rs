//! Resource harvesting shared by every gathering skill
//!
//! A harvest skill targets one material, found either on the owner's own
//! tile or on one of its four neighbors. Neighbors are scanned up, down,
//! left, right and the first harvestable match is the only tile touched.

use crate::core::types::{Direction, Position};
use crate::entity::resources::ResourcePool;
use crate::skills::context::{SkillContext, SkillOwner};
use crate::skills::skill::{Skill, SkillKind};
use crate::world::drop_table::DropTable;
use crate::world::material::Material;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    /// The owner must stand on the material
    Tile,
    /// Any of the four neighbors may hold the material
    Adjacent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestSpec {
    pub skill: SkillKind,
    pub material: Material,
    pub adjacency: Adjacency,
    pub deplete: bool,
}

impl HarvestSpec {
    const fn new(skill: SkillKind, material: Material, adjacency: Adjacency, deplete: bool) -> Self {
        Self {
            skill,
            material,
            adjacency,
            deplete,
        }
    }

    pub const WATER: Self = Self::new(SkillKind::Water, Material::Water, Adjacency::Adjacent, false);
    pub const FOOD: Self = Self::new(SkillKind::Food, Material::Forest, Adjacency::Tile, true);
    pub const FISHING: Self = Self::new(SkillKind::Fishing, Material::Fish, Adjacency::Adjacent, true);
    pub const HERBALISM: Self = Self::new(SkillKind::Herbalism, Material::Herb, Adjacency::Tile, true);
    pub const PROSPECTING: Self = Self::new(SkillKind::Prospecting, Material::Ore, Adjacency::Tile, true);
    pub const CARVING: Self = Self::new(SkillKind::Carving, Material::Tree, Adjacency::Tile, true);
    pub const ALCHEMY: Self = Self::new(SkillKind::Alchemy, Material::Crystal, Adjacency::Tile, true);

    /// Gathering rules per skill; None for combat skills
    pub fn for_skill(skill: SkillKind) -> Option<Self> {
        match skill {
            SkillKind::Water => Some(Self::WATER),
            SkillKind::Food => Some(Self::FOOD),
            SkillKind::Fishing => Some(Self::FISHING),
            SkillKind::Herbalism => Some(Self::HERBALISM),
            SkillKind::Prospecting => Some(Self::PROSPECTING),
            SkillKind::Carving => Some(Self::CARVING),
            SkillKind::Alchemy => Some(Self::ALCHEMY),
            SkillKind::Melee | SkillKind::Range | SkillKind::Mage => None,
        }
    }
}

/// Tile the owner would harvest from, if any
pub fn harvest_target(ctx: &SkillContext<'_>, pos: Position, spec: &HarvestSpec) -> Option<Position> {
    let matches = |p: Position| {
        ctx.map
            .tile(p)
            .map_or(false, |tile| tile.state == spec.material && tile.is_harvestable())
    };

    match spec.adjacency {
        Adjacency::Tile => matches(pos).then_some(pos),
        Adjacency::Adjacent => Direction::ALL
            .iter()
            .filter_map(|dir| pos.step(*dir))
            .find(|p| matches(*p)),
    }
}

/// Attempt one harvest. Returns true when a loot table was obtained.
pub fn harvest(
    skill: &mut Skill,
    spec: &HarvestSpec,
    ctx: &mut SkillContext<'_>,
    owner: &mut SkillOwner<'_>,
) -> bool {
    let Some(target) = harvest_target(ctx, owner.pos, spec) else {
        return false;
    };
    let Some(table) = ctx.map.harvest(target.row, target.col, spec.deplete) else {
        return false;
    };

    process_drops(skill, spec, &table, ctx, owner);
    true
}

/// Roll drops at the held tool's level, store what fits, then grant experience
fn process_drops(
    skill: &mut Skill,
    spec: &HarvestSpec,
    table: &DropTable,
    ctx: &mut SkillContext<'_>,
    owner: &mut SkillOwner<'_>,
) {
    let level = owner.equipment.tool_level(spec.material.tool());

    for drop in table.roll(&mut *ctx.rng, level) {
        if owner.inventory.receive(drop.kind, drop.level, ctx.item_ids) {
            ctx.events.harvest_item(owner.id, ctx.tick, drop.kind, drop.level);
        }
    }

    if spec.skill.is_survival() {
        return;
    }
    grant_xp(skill, spec.skill, ctx.config.progression.harvest_xp_scale, ctx, owner);
}

/// Add experience when progression is enabled, logging any level-up
pub fn grant_xp(
    skill: &mut Skill,
    kind: SkillKind,
    xp: f64,
    ctx: &mut SkillContext<'_>,
    owner: &SkillOwner<'_>,
) {
    let config = ctx.config;
    if !config.progression.enabled {
        return;
    }
    if let Some(level) = skill.add_xp(xp, &config.progression, ctx.calc) {
        ctx.events.level_up(owner.id, ctx.tick, kind, level);
    }
}

/// Food and water upkeep
///
/// The pool always drains first; a successful harvest then restores part
/// of it.
pub fn survival_update(
    skill: &mut Skill,
    spec: &HarvestSpec,
    ctx: &mut SkillContext<'_>,
    owner: &mut SkillOwner<'_>,
) {
    let config = ctx.config;
    let resource = &config.resource;
    if !resource.enabled {
        return;
    }
    let depletion = resource.depletion_rate;
    let restore = resource.restore_amount();

    pool_mut(spec.skill, owner).decrement(depletion);

    if !harvest(skill, spec, ctx, owner) {
        return;
    }

    pool_mut(spec.skill, owner).increment(restore);
    match spec.skill {
        SkillKind::Food => ctx.events.eat_food(owner.id, ctx.tick),
        _ => ctx.events.drink_water(owner.id, ctx.tick),
    }
}

fn pool_mut<'o>(skill: SkillKind, owner: &'o mut SkillOwner<'_>) -> &'o mut ResourcePool {
    match skill {
        SkillKind::Food => &mut owner.resources.food,
        _ => &mut owner.resources.water,
    }
}
