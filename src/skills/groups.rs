//! Skill groups and the per-entity skill set
//!
//! An entity owns exactly one [`Skills`], which is composed of one of each
//! group. Groups expose two capabilities: they can be updated once per tick
//! and they can be packetized for observers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::config::ProgressionConfig;
use crate::skills::combat::CombatStyle;
use crate::skills::context::{SkillContext, SkillOwner};
use crate::skills::experience::ExperienceCalculator;
use crate::skills::harvest::{harvest, survival_update, HarvestSpec};
use crate::skills::skill::{Skill, SkillKind, SkillPacket};

pub trait Updatable {
    fn update(&mut self, ctx: &mut SkillContext<'_>, owner: &mut SkillOwner<'_>);
}

pub trait Packetizable {
    fn packet(&self) -> BTreeMap<&'static str, SkillPacket>;
}

/// Survival upkeep
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasicSkills {
    pub water: Skill,
    pub food: Skill,
}

impl BasicSkills {
    pub fn basic_level(&self) -> f64 {
        0.5 * (self.water.level() + self.food.level()) as f64
    }
}

impl Updatable for BasicSkills {
    fn update(&mut self, ctx: &mut SkillContext<'_>, owner: &mut SkillOwner<'_>) {
        survival_update(&mut self.water, &HarvestSpec::WATER, ctx, owner);
        survival_update(&mut self.food, &HarvestSpec::FOOD, ctx, owner);
    }
}

impl Packetizable for BasicSkills {
    fn packet(&self) -> BTreeMap<&'static str, SkillPacket> {
        BTreeMap::from([
            (SkillKind::Water.name(), self.water.packet()),
            (SkillKind::Food.name(), self.food.packet()),
        ])
    }
}

/// Discretionary gathering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestSkills {
    pub fishing: Skill,
    pub herbalism: Skill,
    pub prospecting: Skill,
    pub carving: Skill,
    pub alchemy: Skill,
}

impl HarvestSkills {
    pub fn harvest_level(&self) -> u32 {
        [
            &self.fishing,
            &self.herbalism,
            &self.prospecting,
            &self.carving,
            &self.alchemy,
        ]
        .iter()
        .map(|s| s.level())
        .max()
        .unwrap_or(1)
    }
}

impl Updatable for HarvestSkills {
    fn update(&mut self, ctx: &mut SkillContext<'_>, owner: &mut SkillOwner<'_>) {
        harvest(&mut self.fishing, &HarvestSpec::FISHING, ctx, owner);
        harvest(&mut self.herbalism, &HarvestSpec::HERBALISM, ctx, owner);
        harvest(&mut self.prospecting, &HarvestSpec::PROSPECTING, ctx, owner);
        harvest(&mut self.carving, &HarvestSpec::CARVING, ctx, owner);
        harvest(&mut self.alchemy, &HarvestSpec::ALCHEMY, ctx, owner);
    }
}

impl Packetizable for HarvestSkills {
    fn packet(&self) -> BTreeMap<&'static str, SkillPacket> {
        BTreeMap::from([
            (SkillKind::Fishing.name(), self.fishing.packet()),
            (SkillKind::Herbalism.name(), self.herbalism.packet()),
            (SkillKind::Prospecting.name(), self.prospecting.packet()),
            (SkillKind::Carving.name(), self.carving.packet()),
            (SkillKind::Alchemy.name(), self.alchemy.packet()),
        ])
    }
}

/// Combat styles; trained only through [`CombatSkills::apply_damage`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatSkills {
    pub melee: Skill,
    pub range: Skill,
    pub mage: Skill,
}

impl CombatSkills {
    pub fn style(&self, style: CombatStyle) -> &Skill {
        match style {
            CombatStyle::Melee => &self.melee,
            CombatStyle::Range => &self.range,
            CombatStyle::Mage => &self.mage,
        }
    }

    fn style_mut(&mut self, style: CombatStyle) -> &mut Skill {
        match style {
            CombatStyle::Melee => &mut self.melee,
            CombatStyle::Range => &mut self.range,
            CombatStyle::Mage => &mut self.mage,
        }
    }

    pub fn combat_level(&self) -> u32 {
        self.melee
            .level()
            .max(self.range.level())
            .max(self.mage.level())
    }

    /// Credit a damaging hit dealt with `style`. Returns the new level on level-up.
    pub fn apply_damage(
        &mut self,
        style: CombatStyle,
        progression: &ProgressionConfig,
        calc: &ExperienceCalculator,
    ) -> Option<u32> {
        if !progression.enabled {
            return None;
        }
        self.style_mut(style)
            .add_xp(progression.combat_xp_scale, progression, calc)
    }

    /// Set every style to `level`
    pub fn set_levels(&mut self, level: u32, calc: &ExperienceCalculator) {
        for style in CombatStyle::ALL {
            self.style_mut(style).set_exp_by_level(level, calc);
        }
    }
}

impl Updatable for CombatSkills {
    fn update(&mut self, _ctx: &mut SkillContext<'_>, _owner: &mut SkillOwner<'_>) {}
}

impl Packetizable for CombatSkills {
    fn packet(&self) -> BTreeMap<&'static str, SkillPacket> {
        BTreeMap::from([
            (SkillKind::Melee.name(), self.melee.packet()),
            (SkillKind::Range.name(), self.range.packet()),
            (SkillKind::Mage.name(), self.mage.packet()),
        ])
    }
}

/// Everything one entity knows how to do
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skills {
    pub basic: BasicSkills,
    pub harvest: HarvestSkills,
    pub combat: CombatSkills,
}

impl Skills {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: SkillKind) -> &Skill {
        match kind {
            SkillKind::Water => &self.basic.water,
            SkillKind::Food => &self.basic.food,
            SkillKind::Fishing => &self.harvest.fishing,
            SkillKind::Herbalism => &self.harvest.herbalism,
            SkillKind::Prospecting => &self.harvest.prospecting,
            SkillKind::Carving => &self.harvest.carving,
            SkillKind::Alchemy => &self.harvest.alchemy,
            SkillKind::Melee => &self.combat.melee,
            SkillKind::Range => &self.combat.range,
            SkillKind::Mage => &self.combat.mage,
        }
    }
}

impl Updatable for Skills {
    /// Survival first, then gathering. Combat has no per-tick work.
    fn update(&mut self, ctx: &mut SkillContext<'_>, owner: &mut SkillOwner<'_>) {
        self.basic.update(ctx, owner);
        self.harvest.update(ctx, owner);
        self.combat.update(ctx, owner);
    }
}

impl Packetizable for Skills {
    fn packet(&self) -> BTreeMap<&'static str, SkillPacket> {
        let mut data = self.basic.packet();
        data.extend(self.harvest.packet());
        data.extend(self.combat.packet());
        data
    }
}
