//! A single skill: accumulated experience and the level derived from it

use serde::{Deserialize, Serialize};

use crate::core::config::ProgressionConfig;
use crate::skills::experience::ExperienceCalculator;

/// Every skill an entity owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum SkillKind {
    Water = 1,
    Food = 2,
    Fishing = 3,
    Herbalism = 4,
    Prospecting = 5,
    Carving = 6,
    Alchemy = 7,
    Melee = 8,
    Range = 9,
    Mage = 10,
}

impl SkillKind {
    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            SkillKind::Water => "water",
            SkillKind::Food => "food",
            SkillKind::Fishing => "fishing",
            SkillKind::Herbalism => "herbalism",
            SkillKind::Prospecting => "prospecting",
            SkillKind::Carving => "carving",
            SkillKind::Alchemy => "alchemy",
            SkillKind::Melee => "melee",
            SkillKind::Range => "range",
            SkillKind::Mage => "mage",
        }
    }

    /// Upkeep skills never earn experience
    pub fn is_survival(&self) -> bool {
        matches!(self, SkillKind::Water | SkillKind::Food)
    }
}

/// Serializable view of one skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillPacket {
    pub exp: f64,
    pub level: u32,
}

/// Experience only grows; level is always `level_at_exp(exp)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    exp: f64,
    level: u32,
}

impl Default for Skill {
    fn default() -> Self {
        Self::new()
    }
}

impl Skill {
    pub fn new() -> Self {
        Self { exp: 0.0, level: 1 }
    }

    pub fn exp(&self) -> f64 {
        self.exp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Grant experience scaled by the base multiplier.
    ///
    /// Returns the new level when it went up.
    pub fn add_xp(
        &mut self,
        xp: f64,
        progression: &ProgressionConfig,
        calc: &ExperienceCalculator,
    ) -> Option<u32> {
        let gained = xp * progression.base_xp_scale;
        if gained <= 0.0 {
            return None;
        }

        let before = self.level;
        self.exp += gained;
        self.level = calc.level_at_exp(self.exp);
        (self.level > before).then_some(self.level)
    }

    /// Jump straight to `level`, used when an entity is created
    pub fn set_exp_by_level(&mut self, level: u32, calc: &ExperienceCalculator) {
        self.exp = calc.exp_at_level(level);
        self.level = calc.level_at_exp(self.exp);
    }

    pub fn packet(&self) -> SkillPacket {
        SkillPacket {
            exp: self.exp,
            level: self.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_skill_is_level_one() {
        let skill = Skill::new();
        assert_eq!(skill.level(), 1);
        assert_eq!(skill.exp(), 0.0);
    }

    #[test]
    fn test_add_xp_reports_level_up() {
        let calc = ExperienceCalculator::new(10);
        let progression = ProgressionConfig::default();
        let mut skill = Skill::new();

        assert_eq!(skill.add_xp(80.0, &progression, &calc), None);
        assert_eq!(skill.add_xp(3.0, &progression, &calc), Some(2));
        assert_eq!(skill.level(), 2);
    }

    #[test]
    fn test_base_scale_applies() {
        let calc = ExperienceCalculator::new(10);
        let progression = ProgressionConfig {
            base_xp_scale: 2.0,
            ..ProgressionConfig::default()
        };
        let mut skill = Skill::new();
        skill.add_xp(10.0, &progression, &calc);
        assert_eq!(skill.exp(), 20.0);
    }

    #[test]
    fn test_negative_xp_is_ignored() {
        let calc = ExperienceCalculator::new(10);
        let progression = ProgressionConfig::default();
        let mut skill = Skill::new();
        skill.add_xp(10.0, &progression, &calc);
        skill.add_xp(-5.0, &progression, &calc);
        assert_eq!(skill.exp(), 10.0);
    }

    #[test]
    fn test_set_by_level() {
        let calc = ExperienceCalculator::new(10);
        let mut skill = Skill::new();
        skill.set_exp_by_level(4, &calc);
        assert_eq!(skill.level(), 4);
        assert_eq!(skill.exp(), calc.exp_at_level(4));
    }
}
