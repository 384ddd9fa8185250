//! Combat styles and their cyclic strength relation
//!
//! Damage itself is resolved elsewhere. This module only answers which
//! style beats which, and maps a style to the skill it trains.

use serde::{Deserialize, Serialize};

use crate::skills::skill::SkillKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CombatStyle {
    Melee = 1,
    Range = 2,
    Mage = 3,
}

impl CombatStyle {
    pub const ALL: [CombatStyle; 3] = [CombatStyle::Melee, CombatStyle::Range, CombatStyle::Mage];

    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// The style this one is weak against
    ///
    /// Melee loses to Mage, Range loses to Melee, Mage loses to Range.
    pub fn weakness(&self) -> CombatStyle {
        match self {
            CombatStyle::Melee => CombatStyle::Mage,
            CombatStyle::Range => CombatStyle::Melee,
            CombatStyle::Mage => CombatStyle::Range,
        }
    }

    /// True when `self` has the advantage over `other`
    pub fn beats(&self, other: CombatStyle) -> bool {
        other.weakness() == *self
    }

    pub fn skill(&self) -> SkillKind {
        match self {
            CombatStyle::Melee => SkillKind::Melee,
            CombatStyle::Range => SkillKind::Range,
            CombatStyle::Mage => SkillKind::Mage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        assert!(CombatStyle::Mage.beats(CombatStyle::Melee));
        assert!(CombatStyle::Melee.beats(CombatStyle::Range));
        assert!(CombatStyle::Range.beats(CombatStyle::Mage));
    }

    #[test]
    fn test_relation_is_antisymmetric() {
        for a in CombatStyle::ALL {
            assert!(!a.beats(a));
            for b in CombatStyle::ALL {
                assert!(!(a.beats(b) && b.beats(a)));
            }
        }
    }

    #[test]
    fn test_every_style_beats_exactly_one() {
        for a in CombatStyle::ALL {
            let wins = CombatStyle::ALL.iter().filter(|b| a.beats(**b)).count();
            assert_eq!(wins, 1);
        }
    }
}
