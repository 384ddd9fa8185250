//! Tile materials
//!
//! Every harvestable material has a depleted counterpart shown while the
//! tile regenerates. Fish depletes to plain water.

use serde::{Deserialize, Serialize};

use crate::entity::inventory::{ItemKind, ToolKind};
use crate::world::drop_table::DropTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Material {
    Void = 0,
    Water = 1,
    Grass = 2,
    Scrub = 3,
    Forest = 4,
    Stone = 5,
    Slag = 6,
    Ore = 7,
    Stump = 8,
    Tree = 9,
    Fragment = 10,
    Crystal = 11,
    Weeds = 12,
    Herb = 13,
    Fish = 14,
}

impl Material {
    pub const ALL: [Material; 15] = [
        Material::Void,
        Material::Water,
        Material::Grass,
        Material::Scrub,
        Material::Forest,
        Material::Stone,
        Material::Slag,
        Material::Ore,
        Material::Stump,
        Material::Tree,
        Material::Fragment,
        Material::Crystal,
        Material::Weeds,
        Material::Herb,
        Material::Fish,
    ];

    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Whether entities may stand on this material
    pub fn habitable(&self) -> bool {
        !matches!(
            self,
            Material::Void | Material::Water | Material::Fish | Material::Stone
        )
    }

    /// What the tile shows while depleted
    pub fn depleted(&self) -> Material {
        match self {
            Material::Forest => Material::Scrub,
            Material::Ore => Material::Slag,
            Material::Tree => Material::Stump,
            Material::Crystal => Material::Fragment,
            Material::Herb => Material::Weeds,
            Material::Fish => Material::Water,
            other => *other,
        }
    }

    /// Loot available from this material, None if it is not harvestable.
    ///
    /// Forest and water feed survival skills and drop no items.
    pub fn drop_table(&self) -> Option<DropTable> {
        match self {
            Material::Forest | Material::Water => Some(DropTable::empty()),
            Material::Fish => Some(DropTable::empty().with(ItemKind::Ration, 1.0)),
            Material::Herb => Some(DropTable::empty().with(ItemKind::Potion, 1.0)),
            Material::Ore => Some(DropTable::empty().with(ItemKind::Whetstone, 1.0)),
            Material::Tree => Some(DropTable::empty().with(ItemKind::Arrow, 1.0)),
            Material::Crystal => Some(DropTable::empty().with(ItemKind::Runes, 1.0)),
            _ => None,
        }
    }

    /// Tool whose level scales drops from this material
    pub fn tool(&self) -> Option<ToolKind> {
        match self {
            Material::Fish => Some(ToolKind::Rod),
            Material::Herb => Some(ToolKind::Gloves),
            Material::Ore => Some(ToolKind::Pickaxe),
            Material::Tree => Some(ToolKind::Axe),
            Material::Crystal => Some(ToolKind::Chisel),
            _ => None,
        }
    }
}
