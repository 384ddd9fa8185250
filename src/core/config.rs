//! Realm configuration with documented constants
//!
//! All tunables live here, grouped by the system they drive. Every group
//! deserializes with defaults so a TOML file only needs the keys it changes:
//!
//! ```toml
//! seed = 7
//!
//! [map]
//! center = 32
//! border = 8
//! size = 48
//!
//! [population]
//! player_n = 4
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{RealmError, Result};
use crate::world::material::Material;

/// Top-level configuration for one realm
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RealmConfig {
    /// Seed for the realm's deterministic RNG
    pub seed: u64,
    pub map: MapConfig,
    pub population: PopulationConfig,
    pub resource: ResourceConfig,
    pub progression: ProgressionConfig,
    pub regen: RegenConfig,
    /// Item slots per entity inventory
    pub inventory_capacity: usize,
}

impl Default for RealmConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            map: MapConfig::default(),
            population: PopulationConfig::default(),
            resource: ResourceConfig::default(),
            progression: ProgressionConfig::default(),
            regen: RegenConfig::default(),
            inventory_capacity: 12,
        }
    }
}

// === MAP ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Side length of the full square grid, padding included
    pub size: usize,
    /// Side length of the play area
    pub center: usize,
    /// Width of the void padding around the play area
    ///
    /// Must exceed `vision_radius` so observations never index off-grid.
    pub border: usize,
    /// How far an agent sees (tiles)
    pub vision_radius: usize,
    /// When false the whole play area is flat grass
    pub terrain_enabled: bool,
    /// Derive materials from the fractal heightmap instead of the raw material grid
    pub reset_from_fractal: bool,
    /// Replace stone with grass after generation
    pub disable_stone: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: 80,
            center: 64,
            border: 8,
            vision_radius: 7,
            terrain_enabled: true,
            reset_from_fractal: true,
            disable_stone: false,
        }
    }
}

// === POPULATION ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of player slots, ids 1..=player_n
    pub player_n: usize,
    pub npc_enabled: bool,
    /// Autonomous population target
    pub npc_n: usize,
    /// Placement attempts per spawn pass
    ///
    /// Bounds the work done refilling the population in a single tick.
    /// Failed placements (blocked or uninhabitable tile) still use an attempt.
    pub npc_spawn_attempts: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            player_n: 8,
            npc_enabled: true,
            npc_n: 16,
            npc_spawn_attempts: 8,
        }
    }
}

// === RESOURCES ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub enabled: bool,
    /// Maximum food and water
    pub base: u32,
    /// Food and water lost every tick
    pub depletion_rate: u32,
    /// Share of `base` restored by a successful eat or drink
    pub harvest_restore_fraction: f32,
    /// Maximum health
    pub health_max: u32,
    /// Health lost per tick while food or water is empty
    pub starvation_damage: u32,
    /// Health regained per tick while food and water are both non-empty
    pub health_regen: u32,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base: 100,
            depletion_rate: 5,
            harvest_restore_fraction: 0.5,
            health_max: 100,
            starvation_damage: 10,
            health_regen: 1,
        }
    }
}

impl ResourceConfig {
    /// Amount restored by one successful eat or drink
    pub fn restore_amount(&self) -> u32 {
        (self.base as f32 * self.harvest_restore_fraction).floor() as u32
    }
}

// === PROGRESSION ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub enabled: bool,
    /// Multiplier applied to every experience grant
    pub base_xp_scale: f64,
    /// Experience per successful discretionary harvest
    pub harvest_xp_scale: f64,
    /// Experience per damaging hit
    pub combat_xp_scale: f64,
    /// Level cap
    pub level_max: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_xp_scale: 1.0,
            harvest_xp_scale: 10.0,
            combat_xp_scale: 4.0,
            level_max: 10,
        }
    }
}

// === TILE REGENERATION ===

/// Ticks a depleted resource tile needs before it can be harvested again
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegenConfig {
    pub forest: u32,
    pub fish: u32,
    pub herb: u32,
    pub ore: u32,
    pub tree: u32,
    pub crystal: u32,
}

impl Default for RegenConfig {
    fn default() -> Self {
        Self {
            forest: 40,
            fish: 40,
            herb: 40,
            ore: 80,
            tree: 80,
            crystal: 80,
        }
    }
}

impl RegenConfig {
    /// Regeneration ticks for a harvestable material, 0 for everything else
    pub fn ticks_for(&self, material: Material) -> u32 {
        match material {
            Material::Forest => self.forest,
            Material::Fish => self.fish,
            Material::Herb => self.herb,
            Material::Ore => self.ore,
            Material::Tree => self.tree,
            Material::Crystal => self.crystal,
            _ => 0,
        }
    }
}

impl RealmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: RealmConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let map = &self.map;
        if map.border <= map.vision_radius {
            return Err(RealmError::InvalidConfig(format!(
                "map.border ({}) must be greater than map.vision_radius ({})",
                map.border, map.vision_radius
            )));
        }

        if map.center + 2 * map.border != map.size {
            return Err(RealmError::InvalidConfig(format!(
                "map.size ({}) must equal map.center ({}) + 2 * map.border ({})",
                map.size, map.center, map.border
            )));
        }

        let fraction = self.resource.harvest_restore_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(RealmError::InvalidConfig(format!(
                "resource.harvest_restore_fraction ({}) must be in (0, 1]",
                fraction
            )));
        }

        if self.progression.level_max == 0 {
            return Err("progression.level_max must be at least 1".into());
        }

        Ok(())
    }
}

impl From<&str> for RealmError {
    fn from(msg: &str) -> Self {
        RealmError::InvalidConfig(msg.to_string())
    }
}
