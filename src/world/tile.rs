//! A single map cell

use crate::core::types::{EntityId, Position};
use crate::world::drop_table::DropTable;
use crate::world::material::Material;

#[derive(Debug, Clone)]
pub struct Tile {
    pub pos: Position,
    /// Material assigned at map load
    pub material: Material,
    /// Material currently shown (differs from `material` while depleted)
    pub state: Material,
    /// Fixed at map load; depletion never changes it
    pub habitable: bool,
    pub depleted: bool,
    /// Ticks left until a depleted tile is restored
    pub regen_countdown: u32,
    occupants: Vec<EntityId>,
}

impl Tile {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            material: Material::Void,
            state: Material::Void,
            habitable: false,
            depleted: false,
            regen_countdown: 0,
            occupants: Vec::new(),
        }
    }

    /// Re-initialize in place for a new episode
    pub fn reset(&mut self, material: Material) {
        self.material = material;
        self.state = material;
        self.habitable = material.habitable();
        self.depleted = false;
        self.regen_countdown = 0;
        self.occupants.clear();
    }

    pub fn is_harvestable(&self) -> bool {
        !self.depleted && self.state.drop_table().is_some()
    }

    /// Take the loot table, optionally depleting the tile for `regen_ticks`
    pub fn harvest(&mut self, deplete: bool, regen_ticks: u32) -> Option<DropTable> {
        if self.depleted {
            return None;
        }
        let table = self.state.drop_table()?;

        if deplete {
            self.depleted = true;
            self.state = self.material.depleted();
            self.regen_countdown = regen_ticks;
        }

        Some(table)
    }

    /// Advance regeneration by one tick. Returns true when the tile was restored.
    pub fn step(&mut self) -> bool {
        if !self.depleted {
            return false;
        }

        self.regen_countdown = self.regen_countdown.saturating_sub(1);
        if self.regen_countdown == 0 {
            self.depleted = false;
            self.state = self.material;
            return true;
        }
        false
    }

    pub fn occupants(&self) -> &[EntityId] {
        &self.occupants
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    pub fn add_entity(&mut self, id: EntityId) {
        if !self.occupants.contains(&id) {
            self.occupants.push(id);
        }
    }

    pub fn remove_entity(&mut self, id: EntityId) {
        self.occupants.retain(|&e| e != id);
    }
}
