//! Bounded survival pools: health, food and water

use serde::{Deserialize, Serialize};

use crate::core::config::ResourceConfig;

/// A level clamped to [0, max]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub val: u32,
    pub max: u32,
}

impl ResourcePool {
    /// Starts full
    pub fn full(max: u32) -> Self {
        Self { val: max, max }
    }

    pub fn increment(&mut self, amount: u32) {
        self.val = (self.val + amount).min(self.max);
    }

    pub fn decrement(&mut self, amount: u32) {
        self.val = self.val.saturating_sub(amount);
    }

    pub fn is_empty(&self) -> bool {
        self.val == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resources {
    pub health: ResourcePool,
    pub food: ResourcePool,
    pub water: ResourcePool,
}

impl Resources {
    pub fn new(config: &ResourceConfig) -> Self {
        Self {
            health: ResourcePool::full(config.health_max),
            food: ResourcePool::full(config.base),
            water: ResourcePool::full(config.base),
        }
    }

    /// Health upkeep, run after food and water have been settled for the tick
    pub fn update(&mut self, config: &ResourceConfig) {
        if !config.enabled {
            return;
        }

        if self.food.is_empty() || self.water.is_empty() {
            self.health.decrement(config.starvation_damage);
        } else {
            self.health.increment(config.health_regen);
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }
}
