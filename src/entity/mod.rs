//! Entities and the groups that own them

pub mod entity;
pub mod group;
pub mod inventory;
pub mod npc;
pub mod player;
pub mod resources;
pub mod spawn;

pub use entity::{Action, Entity, EntityPacket};
pub use group::EntityGroup;
pub use inventory::{Equipment, Inventory, Item, ItemIds, ItemKind, Tool, ToolKind};
pub use npc::{AutonomousManager, NpcKind};
pub use player::{AgentLoader, PlayerManager, SequentialLoader};
pub use resources::{ResourcePool, Resources};
