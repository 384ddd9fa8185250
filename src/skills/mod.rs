//! Skills and progression
//!
//! Every entity carries ten skills split into three groups. Survival skills
//! keep food and water topped up, gathering skills turn map resources into
//! items, and combat skills only advance when damage lands.

pub mod combat;
pub mod context;
pub mod experience;
pub mod groups;
pub mod harvest;
pub mod skill;

pub use combat::CombatStyle;
pub use context::{SkillContext, SkillOwner};
pub use experience::ExperienceCalculator;
pub use groups::{BasicSkills, CombatSkills, HarvestSkills, Packetizable, Skills, Updatable};
pub use harvest::{Adjacency, HarvestSpec};
pub use skill::{Skill, SkillKind, SkillPacket};
