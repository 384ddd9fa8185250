//! Named sets of agents that scope snapshot queries

use std::sync::Arc;

use indexmap::IndexSet;

use crate::core::types::EntityId;

/// Identity of a subject inside cache keys: its name plus its exact members
pub type SubjectKey = Arc<(String, Vec<EntityId>)>;

/// A named, ordered set of agent ids
///
/// Two subjects with the same name but different members are distinct
/// cache identities, so a team that loses a member never sees rows cached
/// for its old roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject {
    key: SubjectKey,
}

impl Subject {
    /// Members keep their given order; duplicates after the first are dropped
    pub fn new(name: impl Into<String>, agents: impl IntoIterator<Item = EntityId>) -> Self {
        let agents: IndexSet<EntityId> = agents.into_iter().collect();
        Self {
            key: Arc::new((name.into(), agents.into_iter().collect())),
        }
    }

    /// A subject holding a single agent, named after it
    pub fn single(id: EntityId) -> Self {
        Self::new(format!("agent_{}", id), [id])
    }

    pub fn name(&self) -> &str {
        &self.key.0
    }

    pub fn agents(&self) -> &[EntityId] {
        &self.key.1
    }

    pub fn len(&self) -> usize {
        self.key.1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.1.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.key.1.contains(&id)
    }

    pub fn key(&self) -> SubjectKey {
        Arc::clone(&self.key)
    }
}
