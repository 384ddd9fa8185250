//! Subject-scoped projections of a snapshot
//!
//! A view owns no data. It holds the subject's rows (already memoized by
//! the snapshot) and computes each field at most once per snapshot, under a
//! key that includes the subject, the view and the field.
//!
//! [`GroupView::resolve`] looks a bare name up in a fixed order:
//!
//! 1. subject-local fields (`agents`, `size`)
//! 2. entity-table fields (`health`, `food`, `fishing_level`, ...)
//! 3. snapshot attributes (`tick`, `alive_agents`)
//!
//! Anything else is `UnknownField`.

use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::error::{RealmError, Result};
use crate::core::types::EntityId;
use crate::datastore::schema::{EntityField, EventCode, EventField, Field, ItemField, TableKind};
use crate::datastore::table::Table;
use crate::snapshot::cache::{CacheKey, CacheValue, ViewKind};
use crate::snapshot::game_state::GameState;
use crate::snapshot::subject::Subject;

/// Result of resolving a name against a group view
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Column(Arc<Vec<i64>>),
    Scalar(i64),
}

impl FieldValue {
    pub fn column(&self) -> Option<&[i64]> {
        match self {
            FieldValue::Column(col) => Some(col.as_slice()),
            FieldValue::Scalar(_) => None,
        }
    }

    pub fn scalar(&self) -> Option<i64> {
        match self {
            FieldValue::Scalar(v) => Some(*v),
            FieldValue::Column(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectField {
    Agents,
    Size,
}

impl SubjectField {
    pub const ALL: [SubjectField; 2] = [SubjectField::Agents, SubjectField::Size];

    pub fn name(&self) -> &'static str {
        match self {
            SubjectField::Agents => "agents",
            SubjectField::Size => "size",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotField {
    Tick,
    AliveAgents,
}

impl SnapshotField {
    pub const ALL: [SnapshotField; 2] = [SnapshotField::Tick, SnapshotField::AliveAgents];

    pub fn name(&self) -> &'static str {
        match self {
            SnapshotField::Tick => "tick",
            SnapshotField::AliveAgents => "alive_agents",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Rows of one table restricted to a subject, with cached field projection
pub struct TableView<'s, F: Field, O> {
    gs: &'s GameState<O>,
    subject: &'s Subject,
    view: ViewKind,
    rows: Arc<Table>,
    _field: PhantomData<F>,
}

pub type EntityView<'s, O> = TableView<'s, EntityField, O>;
pub type ItemView<'s, O> = TableView<'s, ItemField, O>;
pub type EventView<'s, O> = TableView<'s, EventField, O>;
/// Event rows narrowed to a single code
pub type EventCodeView<'s, O> = TableView<'s, EventField, O>;

impl<'s, F: Field, O> TableView<'s, F, O> {
    fn new(gs: &'s GameState<O>, subject: &'s Subject, view: ViewKind, rows: Arc<Table>) -> Self {
        Self {
            gs,
            subject,
            view,
            rows,
            _field: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn table(&self) -> &Table {
        &self.rows
    }

    /// One column, computed once per (subject, view, field)
    pub fn column(&self, field: F) -> Arc<Vec<i64>> {
        let key = CacheKey::Field {
            subject: self.subject.key(),
            view: self.view,
            field: field.name(),
        };
        let value = self
            .gs
            .cache()
            .get_or_insert_with(key, || CacheValue::Column(Arc::new(self.rows.column(field.col()))));

        match value {
            CacheValue::Column(col) => col,
            _ => Arc::new(self.rows.column(field.col())),
        }
    }

    /// Column by name
    pub fn field(&self, name: &str) -> Result<Arc<Vec<i64>>> {
        let field = F::from_name(name).ok_or_else(|| RealmError::UnknownField(name.to_string()))?;
        Ok(self.column(field))
    }
}

impl<'s, O> TableView<'s, EventField, O> {
    /// Narrow to events with code `name`
    ///
    /// Always narrows from the subject's full event rows, so chaining
    /// `code` calls selects rather than intersects.
    pub fn code(&self, name: &str) -> Result<EventCodeView<'s, O>> {
        let code = EventCode::from_str(name)?;
        Ok(self.code_of(code))
    }

    pub fn code_of(&self, code: EventCode) -> EventCodeView<'s, O> {
        let gs = self.gs;
        let subject = self.subject;
        let key = CacheKey::EventRows {
            code,
            subject: subject.key(),
        };
        let value = gs.cache().get_or_insert_with(key, || {
            let events = gs.rows_in_id(TableKind::Event, subject);
            let col = EventField::Event.col();
            CacheValue::Table(Arc::new(events.filter(|row| row[col] == code.value())))
        });

        let rows = match value {
            CacheValue::Table(table) => table,
            _ => Arc::new(Table::new(EventField::width())),
        };
        TableView::new(gs, subject, ViewKind::EventCode(code), rows)
    }
}

/// Entry point for querying a snapshot about one subject
pub struct GroupView<'s, O> {
    gs: &'s GameState<O>,
    subject: &'s Subject,
}

impl<'s, O> GroupView<'s, O> {
    pub fn new(gs: &'s GameState<O>, subject: &'s Subject) -> Self {
        Self { gs, subject }
    }

    pub fn subject(&self) -> &Subject {
        self.subject
    }

    pub fn state(&self) -> &GameState<O> {
        self.gs
    }

    pub fn entity(&self) -> EntityView<'s, O> {
        let rows = self.gs.rows_in_id(TableKind::Entity, self.subject);
        TableView::new(self.gs, self.subject, ViewKind::Entity, rows)
    }

    pub fn item(&self) -> ItemView<'s, O> {
        let rows = self.gs.rows_in_id(TableKind::Item, self.subject);
        TableView::new(self.gs, self.subject, ViewKind::Item, rows)
    }

    pub fn event(&self) -> EventView<'s, O> {
        let rows = self.gs.rows_in_id(TableKind::Event, self.subject);
        TableView::new(self.gs, self.subject, ViewKind::Event, rows)
    }

    /// Observations of the subject's agents that have one, in subject order
    pub fn obs(&self) -> Vec<(EntityId, &'s O)> {
        self.subject
            .agents()
            .iter()
            .filter_map(|id| self.gs.env_obs().get(id).map(|obs| (*id, obs)))
            .collect()
    }

    /// Look a bare name up: subject, then entity table, then snapshot
    pub fn resolve(&self, name: &str) -> Result<FieldValue> {
        if let Some(field) = SubjectField::from_name(name) {
            return Ok(match field {
                SubjectField::Agents => FieldValue::Column(Arc::new(
                    self.subject.agents().iter().map(|id| id.0 as i64).collect(),
                )),
                SubjectField::Size => FieldValue::Scalar(self.subject.len() as i64),
            });
        }

        if let Some(field) = EntityField::from_name(name) {
            return Ok(FieldValue::Column(self.entity().column(field)));
        }

        if let Some(field) = SnapshotField::from_name(name) {
            return Ok(match field {
                SnapshotField::Tick => FieldValue::Scalar(self.gs.tick() as i64),
                SnapshotField::AliveAgents => FieldValue::Column(Arc::new(
                    self.gs.alive_agents().iter().map(|id| id.0 as i64).collect(),
                )),
            });
        }

        Err(RealmError::UnknownField(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_tables_do_not_overlap() {
        for field in SubjectField::ALL {
            assert!(EntityField::from_name(field.name()).is_none());
        }
        for field in SnapshotField::ALL {
            assert!(EntityField::from_name(field.name()).is_none());
            assert!(SubjectField::from_name(field.name()).is_none());
        }
    }

    #[test]
    fn test_field_value_accessors() {
        let col = FieldValue::Column(Arc::new(vec![1, 2]));
        assert_eq!(col.column(), Some(&[1, 2][..]));
        assert_eq!(col.scalar(), None);
        assert_eq!(FieldValue::Scalar(4).scalar(), Some(4));
    }
}
