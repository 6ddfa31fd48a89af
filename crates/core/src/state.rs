// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reflektion_domain::{
    Class, Department, DepartmentHead, Division, DomainError, EntityKind, Faculty, Lab, Subject,
};
use serde::{Deserialize, Serialize};

/// A snapshot of every record collection.
///
/// The state is read fresh from persistence immediately before a command
/// is applied; it is never cached across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub departments: Vec<Department>,
    pub department_heads: Vec<DepartmentHead>,
    pub faculty: Vec<Faculty>,
    pub classes: Vec<Class>,
    pub divisions: Vec<Division>,
    pub labs: Vec<Lab>,
    pub subjects: Vec<Subject>,
}

/// Generates a pair of lookup accessors for one collection.
macro_rules! lookup {
    ($get:ident, $get_mut:ident, $field:ident, $ty:ty, $kind:expr) => {
        /// Looks up a record by storage key.
        ///
        /// # Errors
        ///
        /// Returns `DomainError::NotFound` if no record has this key.
        pub fn $get(&self, id: i64) -> Result<&$ty, DomainError> {
            self.$field
                .iter()
                .find(|record| record.id == Some(id))
                .ok_or(DomainError::NotFound { kind: $kind, id })
        }

        pub(crate) fn $get_mut(&mut self, id: i64) -> Result<&mut $ty, DomainError> {
            self.$field
                .iter_mut()
                .find(|record| record.id == Some(id))
                .ok_or(DomainError::NotFound { kind: $kind, id })
        }
    };
}

impl State {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    lookup!(
        department,
        department_mut,
        departments,
        Department,
        EntityKind::Department
    );
    lookup!(
        department_head,
        department_head_mut,
        department_heads,
        DepartmentHead,
        EntityKind::DepartmentHead
    );
    lookup!(faculty_member, faculty_mut, faculty, Faculty, EntityKind::Faculty);
    lookup!(class, class_mut, classes, Class, EntityKind::Class);
    lookup!(division, division_mut, divisions, Division, EntityKind::Division);
    lookup!(lab, lab_mut, labs, Lab, EntityKind::Lab);

    /// Returns the divisions owned by a class, in creation order.
    pub fn divisions_of(&self, class: i64) -> impl Iterator<Item = &Division> {
        self.divisions.iter().filter(move |d| d.owner_class == class)
    }
}

/// A single record of any kind, as handed to persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Record {
    Department(Department),
    DepartmentHead(DepartmentHead),
    Faculty(Faculty),
    Class(Class),
    Division(Division),
    Lab(Lab),
    Subject(Subject),
}

impl Record {
    /// Returns the kind of this record.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Department(_) => EntityKind::Department,
            Self::DepartmentHead(_) => EntityKind::DepartmentHead,
            Self::Faculty(_) => EntityKind::Faculty,
            Self::Class(_) => EntityKind::Class,
            Self::Division(_) => EntityKind::Division,
            Self::Lab(_) => EntityKind::Lab,
            Self::Subject(_) => EntityKind::Subject,
        }
    }

    /// Returns the storage key, or `None` for an unpersisted record.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        match self {
            Self::Department(r) => r.id,
            Self::DepartmentHead(r) => r.id,
            Self::Faculty(r) => r.id,
            Self::Class(r) => r.id,
            Self::Division(r) => r.id,
            Self::Lab(r) => r.id,
            Self::Subject(r) => r.id,
        }
    }

    /// Returns the derived identifier of this record.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Department(r) => &r.code,
            Self::DepartmentHead(r) => &r.employee_id,
            Self::Faculty(r) => &r.faculty_id,
            Self::Class(r) => &r.class_id,
            Self::Division(r) => &r.division_id,
            Self::Lab(r) => &r.lab_id,
            Self::Subject(r) => &r.subject_id,
        }
    }
}

/// A write to be carried out by persistence.
///
/// Updates never touch derived identifiers; persistence writes only the
/// mutable columns of an updated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    Insert(Record),
    Update(Record),
    Delete { kind: EntityKind, id: i64 },
}

/// A description of what a transition did, for logs and responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The command name.
    pub name: String,
    /// Human-readable details.
    pub details: String,
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The mutations must be applied in order and as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The state after the transition. Inserted records carry `id: None`.
    pub new_state: State,
    /// The ordered writes that realize the transition.
    pub mutations: Vec<Mutation>,
    /// What happened.
    pub action: Action,
}

impl TransitionResult {
    /// Returns the first inserted record, if the transition created one.
    #[must_use]
    pub fn inserted(&self) -> Option<&Record> {
        self.mutations.iter().find_map(|m| match m {
            Mutation::Insert(record) => Some(record),
            _ => None,
        })
    }
}
