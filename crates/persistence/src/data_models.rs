// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to domain records.

use std::collections::BTreeSet;

use diesel::prelude::*;
use reflektion_domain::{
    Class, CoordinatorTarget, Department, DepartmentHead, Division, Faculty, Lab, LabScope,
    RollRange, Subject,
};

use crate::diesel_schema::{classes, department_heads, departments, divisions, faculty, labs, subjects};
use crate::error::PersistenceError;

/// Stored value of `faculty.coordinator_kind` for class coordinators.
pub const COORDINATOR_KIND_CLASS: &str = "class";
/// Stored value of `faculty.coordinator_kind` for division coordinators.
pub const COORDINATOR_KIND_DIVISION: &str = "division";

/// Splits a coordinator target into its stored `(kind, target)` columns.
#[must_use]
pub const fn coordinator_columns(
    target: Option<CoordinatorTarget>,
) -> (Option<&'static str>, Option<i64>) {
    match target {
        Some(CoordinatorTarget::Class(id)) => (Some(COORDINATOR_KIND_CLASS), Some(id)),
        Some(CoordinatorTarget::Division(id)) => (Some(COORDINATOR_KIND_DIVISION), Some(id)),
        None => (None, None),
    }
}

/// Splits a lab scope into its stored `(scope_class, scope_division)` columns.
#[must_use]
pub const fn scope_columns(scope: LabScope) -> (Option<i64>, Option<i64>) {
    match scope {
        LabScope::Class(id) => (Some(id), None),
        LabScope::Division(id) => (None, Some(id)),
    }
}

const fn flag(value: i32) -> bool {
    value != 0
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = departments)]
pub struct DepartmentRow {
    id: i64,
    name: String,
    code: String,
    is_active: i32,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            code: row.code,
            is_active: flag(row.is_active),
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = department_heads)]
pub struct DepartmentHeadRow {
    id: i64,
    name: String,
    email: String,
    employee_id: String,
    department_id: Option<i64>,
    management_enabled: i32,
}

impl From<DepartmentHeadRow> for DepartmentHead {
    fn from(row: DepartmentHeadRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            email: row.email,
            employee_id: row.employee_id,
            department: row.department_id,
            management_enabled: flag(row.management_enabled),
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = faculty)]
pub struct FacultyRow {
    pub id: i64,
    name: String,
    email: String,
    faculty_id: String,
    coordinator_kind: Option<String>,
    coordinator_target: Option<i64>,
}

impl FacultyRow {
    /// Builds the domain record, attaching the classes the member teaches.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` for an unknown
    /// coordinator kind.
    pub fn into_domain(self, assigned_classes: BTreeSet<i64>) -> Result<Faculty, PersistenceError> {
        let coordinator_for: Option<CoordinatorTarget> =
            match (self.coordinator_kind.as_deref(), self.coordinator_target) {
                (Some(COORDINATOR_KIND_CLASS), Some(id)) => Some(CoordinatorTarget::Class(id)),
                (Some(COORDINATOR_KIND_DIVISION), Some(id)) => {
                    Some(CoordinatorTarget::Division(id))
                }
                (None, None) => None,
                (kind, target) => {
                    return Err(PersistenceError::ReconstructionError(format!(
                        "faculty {} has coordinator kind {kind:?} with target {target:?}",
                        self.id
                    )));
                }
            };

        Ok(Faculty {
            id: Some(self.id),
            name: self.name,
            email: self.email,
            faculty_id: self.faculty_id,
            assigned_classes,
            coordinator_for,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = classes)]
pub struct ClassRow {
    pub id: i64,
    class_id: String,
    name: String,
    year: String,
    class_coordinator: Option<i64>,
}

impl ClassRow {
    /// Builds the domain record with its divisions in creation order.
    #[must_use]
    pub fn into_domain(self, divisions: Vec<i64>) -> Class {
        Class {
            id: Some(self.id),
            class_id: self.class_id,
            name: self.name,
            year: self.year,
            divisions,
            class_coordinator: self.class_coordinator,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = divisions)]
pub struct DivisionRow {
    id: i64,
    division_id: String,
    name: String,
    owner_class: i64,
    class_coordinator: Option<i64>,
}

impl From<DivisionRow> for Division {
    fn from(row: DivisionRow) -> Self {
        Self {
            id: Some(row.id),
            division_id: row.division_id,
            name: row.name,
            owner_class: row.owner_class,
            class_coordinator: row.class_coordinator,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = labs)]
pub struct LabRow {
    id: i64,
    lab_id: String,
    name: String,
    scope_class: Option<i64>,
    scope_division: Option<i64>,
    roll_start: i64,
    roll_end: i64,
}

impl TryFrom<LabRow> for Lab {
    type Error = PersistenceError;

    fn try_from(row: LabRow) -> Result<Self, Self::Error> {
        let id: i64 = row.id;
        let broken =
            |what: &str| PersistenceError::ReconstructionError(format!("lab {id} has {what}"));

        let scope: LabScope = match (row.scope_class, row.scope_division) {
            (Some(class), None) => LabScope::Class(class),
            (None, Some(division)) => LabScope::Division(division),
            _ => return Err(broken("an invalid scope")),
        };
        let start: u32 = u32::try_from(row.roll_start).map_err(|_| broken("a bad roll start"))?;
        let end: u32 = u32::try_from(row.roll_end).map_err(|_| broken("a bad roll end"))?;
        let range: RollRange = RollRange::new(start, end).map_err(|_| broken("an inverted range"))?;

        Ok(Self {
            id: Some(id),
            lab_id: row.lab_id,
            name: row.name,
            scope,
            range,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = subjects)]
pub struct SubjectRow {
    id: i64,
    subject_id: String,
    name: String,
    code: String,
    credits: i32,
    department_id: i64,
}

impl TryFrom<SubjectRow> for Subject {
    type Error = PersistenceError;

    fn try_from(row: SubjectRow) -> Result<Self, Self::Error> {
        let credits: u8 = u8::try_from(row.credits).map_err(|_| {
            PersistenceError::ReconstructionError(format!(
                "subject {} has {} credits",
                row.id, row.credits
            ))
        })?;

        Ok(Self {
            id: Some(row.id),
            subject_id: row.subject_id,
            name: row.name,
            code: row.code,
            credits,
            department: row.department_id,
        })
    }
}
