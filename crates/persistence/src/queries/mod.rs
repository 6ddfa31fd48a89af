// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read queries.
//!
//! Collections are returned ordered by storage key, which is creation order.

use std::collections::{BTreeMap, BTreeSet};

use diesel::SqliteConnection;
use diesel::prelude::*;
use reflektion::State;
use reflektion_domain::{
    Class, Department, DepartmentHead, Division, Faculty, Lab, LabScope, Subject,
};
use tracing::debug;

use crate::data_models::{
    ClassRow, DepartmentHeadRow, DepartmentRow, DivisionRow, FacultyRow, LabRow, SubjectRow,
};
use crate::diesel_schema::{
    classes, department_heads, departments, divisions, faculty, faculty_classes, labs, subjects,
};
use crate::error::PersistenceError;

/// Lists every department.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_departments(conn: &mut SqliteConnection) -> Result<Vec<Department>, PersistenceError> {
    let rows: Vec<DepartmentRow> = departments::table
        .order(departments::id.asc())
        .select(DepartmentRow::as_select())
        .load(conn)?;
    debug!(count = rows.len(), "Loaded departments");
    Ok(rows.into_iter().map(Department::from).collect())
}

/// Lists every department head.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_department_heads(
    conn: &mut SqliteConnection,
) -> Result<Vec<DepartmentHead>, PersistenceError> {
    let rows: Vec<DepartmentHeadRow> = department_heads::table
        .order(department_heads::id.asc())
        .select(DepartmentHeadRow::as_select())
        .load(conn)?;
    debug!(count = rows.len(), "Loaded department heads");
    Ok(rows.into_iter().map(DepartmentHead::from).collect())
}

/// Lists every faculty member with their teaching assignments.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_faculty(conn: &mut SqliteConnection) -> Result<Vec<Faculty>, PersistenceError> {
    let rows: Vec<FacultyRow> = faculty::table
        .order(faculty::id.asc())
        .select(FacultyRow::as_select())
        .load(conn)?;
    let links: Vec<(i64, i64)> = faculty_classes::table
        .select((faculty_classes::faculty_ref, faculty_classes::class_ref))
        .load(conn)?;

    let mut assigned: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
    for (member, class) in links {
        assigned.entry(member).or_default().insert(class);
    }

    debug!(count = rows.len(), "Loaded faculty");
    rows.into_iter()
        .map(|row| {
            let classes: BTreeSet<i64> = assigned.remove(&row.id).unwrap_or_default();
            row.into_domain(classes)
        })
        .collect()
}

/// Lists every class with its divisions.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_classes(conn: &mut SqliteConnection) -> Result<Vec<Class>, PersistenceError> {
    let rows: Vec<ClassRow> = classes::table
        .order(classes::id.asc())
        .select(ClassRow::as_select())
        .load(conn)?;
    let owned: Vec<(i64, i64)> = divisions::table
        .order(divisions::id.asc())
        .select((divisions::owner_class, divisions::id))
        .load(conn)?;

    let mut by_class: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    for (class, division) in owned {
        by_class.entry(class).or_default().push(division);
    }

    debug!(count = rows.len(), "Loaded classes");
    Ok(rows
        .into_iter()
        .map(|row| {
            let divisions: Vec<i64> = by_class.remove(&row.id).unwrap_or_default();
            row.into_domain(divisions)
        })
        .collect())
}

/// Lists every division, or only the divisions of one class.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_divisions(
    conn: &mut SqliteConnection,
    owner_class: Option<i64>,
) -> Result<Vec<Division>, PersistenceError> {
    let mut query = divisions::table
        .order(divisions::id.asc())
        .select(DivisionRow::as_select())
        .into_boxed();
    if let Some(class) = owner_class {
        query = query.filter(divisions::owner_class.eq(class));
    }

    let rows: Vec<DivisionRow> = query.load(conn)?;
    debug!(count = rows.len(), ?owner_class, "Loaded divisions");
    Ok(rows.into_iter().map(Division::from).collect())
}

/// Lists every lab, or only the labs in one scope.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_labs(
    conn: &mut SqliteConnection,
    scope: Option<LabScope>,
) -> Result<Vec<Lab>, PersistenceError> {
    let mut query = labs::table
        .order(labs::id.asc())
        .select(LabRow::as_select())
        .into_boxed();
    match scope {
        Some(LabScope::Class(class)) => query = query.filter(labs::scope_class.eq(class)),
        Some(LabScope::Division(division)) => {
            query = query.filter(labs::scope_division.eq(division));
        }
        None => {}
    }

    let rows: Vec<LabRow> = query.load(conn)?;
    debug!(count = rows.len(), ?scope, "Loaded labs");
    rows.into_iter().map(Lab::try_from).collect()
}

/// Lists every subject.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_subjects(conn: &mut SqliteConnection) -> Result<Vec<Subject>, PersistenceError> {
    let rows: Vec<SubjectRow> = subjects::table
        .order(subjects::id.asc())
        .select(SubjectRow::as_select())
        .load(conn)?;
    debug!(count = rows.len(), "Loaded subjects");
    rows.into_iter().map(Subject::try_from).collect()
}

/// Loads a complete snapshot of every collection.
///
/// All collections are read inside one transaction so they agree with
/// each other.
///
/// # Errors
///
/// Returns an error if any query fails.
pub fn load_state(conn: &mut SqliteConnection) -> Result<State, PersistenceError> {
    conn.transaction::<State, PersistenceError, _>(|conn| {
        Ok(State {
            departments: list_departments(conn)?,
            department_heads: list_department_heads(conn)?,
            faculty: list_faculty(conn)?,
            classes: list_classes(conn)?,
            divisions: list_divisions(conn, None)?,
            labs: list_labs(conn, None)?,
            subjects: list_subjects(conn)?,
        })
    })
}
