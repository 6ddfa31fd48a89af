// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Updates write only the mutable columns of a record. Derived identifiers
//! are set once on insert and never rewritten.

use std::collections::BTreeSet;

use diesel::SqliteConnection;
use diesel::prelude::*;
use reflektion::{Mutation, Record};
use reflektion_domain::EntityKind;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{coordinator_columns, scope_columns};
use crate::diesel_schema::{
    classes, department_heads, departments, divisions, faculty, faculty_classes, labs, subjects,
};
use crate::error::PersistenceError;

/// Returns the table that stores records of `kind`.
#[must_use]
pub const fn table_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Department => "departments",
        EntityKind::DepartmentHead => "department_heads",
        EntityKind::Faculty => "faculty",
        EntityKind::Class => "classes",
        EntityKind::Division => "divisions",
        EntityKind::Lab => "labs",
        EntityKind::Subject => "subjects",
    }
}

/// Rewrites the teaching assignments of one faculty member.
fn replace_faculty_classes(
    conn: &mut SqliteConnection,
    member: i64,
    assigned: &BTreeSet<i64>,
) -> Result<(), PersistenceError> {
    diesel::delete(faculty_classes::table.filter(faculty_classes::faculty_ref.eq(member)))
        .execute(conn)?;

    let rows: Vec<_> = assigned
        .iter()
        .map(|class| {
            (
                faculty_classes::faculty_ref.eq(member),
                faculty_classes::class_ref.eq(*class),
            )
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(faculty_classes::table)
            .values(&rows)
            .execute(conn)?;
    }
    Ok(())
}

/// Inserts a new record and returns its storage key.
///
/// # Errors
///
/// Returns `PersistenceError::AlreadyPersisted` if the record already has a
/// key, `PersistenceError::DuplicateIdentifier` if a unique constraint
/// rejects it, or another error if the insert fails.
pub fn insert_record(conn: &mut SqliteConnection, record: &Record) -> Result<i64, PersistenceError> {
    let table: &'static str = table_name(record.kind());
    if let Some(id) = record.id() {
        return Err(PersistenceError::AlreadyPersisted { table, id });
    }

    match record {
        Record::Department(r) => diesel::insert_into(departments::table)
            .values((
                departments::name.eq(&r.name),
                departments::code.eq(&r.code),
                departments::is_active.eq(i32::from(r.is_active)),
            ))
            .execute(conn)?,
        Record::DepartmentHead(r) => diesel::insert_into(department_heads::table)
            .values((
                department_heads::name.eq(&r.name),
                department_heads::email.eq(&r.email),
                department_heads::employee_id.eq(&r.employee_id),
                department_heads::department_id.eq(r.department),
                department_heads::management_enabled.eq(i32::from(r.management_enabled)),
            ))
            .execute(conn)?,
        Record::Faculty(r) => {
            let (kind, target) = coordinator_columns(r.coordinator_for);
            diesel::insert_into(faculty::table)
                .values((
                    faculty::name.eq(&r.name),
                    faculty::email.eq(&r.email),
                    faculty::faculty_id.eq(&r.faculty_id),
                    faculty::coordinator_kind.eq(kind),
                    faculty::coordinator_target.eq(target),
                ))
                .execute(conn)?
        }
        Record::Class(r) => diesel::insert_into(classes::table)
            .values((
                classes::class_id.eq(&r.class_id),
                classes::name.eq(&r.name),
                classes::year.eq(&r.year),
                classes::class_coordinator.eq(r.class_coordinator),
            ))
            .execute(conn)?,
        Record::Division(r) => diesel::insert_into(divisions::table)
            .values((
                divisions::division_id.eq(&r.division_id),
                divisions::name.eq(&r.name),
                divisions::owner_class.eq(r.owner_class),
                divisions::class_coordinator.eq(r.class_coordinator),
            ))
            .execute(conn)?,
        Record::Lab(r) => {
            let (scope_class, scope_division) = scope_columns(r.scope);
            diesel::insert_into(labs::table)
                .values((
                    labs::lab_id.eq(&r.lab_id),
                    labs::name.eq(&r.name),
                    labs::scope_class.eq(scope_class),
                    labs::scope_division.eq(scope_division),
                    labs::roll_start.eq(i64::from(r.range.start())),
                    labs::roll_end.eq(i64::from(r.range.end())),
                ))
                .execute(conn)?
        }
        Record::Subject(r) => diesel::insert_into(subjects::table)
            .values((
                subjects::subject_id.eq(&r.subject_id),
                subjects::name.eq(&r.name),
                subjects::code.eq(&r.code),
                subjects::credits.eq(i32::from(r.credits)),
                subjects::department_id.eq(r.department),
            ))
            .execute(conn)?,
    };

    let id: i64 = conn.get_last_insert_rowid()?;

    if let Record::Faculty(r) = record {
        replace_faculty_classes(conn, id, &r.assigned_classes)?;
    }

    info!(table, id, identifier = record.identifier(), "Inserted record");
    Ok(id)
}

/// Writes the mutable columns of an existing record.
///
/// # Errors
///
/// Returns `PersistenceError::MissingKey` if the record has no key,
/// `PersistenceError::RecordNotFound` if no row has that key, or another
/// error if the update fails.
pub fn update_record(conn: &mut SqliteConnection, record: &Record) -> Result<(), PersistenceError> {
    let table: &'static str = table_name(record.kind());
    let id: i64 = record.id().ok_or(PersistenceError::MissingKey { table })?;

    let affected: usize = match record {
        Record::Department(r) => diesel::update(departments::table.find(id))
            .set((
                departments::name.eq(&r.name),
                departments::is_active.eq(i32::from(r.is_active)),
            ))
            .execute(conn)?,
        Record::DepartmentHead(r) => diesel::update(department_heads::table.find(id))
            .set((
                department_heads::name.eq(&r.name),
                department_heads::email.eq(&r.email),
                department_heads::department_id.eq(r.department),
                department_heads::management_enabled.eq(i32::from(r.management_enabled)),
            ))
            .execute(conn)?,
        Record::Faculty(r) => {
            let (kind, target) = coordinator_columns(r.coordinator_for);
            let affected: usize = diesel::update(faculty::table.find(id))
                .set((
                    faculty::name.eq(&r.name),
                    faculty::email.eq(&r.email),
                    faculty::coordinator_kind.eq(kind),
                    faculty::coordinator_target.eq(target),
                ))
                .execute(conn)?;
            if affected > 0 {
                replace_faculty_classes(conn, id, &r.assigned_classes)?;
            }
            affected
        }
        Record::Class(r) => diesel::update(classes::table.find(id))
            .set((
                classes::name.eq(&r.name),
                classes::year.eq(&r.year),
                classes::class_coordinator.eq(r.class_coordinator),
            ))
            .execute(conn)?,
        Record::Division(r) => diesel::update(divisions::table.find(id))
            .set((
                divisions::name.eq(&r.name),
                divisions::class_coordinator.eq(r.class_coordinator),
            ))
            .execute(conn)?,
        Record::Lab(r) => diesel::update(labs::table.find(id))
            .set((
                labs::name.eq(&r.name),
                labs::roll_start.eq(i64::from(r.range.start())),
                labs::roll_end.eq(i64::from(r.range.end())),
            ))
            .execute(conn)?,
        Record::Subject(r) => diesel::update(subjects::table.find(id))
            .set((
                subjects::name.eq(&r.name),
                subjects::credits.eq(i32::from(r.credits)),
            ))
            .execute(conn)?,
    };

    if affected == 0 {
        return Err(PersistenceError::RecordNotFound { table, id });
    }

    debug!(table, id, "Updated record");
    Ok(())
}

/// Deletes a record by storage key.
///
/// Dependent divisions, labs and teaching assignments are removed by the
/// schema's cascading foreign keys.
///
/// # Errors
///
/// Returns `PersistenceError::RecordNotFound` if no row has that key, or
/// another error if the delete fails.
pub fn delete_record(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: i64,
) -> Result<(), PersistenceError> {
    let table: &'static str = table_name(kind);

    let affected: usize = match kind {
        EntityKind::Department => diesel::delete(departments::table.find(id)).execute(conn)?,
        EntityKind::DepartmentHead => {
            diesel::delete(department_heads::table.find(id)).execute(conn)?
        }
        EntityKind::Faculty => diesel::delete(faculty::table.find(id)).execute(conn)?,
        EntityKind::Class => diesel::delete(classes::table.find(id)).execute(conn)?,
        EntityKind::Division => diesel::delete(divisions::table.find(id)).execute(conn)?,
        EntityKind::Lab => diesel::delete(labs::table.find(id)).execute(conn)?,
        EntityKind::Subject => diesel::delete(subjects::table.find(id)).execute(conn)?,
    };

    if affected == 0 {
        return Err(PersistenceError::RecordNotFound { table, id });
    }

    info!(table, id, "Deleted record");
    Ok(())
}

/// Applies an ordered list of mutations as one transaction.
///
/// Either every mutation is written or none is.
///
/// # Returns
///
/// The storage keys of inserted records, in mutation order.
///
/// # Errors
///
/// Returns the first error encountered; the transaction is rolled back.
pub fn apply_mutations(
    conn: &mut SqliteConnection,
    mutations: &[Mutation],
) -> Result<Vec<i64>, PersistenceError> {
    conn.transaction::<Vec<i64>, PersistenceError, _>(|conn| {
        let mut inserted: Vec<i64> = Vec::new();
        for mutation in mutations {
            match mutation {
                Mutation::Insert(record) => inserted.push(insert_record(conn, record)?),
                Mutation::Update(record) => update_record(conn, record)?,
                Mutation::Delete { kind, id } => delete_record(conn, *kind, *id)?,
            }
        }
        Ok(inserted)
    })
}
