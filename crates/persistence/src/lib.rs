// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Reflektion.
//!
//! Records are stored in `SQLite` through Diesel. The schema is applied from
//! embedded migrations when a connection is opened.
//!
//! ## Identifier Uniqueness
//!
//! Identifier previews are advisory. Every derived identifier column and
//! every email column carries a UNIQUE constraint, and a write that loses a
//! race surfaces as [`PersistenceError::DuplicateIdentifier`].
//!
//! ## Atomic Writes
//!
//! A state transition produces an ordered list of mutations. They are
//! written by [`Persistence::apply_mutations`] inside one transaction, so
//! both sides of a coordinator link and every cascaded delete land
//! together or not at all.
//!
//! ## Testing
//!
//! Tests use [`Persistence::new_in_memory`], which gives every call its own
//! shared-cache in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use reflektion::{Mutation, Record, State};
use reflektion_domain::{
    Class, Department, DepartmentHead, Division, EntityKind, Faculty, Lab, LabScope, Subject,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Counter giving each in-memory database a distinct name.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist and switched to WAL mode.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    /// Loads every collection as one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored row is malformed.
    pub fn load_state(&mut self) -> Result<State, PersistenceError> {
        queries::load_state(&mut self.conn)
    }

    // ========================================================================
    // Listing
    // ========================================================================

    /// Lists every department in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_departments(&mut self) -> Result<Vec<Department>, PersistenceError> {
        queries::list_departments(&mut self.conn)
    }

    /// Lists every department head in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_department_heads(&mut self) -> Result<Vec<DepartmentHead>, PersistenceError> {
        queries::list_department_heads(&mut self.conn)
    }

    /// Lists every faculty member in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_faculty(&mut self) -> Result<Vec<Faculty>, PersistenceError> {
        queries::list_faculty(&mut self.conn)
    }

    /// Lists every class in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_classes(&mut self) -> Result<Vec<Class>, PersistenceError> {
        queries::list_classes(&mut self.conn)
    }

    /// Lists divisions, optionally only those of one class.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_divisions(
        &mut self,
        owner_class: Option<i64>,
    ) -> Result<Vec<Division>, PersistenceError> {
        queries::list_divisions(&mut self.conn, owner_class)
    }

    /// Lists labs, optionally only those in one scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_labs(&mut self, scope: Option<LabScope>) -> Result<Vec<Lab>, PersistenceError> {
        queries::list_labs(&mut self.conn, scope)
    }

    /// Lists every subject in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_subjects(&mut self) -> Result<Vec<Subject>, PersistenceError> {
        queries::list_subjects(&mut self.conn)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Inserts one record and returns its storage key.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateIdentifier` if a unique
    /// constraint rejects the record, or another error if the insert fails.
    pub fn insert_record(&mut self, record: &Record) -> Result<i64, PersistenceError> {
        mutations::insert_record(&mut self.conn, record)
    }

    /// Writes the mutable columns of one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has no key, does not exist, or the
    /// update fails.
    pub fn update_record(&mut self, record: &Record) -> Result<(), PersistenceError> {
        mutations::update_record(&mut self.conn, record)
    }

    /// Deletes one record, cascading to its dependents.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or the delete fails.
    pub fn delete_record(&mut self, kind: EntityKind, id: i64) -> Result<(), PersistenceError> {
        mutations::delete_record(&mut self.conn, kind, id)
    }

    /// Applies the mutations of one state transition atomically.
    ///
    /// # Returns
    ///
    /// The storage keys assigned to inserted records, in order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; nothing is written in that case.
    pub fn apply_mutations(&mut self, batch: &[Mutation]) -> Result<Vec<i64>, PersistenceError> {
        mutations::apply_mutations(&mut self.conn, batch)
    }
}
