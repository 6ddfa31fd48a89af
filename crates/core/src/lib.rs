// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod apply;
mod command;
mod error;
mod preview;
mod state;

#[cfg(test)]
mod tests;

use reflektion_domain::{CoordinatorTarget, DomainError, LabScope};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use preview::{
    LabPreview, preview_class_id, preview_department_code, preview_division_id,
    preview_employee_id, preview_faculty_id, preview_lab, preview_subject_id,
};
pub use state::{Action, Mutation, Record, State, TransitionResult};

/// Validates that the class or division a lab is scoped to exists.
///
/// This is a read-only validation used before previewing lab identifiers.
///
/// # Arguments
///
/// * `state` - The state to check
/// * `scope` - The lab scope to validate
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the class or division does not exist.
pub fn validate_scope_exists(state: &State, scope: LabScope) -> Result<(), DomainError> {
    match scope {
        LabScope::Class(class) => state.class(class).map(|_| ()),
        LabScope::Division(division) => state.division(division).map(|_| ()),
    }
}

/// Validates that a coordinator target exists.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the class or division does not exist.
pub fn validate_target_exists(
    state: &State,
    target: CoordinatorTarget,
) -> Result<(), DomainError> {
    match target {
        CoordinatorTarget::Class(class) => state.class(class).map(|_| ()),
        CoordinatorTarget::Division(division) => state.division(division).map(|_| ()),
    }
}
