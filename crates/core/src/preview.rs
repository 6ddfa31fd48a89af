// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only identifier previews.
//!
//! Forms call these while the user types to show the identifier a record
//! would receive. The same functions are used when the command is applied,
//! so the preview and the stored value agree unless a concurrent writer
//! intervenes.

use reflektion_domain::{
    DomainError, FacultyIdScheme, LabScope, SuffixScheme, UniquenessCheck, class_id,
    department_code, division_id, employee_id, faculty_initials_id, lab_id,
    next_available_start, resolve_unique, subject_id,
};
use serde::{Deserialize, Serialize};

use crate::state::State;

/// Preview of a new lab's identifier and suggested range start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabPreview {
    pub check: UniquenessCheck,
    pub next_available_start: u32,
}

/// Previews the code a new department would receive.
#[must_use]
pub fn preview_department_code(state: &State, name: &str) -> UniquenessCheck {
    resolve_unique(
        &department_code(name),
        state.departments.iter().map(|d| d.code.as_str()),
        SuffixScheme::Numeric,
    )
}

/// Previews the employee ID a new department head would receive.
#[must_use]
pub fn preview_employee_id(state: &State, name: &str) -> UniquenessCheck {
    resolve_unique(
        &employee_id(name),
        state.department_heads.iter().map(|h| h.employee_id.as_str()),
        SuffixScheme::Padded,
    )
}

/// Previews the faculty ID a new faculty member would receive.
#[must_use]
pub fn preview_faculty_id(
    state: &State,
    name: &str,
    email: &str,
    scheme: FacultyIdScheme,
    current_year: i32,
) -> UniquenessCheck {
    let existing = state.faculty.iter().map(|f| f.faculty_id.as_str());
    match scheme {
        FacultyIdScheme::NameBased => {
            resolve_unique(&employee_id(name), existing, SuffixScheme::Padded)
        }
        FacultyIdScheme::Initials => resolve_unique(
            &faculty_initials_id(name, email, current_year),
            existing,
            SuffixScheme::Numeric,
        ),
    }
}

/// Previews the class ID a new class would receive.
#[must_use]
pub fn preview_class_id(state: &State, name: &str, year: &str) -> UniquenessCheck {
    resolve_unique(
        &class_id(name, year),
        state.classes.iter().map(|c| c.class_id.as_str()),
        SuffixScheme::Numeric,
    )
}

/// Previews the division ID a new division of `class` would receive.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the class does not exist.
pub fn preview_division_id(
    state: &State,
    class: i64,
    name: &str,
    current_year: i32,
) -> Result<UniquenessCheck, DomainError> {
    let owner = state.class(class)?;
    Ok(resolve_unique(
        &division_id(&owner.name, name, current_year),
        state.divisions.iter().map(|d| d.division_id.as_str()),
        SuffixScheme::Numeric,
    ))
}

/// Previews the lab ID and suggested first roll number for a new lab.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the scope's class or division does
/// not exist.
pub fn preview_lab(
    state: &State,
    scope: LabScope,
    name: &str,
    current_year: i32,
) -> Result<LabPreview, DomainError> {
    let candidate: String = match scope {
        LabScope::Class(class) => {
            let owner = state.class(class)?;
            lab_id(&owner.name, None, name, current_year)
        }
        LabScope::Division(division) => {
            let division = state.division(division)?;
            let owner = state.class(division.owner_class)?;
            lab_id(&owner.name, Some(&division.name), name, current_year)
        }
    };

    Ok(LabPreview {
        check: resolve_unique(
            &candidate,
            state.labs.iter().map(|l| l.lab_id.as_str()),
            SuffixScheme::Numeric,
        ),
        next_available_start: next_available_start(scope, &state.labs),
    })
}

/// Previews the subject ID a new subject would receive.
#[must_use]
pub fn preview_subject_id(state: &State, code: &str, name: &str) -> UniquenessCheck {
    resolve_unique(
        &subject_id(code, name),
        state.subjects.iter().map(|s| s.subject_id.as_str()),
        SuffixScheme::Numeric,
    )
}
