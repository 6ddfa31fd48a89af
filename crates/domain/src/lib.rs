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

mod coordinator;
mod error;
mod identifiers;
mod overlap;
mod types;
mod uniqueness;
mod validation;

#[cfg(test)]
mod tests;

pub use coordinator::{
    CoordinatorSlot, coordinator_links_consistent, validate_assignment, validate_removal,
};
pub use error::DomainError;
pub use identifiers::{
    class_id, department_code, division_id, employee_id, faculty_initials_id, lab_id,
    normalize_identifier, require_identifier, subject_id,
};
pub use overlap::{find_overlap, next_available_start, ranges_overlap, validate_lab_range};
pub use uniqueness::{
    PADDED_BASE_MAX_LEN, SuffixScheme, UniquenessCheck, is_identifier_free, resolve_unique,
};

// Re-export public types
pub use types::{
    Class, CoordinatorTarget, Department, DepartmentHead, Division, EntityKind, Faculty,
    FacultyIdScheme, Lab, LabScope, RollRange, Subject, normalize_email,
};
pub use validation::{
    validate_credits, validate_department_unheaded, validate_email, validate_email_unique,
    validate_required,
};
