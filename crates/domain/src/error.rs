// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{CoordinatorTarget, EntityKind};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required attribute for identifier generation is missing.
    EmptyInput {
        /// The attribute that was empty.
        field: &'static str,
    },
    /// The resolved identifier is already taken in its collection.
    DuplicateIdentifier {
        /// The entity kind whose collection holds the identifier.
        kind: EntityKind,
        /// The colliding identifier.
        identifier: String,
    },
    /// The email address is already registered for this entity kind.
    DuplicateEmail {
        /// The entity kind.
        kind: EntityKind,
        /// The normalized email address.
        email: String,
    },
    /// The email address is not syntactically usable.
    InvalidEmail(String),
    /// A roll-number range has `start > end`.
    InvalidRange {
        /// The requested first roll number.
        start: u32,
        /// The requested last roll number.
        end: u32,
    },
    /// A proposed lab range intersects an existing lab in the same scope.
    RangeOverlap {
        /// The derived identifier of the conflicting lab.
        lab_id: String,
        /// The display name of the conflicting lab.
        lab_name: String,
        /// The first roll number of the conflicting lab.
        start: u32,
        /// The last roll number of the conflicting lab.
        end: u32,
    },
    /// The coordinator target already has a coordinator.
    TargetAlreadyCoordinated {
        /// The target that is already coordinated.
        target: CoordinatorTarget,
        /// The faculty member holding the assignment.
        coordinator: i64,
    },
    /// The faculty member already coordinates a different target.
    FacultyAlreadyCoordinating {
        /// The faculty member.
        faculty: i64,
        /// The target the faculty member currently coordinates.
        current: CoordinatorTarget,
    },
    /// The faculty member holds no coordinator assignment.
    NotACoordinator {
        /// The faculty member.
        faculty: i64,
    },
    /// The department already has a head assigned.
    DepartmentAlreadyHeaded {
        /// The department.
        department: i64,
        /// The head currently assigned.
        head: i64,
    },
    /// A lab cannot be scoped to a class that has divisions.
    ClassHasDivisions {
        /// The class.
        class: i64,
    },
    /// A division cannot be added to a class that already has class-scoped labs.
    ClassHasLabs {
        /// The class.
        class: i64,
    },
    /// Subject credits must be positive.
    InvalidCredits(u8),
    /// A referenced record does not exist.
    NotFound {
        /// The kind of record.
        kind: EntityKind,
        /// The storage key that was looked up.
        id: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput { field } => write!(f, "Required field '{field}' is empty"),
            Self::DuplicateIdentifier { kind, identifier } => {
                write!(f, "{kind} identifier '{identifier}' is already in use")
            }
            Self::DuplicateEmail { kind, email } => {
                write!(f, "{kind} with email '{email}' already exists")
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{email}'"),
            Self::InvalidRange { start, end } => {
                write!(
                    f,
                    "Invalid roll number range: start {start} is greater than end {end}"
                )
            }
            Self::RangeOverlap {
                lab_id,
                lab_name,
                start,
                end,
            } => {
                write!(
                    f,
                    "Roll number range overlaps with lab '{lab_name}' ({lab_id}, range {start}-{end})"
                )
            }
            Self::TargetAlreadyCoordinated {
                target,
                coordinator,
            } => {
                write!(
                    f,
                    "{target} already has a coordinator (faculty {coordinator})"
                )
            }
            Self::FacultyAlreadyCoordinating { faculty, current } => {
                write!(f, "Faculty {faculty} is already coordinator of {current}")
            }
            Self::NotACoordinator { faculty } => {
                write!(f, "Faculty {faculty} holds no coordinator assignment")
            }
            Self::DepartmentAlreadyHeaded { department, head } => {
                write!(
                    f,
                    "Department {department} already has a head (department head {head})"
                )
            }
            Self::ClassHasDivisions { class } => {
                write!(
                    f,
                    "Class {class} has divisions; labs must be scoped to a division"
                )
            }
            Self::ClassHasLabs { class } => {
                write!(
                    f,
                    "Class {class} has class-scoped labs; divisions cannot be added"
                )
            }
            Self::InvalidCredits(credits) => {
                write!(f, "Invalid credits: {credits}. Must be greater than 0")
            }
            Self::NotFound { kind, id } => write!(f, "{kind} {id} not found"),
        }
    }
}

impl std::error::Error for DomainError {}
